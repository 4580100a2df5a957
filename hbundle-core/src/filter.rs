//! Inclusion rules for enumerated files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::BundleConfig;
use crate::output::section_label;

/// Decides which enumerated files end up in the bundle.
#[derive(Debug, Clone)]
pub struct HeaderFilter {
    output: PathBuf,
    output_canonical: Option<PathBuf>,
    aggregate_name: String,
    header_suffix: String,
    excludes: Vec<Regex>,
}

impl HeaderFilter {
    pub fn new(
        output: impl Into<PathBuf>,
        aggregate_name: impl Into<String>,
        header_suffix: impl Into<String>,
    ) -> Self {
        let output = output.into();
        let output_canonical = fs::canonicalize(&output).ok();
        Self {
            output,
            output_canonical,
            aggregate_name: aggregate_name.into(),
            header_suffix: header_suffix.into(),
            excludes: Vec::new(),
        }
    }

    pub fn with_excludes(mut self, excludes: Vec<Regex>) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn from_config(config: &BundleConfig) -> Result<Self> {
        let excludes = compile_patterns(&config.exclude_patterns)?;
        Ok(Self::new(
            config.output_path(),
            config.aggregate_name.clone(),
            config.header_suffix.clone(),
        )
        .with_excludes(excludes))
    }

    /// `path` is the file as enumerated, `relative` the same file relative
    /// to the bundle root. Exclude patterns see `relative` with `/` separators.
    pub fn accepts(&self, path: &Path, relative: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        if name == self.aggregate_name.as_str() {
            return false;
        }

        if !name.ends_with(self.header_suffix.as_str()) {
            return false;
        }

        if self.is_output(path) {
            return false;
        }

        if !self.excludes.is_empty() {
            let label = section_label(relative, '/');
            if self.excludes.iter().any(|re| re.is_match(&label)) {
                return false;
            }
        }

        true
    }

    fn is_output(&self, path: &Path) -> bool {
        if path == self.output {
            return true;
        }
        if path.file_name() != self.output.file_name() {
            return false;
        }
        match (&self.output_canonical, fs::canonicalize(path)) {
            (Some(output), Ok(candidate)) => *output == candidate,
            _ => false,
        }
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid exclude pattern: {p}")))
        .collect()
}

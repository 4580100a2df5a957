//! Bundle configuration and JSON config loading

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Source directories scanned when none are configured, in output order.
pub const DEFAULT_DIRECTORIES: [&str; 6] =
    ["Strings", "Files", "Execute", "Http", "SharedMemory", "DLLs"];

/// Header that always opens the bundle.
pub const DEFAULT_SEED: &str = "Strings/From/Basics.h";

/// Where the merged header is written, relative to the root.
pub const DEFAULT_OUTPUT: &str = "../JustAll.h";

/// File name of pre-merged aggregate headers that must never be bundled.
pub const DEFAULT_AGGREGATE_NAME: &str = "All.h";

/// File name ending a path must have to be bundled (case-sensitive).
pub const DEFAULT_HEADER_SUFFIX: &str = ".h";

/// Joins path components in section labels, as in the original `JustAll.h`.
pub const DEFAULT_LABEL_SEPARATOR: char = '\\';

/// Everything a single bundling run needs to know.
///
/// Relative paths in `directories`, `seed` and `output` are interpreted
/// against `root`. Section labels are the header paths relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub seed: PathBuf,
    pub output: PathBuf,
    pub aggregate_name: String,
    pub header_suffix: String,
    pub label_separator: char,
    pub exclude_patterns: Vec<String>,
    pub sorted: bool,
    pub follow_symlinks: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            directories: DEFAULT_DIRECTORIES.into_iter().map(PathBuf::from).collect(),
            seed: PathBuf::from(DEFAULT_SEED),
            output: PathBuf::from(DEFAULT_OUTPUT),
            aggregate_name: DEFAULT_AGGREGATE_NAME.to_string(),
            header_suffix: DEFAULT_HEADER_SUFFIX.to_string(),
            label_separator: DEFAULT_LABEL_SEPARATOR,
            exclude_patterns: Vec::new(),
            sorted: false,
            follow_symlinks: false,
        }
    }
}

impl BundleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_directories<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.directories = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: impl Into<PathBuf>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn sorted(mut self, yes: bool) -> Self {
        self.sorted = yes;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Join a relative path onto the root; absolute paths pass through.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }
}

/// Load a JSON config file. Missing fields keep their defaults.
pub fn load_config(path: &Path) -> Result<BundleConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: BundleConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

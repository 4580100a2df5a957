//! Collecting header contents in bundle order

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::BundleConfig;
use crate::discovery::{enumerate, WalkOptions};
use crate::filter::HeaderFilter;
use crate::output::section_label;

/// Ordered header paths plus their text.
///
/// The order list starts with the seed (if any) and grows in first-seen
/// order. Paths are relative to the bundle root.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    seed: Option<PathBuf>,
    order: Vec<PathBuf>,
    contents: HashMap<PathBuf, String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `seed` reserved in first position. Its content must be
    /// inserted later or rendering fails.
    pub fn with_seed(seed: impl Into<PathBuf>) -> Self {
        let seed = seed.into();
        Self {
            order: vec![seed.clone()],
            seed: Some(seed),
            contents: HashMap::new(),
        }
    }

    pub fn seed(&self) -> Option<&Path> {
        self.seed.as_deref()
    }

    /// Append `path` if unseen, then store its content (last write wins).
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        if !self.order.contains(&path) {
            self.order.push(path.clone());
        }
        self.contents.insert(path, content.into());
    }

    pub fn order(&self) -> &[PathBuf] {
        &self.order
    }

    pub fn content(&self, path: &Path) -> Option<&str> {
        self.contents.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.contents.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ordered paths that have no content yet.
    pub fn missing(&self) -> Vec<&Path> {
        self.order
            .iter()
            .filter(|p| !self.contents.contains_key(*p))
            .map(PathBuf::as_path)
            .collect()
    }
}

/// Walk every configured directory and read the headers that pass the filter.
///
/// Each accepted header's label is written to `progress` before it is read.
/// The first traversal or read error aborts the whole collection.
pub fn collect(config: &BundleConfig, mut progress: impl Write) -> Result<HeaderSet> {
    let filter = HeaderFilter::from_config(config)?;
    let opts = WalkOptions {
        follow_symlinks: config.follow_symlinks,
        sorted: config.sorted,
    };

    let seed = relative_to(&config.root, &config.resolve(&config.seed));
    let mut set = HeaderSet::with_seed(seed);

    for dir in &config.directories {
        let resolved = config.resolve(dir);
        for path in enumerate(&resolved, &opts)? {
            let path = path.with_context(|| format!("walking {}", resolved.display()))?;
            let relative = relative_to(&config.root, &path);
            if !filter.accepts(&path, &relative) {
                continue;
            }

            writeln!(progress, "{}", section_label(&relative, config.label_separator))?;

            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading header {}", path.display()))?;
            set.insert(relative, content);
        }
    }

    Ok(set)
}

/// `path` relative to `root`, with `.` components dropped. Paths outside
/// the root are kept whole.
pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
    let stripped = path.strip_prefix(root).unwrap_or(path);
    stripped
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

//! Lazy recursive file enumeration for source directories

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    pub follow_symlinks: bool,
    /// Sort siblings by file name instead of keeping the filesystem's order.
    pub sorted: bool,
}

/// Files below one directory, produced on demand.
///
/// Regular files and symlinks that do not point at a directory are yielded,
/// dangling links included. Symlinked directories are only entered when
/// following links. Traversal errors surface as `Err` items so the consumer
/// decides when to stop.
pub struct FileWalk {
    inner: walkdir::IntoIter,
}

impl Iterator for FileWalk {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };
            if entry.file_type().is_file() || (entry.path_is_symlink() && !entry.path().is_dir())
            {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

/// Start walking `dir`. Fails immediately if the directory is missing.
pub fn enumerate(dir: &Path, opts: &WalkOptions) -> Result<FileWalk> {
    if !dir.is_dir() {
        return Err(anyhow!("source directory does not exist: {}", dir.display()));
    }

    let mut walker = WalkDir::new(dir).follow_links(opts.follow_symlinks);
    if opts.sorted {
        walker = walker.sort_by_file_name();
    }

    Ok(FileWalk {
        inner: walker.into_iter(),
    })
}

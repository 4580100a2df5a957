//! Rendering the merged header and bundle manifests

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::collect::HeaderSet;
use crate::config::BundleConfig;
use crate::transform::neutralize;

/// First bytes of every bundle.
pub const BUNDLE_PREAMBLE: &str = "#pragma once\n\n";

/// Render a root-relative path as a section label joined by `separator`.
///
/// Root and `.` components are dropped, so a path outside the root renders
/// without a leading separator.
pub fn section_label(path: &Path, separator: char) -> String {
    let mut label = String::new();
    for part in path.components() {
        if matches!(part, Component::RootDir | Component::CurDir) {
            continue;
        }
        if !label.is_empty() {
            label.push(separator);
        }
        label.push_str(&part.as_os_str().to_string_lossy());
    }
    label
}

/// Write the preamble followed by one labeled section per header, in order.
///
/// Fails on the first ordered path without content; whatever was written
/// before that point stays in `w`.
pub fn write_bundle(set: &HeaderSet, separator: char, mut w: impl Write) -> Result<()> {
    w.write_all(BUNDLE_PREAMBLE.as_bytes())?;

    for path in set.order() {
        let content = set
            .content(path)
            .ok_or_else(|| anyhow!("no content collected for {}", path.display()))?;

        write!(w, "\n\n// ::{}::\n\n", section_label(path, separator))?;
        w.write_all(neutralize(content).as_bytes())?;
        w.write_all(b"\n\n")?;
    }

    w.flush()?;
    Ok(())
}

/// Create (or truncate) the configured output file and write the bundle into it.
pub fn emit(set: &HeaderSet, config: &BundleConfig) -> Result<PathBuf> {
    let path = config.output_path();
    let file =
        File::create(&path).with_context(|| format!("creating output {}", path.display()))?;

    write_bundle(set, config.label_separator, BufWriter::new(file))
        .with_context(|| format!("writing output {}", path.display()))?;

    Ok(path)
}

/// One ordered header as reported by `hbundle list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub label: String,
    pub bytes: usize,
    pub seed: bool,
}

/// Summarize the header set in bundle order. Paths without content report 0 bytes.
pub fn manifest(set: &HeaderSet, separator: char) -> Vec<ManifestEntry> {
    set.order()
        .iter()
        .map(|path| ManifestEntry {
            path: path.clone(),
            label: section_label(path, separator),
            bytes: set.content(path).map(str::len).unwrap_or(0),
            seed: set.seed() == Some(path.as_path()),
        })
        .collect()
}

/// Write manifest entries as prettified JSON array.
pub fn write_json_pretty(entries: &[ManifestEntry], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write manifest entries as newline-delimited JSON (NDJSON).
pub fn write_ndjson(entries: &[ManifestEntry], mut w: impl Write) -> Result<()> {
    for item in entries {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

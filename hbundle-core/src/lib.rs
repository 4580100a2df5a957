//! hbundle-core: merge a header-only library into one distributable header.
//!
//! A run walks an ordered list of source directories, keeps the files that
//! look like ordinary headers, and writes them into a single output file with
//! their include guards and local includes commented out.
//!
//! ```rust,no_run
//! use hbundle_core::config::BundleConfig;
//! use hbundle_core::{collect::collect, output::emit};
//!
//! let config = BundleConfig::new()
//!     .with_root("Source")
//!     .with_output("../JustAll.h");
//!
//! let headers = collect(&config, std::io::stdout())?;
//! let written = emit(&headers, &config)?;
//! println!("wrote {}", written.display());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Output order is the seed header first, then every other header in
//! directory order and, inside each directory, filesystem traversal order.
//! That traversal order is platform dependent unless the `sorted` option
//! of [`config::BundleConfig`] is enabled.

pub mod collect;
pub mod config;
pub mod discovery;
pub mod filter;
pub mod output;
pub mod transform;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

/// Collect and emit in one call. Returns the path written.
pub fn bundle(config: &config::BundleConfig, progress: impl Write) -> Result<PathBuf> {
    let headers = collect::collect(config, progress)?;
    output::emit(&headers, config)
}

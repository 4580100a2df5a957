//! hbundle CLI

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use hbundle_core::collect::{collect, HeaderSet};
use hbundle_core::config::{load_config, BundleConfig};
use hbundle_core::output::{emit, manifest, write_bundle, write_json_pretty, write_ndjson};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "HBUNDLE_CONFIG";

/// CLI entrypoint for hbundle.
#[derive(Debug, Parser)]
#[command(
    name = "hbundle",
    about = "Merge a header-only library into a single distributable header"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Collect headers and write the merged bundle
    Bundle(BundleArgs),
    /// Show which headers would be bundled, in order
    List(ListArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// JSON config file (defaults to $HBUNDLE_CONFIG when set)
    #[arg(long = "config", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory that source directories and labels are relative to
    #[arg(short = 'C', long = "root", value_hint = ValueHint::DirPath)]
    root: Option<PathBuf>,

    /// Source directory to scan, in output order (repeatable)
    #[arg(short = 'd', long = "dir", value_hint = ValueHint::DirPath)]
    dirs: Vec<PathBuf>,

    /// Header that always opens the bundle
    #[arg(long = "seed", value_hint = ValueHint::FilePath)]
    seed: Option<PathBuf>,

    /// Regex over slash-separated relative paths; matching headers are skipped
    #[arg(short = 'x', long = "exclude", value_hint = ValueHint::Other)]
    excludes: Vec<String>,

    /// Sort directory entries by name for a platform-independent order
    #[arg(long = "sorted", action = ArgAction::SetTrue)]
    sorted: bool,

    /// Follow symlinks while walking directories
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Character joining path components in section labels
    #[arg(long = "separator")]
    separator: Option<char>,
}

#[derive(Debug, Args)]
struct BundleArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output header path
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Write the bundle to stdout; progress goes to stderr
    #[arg(long = "stdout", action = ArgAction::SetTrue, conflicts_with = "output")]
    stdout: bool,

    /// Do not print each collected header
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Bundle(args) => run_bundle(args),
        Command::List(args) => run_list(args),
    }
}

fn run_bundle(args: BundleArgs) -> Result<()> {
    let mut config = build_config(&args.source, env::var_os(CONFIG_ENV).map(PathBuf::from))?;
    if let Some(output) = &args.output {
        config.output = output.clone();
    }

    let headers = if args.quiet {
        collect(&config, io::sink())?
    } else if args.stdout {
        collect(&config, io::stderr().lock())?
    } else {
        collect(&config, io::stdout().lock())?
    };

    if args.stdout {
        let stdout = io::stdout();
        write_bundle(&headers, config.label_separator, stdout.lock())?;
    } else {
        let written = emit(&headers, &config)?;
        if !args.quiet {
            println!("wrote {} headers to {}", headers.len(), written.display());
        }
    }

    Ok(())
}

fn run_list(args: ListArgs) -> Result<()> {
    let config = build_config(&args.source, env::var_os(CONFIG_ENV).map(PathBuf::from))?;
    let headers = collect(&config, io::sink())?;
    if let Some(path) = headers.missing().first() {
        return Err(anyhow!("no content collected for {}", path.display()));
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.ndjson {
        write_ndjson(&manifest(&headers, config.label_separator), &mut handle)?;
    } else if args.json {
        write_json_pretty(&manifest(&headers, config.label_separator), &mut handle)?;
    } else {
        write_plain(&headers, config.label_separator, &mut handle)?;
    }

    Ok(())
}

/// Defaults, then the config file, then individual flags.
fn build_config(args: &SourceArgs, env_config: Option<PathBuf>) -> Result<BundleConfig> {
    let mut config = match args.config.clone().or(env_config) {
        Some(path) => load_config(&path)?,
        None => BundleConfig::default(),
    };

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if !args.dirs.is_empty() {
        config.directories = args.dirs.clone();
    }
    if let Some(seed) = &args.seed {
        config.seed = seed.clone();
    }
    if !args.excludes.is_empty() {
        config.exclude_patterns.extend(args.excludes.iter().cloned());
    }
    if let Some(separator) = args.separator {
        config.label_separator = separator;
    }
    config.sorted |= args.sorted;
    config.follow_symlinks |= args.follow_symlinks;

    if config.directories.is_empty() {
        return Err(anyhow!("no source directories configured"));
    }

    Ok(config)
}

fn write_plain(headers: &HeaderSet, separator: char, mut w: impl Write) -> Result<()> {
    for entry in manifest(headers, separator) {
        if entry.seed {
            writeln!(w, "{} (seed)", entry.label)?;
        } else {
            writeln!(w, "{}", entry.label)?;
        }
    }
    Ok(())
}

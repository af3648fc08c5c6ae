//! Configuration for the validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Dialect selection (embedded or from a TOML file)
//!
//! Every option has a default, so a bare invocation validates `LayoutLedger`.

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::dialect::Dialect;

/// Directory scanned when none is given
pub const DEFAULT_ROOT: &str = "LayoutLedger";
/// Directory name holding vendored libraries
pub const DEFAULT_EXCLUDE: &str = "Libs";
/// Extension of candidate files
pub const MARKUP_EXTENSION: &str = "xml";

/// Command-line arguments for the validator
#[derive(Debug, Parser)]
#[command(name = "wow-ui-validate")]
#[command(about = "Validate WoW addon UI XML files")]
#[command(version)]
pub struct Args {
    /// Addon directory to scan
    #[arg(default_value = DEFAULT_ROOT)]
    pub directory: PathBuf,

    /// Directory name to skip at any depth
    #[arg(long, default_value = DEFAULT_EXCLUDE, help = "Directory name to skip (vendored libraries)")]
    pub exclude: String,

    /// Dialect definition to use instead of the built-in one
    #[arg(long, help = "Dialect TOML file")]
    pub dialect: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level for diagnostics on stderr
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub exclude_dir: String,
    pub extension: String,
    pub dialect: Dialect,
    pub color: bool,
}

impl Config {
    /// Create configuration from parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let dialect = match &args.dialect {
            Some(path) => Dialect::from_file(path)?,
            None => Dialect::builtin(),
        };

        Ok(Config {
            root: args.directory,
            exclude_dir: args.exclude,
            extension: MARKUP_EXTENSION.to_string(),
            dialect,
            color: !args.no_color && std::io::stdout().is_terminal(),
        })
    }

    /// Fixed-behavior configuration for a given directory
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Config {
            root: root.into(),
            exclude_dir: DEFAULT_EXCLUDE.to_string(),
            extension: MARKUP_EXTENSION.to_string(),
            dialect: Dialect::builtin(),
            color: false,
        }
    }
}

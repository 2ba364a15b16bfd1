//! Module describing all possible commands and sub-commands to the `sepctl` main driver
//!
//! We have two main commands:
//!
//! - `fetch`
//! - `watch`
//!
//! `fetch` retrieves one fleet snapshot (raw or post-avoidance) and dumps it into a
//! file or as a table on `stdout`.
//!
//! `watch` is the dashboard: it runs a fetch/project/render cycle on a fixed interval
//! until cancelled, printing summary metrics and tables and rewriting the SVG charts
//! each cycle.
//!
//! `completion` is here just to configure the various shells completion system.
//!
//! A `Site` is a `Fetchable` object from the `sources` crate; data formats live in the
//! `formats` crate.
//!

use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Parser, ValueEnum,
};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode (hierarchical tracing output).
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `fetch [-p] [-o FILE] [site]`
/// `watch [-i SECS] [-n CYCLES] [-o DIR] [site]`
/// `list (formats|sources)`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Fetch one snapshot from the deconfliction service
    Fetch(FetchOpts),
    /// Display all known formats or sources
    List(ListOpts),
    /// Run the refreshing dashboard
    Watch(WatchOpts),
    /// List all package versions
    Version,
}

// ------

/// Options for fetching one snapshot with an optional output file.
///
#[derive(Debug, Parser)]
pub struct FetchOpts {
    /// Ask for the snapshot after the avoidance pass instead of the raw one
    #[clap(short = 'p', long)]
    pub processed: bool,
    /// Output file (format deduced from the extension, .json or .csv)
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Site name (default taken from the configuration)
    pub site: Option<String>,
}

// ------

/// Options for the dashboard loop.
///
#[derive(Debug, Parser)]
pub struct WatchOpts {
    /// Refresh interval in seconds (default taken from the configuration)
    #[clap(short = 'i', long)]
    pub interval: Option<u64>,
    /// Directory the charts are written into
    #[clap(short = 'o', long, default_value = "dashboard")]
    pub output: PathBuf,
    /// Stop after that many cycles instead of running until Ctrl-C
    #[clap(short = 'n', long)]
    pub cycles: Option<usize>,
    /// Site name (default taken from the configuration)
    pub site: Option<String>,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// All `list` sub-commands:
///
/// `list formats`
/// `list sources`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// List all formats we can decode
    Formats,
    /// List all sources from `sources.hcl`
    Sources,
}

use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use strum::VariantNames;
use tracing::trace;

use sepctl::{Config, ListSubCommand, Opts, SubCommand};
use sepwatch_common::init_logging;
use sepwatch_formats::Format;
use sepwatch_sources::Sources;

/// Binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();
    let cfn = opts.config.clone();

    // Initialise logging.
    //
    init_logging(NAME, opts.debug, None)?;

    // Presentation-side config & the list of known sources.
    //
    let cfn = cfn.map(|p| p.to_string_lossy().to_string());
    let cfg = Config::load(cfn.as_deref())?;
    let sources = Sources::load(None)?;

    // Banner
    //
    banner()?;

    let subcmd = &opts.subcmd;
    handle_subcmd(&cfg, &sources, subcmd)
}

pub fn handle_subcmd(cfg: &Config, sources: &Sources, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `fetch site`
        //
        SubCommand::Fetch(fopts) => {
            trace!("fetch");

            sepctl::fetch_from_site(cfg, sources, fopts)?;
        }

        // Handle `watch site`
        //
        SubCommand::Watch(wopts) => {
            trace!("watch");

            sepctl::watch_site(cfg, sources, wopts)?;
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => match lopts.cmd {
            ListSubCommand::Formats => {
                let all = Format::VARIANTS
                    .iter()
                    .filter(|&&s| s != "none")
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ");
                eprintln!("Formats: {}", all);
            }
            ListSubCommand::Sources => {
                let str = sources.list()?;
                eprintln!("{}", str);
            }
        },

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", sepwatch_common::version());
            eprintln!("\t{}", sepwatch_formats::version());
            eprintln!("\t{}", sepwatch_sources::version());
        }
    }
    Ok(())
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}

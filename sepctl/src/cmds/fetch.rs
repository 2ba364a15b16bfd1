//! This is the module handling the `fetch` sub-command.
//!

use std::fs;

use eyre::{eyre, Result};
use tracing::{info, trace};

use sepwatch_common::Container;
use sepwatch_formats::prepare_csv;
use sepwatch_sources::Sources;

use crate::cmds::load_site;
use crate::dashboard::points_table;
use crate::{Config, FetchOpts};

/// Actual fetching of one snapshot from a given site.
///
#[tracing::instrument(skip(cfg, sources))]
pub fn fetch_from_site(cfg: &Config, sources: &Sources, fopts: &FetchOpts) -> Result<()> {
    trace!("fetch_from_site({:?})", fopts.site);

    let site = load_site(cfg, sources, fopts.site.as_deref())?;

    info!("Fetching from network site {}", site.name());

    let snap = site.fetch(fopts.processed)?;
    let points = snap.project();

    // Deduce format from file name if specified, otherwise render a table to stdout.
    //
    match &fopts.output {
        Some(fname) => {
            let data = match Container::from(fname.to_string_lossy().as_ref()) {
                Container::Json => serde_json::to_string_pretty(&snap)?,
                Container::CSV => prepare_csv(&points, true)?,
                Container::Raw => {
                    return Err(eyre!(
                        "can not deduce output format for {fname:?}, use .json or .csv"
                    ))
                }
            };

            info!("Writing to {fname:?}");
            fs::write(fname, data)?;
        }
        None => {
            println!(
                "{} snapshot, {} UAVs, fetched {}",
                snap.tag,
                snap.len(),
                snap.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("{}", points_table(&points));
        }
    }
    Ok(())
}

//! This is the module handling the `watch` sub-command: the refreshing dashboard.
//!
//! An explicit scheduler drives the tick, fetch, project, render cycle.  One tick is
//! strictly ordered: the raw snapshot resolves, then the post-avoidance one, then
//! projection and rendering; there is no fetch-while-rendering.  A failed cycle
//! renders an error indicator instead of the dashboard and the loop simply waits for
//! the next tick; nothing is retried in-cycle and no data is ever made up.
//!
//! Ctrl-C flips a flag which is checked between naps, so shutdown never waits for a
//! whole interval.
//!

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use eyre::Result;
use tracing::{info, trace};

use sepwatch_common::BB;
use sepwatch_sources::{Fetchable, Sources, Stats};

use crate::cmds::load_site;
use crate::dashboard::{render_summary, ChartSet, WatchCycle};
use crate::{Config, WatchOpts};

/// How long one nap lasts while waiting for the next tick.
///
const NAP: Duration = Duration::from_millis(100);

/// Run the dashboard until cancelled (or for `-n` cycles).
///
#[tracing::instrument(skip(cfg, sources))]
pub fn watch_site(cfg: &Config, sources: &Sources, wopts: &WatchOpts) -> Result<()> {
    trace!("watch_site({:?})", wopts.site);

    let site = load_site(cfg, sources, wopts.site.as_deref())?;
    let interval = Duration::from_secs(wopts.interval.unwrap_or(cfg.refresh));
    let charts = ChartSet::new(&wopts.output, BB::from_location(&cfg.reference, cfg.range_nm))?;

    // Setup signals
    //
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

    info!(
        "Watching {} every {}s, charts in {:?}",
        site.name(),
        interval.as_secs(),
        wopts.output
    );

    let mut stats = Stats::default();
    let start = Instant::now();

    while running.load(Ordering::SeqCst) {
        let tick = Instant::now();

        match run_cycle(site.as_ref(), &charts) {
            Ok(cycle) => {
                stats.cycles += 1;
                stats.uavs += cycle.after.len() as u64;
                println!("{}", render_summary(&cycle));
            }
            Err(e) => {
                stats.errors += 1;
                eprintln!("dashboard unavailable this cycle: {e}");
            }
        }

        if let Some(n) = wopts.cycles {
            if (stats.cycles + stats.errors) as usize >= n {
                break;
            }
        }

        sleep_remainder(&running, interval, tick.elapsed());
    }

    stats.tm = start.elapsed().as_secs();
    eprintln!("\nSession: {}", stats);
    Ok(())
}

/// One full cycle.  Both fetches must resolve before anything renders, so a failed
/// cycle leaves no partial charts behind.
///
fn run_cycle(site: &dyn Fetchable, charts: &ChartSet) -> Result<WatchCycle> {
    let before = site.fetch(false)?;
    let after = site.fetch(true)?;

    let cycle = WatchCycle::new(&before, &after);
    charts.render(&cycle)?;
    Ok(cycle)
}

/// Sleep whatever is left of the interval, in short naps so the shutdown flag is
/// honored promptly.
///
fn sleep_remainder(running: &AtomicBool, interval: Duration, spent: Duration) {
    let mut left = interval.saturating_sub(spent);

    while !left.is_zero() && running.load(Ordering::SeqCst) {
        let nap = left.min(NAP);
        thread::sleep(nap);
        left -= nap;
    }
}

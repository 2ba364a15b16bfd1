//! All sub-command implementations.
//!

pub use fetch::*;
pub use watch::*;

mod fetch;
mod watch;

use eyre::Result;
use sepwatch_sources::{Fetchable, Site, Sources};

use crate::Config;

/// Resolve the CLI-given site name (or the configured default) into a `Fetchable`.
///
pub fn load_site(
    cfg: &Config,
    sources: &Sources,
    name: Option<&str>,
) -> Result<Box<dyn Fetchable>> {
    let name = name.unwrap_or(&cfg.default_site);
    Site::load(name, sources)
}

//! Module to deal with the different kind of sources we can connect to to fetch fleet
//! snapshots.
//!
//! The different submodules deal with the differences between sources:
//!
//! - authentication (none or API key)
//! - fetching data (always a plain GET here).
//!

use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use sepwatch_formats::{FleetSnapshot, Format};

// Re-export these modules for a shorter import path.
//
pub use access::*;
pub use error::*;
pub use site::*;
pub use sources::*;

mod access;
mod error;
mod site;
mod sources;

#[macro_use]
mod macros;

#[derive(Clone, Copy, Debug, Default, Deserialize, Ord, PartialOrd, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Capability {
    #[default]
    None = 0,
    Fetch = 1,
    Read = 2,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Capability::None => "none",
            Capability::Fetch => "fetch",
            Capability::Read => "read",
        };
        write!(f, "{s}")
    }
}

/// Statistics gathering struct for a whole watch session.
///
#[derive(Clone, Debug, Default, Serialize)]
pub struct Stats {
    /// Session duration, seconds
    pub tm: u64,
    /// Completed cycles
    pub cycles: u32,
    /// Cycles aborted on an error
    pub errors: u32,
    /// UAV records seen (after-snapshots)
    pub uavs: u64,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "time={}s cycles={} errors={} uavs={}",
            self.tm, self.cycles, self.errors, self.uavs
        )
    }
}

/// This trait enables us to manage different ways of connecting and fetching data under
/// a single interface.
///
/// `processed` selects which side of the avoidance pass the answer describes: `false`
/// is the raw fleet, `true` the fleet after the service ran its pass.
///
pub trait Fetchable: Debug {
    /// Return site's name
    fn name(&self) -> String;
    /// Fetch one fleet snapshot
    fn fetch(&self, processed: bool) -> Result<FleetSnapshot, FetchError>;
    /// Returns the input formats
    fn format(&self) -> Format;
}

/// Default configuration filename
const CONFIG: &str = "sources.hcl";

/// Current `sources.hcl` version
const SVERSION: usize = 1;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

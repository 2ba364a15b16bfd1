//! This library is there to share some common code amongst all sepwatch modules.
//!

mod config;
mod container;
mod location;
mod logging;
mod macros;

use clap::{crate_name, crate_version};

pub use config::*;
pub use container::*;
pub use location::*;
pub use logging::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

/// Trait for configuration structs that carry an explicit file version.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

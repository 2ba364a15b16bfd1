//! Definition of the data formats.
//!
//! This module makes the link between the JSON the DRNS deconfliction service emits and
//! the flattened `UavPoint` rows everything downstream (tables, charts, metrics) works
//! from.
//!
//! To add a new feed, add a `FORMAT.rs` file defining the input format and a conversion
//! into `UavPoint`, then hook it into `Format`.
//!

use std::fmt::Debug;

use csv::{QuoteStyle, WriterBuilder};
use eyre::Result;
use serde::Serialize;
use tracing::trace;

// Re-export for convenience
//
pub use drns::*;
pub use format::*;
pub use metrics::*;
pub use uavpoint::*;

mod drns;
mod format;
mod metrics;
mod uavpoint;

/// Take a slice of rows and turn it into CSV, optionally with a header line.
///
#[tracing::instrument(skip(data))]
pub fn prepare_csv<T>(data: &[T], header: bool) -> Result<String>
where
    T: Serialize + Debug,
{
    trace!("Generating output…");
    // Prepare the writer
    //
    let mut wtr = WriterBuilder::new()
        .has_headers(header)
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(vec![]);

    // Insert data
    //
    for rec in data {
        wtr.serialize(rec)?;
    }
    wtr.flush()?;

    // Output final csv
    //
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

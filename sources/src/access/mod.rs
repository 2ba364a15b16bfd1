//! Actual connection & fetching code, one module per service we know how to talk to.
//!

pub mod drns;

pub use drns::*;

//! Domain types: settings, rows, and
//! cycle failures.
pub mod error;
pub mod model;

//! This crate keeps a Google calendar in sync with a council's bin collection dates.
//!
//! The dates are scraped from the council's lookup page for a single property and written
//! as all-day `Bin Day - <Type>` events, skipping days that already carry one.

pub mod bin_events;
pub mod config;
pub mod date_parser;
pub mod error;
pub mod google_calendar;
pub mod lookup_client;
pub mod model;
pub mod sync;
pub mod throttle;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};

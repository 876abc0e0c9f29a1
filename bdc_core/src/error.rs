//! Errors which abort a sync run.

/// Every stage of the run fails fast with one of these.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required setting is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
    /// The lookup request failed or returned a non-success status.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// A collection date could not be read from the page.
    #[error("Could not parse date from {0:?}")]
    DateParse(String),
    /// Authenticating against or reading from the calendar failed.
    #[error("Calendar access error: {0}")]
    CalendarAccess(String),
    /// Inserting an event into the calendar failed.
    #[error("Calendar write error: {0}")]
    CalendarWrite(String),
}

pub type Result<T> = std::result::Result<T, Error>;

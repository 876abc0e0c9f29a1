//! Collection events as scraped from the council and as found in the calendar.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

/// Every bin event in the calendar is titled with this prefix followed by the type.
pub static SUMMARY_PREFIX: &str = "Bin Day - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionType {
    Refuse,
    Recycling,
    Garden,
}

impl fmt::Display for CollectionType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CollectionType::Refuse => "Refuse",
            CollectionType::Recycling => "Recycling",
            CollectionType::Garden => "Garden",
        };
        write!(formatter, "{label}")
    }
}

impl FromStr for CollectionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Refuse" => Ok(CollectionType::Refuse),
            "Recycling" => Ok(CollectionType::Recycling),
            "Garden" => Ok(CollectionType::Garden),
            other => Err(format!("unknown collection type {other:?}")),
        }
    }
}

/// A collection date read from the council's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionEvent {
    pub kind: CollectionType,
    pub date: NaiveDate,
}

impl CollectionEvent {
    pub fn new(kind: CollectionType, date: NaiveDate) -> Self {
        Self { kind, date }
    }

    /// The calendar title of this event.
    pub fn summary(&self) -> String {
        format!("{SUMMARY_PREFIX}{}", self.kind)
    }
}

/// A bin event which is already in the calendar.
///
/// `kind` is whatever followed the prefix in the title, it is not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingEvent {
    pub date: NaiveDate,
    pub title: String,
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use crate::model::{CollectionEvent, CollectionType};

    #[test]
    fn test_summary() {
        let event = CollectionEvent::new(
            CollectionType::Recycling,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        );
        assert_eq!(event.summary(), "Bin Day - Recycling");
    }

    #[test]
    fn test_collection_type_from_str() {
        for kind in [
            CollectionType::Refuse,
            CollectionType::Recycling,
            CollectionType::Garden,
        ] {
            assert_eq!(CollectionType::from_str(&kind.to_string()), Ok(kind));
        }
        assert!(CollectionType::from_str("Food").is_err());
    }
}

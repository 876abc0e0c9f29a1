//! Reading, diffing and writing the `Bin Day` events of the calendar.

use chrono::{DateTime, Duration, Utc};
use log::info;
use regex::Regex;

use crate::{
    google_calendar::{CalendarPort, EventDate, EventResource, ReminderOverride, Reminders},
    model::{CollectionEvent, ExistingEvent},
    throttle::Throttle,
    Result,
};

/// The calendar accepts about one write per second from a service account.
pub static WRITE_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1000);
/// Reminders pop up the day before the collection.
static REMINDER_MINUTES: u32 = 60 * 24;
static FORMAT: &str = "%Y-%m-%d";

/// Get the bin events starting from `now` which are already in the calendar.
pub async fn upcoming_bin_events(
    calendar: &dyn CalendarPort,
    now: DateTime<Utc>,
) -> Result<Vec<ExistingEvent>> {
    let summary_regex = Regex::new(r"^Bin Day - (.*?)$").unwrap();
    let events = calendar.list_upcoming(now).await?;
    let bin_events = events
        .into_iter()
        .filter_map(|event| {
            let date = event.start.as_ref().and_then(EventDate::day)?;
            let kind = summary_regex.captures(&event.summary)?[1].to_owned();
            Some(ExistingEvent {
                date,
                title: event.summary,
                kind,
            })
        })
        .collect();
    Ok(bin_events)
}

/// Keep the candidates on days which have no bin event yet.
///
/// Only the day is compared: any bin event on a day blocks every candidate on that day.
pub fn filter_existing(
    candidates: &[CollectionEvent],
    existing: &[ExistingEvent],
) -> Vec<CollectionEvent> {
    candidates
        .iter()
        .filter(|candidate| {
            !existing
                .iter()
                .any(|existing_event| existing_event.date == candidate.date)
        })
        .copied()
        .collect()
}

/// Build the all-day calendar event for a collection.
pub fn build_event(event: &CollectionEvent) -> EventResource {
    EventResource {
        summary: event.summary(),
        start: Some(EventDate::all_day(event.date)),
        end: Some(EventDate::all_day(event.date + Duration::days(1))),
        transparency: Some(String::from("transparent")),
        reminders: Some(Reminders {
            use_default: false,
            overrides: vec![ReminderOverride {
                method: String::from("popup"),
                minutes: REMINDER_MINUTES,
            }],
        }),
    }
}

/// Insert the events one at a time, paced by `throttle`.
///
/// The first failed insertion aborts the remaining ones; events inserted before it stay.
pub async fn create_events(
    calendar: &dyn CalendarPort,
    events: &[CollectionEvent],
    throttle: &mut Throttle,
) -> Result<usize> {
    for event in events {
        throttle
            .run(|| async {
                info!(
                    "creating event: {}: {}",
                    event.summary(),
                    event.date.format(FORMAT)
                );
                calendar.insert(&build_event(event)).await
            })
            .await?;
    }
    Ok(events.len())
}

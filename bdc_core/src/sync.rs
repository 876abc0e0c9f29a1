//! One sync run: look up the collection dates and add the missing ones to the calendar.

use chrono::{DateTime, Local, Utc};
use log::info;

use crate::{
    bin_events::{create_events, filter_existing, upcoming_bin_events, WRITE_INTERVAL},
    config::Config,
    google_calendar::{CalendarPort, GoogleCalendar},
    lookup_client,
    model::CollectionEvent,
    throttle::Throttle,
    Result,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Read and diff, but leave the calendar untouched.
    pub dry_run: bool,
}

/// What a run found and did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub candidates: usize,
    pub existing: usize,
    /// Events created, or the ones which would have been in a dry run.
    pub created: usize,
}

/// Run the whole sync for the configured property and calendar.
pub async fn run(config: &Config, options: SyncOptions) -> Result<SyncReport> {
    let html = lookup_client::lookup(&config.endpoint, &config.uprn).await?;
    let candidates = lookup_client::parse(&html, Local::now().date_naive())?;
    let calendar = GoogleCalendar::connect(&config.credentials, &config.calendar_id).await?;
    synchronise(&calendar, &candidates, Utc::now(), options).await
}

/// Add the candidates which have no bin event on their day yet.
pub async fn synchronise(
    calendar: &dyn CalendarPort,
    candidates: &[CollectionEvent],
    now: DateTime<Utc>,
    options: SyncOptions,
) -> Result<SyncReport> {
    let existing = upcoming_bin_events(calendar, now).await?;
    let missing = filter_existing(candidates, &existing);
    let created = if options.dry_run {
        for event in &missing {
            info!("would create event: {}: {}", event.summary(), event.date);
        }
        missing.len()
    } else {
        let mut throttle = Throttle::new(WRITE_INTERVAL);
        create_events(calendar, &missing, &mut throttle).await?
    };
    Ok(SyncReport {
        candidates: candidates.len(),
        existing: existing.len(),
        created,
    })
}

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    google_calendar::{CalendarPort, EventResource},
    Error, Result,
};

/// A calendar kept in memory.
///
/// Inserted events are listed by later calls, so a run can be replayed against it.
#[derive(Default)]
pub(crate) struct FakeCalendar {
    pub(crate) events: Mutex<Vec<EventResource>>,
    /// Insertions fail once the calendar holds this many events.
    pub(crate) fail_after: Option<usize>,
    pub(crate) fail_listing: bool,
}

impl FakeCalendar {
    pub(crate) fn with_events(events: Vec<EventResource>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Self::default()
        }
    }

    pub(crate) fn events(&self) -> Vec<EventResource> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarPort for FakeCalendar {
    async fn list_upcoming(&self, _time_min: DateTime<Utc>) -> Result<Vec<EventResource>> {
        if self.fail_listing {
            return Err(Error::CalendarAccess(String::from("401 Unauthorized")));
        }
        Ok(self.events())
    }

    async fn insert(&self, event: &EventResource) -> Result<()> {
        let mut events = self.events.lock().unwrap();
        if self.fail_after.is_some_and(|limit| events.len() >= limit) {
            return Err(Error::CalendarWrite(String::from("403 Rate Limit Exceeded")));
        }
        events.push(event.clone());
        Ok(())
    }
}

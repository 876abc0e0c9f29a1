//! A small client for the parts of the Google Calendar v3 API used here.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use log::debug;
use once_cell::sync::Lazy;
use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

use crate::{Error, Result};

static BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://www.googleapis.com/calendar/v3").unwrap());
static TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
static SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/calendar.events",
];

/// The service account which owns or was shared the calendar.
#[derive(Debug, Clone)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    /// PEM encoded private key.
    pub private_key: String,
}

/// An event as the API returns or accepts it, reduced to the fields this crate touches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    #[serde(default)]
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Reminders>,
}

/// Either `date` is set for all-day events or `date_time` for timed ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
}

impl EventDate {
    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            date_time: None,
        }
    }

    /// The calendar day this date falls on.
    pub fn day(&self) -> Option<NaiveDate> {
        self.date
            .or_else(|| self.date_time.map(|date_time| date_time.date_naive()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    #[serde(default)]
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    #[serde(default)]
    items: Vec<EventResource>,
    next_page_token: Option<String>,
}

/// The calendar operations a sync run needs.
#[async_trait]
pub trait CalendarPort: Send + Sync {
    /// List every single (expanded) event starting at or after `time_min`, ordered by start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CalendarAccess`] when the request fails.
    async fn list_upcoming(&self, time_min: DateTime<Utc>) -> Result<Vec<EventResource>>;

    /// Insert a new event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CalendarWrite`] when the request fails.
    async fn insert(&self, event: &EventResource) -> Result<()>;
}

/// One calendar, accessed as a service account.
pub struct GoogleCalendar {
    client: reqwest::Client,
    calendar_id: String,
    access_token: String,
}

impl GoogleCalendar {
    /// Authenticate as the service account and bind to the calendar.
    pub async fn connect(
        credentials: &ServiceAccountCredentials,
        calendar_id: &str,
    ) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_value(serde_json::json!({
            "type": "service_account",
            "client_email": credentials.client_email,
            "private_key": credentials.private_key,
            "token_uri": TOKEN_URI,
        }))
        .map_err(access_error)?;
        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(access_error)?;
        let token = authenticator.token(&SCOPES).await.map_err(access_error)?;
        let access_token = token
            .token()
            .ok_or_else(|| Error::CalendarAccess(String::from("no access token was issued")))?;
        debug!("Authenticated as {}", credentials.client_email);
        Ok(Self::new(calendar_id, access_token))
    }

    fn new(calendar_id: &str, access_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            calendar_id: String::from(calendar_id),
            access_token: String::from(access_token),
        }
    }

    /// The events collection of the calendar; the id is percent-encoded as a path segment.
    fn events_url(&self) -> Result<Url> {
        let mut url = Url::clone(&BASE_URL);
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("{} is not a base URL", BASE_URL.as_str())))?
            .pop_if_empty()
            .extend(["calendars", self.calendar_id.as_str(), "events"]);
        Ok(url)
    }
}

#[async_trait]
impl CalendarPort for GoogleCalendar {
    async fn list_upcoming(&self, time_min: DateTime<Utc>) -> Result<Vec<EventResource>> {
        let url = self.events_url()?;
        let time_min = time_min.to_rfc3339();
        let mut events = vec![];
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("timeMin", time_min.clone()),
                ("singleEvents", String::from("true")),
                ("orderBy", String::from("startTime")),
            ];
            if let Some(page_token) = &page_token {
                query.push(("pageToken", page_token.clone()));
            }
            let page: EventsPage = self
                .client
                .get(url.clone())
                .bearer_auth(&self.access_token)
                .query(&query)
                .send()
                .await
                .and_then(Response::error_for_status)
                .map_err(access_error)?
                .json()
                .await
                .map_err(access_error)?;
            debug!("Listed {} events", page.items.len());
            events.extend(page.items);
            match page.next_page_token {
                Some(next_page_token) => page_token = Some(next_page_token),
                None => break,
            }
        }
        Ok(events)
    }

    async fn insert(&self, event: &EventResource) -> Result<()> {
        self.client
            .post(self.events_url()?)
            .bearer_auth(&self.access_token)
            .json(event)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|err| Error::CalendarWrite(format!("{}: {err}", event.summary)))?;
        Ok(())
    }
}

fn access_error(err: impl std::fmt::Display) -> Error {
    Error::CalendarAccess(err.to_string())
}

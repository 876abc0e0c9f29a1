//! This client looks up a property's collection page and parses it into collection events.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};

use crate::{
    date_parser::parse_date,
    model::{CollectionEvent, CollectionType},
    Result,
};

/// Post the property reference to the lookup endpoint and return the page.
pub async fn lookup(endpoint: &str, uprn: &str) -> Result<String> {
    debug!("Looking up {uprn} at {endpoint}");
    let client = reqwest::Client::new();
    let response = client
        .post(endpoint)
        .form(&HashMap::from([("uprn", uprn)]))
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}

/// Parse the lookup page into the next collection of each type.
///
/// The page lists the next refuse, recycling and garden collection in its first three `<dd>`
/// elements. Empty entries are skipped, as is a garden entry marked "N/A" for properties
/// without a garden waste subscription.
pub fn parse(html: &str, today: NaiveDate) -> Result<Vec<CollectionEvent>> {
    let dom = Html::parse_document(html);
    let dd_selector = Selector::parse("dd").unwrap();
    let mut texts = dom
        .select(&dd_selector)
        .map(|element| element.text().collect::<String>().trim().to_owned());
    let refuse = texts.next().unwrap_or_default();
    let recycling = texts.next().unwrap_or_default();
    // the garden date may carry a footnote marker
    let footnote_regex = Regex::new(r"\s*\*$").unwrap();
    let garden = footnote_regex
        .replace(&texts.next().unwrap_or_default(), "")
        .into_owned();
    debug!("Found refuse {refuse:?}, recycling {recycling:?}, garden {garden:?}");

    let mut events = vec![];
    for (kind, text) in [
        (CollectionType::Refuse, refuse),
        (CollectionType::Recycling, recycling),
        (CollectionType::Garden, garden),
    ] {
        if text.is_empty() || (kind == CollectionType::Garden && text.contains("N/A")) {
            continue;
        }
        events.push(CollectionEvent::new(kind, parse_date(&text, today)?));
    }
    Ok(events)
}

//! Normalization of raw ticketing records into display models.
//!
//! Nothing in here fails: whatever the API leaves out becomes
//! [`NOT_AVAILABLE`] (or `None` for optional links and images).

use super::dto::{EventResponse, IpInfoResponse, ResponseStart, VenueResponse};
use super::model::{
    Artist, EventDetail, EventSummary, GeoLocation, TicketStatus, VenueDetail, NOT_AVAILABLE,
};
use chrono::{DateTime, Local, NaiveDateTime};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use tracing::warn;

const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const LOCAL_DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const MIDNIGHT: &str = "00:00:00";
const GENRE_SEPARATOR: &str = " | ";
const IGNORED_GENRES: [&str; 2] = ["Undefined", "Other"];
const GOOGLE_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// (code, label, css class), in matching priority
const TICKET_STATUSES: [(&str, &str, &str); 5] = [
    ("onsale", "On Sale", "status-onsale"),
    ("offsale", "Off Sale", "status-offsale"),
    ("cancelled", "Cancelled", "status-cancelled"),
    ("postponed", "Postponed", "status-postponed"),
    ("rescheduled", "Rescheduled", "status-rescheduled"),
];

lazy_static! {
    static ref LAT_LNG: Regex =
        Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$").unwrap();
}

pub fn extract_event_data(event: &EventResponse) -> EventSummary {
    EventSummary {
        date_time: event_date(event),
        icon_url: event.images.first().and_then(|image| image.url.clone()),
        name: event.name.clone().unwrap_or_else(not_available),
        genre: event_genre(event),
        venue_name: event
            .venue_name()
            .map(str::to_string)
            .unwrap_or_else(not_available),
    }
}

pub fn extract_detailed_event_data(event: &EventResponse) -> EventDetail {
    let venue_name = event.venue_name().map(str::to_string);

    EventDetail {
        name: event.name.clone().unwrap_or_else(not_available),
        date: event_date(event),
        artists: event_artists(event),
        venue: venue_name.clone().unwrap_or_else(not_available),
        venue_name,
        genre: event_genre(event),
        price_range: event.price_ranges.first().and_then(|price| {
            match (price.min, price.max) {
                (Some(min), Some(max)) => Some(format!("${} - ${}", min, max)),
                (Some(only), None) | (None, Some(only)) => Some(format!("${}", only)),
                (None, None) => None,
            }
        }),
        status: event
            .dates
            .as_ref()
            .and_then(|dates| dates.status.as_ref())
            .and_then(|status| status.code.as_deref())
            .map(ticket_status)
            .unwrap_or_default(),
        seat_map: event
            .seatmap
            .as_ref()
            .and_then(|seatmap| seatmap.static_url.clone()),
        ticket_url: event.url.clone(),
    }
}

pub fn extract_venue_data(venue: &VenueResponse) -> VenueDetail {
    let name = venue.name.clone().unwrap_or_else(not_available);
    let address = venue
        .address
        .as_ref()
        .and_then(|address| address.line1.clone())
        .unwrap_or_else(not_available);
    let city = match &venue.city {
        Some(city) => format!(
            "{}, {}",
            city.name.as_deref().unwrap_or(NOT_AVAILABLE),
            venue
                .state
                .as_ref()
                .and_then(|state| state.state_code.as_deref())
                .unwrap_or("")
        ),
        None => not_available(),
    };
    let postal_code = venue.postal_code.clone().unwrap_or_else(not_available);
    let map_url = google_maps_url(&format!("{name}, {address}, {city}, {postal_code}"));

    VenueDetail {
        name,
        address,
        city,
        postal_code,
        map_url,
        logo_url: venue.images.first().and_then(|image| image.url.clone()),
        more_events_url: venue.url.clone(),
    }
}

/// Reads the `loc` coordinates of an `/ipinfo` answer
pub fn extract_geo_location(info: &IpInfoResponse) -> Option<GeoLocation> {
    let loc = info.loc.as_deref()?;
    let captures = LAT_LNG.captures(loc)?;

    Some(GeoLocation {
        lat: captures[1].parse().ok()?,
        lng: captures[2].parse().ok()?,
        city: info.city.clone(),
        region: info.region.clone(),
        country: info.country.clone(),
    })
}

/// Maps a ticket status code to its display label and CSS class
pub fn ticket_status(code: &str) -> TicketStatus {
    let code_lower = code.to_lowercase();

    let label = TICKET_STATUSES
        .iter()
        .find(|(known, _, _)| *known == code_lower)
        .map(|(_, label, _)| label.to_string())
        .unwrap_or_else(|| capitalize_first(code));
    let css_class = TICKET_STATUSES
        .iter()
        .find(|(known, _, _)| code_lower.contains(known))
        .map(|(_, _, class)| *class)
        .unwrap_or("");

    TicketStatus { label, css_class }
}

pub fn event_genre(event: &EventResponse) -> String {
    let Some(classification) = event.classifications.first() else {
        return not_available();
    };

    let genre = [
        &classification.sub_genre,
        &classification.genre,
        &classification.segment,
        &classification.sub_type,
        &classification.kind,
    ]
    .into_iter()
    .filter_map(|part| part.as_ref().and_then(|named| named.name.as_deref()))
    .filter(|name| !name.is_empty() && !IGNORED_GENRES.contains(name))
    .unique()
    .join(GENRE_SEPARATOR);

    if genre.is_empty() {
        not_available()
    } else {
        genre
    }
}

fn event_date(event: &EventResponse) -> String {
    event
        .dates
        .as_ref()
        .and_then(|dates| dates.start.as_ref())
        .and_then(start_date)
        .unwrap_or_else(not_available)
}

fn start_date(start: &ResponseStart) -> Option<String> {
    match (&start.local_date, &start.local_time, &start.date_time) {
        (Some(date), Some(time), _) => Some(format_local_date(date, time)),
        (_, _, Some(timestamp)) => Some(format_timestamp(timestamp)),
        (Some(date), None, None) => Some(format_local_date(date, MIDNIGHT)),
        _ => None,
    }
}

fn format_local_date(date: &str, time: &str) -> String {
    let combined = format!("{}T{}", date, time);

    LOCAL_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&combined, format).ok())
        .map(|parsed| parsed.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| {
            warn!("Failed to parse local date '{}'", combined);
            format!("{} {}", date, time)
        })
}

fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format(DISPLAY_DATE_FORMAT)
            .to_string(),
        Err(err) => {
            warn!("Failed to parse timestamp '{}'. Err: {err}", timestamp);
            timestamp.to_string()
        }
    }
}

fn event_artists(event: &EventResponse) -> Vec<Artist> {
    event
        .embedded
        .iter()
        .flat_map(|embedded| embedded.attractions.iter())
        .map(|attraction| Artist {
            name: attraction.name.clone().unwrap_or_else(not_available),
            url: attraction.url.clone(),
        })
        .collect()
}

fn google_maps_url(query: &str) -> String {
    Url::parse_with_params(GOOGLE_MAPS_SEARCH_URL, &[("api", "1"), ("query", query)])
        .map(String::from)
        .unwrap_or_else(|_| GOOGLE_MAPS_SEARCH_URL.to_string())
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

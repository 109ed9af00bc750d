//! Markup for the results table and detail panels.
//!
//! Every value coming from the ticketing API goes through [`text`] or
//! [`link`] before it lands in the HTML.

use super::view::Markup;
use crate::ticketing::dto::EventResponse;
use crate::ticketing::extract::extract_event_data;
use crate::ticketing::model::{Artist, EventDetail, VenueDetail, NOT_AVAILABLE};
use itertools::Itertools;
use reqwest::Url;
use voca_rs::escape::escape_html;

const PLACEHOLDER_HREF: &str = "#";
const ARTIST_SEPARATOR: &str = " | ";

fn text(value: &str) -> String {
    escape_html(value)
}

/// Escaped href; anything other than http(s) collapses to "#"
fn link(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => escape_html(parsed.as_str()),
        _ => PLACEHOLDER_HREF.to_string(),
    }
}

pub fn results_rows(events: &[EventResponse]) -> Markup {
    let mut html = String::new();

    for event in events {
        let summary = extract_event_data(event);
        let icon = summary
            .icon_url
            .as_deref()
            .map(|url| format!(r#"<img src="{}" alt="Event" class="event-icon">"#, link(url)))
            .unwrap_or_default();

        html.push_str(&format!(
            r##"<tr><td>{}</td><td>{}</td><td><a href="#" class="event-link" data-event-id="{}">{}</a></td><td>{}</td><td>{}</td></tr>"##,
            text(&summary.date_time),
            icon,
            text(event.id.as_deref().unwrap_or_default()),
            text(&summary.name),
            text(&summary.genre),
            text(&summary.venue_name),
        ));
    }

    Markup::new(html)
}

fn detail_row(html: &mut String, label: &str, value_class: &str, value_html: &str) {
    let class = if value_class.is_empty() {
        "detail-value".to_string()
    } else {
        format!("detail-value {}", value_class)
    };

    html.push_str(&format!(
        r#"<div class="detail-row"><span class="detail-label">{}</span><span class="{}">{}</span></div>"#,
        label, class, value_html
    ));
}

fn artists_html(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|artist| match &artist.url {
            Some(url) => format!(
                r#"<a href="{}" target="_blank">{}</a>"#,
                link(url),
                text(&artist.name)
            ),
            None => text(&artist.name),
        })
        .join(ARTIST_SEPARATOR)
}

pub fn event_details_panel(detail: &EventDetail) -> Markup {
    let mut html = String::new();

    html.push_str(&format!(
        r#"<div class="event-details-header">{}</div><div class="event-details-left">"#,
        text(&detail.name)
    ));

    if detail.date != NOT_AVAILABLE {
        detail_row(&mut html, "Date", "", &text(&detail.date));
    }
    if !detail.artists.is_empty() {
        detail_row(&mut html, "Artist/Team", "", &artists_html(&detail.artists));
    }
    if detail.venue != NOT_AVAILABLE {
        detail_row(&mut html, "Venue", "", &text(&detail.venue));
    }
    if detail.genre != NOT_AVAILABLE {
        detail_row(&mut html, "Genres", "", &text(&detail.genre));
    }

    let status_class = if detail.is_on_sale() {
        "ticket-status-onsale"
    } else {
        "ticket-status-other"
    };
    detail_row(&mut html, "Ticket Status", status_class, &text(&detail.status.label));

    if let Some(price_range) = &detail.price_range {
        detail_row(&mut html, "Ticket Price", "", &text(price_range));
    }

    let buy_link = format!(
        r#"<a href="{}" target="_blank">Ticketmaster</a>"#,
        detail
            .ticket_url
            .as_deref()
            .map(link)
            .unwrap_or_else(|| PLACEHOLDER_HREF.to_string())
    );
    detail_row(&mut html, "Buy Ticket At", "", &buy_link);

    html.push_str("</div>");

    if let Some(seat_map) = &detail.seat_map {
        html.push_str(&format!(
            r#"<div class="event-details-right"><img src="{}" alt="Seat Map"></div>"#,
            link(seat_map)
        ));
    }

    Markup::new(html)
}

pub fn venue_card(venue: &VenueDetail) -> Markup {
    let mut html = String::new();
    let name = text(&venue.name);

    html.push_str(&format!(
        r#"<div class="venue-card"><h2 class="venue-title">{}</h2><div class="venue-logo">"#,
        name
    ));

    if let Some(logo_url) = &venue.logo_url {
        html.push_str(&format!(r#"<img src="{}" alt="{} logo">"#, link(logo_url), name));
    }

    html.push_str(&format!(
        concat!(
            r#"</div><div class="venue-info"><div class="venue-left">"#,
            r#"<p class="venue-address">Address: {}<br>{}<br>{}</p>"#,
            r#"<a class="venue-map-link" href="{}" target="_blank">Open in Google Maps</a></div>"#,
            r#"<div class="venue-divider"></div><div class="venue-right">"#,
            r#"<a class="venue-more-link" href="{}" target="_blank">More events at this venue</a>"#,
            r#"</div></div></div>"#
        ),
        text(&venue.address),
        text(&venue.city),
        text(&venue.postal_code),
        link(&venue.map_url),
        venue
            .more_events_url
            .as_deref()
            .map(link)
            .unwrap_or_else(|| PLACEHOLDER_HREF.to_string()),
    ));

    Markup::new(html)
}

use serde::Serialize;

/// Fallback shown for any field the ticketing API left out
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the results table
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub date_time: String,
    pub icon_url: Option<String>,
    pub name: String,
    pub genre: String,
    pub venue_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub name: String,
    pub date: String,
    /// Empty when the event has no attractions
    pub artists: Vec<Artist>,
    pub venue: String,
    /// Keyword used for the venue lookup
    pub venue_name: Option<String>,
    pub genre: String,
    pub price_range: Option<String>,
    pub status: TicketStatus,
    pub seat_map: Option<String>,
    pub ticket_url: Option<String>,
}

impl EventDetail {
    pub fn is_on_sale(&self) -> bool {
        self.status.css_class == "status-onsale"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketStatus {
    pub label: String,
    pub css_class: &'static str,
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self {
            label: NOT_AVAILABLE.to_string(),
            css_class: "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueDetail {
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub map_url: String,
    pub logo_url: Option<String>,
    pub more_events_url: Option<String>,
}

/// Device location as resolved from the network address
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl GeoLocation {
    /// "City, Region", skipping whichever part is unknown
    pub fn search_location(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.region.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[derive(
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
    Serialize,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
)]
pub enum Category {
    #[default]
    Default,
    Music,
    Sports,
    #[strum(serialize = "Arts & Theatre")]
    #[serde(rename = "Arts & Theatre")]
    ArtsTheatre,
    Film,
    Miscellaneous,
}

/// Query sent to the backend's `/search`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub keyword: String,
    pub distance: String,
    pub category: Category,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test_log::test]
    fn category_should_parse_its_display_name() {
        for category in Category::iter() {
            assert_eq!(Category::from_str(&category.to_string()), Ok(category));
        }

        assert_eq!(Category::ArtsTheatre.to_string(), "Arts & Theatre");
    }

    #[test_log::test]
    fn search_location_should_join_known_parts() {
        let mut location = GeoLocation {
            lat: 34.05,
            lng: -118.24,
            city: Some("Los Angeles".to_string()),
            region: Some("California".to_string()),
            country: Some("US".to_string()),
        };

        assert_eq!(
            location.search_location().as_deref(),
            Some("Los Angeles, California")
        );

        location.region = None;
        assert_eq!(location.search_location().as_deref(), Some("Los Angeles"));

        location.city = None;
        assert_eq!(location.search_location(), None);
    }
}

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

// Note: most fields go through the lenient deserializers since the ticketing
// API omits or nulls nested data freely
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "_embedded", default, deserialize_with = "deserialize_opt")]
    pub embedded: Option<SearchEmbedded>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEmbedded {
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub events: Vec<EventResponse>,
}

impl SearchResponse {
    pub fn into_events(self) -> Vec<EventResponse> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub dates: Option<ResponseDates>,
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub images: Vec<ResponseImage>,
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub classifications: Vec<ResponseClassification>,
    #[serde(rename = "_embedded", default, deserialize_with = "deserialize_opt")]
    pub embedded: Option<EventEmbedded>,
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub price_ranges: Vec<ResponsePriceRange>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub seatmap: Option<ResponseSeatmap>,
}

impl EventResponse {
    /// First embedded venue name, if the venue is named
    pub fn venue_name(&self) -> Option<&str> {
        self.embedded
            .as_ref()
            .and_then(|embedded| embedded.venues.first())
            .and_then(|venue| venue.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseDates {
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub start: Option<ResponseStart>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub status: Option<ResponseStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStart {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub local_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub local_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub date_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseStatus {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseImage {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseClassification {
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub segment: Option<ResponseNamed>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub genre: Option<ResponseNamed>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub sub_genre: Option<ResponseNamed>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_opt")]
    pub kind: Option<ResponseNamed>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub sub_type: Option<ResponseNamed>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseNamed {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventEmbedded {
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub venues: Vec<ResponseNamed>,
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub attractions: Vec<ResponseAttraction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseAttraction {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePriceRange {
    #[serde(default, deserialize_with = "deserialize_opt_f64")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSeatmap {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub static_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueSearchResponse {
    #[serde(rename = "_embedded", default, deserialize_with = "deserialize_opt")]
    pub embedded: Option<VenueSearchEmbedded>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueSearchEmbedded {
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub venues: Vec<VenueResponse>,
}

impl VenueSearchResponse {
    pub fn into_first_venue(self) -> Option<VenueResponse> {
        self.embedded
            .and_then(|embedded| embedded.venues.into_iter().next())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub address: Option<ResponseAddress>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub city: Option<ResponseNamed>,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub state: Option<ResponseState>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_vec")]
    pub images: Vec<ResponseImage>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseAddress {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub line1: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseState {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpInfoResponse {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub loc: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub country: Option<String>,
}

/// Body the backend sends alongside a non-2xx status
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub error: Option<String>,
}

fn deserialize_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let Value::Array(items) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };

    // malformed entries are dropped one by one
    Ok(items
        .into_iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!("Skipping malformed list entry. Err: {err}");
                None
            }
        })
        .collect())
}

fn deserialize_opt<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        value => T::deserialize(value)
            .inspect_err(|err| warn!("Ignoring malformed field. Err: {err}"))
            .ok(),
    })
}

fn deserialize_opt_str<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_opt_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_deserialize_search_response_with_events() {
        let dto = serde_json::from_str::<SearchResponse>(
            r##"
              {
                "_embedded": {
                  "events": [{
                    "name": "Phoebe Bridgers",
                    "type": "event",
                    "id": "G5vYZ9Y7Qxabc",
                    "url": "https://www.ticketmaster.com/event/G5vYZ9Y7Qxabc",
                    "images": [{ "ratio": "16_9", "url": "https://s1.ticketm.net/dam/a/1.jpg", "width": 205 }],
                    "dates": {
                      "start": { "localDate": "2024-05-01", "localTime": "20:00:00", "dateTime": "2024-05-02T03:00:00Z" },
                      "status": { "code": "onsale" }
                    },
                    "classifications": [{
                      "primary": true,
                      "segment": { "id": "KZFzniwnSyZfZ7v7nJ", "name": "Music" },
                      "genre": { "id": "KnvZfZ7vAeA", "name": "Rock" },
                      "subGenre": { "id": "KZazBEonSMnZfZ7v6F1", "name": "Pop" }
                    }],
                    "priceRanges": [{ "type": "standard", "currency": "USD", "min": 45.5, "max": 120 }],
                    "_embedded": {
                      "venues": [{ "name": "Hollywood Bowl", "id": "KovZpZAEdFtJ" }],
                      "attractions": [{ "name": "Phoebe Bridgers", "url": "https://www.ticketmaster.com/phoebe" }]
                    }
                  }]
                },
                "page": { "size": 20, "totalElements": 1 }
              }"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let events = dto.unwrap().into_events();

        assert_eq!(events.len(), 1);

        let event = events.first().unwrap();

        assert_eq!(event.id.as_deref(), Some("G5vYZ9Y7Qxabc"));
        assert_eq!(event.venue_name(), Some("Hollywood Bowl"));
        assert_eq!(event.price_ranges[0].min, Some(45.5));
        assert_eq!(event.price_ranges[0].max, Some(120.0));
        assert_eq!(
            event.classifications[0]
                .sub_genre
                .as_ref()
                .and_then(|g| g.name.as_deref()),
            Some("Pop")
        );
    }

    #[test_log::test]
    fn should_deserialize_search_response_without_embedded() {
        let dto = serde_json::from_str::<SearchResponse>(r#"{ "page": { "totalElements": 0 } }"#)
            .unwrap();

        assert!(dto.into_events().is_empty());
    }

    #[test_log::test]
    fn when_some_events_are_malformed_should_keep_the_rest() {
        let dto = serde_json::from_str::<SearchResponse>(
            r#"{ "_embedded": { "events": [
                { "id": "1", "name": "Good Show" },
                "not an event",
                { "id": "2", "name": "Show TBA", "dates": "TBA" },
                { "id": "3", "name": "Rock Show", "classifications": [{ "genre": "Rock" }] }
            ] } }"#,
        )
        .unwrap();

        let events = dto.into_events();
        let ids = events
            .iter()
            .filter_map(|event| event.id.as_deref())
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(events[1].dates.is_none());
        assert!(events[2].classifications[0].genre.is_none());
    }

    #[test_log::test]
    fn should_tolerate_nulls_and_wrong_types_in_optional_fields() {
        let dto = serde_json::from_str::<EventResponse>(
            r#"{
                "name": null,
                "images": null,
                "classifications": {},
                "priceRanges": [{ "min": "12.5", "max": null }],
                "seatmap": { "staticUrl": "" }
            }"#,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let dto = dto.unwrap();

        assert_eq!(dto.name, None);
        assert!(dto.images.is_empty());
        assert!(dto.classifications.is_empty());
        assert_eq!(dto.price_ranges[0].min, Some(12.5));
        assert_eq!(dto.price_ranges[0].max, None);
        assert_eq!(dto.seatmap.unwrap().static_url, None);
    }

    #[test_log::test]
    fn should_pick_first_venue_of_venue_search() {
        let dto = serde_json::from_str::<VenueSearchResponse>(
            r#"{ "_embedded": { "venues": [
                { "name": "Hollywood Bowl", "postalCode": "90068", "state": { "stateCode": "CA" } },
                { "name": "Hollywood Palladium" }
            ] } }"#,
        )
        .unwrap();

        let venue = dto.into_first_venue().unwrap();

        assert_eq!(venue.name.as_deref(), Some("Hollywood Bowl"));
        assert_eq!(venue.postal_code.as_deref(), Some("90068"));
        assert_eq!(venue.state.unwrap().state_code.as_deref(), Some("CA"));
    }
}

#![allow(dead_code)]

use eventfinder::ticketing::api::{APIError, EventsBackend};
use eventfinder::ticketing::dto::{
    EventResponse, IpInfoResponse, SearchResponse, VenueSearchResponse,
};
use eventfinder::ticketing::model::SearchParams;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::cell::RefCell;

/// Canned answer of the fake backend
#[derive(Debug, Clone)]
pub enum Reply {
    Json(String),
    Status(StatusCode, Option<String>),
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Reply::Json(body.to_string())
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Reply::Status(status, Some(message.to_string()))
    }

    fn to_result<T: DeserializeOwned>(&self) -> Result<T, APIError> {
        match self {
            Reply::Json(body) => Ok(serde_json::from_str(body)?),
            Reply::Status(status, message) => Err(APIError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// Records every call and answers with the configured replies
pub struct FakeBackend {
    pub search_reply: Reply,
    pub event_reply: Reply,
    pub venue_reply: Reply,
    pub ip_info_reply: Reply,
    pub searches: RefCell<Vec<SearchParams>>,
    pub event_ids: RefCell<Vec<String>>,
    pub venue_keywords: RefCell<Vec<String>>,
    pub ip_info_calls: RefCell<usize>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            search_reply: Reply::json(r#"{ "_embedded": { "events": [] } }"#),
            event_reply: Reply::json("{}"),
            venue_reply: Reply::json("{}"),
            ip_info_reply: Reply::json(
                r#"{ "loc": "34.0522,-118.2437", "city": "Los Angeles", "region": "California", "country": "US" }"#,
            ),
            searches: RefCell::new(Vec::new()),
            event_ids: RefCell::new(Vec::new()),
            venue_keywords: RefCell::new(Vec::new()),
            ip_info_calls: RefCell::new(0),
        }
    }
}

impl EventsBackend for FakeBackend {
    fn search<'a>(
        &'a self,
        params: &'a SearchParams,
    ) -> LocalBoxFuture<'a, Result<SearchResponse, APIError>> {
        async move {
            self.searches.borrow_mut().push(params.clone());
            self.search_reply.to_result()
        }
        .boxed_local()
    }

    fn event<'a>(&'a self, id: &'a str) -> LocalBoxFuture<'a, Result<EventResponse, APIError>> {
        async move {
            self.event_ids.borrow_mut().push(id.to_string());
            self.event_reply.to_result()
        }
        .boxed_local()
    }

    fn venues<'a>(
        &'a self,
        keyword: &'a str,
    ) -> LocalBoxFuture<'a, Result<VenueSearchResponse, APIError>> {
        async move {
            self.venue_keywords.borrow_mut().push(keyword.to_string());
            self.venue_reply.to_result()
        }
        .boxed_local()
    }

    fn ip_info(&self) -> LocalBoxFuture<'_, Result<IpInfoResponse, APIError>> {
        async move {
            *self.ip_info_calls.borrow_mut() += 1;
            self.ip_info_reply.to_result()
        }
        .boxed_local()
    }
}

pub const THREE_EVENTS: &str = r#"{
  "_embedded": {
    "events": [
      {
        "id": "evt-1",
        "name": "Taylor Swift | The Eras Tour",
        "dates": { "start": { "localDate": "2024-08-03", "localTime": "18:30:00" }, "status": { "code": "offsale" } },
        "classifications": [{ "segment": { "name": "Music" }, "genre": { "name": "Pop" } }],
        "_embedded": { "venues": [{ "name": "SoFi Stadium" }] }
      },
      {
        "id": "evt-2",
        "name": "Arctic Monkeys",
        "dates": { "start": { "localDate": "2024-06-10" } },
        "classifications": [{ "segment": { "name": "Music" }, "genre": { "name": "Rock" } }],
        "_embedded": { "venues": [{ "name": "Hollywood Bowl" }] }
      },
      {
        "id": "evt-3",
        "name": "Lakers vs. Celtics",
        "classifications": [{ "segment": { "name": "Sports" }, "genre": { "name": "Basketball" } }],
        "_embedded": { "venues": [{ "name": "Crypto.com Arena" }] }
      }
    ]
  }
}"#;

pub const EVENT_WITH_VENUE: &str = r#"{
  "id": "evt-2",
  "name": "Arctic Monkeys",
  "url": "https://www.ticketmaster.com/event/evt-2",
  "dates": { "start": { "localDate": "2024-06-10", "localTime": "19:00:00" }, "status": { "code": "onsale" } },
  "priceRanges": [{ "min": 59.5, "max": 250 }],
  "_embedded": {
    "venues": [{ "name": "Hollywood Bowl" }],
    "attractions": [{ "name": "Arctic Monkeys", "url": "https://www.ticketmaster.com/arctic-monkeys" }]
  }
}"#;

pub const HOLLYWOOD_BOWL: &str = r#"{
  "_embedded": {
    "venues": [{
      "name": "Hollywood Bowl",
      "address": { "line1": "2301 N. Highland Ave" },
      "city": { "name": "Los Angeles" },
      "state": { "stateCode": "CA" },
      "postalCode": "90068",
      "url": "https://www.ticketmaster.com/hollywood-bowl"
    }]
  }
}"#;

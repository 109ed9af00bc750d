use super::dto::{ErrorResponse, EventResponse, IpInfoResponse, SearchResponse, VenueSearchResponse};
use super::model::SearchParams;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use reqwest::{Client, StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

const SEARCH_PATH: &str = "search";
const EVENT_PATH: &str = "event";
const VENUE_PATH: &str = "venue";
const IP_INFO_PATH: &str = "ipinfo";

/// The four backend proxy endpoints the UI talks to.
///
/// Futures are not `Send`: the UI drives them from a single thread.
pub trait EventsBackend {
    fn search<'a>(
        &'a self,
        params: &'a SearchParams,
    ) -> LocalBoxFuture<'a, Result<SearchResponse, APIError>>;

    fn event<'a>(&'a self, id: &'a str) -> LocalBoxFuture<'a, Result<EventResponse, APIError>>;

    fn venues<'a>(
        &'a self,
        keyword: &'a str,
    ) -> LocalBoxFuture<'a, Result<VenueSearchResponse, APIError>>;

    fn ip_info(&self) -> LocalBoxFuture<'_, Result<IpInfoResponse, APIError>>;
}

#[derive(Debug, Error)]
pub enum APIError {
    #[error("{0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("Request failed with status {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("Received invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("Backend URL '{0}' cannot have paths appended")]
    InvalidBaseUrl(Url),
    #[error("Unable to detect location. Please enter manually.")]
    LocationUnavailable,
}

impl APIError {
    /// Message to show the user: the backend's own `error` when it sent one
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            APIError::Status {
                message: Some(message),
                ..
            } => message.to_string(),
            APIError::Status { message: None, .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

pub struct TicketingAPI {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl TicketingAPI {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, APIError> {
        if base_url.cannot_be_a_base() {
            return Err(APIError::InvalidBaseUrl(base_url));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(reqwest_middleware::Error::from)?;

        Ok(Self {
            client: ClientBuilder::new(client).build(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, APIError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| APIError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, APIError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest_middleware::Error::from)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|response| response.error);

            error!("Request failed with {}: {:?}", status, message);

            return Err(APIError::Status { status, message });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            error!("Response parse failed: {:?}", e);
            APIError::InvalidResponse(e)
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, APIError> {
        info!("Searching events");

        let url = self.endpoint(&[SEARCH_PATH])?;
        let response: SearchResponse = Self::get_json(self.client.get(url).query(params)).await?;

        debug!(
            "Got {} events",
            response
                .embedded
                .as_ref()
                .map(|e| e.events.len())
                .unwrap_or(0)
        );

        Ok(response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn event(&self, id: &str) -> Result<EventResponse, APIError> {
        info!("Getting event details");

        let url = self.endpoint(&[EVENT_PATH, id])?;

        Self::get_json(self.client.get(url)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn venues(&self, keyword: &str) -> Result<VenueSearchResponse, APIError> {
        info!("Searching venues");

        let url = self.endpoint(&[VENUE_PATH])?;

        Self::get_json(self.client.get(url).query(&[("keyword", keyword)])).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn ip_info(&self) -> Result<IpInfoResponse, APIError> {
        info!("Looking up device location");

        let url = self.endpoint(&[IP_INFO_PATH])?;

        Self::get_json(self.client.get(url)).await
    }
}

impl EventsBackend for TicketingAPI {
    fn search<'a>(
        &'a self,
        params: &'a SearchParams,
    ) -> LocalBoxFuture<'a, Result<SearchResponse, APIError>> {
        TicketingAPI::search(self, params).boxed_local()
    }

    fn event<'a>(&'a self, id: &'a str) -> LocalBoxFuture<'a, Result<EventResponse, APIError>> {
        TicketingAPI::event(self, id).boxed_local()
    }

    fn venues<'a>(
        &'a self,
        keyword: &'a str,
    ) -> LocalBoxFuture<'a, Result<VenueSearchResponse, APIError>> {
        TicketingAPI::venues(self, keyword).boxed_local()
    }

    fn ip_info(&self) -> LocalBoxFuture<'_, Result<IpInfoResponse, APIError>> {
        TicketingAPI::ip_info(self).boxed_local()
    }
}

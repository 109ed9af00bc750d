use super::form::SearchForm;
use super::render;
use super::sort::{sort_events, SortColumn, SortState};
use super::view::{Field, Region, View};
use super::visibility::*;
use crate::ticketing::api::{APIError, EventsBackend};
use crate::ticketing::dto::{EventResponse, SearchResponse, VenueSearchResponse};
use crate::ticketing::extract::{
    extract_detailed_event_data, extract_event_data, extract_geo_location, extract_venue_data,
};
use crate::ticketing::model::{EventDetail, EventSummary, VenueDetail};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Lets layout settle before scrolling to a freshly rendered panel
pub const SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Identifies one request; only the latest ticket of its kind may update the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Generation(u64);

impl Generation {
    fn issue(&mut self) -> Ticket {
        self.0 += 1;
        Ticket(self.0)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.0 == ticket.0
    }
}

/// Owns the page state and drives the view from backend responses.
///
/// Every request comes in two halves (`begin_*` then `finish_*`) so a
/// host running requests concurrently still gets last-one-wins updates;
/// the `async` methods chain both halves for the common case.
pub struct SearchController<B, V> {
    backend: B,
    view: V,
    current_events: Vec<EventResponse>,
    sort: SortState,
    searches: Generation,
    details: Generation,
    venues: Generation,
    current_detail: Option<EventDetail>,
    current_venue: Option<VenueDetail>,
}

impl<B: EventsBackend, V: View> SearchController<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        Self {
            backend,
            view,
            current_events: Vec::new(),
            sort: SortState::default(),
            searches: Generation::default(),
            details: Generation::default(),
            venues: Generation::default(),
            current_detail: None,
            current_venue: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn current_events(&self) -> &[EventResponse] {
        &self.current_events
    }

    pub fn summaries(&self) -> Vec<EventSummary> {
        self.current_events.iter().map(extract_event_data).collect()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn current_detail(&self) -> Option<&EventDetail> {
        self.current_detail.as_ref()
    }

    pub fn current_venue(&self) -> Option<&VenueDetail> {
        self.current_venue.as_ref()
    }

    #[instrument(skip_all, fields(keyword = %form.keyword))]
    pub async fn submit(&mut self, form: &SearchForm) {
        let Some(ticket) = self.begin_search(form) else {
            return;
        };

        let result = self.fetch_search(form).await;

        self.finish_search(ticket, result);
    }

    /// Validates and prepares the page. `None` means the form was incomplete
    pub fn begin_search(&mut self, form: &SearchForm) -> Option<Ticket> {
        let validation = form.validate();

        self.view
            .set_field_error(Field::Keyword, validation.keyword_missing);
        self.view
            .set_field_error(Field::Location, validation.location_missing);

        if !validation.is_valid() {
            info!("Search form is incomplete: {:?}", validation);
            return None;
        }

        show_loading(&mut self.view);
        hide_results(&mut self.view);
        hide_event_details(&mut self.view);
        hide_venue_details(&mut self.view);
        hide_venue_toggle(&mut self.view);
        self.current_detail = None;
        self.current_venue = None;

        Some(self.searches.issue())
    }

    /// Resolves the location when auto-detecting, then searches
    pub async fn fetch_search(&self, form: &SearchForm) -> Result<SearchResponse, APIError> {
        let location = if form.auto_detect {
            self.detect_location().await?
        } else {
            form.location.clone()
        };

        self.backend.search(&form.to_params(&location)).await
    }

    async fn detect_location(&self) -> Result<String, APIError> {
        let info = self.backend.ip_info().await.map_err(|err| {
            warn!("Location lookup failed: {}", err);
            APIError::LocationUnavailable
        })?;

        let location = extract_geo_location(&info)
            .and_then(|location| location.search_location())
            .ok_or_else(|| {
                warn!("Location lookup answered without coordinates: {:?}", info);
                APIError::LocationUnavailable
            })?;

        debug!("Detected location '{}'", location);

        Ok(location)
    }

    pub fn finish_search(&mut self, ticket: Ticket, result: Result<SearchResponse, APIError>) {
        if !self.searches.is_current(ticket) {
            warn!("Discarding response of superseded search {:?}", ticket);
            return;
        }

        hide_loading(&mut self.view);

        match result {
            Ok(response) => self.display_results(response),
            Err(err) => {
                error!("Search failed: {}", err);
                self.view.alert(&format!(
                    "Search failed: {}",
                    err.user_message("Search failed")
                ));
            }
        }
    }

    fn display_results(&mut self, response: SearchResponse) {
        let events = response.into_events();

        if events.is_empty() {
            info!("No events found");
            show_no_results(&mut self.view);
            return;
        }

        info!("Showing {} events", events.len());

        self.current_events = events;
        self.populate_table();
        show_results(&mut self.view);
    }

    pub fn populate_table(&mut self) {
        self.view
            .set_content(Region::ResultsBody, render::results_rows(&self.current_events));
    }

    /// Header click: sorts the current events and re-renders
    pub fn sort_by(&mut self, column: SortColumn) {
        let direction = self.sort.click(column);

        debug!("Sorting by {} {:?}", column, direction);

        sort_events(&mut self.current_events, column, direction);
        self.populate_table();
    }

    /// Opens the details of the table row at `index` (display order)
    pub async fn select_row(&mut self, index: usize) -> bool {
        let Some(id) = self
            .current_events
            .get(index)
            .and_then(|event| event.id.clone())
        else {
            warn!("No event id at row {}", index);
            return false;
        };

        self.fetch_and_show_event_details(&id).await;

        true
    }

    #[instrument(skip(self))]
    pub async fn fetch_and_show_event_details(&mut self, id: &str) {
        let ticket = self.begin_event_details();
        let result = self.backend.event(id).await;

        self.finish_event_details(ticket, result);
    }

    pub fn begin_event_details(&mut self) -> Ticket {
        hide_venue_details(&mut self.view);
        // a venue still loading belongs to the previous event
        self.venues.issue();

        self.details.issue()
    }

    pub fn finish_event_details(&mut self, ticket: Ticket, result: Result<EventResponse, APIError>) {
        if !self.details.is_current(ticket) {
            warn!("Discarding response of superseded event request {:?}", ticket);
            return;
        }

        let event = match result {
            Ok(event) => event,
            Err(err) => {
                error!("Error fetching event details: {}", err);
                self.view.alert(&format!(
                    "Failed to load event details: {}",
                    err.user_message("Failed to fetch event details")
                ));
                return;
            }
        };

        let detail = extract_detailed_event_data(&event);

        self.view
            .set_content(Region::EventDetails, render::event_details_panel(&detail));
        show_event_details(&mut self.view);
        self.view.scroll_into_view(Region::EventDetails, SCROLL_DELAY);

        if detail.venue_name.is_some() {
            show_venue_toggle(&mut self.view);
        } else {
            hide_venue_toggle(&mut self.view);
        }

        self.current_venue = None;
        self.current_detail = Some(detail);
    }

    /// Expands the venue of the shown event. One-shot: the toggle hides
    /// itself once used, and an expanded panel is left as is.
    pub async fn toggle_venue_details(&mut self) {
        if self.view.is_visible(Region::VenueDetails) {
            debug!("Venue details already shown");
            return;
        }
        if !self.view.is_visible(Region::VenueToggle) {
            debug!("No venue toggle on the page");
            return;
        }

        let Some(venue_name) = self
            .current_detail
            .as_ref()
            .and_then(|detail| detail.venue_name.clone())
        else {
            warn!("No venue to expand");
            return;
        };

        if self.fetch_and_show_venue_details(&venue_name).await {
            hide_venue_toggle(&mut self.view);
        }
    }

    /// Returns whether the response was applied to the page
    #[instrument(skip(self))]
    pub async fn fetch_and_show_venue_details(&mut self, venue_name: &str) -> bool {
        let ticket = self.begin_venue_details();
        let result = self.backend.venues(venue_name).await;

        self.finish_venue_details(ticket, result)
    }

    pub fn begin_venue_details(&mut self) -> Ticket {
        self.venues.issue()
    }

    pub fn finish_venue_details(
        &mut self,
        ticket: Ticket,
        result: Result<VenueSearchResponse, APIError>,
    ) -> bool {
        if !self.venues.is_current(ticket) {
            warn!("Discarding response of superseded venue request {:?}", ticket);
            return false;
        }

        match result.map(VenueSearchResponse::into_first_venue) {
            Ok(Some(venue)) => {
                let detail = extract_venue_data(&venue);

                self.view
                    .set_content(Region::VenueDetails, render::venue_card(&detail));
                show_venue_details(&mut self.view);

                self.current_venue = Some(detail);
            }
            Ok(None) => {
                warn!("No venue details found for this event");
                hide_venue_details(&mut self.view);
                hide_venue_toggle(&mut self.view);
            }
            Err(err) => {
                error!("Error fetching venue details: {}", err);
                hide_venue_details(&mut self.view);
                hide_venue_toggle(&mut self.view);
                self.view.alert(&format!(
                    "Failed to load venue details: {}",
                    err.user_message("Failed to fetch venue details")
                ));
            }
        }

        true
    }

    /// Resets the page and hands back a blank form.
    ///
    /// Requests still in flight are superseded.
    pub fn clear_form(&mut self) -> SearchForm {
        self.searches.issue();
        self.details.issue();
        self.venues.issue();

        hide_results(&mut self.view);
        hide_event_details(&mut self.view);
        hide_venue_details(&mut self.view);
        hide_loading(&mut self.view);
        hide_venue_toggle(&mut self.view);
        show_location_input(&mut self.view);
        self.current_detail = None;
        self.current_venue = None;

        self.view.set_field_error(Field::Keyword, false);
        self.view.set_field_error(Field::Location, false);

        SearchForm::default()
    }

    pub fn set_auto_detect(&mut self, form: &mut SearchForm, enabled: bool) {
        form.auto_detect = enabled;

        if enabled {
            form.location.clear();
            hide_location_input(&mut self.view);
            self.view.set_field_error(Field::Location, false);
        } else {
            show_location_input(&mut self.view);
        }
    }
}

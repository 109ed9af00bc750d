//! Show/hide helpers for the page regions.

use super::view::{Region, View};

pub fn show_loading(view: &mut impl View) {
    view.set_visible(Region::LoadingSpinner, true);
}

pub fn hide_loading(view: &mut impl View) {
    view.set_visible(Region::LoadingSpinner, false);
}

/// Results table and "no results" message are never shown together
pub fn show_results(view: &mut impl View) {
    view.set_visible(Region::ResultsContainer, true);
    view.set_visible(Region::NoResults, false);
}

pub fn hide_results(view: &mut impl View) {
    view.set_visible(Region::ResultsContainer, false);
    view.set_visible(Region::NoResults, false);
}

pub fn show_no_results(view: &mut impl View) {
    view.set_visible(Region::NoResults, true);
    view.set_visible(Region::ResultsContainer, false);
}

pub fn show_event_details(view: &mut impl View) {
    view.set_visible(Region::EventDetails, true);
}

pub fn hide_event_details(view: &mut impl View) {
    view.set_visible(Region::EventDetails, false);
}

pub fn show_venue_details(view: &mut impl View) {
    view.set_visible(Region::VenueDetails, true);
}

pub fn hide_venue_details(view: &mut impl View) {
    view.set_visible(Region::VenueDetails, false);
}

pub fn show_venue_toggle(view: &mut impl View) {
    view.set_visible(Region::VenueToggle, true);
}

pub fn hide_venue_toggle(view: &mut impl View) {
    view.set_visible(Region::VenueToggle, false);
}

pub fn show_location_input(view: &mut impl View) {
    view.set_visible(Region::LocationInput, true);
}

pub fn hide_location_input(view: &mut impl View) {
    view.set_visible(Region::LocationInput, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::view::HtmlDocument;

    #[test_log::test]
    fn results_and_no_results_should_be_exclusive() {
        let mut document = HtmlDocument::default();

        show_results(&mut document);
        assert!(document.is_visible(Region::ResultsContainer));
        assert!(!document.is_visible(Region::NoResults));

        show_no_results(&mut document);
        assert!(!document.is_visible(Region::ResultsContainer));
        assert!(document.is_visible(Region::NoResults));

        hide_results(&mut document);
        assert!(!document.is_visible(Region::ResultsContainer));
        assert!(!document.is_visible(Region::NoResults));
    }
}

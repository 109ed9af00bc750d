use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Named parts of the page the controller renders into
#[derive(strum::IntoStaticStr, strum::Display, strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "camelCase")]
pub enum Region {
    LoadingSpinner,
    ResultsContainer,
    NoResults,
    ResultsBody,
    EventDetails,
    VenueDetails,
    VenueToggle,
    LocationInput,
}

impl Region {
    /// Regions showing when the page first loads
    pub fn initially_visible(&self) -> bool {
        matches!(self, Region::LocationInput)
    }
}

/// Form inputs that carry an inline "required" indicator
#[derive(strum::IntoStaticStr, strum::Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    #[strum(serialize = "keyword-error")]
    Keyword,
    #[strum(serialize = "location-error")]
    Location,
}

/// HTML whose interpolated values have already been escaped.
///
/// Only the render module builds these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Render targets handed to the controller at startup
pub trait View {
    fn is_visible(&self, region: Region) -> bool;

    fn set_visible(&mut self, region: Region, visible: bool);

    fn set_content(&mut self, region: Region, markup: Markup);

    fn set_field_error(&mut self, field: Field, shown: bool);

    /// Blocking, user-visible message
    fn alert(&mut self, message: &str);

    fn scroll_into_view(&mut self, region: Region, delay: Duration);
}

/// In-memory page: keeps whatever the controller rendered so it can be
/// printed or inspected.
#[derive(Debug, Default)]
pub struct HtmlDocument {
    visibility: HashMap<Region, bool>,
    contents: HashMap<Region, Markup>,
    field_errors: HashSet<Field>,
    alerts: Vec<String>,
    scroll_requests: Vec<(Region, Duration)>,
}

impl HtmlDocument {
    pub fn content(&self, region: Region) -> &str {
        self.contents
            .get(&region)
            .map(Markup::as_str)
            .unwrap_or_default()
    }

    pub fn has_field_error(&self, field: Field) -> bool {
        self.field_errors.contains(&field)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    pub fn scroll_requests(&self) -> &[(Region, Duration)] {
        &self.scroll_requests
    }
}

impl View for HtmlDocument {
    fn is_visible(&self, region: Region) -> bool {
        self.visibility
            .get(&region)
            .copied()
            .unwrap_or_else(|| region.initially_visible())
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        self.visibility.insert(region, visible);
    }

    fn set_content(&mut self, region: Region, markup: Markup) {
        self.contents.insert(region, markup);
    }

    fn set_field_error(&mut self, field: Field, shown: bool) {
        if shown {
            self.field_errors.insert(field);
        } else {
            self.field_errors.remove(&field);
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn scroll_into_view(&mut self, region: Region, delay: Duration) {
        self.scroll_requests.push((region, delay));
    }
}

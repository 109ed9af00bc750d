use crate::ticketing::model::{Category, SearchParams};

pub const DEFAULT_DISTANCE: &str = "10";

/// Current values of the search form inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub keyword: String,
    /// Miles, kept as typed; empty means [`DEFAULT_DISTANCE`]
    pub distance: String,
    pub category: Category,
    pub location: String,
    pub auto_detect: bool,
}

/// Which required inputs are missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validation {
    pub keyword_missing: bool,
    pub location_missing: bool,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        !self.keyword_missing && !self.location_missing
    }
}

impl SearchForm {
    pub fn validate(&self) -> Validation {
        Validation {
            keyword_missing: self.keyword.trim().is_empty(),
            location_missing: !self.auto_detect && self.location.trim().is_empty(),
        }
    }

    /// Query for `/search`, with the location already resolved
    pub fn to_params(&self, location: &str) -> SearchParams {
        let distance = self.distance.trim();

        SearchParams {
            keyword: self.keyword.trim().to_string(),
            distance: if distance.is_empty() {
                DEFAULT_DISTANCE.to_string()
            } else {
                distance.to_string()
            },
            category: self.category,
            location: location.trim().to_string(),
        }
    }
}

use crate::ticketing::dto::EventResponse;
use crate::ticketing::extract::extract_event_data;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sortable headers of the results table
#[derive(strum::EnumString, strum::IntoStaticStr, strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum SortColumn {
    Event,
    Genre,
    Venue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    /// A header click: same column flips the direction, a new one starts ascending
    pub fn click(&mut self, column: SortColumn) -> SortDirection {
        if self.column == Some(column) {
            self.direction = self.direction.toggled();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }

        self.direction
    }
}

pub fn sort_events(events: &mut [EventResponse], column: SortColumn, direction: SortDirection) {
    events.sort_by(|a, b| {
        let (a, b) = (sort_key(a, column), sort_key(b, column));

        match direction {
            SortDirection::Ascending => locale_cmp(&a, &b),
            SortDirection::Descending => locale_cmp(&b, &a),
        }
    });
}

fn sort_key(event: &EventResponse, column: SortColumn) -> String {
    match column {
        SortColumn::Event => event.name.clone().unwrap_or_default(),
        SortColumn::Genre => extract_event_data(event).genre,
        SortColumn::Venue => extract_event_data(event).venue_name,
    }
}

/// Base letters first (ignoring case and accents), then accents, then the raw text
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| decomposed_lowercase(a).cmp(&decomposed_lowercase(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn decomposed_lowercase(value: &str) -> String {
    value.nfd().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn named(name: &str, genre: &str, venue: &str) -> EventResponse {
        serde_json::from_str(&format!(
            r#"{{ "name": "{name}",
                 "classifications": [{{ "genre": {{ "name": "{genre}" }} }}],
                 "_embedded": {{ "venues": [{{ "name": "{venue}" }}] }} }}"#
        ))
        .unwrap()
    }

    fn names(events: &[EventResponse]) -> Vec<&str> {
        events.iter().filter_map(|e| e.name.as_deref()).collect()
    }

    #[test_log::test]
    fn clicking_same_column_twice_should_toggle_direction() {
        let mut state = SortState::default();

        assert_eq!(state.click(SortColumn::Event), SortDirection::Ascending);
        assert_eq!(state.click(SortColumn::Event), SortDirection::Descending);
        assert_eq!(state.click(SortColumn::Event), SortDirection::Ascending);
    }

    #[test_log::test]
    fn clicking_other_column_should_reset_to_ascending() {
        let mut state = SortState::default();

        state.click(SortColumn::Genre);
        assert_eq!(state.click(SortColumn::Genre), SortDirection::Descending);

        assert_eq!(state.click(SortColumn::Venue), SortDirection::Ascending);
        assert_eq!(state.column, Some(SortColumn::Venue));
    }

    #[test_log::test]
    fn should_sort_by_name_in_both_directions() {
        let mut events = vec![
            named("beta", "Rock", "X"),
            named("Alpha", "Pop", "Y"),
            named("Émile", "Jazz", "Z"),
            named("delta", "Folk", "W"),
        ];

        sort_events(&mut events, SortColumn::Event, SortDirection::Ascending);
        assert_eq!(names(&events), vec!["Alpha", "beta", "delta", "Émile"]);

        sort_events(&mut events, SortColumn::Event, SortDirection::Descending);
        assert_eq!(names(&events), vec!["Émile", "delta", "beta", "Alpha"]);
    }

    #[test_log::test]
    fn should_sort_by_derived_genre_and_venue() {
        let mut events = vec![
            named("one", "Rock", "Bowl"),
            named("two", "Country", "Arena"),
            named("three", "Jazz", "Club"),
        ];

        sort_events(&mut events, SortColumn::Genre, SortDirection::Ascending);
        assert_eq!(names(&events), vec!["two", "three", "one"]);

        sort_events(&mut events, SortColumn::Venue, SortDirection::Descending);
        assert_eq!(names(&events), vec!["three", "one", "two"]);
    }

    #[test_log::test]
    fn equal_keys_should_keep_their_order() {
        let mut events = vec![
            named("first", "Rock", "Same"),
            named("second", "Rock", "Same"),
            named("third", "Rock", "Same"),
        ];

        sort_events(&mut events, SortColumn::Venue, SortDirection::Ascending);

        assert_eq!(names(&events), vec!["first", "second", "third"]);
    }

    #[test_log::test]
    fn column_should_parse_from_header_name() {
        assert_eq!(SortColumn::from_str("genre"), Ok(SortColumn::Genre));
        assert!(SortColumn::from_str("date").is_err());
    }

    #[test_log::test]
    fn locale_cmp_should_ignore_case_and_accents_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("école", "ecole"), Ordering::Greater);
        assert_eq!(locale_cmp("école", "ecolf"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}

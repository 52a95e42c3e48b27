use crate::models::{Location, PrayerType};

/// Search box text, active prayer type and time chip, as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationQuery {
    pub search_term: String,
    pub prayer: PrayerType,
    /// Exact time string to keep, or empty for all times.
    pub time_filter: String,
}

impl LocationQuery {
    pub fn matches(&self, location: &Location) -> bool {
        let term = self.search_term.to_lowercase();
        let matches_search = location.name.to_lowercase().contains(&term)
            || location.address.to_lowercase().contains(&term);
        let matches_time =
            self.time_filter.is_empty() || location.time_for(self.prayer) == self.time_filter;
        matches_search && matches_time
    }
}

/// Locations matching the query, in their original order.
pub fn filter_locations(locations: &[Location], query: &LocationQuery) -> Vec<Location> {
    locations
        .iter()
        .filter(|location| query.matches(location))
        .cloned()
        .collect()
}

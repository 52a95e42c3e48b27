use chrono::Local;
use log::{info, warn};
use rusqlite::Connection;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::db::repository::LocationRepo;
use crate::error::{ParseError, ValidationError};
use crate::geolocation::{
    provider_from_config, GeoOutcome, GeoState, GeolocationCoordinator, GeolocationProvider,
};
use crate::models::{
    seed_locations, Coordinates, Location, NewLocation, Notice, PrayerType, RouteInfo,
    UserPosition,
};
use crate::routing::{engine_from_config, RouteCoordinator, RouteState, RoutingEngine};
use crate::schedule::{filter_locations, group_by_time, normalize_time, LocationQuery, TimeBucket};

/// Everything the map view shows, plus the operations that change it.
///
/// The location list here is the single source of truth; every mutation is
/// written through to the store. Route and geolocation work runs in the
/// background and lands on the next `poll`.
pub struct ViewState {
    locations: Vec<Location>,
    prayer: PrayerType,
    search_term: String,
    time_filter: String,
    selected: Option<i64>,
    map_center: Coordinates,
    adding: bool,
    picked: Option<Coordinates>,
    geolocation: GeolocationCoordinator,
    routes: RouteCoordinator,
    notices: VecDeque<Notice>,
    persist_enabled: bool,
    chip_error_reported: bool,
    default_label: String,
}

impl ViewState {
    pub fn new(
        locations: Vec<Location>,
        center: Coordinates,
        provider: Arc<dyn GeolocationProvider>,
        engine: Option<Arc<dyn RoutingEngine>>,
    ) -> Self {
        let mut state = Self {
            locations,
            prayer: PrayerType::default(),
            search_term: String::new(),
            time_filter: String::new(),
            selected: None,
            map_center: center,
            adding: false,
            picked: None,
            geolocation: GeolocationCoordinator::new(provider, center),
            routes: RouteCoordinator::new(engine),
            notices: VecDeque::new(),
            persist_enabled: true,
            chip_error_reported: false,
            default_label: "the city centre".to_string(),
        };
        if let Some(first) = state.locations.first().map(|l| l.id) {
            state.selected = Some(first);
        }
        state
    }

    pub fn from_config(config: &AppConfig, locations: Vec<Location>) -> Self {
        let provider = provider_from_config(&config.geolocation);
        let engine = match engine_from_config(&config.routing) {
            Ok(engine) => Some(engine),
            Err(e) => {
                warn!("routing disabled: {}", e);
                None
            }
        };
        let mut state = Self::new(locations, config.map.center(), provider, engine);
        state.default_label = config.map.default_location_label.clone();
        match config.map.default_prayer.parse::<PrayerType>() {
            Ok(prayer) => state.prayer = prayer,
            Err(e) => warn!("{}; starting on {}", e, state.prayer.display_name()),
        }
        state
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: i64) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn prayer(&self) -> PrayerType {
        self.prayer
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn time_filter(&self) -> &str {
        &self.time_filter
    }

    pub fn map_center(&self) -> Coordinates {
        self.map_center
    }

    pub fn query(&self) -> LocationQuery {
        LocationQuery {
            search_term: self.search_term.clone(),
            prayer: self.prayer,
            time_filter: self.time_filter.clone(),
        }
    }

    pub fn filtered(&self) -> Vec<Location> {
        filter_locations(&self.locations, &self.query())
    }

    pub fn buckets(&self) -> Result<Vec<TimeBucket>, ParseError> {
        group_by_time(&self.locations, self.prayer)
    }

    /// Labels for the time filter chips. A bad stored time hides the chips
    /// and is reported once until the list changes.
    pub fn time_chips(&mut self) -> Vec<String> {
        match self.buckets() {
            Ok(buckets) => buckets.into_iter().map(|b| b.time).collect(),
            Err(e) => {
                if !self.chip_error_reported {
                    warn!("cannot group by time: {}", e);
                    self.notices.push_back(Notice::error(
                        "Time filters unavailable",
                        format!("{}. Edit that location's time to fix it.", e),
                    ));
                    self.chip_error_reported = true;
                }
                Vec::new()
            }
        }
    }

    pub fn selected(&self) -> Option<&Location> {
        self.selected.and_then(|id| self.location(id))
    }

    pub fn user_position(&self) -> Option<UserPosition> {
        self.geolocation.position()
    }

    pub fn geo_state(&self) -> GeoState {
        self.geolocation.state()
    }

    pub fn fallback_offered(&self) -> bool {
        self.geolocation.fallback_offered()
    }

    pub fn route_state(&self) -> RouteState {
        self.routes.state()
    }

    pub fn route_info(&self) -> Option<RouteInfo> {
        self.routes.info()
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn picked(&self) -> Option<Coordinates> {
        self.picked
    }

    // ── Filters and selection ────────────────────────────────────────────────

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn set_prayer_type(&mut self, prayer: PrayerType) {
        self.prayer = prayer;
        let still_exists = self
            .locations
            .iter()
            .any(|l| l.time_for(prayer) == self.time_filter);
        if !self.time_filter.is_empty() && !still_exists {
            self.time_filter.clear();
        }
    }

    /// Moves the time filter one chip along, with "all times" between the
    /// last chip and the first.
    pub fn cycle_time_filter(&mut self, forward: bool) {
        let mut chips = vec![String::new()];
        chips.extend(self.time_chips());
        let current = chips
            .iter()
            .position(|c| *c == self.time_filter)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % chips.len()
        } else {
            (current + chips.len() - 1) % chips.len()
        };
        self.time_filter = chips.swap_remove(next);
    }

    /// Selects a location and recentres the map on it. Unknown ids are
    /// ignored.
    pub fn select(&mut self, id: i64) -> bool {
        let Some(coords) = self.location(id).map(Location::coordinates) else {
            return false;
        };
        self.selected = Some(id);
        self.map_center = coords;
        self.refresh_route();
        true
    }

    // ── Geolocation and routes ───────────────────────────────────────────────

    pub fn request_location(&mut self) {
        self.geolocation.request();
    }

    pub fn accept_default_location(&mut self) -> UserPosition {
        let position = self.geolocation.accept_default_location();
        self.notices.push_back(Notice::info(
            "Default location set",
            format!("Using a default location in {}.", self.default_label),
        ));
        self.refresh_route();
        position
    }

    /// Applies finished background work. Returns true if anything visible
    /// changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        if let Some(outcome) = self.geolocation.poll() {
            self.apply_geo_outcome(outcome);
            changed = true;
        }
        changed |= self.routes.poll();
        changed
    }

    pub fn wait_for_location(&mut self, timeout: Duration) -> Option<GeoOutcome> {
        let outcome = self.geolocation.wait(timeout)?;
        self.apply_geo_outcome(outcome);
        Some(outcome)
    }

    pub fn wait_for_route(&mut self, timeout: Duration) -> Option<RouteInfo> {
        self.routes.wait(timeout)
    }

    fn apply_geo_outcome(&mut self, outcome: GeoOutcome) {
        match outcome {
            GeoOutcome::Located(position) => {
                self.notices.push_back(Notice::info(
                    "Location found",
                    "Routes now start from your position.",
                ));
                self.map_center = position.coordinates();
            }
            GeoOutcome::Failed(reason) => self.notices.push_back(reason.notice()),
        }
        self.refresh_route();
    }

    fn refresh_route(&mut self) {
        let destination = self
            .selected
            .and_then(|id| self.locations.iter().find(|l| l.id == id));
        self.routes.update(self.geolocation.position(), destination);
    }

    // ── Add and edit ─────────────────────────────────────────────────────────

    /// Enters add mode with the pick point at the current map centre.
    pub fn begin_add(&mut self) {
        self.adding = true;
        self.picked = Some(self.map_center);
    }

    pub fn cancel_add(&mut self) {
        self.adding = false;
        self.picked = None;
    }

    /// Records a map pick. Ignored outside add mode.
    pub fn pick_on_map(&mut self, coords: Coordinates) -> bool {
        if !self.adding {
            return false;
        }
        self.picked = Some(coords);
        true
    }

    pub fn add_location(
        &mut self,
        conn: &Connection,
        mut input: NewLocation,
    ) -> Result<i64, ValidationError> {
        input.validate()?;
        // Free-form times are kept as typed; parseable ones share a spelling
        for time in [&mut input.eid_time, &mut input.jummah_time] {
            if let Ok(normal) = normalize_time(time) {
                *time = normal;
            }
        }
        let id = self.next_id(Local::now().timestamp_millis());
        let location = input.into_location(id);
        info!("adding location {} ({})", location.name, id);
        self.notices.push_back(Notice::info(
            "Location added",
            format!("{} has been added to the map.", location.name),
        ));
        self.locations.push(location);
        self.adding = false;
        self.picked = None;
        self.chip_error_reported = false;
        self.persist(conn);
        self.select(id);
        Ok(id)
    }

    fn next_id(&self, candidate: i64) -> i64 {
        let mut id = candidate;
        while self.locations.iter().any(|l| l.id == id) {
            id += 1;
        }
        id
    }

    /// Sets the active prayer's time for one location, stored in its
    /// canonical spelling. Blank input is ignored; returns whether anything
    /// changed.
    pub fn edit_time(&mut self, conn: &Connection, id: i64, time: &str) -> Result<bool, ParseError> {
        let time = time.trim();
        if time.is_empty() {
            return Ok(false);
        }
        let time = normalize_time(time)?;

        let prayer = self.prayer;
        let Some(location) = self.locations.iter_mut().find(|l| l.id == id) else {
            return Ok(false);
        };
        location.set_time_for(prayer, time.clone());
        let notice = Notice::info(
            "Time updated",
            format!("{} {} time updated to {}.", location.name, prayer.display_name(), time),
        );
        self.notices.push_back(notice);
        self.chip_error_reported = false;
        self.persist(conn);
        Ok(true)
    }

    /// Drops stored edits and goes back to the bundled locations.
    pub fn reset_to_seed(&mut self, conn: &Connection) {
        if let Err(e) = LocationRepo::clear(conn) {
            warn!("could not clear stored locations: {}", e);
        }
        self.locations = seed_locations();
        self.time_filter.clear();
        self.chip_error_reported = false;
        self.selected = self.locations.first().map(|l| l.id);
        self.refresh_route();
        self.notices.push_back(Notice::info(
            "Locations reset",
            "The bundled location list has been restored.",
        ));
    }

    fn persist(&mut self, conn: &Connection) {
        if !self.persist_enabled {
            return;
        }
        if let Err(e) = LocationRepo::save(conn, &self.locations) {
            warn!("saving locations failed, keeping changes in memory: {}", e);
            self.disable_persistence();
        }
    }

    /// Keeps every later change in memory only and tells the user once.
    pub fn disable_persistence(&mut self) {
        if !self.persist_enabled {
            return;
        }
        self.persist_enabled = false;
        self.notices.push_back(Notice::error(
            "Changes not saved",
            "Your edits will last until you quit. Check the data directory is writable.",
        ));
    }

    // ── Notices ──────────────────────────────────────────────────────────────

    pub fn pop_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::error::RoutingError;
    use crate::geolocation::provider::{FixedProvider, UnsupportedProvider};
    use crate::geolocation::FailureReason;
    use crate::models::{RouteSummary, DEFAULT_CENTER};

    const WAIT: Duration = Duration::from_secs(5);

    struct FlatEngine;

    impl RoutingEngine for FlatEngine {
        fn compute_route(
            &self,
            _origin: Coordinates,
            _destination: Coordinates,
        ) -> Result<RouteSummary, RoutingError> {
            Ok(RouteSummary {
                total_distance_m: 1234.0,
                total_time_s: 300.0,
            })
        }
    }

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn offline_state() -> ViewState {
        ViewState::new(
            seed_locations(),
            DEFAULT_CENTER,
            Arc::new(UnsupportedProvider),
            None,
        )
    }

    fn routed_state() -> ViewState {
        ViewState::new(
            seed_locations(),
            DEFAULT_CENTER,
            Arc::new(FixedProvider::new(Coordinates::new(9.05, 7.45))),
            Some(Arc::new(FlatEngine)),
        )
    }

    fn new_location(name: &str) -> NewLocation {
        NewLocation {
            name: name.to_string(),
            address: "Plot 12, Jabi".to_string(),
            ..NewLocation::default()
        }
    }

    #[test]
    fn starts_on_first_location_with_everything_visible() {
        let state = offline_state();
        assert_eq!(state.selected().map(|l| l.id), Some(seed_locations()[0].id));
        assert_eq!(state.filtered().len(), 53);
        assert_eq!(state.prayer(), PrayerType::Eid);
        assert_eq!(state.route_state(), RouteState::NoRoute);
    }

    #[test]
    fn switching_prayer_clears_a_time_that_no_longer_exists() {
        let mut state = offline_state();
        state.time_filter = "08:00am".to_string();
        state.set_prayer_type(PrayerType::Jummah);
        assert_eq!(state.time_filter(), "");
        assert_eq!(state.filtered().len(), 53);

        state.time_filter = "01:30pm".to_string();
        state.set_prayer_type(PrayerType::Jummah);
        assert_eq!(state.time_filter(), "01:30pm");
    }

    #[test]
    fn cycling_chips_wraps_through_all_times() {
        let mut state = offline_state();
        state.set_prayer_type(PrayerType::Jummah);
        state.cycle_time_filter(true);
        assert_eq!(state.time_filter(), "01:30pm");
        state.cycle_time_filter(true);
        assert_eq!(state.time_filter(), "");
        state.cycle_time_filter(false);
        assert_eq!(state.time_filter(), "01:30pm");
    }

    #[test]
    fn bad_stored_time_hides_chips_and_reports_once() {
        let mut locations = seed_locations();
        locations[0].eid_time = "soon".to_string();
        let mut state = ViewState::new(locations, DEFAULT_CENTER, Arc::new(UnsupportedProvider), None);
        assert!(state.time_chips().is_empty());
        assert!(state.time_chips().is_empty());
        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Time filters unavailable");
    }

    #[test]
    fn select_recentres_without_a_user_position() {
        let mut state = offline_state();
        let target = seed_locations()[5].clone();
        assert!(state.select(target.id));
        assert_eq!(state.selected(), Some(&target));
        assert_eq!(state.map_center(), target.coordinates());
        assert!(!state.select(-1));
        assert_eq!(state.selected().map(|l| l.id), Some(target.id));
    }

    #[test]
    fn default_location_routes_to_selection() {
        let mut state = routed_state();
        let position = state.accept_default_location();
        assert!(position.is_default);
        assert_eq!(state.pop_notice().map(|n| n.title), Some("Default location set".to_string()));

        let info = state.wait_for_route(WAIT).unwrap();
        assert_eq!(info.distance_km, 1.23);
        assert_eq!(info.minutes, 5);
    }

    #[test]
    fn located_position_replaces_route_origin() {
        let mut state = routed_state();
        state.request_location();
        let outcome = state.wait_for_location(WAIT);
        assert!(matches!(outcome, Some(GeoOutcome::Located(p)) if !p.is_default));
        assert_eq!(state.map_center(), Coordinates::new(9.05, 7.45));
        assert!(state.wait_for_route(WAIT).is_some());
    }

    #[test]
    fn locating_again_retries_a_failed_route() {
        struct OnceDown(std::sync::atomic::AtomicBool);

        impl RoutingEngine for OnceDown {
            fn compute_route(
                &self,
                origin: Coordinates,
                destination: Coordinates,
            ) -> Result<RouteSummary, RoutingError> {
                if !self.0.swap(true, std::sync::atomic::Ordering::SeqCst) {
                    return Err(RoutingError::Unavailable("timed out".to_string()));
                }
                FlatEngine.compute_route(origin, destination)
            }
        }

        let mut state = ViewState::new(
            seed_locations(),
            DEFAULT_CENTER,
            Arc::new(FixedProvider::new(Coordinates::new(9.05, 7.45))),
            Some(Arc::new(OnceDown(std::sync::atomic::AtomicBool::new(false)))),
        );
        state.request_location();
        state.wait_for_location(WAIT);
        assert!(state.wait_for_route(WAIT).is_none());
        assert_eq!(state.route_state(), RouteState::NoRoute);

        state.request_location();
        state.wait_for_location(WAIT);
        assert_eq!(state.wait_for_route(WAIT).map(|r| r.minutes), Some(5));
    }

    #[test]
    fn failed_lookup_offers_the_default_location() {
        let mut state = offline_state();
        state.request_location();
        let outcome = state.wait_for_location(WAIT);
        assert_eq!(outcome, Some(GeoOutcome::Failed(FailureReason::Unsupported)));
        assert!(state.fallback_offered());
        assert!(state.user_position().is_none());
        let notice = state.pop_notice().unwrap();
        assert_eq!(notice.title, "Geolocation not supported");
    }

    #[test]
    fn picks_only_count_in_add_mode() {
        let mut state = offline_state();
        assert!(!state.pick_on_map(Coordinates::new(9.1, 7.4)));
        assert!(state.picked().is_none());

        state.begin_add();
        assert_eq!(state.picked(), Some(DEFAULT_CENTER));
        assert!(state.pick_on_map(Coordinates::new(9.1, 7.4)));
        assert_eq!(state.picked(), Some(Coordinates::new(9.1, 7.4)));

        state.cancel_add();
        assert!(!state.is_adding());
        assert!(state.picked().is_none());
    }

    #[test]
    fn adding_validates_persists_and_selects() {
        let conn = memory_db();
        let mut state = offline_state();
        state.begin_add();

        let err = state.add_location(&conn, new_location("X")).unwrap_err();
        assert_eq!(err.field, "name");
        assert!(state.is_adding());

        let id = state.add_location(&conn, new_location("Jabi Lake Ground")).unwrap();
        assert!(!state.is_adding());
        assert_eq!(state.locations().len(), 54);
        assert_eq!(state.selected().map(|l| l.id), Some(id));

        let stored = LocationRepo::load(&conn).unwrap().unwrap();
        assert_eq!(stored.len(), 54);
        assert!(stored.iter().any(|l| l.id == id && l.name == "Jabi Lake Ground"));
    }

    #[test]
    fn colliding_ids_are_bumped() {
        let state = offline_state();
        let taken = seed_locations()[0].id;
        let next = state.next_id(taken);
        assert_ne!(next, taken);
        assert!(state.location(next).is_none());
    }

    #[test]
    fn editing_a_time_updates_list_selection_and_store() {
        let conn = memory_db();
        let mut state = offline_state();
        let id = state.selected().unwrap().id;

        assert_eq!(state.edit_time(&conn, id, "  "), Ok(false));
        assert!(state.edit_time(&conn, id, "later").is_err());

        assert_eq!(state.edit_time(&conn, id, "07:30am"), Ok(true));
        assert_eq!(state.selected().unwrap().eid_time, "07:30am");
        let notice = state.pop_notice().unwrap();
        assert_eq!(notice.title, "Time updated");
        assert!(notice.description.ends_with("Eid time updated to 07:30am."));

        let stored = LocationRepo::load(&conn).unwrap().unwrap();
        assert_eq!(stored.iter().find(|l| l.id == id).unwrap().eid_time, "07:30am");
    }

    #[test]
    fn spaced_time_joins_the_existing_chip() {
        let conn = memory_db();
        let mut state = offline_state();
        let id = state.selected().unwrap().id;
        let before = state.time_chips();
        assert!(before.contains(&"09:00am".to_string()));

        assert_eq!(state.edit_time(&conn, id, " 09:00 AM"), Ok(true));
        assert_eq!(state.selected().unwrap().eid_time, "09:00am");
        let after = state.time_chips();
        assert!(after.len() <= before.len());
        assert_eq!(after.iter().filter(|c| c.as_str() == "09:00am").count(), 1);

        state.time_filter = "09:00am".to_string();
        assert!(state.filtered().iter().any(|l| l.id == id));
    }

    #[test]
    fn added_times_are_stored_in_one_spelling() {
        let conn = memory_db();
        let mut state = offline_state();
        let input = NewLocation {
            eid_time: "8:00 AM".to_string(),
            jummah_time: "after asr".to_string(),
            ..new_location("Jabi Lake Ground")
        };
        let id = state.add_location(&conn, input).unwrap();
        let added = state.location(id).unwrap();
        assert_eq!(added.eid_time, "08:00am");
        assert_eq!(added.jummah_time, "after asr");
    }

    #[test]
    fn write_failure_degrades_to_memory_once() {
        // No migrations, so the table is missing and every save fails
        let conn = Connection::open_in_memory().unwrap();
        let mut state = offline_state();
        let id = state.selected().unwrap().id;

        state.edit_time(&conn, id, "07:30am").unwrap();
        state.edit_time(&conn, id, "07:45am").unwrap();

        assert!(!state.persist_enabled);
        assert_eq!(state.selected().unwrap().eid_time, "07:45am");
        let failures = state
            .take_notices()
            .into_iter()
            .filter(|n| n.title == "Changes not saved")
            .count();
        assert_eq!(failures, 1);
    }

    #[test]
    fn memory_only_session_warns_once_and_skips_writes() {
        let conn = memory_db();
        let mut state = offline_state();
        state.disable_persistence();
        state.disable_persistence();
        assert_eq!(state.pop_notice().map(|n| n.title), Some("Changes not saved".to_string()));
        assert!(state.pop_notice().is_none());

        let id = state.selected().unwrap().id;
        state.edit_time(&conn, id, "07:30am").unwrap();
        assert!(LocationRepo::load(&conn).unwrap().is_none());
        assert!(state.take_notices().iter().all(|n| n.title != "Changes not saved"));
    }

    #[test]
    fn reset_restores_seed_and_clears_store() {
        let conn = memory_db();
        let mut state = offline_state();
        state.add_location(&conn, new_location("Jabi Lake Ground")).unwrap();
        state.time_filter = "08:00am".to_string();

        state.reset_to_seed(&conn);
        assert_eq!(state.locations(), seed_locations().as_slice());
        assert_eq!(state.time_filter(), "");
        assert!(LocationRepo::load(&conn).unwrap().is_none());
    }
}

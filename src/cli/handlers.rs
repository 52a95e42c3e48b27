use anyhow::{anyhow, bail, Context, Result};
use rusqlite::Connection;
use std::time::Duration;

use crate::api::{MosqueApi, MosqueInput};
use crate::cli::args::RemoteCommands;
use crate::config::AppConfig;
use crate::db::repository::LocationRepo;
use crate::db::Store;
use crate::geolocation::GeoOutcome;
use crate::models::{Location, NewLocation, Notice, NoticeKind, PrayerType};
use crate::schedule::{filter_locations, group_by_time, normalize_time, LocationQuery};
use crate::state::ViewState;
use crate::utils::format::{format_coords, format_minutes, truncate};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

/// Extra time on top of the HTTP timeout before a wait gives up.
const WAIT_SLACK: Duration = Duration::from_secs(2);

fn prayer_or_default(prayer: Option<&str>, config: &AppConfig) -> Result<PrayerType> {
    let raw = prayer.unwrap_or(&config.map.default_prayer);
    raw.parse()
}

fn print_notices(state: &mut ViewState) {
    for Notice {
        title,
        description,
        kind,
    } in state.take_notices()
    {
        let color = match kind {
            NoticeKind::Info => GREEN,
            NoticeKind::Error => RED,
        };
        println_colored!(color, "  {}", title);
        println_colored!(DIM, "  {}", description);
    }
}

/// View state over the stored list. A memory-only store is reported up front.
fn load_state(store: &Store, config: &AppConfig) -> ViewState {
    let mut state = ViewState::from_config(config, LocationRepo::load_or_seed(&store.conn));
    if !store.persistent {
        state.disable_persistence();
    }
    state
}

fn find<'a>(locations: &'a [Location], id: i64) -> Result<&'a Location> {
    locations
        .iter()
        .find(|l| l.id == id)
        .ok_or_else(|| anyhow!("No location with id {}. Run `musalla list` to see ids.", id))
}

// ─── List ────────────────────────────────────────────────────────────────────

pub fn handle_list(
    conn: &Connection,
    config: &AppConfig,
    prayer: Option<&str>,
    search: Option<&str>,
    time: Option<&str>,
) -> Result<()> {
    let prayer = prayer_or_default(prayer, config)?;
    let locations = LocationRepo::load_or_seed(conn);
    let time_filter = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => normalize_time(t)?,
        None => String::new(),
    };
    let query = LocationQuery {
        search_term: search.unwrap_or("").to_string(),
        prayer,
        time_filter,
    };
    let hits = filter_locations(&locations, &query);

    println!();
    println_colored!(
        GOLD,
        "  {} · {} ({} of {})",
        prayer.tab_label(),
        config.map.region_name,
        hits.len(),
        locations.len()
    );
    println!();
    if hits.is_empty() {
        println_colored!(DIM, "  No locations match.");
    }
    for location in &hits {
        println!(
            "  {}{:>14}\x1b[0m  {}{:<8}\x1b[0m  {}",
            DIM,
            location.id,
            AMBER,
            location.time_for(prayer),
            truncate(&location.name, 40)
        );
    }
    println!();
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(conn: &Connection, config: &AppConfig, prayer: Option<&str>) -> Result<()> {
    let prayer = prayer_or_default(prayer, config)?;
    let locations = LocationRepo::load_or_seed(conn);
    let buckets = group_by_time(&locations, prayer)
        .context("A stored time is invalid; fix it with `musalla edit`")?;

    println!();
    println_colored!(GOLD, "  {} by time", prayer.tab_label());
    for bucket in &buckets {
        println!();
        println_colored!(BOLD, "  {}  ({})", bucket.time, bucket.locations.len());
        for location in &bucket.locations {
            println!("    {}", truncate(&location.name, 50));
        }
    }
    println!();
    Ok(())
}

// ─── Show ────────────────────────────────────────────────────────────────────

pub fn handle_show(conn: &Connection, id: i64) -> Result<()> {
    let locations = LocationRepo::load_or_seed(conn);
    let location = find(&locations, id)?;

    println!();
    println_colored!(GOLD, "  {}", location.name);
    println_colored!(DIM, "  {}", location.address);
    println!();
    println!("  {:<8}  {}", "Eid", location.eid_time);
    println!("  {:<8}  {}", "Jummah", location.jummah_time);
    println_colored!(DIM, "  {:<8}  {}", "At", format_coords(location.coordinates()));
    println!();
    Ok(())
}

// ─── Add / edit / reset ──────────────────────────────────────────────────────

pub fn handle_add(store: &Store, config: &AppConfig, input: NewLocation) -> Result<()> {
    let mut state = load_state(store, config);
    let id = state
        .add_location(&store.conn, input)
        .map_err(|e| anyhow!("{}", e.message))?;
    print_notices(&mut state);
    println_colored!(DIM, "  id {}", id);
    Ok(())
}

pub fn handle_edit(
    store: &Store,
    config: &AppConfig,
    id: i64,
    time: &str,
    prayer: Option<&str>,
) -> Result<()> {
    if time.trim().is_empty() {
        bail!("Time cannot be empty");
    }
    let prayer = prayer_or_default(prayer, config)?;
    let mut state = load_state(store, config);
    find(state.locations(), id)?;
    state.set_prayer_type(prayer);
    state.edit_time(&store.conn, id, time)?;
    print_notices(&mut state);
    Ok(())
}

pub fn handle_reset(store: &Store, config: &AppConfig) -> Result<()> {
    let mut state = load_state(store, config);
    state.reset_to_seed(&store.conn);
    print_notices(&mut state);
    Ok(())
}

// ─── Locate / route ──────────────────────────────────────────────────────────

pub fn handle_locate(conn: &Connection, config: &AppConfig) -> Result<()> {
    let mut state = ViewState::from_config(config, LocationRepo::load_or_seed(conn));
    state.request_location();
    let timeout = Duration::from_secs(config.geolocation.timeout_secs) + WAIT_SLACK;
    match state.wait_for_location(timeout) {
        Some(GeoOutcome::Located(position)) => {
            println_colored!(GREEN, "  {}: {}", position.marker_label(), format_coords(position.coordinates()));
        }
        Some(GeoOutcome::Failed(_)) => {
            print_notices(&mut state);
            println_colored!(DIM, "  Use `musalla route <id> --default-location` to route from {}.", config.map.default_location_label);
        }
        None => println_colored!(AMBER, "  Still locating after {}s; giving up.", timeout.as_secs()),
    }
    Ok(())
}

pub fn handle_route(conn: &Connection, config: &AppConfig, id: i64, default_location: bool) -> Result<()> {
    let mut state = ViewState::from_config(config, LocationRepo::load_or_seed(conn));
    if !state.select(id) {
        bail!("No location with id {}. Run `musalla list` to see ids.", id);
    }

    if default_location {
        state.accept_default_location();
    } else {
        state.request_location();
        let timeout = Duration::from_secs(config.geolocation.timeout_secs) + WAIT_SLACK;
        match state.wait_for_location(timeout) {
            Some(GeoOutcome::Located(_)) => {}
            Some(GeoOutcome::Failed(_)) | None => {
                state.accept_default_location();
            }
        }
    }
    print_notices(&mut state);

    let destination = find(state.locations(), id)?.clone();
    let origin = state
        .user_position()
        .ok_or_else(|| anyhow!("No starting position available"))?;

    println!();
    println_colored!(GOLD, "  {} → {}", origin.marker_label(), destination.name);
    let timeout = Duration::from_secs(config.routing.timeout_secs) + WAIT_SLACK;
    match state.wait_for_route(timeout) {
        Some(info) => {
            println_colored!(BOLD, "  {} km · {}", info.distance_label(), format_minutes(info.minutes));
        }
        None => println_colored!(AMBER, "  No route available right now."),
    }
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init {
        AppConfig::default().save()?;
    } else {
        config.save()?;
    }
    println_colored!(GREEN, "  Wrote {}", path.display());
    Ok(())
}

// ─── Remote ──────────────────────────────────────────────────────────────────

pub fn handle_remote(conn: &Connection, config: &AppConfig, action: &RemoteCommands) -> Result<()> {
    let mut api = MosqueApi::new(&config.api, Duration::from_secs(config.api.timeout_secs))?;
    let value = match action {
        RemoteCommands::List => api.list()?,
        RemoteCommands::Get { id } => api.get(*id)?,
        RemoteCommands::Push { id, update } => {
            let locations = LocationRepo::load_or_seed(conn);
            let input = MosqueInput::from(find(&locations, *id)?);
            match update {
                Some(remote_id) => api.update(*remote_id, &input)?,
                None => api.create(&input)?,
            }
        }
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;

use crate::error::PersistenceError;
use crate::models::{seed_locations, Location};

/// Key holding the whole location list as one JSON array.
pub const LOCATIONS_KEY: &str = "mosqueData";

// ─── Location list ──────────────────────────────────────────────────────────

pub struct LocationRepo;

impl LocationRepo {
    /// Reads and validates the stored list. `Ok(None)` if nothing is stored.
    pub fn load(conn: &Connection) -> Result<Option<Vec<Location>>, PersistenceError> {
        let Some(raw) = MetaRepo::get(conn, LOCATIONS_KEY)? else {
            return Ok(None);
        };
        let locations: Vec<Location> = serde_json::from_str(&raw)?;
        validate(&locations)?;
        Ok(Some(locations))
    }

    /// Overwrites the stored list wholesale.
    pub fn save(conn: &Connection, locations: &[Location]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(locations)?;
        MetaRepo::set(conn, LOCATIONS_KEY, &raw)
    }

    /// Stored list if present and valid, otherwise the seed set.
    pub fn load_or_seed(conn: &Connection) -> Vec<Location> {
        match Self::load(conn) {
            Ok(Some(locations)) if !locations.is_empty() => locations,
            Ok(_) => {
                info!("no stored locations; starting from seed data");
                seed_locations()
            }
            Err(e) => {
                warn!("ignoring stored locations: {}", e);
                seed_locations()
            }
        }
    }

    pub fn clear(conn: &Connection) -> Result<(), PersistenceError> {
        MetaRepo::delete(conn, LOCATIONS_KEY)
    }
}

fn validate(locations: &[Location]) -> Result<(), PersistenceError> {
    let mut ids = HashSet::new();
    for location in locations {
        if !ids.insert(location.id) {
            return Err(PersistenceError::Invalid(format!(
                "duplicate id {}",
                location.id
            )));
        }
        if location.name.trim().is_empty() || location.address.trim().is_empty() {
            return Err(PersistenceError::Invalid(format!(
                "location {} has an empty name or address",
                location.id
            )));
        }
        if !location.lat.is_finite() || !location.lng.is_finite() {
            return Err(PersistenceError::Invalid(format!(
                "location {} has non-finite coordinates",
                location.id
            )));
        }
    }
    Ok(())
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, PersistenceError> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(PersistenceError::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<(), PersistenceError> {
        conn.execute(
            "INSERT INTO app_meta (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> Result<(), PersistenceError> {
        conn.execute("DELETE FROM app_meta WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn empty_store_falls_back_to_seed() {
        let conn = memory_db();
        assert!(LocationRepo::load(&conn).unwrap().is_none());
        assert_eq!(LocationRepo::load_or_seed(&conn), seed_locations());
    }

    #[test]
    fn saved_list_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("musalla.db");
        let mut locations = seed_locations();
        locations.truncate(3);
        locations[1].eid_time = "07:45am".to_string();

        {
            let conn = Connection::open(&path).unwrap();
            run_migrations(&conn).unwrap();
            LocationRepo::save(&conn, &locations).unwrap();
        }

        let conn = Connection::open(&path).unwrap();
        assert_eq!(LocationRepo::load_or_seed(&conn), locations);
    }

    #[test]
    fn stored_blob_uses_camel_case_fields() {
        let conn = memory_db();
        LocationRepo::save(&conn, &seed_locations()[..1]).unwrap();
        let raw = MetaRepo::get(&conn, LOCATIONS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"eidTime\":\"09:00am\""));
        assert!(raw.contains("\"jummahTime\":\"01:30pm\""));
    }

    #[test]
    fn malformed_json_is_rejected_and_seed_used() {
        let conn = memory_db();
        MetaRepo::set(&conn, LOCATIONS_KEY, "{not json").unwrap();
        assert!(matches!(LocationRepo::load(&conn), Err(PersistenceError::Json(_))));
        assert_eq!(LocationRepo::load_or_seed(&conn).len(), 53);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let conn = memory_db();
        MetaRepo::set(&conn, LOCATIONS_KEY, r#"[{"id":1,"name":"A"}]"#).unwrap();
        assert!(matches!(LocationRepo::load(&conn), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let conn = memory_db();
        let mut locations = seed_locations();
        locations[1].id = locations[0].id;
        LocationRepo::save(&conn, &locations).unwrap();
        assert!(matches!(LocationRepo::load(&conn), Err(PersistenceError::Invalid(_))));
        assert_eq!(LocationRepo::load_or_seed(&conn), seed_locations());
    }

    #[test]
    fn stored_empty_list_uses_seed() {
        let conn = memory_db();
        LocationRepo::save(&conn, &[]).unwrap();
        assert_eq!(LocationRepo::load_or_seed(&conn).len(), 53);
    }

    #[test]
    fn clear_removes_the_key() {
        let conn = memory_db();
        LocationRepo::save(&conn, &seed_locations()).unwrap();
        LocationRepo::clear(&conn).unwrap();
        assert!(LocationRepo::load(&conn).unwrap().is_none());
    }
}

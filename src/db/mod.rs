pub mod migrations;
pub mod repository;

use anyhow::{Context, Result};
use log::warn;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use migrations::run_migrations;

/// An open database plus whether writes outlive the session.
pub struct Store {
    pub conn: Connection,
    pub persistent: bool,
}

impl Store {
    /// Opens the database at `path`, or an in-memory one when the path could
    /// not be resolved or the file cannot be opened and migrated.
    pub fn open_or_memory(path: Result<PathBuf>) -> Result<Self> {
        match path.and_then(|p| open_file(&p)) {
            Ok(conn) => Ok(Self {
                conn,
                persistent: true,
            }),
            Err(e) => {
                warn!("database unavailable, keeping this session in memory: {:#}", e);
                let conn = Connection::open_in_memory().context("Opening in-memory database")?;
                run_migrations(&conn)?;
                Ok(Self {
                    conn,
                    persistent: false,
                })
            }
        }
    }
}

fn open_file(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Opening database at {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::LocationRepo;

    #[test]
    fn opens_a_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_or_memory(Ok(dir.path().join("musalla.db"))).unwrap();
        assert!(store.persistent);
        assert_eq!(LocationRepo::load_or_seed(&store.conn).len(), 53);
    }

    #[test]
    fn unusable_path_falls_back_to_memory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = Store::open_or_memory(Ok(file.path().join("data").join("musalla.db"))).unwrap();
        assert!(!store.persistent);

        let mut locations = LocationRepo::load_or_seed(&store.conn);
        assert_eq!(locations.len(), 53);
        locations.truncate(3);
        LocationRepo::save(&store.conn, &locations).unwrap();
        assert_eq!(LocationRepo::load(&store.conn).unwrap().map(|l| l.len()), Some(3));
    }

    #[test]
    fn unresolved_path_falls_back_to_memory() {
        let store = Store::open_or_memory(Err(anyhow::anyhow!("no home directory"))).unwrap();
        assert!(!store.persistent);
    }
}

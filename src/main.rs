mod api;
mod cli;
mod config;
mod db;
mod error;
mod geolocation;
mod models;
mod routing;
mod schedule;
mod state;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::Store;
use models::NewLocation;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // An unusable data directory leaves the session in memory
    let db_path = AppConfig::ensure_data_dir().and_then(|_| AppConfig::db_path());
    let store = Store::open_or_memory(db_path)?;
    let conn = &store.conn;

    match cli.command {
        Some(Commands::List {
            prayer,
            search,
            time,
        }) => {
            handlers::handle_list(
                conn,
                &config,
                prayer.as_deref(),
                search.as_deref(),
                time.as_deref(),
            )?;
        }
        Some(Commands::Times { prayer }) => {
            handlers::handle_times(conn, &config, prayer.as_deref())?;
        }
        Some(Commands::Show { id }) => {
            handlers::handle_show(conn, id)?;
        }
        Some(Commands::Add {
            name,
            address,
            eid,
            jummah,
            lat,
            lng,
        }) => {
            let input = NewLocation {
                name,
                address,
                eid_time: eid,
                jummah_time: jummah,
                lat,
                lng,
            };
            handlers::handle_add(&store, &config, input)?;
        }
        Some(Commands::Edit { id, time, prayer }) => {
            handlers::handle_edit(&store, &config, id, &time, prayer.as_deref())?;
        }
        Some(Commands::Route {
            id,
            default_location,
        }) => {
            handlers::handle_route(conn, &config, id, default_location)?;
        }
        Some(Commands::Locate) => {
            handlers::handle_locate(conn, &config)?;
        }
        Some(Commands::Reset) => {
            handlers::handle_reset(&store, &config)?;
        }
        Some(Commands::Config { init }) => {
            handlers::handle_config(&config, init)?;
        }
        Some(Commands::Remote { action }) => {
            handlers::handle_remote(conn, &config, &action)?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(store, config)?;
        }
    }

    Ok(())
}

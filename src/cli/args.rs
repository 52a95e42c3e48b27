use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "musalla", version, author, about = "Find Eid and Jummah prayer grounds from your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List locations, optionally filtered
    List {
        /// Prayer type whose times are shown (eid, jummah)
        #[arg(long, short)]
        prayer: Option<String>,
        /// Match against name or address, case-insensitively
        #[arg(long, short)]
        search: Option<String>,
        /// Only show locations at exactly this time (e.g. 08:30am)
        #[arg(long, short)]
        time: Option<String>,
    },
    /// Show locations grouped by prayer time, earliest first
    Times {
        /// Prayer type (eid, jummah)
        #[arg(long, short)]
        prayer: Option<String>,
    },
    /// Show one location in full
    Show {
        /// Location id
        id: i64,
    },
    /// Add a new location
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        /// Eid prayer time
        #[arg(long, default_value = "09:00am")]
        eid: String,
        /// Jummah prayer time
        #[arg(long, default_value = "01:30pm")]
        jummah: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Change one location's prayer time
    Edit {
        /// Location id
        id: i64,
        /// New time (e.g. 08:15am)
        time: String,
        /// Which prayer's time to change (eid, jummah)
        #[arg(long, short)]
        prayer: Option<String>,
    },
    /// Distance and travel time from you to a location
    Route {
        /// Location id
        id: i64,
        /// Skip the lookup and start from the default location
        #[arg(long)]
        default_location: bool,
    },
    /// Look up your current position
    Locate,
    /// Throw away local edits and restore the bundled locations
    Reset,
    /// Write the current settings to config.toml
    Config {
        /// Overwrite an existing file with defaults
        #[arg(long)]
        init: bool,
    },
    /// Talk to the remote mosque API
    Remote {
        #[command(subcommand)]
        action: RemoteCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum RemoteCommands {
    /// Fetch all mosques from the server
    List,
    /// Fetch one mosque by id
    Get {
        id: i64,
    },
    /// Send a local location to the server (create, or update with --update)
    Push {
        /// Local location id
        id: i64,
        /// Update the server record with this id instead of creating one
        #[arg(long)]
        update: Option<i64>,
    },
}

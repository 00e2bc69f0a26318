//! # CLI
//!
//! This module defines the command-line interface of `behave` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring JSON
//! arguments are objects).
use behave_core::Record;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "behave", version, about = "Behave gamification API client")]
pub struct Cli {
    /// Base URL of the Behave API
    #[arg(long, env = "BEHAVE_BASE_URL", default_value = behave_core::config::DEFAULT_BASE_URL)]
    pub url: String,

    /// API token sent in the X-Auth-Token header
    #[arg(long, env = "BEHAVE_API_TOKEN", hide_env_values = true)]
    pub token: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Track a behaviour performed by a player
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// behave --token $TOKEN track player-1 login --context '{"device": "mobile"}'
    /// ```
    Track {
        player_id: String,
        /// The behaviour (verb) to track
        verb: String,
        /// JSON object describing the context of the action
        #[arg(long, value_parser = parse_object, default_value = "{}")]
        context: Record,
    },

    /// Create or update a player's traits
    Identify {
        player_id: String,
        /// JSON object of traits (name, email, ...)
        #[arg(long, value_parser = parse_object, default_value = "{}")]
        traits: Record,
    },

    /// Player ranks, badges and identities
    Player {
        #[command(subcommand)]
        sub: PlayerCommands,
    },

    /// Leaderboard management and results
    Leaderboard {
        #[command(subcommand)]
        sub: LeaderboardCommands,
    },

    /// Badge management
    Badge {
        #[command(subcommand)]
        sub: BadgeCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlayerCommands {
    /// Show the player's rank on one leaderboard
    Rank {
        player_id: String,
        leaderboard_id: String,
    },
    /// Show the player's ranks on every leaderboard they appear in
    Ranks {
        player_id: String,
        /// Extra JSON options sent with the request
        #[arg(long, value_parser = parse_object, default_value = "{}")]
        options: Record,
    },
    /// List the player's badges
    Badges {
        player_id: String,
        /// List the badges still to unlock instead
        #[arg(short, long)]
        locked: bool,
    },
    /// Link an external identity to the player
    AddIdentity {
        player_id: String,
        identity: String,
        provider: String,
    },
    /// Unlink an external identity from the player
    RemoveIdentity { player_id: String, provider: String },
}

#[derive(Subcommand, Debug)]
pub enum LeaderboardCommands {
    /// Create a new leaderboard
    Create {
        name: String,
        reference_id: String,
        /// JSON object of extra attributes (type, time_frame, ...)
        #[arg(long, value_parser = parse_object, default_value = "{}")]
        attrs: Record,
    },
    /// Delete a leaderboard
    Delete { leaderboard_id: String },
    /// Stream a leaderboard's results page by page
    Results {
        leaderboard_id: String,
        /// Records per page
        #[arg(long, default_value_t = behave_core::client::DEFAULT_PAGE_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
        /// Maximum number of records to return (0 for all)
        #[arg(long, default_value_t = 0)]
        max: u64,
        /// Page to start from
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// JSON object of filters sent with every page request
        #[arg(long, value_parser = parse_object, default_value = "{}")]
        filters: Record,
    },
}

#[derive(Subcommand, Debug)]
pub enum BadgeCommands {
    /// Delete a badge
    Delete { badge_id: String },
}

fn parse_object(value: &str) -> Result<Record, String> {
    match serde_json::from_str(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("Expected a JSON object".to_string()),
        Err(e) => Err(format!("Invalid JSON: {e}")),
    }
}

//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// User store - CRUD over the `users` table
#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands. Each one connects, ensures the schema, runs and closes.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the users table if it does not exist
    Init,

    /// Add user 12345 "John Doe" and list all users
    Demo,

    /// Add a user (no-op if the id is taken)
    Add {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
        full_name: String,
    },

    /// List all users
    List {
        /// Print a JSON array instead of one user per line
        #[arg(long)]
        json: bool,
    },

    /// Check whether a user exists
    Exists {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
    },

    /// Replace a user's full name
    Update {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
        new_name: String,
    },

    /// Delete a user
    Delete {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
    },
}

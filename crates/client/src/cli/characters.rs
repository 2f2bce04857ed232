//! Character CLI commands.

use clap::{Parser, Subcommand};

/// Character commands.
#[derive(Debug, Parser)]
pub struct CharactersCommand {
    #[command(subcommand)]
    pub action: CharactersAction,
}

/// Available character actions.
#[derive(Debug, Subcommand)]
pub enum CharactersAction {
    /// Get character by ID.
    Get {
        /// Character ID.
        id: i64,
    },
    /// Create a new character.
    Create {
        /// Character name (1-100 characters).
        #[arg(long)]
        name: String,
        /// Optional description.
        #[arg(long)]
        description: Option<String>,
    },
}

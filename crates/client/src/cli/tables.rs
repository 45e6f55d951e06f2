//! Table CLI commands.

use clap::{Parser, Subcommand};

/// Table management commands.
#[derive(Debug, Parser)]
pub struct TablesCommand {
    #[command(subcommand)]
    pub action: TablesAction,
}

/// Available table actions.
#[derive(Debug, Subcommand)]
pub enum TablesAction {
    /// List all tables.
    List,
    /// Create a table keyed by `id`.
    Create {
        /// Table name.
        name: String,
    },
    /// Delete a table.
    Delete {
        /// Table name.
        name: String,
    },
}

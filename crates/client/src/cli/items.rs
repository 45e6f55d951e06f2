//! Item CLI commands.

use clap::{Args, Parser, Subcommand};

/// Item commands.
#[derive(Debug, Parser)]
pub struct ItemsCommand {
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Paging flags shared by read commands.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Maximum items per page (1-1000).
    #[arg(long)]
    pub limit: Option<u32>,
    /// Cursor returned by a previous page.
    #[arg(long)]
    pub cursor: Option<String>,
}

/// Available item actions.
#[derive(Debug, Subcommand)]
pub enum ItemsAction {
    /// List items of a table.
    List {
        /// Table name.
        table: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Create an item with id, name and phone.
    Create {
        /// Table name.
        table: String,
        /// Item ID.
        #[arg(long)]
        id: String,
        /// Item name.
        #[arg(long)]
        name: String,
        /// Item phone.
        #[arg(long)]
        phone: String,
    },
    /// Create an arbitrary item from a JSON object.
    Put {
        /// Table name.
        table: String,
        /// Item as a JSON object, e.g. '{"id":"1","age":30}'.
        item: String,
    },
    /// Get item by ID.
    Get {
        /// Table name.
        table: String,
        /// Item ID.
        id: String,
    },
    /// Update name and/or phone of an item.
    Update {
        /// Table name.
        table: String,
        /// Item ID.
        id: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New phone.
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete item by ID.
    Delete {
        /// Table name.
        table: String,
        /// Item ID.
        id: String,
    },
    /// Query items with a key condition.
    Query {
        /// Table name.
        table: String,
        /// Key condition expression, e.g. 'id = :id'.
        #[arg(long)]
        key_condition: String,
        /// Expression attribute values as JSON, e.g. '{":id":"1"}'.
        #[arg(long)]
        values: String,
        /// Expression attribute names as JSON, e.g. '{"#n":"name"}'.
        #[arg(long)]
        names: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Scan items with a filter.
    Scan {
        /// Table name.
        table: String,
        /// Filter expression, e.g. '#n = :n'.
        #[arg(long)]
        filter: String,
        /// Expression attribute values as JSON.
        #[arg(long)]
        values: String,
        /// Expression attribute names as JSON.
        #[arg(long)]
        names: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

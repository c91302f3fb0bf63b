//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use car_catalog_core::FilterKey;

#[derive(Parser)]
#[command(name = "car-catalog")]
#[command(about = "Browse and maintain the automobile catalog", long_about = None)]
pub(crate) struct Cli {
    /// Path to the catalog database (default: from settings, else the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check an employee login and password
    Login {
        login: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Manage employee accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Bulk-load a JSON or YAML source document into the catalog
    Load {
        /// Source document (.json, .yaml or .yml)
        file: PathBuf,

        /// Give every loaded specification this price instead of a random one
        #[arg(long)]
        price: Option<i64>,
    },

    /// Search the catalog
    Search {
        #[command(flatten)]
        filters: SearchArgs,
    },

    /// List the values offered for a search input
    Choices {
        /// One of: brand, country, model, class, body-type
        field: FilterKey,

        /// Narrow countries and models to this brand
        #[arg(long)]
        brand: Option<String>,

        /// Narrow classes and body types to models with this name
        #[arg(long)]
        model: Option<String>,
    },

    /// Browse records by id for editing and deleting
    Records {
        #[command(subcommand)]
        level: RecordsAction,
    },

    /// Add a car: brand, model, one generation and one specification
    Add(AddArgs),

    /// Edit catalog fields
    Edit(EditArgs),

    /// Delete one specification by id
    Delete {
        /// Specification id
        id: String,
    },

    /// Show row counts for every table
    Stats,

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum UserAction {
    /// Register a new employee
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Login (must be unique)
        #[arg(long)]
        login: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Args, Clone, Default)]
pub(crate) struct SearchArgs {
    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub class: Option<String>,

    #[arg(long)]
    pub body_type: Option<String>,

    /// Earliest generation start year
    #[arg(long)]
    pub year_from: Option<String>,

    /// Latest generation end year
    #[arg(long)]
    pub year_to: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum RecordsAction {
    /// List all marks
    Marks,

    /// List the models of a mark
    Models { mark_id: String },

    /// List the generations of a model
    Generations { model_id: String },

    /// List the specifications of a model
    Specifications { model_id: String },

    /// Show one specification in full
    Show { id: String },
}

#[derive(Args)]
pub(crate) struct AddArgs {
    #[arg(long)]
    pub brand: String,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub model: String,

    #[arg(long)]
    pub class: Option<String>,

    #[arg(long)]
    pub year_from: Option<String>,

    #[arg(long)]
    pub year_to: Option<String>,

    #[arg(long)]
    pub body_type: Option<String>,

    /// Generation name
    #[arg(long)]
    pub generation: Option<String>,

    #[arg(long)]
    pub year_start: Option<String>,

    #[arg(long)]
    pub year_stop: Option<String>,

    #[arg(long)]
    pub engine_type: Option<String>,

    #[arg(long)]
    pub horse_power: Option<String>,

    #[arg(long)]
    pub transmission: Option<String>,

    #[arg(long)]
    pub drive: Option<String>,

    #[arg(long)]
    pub volume: Option<String>,

    #[arg(long)]
    pub consumption_mixed: Option<String>,

    #[arg(long)]
    pub max_speed: Option<String>,

    #[arg(long)]
    pub price: Option<String>,
}

#[derive(Args)]
pub(crate) struct EditArgs {
    /// Mark id targeted by Marks.* edits
    #[arg(long)]
    pub mark: Option<String>,

    /// Model id targeted by Models.* edits
    #[arg(long)]
    pub model: Option<String>,

    /// Generation id targeted by Generations.* edits
    #[arg(long)]
    pub generation: Option<String>,

    /// Specification id targeted by Specifications.* edits
    #[arg(long)]
    pub specification: Option<String>,

    /// Edits as Table.column=value (repeatable, e.g. Marks.country=Japan)
    #[arg(long = "set", required = true)]
    pub sets: Vec<String>,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and the resolved database path
    Show,

    /// Print the settings file path
    Path,

    /// Store a default database path (omit to clear it)
    SetDb { path: Option<PathBuf> },
}

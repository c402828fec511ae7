//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;

use crate::commands::Command;
use crate::db::{DatabaseConfig, DbError};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect an entity schema catalog", long_about = None)]
pub struct Args {
    /// Database URL or path (`:memory:`, `sqlite://path`, or a file path).
    /// Defaults to .entity_schema.json, then DATABASE_URL / COZO_PATH.
    #[arg(short, long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// The database to operate on: `--db` if given, otherwise the resolved default.
    pub fn database_config(&self) -> Result<DatabaseConfig, DbError> {
        match &self.db {
            Some(url) => DatabaseConfig::from_url(url),
            None => DatabaseConfig::resolve(),
        }
    }
}

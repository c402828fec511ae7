//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs`: the result type and the [`Execute`] implementation
//! - `output.rs`: table formatting for the result

mod class;
mod classes;
mod init;

pub use class::ClassCmd;
pub use classes::ClassesCmd;
pub use init::InitCmd;

use std::error::Error;
use std::sync::Arc;

use clap::Subcommand;
use cozo::DbInstance;

use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, db: &Arc<DbInstance>) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the schema catalog relations if they are missing
    Init(InitCmd),

    /// List every class in the schema catalog
    Classes(ClassesCmd),

    /// Show one class with its properties and indexes
    Class(ClassCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, db: &Arc<DbInstance>, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Init(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::Classes(cmd) => Ok(cmd.execute(db)?.format(format)),
            Command::Class(cmd) => Ok(cmd.execute(db)?.format(format)),
        }
    }
}

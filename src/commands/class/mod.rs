mod execute;
mod output;

use clap::Args;

/// Show one class with its properties and indexes
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  entity_schema class Person                  # Properties and indexes of Person
  entity_schema class Person --format json")]
pub struct ClassCmd {
    /// Class name (exact match)
    pub name: String,
}

mod execute;
mod output;

use clap::Args;

/// Create the schema catalog relations if they are missing
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  entity_schema init                          # Use the configured database
  entity_schema --db ./schema.sqlite init     # Bootstrap a specific file")]
pub struct InitCmd {}

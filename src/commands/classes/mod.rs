mod execute;
pub(crate) mod output;

pub use execute::ClassDetail;

use clap::Args;

/// List every class in the schema catalog
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  entity_schema classes                       # All classes, with parents
  entity_schema classes --format json         # Full detail as JSON")]
pub struct ClassesCmd {
    /// Only list classes whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

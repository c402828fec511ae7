//! Output formatting for init command results.

use super::execute::InitResult;
use crate::output::Outputable;

impl Outputable for InitResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Schema catalog".to_string());
        lines.push(String::new());

        for relation in &self.relations {
            let status = if relation.created { "created" } else { "exists" };
            lines.push(format!("  {:<16} {}", relation.name, status));
        }

        lines.push(String::new());
        if self.created_count() == 0 {
            lines.push("Catalog already initialized.".to_string());
        } else {
            lines.push(format!("Created {} relation(s).", self.created_count()));
        }

        lines.join("\n")
    }
}

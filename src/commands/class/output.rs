//! Output formatting for class command results.

use super::execute::ClassResult;
use crate::commands::classes::output::format_parents;
use crate::output::Outputable;

impl Outputable for ClassResult {
    fn to_table(&self) -> String {
        let class = &self.class;
        let mut lines = Vec::new();

        lines.push(format!("Class: {}{}", class.name, format_parents(class)));
        lines.push(String::new());

        if class.properties.is_empty() {
            lines.push("No properties.".to_string());
        } else {
            lines.push(format!("Properties ({}):", class.properties.len()));
            for property in &class.properties {
                lines.push(format!("  {:<24} {}", property.name, property.kind));
            }
        }

        if !class.indexes.is_empty() {
            lines.push(String::new());
            lines.push(format!("Indexes ({}):", class.indexes.len()));
            for index in &class.indexes {
                lines.push(format!(
                    "  {} [{}] {}",
                    index.name,
                    index.fields.join(", "),
                    index.index_type
                ));
            }
        }

        lines.join("\n")
    }
}

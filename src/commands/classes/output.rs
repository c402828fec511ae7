//! Output formatting for classes command results.

use super::execute::{ClassDetail, ClassesResult};
use crate::output::Outputable;

pub(crate) fn format_parents(class: &ClassDetail) -> String {
    if class.parents.is_empty() {
        String::new()
    } else {
        format!(" extends {}", class.parents.join(", "))
    }
}

impl Outputable for ClassesResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        match &self.filter {
            Some(filter) => lines.push(format!("Classes matching '{}'", filter)),
            None => lines.push("Classes".to_string()),
        }
        lines.push(String::new());

        if self.classes.is_empty() {
            lines.push("No classes found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Found {} class(es):", self.classes.len()));
        for class in &self.classes {
            lines.push(format!(
                "  {}{} ({} properties, {} indexes)",
                class.name,
                format_parents(class),
                class.properties.len(),
                class.indexes.len()
            ));
        }

        lines.join("\n")
    }
}

//! `kickoff list` command handler

use anyhow::Result;
use kickoff_projects::TemplateRegistry;

use crate::output;

/// Print every registered template with its repository
pub fn run(registry: &TemplateRegistry) -> Result<()> {
    output::header("Available Templates");

    for (id, entry) in registry.entries() {
        match &entry.description {
            Some(description) => output::kv(id, &format!("{} ({})", entry.repository, description)),
            None => output::kv(id, &entry.repository),
        }
    }

    println!();
    output::info(&format!(
        "{} template(s). Run `kickoff create` to start a project.",
        registry.len()
    ));
    Ok(())
}

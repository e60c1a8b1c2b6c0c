//! dialoguer-backed prompts

use dialoguer::{Input, Select};
use kickoff_projects::{Error, PromptBackend, Result, TemplateRegistry};

use crate::output;

/// Reads answers from the controlling terminal
pub struct TerminalPrompt<'a> {
    registry: &'a TemplateRegistry,
}

impl<'a> TerminalPrompt<'a> {
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self { registry }
    }

    /// Template ids with their descriptions for the selection list
    fn labels(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .map(|id| match self.registry.description(id) {
                Some(description) => format!("{:12} - {}", id, description),
                None => id.clone(),
            })
            .collect()
    }
}

impl PromptBackend for TerminalPrompt<'_> {
    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        let labels = self.labels(items);
        Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn reject(&mut self, message: &str) {
        output::error(message);
    }
}

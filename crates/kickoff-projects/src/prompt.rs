//! Creation request collection
//!
//! The re-ask loop lives here; the terminal itself sits behind
//! [`PromptBackend`] so the CLI can plug in `dialoguer` and tests can plug in
//! a scripted backend.

use crate::error::{Error, Result};
use crate::registry::TemplateRegistry;
use tracing::debug;

/// Prompt shown for the project name
pub const NAME_PROMPT: &str = "Project folder name";

/// Prompt shown for the template selection
pub const TEMPLATE_PROMPT: &str = "Select a template";

/// Validated project name and template choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRequest {
    name: String,
    template: String,
}

impl CreationRequest {
    /// Build a request, trimming `name` and checking `template` against the registry
    pub fn new(name: &str, template: &str, registry: &TemplateRegistry) -> Result<Self> {
        let name = validate_name(name)?;
        registry.locate(template)?;
        Ok(Self {
            name,
            template: template.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

/// Trim a project name, rejecting names that are empty afterwards
///
/// The name becomes a directory under the current one, so it must be a
/// single path component: no separators, no `.` or `..`.
pub fn validate_name(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyName);
    }
    if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
        return Err(Error::invalid_name(trimmed));
    }
    Ok(trimmed.to_string())
}

/// Terminal operations needed to collect a [`CreationRequest`]
pub trait PromptBackend {
    /// Read one line of free text
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Pick one of `items`, returning its index
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Tell the user why the last input was rejected
    fn reject(&mut self, message: &str);
}

/// Collects a [`CreationRequest`] through a [`PromptBackend`]
pub struct Prompter<'a, B: PromptBackend> {
    backend: B,
    registry: &'a TemplateRegistry,
}

impl<'a, B: PromptBackend> Prompter<'a, B> {
    pub fn new(backend: B, registry: &'a TemplateRegistry) -> Self {
        Self { backend, registry }
    }

    /// Ask for both fields
    pub fn ask(&mut self) -> Result<CreationRequest> {
        self.ask_with(None, None)
    }

    /// Ask only for the fields not supplied up front
    ///
    /// A supplied name that trims to empty is ignored and asked for; any
    /// other invalid name is an error. A supplied template must exist in the
    /// registry.
    pub fn ask_with(
        &mut self,
        name: Option<&str>,
        template: Option<&str>,
    ) -> Result<CreationRequest> {
        let name = match name.map(validate_name) {
            Some(Ok(name)) => name,
            Some(Err(Error::EmptyName)) | None => self.ask_name()?,
            Some(Err(e)) => return Err(e),
        };

        let template = match template {
            Some(template) => {
                self.registry.locate(template)?;
                template.to_string()
            }
            None => self.ask_template()?,
        };

        debug!("Creation request: name={}, template={}", name, template);
        Ok(CreationRequest { name, template })
    }

    fn ask_name(&mut self) -> Result<String> {
        loop {
            let raw = self.backend.input(NAME_PROMPT)?;
            match validate_name(&raw) {
                Ok(name) => return Ok(name),
                Err(e) => self.backend.reject(&e.to_string()),
            }
        }
    }

    fn ask_template(&mut self) -> Result<String> {
        let ids: Vec<String> = self.registry.ids().into_iter().map(String::from).collect();
        let index = self.backend.select(TEMPLATE_PROMPT, &ids)?;
        ids.get(index)
            .cloned()
            .ok_or_else(|| Error::prompt(format!("selection {index} out of range")))
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

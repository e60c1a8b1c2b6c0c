//! # kickoff-projects
//!
//! Project scaffolding library for the kickoff CLI providing:
//! - A template registry mapping template ids to repository locators
//! - Repository fetching (HTTP tarball or shallow git clone)
//! - `package.json` name rewriting
//! - The prompt loop that collects a creation request
//!
//! # Examples
//!
//! ```no_run
//! use kickoff_projects::{create_project, ArchiveFetcher, CreationRequest, TemplateRegistry};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TemplateRegistry::from_embedded()?;
//! let request = CreationRequest::new("shop", "dva", &registry)?;
//! let fetcher = ArchiveFetcher::new()?;
//!
//! let project_dir = create_project(&request, &registry, &fetcher, Utf8Path::new(".")).await?;
//! println!("created {project_dir}");
//! # Ok(())
//! # }
//! ```

pub mod create;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod prompt;
pub mod registry;

pub use create::{create_project, destination_for};
pub use error::{Error, Result};
pub use fetch::{ArchiveFetcher, GitFetcher, RepositoryFetcher, RepositoryLocator};
pub use manifest::{rewrite_name, ProjectManifest};
pub use prompt::{CreationRequest, PromptBackend, Prompter};
pub use registry::TemplateRegistry;

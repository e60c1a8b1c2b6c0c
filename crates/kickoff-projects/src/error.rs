//! Error types for kickoff-projects

use thiserror::Error;

/// Result type alias using kickoff-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project name is empty after trimming
    #[error("please enter a name")]
    EmptyName,

    /// Project name is not a single folder name
    #[error("project name must be a single folder name: {name}")]
    InvalidName { name: String },

    /// Template id is not present in the registry
    #[error("Unknown template: {template}. Available templates: {available}")]
    TemplateNotFound { template: String, available: String },

    /// Registry has no templates
    #[error("Template registry is empty")]
    EmptyRegistry,

    /// Registry YAML could not be parsed
    #[error("Failed to parse template registry: {0}")]
    RegistryParse(#[from] serde_yaml_ng::Error),

    /// Repository locator is malformed
    #[error("Invalid repository locator: {locator}")]
    InvalidLocator { locator: String },

    /// Archive endpoint answered with a non-success status
    #[error("Failed to download {url}: HTTP {status}")]
    Download { url: String, status: u16 },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Archive could not be unpacked
    #[error("Failed to extract template archive: {message}")]
    Extract { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Clone failed
    #[error("Failed to clone repository: {message}")]
    CloneFailed { message: String },

    /// Destination directory is already populated
    #[error("Destination already exists and is not empty: {path}")]
    DestinationExists { path: String },

    /// package.json missing or unreadable
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// package.json is not a JSON object
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: String, message: String },

    /// package.json could not be written back
    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Terminal interaction failed
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a template not found error
    pub fn template_not_found(template: impl Into<String>, available: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
            available: available.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create an invalid locator error
    pub fn invalid_locator(locator: impl Into<String>) -> Self {
        Self::InvalidLocator {
            locator: locator.into(),
        }
    }

    /// Create an extraction error
    pub fn extract(message: impl Into<String>) -> Self {
        Self::Extract {
            message: message.into(),
        }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create a destination exists error
    pub fn destination_exists(path: impl Into<String>) -> Self {
        Self::DestinationExists { path: path.into() }
    }

    /// Create a manifest parse error
    pub fn manifest_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    /// Whether this error came from retrieving the template repository
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLocator { .. }
                | Self::Download { .. }
                | Self::Http(_)
                | Self::Extract { .. }
                | Self::GitNotFound
                | Self::CloneFailed { .. }
                | Self::DestinationExists { .. }
        )
    }
}

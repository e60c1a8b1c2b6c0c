//! Shallow clone fetcher

use super::{prepare_destination, RepositoryFetcher, RepositoryLocator};
use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Clones the repository with `git clone --depth 1` and removes its `.git`
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl GitFetcher {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryFetcher for GitFetcher {
    fn name(&self) -> &'static str {
        "git"
    }

    async fn fetch(&self, locator: &str, destination: &Utf8Path) -> Result<()> {
        let parsed = RepositoryLocator::parse(locator)?;
        let url = parsed.clone_url();
        info!("Cloning template: {} -> {}", url, destination);

        prepare_destination(destination).await?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("clone").arg("--depth").arg("1");

        if let Some(checkout) = parsed.checkout() {
            cmd.arg("--branch").arg(checkout);
        }

        cmd.arg(&url).arg(destination.as_str());

        debug!("Running: {} clone", self.program);
        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::GitNotFound),
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::clone_failed(stderr.trim()));
        }

        match tokio::fs::remove_dir_all(destination.join(".git")).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        info!("Repository cloned successfully");
        Ok(())
    }
}

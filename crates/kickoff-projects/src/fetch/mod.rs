//! Template repository retrieval
//!
//! A [`RepositoryFetcher`] takes a locator string from the registry and a
//! destination directory, and leaves the repository's file tree in that
//! directory. Each call has exactly one outcome: `Ok(())` once the tree is in
//! place, or the first error encountered. Nothing is retried, and a
//! half-written destination is left on disk.
//!
//! Two implementations are provided:
//! - [`ArchiveFetcher`] downloads the hosting service's tarball over HTTP
//! - [`GitFetcher`] runs a shallow `git clone` and drops the `.git` directory

mod archive;
mod git;
pub mod locator;

pub use archive::{unpack_archive, ArchiveFetcher};
pub use git::GitFetcher;
pub use locator::{Host, RepositoryLocator, DEFAULT_CHECKOUT};

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use tracing::debug;

/// Retrieves a template repository into a local directory
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    /// Fetcher name for logging
    fn name(&self) -> &'static str;

    /// Materialize the repository behind `locator` under `destination`
    async fn fetch(&self, locator: &str, destination: &Utf8Path) -> Result<()>;
}

/// Create `destination`, or accept it if it already exists and is empty
pub async fn prepare_destination(destination: &Utf8Path) -> Result<()> {
    match tokio::fs::metadata(destination).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(Error::destination_exists(destination.as_str()));
            }
            let mut entries = tokio::fs::read_dir(destination).await?;
            if entries.next_entry().await?.is_some() {
                return Err(Error::destination_exists(destination.as_str()));
            }
            debug!("Reusing empty directory {}", destination);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(destination).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

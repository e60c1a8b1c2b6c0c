//! Tarball download and extraction

use super::{prepare_destination, RepositoryFetcher, RepositoryLocator};
use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, Entry, EntryType};
use tracing::{debug, info};

/// Downloads the repository tarball and unpacks it into the destination
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    client: reqwest::Client,
    /// Replaces the archive URL's scheme and host, used by tests
    base_url: Option<String>,
}

impl ArchiveFetcher {
    /// Create a fetcher with a default HTTP client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kickoff/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Send every request to `base_url` instead of the hosting service
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn resolve_url(&self, locator: &RepositoryLocator) -> String {
        let url = locator.archive_url();
        match &self.base_url {
            Some(base) => match url.split_once("://") {
                Some((_, rest)) => {
                    let path = rest.find('/').map(|i| &rest[i..]).unwrap_or("/");
                    format!("{base}{path}")
                }
                None => url,
            },
            None => url,
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl RepositoryFetcher for ArchiveFetcher {
    fn name(&self) -> &'static str {
        "archive"
    }

    async fn fetch(&self, locator: &str, destination: &Utf8Path) -> Result<()> {
        let parsed = RepositoryLocator::parse(locator)?;
        let url = self.resolve_url(&parsed);
        info!("Downloading template: {} -> {}", url, destination);

        prepare_destination(destination).await?;
        let bytes = self.download(&url).await?;
        debug!("Downloaded {} bytes", bytes.len());

        let target: Utf8PathBuf = destination.to_path_buf();
        let unpacked = tokio::task::spawn_blocking(move || unpack_archive(&bytes, &target))
            .await
            .map_err(|e| Error::extract(e.to_string()))??;

        info!("Unpacked {} entries into {}", unpacked, destination);
        Ok(())
    }
}

/// Unpack a gzip tarball into `destination`, dropping the top-level directory
///
/// Every entry must land inside `destination`, including writes that pass
/// through a symlink unpacked earlier. Symlinks may only point inside the
/// tree and hard links are resolved against the stripped archive root.
///
/// Returns the number of entries written.
pub fn unpack_archive(bytes: &[u8], destination: &Utf8Path) -> Result<usize> {
    std::fs::create_dir_all(destination)?;
    let root = destination.as_std_path().canonicalize()?;

    let mut archive = Archive::new(GzDecoder::new(bytes));
    let mut unpacked = 0;

    let entries = archive
        .entries()
        .map_err(|e| Error::extract(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| Error::extract(e.to_string()))?;
        let entry_type = entry.header().entry_type();

        if matches!(entry_type, EntryType::XGlobalHeader | EntryType::XHeader) {
            continue;
        }

        let path = entry
            .path()
            .map_err(|e| Error::extract(e.to_string()))?
            .into_owned();

        let Some(relative) = strip_top_level(&path)? else {
            continue;
        };

        let target = root.join(&relative);
        if let Some(parent) = target.parent() {
            ensure_inside(&root, parent, &path)?;
            std::fs::create_dir_all(parent)?;
            ensure_inside(&root, parent, &path)?;
        }

        // Replace, never write through, a link left by an earlier entry
        if target
            .symlink_metadata()
            .is_ok_and(|meta| meta.file_type().is_symlink())
        {
            std::fs::remove_file(&target)?;
        }

        match entry_type {
            EntryType::Symlink => {
                let link = link_name(&entry, &path)?;
                if !symlink_stays_inside(&relative, &link) {
                    return Err(unsafe_path(&path));
                }
                unpack_entry(&mut entry, &target, &relative)?;
            }
            EntryType::Link => {
                let link = link_name(&entry, &path)?;
                let source = strip_top_level(&link)?
                    .map(|source| root.join(source))
                    .ok_or_else(|| unsafe_path(&path))?;
                ensure_inside(&root, &source, &path)?;
                std::fs::hard_link(&source, &target)
                    .map_err(|e| Error::extract(format!("{}: {}", relative.display(), e)))?;
            }
            _ => unpack_entry(&mut entry, &target, &relative)?,
        }
        unpacked += 1;
    }

    if unpacked == 0 {
        return Err(Error::extract("archive contains no files"));
    }

    Ok(unpacked)
}

fn unpack_entry<R: Read>(entry: &mut Entry<'_, R>, target: &Path, relative: &Path) -> Result<()> {
    entry
        .unpack(target)
        .map(|_| ())
        .map_err(|e| Error::extract(format!("{}: {}", relative.display(), e)))
}

fn link_name<R: Read>(entry: &Entry<'_, R>, path: &Path) -> Result<PathBuf> {
    entry
        .link_name()
        .map_err(|e| Error::extract(e.to_string()))?
        .map(|link| link.into_owned())
        .ok_or_else(|| unsafe_path(path))
}

/// Fail unless `path`, resolved through any existing symlinks, is under `root`
///
/// Only the longest existing prefix of `path` is resolved; missing
/// components are created later as plain directories.
fn ensure_inside(root: &Path, path: &Path, entry: &Path) -> Result<()> {
    let Some(existing) = path.ancestors().find(|p| p.exists()) else {
        return Err(unsafe_path(entry));
    };
    if existing.canonicalize()?.starts_with(root) {
        Ok(())
    } else {
        Err(unsafe_path(entry))
    }
}

/// Whether a symlink at `relative` pointing to `link` resolves inside the tree
fn symlink_stays_inside(relative: &Path, link: &Path) -> bool {
    let mut depth = relative.parent().map_or(0, |p| p.components().count());

    for component in link.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

fn unsafe_path(path: &Path) -> Error {
    Error::extract(format!("unsafe path in archive: {}", path.display()))
}

/// Drop the first path component; `None` for the top-level directory itself
fn strip_top_level(path: &Path) -> Result<Option<PathBuf>> {
    let mut stripped = PathBuf::new();
    let mut seen_top = false;

    for component in path.components() {
        match component {
            Component::Normal(part) => {
                if seen_top {
                    stripped.push(part);
                } else {
                    seen_top = true;
                }
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path(path));
            }
        }
    }

    if stripped.as_os_str().is_empty() {
        Ok(None)
    } else {
        Ok(Some(stripped))
    }
}

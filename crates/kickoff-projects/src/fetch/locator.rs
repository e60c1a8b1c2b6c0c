//! Repository locator parsing
//!
//! Accepted forms:
//! - `owner/name` (GitHub)
//! - `github:owner/name`, `gitlab:owner/name`, `bitbucket:owner/name`
//! - `gitlab:git.example.com:owner/name` (custom origin)
//! - `direct:https://example.com/template.tar.gz`
//!
//! Each form may end in `#checkout` to pick a branch or tag.

use crate::error::{Error, Result};
use std::str::FromStr;

/// Checkout used when the locator does not name one
pub const DEFAULT_CHECKOUT: &str = "master";

/// Git hosting service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    GitHub,
    GitLab,
    Bitbucket,
}

impl Host {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "github" => Some(Self::GitHub),
            "gitlab" => Some(Self::GitLab),
            "bitbucket" => Some(Self::Bitbucket),
            _ => None,
        }
    }

    fn default_origin(self) -> &'static str {
        match self {
            Self::GitHub => "https://github.com",
            Self::GitLab => "https://gitlab.com",
            Self::Bitbucket => "https://bitbucket.org",
        }
    }
}

/// Parsed repository locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryLocator {
    /// Repository on a known hosting service
    Hosted {
        host: Host,
        /// Base URL including scheme, without trailing slash
        origin: String,
        owner: String,
        name: String,
        checkout: Option<String>,
    },
    /// Plain URL used verbatim
    Direct { url: String, checkout: Option<String> },
}

impl RepositoryLocator {
    /// Parse a locator string
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::invalid_locator(input);

        if input.is_empty() || input.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        if let Some(rest) = input.strip_prefix("direct:") {
            let (url, checkout) = split_checkout(rest).ok_or_else(invalid)?;
            if url.is_empty() {
                return Err(invalid());
            }
            return Ok(Self::Direct {
                url: url.to_string(),
                checkout: checkout.map(str::to_string),
            });
        }

        let (rest, checkout) = split_checkout(input).ok_or_else(invalid)?;

        let (host, rest) = match rest.split_once(':') {
            Some((prefix, tail)) => match Host::from_prefix(prefix) {
                Some(host) => (host, tail),
                None => (Host::GitHub, rest),
            },
            None => (Host::GitHub, rest),
        };

        let (origin, path) = match rest.rsplit_once(':') {
            Some((origin, path)) => (normalize_origin(origin).ok_or_else(invalid)?, path),
            None => (host.default_origin().to_string(), rest),
        };

        let (owner, name) = path.split_once('/').ok_or_else(invalid)?;
        let name = name.trim_end_matches('/');
        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(Self::Hosted {
            host,
            origin,
            owner: owner.to_string(),
            name: name.to_string(),
            checkout: checkout.map(str::to_string),
        })
    }

    /// URL of the gzip tarball for this locator
    pub fn archive_url(&self) -> String {
        match self {
            Self::Hosted {
                host,
                origin,
                owner,
                name,
                checkout,
            } => {
                let checkout = checkout.as_deref().unwrap_or(DEFAULT_CHECKOUT);
                match host {
                    Host::GitHub => format!("{origin}/{owner}/{name}/archive/{checkout}.tar.gz"),
                    Host::GitLab => {
                        let project = name.rsplit('/').next().unwrap_or(name);
                        format!(
                            "{origin}/{owner}/{name}/-/archive/{checkout}/{project}-{checkout}.tar.gz"
                        )
                    }
                    Host::Bitbucket => format!("{origin}/{owner}/{name}/get/{checkout}.tar.gz"),
                }
            }
            Self::Direct { url, .. } => url.clone(),
        }
    }

    /// URL handed to `git clone`
    pub fn clone_url(&self) -> String {
        match self {
            Self::Hosted {
                origin,
                owner,
                name,
                ..
            } => format!("{origin}/{owner}/{name}.git"),
            Self::Direct { url, .. } => url.clone(),
        }
    }

    /// Branch or tag named explicitly with `#checkout`
    pub fn checkout(&self) -> Option<&str> {
        match self {
            Self::Hosted { checkout, .. } | Self::Direct { checkout, .. } => checkout.as_deref(),
        }
    }
}

impl FromStr for RepositoryLocator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split `repo#checkout`; `None` when the checkout part is present but empty
fn split_checkout(input: &str) -> Option<(&str, Option<&str>)> {
    match input.split_once('#') {
        Some((_, "")) => None,
        Some((repo, checkout)) => Some((repo, Some(checkout))),
        None => Some((input, None)),
    }
}

fn normalize_origin(origin: &str) -> Option<String> {
    let origin = origin.trim_end_matches('/');
    if origin.is_empty() {
        return None;
    }
    if origin.starts_with("http://") || origin.starts_with("https://") {
        Some(origin.to_string())
    } else {
        Some(format!("https://{origin}"))
    }
}

//! Project creation flow: fetch the template, then rewrite its manifest

use crate::error::Result;
use crate::fetch::RepositoryFetcher;
use crate::manifest::rewrite_name;
use crate::prompt::{validate_name, CreationRequest};
use crate::registry::TemplateRegistry;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

/// Directory a project named `name` is created in
///
/// Always a direct child of `base_dir`; names that would resolve elsewhere
/// are rejected.
pub fn destination_for(base_dir: &Utf8Path, name: &str) -> Result<Utf8PathBuf> {
    Ok(base_dir.join(validate_name(name)?))
}

/// Fetch the requested template into `<base_dir>/<name>` and set the manifest name
///
/// Steps run strictly in order. A fetch failure returns before the manifest
/// is touched. Nothing already written to the destination is removed on
/// failure.
pub async fn create_project<F>(
    request: &CreationRequest,
    registry: &TemplateRegistry,
    fetcher: &F,
    base_dir: &Utf8Path,
) -> Result<Utf8PathBuf>
where
    F: RepositoryFetcher + ?Sized,
{
    let locator = registry.locate(request.template())?;
    let destination = destination_for(base_dir, request.name())?;

    info!(
        "Creating '{}' from template '{}' ({}) using {} fetcher",
        request.name(),
        request.template(),
        locator,
        fetcher.name()
    );

    fetcher.fetch(locator, &destination).await?;
    rewrite_name(&destination, request.name()).await?;

    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_destination_is_child_of_base() {
        let base = Utf8Path::new("/work/cwd");
        assert_eq!(
            destination_for(base, "shop").unwrap(),
            Utf8PathBuf::from("/work/cwd/shop")
        );
        assert_eq!(
            destination_for(base, " shop ").unwrap(),
            Utf8PathBuf::from("/work/cwd/shop")
        );
    }

    #[test]
    fn test_destination_rejects_escaping_names() {
        let base = Utf8Path::new("/work/cwd");
        for name in ["/etc/shop", "../shop", "a/b", ".."] {
            assert!(matches!(
                destination_for(base, name),
                Err(Error::InvalidName { .. })
            ));
        }
        assert!(matches!(destination_for(base, "  "), Err(Error::EmptyName)));
    }
}

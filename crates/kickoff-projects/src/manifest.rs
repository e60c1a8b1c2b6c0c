//! `package.json` name rewriting
//!
//! The manifest is parsed into an insertion-ordered JSON object, so every
//! key other than `name` keeps its position and value. Output uses 2-space
//! indentation with no trailing newline. The file is overwritten in place.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use tracing::debug;

/// File name of the package manifest inside a project
pub const MANIFEST_FILE: &str = "package.json";

/// Package manifest of a fetched project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectManifest {
    path: Utf8PathBuf,
    fields: Map<String, Value>,
}

impl ProjectManifest {
    /// Load `<project_dir>/package.json`
    pub async fn load(project_dir: &Utf8Path) -> Result<Self> {
        let path = project_dir.join(MANIFEST_FILE);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| Error::ManifestRead {
                path: path.to_string(),
                source,
            })?;
        let fields = Self::parse(&path, &text)?;
        Ok(Self { path, fields })
    }

    fn parse(path: &Utf8Path, text: &str) -> Result<Map<String, Value>> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(other) => Err(Error::manifest_parse(
                path.as_str(),
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
            Err(e) => Err(Error::manifest_parse(path.as_str(), e.to_string())),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Set the `name` field, appending it if the manifest has none
    pub fn set_name(&mut self, name: &str) {
        self.fields
            .insert("name".to_string(), Value::String(name.to_string()));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Serialize with 2-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.fields)
            .map_err(|e| Error::manifest_parse(self.path.as_str(), e.to_string()))
    }

    /// Overwrite the manifest file
    pub async fn save(&self) -> Result<()> {
        let text = self.to_pretty_string()?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|source| Error::ManifestWrite {
                path: self.path.to_string(),
                source,
            })
    }
}

/// Set the `name` field of `<project_dir>/package.json` to `new_name`
pub async fn rewrite_name(project_dir: &Utf8Path, new_name: &str) -> Result<()> {
    let mut manifest = ProjectManifest::load(project_dir).await?;
    debug!("Rewriting {} name -> {}", manifest.path(), new_name);

    manifest.set_name(new_name);
    manifest.save().await
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_with_manifest(content: &str) -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), content).unwrap();
        (temp, dir)
    }

    #[tokio::test]
    async fn test_rewrite_name_scenario() {
        let (_temp, dir) = project_with_manifest(r#"{"name":"old","version":"1.0.0"}"#);

        rewrite_name(&dir, "shop").await.unwrap();

        let written = std::fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap();
        assert_eq!(written, "{\n  \"name\": \"shop\",\n  \"version\": \"1.0.0\"\n}");
    }

    #[tokio::test]
    async fn test_rewrite_preserves_order_and_fields() {
        let (_temp, dir) = project_with_manifest(
            r#"{
  "private": true,
  "name": "template",
  "scripts": {"start": "umi dev", "build": "umi build"},
  "dependencies": {"react": "^16.8.0", "dva": "^2.4.1"},
  "files": ["dist", "src"],
  "count": 3.5
}"#,
        );

        rewrite_name(&dir, "app").await.unwrap();

        let manifest = ProjectManifest::load(&dir).await.unwrap();
        let keys: Vec<&str> = manifest.fields().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["private", "name", "scripts", "dependencies", "files", "count"]
        );
        assert_eq!(manifest.name(), Some("app"));

        let scripts: Vec<&str> = manifest.fields()["scripts"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(scripts, vec!["start", "build"]);
        assert_eq!(manifest.fields()["count"], serde_json::json!(3.5));
        assert_eq!(manifest.fields()["private"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn test_rewrite_is_idempotent() {
        let (_temp, dir) =
            project_with_manifest(r#"{"version":"0.1.0","name":"x","license":"MIT"}"#);

        rewrite_name(&dir, "shop").await.unwrap();
        let first = std::fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap();
        rewrite_name(&dir, "shop").await.unwrap();
        let second = std::fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_name_is_appended() {
        let (_temp, dir) = project_with_manifest(r#"{"version":"1.0.0"}"#);

        rewrite_name(&dir, "shop").await.unwrap();

        let written = std::fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap();
        assert_eq!(written, "{\n  \"version\": \"1.0.0\",\n  \"name\": \"shop\"\n}");
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();

        let err = rewrite_name(&dir, "shop").await.unwrap_err();
        assert!(matches!(err, Error::ManifestRead { .. }));
    }

    #[tokio::test]
    async fn test_malformed_manifest() {
        let (_temp, dir) = project_with_manifest("{\"name\": ");
        let err = rewrite_name(&dir, "shop").await.unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));

        let (_temp, dir) = project_with_manifest("[1, 2]");
        let err = rewrite_name(&dir, "shop").await.unwrap_err();
        match err {
            Error::ManifestParse { message, .. } => assert!(message.contains("an array")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_and_save() {
        let (_temp, dir) = project_with_manifest(r#"{"name":"old","main":"index.js"}"#);

        let mut manifest = ProjectManifest::load(&dir).await.unwrap();
        assert_eq!(manifest.name(), Some("old"));
        assert_eq!(manifest.path(), dir.join(MANIFEST_FILE).as_path());

        manifest.set_name("new");
        manifest.save().await.unwrap();

        let reloaded = ProjectManifest::load(&dir).await.unwrap();
        assert_eq!(reloaded.name(), Some("new"));
        assert_eq!(reloaded.fields()["main"], "index.js");
    }
}

//! Archive fetcher tests against a mock hosting service
//!
//! Tarballs are built in memory with the same layout GitHub uses (a single
//! `<repo>-<checkout>/` top-level directory) and served with wiremock.

use camino::Utf8PathBuf;
use flate2::write::GzEncoder;
use flate2::Compression;
use kickoff_projects::{
    create_project, ArchiveFetcher, CreationRequest, Error, RepositoryFetcher, TemplateRegistry,
};
use tar::{Builder, Header};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn template_tarball(top: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    let mut dir = Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    builder
        .append_data(&mut dir, format!("{top}/"), std::io::empty())
        .unwrap();

    for (name, content) in files {
        let mut header = Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, format!("{top}/{name}"), content.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

async fn serve_archive(server: &MockServer, route: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(server)
        .await;
}

fn scratch() -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().unwrap();
    let base = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    (temp, base)
}

#[tokio::test]
async fn test_download_and_unpack() {
    let server = MockServer::start().await;
    let body = template_tarball(
        "dva-template-master",
        &[
            ("package.json", r#"{"name":"dva-template","private":true}"#),
            ("src/index.js", "import dva from 'dva';"),
            (".gitignore", "node_modules\n"),
        ],
    );
    serve_archive(&server, "/org/dva-template/archive/master.tar.gz", body).await;

    let (_temp, base) = scratch();
    let dest = base.join("shop");
    let fetcher = ArchiveFetcher::new().unwrap().with_base_url(server.uri());

    fetcher.fetch("org/dva-template", &dest).await.unwrap();

    assert!(dest.join("package.json").is_file());
    assert!(dest.join("src/index.js").is_file());
    assert_eq!(
        std::fs::read_to_string(dest.join(".gitignore")).unwrap(),
        "node_modules\n"
    );
    assert!(!dest.join("dva-template-master").exists());
}

#[tokio::test]
async fn test_checkout_selects_archive() {
    let server = MockServer::start().await;
    let body = template_tarball("umi-v2", &[("package.json", "{}")]);
    serve_archive(&server, "/org/umi/archive/v2.tar.gz", body).await;

    let (_temp, base) = scratch();
    let fetcher = ArchiveFetcher::new().unwrap().with_base_url(server.uri());

    fetcher.fetch("github:org/umi#v2", &base.join("app")).await.unwrap();
    assert!(base.join("app/package.json").is_file());
}

#[tokio::test]
async fn test_not_found_is_download_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (_temp, base) = scratch();
    let fetcher = ArchiveFetcher::new().unwrap().with_base_url(server.uri());

    let err = fetcher
        .fetch("org/missing", &base.join("shop"))
        .await
        .unwrap_err();

    match &err {
        Error::Download { status, url } => {
            assert_eq!(*status, 404);
            assert!(url.ends_with("/org/missing/archive/master.tar.gz"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_fetch_error());
}

#[tokio::test]
async fn test_populated_destination_rejected_before_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_temp, base) = scratch();
    let dest = base.join("shop");
    std::fs::create_dir(&dest).unwrap();
    std::fs::write(dest.join("keep.txt"), "mine").unwrap();

    let fetcher = ArchiveFetcher::new().unwrap().with_base_url(server.uri());
    let err = fetcher.fetch("org/dva", &dest).await.unwrap_err();

    assert!(matches!(err, Error::DestinationExists { .. }));
    assert_eq!(std::fs::read_to_string(dest.join("keep.txt")).unwrap(), "mine");
}

#[tokio::test]
async fn test_full_flow_over_http() {
    let server = MockServer::start().await;
    let body = template_tarball(
        "umi-template-master",
        &[(
            "package.json",
            r#"{"name":"umi-template","version":"1.0.0","scripts":{"start":"umi dev"}}"#,
        )],
    );
    serve_archive(&server, "/org/umi-template/archive/master.tar.gz", body).await;

    let registry =
        TemplateRegistry::from_pairs([("dva", "org/dva-template"), ("umi", "org/umi-template")])
            .unwrap();
    let request = CreationRequest::new("shop", "umi", &registry).unwrap();
    let fetcher = ArchiveFetcher::new().unwrap().with_base_url(server.uri());

    let (_temp, base) = scratch();
    let project_dir = create_project(&request, &registry, &fetcher, &base)
        .await
        .unwrap();

    let manifest = std::fs::read_to_string(project_dir.join("package.json")).unwrap();
    assert_eq!(
        manifest,
        "{\n  \"name\": \"shop\",\n  \"version\": \"1.0.0\",\n  \"scripts\": {\n    \"start\": \"umi dev\"\n  }\n}"
    );
}

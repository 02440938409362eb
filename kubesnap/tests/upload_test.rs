use kubesnap::error::ErrorKind;
use kubesnap::upload::upload_archive;
use kubesnap_telemetry::init_test_tracing;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARCHIVE_NAME: &str = "backup-cluster-2025-01-01.zip";

fn write_archive(dir: &tempfile::TempDir, content: &[u8]) -> std::path::PathBuf {
    let archive_path = dir.path().join(ARCHIVE_NAME);
    std::fs::write(&archive_path, content).unwrap();
    archive_path
}

#[tokio::test]
async fn upload_succeeds_on_200() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/bucket/o/{ARCHIVE_NAME}")))
        .and(header("content-type", "application/zip"))
        .and(body_bytes(b"zip-bytes".to_vec()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_archive(&dir, b"zip-bytes");

    upload_archive(&archive_path, &format!("{}/bucket/o", server.uri()))
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_succeeds_on_201() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/bucket/o/{ARCHIVE_NAME}")))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_archive(&dir, b"zip-bytes");

    upload_archive(&archive_path, &format!("{}/bucket/o", server.uri()))
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_reports_rejection_on_500() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_archive(&dir, b"zip-bytes");

    let err = upload_archive(&archive_path, &format!("{}/bucket/o", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UploadRejected);
    assert!(err.detail().unwrap().contains("500"));
}

#[tokio::test]
async fn destination_already_ending_with_file_name_is_not_duplicated() {
    init_test_tracing();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/bucket/o/{ARCHIVE_NAME}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_archive(&dir, b"zip-bytes");

    let destination = format!("{}/bucket/o/{ARCHIVE_NAME}", server.uri());
    upload_archive(&archive_path, &destination).await.unwrap();
}

#[tokio::test]
async fn transport_failure_is_reported() {
    init_test_tracing();

    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_archive(&dir, b"zip-bytes");

    // Nothing listens on this port; the connection is refused immediately.
    let err = upload_archive(&archive_path, "http://127.0.0.1:9/bucket/o")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UploadTransportFailed);
}

//! Integration test: fetch-and-verify retry behaviour against a local server
//! that serves corrupt bytes before (or instead of) a valid PNG.

mod common;

use common::image_server::{ImageServer, Reply};
use imgdump_core::fetch::{fetch_image, FetchOutcome};
use imgdump_core::summary::ItemOutcome;
use imgdump_core::verify::{fetch_and_verify, DEFAULT_ATTEMPTS};
use tempfile::tempdir;

#[tokio::test]
async fn corrupt_four_times_then_valid_is_verified() {
    let server = ImageServer::start();
    let good = common::png(7);
    let mut replies = vec![Reply::ok(common::truncated_png(7)); 4];
    replies.push(Reply::ok(good.clone()));
    server.script(5, replies);

    let dir = tempdir().unwrap();
    let session = common::session(&server.base_url);
    let outcome = fetch_and_verify(&session, dir.path(), 5, DEFAULT_ATTEMPTS)
        .await
        .unwrap();

    assert_eq!(outcome, ItemOutcome::Verified { attempts: 5 });
    assert_eq!(server.hits(5), 5);
    assert_eq!(std::fs::read(dir.path().join("5.png")).unwrap(), good);
}

#[tokio::test]
async fn corrupt_every_time_leaves_no_file() {
    let server = ImageServer::start();
    server.script(9, vec![Reply::ok(b"garbage".to_vec())]);

    let dir = tempdir().unwrap();
    let session = common::session(&server.base_url);
    let outcome = fetch_and_verify(&session, dir.path(), 9, DEFAULT_ATTEMPTS)
        .await
        .unwrap();

    assert_eq!(outcome, ItemOutcome::VerifyFailed { attempts: 5 });
    assert_eq!(server.hits(9), 5);
    assert!(!dir.path().join("9.png").exists());
}

#[tokio::test]
async fn not_found_consumes_attempts() {
    let server = ImageServer::start();
    let dir = tempdir().unwrap();
    let session = common::session(&server.base_url);

    let outcome = fetch_and_verify(&session, dir.path(), 3, 2).await.unwrap();

    assert_eq!(outcome, ItemOutcome::VerifyFailed { attempts: 2 });
    assert_eq!(server.hits(3), 2);
}

#[tokio::test]
async fn server_error_then_valid_is_verified() {
    let server = ImageServer::start();
    server.script(4, vec![Reply::status(503), Reply::ok(common::png(4))]);
    let dir = tempdir().unwrap();
    let session = common::session(&server.base_url);

    let outcome = fetch_and_verify(&session, dir.path(), 4, 3).await.unwrap();

    assert_eq!(outcome, ItemOutcome::Verified { attempts: 2 });
    assert!(dir.path().join("4.png").exists());
}

#[tokio::test]
async fn stale_corrupt_file_is_replaced() {
    let server = ImageServer::start();
    let good = common::png(1);
    server.serve(1, good.clone());
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("1.png"), b"old and broken").unwrap();
    let session = common::session(&server.base_url);

    let outcome = fetch_and_verify(&session, dir.path(), 1, 1).await.unwrap();

    assert_eq!(outcome, ItemOutcome::Verified { attempts: 1 });
    assert_eq!(std::fs::read(dir.path().join("1.png")).unwrap(), good);
}

#[tokio::test]
async fn plain_fetch_reports_status() {
    let server = ImageServer::start();
    server.serve(1, common::png(1));
    server.script(2, vec![Reply::status(500)]);
    let dir = tempdir().unwrap();
    let session = common::session(&server.base_url);

    assert_eq!(
        fetch_image(&session, dir.path(), 1).await.unwrap(),
        FetchOutcome::Downloaded
    );
    assert_eq!(
        fetch_image(&session, dir.path(), 2).await.unwrap(),
        FetchOutcome::Skipped(500)
    );
    assert_eq!(
        fetch_image(&session, dir.path(), 3).await.unwrap(),
        FetchOutcome::NotFound
    );
    assert!(dir.path().join("1.png").exists());
    assert!(!dir.path().join("2.png").exists());
    assert!(!dir.path().join("3.png").exists());
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let dir = tempdir().unwrap();
    let session = common::session(&common::dead_endpoint());

    let err = fetch_and_verify(&session, dir.path(), 1, 3).await.unwrap_err();

    assert!(err.is_transport(), "expected transport error, got {err}");
}

//! Integration tests for the range-aware video route.

mod common;

use common::{video_config, TestHarness};
use vidrelay::config::DEFAULT_CHUNK_SIZE;

/// Write `len` bytes of a repeating 0..=255 pattern and return them.
fn write_patterned_file(path: &std::path::Path, len: usize) -> Vec<u8> {
    let data: Vec<u8> = (0..=255u8).cycle().take(len).collect();
    std::fs::write(path, &data).unwrap();
    data
}

#[tokio::test]
async fn full_file_request_returns_entire_asset() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("test_video.mp4");
    let data = write_patterned_file(&video_path, 2048);

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let resp = reqwest::get(format!("http://{addr}/video")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "video/mp4"
    );
    assert_eq!(
        resp.headers()
            .get("accept-ranges")
            .unwrap()
            .to_str()
            .unwrap(),
        "bytes"
    );
    assert_eq!(
        resp.headers()
            .get("content-length")
            .unwrap()
            .to_str()
            .unwrap(),
        "2048"
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(body.as_ref(), data.as_slice());
}

#[tokio::test]
async fn range_request_returns_exact_slice() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("range_test.mp4");
    let data = write_patterned_file(&video_path, 2048);

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/video"))
        .header("Range", "bytes=100-199")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 206);
    assert_eq!(
        resp.headers()
            .get("content-range")
            .unwrap()
            .to_str()
            .unwrap(),
        "bytes 100-199/2048"
    );
    assert_eq!(
        resp.headers()
            .get("content-length")
            .unwrap()
            .to_str()
            .unwrap(),
        "100"
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(body.as_ref(), &data[100..=199]);
}

#[tokio::test]
async fn open_ended_range_serves_one_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("chunk_test.mp4");
    let data = write_patterned_file(&video_path, 5000);

    // Chunk size smaller than the file so the default end is visible.
    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/video"))
        .header("Range", "bytes=0-")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 206);
    assert_eq!(
        resp.headers()
            .get("content-range")
            .unwrap()
            .to_str()
            .unwrap(),
        "bytes 0-1023/5000"
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(body.as_ref(), &data[..1024]);
}

#[tokio::test]
async fn default_chunk_size_is_one_mebibyte() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("big.mp4");
    let size = (2 * DEFAULT_CHUNK_SIZE + 500) as usize;
    std::fs::write(&video_path, vec![0u8; size]).unwrap();

    let (_h, addr) =
        TestHarness::with_server_config(video_config(&video_path, DEFAULT_CHUNK_SIZE)).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/video"))
        .header("Range", "bytes=0-")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 206);
    assert_eq!(
        resp.headers()
            .get("content-length")
            .unwrap()
            .to_str()
            .unwrap(),
        DEFAULT_CHUNK_SIZE.to_string()
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(body.len() as u64, DEFAULT_CHUNK_SIZE);
}

#[tokio::test]
async fn end_is_clamped_to_last_byte() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("clamp.mp4");
    let data = write_patterned_file(&video_path, 2048);

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/video"))
        .header("Range", "bytes=1500-99999")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 206);
    assert_eq!(
        resp.headers()
            .get("content-range")
            .unwrap()
            .to_str()
            .unwrap(),
        "bytes 1500-2047/2048"
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(body.as_ref(), &data[1500..]);
}

#[tokio::test]
async fn start_beyond_eof_is_416() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("eof.mp4");
    write_patterned_file(&video_path, 2048);

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/video"))
        .header("Range", "bytes=2048-2058")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 416);
    assert_eq!(
        resp.headers()
            .get("content-range")
            .unwrap()
            .to_str()
            .unwrap(),
        "bytes */2048"
    );
}

#[tokio::test]
async fn malformed_ranges_are_416() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("malformed.mp4");
    write_patterned_file(&video_path, 2048);

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let client = reqwest::Client::new();
    for header in ["bytes=abc-def", "units=0-100", "bytes=-200", "bytes=500-100"] {
        let resp = client
            .get(format!("http://{addr}/video"))
            .header("Range", header)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 416, "header {header:?} should be rejected");
    }
}

#[tokio::test]
async fn missing_asset_returns_404_naming_path() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("does_not_exist.mp4");

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    // Without a range header.
    let resp = reqwest::get(format!("http://{addr}/video")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body = resp.text().await.unwrap();
    assert!(body.contains("does_not_exist.mp4"));

    // With a range header: still 404, the file check comes first.
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/video"))
        .header("Range", "bytes=0-100")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn asset_added_while_running_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("late.mp4");

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let resp = reqwest::get(format!("http://{addr}/video")).await.unwrap();
    assert_eq!(resp.status(), 404);

    // The size is queried fresh per request, so the file shows up immediately.
    write_patterned_file(&video_path, 512);
    let resp = reqwest::get(format!("http://{addr}/video")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("content-length")
            .unwrap()
            .to_str()
            .unwrap(),
        "512"
    );
}

#[tokio::test]
async fn content_range_matches_exact_string() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("exact.mp4");
    std::fs::write(&video_path, vec![0u8; 5_000_000]).unwrap();

    let (_h, addr) =
        TestHarness::with_server_config(video_config(&video_path, DEFAULT_CHUNK_SIZE)).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/video"))
        .header("Range", "bytes=1000000-1999999")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 206);
    assert_eq!(
        resp.headers()
            .get("content-range")
            .unwrap()
            .to_str()
            .unwrap(),
        "bytes 1000000-1999999/5000000"
    );
    assert_eq!(
        resp.headers()
            .get("content-length")
            .unwrap()
            .to_str()
            .unwrap(),
        "1000000"
    );
}

#[tokio::test]
async fn health_check_responds() {
    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("unused.mp4");

    let (_h, addr) = TestHarness::with_server_config(video_config(&video_path, 1024)).await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
}

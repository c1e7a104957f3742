//! Uploader protocol tests against a local stub server

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use emailbuilder_uploader::{UploadError, UploadRequest, Uploader};

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// One-shot HTTP stub: reads a full request, replies with `status`/`body`,
/// and hands the captured request back for assertions.
async fn spawn_stub(status: &'static str, body: &'static str) -> (SocketAddr, oneshot::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let read = socket.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed before headers");
            request.extend_from_slice(&chunk[..read]);
            if let Some(position) = find_subsequence(&request, b"\r\n\r\n") {
                break position + 4;
            }
        };

        // Drain the body per Content-Length so the client finishes cleanly
        let headers = String::from_utf8_lossy(&request[..header_end]).to_string();
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if !name.eq_ignore_ascii_case("content-length") {
                    return None;
                }
                value.trim().parse::<usize>().ok()
            })
            .unwrap_or(0);
        while request.len() < header_end + content_length {
            let read = socket.read(&mut chunk).await.unwrap();
            assert!(read > 0, "connection closed mid-body");
            request.extend_from_slice(&chunk[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len(),
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = request_tx.send(request);
    });

    (addr, request_rx)
}

#[tokio::test]
async fn test_upload_builds_protocol_request() {
    let (addr, request_rx) =
        spawn_stub("200 OK", r#"{"payload":[{"url":"/files/abc123"}]}"#).await;
    let uploader = Uploader::new(format!("http://{addr}"));

    let url = uploader
        .upload(UploadRequest {
            identifier: "image-block".to_string(),
            file_name: "logo.png".to_string(),
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
        })
        .await
        .unwrap();

    assert_eq!(url, format!("http://{addr}/files/abc123?download=false"));

    let request = request_rx.await.unwrap();
    let request = String::from_utf8_lossy(&request);
    assert!(request.starts_with("POST /api/Documents/Upload?location=tempfiles HTTP/1.1"));
    assert!(request.contains("name=\"identifier\""));
    assert!(request.contains("image-block"));
    assert!(request.contains("name=\"component\""));
    assert!(request.contains("wysiwyg"));
    assert!(request.contains("name=\"AccessControl\""));
    assert!(request.contains("Public"));
    assert!(request.contains("name=\"file\""));
    assert!(request.contains("filename=\"logo.png\""));
}

#[tokio::test]
async fn test_upload_failure_status_is_error() {
    let (addr, _request_rx) = spawn_stub("500 Internal Server Error", "{}").await;
    let uploader = Uploader::new(format!("http://{addr}"));

    let result = uploader
        .upload(UploadRequest {
            identifier: "image-block".to_string(),
            file_name: "logo.png".to_string(),
            bytes: vec![1, 2, 3],
        })
        .await;

    assert!(matches!(result, Err(UploadError::Status(status)) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_empty_payload_is_malformed() {
    let (addr, _request_rx) = spawn_stub("200 OK", r#"{"payload":[]}"#).await;
    let uploader = Uploader::new(format!("http://{addr}"));

    let result = uploader
        .upload(UploadRequest {
            identifier: "avatar-block".to_string(),
            file_name: "me.jpg".to_string(),
            bytes: vec![1],
        })
        .await;

    assert!(matches!(result, Err(UploadError::MalformedResponse)));
}

//! End-to-end tests against a real server on an ephemeral port.
//!
//! Each test starts the full router (middleware included) on its own
//! listener and drives it over HTTP with `reqwest`.
//!
//! Run with: `cargo test --test integration_tests`
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use reqwest::{Client, StatusCode};
use tokio::net::TcpListener;

use caesar_service::{AppState, Config, build_router};
use common::{CIPHERTEXT, FIXTURE_KEY, PLAINTEXT};

/// Test fixture that owns a running app server
struct TestFixture {
    base_url: String,
    client: Client,
}

impl TestFixture {
    /// Start the server with default configuration
    async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    /// Start the server with the given configuration on an ephemeral port
    async fn with_config(config: Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to ephemeral port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let app = build_router(AppState::with_caesar(config));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `body` to `path`, returning status and body text
    async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let response = self
            .client
            .post(self.url(path))
            .body(body.to_string())
            .send()
            .await
            .expect("Request failed");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }
}

// ============================================================================
// Fixture Round Trip
// ============================================================================

#[tokio::test]
async fn test_encode_fixture() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            &format!("/cyphers/caesar?mode=encode&key={FIXTURE_KEY}"),
            PLAINTEXT,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CIPHERTEXT);
}

#[tokio::test]
async fn test_decode_fixture_with_key() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            &format!("/cyphers/caesar?mode=decode&key={FIXTURE_KEY}"),
            CIPHERTEXT,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PLAINTEXT);
}

#[tokio::test]
async fn test_decode_fixture_brute_force() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/cyphers/caesar?mode=decode&method=brute-force", CIPHERTEXT)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PLAINTEXT);
}

#[tokio::test]
async fn test_decode_fixture_frequency_analysis() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/cyphers/caesar?mode=decode&method=freq", CIPHERTEXT)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PLAINTEXT);
}

#[tokio::test]
async fn test_method_takes_precedence_over_key() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/cyphers/caesar?mode=decode&method=freq&key=1", CIPHERTEXT)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PLAINTEXT);
}

#[tokio::test]
async fn test_negative_key_round_trip() {
    let fixture = TestFixture::new().await;

    let (status, ciphertext) = fixture
        .post("/cyphers/caesar?mode=encode&key=-84", PLAINTEXT)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, plaintext) = fixture
        .post("/cyphers/caesar?mode=decode&key=-84", &ciphertext)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plaintext, PLAINTEXT);
}

#[tokio::test]
async fn test_large_body_streams_through() {
    let fixture = TestFixture::new().await;
    let plaintext = PLAINTEXT.repeat(200);

    let (status, ciphertext) = fixture
        .post("/cyphers/caesar?mode=encode&key=7", &plaintext)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ciphertext.len(), plaintext.len());

    let (status, decoded) = fixture
        .post("/cyphers/caesar?mode=decode&method=brute-force", &ciphertext)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decoded, plaintext);
}

#[tokio::test]
async fn test_empty_body() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.post("/cyphers/caesar?mode=encode&key=3", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_wrong_resource_not_found() {
    let fixture = TestFixture::new().await;

    for query in ["mode=encode&key=13", "mode=decode&method=freq", ""] {
        let (status, body) = fixture
            .post(&format!("/cyphers/vigener?{query}"), "text")
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "query: {query}");
        assert_eq!(body, "not found\n");
    }
}

#[tokio::test]
async fn test_missing_mode() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.post("/cyphers/caesar?mode=&key=13", "text").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "not found 'mode' query parameter\n");
}

#[tokio::test]
async fn test_unsupported_mode() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/cyphers/caesar?mode=super-decode&key=13", "text")
        .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body, "unsupported mode\n");
}

#[tokio::test]
async fn test_invalid_key() {
    let fixture = TestFixture::new().await;

    for path in [
        "/cyphers/caesar?mode=encode",
        "/cyphers/caesar?mode=encode&key=abc",
        "/cyphers/caesar?mode=decode&key=1.5",
    ] {
        let (status, body) = fixture.post(path, "text").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "path: {path}");
        assert_eq!(body, "invalid key\n");
    }
}

#[tokio::test]
async fn test_key_out_of_range() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/cyphers/caesar?mode=encode&key=100", "text")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid key 100: must be in range [-84, 84]\n");
}

#[tokio::test]
async fn test_missing_method() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.post("/cyphers/caesar?mode=decode", "text").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "not found 'method' query parameter\n");
}

#[tokio::test]
async fn test_unsupported_method() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/cyphers/caesar?mode=decode&method=rainbow", "text")
        .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body, "unsupported decryption method\n");
}

#[tokio::test]
async fn test_body_over_limit() {
    let fixture = TestFixture::with_config(Config {
        max_request_body_size: 16,
        ..Config::default()
    })
    .await;

    let (status, _) = fixture
        .post("/cyphers/caesar?mode=encode&key=1", PLAINTEXT)
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

// ============================================================================
// Headers
// ============================================================================

#[tokio::test]
async fn test_plain_text_headers_on_every_response() {
    let fixture = TestFixture::new().await;

    for path in [
        "/cyphers/caesar?mode=encode&key=1",
        "/cyphers/caesar?mode=unknown",
        "/cyphers/rot13",
        "/elsewhere",
    ] {
        let response = fixture
            .client
            .post(fixture.url(path))
            .body("text")
            .send()
            .await
            .expect("Request failed");

        let headers = response.headers();
        assert_eq!(
            headers[CONTENT_TYPE], "text/plain; charset=UTF-8",
            "path: {path}"
        );
        assert_eq!(headers[X_CONTENT_TYPE_OPTIONS], "nosniff", "path: {path}");
    }
}

#[tokio::test]
async fn test_connection_reused_after_rejection() {
    let fixture = TestFixture::new().await;

    // The unread body of a rejected request must not poison the next
    // request on the same keep-alive connection.
    for _ in 0..3 {
        let (status, _) = fixture.post("/cyphers/caesar", PLAINTEXT).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = fixture
            .post(
                &format!("/cyphers/caesar?mode=encode&key={FIXTURE_KEY}"),
                PLAINTEXT,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, CIPHERTEXT);
    }
}

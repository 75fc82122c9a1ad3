//! HTTP access to the computation service.

use crate::domain::{RunResult, SubmitError, SubmitResult};
use std::time::Duration;

pub const RUN_PATH: &str = "/run";
pub const SAMPLE_MODEL_PATH: &str = "/static/sample_model.yaml";
pub const MODEL_CONTENT_TYPE: &str = "application/yaml";

/// Round-trips to the computation service.
///
/// Calls block the calling thread; the application runs them on a worker
/// (see [`crate::application::SubmissionDispatcher`]).
pub trait SubmissionClient: Send + Sync {
    /// Sends `document` to the run endpoint and decodes the returned grid.
    fn submit(&self, document: &str) -> SubmitResult<RunResult>;

    /// Fetches the demonstration model as plain text.
    fn fetch_sample(&self) -> SubmitResult<String>;
}

pub struct HttpSubmissionClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSubmissionClient {
    /// Builds a client with an explicit request timeout. Timeouts surface as
    /// [`SubmitError::Transport`] and are not retried.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SubmitResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .referer(false)
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn read_body(response: reqwest::blocking::Response) -> SubmitResult<String> {
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered {}", response.url(), status);
            return Err(SubmitError::Server { status: status.as_u16() });
        }
        response.text().map_err(|e| SubmitError::Transport(e.to_string()))
    }
}

impl SubmissionClient for HttpSubmissionClient {
    fn submit(&self, document: &str) -> SubmitResult<RunResult> {
        let url = self.url(RUN_PATH);
        log::info!("Submitting {} bytes to {}", document.len(), url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, MODEL_CONTENT_TYPE)
            .body(document.to_owned())
            .send()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let body = Self::read_body(response)?;
        let result = RunResult::from_body(body)?;
        log::info!(
            "Received {}x{} grid",
            result.grid.row_count(),
            result.grid.col_count()
        );
        Ok(result)
    }

    fn fetch_sample(&self) -> SubmitResult<String> {
        let url = self.url(SAMPLE_MODEL_PATH);
        log::info!("Loading sample model from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        Self::read_body(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Instant;

    fn client_for(server: &mockito::ServerGuard) -> HttpSubmissionClient {
        HttpSubmissionClient::new(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_submit_posts_yaml_and_decodes_grid() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/run")
            .match_header("content-type", "application/yaml")
            .match_header("referer", Matcher::Missing)
            .match_body("a: 1\n")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[["InOut", null], [null, "Robot"]]"#)
            .create();

        let result = client_for(&server).submit("a: 1\n").unwrap();

        mock.assert();
        assert_eq!(result.grid.get(0, 0), Some(&json!("InOut")));
        assert_eq!(result.grid.get(1, 0), None);
        assert_eq!(result.raw, r#"[["InOut", null], [null, "Robot"]]"#);
    }

    #[test]
    fn test_submit_server_error_carries_status() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/run").with_status(500).create();

        let err = client_for(&server).submit("x").unwrap_err();
        assert_eq!(err, SubmitError::Server { status: 500 });
    }

    #[test]
    fn test_submit_malformed_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/run")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create();

        let err = client_for(&server).submit("x").unwrap_err();
        assert!(matches!(err, SubmitError::MalformedResponse(_)));
    }

    #[test]
    fn test_submit_unreachable_is_transport_error() {
        let client = HttpSubmissionClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.submit("x").unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }

    #[test]
    fn test_submit_timeout_is_transport_error_without_retry() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (release, hold) = mpsc::channel::<()>();

        // Accepts one connection and never answers it.
        let server = thread::spawn(move || {
            let (_stream, _) = listener.accept().unwrap();
            let _ = hold.recv();
            listener.set_nonblocking(true).unwrap();
            listener.accept().is_err()
        });

        let client = HttpSubmissionClient::new(format!("http://{addr}"), Duration::from_secs(1)).unwrap();
        let started = Instant::now();
        let err = client.submit("a: 1\n").unwrap_err();
        let elapsed = started.elapsed();
        release.send(()).unwrap();

        assert!(matches!(err, SubmitError::Transport(_)), "{err:?}");
        assert!(elapsed >= Duration::from_secs(1), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(5), "{elapsed:?}");
        assert!(server.join().unwrap(), "request was retried");
    }

    #[test]
    fn test_fetch_sample_returns_text() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/static/sample_model.yaml")
            .with_status(200)
            .with_body("stations:\n  - InOut\n")
            .create();

        let text = client_for(&server).fetch_sample().unwrap();

        mock.assert();
        assert_eq!(text, "stations:\n  - InOut\n");
    }

    #[test]
    fn test_fetch_sample_not_found() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/static/sample_model.yaml").with_status(404).create();

        let err = client_for(&server).fetch_sample().unwrap_err();
        assert_eq!(err, SubmitError::Server { status: 404 });
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = HttpSubmissionClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url(RUN_PATH), "http://localhost:5000/run");
    }
}

// src/client.rs

//! Typed HTTP client for the quiz API, used by the smoke runner and the
//! integration tests.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::{
    handlers::health::HealthStatus,
    models::{
        quiz::{CreateQuizRequest, Quiz, QuizForAttempt, QuizSummary},
        result::{AttemptSubmission, QuizResult},
    },
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced by [`QuizClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed or joined.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection, timeout or protocol failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A response kept as loose JSON, for checks on which keys are present.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct QuizClient {
    http: reqwest::Client,
    api_base: Url,
}

impl QuizClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`; the
    /// `/api/` prefix is added here.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut root = base_url.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }

        let invalid = |source| ClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        };
        let api_base = Url::parse(&root).and_then(|u| u.join("api/")).map_err(invalid)?;

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { http, api_base })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.api_base
            .join(path)
            .map_err(|source| ClientError::InvalidUrl {
                url: format!("{}{}", self.api_base, path),
                source,
            })
    }

    /// Builds `/api/<segments...>`, percent-encoding each segment so ids
    /// containing `/`, `?` or `#` stay inside their own path segment.
    fn resource_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut target = self.api_base.clone();
        target
            .path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl {
                url: self.api_base.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(target)
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.url("")?;
        self.send(self.http.get(url)).await
    }

    pub async fn create_quiz(&self, req: &CreateQuizRequest) -> Result<Quiz, ClientError> {
        let url = self.url("quizzes")?;
        self.send(self.http.post(url).json(req)).await
    }

    pub async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ClientError> {
        let url = self.url("quizzes")?;
        self.send(self.http.get(url)).await
    }

    pub async fn get_quiz(&self, id: &str) -> Result<QuizForAttempt, ClientError> {
        let url = self.resource_url(&["quizzes", id])?;
        self.send(self.http.get(url)).await
    }

    pub async fn submit_attempt(
        &self,
        quiz_id: &str,
        attempt: &AttemptSubmission,
        student_name: Option<&str>,
    ) -> Result<QuizResult, ClientError> {
        let url = self.resource_url(&["quizzes", quiz_id, "attempt"])?;
        let mut req = self.http.post(url).json(attempt);
        if let Some(name) = student_name {
            req = req.query(&[("student_name", name)]);
        }
        self.send(req).await
    }

    pub async fn get_result(&self, id: &str) -> Result<QuizResult, ClientError> {
        let url = self.resource_url(&["results", id])?;
        self.send(self.http.get(url)).await
    }

    pub async fn list_results(&self) -> Result<Vec<QuizResult>, ClientError> {
        let url = self.url("admin/results")?;
        self.send(self.http.get(url)).await
    }

    /// GETs `path` (relative to `/api/`) without checking the status.
    pub async fn get_raw(&self, path: &str) -> Result<RawResponse, ClientError> {
        let url = self.url(path)?;
        self.send_raw(self.http.get(url)).await
    }

    /// POSTs a JSON body to `path` (relative to `/api/`) without checking the status.
    pub async fn post_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, ClientError> {
        let url = self.url(path)?;
        self.send_raw(self.http.post(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_raw(&self, req: RequestBuilder) -> Result<RawResponse, ClientError> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        // Non-JSON bodies (e.g. empty) become null.
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_prefix_is_added_with_or_without_trailing_slash() {
        for base in ["http://localhost:3000", "http://localhost:3000/"] {
            let client = QuizClient::new(base).unwrap();
            assert_eq!(client.api_base().as_str(), "http://localhost:3000/api/");
            assert_eq!(
                client.url("quizzes/abc/attempt").unwrap().as_str(),
                "http://localhost:3000/api/quizzes/abc/attempt"
            );
        }
    }

    #[test]
    fn ids_are_encoded_as_single_path_segments() {
        let client = QuizClient::new("http://localhost:3000").unwrap();

        let url = client.resource_url(&["quizzes", "a/b?c#d", "attempt"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/quizzes/a%2Fb%3Fc%23d/attempt"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = client.resource_url(&["results", "plain-id"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/results/plain-id");
    }

    #[test]
    fn rejects_garbage_base_url() {
        assert!(matches!(
            QuizClient::new("not a url"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }
}

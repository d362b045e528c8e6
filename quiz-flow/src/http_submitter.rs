//! Submitter that posts answers to a storage endpoint over HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::{Submission, Submitter};

/// Error type for the submitters that leave the process.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage endpoint answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Quiz id `{0}` cannot be used as a storage folder name")]
    InvalidQuizId(String),
}

impl SubmitError {
    /// Transport failures and 5xx answers may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Posts `{ "quizData": <submission> }` to `<endpoint>?quizId=<id>`.
///
/// Transport failures and 5xx answers are retried `retries` more times before
/// the last error is returned. Other statuses fail at once.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: String,
    retries: u32,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        Self::with_timeout(endpoint, Duration::from_secs(10))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quiz-flow/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            retries: 0,
        })
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self, submission: &Submission) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("quizId", submission.quiz_id.as_str())])
            .json(&submission.clone().into_quiz_data())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

impl Submitter for HttpSubmitter {
    type Error = SubmitError;

    fn submit(&self, submission: &Submission) -> Result<(), Self::Error> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.post(submission) {
                Ok(()) => {
                    debug!(endpoint = %self.endpoint, attempt, "submission stored");
                    return Ok(());
                }
                Err(err) if attempt <= self.retries && err.is_retryable() => {
                    warn!(endpoint = %self.endpoint, attempt, %err, "submission failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }
}

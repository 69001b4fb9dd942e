//! Minimal GitHub Checks API client.
//!
//! Only the two endpoints a check run needs are covered: create and update.
//! Every request carries its own timeout; nothing is retried.

use crate::config::GitHubSettings;
use crate::models::Annotation;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{operation} request failed: {source}")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckRunId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Body of `POST /repos/{owner}/{repo}/check-runs`.
pub struct NewCheckRun {
    pub name: String,
    pub head_sha: String,
    pub status: CheckRunStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Body of `PATCH /repos/{owner}/{repo}/check-runs/{id}`.
pub struct CheckRunUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckRunStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<Conclusion>,
    pub output: CheckRunOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<CheckRunAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunAnnotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: &'static str,
    pub message: String,
}

impl From<&Annotation> for CheckRunAnnotation {
    fn from(a: &Annotation) -> Self {
        // The API rejects line 0; file-level findings are pinned to line 1.
        CheckRunAnnotation {
            path: a.path.clone(),
            start_line: a.start_line.max(1),
            end_line: a.end_line.max(1),
            annotation_level: a.level.check_run_level(),
            message: a.message.clone(),
        }
    }
}

#[derive(Deserialize)]
struct CreatedCheckRun {
    id: u64,
}

/// The subset of the Checks API used by `publish::CheckRunPublisher`.
pub trait ChecksApi {
    fn create_check_run(&mut self, run: &NewCheckRun) -> Result<CheckRunId, RemoteError>;
    fn update_check_run(&mut self, id: CheckRunId, update: &CheckRunUpdate)
        -> Result<(), RemoteError>;
}

/// Authenticated client for one repository.
pub struct GitHubClient {
    http: Client,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("phpstan-action/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(RemoteError::Client)?;
        Ok(Self {
            http,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            token: settings.token.clone(),
        })
    }

    /// Collection URL for check runs of the configured repository.
    pub fn check_runs_url(&self) -> String {
        format!("{}/repos/{}/{}/check-runs", self.base_url, self.owner, self.repo)
    }

    fn send(&self, operation: &'static str, req: RequestBuilder) -> Result<Response, RemoteError> {
        let resp = req
            .bearer_auth(&self.token)
            .send()
            .map_err(|source| RemoteError::Http { operation, source })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(RemoteError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

impl ChecksApi for GitHubClient {
    fn create_check_run(&mut self, run: &NewCheckRun) -> Result<CheckRunId, RemoteError> {
        let operation = "create check run";
        let resp = self.send(operation, self.http.post(self.check_runs_url()).json(run))?;
        let created: CreatedCheckRun = resp
            .json()
            .map_err(|source| RemoteError::Http { operation, source })?;
        Ok(CheckRunId(created.id))
    }

    fn update_check_run(
        &mut self,
        id: CheckRunId,
        update: &CheckRunUpdate,
    ) -> Result<(), RemoteError> {
        let url = format!("{}/{}", self.check_runs_url(), id.0);
        self.send("update check run", self.http.patch(url).json(update))?;
        Ok(())
    }
}

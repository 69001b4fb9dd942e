//! Check Run publisher.
//!
//! Lifecycle is strictly linear: create (in progress), one update per batch of
//! annotations, then complete. The first failing call aborts the run; a check
//! run left in progress is not cleaned up.

use super::{PublishError, Publisher};
use crate::github::{
    CheckRunAnnotation, CheckRunId, CheckRunOutput, CheckRunStatus, CheckRunUpdate, ChecksApi,
    Conclusion, NewCheckRun,
};
use crate::models::Annotation;
use crate::summary::summarize;

/// Hard limit of the Checks API on annotations per request.
pub const MAX_ANNOTATIONS_PER_REQUEST: usize = 50;

pub const OUTPUT_TITLE: &str = "Result";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Progress of the remote check run. `Updated` counts delivered batches.
pub enum CheckRunPhase {
    Pending,
    Created(CheckRunId),
    Updated(CheckRunId, usize),
    Completed(CheckRunId),
}

pub struct CheckRunPublisher<A: ChecksApi> {
    api: A,
    name: String,
    head_sha: String,
    phase: CheckRunPhase,
}

impl<A: ChecksApi> CheckRunPublisher<A> {
    pub fn new(api: A, name: impl Into<String>, head_sha: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
            head_sha: head_sha.into(),
            phase: CheckRunPhase::Pending,
        }
    }

    pub fn phase(&self) -> CheckRunPhase {
        self.phase
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn enter(&mut self, phase: CheckRunPhase) {
        tracing::info!(?phase, check = %self.name, "check run transition");
        self.phase = phase;
    }
}

fn output(summary: &str, annotations: Vec<CheckRunAnnotation>) -> CheckRunOutput {
    CheckRunOutput {
        title: OUTPUT_TITLE.to_string(),
        summary: summary.to_string(),
        annotations,
    }
}

impl<A: ChecksApi> Publisher for CheckRunPublisher<A> {
    fn publish(&mut self, annotations: &[Annotation]) -> Result<(), PublishError> {
        self.phase = CheckRunPhase::Pending;
        let summary = summarize(annotations.len());

        let id = self.api.create_check_run(&NewCheckRun {
            name: self.name.clone(),
            head_sha: self.head_sha.clone(),
            status: CheckRunStatus::InProgress,
        })?;
        self.enter(CheckRunPhase::Created(id));

        for (i, batch) in annotations.chunks(MAX_ANNOTATIONS_PER_REQUEST).enumerate() {
            tracing::debug!(batch = i + 1, size = batch.len(), "sending annotation batch");
            let update = CheckRunUpdate {
                name: self.name.clone(),
                status: None,
                conclusion: None,
                output: output(&summary, batch.iter().map(CheckRunAnnotation::from).collect()),
            };
            self.api.update_check_run(id, &update)?;
            self.enter(CheckRunPhase::Updated(id, i + 1));
        }

        let conclusion = if annotations.is_empty() {
            Conclusion::Success
        } else {
            Conclusion::Failure
        };
        let complete = CheckRunUpdate {
            name: self.name.clone(),
            status: Some(CheckRunStatus::Completed),
            conclusion: Some(conclusion),
            output: output(&summary, Vec::new()),
        };
        self.api.update_check_run(id, &complete)?;
        self.enter(CheckRunPhase::Completed(id));
        Ok(())
    }
}

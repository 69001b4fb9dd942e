//! Annotation publishers.
//!
//! Two mutually exclusive sinks share one capability: GitHub Actions log
//! directives on stdout, and a GitHub Check Run. The CLI picks one per run.

pub mod check_run;
pub mod log;

pub use check_run::{CheckRunPhase, CheckRunPublisher, MAX_ANNOTATIONS_PER_REQUEST};
pub use log::LogDirectivePublisher;

use crate::github::RemoteError;
use crate::models::Annotation;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to write annotations: {0}")]
    Write(#[source] std::io::Error),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// A sink that publishes a complete annotation sequence.
pub trait Publisher {
    fn publish(&mut self, annotations: &[Annotation]) -> Result<(), PublishError>;
}

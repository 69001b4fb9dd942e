//! Crate-level error kinds and their process exit codes.

use crate::annotate::PathResolutionError;
use crate::config::ConfigError;
use crate::publish::PublishError;
use crate::report::ReportError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] ReportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Path(#[from] PathResolutionError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    /// Publication succeeded but PHPStan reported findings.
    #[error("{0}")]
    FindingsPresent(String),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            _ => 1,
        }
    }
}

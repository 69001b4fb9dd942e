//! Normalized annotation records ready for publication.

use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity of an annotation. PHPStan does not report severities, so every
/// finding is published at `Error`.
pub enum AnnotationLevel {
    #[default]
    Error,
}

impl AnnotationLevel {
    /// Keyword used by the GitHub Actions `::<level>` workflow command.
    pub fn directive(self) -> &'static str {
        match self {
            AnnotationLevel::Error => "error",
        }
    }

    /// `annotation_level` value accepted by the Checks API.
    pub fn check_run_level(self) -> &'static str {
        match self {
            AnnotationLevel::Error => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
/// A finding mapped onto a workspace-relative location.
pub struct Annotation {
    /// Path relative to the workspace root, `/`-separated.
    pub path: String,
    /// 1-based line, or 0 for a file-level finding.
    pub start_line: u32,
    pub end_line: u32,
    pub level: AnnotationLevel,
    /// Raw message; channel-specific escaping happens at render time.
    pub message: String,
}

impl Annotation {
    /// Single-line annotation at `line`.
    pub fn single_line(path: String, line: u32, message: String) -> Self {
        Annotation {
            path,
            start_line: line,
            end_line: line,
            level: AnnotationLevel::default(),
            message,
        }
    }
}

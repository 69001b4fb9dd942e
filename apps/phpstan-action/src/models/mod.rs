//! Shared data models: the decoded PHPStan report and the annotations
//! derived from it.

pub mod annotation;
pub mod report;

pub use annotation::{Annotation, AnnotationLevel};
pub use report::{FileFindings, Finding, Report, Totals};

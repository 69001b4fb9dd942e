//! End-to-end run: read, parse, translate, publish, report the outcome.

use crate::annotate::translate;
use crate::config::Effective;
use crate::error::Error;
use crate::publish::Publisher;
use crate::report::read_report;
use crate::summary::summarize;
use std::io::Read;

/// Run one publication cycle for the report read from `input`.
///
/// The workspace root is checked before the input is touched, and the read
/// is bounded by `eff.timeout`. Findings turn into `Error::FindingsPresent`
/// once they have been published, so CI sees a failing status whenever
/// PHPStan reported anything.
pub fn run<R>(input: R, eff: &Effective, publisher: &mut dyn Publisher) -> Result<(), Error>
where
    R: Read + Send + 'static,
{
    let root = eff.workspace()?;
    let report = read_report(input, eff.timeout)?;
    tracing::debug!(
        errors = report.totals.errors,
        file_errors = report.totals.file_errors,
        files = report.files.len(),
        "report decoded"
    );
    for e in &report.errors {
        tracing::warn!("phpstan: {e}");
    }

    let annotations = translate(&report, root)?;
    publisher.publish(&annotations)?;

    if annotations.is_empty() {
        tracing::info!("{}", summarize(0));
        Ok(())
    } else {
        Err(Error::FindingsPresent(summarize(annotations.len())))
    }
}

//! Report decoding.
//!
//! PHPStan has not kept the `files` field type-stable: with findings it is an
//! object keyed by absolute path, but some versions emit an empty array (or
//! other placeholder arrays) when nothing was found. Decoding tries the
//! object shape first and falls back to the array shape, which normalizes to
//! an empty file map. `null` in place of `totals`, `errors` or a file's
//! `messages` decodes as empty. Callers only ever see `models::Report`.

use crate::models::report::null_as_default;
use crate::models::{FileFindings, Report, Totals};
use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to read report: {0}")]
    Read(#[source] std::io::Error),
    #[error("malformed report: {0}")]
    Malformed(#[source] serde_json::Error),
}

#[derive(Deserialize)]
struct RawReport<F> {
    #[serde(default, deserialize_with = "null_as_default")]
    totals: Totals,
    files: Option<F>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<String>,
}

type PrimaryReport = RawReport<BTreeMap<String, FileFindings>>;
type PlaceholderReport = RawReport<Vec<Json>>;

/// Decode a report from raw JSON bytes.
pub fn parse(bytes: &[u8]) -> Result<Report, ReportError> {
    match serde_json::from_slice::<PrimaryReport>(bytes) {
        Ok(raw) => Ok(Report {
            totals: raw.totals,
            files: raw.files.unwrap_or_default(),
            errors: raw.errors,
        }),
        Err(primary_err) => match serde_json::from_slice::<PlaceholderReport>(bytes) {
            Ok(raw) => {
                tracing::debug!(
                    placeholder_len = raw.files.as_ref().map_or(0, Vec::len),
                    "report uses array placeholder for files; treating as no findings"
                );
                Ok(Report {
                    totals: raw.totals,
                    files: BTreeMap::new(),
                    errors: raw.errors,
                })
            }
            Err(_) => Err(ReportError::Malformed(primary_err)),
        },
    }
}

/// Read a whole report from `input` and decode it.
///
/// The read runs on a worker thread and must reach end of input within
/// `timeout`, otherwise the result is a `TimedOut` read error. A reader still
/// blocked at that point is abandoned.
pub fn read_report<R>(input: R, timeout: Duration) -> Result<Report, ReportError>
where
    R: Read + Send + 'static,
{
    let buf = read_with_timeout(input, timeout).map_err(ReportError::Read)?;
    parse(&buf)
}

fn read_with_timeout<R>(mut input: R, timeout: Duration) -> io::Result<Vec<u8>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let res = input.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(res);
    });
    match rx.recv_timeout(timeout) {
        Ok(res) => res,
        Err(RecvTimeoutError::Timeout) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("no complete report within {}s", timeout.as_secs_f32()),
        )),
        Err(RecvTimeoutError::Disconnected) => {
            Err(io::Error::other("report reader stopped without a result"))
        }
    }
}

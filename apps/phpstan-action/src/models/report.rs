//! PHPStan JSON report schema (`--error-format=json`).
//!
//! This is the normalized, in-memory shape. Decoding of the historical
//! variants of the `files` field lives in `crate::report`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Decode `null` the same way as an absent field.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Aggregate counters reported by PHPStan. Informational only.
pub struct Totals {
    #[serde(default)]
    pub errors: usize,
    #[serde(default)]
    pub file_errors: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// One analysis run: findings grouped by absolute file path.
pub struct Report {
    pub totals: Totals,
    pub files: BTreeMap<String, FileFindings>,
    /// Tool-level errors (bad config, crashed workers). Never annotated.
    pub errors: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Findings reported for a single file.
pub struct FileFindings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Finding>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single reported problem.
pub struct Finding {
    pub message: String,
    /// 1-based line. `None` (absent or `null`) and anything below 1 mean
    /// file-level.
    #[serde(default)]
    pub line: Option<i64>,
    #[serde(default)]
    pub ignorable: bool,
}

impl Finding {
    /// Line number when the finding points at a concrete line.
    pub fn line_number(&self) -> Option<u32> {
        self.line
            .filter(|l| *l > 0)
            .and_then(|l| u32::try_from(l).ok())
    }
}

impl Report {
    /// Total number of findings across all files.
    pub fn finding_count(&self) -> usize {
        self.files.values().map(|f| f.messages.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_level_lines_have_no_number() {
        let mut f = Finding {
            message: "m".into(),
            line: Some(0),
            ignorable: false,
        };
        assert_eq!(f.line_number(), None);
        f.line = None;
        assert_eq!(f.line_number(), None);
        f.line = Some(7);
        assert_eq!(f.line_number(), Some(7));
        f.line = Some(-1);
        assert_eq!(f.line_number(), None);
        f.line = Some(i64::from(u32::MAX) + 1);
        assert_eq!(f.line_number(), None);
    }

    #[test]
    fn null_messages_and_counts_decode_as_empty() {
        let f: FileFindings = serde_json::from_str(r#"{"errors":null,"messages":null}"#).unwrap();
        assert_eq!(f, FileFindings::default());
    }

    #[test]
    fn ignorable_survives_reserialization() {
        let f: Finding =
            serde_json::from_str(r#"{"message":"x","line":3,"ignorable":true}"#).unwrap();
        let back = serde_json::to_value(&f).unwrap();
        assert_eq!(back["ignorable"], true);
        assert_eq!(back["line"], 3);
    }
}

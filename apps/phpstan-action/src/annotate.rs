//! Translation of a decoded report into workspace-relative annotations.
//!
//! Relativization is all-or-nothing: one file key that cannot be expressed
//! relative to the workspace root fails the whole translation, so a run never
//! publishes a partial set of findings.

use crate::models::{Annotation, Report};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
#[error("cannot make '{path}' relative to workspace '{}': {reason}", .root.display())]
pub struct PathResolutionError {
    pub path: String,
    pub root: PathBuf,
    pub reason: &'static str,
}

/// Map every finding in `report` to one annotation.
///
/// Files are visited in key order and findings in report order.
pub fn translate(
    report: &Report,
    workspace_root: &Path,
) -> Result<Vec<Annotation>, PathResolutionError> {
    let mut out = Vec::with_capacity(report.finding_count());
    for (file, findings) in &report.files {
        if findings.messages.is_empty() {
            continue;
        }
        let rel = relativize(file, workspace_root)?;
        for f in &findings.messages {
            out.push(Annotation::single_line(
                rel.clone(),
                f.line_number().unwrap_or(0),
                f.message.clone(),
            ));
        }
    }
    Ok(out)
}

/// Lexically rewrite `key` relative to `root`, `/`-separated.
pub fn relativize(key: &str, root: &Path) -> Result<String, PathResolutionError> {
    let fail = |reason| PathResolutionError {
        path: key.to_string(),
        root: root.to_path_buf(),
        reason,
    };
    if key.is_empty() {
        return Err(fail("empty path"));
    }
    let path = clean(Path::new(key));
    let base = clean(root);
    if path.is_absolute() != base.is_absolute() {
        return Err(fail("one path is absolute and the other is not"));
    }
    if prefix_of(&path) != prefix_of(&base) {
        return Err(fail("paths are on different volumes"));
    }
    let rel =
        pathdiff::diff_paths(&path, &base).ok_or_else(|| fail("no relative path exists"))?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return Ok(".".to_string());
    }
    Ok(parts.join("/"))
}

/// Resolve `.` and `..` without touching the filesystem.
fn clean(p: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in p.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn prefix_of(p: &Path) -> Option<std::ffi::OsString> {
    match p.components().next() {
        Some(Component::Prefix(pre)) => Some(pre.as_os_str().to_os_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileFindings, Finding};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn finding(message: &str, line: Option<i64>) -> Finding {
        Finding {
            message: message.to_string(),
            line,
            ignorable: false,
        }
    }

    fn report_of(files: Vec<(&str, Vec<Finding>)>) -> Report {
        let mut map = BTreeMap::new();
        for (k, messages) in files {
            map.insert(
                k.to_string(),
                FileFindings {
                    errors: messages.len(),
                    messages,
                },
            );
        }
        Report {
            files: map,
            ..Report::default()
        }
    }

    #[test]
    fn test_translate_relativizes_paths() {
        let r = report_of(vec![(
            "/ws/src/a.php",
            vec![finding("undefined variable", Some(10))],
        )]);
        let out = translate(&r, Path::new("/ws")).unwrap();
        assert_eq!(
            out,
            vec![Annotation::single_line(
                "src/a.php".into(),
                10,
                "undefined variable".into()
            )]
        );
        assert_eq!(out[0].end_line, out[0].start_line);
    }

    #[test]
    fn test_translate_keeps_raw_message_and_file_level_lines() {
        let r = report_of(vec![(
            "/ws/b.php",
            vec![finding("a\nb", None), finding("c", Some(0)), finding("d", Some(-1))],
        )]);
        let out = translate(&r, Path::new("/ws/")).unwrap();
        assert_eq!(out[0].message, "a\nb");
        assert_eq!(out[0].start_line, 0);
        assert_eq!(out[1].start_line, 0);
        assert_eq!((out[2].start_line, out[2].end_line), (0, 0));
    }

    #[test]
    fn test_translate_fails_whole_run_on_bad_key() {
        let r = report_of(vec![
            ("/ws/a.php", vec![finding("ok", Some(1))]),
            ("relative/b.php", vec![finding("bad", Some(2))]),
        ]);
        let err = translate(&r, Path::new("/ws")).unwrap_err();
        assert_eq!(err.path, "relative/b.php");
    }

    #[test]
    fn test_relativize_cases() {
        let root = Path::new("/ws");
        assert_eq!(relativize("/ws/src/./x/../a.php", root).unwrap(), "src/a.php");
        assert_eq!(relativize("/other/a.php", root).unwrap(), "../other/a.php");
        assert_eq!(relativize("/ws", root).unwrap(), ".");
        assert!(relativize("", root).is_err());
        assert!(relativize("/ws/a.php", Path::new("ws")).is_err());
    }

    #[test]
    fn test_translate_empty_report() {
        let out = translate(&Report::default(), Path::new("/ws")).unwrap();
        assert!(out.is_empty());
    }

    proptest! {
        #[test]
        fn one_annotation_per_finding(
            files in prop::collection::btree_map("[a-z]{1,8}", prop::collection::vec(("[ -~]{0,20}", 0i64..500), 0..6), 0..8)
        ) {
            let files: Vec<(String, Vec<Finding>)> = files
                .into_iter()
                .map(|(k, ms)| (format!("/ws/{k}.php"), ms.into_iter().map(|(m, l)| finding(&m, Some(l))).collect()))
                .collect();
            let r = report_of(files.iter().map(|(k, v)| (k.as_str(), v.clone())).collect());
            let out = translate(&r, Path::new("/ws")).unwrap();
            prop_assert_eq!(out.len(), r.finding_count());

            let mut expected: Vec<(String, String)> = files
                .iter()
                .flat_map(|(k, ms)| ms.iter().map(move |m| (k.trim_start_matches("/ws/").to_string(), m.message.clone())))
                .collect();
            let mut actual: Vec<(String, String)> = out.iter().map(|a| (a.path.clone(), a.message.clone())).collect();
            expected.sort();
            actual.sort();
            prop_assert_eq!(expected, actual);

            let again = translate(&r, Path::new("/ws")).unwrap();
            prop_assert_eq!(out, again);
        }
    }
}

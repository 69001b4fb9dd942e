//! Human-readable result summaries.

/// Pick the English singular form for exactly one item, plural otherwise.
pub fn plural<'a>(count: usize, one: &'a str, other: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        other
    }
}

/// Summary line used for the check run and the failing exit message,
/// e.g. `"1 issue found"` or `"3 issues found"`.
pub fn summarize(count: usize) -> String {
    format!("{count} {} found", plural(count, "issue", "issues"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_pluralizes() {
        assert_eq!(summarize(0), "0 issues found");
        assert_eq!(summarize(1), "1 issue found");
        assert_eq!(summarize(2), "2 issues found");
        assert_eq!(summarize(1234), "1234 issues found");
    }

    #[test]
    fn test_summarize_is_deterministic() {
        assert_eq!(summarize(51), summarize(51));
        assert_ne!(summarize(1), summarize(2).replace('2', "1"));
    }
}

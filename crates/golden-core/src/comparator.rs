use similar::TextDiff;

const DIFF_CONTEXT_RADIUS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Match,
    Mismatch { diff: String },
}

impl Comparison {
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Compares interpreter output against the recorded expectation, ignoring
/// leading and trailing whitespace on both sides.
pub fn compare_output(actual: &str, expected: &str) -> Comparison {
    let actual = actual.trim();
    let expected = expected.trim();
    if actual == expected {
        return Comparison::Match;
    }
    Comparison::Mismatch {
        diff: render_unified_diff(actual, expected),
    }
}

pub fn render_unified_diff(actual: &str, expected: &str) -> String {
    // Terminate both sides so a trimmed last line does not show up as a
    // missing-newline change.
    let actual = with_trailing_newline(actual);
    let expected = with_trailing_newline(expected);
    TextDiff::from_lines(actual.as_str(), expected.as_str())
        .unified_diff()
        .context_radius(DIFF_CONTEXT_RADIUS)
        .header("actual", "expected")
        .to_string()
}

fn with_trailing_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

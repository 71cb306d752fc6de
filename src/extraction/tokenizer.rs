use std::sync::LazyLock;

use regex::Regex;

/// Word runs (letters and hyphens), numeric runs, and the unit and
/// connective tokens the dose and frequency matchers rely on.
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z][a-z\-]*|\d+\.?\d*|mg|mcg|g|x|/|day|daily|hours|hourly|every").unwrap()
});

/// Split prescription text into a flat token sequence.
///
/// Punctuation other than `/` is dropped. `"500mg"` becomes `["500", "mg"]`
/// and `"2x/day"` becomes `["2", "x", "/", "day"]`.
pub fn tokenize(text: &str) -> Vec<&str> {
    RE_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

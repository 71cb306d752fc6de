//! Frequency cues in a lookahead window.
//!
//! Matchers run in a fixed order against the same lower-cased window and
//! each either overwrites the frequency or leaves it alone, so the last
//! matcher that fires wins:
//!
//! 1. `keyword`: first entry of [`FREQUENCY_KEYWORDS`] contained in the window
//! 2. `times_per_day`: `N x` with `N > 0`, optionally followed by `daily` or `/ day`
//! 3. `every_n_hours`: `every N hour(s)`, giving `max(1, round(24 / N))` for `N > 0`

use std::sync::LazyLock;

use regex::Regex;

/// Keyword → doses per day, in lookup priority order.
pub const FREQUENCY_KEYWORDS: &[(&str, u32)] = &[
    ("once", 1),
    ("twice", 2),
    ("thrice", 3),
    ("od", 1),
    ("bd", 2),
    ("tid", 3),
    ("qid", 4),
    ("daily", 1),
    ("per day", 1),
];

static RE_TIMES_PER_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*x\s*(?:daily|/\s*day)?").unwrap());
static RE_EVERY_N_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"every\s*(\d+)\s*hours?").unwrap());

/// A named frequency matcher. Returns `Some` to set the frequency.
pub struct FrequencyMatcher {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<u32>,
}

pub const FREQUENCY_MATCHERS: &[FrequencyMatcher] = &[
    FrequencyMatcher {
        name: "keyword",
        apply: match_keyword,
    },
    FrequencyMatcher {
        name: "times_per_day",
        apply: match_times_per_day,
    },
    FrequencyMatcher {
        name: "every_n_hours",
        apply: match_every_n_hours,
    },
];

/// Substring containment, so `od` also fires inside longer words.
fn match_keyword(window: &str) -> Option<u32> {
    FREQUENCY_KEYWORDS
        .iter()
        .find(|(keyword, _)| window.contains(keyword))
        .map(|&(_, per_day)| per_day)
}

/// `0 x` is not a frequency and leaves any earlier match in place.
fn match_times_per_day(window: &str) -> Option<u32> {
    RE_TIMES_PER_DAY
        .captures(window)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|&per_day| per_day > 0)
}

// Hours are read as a float so arbitrarily long digit runs still parse;
// any huge interval floors at once a day.
fn match_every_n_hours(window: &str) -> Option<u32> {
    let hours: f64 = RE_EVERY_N_HOURS
        .captures(window)?
        .get(1)?
        .as_str()
        .parse()
        .ok()?;
    if hours <= 0.0 {
        return None;
    }
    let per_day = (24.0 / hours).round() as u32;
    Some(per_day.max(1))
}

/// Run every matcher over the window; later matches overwrite earlier ones.
pub fn parse_frequency(window: &str) -> Option<u32> {
    let lower = window.to_lowercase();
    let mut frequency = None;

    for matcher in FREQUENCY_MATCHERS {
        if let Some(per_day) = (matcher.apply)(&lower) {
            tracing::trace!(matcher = matcher.name, per_day, "Frequency matched");
            frequency = Some(per_day);
        }
    }

    frequency
}

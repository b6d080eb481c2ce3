use once_cell::sync::Lazy;
use regex::Regex;

/// Words-per-minute applied when the caller does not supply a rate.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Estimates minutes-to-read for a content string that may contain markup.
///
/// Markup tags are stripped, the remainder is split on whitespace runs, and
/// the token count is divided by `words_per_minute`, rounding up. Content
/// with no effective words estimates 0 minutes, not 1. A `words_per_minute`
/// of 0 also yields 0 instead of dividing by zero.
pub fn estimate_read_time(content: &str, words_per_minute: u32) -> u32 {
    if words_per_minute == 0 {
        return 0;
    }

    let text = TAG_PATTERN.replace_all(content, "");
    let word_count = text.split_whitespace().count();
    if word_count == 0 {
        return 0;
    }

    word_count.div_ceil(words_per_minute as usize) as u32
}

/// Estimate at the default reading rate.
pub fn read_time_minutes(content: &str) -> u32 {
    estimate_read_time(content, DEFAULT_WORDS_PER_MINUTE)
}

//! Text predicates shared by the recommendation rules, the deduction table
//! and the per-bullet analysis. All three must agree on these definitions.

use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

/// Bullets shorter than this many words are flagged as too short.
pub const MIN_BULLET_WORDS: usize = 8;
/// Bullets longer than this many words are flagged as too long.
pub const MAX_BULLET_WORDS: usize = 35;

/// Closed set of strong resume action verbs, matched against the first word only.
const ACTION_VERBS: &[&str] = &[
    "achieved",
    "built",
    "created",
    "delivered",
    "designed",
    "developed",
    "drove",
    "established",
    "improved",
    "increased",
    "implemented",
    "launched",
    "led",
    "managed",
    "reduced",
    "scaled",
    "spearheaded",
    "streamlined",
    "transformed",
    "optimized",
    "coordinated",
    "executed",
    "initiated",
    "mentored",
    "negotiated",
    "resolved",
    "revitalized",
    "automated",
    "collaborated",
    "deployed",
    "expanded",
    "generated",
    "headed",
    "introduced",
    "maintained",
    "oversaw",
    "produced",
];

/// Placeholder tokens the bullet-improvement flow emits in place of real numbers.
/// Matched case-insensitively.
const METRIC_PLACEHOLDERS: &[&str] = &["[x%]", "[y]", "(quantify)"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BulletLength {
    Short,
    Ok,
    Long,
}

/// Word separators: Unicode White_Space plus the byte-order mark, minus NEL.
fn is_separator(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|w| !w.is_empty())
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    words(text).count()
}

pub fn bullet_length(text: &str) -> BulletLength {
    match word_count(text) {
        n if n < MIN_BULLET_WORDS => BulletLength::Short,
        n if n > MAX_BULLET_WORDS => BulletLength::Long,
        _ => BulletLength::Ok,
    }
}

/// True when the first word, lower-cased and with its first non `a-z`
/// character removed, is one of the known action verbs.
///
/// `"Led,"` and `"*Built"` match; `"(Led)"` does not, since only one
/// character is stripped.
pub fn has_action_verb(text: &str) -> bool {
    let Some(first) = words(text).next() else {
        return false;
    };

    let mut word = first.to_lowercase();
    if let Some(pos) = word.find(|c: char| !c.is_ascii_lowercase()) {
        word.remove(pos);
    }

    !word.is_empty() && ACTION_VERBS.contains(&word.as_str())
}

/// True when the text carries a digit, `%`, `$`, or a metric placeholder.
pub fn has_metric(text: &str) -> bool {
    if text
        .chars()
        .any(|c| c.is_ascii_digit() || c == '%' || c == '$')
    {
        return true;
    }

    let lower = text.to_lowercase();
    METRIC_PLACEHOLDERS.iter().any(|p| lower.contains(p))
}

/// Every non-empty bullet, experience entries first, then projects, in document order.
pub fn all_bullets(resume: &Resume) -> Vec<&str> {
    resume
        .experience
        .iter()
        .flat_map(|e| e.bullets.iter())
        .chain(resume.projects.iter().flat_map(|p| p.bullets.iter()))
        .map(String::as_str)
        .filter(|b| !b.is_empty())
        .collect()
}

/// Blank after trimming.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_separator)
}

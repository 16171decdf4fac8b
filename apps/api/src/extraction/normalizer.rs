//! Resume Field Normalizer: pure transformations from associator output and
//! raw text into a `ResumeRecord`. No I/O.

use crate::extraction::associator::{Association, OrgDateMention};
use crate::models::resume::{is_sentinel, JobEntry, ResumeRecord, NOT_AVAILABLE};

/// Case-sensitive marker that opens the education section.
pub const EDUCATION_MARKER: &str = "EDUCATION";

const TIMELINE_SEPARATOR: &str = " - ";

/// The mention with the numerically greatest year. Among ties the earliest in
/// document order wins.
pub fn most_recent_organization(mentions: &[OrgDateMention]) -> Option<&OrgDateMention> {
    let latest = mentions.iter().map(|m| m.year).max()?;
    mentions.iter().find(|m| m.year == latest)
}

/// Splits `"<start> - <end>"` into its two halves. Anything else, including
/// `"2019-2021"` without the surrounding spaces, yields two sentinels.
pub fn split_timeline(timeline: &str) -> (String, String) {
    let parts: Vec<&str> = timeline.trim().split(TIMELINE_SEPARATOR).collect();
    match parts.as_slice() {
        [start, end] if !start.trim().is_empty() && !end.trim().is_empty() => {
            (start.trim().to_string(), end.trim().to_string())
        }
        _ => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    }
}

/// Every non-blank line after the first line containing `EDUCATION`, trimmed.
pub fn extract_education(text: &str) -> Vec<String> {
    let mut lines = text.lines();
    if !lines.any(|line| line.contains(EDUCATION_MARKER)) {
        return Vec::new();
    }
    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Splits a comma-delimited list. Blank input or the sentinel yields no entries.
pub fn split_list(value: &str) -> Vec<String> {
    if is_sentinel(value) {
        return Vec::new();
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Builds a record from the rule-based pass. Only the most recent organization
/// is known, so it becomes the single job with every other job field sentinel.
pub fn normalize(association: Association, raw_text: &str) -> ResumeRecord {
    let jobs = most_recent_organization(&association.mentions)
        .map(|mention| vec![JobEntry::at(mention.organization.clone())])
        .unwrap_or_default();

    ResumeRecord {
        name: association.name,
        jobs,
        education: extract_education(raw_text),
        ..ResumeRecord::default()
    }
}

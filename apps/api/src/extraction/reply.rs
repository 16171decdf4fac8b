//! Strict parser for the labeled reply of the generative extraction call.
//!
//! Grammar: one `<Label>: <value>` per line, labels from `ReplyField`.
//! Blank lines are ignored. Any other line is rejected and reported. A field
//! whose value does not fit its shape is reported missing and left at its
//! sentinel; the rest of the record is still populated.

use std::collections::HashMap;
use std::fmt;

use crate::extraction::normalizer::{split_list, split_timeline};
use crate::models::resume::{is_sentinel, JobEntry, ResumeRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReplyField {
    Name,
    Location,
    Nationality,
    UsefulLinks,
    Job1,
    Responsibilities1,
    Job2,
    Responsibilities2,
    Education,
    HardSkills,
    SoftSkills,
    Tools,
    Projects,
    OtherInfo,
}

impl ReplyField {
    pub const ALL: [ReplyField; 14] = [
        ReplyField::Name,
        ReplyField::Location,
        ReplyField::Nationality,
        ReplyField::UsefulLinks,
        ReplyField::Job1,
        ReplyField::Responsibilities1,
        ReplyField::Job2,
        ReplyField::Responsibilities2,
        ReplyField::Education,
        ReplyField::HardSkills,
        ReplyField::SoftSkills,
        ReplyField::Tools,
        ReplyField::Projects,
        ReplyField::OtherInfo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReplyField::Name => "Name",
            ReplyField::Location => "Location",
            ReplyField::Nationality => "Nationality",
            ReplyField::UsefulLinks => "Useful Links",
            ReplyField::Job1 => "Job 1",
            ReplyField::Responsibilities1 => "Responsibilities 1",
            ReplyField::Job2 => "Job 2",
            ReplyField::Responsibilities2 => "Responsibilities 2",
            ReplyField::Education => "Education",
            ReplyField::HardSkills => "Hard Skills",
            ReplyField::SoftSkills => "Soft Skills",
            ReplyField::Tools => "Tools",
            ReplyField::Projects => "Projects",
            ReplyField::OtherInfo => "Other Relevant Info",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ReplyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyParse {
    Parsed(ResumeRecord),
    PartiallyParsed {
        record: ResumeRecord,
        missing: Vec<ReplyField>,
        rejected: Vec<String>,
    },
    Unparseable(String),
}

impl ReplyParse {
    /// The best-effort record plus every field that could not be filled.
    /// An unparseable reply degrades to an all-sentinel record.
    pub fn into_parts(self) -> (ResumeRecord, Vec<ReplyField>) {
        match self {
            ReplyParse::Parsed(record) => (record, Vec::new()),
            ReplyParse::PartiallyParsed {
                record, missing, ..
            } => (record, missing),
            ReplyParse::Unparseable(_) => (ResumeRecord::default(), ReplyField::ALL.to_vec()),
        }
    }
}

pub fn parse_reply(reply: &str) -> ReplyParse {
    let mut values: HashMap<ReplyField, &str> = HashMap::new();
    let mut rejected = Vec::new();

    for line in reply.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match split_labeled_line(line) {
            Some((field, value)) if !values.contains_key(&field) => {
                values.insert(field, value);
            }
            _ => rejected.push(line.to_string()),
        }
    }

    if values.is_empty() {
        let reason = if rejected.is_empty() {
            "reply is empty".to_string()
        } else {
            format!("no recognized field labels in {} lines", rejected.len())
        };
        return ReplyParse::Unparseable(reason);
    }

    let mut missing: Vec<ReplyField> = ReplyField::ALL
        .into_iter()
        .filter(|field| !values.contains_key(field))
        .collect();

    let text = |field: ReplyField| {
        values
            .get(&field)
            .filter(|v| !is_blank(v))
            .map(|v| v.to_string())
    };
    let list = |field: ReplyField| {
        values
            .get(&field)
            .filter(|v| !is_blank(v))
            .map(|v| split_list(v))
            .unwrap_or_default()
    };

    let mut jobs = Vec::new();
    for (job_field, resp_field) in [
        (ReplyField::Job1, ReplyField::Responsibilities1),
        (ReplyField::Job2, ReplyField::Responsibilities2),
    ] {
        let Some(value) = values.get(&job_field) else {
            continue;
        };
        if is_blank(value) {
            continue;
        }
        match parse_job(value) {
            Some(mut job) => {
                job.responsibilities = list(resp_field);
                jobs.push(job);
            }
            None => missing.push(job_field),
        }
    }

    let record = ResumeRecord {
        name: text(ReplyField::Name),
        location: text(ReplyField::Location),
        nationality: text(ReplyField::Nationality),
        useful_links: list(ReplyField::UsefulLinks),
        jobs,
        education: values
            .get(&ReplyField::Education)
            .map(|v| split_education(v))
            .unwrap_or_default(),
        hard_skills: list(ReplyField::HardSkills),
        soft_skills: list(ReplyField::SoftSkills),
        tools: list(ReplyField::Tools),
        projects: list(ReplyField::Projects),
        other_info: text(ReplyField::OtherInfo),
    };

    missing.sort();
    if missing.is_empty() && rejected.is_empty() {
        ReplyParse::Parsed(record)
    } else {
        ReplyParse::PartiallyParsed {
            record,
            missing,
            rejected,
        }
    }
}

/// Models answer "None" as often as the requested "N/A".
fn is_blank(value: &str) -> bool {
    is_sentinel(value) || value.trim().eq_ignore_ascii_case("none")
}

/// `Label: value`, tolerating list bullets and markdown bold around the label.
fn split_labeled_line(line: &str) -> Option<(ReplyField, &str)> {
    let line = line.trim_start_matches(['-', '*', ' ']);
    let (label, value) = line.split_once(':')?;
    let field = ReplyField::from_label(label.trim().trim_end_matches('*').trim())?;
    Some((field, value.trim_start_matches('*').trim()))
}

/// `<organization>, <title>, <timeline>`, split from the right so the
/// organization may itself contain commas.
fn parse_job(value: &str) -> Option<JobEntry> {
    let mut parts = value.rsplitn(3, ',').map(str::trim);
    let timeline = parts.next()?;
    let title = parts.next()?;
    let organization = parts.next()?;
    if organization.is_empty() || title.is_empty() {
        return None;
    }
    let (start_date, end_date) = split_timeline(timeline);
    Some(JobEntry {
        organization: organization.to_string(),
        title: title.to_string(),
        start_date,
        end_date,
        responsibilities: Vec::new(),
    })
}

/// Education entries are `;`-separated since a single entry often has commas.
fn split_education(value: &str) -> Vec<String> {
    if is_blank(value) {
        return Vec::new();
    }
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

use serde::{Deserialize, Serialize};

/// Placeholder rendered wherever a resume field could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Jobs beyond this count are never extracted or rendered.
pub const MAX_JOBS: usize = 2;

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// A single position held by the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntry {
    #[serde(default = "not_available")]
    pub organization: String,
    #[serde(default = "not_available")]
    pub title: String,
    #[serde(default = "not_available")]
    pub start_date: String,
    #[serde(default = "not_available")]
    pub end_date: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

impl Default for JobEntry {
    fn default() -> Self {
        Self {
            organization: not_available(),
            title: not_available(),
            start_date: not_available(),
            end_date: not_available(),
            responsibilities: Vec::new(),
        }
    }
}

impl JobEntry {
    /// A job known only by its organization.
    pub fn at(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            ..Self::default()
        }
    }
}

/// The normalized output of the extraction pipeline.
///
/// Every field deserializes with a default, so a client posting back a partially
/// corrected record never fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub location: Option<String>,
    pub nationality: Option<String>,
    pub useful_links: Vec<String>,
    /// Most recent first.
    pub jobs: Vec<JobEntry>,
    pub education: Vec<String>,
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools: Vec<String>,
    pub projects: Vec<String>,
    pub other_info: Option<String>,
}

impl ResumeRecord {
    pub fn name_or_na(&self) -> &str {
        text_or_na(&self.name)
    }

    pub fn other_info_or_na(&self) -> &str {
        text_or_na(&self.other_info)
    }

    /// The job at `index`, or an all-sentinel entry when absent.
    pub fn job_or_default(&self, index: usize) -> JobEntry {
        self.jobs.get(index).cloned().unwrap_or_default()
    }

    /// Drops jobs past `MAX_JOBS` and blank list entries left by manual corrections.
    pub fn tidy(mut self) -> Self {
        self.jobs.truncate(MAX_JOBS);
        for list in [
            &mut self.useful_links,
            &mut self.education,
            &mut self.hard_skills,
            &mut self.soft_skills,
            &mut self.tools,
            &mut self.projects,
        ] {
            list.retain(|item| !item.trim().is_empty());
        }
        for field in [
            &mut self.name,
            &mut self.location,
            &mut self.nationality,
            &mut self.other_info,
        ] {
            if field.as_deref().is_some_and(is_sentinel) {
                *field = None;
            }
        }
        self
    }
}

/// True for empty strings and the `N/A` placeholder.
pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(NOT_AVAILABLE)
}

fn text_or_na(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !is_sentinel(v) => v,
        _ => NOT_AVAILABLE,
    }
}

/// Joins a list for rendering; an empty list renders as the sentinel.
pub fn join_or_na(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        not_available()
    } else {
        items.join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_deserializes_to_default_record() {
        let record: ResumeRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ResumeRecord::default());
        assert_eq!(record.name_or_na(), "N/A");
        assert_eq!(record.other_info_or_na(), "N/A");
    }

    #[test]
    fn test_partial_job_fills_sentinels() {
        let json = r#"{"jobs": [{"organization": "Acme Corp"}]}"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        let job = &record.jobs[0];
        assert_eq!(job.organization, "Acme Corp");
        assert_eq!(job.title, "N/A");
        assert_eq!(job.start_date, "N/A");
        assert_eq!(job.end_date, "N/A");
        assert!(job.responsibilities.is_empty());
    }

    #[test]
    fn test_job_or_default_out_of_range() {
        let record = ResumeRecord::default();
        assert_eq!(record.job_or_default(1), JobEntry::default());
    }

    #[test]
    fn test_tidy_truncates_jobs_and_blank_entries() {
        let record = ResumeRecord {
            name: Some(" n/a ".to_string()),
            jobs: vec![JobEntry::at("A"), JobEntry::at("B"), JobEntry::at("C")],
            education: vec!["BSc".to_string(), "  ".to_string()],
            ..ResumeRecord::default()
        }
        .tidy();
        assert_eq!(record.jobs.len(), 2);
        assert_eq!(record.education, vec!["BSc".to_string()]);
        assert_eq!(record.name, None);
    }

    #[test]
    fn test_join_or_na() {
        assert_eq!(join_or_na(&[], ", "), "N/A");
        assert_eq!(
            join_or_na(&["Rust".to_string(), "Go".to_string()], ", "),
            "Rust, Go"
        );
    }
}

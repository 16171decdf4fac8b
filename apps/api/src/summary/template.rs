use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::{is_sentinel, join_or_na, ResumeRecord, NOT_AVAILABLE};
use crate::summary::SummaryStrategy;

const CLOSING_SENTENCE: &str =
    "This diverse experience and educational background suggest a well-rounded and versatile professional.";

/// Deterministic phrase concatenation. No external calls; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSynthesizer;

impl TemplateSynthesizer {
    pub fn render(&self, record: &ResumeRecord) -> String {
        let name = record.name_or_na();
        let job = record.jobs.first();
        let organization = job
            .map(|j| j.organization.as_str())
            .filter(|org| !is_sentinel(org))
            .unwrap_or(NOT_AVAILABLE);

        let mut summary = format!("{name} has been associated with {organization}");
        if let Some(title) = job.map(|j| j.title.as_str()).filter(|t| !is_sentinel(t)) {
            summary.push_str(&format!(" as {title}"));
        }
        summary.push_str(". ");

        summary.push_str(&format!(
            "Their educational background includes {}. ",
            join_or_na(&record.education, "; ")
        ));
        if !record.hard_skills.is_empty() {
            summary.push_str(&format!(
                "Their skills include {}. ",
                record.hard_skills.join(", ")
            ));
        }
        if !record.tools.is_empty() {
            summary.push_str(&format!(
                "They are familiar with {}. ",
                record.tools.join(", ")
            ));
        }
        summary.push_str(CLOSING_SENTENCE);
        summary
    }
}

#[async_trait]
impl SummaryStrategy for TemplateSynthesizer {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn synthesize(&self, record: &ResumeRecord) -> Result<String, AppError> {
        Ok(self.render(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::JobEntry;

    fn record() -> ResumeRecord {
        ResumeRecord {
            name: Some("Jane Doe".to_string()),
            jobs: vec![JobEntry {
                title: "Staff Engineer".to_string(),
                ..JobEntry::at("Acme Corp")
            }],
            education: vec!["MSc CS, TU Berlin".to_string(), "BSc Math".to_string()],
            hard_skills: vec!["Rust".to_string(), "Go".to_string()],
            tools: vec!["Kubernetes".to_string()],
            ..ResumeRecord::default()
        }
    }

    #[test]
    fn test_golden_output() {
        assert_eq!(
            TemplateSynthesizer.render(&record()),
            "Jane Doe has been associated with Acme Corp as Staff Engineer. \
             Their educational background includes MSc CS, TU Berlin; BSc Math. \
             Their skills include Rust, Go. \
             They are familiar with Kubernetes. \
             This diverse experience and educational background suggest a well-rounded and versatile professional."
        );
    }

    #[test]
    fn test_empty_record_renders_sentinels() {
        assert_eq!(
            TemplateSynthesizer.render(&ResumeRecord::default()),
            "N/A has been associated with N/A. \
             Their educational background includes N/A. \
             This diverse experience and educational background suggest a well-rounded and versatile professional."
        );
    }

    #[test]
    fn test_unknown_title_is_omitted() {
        let record = ResumeRecord {
            jobs: vec![JobEntry::at("Globex")],
            ..ResumeRecord::default()
        };
        assert!(TemplateSynthesizer
            .render(&record)
            .starts_with("N/A has been associated with Globex. "));
    }

    #[tokio::test]
    async fn test_deterministic() {
        let record = record();
        let first = TemplateSynthesizer.synthesize(&record).await.unwrap();
        let second = TemplateSynthesizer.synthesize(&record.clone()).await.unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }
}

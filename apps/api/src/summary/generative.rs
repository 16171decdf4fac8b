use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::ASSISTANT_SYSTEM;
use crate::llm_client::{generate_with_deadline, GenerationRequest, TextGenerator};
use crate::models::resume::{join_or_na, JobEntry, ResumeRecord};
use crate::summary::prompts::{SUMMARY_MAX_TOKENS, SUMMARY_PROMPT_TEMPLATE, SUMMARY_TEMPERATURE};
use crate::summary::SummaryStrategy;

/// Delegates the summary to the text generation service.
///
/// Any service failure, including an empty reply, is a `GenerationFailed`;
/// a partial summary is never returned.
pub struct GenerativeSynthesizer {
    generator: Arc<dyn TextGenerator>,
    model: String,
    deadline: Duration,
}

impl GenerativeSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>, model: String, deadline: Duration) -> Self {
        Self {
            generator,
            model,
            deadline,
        }
    }
}

/// Builds the summary instruction block. Deterministic for a given record.
pub fn build_summary_prompt(record: &ResumeRecord) -> String {
    let job1 = record.job_or_default(0);
    let job2 = record.job_or_default(1);

    SUMMARY_PROMPT_TEMPLATE
        .replace("{name}", record.name_or_na())
        .replace("{job1}", &describe_job(&job1))
        .replace("{responsibilities1}", &join_or_na(&job1.responsibilities, ", "))
        .replace("{job2}", &describe_job(&job2))
        .replace("{responsibilities2}", &join_or_na(&job2.responsibilities, ", "))
        .replace("{education}", &join_or_na(&record.education, ", "))
        .replace("{hard_skills}", &join_or_na(&record.hard_skills, ", "))
        .replace("{soft_skills}", &join_or_na(&record.soft_skills, ", "))
        .replace("{tools}", &join_or_na(&record.tools, ", "))
        .replace("{projects}", &join_or_na(&record.projects, ", "))
        .replace("{other_info}", record.other_info_or_na())
}

fn describe_job(job: &JobEntry) -> String {
    format!(
        "{}, {}, {} - {}",
        job.organization, job.title, job.start_date, job.end_date
    )
}

#[async_trait]
impl SummaryStrategy for GenerativeSynthesizer {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn synthesize(&self, record: &ResumeRecord) -> Result<String, AppError> {
        let prompt = build_summary_prompt(record);
        let request = GenerationRequest {
            model: &self.model,
            system: ASSISTANT_SYSTEM,
            prompt: &prompt,
            max_tokens: SUMMARY_MAX_TOKENS,
            temperature: SUMMARY_TEMPERATURE,
        };
        let summary =
            generate_with_deadline(self.generator.as_ref(), &request, self.deadline).await?;
        info!(chars = summary.len(), "generative summary produced");
        Ok(summary)
    }
}

//! Extraction strategies: interchangeable producers of a `ResumeRecord`.
//!
//! `AppState` holds an `Arc<dyn ExtractionStrategy>` chosen at startup from
//! `EXTRACTION_STRATEGY`; handlers never know which one runs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::associator::{associate, OrgDenylist};
use crate::extraction::entities::EntityRecognizer;
use crate::extraction::normalizer::normalize;
use crate::extraction::prompts::{
    EXTRACTION_MAX_TOKENS, EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_TEMPERATURE,
};
use crate::extraction::reply::{parse_reply, ReplyField, ReplyParse};
use crate::llm_client::prompts::ASSISTANT_SYSTEM;
use crate::llm_client::{generate_with_deadline, GenerationRequest, TextGenerator};
use crate::models::resume::ResumeRecord;

/// Extracted record plus the fields that fell back to their sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub record: ResumeRecord,
    pub missing_fields: Vec<String>,
    pub strategy: &'static str,
}

#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, text: &str) -> Result<ExtractionReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Rule-based: entity recognition + year association + normalization
// ────────────────────────────────────────────────────────────────────────────

pub struct RuleBasedExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    denylist: OrgDenylist,
}

impl RuleBasedExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, denylist: OrgDenylist) -> Self {
        Self {
            recognizer,
            denylist,
        }
    }

    pub fn extract_record(&self, text: &str) -> ResumeRecord {
        let association = associate(text, self.recognizer.as_ref(), &self.denylist);
        normalize(association, text)
    }
}

#[async_trait]
impl ExtractionStrategy for RuleBasedExtractor {
    fn name(&self) -> &'static str {
        "rule"
    }

    async fn extract(&self, text: &str) -> Result<ExtractionReport, AppError> {
        let record = self.extract_record(text);

        let mut missing = Vec::new();
        if record.name.is_none() {
            missing.push(ReplyField::Name);
        }
        if record.jobs.is_empty() {
            missing.push(ReplyField::Job1);
        }
        if record.education.is_empty() {
            missing.push(ReplyField::Education);
        }
        info!(missing = missing.len(), "rule-based extraction finished");

        Ok(ExtractionReport {
            record,
            missing_fields: labels(&missing),
            strategy: self.name(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generative: one labeled-reply call + strict reply parser
// ────────────────────────────────────────────────────────────────────────────

pub struct GenerativeExtractor {
    generator: Arc<dyn TextGenerator>,
    model: String,
    deadline: Duration,
}

impl GenerativeExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, model: String, deadline: Duration) -> Self {
        Self {
            generator,
            model,
            deadline,
        }
    }
}

/// Fills the extraction prompt template with the resume text.
pub fn build_extraction_prompt(text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", text)
}

#[async_trait]
impl ExtractionStrategy for GenerativeExtractor {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn extract(&self, text: &str) -> Result<ExtractionReport, AppError> {
        let prompt = build_extraction_prompt(text);
        let request = GenerationRequest {
            model: &self.model,
            system: ASSISTANT_SYSTEM,
            prompt: &prompt,
            max_tokens: EXTRACTION_MAX_TOKENS,
            temperature: EXTRACTION_TEMPERATURE,
        };
        let reply =
            generate_with_deadline(self.generator.as_ref(), &request, self.deadline).await?;

        let parsed = parse_reply(&reply);
        match &parsed {
            ReplyParse::Parsed(_) => info!("extraction reply fully parsed"),
            ReplyParse::PartiallyParsed {
                missing, rejected, ..
            } => warn!(
                missing = %labels(missing).join(", "),
                rejected = rejected.len(),
                "extraction reply partially parsed"
            ),
            ReplyParse::Unparseable(reason) => {
                warn!("extraction reply unparseable: {reason}")
            }
        }

        let (record, missing) = parsed.into_parts();
        Ok(ExtractionReport {
            record,
            missing_fields: labels(&missing),
            strategy: self.name(),
        })
    }
}

fn labels(fields: &[ReplyField]) -> Vec<String> {
    fields.iter().map(|f| f.label().to_string()).collect()
}

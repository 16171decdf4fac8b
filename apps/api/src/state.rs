use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{Config, ExtractionMode, SummaryMode};
use crate::extraction::associator::OrgDenylist;
use crate::extraction::entities::HeuristicRecognizer;
use crate::extraction::strategy::{ExtractionStrategy, GenerativeExtractor, RuleBasedExtractor};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::summary::{GenerativeSynthesizer, SummaryStrategy, TemplateSynthesizer};

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every request runs its pipeline independently.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable extraction strategy. Default: rule-based. Swap via EXTRACTION_STRATEGY.
    pub extractor: Arc<dyn ExtractionStrategy>,
    /// Pluggable summary strategy. Default: template. Swap via SUMMARY_STRATEGY.
    pub summarizer: Arc<dyn SummaryStrategy>,
}

impl AppState {
    /// Wires the strategies selected in `config`. The LLM client is only built
    /// when a generative strategy needs it.
    pub fn from_config(config: Config) -> Result<Self> {
        let generator: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
            Some(key) => Some(Arc::new(
                LlmClient::new(key.clone(), &config.llm_base_url, config.llm_timeout)
                    .context("failed to build LLM client")?,
            )),
            None => None,
        };
        let require_generator = || {
            generator
                .clone()
                .context("a generative strategy requires ANTHROPIC_API_KEY")
        };

        let extractor: Arc<dyn ExtractionStrategy> = match config.extraction_strategy {
            ExtractionMode::Rule => Arc::new(RuleBasedExtractor::new(
                Arc::new(HeuristicRecognizer),
                OrgDenylist::new(config.org_denylist.iter().cloned()),
            )),
            ExtractionMode::Generative => Arc::new(GenerativeExtractor::new(
                require_generator()?,
                config.llm_model.clone(),
                config.generation_deadline,
            )),
        };

        let summarizer: Arc<dyn SummaryStrategy> = match config.summary_strategy {
            SummaryMode::Template => Arc::new(TemplateSynthesizer),
            SummaryMode::Generative => Arc::new(GenerativeSynthesizer::new(
                require_generator()?,
                config.llm_model.clone(),
                config.generation_deadline,
            )),
        };

        Ok(Self {
            config,
            extractor,
            summarizer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wiring() {
        let config = Config::from_lookup(|_| None).unwrap();
        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.extractor.name(), "rule");
        assert_eq!(state.summarizer.name(), "template");
    }

    #[test]
    fn test_generative_wiring() {
        let config = Config::from_lookup(|key| match key {
            "EXTRACTION_STRATEGY" | "SUMMARY_STRATEGY" => Some("generative".to_string()),
            "ANTHROPIC_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        })
        .unwrap();
        let state = AppState::from_config(config).unwrap();
        assert_eq!(state.extractor.name(), "generative");
        assert_eq!(state.summarizer.name(), "generative");
    }
}

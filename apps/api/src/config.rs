use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Default upload ceiling: 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Section headings the heuristic recognizer is known to tag as organizations.
pub const DEFAULT_ORG_DENYLIST: &[&str] = &[
    "SKILLS",
    "EDUCATION",
    "EXPERIENCE",
    "PROJECTS",
    "SUMMARY",
    "CONTACT",
    "TOOLS",
    "AWARDS",
    "CERTIFICATIONS",
    "REFERENCES",
    "LANGUAGES",
    "PROFILE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    Rule,
    Generative,
}

impl FromStr for ExtractionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rule" => Ok(ExtractionMode::Rule),
            "generative" => Ok(ExtractionMode::Generative),
            other => bail!("unknown extraction strategy '{other}' (expected rule|generative)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Template,
    Generative,
}

impl FromStr for SummaryMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(SummaryMode::Template),
            "generative" => Ok(SummaryMode::Generative),
            other => bail!("unknown summary strategy '{other}' (expected template|generative)"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a generative strategy is selected without an API key.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub extraction_strategy: ExtractionMode,
    pub summary_strategy: SummaryMode,
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub llm_base_url: String,
    /// Per-attempt HTTP timeout.
    pub llm_timeout: Duration,
    /// Bound on a whole generation call, retries included.
    pub generation_deadline: Duration,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub org_denylist: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let extraction_strategy: ExtractionMode = var("EXTRACTION_STRATEGY", "rule")
            .parse()
            .context("EXTRACTION_STRATEGY is invalid")?;
        let summary_strategy: SummaryMode = var("SUMMARY_STRATEGY", "template")
            .parse()
            .context("SUMMARY_STRATEGY is invalid")?;

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        let needs_llm = extraction_strategy == ExtractionMode::Generative
            || summary_strategy == SummaryMode::Generative;
        if needs_llm && anthropic_api_key.is_none() {
            bail!("Required environment variable 'ANTHROPIC_API_KEY' is not set (a generative strategy is selected)");
        }

        let org_denylist = match lookup("ORG_DENYLIST") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ORG_DENYLIST.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            extraction_strategy,
            summary_strategy,
            anthropic_api_key,
            llm_model: var("LLM_MODEL", DEFAULT_MODEL),
            llm_base_url: var("LLM_BASE_URL", DEFAULT_BASE_URL),
            llm_timeout: Duration::from_secs(
                var("LLM_TIMEOUT_SECS", "60")
                    .parse()
                    .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            ),
            generation_deadline: Duration::from_secs(
                var("GENERATION_DEADLINE_SECS", "120")
                    .parse()
                    .context("GENERATION_DEADLINE_SECS must be a number of seconds")?,
            ),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            max_upload_bytes: var("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            org_denylist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.extraction_strategy, ExtractionMode::Rule);
        assert_eq!(config.summary_strategy, SummaryMode::Template);
        assert_eq!(config.anthropic_api_key, None);
        assert_eq!(config.llm_model, DEFAULT_MODEL);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert!(config.org_denylist.contains(&"SKILLS".to_string()));
    }

    #[test]
    fn test_generative_requires_api_key() {
        let err = config_from(&[("SUMMARY_STRATEGY", "generative")]).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));

        let config = config_from(&[
            ("SUMMARY_STRATEGY", "Generative"),
            ("EXTRACTION_STRATEGY", "generative"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ])
        .unwrap();
        assert_eq!(config.summary_strategy, SummaryMode::Generative);
        assert_eq!(config.extraction_strategy, ExtractionMode::Generative);
    }

    #[test]
    fn test_custom_denylist() {
        let config = config_from(&[("ORG_DENYLIST", "SKILLS, TECHNICAL SKILLS,,")]).unwrap();
        assert_eq!(config.org_denylist, vec!["SKILLS", "TECHNICAL SKILLS"]);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("EXTRACTION_STRATEGY", "spacy")]).is_err());
        assert!(config_from(&[("LLM_TIMEOUT_SECS", "-1")]).is_err());
    }
}

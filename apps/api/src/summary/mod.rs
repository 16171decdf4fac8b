//! Summary Synthesizer: renders a `ResumeRecord` as a professional summary.
//!
//! Two interchangeable strategies behind `SummaryStrategy`, chosen at startup
//! from `SUMMARY_STRATEGY` and carried in `AppState` as `Arc<dyn SummaryStrategy>`.
//! Both take the same record regardless of which extraction strategy built it.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

pub mod generative;
pub mod prompts;
pub mod template;

pub use generative::GenerativeSynthesizer;
pub use template::TemplateSynthesizer;

#[async_trait]
pub trait SummaryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn synthesize(&self, record: &ResumeRecord) -> Result<String, AppError>;
}

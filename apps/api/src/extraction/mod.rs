// Resume information extraction.
// document → plain text → strategy (rule-based associator + normalizer, or a
// generative call + strict reply parser) → ResumeRecord.

pub mod associator;
pub mod document;
pub mod entities;
pub mod normalizer;
pub mod prompts;
pub mod reply;
pub mod strategy;

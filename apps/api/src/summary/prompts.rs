// Prompt constants for the generative summary strategy.

/// Summary prompt template.
/// Replace: {name}, {job1}, {responsibilities1}, {job2}, {responsibilities2},
///          {education}, {hard_skills}, {soft_skills}, {tools}, {projects}, {other_info}
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Generate a professional summary based on the following details:
Name: {name}
Most Recent Job: {job1}
Responsibilities: {responsibilities1}
Second Most Recent Job: {job2}
Responsibilities: {responsibilities2}
Education: {education}
Hard Skills: {hard_skills}
Soft Skills: {soft_skills}
Tools: {tools}
Projects: {projects}
Other Info: {other_info}";

pub const SUMMARY_MAX_TOKENS: u32 = 700;
pub const SUMMARY_TEMPERATURE: f32 = 0.5;

// Prompt constants for the generative extraction strategy.
// The output format must stay in sync with the labels in `reply::ReplyField`.

/// Resume extraction prompt. Replace `{resume_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are a resume parser. Extract the following information from the resume text:
1. The full name of the person.
2. Their current location and nationality.
3. Any useful links (LinkedIn, personal website, GitHub, etc.).
4. The two most recent jobs, including the organization, job title and timeline (start and end dates).
5. Their education details (schools, degrees, and dates if available).
6. A list of hard skills.
7. A list of soft skills.
8. Tools and technologies they are familiar with.
9. A list of their major projects.
10. Any other relevant details (certifications, awards, etc.).

Return the results in EXACTLY the following format, one field per line, with no other text.
Separate list items with ", ". Separate education entries with "; ".
Write N/A for anything the resume does not state.

Name: <person's name>
Location: <location>
Nationality: <nationality>
Useful Links: <useful links>
Job 1: <organization>, <job title>, <start date> - <end date>
Responsibilities 1: <list of responsibilities for job 1>
Job 2: <organization>, <job title>, <start date> - <end date>
Responsibilities 2: <list of responsibilities for job 2>
Education: <education details>
Hard Skills: <list of hard skills>
Soft Skills: <list of soft skills>
Tools: <list of tools>
Projects: <list of projects>
Other Relevant Info: <certifications, awards, etc.>

Resume Text: {resume_text}"#;

pub const EXTRACTION_MAX_TOKENS: u32 = 2000;
pub const EXTRACTION_TEMPERATURE: f32 = 0.5;

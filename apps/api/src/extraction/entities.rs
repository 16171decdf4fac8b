//! Entity recognition: finds person and organization mentions in resume text.
//!
//! `EntityRecognizer` is the seam where a statistical NER model plugs in.
//! `HeuristicRecognizer` is the default: regex rules over capitalization and
//! corporate/institutional suffixes. It is deliberately naive; a standalone
//! all-caps word such as a `SKILLS` heading comes back as an organization,
//! which is what the associator's denylist exists to absorb.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
}

/// A labeled span of the scanned text. `start`/`end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

pub trait EntityRecognizer: Send + Sync {
    /// Returns entities ordered by start offset, non-overlapping.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

const ORG_SUFFIXES: &[&str] = &[
    "Inc",
    "LLC",
    "LLP",
    "Ltd",
    "Limited",
    "Corp",
    "Corporation",
    "Company",
    "Co",
    "Group",
    "Holdings",
    "Technologies",
    "Labs",
    "Laboratories",
    "Partners",
    "Associates",
    "Bank",
    "Foundation",
    "Agency",
    "Institute",
    "University",
    "College",
    "Academy",
    "Hospital",
    "GmbH",
    "AG",
    "PLC",
    "Studios",
    "Ventures",
    "Capital",
    "Industries",
    "Enterprises",
    "Networks",
];

/// Words that end a person-name candidate.
const NAME_STOPWORDS: &[&str] = &[
    "Resume",
    "Curriculum",
    "Vitae",
    "Senior",
    "Junior",
    "Lead",
    "Principal",
    "Staff",
    "Software",
    "Engineer",
    "Developer",
    "Manager",
    "Director",
    "Analyst",
    "Consultant",
    "Designer",
    "Scientist",
    "Architect",
    "Intern",
    "Email",
    "Phone",
];

/// All-caps tokens that are titles, degrees or technologies rather than organizations.
const COMMON_ACRONYMS: &[&str] = &[
    "CEO", "CTO", "CFO", "COO", "VP", "HR", "PM", "QA", "BS", "BA", "MS", "MA", "MBA", "PHD",
    "BSC", "MSC", "GPA", "USA", "US", "UK", "EU", "API", "SQL", "AWS", "GCP", "CSS", "HTML",
    "JSON", "XML", "REST", "CI", "CD", "UI", "UX", "AI", "ML", "NLP", "IT", "PDF", "ETL", "SDK",
];

/// US state and Canadian province codes. These sit between an employer and
/// its dates on most job lines and must not be read as organizations.
const REGION_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY", "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
];

static ORG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let suffixes = ORG_SUFFIXES.join("|");
    Regex::new(&format!(
        r"(?:(?:\p{{Lu}}[\w'&.-]*|&)[ \t]+){{1,4}}(?:{suffixes})\b\.?(?:[ \t]+of(?:[ \t]+\p{{Lu}}[\w'.-]*)+)?|\b(?:University|Institute|College)[ \t]+of(?:[ \t]+(?:\p{{Lu}}[\w'.-]*|and|the))+"
    ))
    .expect("organization pattern is valid")
});

static ACRONYM_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2,8}(?:[ \t]+[A-Z]{2,8})*\b").expect("acronym pattern is valid")
});

static NAME_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\p{Lu}[\p{L}'’-]*\.?(?:[ \t]+\p{Lu}[\p{L}'’-]*\.?){1,3}")
        .expect("name pattern is valid")
});

/// Rule-based recognizer used when no NER model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRecognizer;

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut organizations = find_suffixed_organizations(text);
        organizations.extend(find_acronyms(text));
        let mut entities = drop_overlaps(organizations);

        let persons = find_persons(text)
            .into_iter()
            .filter(|p| !entities.iter().any(|o| overlaps(o, p)))
            .collect::<Vec<_>>();
        entities.extend(persons);
        entities.sort_by_key(|e| e.start);
        entities
    }
}

fn find_suffixed_organizations(text: &str) -> Vec<Entity> {
    ORG_PATTERN
        .find_iter(text)
        .map(|m| Entity {
            text: m.as_str().to_string(),
            label: EntityLabel::Organization,
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Standalone all-caps words. Runs of several caps words (a shouted name, a
/// multi-word heading) are skipped.
fn find_acronyms(text: &str) -> Vec<Entity> {
    ACRONYM_RUN
        .find_iter(text)
        .filter(|m| !m.as_str().contains([' ', '\t']))
        .filter(|m| !COMMON_ACRONYMS.contains(&m.as_str()))
        .filter(|m| !REGION_CODES.contains(&m.as_str()))
        .map(|m| Entity {
            text: m.as_str().to_string(),
            label: EntityLabel::Organization,
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

fn find_persons(text: &str) -> Vec<Entity> {
    let mut persons = Vec::new();
    for m in NAME_CANDIDATE.find_iter(text) {
        let candidate = m.as_str();
        let mut end = 0;
        let mut tokens = 0;
        for (offset, token) in token_offsets(candidate) {
            let bare = token.trim_end_matches('.');
            if is_stopword(bare) {
                break;
            }
            tokens += 1;
            end = offset + token.len();
        }
        if tokens >= 2 {
            persons.push(Entity {
                text: candidate[..end].to_string(),
                label: EntityLabel::Person,
                start: m.start(),
                end: m.start() + end,
            });
        }
    }
    persons
}

fn is_stopword(token: &str) -> bool {
    ORG_SUFFIXES.contains(&token)
        || NAME_STOPWORDS
            .iter()
            .any(|w| w.eq_ignore_ascii_case(token))
}

/// Whitespace-separated tokens with their byte offsets.
fn token_offsets(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.split([' ', '\t'])
        .scan(0usize, |pos, token| {
            let start = *pos;
            *pos += token.len() + 1;
            Some((start, token))
        })
        .filter(|(_, token)| !token.is_empty())
}

fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.start < b.end && b.start < a.end
}

/// Keeps the earliest-starting (then longest) entity of each overlapping cluster.
fn drop_overlaps(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut kept: Vec<Entity> = Vec::with_capacity(entities.len());
    for entity in entities {
        if kept.last().map_or(true, |last| !overlaps(last, &entity)) {
            kept.push(entity);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(text: &str, label: EntityLabel) -> Vec<String> {
        HeuristicRecognizer
            .recognize(text)
            .into_iter()
            .filter(|e| e.label == label)
            .map(|e| e.text)
            .collect()
    }

    #[test]
    fn test_suffixed_organizations() {
        let text = "Senior Engineer at Acme Corp from 2019\nGlobex Technologies Inc. 2015 - 2019";
        assert_eq!(
            labeled(text, EntityLabel::Organization),
            vec!["Acme Corp", "Globex Technologies Inc."]
        );
    }

    #[test]
    fn test_university_forms() {
        let text = "University of California, Berkeley\nMassachusetts Institute of Technology";
        assert_eq!(
            labeled(text, EntityLabel::Organization),
            vec![
                "University of California",
                "Massachusetts Institute of Technology"
            ]
        );
    }

    #[test]
    fn test_standalone_acronym_and_section_header() {
        let text = "IBM 2010\nSKILLS\nRust, SQL";
        assert_eq!(labeled(text, EntityLabel::Organization), vec!["IBM", "SKILLS"]);
    }

    #[test]
    fn test_caps_name_run_is_not_an_acronym() {
        let text = "JANE DOE\nIBM";
        assert_eq!(labeled(text, EntityLabel::Organization), vec!["IBM"]);
        assert_eq!(labeled(text, EntityLabel::Person), vec!["JANE DOE"]);
    }

    #[test]
    fn test_person_stops_at_title_words() {
        let text = "Jane Doe Software Engineer";
        assert_eq!(labeled(text, EntityLabel::Person), vec!["Jane Doe"]);
    }

    #[test]
    fn test_single_capitalized_word_is_not_a_person() {
        assert!(labeled("Resume", EntityLabel::Person).is_empty());
        assert!(labeled("Engineer Jane", EntityLabel::Person).is_empty());
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "Worked at Initech LLC until 2020";
        let entities = HeuristicRecognizer.recognize(text);
        let org = entities
            .iter()
            .find(|e| e.label == EntityLabel::Organization)
            .unwrap();
        assert_eq!(&text[org.start..org.end], "Initech LLC");
    }

    #[test]
    fn test_region_codes_are_not_organizations() {
        let text = "Staff Engineer, Acme Corp, San Francisco, CA, 2019 - Present\nToronto, ON";
        assert_eq!(labeled(text, EntityLabel::Organization), vec!["Acme Corp"]);
    }

    #[test]
    fn test_accented_names() {
        assert_eq!(labeled("José García", EntityLabel::Person), vec!["José García"]);
        assert_eq!(labeled("Zoë O'Neil", EntityLabel::Person), vec!["Zoë O'Neil"]);
    }

    #[test]
    fn test_accented_organization() {
        let text = "Analyst at Société Générale Group 2018";
        assert_eq!(
            labeled(text, EntityLabel::Organization),
            vec!["Société Générale Group"]
        );
    }

    #[test]
    fn test_plain_lowercase_text_has_no_entities() {
        assert!(HeuristicRecognizer
            .recognize("built data pipelines and mentored interns")
            .is_empty());
    }
}

//! Entity & Date Associator: pairs organization mentions with the first
//! plausible year that follows them, and picks the candidate's name off the
//! first line.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::entities::{EntityLabel, EntityRecognizer};

pub const MIN_YEAR: u16 = 1900;
pub const MAX_YEAR: u16 = 2100;

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year pattern is valid"));

/// An organization paired with the year found after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgDateMention {
    pub organization: String,
    pub year: u16,
}

impl OrgDateMention {
    pub fn new(organization: impl Into<String>, year: u16) -> Self {
        Self {
            organization: organization.into(),
            year,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Association {
    pub name: Option<String>,
    /// Document order.
    pub mentions: Vec<OrgDateMention>,
}

/// Strings that must never be treated as organizations, matched exactly after
/// trimming surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgDenylist(Vec<String>);

impl OrgDenylist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|entry| entry.into().trim().to_string())
                .collect(),
        )
    }

    pub fn contains(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        self.0.iter().any(|entry| entry == candidate)
    }
}

pub fn associate(
    text: &str,
    recognizer: &dyn EntityRecognizer,
    denylist: &OrgDenylist,
) -> Association {
    let association = Association {
        name: extract_name(text, recognizer),
        mentions: extract_org_mentions(text, recognizer, denylist),
    };
    debug!(
        has_name = association.name.is_some(),
        mentions = association.mentions.len(),
        "entities associated"
    );
    association
}

/// The first person entity on the first line of the text.
pub fn extract_name(text: &str, recognizer: &dyn EntityRecognizer) -> Option<String> {
    let first_line = text.split('\n').next().unwrap_or_default();
    recognizer
        .recognize(first_line)
        .into_iter()
        .find(|e| e.label == EntityLabel::Person)
        .map(|e| e.text)
}

/// Each organization is paired with the first plausible year between its end
/// and the start of the next organization. Organizations without one are dropped.
pub fn extract_org_mentions(
    text: &str,
    recognizer: &dyn EntityRecognizer,
    denylist: &OrgDenylist,
) -> Vec<OrgDateMention> {
    let organizations: Vec<_> = recognizer
        .recognize(text)
        .into_iter()
        .filter(|e| e.label == EntityLabel::Organization)
        .filter(|e| {
            let denied = denylist.contains(&e.text);
            if denied {
                debug!(entity = %e.text, "denylisted organization skipped");
            }
            !denied
        })
        .collect();

    organizations
        .iter()
        .enumerate()
        .filter_map(|(i, org)| {
            let window_end = organizations
                .get(i + 1)
                .map_or(text.len(), |next| next.start);
            let window = text.get(org.end..window_end).unwrap_or_default();
            first_plausible_year(window).map(|year| OrgDateMention::new(org.text.clone(), year))
        })
        .collect()
}

/// The first standalone four-digit token in `[MIN_YEAR, MAX_YEAR]`.
pub fn first_plausible_year(window: &str) -> Option<u16> {
    FOUR_DIGITS
        .find_iter(window)
        .filter_map(|m| m.as_str().parse::<u16>().ok())
        .find(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::entities::{Entity, HeuristicRecognizer};

    /// Tags every occurrence of the given strings, in order of appearance.
    struct FixedRecognizer {
        organizations: Vec<&'static str>,
        persons: Vec<&'static str>,
    }

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, text: &str) -> Vec<Entity> {
            let mut entities = Vec::new();
            for (needles, label) in [
                (&self.organizations, EntityLabel::Organization),
                (&self.persons, EntityLabel::Person),
            ] {
                for needle in needles {
                    for (start, matched) in text.match_indices(needle) {
                        entities.push(Entity {
                            text: matched.to_string(),
                            label,
                            start,
                            end: start + matched.len(),
                        });
                    }
                }
            }
            entities.sort_by_key(|e| e.start);
            entities
        }
    }

    fn orgs(organizations: Vec<&'static str>) -> FixedRecognizer {
        FixedRecognizer {
            organizations,
            persons: vec![],
        }
    }

    #[test]
    fn test_no_organizations_yields_no_mentions() {
        let text = "jane doe\nwrote software in 2020";
        let result = associate(text, &orgs(vec![]), &OrgDenylist::default());
        assert!(result.mentions.is_empty());
    }

    #[test]
    fn test_year_is_first_plausible_after_entity() {
        let text = "Acme Corp, employee #12345, 0042, 1850, 2017 - 2020";
        let mentions = extract_org_mentions(text, &orgs(vec!["Acme Corp"]), &OrgDenylist::default());
        assert_eq!(mentions, vec![OrgDateMention::new("Acme Corp", 2017)]);
    }

    #[test]
    fn test_year_before_entity_is_ignored() {
        let text = "2015 Acme Corp";
        let mentions = extract_org_mentions(text, &orgs(vec!["Acme Corp"]), &OrgDenylist::default());
        assert!(mentions.is_empty());
    }

    #[test]
    fn test_org_without_year_before_next_org_is_dropped() {
        let text = "Acme Corp, engineer\nGlobex Inc 2018 - 2021";
        let mentions = extract_org_mentions(
            text,
            &orgs(vec!["Acme Corp", "Globex Inc"]),
            &OrgDenylist::default(),
        );
        assert_eq!(mentions, vec![OrgDateMention::new("Globex Inc", 2018)]);
    }

    #[test]
    fn test_mentions_follow_document_order() {
        let text = "Initech 2012\nAcme Corp 2020\nGlobex 2016";
        let mentions = extract_org_mentions(
            text,
            &orgs(vec!["Acme Corp", "Globex", "Initech"]),
            &OrgDenylist::default(),
        );
        let names: Vec<_> = mentions.iter().map(|m| m.organization.as_str()).collect();
        assert_eq!(names, vec!["Initech", "Acme Corp", "Globex"]);
    }

    #[test]
    fn test_denylisted_entities_are_excluded() {
        let text = "Acme Corp\nSKILLS 2024\nRust";
        let denylist = OrgDenylist::new(["SKILLS"]);
        let mentions = extract_org_mentions(text, &orgs(vec!["Acme Corp", "SKILLS"]), &denylist);
        // The header no longer bounds Acme's window, so Acme picks up 2024.
        assert_eq!(mentions, vec![OrgDateMention::new("Acme Corp", 2024)]);
    }

    #[test]
    fn test_denylist_is_exact_match() {
        let denylist = OrgDenylist::new(["SKILLS"]);
        assert!(denylist.contains("SKILLS"));
        assert!(!denylist.contains("Skills"));
        assert!(!denylist.contains("SKILLS:"));
        assert!(denylist.contains(" SKILLS\t"));
        assert!(OrgDenylist::new([" PROJECTS "]).contains("PROJECTS"));
    }

    #[test]
    fn test_name_only_from_first_line() {
        let recognizer = FixedRecognizer {
            organizations: vec![],
            persons: vec!["Jane Doe", "John Roe"],
        };
        assert_eq!(
            extract_name("Jane Doe\nJohn Roe", &recognizer),
            Some("Jane Doe".to_string())
        );
        assert_eq!(extract_name("Curriculum\nJohn Roe", &recognizer), None);
        assert_eq!(extract_name("", &recognizer), None);
    }

    #[test]
    fn test_accented_name_on_first_line() {
        assert_eq!(
            extract_name("José García
Barcelona", &HeuristicRecognizer),
            Some("José García".to_string())
        );
        assert_eq!(
            extract_name("Zoë O'Neil", &HeuristicRecognizer),
            Some("Zoë O'Neil".to_string())
        );
    }

    #[test]
    fn test_region_code_does_not_steal_the_year() {
        let text = "Staff Engineer, Acme Corp, San Francisco, CA, 2019 - Present\n\
                    Software Engineer, Globex Technologies, Austin, TX, 2015 - 2019";
        let mentions = extract_org_mentions(text, &HeuristicRecognizer, &OrgDenylist::default());
        assert_eq!(
            mentions,
            vec![
                OrgDateMention::new("Acme Corp", 2019),
                OrgDateMention::new("Globex Technologies", 2015),
            ]
        );
    }

    #[test]
    fn test_first_plausible_year_bounds() {
        assert_eq!(first_plausible_year("1899 1900"), Some(1900));
        assert_eq!(first_plausible_year("2101 2100"), Some(2100));
        assert_eq!(first_plausible_year("20190 v2.2019"), Some(2019));
        assert_eq!(first_plausible_year("no digits"), None);
    }

    #[test]
    fn test_heuristic_recognizer_end_to_end() {
        let text = "Jane Doe\nSenior Engineer, Acme Corp, 2019 - Present\nEngineer, Globex Technologies, 2015 - 2019\nSKILLS\nRust";
        let result = associate(text, &HeuristicRecognizer, &OrgDenylist::new(["SKILLS"]));
        assert_eq!(result.name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            result.mentions,
            vec![
                OrgDateMention::new("Acme Corp", 2019),
                OrgDateMention::new("Globex Technologies", 2015),
            ]
        );
    }
}

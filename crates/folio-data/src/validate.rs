//! Id rules and uniqueness checks.
//!
//! Topic and article ids become element ids and fragment anchors in the
//! rendered page, so they share one namespace. Rendering never rejects a
//! document; these checks are advisory.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::Document;

/// Why an id breaks the naming rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,

    #[error("id must start with a letter")]
    FirstNotLetter,

    #[error("id must contain only letters and digits")]
    NotAlphanumeric,

    #[error("id must contain only ASCII letters and digits")]
    NotAscii,
}

/// Which kind of record an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScope {
    Topic,
    Article,
}

impl fmt::Display for IdScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic => f.write_str("topic"),
            Self::Article => f.write_str("article"),
        }
    }
}

/// A problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    InvalidId {
        scope: IdScope,
        id: String,
        error: IdError,
    },

    /// `id` is used more than once; `first` is where it appeared first
    DuplicateId {
        id: String,
        first: IdScope,
        duplicate: IdScope,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { scope, id, error } => {
                write!(f, "{} id {:?}: {}", scope, id, error)
            }
            Self::DuplicateId {
                id,
                first,
                duplicate,
            } => write!(
                f,
                "duplicate id {:?}: {} id already used by a {}",
                id, duplicate, first
            ),
        }
    }
}

fn ascii_id() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("valid id pattern"))
}

/// Check an id against the naming rule.
///
/// Rules are checked in order, so a non-ASCII letter id such as `абв` reports
/// [`IdError::NotAscii`] rather than [`IdError::FirstNotLetter`].
pub fn validate_id(id: &str) -> Result<(), IdError> {
    let Some(first) = id.chars().next() else {
        return Err(IdError::Empty);
    };

    if !first.is_alphabetic() {
        return Err(IdError::FirstNotLetter);
    }
    if !id.chars().all(char::is_alphanumeric) {
        return Err(IdError::NotAlphanumeric);
    }
    if !ascii_id().is_match(id) {
        return Err(IdError::NotAscii);
    }
    Ok(())
}

/// Collect every naming and uniqueness problem in a document.
pub fn validate_document(doc: &Document) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, IdScope> = HashMap::new();

    let ids = doc.topics.iter().flat_map(|topic| {
        std::iter::once((IdScope::Topic, topic.id.as_str())).chain(
            topic
                .sections
                .iter()
                .map(|article| (IdScope::Article, article.id.as_str())),
        )
    });

    for (scope, id) in ids {
        if let Err(error) = validate_id(id) {
            issues.push(ValidationIssue::InvalidId {
                scope,
                id: id.to_string(),
                error,
            });
        }

        if let Some(first) = seen.get(id) {
            issues.push(ValidationIssue::DuplicateId {
                id: id.to_string(),
                first: *first,
                duplicate: scope,
            });
        } else {
            seen.insert(id, scope);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;

    #[test]
    fn accepts_ascii_alphanumeric_ids() {
        assert_eq!(validate_id("basics"), Ok(()));
        assert_eq!(validate_id("print2"), Ok(()));
        assert_eq!(validate_id("X"), Ok(()));
    }

    #[test]
    fn rejects_ids_in_rule_order() {
        assert_eq!(validate_id(""), Err(IdError::Empty));
        assert_eq!(validate_id("2fast"), Err(IdError::FirstNotLetter));
        assert_eq!(validate_id("_x"), Err(IdError::FirstNotLetter));
        assert_eq!(validate_id("a-b"), Err(IdError::NotAlphanumeric));
        assert_eq!(validate_id("with space"), Err(IdError::NotAlphanumeric));
        assert_eq!(validate_id("абв"), Err(IdError::NotAscii));
        assert_eq!(validate_id("aб"), Err(IdError::NotAscii));
    }

    #[test]
    fn reports_duplicates_across_topics_and_articles() {
        let doc = parse_document(
            r#"[
              {"id": "intro", "name": "Intro", "sections": [
                {"id": "basics", "title": "Basics"},
                {"id": "intro", "title": "Clash"}
              ]},
              {"id": "more", "name": "More", "sections": [
                {"id": "basics", "title": "Again"}
              ]}
            ]"#,
        )
        .unwrap();

        let issues = validate_document(&doc);

        assert_eq!(
            issues,
            vec![
                ValidationIssue::DuplicateId {
                    id: "intro".to_string(),
                    first: IdScope::Topic,
                    duplicate: IdScope::Article,
                },
                ValidationIssue::DuplicateId {
                    id: "basics".to_string(),
                    first: IdScope::Article,
                    duplicate: IdScope::Article,
                },
            ]
        );
    }

    #[test]
    fn reports_bad_ids() {
        let doc = parse_document(r#"[{"id": "t-1", "name": "T", "sections": []}]"#).unwrap();

        let issues = validate_document(&doc);

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "topic id \"t-1\": id must contain only letters and digits"
        );
    }
}

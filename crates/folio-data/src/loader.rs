//! JSON data file loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Document;

/// Errors that can occur when loading a data file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

/// Parse a data document from JSON text.
///
/// Optional fields may be missing or `null`; missing required fields fail.
pub fn parse_document(source: &str) -> Result<Document, LoadError> {
    Ok(serde_json::from_str(source)?)
}

/// Read and parse a data file.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeblock::CodeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_document() {
        let source = r#"[
  {
    "id": "basics",
    "name": "Основы",
    "sections": [
      {
        "id": "print",
        "title": "print()",
        "explanation": "Prints values.",
        "parameters_title": "Arguments:",
        "parameters": [
          {"name": "sep", "description": "separator"},
          {"name": "end"}
        ],
        "code": [
          {"language": "python", "content": "print(1, 2)"},
          {"language": "output", "content": "1 2"}
        ]
      }
    ]
  }
]"#;

        let doc = parse_document(source).unwrap();

        assert_eq!(doc.topics.len(), 1);
        let topic = &doc.topics[0];
        assert_eq!(topic.name, "Основы");

        let article = &topic.sections[0];
        assert_eq!(article.parameters_heading("Параметры:"), "Arguments:");
        assert_eq!(article.parameters.len(), 2);
        assert_eq!(article.parameters[1].description(), None);
        assert_eq!(article.code[0].kind(), CodeKind::Source);
        assert_eq!(article.code[1].kind(), CodeKind::Output);
    }

    #[test]
    fn tolerates_missing_and_null_optionals() {
        let source = r#"[{"id": "t", "name": "T", "sections": [
            {"id": "a", "title": "A"},
            {"id": "b", "title": "B", "explanation": null, "parameters": null, "code": null}
        ]}]"#;

        let doc = parse_document(source).unwrap();
        for article in &doc.topics[0].sections {
            assert_eq!(article.explanation, "");
            assert!(article.parameters.is_empty());
            assert!(article.code.is_empty());
            assert!(article.parameters_title.is_none());
        }
    }

    #[test]
    fn missing_required_field_fails_with_position() {
        let source = "[\n  {\"name\": \"No id\", \"sections\": []}\n]";

        let err = parse_document(source).unwrap_err();

        match err {
            LoadError::Json { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("id"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_unreadable_file() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("nope.json");

        let err = load_document(&missing).unwrap_err();

        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn loads_from_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("data.json");
        fs::write(&path, r#"[{"id": "t", "name": "T", "sections": []}]"#).unwrap();

        let doc = load_document(&path).unwrap();

        assert_eq!(doc.topics[0].id, "t");
    }
}

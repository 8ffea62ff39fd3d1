//! Code sample classification.

use serde::{Deserialize, Serialize};

/// Language tag that marks a block as rendered output.
pub const OUTPUT_LANGUAGE: &str = "output";

/// How a code block is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Result of running the neighbouring samples; may carry markup
    Output,
    /// Source code, always shown as text
    Source,
}

impl CodeKind {
    /// Classify a language tag. Only `output` (any case) is special.
    pub fn from_language(language: &str) -> Self {
        if language.eq_ignore_ascii_case(OUTPUT_LANGUAGE) {
            Self::Output
        } else {
            Self::Source
        }
    }
}

/// One labeled code or output sample attached to an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag, e.g. `python` or `output`
    pub language: String,

    /// Raw sample text (markup for output blocks)
    pub content: String,
}

impl CodeBlock {
    pub fn new(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> CodeKind {
        CodeKind::from_language(&self.language)
    }

    /// Label shown above the sample.
    pub fn label(&self) -> String {
        match self.kind() {
            CodeKind::Output => "Output".to_string(),
            CodeKind::Source => self.language.to_uppercase(),
        }
    }

    /// Class of the box wrapping the sample.
    pub fn box_class(&self) -> &'static str {
        match self.kind() {
            CodeKind::Output => "result-box",
            CodeKind::Source => "code-box",
        }
    }

    /// Class of the inner `code` element.
    pub fn code_class(&self) -> String {
        match self.kind() {
            CodeKind::Output => "result-output".to_string(),
            CodeKind::Source => format!("code-block language-{}", self.language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_output_case_insensitively() {
        assert_eq!(CodeKind::from_language("output"), CodeKind::Output);
        assert_eq!(CodeKind::from_language("OUTPUT"), CodeKind::Output);
        assert_eq!(CodeKind::from_language("Output"), CodeKind::Output);
        assert_eq!(CodeKind::from_language("python"), CodeKind::Source);
        assert_eq!(CodeKind::from_language("outputs"), CodeKind::Source);
        assert_eq!(CodeKind::from_language(""), CodeKind::Source);
    }

    #[test]
    fn labels_and_classes() {
        let out = CodeBlock::new("output", "42");
        assert_eq!(out.label(), "Output");
        assert_eq!(out.box_class(), "result-box");
        assert_eq!(out.code_class(), "result-output");

        let py = CodeBlock::new("python", "print(1)");
        assert_eq!(py.label(), "PYTHON");
        assert_eq!(py.box_class(), "code-box");
        assert_eq!(py.code_class(), "code-block language-python");
    }
}

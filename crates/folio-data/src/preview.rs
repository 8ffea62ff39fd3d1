//! Plain-text framed preview of a single article, for terminals.

use crate::model::Article;

/// Width of the frame, borders included.
pub const FRAME_WIDTH: usize = 80;

/// Usable text width inside `║ ` and ` ║`.
const INNER: usize = FRAME_WIDTH - 4;

/// Heading shown above the parameter list in previews.
const PREVIEW_PARAMETERS_TITLE: &str = "Атрибуты:";

/// Render an article inside a box-drawn frame.
pub fn preview_article(article: &Article) -> String {
    let rule = |c: char| format!("║{}║", c.to_string().repeat(FRAME_WIDTH - 2));
    let blank = rule(' ');

    let mut lines = Vec::new();
    lines.push(format!("╔{}╗", "═".repeat(FRAME_WIDTH - 2)));
    lines.push(two_columns(
        &format!("║ {}", article.title),
        &format!("ID: {} ║", article.id),
    ));
    lines.push(rule('═'));

    if !article.explanation.is_empty() {
        for line in wrap_words(&article.explanation, INNER, "") {
            lines.push(framed(&line));
        }
        lines.push(blank.clone());
    }

    lines.push(framed(article.parameters_heading(PREVIEW_PARAMETERS_TITLE)));

    for param in &article.parameters {
        let line = format!("  • {}: {}", param.name, param.description().unwrap_or(""));
        if line.chars().count() > INNER {
            for wrapped in wrap_words(&line, INNER, "    ") {
                lines.push(framed(&wrapped));
            }
        } else {
            lines.push(framed(&line));
        }
    }
    if !article.parameters.is_empty() {
        lines.push(blank.clone());
    }

    for (i, block) in article.code.iter().enumerate() {
        let mut code_lines = block.content.split('\n');
        let first = code_lines.next().unwrap_or("");

        lines.push(rule('─'));
        lines.push(two_columns(
            &format!("║ {}", first),
            &format!("{} ║", block.language),
        ));
        for code_line in code_lines {
            lines.push(framed(code_line));
        }

        if i + 1 < article.code.len() {
            lines.push(blank.clone());
        }
    }

    lines.push(format!("╚{}╝", "═".repeat(FRAME_WIDTH - 2)));
    lines.join("\n")
}

fn framed(text: &str) -> String {
    format!("║ {:<width$} ║", text, width = INNER)
}

/// Left text padded so the right text ends at the frame edge.
fn two_columns(left: &str, right: &str) -> String {
    let width = FRAME_WIDTH.saturating_sub(right.chars().count());
    format!("{:<width$}{}", left, right, width = width)
}

/// Greedy word wrap. Continuation lines start with `indent`.
fn wrap_words(text: &str, width: usize, indent: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(indent);
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeblock::CodeBlock;
    use crate::model::Parameter;
    use pretty_assertions::assert_eq;

    fn article() -> Article {
        Article {
            id: "print".to_string(),
            title: "print()".to_string(),
            explanation: "Prints values.".to_string(),
            parameters_title: None,
            parameters: vec![Parameter::new("sep", Some("separator"))],
            code: vec![
                CodeBlock::new("python", "print(1)\nprint(2)"),
                CodeBlock::new("output", "1\n2"),
            ],
        }
    }

    #[test]
    fn every_line_is_frame_width() {
        let text = preview_article(&article());

        for line in text.lines() {
            assert_eq!(line.chars().count(), FRAME_WIDTH, "line: {line:?}");
        }
    }

    #[test]
    fn lays_out_sections() {
        let text = preview_article(&article());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[1].starts_with("║ print()"));
        assert!(lines[1].ends_with("ID: print ║"));
        assert!(lines[3].starts_with("║ Prints values."));
        assert!(text.contains("║ Атрибуты:"));
        assert!(text.contains("║   • sep: separator"));
        assert!(text.contains("║ print(1)"));
        assert!(lines.iter().any(|l| l.ends_with("python ║")));
        assert!(lines.iter().any(|l| l.ends_with("output ║")));
        assert_eq!(lines.last().unwrap().chars().next(), Some('╚'));
    }

    #[test]
    fn wraps_long_text() {
        let words = "word ".repeat(40);
        let lines = wrap_words(&words, 20, "    ");

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert!(lines[1].starts_with("    word"));
    }

    #[test]
    fn skips_empty_explanation() {
        let mut a = article();
        a.explanation.clear();
        a.parameters.clear();
        a.code.clear();

        let text = preview_article(&a);

        assert_eq!(text.lines().count(), 5);
    }
}

//! Stylesheet and runtime script for generated pages.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* folio default theme */

:root {
  --sidebar-width: 280px;
  --content-max-width: 860px;
  --background: #ffffff;
  --foreground: #1f2328;
  --muted: #f6f8fa;
  --muted-foreground: #59636e;
  --border: #d1d9e0;
  --accent: #eaeef2;
  --primary: #0969da;
  --code-background: #f6f8fa;
  --result-background: #f0f7f0;
  --radius: 0.375rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.site-header {
  display: flex;
  align-items: center;
  gap: 1.5rem;
  padding: 0.75rem 1.5rem;
  border-bottom: 1px solid var(--border);
}

.site-logo {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
}

.site-pages {
  display: flex;
  gap: 1rem;
}

.site-page {
  color: var(--muted-foreground);
  text-decoration: none;
}

.site-page.active {
  color: var(--primary);
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: 100vh;
}

/* Sidebar */
.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.accordion {
  margin-bottom: 0.25rem;
}

.accordion-header {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  width: 100%;
  padding: 0.5rem 0.75rem;
  border: none;
  border-radius: var(--radius);
  background: transparent;
  color: var(--foreground);
  font: inherit;
  font-weight: 600;
  text-align: left;
  cursor: pointer;
}

.accordion-header:hover {
  background: var(--accent);
}

.accordion-arrow {
  font-size: 0.75rem;
  color: var(--muted-foreground);
}

.accordion-content {
  display: flex;
  flex-direction: column;
  padding-left: 1.5rem;
}

.accordion-content[hidden] {
  display: none;
}

.nav-link {
  padding: 0.25rem 0.5rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-link:hover {
  background: var(--accent);
  color: var(--foreground);
}

/* Content */
.main {
  padding: 2rem;
  max-width: var(--content-max-width);
}

.content-section h2 {
  font-size: 1.75rem;
  margin: 1.5rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
}

.example-card {
  margin-bottom: 1.5rem;
  scroll-margin-top: 1rem;
}

.example-title {
  font-size: 1.25rem;
  margin-bottom: 0.5rem;
}

.example-description {
  margin-bottom: 0.75rem;
}

.attributes-info h4 {
  margin-bottom: 0.25rem;
}

.attributes-info ul {
  margin-left: 1.5rem;
  margin-bottom: 0.75rem;
}

.attributes-info code {
  font-family: var(--font-mono, ui-monospace, monospace);
  background: var(--code-background);
  padding: 0.1rem 0.3rem;
  border-radius: 0.25rem;
}

.code-demo {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
}

.code-box,
.result-box {
  border: 1px solid var(--border);
  border-radius: var(--radius);
  overflow: hidden;
}

.code-box {
  background: var(--code-background);
}

.result-box {
  background: var(--result-background);
}

.code-label {
  display: block;
  padding: 0.25rem 0.75rem;
  font-size: 0.75rem;
  font-weight: 600;
  color: var(--muted-foreground);
  border-bottom: 1px solid var(--border);
}

.code-box pre,
.result-box pre {
  padding: 0.75rem;
  overflow-x: auto;
  font-family: var(--font-mono, ui-monospace, monospace);
  font-size: 0.875rem;
}

.article-divider {
  margin-top: 1.5rem;
  border: none;
  border-top: 1px solid var(--border);
}

@media (max-width: 768px) {
  .layout {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: static;
    height: auto;
  }
}
"#;

const DEFAULT_JS: &str = r#"// folio runtime
(function() {
  'use strict';

  document.querySelectorAll('.accordion-header').forEach(function(button) {
    button.addEventListener('click', function() {
      const expanded = button.getAttribute('aria-expanded') === 'true';
      const content = button.nextElementSibling;

      button.setAttribute('aria-expanded', String(!expanded));
      if (content) {
        content.hidden = expanded;
      }

      const arrow = button.querySelector('.accordion-arrow');
      if (arrow) {
        arrow.textContent = expanded ? '▶' : '▼';
      }
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(".accordion-content[hidden]"));
        assert!(css.contains(".result-box"));
        assert!(css.contains(".code-box"));
    }

    #[test]
    fn js_mirrors_accordion_toggle() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains(".accordion-header"));
        assert!(js.contains("aria-expanded"));
        assert!(js.contains("nextElementSibling"));
        assert!(js.contains(crate::render::ARROW_COLLAPSED));
        assert!(js.contains(crate::render::ARROW_EXPANDED));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.accordion-header {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".accordion-header"));
    }

    #[test]
    fn default_css_minifies() {
        let minified = AssetPipeline::minify_css(&AssetPipeline::generate_css()).unwrap();
        assert!(minified.len() < DEFAULT_CSS.len());
    }
}

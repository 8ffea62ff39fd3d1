//! Page shell templates.

use minijinja::{context, Environment};

/// A link to another generated page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageLink {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Whether this is the page being rendered
    pub active: bool,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Serialized body markup
    pub body: String,
    /// Links to every page, for the header
    pub pages: Vec<PageLink>,
    /// Base URL
    pub base_url: String,
    /// Paths to extra CSS stylesheets to include
    pub styles: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            body => &context.body,
            pages => &context.pages,
            base_url => &context.base_url,
            styles => &context.styles,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title != site_title %}{{ title }} - {% endif %}{{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
  {% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  <header class="site-header">
    <a href="{{ base_url }}" class="site-logo">{{ site_title }}</a>
    {% if pages | length > 1 %}
    <nav class="site-pages">
    {% for page in pages %}
      <a href="{{ page.path }}" class="site-page{% if page.active %} active{% endif %}">{{ page.title }}</a>
    {% endfor %}
    </nav>
    {% endif %}
  </header>
  {% block body %}{% endblock %}
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
{{ body | safe }}
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context(body: &str, pages: Vec<PageLink>) -> Context {
        Context {
            title: "Python".to_string(),
            site_title: "My Docs".to_string(),
            body: body.to_string(),
            pages,
            base_url: "/".to_string(),
            styles: vec![],
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("page.html", &context("<main class=\"main\"></main>", vec![]))
            .unwrap();

        assert!(html.contains("<title>Python - My Docs</title>"));
        assert!(html.contains("<main class=\"main\"></main>"));
        assert!(html.contains("main.js"));
        assert!(!html.contains("site-pages"));
    }

    #[test]
    fn renders_page_links() {
        let engine = TemplateEngine::new();
        let pages = vec![
            PageLink {
                title: "My Docs".to_string(),
                path: "/".to_string(),
                active: false,
            },
            PageLink {
                title: "Python".to_string(),
                path: "/python/".to_string(),
                active: true,
            },
        ];

        let html = engine.render_page("page.html", &context("", pages)).unwrap();

        assert!(html.contains("site-pages"));
        assert!(html.contains("class=\"site-page active\">Python</a>"));
    }

    #[test]
    fn escapes_titles() {
        let engine = TemplateEngine::new();
        let mut ctx = context("", vec![]);
        ctx.title = "<script>".to_string();

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(!html.contains("<title><script>"));
    }
}

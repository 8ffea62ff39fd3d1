//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use folio_data::{parse_document, validate_document, Document};
use folio_dom::{Dom, DomError, ElementOptions, Selector};

use crate::assets::AssetPipeline;
use crate::render::{DocumentRenderer, Mounts, RenderOptions};
use crate::templates::{Context, PageLink, TemplateEngine};

/// Directory under the data dir that holds editor backups, never built.
const BACKUP_DIR: &str = "backups";

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// Where content and navigation are attached in the host page
    pub mounts: Mounts,

    /// Options passed to the document renderer
    pub render: RenderOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            styles: vec![],
            mounts: Mounts::default(),
            render: RenderOptions::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of articles rendered across all pages
    pub articles: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read data directory: {0}")]
    ReadError(String),

    #[error("Failed to load data: {path}: {message}")]
    LoadError { path: String, message: String },

    #[error("Failed to render page: {path}: {message}")]
    RenderError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("{first} and {second} both build {output}")]
    OutputConflict {
        output: String,
        first: String,
        second: String,
    },
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source file path
    source_path: PathBuf,

    /// Output path
    output_path: PathBuf,

    /// Page title
    title: String,

    /// Parsed document
    doc: Document,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: DocumentRenderer,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            renderer: DocumentRenderer::new(config.render.clone()),
            templates: TemplateEngine::new(),
            config,
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;
        let links = self.page_links(&pages);

        // Each page gets its own tree, so pages render in parallel
        let results: Vec<Result<usize, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &links))
            .collect();

        let mut total_articles = 0;
        for result in results {
            total_articles += result?;
        }

        self.generate_assets()?;
        self.generate_search_index(&pages)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            articles: total_articles,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover and load every data file.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();

        if !self.config.data_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Data directory not found: {}",
                self.config.data_dir.display()
            )));
        }

        let walker = WalkDir::new(&self.config.data_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == BACKUP_DIR))
            .filter_map(|e| e.ok());

        for entry in walker {
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let doc = parse_document(&content).map_err(|e| BuildError::LoadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            for issue in validate_document(&doc) {
                tracing::warn!("{}: {}", path.display(), issue);
            }

            let relative_path = path
                .strip_prefix(&self.config.data_dir)
                .unwrap_or(path)
                .to_path_buf();

            pages.push(PageInfo {
                source_path: path.to_path_buf(),
                output_path: self.calculate_output_path(&relative_path),
                title: self.page_title(&relative_path),
                doc,
            });
        }

        let mut outputs: HashMap<&Path, &Path> = HashMap::new();
        for page in &pages {
            if let Some(first) = outputs.insert(&page.output_path, &page.source_path) {
                return Err(BuildError::OutputConflict {
                    output: page.output_path.display().to_string(),
                    first: first.display().to_string(),
                    second: page.source_path.display().to_string(),
                });
            }
        }

        // Index pages first, then by path
        pages.sort_by(|a, b| {
            let a_key = (!is_index(&a.source_path), &a.output_path);
            let b_key = (!is_index(&b.source_path), &b.output_path);
            a_key.cmp(&b_key)
        });

        tracing::debug!("Discovered {} data files", pages.len());

        Ok(pages)
    }

    /// Calculate output path for a data file.
    fn calculate_output_path(&self, relative: &Path) -> PathBuf {
        let parent = relative.parent().unwrap_or(Path::new(""));

        if is_index(relative) {
            // docs/index.json -> dist/index.html
            self.config.output_dir.join(parent).join("index.html")
        } else {
            // docs/python.json -> dist/python/index.html
            let stem = relative
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("index");
            self.config
                .output_dir
                .join(parent)
                .join(stem)
                .join("index.html")
        }
    }

    fn page_title(&self, relative: &Path) -> String {
        if is_index(relative) {
            return self.config.title.clone();
        }
        relative
            .file_stem()
            .and_then(|s| s.to_str())
            .map(capitalize)
            .unwrap_or_else(|| self.config.title.clone())
    }

    /// Convert output path to URL.
    fn path_to_url(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.config.output_dir).unwrap_or(path);

        let url = relative
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();

        if url.is_empty() {
            self.config.base_url.clone()
        } else {
            format!("{}{}/", self.config.base_url, url)
        }
    }

    fn page_links(&self, pages: &[PageInfo]) -> Vec<PageLink> {
        pages
            .iter()
            .map(|page| PageLink {
                title: page.title.clone(),
                path: self.path_to_url(&page.output_path),
                active: false,
            })
            .collect()
    }

    /// Build a single page. Returns the number of articles rendered.
    fn build_page(&self, page: &PageInfo, links: &[PageLink]) -> Result<usize, BuildError> {
        let render_error = |e: DomError| BuildError::RenderError {
            path: page.source_path.display().to_string(),
            message: e.to_string(),
        };

        let mut dom = Dom::new();
        host_page(&mut dom, &self.config.mounts).map_err(render_error)?;
        self.renderer
            .render_page(&mut dom, &self.config.mounts, &page.doc)
            .map_err(render_error)?;

        let url = self.path_to_url(&page.output_path);
        let pages = links
            .iter()
            .map(|link| PageLink {
                active: link.path == url,
                ..link.clone()
            })
            .collect();

        let context = Context {
            title: page.title.clone(),
            site_title: self.config.title.clone(),
            body: dom.inner_html(dom.root()),
            pages,
            base_url: self.config.base_url.clone(),
            styles: self
                .config
                .styles
                .iter()
                .map(|s| {
                    let filename = Path::new(s)
                        .file_name()
                        .and_then(|f| f.to_str())
                        .unwrap_or("style.css");
                    format!("{}assets/{}", self.config.base_url, filename)
                })
                .collect(),
        };

        let html = self
            .templates
            .render_page("page.html", &context)
            .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))?;

        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&page.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!(
            "Built {} -> {}",
            page.source_path.display(),
            page.output_path.display()
        );

        Ok(page.doc.articles().count())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // Copy configured stylesheets
        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = source_path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                fs::write(assets_dir.join(filename), content)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }

    /// Generate search index with one entry per article.
    fn generate_search_index(&self, pages: &[PageInfo]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = pages
            .iter()
            .flat_map(|page| {
                let url = self.path_to_url(&page.output_path);
                page.doc
                    .articles()
                    .map(move |(topic, article)| {
                        serde_json::json!({
                            "title": article.title,
                            "topic": topic.name,
                            "url": format!("{}#{}", url, article.id),
                            "content": article.explanation,
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Build the host page skeleton the renderer mounts into.
///
/// `div.layout > aside.sidebar > nav#<sidebar>` and `div.layout > <main>`,
/// where the content container is built from the `main` selector's tag
/// (default `main`), id and classes, and always carries the `main` class.
pub fn host_page(dom: &mut Dom, mounts: &Mounts) -> Result<(), DomError> {
    let selector = Selector::parse(&mounts.main)
        .ok_or_else(|| DomError::InvalidSelector(mounts.main.clone()))?;

    let root = dom.root();
    let layout = dom.create_element(ElementOptions::new("div").class("layout").parent(root))?;
    let aside = dom.create_element(ElementOptions::new("aside").class("sidebar").parent(layout))?;
    dom.create_element(
        ElementOptions::new("nav")
            .attr("id", &mounts.sidebar)
            .parent(aside),
    )?;

    let mut classes = vec!["main"];
    classes.extend(
        selector
            .classes
            .iter()
            .map(String::as_str)
            .filter(|c| *c != "main"),
    );
    let mut content = ElementOptions::new(selector.tag.as_deref().unwrap_or("main"))
        .class(classes.join(" "))
        .parent(layout);
    if let Some(id) = &selector.id {
        content = content.attr("id", id);
    }
    dom.create_element(content)?;
    Ok(())
}

fn is_index(path: &Path) -> bool {
    path.file_stem().and_then(|s| s.to_str()) == Some("index")
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

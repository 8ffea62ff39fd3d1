//! Builds page content and the sidebar accordion from a data document.

use serde::Deserialize;

use folio_data::{Article, CodeBlock, CodeKind, Document, Topic, DEFAULT_PARAMETERS_TITLE};
use folio_dom::{Dom, DomError, ElementOptions, Event, EventKind, NodeId};

/// Arrow shown on a collapsed accordion header.
pub const ARROW_COLLAPSED: &str = "▶";

/// Arrow shown on an expanded accordion header.
pub const ARROW_EXPANDED: &str = "▼";

/// How the two markup sinks (topic headings and output samples) are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupPolicy {
    /// Insert as markup; the data file is trusted
    #[default]
    Trusted,
    /// Insert as escaped text
    Escape,
}

/// Options shared by every page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub markup: MarkupPolicy,

    /// Parameter list heading for articles that set none
    pub parameters_title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            markup: MarkupPolicy::Trusted,
            parameters_title: DEFAULT_PARAMETERS_TITLE.to_string(),
        }
    }
}

/// Where the renderer attaches its output in the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mounts {
    /// Selector of the content container
    pub main: String,

    /// Id of the sidebar container
    pub sidebar: String,
}

impl Default for Mounts {
    fn default() -> Self {
        Self {
            main: "main".to_string(),
            sidebar: "sidebar-nav".to_string(),
        }
    }
}

impl Mounts {
    /// Look up both mount points. Either may be missing.
    pub fn resolve(&self, dom: &Dom) -> (Option<NodeId>, Option<NodeId>) {
        (
            dom.query_selector(&self.main),
            dom.get_element_by_id(&self.sidebar),
        )
    }
}

/// Open/closed state of one accordion group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionState {
    Collapsed,
    Expanded,
}

impl AccordionState {
    /// Read the state from a header's `aria-expanded` attribute.
    pub fn of_header(dom: &Dom, header: NodeId) -> Self {
        if dom.is_expanded(header) {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Collapsed => ARROW_COLLAPSED,
            Self::Expanded => ARROW_EXPANDED,
        }
    }
}

/// Renders documents into a [`Dom`].
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
}

impl DocumentRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a full page: sidebar, accordion wiring, then main content.
    ///
    /// A missing mount point skips that half of the page.
    pub fn render_page(
        &self,
        dom: &mut Dom,
        mounts: &Mounts,
        doc: &Document,
    ) -> Result<(), DomError> {
        let (main, sidebar) = mounts.resolve(dom);

        if sidebar.is_none() {
            tracing::warn!("Sidebar mount #{} not found, skipping navigation", mounts.sidebar);
        }
        if main.is_none() {
            tracing::warn!("Content mount '{}' not found, skipping content", mounts.main);
        }

        self.render_sidebar(dom, sidebar, doc)?;
        let wired = wire_accordions(dom);
        tracing::debug!("Wired {} accordion headers", wired);
        self.render_main(dom, main, doc)
    }

    /// Render every topic and article into `container`. `None` is a no-op.
    pub fn render_main(
        &self,
        dom: &mut Dom,
        container: Option<NodeId>,
        doc: &Document,
    ) -> Result<(), DomError> {
        let Some(container) = container else {
            return Ok(());
        };

        for topic in &doc.topics {
            let section = self.render_topic(dom, container, topic)?;
            for article in &topic.sections {
                self.render_article(dom, section, article)?;
            }
        }
        Ok(())
    }

    fn render_topic(
        &self,
        dom: &mut Dom,
        container: NodeId,
        topic: &Topic,
    ) -> Result<NodeId, DomError> {
        let section = dom.create_element(
            ElementOptions::new("section")
                .class("content-section")
                .attr("id", &topic.id)
                .parent(container),
        )?;

        let heading = ElementOptions::new("h2").parent(section);
        dom.create_element(match self.options.markup {
            MarkupPolicy::Trusted => heading.html(&topic.name),
            MarkupPolicy::Escape => heading.content(&topic.name),
        })?;

        Ok(section)
    }

    fn render_article(
        &self,
        dom: &mut Dom,
        section: NodeId,
        data: &Article,
    ) -> Result<(), DomError> {
        let article = dom.create_element(
            ElementOptions::new("article")
                .class("example-card")
                .attr("id", &data.id)
                .parent(section),
        )?;

        dom.create_element(
            ElementOptions::new("h3")
                .class("example-title")
                .content(&data.title)
                .parent(article),
        )?;

        let content = dom.create_element(
            ElementOptions::new("div")
                .class("example-content")
                .parent(article),
        )?;

        dom.create_element(
            ElementOptions::new("p")
                .class("example-description")
                .content(&data.explanation)
                .parent(content),
        )?;

        if !data.parameters.is_empty() {
            self.render_parameters(dom, content, data)?;
        }

        if !data.code.is_empty() {
            let demo = dom.create_element(
                ElementOptions::new("div")
                    .class("code-demo")
                    .parent(article),
            )?;
            for block in &data.code {
                self.render_code_block(dom, demo, block)?;
            }
        }

        dom.create_element(
            ElementOptions::new("hr")
                .class("article-divider")
                .parent(article),
        )?;

        Ok(())
    }

    fn render_parameters(
        &self,
        dom: &mut Dom,
        content: NodeId,
        data: &Article,
    ) -> Result<(), DomError> {
        let info = dom.create_element(
            ElementOptions::new("div")
                .class("attributes-info")
                .parent(content),
        )?;

        let title = data.parameters_heading(&self.options.parameters_title);
        dom.create_element(ElementOptions::new("h4").content(title).parent(info))?;

        let list = dom.create_element(ElementOptions::new("ul").parent(info))?;

        for param in &data.parameters {
            let item = dom.create_element(ElementOptions::new("li").parent(list))?;
            dom.create_element(ElementOptions::new("code").content(&param.name).parent(item))?;
            if let Some(description) = param.description() {
                dom.append_text(item, &format!(" - {}", description));
            }
        }
        Ok(())
    }

    fn render_code_block(
        &self,
        dom: &mut Dom,
        demo: NodeId,
        block: &CodeBlock,
    ) -> Result<(), DomError> {
        let code_box = dom.create_element(
            ElementOptions::new("div")
                .class(block.box_class())
                .parent(demo),
        )?;

        dom.create_element(
            ElementOptions::new("span")
                .class("code-label")
                .content(block.label())
                .parent(code_box),
        )?;

        let pre = dom.create_element(ElementOptions::new("pre").parent(code_box))?;
        let code = ElementOptions::new("code")
            .class(block.code_class())
            .parent(pre);

        // Source samples are always text; only output may carry markup.
        dom.create_element(match (block.kind(), self.options.markup) {
            (CodeKind::Output, MarkupPolicy::Trusted) => code.html(&block.content),
            _ => code.content(&block.content),
        })?;

        Ok(())
    }

    /// Render one accordion group per topic into `container`. `None` is a no-op.
    pub fn render_sidebar(
        &self,
        dom: &mut Dom,
        container: Option<NodeId>,
        doc: &Document,
    ) -> Result<(), DomError> {
        let Some(container) = container else {
            return Ok(());
        };

        for topic in &doc.topics {
            let accordion = dom.create_element(
                ElementOptions::new("div")
                    .class("accordion")
                    .parent(container),
            )?;

            let header = dom.create_element(
                ElementOptions::new("button")
                    .class("accordion-header")
                    .attr("aria-expanded", "false")
                    .parent(accordion),
            )?;

            dom.create_element(
                ElementOptions::new("span")
                    .class("accordion-arrow")
                    .content(ARROW_COLLAPSED)
                    .parent(header),
            )?;

            dom.create_element(
                ElementOptions::new("span")
                    .class("accordion-title")
                    .content(&topic.name)
                    .parent(header),
            )?;

            let panel = dom.create_element(
                ElementOptions::new("div")
                    .class("accordion-content")
                    .parent(accordion),
            )?;
            dom.set_hidden(panel, true);

            for article in &topic.sections {
                dom.create_element(
                    ElementOptions::new("a")
                        .class("nav-link")
                        .attr("href", format!("#{}", article.id))
                        .content(&article.title)
                        .parent(panel),
                )?;
            }
        }
        Ok(())
    }
}

/// Attach the toggle listener to every accordion header in the document.
///
/// Returns the number of headers wired. Calling it twice wires twice.
pub fn wire_accordions(dom: &mut Dom) -> usize {
    let headers = dom.query_selector_all(".accordion-header");
    for header in &headers {
        dom.add_event_listener(*header, EventKind::Click, toggle_accordion);
    }
    headers.len()
}

fn toggle_accordion(dom: &mut Dom, event: &Event) {
    let header = event.current_target;
    let next = AccordionState::of_header(dom, header).toggle();

    dom.set_expanded(header, next.is_expanded());

    if let Some(panel) = dom.next_element_sibling(header) {
        dom.set_hidden(panel, !next.is_expanded());
    }
    if let Some(arrow) = dom.query_selector_in(header, ".accordion-arrow") {
        dom.set_text_content(arrow, next.arrow());
    }
}

//! Declarative element construction.

use crate::tree::{Dom, DomError, NodeId};

/// Options for [`Dom::create_element`].
///
/// Every field is optional. The defaults build a detached, empty `div`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementOptions {
    /// Node to append the new element to
    pub parent: Option<NodeId>,

    /// Element tag name
    pub tag: String,

    /// Value of the `class` attribute; empty means no class
    pub class_name: String,

    /// Plain text content, escaped on output
    pub content: String,

    /// Attributes applied after content, in order
    pub attributes: Vec<(String, String)>,

    /// Raw markup content; applied after `content`, so it wins when both are set
    pub html: String,
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            parent: None,
            tag: "div".to_string(),
            class_name: String::new(),
            content: String::new(),
            attributes: Vec::new(),
            html: String::new(),
        }
    }
}

impl ElementOptions {
    /// Options for an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

impl Dom {
    /// Build one element from `options` and return it.
    ///
    /// Class, text, markup and attributes are applied in that order. The node
    /// is appended to `options.parent` when the parent can hold children; the
    /// node is returned either way. Invalid tag or attribute names fail with
    /// [`DomError::InvalidName`].
    pub fn create_element(&mut self, options: ElementOptions) -> Result<NodeId, DomError> {
        let element = self.create(&options.tag)?;

        if !options.class_name.is_empty() {
            self.set_attribute(element, "class", &options.class_name)?;
        }
        if !options.content.is_empty() {
            self.set_text_content(element, &options.content);
        }
        if !options.html.is_empty() {
            self.set_inner_markup(element, &options.html);
        }

        for (name, value) in &options.attributes {
            self.set_attribute(element, name, value)?;
        }

        if let Some(parent) = options.parent {
            self.append_child(parent, element);
        }

        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeData;

    #[test]
    fn defaults_to_detached_div() {
        let mut dom = Dom::new();
        let node = dom.create_element(ElementOptions::default()).unwrap();

        assert_eq!(dom.tag(node), Some("div"));
        assert_eq!(dom.parent(node), None);
        assert!(dom.element(node).unwrap().attributes.is_empty());
        assert!(dom.children(node).is_empty());
    }

    #[test]
    fn applies_requested_tag_and_class() {
        let mut dom = Dom::new();
        let node = dom
            .create_element(ElementOptions::new("article").class("example-card"))
            .unwrap();

        assert_eq!(dom.tag(node), Some("article"));
        assert_eq!(dom.get_attribute(node, "class"), Some("example-card"));
    }

    #[test]
    fn empty_class_sets_no_attribute() {
        let mut dom = Dom::new();
        let node = dom.create_element(ElementOptions::new("ul").class("")).unwrap();

        assert_eq!(dom.get_attribute(node, "class"), None);
    }

    #[test]
    fn html_wins_over_content() {
        let mut dom = Dom::new();
        let node = dom
            .create_element(
                ElementOptions::new("p")
                    .content("plain")
                    .html("<b>bold</b>"),
            )
            .unwrap();

        let children = dom.children(node);
        assert_eq!(children.len(), 1);
        assert_eq!(
            dom.data(children[0]),
            &NodeData::Markup("<b>bold</b>".to_string())
        );
    }

    #[test]
    fn applies_every_attribute() {
        let mut dom = Dom::new();
        let node = dom
            .create_element(
                ElementOptions::new("a")
                    .attr("href", "#a1")
                    .attr("data-kind", "nav"),
            )
            .unwrap();

        assert_eq!(dom.get_attribute(node, "href"), Some("#a1"));
        assert_eq!(dom.get_attribute(node, "data-kind"), Some("nav"));
        assert_eq!(dom.element(node).unwrap().attributes.len(), 2);
    }

    #[test]
    fn class_attribute_overrides_class_name() {
        let mut dom = Dom::new();
        let node = dom
            .create_element(ElementOptions::new("div").class("a").attr("class", "b"))
            .unwrap();

        assert_eq!(dom.get_attribute(node, "class"), Some("b"));
    }

    #[test]
    fn attaches_to_parent_as_last_child() {
        let mut dom = Dom::new();
        let root = dom.root();
        let first = dom.create_element(ElementOptions::new("p").parent(root)).unwrap();
        let second = dom.create_element(ElementOptions::new("p").parent(root)).unwrap();

        assert_eq!(dom.children(root), &[first, second]);
    }

    #[test]
    fn returns_node_when_parent_cannot_attach() {
        let mut dom = Dom::new();
        let text = dom.create_text("leaf");
        let node = dom
            .create_element(ElementOptions::new("span").parent(text))
            .unwrap();

        assert_eq!(dom.parent(node), None);
        assert_eq!(dom.tag(node), Some("span"));
    }

    #[test]
    fn propagates_invalid_names() {
        let mut dom = Dom::new();
        assert!(dom.create_element(ElementOptions::new("no good")).is_err());
        assert!(dom
            .create_element(ElementOptions::new("div").attr("a b", "c"))
            .is_err());
    }
}

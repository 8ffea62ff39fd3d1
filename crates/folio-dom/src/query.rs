//! Element lookup by id and by simple compound selectors.

use crate::tree::{Dom, Element, NodeId};

/// A compound selector such as `button.accordion-header` or `nav#sidebar-nav`.
///
/// Combinators, attribute selectors and pseudo-classes are not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    /// Parse a compound selector. Returns `None` for an empty or unsupported one.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || input.contains(|c: char| c.is_whitespace() || "[]:>+~,".contains(c))
        {
            return None;
        }

        let mut selector = Selector::default();
        let mut rest = input;

        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            let tag = &rest[..tag_end];
            if tag != "*" {
                selector.tag = Some(tag.to_ascii_lowercase());
            }
        }
        rest = &rest[tag_end..];

        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }

            match marker {
                b'#' => selector.id = Some(name.to_string()),
                _ => selector.classes.push(name.to_string()),
            }
            rest = &body[end..];
        }

        Some(selector)
    }

    /// Whether an element satisfies every part of the selector.
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|class| element.classes().any(|c| c == class.as_str()))
    }
}

impl Dom {
    /// First element connected to the document whose `id` matches.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|node| self.get_attribute(*node, "id") == Some(id))
    }

    /// First element in the document matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_in(self.root(), selector)
    }

    /// Every element in the document matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_selector_all_in(self.root(), selector)
    }

    /// First descendant of `scope` (excluding `scope`) matching `selector`.
    pub fn query_selector_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        self.query_selector_all_in(scope, selector).into_iter().next()
    }

    /// Every descendant of `scope` (excluding `scope`) matching `selector`.
    pub fn query_selector_all_in(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };

        self.descendants(scope)
            .into_iter()
            .skip(1)
            .filter(|node| {
                self.element(*node)
                    .map(|el| selector.matches(el))
                    .unwrap_or(false)
            })
            .collect()
    }
}

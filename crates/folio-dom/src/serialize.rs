//! HTML serialization.

use crate::tree::{Dom, NodeData, NodeId};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Dom {
    /// Serialize a node and its descendants.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Serialize the descendants of a node.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match self.data(node) {
            NodeData::Document => {
                for child in self.children(node) {
                    self.write_node(*child, out);
                }
            }
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Markup(markup) => out.push_str(markup),
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }

                for child in self.children(node) {
                    self.write_node(*child, out);
                }

                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

/// Escape text for use between tags.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ElementOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_nested_elements() {
        let mut dom = Dom::new();
        let root = dom.root();
        let ul = dom.create_element(ElementOptions::new("ul").parent(root)).unwrap();
        let li = dom.create_element(ElementOptions::new("li").parent(ul)).unwrap();
        dom.create_element(ElementOptions::new("code").content("x").parent(li))
            .unwrap();
        dom.append_text(li, " - the x");

        assert_eq!(
            dom.outer_html(ul),
            "<ul><li><code>x</code> - the x</li></ul>"
        );
        assert_eq!(dom.inner_html(root), dom.outer_html(ul));
    }

    #[test]
    fn escapes_text_but_not_markup() {
        let mut dom = Dom::new();
        let p = dom
            .create_element(ElementOptions::new("p").content("a < b && c"))
            .unwrap();
        assert_eq!(dom.outer_html(p), "<p>a &lt; b &amp;&amp; c</p>");

        dom.set_inner_markup(p, "<em>42</em>");
        assert_eq!(dom.outer_html(p), "<p><em>42</em></p>");
    }

    #[test]
    fn escapes_attributes_and_skips_void_close() {
        let mut dom = Dom::new();
        let hr = dom
            .create_element(ElementOptions::new("hr").attr("title", "say \"hi\""))
            .unwrap();
        assert_eq!(dom.outer_html(hr), "<hr title=\"say &quot;hi&quot;\">");

        let div = dom.create_element(ElementOptions::default()).unwrap();
        dom.set_hidden(div, true);
        assert_eq!(dom.outer_html(div), "<div hidden=\"\"></div>");
    }
}

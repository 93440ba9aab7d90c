//! A tiny typed markup tree.
//!
//! Fragments are built as values and serialized once; text and attribute
//! values are always escaped on the way out, so nothing coming from a record
//! can inject markup.

/// Elements that never have children or a closing tag.
const VOID_TAGS: [&str; 4] = ["input", "img", "br", "hr"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Boolean attribute such as `required`, rendered without a value.
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on { self.attr(name, "") } else { self }
    }

    pub fn maybe_attr(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn maybe_child(self, node: Option<impl Into<Node>>) -> Self {
        match node {
            Some(node) => self.child(node),
            None => self,
        }
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for the first element matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let Node::Element(element) = self else {
            return None;
        };
        if predicate(element) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find(predicate))
    }

    /// The form control (`input` or `textarea`) carrying `name`.
    pub fn control(&self, name: &str) -> Option<&Element> {
        self.find(&|element| {
            matches!(element.tag, "input" | "textarea") && element.get_attr("name") == Some(name)
        })
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|element| element.tag == tag)
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` with their HTML entities.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_escaping() {
        let node: Node = Element::new("div")
            .class("form-group")
            .child(
                Element::new("input")
                    .attr("name", "title")
                    .attr("value", "\"><script>alert(1)</script>")
                    .flag("required", true),
            )
            .text("Tom & Jerry's")
            .into();

        assert_eq!(
            node.to_html(),
            "<div class=\"form-group\"><input name=\"title\" \
             value=\"&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;\" required>\
             Tom &amp; Jerry&#39;s</div>"
        );
    }

    #[test]
    fn finds_controls_by_name() {
        let node: Node = Element::new("div")
            .child(Element::new("label").text("Answer"))
            .child(Element::new("textarea").attr("name", "answer").text("42"))
            .into();

        let control = node.control("answer").unwrap();
        assert_eq!(control.tag, "textarea");
        assert_eq!(node.text_content(), "Answer42");
        assert!(node.control("question").is_none());
    }
}

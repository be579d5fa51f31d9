//! Minimal render tree handed to the host renderer.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::style::ClassList;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: ClassList,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attribute such as `required` or `hidden`, present only when set.
    pub fn flag(self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled { self.attr(name, "") } else { self }
    }

    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.classes.add(name);
        self
    }

    pub fn classes(mut self, classes: ClassList) -> Self {
        self.classes = self.classes.extend(classes);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn child_opt(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::Text(value.into()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn class_list(&self) -> &ClassList {
        &self.classes
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attribute("id") == Some(id) {
            return Some(self);
        }
        self.element_children()
            .find_map(|element| element.find_by_id(id))
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_tag(tag, &mut found);
        found
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for element in self.element_children() {
            element.collect_by_tag(tag, found);
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => out.push_str(&element.text_content()),
            }
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.to_string()));
        }
        for (name, value) in &self.attributes {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
        }
        out.push('>');
        if is_void(&self.tag) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Element(element) => element.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img")
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

//! d3-style selections over an emulated document.

use crate::Result;
use indexmap::IndexMap;
use std::fmt;
use svgsnap_dom::{Document, NodeId, Selector};

/// An attribute or style value: a string, or a number formatted the way JavaScript prints it.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Num(f64),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => {
                let mut buf = ryu_js::Buffer::new();
                f.write_str(buf.format(*n))
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

macro_rules! attr_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Num(value as f64)
                }
            }
        )*
    };
}

attr_value_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// An ordered set of elements in one document.
///
/// Mutators apply to every element and return `&Self` so calls chain; structural operations
/// (`append`, `select`) return a new selection. Every operation on an empty selection is a
/// no-op, which is how a working root whose selector matched nothing behaves.
#[derive(Clone)]
pub struct Selection {
    document: Document,
    nodes: Vec<NodeId>,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl Selection {
    pub(crate) fn new(document: Document, nodes: Vec<NodeId>) -> Self {
        Self { document, nodes }
    }

    pub(crate) fn empty(document: Document) -> Self {
        Self::new(document, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lower-cased tag name of the first element.
    pub fn node_name(&self) -> Option<String> {
        self.nodes.first().and_then(|id| self.document.node_name(*id))
    }

    /// Appends a new `name` element to every element and selects the new children.
    pub fn append(&self, name: &str) -> Selection {
        let nodes = self
            .nodes
            .iter()
            .filter_map(|parent| self.document.append_element(*parent, name))
            .collect();
        Selection::new(self.document.clone(), nodes)
    }

    pub fn attr(&self, name: &str, value: impl Into<AttrValue>) -> &Self {
        let value = value.into().to_string();
        for id in &self.nodes {
            self.document.set_attribute(*id, name, &value);
        }
        self
    }

    /// Attribute value of the first element.
    pub fn attr_value(&self, name: &str) -> Option<String> {
        self.document.attribute(*self.nodes.first()?, name)
    }

    pub fn remove_attr(&self, name: &str) -> &Self {
        for id in &self.nodes {
            self.document.remove_attribute(*id, name);
        }
        self
    }

    /// Sets one inline style property, keeping the others in place.
    pub fn style(&self, name: &str, value: impl Into<AttrValue>) -> &Self {
        let value = value.into().to_string();
        for id in &self.nodes {
            let current = self.document.attribute(*id, "style").unwrap_or_default();
            let mut props = parse_style(&current);
            props.insert(name.trim().to_string(), value.clone());
            self.document
                .set_attribute(*id, "style", &serialize_style(&props));
        }
        self
    }

    /// Inline style property of the first element.
    pub fn style_value(&self, name: &str) -> Option<String> {
        let style = self.attr_value("style")?;
        parse_style(&style).shift_remove(name.trim())
    }

    /// Adds (`on == true`) or removes whitespace-separated class names.
    pub fn classed(&self, names: &str, on: bool) -> &Self {
        for id in &self.nodes {
            let current = self.document.attribute(*id, "class").unwrap_or_default();
            let mut classes: Vec<&str> = current.split_ascii_whitespace().collect();
            for name in names.split_ascii_whitespace() {
                let present = classes.contains(&name);
                if on && !present {
                    classes.push(name);
                } else if !on && present {
                    classes.retain(|c| *c != name);
                }
            }
            self.document.set_attribute(*id, "class", &classes.join(" "));
        }
        self
    }

    /// Replaces the children of every element with a single text node.
    pub fn text(&self, content: impl Into<AttrValue>) -> &Self {
        let content = content.into().to_string();
        for id in &self.nodes {
            self.document.set_text_content(*id, &content);
        }
        self
    }

    /// Text content of the first element.
    pub fn text_content(&self) -> Option<String> {
        self.nodes.first().map(|id| self.document.text_content(*id))
    }

    /// For every element, its first descendant matching `selector`.
    pub fn select(&self, selector: &str) -> Result<Selection> {
        let selector = Selector::parse(selector)?;
        let nodes = self
            .nodes
            .iter()
            .filter_map(|id| self.document.select_first(*id, &selector))
            .collect();
        Ok(Selection::new(self.document.clone(), nodes))
    }

    /// Every descendant matching `selector`, grouped by element in document order.
    pub fn select_all(&self, selector: &str) -> Result<Selection> {
        let selector = Selector::parse(selector)?;
        let mut nodes: Vec<NodeId> = Vec::new();
        for id in &self.nodes {
            for found in self.document.select_all(*id, &selector) {
                if !nodes.contains(&found) {
                    nodes.push(found);
                }
            }
        }
        Ok(Selection::new(self.document.clone(), nodes))
    }

    /// Detaches every element from its parent.
    pub fn remove(&self) -> &Self {
        for id in &self.nodes {
            self.document.detach(*id);
        }
        self
    }

    /// Serialized markup of the first element, or an empty string.
    pub fn outer_html(&self) -> String {
        self.nodes
            .first()
            .map(|id| self.document.outer_html(*id))
            .unwrap_or_default()
    }

    pub(crate) fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }
}

fn parse_style(style: &str) -> IndexMap<String, String> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            (!name.is_empty() && !value.is_empty()).then(|| (name.to_string(), value.to_string()))
        })
        .collect()
}

fn serialize_style(props: &IndexMap<String, String>) -> String {
    props
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

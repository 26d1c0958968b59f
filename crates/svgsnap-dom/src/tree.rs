use crate::Result;
use crate::selector::Selector;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, QualName};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";
const SVG_NS: &str = "http://www.w3.org/2000/svg";
const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";

/// Index of a node inside its owning [`Document`].
///
/// Detached nodes stay in the tree as orphans, so an id stays valid for the whole lifetime of
/// the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(ego_tree::NodeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Html,
    Svg,
    MathMl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Doctype,
    Element,
    Text,
    Comment,
    ProcessingInstruction,
}

/// A shared, single-threaded handle to an in-memory document.
///
/// Cloning the handle is cheap and every clone addresses the same tree. Each operation borrows
/// the tree only for its own duration.
#[derive(Clone)]
pub struct Document {
    html: Rc<RefCell<Html>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.html.borrow().tree.root().descendants().count())
            .finish()
    }
}

impl Document {
    /// A blank document: `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        Self::from_html(Html::parse_document(""))
    }

    /// Parses markup as a full HTML document. Parsing never fails; missing `html`, `head` and
    /// `body` elements are implied and malformed markup is recovered the way browsers do.
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        tracing::debug!(
            markup_len = markup.len(),
            nodes = html.tree.root().descendants().count(),
            "parsed document markup"
        );
        Self::from_html(html)
    }

    fn from_html(html: Html) -> Self {
        Self {
            html: Rc::new(RefCell::new(html)),
        }
    }

    /// Returns true when both handles address the same tree.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.html, &other.html)
    }

    /// The document node itself.
    pub fn root(&self) -> NodeId {
        NodeId(self.html.borrow().tree.root().id())
    }

    pub fn document_element(&self) -> Option<NodeId> {
        let html = self.html.borrow();
        let found = html
            .tree
            .root()
            .children()
            .find(|node| node.value().is_element())
            .map(|node| NodeId(node.id()));
        found
    }

    pub fn head(&self) -> Option<NodeId> {
        self.html_child_named("head")
    }

    pub fn body(&self) -> Option<NodeId> {
        self.html_child_named("body")
    }

    fn html_child_named(&self, name: &str) -> Option<NodeId> {
        let root = self.document_element()?;
        let html = self.html.borrow();
        let found = html.tree.get(root.0)?.children().find_map(|child| {
            let el = child.value().as_element()?;
            (&*el.name.ns == HTML_NS && &*el.name.local == name).then(|| NodeId(child.id()))
        });
        found
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        let html = self.html.borrow();
        let kind = match html.tree.get(id.0)?.value() {
            Node::Document | Node::Fragment => NodeKind::Document,
            Node::Doctype(_) => NodeKind::Doctype,
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::Comment(_) => NodeKind::Comment,
            Node::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
        };
        Some(kind)
    }

    /// Local name of an element as stored: lower-case for created elements, adjusted case for
    /// parsed SVG elements.
    pub fn node_name(&self, id: NodeId) -> Option<String> {
        self.with_element(id, |el| el.name.local.to_string())
    }

    pub fn namespace(&self, id: NodeId) -> Option<Namespace> {
        self.with_element(id, |el| match &*el.name.ns {
            SVG_NS => Namespace::Svg,
            MATHML_NS => Namespace::MathMl,
            _ => Namespace::Html,
        })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let html = self.html.borrow();
        let parent = html.tree.get(id.0)?.parent().map(|p| NodeId(p.id()));
        parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let html = self.html.borrow();
        let children = html
            .tree
            .get(id.0)
            .map(|node| node.children().map(|c| NodeId(c.id())).collect())
            .unwrap_or_default();
        children
    }

    /// Creates a new element as the last child of `parent`.
    ///
    /// The name is lower-cased, as element creation in an HTML document does. The element is in
    /// the SVG namespace when it is an `svg` or when its parent is an SVG element other than
    /// `foreignObject`. Returns `None` when `parent` is neither an element nor the document node.
    pub fn append_element(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let mut html = self.html.borrow_mut();
        let inherits_svg = match html.tree.get(parent.0)?.value() {
            Node::Element(el) => {
                &*el.name.ns == SVG_NS && !(*el.name.local).eq_ignore_ascii_case("foreignobject")
            }
            Node::Document | Node::Fragment => false,
            _ => return None,
        };
        let local = name.to_ascii_lowercase();
        let ns = if local == "svg" || inherits_svg {
            SVG_NS
        } else {
            HTML_NS
        };
        let qual = QualName::new(None, ns.into(), LocalName::from(local));
        let mut parent = html.tree.get_mut(parent.0)?;
        let child = parent.append(Node::Element(Element::new(qual, Vec::new())));
        Some(NodeId(child.id()))
    }

    /// Sets an attribute. Names are lower-cased on HTML elements and kept as-is elsewhere.
    /// Re-setting an attribute keeps its position.
    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) {
        self.update_attributes(id, |el, attrs| {
            let name = attribute_name(el, name);
            match attrs.iter_mut().find(|(k, _)| *k == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => attrs.push((name, value.to_string())),
            }
        });
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.with_element(id, |el| {
            el.attr(&attribute_name(el, name)).map(str::to_string)
        })
        .flatten()
    }

    /// Attributes of an element in document order.
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.with_element(id, attribute_list).unwrap_or_default()
    }

    pub fn remove_attribute(&self, id: NodeId, name: &str) {
        self.update_attributes(id, |el, attrs| {
            let name = attribute_name(el, name);
            attrs.retain(|(k, _)| *k != name);
        });
    }

    /// Replaces all children of an element with a single text node (none when `text` is empty).
    pub fn set_text_content(&self, id: NodeId, text: &str) {
        let mut html = self.html.borrow_mut();
        let Some(node) = html.tree.get(id.0) else {
            return;
        };
        if !node.value().is_element() {
            return;
        }
        let children: Vec<_> = node.children().map(|c| c.id()).collect();
        for child in children {
            if let Some(mut child) = html.tree.get_mut(child) {
                child.detach();
            }
        }
        if !text.is_empty() {
            if let Some(mut node) = html.tree.get_mut(id.0) {
                node.append(Node::Text(Text {
                    text: StrTendril::from(text),
                }));
            }
        }
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let html = self.html.borrow();
        let Some(node) = html.tree.get(id.0) else {
            return String::new();
        };
        let text = match node.value() {
            Node::Comment(comment) => comment.comment.to_string(),
            _ => node
                .descendants()
                .filter_map(|n| n.value().as_text())
                .map(|t| &**t)
                .collect(),
        };
        text
    }

    /// Removes a node from its parent. The node and its subtree stay addressable.
    pub fn detach(&self, id: NodeId) {
        if let Some(mut node) = self.html.borrow_mut().tree.get_mut(id.0) {
            node.detach();
        }
    }

    /// First element under `scope` (excluding `scope`) matching `selector`, in document order.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_first(scope, &selector))
    }

    /// Every element under `scope` (excluding `scope`) matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all(scope, &selector))
    }

    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        let html = self.html.borrow();
        let found = html
            .tree
            .get(scope.0)?
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| selector.matches(el))
            .map(|el| NodeId(el.id()));
        found
    }

    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let html = self.html.borrow();
        let Some(scope) = html.tree.get(scope.0) else {
            return Vec::new();
        };
        let found = scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| selector.matches(el))
            .map(|el| NodeId(el.id()))
            .collect();
        found
    }

    /// First element under `scope` (excluding `scope`) with the local name `name`.
    pub fn first_descendant_named(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        let html = self.html.borrow();
        let found = html
            .tree
            .get(scope.0)?
            .descendants()
            .skip(1)
            .find(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|el| &*el.name.local == name)
            })
            .map(|node| NodeId(node.id()));
        found
    }

    /// Returns true when the node is an element matching `selector`.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let html = self.html.borrow();
        let matched = html
            .tree
            .get(id.0)
            .and_then(ElementRef::wrap)
            .is_some_and(|el| selector.matches(&el));
        matched
    }

    /// Serialized markup of an element including the element itself (`outerHTML`). Empty for
    /// other nodes.
    pub fn outer_html(&self, id: NodeId) -> String {
        let html = self.html.borrow();
        let markup = html
            .tree
            .get(id.0)
            .and_then(ElementRef::wrap)
            .map(|el| el.html())
            .unwrap_or_default();
        markup
    }

    /// Serialized markup of an element's children (`innerHTML`). The document node serializes
    /// as the whole document.
    pub fn inner_html(&self, id: NodeId) -> String {
        if id == self.root() {
            return self.serialize();
        }
        let html = self.html.borrow();
        let markup = html
            .tree
            .get(id.0)
            .and_then(ElementRef::wrap)
            .map(|el| el.inner_html())
            .unwrap_or_default();
        markup
    }

    /// Serializes the whole document, doctype included when present.
    pub fn serialize(&self) -> String {
        self.html.borrow().html()
    }

    fn with_element<R>(&self, id: NodeId, f: impl FnOnce(&Element) -> R) -> Option<R> {
        let html = self.html.borrow();
        let result = html.tree.get(id.0)?.value().as_element().map(f);
        result
    }

    /// Elements keep their attributes behind a read-only API, so updates rebuild the element
    /// with the edited list.
    fn update_attributes(
        &self,
        id: NodeId,
        edit: impl FnOnce(&Element, &mut Vec<(String, String)>),
    ) {
        let mut html = self.html.borrow_mut();
        let Some(mut node) = html.tree.get_mut(id.0) else {
            return;
        };
        let Node::Element(el) = node.value() else {
            return;
        };
        let mut attrs = attribute_list(el);
        edit(el, &mut attrs);
        let attrs = attrs
            .into_iter()
            .map(|(name, value)| Attribute {
                name: QualName::new(None, "".into(), LocalName::from(name)),
                value: StrTendril::from(value),
            })
            .collect();
        *el = Element::new(el.name.clone(), attrs);
    }
}

fn attribute_name(el: &Element, name: &str) -> String {
    if &*el.name.ns == HTML_NS {
        name.to_ascii_lowercase()
    } else {
        name.to_string()
    }
}

fn attribute_list(el: &Element) -> Vec<(String, String)> {
    el.attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

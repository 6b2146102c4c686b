//! In-memory document model used as the rendering surface
//!
//! A small arena-backed element tree standing in for the page the host
//! supplies. It covers what the renderers and the controller need: building
//! elements, replacing a container's children, per-element data attributes,
//! `closest`-style ancestor lookup and visibility. Markup (the host page or
//! a show summary) is imported through `scraper`, and any subtree can be
//! serialized back to HTML for the host to display.
//!
//! Imported markup is inert: `script` and `style` elements are skipped and
//! `on*` event handler attributes are dropped.

use scraper::{ElementRef, Html};

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element tree rooted at a document node
///
/// Nodes removed by [`Document::empty`] are freed and their slots are reused
/// by later `create_*` calls, so an id of a removed node must not be used
/// again.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<usize>,
}

/// Elements never imported from markup
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose HTML serialization has no closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            free: Vec::new(),
        }
    }

    /// Build a document from page markup
    ///
    /// # Example
    /// ```
    /// use tvmaze_core::Document;
    /// let doc = Document::parse(r#"<ul id="episodesList"><li>Pilot</li></ul>"#);
    /// let list = doc.find_by_id("episodesList").unwrap();
    /// assert_eq!(doc.text_content(list), "Pilot");
    /// ```
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = Self::new();
        let root = doc.root();
        if let Some(html_element) = doc.import_element(parsed.root_element()) {
            doc.append_child(root, html_element);
        }
        doc
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        })
    }

    /// Create a detached element with a `class` attribute
    pub fn create_element_with_class(&mut self, tag: &str, class: &str) -> NodeId {
        let id = self.create_element(tag);
        self.set_attr(id, "class", class);
        id
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Parse an HTML fragment and append the resulting nodes to `parent`
    pub fn append_markup(&mut self, parent: NodeId, markup: &str) {
        let fragment = Html::parse_fragment(markup);
        for child in fragment.root_element().children() {
            if let Some(element) = ElementRef::wrap(child) {
                if let Some(id) = self.import_element(element) {
                    self.append_child(parent, id);
                }
            } else if let Some(text) = child.value().as_text() {
                let id = self.create_text(text);
                self.append_child(parent, id);
            }
        }
    }

    /// Remove every child of `id` and free their subtrees
    pub fn empty(&mut self, id: NodeId) {
        let mut stack = std::mem::take(&mut self.nodes[id.0].children);
        while let Some(node) = stack.pop() {
            let slot = &mut self.nodes[node.0];
            stack.append(&mut slot.children);
            slot.parent = None;
            slot.kind = NodeKind::Text(String::new());
            self.free.push(node.0);
        }
    }

    /// Number of live nodes, the document node included
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Children of a node, in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Child elements of a node, skipping text
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.tag(child).is_some())
            .collect()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Tag name of an element, `None` for text and the document node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Set an attribute on an element; ignored for non-elements
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id.0].kind {
            match attrs.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id.0].kind {
            attrs.retain(|(key, _)| key != name);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// `data-*` attribute lookup (`data(id, "show-id")` reads `data-show-id`)
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attr(id, &format!("data-{key}"))
    }

    /// Nearest inclusive ancestor carrying `class`
    pub fn closest(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.ancestors(id).find(|&node| self.has_class(node, class))
    }

    /// Whether `id` is `container` or one of its descendants
    pub fn is_within(&self, id: NodeId, container: NodeId) -> bool {
        self.ancestors(id).any(|node| node == container)
    }

    /// First element in the tree with the given `id` attribute
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&node| self.attr(node, "id") == Some(element_id))
    }

    /// Elements below `scope` (excluding it) carrying `class`, in document order
    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| node != scope && self.has_class(node, class))
            .collect()
    }

    /// Concatenated text of a subtree with runs of whitespace collapsed
    pub fn text_content(&self, id: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(id, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Current value of a form field
    pub fn value(&self, id: NodeId) -> &str {
        self.attr(id, "value").unwrap_or_default()
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        self.set_attr(id, "value", value);
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if hidden {
            self.set_attr(id, "hidden", "");
        } else {
            self.remove_attr(id, "hidden");
        }
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.attr(id, "hidden").is_some()
    }

    /// Serialize a node and its subtree to HTML
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// Serialize only the children of a node
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), |&node| self.parent(node))
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            _ => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    fn import_element(&mut self, source: ElementRef<'_>) -> Option<NodeId> {
        let tag = source.value().name();
        if SKIPPED_ELEMENTS.contains(&tag) {
            return None;
        }

        let id = self.create_element(tag);
        for (name, value) in source.value().attrs() {
            if !is_event_handler(name) {
                self.set_attr(id, name, value);
            }
        }
        for child in source.children() {
            if let Some(element) = ElementRef::wrap(child) {
                if let Some(child_id) = self.import_element(element) {
                    self.append_child(id, child_id);
                }
            } else if let Some(text) = child.value().as_text() {
                let child_id = self.create_text(text);
                self.append_child(id, child_id);
            }
        }
        Some(id)
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Document => {
                for &child in self.children(id) {
                    self.write_html(child, out);
                }
            }
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape(value, true));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for &child in self.children(id) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn is_event_handler(attribute: &str) -> bool {
    attribute
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

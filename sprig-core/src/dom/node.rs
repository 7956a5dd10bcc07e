//! DOM Nodes
//!
//! A [`Node`] is a shared handle to one node of a live tree. Cloning the
//! handle never copies the node; two handles are the same node exactly when
//! [`Node::ptr_eq`] says so.
//!
//! # Ownership
//!
//! Parents own their children. The parent link is weak, so a subtree stays
//! alive as long as its root is held somewhere (by a parent or by the
//! caller) and is freed, together with the effects parked on it, once the
//! last handle goes away.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::error;

use super::element::{self, PropertyKind};
use super::event::{Event, Listener};
use super::value::Value;
use crate::error::{DomError, Result};
use crate::reactive::Effect;

/// Most elements keep one or two effects alive (children render plus at
/// most a few reactive slots).
const TYPICAL_EFFECT_COUNT: usize = 2;

/// The kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Fragment,
}

struct ElementData {
    /// Lower-case tag name.
    local_name: String,
    attributes: RefCell<IndexMap<String, String>>,
    /// Values of non-reflected properties (`value`, `checked`, ...).
    state: RefCell<IndexMap<String, Value>>,
    listeners: RefCell<Vec<(String, Listener)>>,
}

enum NodeKind {
    Element(ElementData),
    Text(RefCell<String>),
    Fragment,
}

struct NodeData {
    kind: NodeKind,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<Node>>,
    effects: RefCell<SmallVec<[Effect; TYPICAL_EFFECT_COUNT]>>,
}

/// Handle to a node in a live tree.
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

/// Non-owning handle to a node.
#[derive(Clone, Default)]
pub struct WeakNode(Weak<NodeData>);

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }
}

impl Node {
    fn from_kind(kind: NodeKind) -> Self {
        Node(Rc::new(NodeData {
            kind,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            effects: RefCell::new(SmallVec::new()),
        }))
    }

    /// Create a detached element. The tag is lower-cased.
    pub fn element(tag: &str) -> Self {
        Self::from_kind(NodeKind::Element(ElementData {
            local_name: tag.to_ascii_lowercase(),
            attributes: RefCell::new(IndexMap::new()),
            state: RefCell::new(IndexMap::new()),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    /// Create a detached text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Text(RefCell::new(data.into())))
    }

    /// Create an empty document fragment.
    pub fn fragment() -> Self {
        Self::from_kind(NodeKind::Fragment)
    }

    // ------------------------------------------------------------------------
    // Identity and kind
    // ------------------------------------------------------------------------

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    pub fn node_type(&self) -> NodeType {
        match self.0.kind {
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Fragment => NodeType::Fragment,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    pub fn is_fragment(&self) -> bool {
        self.node_type() == NodeType::Fragment
    }

    /// Lower-case tag name of an element.
    pub fn local_name(&self) -> Option<&str> {
        self.element_data().map(|el| el.local_name.as_str())
    }

    /// Upper-case tag name of an element, as browsers report it.
    pub fn tag_name(&self) -> Option<String> {
        self.local_name().map(str::to_ascii_uppercase)
    }

    pub fn node_name(&self) -> String {
        match &self.0.kind {
            NodeKind::Element(el) => el.local_name.to_ascii_uppercase(),
            NodeKind::Text(_) => "#text".to_string(),
            NodeKind::Fragment => "#document-fragment".to_string(),
        }
    }

    fn element_data(&self) -> Option<&ElementData> {
        match &self.0.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    /// Character data of a text node.
    pub fn data(&self) -> Option<String> {
        match &self.0.kind {
            NodeKind::Text(data) => Some(data.borrow().clone()),
            _ => None,
        }
    }

    /// Replace the character data of a text node. No-op for other kinds.
    pub fn set_data(&self, value: &str) {
        if let NodeKind::Text(data) = &self.0.kind {
            *data.borrow_mut() = value.to_string();
        }
    }

    /// Concatenated data of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.0.kind {
            NodeKind::Text(data) => out.push_str(&data.borrow()),
            _ => {
                for child in self.0.children.borrow().iter() {
                    child.collect_text(out);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------------

    pub fn parent_node(&self) -> Option<Node> {
        self.0.parent.borrow().upgrade().map(Node)
    }

    pub fn child_nodes(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    pub fn child(&self, index: usize) -> Option<Node> {
        self.0.children.borrow().get(index).cloned()
    }

    pub fn first_child(&self) -> Option<Node> {
        self.child(0)
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// Whether `other` is this node or one of its descendants.
    pub fn contains(&self, other: &Node) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(node) = cursor {
            if node.ptr_eq(self) {
                return true;
            }
            cursor = node.parent_node();
        }
        false
    }

    fn is_child_of(&self, parent: &Node) -> bool {
        self.parent_node().is_some_and(|p| p.ptr_eq(parent))
    }

    fn set_parent(&self, parent: Option<&Node>) {
        *self.0.parent.borrow_mut() = parent.map_or_else(Weak::new, |p| Rc::downgrade(&p.0));
    }

    /// Remove this node from its current parent, if any.
    fn detach(&self) {
        if let Some(parent) = self.parent_node() {
            parent.0.children.borrow_mut().retain(|c| !c.ptr_eq(self));
        }
        self.set_parent(None);
    }

    fn hierarchy_error(&self, child: &Node) -> DomError {
        DomError::HierarchyRequest {
            parent: self.node_name(),
            child: child.node_name(),
        }
    }

    fn not_found(&self, child: &Node) -> DomError {
        DomError::NotFound {
            parent: self.node_name(),
            child: child.node_name(),
        }
    }

    /// Check that `node` may be inserted under `self`.
    fn ensure_insertable(&self, node: &Node) -> Result<()> {
        if self.is_text() || node.contains(self) {
            return Err(self.hierarchy_error(node));
        }
        Ok(())
    }

    /// The nodes actually inserted for `node`: a fragment's children, or the
    /// node itself.
    fn expand(node: &Node) -> Vec<Node> {
        if node.is_fragment() {
            node.child_nodes()
        } else {
            vec![node.clone()]
        }
    }

    /// Append `child`, moving it out of its previous parent.
    ///
    /// Appending a fragment moves the fragment's children instead.
    pub fn append_child(&self, child: &Node) -> Result<Node> {
        self.ensure_insertable(child)?;
        for node in Self::expand(child) {
            node.detach();
            node.set_parent(Some(self));
            self.0.children.borrow_mut().push(node);
        }
        Ok(child.clone())
    }

    /// Replace all children with `nodes`, in order.
    ///
    /// Fragments are expanded into their children. A node listed more than
    /// once ends up at its last position. On error the tree is unchanged.
    pub fn replace_children<I>(&self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = Node>,
    {
        let nodes: Vec<Node> = nodes.into_iter().collect();
        for node in &nodes {
            self.ensure_insertable(node)?;
        }

        let mut incoming: Vec<Node> = Vec::with_capacity(nodes.len());
        for node in nodes.iter().flat_map(Self::expand).rev() {
            if !incoming.iter().any(|seen| seen.ptr_eq(&node)) {
                incoming.push(node);
            }
        }
        incoming.reverse();

        for node in &incoming {
            if !node.is_child_of(self) {
                node.detach();
            }
        }

        let previous = self.0.children.replace(incoming.clone());
        for old in &previous {
            old.set_parent(None);
        }
        for node in &incoming {
            node.set_parent(Some(self));
        }
        // Children that were not re-inserted drop here, outside any borrow.
        drop(previous);
        Ok(())
    }

    /// Replace the child `old` with `new`, returning `old`.
    pub fn replace_child(&self, new: &Node, old: &Node) -> Result<Node> {
        if !old.is_child_of(self) {
            return Err(self.not_found(old));
        }
        self.ensure_insertable(new)?;
        if new.ptr_eq(old) {
            return Ok(old.clone());
        }

        let incoming = Self::expand(new);
        for node in &incoming {
            node.detach();
        }

        let index = self
            .0
            .children
            .borrow()
            .iter()
            .position(|c| c.ptr_eq(old))
            .ok_or_else(|| self.not_found(old))?;

        let removed: Vec<Node> = self
            .0
            .children
            .borrow_mut()
            .splice(index..=index, incoming.iter().cloned())
            .collect();
        for node in &incoming {
            node.set_parent(Some(self));
        }
        old.set_parent(None);
        drop(removed);
        Ok(old.clone())
    }

    /// Remove `child`, returning it.
    pub fn remove_child(&self, child: &Node) -> Result<Node> {
        if !child.is_child_of(self) {
            return Err(self.not_found(child));
        }
        child.detach();
        Ok(child.clone())
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    /// Set an attribute. No-op on non-elements.
    pub fn set_attribute(&self, name: &str, value: &str) {
        if let Some(el) = self.element_data() {
            el.attributes
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element_data()
            .and_then(|el| el.attributes.borrow().get(name).cloned())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.element_data()
            .is_some_and(|el| el.attributes.borrow().contains_key(name))
    }

    pub fn remove_attribute(&self, name: &str) {
        if let Some(el) = self.element_data() {
            el.attributes.borrow_mut().shift_remove(name);
        }
    }

    /// Attributes in the order they were first set.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.element_data()
            .map(|el| {
                el.attributes
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    fn property_kind(&self, name: &str) -> Option<PropertyKind> {
        self.local_name().and_then(|tag| element::lookup(tag, name))
    }

    /// Whether `name` is one of this element's default properties.
    pub fn has_property(&self, name: &str) -> bool {
        self.property_kind(name).is_some()
    }

    /// Assign a default property. Returns `false` if the element has no
    /// such property.
    pub fn set_property(&self, name: &str, value: Value) -> bool {
        let (Some(kind), Some(el)) = (self.property_kind(name), self.element_data()) else {
            return false;
        };
        match kind {
            PropertyKind::Reflect(attr) | PropertyKind::ReflectNumber(attr, _) => {
                self.set_attribute(attr, &value.to_js_string());
            }
            PropertyKind::ReflectBool(attr) => {
                if value.is_truthy() {
                    self.set_attribute(attr, "");
                } else {
                    self.remove_attribute(attr);
                }
            }
            PropertyKind::StateText => {
                let text = match value {
                    Value::Null => String::new(),
                    other => other.to_js_string(),
                };
                el.state.borrow_mut().insert(name.to_string(), Value::Text(text));
            }
            PropertyKind::StateBool => {
                el.state
                    .borrow_mut()
                    .insert(name.to_string(), Value::Bool(value.is_truthy()));
            }
            PropertyKind::TextContent => {
                let text = match value {
                    Value::Null => String::new(),
                    other => other.to_js_string(),
                };
                if let Err(err) = self.set_text_content(&text) {
                    error!(%err, element = %self.node_name(), "failed to set textContent");
                    return false;
                }
            }
            PropertyKind::Style => {
                let css = match value {
                    Value::Null => String::new(),
                    other => other.to_js_string(),
                };
                self.set_css_text(&css);
            }
        }
        true
    }

    /// Read a default property.
    pub fn property(&self, name: &str) -> Option<Value> {
        let kind = self.property_kind(name)?;
        let el = self.element_data()?;
        let value = match kind {
            PropertyKind::Reflect(attr) => Value::Text(self.attribute(attr).unwrap_or_default()),
            PropertyKind::ReflectBool(attr) => Value::Bool(self.has_attribute(attr)),
            PropertyKind::ReflectNumber(attr, default) => Value::Number(
                self.attribute(attr)
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(default),
            ),
            PropertyKind::StateText => el
                .state
                .borrow()
                .get(name)
                .cloned()
                .unwrap_or_else(|| Value::Text(String::new())),
            PropertyKind::StateBool => el
                .state
                .borrow()
                .get(name)
                .cloned()
                .unwrap_or(Value::Bool(false)),
            PropertyKind::TextContent => Value::Text(self.text_content()),
            PropertyKind::Style => Value::Text(self.css_text()),
        };
        Some(value)
    }

    /// Replace all children with a single text node (none for `""`).
    ///
    /// On a text node this sets its data instead.
    pub fn set_text_content(&self, text: &str) -> Result<()> {
        if self.is_text() {
            self.set_data(text);
            return Ok(());
        }
        let nodes = (!text.is_empty()).then(|| Node::text(text));
        self.replace_children(nodes)
    }

    /// Inline style text.
    pub fn css_text(&self) -> String {
        self.attribute("style").unwrap_or_default()
    }

    pub fn set_css_text(&self, css: &str) {
        if css.is_empty() {
            self.remove_attribute("style");
        } else {
            self.set_attribute("style", css);
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Register `listener` for events of `event_type`.
    ///
    /// Registering the same listener twice for one type has no effect.
    pub fn add_event_listener(&self, event_type: &str, listener: Listener) {
        let Some(el) = self.element_data() else {
            return;
        };
        let mut listeners = el.listeners.borrow_mut();
        let duplicate = listeners
            .iter()
            .any(|(ty, existing)| ty == event_type && Rc::ptr_eq(existing, &listener));
        if !duplicate {
            listeners.push((event_type.to_string(), listener));
        }
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.element_data().map_or(0, |el| {
            el.listeners
                .borrow()
                .iter()
                .filter(|(ty, _)| ty == event_type)
                .count()
        })
    }

    /// Run every listener registered for the event's type, in registration
    /// order. Returns the number of listeners invoked.
    pub fn dispatch_event(&self, event: Event) -> usize {
        let Some(el) = self.element_data() else {
            return 0;
        };
        let event = event.with_target(self.clone());
        let matching: Vec<Listener> = el
            .listeners
            .borrow()
            .iter()
            .filter(|(ty, _)| ty == event.event_type())
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in &matching {
            listener(&event);
        }
        matching.len()
    }

    // ------------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------------

    /// Keep `effect` alive for as long as this node lives.
    pub(crate) fn own_effect(&self, effect: Effect) {
        self.0.effects.borrow_mut().push(effect);
    }

    /// Number of effects kept alive by this node.
    pub fn effect_count(&self) -> usize {
        self.0.effects.borrow().len()
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    /// HTML serialization of this node and its subtree.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// HTML serialization of this node's children.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.0.children.borrow().iter() {
            child.write_html(&mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        match &self.0.kind {
            NodeKind::Text(data) => escape_into(out, &data.borrow(), false),
            NodeKind::Fragment => out.push_str(&self.inner_html()),
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.local_name);
                for (name, value) in el.attributes.borrow().iter() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(out, value, true);
                    out.push('"');
                }
                out.push('>');
                if element::is_void(&el.local_name) {
                    return;
                }
                out.push_str(&self.inner_html());
                out.push_str("</");
                out.push_str(&el.local_name);
                out.push('>');
            }
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Text(data) => f.debug_tuple("Text").field(&*data.borrow()).finish(),
            _ => f
                .debug_struct("Node")
                .field("name", &self.node_name())
                .field("children", &self.child_count())
                .field("effects", &self.effect_count())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::listener;
    use std::cell::Cell;

    #[test]
    fn element_basics() {
        let el = Node::element("DIV");
        assert_eq!(el.local_name(), Some("div"));
        assert_eq!(el.tag_name().as_deref(), Some("DIV"));
        assert_eq!(el.node_type(), NodeType::Element);
        assert_eq!(Node::text("x").node_name(), "#text");
    }

    #[test]
    fn append_moves_between_parents() {
        let a = Node::element("div");
        let b = Node::element("div");
        let child = Node::text("hi");

        a.append_child(&child).unwrap();
        assert!(child.parent_node().unwrap().ptr_eq(&a));

        b.append_child(&child).unwrap();
        assert_eq!(a.child_count(), 0);
        assert_eq!(b.child_count(), 1);
        assert!(child.parent_node().unwrap().ptr_eq(&b));
    }

    #[test]
    fn appending_fragment_moves_its_children() {
        let frag = Node::fragment();
        frag.append_child(&Node::text("a")).unwrap();
        frag.append_child(&Node::text("b")).unwrap();

        let el = Node::element("p");
        el.append_child(&frag).unwrap();

        assert_eq!(frag.child_count(), 0);
        assert_eq!(el.text_content(), "ab");
    }

    #[test]
    fn hierarchy_errors() {
        let outer = Node::element("div");
        let inner = Node::element("span");
        outer.append_child(&inner).unwrap();

        assert!(matches!(
            inner.append_child(&outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            outer.append_child(&outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            Node::text("t").append_child(&Node::text("u")),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn replace_children_keeps_reinserted_nodes() {
        let el = Node::element("ul");
        let keep = Node::element("li");
        let gone = Node::element("li");
        el.replace_children([keep.clone(), gone.clone()]).unwrap();

        let fresh = Node::text("new");
        el.replace_children([fresh.clone(), keep.clone()]).unwrap();

        assert_eq!(el.child_nodes(), vec![fresh, keep.clone()]);
        assert!(keep.parent_node().unwrap().ptr_eq(&el));
        assert!(gone.parent_node().is_none());
    }

    #[test]
    fn replace_children_duplicate_takes_last_position() {
        let el = Node::element("div");
        let a = Node::text("a");
        let b = Node::text("b");
        el.replace_children([a.clone(), b.clone(), a.clone()]).unwrap();
        assert_eq!(el.child_nodes(), vec![b, a]);
    }

    #[test]
    fn replace_child_swaps_in_place() {
        let el = Node::element("div");
        let first = Node::text("1");
        let second = Node::text("2");
        let third = Node::text("3");
        el.replace_children([first.clone(), second.clone(), third.clone()])
            .unwrap();

        let fresh = Node::text("two");
        let old = el.replace_child(&fresh, &second).unwrap();

        assert!(old.ptr_eq(&second));
        assert!(second.parent_node().is_none());
        assert_eq!(el.child_nodes(), vec![first, fresh, third]);
    }

    #[test]
    fn replace_child_requires_child() {
        let el = Node::element("div");
        let stranger = Node::text("x");
        assert!(matches!(
            el.replace_child(&Node::text("y"), &stranger),
            Err(DomError::NotFound { .. })
        ));
        assert!(matches!(el.remove_child(&stranger), Err(DomError::NotFound { .. })));
    }

    #[test]
    fn reflected_properties() {
        let el = Node::element("div");
        assert!(el.set_property("id", Value::from("x")));
        assert!(el.set_property("className", Value::from("big")));
        assert_eq!(el.attribute("id").as_deref(), Some("x"));
        assert_eq!(el.attribute("class").as_deref(), Some("big"));
        assert_eq!(el.property("id"), Some(Value::from("x")));

        el.set_property("hidden", Value::Bool(true));
        assert!(el.has_attribute("hidden"));
        el.set_property("hidden", Value::Bool(false));
        assert!(!el.has_attribute("hidden"));

        assert!(!el.set_property("value", Value::from("nope")));
        assert_eq!(el.property("value"), None);
    }

    #[test]
    fn state_properties_do_not_touch_attributes() {
        let input = Node::element("input");
        assert_eq!(input.property("value"), Some(Value::from("")));

        input.set_property("value", Value::from(12));
        input.set_property("checked", Value::Bool(true));

        assert_eq!(input.property("value"), Some(Value::from("12")));
        assert_eq!(input.property("checked"), Some(Value::Bool(true)));
        assert!(!input.has_attribute("value"));
    }

    #[test]
    fn style_is_the_style_attribute() {
        let el = Node::element("span");
        el.set_css_text("color:red");
        assert_eq!(el.css_text(), "color:red");
        assert_eq!(el.attribute("style").as_deref(), Some("color:red"));
        el.set_css_text("");
        assert!(!el.has_attribute("style"));
    }

    #[test]
    fn dispatch_runs_matching_listeners_in_order() {
        let el = Node::element("button");
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = listener({
            let log = log.clone();
            move |e: &Event| log.borrow_mut().push(format!("1:{}", e.event_type()))
        });
        let second = listener({
            let log = log.clone();
            move |_: &Event| log.borrow_mut().push("2".to_string())
        });

        el.add_event_listener("click", first.clone());
        el.add_event_listener("click", first);
        el.add_event_listener("click", second);
        el.add_event_listener("input", listener(|_| panic!("wrong type")));

        assert_eq!(el.listener_count("click"), 2);
        assert_eq!(el.dispatch_event(Event::new("click")), 2);
        assert_eq!(*log.borrow(), vec!["1:click".to_string(), "2".to_string()]);
    }

    #[test]
    fn listener_sees_target() {
        let el = Node::element("div");
        let hit = Rc::new(Cell::new(false));
        el.add_event_listener(
            "click",
            listener({
                let hit = hit.clone();
                let el = el.downgrade();
                move |e| {
                    let target = e.target().cloned();
                    hit.set(target == el.upgrade());
                }
            }),
        );
        el.dispatch_event(Event::new("click"));
        assert!(hit.get());
    }

    #[test]
    fn html_serialization_escapes() {
        let el = Node::element("p");
        el.set_attribute("title", "a \"b\"");
        el.append_child(&Node::text("1 < 2 & 3")).unwrap();
        let input = Node::element("input");
        el.append_child(&input).unwrap();

        assert_eq!(
            el.outer_html(),
            "<p title=\"a &quot;b&quot;\">1 &lt; 2 &amp; 3<input></p>"
        );
    }

    #[test]
    fn set_text_content_replaces_children() {
        let el = Node::element("div");
        el.append_child(&Node::element("span")).unwrap();
        el.append_child(&Node::text("old")).unwrap();

        el.set_text_content("new").unwrap();
        assert_eq!(el.child_count(), 1);
        assert_eq!(el.inner_html(), "new");

        el.set_text_content("").unwrap();
        assert_eq!(el.child_count(), 0);

        assert!(el.set_property("textContent", Value::from(3)));
        assert_eq!(el.text_content(), "3");
    }

    #[test]
    fn set_text_content_on_text_node_sets_data() {
        let text = Node::text("a");
        text.set_text_content("b").unwrap();
        assert_eq!(text.data().as_deref(), Some("b"));
        assert_eq!(text.child_count(), 0);
    }

    #[test]
    fn dropping_root_frees_subtree() {
        let root = Node::element("div");
        let child = Node::element("span");
        root.append_child(&child).unwrap();
        let weak_child = child.downgrade();
        drop(child);

        assert!(weak_child.upgrade().is_some());
        drop(root);
        assert!(weak_child.upgrade().is_none());
    }
}

//! Element builder.
//!
//! [`Runtime::h`] creates an element, applies its props and keeps its
//! children in sync with the stores they read. Two kinds of effect do the
//! syncing:
//!
//! - one whole-list effect per element, which re-resolves every child and
//!   replaces the element's child list;
//! - one slot effect per reactive child, which re-resolves the children
//!   and swaps only the node at that child's index.
//!
//! Both effects are owned by the element and die with it. Their closures
//! hold the element weakly, so an element never keeps itself alive.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{error, trace, warn};

use super::child::{materialize, to_node, Child, ChildFn};
use super::props::{PropValue, Props};
use crate::dom::{Node, Value, WeakNode};
use crate::reactive::Runtime;

/// A component: a function from props and children to a node.
pub type Component = Rc<dyn Fn(Props, Vec<Child>) -> Node>;

/// What [`Runtime::h`] builds.
#[derive(Clone)]
pub enum Tag {
    /// A DOM element by tag name.
    Name(String),
    /// A component, invoked directly with the props and children.
    Component(Component),
}

impl Tag {
    pub fn component<F>(f: F) -> Self
    where
        F: Fn(Props, Vec<Child>) -> Node + 'static,
    {
        Tag::Component(Rc::new(f))
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::Name(name.to_string())
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag::Name(name)
    }
}

impl From<Component> for Tag {
    fn from(component: Component) -> Self {
        Tag::Component(component)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Tag::Component(_) => f.write_str("Component(..)"),
        }
    }
}

impl Runtime {
    /// Build a node.
    ///
    /// A component tag is called with `props` and `children` and its
    /// result returned as is. A tag name creates an element:
    ///
    /// - `on<event>` props holding a listener register it for the
    ///   lowercased event name;
    /// - a text `style` prop replaces the inline style;
    /// - keys naming a default property of the element set the property;
    /// - anything else becomes an attribute.
    ///
    /// ```rust
    /// use sprig_core::{children, Child, Props, Runtime};
    ///
    /// let rt = Runtime::new();
    /// let count = rt.create_store(0);
    /// let el = rt.h(
    ///     "p",
    ///     Props::new().set("className", "counter"),
    ///     children!["count: ", Child::from(&count)],
    /// );
    /// assert_eq!(el.outer_html(), r#"<p class="counter">count: 0</p>"#);
    ///
    /// count.set(4);
    /// assert_eq!(el.text_content(), "count: 4");
    /// ```
    pub fn h(&self, tag: impl Into<Tag>, props: Props, children: Vec<Child>) -> Node {
        match tag.into() {
            Tag::Component(component) => component(props, children),
            Tag::Name(name) => self.element(&name, props, children),
        }
    }

    fn element(&self, tag: &str, props: Props, children: Vec<Child>) -> Node {
        let el = Node::element(tag);
        apply_props(&el, props);

        let children: Rc<[Child]> = children.into();
        self.bind_children(&el, &children);
        self.bind_slots(&el, &children);
        el
    }

    /// Register the whole-list render effect for `target`.
    pub(crate) fn bind_children(&self, target: &Node, children: &Rc<[Child]>) {
        let weak = target.downgrade();
        let children = Rc::clone(children);
        let effect = self.create_effect(move || {
            if let Some(target) = weak.upgrade() {
                render_children(&target, &children);
            }
        });
        target.own_effect(effect);
    }

    fn bind_slots(&self, el: &Node, children: &Rc<[Child]>) {
        for (index, child) in children.iter().enumerate() {
            let Child::Reactive(own) = child else {
                continue;
            };
            let slot = Slot {
                runtime: self.clone(),
                element: el.downgrade(),
                children: Rc::clone(children),
                own: Rc::clone(own),
                index,
                primed: Cell::new(false),
            };
            let effect = self.create_effect(move || slot.run());
            el.own_effect(effect);
        }
    }
}

/// Apply `props` to `el` in order.
fn apply_props(el: &Node, props: Props) {
    for (key, value) in props {
        match value {
            PropValue::Listener(listener) if key.starts_with("on") => {
                el.add_event_listener(&key[2..].to_lowercase(), listener);
            }
            PropValue::Value(Value::Text(css)) if key == "style" => el.set_css_text(&css),
            PropValue::Value(value) if el.has_property(&key) => {
                el.set_property(&key, value);
            }
            PropValue::Value(value) => el.set_attribute(&key, &value.to_js_string()),
            PropValue::Listener(_) => {
                warn!(key = %key, "listener passed under a non-event prop, ignored");
            }
        }
    }
}

fn render_children(target: &Node, children: &[Child]) {
    let nodes = materialize(children);
    if let Err(err) = target.replace_children(nodes) {
        error!(%err, parent = %target.node_name(), "failed to render children");
    }
}

/// Per-slot patch effect for one reactive child.
struct Slot {
    runtime: Runtime,
    element: WeakNode,
    children: Rc<[Child]>,
    own: ChildFn,
    index: usize,
    primed: Cell<bool>,
}

impl Slot {
    fn run(&self) {
        // The whole-list effect has just rendered; the first run only
        // subscribes to the stores this child reads.
        if !self.primed.replace(true) {
            (self.own)();
            return;
        }
        let Some(el) = self.element.upgrade() else {
            return;
        };

        let resolved = self.resolve();
        let Some(node) = to_node(&resolved) else {
            return;
        };
        match el.child(self.index) {
            Some(current) if current.ptr_eq(&node) => {}
            Some(current) => {
                if let Err(err) = el.replace_child(&node, &current) {
                    error!(%err, index = self.index, "failed to patch child slot");
                }
            }
            None => trace!(index = self.index, "no node at slot index, patch skipped"),
        }
    }

    /// Resolve every sibling untracked and this slot's child tracked.
    fn resolve(&self) -> Child {
        let mut own = Child::Empty;
        for (i, child) in self.children.iter().enumerate() {
            if i == self.index {
                own = (self.own)();
            } else {
                self.runtime.untrack(|| child.resolve());
            }
        }
        own
    }
}

//! Events and listeners.

use std::fmt;
use std::rc::Rc;

use super::node::Node;

/// Callback invoked when an event of the registered type is dispatched.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&Event) + 'static,
{
    Rc::new(f)
}

/// An event dispatched to a node.
///
/// Events do not propagate: only listeners on the target node run.
#[derive(Clone)]
pub struct Event {
    event_type: String,
    target: Option<Node>,
}

impl Event {
    /// Create an event of the given type. Types are case-sensitive.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The node the event was dispatched to. `None` before dispatch.
    pub fn target(&self) -> Option<&Node> {
        self.target.as_ref()
    }

    pub(crate) fn with_target(mut self, target: Node) -> Self {
        self.target = Some(target);
        self
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("type", &self.event_type)
            .field("target", &self.target.as_ref().map(Node::node_name))
            .finish()
    }
}

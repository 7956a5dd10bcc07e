//! Live DOM
//!
//! An in-process node tree with browser semantics for the operations the
//! view layer needs: element/text/fragment nodes, attributes, default
//! element properties, inline style, event listeners and child-list
//! mutation.
//!
//! # Concepts
//!
//! ## Live, not virtual
//!
//! Every call mutates the tree immediately. There is no staged or diffed
//! representation; what the element builder writes is what a reader sees.
//!
//! ## Properties vs attributes
//!
//! Each element has a fixed set of default properties chosen by its tag
//! (`id`, `className`, `value`, `checked`, ...). Reflected properties read
//! and write their attribute; the rest (`value` on an input, `checked`) live
//! in element state. [`Node::has_property`] answers the `key in element`
//! question the element builder routes on.

mod element;
mod event;
mod node;
mod snapshot;
mod value;

pub use event::{listener, Event, Listener};
pub use node::{Node, NodeType, WeakNode};
pub use snapshot::NodeSnapshot;
pub use value::{number_to_string, Value};

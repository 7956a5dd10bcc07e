//! Children and the node materializer.
//!
//! A child slot holds anything renderable. Materializing a slot turns it
//! into a concrete [`Node`] or nothing:
//!
//! | Child                | Materialized as                  |
//! |----------------------|----------------------------------|
//! | `Empty`              | nothing                          |
//! | `Text`, `Number`     | a new text node                  |
//! | `Node`               | the same node                    |
//! | `Bool`               | nothing                          |
//! | `Reactive`           | resolved first, then as above    |
//!
//! Booleans are dropped on purpose, so `cond.then(..)`-style children can
//! be written as plain `bool`s without rendering `"true"`.

use std::fmt;
use std::rc::Rc;

use crate::dom::{number_to_string, Node, Value};
use crate::reactive::Store;

/// Function backing a reactive child.
pub type ChildFn = Rc<dyn Fn() -> Child>;

/// One entry of an element's children list.
#[derive(Clone, Default)]
pub enum Child {
    Node(Node),
    Text(String),
    Number(f64),
    Bool(bool),
    /// `null` / `undefined`: renders nothing.
    #[default]
    Empty,
    /// Re-evaluated whenever a store it reads changes.
    Reactive(ChildFn),
}

impl Child {
    /// Wrap a closure as a reactive child.
    pub fn reactive<F, R>(f: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: Into<Child>,
    {
        Child::Reactive(Rc::new(move || f().into()))
    }

    pub fn is_reactive(&self) -> bool {
        matches!(self, Child::Reactive(_))
    }

    /// Invoke a reactive child once; other children resolve to themselves.
    pub fn resolve(&self) -> Child {
        match self {
            Child::Reactive(f) => f(),
            other => other.clone(),
        }
    }
}

/// Materialize a resolved child. Unsupported values yield `None`.
pub fn to_node(child: &Child) -> Option<Node> {
    match child {
        Child::Text(text) => Some(Node::text(text.as_str())),
        Child::Number(n) => Some(Node::text(number_to_string(*n))),
        Child::Node(node) => Some(node.clone()),
        Child::Empty | Child::Bool(_) | Child::Reactive(_) => None,
    }
}

/// Resolve every slot, calling reactive children.
///
/// Nothing is memoized: each call invokes every reactive child again.
pub fn flatten_children(children: &[Child]) -> Vec<Child> {
    children.iter().map(Child::resolve).collect()
}

/// Resolve and materialize a whole children list, dropping empty slots.
pub(crate) fn materialize(children: &[Child]) -> Vec<Node> {
    flatten_children(children).iter().filter_map(to_node).collect()
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Child::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Child::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Child::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Child::Empty => f.write_str("Empty"),
            Child::Reactive(_) => f.write_str("Reactive(..)"),
        }
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&String> for Child {
    fn from(text: &String) -> Self {
        Child::Text(text.clone())
    }
}

impl From<bool> for Child {
    fn from(b: bool) -> Self {
        Child::Bool(b)
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Number(n)
    }
}

macro_rules! child_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Child {
                fn from(n: $ty) -> Self {
                    Child::Number(n as f64)
                }
            }
        )*
    };
}

child_from_number!(f32, i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<&Node> for Child {
    fn from(node: &Node) -> Self {
        Child::Node(node.clone())
    }
}

impl From<()> for Child {
    fn from(_: ()) -> Self {
        Child::Empty
    }
}

impl From<Value> for Child {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Child::Empty,
            Value::Bool(b) => Child::Bool(b),
            Value::Number(n) => Child::Number(n),
            Value::Text(s) => Child::Text(s),
        }
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Child::Empty, Into::into)
    }
}

/// A store used as a child renders its current value and follows changes.
impl<T> From<&Store<T>> for Child
where
    T: Clone + Into<Child> + 'static,
{
    fn from(store: &Store<T>) -> Self {
        let store = store.clone();
        Child::reactive(move || store.get())
    }
}

/// Build a `Vec<Child>` from heterogeneous values.
///
/// ```rust
/// use sprig_core::{children, Child};
///
/// let list = children!["count: ", 3, Child::reactive(|| "live")];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! children {
    () => {
        ::std::vec::Vec::<$crate::view::Child>::new()
    };
    ($($child:expr),+ $(,)?) => {
        ::std::vec![$($crate::view::Child::from($child)),+]
    };
}

//! View Layer
//!
//! Builds live DOM nodes from tags, props and children, wiring reactive
//! children to the stores they read.
//!
//! ```rust
//! use std::rc::Rc;
//! use sprig_core::{children, Child, Props, Runtime};
//!
//! let rt = Runtime::new();
//! let items = rt.create_store(Rc::new(vec!["a", "b"]));
//! let list = rt.ul(
//!     Props::new(),
//!     children![Child::reactive({
//!         let items = items.clone();
//!         move || {
//!             let rt = items.runtime().clone();
//!             let current = items.get();
//!             let lis = current.iter().map(|s| Child::from(rt.li(Props::new(), children![*s])));
//!             rt.fragment(lis.collect())
//!         }
//!     })],
//! );
//! assert_eq!(list.outer_html(), "<ul><li>a</li><li>b</li></ul>");
//!
//! items.set(Rc::new(vec!["c"]));
//! assert_eq!(list.outer_html(), "<ul><li>c</li></ul>");
//! ```

mod builder;
mod child;
mod fragment;
mod props;
mod tags;

pub use builder::{Component, Tag};
pub use child::{flatten_children, to_node, Child, ChildFn};
pub use props::{PropValue, Props};
pub use tags::TAG_HELPERS;

//! Sprig Core
//!
//! This crate provides the core runtime for the Sprig reactive view layer.
//! It implements:
//!
//! - Reactive primitives (stores, effects, batching, untracked reads)
//! - A dependency graph linking stores to the effects that read them
//! - A live in-process DOM
//! - An element builder that keeps children in sync with stores
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `reactive`: Core reactive primitives and dependency tracking
//! - `graph`: Store/effect edges and the batch scheduler
//! - `dom`: Node tree, properties, attributes and events
//! - `view`: Children materialization, props and the `h` builder
//! - `config`: Runtime configuration
//!
//! # Example
//!
//! ```rust
//! use sprig_core::{children, Child, Props, Runtime};
//!
//! let rt = Runtime::new();
//! let count = rt.create_store(0);
//!
//! let button = rt.button(
//!     Props::new().on("click", {
//!         let count = count.clone();
//!         move |_| count.update(|n| n + 1)
//!     }),
//!     children!["clicked ", Child::from(&count), " times"],
//! );
//!
//! button.dispatch_event(sprig_core::Event::new("click"));
//! assert_eq!(button.text_content(), "clicked 1 times");
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod graph;
pub mod reactive;
pub mod view;

pub use config::RuntimeConfig;
pub use dom::{listener, Event, Listener, Node, NodeSnapshot, NodeType, Value};
pub use error::{DomError, Result};
pub use reactive::{Effect, EffectId, Runtime, SameValue, Store, StoreId};
pub use view::{flatten_children, to_node, Child, Component, PropValue, Props, Tag};

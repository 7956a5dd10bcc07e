//! Runtime configuration.

use std::borrow::Cow;

/// Options for a [`Runtime`](crate::reactive::Runtime).
///
/// # Example
///
/// ```rust
/// use sprig_core::{Runtime, RuntimeConfig};
///
/// let rt = Runtime::with_config(
///     RuntimeConfig::new()
///         .with_label("settings-panel")
///         .with_pruning(false),
/// );
/// assert_eq!(rt.config().label(), "settings-panel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    label: Cow<'static, str>,
    prune_stale_edges: bool,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name attached to every log event emitted by the runtime.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Clear an effect's edges before each re-run.
    ///
    /// When disabled, edges are only ever added: an effect stays subscribed
    /// to every store it has read at any point in its life.
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune_stale_edges = prune;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn prune_stale_edges(&self) -> bool {
        self.prune_stale_edges
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("sprig"),
            prune_stale_edges: true,
        }
    }
}

//! Raw text shadow node.
//!
//! A [`RawTextNode`] is the leaf of a text subtree: it carries literal string
//! content and nothing else. The enclosing text node reads it during layout.
//!
//! Changing the text marks the node dirty through its host tree's
//! [`LayoutInvalidation`] hook. Writing the value the node already holds
//! does nothing.

use std::fmt;
use std::sync::Arc;

use crate::logging::targets;
use crate::property::Property;
use crate::shadow::{LayoutInvalidation, NodeId, ShadowTree};
use crate::signal::Signal;

/// View class name raw text nodes are registered under.
pub const RAW_TEXT_VIEW_NAME: &str = "RCTRawText";

/// Shadow node holding literal text content.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_mobile_core::raw_text::RawTextNode;
/// use horizon_mobile_core::shadow::ShadowTree;
///
/// let tree = Arc::new(ShadowTree::new());
/// let node = RawTextNode::create(tree.clone());
/// tree.clear_all_dirty();
///
/// node.set_text(Some("Hello".to_string()));
/// assert!(tree.is_dirty(node.node_id()).unwrap());
/// assert_eq!(node.text().as_deref(), Some("Hello"));
/// ```
pub struct RawTextNode {
    id: NodeId,
    text: Property<Option<String>>,
    host: Arc<dyn LayoutInvalidation>,
    text_changed: Signal<Option<String>>,
}

impl RawTextNode {
    /// Wrap an already registered node of `host`.
    pub fn new(id: NodeId, host: Arc<dyn LayoutInvalidation>) -> Self {
        Self {
            id,
            text: Property::default(),
            host,
            text_changed: Signal::new(),
        }
    }

    /// Register a fresh node in `tree` and wrap it.
    pub fn create(tree: Arc<ShadowTree>) -> Self {
        let id = tree.create_node(RAW_TEXT_VIEW_NAME);
        Self::new(id, tree)
    }

    /// The shadow node this text belongs to.
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// The current text, if any.
    pub fn text(&self) -> Option<String> {
        self.text.get()
    }

    /// Read the text without cloning it.
    pub fn with_text<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&str>) -> R,
    {
        self.text.with(|text| f(text.as_deref()))
    }

    /// Replace the text.
    ///
    /// Returns `true` if the value changed, in which case `text_changed` was
    /// emitted and the node was marked dirty. `None` and `Some("")` are
    /// distinct values.
    pub fn set_text(&self, text: Option<String>) -> bool {
        if !self.text.set(text.clone()) {
            return false;
        }
        tracing::trace!(target: targets::RAW_TEXT, node = ?self.id, has_text = text.is_some(), "raw text changed");
        self.host.mark_dirty(self.id);
        self.text_changed.emit(text);
        true
    }

    /// Signal emitted with the new value after every change.
    pub fn text_changed(&self) -> &Signal<Option<String>> {
        &self.text_changed
    }
}

impl fmt::Debug for RawTextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawTextNode")
            .field("id", &self.id)
            .field("text", &self.text.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(RawTextNode: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Records every invalidation it receives.
    #[derive(Default)]
    struct RecordingHost {
        marks: Mutex<Vec<NodeId>>,
    }

    impl LayoutInvalidation for RecordingHost {
        fn mark_dirty(&self, node: NodeId) {
            self.marks.lock().push(node);
        }
    }

    fn node_with_host() -> (RawTextNode, Arc<RecordingHost>) {
        let host = Arc::new(RecordingHost::default());
        let node = RawTextNode::new(NodeId::from_raw((1 << 32) | 1), host.clone());
        (node, host)
    }

    #[test]
    fn test_starts_without_text() {
        let (node, host) = node_with_host();
        assert_eq!(node.text(), None);
        assert!(host.marks.lock().is_empty());
    }

    #[test]
    fn test_set_text_marks_dirty_once() {
        let (node, host) = node_with_host();
        assert!(node.set_text(Some("a".to_string())));
        assert!(!node.set_text(Some("a".to_string())));
        assert_eq!(*host.marks.lock(), vec![node.node_id()]);
    }

    #[test]
    fn test_clearing_text_is_a_change() {
        let (node, host) = node_with_host();
        node.set_text(Some("a".to_string()));
        assert!(node.set_text(None));
        assert!(!node.set_text(None));
        assert_eq!(host.marks.lock().len(), 2);
        assert_eq!(node.text(), None);
    }

    #[test]
    fn test_empty_string_differs_from_none() {
        let (node, host) = node_with_host();
        assert!(node.set_text(Some(String::new())));
        assert_eq!(host.marks.lock().len(), 1);
        node.with_text(|text| assert_eq!(text, Some("")));
    }

    #[test]
    fn test_text_changed_signal() {
        let (node, _host) = node_with_host();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        node.text_changed()
            .connect(move |text| seen_clone.lock().push(text.clone()));

        node.set_text(Some("one".to_string()));
        node.set_text(Some("one".to_string()));
        node.set_text(None);

        assert_eq!(*seen.lock(), vec![Some("one".to_string()), None]);
    }

    #[test]
    fn test_create_registers_in_tree() {
        let tree = Arc::new(ShadowTree::new());
        let node = RawTextNode::create(tree.clone());
        assert_eq!(tree.view_name(node.node_id()).unwrap(), RAW_TEXT_VIEW_NAME);
    }
}

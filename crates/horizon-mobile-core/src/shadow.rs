//! Shadow layout tree for Horizon Mobile.
//!
//! The shadow tree is the off-screen mirror of the native view hierarchy. Each
//! node records its parent/child links and whether its layout-affecting state
//! changed since the last layout pass.
//!
//! # Key Types
//!
//! - [`ShadowTree`] - Arena of shadow nodes with dirty tracking
//! - [`NodeId`] - Stable handle to a node in the tree
//! - [`LayoutInvalidation`] - The narrow "mark dirty" capability nodes depend on
//!
//! # Dirty Propagation
//!
//! Marking a node dirty also marks every ancestor, since a change in a leaf
//! can change the measured size of each container above it. The layout pass
//! reads [`ShadowTree::dirty_nodes`] and calls [`ShadowTree::clear_dirty`]
//! once it has recomputed a node.
//!
//! # Example
//!
//! ```
//! use horizon_mobile_core::shadow::{LayoutInvalidation, ShadowTree};
//!
//! let tree = ShadowTree::new();
//! let root = tree.create_node("RCTRootView");
//! let text = tree.create_node("RCTRawText");
//! tree.set_parent(text, Some(root)).unwrap();
//!
//! tree.mark_dirty(text);
//! assert!(tree.is_dirty(root).unwrap());
//! ```

use std::fmt;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a node in a [`ShadowTree`].
    ///
    /// `NodeId`s stay valid while the tree is restructured and become invalid
    /// once the node (or one of its ancestors) is destroyed.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the NodeId to a raw u64 value.
    ///
    /// This is the tag handed across the native/script boundary.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a NodeId from a raw u64 value.
    ///
    /// This does not check whether the node exists in any tree.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Errors that can occur during shadow tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowError {
    /// The node ID is invalid or the node has been destroyed.
    InvalidNodeId,
    /// Attempted to set a node as its own parent/ancestor.
    CircularParentage,
}

impl fmt::Display for ShadowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeId => write!(f, "Invalid or destroyed shadow node ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set a shadow node as its own parent or ancestor")
            }
        }
    }
}

impl std::error::Error for ShadowError {}

/// Result type for shadow tree operations.
pub type ShadowResult<T> = std::result::Result<T, ShadowError>;

/// The capability a shadow node needs from its host tree.
///
/// Nodes hold an implementation of this trait instead of a concrete tree, so
/// tests can substitute a recording fake.
pub trait LayoutInvalidation: Send + Sync {
    /// Signal that `node`'s layout-affecting state changed.
    fn mark_dirty(&self, node: NodeId);
}

struct NodeData {
    /// Native view class this node shadows, for debugging.
    view_name: &'static str,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    dirty: bool,
}

impl NodeData {
    fn new(view_name: &'static str) -> Self {
        Self {
            view_name,
            parent: None,
            children: Vec::new(),
            // New nodes have never been laid out.
            dirty: true,
        }
    }
}

/// Arena-backed shadow layout tree.
///
/// All methods take `&self`; the node arena sits behind a `RwLock` so the
/// tree can be shared with the nodes that invalidate it.
pub struct ShadowTree {
    nodes: RwLock<SlotMap<NodeId, NodeData>>,
}

impl Default for ShadowTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(SlotMap::with_key()),
        }
    }

    /// Insert a new root node and return its ID.
    pub fn create_node(&self, view_name: &'static str) -> NodeId {
        let id = self.nodes.write().insert(NodeData::new(view_name));
        tracing::trace!(target: targets::SHADOW, ?id, view_name, "created shadow node");
        id
    }

    /// Remove a node and all of its descendants.
    #[tracing::instrument(skip(self), target = "horizon_mobile_core::shadow", level = "trace")]
    pub fn destroy(&self, id: NodeId) -> ShadowResult<()> {
        let mut nodes = self.nodes.write();
        let mut doomed = Vec::new();
        collect_descendants(&nodes, id, &mut doomed)?;

        let parent = nodes.get(id).and_then(|data| data.parent);
        if let Some(parent_id) = parent {
            if let Some(parent_data) = nodes.get_mut(parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
            mark_chain(&mut nodes, parent_id);
        }

        tracing::trace!(target: targets::SHADOW, ?id, descendant_count = doomed.len(), "destroying shadow subtree");
        for child in doomed {
            nodes.remove(child);
        }
        nodes.remove(id);
        Ok(())
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.read().contains_key(id)
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    /// Move `id` under `new_parent`, or make it a root with `None`.
    ///
    /// Reparenting changes the layout of both the old and the new parent, so
    /// both chains are marked dirty.
    pub fn set_parent(&self, id: NodeId, new_parent: Option<NodeId>) -> ShadowResult<()> {
        let mut nodes = self.nodes.write();
        if !nodes.contains_key(id) {
            return Err(ShadowError::InvalidNodeId);
        }
        if let Some(parent_id) = new_parent {
            if !nodes.contains_key(parent_id) {
                return Err(ShadowError::InvalidNodeId);
            }
            if is_ancestor_of(&nodes, id, parent_id) {
                return Err(ShadowError::CircularParentage);
            }
        }

        let old_parent = nodes.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent {
            if let Some(parent_data) = nodes.get_mut(old_parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
            mark_chain(&mut nodes, old_parent_id);
        }

        if let Some(data) = nodes.get_mut(id) {
            data.parent = new_parent;
        }
        if let Some(parent_id) = new_parent {
            if let Some(parent_data) = nodes.get_mut(parent_id) {
                parent_data.children.push(id);
            }
        }
        mark_chain(&mut nodes, id);
        Ok(())
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> ShadowResult<Option<NodeId>> {
        self.nodes
            .read()
            .get(id)
            .map(|d| d.parent)
            .ok_or(ShadowError::InvalidNodeId)
    }

    /// Get the children of a node, in insertion order.
    pub fn children(&self, id: NodeId) -> ShadowResult<Vec<NodeId>> {
        self.nodes
            .read()
            .get(id)
            .map(|d| d.children.clone())
            .ok_or(ShadowError::InvalidNodeId)
    }

    /// Get the native view class name of a node.
    pub fn view_name(&self, id: NodeId) -> ShadowResult<&'static str> {
        self.nodes
            .read()
            .get(id)
            .map(|d| d.view_name)
            .ok_or(ShadowError::InvalidNodeId)
    }

    /// All nodes without a parent.
    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .read()
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether a node needs a layout pass.
    pub fn is_dirty(&self, id: NodeId) -> ShadowResult<bool> {
        self.nodes
            .read()
            .get(id)
            .map(|d| d.dirty)
            .ok_or(ShadowError::InvalidNodeId)
    }

    /// All nodes currently marked dirty.
    pub fn dirty_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .read()
            .iter()
            .filter(|(_, data)| data.dirty)
            .map(|(id, _)| id)
            .collect()
    }

    /// Clear the dirty flag of one node after it has been laid out.
    pub fn clear_dirty(&self, id: NodeId) -> ShadowResult<()> {
        self.nodes
            .write()
            .get_mut(id)
            .map(|d| d.dirty = false)
            .ok_or(ShadowError::InvalidNodeId)
    }

    /// Clear every dirty flag in the tree.
    pub fn clear_all_dirty(&self) {
        for (_, data) in self.nodes.write().iter_mut() {
            data.dirty = false;
        }
    }
}

impl LayoutInvalidation for ShadowTree {
    fn mark_dirty(&self, node: NodeId) {
        let mut nodes = self.nodes.write();
        if !nodes.contains_key(node) {
            tracing::debug!(target: targets::SHADOW, ?node, "ignoring invalidation of destroyed node");
            return;
        }
        mark_chain(&mut nodes, node);
        tracing::trace!(target: targets::SHADOW, ?node, "marked shadow node dirty");
    }
}

impl fmt::Debug for ShadowTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowTree")
            .field("node_count", &self.node_count())
            .finish()
    }
}

/// Mark `id` and every ancestor dirty.
fn mark_chain(nodes: &mut SlotMap<NodeId, NodeData>, id: NodeId) {
    let mut current = Some(id);
    while let Some(current_id) = current {
        let Some(data) = nodes.get_mut(current_id) else {
            break;
        };
        data.dirty = true;
        current = data.parent;
    }
}

/// Collect all descendants depth-first, children before parents.
fn collect_descendants(
    nodes: &SlotMap<NodeId, NodeData>,
    id: NodeId,
    result: &mut Vec<NodeId>,
) -> ShadowResult<()> {
    let data = nodes.get(id).ok_or(ShadowError::InvalidNodeId)?;
    for &child in &data.children {
        collect_descendants(nodes, child, result)?;
        result.push(child);
    }
    Ok(())
}

/// Check if `potential_ancestor` is `id` or one of its ancestors.
fn is_ancestor_of(
    nodes: &SlotMap<NodeId, NodeData>,
    potential_ancestor: NodeId,
    id: NodeId,
) -> bool {
    let mut current = Some(id);
    while let Some(current_id) = current {
        if current_id == potential_ancestor {
            return true;
        }
        current = nodes.get(current_id).and_then(|d| d.parent);
    }
    false
}

static_assertions::assert_impl_all!(ShadowTree: Send, Sync);

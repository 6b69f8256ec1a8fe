//! Core systems for Horizon Mobile.
//!
//! This crate provides the shadow-tree side of the Horizon Mobile runtime:
//!
//! - **Shadow Tree**: Off-screen layout tree with dirty tracking
//! - **Raw Text**: Leaf nodes carrying literal text content
//! - **Property System**: Values with change detection
//! - **Signal/Slot System**: Synchronous change notification
//! - **Logging**: `tracing` targets and shadow tree visualization
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_mobile_core::{RawTextNode, ShadowTree};
//!
//! let tree = Arc::new(ShadowTree::new());
//! let root = tree.create_node("RCTRootView");
//! let text = RawTextNode::create(tree.clone());
//! tree.set_parent(text.node_id(), Some(root)).unwrap();
//! tree.clear_all_dirty();
//!
//! text.set_text(Some("Hello".to_string()));
//! assert!(tree.is_dirty(root).unwrap());
//!
//! // Same value again: nothing to lay out.
//! tree.clear_all_dirty();
//! text.set_text(Some("Hello".to_string()));
//! assert!(tree.dirty_nodes().is_empty());
//! ```

pub mod logging;
pub mod property;
pub mod raw_text;
pub mod shadow;
pub mod signal;

pub use logging::{ShadowTreeDebug, TreeStyle};
pub use property::Property;
pub use raw_text::{RAW_TEXT_VIEW_NAME, RawTextNode};
pub use shadow::{LayoutInvalidation, NodeId, ShadowError, ShadowResult, ShadowTree};
pub use signal::{ConnectionId, Signal};

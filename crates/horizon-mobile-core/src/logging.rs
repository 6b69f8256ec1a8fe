//! Logging and debugging facilities for Horizon Mobile.
//!
//! This module provides:
//! - Target names for filtering the crate's `tracing` output
//! - Debug visualization for shadow trees
//!
//! # Tracing Integration
//!
//! Horizon Mobile uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_mobile_core::shadow=trace")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use horizon_mobile_core::logging::ShadowTreeDebug;
//! use horizon_mobile_core::shadow::ShadowTree;
//!
//! let tree = ShadowTree::new();
//! let root = tree.create_node("RCTRootView");
//! println!("{}", ShadowTreeDebug::new().format_subtree(&tree, root).unwrap());
//! ```

use std::fmt::Write as FmtWrite;

use crate::shadow::{NodeId, ShadowResult, ShadowTree};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_mobile_core";
    /// Shadow tree target.
    pub const SHADOW: &str = "horizon_mobile_core::shadow";
    /// Signal system target.
    pub const SIGNAL: &str = "horizon_mobile_core::signal";
    /// Raw text node target.
    pub const RAW_TEXT: &str = "horizon_mobile_core::raw_text";
    /// Screen orientation target.
    pub const ORIENTATION: &str = "horizon_mobile_orientation";
}

/// Style options for shadow tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    fn branch(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (Self::Ascii, false) => "|-- ",
            (Self::Ascii, true) => "`-- ",
            (Self::Unicode, false) => "├── ",
            (Self::Unicode, true) => "└── ",
        }
    }

    fn continuation(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (_, true) => "    ",
            (Self::Ascii, false) => "|   ",
            (Self::Unicode, false) => "│   ",
        }
    }
}

/// Debug utility for printing a shadow tree.
///
/// Each line shows the view name, optionally the raw node tag, and a `*`
/// marker for nodes awaiting layout.
#[derive(Debug, Clone, Default)]
pub struct ShadowTreeDebug {
    style: TreeStyle,
    show_ids: bool,
}

impl ShadowTreeDebug {
    /// Create a visualizer with Unicode branches and no IDs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given branch style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Include raw node tags in the output.
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, tree: &ShadowTree, root: NodeId) -> ShadowResult<String> {
        let mut output = String::new();
        self.write_label(tree, root, &mut output)?;
        let children = tree.children(root)?;
        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            self.format_into(tree, child, "", index + 1 == count, &mut output)?;
        }
        Ok(output)
    }

    fn format_into(
        &self,
        tree: &ShadowTree,
        id: NodeId,
        prefix: &str,
        is_last: bool,
        output: &mut String,
    ) -> ShadowResult<()> {
        output.push_str(prefix);
        output.push_str(self.style.branch(is_last));
        self.write_label(tree, id, output)?;

        let child_prefix = format!("{prefix}{}", self.style.continuation(is_last));
        let children = tree.children(id)?;
        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            self.format_into(tree, child, &child_prefix, index + 1 == count, output)?;
        }
        Ok(())
    }

    fn write_label(&self, tree: &ShadowTree, id: NodeId, output: &mut String) -> ShadowResult<()> {
        output.push_str(tree.view_name(id)?);
        if self.show_ids {
            let _ = write!(output, " #{}", id.as_raw());
        }
        if tree.is_dirty(id)? {
            output.push_str(" *");
        }
        output.push('\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::{LayoutInvalidation, ShadowError};

    #[test]
    fn test_format_subtree_unicode() {
        let tree = ShadowTree::new();
        let root = tree.create_node("RCTRootView");
        let first = tree.create_node("RCTView");
        let second = tree.create_node("RCTText");
        let raw = tree.create_node("RCTRawText");
        tree.set_parent(first, Some(root)).unwrap();
        tree.set_parent(second, Some(root)).unwrap();
        tree.set_parent(raw, Some(second)).unwrap();
        tree.clear_all_dirty();

        let output = ShadowTreeDebug::new().format_subtree(&tree, root).unwrap();
        assert_eq!(
            output,
            "RCTRootView\n├── RCTView\n└── RCTText\n    └── RCTRawText\n"
        );
    }

    #[test]
    fn test_format_marks_dirty_nodes() {
        let tree = ShadowTree::new();
        let root = tree.create_node("RCTRootView");
        let raw = tree.create_node("RCTRawText");
        tree.set_parent(raw, Some(root)).unwrap();
        tree.clear_all_dirty();
        tree.mark_dirty(raw);

        let output = ShadowTreeDebug::new()
            .with_style(TreeStyle::Ascii)
            .format_subtree(&tree, root)
            .unwrap();
        assert_eq!(output, "RCTRootView *\n`-- RCTRawText *\n");
    }

    #[test]
    fn test_format_with_ids() {
        let tree = ShadowTree::new();
        let root = tree.create_node("RCTRootView");
        tree.clear_all_dirty();

        let output = ShadowTreeDebug::new()
            .with_ids(true)
            .format_subtree(&tree, root)
            .unwrap();
        assert_eq!(output, format!("RCTRootView #{}\n", root.as_raw()));
    }

    #[test]
    fn test_format_invalid_root() {
        let tree = ShadowTree::new();
        let root = tree.create_node("RCTRootView");
        tree.destroy(root).unwrap();
        assert_eq!(
            ShadowTreeDebug::new().format_subtree(&tree, root),
            Err(ShadowError::InvalidNodeId)
        );
    }
}

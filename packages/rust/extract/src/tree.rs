//! Visible-text collection over a design node tree.

use figmacopy_shared::DesignNode;
use tracing::{debug, warn};

/// Depth limit used when callers have no config at hand.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Collect text payloads from every visible text node, in pre-order.
///
/// A hidden node hides its whole subtree. Empty payloads are skipped;
/// whitespace-only payloads are kept for the combiner to drop. Nodes
/// deeper than `max_depth` (root = 0) are not visited.
pub fn extract_texts(root: &DesignNode, max_depth: usize) -> Vec<String> {
    let mut texts = Vec::new();
    let mut stack: Vec<(&DesignNode, usize)> = vec![(root, 0)];
    let mut truncated = 0usize;

    while let Some((node, depth)) = stack.pop() {
        if node.is_hidden() {
            continue;
        }

        if let Some(text) = node.text() {
            texts.push(text.to_string());
        }

        if node.children.is_empty() {
            continue;
        }
        if depth >= max_depth {
            truncated += node.children.len();
            continue;
        }

        // Reverse so the first child is popped first.
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    if truncated > 0 {
        warn!(max_depth, skipped_subtrees = truncated, "design tree deeper than limit");
    }
    debug!(fragments = texts.len(), root = %root.id, "text fragments extracted");

    texts
}

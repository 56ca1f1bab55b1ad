//! Text extraction, fragment combination, and copy classification.
//!
//! This crate is the pure half of figmacopy: given an already-fetched
//! [`DesignNode`] tree it produces the grouped copy report. Nothing here
//! touches the network or the filesystem.
//!
//! - [`tree`] — visible text collection (pre-order, explicit stack)
//! - [`combine`] — price/period and button-phrase merging
//! - [`classify`] — ordered keyword rules into five [`Section`]s
//! - [`report`] — Markdown rendering

pub mod classify;
pub mod combine;
pub mod report;
pub mod tree;

use figmacopy_shared::DesignNode;

pub use classify::{Section, Sections, classify_line, classify_lines};
pub use combine::combine_fragments;
pub use report::format_report;
pub use tree::{DEFAULT_MAX_DEPTH, extract_texts};

/// Output of running the full extraction chain over one tree.
#[derive(Debug, Clone)]
pub struct ExtractedCopy {
    /// Raw fragments in document order.
    pub fragments: Vec<String>,
    /// Fragments after merging.
    pub lines: Vec<String>,
    /// Lines grouped by section.
    pub sections: Sections,
}

/// Extract, combine, and classify the copy under `root`.
pub fn extract_copy(root: &DesignNode, max_depth: usize) -> ExtractedCopy {
    let fragments = extract_texts(root, max_depth);
    let lines = combine_fragments(&fragments);
    let sections = classify_lines(lines.iter().cloned());

    ExtractedCopy {
        fragments,
        lines,
        sections,
    }
}

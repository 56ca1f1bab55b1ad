//! Pipeline orchestration for figmacopy.
//!
//! This crate ties together URL parsing, the Figma client, copy extraction,
//! the build check, and ticket drafting into the `extract` and `express`
//! workflows.

pub mod build;
pub mod pipeline;
pub mod ticket;

//! Single-page site model.
//!
//! This module parses a markdown page into:
//! - wrapped display lines for the terminal viewport
//! - a section table (one entry per level-2 heading, each with a
//!   fragment identifier) driving the navigation panel
//! - an anchor-link table for in-page navigation

mod parser;
mod types;

pub use parser::CONTACT_FRAGMENT;
pub use types::{AnchorLink, LineKind, Page, PageLine, Section};

/// Page construction failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    /// The source contained no renderable content.
    #[error("page contains no content")]
    Empty,
}

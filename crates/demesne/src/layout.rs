//! Box layout: member modeling, coupling-based sequencing, grid emission.
//!
//! All layout arithmetic is a pure function of the member list and the
//! [`LayoutConfig`](crate::config::LayoutConfig) constants; nothing here
//! holds state between boxes, which keeps each computation independently
//! testable.

pub mod grid;
pub mod member;
pub mod sequence;

use thiserror::Error;

/// Errors raised while laying out one box.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A member's payload is neither a flat attribute list nor exactly two
    /// lists. The whole box is invalid; other boxes are unaffected.
    #[error("Invalid elements in box {box_name}: member {member} carries {lists} lists")]
    InvalidElements {
        box_name: String,
        member: String,
        lists: usize,
    },
}

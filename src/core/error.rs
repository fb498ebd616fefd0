//! Error types for document assembly

use thiserror::Error;

/// Errors raised while building or merging documents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two paired list arguments differ in length
    #[error("{left} has {left_len} entries but {right} has {right_len}")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// A leaf value collided with a nested mapping during a tree merge
    #[error("cannot merge a leaf value with a mapping at '{path}'")]
    MergeConflict { path: String },

    /// Merge input nested deeper than the supported limit
    #[error("merge input nests deeper than {limit} levels")]
    MergeTooDeep { limit: usize },

    /// The loaded route table resource is not shaped as expected
    #[error("malformed route table: {0}")]
    MalformedRouteTable(String),
}

/// Check that two paired argument lists have the same length
pub(crate) fn ensure_same_len<A, B>(
    left: &'static str,
    left_items: &[A],
    right: &'static str,
    right_items: &[B],
) -> Result<(), ModelError> {
    if left_items.len() != right_items.len() {
        return Err(ModelError::LengthMismatch {
            left,
            left_len: left_items.len(),
            right,
            right_len: right_items.len(),
        });
    }
    Ok(())
}

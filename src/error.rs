//! Typed errors for registry construction and tensor shape handling.
//!
//! Node entry points report failures through `anyhow::Result`; these enums
//! are the structured causes that sit underneath.

use thiserror::Error;

/// Errors raised while composing or querying the node registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two mapping sources declared the same node key
    #[error("node type '{key}' is declared by both '{first}' and '{second}'")]
    DuplicateNode {
        key: String,
        first: String,
        second: String,
    },

    /// The host asked for a node key nothing registered
    #[error("unknown node type '{0}'")]
    UnknownNode(String),
}

/// Errors raised when image or mask tensors have an unusable layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("image batch is empty")]
    EmptyBatch,

    #[error("expected 3 (RGB) or 4 (RGBA) channels, found {0}")]
    UnsupportedChannels(usize),

    #[error("image {index} is {found:?} but the batch is {expected:?} (height, width, channels)")]
    MismatchedImage {
        index: usize,
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },

    #[error("image of {height}x{width} does not fit an 8-bit pixel buffer")]
    TooLarge { height: usize, width: usize },

    #[error("tensor layout error: {0}")]
    Layout(String),
}

impl From<ndarray::ShapeError> for ShapeError {
    fn from(err: ndarray::ShapeError) -> Self {
        ShapeError::Layout(err.to_string())
    }
}

//! Error types for cordon-dp.

use thiserror::Error;

/// Result type alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the solvers, the tree and the DSL façade.
///
/// These are reported once and never recovered internally; there is no
/// retry and no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A non-empty input was required.
    #[error("input must be non-empty")]
    EmptyInput,

    /// An arrow row was not strictly increasing.
    #[error("arrow row {row} is not strictly increasing at position {pos}")]
    UnsortedArrows {
        /// Offending row index
        row: usize,
        /// First position whose value does not exceed its predecessor
        pos: usize,
    },

    /// A state index was outside the tree's leaf range.
    #[error("index {index} out of range for {len} states")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of leaves in the tree
        len: usize,
    },

    /// A leaf was removed twice.
    #[error("leaf {index} was already removed")]
    LeafAlreadyRemoved {
        /// The leaf index
        index: usize,
    },

    /// The prefix-min cascade was requested on a tree that indexes plain
    /// keys instead of arrow heads.
    #[error("operation requires an arrow-head tree, but this tree indexes plain keys")]
    WrongTreeMode,

    /// The DSL descriptor did not match any known problem signature.
    #[error("problem descriptor does not match any known pattern")]
    UnknownProblem,
}

//! Error types for graph operations.

use thiserror::Error;

/// The error type for graph construction and queries.
///
/// Vertex ids are rendered with their `Debug` representation so that the
/// error stays independent of the graph's id type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An operation referenced a vertex that is not in the graph.
    #[error("unknown vertex {0}")]
    UnknownVertex(String),

    /// A vertex with this id already exists.
    #[error("vertex {0} already exists")]
    DuplicateVertex(String),

    /// Edge weights must be non-negative.
    #[error("invalid edge weight {0}: weights must be non-negative")]
    InvalidWeight(i64),

    /// No directed path leads from `from` to `to`.
    #[error("vertex {to} is unreachable from {from}")]
    Unreachable { from: String, to: String },
}

impl GraphError {
    pub(crate) fn unknown<V: std::fmt::Debug>(id: &V) -> Self {
        Self::UnknownVertex(format!("{id:?}"))
    }

    pub(crate) fn duplicate<V: std::fmt::Debug>(id: &V) -> Self {
        Self::DuplicateVertex(format!("{id:?}"))
    }

    pub(crate) fn unreachable<V: std::fmt::Debug>(source: &V, target: &V) -> Self {
        Self::Unreachable {
            from: format!("{source:?}"),
            to: format!("{target:?}"),
        }
    }
}

/// A specialized Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

//! Error types with diagnostics using miette
//!
//! Graph errors are always recoverable: a failed operation leaves the graph
//! exactly as it was.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Which kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Node,
    Link,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("node"),
            EntityKind::Link => f.write_str("link"),
        }
    }
}

/// Which end of a link failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

// ============================================================================
// Graph Errors
// ============================================================================

/// Errors from graph mutation and selection
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("{kind} id {id} already exists")]
    #[diagnostic(
        code(nodelink::graph::duplicate_id),
        help("import the record without an id to get a fresh one")
    )]
    DuplicateId { kind: EntityKind, id: String },

    #[error("link {endpoint} {id} is not a node of this graph")]
    #[diagnostic(code(nodelink::graph::invalid_endpoint))]
    InvalidEndpoint { endpoint: Endpoint, id: String },

    #[error("{kind} {id} not found")]
    #[diagnostic(code(nodelink::graph::not_found))]
    NotFound { kind: EntityKind, id: String },
}

impl GraphError {
    pub fn duplicate(kind: EntityKind, id: impl ToString) -> Self {
        GraphError::DuplicateId {
            kind,
            id: id.to_string(),
        }
    }

    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        GraphError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid_endpoint(endpoint: Endpoint, id: impl ToString) -> Self {
        GraphError::InvalidEndpoint {
            endpoint,
            id: id.to_string(),
        }
    }
}

// ============================================================================
// Snapshot Errors
// ============================================================================

/// Errors decoding a snapshot or configuration from text
#[derive(Error, Diagnostic, Debug)]
pub enum SnapshotError {
    #[error("invalid JSON: {0}")]
    #[diagnostic(code(nodelink::snapshot::json))]
    Json(#[from] serde_json::Error),
}

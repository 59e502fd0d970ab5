use std::fmt;

/// Failure of a node lookup on the engine's registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// No node with the requested id (or of the requested kind) is registered.
    NotFound { query: String },
    /// A node with the id exists but is of a different kind.
    TypeMismatch { id: String, expected: &'static str },
}

impl NodeError {
    pub(crate) fn not_found(query: impl Into<String>) -> Self {
        NodeError::NotFound { query: query.into() }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, NodeError::NotFound { .. })
    }

    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, NodeError::TypeMismatch { .. })
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::NotFound { query } => write!(f, "no draw node found for {query}"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "draw node '{id}' found, but it is not a {expected}")
            }
        }
    }
}

impl std::error::Error for NodeError {}

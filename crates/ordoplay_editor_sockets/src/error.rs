// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types shared across the crate.

use crate::node::NodeId;
use crate::port::PortAddress;
use thiserror::Error;

/// Failure reported by a listener callback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Create a new listener error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Socket engine errors
#[derive(Debug, Error)]
pub enum SocketError {
    /// A connection listener failed; the rest of the dispatch was skipped
    #[error("Connection listener failed at {port}: {source}")]
    Listener {
        /// Port the event was dispatched for
        port: PortAddress,
        /// Listener failure
        #[source]
        source: ListenerError,
    },

    /// A socket-changed listener failed; revalidation was skipped
    #[error("Socket-changed listener failed at {port}: {source}")]
    SocketChanged {
        /// Port whose socket changed
        port: PortAddress,
        /// Listener failure
        #[source]
        source: ListenerError,
    },

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port not found: {0}")]
    PortNotFound(PortAddress),

    /// Failure inside an external graph store
    #[error("Graph error: {0}")]
    Graph(String),
}

/// Result type for socket operations
pub type Result<T> = std::result::Result<T, SocketError>;

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use crate::port::{PortAddress, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A directed connection from an output port to an input port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Source node ID
    pub source: NodeId,
    /// Source output key
    pub source_output: String,
    /// Target node ID
    pub target: NodeId,
    /// Target input key
    pub target_input: String,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        source: NodeId,
        source_output: impl Into<String>,
        target: NodeId,
        target_input: impl Into<String>,
    ) -> Self {
        Self {
            id: ConnectionId::new(),
            source,
            source_output: source_output.into(),
            target,
            target_input: target_input.into(),
        }
    }

    /// Address of the source output port
    pub fn output_address(&self) -> PortAddress {
        PortAddress::new(self.source, Side::Output, self.source_output.clone())
    }

    /// Address of the target input port
    pub fn input_address(&self) -> PortAddress {
        PortAddress::new(self.target, Side::Input, self.target_input.clone())
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// Check if this connection is attached at a specific port
    pub fn attached_at(&self, node_id: NodeId, side: Side, key: &str) -> bool {
        match side {
            Side::Output => self.source == node_id && self.source_output == key,
            Side::Input => self.target == node_id && self.target_input == key,
        }
    }

    /// Address of the endpoint opposite the given side
    pub fn far_end(&self, side: Side) -> PortAddress {
        match side.opposite() {
            Side::Output => self.output_address(),
            Side::Input => self.input_address(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attached_at_checks_side() {
        let a = NodeId::new();
        let b = NodeId::new();
        let connection = Connection::new(a, "out", b, "in");

        assert!(connection.attached_at(a, Side::Output, "out"));
        assert!(connection.attached_at(b, Side::Input, "in"));
        assert!(!connection.attached_at(a, Side::Input, "out"));
        assert!(!connection.attached_at(b, Side::Input, "out"));
    }

    #[test]
    fn test_far_end() {
        let a = NodeId::new();
        let b = NodeId::new();
        let connection = Connection::new(a, "out", b, "in");

        assert_eq!(connection.far_end(Side::Input), PortAddress::new(a, Side::Output, "out"));
        assert_eq!(connection.far_end(Side::Output), PortAddress::new(b, Side::Input, "in"));
        assert!(connection.involves_node(a));
        assert!(!connection.involves_node(NodeId::new()));
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection validity checks against the current graph state.

use crate::config::MixingPolicy;
use crate::connection::Connection;
use crate::graph::GraphAccessor;
use crate::port::Side;
use crate::socket::{compare_sockets, Socket, SocketType};

/// Decides whether connections may exist between their current sockets
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityEvaluator {
    policy: MixingPolicy,
}

impl CompatibilityEvaluator {
    /// Create an evaluator with the given mixing policy
    pub fn new(policy: MixingPolicy) -> Self {
        Self { policy }
    }

    /// The mixing policy in effect
    pub fn policy(&self) -> MixingPolicy {
        self.policy
    }

    /// Resolve the `(output, input)` sockets of a connection
    pub fn sockets<T, G>(graph: &G, connection: &Connection) -> Option<(Socket<T>, Socket<T>)>
    where
        T: SocketType,
        G: GraphAccessor<T> + ?Sized,
    {
        let output = graph.socket(connection.source, Side::Output, &connection.source_output)?;
        let input = graph.socket(connection.target, Side::Input, &connection.target_input)?;
        Some((output, input))
    }

    /// Whether `output` may feed `input` under this evaluator's policy
    pub fn compare<T: SocketType>(&self, output: &Socket<T>, input: &Socket<T>) -> bool {
        compare_sockets(output, input, self.policy)
    }

    /// Whether a connection is valid against the current graph.
    ///
    /// A missing node or port makes the connection invalid.
    pub fn is_connection_valid<T, G>(&self, graph: &G, connection: &Connection) -> bool
    where
        T: SocketType,
        G: GraphAccessor<T> + ?Sized,
    {
        match Self::sockets(graph, connection) {
            Some((output, input)) => self.compare(&output, &input),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::node::{Node, NodeId};
    use crate::port::PortType;

    fn graph() -> (Graph<PortType>, NodeId, NodeId) {
        let graph = Graph::new("compat");
        let source = graph.add_node(
            Node::new("Source")
                .with_output("number", Socket::typed(PortType::Float))
                .with_output("plain", Socket::untyped()),
        );
        let target = graph.add_node(
            Node::new("Target")
                .with_input("number", Socket::typed(PortType::Float))
                .with_input("text", Socket::typed(PortType::String))
                .with_input("plain", Socket::untyped()),
        );
        (graph, source, target)
    }

    #[test]
    fn test_typed_connections() {
        let (graph, source, target) = graph();
        let evaluator = CompatibilityEvaluator::default();

        let ok = Connection::new(source, "number", target, "number");
        let bad = Connection::new(source, "number", target, "text");
        assert!(evaluator.is_connection_valid(&graph, &ok));
        assert!(!evaluator.is_connection_valid(&graph, &bad));
    }

    #[test]
    fn test_mixed_connections_follow_policy() {
        let (graph, source, target) = graph();
        let typed_to_plain = Connection::new(source, "number", target, "plain");
        let plain_to_typed = Connection::new(source, "plain", target, "number");
        let plain_to_plain = Connection::new(source, "plain", target, "plain");
        assert_eq!(CompatibilityEvaluator::default().policy(), MixingPolicy::Strict);

        let strict = CompatibilityEvaluator::new(MixingPolicy::Strict);
        assert!(!strict.is_connection_valid(&graph, &typed_to_plain));
        assert!(!strict.is_connection_valid(&graph, &plain_to_typed));
        assert!(strict.is_connection_valid(&graph, &plain_to_plain));

        let permissive = CompatibilityEvaluator::new(MixingPolicy::Permissive);
        assert_eq!(permissive.policy(), MixingPolicy::Permissive);
        assert!(permissive.is_connection_valid(&graph, &typed_to_plain));
        assert!(permissive.is_connection_valid(&graph, &plain_to_typed));
    }

    #[test]
    fn test_missing_endpoint_is_invalid() {
        let (graph, source, target) = graph();
        let evaluator = CompatibilityEvaluator::default();

        let missing_port = Connection::new(source, "number", target, "gone");
        let missing_node = Connection::new(NodeId::new(), "number", target, "number");
        assert!(!evaluator.is_connection_valid(&graph, &missing_port));
        assert!(!evaluator.is_connection_valid(&graph, &missing_node));
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph store boundary and an in-memory implementation.
//!
//! The sockets plugin does not own nodes or connections. It reads and
//! mutates them through [`GraphAccessor`] and observes mutations through a
//! [`GraphHook`] registered with the store's pipeline. [`Graph`] is a
//! ready-made store for hosts without one of their own.

use crate::connection::{Connection, ConnectionId};
use crate::error::{Result, SocketError};
use crate::node::{Node, NodeId};
use crate::port::{PortAddress, Side};
use crate::socket::{Socket, SocketType};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Mutation message passed through a graph's hook pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSignal {
    /// A connection is proposed; any hook may veto it
    ConnectionCreate(Connection),
    /// A connection has been committed
    ConnectionCreated(Connection),
    /// A connection has been removed
    ConnectionRemoved(Connection),
}

/// A stage in a graph's mutation pipeline
#[async_trait(?Send)]
pub trait GraphHook {
    /// Inspect a signal. Returning `Ok(None)` vetoes it and stops the pipeline.
    async fn handle(&self, signal: GraphSignal) -> Result<Option<GraphSignal>>;
}

/// Access to an externally owned graph
#[async_trait(?Send)]
pub trait GraphAccessor<T: SocketType> {
    /// Socket currently held by a port, or `None` if the node or port is missing
    fn socket(&self, node: NodeId, side: Side, key: &str) -> Option<Socket<T>>;

    /// Replace the socket held by a port; returns `false` if the port is missing
    fn set_socket(&self, node: NodeId, side: Side, key: &str, socket: Socket<T>) -> bool;

    /// All connections, in store order
    fn connections(&self) -> Vec<Connection>;

    /// Connections attached at `port`, in store order
    fn connections_at(&self, port: &PortAddress) -> Vec<Connection> {
        self.connections()
            .into_iter()
            .filter(|c| c.attached_at(port.node, port.side, &port.key))
            .collect()
    }

    /// Remove a connection, running the store's removal signal through its pipeline
    async fn remove_connection(&self, id: ConnectionId) -> Result<Option<Connection>>;
}

/// An in-memory node graph with a hook pipeline
pub struct Graph<T> {
    /// Graph name
    pub name: String,
    nodes: RefCell<IndexMap<NodeId, Node<T>>>,
    connections: RefCell<IndexMap<ConnectionId, Connection>>,
    hooks: RefCell<Vec<Weak<dyn GraphHook>>>,
}

impl<T: SocketType> Graph<T> {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: RefCell::new(IndexMap::new()),
            connections: RefCell::new(IndexMap::new()),
            hooks: RefCell::new(Vec::new()),
        }
    }

    /// Append a hook to the pipeline.
    ///
    /// Hooks are held weakly; a dropped hook is skipped.
    pub fn use_hook<H: GraphHook + 'static>(&self, hook: &Rc<H>) {
        let hook: Rc<dyn GraphHook> = Rc::clone(hook) as Rc<dyn GraphHook>;
        self.hooks.borrow_mut().push(Rc::downgrade(&hook));
    }

    /// Run a signal through every live hook in order
    async fn emit(&self, signal: GraphSignal) -> Result<Option<GraphSignal>> {
        let hooks: Vec<Rc<dyn GraphHook>> = {
            let mut hooks = self.hooks.borrow_mut();
            hooks.retain(|h| h.strong_count() > 0);
            hooks.iter().filter_map(Weak::upgrade).collect()
        };
        let mut current = signal;
        for hook in hooks {
            match hook.handle(current).await? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Add a node to the graph
    pub fn add_node(&self, node: Node<T>) -> NodeId {
        let id = node.id;
        self.nodes.borrow_mut().insert(id, node);
        id
    }

    /// Remove a node, removing its connections through the pipeline first
    pub async fn remove_node(&self, node_id: NodeId) -> Result<Option<Node<T>>> {
        let attached: Vec<ConnectionId> = self
            .connections
            .borrow()
            .values()
            .filter(|c| c.involves_node(node_id))
            .map(|c| c.id)
            .collect();
        for id in attached {
            self.remove_connection(id).await?;
        }
        Ok(self.nodes.borrow_mut().shift_remove(&node_id))
    }

    /// Get a snapshot of a node
    pub fn node(&self, node_id: NodeId) -> Option<Node<T>> {
        self.nodes.borrow().get(&node_id).cloned()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.borrow().keys().copied().collect()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Propose a connection.
    ///
    /// Returns `Ok(None)` when a hook vetoes it; the graph is left unchanged.
    pub async fn add_connection(&self, connection: Connection) -> Result<Option<ConnectionId>> {
        {
            let nodes = self.nodes.borrow();
            for address in [connection.output_address(), connection.input_address()] {
                let node = nodes
                    .get(&address.node)
                    .ok_or(SocketError::NodeNotFound(address.node))?;
                if node.port(address.side, &address.key).is_none() {
                    return Err(SocketError::PortNotFound(address));
                }
            }
        }

        let Some(GraphSignal::ConnectionCreate(connection)) =
            self.emit(GraphSignal::ConnectionCreate(connection)).await?
        else {
            return Ok(None);
        };

        let id = connection.id;
        self.connections
            .borrow_mut()
            .insert(id, connection.clone());
        self.emit(GraphSignal::ConnectionCreated(connection)).await?;
        Ok(Some(id))
    }

    /// Connect `source`'s output `source_output` to `target`'s input `target_input`
    pub async fn connect(
        &self,
        source: NodeId,
        source_output: &str,
        target: NodeId,
        target_input: &str,
    ) -> Result<Option<ConnectionId>> {
        self.add_connection(Connection::new(source, source_output, target, target_input))
            .await
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.borrow().get(&connection_id).cloned()
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.borrow().len()
    }
}

#[async_trait(?Send)]
impl<T: SocketType> GraphAccessor<T> for Graph<T> {
    fn socket(&self, node: NodeId, side: Side, key: &str) -> Option<Socket<T>> {
        self.nodes
            .borrow()
            .get(&node)?
            .port(side, key)
            .map(|port| port.socket.clone())
    }

    fn set_socket(&self, node: NodeId, side: Side, key: &str, socket: Socket<T>) -> bool {
        let mut nodes = self.nodes.borrow_mut();
        let Some(port) = nodes.get_mut(&node).and_then(|n| n.port_mut(side, key)) else {
            return false;
        };
        port.socket = socket;
        true
    }

    fn connections(&self) -> Vec<Connection> {
        self.connections.borrow().values().cloned().collect()
    }

    async fn remove_connection(&self, id: ConnectionId) -> Result<Option<Connection>> {
        let Some(connection) = self.connections.borrow_mut().shift_remove(&id) else {
            return Ok(None);
        };
        self.emit(GraphSignal::ConnectionRemoved(connection.clone()))
            .await?;
        Ok(Some(connection))
    }
}

impl<T: SocketType> Default for Graph<T> {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

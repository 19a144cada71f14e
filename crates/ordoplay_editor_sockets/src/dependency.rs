// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node-scoped access to the sockets plugin.

use crate::error::Result;
use crate::listener::{ConnectionListener, ListenerHandle};
use crate::node::NodeId;
use crate::plugin::SocketsPlugin;
use crate::port::Side;
use crate::socket::{Socket, SocketType};

/// The plugin as seen by a single node
///
/// Handed to node implementations so they can watch and retype their own
/// ports without passing their id around.
pub struct NodeDependency<'a, T: SocketType> {
    plugin: &'a SocketsPlugin<T>,
    node: NodeId,
}

impl<'a, T: SocketType> NodeDependency<'a, T> {
    pub(crate) fn new(plugin: &'a SocketsPlugin<T>, node: NodeId) -> Self {
        Self { plugin, node }
    }

    /// The node this view is bound to
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Register a listener on one of this node's ports
    pub fn add_port_listener(
        &self,
        side: Side,
        key: impl Into<String>,
        listener: impl ConnectionListener<T> + 'static,
    ) -> ListenerHandle {
        self.plugin.add_port_listener(self.node, side, key, listener)
    }

    /// Unregister a listener from one of this node's ports
    pub fn remove_port_listener(
        &self,
        side: Side,
        key: impl Into<String>,
        handle: ListenerHandle,
    ) -> bool {
        self.plugin.remove_port_listener(self.node, side, key, handle)
    }

    /// Register a listener for every port of this node
    pub fn add_node_listener(
        &self,
        listener: impl ConnectionListener<T> + 'static,
    ) -> ListenerHandle {
        self.plugin.add_node_listener(self.node, listener)
    }

    /// Unregister a node-level listener
    pub fn remove_node_listener(&self, handle: ListenerHandle) -> bool {
        self.plugin.remove_node_listener(self.node, handle)
    }

    /// Assign a new socket to one of this node's ports
    pub async fn update_socket(&self, side: Side, key: &str, socket: Socket<T>) -> Result<()> {
        self.plugin.update_socket(self.node, side, key, socket).await
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! The sockets plugin: listener API and the graph pipeline hook.
//!
//! The plugin sits in a graph's mutation pipeline. It vetoes proposed
//! connections whose sockets are incompatible and fans out `Created` and
//! `Removed` events to both endpoints of every committed or removed
//! connection: the source's output port first, then the target's input port.

use crate::compatibility::CompatibilityEvaluator;
use crate::config::SocketsConfig;
use crate::connection::Connection;
use crate::dependency::NodeDependency;
use crate::dispatch::dispatch;
use crate::error::Result;
use crate::graph::{Graph, GraphAccessor, GraphHook, GraphSignal};
use crate::listener::{
    ConnectionEvent, ConnectionListener, ListenerHandle, SocketChangedListener,
};
use crate::node::NodeId;
use crate::port::{PortAddress, Side};
use crate::registry::{ListenerRegistry, ListenerScope};
use crate::socket::SocketType;
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

/// Socket compatibility and connection callbacks for one graph
pub struct SocketsPlugin<T: SocketType> {
    pub(crate) graph: Rc<dyn GraphAccessor<T>>,
    pub(crate) evaluator: CompatibilityEvaluator,
    pub(crate) registry: RefCell<ListenerRegistry<T>>,
    config: SocketsConfig,
}

impl<T: SocketType> SocketsPlugin<T> {
    /// Create a plugin over an external graph.
    ///
    /// The caller is responsible for registering the plugin as a hook in
    /// the graph's mutation pipeline.
    pub fn new(graph: Rc<dyn GraphAccessor<T>>, config: SocketsConfig) -> Self {
        Self {
            graph,
            evaluator: CompatibilityEvaluator::new(config.mixing),
            registry: RefCell::new(ListenerRegistry::new()),
            config,
        }
    }

    /// Create a plugin over an in-memory graph and register it as a hook
    pub fn attach(graph: &Rc<Graph<T>>, config: SocketsConfig) -> Rc<Self> {
        let accessor: Rc<dyn GraphAccessor<T>> = Rc::clone(graph) as Rc<dyn GraphAccessor<T>>;
        let plugin = Rc::new(Self::new(accessor, config));
        graph.use_hook(&plugin);
        plugin
    }

    /// Settings in effect
    pub fn config(&self) -> &SocketsConfig {
        &self.config
    }

    /// Node-scoped view of this plugin
    pub fn node_dependency(&self, node: NodeId) -> NodeDependency<'_, T> {
        NodeDependency::new(self, node)
    }

    /// Register a listener for events on one port
    pub fn add_port_listener(
        &self,
        node: NodeId,
        side: Side,
        key: impl Into<String>,
        listener: impl ConnectionListener<T> + 'static,
    ) -> ListenerHandle {
        let scope = ListenerScope::Port(PortAddress::new(node, side, key));
        self.registry.borrow_mut().add(scope, Rc::new(listener))
    }

    /// Unregister a port listener; returns `false` if it was not registered there
    pub fn remove_port_listener(
        &self,
        node: NodeId,
        side: Side,
        key: impl Into<String>,
        handle: ListenerHandle,
    ) -> bool {
        let scope = ListenerScope::Port(PortAddress::new(node, side, key));
        self.registry.borrow_mut().remove(&scope, handle)
    }

    /// Register a listener for events on every port of a node
    pub fn add_node_listener(
        &self,
        node: NodeId,
        listener: impl ConnectionListener<T> + 'static,
    ) -> ListenerHandle {
        self.registry
            .borrow_mut()
            .add(ListenerScope::Node(node), Rc::new(listener))
    }

    /// Unregister a node listener; returns `false` if it was not registered there
    pub fn remove_node_listener(&self, node: NodeId, handle: ListenerHandle) -> bool {
        self.registry
            .borrow_mut()
            .remove(&ListenerScope::Node(node), handle)
    }

    /// Register a listener notified whenever any port's socket is updated
    pub fn add_socket_changed_listener(
        &self,
        listener: impl SocketChangedListener<T> + 'static,
    ) -> ListenerHandle {
        self.registry
            .borrow_mut()
            .add_socket_changed(Rc::new(listener))
    }

    /// Unregister a socket-changed listener
    pub fn remove_socket_changed_listener(&self, handle: ListenerHandle) -> bool {
        self.registry.borrow_mut().remove_socket_changed(handle)
    }

    /// Drop every listener registered for `node`.
    ///
    /// Call this when deleting a node; it is never done implicitly.
    pub fn dispose_node(&self, node: NodeId) -> usize {
        let removed = self.registry.borrow_mut().dispose_node(node);
        tracing::debug!(%node, removed, "disposed node listeners");
        removed
    }

    /// Whether a connection is valid against the current graph
    pub fn is_connection_valid(&self, connection: &Connection) -> bool {
        self.evaluator.is_connection_valid(&*self.graph, connection)
    }

    async fn connection_created(&self, connection: &Connection) -> Result<()> {
        let Some((output, input)) = CompatibilityEvaluator::sockets(&*self.graph, connection)
        else {
            tracing::warn!(connection = %connection.id, "committed connection has a missing endpoint");
            return Ok(());
        };
        let at_source = ConnectionEvent::Created {
            connection: connection.clone(),
            other_socket: input,
        };
        dispatch(&self.registry, &connection.output_address(), &at_source).await?;
        let at_target = ConnectionEvent::Created {
            connection: connection.clone(),
            other_socket: output,
        };
        dispatch(&self.registry, &connection.input_address(), &at_target).await
    }

    async fn connection_removed(&self, connection: &Connection) -> Result<()> {
        let event = ConnectionEvent::Removed {
            connection: connection.clone(),
        };
        dispatch(&self.registry, &connection.output_address(), &event).await?;
        dispatch(&self.registry, &connection.input_address(), &event).await
    }
}

#[async_trait(?Send)]
impl<T: SocketType> GraphHook for SocketsPlugin<T> {
    async fn handle(&self, signal: GraphSignal) -> Result<Option<GraphSignal>> {
        match &signal {
            GraphSignal::ConnectionCreate(connection) => {
                if !self.is_connection_valid(connection) {
                    let sockets = CompatibilityEvaluator::sockets(&*self.graph, connection);
                    tracing::debug!(
                        connection = %connection.id,
                        ?sockets,
                        "sockets are incompatible, connection rejected"
                    );
                    return Ok(None);
                }
            }
            GraphSignal::ConnectionCreated(connection) => {
                self.connection_created(connection).await?;
            }
            GraphSignal::ConnectionRemoved(connection) => {
                self.connection_removed(connection).await?;
            }
        }
        Ok(Some(signal))
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Listener registry.
//!
//! Listeners live in one flat map keyed by [`ListenerScope`]. Entries are
//! created on first registration and kept until the caller removes them or
//! disposes of the node; deleting a node from the graph does not touch them.

use crate::listener::{ConnectionListener, ListenerHandle, SocketChangedListener};
use crate::node::NodeId;
use crate::port::{PortAddress, Side};
use crate::socket::SocketType;
use indexmap::IndexMap;
use std::rc::Rc;

/// What a connection listener is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// Every port event on a node
    Node(NodeId),
    /// Events on one port only
    Port(PortAddress),
}

impl ListenerScope {
    fn node(&self) -> NodeId {
        match self {
            Self::Node(node) => *node,
            Self::Port(port) => port.node,
        }
    }
}

type Entries<L> = Vec<(ListenerHandle, Rc<L>)>;

/// Ordered listener collections for one plugin instance
pub struct ListenerRegistry<T: SocketType> {
    next_handle: u64,
    connection: IndexMap<ListenerScope, Entries<dyn ConnectionListener<T>>>,
    socket_changed: Entries<dyn SocketChangedListener<T>>,
}

impl<T: SocketType> ListenerRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            connection: IndexMap::new(),
            socket_changed: Vec::new(),
        }
    }

    fn issue_handle(&mut self) -> ListenerHandle {
        self.next_handle += 1;
        ListenerHandle(self.next_handle)
    }

    /// Append a connection listener to `scope`
    pub fn add(
        &mut self,
        scope: ListenerScope,
        listener: Rc<dyn ConnectionListener<T>>,
    ) -> ListenerHandle {
        let handle = self.issue_handle();
        self.connection
            .entry(scope)
            .or_default()
            .push((handle, listener));
        handle
    }

    /// Remove a connection listener; returns `false` if it was not registered at `scope`
    pub fn remove(&mut self, scope: &ListenerScope, handle: ListenerHandle) -> bool {
        let Some(entries) = self.connection.get_mut(scope) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(h, _)| *h != handle);
        entries.len() != before
    }

    /// Append a socket-changed listener
    pub fn add_socket_changed(
        &mut self,
        listener: Rc<dyn SocketChangedListener<T>>,
    ) -> ListenerHandle {
        let handle = self.issue_handle();
        self.socket_changed.push((handle, listener));
        handle
    }

    /// Remove a socket-changed listener
    pub fn remove_socket_changed(&mut self, handle: ListenerHandle) -> bool {
        let before = self.socket_changed.len();
        self.socket_changed.retain(|(h, _)| *h != handle);
        self.socket_changed.len() != before
    }

    /// Listeners for `scope` in registration order
    pub fn listeners(&self, scope: &ListenerScope) -> Vec<Rc<dyn ConnectionListener<T>>> {
        self.connection
            .get(scope)
            .map(|entries| entries.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default()
    }

    /// Listeners to invoke for an event at `port`: node-level first, then port-level
    pub fn listeners_for(&self, port: &PortAddress) -> Vec<Rc<dyn ConnectionListener<T>>> {
        let mut listeners = self.listeners(&ListenerScope::Node(port.node));
        listeners.extend(self.listeners(&ListenerScope::Port(port.clone())));
        listeners
    }

    /// Socket-changed listeners in registration order
    pub fn socket_changed_listeners(&self) -> Vec<Rc<dyn SocketChangedListener<T>>> {
        self.socket_changed
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect()
    }

    /// Drop every node-level and port-level listener registered for `node`.
    ///
    /// Returns the number of listeners removed.
    pub fn dispose_node(&mut self, node: NodeId) -> usize {
        let mut removed = 0;
        self.connection.retain(|scope, entries| {
            if scope.node() == node {
                removed += entries.len();
                false
            } else {
                true
            }
        });
        removed
    }

    /// Number of connection listeners registered at `scope`
    pub fn len(&self, scope: &ListenerScope) -> usize {
        self.connection.get(scope).map_or(0, Vec::len)
    }

    /// Whether no connection listener is registered at a port
    pub fn is_port_empty(&self, node: NodeId, side: Side, key: &str) -> bool {
        self.len(&ListenerScope::Port(PortAddress::new(node, side, key))) == 0
    }
}

impl<T: SocketType> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use crate::listener::ConnectionEvent;
    use crate::port::PortType;
    use futures::future::LocalBoxFuture;
    use futures::FutureExt;

    struct Noop;

    impl ConnectionListener<PortType> for Noop {
        fn on_event<'a>(
            &'a self,
            _port: &'a PortAddress,
            _event: &'a ConnectionEvent<PortType>,
        ) -> LocalBoxFuture<'a, Result<(), ListenerError>> {
            async { Ok(()) }.boxed_local()
        }
    }

    fn noop() -> Rc<dyn ConnectionListener<PortType>> {
        Rc::new(Noop)
    }

    #[test]
    fn test_unpopulated_scope_is_empty() {
        let registry = ListenerRegistry::<PortType>::new();
        let port = PortAddress::new(NodeId::new(), Side::Input, "in");

        assert!(registry.listeners_for(&port).is_empty());
        assert!(registry.is_port_empty(port.node, Side::Input, "in"));
    }

    #[test]
    fn test_node_listeners_precede_port_listeners() {
        let mut registry = ListenerRegistry::<PortType>::new();
        let port = PortAddress::new(NodeId::new(), Side::Output, "out");
        let on_port = noop();
        let on_node = noop();

        registry.add(ListenerScope::Port(port.clone()), Rc::clone(&on_port));
        registry.add(ListenerScope::Node(port.node), Rc::clone(&on_node));

        let listeners = registry.listeners_for(&port);
        assert_eq!(listeners.len(), 2);
        assert!(Rc::ptr_eq(&listeners[0], &on_node));
        assert!(Rc::ptr_eq(&listeners[1], &on_port));
    }

    #[test]
    fn test_remove_by_handle() {
        let mut registry = ListenerRegistry::<PortType>::new();
        let scope = ListenerScope::Port(PortAddress::new(NodeId::new(), Side::Input, "in"));
        let shared = noop();

        // Same listener registered twice gets two independent handles
        let first = registry.add(scope.clone(), Rc::clone(&shared));
        let second = registry.add(scope.clone(), Rc::clone(&shared));
        assert_ne!(first, second);

        assert!(registry.remove(&scope, first));
        assert_eq!(registry.len(&scope), 1);
        assert!(!registry.remove(&scope, first));
        assert!(!registry.remove(&ListenerScope::Node(NodeId::new()), second));
        assert_eq!(registry.len(&scope), 1);
    }

    #[test]
    fn test_dispose_node() {
        let mut registry = ListenerRegistry::<PortType>::new();
        let node = NodeId::new();
        let other = NodeId::new();

        registry.add(ListenerScope::Node(node), noop());
        registry.add(ListenerScope::Port(PortAddress::new(node, Side::Input, "in")), noop());
        registry.add(ListenerScope::Node(other), noop());

        assert_eq!(registry.dispose_node(node), 2);
        assert!(registry.listeners(&ListenerScope::Node(node)).is_empty());
        assert_eq!(registry.len(&ListenerScope::Node(other)), 1);
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions: identity plus keyed input and output ports.

use crate::port::{Port, Side};
use crate::socket::{Socket, SocketType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A node instance in the graph
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Input ports by key
    pub inputs: IndexMap<String, Port<T>>,
    /// Output ports by key
    pub outputs: IndexMap<String, Port<T>>,
}

impl<T: SocketType> Node<T> {
    /// Create a new node without ports
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Add an input port
    pub fn with_input(mut self, key: impl Into<String>, socket: Socket<T>) -> Self {
        let port = Port::new(key, socket);
        self.inputs.insert(port.key.clone(), port);
        self
    }

    /// Add an output port
    pub fn with_output(mut self, key: impl Into<String>, socket: Socket<T>) -> Self {
        let port = Port::new(key, socket);
        self.outputs.insert(port.key.clone(), port);
        self
    }

    /// Get a port by side and key
    pub fn port(&self, side: Side, key: &str) -> Option<&Port<T>> {
        match side {
            Side::Input => self.inputs.get(key),
            Side::Output => self.outputs.get(key),
        }
    }

    /// Get a mutable port by side and key
    pub fn port_mut(&mut self, side: Side, key: &str) -> Option<&mut Port<T>> {
        match side {
            Side::Input => self.inputs.get_mut(key),
            Side::Output => self.outputs.get_mut(key),
        }
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port<T>> {
        self.inputs.values().chain(self.outputs.values())
    }
}

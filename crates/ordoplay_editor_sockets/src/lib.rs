// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket typing and connection callbacks for `OrdoPlay` Editor node graphs.
//!
//! This crate keeps the connections of a node graph type-correct while the
//! graph is edited:
//! - Proposed connections are vetoed when their sockets are incompatible
//! - Changing a port's socket revalidates and prunes its connections
//! - Listeners on nodes and ports are told when connections are created,
//!   removed, or when the socket at the other end changes
//!
//! ## Architecture
//!
//! The graph itself (nodes, connections, ids) is owned elsewhere and reached
//! through [`GraphAccessor`]. [`SocketsPlugin`] registers as a [`GraphHook`]
//! in the graph's mutation pipeline. Everything runs on one thread; listener
//! callbacks are awaited in registration order and may re-enter the plugin.
//!
//! Compatibility is decided by the consumer: a connection from output `a`
//! to input `b` is allowed when `b`'s type is assignable by `a`'s type.
//! Typed and untyped sockets never connect unless [`MixingPolicy::Permissive`]
//! is configured.

pub mod socket;
pub mod port;
pub mod node;
pub mod connection;
pub mod config;
pub mod error;
pub mod compatibility;
pub mod listener;
pub mod registry;
pub mod dispatch;
pub mod graph;
pub mod plugin;
pub mod coordinator;
pub mod dependency;

pub use compatibility::CompatibilityEvaluator;
pub use config::{ConfigError, MixingPolicy, SocketsConfig};
pub use connection::{Connection, ConnectionId};
pub use dependency::NodeDependency;
pub use error::{ListenerError, SocketError};
pub use graph::{Graph, GraphAccessor, GraphHook, GraphSignal};
pub use listener::{ConnectionEvent, ConnectionListener, ListenerHandle, SocketChangedListener};
pub use node::{Node, NodeId};
pub use plugin::SocketsPlugin;
pub use port::{Port, PortAddress, PortType, Side};
pub use socket::{compare_sockets, Socket, SocketType, TypeCell};

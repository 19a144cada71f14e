// SPDX-License-Identifier: MIT OR Apache-2.0
//! Listener callbacks and the lifecycle events they receive.
//!
//! Listeners are awaited one after another, so they return local
//! (non-`Send`) futures. Any `Fn` closure returning such a future is a
//! listener:
//!
//! ```ignore
//! plugin.add_port_listener(node, Side::Input, "in", |port, event| async move {
//!     tracing::info!(%port, ?event, "connection event");
//!     Ok(())
//! });
//! ```

use crate::connection::Connection;
use crate::error::ListenerError;
use crate::port::PortAddress;
use crate::socket::{Socket, SocketType};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::future::Future;

/// Lifecycle event delivered to connection listeners
#[derive(Debug, Clone)]
pub enum ConnectionEvent<T> {
    /// A connection was committed
    Created {
        /// The new connection
        connection: Connection,
        /// Socket at the opposite endpoint
        other_socket: Socket<T>,
    },
    /// A connection was removed
    Removed {
        /// The removed connection
        connection: Connection,
    },
    /// The socket at the opposite endpoint of a surviving connection changed
    Changed {
        /// The surviving connection
        connection: Connection,
        /// The new socket at the opposite endpoint
        other_socket: Socket<T>,
    },
}

impl<T> ConnectionEvent<T> {
    /// The connection this event refers to
    pub fn connection(&self) -> &Connection {
        match self {
            Self::Created { connection, .. }
            | Self::Removed { connection }
            | Self::Changed { connection, .. } => connection,
        }
    }

    /// Socket at the opposite endpoint, absent for removals
    pub fn other_socket(&self) -> Option<&Socket<T>> {
        match self {
            Self::Created { other_socket, .. } | Self::Changed { other_socket, .. } => {
                Some(other_socket)
            }
            Self::Removed { .. } => None,
        }
    }
}

/// Callback for connection lifecycle events on a node or a single port
pub trait ConnectionListener<T: SocketType> {
    /// Handle an event dispatched at `port`
    fn on_event<'a>(
        &'a self,
        port: &'a PortAddress,
        event: &'a ConnectionEvent<T>,
    ) -> LocalBoxFuture<'a, Result<(), ListenerError>>;
}

impl<T, F, Fut> ConnectionListener<T> for F
where
    T: SocketType,
    F: Fn(PortAddress, ConnectionEvent<T>) -> Fut,
    Fut: Future<Output = Result<(), ListenerError>> + 'static,
{
    fn on_event<'a>(
        &'a self,
        port: &'a PortAddress,
        event: &'a ConnectionEvent<T>,
    ) -> LocalBoxFuture<'a, Result<(), ListenerError>> {
        (self)(port.clone(), event.clone()).boxed_local()
    }
}

/// Callback fired once per socket update, before any revalidation
pub trait SocketChangedListener<T: SocketType> {
    /// Handle the new `socket` assigned at `port`
    fn on_socket_changed<'a>(
        &'a self,
        port: &'a PortAddress,
        socket: &'a Socket<T>,
    ) -> LocalBoxFuture<'a, Result<(), ListenerError>>;
}

impl<T, F, Fut> SocketChangedListener<T> for F
where
    T: SocketType,
    F: Fn(PortAddress, Socket<T>) -> Fut,
    Fut: Future<Output = Result<(), ListenerError>> + 'static,
{
    fn on_socket_changed<'a>(
        &'a self,
        port: &'a PortAddress,
        socket: &'a Socket<T>,
    ) -> LocalBoxFuture<'a, Result<(), ListenerError>> {
        (self)(port.clone(), socket.clone()).boxed_local()
    }
}

/// Registration token returned by every `add_*_listener` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub(crate) u64);

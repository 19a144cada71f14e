// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequential, awaited event dispatch.

use crate::error::{Result, SocketError};
use crate::listener::ConnectionEvent;
use crate::port::PortAddress;
use crate::registry::ListenerRegistry;
use crate::socket::{Socket, SocketType};
use std::cell::RefCell;

/// Invoke every listener for `port`, node-level ones first, each awaited
/// before the next. The first failure aborts the remaining listeners.
///
/// The listener list is captured before the first call, so listeners
/// registered or removed while this dispatch runs only affect later events.
pub async fn dispatch<T: SocketType>(
    registry: &RefCell<ListenerRegistry<T>>,
    port: &PortAddress,
    event: &ConnectionEvent<T>,
) -> Result<()> {
    let listeners = registry.borrow().listeners_for(port);
    tracing::trace!(
        %port,
        connection = %event.connection().id,
        listeners = listeners.len(),
        "dispatching connection event"
    );
    for listener in listeners {
        listener
            .on_event(port, event)
            .await
            .map_err(|source| SocketError::Listener {
                port: port.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Notify socket-changed listeners of the new socket at `port`
pub async fn dispatch_socket_changed<T: SocketType>(
    registry: &RefCell<ListenerRegistry<T>>,
    port: &PortAddress,
    socket: &Socket<T>,
) -> Result<()> {
    let listeners = registry.borrow().socket_changed_listeners();
    for listener in listeners {
        listener
            .on_socket_changed(port, socket)
            .await
            .map_err(|source| SocketError::SocketChanged {
                port: port.clone(),
                source,
            })?;
    }
    Ok(())
}

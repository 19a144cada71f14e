// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime socket changes and revalidation of existing connections.

use crate::compatibility::CompatibilityEvaluator;
use crate::connection::Connection;
use crate::dispatch::{dispatch, dispatch_socket_changed};
use crate::error::Result;
use crate::listener::ConnectionEvent;
use crate::node::NodeId;
use crate::plugin::SocketsPlugin;
use crate::port::{PortAddress, Side};
use crate::socket::{Socket, SocketType};

impl<T: SocketType> SocketsPlugin<T> {
    /// Assign a new socket to a port and revalidate its connections.
    ///
    /// A self-updatable socket is mutated in place when `socket` is typed;
    /// otherwise the port's socket is replaced. Socket-changed listeners run
    /// once, then every connection at the port is rechecked and invalid ones
    /// are removed through the graph. Each survivor's far endpoint receives
    /// [`ConnectionEvent::Changed`] carrying `socket`.
    ///
    /// Does nothing if the port does not exist. Overlapping updates of the
    /// same port are not serialized; the last one to assign wins.
    pub async fn update_socket(
        &self,
        node: NodeId,
        side: Side,
        key: &str,
        socket: Socket<T>,
    ) -> Result<()> {
        let Some(current) = self.graph.socket(node, side, key) else {
            tracing::trace!(%node, %side, key, "no such port, socket update ignored");
            return Ok(());
        };

        match (current.type_cell(), socket.socket_type()) {
            (Some(cell), Some(socket_type)) => cell.set(socket_type),
            _ => {
                self.graph.set_socket(node, side, key, socket.clone());
            }
        }

        let port = PortAddress::new(node, side, key);
        dispatch_socket_changed(&self.registry, &port, &socket).await?;

        for connection in self.graph.connections_at(&port) {
            self.recheck_connection(&connection).await?;
        }

        for connection in self.graph.connections_at(&port) {
            let event = ConnectionEvent::Changed {
                connection: connection.clone(),
                other_socket: socket.clone(),
            };
            dispatch(&self.registry, &connection.far_end(side), &event).await?;
        }
        Ok(())
    }

    /// Revalidate every connection touching `node`, removing invalid ones
    pub async fn update_types(&self, node: NodeId) -> Result<()> {
        let connections: Vec<Connection> = self
            .graph
            .connections()
            .into_iter()
            .filter(|c| c.involves_node(node))
            .collect();
        for connection in connections {
            self.recheck_connection(&connection).await?;
        }
        Ok(())
    }

    /// Remove `connection` if it is no longer valid.
    ///
    /// Returns `true` if the connection was kept. Removal goes through the
    /// graph, which reports it back to this plugin as a removed signal.
    pub async fn recheck_connection(&self, connection: &Connection) -> Result<bool> {
        if self.is_connection_valid(connection) {
            return Ok(true);
        }
        tracing::debug!(
            connection = %connection.id,
            sockets = ?CompatibilityEvaluator::sockets(&*self.graph, connection),
            "connection no longer valid, removing"
        );
        self.graph.remove_connection(connection.id).await?;
        Ok(false)
    }
}

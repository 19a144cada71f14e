// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use ordoplay_editor_sockets::{
    ConnectionEvent, ConnectionId, ConnectionListener, Graph, ListenerError, PortAddress,
    PortType, Socket, SocketChangedListener, SocketsConfig, SocketsPlugin,
};
use std::cell::RefCell;
use std::rc::Rc;

/// One observed callback
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub tag: &'static str,
    pub kind: &'static str,
    pub connection: Option<ConnectionId>,
    pub other: Option<PortType>,
}

impl Seen {
    pub fn new(
        tag: &'static str,
        kind: &'static str,
        connection: ConnectionId,
        other: Option<PortType>,
    ) -> Self {
        Self {
            tag,
            kind,
            connection: Some(connection),
            other,
        }
    }
}

pub type Log = Rc<RefCell<Vec<Seen>>>;

pub struct Fixture {
    pub graph: Rc<Graph<PortType>>,
    pub plugin: Rc<SocketsPlugin<PortType>>,
    pub log: Log,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(SocketsConfig::default())
    }

    pub fn with_config(config: SocketsConfig) -> Self {
        init_tracing();
        let graph = Rc::new(Graph::new("test"));
        let plugin = SocketsPlugin::attach(&graph, config);
        Self {
            graph,
            plugin,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn kind_of(event: &ConnectionEvent<PortType>) -> &'static str {
    match event {
        ConnectionEvent::Created { .. } => "created",
        ConnectionEvent::Removed { .. } => "removed",
        ConnectionEvent::Changed { .. } => "changed",
    }
}

/// Listener appending every event to `log` under `tag`
pub fn record(log: &Log, tag: &'static str) -> impl ConnectionListener<PortType> + 'static {
    let log = Rc::clone(log);
    move |_port: PortAddress, event: ConnectionEvent<PortType>| {
        log.borrow_mut().push(Seen {
            tag,
            kind: kind_of(&event),
            connection: Some(event.connection().id),
            other: event.other_socket().and_then(Socket::socket_type),
        });
        std::future::ready(Ok::<(), ListenerError>(()))
    }
}

/// Socket-changed listener appending to `log` under `tag`
pub fn record_socket_changed(
    log: &Log,
    tag: &'static str,
) -> impl SocketChangedListener<PortType> + 'static {
    let log = Rc::clone(log);
    move |_port: PortAddress, socket: Socket<PortType>| {
        log.borrow_mut().push(Seen {
            tag,
            kind: "socket-changed",
            connection: None,
            other: socket.socket_type(),
        });
        std::future::ready(Ok::<(), ListenerError>(()))
    }
}

/// Listener that always fails
pub fn failing(message: &'static str) -> impl ConnectionListener<PortType> + 'static {
    move |_port: PortAddress, _event: ConnectionEvent<PortType>| {
        std::future::ready(Err::<(), ListenerError>(ListenerError::new(message)))
    }
}

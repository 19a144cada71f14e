// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use crate::node::NodeId;
use crate::socket::{Socket, SocketType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a node a port sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Input port
    Input,
    /// Output port
    Output,
}

impl Side {
    /// The side a connection attaches to at the other end
    pub fn opposite(self) -> Self {
        match self {
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Fully qualified port location: node, side and port key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortAddress {
    /// Owning node
    pub node: NodeId,
    /// Input or output side
    pub side: Side,
    /// Port key, unique per side of a node
    pub key: String,
}

impl PortAddress {
    /// Create a new port address
    pub fn new(node: NodeId, side: Side, key: impl Into<String>) -> Self {
        Self {
            node,
            side,
            key: key.into(),
        }
    }
}

impl fmt::Display for PortAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.node, self.side, self.key)
    }
}

/// Data type that can flow through ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortType {
    /// Execution flow (for gameplay graphs)
    Exec,
    /// Boolean value
    Bool,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// 2D vector
    Vector2,
    /// 3D vector
    Vector3,
    /// 4D vector / Color
    Vector4,
    /// Color (RGBA)
    Color,
    /// Matrix 4x4
    Mat4,
    /// Texture sampler
    Texture,
    /// Material reference
    Material,
    /// Entity reference
    Entity,
    /// String value
    String,
    /// Any type (for generic nodes)
    Any,
    /// Custom type
    Custom(String),
}

impl PortType {
    /// Check if a value of this type can flow into a port of type `other`.
    ///
    /// Directed: `self` is the producing side, so `Float` flows into
    /// `Vector4` but `Vector4` does not flow into `Float`.
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        // Any type can connect to anything
        if matches!(self, Self::Any) || matches!(other, Self::Any) {
            return true;
        }

        if self == other {
            return true;
        }

        // Implicit conversions
        match (self, other) {
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => true,
            (Self::Float, Self::Vector2 | Self::Vector3 | Self::Vector4) => true,
            (Self::Vector2, Self::Vector3 | Self::Vector4) => true,
            (Self::Vector3, Self::Vector4) => true,
            (Self::Color, Self::Vector4) | (Self::Vector4, Self::Color) => true,
            _ => false,
        }
    }
}

impl SocketType for PortType {
    // The receiving type is `self` here, so the conversion check runs from `other`
    fn assignable_by(&self, other: &Self) -> bool {
        other.can_connect_to(self)
    }
}

/// A named slot on a node holding exactly one socket
#[derive(Debug, Clone)]
pub struct Port<T> {
    /// Port key
    pub key: String,
    /// Current socket
    pub socket: Socket<T>,
}

impl<T: SocketType> Port<T> {
    /// Create a new port
    pub fn new(key: impl Into<String>, socket: Socket<T>) -> Self {
        Self {
            key: key.into(),
            socket,
        }
    }
}

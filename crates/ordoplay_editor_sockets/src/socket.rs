// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sockets: the typed-or-untyped descriptors held by ports.
//!
//! A socket either carries no type at all, a fixed type, or a shared type
//! cell that can be updated in place. Whether two sockets may be joined is
//! decided by [`compare_sockets`].

use crate::config::MixingPolicy;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Opaque domain type carried by a typed socket.
///
/// The engine never inspects implementors beyond this predicate.
pub trait SocketType: Clone + fmt::Debug + 'static {
    /// Returns `true` if a value of `other` may flow into a slot expecting `self`.
    fn assignable_by(&self, other: &Self) -> bool;
}

/// Shared, interior-mutable type slot.
///
/// Cloning a cell yields another handle to the same slot, so an update made
/// through one handle is visible through all of them.
pub struct TypeCell<T>(Rc<RefCell<T>>);

impl<T: SocketType> TypeCell<T> {
    /// Create a new cell holding `value`
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Get a copy of the current type
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }

    /// Replace the current type in place
    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    /// Check whether two handles point at the same slot
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for TypeCell<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for TypeCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeCell").field(&*self.0.borrow()).finish()
    }
}

/// Descriptor attached to a port
#[derive(Debug, Clone)]
pub enum Socket<T> {
    /// No type; connects freely with other untyped sockets
    Untyped,
    /// Fixed type, changed only by replacing the socket
    Static(T),
    /// Type held in a shared cell that can be updated in place
    SelfUpdatable(TypeCell<T>),
}

impl<T: SocketType> Socket<T> {
    /// Create an untyped socket
    pub fn untyped() -> Self {
        Self::Untyped
    }

    /// Create a socket with a fixed type
    pub fn typed(socket_type: T) -> Self {
        Self::Static(socket_type)
    }

    /// Create a socket whose type lives in a fresh shared cell
    pub fn updatable(socket_type: T) -> Self {
        Self::SelfUpdatable(TypeCell::new(socket_type))
    }

    /// Whether this socket carries a type
    pub fn is_typed(&self) -> bool {
        !matches!(self, Self::Untyped)
    }

    /// Current type, if any
    pub fn socket_type(&self) -> Option<T> {
        match self {
            Self::Untyped => None,
            Self::Static(t) => Some(t.clone()),
            Self::SelfUpdatable(cell) => Some(cell.get()),
        }
    }

    /// In-place mutation capability, if this socket has one
    pub fn type_cell(&self) -> Option<&TypeCell<T>> {
        match self {
            Self::SelfUpdatable(cell) => Some(cell),
            _ => None,
        }
    }

    /// Whether `other` may feed into this socket.
    ///
    /// Only meaningful when both sides are typed; returns `false` otherwise.
    pub fn assignable_from(&self, other: &Socket<T>) -> bool {
        match (self.socket_type(), other.socket_type()) {
            (Some(this), Some(that)) => this.assignable_by(&that),
            _ => false,
        }
    }
}

/// Decide whether `output` may be connected to `input`.
///
/// Both typed: the input (consumer) decides via `input.assignable_from(output)`.
/// Neither typed: always compatible. Mixed: governed by `policy`.
pub fn compare_sockets<T: SocketType>(
    output: &Socket<T>,
    input: &Socket<T>,
    policy: MixingPolicy,
) -> bool {
    match (output.is_typed(), input.is_typed()) {
        (true, true) => input.assignable_from(output),
        (false, false) => true,
        _ => policy == MixingPolicy::Permissive,
    }
}

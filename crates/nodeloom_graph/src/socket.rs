// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs and outputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketId(pub Uuid);

impl SocketId {
    /// Create a new random socket ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SocketId {
    fn default() -> Self {
        Self::new()
    }
}

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket, the destination side of a link
    Input,
    /// Output socket, the source side of a link
    Output,
}

/// Data type that can flow through sockets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SocketType {
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
    /// 4D vector
    Vector4,
    /// Color (RGBA)
    Color,
    /// Texture sampler
    Texture,
    /// String value
    String,
    /// Any type (for pass-through and generic nodes)
    Any,
    /// Custom type
    Custom(String),
}

impl SocketType {
    /// Check if this type can connect to another type
    pub fn can_connect_to(&self, other: &SocketType) -> bool {
        // Any type can connect to anything
        if matches!(self, Self::Any) || matches!(other, Self::Any) {
            return true;
        }

        // Same types can always connect
        if self == other {
            return true;
        }

        // Implicit conversions
        match (self, other) {
            // Numeric conversions
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => true,
            // Vector conversions
            (Self::Float, Self::Vector2 | Self::Vector3 | Self::Vector4) => true,
            (Self::Vector2, Self::Vector3 | Self::Vector4) => true,
            (Self::Vector3, Self::Vector4) => true,
            // Color conversions
            (Self::Color, Self::Vector4) | (Self::Vector4, Self::Color) => true,
            // No other implicit conversions
            _ => false,
        }
    }
}

/// A socket on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socket {
    /// Unique socket ID
    pub id: SocketId,
    /// Socket name
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Data type
    pub socket_type: SocketType,
    /// Default value (for inputs)
    pub default_value: Option<SocketValue>,
    /// Whether multiple links may terminate here
    pub multi_connect: bool,
}

impl Socket {
    /// Create a new input socket
    pub fn input(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Input,
            socket_type,
            default_value: None,
            multi_connect: false,
        }
    }

    /// Create a new output socket
    pub fn output(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Output,
            socket_type,
            default_value: None,
            // Outputs can feed multiple destinations by default
            multi_connect: true,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: SocketValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Allow multiple links to terminate at this socket
    pub fn with_multi_connect(mut self) -> Self {
        self.multi_connect = true;
        self
    }

    /// Clone this socket with a freshly allocated ID.
    ///
    /// Used when instantiating a node from a type template so socket
    /// identity stays unique across node instances.
    pub fn instantiate(&self) -> Self {
        Self {
            id: SocketId::new(),
            ..self.clone()
        }
    }

    /// Check if a link to another socket is valid
    pub fn can_connect(&self, other: &Socket) -> bool {
        // Must be opposite directions
        if self.direction == other.direction {
            return false;
        }

        // Check type compatibility
        self.socket_type.can_connect_to(&other.socket_type)
    }
}

/// Value that can be stored in a socket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SocketValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// 2D vector
    Vector2([f32; 2]),
    /// 3D vector
    Vector3([f32; 3]),
    /// 4D vector
    Vector4([f32; 4]),
    /// Color
    Color([f32; 4]),
    /// String
    String(String),
}

impl SocketValue {
    /// Get the socket type for this value
    pub fn socket_type(&self) -> SocketType {
        match self {
            Self::Bool(_) => SocketType::Bool,
            Self::Int(_) => SocketType::Int,
            Self::Float(_) => SocketType::Float,
            Self::Vector2(_) => SocketType::Vector2,
            Self::Vector3(_) => SocketType::Vector3,
            Self::Vector4(_) => SocketType::Vector4,
            Self::Color(_) => SocketType::Color,
            Self::String(_) => SocketType::String,
        }
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material/shader node set for visual material authoring.
//!
//! A compact registry of PBR material nodes plus the layout nodes
//! (reroute, frame) every graph editor carries.

use crate::node::{NodeCategory, NodeRegistry, NodeType, FRAME_TYPE, REROUTE_TYPE};
use crate::socket::{Socket, SocketType, SocketValue};

/// Create the material graph node registry with all available node types
pub fn create_material_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // Output

    registry.register(NodeType {
        id: "material_output".to_string(),
        name: "Material Output".to_string(),
        category: NodeCategory::Output,
        description: "Final PBR material output".to_string(),
        inputs: vec![
            Socket::input("Base Color", SocketType::Color)
                .with_default(SocketValue::Color([0.8, 0.8, 0.8, 1.0])),
            Socket::input("Metallic", SocketType::Float)
                .with_default(SocketValue::Float(0.0)),
            Socket::input("Roughness", SocketType::Float)
                .with_default(SocketValue::Float(0.5)),
            Socket::input("Normal", SocketType::Vector3),
            Socket::input("Emission", SocketType::Color)
                .with_default(SocketValue::Color([0.0, 0.0, 0.0, 1.0])),
            Socket::input("Opacity", SocketType::Float)
                .with_default(SocketValue::Float(1.0)),
        ],
        outputs: vec![],
    });

    // Constants

    registry.register(NodeType {
        id: "color_constant".to_string(),
        name: "Color".to_string(),
        category: NodeCategory::Input,
        description: "Constant color value".to_string(),
        inputs: vec![],
        outputs: vec![Socket::output("Color", SocketType::Color)],
    });

    registry.register(NodeType {
        id: "float_constant".to_string(),
        name: "Float".to_string(),
        category: NodeCategory::Input,
        description: "Constant float value".to_string(),
        inputs: vec![],
        outputs: vec![Socket::output("Value", SocketType::Float)],
    });

    registry.register(NodeType {
        id: "uv_coord".to_string(),
        name: "UV Coordinates".to_string(),
        category: NodeCategory::Input,
        description: "Mesh UV coordinates".to_string(),
        inputs: vec![],
        outputs: vec![
            Socket::output("UV", SocketType::Vector2),
            Socket::output("U", SocketType::Float),
            Socket::output("V", SocketType::Float),
        ],
    });

    // Textures

    registry.register(NodeType {
        id: "texture_sample".to_string(),
        name: "Texture Sample".to_string(),
        category: NodeCategory::Texture,
        description: "Sample a 2D texture".to_string(),
        inputs: vec![
            Socket::input("Texture", SocketType::Texture),
            Socket::input("UV", SocketType::Vector2),
        ],
        outputs: vec![
            Socket::output("Color", SocketType::Color),
            Socket::output("Alpha", SocketType::Float),
        ],
    });

    registry.register(NodeType {
        id: "texture_image".to_string(),
        name: "Image".to_string(),
        category: NodeCategory::Texture,
        description: "Texture image file reference".to_string(),
        inputs: vec![
            Socket::input("Filepath", SocketType::String)
                .with_default(SocketValue::String(String::new())),
        ],
        outputs: vec![Socket::output("Texture", SocketType::Texture)],
    });

    // Math

    registry.register(NodeType {
        id: "add".to_string(),
        name: "Add".to_string(),
        category: NodeCategory::Math,
        description: "Add two values".to_string(),
        inputs: vec![
            Socket::input("A", SocketType::Any),
            Socket::input("B", SocketType::Any),
        ],
        outputs: vec![Socket::output("Result", SocketType::Any)],
    });

    registry.register(NodeType {
        id: "multiply".to_string(),
        name: "Multiply".to_string(),
        category: NodeCategory::Math,
        description: "Multiply two values".to_string(),
        inputs: vec![
            Socket::input("A", SocketType::Any),
            Socket::input("B", SocketType::Any),
        ],
        outputs: vec![Socket::output("Result", SocketType::Any)],
    });

    registry.register(NodeType {
        id: "lerp".to_string(),
        name: "Lerp".to_string(),
        category: NodeCategory::Math,
        description: "Linear interpolation between A and B".to_string(),
        inputs: vec![
            Socket::input("A", SocketType::Any),
            Socket::input("B", SocketType::Any),
            Socket::input("T", SocketType::Float).with_default(SocketValue::Float(0.5)),
        ],
        outputs: vec![Socket::output("Result", SocketType::Any)],
    });

    // Layout

    registry.register(NodeType {
        id: REROUTE_TYPE.to_string(),
        name: "Reroute".to_string(),
        category: NodeCategory::Layout,
        description: "Pass-through point for tidying link routing".to_string(),
        inputs: vec![Socket::input("Input", SocketType::Any)],
        outputs: vec![Socket::output("Output", SocketType::Any)],
    });

    registry.register(NodeType {
        id: FRAME_TYPE.to_string(),
        name: "Frame".to_string(),
        category: NodeCategory::Layout,
        description: "Organizational grouping box".to_string(),
        inputs: vec![],
        outputs: vec![],
    });

    registry
}

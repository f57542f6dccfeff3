//! UAVPLEX Core Types and Definitions
//!
//! This crate provides the foundational types shared by the UAVPLEX crates:
//!
//! - **Identifiers**: String-interned component identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Planar and spatial points, bounds and projection ([`geometry`] module)
//! - **Design**: The in-memory design model ([`design`] module)
//! - **Draw**: Layered SVG output ([`draw`] module)
//! - **Mesh**: Triangle meshes from STL files ([`mesh::Mesh`])

pub mod color;
pub mod design;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod mesh;

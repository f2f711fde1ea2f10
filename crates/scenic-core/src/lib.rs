//! Scenic Core Types and Definitions
//!
//! This crate provides the foundational types for the Scenic diagram
//! compiler. It includes:
//!
//! - **Geometry**: Points, bounding boxes, anchors and grid snapping ([`geometry`] module)
//! - **Style**: Style records and the preset cascade ([`style`] module)
//! - **Text**: Approximate text measurement ([`text`] module)
//! - **Semantic**: The validated diagram model ([`semantic`] module)
//! - **Scene**: The compiled output elements ([`scene`] module)

pub mod geometry;
pub mod scene;
pub mod semantic;
pub mod style;
pub mod text;

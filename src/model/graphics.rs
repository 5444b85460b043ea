//! Non-text page primitives.

use serde::{Deserialize, Serialize};

use super::Rect;

/// An image or other embedded figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Bounding box
    pub rect: Rect,
}

impl Figure {
    /// Create a figure.
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// A vector shape (rule, box, table border).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Bounding box
    pub rect: Rect,
    /// Color identifier
    #[serde(default)]
    pub color_id: u32,
}

impl Shape {
    /// Create a shape.
    pub fn new(rect: Rect, color_id: u32) -> Self {
        Self { rect, color_id }
    }
}

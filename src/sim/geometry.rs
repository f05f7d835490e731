//! Box/container geometry and edge overflow
//!
//! Sizes come from external layout measurement. The container starts
//! unmeasured (infinite) and the box starts at zero size; both cases must
//! produce "no overflow" rather than NaN or infinity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    pub fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    /// (near, far) edges on this axis; near is left/top
    pub fn edges(self) -> (Edge, Edge) {
        match self {
            Axis::X => (Edge::Left, Edge::Right),
            Axis::Y => (Edge::Top, Edge::Bottom),
        }
    }
}

/// Container edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Fixed evaluation order for release decisions
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right => Axis::X,
            Edge::Top | Edge::Bottom => Axis::Y,
        }
    }

    /// Sign of motion that leaves the container through this edge
    pub fn outward_sign(self) -> f32 {
        match self {
            Edge::Left | Edge::Top => -1.0,
            Edge::Right | Edge::Bottom => 1.0,
        }
    }
}

/// Latest measured sizes of the box and its container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub box_width: f32,
    pub box_height: f32,
    pub container_width: f32,
    pub container_height: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            box_width: 0.0,
            box_height: 0.0,
            container_width: f32::INFINITY,
            container_height: f32::INFINITY,
        }
    }
}

impl Geometry {
    pub fn set_box_size(&mut self, width: f32, height: f32) {
        self.box_width = width.max(0.0);
        self.box_height = height.max(0.0);
    }

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.container_width = width.max(0.0);
        self.container_height = height.max(0.0);
    }

    /// Box extent along an axis
    #[inline]
    pub fn box_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.box_width,
            Axis::Y => self.box_height,
        }
    }

    /// Container extent along an axis
    #[inline]
    pub fn container_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.container_width,
            Axis::Y => self.container_height,
        }
    }

    /// Both the box and the container have a usable size on this axis
    pub fn is_measured(&self, axis: Axis) -> bool {
        self.box_extent(axis) > 0.0 && self.container_extent(axis).is_finite()
    }

    /// Coordinate that places the box exactly `margin` inside `edge`
    pub fn resting_coordinate(&self, edge: Edge, margin: f32) -> f32 {
        let axis = edge.axis();
        match edge {
            Edge::Left | Edge::Top => margin,
            Edge::Right | Edge::Bottom => {
                self.container_extent(axis) - self.box_extent(axis) - margin
            }
        }
    }
}

/// Fraction of the box's own extent past each container edge.
///
/// Zero or negative means inside; positive values grow the further out the
/// box is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutOfBounds {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl OutOfBounds {
    pub fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    /// Largest overflow among the given edges, floored at zero
    pub fn max_over(&self, edges: impl IntoIterator<Item = Edge>) -> f32 {
        edges
            .into_iter()
            .map(|e| self.get(e))
            .fold(0.0, f32::max)
    }
}

/// Compute per-edge overflow fractions for a box at `pos`
pub fn out_of_bounds(pos: Vec2, geometry: &Geometry) -> OutOfBounds {
    let bw = geometry.box_width;
    let bh = geometry.box_height;

    OutOfBounds {
        top: overflow_fraction(-pos.y, bh),
        right: overflow_fraction(pos.x + bw - geometry.container_width, bw),
        bottom: overflow_fraction(pos.y + bh - geometry.container_height, bh),
        left: overflow_fraction(-pos.x, bw),
    }
}

/// `overflow / extent`, with unmeasured geometry reported as no overflow
#[inline]
fn overflow_fraction(overflow: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let fraction = overflow / extent;
    if fraction.is_finite() { fraction } else { 0.0 }
}

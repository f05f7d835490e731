//! Release-time decisions
//!
//! At the end of a drag the box is either dismissed (fling first, then drag)
//! or left alive, gliding on the axes whose release speed is high enough.
//! Velocities use screen coordinates: positive x moves toward the right edge,
//! positive y toward the bottom edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Axis, Edge, OutOfBounds};
use crate::config::EdgeConfigs;

/// Set of axes affected by an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisSet {
    pub x: bool,
    pub y: bool,
}

impl AxisSet {
    pub const BOTH: Self = Self { x: true, y: true };

    pub fn only(axis: Axis) -> Self {
        match axis {
            Axis::X => Self { x: true, y: false },
            Axis::Y => Self { x: false, y: true },
        }
    }

    pub fn contains(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Outcome of the dismiss checks at release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestroyVerdict {
    /// Flung toward an edge fast enough and straight enough
    FlingDismiss {
        edge: Edge,
        axes: AxisSet,
        velocity: Vec2,
        fade_duration: f32,
    },
    /// Released far enough past an edge
    DragDismiss {
        edge: Edge,
        axis: Axis,
        /// Signed outward exit velocity
        exit_velocity: f32,
    },
    /// Box stays alive
    None,
}

impl DestroyVerdict {
    pub fn is_destroy(&self) -> bool {
        !matches!(self, DestroyVerdict::None)
    }
}

/// Angle of `velocity` from the horizontal, in [0, π/2].
///
/// A zero horizontal component gives π/2 and a zero vector gives 0, so the
/// angle is always defined.
#[inline]
pub fn angle_from_horizontal(velocity: Vec2) -> f32 {
    velocity.y.abs().atan2(velocity.x.abs())
}

/// Check whether a release velocity flings the box through `edge`
pub fn fling_matches(edges: &EdgeConfigs, edge: Edge, velocity: Vec2) -> Option<DestroyVerdict> {
    let fling = edges.get(edge).fling_dismiss?;

    if edge.axis().of(velocity) * edge.outward_sign() <= 0.0 {
        return None;
    }

    let from_horizontal = angle_from_horizontal(velocity);
    let from_normal = match edge.axis() {
        Axis::X => from_horizontal,
        Axis::Y => std::f32::consts::FRAC_PI_2 - from_horizontal,
    };

    let speed = velocity.length();
    if speed < fling.min_velocity || from_normal > fling.max_angle {
        return None;
    }

    let axes = if fling.lock_axis {
        AxisSet::only(edge.axis())
    } else {
        AxisSet::BOTH
    };
    Some(DestroyVerdict::FlingDismiss {
        edge,
        axes,
        velocity,
        fade_duration: fling.fade_duration,
    })
}

/// Check whether releasing at the current overflow drags the box out via `edge`
pub fn drag_matches(edges: &EdgeConfigs, edge: Edge, oob: &OutOfBounds) -> Option<DestroyVerdict> {
    let drag = edges.get(edge).drag_dismiss?;
    if oob.get(edge) < drag.min_out_of_bounds {
        return None;
    }
    Some(DestroyVerdict::DragDismiss {
        edge,
        axis: edge.axis(),
        exit_velocity: drag.exit_velocity * edge.outward_sign(),
    })
}

/// First drag-dismiss edge in evaluation order, if any
pub fn drag_verdict(edges: &EdgeConfigs, oob: &OutOfBounds) -> DestroyVerdict {
    Edge::ALL
        .iter()
        .find_map(|&edge| drag_matches(edges, edge, oob))
        .unwrap_or(DestroyVerdict::None)
}

/// Full dismiss decision: fling on any edge beats drag on any edge.
///
/// Edges are evaluated left, right, top, bottom; the first match wins.
pub fn evaluate_destroy(edges: &EdgeConfigs, oob: &OutOfBounds, velocity: Vec2) -> DestroyVerdict {
    if let Some(fling) = Edge::ALL
        .iter()
        .find_map(|&edge| fling_matches(edges, edge, velocity))
    {
        return fling;
    }
    drag_verdict(edges, oob)
}

/// Axes that keep gliding after a non-destroying release
pub fn glide_axes(velocity: Vec2, minimum_glide_velocity: f32) -> AxisSet {
    AxisSet {
        x: velocity.x.abs() > minimum_glide_velocity,
        y: velocity.y.abs() > minimum_glide_velocity,
    }
}

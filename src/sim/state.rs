//! Floating box state
//!
//! One `FloatingBox` owns everything about a single box instance: geometry,
//! position, running animations, opacity and the gesture mode. Nothing is
//! shared between instances.

use std::fmt;

use glam::Vec2;

use super::geometry::{Axis, Edge, Geometry, OutOfBounds, out_of_bounds};
use super::motion::{Motion, Timed};
use super::release::{DestroyVerdict, drag_verdict};
use crate::config::BoxConfig;
use crate::consts::*;

/// Transient drag context, alive only while a pointer holds the box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    /// Box position when the gesture started
    pub anchor: Vec2,
}

/// What currently controls the box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMode {
    /// At rest or settling under a spring/glide
    Idle,
    /// Pointer is moving the box
    Dragging(DragContext),
    /// Leaving the screen; terminal
    Destroying,
}

impl GestureMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureMode::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureMode::Dragging(_))
    }

    pub fn is_destroying(&self) -> bool {
        matches!(self, GestureMode::Destroying)
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxEvent {
    /// A release dismissed the box; it is now animating out
    DestroyStarted(DestroyVerdict),
    /// Opacity reached zero while destroying; the owner should remove the box
    Destroyed,
}

/// Render-facing snapshot of the box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    pub position: Vec2,
    pub opacity: f32,
    pub scale: f32,
    /// Opacity of the "release will dismiss" overlay
    pub overlay_opacity: f32,
    pub overlay_color: [f32; 4],
}

/// Fires exactly once: the first time opacity is observed at zero while
/// destroying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestroyLatch {
    fired: bool,
}

impl DestroyLatch {
    pub fn observe(&mut self, destroying: bool, opacity: f32) -> bool {
        if self.fired || !destroying || opacity > 0.0 {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// A single draggable, self-dismissing box
pub struct FloatingBox {
    pub(crate) config: BoxConfig,
    pub(crate) geometry: Geometry,
    pub(crate) position: Vec2,
    pub(crate) mode: GestureMode,
    /// Running position animation per axis
    pub(crate) motion_x: Option<Motion>,
    pub(crate) motion_y: Option<Motion>,
    /// Fade-to-destroy contribution to opacity
    pub(crate) fade: Timed,
    /// Combined opacity from the last frame
    pub(crate) opacity: f32,
    pub(crate) scale: Timed,
    pub(crate) overlay: Timed,
    pub(crate) latch: DestroyLatch,
    /// Frames evaluated so far
    pub frame: u64,
    pub(crate) on_destroy: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for FloatingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingBox")
            .field("geometry", &self.geometry)
            .field("position", &self.position)
            .field("mode", &self.mode)
            .field("motion_x", &self.motion_x)
            .field("motion_y", &self.motion_y)
            .field("opacity", &self.opacity)
            .field("frame", &self.frame)
            .field("destroyed", &self.latch.has_fired())
            .finish_non_exhaustive()
    }
}

impl FloatingBox {
    pub fn new(config: BoxConfig) -> Self {
        let position = Vec2::new(config.initial_x, config.initial_y);
        Self {
            config,
            geometry: Geometry::default(),
            position,
            mode: GestureMode::Idle,
            motion_x: None,
            motion_y: None,
            fade: Timed::new(1.0),
            opacity: 1.0,
            scale: Timed::new(1.0),
            overlay: Timed::new(0.0),
            latch: DestroyLatch::default(),
            frame: 0,
            on_destroy: None,
        }
    }

    /// Register the callback invoked once when the box finishes destroying
    pub fn with_on_destroy(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_destroy = Some(Box::new(callback));
        self
    }

    pub fn set_on_destroy(&mut self, callback: impl FnMut() + 'static) {
        self.on_destroy = Some(Box::new(callback));
    }

    /// Layout callback for the box itself
    pub fn set_box_size(&mut self, width: f32, height: f32) {
        self.geometry.set_box_size(width, height);
    }

    /// Layout callback for the surrounding container
    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.geometry.set_container_size(width, height);
    }

    /// Configuration the box was created with
    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// Latest measured box and container sizes
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Combined opacity as of the last frame
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True once the destroy notification has fired
    pub fn is_destroyed(&self) -> bool {
        self.latch.has_fired()
    }

    pub fn motion(&self, axis: Axis) -> Option<&Motion> {
        match axis {
            Axis::X => self.motion_x.as_ref(),
            Axis::Y => self.motion_y.as_ref(),
        }
    }

    pub(crate) fn motion_slot(&mut self, axis: Axis) -> &mut Option<Motion> {
        match axis {
            Axis::X => &mut self.motion_x,
            Axis::Y => &mut self.motion_y,
        }
    }

    /// Overflow fractions at the current position
    pub fn out_of_bounds(&self) -> OutOfBounds {
        out_of_bounds(self.position, &self.geometry)
    }

    /// Drag-dismiss verdict a release right now would produce (ignoring fling)
    pub fn release_will_destroy(&self) -> DestroyVerdict {
        drag_verdict(&self.config.edges, &self.out_of_bounds())
    }

    /// Opacity implied by the current position and fade, before latching
    pub fn live_opacity(&self) -> f32 {
        let edges = &self.config.edges;
        let oob = self.out_of_bounds();
        let drag_edges = Edge::ALL
            .into_iter()
            .filter(|&e| edges.get(e).drag_dismiss.is_some());
        let dim = 1.0 - oob.max_over(drag_edges) * DRAG_FADE_FACTOR;
        self.fade.value().min(dim).clamp(0.0, 1.0)
    }

    pub fn style(&self) -> BoxStyle {
        BoxStyle {
            position: self.position,
            opacity: self.opacity,
            scale: self.scale.value(),
            overlay_opacity: self.overlay.value(),
            overlay_color: self.config.destroy_overlay_color,
        }
    }
}

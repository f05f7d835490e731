//! Deterministic box simulation
//!
//! All gesture and physics logic lives here. This module must be pure and
//! deterministic:
//! - Input is applied in arrival order, then one recomputation pass per frame
//! - Time only advances through the `dt` passed to `tick`
//! - No rendering or platform dependencies

pub mod geometry;
pub mod motion;
pub mod release;
pub mod resistance;
pub mod state;
pub mod tick;

pub use geometry::{Axis, Edge, Geometry, OutOfBounds, out_of_bounds};
pub use motion::{Decay, Easing, Motion, Spring, Timed};
pub use release::{
    AxisSet, DestroyVerdict, angle_from_horizontal, drag_verdict, evaluate_destroy, glide_axes,
};
pub use resistance::{allowed_excursion, resist};
pub use state::{BoxEvent, BoxStyle, DestroyLatch, DragContext, FloatingBox, GestureMode};
pub use tick::{
    InputEvent, TickInput, apply_input, gesture_end, gesture_start, gesture_update, settle_edges,
    tick,
};

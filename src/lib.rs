//! Floatbox - draggable, edge-aware, self-dismissing floating box
//!
//! Core modules:
//! - `sim`: Deterministic box simulation (geometry, resistance, release decisions, animation)
//! - `config`: Per-edge behaviour and box defaults, loadable from JSON
//! - `host`: Single-slot owner that mounts one box and drops it when destroyed
//! - `platform`: Browser binding for a JS render/layout collaborator

pub mod config;
pub mod host;
pub mod platform;
pub mod sim;

pub use config::{BoxConfig, DragDismiss, EdgeConfig, EdgeConfigs, FlingDismiss, SpringParams};
pub use host::BoxHost;
pub use sim::{BoxEvent, BoxStyle, DestroyVerdict, FloatingBox, GestureMode, InputEvent, TickInput, tick};

/// Simulation constants and configuration defaults
pub mod consts {
    use crate::sim::Easing;

    /// Nominal frame timestep (60 Hz display refresh)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Glide velocity retention per millisecond
    pub const DEFAULT_DECELERATION: f32 = 0.985;
    /// Per-axis release speed (px/s) above which the box glides
    pub const DEFAULT_MIN_GLIDE_VELOCITY: f32 = 120.0;
    pub const DEFAULT_SCALE_DURING_DRAG: f32 = 1.02;
    /// rgba(255, 0, 0, 0.5)
    pub const DEFAULT_OVERLAY_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 0.5];

    /// Exit animations keep their speed until the box is gone
    pub const DESTROY_DECELERATION: f32 = 1.0;
    /// Opacity lost per unit of overflow past a drag-dismiss edge
    pub const DRAG_FADE_FACTOR: f32 = 0.8;

    /// Spring settles once both displacement (px) and speed (px/s) are below these
    pub const SPRING_REST_DISPLACEMENT: f32 = 0.01;
    pub const SPRING_REST_SPEED: f32 = 2.0;
    /// Decay stops below this speed (px/s)
    pub const DECAY_REST_SPEED: f32 = 1.0;
    /// Longest step a decay integrates at once (ms); avoids jumps after stalls
    pub const MAX_DECAY_STEP_MS: f32 = 64.0;
    /// Tolerance (px) for margin and spring-target comparisons
    pub const SNAP_EPSILON: f32 = 1e-3;

    /// Drag scale hint timing
    pub const SCALE_DURATION: f32 = 0.12;
    pub const SCALE_EASING: Easing = Easing::CubicBezier(0.0, 0.0, 0.1, 1.0);
    /// "Release will dismiss" overlay fade
    pub const OVERLAY_FADE_DURATION: f32 = 0.18;
}

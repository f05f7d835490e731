//! Gesture handling and the per-frame update
//!
//! Input events are applied in arrival order as plain mutations, then a
//! single recomputation pass advances animations and re-derives snap-back,
//! opacity and the destroy notification from the owned state.

use glam::Vec2;

use super::geometry::{Axis, Edge};
use super::motion::{Decay, Easing, Motion, Spring};
use super::release::{DestroyVerdict, evaluate_destroy, glide_axes};
use super::resistance::resist;
use super::state::{BoxEvent, DragContext, FloatingBox, GestureMode};
use crate::consts::*;

/// Input delivered by the render/layout collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    BoxLayout { width: f32, height: f32 },
    ContainerLayout { width: f32, height: f32 },
    GestureStart,
    /// Cumulative translation since the gesture started
    GestureUpdate { translation: Vec2 },
    /// Release velocity (px/s)
    GestureEnd { velocity: Vec2 },
}

/// Everything that arrived since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn with(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Apply one input event immediately
pub fn apply_input(state: &mut FloatingBox, event: InputEvent) -> Option<BoxEvent> {
    match event {
        InputEvent::BoxLayout { width, height } => state.set_box_size(width, height),
        InputEvent::ContainerLayout { width, height } => state.set_container_size(width, height),
        InputEvent::GestureStart => gesture_start(state),
        InputEvent::GestureUpdate { translation } => gesture_update(state, translation),
        InputEvent::GestureEnd { velocity } => {
            let verdict = gesture_end(state, velocity);
            if verdict.is_destroy() {
                return Some(BoxEvent::DestroyStarted(verdict));
            }
        }
    }
    None
}

/// Pointer down: take control of the box, interrupting any animation
pub fn gesture_start(state: &mut FloatingBox) {
    if state.mode.is_destroying() {
        log::warn!("Gesture start ignored: box is being destroyed");
        return;
    }

    // Position already holds the last animated value, so stopping here is seamless
    state.motion_x = None;
    state.motion_y = None;
    state.mode = GestureMode::Dragging(DragContext {
        anchor: state.position,
    });
    log::debug!("Drag started at ({:.1}, {:.1})", state.position.x, state.position.y);
}

/// Pointer move: anchor + translation, resisted near edges
pub fn gesture_update(state: &mut FloatingBox, translation: Vec2) {
    let GestureMode::Dragging(ctx) = state.mode else {
        log::warn!("Gesture update ignored outside of a drag ({:?})", state.mode);
        return;
    };

    let candidate = ctx.anchor + translation;
    state.position = resist(candidate, &state.geometry, &state.config.edges);
}

/// Pointer up: decide between dismissing, gliding and settling
pub fn gesture_end(state: &mut FloatingBox, velocity: Vec2) -> DestroyVerdict {
    if !state.mode.is_dragging() {
        log::warn!("Gesture end ignored outside of a drag ({:?})", state.mode);
        return DestroyVerdict::None;
    }

    let oob = state.out_of_bounds();
    let verdict = evaluate_destroy(&state.config.edges, &oob, velocity);
    log::debug!(
        "Released with velocity ({:.0}, {:.0}): {:?}",
        velocity.x,
        velocity.y,
        verdict
    );

    match verdict {
        DestroyVerdict::FlingDismiss {
            axes,
            velocity,
            fade_duration,
            ..
        } => {
            state.mode = GestureMode::Destroying;
            let position = state.position;
            for axis in Axis::ALL {
                let exit = axes.contains(axis).then(|| {
                    Motion::Decay(Decay::new(
                        axis.of(position),
                        axis.of(velocity),
                        DESTROY_DECELERATION,
                    ))
                });
                *state.motion_slot(axis) = exit;
            }
            state
                .fade
                .animate_to(0.0, fade_duration, Easing::EaseInOut);
        }
        DestroyVerdict::DragDismiss {
            axis,
            exit_velocity,
            ..
        } => {
            state.mode = GestureMode::Destroying;
            state.motion_x = None;
            state.motion_y = None;
            *state.motion_slot(axis) = Some(Motion::Decay(Decay::new(
                axis.of(state.position),
                exit_velocity,
                DESTROY_DECELERATION,
            )));
        }
        DestroyVerdict::None => {
            state.mode = GestureMode::Idle;
            let glide = glide_axes(velocity, state.config.minimum_glide_velocity);
            let position = state.position;
            let deceleration = state.config.deceleration;
            for axis in Axis::ALL {
                let motion = glide.contains(axis).then(|| {
                    Motion::Decay(Decay::new(axis.of(position), axis.of(velocity), deceleration))
                });
                *state.motion_slot(axis) = motion;
            }
            settle_edges(state);
        }
    }

    verdict
}

/// Advance the box by one frame of `dt` seconds
pub fn tick(state: &mut FloatingBox, input: &TickInput, dt: f32) -> Vec<BoxEvent> {
    let mut events: Vec<BoxEvent> = input
        .events
        .iter()
        .filter_map(|&event| apply_input(state, event))
        .collect();

    state.frame += 1;

    if !state.mode.is_dragging() {
        advance_motion(state, dt);
    }
    settle_edges(state);
    update_visual_hints(state, dt);

    state.fade.step(dt);
    if update_opacity(state) {
        log::info!("Box destroyed after {} frames", state.frame);
        if let Some(callback) = state.on_destroy.as_mut() {
            callback();
        }
        events.push(BoxEvent::Destroyed);
    }

    events
}

fn advance_motion(state: &mut FloatingBox, dt: f32) {
    for axis in Axis::ALL {
        let Some(mut motion) = *state.motion_slot(axis) else {
            continue;
        };
        let finished = motion.step(dt);
        axis.set(&mut state.position, motion.position());
        *state.motion_slot(axis) = if finished { None } else { Some(motion) };
    }
}

/// Edge the box intrudes past on `axis`, counting its margin.
///
/// Same test as an overflow fraction above `-margin / extent`, done in pixels.
/// A box that cannot fit between both margins always rests against the near
/// (top/left) edge.
fn violated_edge(state: &FloatingBox, axis: Axis) -> Option<Edge> {
    let (near, far) = axis.edges();
    let coord = axis.of(state.position);
    let edges = &state.config.edges;

    let near_rest = state
        .geometry
        .resting_coordinate(near, edges.get(near).margin);
    let far_rest = state.geometry.resting_coordinate(far, edges.get(far).margin);
    if near_rest > far_rest {
        return ((coord - near_rest).abs() > SNAP_EPSILON).then_some(near);
    }

    if coord < near_rest - SNAP_EPSILON {
        return Some(near);
    }
    if coord > far_rest + SNAP_EPSILON {
        return Some(far);
    }
    None
}

/// Spring any axis that sits past its margin back to the resting position.
///
/// Runs only while idle. A spring already heading to the right target is left
/// alone; anything else on that axis is replaced, keeping its velocity.
pub fn settle_edges(state: &mut FloatingBox) {
    if !state.mode.is_idle() {
        return;
    }

    for axis in Axis::ALL {
        if !state.geometry.is_measured(axis) {
            continue;
        }
        let Some(edge) = violated_edge(state, axis) else {
            continue;
        };

        let edge_config = *state.config.edges.get(edge);
        let target = state.geometry.resting_coordinate(edge, edge_config.margin);
        let from = axis.of(state.position);
        let slot = state.motion_slot(axis);

        let on_course = slot
            .as_ref()
            .and_then(Motion::spring_target)
            .is_some_and(|t| (t - target).abs() < SNAP_EPSILON);
        if on_course {
            continue;
        }

        let velocity = slot.as_ref().map_or(0.0, Motion::velocity);
        log::trace!(
            "Snap back {:?} from {:.1} to {:.1} (v = {:.0})",
            edge,
            from,
            target,
            velocity
        );
        *slot = Some(Motion::Spring(Spring::new(
            from,
            velocity,
            target,
            edge_config.spring,
        )));
    }
}

fn update_visual_hints(state: &mut FloatingBox, dt: f32) {
    let scale = match (state.mode, state.config.scale_during_drag) {
        (GestureMode::Dragging(_), Some(scale)) => scale,
        _ => 1.0,
    };
    state.scale.animate_to(scale, SCALE_DURATION, SCALE_EASING);
    state.scale.step(dt);

    let overlay = if state.release_will_destroy().is_destroy() {
        1.0
    } else {
        0.0
    };
    state
        .overlay
        .animate_to(overlay, OVERLAY_FADE_DURATION, Easing::EaseInOut);
    state.overlay.step(dt);
}

/// Recompute opacity; returns true on the frame the box finishes destroying
fn update_opacity(state: &mut FloatingBox) -> bool {
    let destroying = state.mode.is_destroying();
    let mut opacity = state.live_opacity();
    if destroying {
        opacity = opacity.min(state.opacity);
    }
    state.opacity = opacity;
    state.latch.observe(destroying, opacity)
}

//! Motion primitives driven once per frame
//!
//! - `Spring`: damped mass-spring toward a fixed target (snap-back)
//! - `Decay`: velocity with exponential friction and no target (glide, exit)
//! - `Timed`: eased interpolation over a fixed duration (fades, visual hints)
//!
//! Every primitive can be replaced mid-flight. The caller reads the current
//! value and velocity and starts the next one from there.

use serde::{Deserialize, Serialize};

use crate::config::SpringParams;
use crate::consts::*;

/// Easing curve for timed animations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in-out
    EaseInOut,
    /// CSS-style cubic bezier (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Solve bezier_x(s) = t for s with Newton-Raphson, then evaluate y(s)
    let mut s = t;
    for _ in 0..8 {
        let x = bezier_component(s, x1, x2) - t;
        if x.abs() < 1e-6 {
            break;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - x / slope).clamp(0.0, 1.0);
    }
    bezier_component(s, y1, y2)
}

#[inline]
fn bezier_component(s: f32, p1: f32, p2: f32) -> f32 {
    let ms = 1.0 - s;
    3.0 * ms * ms * s * p1 + 3.0 * ms * s * s * p2 + s * s * s
}

#[inline]
fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let ms = 1.0 - s;
    3.0 * ms * ms * p1 + 6.0 * ms * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Damped spring toward `target`, integrated in closed form so any frame
/// length is stable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub target: f32,
    pub position: f32,
    pub velocity: f32,
    pub params: SpringParams,
}

impl Spring {
    pub fn new(from: f32, velocity: f32, target: f32, params: SpringParams) -> Self {
        Self {
            target,
            position: from,
            velocity,
            params,
        }
    }

    /// Advance by `dt` seconds. Returns true once settled; the position is
    /// then exactly the target.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_at_rest() {
            self.settle();
            return true;
        }
        if dt <= 0.0 {
            return false;
        }

        let SpringParams {
            stiffness,
            damping,
            mass,
        } = self.params;
        let omega0 = (stiffness / mass).sqrt();
        let zeta = damping / (2.0 * (stiffness * mass).sqrt());
        let x0 = self.position - self.target;
        let v0 = self.velocity;

        let (x, v) = if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega0 * dt).exp();
            let (sin, cos) = (omega_d * dt).sin_cos();
            let b = (v0 + zeta * omega0 * x0) / omega_d;
            let x = decay * (x0 * cos + b * sin);
            let v = decay
                * ((b * omega_d - zeta * omega0 * x0) * cos
                    - (x0 * omega_d + zeta * omega0 * b) * sin);
            (x, v)
        } else if (zeta - 1.0).abs() < 1e-3 {
            let decay = (-omega0 * dt).exp();
            let b = v0 + omega0 * x0;
            (decay * (x0 + b * dt), decay * (v0 - omega0 * b * dt))
        } else {
            let root = omega0 * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * omega0 + root;
            let r2 = -zeta * omega0 - root;
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * dt).exp(), (r2 * dt).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        };

        self.position = self.target + x;
        self.velocity = v;

        if self.is_at_rest() {
            self.settle();
            return true;
        }
        false
    }

    fn is_at_rest(&self) -> bool {
        (self.position - self.target).abs() < SPRING_REST_DISPLACEMENT
            && self.velocity.abs() < SPRING_REST_SPEED
    }

    fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }
}

/// Velocity-driven motion with exponential friction.
///
/// `deceleration` is the fraction of velocity kept per millisecond; 1.0 means
/// constant velocity, which never settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    pub position: f32,
    pub velocity: f32,
    pub deceleration: f32,
}

impl Decay {
    pub fn new(from: f32, velocity: f32, deceleration: f32) -> Self {
        Self {
            position: from,
            velocity,
            deceleration,
        }
    }

    /// Advance by `dt` seconds. Returns true once the velocity has decayed
    /// below the rest threshold.
    pub fn step(&mut self, dt: f32) -> bool {
        let dt_ms = (dt * 1000.0).clamp(0.0, MAX_DECAY_STEP_MS);

        if self.deceleration >= 1.0 {
            self.position += self.velocity * dt_ms / 1000.0;
            return false;
        }

        // Integral of v * d^t over the step, in closed form
        let kv = self.deceleration.powf(dt_ms);
        let kx = self.deceleration * (1.0 - kv) / (1.0 - self.deceleration);
        self.position += self.velocity / 1000.0 * kx;
        self.velocity *= kv;

        if self.velocity.abs() < DECAY_REST_SPEED {
            self.velocity = 0.0;
            return true;
        }
        false
    }
}

/// A running position animation on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Spring(Spring),
    Decay(Decay),
}

impl Motion {
    pub fn position(&self) -> f32 {
        match self {
            Motion::Spring(s) => s.position,
            Motion::Decay(d) => d.position,
        }
    }

    pub fn velocity(&self) -> f32 {
        match self {
            Motion::Spring(s) => s.velocity,
            Motion::Decay(d) => d.velocity,
        }
    }

    /// Target of a spring; decays have none
    pub fn spring_target(&self) -> Option<f32> {
        match self {
            Motion::Spring(s) => Some(s.target),
            Motion::Decay(_) => None,
        }
    }

    /// Advance; returns true when finished
    pub fn step(&mut self, dt: f32) -> bool {
        match self {
            Motion::Spring(s) => s.step(dt),
            Motion::Decay(d) => d.step(dt),
        }
    }
}

/// Scalar eased toward a target over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed {
    value: f32,
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Timed {
    /// A value at rest
    pub fn new(value: f32) -> Self {
        Self {
            value,
            from: value,
            to: value,
            elapsed: 0.0,
            duration: 0.0,
            easing: Easing::Linear,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.value == self.to
    }

    /// Start easing from the current value toward `to`.
    ///
    /// Retargeting to the value already being approached keeps the running
    /// curve intact.
    pub fn animate_to(&mut self, to: f32, duration: f32, easing: Easing) {
        if to == self.to {
            return;
        }
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration;
        self.easing = easing;
        if duration <= 0.0 {
            self.value = to;
        }
    }

    pub fn step(&mut self, dt: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed += dt;
        let t = self.elapsed / self.duration;
        if t >= 1.0 {
            self.value = self.to;
        } else {
            let eased = self.easing.evaluate(t);
            self.value = self.from + (self.to - self.from) * eased;
        }
    }
}

//! Bubble Pack - text bubbles that drift, collide and settle into a cluster
//!
//! Core modules:
//! - `fit`: Minimal enclosing radius search against a layout oracle
//! - `sim`: Deterministic simulation (circles, collisions, tick)
//! - `schedule`: Virtual clock and deferred one-shot actions
//! - `world`: Public facade, host lifecycle events and the tick driver
//! - `surface`: Headless layout surface for demos and tests
//! - `config`: Data-driven tuning

pub mod config;
pub mod fit;
pub mod schedule;
pub mod sim;
pub mod surface;
pub mod world;

pub use config::WorldConfig;
pub use fit::{Extent, FitParams, LayoutSurface, fit};
pub use sim::{Circle, CircleId, CollisionWorld, PendingCircle};
pub use world::{Host, World, create_world};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Tick cadence in milliseconds (re-armed after each tick completes)
    pub const TICK_INTERVAL_MS: u64 = 1;

    /// Per-tick velocity retention (2% friction)
    pub const FRICTION: f32 = 0.98;
    /// Divisor applied to the displacement toward gravity each tick
    pub const GRAVITY_DIVISOR: f32 = 10_000.0;
    /// Divisor applied to the displacement toward gravity for the entry drift
    pub const INITIAL_DRIFT_DIVISOR: f32 = 200.0;

    /// Elastic bouncing is switched off this long after the first add
    pub const DYNAMIC_COLLISION_WINDOW_MS: u64 = 3000;

    /// Fit search defaults (radius units match the container units)
    pub const FIT_MIN_RADIUS: f32 = 1.0;
    pub const FIT_MAX_ITERATIONS: u32 = 200;
    pub const FIT_INITIAL_MAX_RADIUS: f32 = 10.0;
    /// Inflation of the upper bound after a miss (1%)
    pub const FIT_SLACK: f32 = 1.01;

    /// Distances below this are treated as coincident centers
    pub const COINCIDENT_EPSILON: f32 = 1e-6;
}

/// Unit vector from `from` toward `to`, or `fallback` when the points coincide
#[inline]
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len < consts::COINCIDENT_EPSILON {
        fallback
    } else {
        delta / len
    }
}

/// Container center for a container of the given size
#[inline]
pub fn container_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height / 2.0)
}

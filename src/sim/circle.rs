//! Circle entity
//!
//! Construction is two-phase: a `PendingCircle` carries only its content until
//! the host surface can be measured, and only a measured `Circle` (radius > 0)
//! can enter the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FIT_MIN_RADIUS;
use crate::fit::{FitParams, LayoutSurface, fit};

/// Stable handle shared with the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CircleId(pub u32);

/// A circle whose radius is not known yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCircle {
    id: CircleId,
    content: String,
}

impl PendingCircle {
    pub fn new(id: CircleId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    pub fn id(&self) -> CircleId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size the circle against its inserted surface
    pub fn measure(self, surface: &mut dyn LayoutSurface, params: &FitParams) -> Circle {
        let radius = fit(surface, params);
        self.with_radius(radius)
    }

    /// Finish construction with an already known radius
    ///
    /// Non-positive or NaN radii are replaced by the default minimum radius.
    pub fn with_radius(self, radius: f32) -> Circle {
        let radius = if radius > 0.0 {
            radius
        } else {
            log::warn!("{:?} got radius {radius}, using {FIT_MIN_RADIUS}", self.id);
            FIT_MIN_RADIUS
        };
        Circle {
            id: self.id,
            content: self.content,
            center: Vec2::ZERO,
            radius,
            velocity: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// A moving disc with a text label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: CircleId,
    pub content: String,
    pub center: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    /// Visual-only size multiplier (hover effects); ignored by physics
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl Circle {
    #[inline]
    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    /// Diameter the host should draw
    #[inline]
    pub fn visual_diameter(&self) -> f32 {
        self.diameter() * self.scale
    }

    /// Left edge of the bounding box
    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    /// Top edge of the bounding box
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn distance_to(&self, other: &Circle) -> f32 {
        self.center.distance(other.center)
    }

    /// Penetration depth with `other` (positive when overlapping)
    #[inline]
    pub fn overlap(&self, other: &Circle) -> f32 {
        self.radius + other.radius - self.distance_to(other)
    }

    /// `distance < ra + rb`; touching circles do not collide
    #[inline]
    pub fn collides_with(&self, other: &Circle) -> bool {
        self.overlap(other) > 0.0
    }
}

//! Collision world state
//!
//! Owns the circle set, the gravity point and the dynamic-collision switch.
//! Placement is deterministic for a given seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::circle::{Circle, CircleId, PendingCircle};
use super::collision::{CollisionPair, collides};
use crate::config::WorldConfig;
use crate::container_center;

/// Side a new circle enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySide {
    Right,
    Left,
}

impl EntrySide {
    /// Odd running counts enter from the right
    pub fn for_count(count: u32) -> Self {
        if count % 2 == 1 {
            EntrySide::Right
        } else {
            EntrySide::Left
        }
    }

    /// Direction the rejection loop nudges along
    pub fn step(&self) -> f32 {
        match self {
            EntrySide::Right => 1.0,
            EntrySide::Left => -1.0,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    /// Container size
    pub width: f32,
    pub height: f32,
    /// Point circles are attracted to (container center)
    pub gravity: Vec2,
    /// Managed circles, in insertion order
    pub circles: Vec<Circle>,
    /// Tuning
    pub config: WorldConfig,
    /// Elastic response switch, only ever goes true -> false
    dynamic_collision_enabled: bool,
    /// Virtual time of the first successful add (ms)
    first_add_at: Option<u64>,
    /// Running count of adds, drives the entry side
    circle_count: u32,
    /// Next circle ID
    next_id: u32,
    rng: Pcg32,
}

impl CollisionWorld {
    pub fn new(width: f32, height: f32, config: WorldConfig) -> Self {
        Self {
            width,
            height,
            gravity: container_center(width, height),
            circles: Vec::new(),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            dynamic_collision_enabled: true,
            first_add_at: None,
            circle_count: 0,
            next_id: 1,
        }
    }

    /// Allocate a handle for a circle about to be created
    pub fn next_circle_id(&mut self) -> CircleId {
        let id = CircleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Start a new circle; it gets a radius once its surface is measured
    pub fn create(&mut self, content: impl Into<String>) -> PendingCircle {
        let id = self.next_circle_id();
        PendingCircle::new(id, content)
    }

    pub fn dynamic_collision_enabled(&self) -> bool {
        self.dynamic_collision_enabled
    }

    /// Switch elastic response off for good
    pub fn disable_dynamic_collision(&mut self) {
        if self.dynamic_collision_enabled {
            log::info!("Dynamic collision disabled ({} circles)", self.circles.len());
        }
        self.dynamic_collision_enabled = false;
    }

    pub fn first_add_at(&self) -> Option<u64> {
        self.first_add_at
    }

    /// Time since the first add, if any circle was ever added
    pub fn elapsed_since_first_add(&self, now_ms: u64) -> Option<u64> {
        self.first_add_at.map(|t| now_ms.saturating_sub(t))
    }

    /// Resize the container, moving the gravity point to its new center
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.gravity = container_center(width, height);
    }

    fn random_y(&mut self) -> f32 {
        if self.height > 0.0 {
            self.rng.random_range(0.0..self.height)
        } else {
            0.0
        }
    }

    /// Place a measured circle just outside the container and start it drifting
    ///
    /// Returns true when this was the first circle ever added.
    pub fn place_circle(&mut self, mut circle: Circle, now_ms: u64) -> bool {
        self.circle_count += 1;
        let side = EntrySide::for_count(self.circle_count);
        let diameter = circle.diameter();

        circle.center.x = match side {
            EntrySide::Right => self.width + diameter,
            EntrySide::Left => -diameter,
        };
        circle.center.y = self.random_y();

        // Rejection placement: never start overlapping
        while self.circles.iter().any(|other| collides(&circle, other)) {
            circle.center.y = self.random_y();
            circle.center.x += side.step() * diameter;
        }

        circle.velocity = (self.gravity - circle.center) / self.config.initial_drift_divisor;

        log::debug!(
            "Placed {:?} {:?} r={:.3} at ({:.2}, {:.2}) from {:?}",
            circle.id,
            circle.content,
            circle.radius,
            circle.center.x,
            circle.center.y,
            side
        );
        self.circles.push(circle);

        let first = self.first_add_at.is_none();
        if first {
            self.first_add_at = Some(now_ms);
        }
        first
    }

    /// Remove a circle from the managed set
    pub fn remove(&mut self, id: CircleId) -> Option<Circle> {
        let index = self.index_of(id)?;
        Some(self.circles.remove(index))
    }

    pub fn index_of(&self, id: CircleId) -> Option<usize> {
        self.circles.iter().position(|c| c.id == id)
    }

    pub fn circle(&self, id: CircleId) -> Option<&Circle> {
        self.circles.iter().find(|c| c.id == id)
    }

    pub fn circle_mut(&mut self, id: CircleId) -> Option<&mut Circle> {
        self.circles.iter_mut().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Whether the circle overlaps any other circle
    pub fn has_collision(&self, id: CircleId) -> bool {
        match self.circle(id) {
            Some(circle) => self
                .circles
                .iter()
                .any(|other| other.id != id && collides(circle, other)),
            None => false,
        }
    }

    /// Circles overlapping the given circle
    pub fn collisions_of(&self, id: CircleId) -> Vec<CircleId> {
        let Some(circle) = self.circle(id) else {
            return Vec::new();
        };
        self.circles
            .iter()
            .filter(|other| other.id != id && collides(circle, other))
            .map(|other| other.id)
            .collect()
    }

    /// Every overlapping pair, each reported once in insertion order
    pub fn all_collision_pairs(&self) -> Vec<CollisionPair> {
        let mut pairs = Vec::new();
        for (i, a) in self.circles.iter().enumerate() {
            for b in &self.circles[i + 1..] {
                if collides(a, b) {
                    pairs.push(CollisionPair { a: a.id, b: b.id });
                }
            }
        }
        pairs
    }
}

//! Public world facade
//!
//! Couples the collision world to a presentation host and a virtual clock.
//! The host measures labels and draws nodes; the core tells it where circles
//! are after every tick and hears back about resizes and dismissals.

use crate::config::WorldConfig;
use crate::fit::{LayoutSurface, fit};
use crate::schedule::{Deferred, Schedule};
use crate::sim::{Circle, CircleId, CollisionPair, CollisionWorld, tick};

/// Presentation layer the core drives
pub trait Host {
    /// Insert the node for a new circle and hand back its measurable surface
    fn surface(&mut self, id: CircleId, content: &str) -> &mut dyn LayoutSurface;

    /// Move the node's bounding box
    fn set_position(&mut self, id: CircleId, left: f32, top: f32);

    /// Resize the node
    fn set_size(&mut self, id: CircleId, diameter: f32);

    /// Drop the node after a dismissal
    fn remove(&mut self, _id: CircleId) {}
}

/// Called with the content of a dismissed circle
pub type SelectCallback = Box<dyn FnMut(&str)>;

/// Create a world with default tuning
pub fn create_world<H: Host>(width: f32, height: f32, host: H) -> World<H> {
    World::new(width, height, WorldConfig::default(), host)
}

pub struct World<H: Host> {
    physics: CollisionWorld,
    schedule: Schedule,
    host: H,
    on_select: Option<SelectCallback>,
    ticks: u64,
}

impl<H: Host> World<H> {
    pub fn new(width: f32, height: f32, config: WorldConfig, host: H) -> Self {
        Self {
            physics: CollisionWorld::new(width, height, config),
            schedule: Schedule::new(),
            host,
            on_select: None,
            ticks: 0,
        }
    }

    pub fn physics(&self) -> &CollisionWorld {
        &self.physics
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &WorldConfig {
        &self.physics.config
    }

    pub fn now_ms(&self) -> u64 {
        self.schedule.now_ms()
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn circles(&self) -> &[Circle] {
        &self.physics.circles
    }

    pub fn circle(&self, id: CircleId) -> Option<&Circle> {
        self.physics.circle(id)
    }

    pub fn dynamic_collision_enabled(&self) -> bool {
        self.physics.dynamic_collision_enabled()
    }

    pub fn has_collision(&self, id: CircleId) -> bool {
        self.physics.has_collision(id)
    }

    pub fn collisions_of(&self, id: CircleId) -> Vec<CircleId> {
        self.physics.collisions_of(id)
    }

    pub fn all_collision_pairs(&self) -> Vec<CollisionPair> {
        self.physics.all_collision_pairs()
    }

    /// Deferred actions not yet run
    pub fn pending_actions(&self) -> usize {
        self.schedule.pending_len()
    }

    /// Register the dismissal callback, replacing any previous one
    pub fn set_on_select(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Queue a circle; it is created before the first tick at or after the delay
    pub fn add(&mut self, content: impl Into<String>, delay_ms: u64) {
        self.schedule.after(delay_ms, Deferred::Add(content.into()));
    }

    /// Create, measure and place a circle right away
    pub fn add_now(&mut self, content: impl Into<String>) -> CircleId {
        let pending = self.physics.create(content);
        let id = pending.id();
        let params = self.physics.config.fit;

        let surface = self.host.surface(id, pending.content());
        let circle = pending.measure(surface, &params);
        let diameter = circle.visual_diameter();

        let now = self.schedule.now_ms();
        if self.physics.place_circle(circle, now) {
            let window = self.physics.config.dynamic_collision_window_ms;
            let due = self.schedule.after(window, Deferred::DisableDynamicCollision);
            log::debug!("First circle added at {now} ms, dynamic collision ends at {due} ms");
        }

        self.host.set_size(id, diameter);
        self.push_position(id);
        id
    }

    /// Re-measure a circle whose node was (re)inserted
    ///
    /// Returns the new radius, or None for an unknown circle.
    pub fn on_inserted(&mut self, id: CircleId) -> Option<f32> {
        let params = self.physics.config.fit;
        let circle = self.physics.circle_mut(id)?;

        let surface = self.host.surface(id, &circle.content);
        circle.radius = fit(surface, &params);
        let radius = circle.radius;
        let diameter = circle.visual_diameter();

        self.host.set_size(id, diameter);
        self.push_position(id);
        Some(radius)
    }

    /// Container resized: move gravity to the new center and re-fit every circle
    pub fn on_resize(&mut self, width: f32, height: f32) {
        log::info!("Container resized to {width}x{height}");
        self.physics.resize(width, height);
        let ids: Vec<CircleId> = self.physics.circles.iter().map(|c| c.id).collect();
        for id in ids {
            self.on_inserted(id);
        }
    }

    /// Circle dismissed by the user: notify the select callback and drop it
    pub fn on_dismiss(&mut self, id: CircleId) -> Option<Circle> {
        let circle = self.physics.remove(id)?;
        self.host.remove(id);
        if let Some(callback) = self.on_select.as_mut() {
            callback(&circle.content);
        }
        log::debug!("Dismissed {:?} {:?}", id, circle.content);
        Some(circle)
    }

    /// Apply a visual-only scale to a circle (hover effects)
    pub fn set_scale(&mut self, id: CircleId, scale: f32) -> bool {
        let Some(circle) = self.physics.circle_mut(id) else {
            return false;
        };
        circle.scale = scale;
        let diameter = circle.visual_diameter();
        self.host.set_size(id, diameter);
        true
    }

    /// Run due deferred actions, tick once, publish positions, then advance the clock
    pub fn step(&mut self) {
        while let Some(action) = self.schedule.pop_due() {
            match action {
                Deferred::Add(content) => {
                    self.add_now(content);
                }
                Deferred::DisableDynamicCollision => self.physics.disable_dynamic_collision(),
            }
        }

        tick(&mut self.physics);
        self.ticks += 1;
        self.flush_positions();

        // A zero interval would freeze virtual time
        self.schedule.advance(self.physics.config.tick_interval_ms.max(1));
    }

    /// Step until `ms` of virtual time have passed
    pub fn advance(&mut self, ms: u64) {
        let until = self.now_ms() + ms;
        while self.now_ms() < until {
            self.step();
        }
    }

    /// Real-time driver: each tick is re-armed only after the previous one
    /// completes, so slow ticks stretch wall time instead of piling up
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(&mut self, mut keep_running: impl FnMut(&Self) -> bool) {
        let interval = std::time::Duration::from_millis(self.physics.config.tick_interval_ms);
        while keep_running(self) {
            self.step();
            std::thread::sleep(interval);
        }
    }

    fn push_position(&mut self, id: CircleId) {
        if let Some(circle) = self.physics.circle(id) {
            self.host.set_position(id, circle.left(), circle.top());
        }
    }

    fn flush_positions(&mut self) {
        for circle in &self.physics.circles {
            self.host.set_position(circle.id, circle.left(), circle.top());
        }
    }
}

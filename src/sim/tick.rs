//! Fixed timestep simulation tick
//!
//! One tick: integrate positions, update velocities, resolve collisions.

use glam::Vec2;

use super::circle::Circle;
use super::collision::{pair_mut, resolve_dynamic, resolve_static};
use super::state::CollisionWorld;

/// Advance the world by one tick
pub fn tick(world: &mut CollisionWorld) {
    integrate(&mut world.circles);
    update_velocity(
        &mut world.circles,
        world.gravity,
        world.config.friction,
        world.config.gravity_divisor,
    );
    let contacts = resolve_collisions(world);
    if contacts > 0 {
        log::trace!("Resolved {contacts} contacts");
    }
}

/// Explicit Euler with a unit timestep
pub fn integrate(circles: &mut [Circle]) {
    for circle in circles {
        circle.center += circle.velocity;
    }
}

/// Friction, then a spring-like pull toward gravity that never vanishes
pub fn update_velocity(circles: &mut [Circle], gravity: Vec2, friction: f32, divisor: f32) {
    for circle in circles {
        let to_gravity = gravity - circle.center;
        circle.velocity *= friction;
        circle.velocity += to_gravity / divisor;
    }
}

/// Static pass over all pairs, then the dynamic pass while enabled
///
/// Returns the number of overlapping pairs found.
pub fn resolve_collisions(world: &mut CollisionWorld) -> usize {
    let circles = &mut world.circles;
    let mut contacts = Vec::new();

    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let (a, b) = pair_mut(circles, i, j);
            if resolve_static(a, b) {
                contacts.push((i, j));
            }
        }
    }

    if world.dynamic_collision_enabled() {
        let circles = &mut world.circles;
        for &(i, j) in &contacts {
            let (a, b) = pair_mut(circles, i, j);
            resolve_dynamic(a, b);
        }
    }

    contacts.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::consts::*;
    use crate::sim::CircleId;

    fn add(world: &mut CollisionWorld, radius: f32) -> CircleId {
        let circle = world.create("c").with_radius(radius);
        let id = circle.id;
        world.place_circle(circle, 0);
        id
    }

    #[test]
    fn test_integrate_then_velocity_update() {
        let mut world = CollisionWorld::new(20.0, 20.0, WorldConfig::default());
        let id = add(&mut world, 1.0);
        let before = world.circle(id).unwrap().clone();

        tick(&mut world);

        let after = world.circle(id).unwrap();
        let moved = before.center + before.velocity;
        assert!((after.center - moved).length() < 1e-6);
        let expected = before.velocity * FRICTION + (world.gravity - moved) / GRAVITY_DIVISOR;
        assert!((after.velocity - expected).length() < 1e-6);
    }

    #[test]
    fn test_overlap_shrinks_after_one_pass() {
        let mut world = CollisionWorld::new(20.0, 20.0, WorldConfig::default());
        let a = add(&mut world, 2.0);
        let b = add(&mut world, 2.0);
        world.circle_mut(a).unwrap().center = Vec2::new(9.0, 10.0);
        world.circle_mut(b).unwrap().center = Vec2::new(11.5, 10.0);
        let overlap = |w: &CollisionWorld| w.circle(a).unwrap().overlap(w.circle(b).unwrap());
        let before = overlap(&world);
        assert!(before > 0.0);

        assert_eq!(resolve_collisions(&mut world), 1);
        let after = overlap(&world);
        assert!(after < before);
        assert!(after <= 1e-5);
    }

    #[test]
    fn test_dynamic_pass_respects_switch() {
        let mut world = CollisionWorld::new(20.0, 20.0, WorldConfig::default());
        let a = add(&mut world, 2.0);
        let b = add(&mut world, 2.0);
        for (id, x, vx) in [(a, 8.0, 1.0), (b, 11.0, -1.0)] {
            let c = world.circle_mut(id).unwrap();
            c.center = Vec2::new(x, 10.0);
            c.velocity = Vec2::new(vx, 0.0);
        }
        world.disable_dynamic_collision();
        resolve_collisions(&mut world);
        assert_eq!(world.circle(a).unwrap().velocity, Vec2::new(1.0, 0.0));
        assert_eq!(world.circle(b).unwrap().velocity, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_two_circles_settle_around_gravity() {
        let mut world = CollisionWorld::new(20.0, 20.0, WorldConfig::default());
        let a = add(&mut world, 2.0);
        let b = add(&mut world, 2.0);
        assert!(world.circle(a).unwrap().center.x > 20.0);
        assert!(world.circle(b).unwrap().center.x < 0.0);

        for t in 0..5000u64 {
            if t == DYNAMIC_COLLISION_WINDOW_MS {
                world.disable_dynamic_collision();
            }
            tick(&mut world);
            let ca = world.circle(a).unwrap();
            let cb = world.circle(b).unwrap();
            assert!(ca.distance_to(cb) >= 4.0 - 1e-3);
        }

        let ca = world.circle(a).unwrap();
        let cb = world.circle(b).unwrap();
        let midpoint = (ca.center + cb.center) / 2.0;
        assert!((midpoint - world.gravity).length() < 0.1);
        assert!(ca.center.distance(world.gravity) < 2.0 + 0.1);
        assert!(cb.center.distance(world.gravity) < 2.0 + 0.1);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut world = CollisionWorld::new(30.0, 20.0, WorldConfig::default());
            for radius in [1.5, 2.0, 3.0, 1.0] {
                add(&mut world, radius);
            }
            for _ in 0..500 {
                tick(&mut world);
            }
            world.circles
        };
        assert_eq!(run(), run());
    }
}

//! Collision detection and response between circles
//!
//! Two resolution passes share one predicate:
//! - static: positional correction that removes overlap
//! - dynamic: elastic velocity exchange along the contact normal, with radius
//!   standing in for mass

use glam::Vec2;

use super::circle::{Circle, CircleId};
use crate::consts::COINCIDENT_EPSILON;
use crate::direction_or;

/// Separation axis used when two centers coincide
const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// Whether two circles overlap (`distance < ra + rb`)
#[inline]
pub fn collides(a: &Circle, b: &Circle) -> bool {
    a.collides_with(b)
}

/// Pair of overlapping circles, in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub a: CircleId,
    pub b: CircleId,
}

/// Mutable access to two distinct elements of a slice
pub fn pair_mut(circles: &mut [Circle], i: usize, j: usize) -> (&mut Circle, &mut Circle) {
    debug_assert!(i != j);
    if i < j {
        let (head, tail) = circles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = circles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Push an overlapping pair apart by half the overlap each
///
/// Returns false (and leaves both untouched) when they do not overlap.
pub fn resolve_static(a: &mut Circle, b: &mut Circle) -> bool {
    let overlap = a.overlap(b);
    if overlap <= 0.0 {
        return false;
    }

    let normal = direction_or(a.center, b.center, FALLBACK_NORMAL);
    if a.distance_to(b) < COINCIDENT_EPSILON {
        log::warn!(
            "Circles {:?} and {:?} share a center, separating along +x",
            a.id,
            b.id
        );
    }

    let push = normal * (overlap * 0.5);
    a.center -= push;
    b.center += push;
    true
}

/// Elastic exchange of the normal velocity components
///
/// Tangential components are untouched. Pairs with coincident centers have no
/// defined normal and are skipped.
pub fn resolve_dynamic(a: &mut Circle, b: &mut Circle) -> bool {
    let distance = a.distance_to(b);
    if distance < COINCIDENT_EPSILON {
        return false;
    }

    let normal = (b.center - a.center) / distance;
    let tangent = normal.perp();

    let tan_a = a.velocity.dot(tangent);
    let tan_b = b.velocity.dot(tangent);
    let norm_a = a.velocity.dot(normal);
    let norm_b = b.velocity.dot(normal);

    // Conservation of momentum in 1D
    let (ma, mb) = (a.radius, b.radius);
    let total = ma + mb;
    let new_norm_a = (norm_a * (ma - mb) + 2.0 * mb * norm_b) / total;
    let new_norm_b = (norm_b * (mb - ma) + 2.0 * ma * norm_a) / total;

    a.velocity = tangent * tan_a + normal * new_norm_a;
    b.velocity = tangent * tan_b + normal * new_norm_b;
    true
}

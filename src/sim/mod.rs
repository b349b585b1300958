//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed unit timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No host or rendering dependencies beyond the layout trait

pub mod circle;
pub mod collision;
pub mod state;
pub mod tick;

pub use circle::{Circle, CircleId, PendingCircle};
pub use collision::{CollisionPair, collides, resolve_dynamic, resolve_static};
pub use state::{CollisionWorld, EntrySide};
pub use tick::tick;

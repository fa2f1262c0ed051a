//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes from the simulation clock, never the wall clock
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_circle_collision, circles_overlap};
pub use state::{
    Asteroid, EndReason, Explosion, GameEvent, GamePhase, GameState, Player, Projectile, SimClock,
};
pub use tick::{TickInput, check_end_conditions, tick};

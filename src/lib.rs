//! Local Arcade - offline single-player asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, phases)
//! - `renderer`: Display-list rendering onto a 2D canvas surface
//! - `platform`: Browser input collection
//! - `config`: Session configuration (win mode, player name)
//! - `ui`: HUD values, hit flash window, end-of-game summary

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::{SessionConfig, WinCondition};

/// Game configuration constants
pub mod consts {
    /// Scheduler rate; one simulation tick per scheduler tick
    pub const TICK_RATE_HZ: u64 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (canvas pixels)
    pub const ARENA_WIDTH: f32 = 480.0;
    pub const ARENA_HEIGHT: f32 = 640.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_MAX_HP: u8 = 3;
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Spawn point sits this far above the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 80.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_SPEED: f32 = 400.0;
    /// Projectiles leave the muzzle this far in front of the ship
    pub const MUZZLE_OFFSET: f32 = 20.0;
    pub const FIRE_COOLDOWN_MS: u64 = 200;
    /// Projectiles are dropped once above this y
    pub const PROJECTILE_DESPAWN_Y: f32 = -10.0;

    /// Asteroids
    pub const ASTEROID_SPAWN_INTERVAL_MS: u64 = 800;
    pub const MAX_ASTEROIDS: usize = 10;
    pub const ASTEROID_MIN_SPEED: f32 = 80.0;
    pub const ASTEROID_MAX_SPEED: f32 = 160.0;
    pub const ASTEROID_SPAWN_MARGIN: f32 = 30.0;
    pub const LARGE_ASTEROID_CHANCE: f32 = 0.3;
    pub const SMALL_ASTEROID_RADIUS: f32 = 16.0;
    pub const LARGE_ASTEROID_RADIUS: f32 = 26.0;
    pub const SMALL_ASTEROID_HP: u8 = 1;
    pub const LARGE_ASTEROID_HP: u8 = 2;
    pub const SMALL_ASTEROID_SCORE: u64 = 5;
    pub const LARGE_ASTEROID_SCORE: u64 = 10;
    /// Asteroids are dropped once their top edge is this far below the arena
    pub const ASTEROID_DESPAWN_MARGIN: f32 = 40.0;

    /// Effects and phase timings
    pub const EXPLOSION_LIFETIME_MS: u64 = 300;
    pub const COUNTDOWN_SECONDS: u8 = 3;
    pub const SUMMARY_DELAY_MS: u64 = 1000;
    pub const HIT_FLASH_MS: u64 = 1000;
    pub const HIT_BLINK_MS: u64 = 100;
}

/// Format whole seconds as `m:ss`
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(754), "12:34");
    }
}

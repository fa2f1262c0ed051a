//! Game state and core simulation types
//!
//! Everything the simulation owns lives in [`GameState`]; one instance per
//! session, passed by reference into `tick` and the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{SessionConfig, WinCondition};
use crate::consts::*;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndReason {
    PlayerDead,
    ScoreTargetReached,
    TimeLimitReached,
    /// Player walked away; no summary is shown
    PlayerLeft,
}

impl EndReason {
    /// Completed sessions (score or time) as opposed to death or leaving
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            EndReason::ScoreTargetReached | EndReason::TimeLimitReached
        )
    }
}

/// Session lifecycle. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Pre-game countdown, `remaining` whole seconds left
    Countdown { remaining: u8 },
    /// Simulation running
    InProgress,
    /// Terminal
    Finished { reason: EndReason },
}

impl GamePhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Finished { .. })
    }
}

/// Things that happened during a tick, drained by the shell
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CountdownTick { remaining: u8 },
    Started,
    ShotFired { id: u32 },
    AsteroidSpawned { id: u32, large: bool },
    AsteroidDestroyed { id: u32, points: u64 },
    PlayerHit { hp: u8 },
    Finished { reason: EndReason },
    /// End-of-game summary may now be shown (fires once)
    SummaryReady,
}

/// Monotonic simulation clock, advanced once per scheduler tick.
///
/// Milliseconds are derived from the tick count so durations that are whole
/// multiples of a tick compare exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    ticks: u64,
}

impl SimClock {
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn now_ms(&self) -> u64 {
        self.ticks * 1000 / TICK_RATE_HZ
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: u8,
    pub max_hp: u8,
    pub score: u64,
    pub alive: bool,
    /// Clock time of the last shot (None until the first one)
    pub last_fire_ms: Option<u64>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT - PLAYER_START_OFFSET),
            radius: PLAYER_RADIUS,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            score: 0,
            alive: true,
            last_fire_ms: None,
        }
    }
}

impl Player {
    /// Keep the ship fully inside the arena
    pub fn clamp_to_arena(&mut self) {
        self.pos.x = self.pos.x.clamp(self.radius, ARENA_WIDTH - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, ARENA_HEIGHT - self.radius);
    }

    pub fn can_fire(&self, now_ms: u64) -> bool {
        self.last_fire_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= FIRE_COOLDOWN_MS)
    }

    /// Take one point of damage. Returns true if this killed the player.
    pub fn take_hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.alive = false;
        }
        !self.alive
    }
}

/// A player bullet
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel_y: f32,
    pub radius: f32,
}

/// A falling asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel_y: f32,
    pub radius: f32,
    pub hp: u8,
    pub large: bool,
}

impl Asteroid {
    pub fn new(id: u32, x: f32, vel_y: f32, large: bool) -> Self {
        let (radius, hp) = if large {
            (LARGE_ASTEROID_RADIUS, LARGE_ASTEROID_HP)
        } else {
            (SMALL_ASTEROID_RADIUS, SMALL_ASTEROID_HP)
        };
        Self {
            id,
            // Just above the top edge
            pos: Vec2::new(x, -radius),
            vel_y,
            radius,
            hp,
            large,
        }
    }

    pub fn max_hp(&self) -> u8 {
        if self.large {
            LARGE_ASTEROID_HP
        } else {
            SMALL_ASTEROID_HP
        }
    }

    pub fn is_damaged(&self) -> bool {
        self.hp < self.max_hp()
    }

    /// Points awarded for destroying it
    pub fn points(&self) -> u64 {
        if self.large {
            LARGE_ASTEROID_SCORE
        } else {
            SMALL_ASTEROID_SCORE
        }
    }
}

/// Expanding ring left behind by a destroyed asteroid
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub expires_at_ms: u64,
}

impl Explosion {
    /// Animation progress in [0, 1]
    pub fn progress(&self, now_ms: u64) -> f32 {
        let remaining = self.expires_at_ms.saturating_sub(now_ms) as f32;
        (1.0 - remaining / EXPLOSION_LIFETIME_MS as f32).clamp(0.0, 1.0)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub win: WinCondition,
    pub player_name: String,
    pub clock: SimClock,
    pub phase: GamePhase,
    pub player: Player,
    /// Live projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Live asteroids (sorted by id)
    pub asteroids: Vec<Asteroid>,
    /// Visual effects (not gameplay-affecting)
    pub explosions: Vec<Explosion>,
    /// Whole seconds since the countdown ended
    pub elapsed_secs: u64,
    /// When the next countdown step is due
    pub(crate) countdown_next_ms: u64,
    pub(crate) started_at_ms: Option<u64>,
    pub(crate) finished_at_ms: Option<u64>,
    pub(crate) last_spawn_ms: u64,
    pub(crate) summary_released: bool,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            win: config.win,
            player_name: config.player_name.clone(),
            clock: SimClock::default(),
            phase: GamePhase::Countdown {
                remaining: COUNTDOWN_SECONDS,
            },
            player: Player::default(),
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            explosions: Vec::new(),
            elapsed_secs: 0,
            countdown_next_ms: 1000,
            started_at_ms: None,
            finished_at_ms: None,
            last_spawn_ms: 0,
            summary_released: false,
            rng: Pcg32::seed_from_u64(config.seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Skip the countdown and start immediately
    pub fn start(&mut self) {
        if self.phase != GamePhase::InProgress && !self.phase.is_finished() {
            let now = self.now_ms();
            self.phase = GamePhase::InProgress;
            self.started_at_ms = Some(now);
            self.last_spawn_ms = now;
            self.push_event(GameEvent::Started);
            log::info!("Game started");
        }
    }

    /// Move to `Finished`. Returns false (and does nothing) if already finished.
    pub fn finish(&mut self, reason: EndReason) -> bool {
        if self.phase.is_finished() {
            return false;
        }
        self.phase = GamePhase::Finished { reason };
        self.finished_at_ms = Some(self.now_ms());
        self.push_event(GameEvent::Finished { reason });
        log::info!(
            "Game over: {:?} (score {}, {}s)",
            reason,
            self.player.score,
            self.elapsed_secs
        );
        true
    }

    /// End the session on the player's request
    pub fn leave(&mut self) {
        if !self.finish(EndReason::PlayerLeft) {
            log::debug!("Leave requested after session already finished");
        }
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            GamePhase::Finished { reason } => Some(reason),
            _ => None,
        }
    }

    /// True once the delayed summary has been handed out
    pub fn summary_released(&self) -> bool {
        self.summary_released
    }

    /// Release the summary if its delay has passed. Fires at most once and
    /// never for a session the player left.
    pub(crate) fn poll_summary(&mut self) {
        if self.summary_released {
            return;
        }
        let (Some(reason), Some(finished_at)) = (self.end_reason(), self.finished_at_ms) else {
            return;
        };
        if reason == EndReason::PlayerLeft {
            return;
        }
        if self.now_ms() >= finished_at + SUMMARY_DELAY_MS {
            self.summary_released = true;
            self.push_event(GameEvent::SummaryReady);
        }
    }

    /// Recompute elapsed whole seconds from the session start
    pub(crate) fn update_elapsed(&mut self) {
        if let Some(start) = self.started_at_ms {
            self.elapsed_secs = self.now_ms().saturating_sub(start) / 1000;
        }
    }
}

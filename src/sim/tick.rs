//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. The countdown,
//! the running game and the post-game summary delay are all driven from here;
//! there is no second timer.

use glam::Vec2;
use rand::Rng;

use super::circles_overlap;
use super::state::{Asteroid, EndReason, Explosion, GameEvent, GamePhase, GameState, Projectile};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Raw movement axis from held keys (screen coords, +y down)
    pub movement: Vec2,
    /// A fire key is held
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.clock.advance();
    let now = state.now_ms();

    // Effects age out in every phase so the end banner doesn't freeze them
    state.explosions.retain(|e| e.expires_at_ms > now);

    match state.phase {
        GamePhase::Countdown { remaining } => update_countdown(state, remaining, now),
        GamePhase::InProgress => {
            update_player(state, input, dt, now);
            spawn_asteroids(state, now);
            move_asteroids(state, dt);
            move_projectiles(state, dt);
            resolve_projectile_hits(state, now);
            resolve_player_hits(state);
            check_end_conditions(state);
            state.update_elapsed();
        }
        GamePhase::Finished { .. } => state.poll_summary(),
    }
}

fn update_countdown(state: &mut GameState, remaining: u8, now: u64) {
    if now < state.countdown_next_ms {
        return;
    }
    state.countdown_next_ms += 1000;

    let remaining = remaining.saturating_sub(1);
    if remaining == 0 {
        state.start();
    } else {
        state.phase = GamePhase::Countdown { remaining };
        state.push_event(GameEvent::CountdownTick { remaining });
        log::debug!("Countdown: {}", remaining);
    }
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32, now: u64) {
    if !state.player.alive {
        return;
    }

    let velocity = input.movement.normalize_or_zero() * PLAYER_SPEED;
    state.player.pos += velocity * dt;
    state.player.clamp_to_arena();

    if input.fire && state.player.can_fire(now) {
        state.player.last_fire_ms = Some(now);
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: state.player.pos - Vec2::new(0.0, MUZZLE_OFFSET),
            vel_y: -PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
        });
        state.push_event(GameEvent::ShotFired { id });
    }
}

fn spawn_asteroids(state: &mut GameState, now: u64) {
    if now.saturating_sub(state.last_spawn_ms) < ASTEROID_SPAWN_INTERVAL_MS {
        return;
    }
    if state.asteroids.len() >= MAX_ASTEROIDS {
        return;
    }
    state.last_spawn_ms = now;

    let x = state
        .rng
        .random_range(ASTEROID_SPAWN_MARGIN..ARENA_WIDTH - ASTEROID_SPAWN_MARGIN);
    let large = state.rng.random::<f32>() < LARGE_ASTEROID_CHANCE;
    let vel_y = state
        .rng
        .random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);

    let id = state.next_entity_id();
    state.asteroids.push(Asteroid::new(id, x, vel_y, large));
    state.push_event(GameEvent::AsteroidSpawned { id, large });
    log::trace!("Asteroid {} spawned at x={:.0} (large={})", id, x, large);
}

fn move_asteroids(state: &mut GameState, dt: f32) {
    for asteroid in &mut state.asteroids {
        asteroid.pos.y += asteroid.vel_y * dt;
    }
    state
        .asteroids
        .retain(|a| a.pos.y - a.radius <= ARENA_HEIGHT + ASTEROID_DESPAWN_MARGIN);
}

fn move_projectiles(state: &mut GameState, dt: f32) {
    for projectile in &mut state.projectiles {
        projectile.pos.y += projectile.vel_y * dt;
    }
    state
        .projectiles
        .retain(|p| p.pos.y >= PROJECTILE_DESPAWN_Y);
}

/// Projectiles against asteroids. Each projectile damages at most one
/// asteroid; asteroids at 0 hp are scored and removed after the pass.
fn resolve_projectile_hits(state: &mut GameState, now: u64) {
    let mut spent = Vec::new();
    for projectile in &state.projectiles {
        for asteroid in state.asteroids.iter_mut().filter(|a| a.hp > 0) {
            if circles_overlap(projectile.pos, projectile.radius, asteroid.pos, asteroid.radius) {
                asteroid.hp -= 1;
                spent.push(projectile.id);
                break;
            }
        }
    }
    if spent.is_empty() {
        return;
    }
    state.projectiles.retain(|p| !spent.contains(&p.id));

    let destroyed: Vec<(u32, Vec2, u64)> = state
        .asteroids
        .iter()
        .filter(|a| a.hp == 0)
        .map(|a| (a.id, a.pos, a.points()))
        .collect();
    state.asteroids.retain(|a| a.hp > 0);

    for (id, pos, points) in destroyed {
        state.player.score += points;
        state.explosions.push(Explosion {
            pos,
            expires_at_ms: now + EXPLOSION_LIFETIME_MS,
        });
        state.push_event(GameEvent::AsteroidDestroyed { id, points });
        log::debug!("Asteroid {} destroyed (+{})", id, points);
    }
}

/// Asteroids against the player. Every touching asteroid costs one hp and is
/// removed; reaching 0 hp ends the session immediately.
fn resolve_player_hits(state: &mut GameState) {
    let mut crashed = Vec::new();
    for i in 0..state.asteroids.len() {
        if !state.player.alive {
            break;
        }
        let (id, pos, radius) = {
            let a = &state.asteroids[i];
            (a.id, a.pos, a.radius)
        };
        if !circles_overlap(state.player.pos, state.player.radius, pos, radius) {
            continue;
        }
        crashed.push(id);
        let died = state.player.take_hit();
        let hp = state.player.hp;
        state.push_event(GameEvent::PlayerHit { hp });
        log::debug!("Player hit by asteroid {} (hp {})", id, hp);
        if died {
            state.finish(EndReason::PlayerDead);
        }
    }
    if !crashed.is_empty() {
        state.asteroids.retain(|a| !crashed.contains(&a.id));
    }
}

/// End the session if a terminal condition holds. No-op unless in progress.
pub fn check_end_conditions(state: &mut GameState) {
    if state.phase != GamePhase::InProgress {
        return;
    }

    if !state.player.alive {
        state.finish(EndReason::PlayerDead);
    } else if state
        .win
        .score_target()
        .is_some_and(|target| state.player.score >= target)
    {
        state.finish(EndReason::ScoreTargetReached);
    } else if state
        .win
        .limit_seconds()
        .is_some_and(|limit| state.elapsed_secs >= limit)
    {
        state.finish(EndReason::TimeLimitReached);
    }
}

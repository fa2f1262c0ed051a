//! Frame composition: game state to display list

use glam::Vec2;

use super::draw::{Color, DrawCmd};
use crate::consts::*;
use crate::sim::{Asteroid, Explosion, GamePhase, GameState, Player};
use crate::ui::HudState;

const PLAYER_COLOR: Color = Color::hex(0xff4d4f);
const ASTEROID_LARGE_COLOR: Color = Color::hex(0xa67c52);
const ASTEROID_SMALL_COLOR: Color = Color::hex(0xc48a4b);
const ASTEROID_DAMAGED_COLOR: Color = Color::hex(0x8a6239);
const ASTEROID_OUTLINE_COLOR: Color = Color::hex(0x6a4a2a);
const BANNER_COLOR: Color = Color::BLACK.with_alpha(0.7);

const HEALTH_BAR_SIZE: Vec2 = Vec2::new(32.0, 4.0);
/// Offsets above the player center
const NAME_LABEL_OFFSET: f32 = 25.0;
const HEALTH_BAR_OFFSET: f32 = 20.0;

const EXPLOSION_START_RADIUS: f32 = 10.0;
const EXPLOSION_GROWTH: f32 = 20.0;

fn arena_center() -> Vec2 {
    Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)
}

/// Build the display list for the current frame. Pure: reads state only.
pub fn render_frame(state: &GameState, hud: &HudState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(8 + state.asteroids.len() * 2 + state.projectiles.len());
    let now = state.now_ms();

    cmds.push(DrawCmd::FillRect {
        pos: Vec2::ZERO,
        size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        color: Color::BLACK,
    });

    if let GamePhase::Countdown { remaining } = state.phase {
        countdown_overlay(&mut cmds, remaining);
        return cmds;
    }

    if state.player.alive && !hud.player_hidden(now) {
        player_sprite(&mut cmds, &state.player, &state.player_name);
    }

    for explosion in &state.explosions {
        explosion_ring(&mut cmds, explosion, now);
    }

    for projectile in &state.projectiles {
        cmds.push(DrawCmd::FillCircle {
            center: projectile.pos,
            radius: projectile.radius,
            color: Color::YELLOW,
        });
    }

    for asteroid in &state.asteroids {
        asteroid_shape(&mut cmds, asteroid);
    }

    if state.phase.is_finished() {
        game_over_banner(&mut cmds);
    }

    cmds
}

fn countdown_overlay(cmds: &mut Vec<DrawCmd>, remaining: u8) {
    let center = arena_center();
    cmds.push(DrawCmd::Text {
        text: remaining.to_string(),
        pos: center,
        size_px: 72.0,
        color: Color::WHITE,
    });
    cmds.push(DrawCmd::Text {
        text: "Get ready!".to_string(),
        pos: center + Vec2::new(0.0, 50.0),
        size_px: 24.0,
        color: Color::WHITE,
    });
}

/// Square ship, name label and two-layer health bar
fn player_sprite(cmds: &mut Vec<DrawCmd>, player: &Player, name: &str) {
    let half = Vec2::splat(player.radius);
    cmds.push(DrawCmd::FillRect {
        pos: player.pos - half,
        size: half * 2.0,
        color: PLAYER_COLOR,
    });

    cmds.push(DrawCmd::Text {
        text: format!("✈ {}", name),
        pos: player.pos - Vec2::new(0.0, NAME_LABEL_OFFSET),
        size_px: 12.0,
        color: Color::WHITE,
    });

    let bar_pos = player.pos - Vec2::new(HEALTH_BAR_SIZE.x / 2.0, HEALTH_BAR_OFFSET);
    cmds.push(DrawCmd::FillRect {
        pos: bar_pos,
        size: HEALTH_BAR_SIZE,
        color: Color::RED,
    });
    let ratio = if player.max_hp == 0 {
        0.0
    } else {
        player.hp as f32 / player.max_hp as f32
    };
    cmds.push(DrawCmd::FillRect {
        pos: bar_pos,
        size: Vec2::new(HEALTH_BAR_SIZE.x * ratio, HEALTH_BAR_SIZE.y),
        color: Color::GREEN,
    });
}

/// Ring grows 10 -> 30px while fading out
fn explosion_ring(cmds: &mut Vec<DrawCmd>, explosion: &Explosion, now_ms: u64) {
    let t = explosion.progress(now_ms);
    cmds.push(DrawCmd::StrokeCircle {
        center: explosion.pos,
        radius: EXPLOSION_START_RADIUS + EXPLOSION_GROWTH * t,
        color: Color::YELLOW.with_alpha(1.0 - t),
        line_width: 3.0,
    });
}

fn asteroid_shape(cmds: &mut Vec<DrawCmd>, asteroid: &Asteroid) {
    let color = if asteroid.is_damaged() {
        ASTEROID_DAMAGED_COLOR
    } else if asteroid.large {
        ASTEROID_LARGE_COLOR
    } else {
        ASTEROID_SMALL_COLOR
    };
    cmds.push(DrawCmd::FillCircle {
        center: asteroid.pos,
        radius: asteroid.radius,
        color,
    });
    cmds.push(DrawCmd::StrokeCircle {
        center: asteroid.pos,
        radius: asteroid.radius,
        color: ASTEROID_OUTLINE_COLOR,
        line_width: 2.0,
    });
}

fn game_over_banner(cmds: &mut Vec<DrawCmd>) {
    cmds.push(DrawCmd::FillRect {
        pos: Vec2::ZERO,
        size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        color: BANNER_COLOR,
    });
    cmds.push(DrawCmd::Text {
        text: "Game Over!".to_string(),
        pos: arena_center(),
        size_px: 48.0,
        color: Color::WHITE,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SessionConfig, WinCondition};
    use crate::sim::EndReason;

    fn running() -> GameState {
        let mut state = GameState::new(&SessionConfig {
            win: WinCondition::Unbounded,
            player_name: "ace".to_string(),
            seed: 3,
        });
        state.start();
        state
    }

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_countdown_frame() {
        let state = GameState::new(&SessionConfig::default());
        let cmds = render_frame(&state, &HudState::new());
        assert_eq!(cmds.len(), 3);
        assert_eq!(texts(&cmds), vec!["3", "Get ready!"]);
    }

    #[test]
    fn test_running_frame_order() {
        let mut state = running();
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid::new(id, 100.0, 90.0, true));
        state.explosions.push(Explosion {
            pos: Vec2::new(50.0, 50.0),
            expires_at_ms: 300,
        });

        let cmds = render_frame(&state, &HudState::new());
        // background, ship, label, 2 bar layers, ring, asteroid fill + outline
        assert_eq!(cmds.len(), 8);
        assert!(matches!(cmds[1], DrawCmd::FillRect { color, .. } if color == PLAYER_COLOR));
        assert_eq!(texts(&cmds), vec!["✈ ace"]);
        assert!(matches!(cmds[5], DrawCmd::StrokeCircle { radius, .. } if radius == 10.0));
        assert!(matches!(cmds[6], DrawCmd::FillCircle { color, .. } if color == ASTEROID_LARGE_COLOR));
    }

    #[test]
    fn test_health_bar_scales() {
        let mut state = running();
        state.player.hp = 1;
        let cmds = render_frame(&state, &HudState::new());
        let DrawCmd::FillRect { size, color, .. } = cmds[4] else {
            panic!("expected health bar");
        };
        assert_eq!(color, Color::GREEN);
        assert!((size.x - HEALTH_BAR_SIZE.x / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_damaged_asteroid_darkened() {
        let mut state = running();
        let id = state.next_entity_id();
        let mut asteroid = Asteroid::new(id, 100.0, 90.0, true);
        asteroid.hp = 1;
        state.asteroids.push(asteroid);
        let cmds = render_frame(&state, &HudState::new());
        assert!(cmds.iter().any(
            |c| matches!(c, DrawCmd::FillCircle { color, .. } if *color == ASTEROID_DAMAGED_COLOR)
        ));
    }

    #[test]
    fn test_dead_player_and_banner() {
        let mut state = running();
        state.player.hp = 0;
        state.player.alive = false;
        state.finish(EndReason::PlayerDead);
        let cmds = render_frame(&state, &HudState::new());
        assert!(!texts(&cmds).contains(&"✈ ace"));
        assert_eq!(texts(&cmds).last(), Some(&"Game Over!"));
        assert!(matches!(
            cmds[cmds.len() - 2],
            DrawCmd::FillRect { color, .. } if color == BANNER_COLOR
        ));
    }

    #[test]
    fn test_player_hidden_during_blink() {
        let mut state = running();
        let mut hud = HudState::new();
        hud.sync(&state);
        state.player.take_hit();
        hud.sync(&state);
        // t=0 is an even blink slot
        let cmds = render_frame(&state, &hud);
        assert!(texts(&cmds).is_empty());
    }
}

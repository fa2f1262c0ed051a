//! HUD sync and end-of-game summary
//!
//! Runs once per rendered frame after the simulation. Produces the text the
//! page shows next to the canvas and tracks the post-hit flash window.

use serde::{Deserialize, Serialize};

use crate::consts::{HIT_BLINK_MS, HIT_FLASH_MS};
use crate::format_clock;
use crate::sim::{EndReason, GameState};

/// Per-frame UI bookkeeping that is not part of the game state
#[derive(Debug, Clone, Default)]
pub struct HudState {
    last_hp: Option<u8>,
    flash_until_ms: u64,
}

/// Values pushed to the DOM every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub hp: u8,
    pub score: u64,
    /// Elapsed time as `m:ss`
    pub time: String,
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub score: u64,
    pub hp: u8,
    pub alive: bool,
}

impl RosterEntry {
    /// One-line scoreboard text
    pub fn label(&self) -> String {
        let mut line = format!("✈ {}: {} (HP: {})", self.name, self.score, self.hp);
        if !self.alive {
            line.push_str(" (dead)");
        }
        line
    }
}

impl HudState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect damage since the last frame and build the HUD values
    pub fn sync(&mut self, state: &GameState) -> HudView {
        let hp = state.player.hp;
        if self.last_hp.is_some_and(|last| hp < last) {
            self.flash_until_ms = state.now_ms() + HIT_FLASH_MS;
        }
        self.last_hp = Some(hp);

        HudView {
            hp,
            score: state.player.score,
            time: format_clock(state.elapsed_secs),
            roster: vec![RosterEntry {
                name: state.player_name.clone(),
                score: state.player.score,
                hp,
                alive: state.player.alive,
            }],
        }
    }

    pub fn in_flash(&self, now_ms: u64) -> bool {
        now_ms < self.flash_until_ms
    }

    /// Player sprite is skipped on every other 100 ms slot while flashing
    pub fn player_hidden(&self, now_ms: u64) -> bool {
        self.in_flash(now_ms) && (now_ms / HIT_BLINK_MS) % 2 == 0
    }
}

/// Payload for the end-of-game overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub title: String,
    pub score: u64,
    pub time: String,
    pub reason: EndReason,
}

impl GameSummary {
    pub const DEATH_TITLE: &'static str = "Game Over";
    pub const SUCCESS_TITLE: &'static str = "Well done!";

    /// Summary of a finished session. `None` while running or if the player left.
    pub fn from_state(state: &GameState) -> Option<Self> {
        let reason = state.end_reason()?;
        let title = match reason {
            EndReason::PlayerLeft => return None,
            EndReason::PlayerDead => Self::DEATH_TITLE,
            EndReason::ScoreTargetReached | EndReason::TimeLimitReached => Self::SUCCESS_TITLE,
        };
        Some(Self {
            title: title.to_string(),
            score: state.player.score,
            time: format_clock(state.elapsed_secs),
            reason,
        })
    }

    /// Body line of the overlay
    pub fn text(&self) -> String {
        format!("Score: {} | Time: {}", self.score, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::consts::SIM_DT;
    use crate::sim::{TickInput, tick};

    fn running() -> GameState {
        let mut state = GameState::new(&SessionConfig::from_inputs(None, Some("ace"), 1));
        state.start();
        state
    }

    #[test]
    fn test_sync_values() {
        let mut state = running();
        state.player.score = 35;
        state.elapsed_secs = 65;
        let view = HudState::new().sync(&state);
        assert_eq!(view.hp, 3);
        assert_eq!(view.score, 35);
        assert_eq!(view.time, "1:05");
        assert_eq!(view.roster.len(), 1);
        assert_eq!(view.roster[0].label(), "✈ ace: 35 (HP: 3)");
    }

    #[test]
    fn test_roster_marks_dead() {
        let entry = RosterEntry {
            name: "ace".to_string(),
            score: 10,
            hp: 0,
            alive: false,
        };
        assert_eq!(entry.label(), "✈ ace: 10 (HP: 0) (dead)");
    }

    #[test]
    fn test_flash_window_on_damage() {
        let mut state = running();
        let mut hud = HudState::new();
        hud.sync(&state);
        assert!(!hud.in_flash(state.now_ms()));

        state.player.take_hit();
        hud.sync(&state);
        let hit_at = state.now_ms();
        assert!(hud.in_flash(hit_at));
        assert!(hud.in_flash(hit_at + 999));
        assert!(!hud.in_flash(hit_at + 1000));

        // No further damage, no restart
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            hud.sync(&state);
        }
        assert!(!hud.in_flash(hit_at + 1000));
    }

    #[test]
    fn test_blink_pattern() {
        let mut state = running();
        let mut hud = HudState::new();
        hud.sync(&state);
        state.player.take_hit();
        hud.sync(&state);
        // Flash started at t=0
        assert!(hud.player_hidden(50));
        assert!(!hud.player_hidden(150));
        assert!(hud.player_hidden(250));
        assert!(!hud.player_hidden(1200));
    }

    #[test]
    fn test_summary_titles() {
        let mut state = running();
        assert!(GameSummary::from_state(&state).is_none());

        state.player.score = 50;
        state.finish(EndReason::ScoreTargetReached);
        let summary = GameSummary::from_state(&state).unwrap();
        assert_eq!(summary.title, GameSummary::SUCCESS_TITLE);
        assert_eq!(summary.text(), "Score: 50 | Time: 0:00");

        let mut dead = running();
        dead.finish(EndReason::PlayerDead);
        let summary = GameSummary::from_state(&dead).unwrap();
        assert_eq!(summary.title, GameSummary::DEATH_TITLE);
        assert_ne!(summary.title, GameSummary::SUCCESS_TITLE);

        let mut left = running();
        left.leave();
        assert!(GameSummary::from_state(&left).is_none());
    }

    #[test]
    fn test_summary_json() {
        let summary = GameSummary {
            title: GameSummary::SUCCESS_TITLE.to_string(),
            score: 50,
            time: "1:00".to_string(),
            reason: EndReason::TimeLimitReached,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["reason"], "TIME_LIMIT_REACHED");
        assert_eq!(json["score"], 50);
    }
}

//! Session configuration
//!
//! Built once from the raw values handed over by the page (URL `win`
//! parameter, stored display name) and immutable for the rest of the session.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Win mode used when none is supplied or the family is unknown
pub const DEFAULT_WIN_MODE: &str = "SCORE_50";
/// Display name used when none is stored
pub const DEFAULT_PLAYER_NAME: &str = "LocalPlayer";

const SCORE_PREFIX: &str = "SCORE_";
const TIME_PREFIX: &str = "TIME_";

/// How a session is won (besides dying, which always ends it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCondition {
    /// Reach at least this score
    ScoreTarget(u64),
    /// Keep playing until this many minutes have elapsed
    TimeLimit { minutes: u64 },
    /// A known family with an unreadable value; only death or leaving ends it
    Unbounded,
}

impl WinCondition {
    /// Time limit in whole seconds, if any
    pub fn limit_seconds(&self) -> Option<u64> {
        match self {
            WinCondition::TimeLimit { minutes } => Some(minutes.saturating_mul(60)),
            _ => None,
        }
    }

    pub fn score_target(&self) -> Option<u64> {
        match self {
            WinCondition::ScoreTarget(target) => Some(*target),
            _ => None,
        }
    }
}

impl Default for WinCondition {
    fn default() -> Self {
        WinCondition::ScoreTarget(50)
    }
}

/// Why a win mode string could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WinModeError {
    #[error("unknown win mode `{0}`")]
    UnknownFamily(String),
    #[error("bad score target in `{0}`")]
    BadScore(String),
    #[error("bad time limit in `{0}` (expected TIME_<minutes>m)")]
    BadTime(String),
}

impl FromStr for WinCondition {
    type Err = WinModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(target) = s.strip_prefix(SCORE_PREFIX) {
            return target
                .parse::<u64>()
                .map(WinCondition::ScoreTarget)
                .map_err(|_| WinModeError::BadScore(s.to_string()));
        }
        if let Some(limit) = s.strip_prefix(TIME_PREFIX) {
            let minutes = limit
                .strip_suffix(['m', 'M'])
                .ok_or_else(|| WinModeError::BadTime(s.to_string()))?;
            return minutes
                .parse::<u64>()
                .map(|minutes| WinCondition::TimeLimit { minutes })
                .map_err(|_| WinModeError::BadTime(s.to_string()));
        }
        Err(WinModeError::UnknownFamily(s.to_string()))
    }
}

/// Everything a session needs from the outside world
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub win: WinCondition,
    pub player_name: String,
    /// RNG seed for asteroid spawning
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            win: WinCondition::default(),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            seed: 0,
        }
    }
}

impl SessionConfig {
    /// Build a config from raw collaborator values, never failing.
    ///
    /// - missing, blank or unknown win mode: `SCORE_50`
    /// - known family with a malformed value: [`WinCondition::Unbounded`]
    /// - missing or blank name: `LocalPlayer`
    pub fn from_inputs(win_mode: Option<&str>, player_name: Option<&str>, seed: u64) -> Self {
        let win = match win_mode.map(str::trim).filter(|s| !s.is_empty()) {
            None => WinCondition::default(),
            Some(mode) => match mode.parse::<WinCondition>() {
                Ok(win) => win,
                Err(WinModeError::UnknownFamily(raw)) => {
                    log::warn!("Unknown win mode {:?}, using {}", raw, DEFAULT_WIN_MODE);
                    WinCondition::default()
                }
                Err(e) => {
                    log::warn!("{}; session will end only on death or leave", e);
                    WinCondition::Unbounded
                }
            },
        };

        let player_name = player_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_PLAYER_NAME)
            .to_string();

        log::info!("Session config: win={:?} player={} seed={}", win, player_name, seed);

        Self {
            win,
            player_name,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_and_time() {
        assert_eq!("SCORE_50".parse(), Ok(WinCondition::ScoreTarget(50)));
        assert_eq!("SCORE_0".parse(), Ok(WinCondition::ScoreTarget(0)));
        assert_eq!("TIME_1m".parse(), Ok(WinCondition::TimeLimit { minutes: 1 }));
        assert_eq!("TIME_5M".parse(), Ok(WinCondition::TimeLimit { minutes: 5 }));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "SCORE_abc".parse::<WinCondition>(),
            Err(WinModeError::BadScore(_))
        ));
        assert!(matches!(
            "SCORE_-5".parse::<WinCondition>(),
            Err(WinModeError::BadScore(_))
        ));
        assert!(matches!(
            "TIME_3".parse::<WinCondition>(),
            Err(WinModeError::BadTime(_))
        ));
        assert!(matches!(
            "TIME_xm".parse::<WinCondition>(),
            Err(WinModeError::BadTime(_))
        ));
        assert!(matches!(
            "LIVES_3".parse::<WinCondition>(),
            Err(WinModeError::UnknownFamily(_))
        ));
    }

    #[test]
    fn test_from_inputs_fallbacks() {
        let cfg = SessionConfig::from_inputs(None, None, 7);
        assert_eq!(cfg.win, WinCondition::ScoreTarget(50));
        assert_eq!(cfg.player_name, DEFAULT_PLAYER_NAME);
        assert_eq!(cfg.seed, 7);

        let cfg = SessionConfig::from_inputs(Some("  "), Some("   "), 0);
        assert_eq!(cfg.win, WinCondition::ScoreTarget(50));
        assert_eq!(cfg.player_name, DEFAULT_PLAYER_NAME);

        let cfg = SessionConfig::from_inputs(Some("FOREVER"), Some("ace"), 0);
        assert_eq!(cfg.win, WinCondition::ScoreTarget(50));
        assert_eq!(cfg.player_name, "ace");

        let cfg = SessionConfig::from_inputs(Some("TIME_twom"), None, 0);
        assert_eq!(cfg.win, WinCondition::Unbounded);
    }

    #[test]
    fn test_limit_seconds() {
        assert_eq!(WinCondition::TimeLimit { minutes: 2 }.limit_seconds(), Some(120));
        assert_eq!(WinCondition::ScoreTarget(10).limit_seconds(), None);
        assert_eq!(WinCondition::Unbounded.score_target(), None);
    }
}

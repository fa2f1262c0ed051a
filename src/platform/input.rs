//! Keyboard input collection
//!
//! Tracks which recognized keys are currently held, fed from raw
//! `keydown`/`keyup` events.

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    AltFire,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Fire,
        Key::AltFire,
    ];

    /// Map a DOM `KeyboardEvent.key` value (case-insensitive)
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(Key::Up),
            "s" => Some(Key::Down),
            "a" => Some(Key::Left),
            "d" => Some(Key::Right),
            "j" => Some(Key::Fire),
            " " => Some(Key::AltFire),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    held: u8,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down event. Returns `true` if the key is recognized
    /// (the caller should then suppress the browser default).
    pub fn key_down(&mut self, dom_key: &str) -> bool {
        match Key::from_dom_key(dom_key) {
            Some(key) => {
                self.press(key);
                true
            }
            None => false,
        }
    }

    /// Handle a key-up event. Same return contract as [`KeySet::key_down`].
    pub fn key_up(&mut self, dom_key: &str) -> bool {
        match Key::from_dom_key(dom_key) {
            Some(key) => {
                self.release(key);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.held &= !key.bit();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held & key.bit() != 0
    }

    /// Release everything (e.g. on window blur)
    pub fn clear(&mut self) {
        self.held = 0;
    }

    /// Raw movement axis from held direction keys (screen coords, +y down).
    /// Not normalized; opposite keys cancel out.
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_held(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_held(Key::Down) {
            dir.y += 1.0;
        }
        if self.is_held(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_held(Key::Right) {
            dir.x += 1.0;
        }
        dir
    }

    pub fn fire_held(&self) -> bool {
        self.is_held(Key::Fire) || self.is_held(Key::AltFire)
    }

    /// Snapshot the held keys as simulation input
    pub fn to_input(&self) -> TickInput {
        TickInput {
            movement: self.movement(),
            fire: self.fire_held(),
        }
    }
}

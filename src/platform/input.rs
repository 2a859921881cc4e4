//! Held-action input state

use crate::sim::TickInput;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Kiss
    AttackShort,
    /// Flower
    AttackArc,
    /// Bomb
    AttackArea,
    PauseToggle,
    PerkToggle,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::AttackShort,
        Action::AttackArc,
        Action::AttackArea,
        Action::PauseToggle,
        Action::PerkToggle,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Action bound to a `KeyboardEvent.key` value
pub fn key_binding(key: &str) -> Option<Action> {
    let action = match key {
        "ArrowLeft" => Action::MoveLeft,
        "ArrowRight" => Action::MoveRight,
        "ArrowUp" | " " => Action::Jump,
        "Escape" => Action::PauseToggle,
        _ => {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return None;
            };
            match c.to_ascii_lowercase() {
                'a' => Action::MoveLeft,
                'd' => Action::MoveRight,
                'w' => Action::Jump,
                'j' | 'z' => Action::AttackShort,
                'k' | 'x' => Action::AttackArc,
                'l' | 'c' => Action::AttackArea,
                'p' => Action::PauseToggle,
                't' => Action::PerkToggle,
                _ => return None,
            }
        }
    };
    Some(action)
}

/// Currently held actions, with edge detection for the toggles
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: u8,
    /// Held set at the previous sample
    sampled: u8,
    /// Actions pressed and released between two samples
    tapped: u8,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: Action, down: bool) {
        if down {
            self.held |= action.bit();
        } else {
            if self.held & action.bit() != 0 && self.sampled & action.bit() == 0 {
                self.tapped |= action.bit();
            }
            self.held &= !action.bit();
        }
    }

    /// Key event helper; returns whether the key is bound
    pub fn handle_key(&mut self, key: &str, down: bool) -> bool {
        match key_binding(key) {
            Some(action) => {
                self.set(action, down);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// Release everything (focus lost)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for one tick. Pause and perk toggles fire once per press;
    /// jumps and attacks tapped since the last sample count as held once.
    pub fn sample(&mut self) -> TickInput {
        let pressed = (self.held & !self.sampled) | self.tapped;
        let active = self.held | self.tapped;
        self.sampled = self.held;
        self.tapped = 0;
        let on = |action: Action| active & action.bit() != 0;
        TickInput {
            left: self.is_held(Action::MoveLeft),
            right: self.is_held(Action::MoveRight),
            jump: on(Action::Jump),
            kiss: on(Action::AttackShort),
            flower: on(Action::AttackArc),
            bomb: on(Action::AttackArea),
            pause: pressed & Action::PauseToggle.bit() != 0,
            toggle_perks: pressed & Action::PerkToggle.bit() != 0,
        }
    }
}

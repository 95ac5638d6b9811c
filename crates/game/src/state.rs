//! Gameplay variables and phase model

use rand::{Rng, RngCore};

use crate::config::GameConfig;

/// Pixel coordinate in display space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    /// Column, 0 at the left edge
    pub x: u8,
    /// Row, 0 at the top edge
    pub y: u8,
}

impl Position {
    /// Build a position.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Display centre.
    pub const fn centre(config: &GameConfig) -> Self {
        Self::new(config.display_width / 2, config.display_height / 2)
    }

    /// True when both axis distances to `other` are strictly below `radius`.
    pub fn is_within(self, other: Self, radius: u8) -> bool {
        self.x.abs_diff(other.x) < radius && self.y.abs_diff(other.y) < radius
    }

    /// Uniformly random position at least `target_margin` pixels from every edge.
    pub fn random_target<R: RngCore>(rng: &mut R, config: &GameConfig) -> Self {
        let margin = config.target_margin;
        let max_x = config
            .display_width
            .saturating_sub(1)
            .saturating_sub(margin)
            .max(margin);
        let max_y = config
            .display_height
            .saturating_sub(1)
            .saturating_sub(margin)
            .max(margin);
        Self::new(rng.gen_range(margin..=max_x), rng.gen_range(margin..=max_y))
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Win score reached
    Victory,
    /// Too many consecutive misses
    Defeat,
}

/// Game phase. An outcome exists only once the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Ticks sample the cursor and consume clicks
    Playing,
    /// Ticks only show the paused colour
    Paused,
    /// Terminal screen until the next reset
    Ended(Outcome),
}

/// Result of consuming one confirm click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickResult {
    /// Cursor was on the target
    Hit,
    /// Cursor missed
    Miss,
}

/// All gameplay variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameState {
    /// Last sampled cursor
    pub cursor: Position,
    /// Current target
    pub target: Position,
    /// Hits this game
    pub score: u8,
    /// Clicks since the last hit
    pub clicks: u8,
    /// Current phase
    pub phase: Phase,
}

impl GameState {
    /// Fresh game with the cursor centred.
    pub const fn new(config: &GameConfig, target: Position) -> Self {
        Self {
            cursor: Position::centre(config),
            target,
            score: 0,
            clicks: 0,
            phase: Phase::Playing,
        }
    }

    /// Restore the fresh-game values in place.
    pub fn reset(&mut self, config: &GameConfig, target: Position) {
        *self = Self::new(config, target);
    }

    /// Outcome of an ended game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome),
            Phase::Playing | Phase::Paused => None,
        }
    }

    /// Switch between Playing and Paused. Returns `false` (no change) once ended.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            Phase::Ended(_) => return false,
        };
        true
    }

    /// Count a click and hit-test it against the target.
    ///
    /// A hit scores and clears the miss streak; the caller relocates the target.
    pub fn register_click(&mut self, hit_radius: u8) -> ClickResult {
        self.clicks = self.clicks.saturating_add(1);
        if self.cursor.is_within(self.target, hit_radius) {
            self.score = self.score.saturating_add(1);
            self.clicks = 0;
            ClickResult::Hit
        } else {
            ClickResult::Miss
        }
    }

    /// End condition reached by the current counters. Defeat is checked first.
    pub fn pending_outcome(&self, config: &GameConfig) -> Option<Outcome> {
        if self.clicks > config.max_misses {
            Some(Outcome::Defeat)
        } else if self.score >= config.win_score {
            Some(Outcome::Victory)
        } else {
            None
        }
    }
}

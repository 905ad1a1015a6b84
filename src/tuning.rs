//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A `Tuning` is handed to the game at
//! construction and carries physics, pipe and economy values. Particle burst
//! sizes and the accepted game-speed range stay fixed in `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics (per frame) ===
    pub gravity: f32,
    pub jump_force: f32,
    pub floor_bounce_factor: f32,
    pub pipe_knockback_factor: f32,
    pub rotation_factor: f32,
    pub rotation_max: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_x: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_gap_margin: f32,
    pub min_pipe_distance: f32,
    pub pipe_distance_range: f32,

    // === Economy ===
    pub shield_duration_ms: f64,
    pub shield_reward_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            floor_bounce_factor: FLOOR_BOUNCE_FACTOR,
            pipe_knockback_factor: PIPE_KNOCKBACK_FACTOR,
            rotation_factor: ROTATION_FACTOR,
            rotation_max: ROTATION_MAX,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_x: PLAYER_START_X,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_gap_margin: PIPE_GAP_MARGIN,
            min_pipe_distance: MIN_PIPE_DISTANCE,
            pipe_distance_range: PIPE_DISTANCE_RANGE,

            shield_duration_ms: SHIELD_DURATION_MS,
            shield_reward_interval: SHIELD_REWARD_INTERVAL,
        }
    }
}

impl Tuning {
    /// Upward bounce applied when a shield absorbs a floor hit
    pub fn floor_bounce(&self) -> f32 {
        self.jump_force * self.floor_bounce_factor
    }

    /// Knockback applied when a shield absorbs a pipe hit
    pub fn pipe_knockback(&self) -> f32 {
        self.jump_force * self.pipe_knockback_factor
    }

    /// Inclusive bounds for the next pipe spacing
    pub fn pipe_distance_bounds(&self) -> (f32, f32) {
        let min = self.min_pipe_distance.max(0.0);
        (min, min + self.pipe_distance_range.max(0.0))
    }
}

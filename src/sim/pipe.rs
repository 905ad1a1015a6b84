//! Gapped obstacles scrolling right to left

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::hits_pipe;
use super::player::Player;
use crate::color::Color;
use crate::tuning::Tuning;

/// Outcome of advancing a pipe by one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeStep {
    /// The player cleared this pipe this frame (fires once per pipe)
    pub scored: bool,
    /// The player overlaps the pipe outside the gap
    pub collided: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Vertical centre of the opening, fixed at spawn
    pub gap_center_y: f32,
    /// Opening height
    pub gap: f32,
    /// Set once the player's left edge is past the pipe's right edge
    pub passed: bool,
    pub color: Color,
}

impl Pipe {
    /// New pipe at the right edge of the canvas with a random gap position
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        rng: &mut R,
        tuning: &Tuning,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Self {
        let lo = tuning.pipe_gap_margin;
        let hi = (canvas_height - tuning.pipe_gap_margin).max(lo);
        Self {
            id,
            x: canvas_width,
            width: tuning.pipe_width,
            gap_center_y: rng.random_range(lo..=hi),
            gap: tuning.pipe_gap,
            passed: false,
            color: Color::hsl(rng.random_range(330.0..360.0), 70.0, 40.0),
        }
    }

    /// Scroll left, then check scoring and collision against the player
    pub fn advance(&mut self, player: &Player, speed: f32) -> PipeStep {
        self.x -= speed;

        let mut step = PipeStep::default();
        if !self.passed && self.right() < player.x {
            self.passed = true;
            step.scored = true;
        }
        step.collided = hits_pipe(
            &player.hitbox(),
            self.x,
            self.width,
            self.gap_center_y,
            self.gap,
        );
        step
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    /// Top of the opening
    pub fn gap_top(&self) -> f32 {
        self.gap_center_y - self.gap / 2.0
    }

    /// Bottom of the opening
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center_y + self.gap / 2.0
    }
}

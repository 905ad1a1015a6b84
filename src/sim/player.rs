//! The player avatar
//!
//! Pure physics: gravity, jumps and the canvas clamp. Whether a floor hit is
//! fatal is decided by the game loop, which owns the shield economy.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// What happened to the player during one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    /// Still in the air (possibly pinned to the ceiling)
    Airborne,
    /// Clamped to the floor this frame
    HitFloor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Fixed horizontal position
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    /// Visual tilt derived from velocity
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// A player vertically centred on a canvas of the given height
    pub fn new(tuning: &Tuning, canvas_height: f32) -> Self {
        let mut player = Self {
            x: tuning.player_x,
            y: 0.0,
            velocity: 0.0,
            rotation: 0.0,
            width: tuning.player_width,
            height: tuning.player_height,
        };
        player.reset(canvas_height);
        player
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        self.hitbox().center()
    }

    /// Lowest allowed `y`
    fn floor_y(&self, canvas_height: f32) -> f32 {
        (canvas_height - self.height).max(0.0)
    }

    /// Apply gravity, integrate and clamp to the canvas
    pub fn step(&mut self, tuning: &Tuning, canvas_height: f32) -> PlayerStep {
        self.velocity += tuning.gravity;
        self.y += self.velocity;
        self.rotation = (self.velocity * tuning.rotation_factor)
            .clamp(-tuning.rotation_max, tuning.rotation_max);

        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }

        let floor = self.floor_y(canvas_height);
        if self.y > floor {
            self.y = floor;
            self.velocity = 0.0;
            return PlayerStep::HitFloor;
        }

        PlayerStep::Airborne
    }

    pub fn jump(&mut self, tuning: &Tuning) {
        self.velocity = tuning.jump_force;
    }

    /// Push the player with a given velocity (shielded hits)
    pub fn knock(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Recentre vertically and come to rest. Called at every run start.
    pub fn reset(&mut self, canvas_height: f32) {
        self.y = (canvas_height / 2.0).min(self.floor_y(canvas_height));
        self.velocity = 0.0;
        self.rotation = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HEIGHT: f32 = 600.0;

    fn player() -> Player {
        Player::new(&Tuning::default(), HEIGHT)
    }

    #[test]
    fn test_new_player_is_centred_and_still() {
        let p = player();
        assert_eq!(p.x, 100.0);
        assert_eq!(p.y, 300.0);
        assert_eq!(p.velocity, 0.0);
        assert_eq!((p.width, p.height), (45.0, 100.0));
    }

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut p = player();
        p.step(&tuning, HEIGHT);
        p.step(&tuning, HEIGHT);
        assert!((p.velocity - 0.9).abs() < 1e-6);
        assert!((p.y - 301.35).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_is_clamped() {
        let tuning = Tuning::default();
        let mut p = player();
        p.velocity = 40.0;
        p.y = 0.0;
        p.step(&tuning, 10_000.0);
        assert_eq!(p.rotation, 0.5);

        p.velocity = -40.0;
        p.y = 5000.0;
        p.step(&tuning, 10_000.0);
        assert_eq!(p.rotation, -0.5);
    }

    #[test]
    fn test_ceiling_clamp() {
        let tuning = Tuning::default();
        let mut p = player();
        p.y = 3.0;
        p.jump(&tuning);
        assert_eq!(p.step(&tuning, HEIGHT), PlayerStep::Airborne);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.velocity, 0.0);
    }

    #[test]
    fn test_floor_clamp_reports_hit() {
        let tuning = Tuning::default();
        let mut p = player();
        p.y = 499.0;
        p.velocity = 5.0;
        assert_eq!(p.step(&tuning, HEIGHT), PlayerStep::HitFloor);
        assert_eq!(p.y, 500.0);
        assert_eq!(p.velocity, 0.0);
    }

    #[test]
    fn test_reset() {
        let tuning = Tuning::default();
        let mut p = player();
        p.jump(&tuning);
        p.step(&tuning, HEIGHT);
        p.reset(HEIGHT);
        assert_eq!(p.y, 300.0);
        assert_eq!(p.velocity, 0.0);
        assert_eq!(p.rotation, 0.0);
    }

    proptest! {
        #[test]
        fn prop_y_stays_on_canvas(
            start in 0.0f32..500.0,
            jumps in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let tuning = Tuning::default();
            let mut p = player();
            p.y = start;
            for jump in jumps {
                if jump {
                    p.jump(&tuning);
                }
                let rising_into_ceiling = p.y + (p.velocity + tuning.gravity) < 0.0;
                let step = p.step(&tuning, HEIGHT);
                prop_assert!(p.y >= 0.0);
                prop_assert!(p.y <= HEIGHT - p.height);
                if step == PlayerStep::HitFloor || rising_into_ceiling {
                    prop_assert_eq!(p.velocity, 0.0);
                }
            }
        }
    }
}

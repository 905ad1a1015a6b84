//! Collision tests between the player's hitbox and pipe columns
//!
//! Everything is axis-aligned: the player is a rectangle, a pipe is a column
//! of fixed width with an open vertical gap.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (y grows downward, canvas style)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Strict horizontal overlap between a hitbox and a column [x, x + width)
pub fn overlaps_column(hitbox: &Rect, column_x: f32, column_width: f32) -> bool {
    hitbox.right() > column_x && hitbox.left() < column_x + column_width
}

/// Whether any part of the hitbox sticks out of the vertical gap
pub fn outside_gap(hitbox: &Rect, gap_center_y: f32, gap: f32) -> bool {
    hitbox.top() < gap_center_y - gap / 2.0 || hitbox.bottom() > gap_center_y + gap / 2.0
}

/// Full pipe test: inside the column horizontally and outside the gap
pub fn hits_pipe(hitbox: &Rect, column_x: f32, column_width: f32, gap_center_y: f32, gap: f32) -> bool {
    overlaps_column(hitbox, column_x, column_width) && outside_gap(hitbox, gap_center_y, gap)
}

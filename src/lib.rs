//! Upside Flap - A side-scrolling flappy arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (player physics, pipes, particles, economy)
//! - `renderer`: Render snapshot and Canvas 2D drawing
//! - `audio`: Sound cues, music and narration
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Key/value progress storage
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod color;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod skins;
pub mod tuning;

pub use color::Color;
pub use settings::Settings;
pub use skins::{SkinCursor, SkinId};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physics values are per frame, not per second: the simulation advances
/// exactly once per rendered frame.
pub mod consts {
    /// Downward acceleration added to the player's velocity every frame
    pub const GRAVITY: f32 = 0.45;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_FORCE: f32 = -7.0;
    /// Bounce off the floor while shielded, as a fraction of JUMP_FORCE
    pub const FLOOR_BOUNCE_FACTOR: f32 = 0.6;
    /// Knockback from a shielded pipe hit, as a fraction of JUMP_FORCE
    pub const PIPE_KNOCKBACK_FACTOR: f32 = 0.8;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 45.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const PLAYER_START_X: f32 = 100.0;
    /// Rotation follows velocity, clamped to +/- ROTATION_MAX radians
    pub const ROTATION_FACTOR: f32 = 0.04;
    pub const ROTATION_MAX: f32 = 0.5;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    pub const PIPE_GAP: f32 = 230.0;
    /// Gap centres stay this far from the top and bottom edges
    pub const PIPE_GAP_MARGIN: f32 = 100.0;
    /// Spacing between pipes is drawn from [MIN, MIN + RANGE]
    pub const MIN_PIPE_DISTANCE: f32 = 200.0;
    pub const PIPE_DISTANCE_RANGE: f32 = 200.0;

    /// Shield window after a banked charge is consumed
    pub const SHIELD_DURATION_MS: f64 = 5000.0;
    /// Passes per banked shield charge
    pub const SHIELD_REWARD_INTERVAL: u32 = 10;

    /// Live pipe speed defaults and the accepted settings range
    pub const DEFAULT_GAME_SPEED: f32 = 2.0;
    pub const MIN_GAME_SPEED: f32 = 1.0;
    pub const MAX_GAME_SPEED: f32 = 5.0;

    /// Particle burst sizes
    pub const JUMP_PARTICLES: usize = 8;
    pub const SCORE_PARTICLES: usize = 10;
    pub const SHIELD_REWARD_PARTICLES: usize = 12;
    pub const SHIELD_HIT_PARTICLES: usize = 20;
    pub const DEATH_PARTICLES: usize = 30;
    pub const TITLE_PARTICLES: usize = 20;
}

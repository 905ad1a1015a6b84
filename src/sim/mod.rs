//! Per-frame simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One step per rendered frame
//! - Seeded RNG only
//! - Wall clock only through `TickInput::now_ms`
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod pipe;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, hits_pipe};
pub use particles::{Particle, ParticleSystem};
pub use pipe::{Pipe, PipeStep};
pub use player::{Player, PlayerStep};
pub use state::{
    DamageOutcome, GamePhase, GameState, Hud, PassReward, PurchaseOutcome, RunSummary,
    StateManager,
};
pub use tick::{Game, GameEvent, TickInput};

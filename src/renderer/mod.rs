//! Rendering module
//!
//! The simulation exposes one immutable snapshot per frame; drawing it is the
//! host's business. On the web that is the Canvas 2D drawer in `canvas`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

use crate::color::Color;
use crate::sim::{Game, GamePhase, Hud};
use crate::skins::SkinId;

/// Player pose for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub skin: SkinId,
    pub color: Color,
    pub shielded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipeView {
    pub x: f32,
    pub width: f32,
    pub gap_center_y: f32,
    pub gap: f32,
    /// Opening edges
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    /// `life / 100`
    pub opacity: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub player: PlayerView,
    /// Spawn order, oldest first
    pub pipes: Vec<PipeView>,
    pub particles: Vec<ParticleView>,
    pub hud: Hud,
}

impl RenderFrame {
    pub fn capture(game: &Game, now_ms: f64) -> Self {
        let state = game.state();
        let player = game.player();
        let (width, height) = game.size();

        Self {
            width,
            height,
            phase: state.phase,
            player: PlayerView {
                x: player.x,
                y: player.y,
                width: player.width,
                height: player.height,
                rotation: player.rotation,
                skin: state.current_skin,
                color: state.current_skin.color(),
                shielded: state.has_active_shield(now_ms),
            },
            pipes: game
                .pipes()
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    width: p.width,
                    gap_center_y: p.gap_center_y,
                    gap: p.gap,
                    gap_top: p.gap_top(),
                    gap_bottom: p.gap_bottom(),
                    color: p.color,
                })
                .collect(),
            particles: game
                .particles()
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    opacity: p.opacity(),
                })
                .collect(),
            hud: state.hud(now_ms),
        }
    }
}

/// HUD line, e.g. "Score: 3  Skulls: 12  Shields: 1"
pub fn hud_text(hud: &Hud) -> String {
    format!(
        "Score: {}  Skulls: {}  Shields: {}",
        hud.score, hud.skulls, hud.shield_charges
    )
}

/// Game-over line, e.g. "7 (High: 12)"
pub fn final_score_text(score: u32, high_score: u32) -> String {
    format!("{} (High: {})", score, high_score)
}

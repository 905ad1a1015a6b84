//! Canvas 2D drawer for [`RenderFrame`]s
//!
//! Procedural shapes only; sprites are optional polish the game never waits
//! for.

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{ParticleView, PipeView, PlayerView, RenderFrame};
use crate::color::Color;
use crate::skins::SkinStyle;

const BACKGROUND: &str = "#0b0208";
const PIPE_CAP_HEIGHT: f64 = 20.0;
const SKIN_TONE: &str = "#f5d6c6";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw a whole frame. `time_ms` only drives idle animations.
    pub fn draw(&self, frame: &RenderFrame, time_ms: f64) {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

        for pipe in &frame.pipes {
            self.draw_pipe(pipe, frame.height as f64);
        }
        for particle in &frame.particles {
            self.draw_particle(particle);
        }
        self.draw_player(&frame.player, time_ms);
    }

    fn draw_pipe(&self, pipe: &PipeView, canvas_height: f64) {
        let ctx = &self.ctx;
        let x = pipe.x as f64;
        let w = pipe.width as f64;
        let gap_top = pipe.gap_top as f64;
        let gap_bottom = pipe.gap_bottom as f64;

        ctx.set_fill_style_str(&pipe.color.to_css());
        ctx.fill_rect(x, 0.0, w, gap_top);
        ctx.fill_rect(x, gap_bottom, w, canvas_height - gap_bottom);

        // Shaded right edge and caps
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
        ctx.fill_rect(x + w - 10.0, 0.0, 10.0, gap_top);
        ctx.fill_rect(x + w - 10.0, gap_bottom, 10.0, canvas_height - gap_bottom);
        ctx.set_fill_style_str("#6b0010");
        ctx.fill_rect(x - 5.0, gap_top - PIPE_CAP_HEIGHT, w + 10.0, PIPE_CAP_HEIGHT);
        ctx.fill_rect(x - 5.0, gap_bottom, w + 10.0, PIPE_CAP_HEIGHT);
    }

    fn draw_particle(&self, p: &ParticleView) {
        let ctx = &self.ctx;
        ctx.set_global_alpha(p.opacity as f64);
        ctx.set_fill_style_str(&p.color.to_css());
        ctx.begin_path();
        let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64, 0.0, TAU);
        ctx.fill();
        ctx.set_global_alpha(1.0);
    }

    fn draw_player(&self, player: &PlayerView, time_ms: f64) {
        let ctx = &self.ctx;
        let w = player.width as f64;
        let h = player.height as f64;

        ctx.save();
        let _ = ctx.translate(player.x as f64 + w / 2.0, player.y as f64 + h / 2.0);
        let _ = ctx.rotate(player.rotation as f64);

        if player.shielded {
            ctx.set_stroke_style_str("rgba(77, 171, 247, 0.7)");
            ctx.set_line_width(4.0);
            ctx.begin_path();
            let _ = ctx.arc(0.0, 0.0, w / 1.5, 0.0, TAU);
            ctx.stroke();
        }

        let color = player.color.to_css();
        match player.skin.info().style {
            SkinStyle::Monster => self.draw_monster(w, h, &color, time_ms),
            SkinStyle::Kid { hair } => self.draw_kid(w, h, &color, hair),
            SkinStyle::Shadow => self.draw_shadow(w, h, time_ms),
            SkinStyle::Waffle => self.draw_waffle(w, h, &color),
        }

        ctx.restore();
    }

    fn draw_monster(&self, w: f64, h: f64, color: &str, time_ms: f64) {
        let ctx = &self.ctx;
        let mouth_pulse = (time_ms * 0.008).sin() * 0.3 + 0.7;
        let petal_spread = (time_ms * 0.006).sin() * 0.1 + 1.0;

        ctx.set_fill_style_str(color);
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, 0.0, w / 2.4, h / 2.4, 0.0, 0.0, TAU);
        ctx.fill();

        ctx.set_fill_style_str("#000");
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, (w / 5.0) * mouth_pulse, 0.0, TAU);
        ctx.fill();

        ctx.set_fill_style_str(color);
        for i in 0..5 {
            ctx.save();
            let _ = ctx.rotate(i as f64 / 5.0 * TAU);
            ctx.begin_path();
            ctx.move_to(w / 4.5, -h / 7.0);
            ctx.line_to(w / 4.5, h / 7.0);
            ctx.line_to((w / 1.3) * petal_spread, 0.0);
            ctx.close_path();
            ctx.fill();
            ctx.restore();
        }
    }

    fn draw_kid(&self, w: f64, h: f64, color: &str, hair: Color) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str(SKIN_TONE);
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, -h / 6.0, w / 2.5, h / 3.0, 0.0, 0.0, TAU);
        ctx.fill();

        ctx.set_fill_style_str(&hair.to_css());
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, -h / 3.5, w / 2.3, h / 5.0, 0.0, PI, TAU);
        ctx.fill();

        ctx.set_fill_style_str("#000");
        ctx.begin_path();
        let _ = ctx.arc(-w / 7.0, -h / 6.0, 3.0, 0.0, TAU);
        let _ = ctx.arc(w / 7.0, -h / 6.0, 3.0, 0.0, TAU);
        ctx.fill();

        ctx.set_fill_style_str(color);
        ctx.fill_rect(-w / 3.0, h / 10.0, w / 1.5, h / 2.5);
    }

    fn draw_shadow(&self, w: f64, h: f64, time_ms: f64) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str("rgba(0, 0, 0, 0.9)");
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, -3.0, w / 3.4, h / 1.5, 0.0, 0.0, TAU);
        ctx.fill();

        ctx.set_stroke_style_str("rgba(0, 0, 0, 0.75)");
        ctx.set_line_width(1.3);
        let reach = h * 2.1;
        let wave = time_ms * 0.003;
        for i in 0..6 {
            let angle = -PI / 2.0 + (i as f64 - 2.5) * 0.28 + (wave + i as f64 * 0.8).sin() * 0.15;
            ctx.begin_path();
            ctx.move_to(0.0, -1.0);
            ctx.quadratic_curve_to(
                angle.cos() * reach * 0.35,
                angle.sin() * reach * 0.35,
                angle.cos() * reach * 0.9,
                angle.sin() * reach * 0.9,
            );
            ctx.stroke();
        }
    }

    fn draw_waffle(&self, w: f64, h: f64, color: &str) {
        let ctx = &self.ctx;

        ctx.set_fill_style_str(color);
        ctx.fill_rect(-w / 2.5, -h / 4.0, w / 1.25, h / 2.0);

        ctx.set_stroke_style_str("#c68642");
        ctx.set_line_width(2.0);
        for i in -2..=2 {
            let i = i as f64;
            ctx.begin_path();
            ctx.move_to(i * 6.0, -h / 4.0);
            ctx.line_to(i * 6.0, h / 4.0);
            ctx.stroke();
            ctx.begin_path();
            ctx.move_to(-w / 2.5, i * 8.0);
            ctx.line_to(w / 2.5, i * 8.0);
            ctx.stroke();
        }

        ctx.set_fill_style_str("#fffacd");
        ctx.fill_rect(-5.0, -5.0, 10.0, 10.0);
    }
}

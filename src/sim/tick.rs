//! Per-frame game loop
//!
//! The host calls [`Game::tick`] once per display refresh. Frame order:
//! spawn pipes, advance pipes (scoring and collisions), advance the player
//! (floor hits), advance particles. While idle the tick is a no-op.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particles::ParticleSystem;
use super::pipe::Pipe;
use super::player::{Player, PlayerStep};
use super::state::{
    DamageOutcome, GamePhase, GameState, Hud, PurchaseOutcome, RunSummary, StateManager,
};
use crate::color::Color;
use crate::consts::*;
use crate::persistence::Store;
use crate::skins::SkinId;
use crate::tuning::Tuning;

/// How far above a gap's lower lip the autopilot keeps the player's feet
const AUTOPILOT_MARGIN: f32 = 25.0;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed since the last frame
    pub jump: bool,
    /// Demo mode - the game flies itself
    pub autopilot: bool,
    /// Wall clock (ms) used for shield expiry
    pub now_ms: f64,
}

/// Notifications for the presentation layer, drained after each frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStarted,
    Jumped,
    Scored { score: u32, skulls: u32 },
    /// A pass banked a shield charge
    ShieldEarned { charges: u32 },
    /// A banked charge opened a shield window
    ShieldActivated { until_ms: f64 },
    /// Pipe or floor contact; `absorbed` when a shield took it
    Hit { absorbed: bool },
    GameOver {
        score: u32,
        high_score: u32,
        new_high_score: bool,
        message: &'static str,
    },
    SkinChanged { skin: SkinId },
    SkullsChanged { skulls: u32 },
    SpeedChanged { speed: f32 },
}

/// The whole game: state manager plus the live entities it doesn't own
pub struct Game {
    tuning: Tuning,
    width: f32,
    height: f32,
    manager: StateManager,
    player: Player,
    /// Oldest first; the last entry is the most recent spawn
    pipes: Vec<Pipe>,
    particles: ParticleSystem,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_pipe_id: u32,
    /// Frames simulated in the current run
    run_frames: u64,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("manager", &self.manager)
            .field("player", &self.player)
            .field("pipes", &self.pipes.len())
            .field("particles", &self.particles.len())
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Load progress from `store` and show the title screen
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning, store: Box<dyn Store>) -> Self {
        let manager = StateManager::load(store, &tuning);
        let player = Player::new(&tuning, height);
        let mut game = Self {
            tuning,
            width,
            height,
            manager,
            player,
            pipes: Vec::new(),
            particles: ParticleSystem::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_pipe_id: 1,
            run_frames: 0,
        };
        game.scatter_title_particles();
        game
    }

    fn scatter_title_particles(&mut self) {
        for _ in 0..TITLE_PARTICLES {
            let x = self.rng.random_range(0.0..=self.width);
            let y = self.rng.random_range(0.0..=self.height);
            let hue = self.rng.random_range(300.0..360.0);
            self.particles
                .spawn(&mut self.rng, x, y, 1, Some(Color::hsl(hue, 100.0, 50.0)));
        }
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        self.manager.state()
    }

    pub fn manager(&self) -> &StateManager {
        &self.manager
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn run_frames(&self) -> u64 {
        self.run_frames
    }

    pub fn hud(&self, now_ms: f64) -> Hud {
        self.state().hud(now_ms)
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Run lifecycle ===

    /// Start a fresh run. No-op while a run is in progress.
    pub fn start_game(&mut self) -> bool {
        if !self.manager.begin_run(&mut self.rng) {
            return false;
        }
        self.pipes.clear();
        self.particles.clear();
        self.player.reset(self.height);
        self.run_frames = 0;
        self.events.push(GameEvent::GameStarted);
        log::info!(
            "Run started (speed {}, skin {})",
            self.state().pipe_speed,
            self.state().current_skin.as_str()
        );
        true
    }

    /// End the run. No-op while idle.
    pub fn game_over(&mut self) -> Option<RunSummary> {
        let summary = self.manager.end_run()?;
        let (cx, cy) = self.player.center();
        self.particles
            .spawn(&mut self.rng, cx, cy, DEATH_PARTICLES, None);
        self.events.push(GameEvent::GameOver {
            score: summary.score,
            high_score: summary.high_score,
            new_high_score: summary.new_high_score,
            message: summary.message,
        });
        log::info!(
            "Game over after {} frames: score {} (best {})",
            self.run_frames,
            summary.score,
            summary.high_score
        );
        Some(summary)
    }

    /// Jump. No-op unless running.
    pub fn jump(&mut self) {
        if !self.manager.is_running() {
            return;
        }
        self.player.jump(&self.tuning);
        let (cx, cy) = self.player.center();
        let color = self.state().current_skin.color();
        self.particles
            .spawn(&mut self.rng, cx, cy, JUMP_PARTICLES, Some(color));
        self.events.push(GameEvent::Jumped);
    }

    /// The one-button rule: restart from the game-over screen, jump otherwise
    pub fn press(&mut self) {
        if self.state().phase == GamePhase::GameOver {
            self.start_game();
        } else {
            self.jump();
        }
    }

    // === Frame ===

    /// Advance the simulation by one frame
    pub fn tick(&mut self, input: &TickInput) {
        if !self.manager.is_running() {
            return;
        }
        self.run_frames += 1;

        if input.jump || (input.autopilot && self.autopilot_wants_jump()) {
            self.jump();
        }

        self.spawn_pipes();
        self.update_pipes(input.now_ms);

        if self.manager.is_running()
            && self.player.step(&self.tuning, self.height) == PlayerStep::HitFloor
        {
            self.take_damage(input.now_ms, self.tuning.floor_bounce(), 0);
        }

        self.particles.advance();
    }

    /// Animate particles on the title and game-over screens. Call once per
    /// frame alongside [`Game::tick`]; while running the tick owns particles
    /// and this does nothing.
    pub fn advance_effects(&mut self) {
        if self.manager.is_running() {
            return;
        }
        self.particles.advance();
    }

    fn spawn_pipes(&mut self) {
        let due = match self.pipes.last() {
            None => true,
            Some(last) => self.width - last.right() >= self.state().next_pipe_distance,
        };
        if !due {
            return;
        }

        let id = self.next_pipe_id;
        self.next_pipe_id += 1;
        let pipe = Pipe::spawn(id, &mut self.rng, &self.tuning, self.width, self.height);
        log::debug!("Spawned pipe {} with gap at {:.0}", id, pipe.gap_center_y);
        self.pipes.push(pipe);
        self.manager.reset_pipe_distance(&mut self.rng);
    }

    fn update_pipes(&mut self, now_ms: f64) {
        let speed = self.state().pipe_speed;
        // Reverse sweep so in-place removal is safe
        for i in (0..self.pipes.len()).rev() {
            let step = self.pipes[i].advance(&self.player, speed);

            // After a death the remaining pipes only scroll
            if self.manager.is_running() {
                if step.scored {
                    let pipe = &self.pipes[i];
                    let (x, y, color) = (pipe.x + pipe.width / 2.0, pipe.gap_center_y, pipe.color);
                    self.on_score(x, y, color);
                }
                if step.collided {
                    self.take_damage(now_ms, self.tuning.pipe_knockback(), SHIELD_HIT_PARTICLES);
                }
            }

            if self.pipes[i].is_off_screen() {
                self.pipes.remove(i);
            }
        }
    }

    fn on_score(&mut self, x: f32, y: f32, color: Color) {
        let reward = self.manager.record_pass();
        self.events.push(GameEvent::Scored {
            score: reward.score,
            skulls: reward.skulls,
        });

        if reward.shield_earned {
            let (cx, _) = self.player.center();
            self.particles.spawn(
                &mut self.rng,
                cx,
                self.player.y,
                SHIELD_REWARD_PARTICLES,
                Some(Color::SHIELD),
            );
            let charges = self.state().shield_charges;
            self.events.push(GameEvent::ShieldEarned { charges });
        }

        self.particles
            .spawn(&mut self.rng, x, y, SCORE_PARTICLES, Some(color));
    }

    /// Shield or death: shared by pipe and floor contact
    fn take_damage(&mut self, now_ms: f64, knockback: f32, particles: usize) {
        let outcome = self.manager.absorb_damage(now_ms);
        self.events.push(GameEvent::Hit {
            absorbed: !outcome.is_fatal(),
        });

        match outcome {
            DamageOutcome::Fatal => {
                self.game_over();
            }
            DamageOutcome::ShieldConsumed { until_ms } => {
                self.events.push(GameEvent::ShieldActivated { until_ms });
                self.deflect(knockback, particles);
            }
            DamageOutcome::Absorbed => self.deflect(knockback, particles),
        }
    }

    fn deflect(&mut self, knockback: f32, particles: usize) {
        self.player.knock(knockback);
        if particles > 0 {
            let (cx, cy) = self.player.center();
            self.particles
                .spawn(&mut self.rng, cx, cy, particles, Some(Color::SHIELD));
        }
    }

    /// Demo-mode pilot: keep the player's feet above the next gap's lower lip
    fn autopilot_wants_jump(&self) -> bool {
        let target_bottom = self
            .pipes
            .iter()
            .find(|p| p.right() >= self.player.x)
            .map(|p| p.gap_bottom().min(self.height))
            .unwrap_or((self.height + self.player.height) / 2.0)
            - AUTOPILOT_MARGIN;

        // Where the feet will be after this frame's gravity step
        let next_bottom =
            self.player.y + self.player.height + self.player.velocity + self.tuning.gravity;
        next_bottom > target_bottom
    }

    // === Shop & settings ===

    pub fn select_skin(&mut self, skin: SkinId) -> bool {
        let selected = self.manager.select_skin(skin);
        if selected {
            self.events.push(GameEvent::SkinChanged { skin });
        }
        selected
    }

    pub fn purchase_skin(&mut self, skin: SkinId) -> PurchaseOutcome {
        let outcome = self.manager.purchase_skin(skin);
        match outcome {
            PurchaseOutcome::Purchased { .. } => {
                let skulls = self.state().skulls;
                self.events.push(GameEvent::SkullsChanged { skulls });
                self.events.push(GameEvent::SkinChanged { skin });
            }
            PurchaseOutcome::Equipped => self.events.push(GameEvent::SkinChanged { skin }),
            PurchaseOutcome::InsufficientSkulls { .. } => {}
        }
        outcome
    }

    pub fn set_game_speed(&mut self, speed: f32) -> f32 {
        let applied = self.manager.set_game_speed(speed);
        self.events.push(GameEvent::SpeedChanged { speed: applied });
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, keys};
    use crate::sim::particles::Particle;
    use glam::Vec2;

    fn game_with(width: f32, height: f32, store: MemoryStore) -> Game {
        Game::new(12345, width, height, Tuning::default(), Box::new(store))
    }

    fn game() -> Game {
        game_with(400.0, 600.0, MemoryStore::new())
    }

    fn at(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            ..Default::default()
        }
    }

    fn count_deaths(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    /// A pipe whose gap sits exactly where the player is
    fn safe_pipe(game: &Game, x: f32) -> Pipe {
        Pipe {
            id: 99,
            x,
            width: 80.0,
            gap_center_y: game.player().y + game.player().height / 2.0,
            gap: 230.0,
            passed: false,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_idle_ticks_change_nothing() {
        let mut g = game();
        let particles_before = g.particles().len();
        let y_before = g.player().y;

        for i in 0..50 {
            g.tick(&TickInput {
                jump: true,
                autopilot: true,
                now_ms: i as f64,
            });
        }

        assert_eq!(g.particles().len(), particles_before);
        assert!(g.pipes().is_empty());
        assert_eq!(g.player().y, y_before);
        assert_eq!(g.run_frames(), 0);
        assert!(g.drain_events().is_empty());
    }

    #[test]
    fn test_idle_after_game_over_changes_nothing() {
        let mut g = game();
        g.start_game();
        for i in 0..200 {
            g.tick(&at(i as f64));
        }
        assert_eq!(g.state().phase, GamePhase::GameOver);

        let positions: Vec<_> = g.particles().iter().map(|p| p.pos).collect();
        let pipes: Vec<_> = g.pipes().iter().map(|p| p.x).collect();
        let y = g.player().y;
        for i in 0..20 {
            g.tick(&at(1_000.0 + i as f64));
        }
        let after: Vec<_> = g.particles().iter().map(|p| p.pos).collect();
        assert_eq!(positions, after);
        assert_eq!(pipes, g.pipes().iter().map(|p| p.x).collect::<Vec<_>>());
        assert_eq!(g.player().y, y);
    }

    #[test]
    fn test_no_input_falls_to_death_exactly_once() {
        let mut g = game();
        assert!(g.start_game());
        let mut events = Vec::new();
        for frame in 0..200 {
            g.tick(&at(frame as f64 * 16.0));
            events.extend(g.drain_events());
        }

        assert_eq!(count_deaths(&events), 1);
        assert_eq!(g.state().phase, GamePhase::GameOver);
        assert_eq!(g.player().y, 600.0 - g.player().height);
        assert_eq!(g.player().velocity, 0.0);
        assert!(events.contains(&GameEvent::Hit { absorbed: false }));
    }

    #[test]
    fn test_floor_hit_with_banked_shield_bounces() {
        let mut g = game();
        g.start_game();
        g.manager.state_mut_for_tests().shield_charges = 1;
        g.player.y = 499.0;
        g.player.velocity = 5.0;

        g.tick(&at(1_000.0));

        assert!(g.state().is_running());
        assert_eq!(g.state().shield_charges, 0);
        assert_eq!(g.state().shield_active_until, 6_000.0);
        assert!((g.player().velocity - (-4.2)).abs() < 1e-5);
        let events = g.drain_events();
        assert!(events.contains(&GameEvent::ShieldActivated { until_ms: 6_000.0 }));
        assert!(events.contains(&GameEvent::Hit { absorbed: true }));
    }

    #[test]
    fn test_pipe_hit_while_shielded_knocks_back() {
        let mut g = game();
        g.start_game();
        g.manager.state_mut_for_tests().shield_active_until = 10_000.0;
        g.player.y = 200.0;
        let pipe = Pipe {
            gap_center_y: 500.0,
            ..safe_pipe(&g, 130.0)
        };
        g.pipes.push(pipe);
        let before = g.particles().len();

        g.tick(&at(500.0));

        assert!(g.state().is_running());
        assert_eq!(g.state().shield_charges, 0);
        // Knockback, then one frame of gravity
        assert!((g.player().velocity - (-5.6 + 0.45)).abs() < 1e-5);
        assert_eq!(g.particles().len(), before + SHIELD_HIT_PARTICLES);
    }

    #[test]
    fn test_pipe_hit_without_shield_is_fatal() {
        let mut g = game();
        g.start_game();
        g.player.y = 0.0;
        let pipe = Pipe {
            gap_center_y: 450.0,
            ..safe_pipe(&g, 130.0)
        };
        g.pipes.push(pipe);

        g.tick(&at(0.0));

        assert_eq!(g.state().phase, GamePhase::GameOver);
        assert_eq!(count_deaths(&g.drain_events()), 1);
    }

    #[test]
    fn test_score_fires_once_per_pipe() {
        let mut g = game();
        g.start_game();
        let pipe = safe_pipe(&g, 24.0);
        g.pipes.push(pipe);
        g.state_mut_for_tests().next_pipe_distance = 10_000.0;

        let mut scored = 0;
        // 50 frames keeps the pipe on screen (x ends at -76)
        for frame in 0..50 {
            // Hold the player still in the gap
            g.player.velocity = -g.tuning.gravity;
            g.tick(&at(frame as f64));
            scored += g
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count();
        }

        assert_eq!(scored, 1);
        assert_eq!(g.state().score, 1);
        assert_eq!(g.state().skulls, 1);
        assert!(g.pipes().iter().all(|p| p.passed));
    }

    #[test]
    fn test_tenth_pass_banks_shield() {
        let mut g = game();
        g.start_game();
        for _ in 0..9 {
            g.on_score(0.0, 0.0, Color::WHITE);
        }
        assert_eq!(g.state().shield_charges, 0);
        g.on_score(0.0, 0.0, Color::WHITE);
        assert_eq!(g.state().shield_charges, 1);
        assert_eq!(g.state().skulls, 10);

        let earned = g
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ShieldEarned { .. }))
            .count();
        assert_eq!(earned, 1);
    }

    #[test]
    fn test_spawn_policy() {
        let mut g = game();
        g.start_game();
        g.tick(&at(0.0));
        assert_eq!(g.pipes().len(), 1);
        assert_eq!(g.pipes()[0].x, 400.0 - 2.0);

        g.state_mut_for_tests().next_pipe_distance = 250.0;
        g.pipes[0].gap_center_y = g.player().y + g.player().height / 2.0;
        // Trailing gap = 400 - (x + 80); reaches 250 once x <= 70
        while g.pipes()[0].x > 70.0 {
            g.player.velocity = -g.tuning.gravity;
            g.tick(&at(0.0));
            assert_eq!(g.pipes().len(), 1, "spawned early at x = {}", g.pipes()[0].x);
        }
        g.player.velocity = -g.tuning.gravity;
        g.tick(&at(0.0));
        assert_eq!(g.pipes().len(), 2);
        assert!((200.0..=400.0).contains(&g.state().next_pipe_distance));
    }

    #[test]
    fn test_off_screen_pipes_removed() {
        let mut g = game();
        g.start_game();
        g.state_mut_for_tests().next_pipe_distance = 10_000.0;
        let gone = Pipe {
            passed: true,
            ..safe_pipe(&g, -79.0)
        };
        let next = safe_pipe(&g, 300.0);
        g.pipes.extend([gone, next]);

        g.player.velocity = -g.tuning.gravity;
        g.tick(&at(0.0));

        assert_eq!(g.pipes().len(), 1);
        assert_eq!(g.pipes()[0].x, 298.0);
    }

    #[test]
    fn test_start_game_resets_run() {
        let mut g = game();
        g.start_game();
        for i in 0..200 {
            g.tick(&at(i as f64));
        }
        assert!(!g.pipes().is_empty());

        assert!(g.start_game());
        assert!(g.pipes().is_empty());
        assert!(g.particles().is_empty());
        assert_eq!(g.player().y, 300.0);
        assert_eq!(g.state().score, 0);
        assert!(!g.start_game());
    }

    #[test]
    fn test_jump_only_while_running() {
        let mut g = game();
        g.jump();
        assert_eq!(g.player().velocity, 0.0);
        assert!(g.drain_events().is_empty());

        g.start_game();
        g.drain_events();
        g.jump();
        assert_eq!(g.player().velocity, JUMP_FORCE);
        assert_eq!(g.particles().len(), JUMP_PARTICLES);
        let skin_color = g.state().current_skin.color();
        assert!(g.particles().iter().all(|p| p.color == skin_color));
        assert_eq!(g.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_press_restarts_only_from_game_over() {
        let mut g = game();
        g.press();
        assert_eq!(g.state().phase, GamePhase::Title);

        g.start_game();
        g.press();
        assert_eq!(g.player().velocity, JUMP_FORCE);

        g.game_over();
        assert_eq!(g.state().phase, GamePhase::GameOver);
        g.press();
        assert!(g.state().is_running());
    }

    #[test]
    fn test_game_over_persists_improved_high_score() {
        let store = MemoryStore::with([(keys::HIGH_SCORE, "2")]);
        let mut g = game_with(400.0, 600.0, store);
        g.start_game();
        for _ in 0..3 {
            g.on_score(0.0, 0.0, Color::WHITE);
        }
        let before = g.particles().len();
        let summary = g.game_over().unwrap();
        assert!(summary.new_high_score);
        assert_eq!(g.manager().store().get(keys::HIGH_SCORE).as_deref(), Some("3"));
        assert_eq!(g.particles().len(), before + DEATH_PARTICLES);
        assert!(g.game_over().is_none());
    }

    #[test]
    fn test_particles_advance_while_running() {
        let mut g = game();
        g.start_game();
        g.particles.push(Particle::new(
            Vec2::ZERO,
            Vec2::new(1.0, 1.0),
            3.0,
            Color::WHITE,
            25.0,
        ));
        g.state_mut_for_tests().next_pipe_distance = 10_000.0;
        for _ in 0..4 {
            g.player.velocity = -g.tuning.gravity;
            g.tick(&at(0.0));
        }
        assert!(g.particles().is_empty());
    }

    #[test]
    fn test_jump_input_applies_on_next_tick() {
        let mut g = game();
        g.start_game();
        g.drain_events();
        g.tick(&TickInput {
            jump: true,
            ..Default::default()
        });
        assert_eq!(g.player().velocity, JUMP_FORCE + g.tuning().gravity);
        assert!(g.drain_events().contains(&GameEvent::Jumped));

        g.tick(&at(0.0));
        assert!(!g.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_death_burst_fades_between_runs() {
        let mut g = game();
        g.start_game();
        g.game_over();
        assert_eq!(g.particles().len(), DEATH_PARTICLES);
        let opacity = |g: &Game| g.particles().iter().map(|p| p.opacity()).sum::<f32>();
        let burst = opacity(&g);

        for i in 0..10 {
            g.tick(&at(i as f64));
        }
        assert_eq!(opacity(&g), burst);

        g.advance_effects();
        assert!(opacity(&g) < burst);
        // Decay is at least 1 per frame
        for _ in 0..100 {
            g.advance_effects();
        }
        assert!(g.particles().is_empty());
    }

    #[test]
    fn test_effects_step_leaves_running_frames_to_tick() {
        let mut g = game();
        g.start_game();
        g.jump();
        let before: Vec<_> = g.particles().iter().map(|p| p.life).collect();
        g.advance_effects();
        let after: Vec<_> = g.particles().iter().map(|p| p.life).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_autopilot_flies() {
        let mut g = game();
        g.start_game();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            g.tick(&input);
        }
        assert!(g.state().is_running());
        assert!(g.state().score >= 5, "score {}", g.state().score);
    }

    #[test]
    fn test_determinism() {
        let mut a = game();
        let mut b = game();
        a.start_game();
        b.start_game();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..500 {
            a.tick(&input);
            b.tick(&input);
        }
        assert_eq!(a.state().score, b.state().score);
        assert_eq!(a.pipes().len(), b.pipes().len());
        for (pa, pb) in a.pipes().iter().zip(b.pipes()) {
            assert_eq!(pa.gap_center_y, pb.gap_center_y);
        }
        assert_eq!(a.player().y, b.player().y);
    }

    #[test]
    fn test_shop_events() {
        let mut g = game_with(400.0, 600.0, MemoryStore::with([(keys::SKULLS, "30")]));
        assert_eq!(g.purchase_skin(SkinId::Erica), PurchaseOutcome::Purchased { cost: 30 });
        let events = g.drain_events();
        assert!(events.contains(&GameEvent::SkullsChanged { skulls: 0 }));
        assert!(events.contains(&GameEvent::SkinChanged { skin: SkinId::Erica }));

        assert!(!g.select_skin(SkinId::Vecna));
        assert!(g.drain_events().is_empty());

        assert_eq!(g.set_game_speed(4.0), 4.0);
        assert_eq!(g.drain_events(), vec![GameEvent::SpeedChanged { speed: 4.0 }]);
    }

    impl Game {
        fn state_mut_for_tests(&mut self) -> &mut GameState {
            self.manager.state_mut_for_tests()
        }
    }
}

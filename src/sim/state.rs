//! Game state and the state manager
//!
//! `GameState` is the single authoritative snapshot of the session and the
//! persisted progress. `StateManager` owns it together with the store and is
//! the only thing that mutates it, writing each change through immediately.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_GAME_SPEED, MIN_GAME_SPEED};
use crate::persistence::{Progress, Store, encode_unlocked, keys};
use crate::skins::SkinId;
use crate::tuning::Tuning;

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle before the first run (start screen)
    Title,
    /// Simulation advancing
    Running,
    /// Idle after a death, game-over screen shown
    GameOver,
}

/// Result of a damage event (pipe or floor)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// A shield window was already open; nothing consumed
    Absorbed,
    /// A banked charge was spent to open a new shield window
    ShieldConsumed { until_ms: f64 },
    /// No protection: the run ends
    Fatal,
}

impl DamageOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DamageOutcome::Fatal)
    }
}

/// Result of a shop click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Skulls spent, skin unlocked and equipped
    Purchased { cost: u32 },
    /// Already owned: equipped, nothing spent
    Equipped,
    /// Not enough skulls: nothing changes
    InsufficientSkulls { cost: u32, skulls: u32 },
}

/// What a successful pass earned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReward {
    pub score: u32,
    pub skulls: u32,
    /// A shield charge was banked by this pass
    pub shield_earned: bool,
}

/// End-of-run summary for the game-over screen
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub message: &'static str,
}

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub skulls: u32,
    pub shield_charges: u32,
    pub shield_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Pipes passed this run
    pub score: u32,
    /// Best score ever (persisted)
    pub high_score: u32,
    /// Soft currency (persisted)
    pub skulls: u32,
    /// Banked shields
    pub shield_charges: u32,
    /// Shield is active while `now < shield_active_until` (ms)
    pub shield_active_until: f64,
    pub current_skin: SkinId,
    pub unlocked_skins: BTreeSet<SkinId>,
    /// Configured speed (persisted)
    pub game_speed: f32,
    /// Live pipe speed for the current run
    pub pipe_speed: f32,
    /// Spacing the next pipe waits for
    pub next_pipe_distance: f32,
}

impl GameState {
    pub fn from_progress(progress: Progress, tuning: &Tuning) -> Self {
        let (min_distance, _) = tuning.pipe_distance_bounds();
        Self {
            phase: GamePhase::Title,
            score: 0,
            high_score: progress.high_score,
            skulls: progress.skulls,
            shield_charges: 0,
            shield_active_until: 0.0,
            current_skin: progress.selected_skin,
            unlocked_skins: progress.unlocked_skins,
            game_speed: progress.game_speed,
            pipe_speed: progress.game_speed,
            next_pipe_distance: min_distance,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn has_active_shield(&self, now_ms: f64) -> bool {
        now_ms < self.shield_active_until
    }

    pub fn is_skin_unlocked(&self, skin: SkinId) -> bool {
        skin.is_free() || self.unlocked_skins.contains(&skin)
    }

    pub fn hud(&self, now_ms: f64) -> Hud {
        Hud {
            score: self.score,
            skulls: self.skulls,
            shield_charges: self.shield_charges,
            shield_active: self.has_active_shield(now_ms),
        }
    }
}

pub struct StateManager {
    state: GameState,
    store: Box<dyn Store>,
    shield_duration_ms: f64,
    reward_interval: u32,
    distance_bounds: (f32, f32),
}

impl std::fmt::Debug for StateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateManager")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl StateManager {
    /// Read progress from the store and start on the title screen
    pub fn load(store: Box<dyn Store>, tuning: &Tuning) -> Self {
        let progress = Progress::load(store.as_ref());
        log::info!(
            "Loaded progress: high score {}, {} skulls, skin {}",
            progress.high_score,
            progress.skulls,
            progress.selected_skin.as_str()
        );
        Self {
            state: GameState::from_progress(progress, tuning),
            store,
            shield_duration_ms: tuning.shield_duration_ms,
            reward_interval: tuning.shield_reward_interval,
            distance_bounds: tuning.pipe_distance_bounds(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn state_mut_for_tests(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn has_active_shield(&self, now_ms: f64) -> bool {
        self.state.has_active_shield(now_ms)
    }

    /// Write one key; storage failures are logged and otherwise ignored
    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            log::warn!("Could not save {}: {}", key, e);
        }
    }

    fn persist_unlocked(&mut self) {
        match encode_unlocked(&self.state.unlocked_skins) {
            Ok(json) => self.persist(keys::UNLOCKED_SKINS, &json),
            Err(e) => log::warn!("{}", e),
        }
    }

    // === Run lifecycle ===

    /// Enter Running with a fresh run. Returns false (and changes nothing)
    /// if a run is already in progress.
    pub fn begin_run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.state.score = 0;
        self.state.shield_charges = 0;
        self.state.shield_active_until = 0.0;
        self.state.pipe_speed = self.state.game_speed;
        self.reset_pipe_distance(rng);
        self.state.phase = GamePhase::Running;
        true
    }

    /// Leave Running, persisting the high score if it improved.
    /// Returns None when no run was in progress.
    pub fn end_run(&mut self) -> Option<RunSummary> {
        if !self.state.is_running() {
            return None;
        }
        self.state.phase = GamePhase::GameOver;

        let new_high_score = self.state.score > self.state.high_score;
        if new_high_score {
            self.state.high_score = self.state.score;
            let value = self.state.high_score.to_string();
            self.persist(keys::HIGH_SCORE, &value);
            log::info!("New high score: {}", self.state.high_score);
        }

        Some(RunSummary {
            score: self.state.score,
            high_score: self.state.high_score,
            new_high_score,
            message: self.state.current_skin.game_over_message(),
        })
    }

    /// Redraw the spacing target for the next pipe
    pub fn reset_pipe_distance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (min, max) = self.distance_bounds;
        self.state.next_pipe_distance = rng.random_range(min..=max);
    }

    // === Shield & economy ===

    /// Resolve a damage event against the shield state machine
    pub fn absorb_damage(&mut self, now_ms: f64) -> DamageOutcome {
        if self.state.has_active_shield(now_ms) {
            return DamageOutcome::Absorbed;
        }
        if self.state.shield_charges > 0 {
            self.state.shield_charges -= 1;
            self.state.shield_active_until = now_ms + self.shield_duration_ms;
            log::debug!(
                "Shield up until {} ({} charges left)",
                self.state.shield_active_until,
                self.state.shield_charges
            );
            return DamageOutcome::ShieldConsumed {
                until_ms: self.state.shield_active_until,
            };
        }
        DamageOutcome::Fatal
    }

    /// Count a cleared pipe: one point, one skull, and a shield charge every
    /// `reward_interval` points
    pub fn record_pass(&mut self) -> PassReward {
        self.state.score += 1;
        self.state.skulls += 1;
        let skulls = self.state.skulls.to_string();
        self.persist(keys::SKULLS, &skulls);

        let shield_earned =
            self.reward_interval > 0 && self.state.score % self.reward_interval == 0;
        if shield_earned {
            self.state.shield_charges += 1;
        }

        PassReward {
            score: self.state.score,
            skulls: self.state.skulls,
            shield_earned,
        }
    }

    // === Skins ===

    /// Equip an unlocked skin. Locked skins are refused.
    pub fn select_skin(&mut self, skin: SkinId) -> bool {
        if !self.state.is_skin_unlocked(skin) {
            log::info!("{} is locked", skin);
            return false;
        }
        self.state.current_skin = skin;
        self.persist(keys::SELECTED_SKIN, skin.as_str());
        true
    }

    /// Buy (or, if owned, just equip) a skin
    pub fn purchase_skin(&mut self, skin: SkinId) -> PurchaseOutcome {
        if self.state.is_skin_unlocked(skin) {
            self.select_skin(skin);
            return PurchaseOutcome::Equipped;
        }

        let cost = skin.cost();
        if self.state.skulls < cost {
            return PurchaseOutcome::InsufficientSkulls {
                cost,
                skulls: self.state.skulls,
            };
        }

        self.state.skulls -= cost;
        let skulls = self.state.skulls.to_string();
        self.persist(keys::SKULLS, &skulls);
        self.state.unlocked_skins.insert(skin);
        self.persist_unlocked();
        self.select_skin(skin);
        log::info!("Bought {} for {} skulls", skin, cost);

        PurchaseOutcome::Purchased { cost }
    }

    // === Settings ===

    /// Set the configured speed (also the live pipe speed). Invalid values
    /// are ignored; valid ones are clamped to the supported range. Returns
    /// the speed now in effect.
    pub fn set_game_speed(&mut self, speed: f32) -> f32 {
        if !speed.is_finite() || speed <= 0.0 {
            log::warn!("Ignoring invalid game speed {}", speed);
            return self.state.game_speed;
        }
        let speed = speed.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED);
        self.state.game_speed = speed;
        self.state.pipe_speed = speed;
        self.persist(keys::GAME_SPEED, &speed.to_string());
        speed
    }
}

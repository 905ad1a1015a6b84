//! Audio system
//!
//! Game events map to cues here; the Web Audio manager in `web` plays them.
//! Sound effects are procedural oscillators, with recorded clips for hits and
//! scoring when the host serves them. Every cue is best-effort: missing audio
//! never affects the game.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::GameEvent;

/// Recorded clips, relative to the page
pub const BGM_URL: &str = "sounds/bgm.mp3";
pub const HIT_URL: &str = "sounds/hit.mp3";
pub const SCORE_URL: &str = "sounds/score.mp3";

/// Clip gains before the settings volumes apply
pub const BGM_GAIN: f32 = 0.3;
pub const HIT_GAIN: f32 = 1.0;
pub const SCORE_GAIN: f32 = 0.4;
pub const NARRATION_GAIN: f32 = 0.8;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Upward sweep on every jump
    Jump,
    /// Pipe passed
    Score,
    /// A tenth pass banked a shield charge
    ShieldEarned,
    /// A banked charge just opened a shield window
    ShieldActivated,
    /// Contact absorbed by the shield
    ShieldHit,
    /// Fatal contact
    Hit,
    /// New skin equipped
    SkinSelect,
}

/// Background music transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    Start,
    Stop,
}

/// What the audio layer should do for one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cues {
    pub sound: Option<SoundEffect>,
    pub music: Option<MusicCue>,
    /// Line to speak in the current skin's voice
    pub narration: Option<&'static str>,
}

impl Cues {
    fn sound(effect: SoundEffect) -> Self {
        Self {
            sound: Some(effect),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sound.is_none() && self.music.is_none() && self.narration.is_none()
    }
}

pub fn cues_for(event: &GameEvent) -> Cues {
    match event {
        GameEvent::GameStarted => Cues {
            music: Some(MusicCue::Start),
            ..Default::default()
        },
        GameEvent::Jumped => Cues::sound(SoundEffect::Jump),
        GameEvent::Scored { .. } => Cues::sound(SoundEffect::Score),
        GameEvent::ShieldEarned { .. } => Cues::sound(SoundEffect::ShieldEarned),
        GameEvent::ShieldActivated { .. } => Cues::sound(SoundEffect::ShieldActivated),
        GameEvent::Hit { absorbed: true } => Cues::sound(SoundEffect::ShieldHit),
        GameEvent::Hit { absorbed: false } => Cues::sound(SoundEffect::Hit),
        GameEvent::GameOver { message, .. } => Cues {
            sound: None,
            music: Some(MusicCue::Stop),
            narration: Some(message),
        },
        GameEvent::SkinChanged { .. } => Cues::sound(SoundEffect::SkinSelect),
        GameEvent::SkullsChanged { .. } | GameEvent::SpeedChanged { .. } => Cues::default(),
    }
}

/// Rank a speech voice for narration: 2 for an English voice whose name hints
/// at the wanted gender, 1 for any English voice, 0 otherwise.
pub fn voice_rank(lang: &str, name: &str, prefer_male: bool) -> u8 {
    if !lang.starts_with("en") {
        return 0;
    }
    let hints: &[&str] = if prefer_male {
        &["Male", "Daniel", "David"]
    } else {
        &["Female", "Samantha", "Karen"]
    };
    if hints.iter().any(|h| name.contains(h)) { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skins::SkinId;

    #[test]
    fn test_run_lifecycle_cues() {
        let start = cues_for(&GameEvent::GameStarted);
        assert_eq!(start.music, Some(MusicCue::Start));
        assert!(start.sound.is_none());

        let over = cues_for(&GameEvent::GameOver {
            score: 4,
            high_score: 9,
            new_high_score: false,
            message: SkinId::Eleven.game_over_message(),
        });
        assert_eq!(over.music, Some(MusicCue::Stop));
        assert_eq!(over.narration, Some(SkinId::Eleven.game_over_message()));
    }

    #[test]
    fn test_hit_cues_depend_on_shield() {
        assert_eq!(
            cues_for(&GameEvent::Hit { absorbed: true }).sound,
            Some(SoundEffect::ShieldHit)
        );
        assert_eq!(
            cues_for(&GameEvent::Hit { absorbed: false }).sound,
            Some(SoundEffect::Hit)
        );
    }

    #[test]
    fn test_silent_events() {
        assert!(cues_for(&GameEvent::SkullsChanged { skulls: 3 }).is_empty());
        assert!(cues_for(&GameEvent::SpeedChanged { speed: 2.0 }).is_empty());
        assert!(!cues_for(&GameEvent::Jumped).is_empty());
    }

    #[test]
    fn test_voice_rank() {
        assert_eq!(voice_rank("en-GB", "Daniel", true), 2);
        assert_eq!(voice_rank("en-US", "Samantha", true), 1);
        assert_eq!(voice_rank("en-US", "Samantha", false), 2);
        assert_eq!(voice_rank("fr-FR", "Daniel", true), 0);
    }
}

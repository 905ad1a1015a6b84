//! Web Audio playback, recorded clips and speech narration

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType, SpeechSynthesis,
    SpeechSynthesisUtterance, SpeechSynthesisVoice,
};

use super::{
    BGM_GAIN, BGM_URL, Cues, HIT_GAIN, HIT_URL, MusicCue, NARRATION_GAIN, SCORE_GAIN, SCORE_URL,
    SoundEffect, cues_for, voice_rank,
};
use crate::settings::Settings;
use crate::sim::GameEvent;
use crate::skins::Voice;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    bgm: Option<HtmlAudioElement>,
    hit: Option<HtmlAudioElement>,
    score: Option<HtmlAudioElement>,
    speech: Option<SpeechSynthesis>,
    settings: Settings,
    // Autoplay rejections are expected until the first user gesture
    swallow: Closure<dyn FnMut(JsValue)>,
}

fn load_clip(src: &str, looping: bool) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(clip) => {
            clip.set_loop(looping);
            Some(clip)
        }
        Err(e) => {
            log::warn!("Failed to load {}: {:?}", src, e);
            None
        }
    }
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }
        let speech = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if speech.is_none() {
            log::info!("Speech synthesis unavailable - narration disabled");
        }

        let manager = Self {
            ctx,
            bgm: load_clip(BGM_URL, true),
            hit: load_clip(HIT_URL, false),
            score: load_clip(SCORE_URL, false),
            speech,
            settings,
            swallow: Closure::new(|_: JsValue| {}),
        };
        manager.apply_volumes();
        manager
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.apply_volumes();
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn apply_volumes(&self) {
        let sfx = self.settings.effective_sfx_volume();
        if let Some(bgm) = &self.bgm {
            bgm.set_volume((BGM_GAIN * self.settings.effective_music_volume()) as f64);
        }
        if let Some(hit) = &self.hit {
            hit.set_volume((HIT_GAIN * sfx) as f64);
        }
        if let Some(score) = &self.score {
            score.set_volume((SCORE_GAIN * sfx) as f64);
        }
    }

    /// Play whatever an event calls for. `voice` is the current skin's.
    pub fn handle(&self, event: &GameEvent, voice: Voice) {
        let Cues {
            sound,
            music,
            narration,
        } = cues_for(event);

        if let Some(effect) = sound {
            self.play(effect);
        }
        match music {
            Some(MusicCue::Start) => self.start_music(),
            Some(MusicCue::Stop) => self.stop_music(),
            None => {}
        }
        if let Some(text) = narration {
            self.speak(text, voice);
        }
    }

    pub fn start_music(&self) {
        if let Some(bgm) = &self.bgm {
            bgm.set_current_time(0.0);
            self.play_clip(bgm);
        }
    }

    pub fn stop_music(&self) {
        if let Some(bgm) = &self.bgm {
            let _ = bgm.pause();
        }
    }

    fn play_clip(&self, clip: &HtmlAudioElement) {
        if self.settings.muted {
            return;
        }
        clip.set_current_time(0.0);
        if let Ok(promise) = clip.play() {
            let _ = promise.catch(&self.swallow);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.settings.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }

        // Recorded clips win when present
        match (effect, &self.hit, &self.score) {
            (SoundEffect::Hit, Some(clip), _) | (SoundEffect::Score, _, Some(clip)) => {
                self.play_clip(clip);
                return;
            }
            _ => {}
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::Score => self.play_score(ctx, vol),
            SoundEffect::ShieldEarned => self.play_shield_earned(ctx, vol),
            SoundEffect::ShieldActivated => self.play_shield_activated(ctx, vol),
            SoundEffect::ShieldHit => self.play_shield_hit(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::SkinSelect => self.play_skin_select(ctx, vol),
        }
    }

    /// Speak a line, cutting off whatever is still being said
    pub fn speak(&self, text: &str, voice: Voice) {
        if !self.settings.narration || self.settings.muted {
            return;
        }
        let Some(speech) = &self.speech else { return };
        speech.cancel();

        let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
            return;
        };
        let voices: Vec<SpeechSynthesisVoice> = speech
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect();
        let best = voices
            .iter()
            .filter(|v| voice_rank(&v.lang(), &v.name(), voice.prefer_male) > 0)
            .max_by_key(|v| voice_rank(&v.lang(), &v.name(), voice.prefer_male))
            .or_else(|| voices.first());

        utterance.set_voice(best);
        utterance.set_pitch(voice.pitch);
        utterance.set_rate(voice.rate);
        utterance.set_volume(NARRATION_GAIN * self.settings.master_volume);
        speech.speak(&utterance);
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Jump - quick upward sweep
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.08)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Score - two-note ding, used when the clip is missing
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Shield earned - rising arpeggio
    fn play_shield_earned(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 630.0, 750.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Shield up - shimmering swell
    fn play_shield_activated(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1200.0, 1800.0].iter().enumerate() {
            let delay = i as f64 * 0.03;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(0.01, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.2, t + 0.1)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.45).ok();
            }
        }
    }

    /// Shield hit - metallic clang
    fn play_shield_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency().set_value_at_time(300.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.1).ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }

    /// Fatal hit - descending crunch, used when the clip is missing
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.4)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.5).ok();
    }

    /// Skin select - short blip
    fn play_skin_select(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.1).ok();
    }
}

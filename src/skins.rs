//! Character skins
//!
//! Every skin maps to one static record: display name, colour, shop cost,
//! game-over line and narration voice.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Cosmetic player skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinId {
    #[default]
    Demogorgon,
    Eleven,
    Dustin,
    Mike,
    Max,
    Hopper,
    Lucas,
    Will,
    Steve,
    Nancy,
    Robin,
    Erica,
    Jonathan,
    Joyce,
    Vecna,
    Waffle,
    MindFlayer,
}

/// How the presentation layer draws a skin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkinStyle {
    /// Petalled maw (sprite when loaded)
    Monster,
    /// Head, hair and body
    Kid { hair: Color },
    /// Drifting shadow with tendrils (sprite when loaded)
    Shadow,
    /// A waffle
    Waffle,
}

/// Narration voice parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub pitch: f32,
    pub rate: f32,
    pub prefer_male: bool,
}

/// Static per-skin record
#[derive(Debug, Clone, Copy)]
pub struct SkinInfo {
    pub name: &'static str,
    pub color: Color,
    /// Skulls needed to unlock (0 = always unlocked)
    pub cost: u32,
    pub game_over_message: &'static str,
    pub voice: Voice,
    pub style: SkinStyle,
}

const fn voice(pitch: f32, rate: f32, prefer_male: bool) -> Voice {
    Voice {
        pitch,
        rate,
        prefer_male,
    }
}

const BROWN_HAIR: Color = Color::rgb(0x5c4033);
const BLACK_HAIR: Color = Color::rgb(0x1a1a1a);

impl SkinId {
    pub const ALL: [SkinId; 17] = [
        SkinId::Demogorgon,
        SkinId::Eleven,
        SkinId::Dustin,
        SkinId::Mike,
        SkinId::Max,
        SkinId::Hopper,
        SkinId::Lucas,
        SkinId::Will,
        SkinId::Steve,
        SkinId::Nancy,
        SkinId::Robin,
        SkinId::Erica,
        SkinId::Jonathan,
        SkinId::Joyce,
        SkinId::Vecna,
        SkinId::Waffle,
        SkinId::MindFlayer,
    ];

    /// Stored identifier (also the `selectedSkin` value)
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinId::Demogorgon => "demogorgon",
            SkinId::Eleven => "eleven",
            SkinId::Dustin => "dustin",
            SkinId::Mike => "mike",
            SkinId::Max => "max",
            SkinId::Hopper => "hopper",
            SkinId::Lucas => "lucas",
            SkinId::Will => "will",
            SkinId::Steve => "steve",
            SkinId::Nancy => "nancy",
            SkinId::Robin => "robin",
            SkinId::Erica => "erica",
            SkinId::Jonathan => "jonathan",
            SkinId::Joyce => "joyce",
            SkinId::Vecna => "vecna",
            SkinId::Waffle => "waffle",
            SkinId::MindFlayer => "mindflayer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|skin| skin.as_str() == s)
    }

    pub fn info(&self) -> SkinInfo {
        let kid = |hair| SkinStyle::Kid { hair };
        match self {
            SkinId::Demogorgon => SkinInfo {
                name: "Demogorgon",
                color: Color::rgb(0xe63946),
                cost: 0,
                game_over_message: "The Upside Down claims another...",
                voice: voice(0.3, 0.7, true),
                style: SkinStyle::Monster,
            },
            SkinId::Eleven => SkinInfo {
                name: "Eleven",
                color: Color::rgb(0x4cc9f0),
                cost: 0,
                game_over_message: "Friends don't lie... but gravity does.",
                voice: voice(1.3, 0.85, false),
                style: kid(BROWN_HAIR),
            },
            SkinId::Dustin => SkinInfo {
                name: "Dustin",
                color: Color::rgb(0xf77f00),
                cost: 0,
                game_over_message: "Son of a bitch!",
                voice: voice(1.1, 1.1, true),
                style: kid(BROWN_HAIR),
            },
            SkinId::Mike => SkinInfo {
                name: "Mike",
                color: Color::rgb(0x06ffa5),
                cost: 0,
                game_over_message: "This is not a drill!",
                voice: voice(1.0, 1.0, true),
                style: kid(BLACK_HAIR),
            },
            SkinId::Max => SkinInfo {
                name: "Max",
                color: Color::rgb(0xff006e),
                cost: 0,
                game_over_message: "Running up that hill wasn't enough.",
                voice: voice(1.2, 1.0, false),
                style: kid(Color::rgb(0xe63946)),
            },
            SkinId::Hopper => SkinInfo {
                name: "Hopper",
                color: Color::rgb(0xf0ead2),
                cost: 0,
                game_over_message: "Mornings are for coffee and contemplation.",
                voice: voice(0.6, 0.8, true),
                style: kid(Color::rgb(0x8b7355)),
            },
            SkinId::Lucas => SkinInfo {
                name: "Lucas",
                color: Color::rgb(0x70e000),
                cost: 0,
                game_over_message: "You rolled a 1...",
                voice: voice(1.0, 1.0, true),
                style: kid(BLACK_HAIR),
            },
            SkinId::Will => SkinInfo {
                name: "Will",
                color: Color::rgb(0x48bfe3),
                cost: 0,
                game_over_message: "Will the Wise has fallen.",
                voice: voice(1.2, 0.9, true),
                style: kid(BROWN_HAIR),
            },
            SkinId::Steve => SkinInfo {
                name: "Steve",
                color: Color::rgb(0xf5deb3),
                cost: 25,
                game_over_message: "That hair couldn't save you.",
                voice: voice(0.9, 1.0, true),
                style: kid(Color::rgb(0x4a3728)),
            },
            SkinId::Nancy => SkinInfo {
                name: "Nancy",
                color: Color::rgb(0xffafcc),
                cost: 25,
                game_over_message: "Should've grabbed the shotgun.",
                voice: voice(1.1, 0.95, false),
                style: kid(BROWN_HAIR),
            },
            SkinId::Robin => SkinInfo {
                name: "Robin",
                color: Color::rgb(0x80ffdb),
                cost: 25,
                game_over_message: "Dingus down!",
                voice: voice(1.15, 1.05, false),
                style: kid(Color::rgb(0xd4a574)),
            },
            SkinId::Erica => SkinInfo {
                name: "Erica",
                color: Color::rgb(0xffd166),
                cost: 30,
                game_over_message: "You can't spell America without Erica... but you can spell GAME OVER.",
                voice: voice(1.4, 1.1, false),
                style: kid(BLACK_HAIR),
            },
            SkinId::Jonathan => SkinInfo {
                name: "Jonathan",
                color: Color::rgb(0xb08968),
                cost: 30,
                game_over_message: "Should've stayed in the darkroom.",
                voice: voice(0.85, 0.9, true),
                style: kid(Color::rgb(0x3d2914)),
            },
            SkinId::Joyce => SkinInfo {
                name: "Joyce",
                color: Color::rgb(0xffe5b4),
                cost: 30,
                game_over_message: "The lights went out.",
                voice: voice(1.0, 1.0, false),
                style: kid(BROWN_HAIR),
            },
            SkinId::Vecna => SkinInfo {
                name: "Vecna",
                color: Color::rgb(0xb5179e),
                cost: 60,
                game_over_message: "You got Vecna'd!",
                voice: voice(0.2, 0.6, true),
                style: kid(Color::rgb(0x4a0000)),
            },
            SkinId::Waffle => SkinInfo {
                name: "Waffle",
                color: Color::rgb(0xf4a261),
                cost: 25,
                game_over_message: "Eleven is sad now.",
                voice: voice(1.5, 1.2, false),
                style: SkinStyle::Waffle,
            },
            SkinId::MindFlayer => SkinInfo {
                name: "Mind Flayer",
                color: Color::rgb(0x111111),
                cost: 40,
                game_over_message: "The Shadow Monster returns to the void.",
                voice: voice(0.1, 0.5, true),
                style: SkinStyle::Shadow,
            },
        }
    }

    pub fn color(&self) -> Color {
        self.info().color
    }

    pub fn cost(&self) -> u32 {
        self.info().cost
    }

    /// Zero-cost skins are always unlocked
    pub fn is_free(&self) -> bool {
        self.cost() == 0
    }

    pub fn game_over_message(&self) -> &'static str {
        self.info().game_over_message
    }

    pub fn free_skins() -> impl Iterator<Item = SkinId> {
        Self::ALL.into_iter().filter(|s| s.is_free())
    }
}

impl std::fmt::Display for SkinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().name)
    }
}

/// Shop browsing position over [`SkinId::ALL`], independent of the equipped
/// skin so locked entries can be looked at without buying them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkinCursor {
    index: usize,
}

impl SkinCursor {
    pub fn at(skin: SkinId) -> Self {
        let index = SkinId::ALL.iter().position(|s| *s == skin).unwrap_or(0);
        Self { index }
    }

    pub fn skin(&self) -> SkinId {
        SkinId::ALL[self.index]
    }

    /// Move by `delta` entries, wrapping at both ends
    pub fn step(&mut self, delta: isize) -> SkinId {
        let len = SkinId::ALL.len() as isize;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
        self.skin()
    }
}

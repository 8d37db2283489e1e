//! Notification sound palette

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidSoundError;

/// All available sounds
pub const ALL_SOUNDS: &[Sound] = &[
    Sound::Default,
    Sound::Basso,
    Sound::Blow,
    Sound::Bottle,
    Sound::Frog,
    Sound::Funk,
    Sound::Glass,
    Sound::Hero,
    Sound::Morse,
    Sound::Ping,
    Sound::Pop,
    Sound::Purr,
    Sound::Sosumi,
    Sound::Tink,
];

/// Named system sounds accepted by alerter's `-sound` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sound {
    #[default]
    Default,
    Basso,
    Blow,
    Bottle,
    Frog,
    Funk,
    Glass,
    Hero,
    Morse,
    Ping,
    Pop,
    Purr,
    Sosumi,
    Tink,
}

impl Sound {
    /// Name passed to alerter
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Basso => "Basso",
            Self::Blow => "Blow",
            Self::Bottle => "Bottle",
            Self::Frog => "Frog",
            Self::Funk => "Funk",
            Self::Glass => "Glass",
            Self::Hero => "Hero",
            Self::Morse => "Morse",
            Self::Ping => "Ping",
            Self::Pop => "Pop",
            Self::Purr => "Purr",
            Self::Sosumi => "Sosumi",
            Self::Tink => "Tink",
        }
    }
}

impl FromStr for Sound {
    type Err = InvalidSoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_SOUNDS
            .iter()
            .copied()
            .find(|sound| sound.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidSoundError {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for Sound {
    type Error = InvalidSoundError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sound> for String {
    fn from(sound: Sound) -> Self {
        sound.as_str().to_string()
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

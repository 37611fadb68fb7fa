use std::{fmt, ops::Range, str::FromStr};

use serde::{Deserialize, Serialize};

pub type Rgb = (u8, u8, u8);

/// Normalized weather bucket derived from a free-form condition string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub top: Rgb,
    pub bottom: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleShape {
    /// Vertical line of length `3 * size` and width `size / 2`.
    Stroke { alpha: f32 },
    /// Filled circle of radius `size`.
    Circle { alpha: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpec {
    pub count: usize,
    pub size: Range<f32>,
    pub speed_x: Range<f32>,
    pub speed_y: Range<f32>,
    pub shape: ParticleShape,
}

const CLEAR_PALETTE: Palette = Palette {
    top: (0x4A, 0x90, 0xE2),
    bottom: (0x87, 0xCE, 0xEB),
};
const CLOUDS_PALETTE: Palette = Palette {
    top: (0x7B, 0x8C, 0x9D),
    bottom: (0xA9, 0xB7, 0xC6),
};
const WET_PALETTE: Palette = Palette {
    top: (0x2C, 0x3E, 0x50),
    bottom: (0x5D, 0x6D, 0x7E),
};
const SNOW_PALETTE: Palette = Palette {
    top: (0xBD, 0xC3, 0xC7),
    bottom: (0xEC, 0xF0, 0xF1),
};
const THUNDER_PALETTE: Palette = Palette {
    top: (0x1C, 0x28, 0x33),
    bottom: (0x34, 0x49, 0x5E),
};

const STROKE: ParticleShape = ParticleShape::Stroke { alpha: 0.7 };
const SNOWFLAKE: ParticleShape = ParticleShape::Circle { alpha: 0.8 };
const MOTE: ParticleShape = ParticleShape::Circle { alpha: 0.3 };

// Ambient population shared by every category without its own entry.
const AMBIENT_COUNT: usize = 50;
const AMBIENT_SIZE: Range<f32> = 1.0..4.0;
const AMBIENT_FALL: Range<f32> = 0.1..0.6;
const STILL: Range<f32> = 0.0..0.0;

impl Condition {
    pub const ALL: [Condition; 7] = [
        Condition::Clear,
        Condition::Clouds,
        Condition::Rain,
        Condition::Drizzle,
        Condition::Snow,
        Condition::Thunderstorm,
        Condition::Other,
    ];

    /// Resolves an optional raw condition. Missing input means clear,
    /// anything unrecognized lands in [`Condition::Other`].
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Condition::Clear;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "clear" => Condition::Clear,
            "clouds" => Condition::Clouds,
            "rain" => Condition::Rain,
            "drizzle" => Condition::Drizzle,
            "snow" => Condition::Snow,
            "thunderstorm" => Condition::Thunderstorm,
            _ => Condition::Other,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::Clouds => "clouds",
            Condition::Rain => "rain",
            Condition::Drizzle => "drizzle",
            Condition::Snow => "snow",
            Condition::Thunderstorm => "thunderstorm",
            Condition::Other => "other",
        }
    }

    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Condition::Clear | Condition::Other => CLEAR_PALETTE,
            Condition::Clouds => CLOUDS_PALETTE,
            Condition::Rain | Condition::Drizzle => WET_PALETTE,
            Condition::Snow => SNOW_PALETTE,
            Condition::Thunderstorm => THUNDER_PALETTE,
        }
    }

    #[must_use]
    pub fn particle_spec(self) -> ParticleSpec {
        match self {
            Condition::Rain => ParticleSpec {
                count: 200,
                size: 1.0..3.0,
                speed_x: STILL,
                speed_y: 5.0..12.0,
                shape: STROKE,
            },
            Condition::Drizzle => ParticleSpec {
                count: AMBIENT_COUNT,
                size: AMBIENT_SIZE,
                speed_x: STILL,
                speed_y: AMBIENT_FALL,
                shape: STROKE,
            },
            Condition::Snow => ParticleSpec {
                count: 100,
                size: 1.0..6.0,
                speed_x: STILL,
                speed_y: 0.5..1.5,
                shape: SNOWFLAKE,
            },
            Condition::Clouds => ParticleSpec {
                count: AMBIENT_COUNT,
                size: AMBIENT_SIZE,
                speed_x: -0.5..0.5,
                speed_y: AMBIENT_FALL,
                shape: MOTE,
            },
            Condition::Clear | Condition::Thunderstorm | Condition::Other => ParticleSpec {
                count: AMBIENT_COUNT,
                size: AMBIENT_SIZE,
                speed_x: STILL,
                speed_y: AMBIENT_FALL,
                shape: MOTE,
            },
        }
    }

    #[must_use]
    pub fn shows_clouds(self) -> bool {
        self != Condition::Clear
    }

    #[must_use]
    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or_default()
    }
}

impl FromStr for Condition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Condition::parse(Some(s)))
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        Condition::parse(Some(value))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

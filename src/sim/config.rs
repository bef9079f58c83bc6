//! Run configuration: feature switches, colour tables, seed
//!
//! One simulation core serves both game variants; what differs between them
//! is expressed here rather than in separate code paths.

use serde::{Deserialize, Serialize};

/// Gameplay features that can be switched on or off per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Spiked obstacles spawn on even levels
    pub obstacles: bool,
    /// Star power-ups spawn and can be spent on invulnerability
    pub power_ups: bool,
    /// Ball colour comes from the selected character instead of the level palette
    pub character_select: bool,
    /// Ball falls from the first tick (with a small upward kick) instead of
    /// hovering until the first primary action
    pub ball_starts_falling: bool,
    /// First touch of each platform awards a point on top of scroll score
    pub platform_touch_score: bool,
    /// Background and platform colours follow the level palette
    pub level_colors: bool,
}

impl Features {
    /// The minimal variant: no items, ball drops at spawn, touch scoring
    pub fn classic() -> Self {
        Self {
            obstacles: false,
            power_ups: false,
            character_select: false,
            ball_starts_falling: true,
            platform_touch_score: true,
            level_colors: true,
        }
    }

    /// The full variant: power-ups, obstacles, characters, idle start
    pub fn arcade() -> Self {
        Self {
            obstacles: true,
            power_ups: true,
            character_select: true,
            ball_starts_falling: false,
            platform_touch_score: false,
            level_colors: false,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::arcade()
    }
}

/// Everything a run needs before its first tick
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub features: Features,
    /// RNG seed for platform placement and spawns
    pub seed: u64,
    /// Selected character (index into [`CHARACTERS`], wraps)
    pub character: usize,
}

impl GameConfig {
    pub fn new(features: Features, seed: u64) -> Self {
        Self {
            features,
            seed,
            character: 0,
        }
    }

    pub fn with_character(mut self, character: usize) -> Self {
        self.character = character;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Features::default(), 0)
    }
}

/// Colours for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPalette {
    pub background: &'static str,
    pub platform: &'static str,
    pub ball: &'static str,
}

/// Palette per level, starting at level 1
pub const LEVEL_PALETTES: [LevelPalette; 9] = [
    LevelPalette { background: "#222", platform: "#5af", ball: "#f55" },
    LevelPalette { background: "#003f5c", platform: "#0ff", ball: "#0cf" },
    LevelPalette { background: "#2f4b7c", platform: "#0f0", ball: "#0f0" },
    LevelPalette { background: "#665191", platform: "#ff0", ball: "#ff0" },
    LevelPalette { background: "#a05195", platform: "#f90", ball: "#f90" },
    LevelPalette { background: "#d45087", platform: "#f55", ball: "#f0f" },
    LevelPalette { background: "#f95d6a", platform: "#f0f", ball: "#0ff" },
    LevelPalette { background: "#ff7c43", platform: "#ccc", ball: "#fff" },
    LevelPalette { background: "#ffa600", platform: "#fff", ball: "#000" },
];

/// Palette used when level colours are switched off
pub const DEFAULT_PALETTE: LevelPalette = LEVEL_PALETTES[0];

/// Look up the palette for a level; levels past the table reuse the last entry
pub fn palette_for_level(level: u32) -> LevelPalette {
    let index = (level.max(1) as usize - 1).min(LEVEL_PALETTES.len() - 1);
    LEVEL_PALETTES[index]
}

/// Selectable ball colours
pub const CHARACTERS: [&str; 5] = ["#f55", "#5f5", "#55f", "#ff5", "#f5f"];

/// Colour for a character index (wraps around)
pub fn character_color(index: usize) -> &'static str {
    CHARACTERS[index % CHARACTERS.len()]
}

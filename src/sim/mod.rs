//! Simulation module
//!
//! All gameplay logic lives here. Given the same seed and the same inputs a
//! run plays out identically:
//! - One tick per display frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering, audio or DOM dependencies

pub mod camera;
pub mod collision;
pub mod config;
pub mod level;
pub mod recycle;
pub mod state;
pub mod tick;

pub use collision::{ball_lands_on_platform, ball_touches_power_up, circle_hits_obstacle, obstacle_hits_ball};
pub use config::{CHARACTERS, DEFAULT_PALETTE, Features, GameConfig, LEVEL_PALETTES, LevelPalette, character_color, palette_for_level};
pub use level::{LevelUp, level_for_score, spawns_obstacle, spawns_power_up};
pub use state::{
    Ball, BallStatus, GameEvent, GameOverCause, Obstacle, Platform, PowerUp, RunPhase, RunState, Simulation,
};
pub use tick::{TickInput, tick};

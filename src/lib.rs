//! Skyhop - An endless bouncing-ball climber
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, spawning, camera, recycling)
//! - `renderer`: 2D drawing surface abstraction and frame drawing
//! - `audio`: Procedural sound cues (Web Audio on wasm)
//! - `settings`: Player preferences and variant selection

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, Variant};

/// Game tuning constants, calibrated for one tick per display frame
pub mod consts {
    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_GRAVITY: f32 = 0.5;
    pub const BALL_JUMP_IMPULSE: f32 = -12.0;
    /// Upward velocity given at spawn when the ball starts falling immediately
    pub const BALL_SPAWN_VELOCITY: f32 = -10.0;
    pub const BALL_MOVE_SPEED: f32 = 5.0;
    /// Horizontal velocity multiplier applied each tick without input
    pub const BALL_DAMPING: f32 = 0.9;
    /// Spawn height above the bottom of the viewport
    pub const BALL_SPAWN_OFFSET: f32 = 100.0;

    /// Distance below the viewport at which things count as gone
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Platform defaults
    pub const PLATFORM_COUNT: usize = 10;
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    pub const PLATFORM_SPACING: f32 = 100.0;
    pub const PLATFORM_MIN_SPEED: f32 = 1.0;
    pub const PLATFORM_MAX_SPEED: f32 = 3.0;

    /// Power-up defaults
    pub const POWER_UP_SIZE: f32 = 30.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_MIN_SPEED: f32 = 2.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 4.0;
    /// Obstacles spawn this far below the midline
    pub const OBSTACLE_SPAWN_OFFSET: f32 = 50.0;

    /// Invulnerability window (7 seconds at 60 fps)
    pub const INVULNERABILITY_TICKS: u32 = 420;
    /// Blink half-period while invulnerable
    pub const BLINK_PERIOD_TICKS: u32 = 10;

    /// Score per camera recentre
    pub const SCROLL_SCORE: f64 = 0.05;
    /// Score for the first touch of a platform (when enabled)
    pub const PLATFORM_TOUCH_SCORE: f64 = 1.0;
    /// Score needed per level
    pub const SCORE_PER_LEVEL: f64 = 10.0;
    /// Level banner duration
    pub const LEVEL_BANNER_TICKS: u32 = 60;
}

/// Screen-space viewport size (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half the viewport height; crossing it upward scrolls the world
    #[inline]
    pub fn midline(&self) -> f32 {
        self.height / 2.0
    }

    /// Entities at or below this y are out of play
    #[inline]
    pub fn kill_line(&self) -> f32 {
        self.height + consts::OFFSCREEN_MARGIN
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

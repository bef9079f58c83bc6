//! Game state and core simulation types
//!
//! Screen-space coordinates throughout: origin at the top-left of the
//! viewport, y grows downward, so "climbing" means decreasing y.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::config::{Features, GameConfig};
use super::recycle::initial_platforms;
use super::tick::TickInput;
use crate::Viewport;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Not started yet (main menu)
    Menu,
    /// Ticking
    Playing,
    /// Run ended; only a restart resumes
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Ball dropped below the viewport margin
    Fell,
    /// Ball touched an obstacle without invulnerability
    Obstacle,
}

/// Notifications for the host (audio cues and menu/HUD updates)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted,
    RunRestarted,
    /// First primary action launched the ball
    FirstJump,
    /// Ball bounced off a platform
    Bounced,
    PowerUpCollected,
    InvulnerabilityActivated,
    InvulnerabilityEnded,
    LevelUp { level: u32 },
    PowerUpSpawned,
    ObstacleSpawned,
    ObstacleHit,
    GameOver {
        score: f64,
        level: u32,
        cause: GameOverCause,
    },
}

/// Result of integrating the ball for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStatus {
    InPlay,
    /// Dropped past the bottom margin
    Fell,
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Ticks of invulnerability left (0 = vulnerable)
    pub invulnerable_ticks: u32,
    /// Character colour index
    pub character: usize,
}

impl Ball {
    /// Place a fresh ball near the bottom centre of the viewport
    pub fn spawn(viewport: Viewport, character: usize, starts_falling: bool) -> Self {
        let vy = if starts_falling { BALL_SPAWN_VELOCITY } else { 0.0 };
        Self {
            pos: Vec2::new(viewport.width / 2.0, viewport.height - BALL_SPAWN_OFFSET),
            vel: Vec2::new(0.0, vy),
            radius: BALL_RADIUS,
            gravity: BALL_GRAVITY,
            jump_impulse: BALL_JUMP_IMPULSE,
            invulnerable_ticks: 0,
            character,
        }
    }

    /// Integrate one tick of motion
    ///
    /// `vertical_motion` is false while the ball hovers before the first jump.
    /// Horizontal input takes effect from the next tick; left wins over right.
    pub fn update(&mut self, input: &TickInput, viewport: Viewport, vertical_motion: bool) -> BallStatus {
        if vertical_motion {
            self.vel.y += self.gravity;
            self.pos.y += self.vel.y;
        }

        self.pos.x += self.vel.x;

        if input.left {
            self.vel.x = -BALL_MOVE_SPEED;
        } else if input.right {
            self.vel.x = BALL_MOVE_SPEED;
        } else {
            self.vel.x *= BALL_DAMPING;
        }

        self.pos.x = self.pos.x.clamp(0.0, viewport.width.max(0.0));

        if self.pos.y > viewport.kill_line() {
            BallStatus::Fell
        } else {
            BallStatus::InPlay
        }
    }

    /// Bounce: replace vertical velocity with the jump impulse
    pub fn jump(&mut self) {
        self.vel.y = self.jump_impulse;
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Start the invulnerability window
    pub fn activate_invulnerability(&mut self) {
        self.invulnerable_ticks = INVULNERABILITY_TICKS;
    }

    /// Count down invulnerability; returns true on the tick it runs out
    pub fn tick_invulnerability(&mut self) -> bool {
        if self.invulnerable_ticks == 0 {
            return false;
        }
        self.invulnerable_ticks -= 1;
        self.invulnerable_ticks == 0
    }

    /// Blink phase while invulnerable: body hidden on alternating windows
    pub fn blink_hidden(&self) -> bool {
        self.is_invulnerable() && (self.invulnerable_ticks / BLINK_PERIOD_TICKS) % 2 == 0
    }
}

/// Move `x` along a horizontal patrol and flip `direction` at the viewport edges
///
/// Only flips when moving toward the crossed edge, so a shrunken viewport
/// cannot trap an entity flipping every tick.
fn patrol_step(x: &mut f32, direction: &mut f32, span: f32, speed: f32, viewport_width: f32) {
    *x += speed * *direction;
    let hit_left = *x <= 0.0 && *direction < 0.0;
    let hit_right = *x + span >= viewport_width && *direction > 0.0;
    if hit_left || hit_right {
        *direction = -*direction;
    }
}

/// A moving platform the ball bounces on
#[derive(Debug, Clone)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// +1 (right) or -1 (left)
    pub direction: f32,
    /// Position as a fraction of the viewport size
    pub frac: Vec2,
    /// Already scored by a touch
    pub touched: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, speed: f32, direction: f32, viewport: Viewport) -> Self {
        let mut platform = Self {
            pos: Vec2::new(x, y),
            width,
            height: PLATFORM_HEIGHT,
            speed,
            direction,
            frac: Vec2::ZERO,
            touched: false,
        };
        platform.refresh_fractions(viewport);
        platform
    }

    /// Platform at height `y` with random x, speed and direction
    pub fn random(rng: &mut Pcg32, y: f32, viewport: Viewport) -> Self {
        let x = rng.random::<f32>() * (viewport.width - PLATFORM_WIDTH).max(0.0);
        let speed = rng.random_range(PLATFORM_MIN_SPEED..PLATFORM_MAX_SPEED);
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        Self::new(x, y, PLATFORM_WIDTH, speed, direction, viewport)
    }

    pub fn update(&mut self, viewport: Viewport) {
        patrol_step(
            &mut self.pos.x,
            &mut self.direction,
            self.width,
            self.speed,
            viewport.width,
        );
        self.refresh_fractions(viewport);
    }

    /// Scroll down with the world
    pub fn shift_down(&mut self, dy: f32, viewport: Viewport) {
        self.pos.y += dy;
        self.refresh_fractions(viewport);
    }

    /// Restore absolute position after the viewport changed size
    pub fn reposition_from_resize(&mut self, viewport: Viewport) {
        self.pos = self.frac * Vec2::new(viewport.width, viewport.height);
    }

    fn refresh_fractions(&mut self, viewport: Viewport) {
        if viewport.width > 0.0 && viewport.height > 0.0 {
            self.frac = self.pos / Vec2::new(viewport.width, viewport.height);
        }
    }
}

/// A collectible star
#[derive(Debug, Clone)]
pub struct PowerUp {
    /// Centre position
    pub pos: Vec2,
    pub size: f32,
    collected: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: POWER_UP_SIZE,
            collected: false,
        }
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected; returns false if it already was
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// A spiked ball that patrols horizontally
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub direction: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
            speed,
            direction: 1.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    pub fn update(&mut self, viewport: Viewport) {
        patrol_step(
            &mut self.pos.x,
            &mut self.direction,
            self.width,
            self.speed,
            viewport.width,
        );
    }
}

/// Everything that belongs to one run and is rebuilt on restart
#[derive(Debug, Clone)]
pub struct RunState {
    /// Scroll score plus touch score (never decreases)
    pub score: f64,
    /// `floor(score / 10) + 1`
    pub level: u32,
    /// Highest level whose banner and spawns already fired
    pub last_level_announced: u32,
    /// Ticks left on the level banner
    pub level_banner_ticks: u32,
    /// Power-ups held for invulnerability
    pub power_up_inventory: u32,
    /// First primary action happened
    pub has_started_jumping: bool,
    /// Ticks simulated this run
    pub time_ticks: u64,
    pub ball: Ball,
    pub platforms: Vec<Platform>,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
}

impl RunState {
    pub fn new(viewport: Viewport, features: &Features, character: usize, rng: &mut Pcg32) -> Self {
        Self {
            score: 0.0,
            level: 1,
            last_level_announced: 1,
            level_banner_ticks: 0,
            power_up_inventory: 0,
            has_started_jumping: false,
            time_ticks: 0,
            ball: Ball::spawn(viewport, character, features.ball_starts_falling),
            platforms: initial_platforms(rng, viewport),
            power_ups: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }
}

/// The simulation: configuration, run state, RNG and lifecycle
#[derive(Debug, Clone)]
pub struct Simulation {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub phase: RunPhase,
    pub run: RunState,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl Simulation {
    /// Build a simulation sitting in the menu, with a ready-to-play world
    pub fn new(config: GameConfig, viewport: Viewport) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let run = RunState::new(viewport, &config.features, config.character, &mut rng);
        Self {
            config,
            viewport,
            phase: RunPhase::Menu,
            run,
            rng,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == RunPhase::Playing
    }

    #[inline]
    pub fn features(&self) -> &Features {
        &self.config.features
    }

    /// Leave the menu and begin ticking
    pub fn start(&mut self) {
        if self.phase != RunPhase::Menu {
            return;
        }
        self.phase = RunPhase::Playing;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.config.seed);
    }

    /// Rebuild all run state and resume ticking
    ///
    /// Safe to call repeatedly; each call produces a fresh run.
    pub fn restart(&mut self, character: usize) {
        self.config.character = character;
        self.run = RunState::new(self.viewport, &self.config.features, character, &mut self.rng);
        self.phase = RunPhase::Playing;
        self.events.push(GameEvent::RunRestarted);
        log::info!("Run restarted with character {}", character);
    }

    /// Like [`Simulation::restart`] but with a new seed
    pub fn restart_with_seed(&mut self, seed: u64, character: usize) {
        self.config.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.restart(character);
    }

    /// Apply a new viewport size and move platforms to their relative spots
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for platform in &mut self.run.platforms {
            platform.reposition_from_resize(viewport);
        }
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the run (idempotent)
    pub(crate) fn game_over(&mut self, cause: GameOverCause) {
        if self.phase != RunPhase::Playing {
            return;
        }
        self.phase = RunPhase::GameOver;
        let score = self.run.score;
        let level = self.run.level;
        log::info!("Game over ({:?}): score {}, level {}", cause, score.floor(), level);
        self.events.push(GameEvent::GameOver { score, level, cause });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_ball_idle_until_first_jump() {
        let vp = viewport();
        let mut ball = Ball::spawn(vp, 0, false);
        let start_y = ball.pos.y;
        for _ in 0..30 {
            ball.update(&TickInput::default(), vp, false);
        }
        assert_eq!(ball.pos.y, start_y);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_ball_starts_falling_gets_upward_kick() {
        let vp = viewport();
        let mut ball = Ball::spawn(vp, 0, true);
        let start_y = ball.pos.y;
        ball.update(&TickInput::default(), vp, true);
        assert_eq!(ball.vel.y, BALL_SPAWN_VELOCITY + BALL_GRAVITY);
        assert!(ball.pos.y < start_y);
    }

    #[test]
    fn test_ball_horizontal_input_and_damping() {
        let vp = viewport();
        let mut ball = Ball::spawn(vp, 0, false);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        ball.update(&left, vp, false);
        assert_eq!(ball.vel.x, -BALL_MOVE_SPEED);

        ball.update(&TickInput::default(), vp, false);
        assert!((ball.vel.x - (-BALL_MOVE_SPEED * BALL_DAMPING)).abs() < 1e-5);
    }

    #[test]
    fn test_ball_clamped_to_viewport() {
        let vp = viewport();
        let mut ball = Ball::spawn(vp, 0, false);
        ball.pos.x = 2.0;
        ball.vel.x = -10.0;
        ball.update(&TickInput::default(), vp, false);
        assert_eq!(ball.pos.x, 0.0);

        ball.pos.x = vp.width - 1.0;
        ball.vel.x = 10.0;
        ball.update(&TickInput::default(), vp, false);
        assert_eq!(ball.pos.x, vp.width);
    }

    #[test]
    fn test_ball_fell_past_margin() {
        let vp = viewport();
        let mut ball = Ball::spawn(vp, 0, false);
        ball.pos.y = vp.height + 150.0;
        assert_eq!(ball.update(&TickInput::default(), vp, false), BallStatus::Fell);
        ball.pos.y = vp.height + 50.0;
        assert_eq!(ball.update(&TickInput::default(), vp, false), BallStatus::InPlay);
    }

    #[test]
    fn test_invulnerability_countdown() {
        let mut ball = Ball::spawn(viewport(), 0, false);
        assert!(!ball.tick_invulnerability());
        ball.activate_invulnerability();
        assert_eq!(ball.invulnerable_ticks, INVULNERABILITY_TICKS);
        for _ in 0..INVULNERABILITY_TICKS - 1 {
            assert!(!ball.tick_invulnerability());
            assert!(ball.is_invulnerable());
        }
        assert!(ball.tick_invulnerability());
        assert!(!ball.is_invulnerable());
    }

    #[test]
    fn test_blink_alternates() {
        let mut ball = Ball::spawn(viewport(), 0, false);
        assert!(!ball.blink_hidden());
        ball.invulnerable_ticks = 400; // 40 -> even window
        assert!(ball.blink_hidden());
        ball.invulnerable_ticks = 410; // 41 -> odd window
        assert!(!ball.blink_hidden());
    }

    #[test]
    fn test_platform_reflects_at_edges() {
        let vp = viewport();
        let mut platform = Platform::new(1.0, 100.0, 100.0, 2.0, -1.0, vp);
        platform.update(vp);
        assert_eq!(platform.direction, 1.0);

        let mut platform = Platform::new(vp.width - 101.0, 100.0, 100.0, 2.0, 1.0, vp);
        platform.update(vp);
        assert_eq!(platform.direction, -1.0);
    }

    #[test]
    fn test_platform_no_flip_jitter_when_viewport_shrinks() {
        // Platform already past the right edge but heading back left
        let vp = Viewport::new(300.0, 600.0);
        let mut platform = Platform::new(250.0, 100.0, 100.0, 2.0, -1.0, vp);
        platform.update(vp);
        assert_eq!(platform.direction, -1.0);
        platform.update(vp);
        assert_eq!(platform.direction, -1.0);
    }

    #[test]
    fn test_platform_fractions_track_position() {
        let vp = viewport();
        let mut platform = Platform::new(200.0, 300.0, 100.0, 2.0, 1.0, vp);
        platform.update(vp);
        assert!((platform.frac.x - 202.0 / 800.0).abs() < 1e-6);
        platform.shift_down(60.0, vp);
        assert!((platform.frac.y - 360.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_platform_reposition_from_resize() {
        let vp = viewport();
        let mut platform = Platform::new(400.0, 300.0, 100.0, 2.0, 1.0, vp);
        let bigger = Viewport::new(1600.0, 1200.0);
        platform.reposition_from_resize(bigger);
        assert!((platform.pos.x - 800.0).abs() < 1e-3);
        assert!((platform.pos.y - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_power_up_collect_is_one_way() {
        let mut power_up = PowerUp::new(Vec2::new(10.0, 10.0));
        assert!(!power_up.is_collected());
        assert!(power_up.collect());
        assert!(power_up.is_collected());
        assert!(!power_up.collect());
        assert!(power_up.is_collected());
    }

    #[test]
    fn test_obstacle_center() {
        let obstacle = Obstacle::new(Vec2::new(100.0, 200.0), 3.0);
        assert_eq!(obstacle.center(), Vec2::new(120.0, 220.0));
        assert_eq!(obstacle.direction, 1.0);
    }

    #[test]
    fn test_simulation_lifecycle() {
        let mut sim = Simulation::new(GameConfig::default(), viewport());
        assert_eq!(sim.phase, RunPhase::Menu);
        assert!(!sim.is_active());
        assert_eq!(sim.run.platforms.len(), PLATFORM_COUNT);

        sim.start();
        assert!(sim.is_active());
        sim.game_over(GameOverCause::Fell);
        sim.game_over(GameOverCause::Fell);
        let events = sim.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(sim.phase, RunPhase::GameOver);
    }
}

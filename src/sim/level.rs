//! Level progression and spawn policy
//!
//! Levels follow score (`floor(score / 10) + 1`) and only ever go up. Each
//! newly reached level shows a banner and may spawn a power-up and/or an
//! obstacle:
//!
//! | level        | power-up | obstacle |
//! |--------------|----------|----------|
//! | 1            | no       | no       |
//! | 2..=9        | yes      | even     |
//! | 10+          | even     | even     |

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::config::Features;
use super::state::{Obstacle, PowerUp, RunState};
use crate::Viewport;
use crate::consts::*;

/// Level implied by a score
pub fn level_for_score(score: f64) -> u32 {
    (score.max(0.0) / SCORE_PER_LEVEL).floor() as u32 + 1
}

/// Whether reaching `level` spawns a power-up
pub fn spawns_power_up(level: u32) -> bool {
    (2..10).contains(&level) || (level >= 10 && level % 2 == 0)
}

/// Whether reaching `level` spawns an obstacle
pub fn spawns_obstacle(level: u32) -> bool {
    level >= 2 && level % 2 == 0
}

/// What a level-up produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub power_up: bool,
    pub obstacle: bool,
}

/// Power-up at a random x on the midline
pub fn spawn_power_up(rng: &mut Pcg32, viewport: Viewport) -> PowerUp {
    let x = rng.random::<f32>() * viewport.width;
    PowerUp::new(Vec2::new(x, viewport.midline()))
}

/// Obstacle just below the midline with a random x and speed
pub fn spawn_obstacle(rng: &mut Pcg32, viewport: Viewport) -> Obstacle {
    let x = rng.random::<f32>() * (viewport.width - OBSTACLE_SIZE).max(0.0);
    let y = viewport.midline() + OBSTACLE_SPAWN_OFFSET;
    let speed = rng.random_range(OBSTACLE_MIN_SPEED..OBSTACLE_MAX_SPEED);
    Obstacle::new(Vec2::new(x, y), speed)
}

/// Count down the banner, recompute the level and apply the spawn policy
///
/// Spawns are decided by the newly reached level only; levels skipped in a
/// single tick do not spawn retroactively.
pub fn advance_level(
    run: &mut RunState,
    features: &Features,
    rng: &mut Pcg32,
    viewport: Viewport,
) -> Option<LevelUp> {
    run.level_banner_ticks = run.level_banner_ticks.saturating_sub(1);

    // Never let the level drop, even if score were somehow adjusted down
    run.level = level_for_score(run.score).max(run.level);
    if run.level <= run.last_level_announced {
        return None;
    }

    let level = run.level;
    run.last_level_announced = level;
    run.level_banner_ticks = LEVEL_BANNER_TICKS;

    let mut outcome = LevelUp {
        level,
        ..Default::default()
    };

    if features.power_ups && spawns_power_up(level) {
        run.power_ups.push(spawn_power_up(rng, viewport));
        outcome.power_up = true;
    }
    if features.obstacles && spawns_obstacle(level) {
        run.obstacles.push(spawn_obstacle(rng, viewport));
        outcome.obstacle = true;
    }

    log::info!(
        "Level {} (power-up: {}, obstacle: {})",
        level,
        outcome.power_up,
        outcome.obstacle
    );
    Some(outcome)
}

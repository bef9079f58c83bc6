//! Per-frame simulation tick
//!
//! Core game loop step. One call advances the run by exactly one frame:
//! input → ball → platforms/obstacles → collisions → invulnerability →
//! camera → level/spawns → recycling → game-over check.

use super::camera::recenter;
use super::collision::{resolve_obstacle_hits, resolve_platform_bounces, resolve_power_up_pickups};
use super::config::Features;
use super::level::advance_level;
use super::recycle::recycle;
use super::state::{BallStatus, GameEvent, GameOverCause, RunState, Simulation};
use crate::Viewport;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Primary action pressed since the last tick (one-shot)
    pub primary: bool,
    /// Idle/demo mode - the game steers itself
    pub autopilot: bool,
}

/// Advance the simulation by one frame
///
/// Does nothing unless the run is playing, so it is safe to keep calling
/// after game over.
pub fn tick(sim: &mut Simulation, input: &TickInput) {
    if !sim.is_active() {
        return;
    }

    let viewport = sim.viewport;
    let features = sim.config.features;

    let mut input = input.clone();
    if input.autopilot {
        steer_autopilot(&sim.run, viewport, &features, &mut input);
    }
    let input = &input;

    let ending = {
        let Simulation { run, rng, events, .. } = sim;
        let mut ending = None;

        run.time_ticks += 1;

        if input.primary {
            primary_action(run, &features, events);
        }

        // Ball
        let vertical_motion = run.has_started_jumping || features.ball_starts_falling;
        if run.ball.update(input, viewport, vertical_motion) == BallStatus::Fell {
            ending = Some(GameOverCause::Fell);
        }

        // Moving world
        for platform in &mut run.platforms {
            platform.update(viewport);
        }
        for obstacle in &mut run.obstacles {
            obstacle.update(viewport);
        }

        // Collisions
        if resolve_platform_bounces(run, features.platform_touch_score) {
            events.push(GameEvent::Bounced);
        }
        for _ in 0..resolve_power_up_pickups(run) {
            events.push(GameEvent::PowerUpCollected);
        }
        if resolve_obstacle_hits(run) {
            events.push(GameEvent::ObstacleHit);
            ending = ending.or(Some(GameOverCause::Obstacle));
        }

        if run.ball.tick_invulnerability() {
            events.push(GameEvent::InvulnerabilityEnded);
        }

        recenter(run, viewport);

        if let Some(level_up) = advance_level(run, &features, rng, viewport) {
            events.push(GameEvent::LevelUp {
                level: level_up.level,
            });
            if level_up.power_up {
                events.push(GameEvent::PowerUpSpawned);
            }
            if level_up.obstacle {
                events.push(GameEvent::ObstacleSpawned);
            }
        }

        recycle(run, rng, viewport);

        ending
    };

    if let Some(cause) = ending {
        sim.game_over(cause);
    }
}

/// First press launches the ball; later presses spend a power-up on
/// invulnerability (when one is held and none is active)
fn primary_action(run: &mut RunState, features: &Features, events: &mut Vec<GameEvent>) {
    if !run.has_started_jumping && !features.ball_starts_falling {
        run.has_started_jumping = true;
        run.ball.jump();
        events.push(GameEvent::FirstJump);
        log::debug!("First jump");
    } else if features.power_ups && run.power_up_inventory > 0 && !run.ball.is_invulnerable() {
        run.power_up_inventory -= 1;
        run.ball.activate_invulnerability();
        events.push(GameEvent::InvulnerabilityActivated);
        log::debug!("Invulnerable ({} power-ups left)", run.power_up_inventory);
    }
}

/// Horizontal slack before the autopilot starts correcting
const AUTOPILOT_DEADZONE: f32 = 10.0;
/// Obstacle distance at which the autopilot spends a power-up
const AUTOPILOT_DANGER_RADIUS: f32 = 150.0;

/// Fill in input for idle/demo mode
///
/// Steers toward the nearest platform below the ball, launches the first
/// jump and burns a power-up when an obstacle gets close.
fn steer_autopilot(run: &RunState, viewport: Viewport, features: &Features, input: &mut TickInput) {
    let ball = &run.ball;

    if !run.has_started_jumping && !features.ball_starts_falling {
        input.primary = true;
        return;
    }

    let target = run
        .platforms
        .iter()
        .filter(|p| p.pos.y > ball.pos.y + ball.radius && p.pos.y < viewport.height)
        .min_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.pos.x + p.width / 2.0);

    input.left = false;
    input.right = false;
    if let Some(target_x) = target {
        if ball.pos.x < target_x - AUTOPILOT_DEADZONE {
            input.right = true;
        } else if ball.pos.x > target_x + AUTOPILOT_DEADZONE {
            input.left = true;
        }
    }

    let danger = run
        .obstacles
        .iter()
        .any(|o| o.center().distance(ball.pos) < AUTOPILOT_DANGER_RADIUS);
    if danger && run.power_up_inventory > 0 && !ball.is_invulnerable() {
        input.primary = true;
    }
}

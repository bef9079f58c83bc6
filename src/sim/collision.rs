//! Collision detection and response
//!
//! Geometry tests are pure functions over entity shapes; the `resolve_*`
//! functions apply their outcomes to a [`RunState`].

use glam::Vec2;

use super::state::{Ball, Obstacle, Platform, PowerUp, RunState};
use crate::consts::PLATFORM_TOUCH_SCORE;

/// Whether a falling ball lands on a platform this tick
///
/// The ball's horizontal extent must overlap the platform and its lower edge
/// must sit inside the platform's vertical band. Rising balls pass through.
pub fn ball_lands_on_platform(ball: &Ball, platform: &Platform) -> bool {
    let bottom = ball.pos.y + ball.radius;
    ball.vel.y > 0.0
        && ball.pos.x + ball.radius > platform.pos.x
        && ball.pos.x - ball.radius < platform.pos.x + platform.width
        && bottom > platform.pos.y
        && bottom < platform.pos.y + platform.height
}

/// Axis-aligned proximity test between the ball centre and a power-up
pub fn ball_touches_power_up(ball: &Ball, power_up: &PowerUp) -> bool {
    let delta = (ball.pos - power_up.pos).abs();
    delta.x < power_up.size && delta.y < power_up.size
}

/// Circle test between a ball and an obstacle's bounding circle
pub fn circle_hits_obstacle(center: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    center.distance(obstacle.center()) < radius + obstacle.width / 2.0
}

/// Whether an obstacle ends the run: contact while not invulnerable
pub fn obstacle_hits_ball(ball: &Ball, obstacle: &Obstacle) -> bool {
    !ball.is_invulnerable() && circle_hits_obstacle(ball.pos, ball.radius, obstacle)
}

/// Bounce the ball off any platform it lands on
///
/// Returns true if it bounced. With `touch_score`, each platform awards a
/// point the first time it is landed on.
pub fn resolve_platform_bounces(run: &mut RunState, touch_score: bool) -> bool {
    let mut bounced = false;
    for platform in &mut run.platforms {
        if ball_lands_on_platform(&run.ball, platform) {
            run.ball.jump();
            bounced = true;
            if touch_score && !platform.touched {
                platform.touched = true;
                run.score += PLATFORM_TOUCH_SCORE;
            }
        }
    }
    bounced
}

/// Collect every uncollected power-up the ball touches
///
/// Returns how many were picked up this tick.
pub fn resolve_power_up_pickups(run: &mut RunState) -> u32 {
    let mut picked = 0;
    for power_up in &mut run.power_ups {
        if !power_up.is_collected() && ball_touches_power_up(&run.ball, power_up) && power_up.collect() {
            picked += 1;
        }
    }
    run.power_up_inventory += picked;
    picked
}

/// Whether any obstacle hits the ball this tick
pub fn resolve_obstacle_hits(run: &RunState) -> bool {
    run.obstacles
        .iter()
        .any(|obstacle| obstacle_hits_ball(&run.ball, obstacle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;

    fn ball_at(x: f32, y: f32, vy: f32) -> Ball {
        let mut ball = Ball::spawn(Viewport::default(), 0, false);
        ball.pos = Vec2::new(x, y);
        ball.vel.y = vy;
        ball
    }

    fn platform_at(x: f32, y: f32) -> Platform {
        Platform::new(x, y, 100.0, 2.0, 1.0, Viewport::default())
    }

    #[test]
    fn test_lands_when_falling_into_band() {
        let platform = platform_at(100.0, 300.0);
        // Bottom edge at 305, inside [300, 315]
        let ball = ball_at(150.0, 285.0, 3.0);
        assert!(ball_lands_on_platform(&ball, &platform));
    }

    #[test]
    fn test_rising_ball_passes_through() {
        let platform = platform_at(100.0, 300.0);
        let ball = ball_at(150.0, 285.0, -3.0);
        assert!(!ball_lands_on_platform(&ball, &platform));
    }

    #[test]
    fn test_no_landing_outside_horizontal_extent() {
        let platform = platform_at(100.0, 300.0);
        // Right edge of ball exactly on platform left edge: no overlap
        let ball = ball_at(80.0, 285.0, 3.0);
        assert!(!ball_lands_on_platform(&ball, &platform));
        // Edge overlap by a hair
        let ball = ball_at(81.0, 285.0, 3.0);
        assert!(ball_lands_on_platform(&ball, &platform));
    }

    #[test]
    fn test_no_landing_outside_vertical_band() {
        let platform = platform_at(100.0, 300.0);
        let above = ball_at(150.0, 270.0, 3.0);
        let below = ball_at(150.0, 300.0, 3.0);
        assert!(!ball_lands_on_platform(&above, &platform));
        assert!(!ball_lands_on_platform(&below, &platform));
    }

    #[test]
    fn test_power_up_proximity() {
        let power_up = PowerUp::new(Vec2::new(200.0, 200.0));
        assert!(ball_touches_power_up(&ball_at(225.0, 175.0, 0.0), &power_up));
        assert!(!ball_touches_power_up(&ball_at(230.0, 200.0, 0.0), &power_up));
        assert!(!ball_touches_power_up(&ball_at(200.0, 170.0, 0.0), &power_up));
    }

    #[test]
    fn test_obstacle_hit_respects_invulnerability() {
        // Obstacle centre at (120, 120); ball 5 units away
        let obstacle = Obstacle::new(Vec2::new(100.0, 100.0), 2.0);
        let mut ball = ball_at(125.0, 120.0, 0.0);
        assert!(circle_hits_obstacle(ball.pos, ball.radius, &obstacle));
        assert!(obstacle_hits_ball(&ball, &obstacle));

        ball.activate_invulnerability();
        assert!(!obstacle_hits_ball(&ball, &obstacle));
    }

    #[test]
    fn test_obstacle_miss_at_touching_distance() {
        let obstacle = Obstacle::new(Vec2::new(100.0, 100.0), 2.0);
        // Exactly radius + half width away: not a hit
        let ball = ball_at(160.0, 120.0, 0.0);
        assert!(!obstacle_hits_ball(&ball, &obstacle));
    }

    fn run_with(ball: Ball, platforms: Vec<Platform>) -> RunState {
        let mut rng = <rand_pcg::Pcg32 as rand::SeedableRng>::seed_from_u64(1);
        let mut run = RunState::new(Viewport::default(), &Default::default(), 0, &mut rng);
        run.ball = ball;
        run.platforms = platforms;
        run
    }

    #[test]
    fn test_touch_score_once_per_platform() {
        let mut run = run_with(ball_at(150.0, 285.0, 3.0), vec![platform_at(100.0, 300.0)]);

        assert!(resolve_platform_bounces(&mut run, true));
        assert_eq!(run.ball.vel.y, run.ball.jump_impulse);
        assert_eq!(run.score, 1.0);

        run.ball.vel.y = 3.0;
        assert!(resolve_platform_bounces(&mut run, true));
        assert_eq!(run.score, 1.0);
    }

    #[test]
    fn test_no_touch_score_when_disabled() {
        let mut run = run_with(ball_at(150.0, 285.0, 3.0), vec![platform_at(100.0, 300.0)]);
        assert!(resolve_platform_bounces(&mut run, false));
        assert_eq!(run.score, 0.0);
        assert!(!run.platforms[0].touched);
    }

    #[test]
    fn test_pickup_increments_inventory_once() {
        let mut run = run_with(ball_at(200.0, 200.0, 0.0), Vec::new());
        run.power_ups.push(PowerUp::new(Vec2::new(210.0, 190.0)));

        assert_eq!(resolve_power_up_pickups(&mut run), 1);
        assert_eq!(run.power_up_inventory, 1);
        assert!(run.power_ups[0].is_collected());

        assert_eq!(resolve_power_up_pickups(&mut run), 0);
        assert_eq!(run.power_up_inventory, 1);
    }
}

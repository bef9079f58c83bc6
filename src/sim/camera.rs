//! Camera follow
//!
//! The ball never rises above the viewport midline. When it tries to, it is
//! pinned there and the rest of the world moves down by the same amount,
//! which reads on screen as the camera climbing with the player.

use super::state::RunState;
use crate::Viewport;
use crate::consts::SCROLL_SCORE;

/// Pin the ball to the midline and scroll the world
///
/// Returns the scroll distance (0 when the ball is at or below the midline).
/// Each scroll awards [`SCROLL_SCORE`].
pub fn recenter(run: &mut RunState, viewport: Viewport) -> f32 {
    let midline = viewport.midline();
    if run.ball.pos.y >= midline {
        return 0.0;
    }

    let dy = midline - run.ball.pos.y;
    run.ball.pos.y = midline;

    for platform in &mut run.platforms {
        platform.shift_down(dy, viewport);
    }
    for power_up in &mut run.power_ups {
        power_up.pos.y += dy;
    }
    for obstacle in &mut run.obstacles {
        obstacle.pos.y += dy;
    }

    run.score += SCROLL_SCORE;
    dy
}

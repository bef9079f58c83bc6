//! 2D rendering
//!
//! The simulation never draws. [`draw_frame`] turns a [`Simulation`] into
//! calls on a [`Surface`], which the host backs with a canvas.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::{DEFAULT_PALETTE, Simulation, character_color, palette_for_level};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A 2D drawing target
///
/// Colours are CSS colour strings.
pub trait Surface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32);
    /// Closed polygon, filled and optionally outlined
    fn fill_polygon(&mut self, points: &[Vec2], fill: &str, stroke: Option<&str>);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str, align: TextAlign);
}

/// Presentation switches that don't affect gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Blink the ball while invulnerable
    pub blink: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { blink: true }
    }
}

const POWER_UP_FILL: &str = "gold";
const OBSTACLE_FILL: &str = "#c00";
const OUTLINE: &str = "#fff";
const HALO_WIDTH: f32 = 4.0;
const HALO_GAP: f32 = 5.0;
const HUD_FONT: &str = "20px Arial";
const HUD_COLOR: &str = "#fff";
const PROMPT_FONT: &str = "28px Arial";
const PROMPT_COLOR: &str = "rgba(255, 255, 255, 0.8)";
const BANNER_FONT: &str = "48px Arial";
const BANNER_COLOR: &str = "rgba(255, 255, 255, 0.9)";

/// Draw one frame of the current run
pub fn draw_frame(surface: &mut impl Surface, sim: &Simulation, options: RenderOptions) {
    let run = &sim.run;
    let features = sim.features();
    let viewport = sim.viewport;

    let palette = if features.level_colors {
        palette_for_level(run.level)
    } else {
        DEFAULT_PALETTE
    };

    surface.fill_rect(
        Vec2::ZERO,
        Vec2::new(viewport.width, viewport.height),
        palette.background,
    );

    for platform in &run.platforms {
        surface.fill_rect(
            platform.pos,
            Vec2::new(platform.width, platform.height),
            palette.platform,
        );
    }

    for power_up in run.power_ups.iter().filter(|p| !p.is_collected()) {
        let star = shapes::power_up_star(power_up.pos, power_up.size);
        surface.fill_polygon(&star, POWER_UP_FILL, Some(OUTLINE));
    }

    for obstacle in &run.obstacles {
        let spikes = shapes::obstacle_spikes(obstacle.pos, obstacle.width);
        surface.fill_polygon(&spikes, OBSTACLE_FILL, Some(OUTLINE));
    }

    // Ball
    let ball = &run.ball;
    let ball_color = if features.character_select {
        character_color(ball.character)
    } else {
        palette.ball
    };
    if !(options.blink && ball.blink_hidden()) {
        surface.fill_circle(ball.pos, ball.radius, ball_color);
    }
    if ball.is_invulnerable() {
        surface.stroke_circle(ball.pos, ball.radius + HALO_GAP, OUTLINE, HALO_WIDTH);
    }

    // HUD
    surface.fill_text(
        &format!("Score: {}", run.display_score()),
        Vec2::new(10.0, 30.0),
        HUD_FONT,
        HUD_COLOR,
        TextAlign::Left,
    );
    if features.power_ups {
        surface.fill_text(
            &format!("Power-Ups: {}", run.power_up_inventory),
            Vec2::new(10.0, 60.0),
            HUD_FONT,
            HUD_COLOR,
            TextAlign::Left,
        );
    }

    if !run.has_started_jumping && !features.ball_starts_falling {
        surface.fill_text(
            "Press \u{2191} to start",
            Vec2::new(viewport.width / 2.0, viewport.midline()),
            PROMPT_FONT,
            PROMPT_COLOR,
            TextAlign::Center,
        );
    }

    if run.level_banner_ticks > 0 {
        surface.fill_text(
            &format!("Level {}", run.level),
            Vec2::new(viewport.width / 2.0, viewport.height / 3.0),
            BANNER_FONT,
            BANNER_COLOR,
            TextAlign::Center,
        );
    }
}

//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

/// Spikes on a power-up star
pub const STAR_SPIKES: u32 = 5;
/// Spikes on an obstacle
pub const OBSTACLE_SPIKES: u32 = 12;
/// Obstacle inner radius as a fraction of its outer radius
pub const OBSTACLE_INNER_RATIO: f32 = 0.6;

/// Outline of a spiked star, alternating outer and inner vertices
///
/// Starts at the top (12 o'clock) and winds clockwise in screen space.
/// Returns `2 * spikes` points.
pub fn star_points(center: Vec2, spikes: u32, outer_radius: f32, inner_radius: f32) -> Vec<Vec2> {
    let step = PI / spikes as f32;
    let mut rot = PI / 2.0 * 3.0;
    let mut points = Vec::with_capacity(spikes as usize * 2);

    for _ in 0..spikes {
        points.push(center + Vec2::new(rot.cos(), rot.sin()) * outer_radius);
        rot += step;
        points.push(center + Vec2::new(rot.cos(), rot.sin()) * inner_radius);
        rot += step;
    }

    points
}

/// Five-point star for a power-up of the given size
pub fn power_up_star(center: Vec2, size: f32) -> Vec<Vec2> {
    star_points(center, STAR_SPIKES, size / 2.0, size / 4.0)
}

/// Spiked ball outline for an obstacle bounding box
pub fn obstacle_spikes(top_left: Vec2, width: f32) -> Vec<Vec2> {
    let outer = width / 2.0;
    star_points(
        top_left + Vec2::splat(outer),
        OBSTACLE_SPIKES,
        outer,
        outer * OBSTACLE_INNER_RATIO,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_point_count_and_radii() {
        let center = Vec2::new(50.0, 50.0);
        let points = star_points(center, 5, 20.0, 10.0);
        assert_eq!(points.len(), 10);
        for (i, p) in points.iter().enumerate() {
            let r = p.distance(center);
            let expected = if i % 2 == 0 { 20.0 } else { 10.0 };
            assert!((r - expected).abs() < 1e-3, "point {} at radius {}", i, r);
        }
    }

    #[test]
    fn test_star_starts_at_top() {
        let points = star_points(Vec2::ZERO, 5, 10.0, 5.0);
        assert!(points[0].x.abs() < 1e-4);
        assert!((points[0].y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_obstacle_spikes_centered_in_box() {
        let points = obstacle_spikes(Vec2::new(100.0, 200.0), 40.0);
        assert_eq!(points.len(), 24);
        let center = Vec2::new(120.0, 220.0);
        assert!((points[0].distance(center) - 20.0).abs() < 1e-3);
        assert!((points[1].distance(center) - 12.0).abs() < 1e-3);
    }
}

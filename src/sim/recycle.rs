//! World recycling
//!
//! Only a handful of entities are ever alive. Anything that scrolls past the
//! bottom margin is dropped and the platform ladder is extended upward so
//! there are always [`PLATFORM_COUNT`] platforms.

use rand_pcg::Pcg32;

use super::state::{Platform, RunState};
use crate::Viewport;
use crate::consts::*;

/// Starting ladder: one platform every 100 units up from the viewport bottom
pub fn initial_platforms(rng: &mut Pcg32, viewport: Viewport) -> Vec<Platform> {
    (0..PLATFORM_COUNT)
        .map(|i| {
            let y = viewport.height - i as f32 * PLATFORM_SPACING;
            Platform::random(rng, y, viewport)
        })
        .collect()
}

/// Drop off-screen entities and collected power-ups, then top up platforms
///
/// Returns how many platforms were added.
pub fn recycle(run: &mut RunState, rng: &mut Pcg32, viewport: Viewport) -> usize {
    let kill_line = viewport.kill_line();

    run.platforms.retain(|p| p.pos.y < kill_line);
    run.power_ups
        .retain(|p| p.pos.y < kill_line && !p.is_collected());
    run.obstacles.retain(|o| o.pos.y < kill_line);

    let mut added = 0;
    while run.platforms.len() < PLATFORM_COUNT {
        let top = run
            .platforms
            .iter()
            .map(|p| p.pos.y)
            .reduce(f32::min)
            // Nothing survived: restart the ladder from the bottom
            .unwrap_or(viewport.height + PLATFORM_SPACING);
        run.platforms
            .push(Platform::random(rng, top - PLATFORM_SPACING, viewport));
        added += 1;
    }

    if added > 0 {
        log::trace!("Recycled {} platforms", added);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::Features;
    use crate::sim::state::{Obstacle, PowerUp};
    use glam::Vec2;
    use rand::SeedableRng;

    fn setup() -> (RunState, Pcg32, Viewport) {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let run = RunState::new(viewport, &Features::arcade(), 0, &mut rng);
        (run, rng, viewport)
    }

    #[test]
    fn test_initial_ladder() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let platforms = initial_platforms(&mut rng, viewport);
        assert_eq!(platforms.len(), PLATFORM_COUNT);
        for (i, platform) in platforms.iter().enumerate() {
            assert_eq!(platform.pos.y, 600.0 - i as f32 * 100.0);
            assert!(platform.pos.x >= 0.0 && platform.pos.x <= 700.0);
            assert_eq!(platform.width, PLATFORM_WIDTH);
            assert!(platform.speed >= PLATFORM_MIN_SPEED && platform.speed < PLATFORM_MAX_SPEED);
            assert!(platform.direction == 1.0 || platform.direction == -1.0);
        }
    }

    #[test]
    fn test_replaces_fallen_platform_above_top() {
        let (mut run, mut rng, viewport) = setup();
        run.platforms[0].pos.y = 700.0;
        let top = run.platforms.iter().skip(1).map(|p| p.pos.y).fold(f32::MAX, f32::min);

        assert_eq!(recycle(&mut run, &mut rng, viewport), 1);
        assert_eq!(run.platforms.len(), PLATFORM_COUNT);
        let newest = run.platforms.last().unwrap();
        assert_eq!(newest.pos.y, top - PLATFORM_SPACING);
    }

    #[test]
    fn test_keeps_platform_just_above_kill_line() {
        let (mut run, mut rng, viewport) = setup();
        run.platforms[0].pos.y = 699.0;
        assert_eq!(recycle(&mut run, &mut rng, viewport), 0);
    }

    #[test]
    fn test_refills_when_everything_fell() {
        let (mut run, mut rng, viewport) = setup();
        for platform in &mut run.platforms {
            platform.pos.y = 1000.0;
        }
        assert_eq!(recycle(&mut run, &mut rng, viewport), PLATFORM_COUNT);
        assert_eq!(run.platforms.len(), PLATFORM_COUNT);
        assert_eq!(run.platforms[0].pos.y, viewport.height);
    }

    #[test]
    fn test_prunes_items() {
        let (mut run, mut rng, viewport) = setup();
        let mut collected = PowerUp::new(Vec2::new(100.0, 100.0));
        collected.collect();
        run.power_ups.push(collected);
        run.power_ups.push(PowerUp::new(Vec2::new(100.0, 800.0)));
        run.power_ups.push(PowerUp::new(Vec2::new(100.0, 200.0)));
        run.obstacles.push(Obstacle::new(Vec2::new(0.0, 750.0), 2.0));
        run.obstacles.push(Obstacle::new(Vec2::new(0.0, 300.0), 2.0));

        recycle(&mut run, &mut rng, viewport);
        assert_eq!(run.power_ups.len(), 1);
        assert_eq!(run.power_ups[0].pos.y, 200.0);
        assert_eq!(run.obstacles.len(), 1);
        assert_eq!(run.obstacles[0].pos.y, 300.0);
    }
}

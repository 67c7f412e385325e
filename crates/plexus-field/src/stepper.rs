//! Per-frame particle movement.

use plexus_core::{Bounds, Particle};

/// Advance every particle by its velocity and bounce it off the edges.
///
/// A coordinate that leaves `[0, extent]` is mirrored back across the edge
/// it crossed and the matching velocity component changes sign. The speed
/// of a particle is never altered.
pub fn step(particles: &mut [Particle], bounds: Bounds) {
    for p in particles {
        p.position += p.velocity;
        (p.position.x, p.velocity.x) = reflect(p.position.x, p.velocity.x, bounds.width);
        (p.position.y, p.velocity.y) = reflect(p.position.y, p.velocity.y, bounds.height);
    }
}

/// Clamp particles into `bounds` after the drawable area changed size.
pub fn fit_to_bounds(particles: &mut [Particle], bounds: Bounds) {
    for p in particles {
        p.position = bounds.clamp(p.position);
    }
}

fn reflect(position: f64, velocity: f64, extent: f64) -> (f64, f64) {
    if position < 0.0 {
        ((-position).min(extent), velocity.abs())
    } else if position > extent {
        ((2.0 * extent - position).max(0.0), -velocity.abs())
    } else {
        (position, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{SpawnParams, spawn};
    use plexus_core::Vec2;
    use rand::{SeedableRng, rngs::StdRng};

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), 2.0, 0.5)
    }

    #[test]
    fn test_step_moves_by_velocity() {
        let mut particles = vec![particle(10.0, 20.0, 1.5, -0.5)];
        step(&mut particles, Bounds::new(100.0, 100.0));
        assert_eq!(particles[0].position, Vec2::new(11.5, 19.5));
        assert_eq!(particles[0].velocity, Vec2::new(1.5, -0.5));
    }

    #[test]
    fn test_reflect_off_right_and_top() {
        let mut particles = vec![particle(99.0, 0.5, 2.0, -1.0)];
        step(&mut particles, Bounds::new(100.0, 100.0));
        // x: 101 -> 99, y: -0.5 -> 0.5
        assert_eq!(particles[0].position, Vec2::new(99.0, 0.5));
        assert_eq!(particles[0].velocity, Vec2::new(-2.0, 1.0));
    }

    #[test]
    fn test_reflect_off_left_and_bottom() {
        let mut particles = vec![particle(0.2, 99.9, -0.5, 0.3)];
        step(&mut particles, Bounds::new(100.0, 100.0));
        let p = particles[0];
        assert!((p.position.x - 0.3).abs() < 1e-12);
        assert!((p.position.y - 99.8).abs() < 1e-9);
        assert_eq!(p.velocity, Vec2::new(0.5, -0.3));
    }

    #[test]
    fn test_edge_contact_is_inside() {
        let mut particles = vec![particle(99.0, 50.0, 1.0, 0.0)];
        step(&mut particles, Bounds::new(100.0, 100.0));
        assert_eq!(particles[0].position.x, 100.0);
        assert_eq!(particles[0].velocity.x, 1.0);
    }

    #[test]
    fn test_containment_over_many_steps() {
        let bounds = Bounds::new(800.0, 600.0);
        let params = SpawnParams {
            min_speed: 1.0,
            max_speed: 25.0,
            ..SpawnParams::default()
        };
        let mut particles = spawn(bounds, 80, &params, &mut StdRng::seed_from_u64(11));
        let speeds: Vec<f64> = particles.iter().map(Particle::speed).collect();

        for _ in 0..5_000 {
            step(&mut particles, bounds);
            for (p, speed) in particles.iter().zip(&speeds) {
                assert!(bounds.contains(p.position), "escaped: {:?}", p.position);
                assert!((p.speed() - speed).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_scenario_800_by_600_single_pass() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut particles = spawn(bounds, 80, &SpawnParams::default(), &mut rng);
        // Push a few onto the edges so reflection is exercised.
        particles[0].position = Vec2::new(0.05, 300.0);
        particles[0].velocity = Vec2::new(-0.2, 0.1);
        particles[1].position = Vec2::new(400.0, 599.9);
        particles[1].velocity = Vec2::new(0.1, 0.3);
        let before = particles.clone();

        step(&mut particles, bounds);

        for (old, new) in before.iter().zip(&particles) {
            let sum = old.position + old.velocity;
            if (0.0..=bounds.width).contains(&sum.x) {
                assert_eq!(new.position.x, sum.x);
                assert_eq!(new.velocity.x, old.velocity.x);
            } else {
                assert_eq!(new.velocity.x, -old.velocity.x);
                let expected = if sum.x < 0.0 { -sum.x } else { 2.0 * bounds.width - sum.x };
                assert!((new.position.x - expected).abs() < 1e-9);
            }
            if (0.0..=bounds.height).contains(&sum.y) {
                assert_eq!(new.position.y, sum.y);
                assert_eq!(new.velocity.y, old.velocity.y);
            } else {
                assert_eq!(new.velocity.y, -old.velocity.y);
                let expected = if sum.y < 0.0 { -sum.y } else { 2.0 * bounds.height - sum.y };
                assert!((new.position.y - expected).abs() < 1e-9);
            }
        }
        assert_eq!(particles[0].velocity.x, 0.2);
        assert_eq!(particles[1].velocity.y, -0.3);
    }

    #[test]
    fn test_zero_size_canvas_keeps_particles_on_edge() {
        let mut particles = vec![particle(0.0, 0.0, 0.3, -0.4)];
        for _ in 0..10 {
            step(&mut particles, Bounds::new(0.0, 0.0));
            assert_eq!(particles[0].position, Vec2::ZERO);
            assert!((particles[0].speed() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_step_empty_slice() {
        let mut particles: Vec<Particle> = Vec::new();
        step(&mut particles, Bounds::new(800.0, 600.0));
        assert!(particles.is_empty());
    }

    #[test]
    fn test_fit_to_bounds_after_shrink() {
        let mut particles = vec![particle(700.0, 500.0, 0.1, 0.1), particle(10.0, 10.0, 0.1, 0.1)];
        fit_to_bounds(&mut particles, Bounds::new(400.0, 300.0));
        assert_eq!(particles[0].position, Vec2::new(400.0, 300.0));
        assert_eq!(particles[1].position, Vec2::new(10.0, 10.0));
        assert_eq!(particles[0].velocity, Vec2::new(0.1, 0.1));
    }
}

//! Particle creation.

use std::f64::consts::TAU;

use plexus_core::{Bounds, Particle, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ranges the spawned particles are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Minimum speed in pixels per frame.
    pub min_speed: f64,
    /// Maximum speed in pixels per frame.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            min_speed: 0.1,
            max_speed: 0.35,
            min_radius: 1.0,
            max_radius: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
        }
    }
}

/// Create `count` particles scattered over `bounds`.
///
/// Each particle gets a uniform position, a uniformly random heading with
/// a speed drawn from the configured range, and a radius and opacity from
/// their ranges. A zero-sized axis places every particle at 0 on that axis.
pub fn spawn<R: Rng + ?Sized>(
    bounds: Bounds,
    count: usize,
    params: &SpawnParams,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let position = Vec2::new(
                sample(rng, 0.0, bounds.width),
                sample(rng, 0.0, bounds.height),
            );
            let heading = rng.gen_range(0.0..TAU);
            let speed = sample(rng, params.min_speed, params.max_speed);
            let radius = sample(rng, params.min_radius, params.max_radius);
            let opacity = sample(rng, params.min_opacity, params.max_opacity);
            Particle::new(position, Vec2::from_angle(heading) * speed, radius, opacity)
        })
        .collect()
}

/// Uniform sample from `[min, max]`, or `min` when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

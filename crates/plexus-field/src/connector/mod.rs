//! Proximity links between nearby particles.

mod grid;

use plexus_core::Particle;
use serde::{Deserialize, Serialize};

pub use grid::SpatialGrid;

/// A line to draw between particles `a` and `b` (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// Euclidean distance between the two particles.
    pub distance: f64,
    /// Stroke opacity, fading to 0 at the link distance.
    pub alpha: f64,
}

/// Neighbor search strategy for building links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
    /// Compare every pair. Fine for the usual ~80 particles.
    #[default]
    BruteForce,
    /// Bucket particles into cells one link distance wide.
    Grid,
}

impl ConnectorKind {
    /// Compute this frame's links, ordered by `(a, b)`.
    pub fn links(self, particles: &[Particle], threshold: f64, base_opacity: f64) -> Vec<Link> {
        match self {
            ConnectorKind::BruteForce => brute_force(particles, threshold, base_opacity),
            ConnectorKind::Grid => {
                SpatialGrid::build(particles, threshold).links(particles, base_opacity)
            }
        }
    }
}

/// Opacity of a link of the given length.
///
/// Falls linearly from `base_opacity` at distance 0 to 0 at `threshold`.
/// Anything at or beyond the threshold, or a non-positive threshold, gives 0.
pub fn link_alpha(distance: f64, threshold: f64, base_opacity: f64) -> f64 {
    if threshold.is_nan() || threshold <= 0.0 || distance >= threshold {
        return 0.0;
    }
    (1.0 - distance / threshold) * base_opacity
}

/// Link every unique pair closer than `threshold`. O(n²).
pub fn brute_force(particles: &[Particle], threshold: f64, base_opacity: f64) -> Vec<Link> {
    let mut links = Vec::new();
    if threshold.is_nan() || threshold <= 0.0 {
        return links;
    }

    for (a, first) in particles.iter().enumerate() {
        for (offset, second) in particles[a + 1..].iter().enumerate() {
            let b = a + 1 + offset;
            if let Some(link) = make_link(a, b, first, second, threshold, base_opacity) {
                links.push(link);
            }
        }
    }
    links
}

pub(crate) fn make_link(
    a: usize,
    b: usize,
    first: &Particle,
    second: &Particle,
    threshold: f64,
    base_opacity: f64,
) -> Option<Link> {
    let distance = first.position.distance(second.position);
    (distance < threshold).then(|| Link {
        a,
        b,
        distance,
        alpha: link_alpha(distance, threshold, base_opacity),
    })
}

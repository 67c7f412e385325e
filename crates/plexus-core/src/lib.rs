//! Core types shared by the plexus crates.
//!
//! Plain value types only: geometry, the particle record, and the
//! user-selectable theme and speed settings.

mod geometry;
mod particle;
mod settings;

pub use geometry::{Bounds, Vec2};
pub use particle::Particle;
pub use settings::{AnimationSpeed, ColorTheme};

//! Particle field animation.
//!
//! A fixed set of particles drifts across a bounded area, bouncing off the
//! edges, while faded lines join every pair closer than a link distance.
//! The field is an ordinary value owned by the caller: start it, feed it
//! frames through a [`Surface`], resize it, and stop it. [`ParticleField::run`]
//! drives the same steps from a [`FrameHost`] loop.

mod color;
mod connector;
mod driver;
mod stepper;
mod store;
mod surface;

pub use color::{fade, fade_with_floor};
pub use connector::{ConnectorKind, Link, SpatialGrid, brute_force, link_alpha};
pub use driver::{DriverState, FieldSettings, FrameHost, ParticleField, StopHandle};
pub use stepper::{fit_to_bounds, step};
pub use store::{SpawnParams, spawn};
pub use surface::{DrawCall, DrawList, Surface};

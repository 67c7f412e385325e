//! Drawing targets for the particle field.

use plexus_core::{Particle, Vec2};

/// Something a frame can be drawn onto.
pub trait Surface {
    /// Erase the previous frame.
    fn clear(&mut self);
    /// Draw a filled dot for `particle`.
    fn draw_particle(&mut self, particle: &Particle);
    /// Stroke a line from `from` to `to` with the given opacity.
    fn draw_link(&mut self, from: Vec2, to: Vec2, alpha: f64);
}

/// A recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Particle {
        position: Vec2,
        radius: f64,
        opacity: f64,
    },
    Link {
        from: Vec2,
        to: Vec2,
        alpha: f64,
    },
}

/// A surface that records the calls of the latest frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Particle draw calls as `(position, radius, opacity)`.
    pub fn particles(&self) -> impl Iterator<Item = (Vec2, f64, f64)> + '_ {
        self.calls.iter().filter_map(|call| match *call {
            DrawCall::Particle {
                position,
                radius,
                opacity,
            } => Some((position, radius, opacity)),
            DrawCall::Link { .. } => None,
        })
    }

    /// Link draw calls as `(from, to, alpha)`.
    pub fn links(&self) -> impl Iterator<Item = (Vec2, Vec2, f64)> + '_ {
        self.calls.iter().filter_map(|call| match *call {
            DrawCall::Link { from, to, alpha } => Some((from, to, alpha)),
            DrawCall::Particle { .. } => None,
        })
    }
}

impl Surface for DrawList {
    fn clear(&mut self) {
        self.calls.clear();
    }

    fn draw_particle(&mut self, particle: &Particle) {
        self.calls.push(DrawCall::Particle {
            position: particle.position,
            radius: particle.radius,
            opacity: particle.opacity,
        });
    }

    fn draw_link(&mut self, from: Vec2, to: Vec2, alpha: f64) {
        self.calls.push(DrawCall::Link { from, to, alpha });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_and_clears() {
        let mut list = DrawList::new();
        let p = Particle::new(Vec2::new(1.0, 2.0), Vec2::ZERO, 2.0, 0.4);
        list.draw_particle(&p);
        list.draw_link(Vec2::ZERO, Vec2::new(3.0, 4.0), 0.1);

        assert_eq!(list.calls().len(), 2);
        assert_eq!(list.particles().count(), 1);
        assert_eq!(list.links().next(), Some((Vec2::ZERO, Vec2::new(3.0, 4.0), 0.1)));

        list.clear();
        assert!(list.is_empty());
    }
}

//! Particle field lifecycle and animation loop.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use plexus_core::{Bounds, Particle};
use rand::{SeedableRng, rngs::StdRng};

use crate::connector::ConnectorKind;
use crate::stepper::{fit_to_bounds, step};
use crate::store::{SpawnParams, spawn};
use crate::surface::Surface;

/// Tuning for a particle field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    /// Number of particles spawned on start.
    pub particle_count: usize,
    /// Particles closer than this are linked.
    pub link_distance: f64,
    /// Opacity of a zero-length link.
    pub link_opacity: f64,
    /// Neighbor search used for links.
    pub connector: ConnectorKind,
    /// Ranges for spawned particles.
    pub spawn: SpawnParams,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            particle_count: 80,
            link_distance: 150.0,
            link_opacity: 0.15,
            connector: ConnectorKind::default(),
            spawn: SpawnParams::default(),
            seed: None,
        }
    }
}

/// Whether the field is animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Cancellation token for a running field.
///
/// Clones share the same flag. Stopping is one-way: once fired, the field
/// renders no further frames until it is started again, which arms a new
/// handle.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    fn fired() -> Self {
        let handle = Self::default();
        handle.stop();
        handle
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Host side of the animation loop run by [`ParticleField::run`].
pub trait FrameHost {
    type Surface: Surface;
    type Error;

    /// Wait for the next refresh. The host may resize or stop `field` here.
    ///
    /// Returns `Ok(false)` once the host no longer wants frames.
    fn begin_frame(&mut self, field: &mut ParticleField) -> Result<bool, Self::Error>;

    /// Surface for this frame, `None` while none is attached.
    fn surface(&mut self) -> Option<&mut Self::Surface>;

    /// Present what was drawn.
    fn end_frame(&mut self) -> Result<(), Self::Error>;
}

/// A field of drifting particles joined by proximity links.
#[derive(Debug)]
pub struct ParticleField {
    settings: FieldSettings,
    bounds: Bounds,
    particles: Vec<Particle>,
    state: DriverState,
    stop: StopHandle,
    rng: StdRng,
    /// Frames rendered since the last start.
    frames: u64,
}

impl ParticleField {
    /// Create a stopped field covering `bounds`.
    pub fn new(settings: FieldSettings, bounds: Bounds) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            bounds,
            particles: Vec::new(),
            state: DriverState::Stopped,
            stop: StopHandle::fired(),
            rng,
            frames: 0,
        }
    }

    /// Replace the random source used for spawning.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames rendered since the last start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn state(&self) -> DriverState {
        if self.state == DriverState::Running && self.stop.is_stopped() {
            DriverState::Stopped
        } else {
            self.state
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == DriverState::Running
    }

    /// Handle that stops the current run. A later [`start`](Self::start)
    /// arms a fresh handle, so an old one cannot stop a new run.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Spawn the particles and begin animating. No-op while running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.teardown();

        self.particles = spawn(
            self.bounds,
            self.settings.particle_count,
            &self.settings.spawn,
            &mut self.rng,
        );
        self.stop = StopHandle::default();
        self.state = DriverState::Running;
        self.frames = 0;
        tracing::info!(
            particles = self.particles.len(),
            width = self.bounds.width,
            height = self.bounds.height,
            "particle field started"
        );
    }

    /// Stop animating and drop the particles. Idempotent.
    pub fn stop(&mut self) {
        self.stop.stop();
        self.teardown();
    }

    /// Scatter a fresh set of particles without ending the current run.
    pub fn respawn(&mut self) {
        if !self.is_running() {
            return;
        }
        self.particles = spawn(
            self.bounds,
            self.settings.particle_count,
            &self.settings.spawn,
            &mut self.rng,
        );
        self.frames = 0;
        tracing::debug!(particles = self.particles.len(), "particle field respawned");
    }

    /// Change the drawable area, pulling stray particles inside.
    ///
    /// Coming back from an empty area respawns instead, since every particle
    /// was clamped onto the collapsed edge.
    pub fn resize(&mut self, width: f64, height: f64) {
        let was_empty = self.bounds.is_empty();
        self.bounds = Bounds::new(width, height);
        tracing::debug!(width = self.bounds.width, height = self.bounds.height, "field resized");
        if was_empty && !self.bounds.is_empty() {
            self.respawn();
        } else {
            fit_to_bounds(&mut self.particles, self.bounds);
        }
    }

    /// Render one frame: move every particle, then draw particles and links.
    ///
    /// Returns `false` without touching anything when the field is stopped
    /// or when no surface is attached.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: Option<&mut S>) -> bool {
        if !self.is_running() {
            self.teardown();
            return false;
        }
        let Some(surface) = surface else {
            tracing::trace!("no surface attached, skipping frame");
            return false;
        };

        step(&mut self.particles, self.bounds);

        surface.clear();
        for particle in &self.particles {
            surface.draw_particle(particle);
        }
        let links = self.settings.connector.links(
            &self.particles,
            self.settings.link_distance,
            self.settings.link_opacity,
        );
        for link in &links {
            surface.draw_link(
                self.particles[link.a].position,
                self.particles[link.b].position,
                link.alpha,
            );
        }

        self.frames += 1;
        true
    }

    /// Start the field and render frames until stopped.
    ///
    /// Each iteration waits on the host, then renders one frame. The loop
    /// ends when the stop handle fires or the host declines another frame,
    /// and the field is always left stopped. Returns the frames rendered.
    pub fn run<H: FrameHost>(&mut self, host: &mut H) -> Result<u64, H::Error> {
        self.start();
        let stop = self.stop_handle();
        let mut rendered = 0;

        let result = loop {
            if stop.is_stopped() {
                break Ok(rendered);
            }
            match host.begin_frame(self) {
                Ok(true) => {}
                Ok(false) => break Ok(rendered),
                Err(err) => break Err(err),
            }
            // The host may have stopped us while we waited.
            if stop.is_stopped() {
                break Ok(rendered);
            }
            if self.frame(host.surface()) {
                rendered += 1;
            }
            if let Err(err) = host.end_frame() {
                break Err(err);
            }
        };

        self.stop();
        tracing::info!(frames = rendered, "particle field run finished");
        result
    }

    fn teardown(&mut self) {
        if self.state == DriverState::Stopped {
            return;
        }
        self.state = DriverState::Stopped;
        self.particles = Vec::new();
        tracing::info!(frames = self.frames, "particle field stopped");
    }
}

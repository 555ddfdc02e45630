//! The field controller: owns the particles and drives them tick by tick.

use std::f64::consts::TAU;

use driftfield_config::{FieldConfig, StartOrigin};
use driftfield_core::{Particle, ParticleError, Position};
use log::{debug, trace};
use rand::Rng;

use crate::surface::Surface;

/// Size of the visible area particles wander in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn size(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

/// A collection of wandering particles plus everything needed to move and
/// draw them.
pub struct Field<R: Rng> {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: R,
}

impl<R: Rng> Field<R> {
    /// Creates an empty field.
    pub fn new(config: FieldConfig, viewport: Viewport, rng: R) -> Self {
        Self {
            config,
            viewport,
            particles: Vec::new(),
            rng,
        }
    }

    /// Creates a field and populates it from the configured count, size and origin.
    pub fn from_config(config: FieldConfig, viewport: Viewport, rng: R) -> Result<Self, ParticleError> {
        let (count, size, origin) = (config.count, config.size, config.start_origin);
        let mut field = Self::new(config, viewport, rng);
        field.generate_particles(count, size, origin)?;
        Ok(field)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Appends `count + 1` standing particles of radius `size`.
    ///
    /// Each axis is pinned to the matching `origin` coordinate when one is
    /// given and drawn uniformly from the viewport otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::InvalidRadius`] for a negative `size`.
    pub fn generate_particles(&mut self, count: u32, size: f64, origin: StartOrigin) -> Result<(), ParticleError> {
        let (width, height) = self.viewport.size();
        debug!(
            "Generating {} particles of size {} (origin {:?})",
            u64::from(count) + 1,
            size,
            origin
        );

        for _ in 0..=count {
            let x = origin.x.unwrap_or_else(|| self.rng.gen::<f64>() * width);
            let y = origin.y.unwrap_or_else(|| self.rng.gen::<f64>() * height);
            self.particles.push(Particle::new(x, y, size)?);
        }

        Ok(())
    }

    /// Tracks a new viewport size, pulling back any particle left outside it.
    ///
    /// A particle beyond the right or bottom edge is stopped and clamped onto
    /// that edge; it gets a fresh destination on the next tick.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (width, height) = viewport.size();

        let mut clamped = 0usize;
        for particle in &mut self.particles {
            let position = particle.position();
            let bounded = Position::new(position.x.min(width), position.y.min(height));
            if bounded != position {
                trace!("Clamping particle from {:?} to {:?}", position, bounded);
                particle.stop_at(bounded);
                clamped += 1;
            }
        }

        debug!(
            "Viewport resized to {}x{}, {} particles clamped",
            viewport.width, viewport.height, clamped
        );
    }

    /// Advances every particle to `timestamp_ms`, sending the ones that are
    /// standing to a new random destination.
    ///
    /// Returns how many particles were given a new destination.
    pub fn update(&mut self, timestamp_ms: f64) -> usize {
        let (width, height) = self.viewport.size();
        let min_speed = self.config.min_speed;
        let speed_spread = self.config.max_speed / 2.0;

        let mut retargeted = 0;
        for particle in &mut self.particles {
            if particle.get_position(timestamp_ms).is_none() {
                let x = self.rng.gen::<f64>() * width;
                let y = self.rng.gen::<f64>() * height;
                let speed = self.rng.gen::<f64>() * speed_spread + min_speed;
                trace!("New destination ({}, {}) at speed {}", x, y, speed);
                particle.move_to(x, y, Some(speed));
                retargeted += 1;
            }
        }
        retargeted
    }

    /// Clears the surface and draws every particle as a filled circle.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = self.viewport.size();
        surface.clear_rect(0.0, 0.0, width, height);
        surface.set_fill_style(&self.config.fill_style);

        for particle in &self.particles {
            let position = particle.position();
            surface.begin_path();
            surface.arc(position.x, position.y, particle.radius(), 0.0, TAU);
            surface.close_path();
            surface.fill();
        }
    }

    /// Runs one tick: sync the surface size, move the particles, redraw.
    pub fn animate<S: Surface + ?Sized>(&mut self, timestamp_ms: f64, surface: &mut S) {
        if surface.width() != self.viewport.width {
            surface.set_width(self.viewport.width);
        }
        if surface.height() != self.viewport.height {
            surface.set_height(self.viewport.height);
        }

        self.update(timestamp_ms);
        self.render(surface);
    }
}

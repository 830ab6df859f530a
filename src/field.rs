// The particle field: a set of slowly drifting points, and faint lines between
// the points that are close to each other. Owns its surface and redraws the
// whole thing once per frame.

use crate::config::{FieldConfig, NeighborSearch};
use crate::grid::NeighborGrid;
use crate::particle::Particle;
use crate::surface::Surface;
use crate::Timer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecmath::{vec2_square_len, vec2_sub};

pub struct ParticleField<S, R = StdRng> {
    config: FieldConfig,
    surface: S,
    particles: Vec<Particle>,
    rng: R,
    grid: Option<NeighborGrid>,
    pending_size: Option<(u32, u32)>,
    frames_rendered: u64,
}

impl<S: Surface> ParticleField<S, StdRng> {
    pub fn new(surface: S, config: FieldConfig) -> Self {
        ParticleField::with_rng(surface, config, StdRng::from_entropy())
    }
}

impl<S: Surface, R: Rng> ParticleField<S, R> {
    /// Bind to `surface` at its current size and fill it with particles.
    pub fn with_rng(surface: S, config: FieldConfig, rng: R) -> Self {
        let mut field = ParticleField {
            config,
            surface,
            particles: Vec::new(),
            rng,
            grid: None,
            pending_size: None,
            frames_rendered: 0,
        };
        field.generate_particles();
        field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Throw away the current particles and scatter a fresh set over the
    /// surface, one particle per `density_divisor` units of area.
    pub fn generate_particles(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();
        let count = self.config.particle_count(width, height);

        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(
                &mut self.rng,
                width as f64,
                height as f64,
                &self.config,
            ));
        }
        self.particles = particles;
    }

    /// Resize the surface and regenerate every particle at the new density.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.pending_size = None;
        self.generate_particles();
    }

    /// Queue a resize to be applied at the start of the next frame. Only the
    /// latest size is kept.
    pub fn request_resize(&mut self, width: u32, height: u32) {
        self.pending_size = Some((width, height));
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_size.is_some()
    }

    /// One frame: apply any queued resize, clear, move every particle, draw
    /// the particles, then draw the connectors.
    pub fn advance_and_render(&mut self) {
        let _timer = if self.config.profile {
            Some(Timer::new("ParticleField::advance_and_render"))
        } else {
            None
        };

        if let Some((width, height)) = self.pending_size.take() {
            self.on_resize(width, height);
        }

        self.surface.clear();

        let width = self.surface.width() as f64;
        let height = self.surface.height() as f64;
        for particle in &mut self.particles {
            particle.advance(width, height);
            self.surface.fill_circle(particle.pos, particle.size, particle.color);
        }

        self.draw_links(width, height);
        self.frames_rendered += 1;
    }

    fn draw_links(&mut self, width: f64, height: f64) {
        let config = &self.config;
        let particles = &self.particles;
        let surface = &mut self.surface;

        let mut link = |i: usize, j: usize| {
            let a = particles[i].pos;
            let b = particles[j].pos;
            let dist_sq = vec2_square_len(vec2_sub(a, b));
            if let Some(alpha) = config.link_alpha(dist_sq) {
                surface.stroke_line(a, b, config.link_color, alpha, config.link_width);
            }
        };

        match config.neighbor_search {
            NeighborSearch::BruteForce => {
                for i in 0..particles.len() {
                    for j in i + 1..particles.len() {
                        link(i, j);
                    }
                }
            }
            NeighborSearch::Grid => {
                let cell_size = config.link_threshold_sq.sqrt().max(1.0);
                let grid = self.grid.get_or_insert_with(|| NeighborGrid::new(cell_size));
                grid.rebuild(particles, width, height);
                grid.for_each_candidate_pair(&mut link);
            }
        }
    }
}

// Tunable constants for the particle field. Defaults reproduce the dashboard's
// background: sparse emerald/teal points joined by faint lines.

use crate::color::Color;

/// How the connector pass finds pairs of nearby particles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NeighborSearch {
    /// Check every unordered pair, O(n^2).
    BruteForce,
    /// Bucket particles into cells the size of the link distance and only
    /// check neighboring cells. Same pairs as brute force.
    Grid,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Surface area per particle. Higher value means fewer particles.
    pub density_divisor: f64,
    /// Per-axis velocity is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub palette: [Color; 2],
    /// Squared distance below which two particles get a connector.
    pub link_threshold_sq: f64,
    pub link_alpha_divisor: f64,
    pub link_max_alpha: f64,
    pub link_width: f64,
    pub link_color: Color,
    pub neighbor_search: NeighborSearch,
    /// Wrap each frame in a console timer.
    pub profile: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            density_divisor: 9000.0,
            max_speed: 0.25,
            min_radius: 0.5,
            max_radius: 2.5,
            palette: [Color::EMERALD, Color::TEAL],
            link_threshold_sq: 15000.0,
            link_alpha_divisor: 150000.0,
            link_max_alpha: 0.1,
            link_width: 0.5,
            link_color: Color::EMERALD,
            neighbor_search: NeighborSearch::BruteForce,
            profile: false,
        }
    }
}

impl FieldConfig {
    pub fn with_density_divisor(mut self, density_divisor: f64) -> Self {
        self.density_divisor = density_divisor;
        self
    }

    pub fn with_neighbor_search(mut self, neighbor_search: NeighborSearch) -> Self {
        self.neighbor_search = neighbor_search;
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    /// Number of particles for a surface of the given size,
    /// `floor(width * height / density_divisor)`.
    pub fn particle_count(&self, width: u32, height: u32) -> usize {
        if !(self.density_divisor > 0.0) {
            return 0;
        }
        let area = width as f64 * height as f64;
        (area / self.density_divisor).floor() as usize
    }

    /// Opacity of the connector between two particles at squared distance
    /// `dist_sq`, or `None` when they are too far apart to be linked.
    pub fn link_alpha(&self, dist_sq: f64) -> Option<f64> {
        if dist_sq < self.link_threshold_sq {
            Some(self.link_max_alpha - dist_sq / self.link_alpha_divisor)
        } else {
            None
        }
    }
}

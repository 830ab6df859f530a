// Uniform-grid bucketing for the connector pass.
//
// Cells are square with a side of at least the link distance, so every pair
// closer than the link distance lands in the same or an adjacent cell.

use crate::particle::Particle;

pub struct NeighborGrid {
    cell_size: f64,
    cols: usize,
    rows: usize,
    /// Particle indices sorted by cell.
    sorted_indices: Vec<usize>,
    /// Start offset in `sorted_indices` for each cell, plus one trailing end offset.
    cell_offsets: Vec<usize>,
}

impl NeighborGrid {
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell_size must be positive");
        NeighborGrid {
            cell_size,
            cols: 1,
            rows: 1,
            sorted_indices: Vec::new(),
            cell_offsets: vec![0, 0],
        }
    }

    // Particles slightly outside the surface are clamped into the border cells
    fn cell_of(&self, pos: [f64; 2]) -> (usize, usize) {
        let cx = (pos[0] / self.cell_size).floor().max(0.0).min((self.cols - 1) as f64) as usize;
        let cy = (pos[1] / self.cell_size).floor().max(0.0).min((self.rows - 1) as f64) as usize;
        (cx, cy)
    }

    /// Rebuild the buckets for the current particle positions on a
    /// `width` x `height` surface.
    pub fn rebuild(&mut self, particles: &[Particle], width: f64, height: f64) {
        self.cols = (width / self.cell_size).ceil().max(1.0) as usize;
        self.rows = (height / self.cell_size).ceil().max(1.0) as usize;
        let total_cells = self.cols * self.rows;

        let cells: Vec<usize> = particles
            .iter()
            .map(|p| {
                let (cx, cy) = self.cell_of(p.pos);
                cy * self.cols + cx
            })
            .collect();

        // counting sort by cell
        self.cell_offsets.clear();
        self.cell_offsets.resize(total_cells + 1, 0);
        for &cell in &cells {
            self.cell_offsets[cell + 1] += 1;
        }
        for c in 0..total_cells {
            self.cell_offsets[c + 1] += self.cell_offsets[c];
        }

        self.sorted_indices.clear();
        self.sorted_indices.resize(particles.len(), 0);
        let mut write_heads = self.cell_offsets.clone();
        for (i, &cell) in cells.iter().enumerate() {
            self.sorted_indices[write_heads[cell]] = i;
            write_heads[cell] += 1;
        }
    }

    fn cell(&self, cx: usize, cy: usize) -> &[usize] {
        let c = cy * self.cols + cx;
        &self.sorted_indices[self.cell_offsets[c]..self.cell_offsets[c + 1]]
    }

    /// Call `f(i, j)` once for every unordered pair of particles in the same or
    /// adjacent cells, with `i < j`. Distance filtering is left to the caller.
    pub fn for_each_candidate_pair<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        for cy in 0..self.rows {
            for cx in 0..self.cols {
                let home = self.cell(cx, cy);
                for (k, &a) in home.iter().enumerate() {
                    for &b in &home[k + 1..] {
                        f(a.min(b), a.max(b));
                    }
                }
                // Visit each neighboring cell pair once: right, and the three below
                let forward = [(1, 0), (-1, 1), (0, 1), (1, 1)];
                for &(dx, dy) in forward.iter() {
                    let nx = cx as isize + dx;
                    let ny = cy as isize + dy;
                    if nx < 0 || nx >= self.cols as isize || ny >= self.rows as isize {
                        continue;
                    }
                    let other = self.cell(nx as usize, ny as usize);
                    for &a in home {
                        for &b in other {
                            f(a.min(b), a.max(b));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::FieldConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn close_pairs_brute(particles: &[Particle], threshold_sq: f64) -> BTreeSet<(usize, usize)> {
        let mut pairs = BTreeSet::new();
        for i in 0..particles.len() {
            for j in i + 1..particles.len() {
                if vecmath::vec2_square_len(vecmath::vec2_sub(particles[i].pos, particles[j].pos)) < threshold_sq {
                    pairs.insert((i, j));
                }
            }
        }
        pairs
    }

    #[test]
    fn candidate_pairs_cover_all_close_pairs() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let (width, height) = (1280.0, 720.0);
        let particles: Vec<Particle> = (0..400)
            .map(|_| Particle::random(&mut rng, width, height, &config))
            .collect();

        let mut grid = NeighborGrid::new(config.link_threshold_sq.sqrt());
        grid.rebuild(&particles, width, height);

        let mut seen = BTreeSet::new();
        grid.for_each_candidate_pair(|i, j| {
            assert!(i < j);
            assert!(seen.insert((i, j)), "pair ({}, {}) visited twice", i, j);
        });

        let close: BTreeSet<_> = seen
            .into_iter()
            .filter(|&(i, j)| {
                vecmath::vec2_square_len(vecmath::vec2_sub(particles[i].pos, particles[j].pos))
                    < config.link_threshold_sq
            })
            .collect();
        assert_eq!(close, close_pairs_brute(&particles, config.link_threshold_sq));
    }

    #[test]
    fn out_of_bounds_particles_land_in_border_cells() {
        let particles = vec![
            Particle::new(-0.2, -0.2, 0.0, 0.0, 1.0, Color::TEAL),
            Particle::new(0.5, 0.5, 0.0, 0.0, 1.0, Color::TEAL),
            Particle::new(300.1, 200.1, 0.0, 0.0, 1.0, Color::TEAL),
            Particle::new(299.5, 199.5, 0.0, 0.0, 1.0, Color::TEAL),
        ];
        let mut grid = NeighborGrid::new(100.0);
        grid.rebuild(&particles, 300.0, 200.0);

        let mut pairs = Vec::new();
        grid.for_each_candidate_pair(|i, j| pairs.push((i, j)));
        assert!(pairs.contains(&(0, 1)));
        assert!(pairs.contains(&(2, 3)));
        assert!(!pairs.contains(&(0, 2)));
    }

    #[test]
    fn empty_and_degenerate_surfaces() {
        let mut grid = NeighborGrid::new(50.0);
        grid.rebuild(&[], 0.0, 0.0);
        let mut count = 0;
        grid.for_each_candidate_pair(|_, _| count += 1);
        assert_eq!(count, 0);
    }
}

use glitter_field::{Color, DrawCall, FieldConfig, NeighborSearch, Particle, ParticleField, RecordingSurface, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field(width: u32, height: u32, config: FieldConfig, seed: u64) -> ParticleField<RecordingSurface> {
    ParticleField::with_rng(
        RecordingSurface::new(width, height),
        config,
        StdRng::seed_from_u64(seed),
    )
}

// A particle that crossed an edge this frame is still past it by at most one
// frame of travel; it turns back on the next.
fn assert_inside(field: &ParticleField<RecordingSurface>) {
    let slack = field.config().max_speed;
    let width = field.surface().width() as f64;
    let height = field.surface().height() as f64;
    for p in field.particles() {
        assert!(p.pos[0] >= -slack && p.pos[0] <= width + slack, "x {} outside 0..{}", p.pos[0], width);
        assert!(p.pos[1] >= -slack && p.pos[1] <= height + slack, "y {} outside 0..{}", p.pos[1], height);
        if p.pos[0] < 0.0 || p.pos[0] > width {
            assert!((p.pos[0] < 0.0) == (p.vel[0] > 0.0), "x {} not heading back", p.pos[0]);
        }
        if p.pos[1] < 0.0 || p.pos[1] > height {
            assert!((p.pos[1] < 0.0) == (p.vel[1] > 0.0), "y {} not heading back", p.pos[1]);
        }
    }
}

#[test]
fn thousand_frames_on_900_by_300() {
    let mut field = field(900, 300, FieldConfig::default(), 2024);
    assert_eq!(field.particles().len(), 30);

    for _ in 0..1000 {
        field.surface_mut().take_calls();
        field.advance_and_render();
        assert_eq!(field.surface().circles().count(), 30);
    }

    assert_eq!(field.frames_rendered(), 1000);
    assert_eq!(field.particles().len(), 30);
    assert_inside(&field);
}

#[test]
fn long_run_with_grid_search_keeps_particles_home() {
    let config = FieldConfig::default().with_neighbor_search(NeighborSearch::Grid);
    let mut field = field(1280, 720, config, 99);
    for _ in 0..3000 {
        field.surface_mut().take_calls();
        field.advance_and_render();
        for call in field.surface().lines() {
            if let DrawCall::Line { alpha, .. } = call {
                assert!(*alpha > 0.0 && *alpha <= 0.1);
            }
        }
    }
    assert_inside(&field);
}

#[test]
fn count_matches_floor_of_area_over_divisor() {
    for &(width, height) in &[(0, 0), (1, 1), (90, 100), (95, 95), (1366, 768), (3840, 2160)] {
        let f = field(width, height, FieldConfig::default(), 1);
        let expected = (width as u64 * height as u64 / 9000) as usize;
        assert_eq!(f.particles().len(), expected, "{}x{}", width, height);
    }
}

#[test]
fn resizing_through_zero_area_and_back() {
    let mut field = field(900, 300, FieldConfig::default(), 5);

    field.request_resize(0, 0);
    field.advance_and_render();
    assert!(field.particles().is_empty());
    assert_eq!(field.surface().calls().last(), Some(&DrawCall::Clear));

    field.on_resize(450, 600);
    assert_eq!(field.particles().len(), 30);
    field.advance_and_render();
    assert_inside(&field);
}

#[test]
fn fast_particle_reflects_once_per_crossing() {
    let mut field = field(200, 200, FieldConfig::default(), 0);
    for p in field.particles_mut().iter_mut() {
        *p = Particle::new(100.0, 100.0, 0.0, 0.0, 1.0, Color::TEAL);
    }
    field.particles_mut()[0] = Particle::new(199.0, 1.0, 3.0, -3.0, 1.0, Color::EMERALD);

    field.advance_and_render();
    let p = field.particles()[0];
    // one frame outside the surface, heading back in on both axes
    assert_eq!(p.pos, [202.0, -2.0]);
    assert_eq!(p.vel, [-3.0, 3.0]);

    field.advance_and_render();
    let p = field.particles()[0];
    assert_eq!(p.pos, [199.0, 1.0]);
    assert_eq!(p.vel, [-3.0, 3.0]);
}

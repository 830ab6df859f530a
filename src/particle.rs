// Simple particle struct to keep track of individual position, velocity, size and color

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::{vec2_add, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            color,
        }
    }

    // Uniformly placed somewhere on a width x height surface, with speed, size and
    // palette color drawn from the config ranges
    pub fn random<R: Rng>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let size = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
        let color = if rng.gen_bool(0.5) {
            config.palette[0]
        } else {
            config.palette[1]
        };
        Particle::new(pos_x, pos_y, vel_x, vel_y, size, color)
    }

    // One Euler step, then bounce off the edges. Each axis is checked once and the
    // position is not clamped, so a particle can sit past an edge for one frame.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.pos = vec2_add(self.pos, self.vel);
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }
    }
}

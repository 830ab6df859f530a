#[macro_use]
mod utils;

pub mod color;
pub mod config;
pub mod field;
pub mod frame_loop;
pub mod grid;
pub mod particle;
pub mod renderer;
pub mod surface;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use color::Color;
pub use config::{FieldConfig, NeighborSearch};
pub use field::ParticleField;
pub use frame_loop::FrameLoop;
pub use particle::Particle;
pub use renderer::CanvasRenderer;
pub use surface::{DrawCall, RecordingSurface, Surface};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Console timer that reports how long it was alive
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Handle given to the page for the running background animation
#[wasm_bindgen]
pub struct ParticleBackground {
    frame_loop: FrameLoop,
}

#[wasm_bindgen]
impl ParticleBackground {
    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn frames_rendered(&self) -> f64 {
        self.frame_loop.frames_rendered() as f64
    }

    pub fn particle_count(&self) -> u32 {
        self.frame_loop.particle_count() as u32
    }
}

/// Start the background on the canvas with id `canvas_id`, sized to the
/// viewport. Throws if the canvas or its 2d context can't be found.
#[wasm_bindgen]
pub fn start_background(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
    start_with_config(canvas_id, FieldConfig::default())
}

#[wasm_bindgen]
pub fn start_background_with_density(
    canvas_id: &str,
    density_divisor: f64,
) -> Result<ParticleBackground, JsValue> {
    start_with_config(canvas_id, FieldConfig::default().with_density_divisor(density_divisor))
}

#[wasm_bindgen]
pub fn start_background_with_options(
    canvas_id: &str,
    density_divisor: f64,
    grid_search: bool,
    profile: bool,
) -> Result<ParticleBackground, JsValue> {
    let neighbor_search = if grid_search {
        NeighborSearch::Grid
    } else {
        NeighborSearch::BruteForce
    };
    let config = FieldConfig::default()
        .with_density_divisor(density_divisor)
        .with_neighbor_search(neighbor_search)
        .with_profile(profile);
    start_with_config(canvas_id, config)
}

pub fn start_with_config(canvas_id: &str, config: FieldConfig) -> Result<ParticleBackground, JsValue> {
    utils::set_panic_hook();
    let renderer = CanvasRenderer::from_element_id(canvas_id)?;
    let frame_loop = FrameLoop::start(renderer, config)?;
    Ok(ParticleBackground { frame_loop })
}

// Renderer struct that draws the particle field onto a 2d canvas. Grabs the
// canvas from the DOM, holds on to its 2d context, and implements Surface on top
// of the context's path API.

use crate::color::Color;
use crate::surface::Surface;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
    // Last fill color set on the context, so runs of same-colored particles
    // don't rebuild the style string
    fill_color: Option<Color>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("context is not a CanvasRenderingContext2d"))?;

        Ok(CanvasRenderer {
            canvas,
            context,
            fill_color: None,
        })
    }

    // Looks up the canvas element by id on the current document
    pub fn from_element_id(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no global window"))?
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element '{}' is not a canvas", canvas_id)))?;

        CanvasRenderer::new(canvas)
    }
}

impl Surface for CanvasRenderer {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        // resizing resets the context state
        self.fill_color = None;
    }

    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.context.begin_path();
        // arc only throws for a negative radius
        self.context
            .arc(center[0], center[1], radius.max(0.0), 0.0, PI * 2.0)
            .ok();
        if self.fill_color != Some(color) {
            self.context.set_fill_style_str(&color.to_css_hex());
            self.fill_color = Some(color);
        }
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64) {
        self.context.set_stroke_style_str(&color.to_css_rgba(alpha));
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}

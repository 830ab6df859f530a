// The 2D drawing surface the particle field renders onto.
//
// CanvasRenderer draws to a browser canvas; RecordingSurface keeps the draw
// calls in memory so the field can run headless.

use crate::color::Color;
use vecmath::Vector2;

/// Minimal set of 2D drawing operations the field needs.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Resize the drawing buffer. Contents are discarded.
    fn set_size(&mut self, width: u32, height: u32);
    /// Clear the whole surface.
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color);
    /// Stroke a straight line. `alpha` is the opacity of the stroke color.
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle {
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    },
    Line {
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    },
}

/// Headless surface that records every draw call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingSurface {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drain the recorded calls, e.g. between frames.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
    }
}

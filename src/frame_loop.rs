// Drives a ParticleField from the browser: one `advance_and_render` per
// `requestAnimationFrame`, and a window `resize` listener that queues the new
// viewport size for the next frame.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::renderer::CanvasRenderer;
use crate::surface::Surface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameLoop {
    field: Rc<RefCell<ParticleField<CanvasRenderer>>>,
    running: Rc<Cell<bool>>,
    request_id: Rc<Cell<Option<i32>>>,
    frame_cb: FrameCallback,
    resize_cb: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl FrameLoop {
    /// Size the canvas to the viewport, fill it with particles and start
    /// animating. Fails if there is no window or the listeners can't be set up.
    pub fn start(mut renderer: CanvasRenderer, config: FieldConfig) -> Result<FrameLoop, JsValue> {
        let window = window()?;
        let (width, height) = viewport_size(&window);
        renderer.set_size(width, height);

        let field = Rc::new(RefCell::new(ParticleField::new(renderer, config)));
        log!(
            "particle field: {}x{}, {} particles",
            width,
            height,
            field.borrow().particles().len()
        );

        let resize_field = field.clone();
        let resize_cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                let (width, height) = viewport_size(&window);
                resize_field.borrow_mut().request_resize(width, height);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

        let running = Rc::new(Cell::new(true));
        let request_id = Rc::new(Cell::new(None));
        let frame_cb: FrameCallback = Rc::new(RefCell::new(None));

        let f = frame_cb.clone();
        let frame_field = field.clone();
        let frame_running = running.clone();
        let frame_request = request_id.clone();
        *frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_request.set(None);
            if !frame_running.get() {
                return;
            }
            frame_field.borrow_mut().advance_and_render();
            match request_frame(&f) {
                Ok(id) => frame_request.set(Some(id)),
                Err(e) => {
                    web_sys::console::error_2(&"particle field: could not schedule frame".into(), &e);
                    frame_running.set(false);
                }
            }
        }) as Box<dyn FnMut()>));

        // built before the first request so a failure still unhooks resize on drop
        let frame_loop = FrameLoop {
            field,
            running,
            request_id,
            frame_cb,
            resize_cb: Some(resize_cb),
        };
        let id = request_frame(&frame_loop.frame_cb)?;
        frame_loop.request_id.set(Some(id));
        Ok(frame_loop)
    }

    pub fn field(&self) -> &Rc<RefCell<ParticleField<CanvasRenderer>>> {
        &self.field
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.field.borrow().frames_rendered()
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }

    /// Cancel the pending frame, unsubscribe from resize and release the
    /// callbacks. Safe to call more than once.
    pub fn stop(&mut self) {
        let was_running = self.running.replace(false);

        if let Some(window) = web_sys::window() {
            if let Some(id) = self.request_id.take() {
                window.cancel_animation_frame(id).ok();
            }
            if let Some(resize_cb) = self.resize_cb.as_ref() {
                window
                    .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .ok();
            }
        }
        self.resize_cb = None;
        // breaks the closure -> Rc -> closure cycle
        self.frame_cb.borrow_mut().take();

        if was_running {
            log!("particle field stopped after {} frames", self.frames_rendered());
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn request_frame(frame_cb: &FrameCallback) -> Result<i32, JsValue> {
    let frame_cb = frame_cb.borrow();
    let closure = frame_cb
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback released"))?;
    let function: &js_sys::Function = closure.as_ref().unchecked_ref();
    window()?.request_animation_frame(function)
}

/// Current `innerWidth` x `innerHeight` of the window.
pub fn viewport_size(window: &Window) -> (u32, u32) {
    let width = to_dimension(window.inner_width().ok().and_then(|v| v.as_f64()));
    let height = to_dimension(window.inner_height().ok().and_then(|v| v.as_f64()));
    (width, height)
}

// Negative, NaN or missing sizes become an empty surface
fn to_dimension(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::to_dimension;

    #[test]
    fn viewport_dimensions_are_sanitized() {
        assert_eq!(to_dimension(Some(1280.0)), 1280);
        assert_eq!(to_dimension(Some(799.6)), 799);
        assert_eq!(to_dimension(Some(0.0)), 0);
        assert_eq!(to_dimension(Some(-5.0)), 0);
        assert_eq!(to_dimension(Some(f64::NAN)), 0);
        assert_eq!(to_dimension(Some(f64::INFINITY)), 0);
        assert_eq!(to_dimension(None), 0);
    }
}

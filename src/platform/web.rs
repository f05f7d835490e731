//! wasm-bindgen surface for browser hosts
//!
//! The JS side forwards layout and pointer callbacks, calls `frame` from
//! `requestAnimationFrame`, and applies the returned style to its element.

use glam::Vec2;
use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::config::BoxConfig;
use crate::sim::{self, FloatingBox, InputEvent, TickInput};

#[wasm_bindgen]
pub struct WasmFloatingBox {
    inner: FloatingBox,
    pending: TickInput,
}

#[wasm_bindgen]
impl WasmFloatingBox {
    /// Create a box from a JSON configuration (empty string for defaults).
    /// `on_destroy` is called once when the box has faded out.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, on_destroy: Function) -> Result<WasmFloatingBox, JsValue> {
        super::init_logging();

        let config = if config_json.trim().is_empty() {
            BoxConfig::default()
        } else {
            BoxConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let inner = FloatingBox::new(config).with_on_destroy(move || {
            if let Err(e) = on_destroy.call0(&JsValue::NULL) {
                log::error!("onDestroy threw: {:?}", e);
            }
        });
        Ok(Self {
            inner,
            pending: TickInput::default(),
        })
    }

    pub fn on_box_layout(&mut self, width: f32, height: f32) {
        self.pending.events.push(InputEvent::BoxLayout { width, height });
    }

    pub fn on_container_layout(&mut self, width: f32, height: f32) {
        self.pending
            .events
            .push(InputEvent::ContainerLayout { width, height });
    }

    pub fn on_gesture_start(&mut self) {
        self.pending.events.push(InputEvent::GestureStart);
    }

    pub fn on_gesture_update(&mut self, translation_x: f32, translation_y: f32) {
        self.pending.events.push(InputEvent::GestureUpdate {
            translation: Vec2::new(translation_x, translation_y),
        });
    }

    pub fn on_gesture_end(&mut self, velocity_x: f32, velocity_y: f32) {
        self.pending.events.push(InputEvent::GestureEnd {
            velocity: Vec2::new(velocity_x, velocity_y),
        });
    }

    /// Advance one frame (`dt` in seconds) and return
    /// `[x, y, opacity, scale, overlay_opacity]`.
    pub fn frame(&mut self, dt: f32) -> Vec<f32> {
        let input = std::mem::take(&mut self.pending);
        sim::tick(&mut self.inner, &input, dt);

        let style = self.inner.style();
        vec![
            style.position.x,
            style.position.y,
            style.opacity,
            style.scale,
            style.overlay_opacity,
        ]
    }

    /// Overlay colour as `[r, g, b, a]` in 0..1
    pub fn overlay_color(&self) -> Vec<f32> {
        self.inner.config().destroy_overlay_color.to_vec()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.is_destroyed()
    }
}

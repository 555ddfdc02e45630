//! Browser bindings: a `<canvas>` surface and a field page script can drive.
//!
//! ```js
//! const field = new WebField(canvas, window.innerWidth, window.innerHeight);
//! window.addEventListener('resize', () => field.resize(window.innerWidth, window.innerHeight));
//! const tick = (time) => { field.frame(time); requestAnimationFrame(tick); };
//! requestAnimationFrame(tick);
//! ```

use driftfield_config::FieldConfig;
use log::{warn, Level, LevelFilter, Log, Metadata, Record};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::field::{Field, Viewport};
use crate::surface::Surface;

/// Forwards `log` records to the browser's devtools console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}: {}", record.level(), record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger at `Info` and routes panics to `console.error`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// [`Surface`] backed by a canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_width(&mut self, width: u32) {
        self.canvas.set_width(width);
    }

    fn set_height(&mut self, height: u32) {
        self.canvas.set_height(height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.context.set_fill_style_str(style);
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        // Only fails for a negative radius, which particles never have
        if let Err(err) = self.context.arc(x, y, radius, start_angle, end_angle) {
            warn!("Canvas arc failed: {:?}", err);
        }
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self) {
        self.context.fill();
    }
}

#[wasm_bindgen]
pub struct WebField {
    field: Field<StdRng>,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WebField {
    /// Creates a field with the built-in preset.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, width: u32, height: u32) -> Result<WebField, JsValue> {
        Self::build(canvas, width, height, FieldConfig::default())
    }

    /// Creates a field from a JSON settings document.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas: HtmlCanvasElement, width: u32, height: u32, config: &str) -> Result<WebField, JsValue> {
        let config = FieldConfig::from_json_str(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(canvas, width, height, config)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.field.resize(Viewport::new(width, height));
    }

    /// Runs one tick; `timestamp` is the animation-frame time in milliseconds.
    pub fn frame(&mut self, timestamp: f64) {
        self.field.animate(timestamp, &mut self.surface);
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.field.particles().len()
    }
}

impl WebField {
    fn build(canvas: HtmlCanvasElement, width: u32, height: u32, config: FieldConfig) -> Result<WebField, JsValue> {
        init_logging();
        let surface = CanvasSurface::new(canvas)?;
        let field = Field::from_config(config, Viewport::new(width, height), StdRng::from_entropy())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebField { field, surface })
    }
}

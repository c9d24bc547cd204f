use log::{Level, LevelFilter, Log, Metadata, Record};
use morph_core::driver::FrameDriver;
use morph_core::particle::Particle;
use morph_core::stats::StepStats;
use morph_core::{MorphParams, ShapeId};
use wasm_bindgen::prelude::*;

/// Forwards `log` records from the core crate to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from(format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger once; later calls are no-ops.
fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

#[wasm_bindgen]
pub struct MorphWorld {
    driver: FrameDriver,
    pixels: Vec<u8>,
    last_step_start: Option<f64>,
}

#[wasm_bindgen]
impl MorphWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize) -> Result<MorphWorld, JsError> {
        init_logging();
        web_sys::console::log_1(
            &format!("WASM MorphWorld created: {} particles", particle_count).into(),
        );

        let params = MorphParams {
            particle_count,
            ..MorphParams::default()
        };
        let driver = FrameDriver::new(params)?;
        Ok(MorphWorld {
            driver,
            pixels: Vec::new(),
            last_step_start: None,
        })
    }

    /// Rebuild the particle store. The old store survives a failure.
    #[wasm_bindgen]
    pub fn reconfigure(&mut self, particle_count: usize) -> Result<(), JsError> {
        self.driver.reconfigure(particle_count)?;
        self.last_step_start = None;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_params(
        &mut self,
        shape: u32,
        growth_factor: f32,
        complexity: f32,
        morph_speed: f32,
        rotation_speed: f32,
    ) {
        self.driver.update_params(|p| {
            p.shape = shape;
            p.growth_factor = growth_factor;
            p.complexity = complexity;
            p.morph_speed = morph_speed;
            p.rotation_speed = rotation_speed;
        });
    }

    /// Resize the drawable area. Attaches or resizes the software framebuffer.
    #[wasm_bindgen]
    pub fn set_screen_size(&mut self, width: u32, height: u32) -> Result<(), JsError> {
        let unchanged = self
            .driver
            .framebuffer()
            .is_some_and(|fb| fb.width() == width && fb.height() == height);
        if unchanged {
            return Ok(());
        }
        self.driver.enable_framebuffer(width, height)?;
        Ok(())
    }

    /// Run one frame. Returns the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32, time: f32) -> f32 {
        let start = js_sys::Date::now();
        let uniforms = self.driver.frame_at(time, dt);
        let elapsed = js_sys::Date::now() - start;

        let interval = self.last_step_start.map_or(0.0, |prev| start - prev);
        self.last_step_start = Some(start);
        self.driver.record_timing(StepStats {
            simulate_ms: elapsed as f32,
            composite_ms: 0.0,
            interval_ms: interval as f32,
            particle_count: uniforms.particle_count,
        });
        elapsed as f32
    }

    /// Pointer to the particle array, 14 floats per particle.
    #[wasm_bindgen]
    pub fn get_particle_buffer_ptr(&self) -> *const f32 {
        let floats: &[f32] = bytemuck::cast_slice(self.driver.particles());
        floats.as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_particle_buffer_byte_length(&self) -> usize {
        self.driver.particles().len() * std::mem::size_of::<Particle>()
    }

    /// Convert the framebuffer to RGBA8 for `putImageData`.
    ///
    /// `step` already composited the frame; this only exports it.
    #[wasm_bindgen]
    pub fn composite(&mut self) {
        match self.driver.framebuffer() {
            Some(framebuffer) => framebuffer.write_rgba8(&mut self.pixels),
            None => self.pixels.clear(),
        }
    }

    #[wasm_bindgen]
    pub fn get_pixel_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_pixel_byte_length(&self) -> usize {
        self.pixels.len()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.driver.particles().len()
    }

    /// Frames per second measured from the spacing of `step` calls.
    #[wasm_bindgen]
    pub fn fps(&self) -> f32 {
        self.driver.stats().fps()
    }

    #[wasm_bindgen]
    pub fn shape_name(&self) -> String {
        ShapeId::from_raw(self.driver.params().shape)
            .name()
            .to_string()
    }
}

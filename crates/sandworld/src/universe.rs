//! Browser-facing wrapper: a world, its random source, a brush and a frame buffer.

use wasm_bindgen::prelude::*;

use crate::brush::{Brush, BrushKind};
use crate::config::WorldConfig;
use crate::error::ConfigError;
use crate::render::{draw_world, RgbaBuffer};
use crate::rng::{seeded, SimRng};
use crate::square::Square;
use crate::World;

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    world: World,
    rng: SimRng,
    brush: Brush,
    frame: RgbaBuffer,
}

impl Universe {
    pub fn with_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        let world = World::from_config(config)?;
        let frame = RgbaBuffer::for_world(&world);
        let mut universe = Self {
            world,
            rng: seeded(config.seed),
            brush: Brush::default(),
            frame,
        };
        universe.render();
        Ok(universe)
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn frame(&self) -> &RgbaBuffer {
        &self.frame
    }

    fn render(&mut self) {
        draw_world(&self.world, &mut self.frame);
    }
}

#[wasm_bindgen]
impl Universe {
    /// # Panics
    /// If either dimension is zero.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(width: u32, height: u32) -> Universe {
        let config = WorldConfig::with_size(width as usize, height as usize);
        match Self::with_config(&config) {
            Ok(universe) => universe,
            Err(err) => panic!("{err}"),
        }
    }

    /// Build from a RON [`WorldConfig`] document.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config_ron(text: &str) -> Result<Universe, JsError> {
        let config = WorldConfig::from_ron(text)?;
        Ok(Self::with_config(&config)?)
    }

    /// Advance one frame and refresh the pixel buffer.
    pub fn tick(&mut self, dt: f32) {
        self.world.tick(dt, &mut self.rng);
        self.render();
    }

    /// Paint with the current brush at a cursor position in `[0, 1]` fractions of the
    /// world size. Returns how many squares were written.
    pub fn paint(&mut self, fx: f32, fy: f32) -> u32 {
        let painted = self
            .brush
            .paint_normalized(&mut self.world, fx, fy, &mut self.rng);
        painted as u32
    }

    /// Write one square: 0 sand, 1 water, 2 dirt, 3 powder, anything else erases.
    pub fn set_cell(&mut self, x: i32, y: i32, kind: u8) {
        if !self.world.is_valid_square(x, y) {
            return;
        }
        let square = match BrushKind::from_index(kind) {
            Some(kind) => kind.square(&mut self.rng),
            None => Square::air(),
        };
        self.world.set_square(x, y, square);
    }

    #[wasm_bindgen(js_name = cycleBrush)]
    pub fn cycle_brush(&mut self) {
        self.brush.cycle();
    }

    #[wasm_bindgen(js_name = brushName)]
    #[must_use]
    pub fn brush_name(&self) -> String {
        self.brush.kind.to_string()
    }

    /// Clamped to `0..=max(width, height)`; a larger disc covers nothing more.
    #[wasm_bindgen(js_name = setBrushRadius)]
    pub fn set_brush_radius(&mut self, radius: i32) {
        let limit = self.world.width().max(self.world.height()) as i32;
        self.brush.radius = radius.clamp(0, limit);
    }

    pub fn clear(&mut self) {
        self.world.clear();
        self.render();
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.world.width() as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.world.height() as u32
    }

    /// Cells inside the current active region.
    #[wasm_bindgen(js_name = activeCells)]
    #[must_use]
    pub fn active_cells(&self) -> u32 {
        self.world.active_region().area() as u32
    }

    /// Pointer to `width * height` RGBA pixels in linear memory, top row first.
    #[wasm_bindgen(js_name = pixelsPtr)]
    #[must_use]
    pub fn pixels_ptr(&self) -> *const u8 {
        self.frame.as_bytes().as_ptr()
    }
}

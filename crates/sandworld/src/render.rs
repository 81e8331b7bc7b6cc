//! Copies square colors into a texture. Row 0 of the world is the bottom row of the image.

use crate::color::Color;
use crate::material::BACKGROUND;
use crate::World;

/// Anything that can take one color per pixel, e.g. a GPU texture staging buffer.
pub trait PixelSink {
    fn set_pixel(&mut self, x: usize, y: usize, color: Color);
}

/// Tightly packed RGBA8 image, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaBuffer {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    #[must_use]
    pub fn for_world(world: &World) -> Self {
        Self::new(world.width(), world.height())
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let i = (y * self.width + x) * 4;
        let [r, g, b, a] = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
        Color { r, g, b, a }
    }
}

impl PixelSink for RgbaBuffer {
    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&color.to_rgba());
    }
}

/// Color drawn for a square: its own color when occupied, the background otherwise.
#[must_use]
pub fn display_color(world: &World, x: i32, y: i32) -> Color {
    let square = world.square(x, y);
    if square.is_occupied {
        square.color
    } else {
        BACKGROUND
    }
}

/// Write every square of `world` into `sink`, flipping y so the floor is at the bottom.
pub fn draw_world<S: PixelSink + ?Sized>(world: &World, sink: &mut S) {
    let height = world.height();
    for y in 0..height {
        for x in 0..world.width() {
            sink.set_pixel(x, height - 1 - y, display_color(world, x as i32, y as i32));
        }
    }
}

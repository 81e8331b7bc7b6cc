//! Circular paint brush turning a cursor position into square writes.

use std::fmt;

use glam::Vec2;

use crate::behaviors::Behavior;
use crate::color::Color;
use crate::material::{DIRT, SAND, SAND_COLORS, WATER, WATER_COLOR};
use crate::rng::WorldRng;
use crate::square::Square;
use crate::World;

/// Downward speed freshly painted sand and water start with, in squares per second.
pub const PAINT_FALL_SPEED: f32 = 50.0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum BrushKind {
    #[default]
    Sand,
    Water,
    Dirt,
    /// Sand moved by [`Behavior::PowderPhysics`].
    Powder,
}

impl BrushKind {
    pub const ALL: [BrushKind; 4] = [Self::Sand, Self::Water, Self::Dirt, Self::Powder];

    /// Kind for a numeric id coming from the JS side: 0 sand, 1 water, 2 dirt, 3 powder.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The kind after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Sand => Self::Water,
            Self::Water => Self::Dirt,
            Self::Dirt => Self::Powder,
            Self::Powder => Self::Sand,
        }
    }

    /// A fresh square of this kind. Colors vary per square.
    pub fn square<R: WorldRng + ?Sized>(self, rng: &mut R) -> Square {
        let falling = Vec2::new(0.0, -PAINT_FALL_SPEED);
        match self {
            Self::Sand => Square::filled(&SAND, Behavior::FallingPhysics, sand_color(rng))
                .with_velocity(falling),
            Self::Water => {
                Square::filled(&WATER, Behavior::LiquidPhysics, WATER_COLOR).with_velocity(falling)
            }
            Self::Dirt => Square::filled(
                &DIRT,
                Behavior::Stationary,
                Color::new(
                    rng.gen_range_u8(30, 60),
                    rng.gen_range_u8(30, 60),
                    rng.gen_range_u8(30, 60),
                ),
            ),
            Self::Powder => Square::filled(&SAND, Behavior::PowderPhysics, sand_color(rng))
                .with_velocity(falling),
        }
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sand => write!(f, "Sand"),
            Self::Water => write!(f, "Water"),
            Self::Dirt => write!(f, "Dirt"),
            Self::Powder => write!(f, "Powder"),
        }
    }
}

fn sand_color<R: WorldRng + ?Sized>(rng: &mut R) -> Color {
    let i = (rng.gen_f32() * SAND_COLORS.len() as f32) as usize;
    SAND_COLORS[i.min(SAND_COLORS.len() - 1)]
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Brush {
    pub kind: BrushKind,
    pub radius: i32,
    /// Chance that each empty cell under the brush gets painted.
    pub density: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            kind: BrushKind::default(),
            radius: 10,
            density: 0.7,
        }
    }
}

impl Brush {
    pub fn cycle(&mut self) {
        self.kind = self.kind.next();
        log::debug!("changed brush type to {}", self.kind);
    }

    /// Paint a disc centred on `(cx, cy)`. Only empty cells inside the grid are written.
    /// Returns the number of squares painted.
    pub fn paint<R: WorldRng + ?Sized>(
        &self,
        world: &mut World,
        cx: i32,
        cy: i32,
        rng: &mut R,
    ) -> usize {
        // i64 so neither the disc test nor the window bounds can overflow.
        let r = i64::from(self.radius.max(0));
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let (width, height) = (world.width() as i64, world.height() as i64);

        let mut painted = 0;
        for y in (cy - r).max(0)..=(cy + r).min(height - 1) {
            for x in (cx - r).max(0)..=(cx + r).min(width - 1) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (x as i32, y as i32);
                if world.square(x, y).is_occupied {
                    continue;
                }
                if rng.check_probability(self.density) {
                    world.set_square(x, y, self.kind.square(rng));
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Paint at a cursor position given as fractions of the world's width and height.
    pub fn paint_normalized<R: WorldRng + ?Sized>(
        &self,
        world: &mut World,
        fx: f32,
        fy: f32,
        rng: &mut R,
    ) -> usize {
        let x = (fx * world.width() as f32) as i32;
        let y = (fy * world.height() as f32) as i32;
        self.paint(world, x, y, rng)
    }
}

//! Static physical properties shared by every square made of the same stuff.
//!
//! Movement is chosen by a square's [`crate::Behavior`], not by its material, so
//! the built-in behaviors read only `mass`, `max_speed` and `is_rigid`. The phase
//! queries and `friction` describe the material for painting tools, renderers
//! and custom behaviors.

use std::fmt;

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Phase of matter. A material normally has exactly one bit set.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct PhaseOfMatter: u8 {
        const SOLID = 0x1;
        const LIQUID = 0x2;
        const GAS = 0x4;
        const POWDER = 0x8;
    }
}

/// Physical properties of a material. Squares point at `'static` instances of this.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Material {
    pub name: &'static str,
    /// Heavier materials sink through lighter, non-rigid ones.
    pub mass: f32,
    /// Surface friction of the material. Powder sliding uses the world-wide
    /// [`crate::PowderTuning`] coefficient instead.
    pub friction: f32,
    /// Terminal velocity, in squares per second.
    pub max_speed: f32,
    /// Rigid materials are never moved or displaced.
    pub is_rigid: bool,
    pub phase_of_matter: PhaseOfMatter,
}

impl Material {
    /// Defaults every built-in material starts from.
    pub const BASE: Material = Material {
        name: "unnamed",
        mass: 1.0,
        friction: 0.5,
        max_speed: 250.0,
        is_rigid: false,
        phase_of_matter: PhaseOfMatter::SOLID,
    };

    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.phase_of_matter.contains(PhaseOfMatter::SOLID)
    }

    #[must_use]
    pub const fn is_liquid(&self) -> bool {
        self.phase_of_matter.contains(PhaseOfMatter::LIQUID)
    }

    #[must_use]
    pub const fn is_gas(&self) -> bool {
        self.phase_of_matter.contains(PhaseOfMatter::GAS)
    }

    #[must_use]
    pub const fn is_powder(&self) -> bool {
        self.phase_of_matter.contains(PhaseOfMatter::POWDER)
    }

    #[must_use]
    pub const fn is_solid_or_powder(&self) -> bool {
        self.phase_of_matter
            .intersects(PhaseOfMatter::SOLID.union(PhaseOfMatter::POWDER))
    }

    #[must_use]
    pub const fn is_liquid_or_gas(&self) -> bool {
        self.phase_of_matter
            .intersects(PhaseOfMatter::LIQUID.union(PhaseOfMatter::GAS))
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub static AIR: Material = Material {
    name: "air",
    phase_of_matter: PhaseOfMatter::GAS,
    ..Material::BASE
};

pub static SAND: Material = Material {
    name: "sand",
    mass: 2.0,
    phase_of_matter: PhaseOfMatter::POWDER,
    ..Material::BASE
};

pub static WATER: Material = Material {
    name: "water",
    mass: 1.5,
    phase_of_matter: PhaseOfMatter::LIQUID,
    ..Material::BASE
};

pub static DIRT: Material = Material {
    name: "dirt",
    mass: 3.0,
    is_rigid: true,
    ..Material::BASE
};

pub const SAND_COLORS: [Color; 4] = [
    Color::new(204, 171, 114),
    Color::new(200, 168, 113),
    Color::new(179, 149, 100),
    Color::new(179, 149, 100),
];

pub const WATER_COLOR: Color = Color::new(0, 0, 255);

/// Drawn wherever a square is unoccupied.
pub const BACKGROUND: Color = Color::new(240, 228, 228);

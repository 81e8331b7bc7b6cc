//! Per-cell state of the simulation grid.

use std::fmt;

use glam::Vec2;

use crate::behaviors::Behavior;
use crate::color::Color;
use crate::material::{Material, AIR};

/// One grid cell. Squares move only by swapping whole values with a neighbor.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Square {
    pub is_occupied: bool,
    /// Powder state: cleared on the first failed fall, set again whenever the square drops.
    pub is_free_falling: bool,
    pub color: Color,
    pub material: &'static Material,
    /// `None` makes the square inert.
    pub behavior: Option<Behavior>,
    /// Squares per second.
    pub velocity: Vec2,
    /// Displacement left unapplied by the last update, carried into the next.
    pub remainder: Vec2,
    /// Times this square was swapped during the current tick.
    pub num_moves: u32,
}

impl Default for Square {
    fn default() -> Self {
        Self::air()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_occupied {
            write!(f, "{}", self.material)
        } else {
            f.write_str("empty")
        }
    }
}

impl Square {
    #[must_use]
    pub fn new(
        is_occupied: bool,
        color: Color,
        material: &'static Material,
        behavior: Option<Behavior>,
    ) -> Self {
        Self {
            is_occupied,
            is_free_falling: true,
            color,
            material,
            behavior,
            velocity: Vec2::ZERO,
            remainder: Vec2::ZERO,
            num_moves: 0,
        }
    }

    /// Occupied square of `material` moved by `behavior`.
    #[must_use]
    pub fn filled(material: &'static Material, behavior: Behavior, color: Color) -> Self {
        Self::new(true, color, material, Some(behavior))
    }

    #[must_use]
    pub fn air() -> Self {
        Self::new(false, Color::default(), &AIR, None)
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Integrate gravity into the vertical velocity and cap both components at the
    /// material's terminal speed. Rigid squares never accelerate.
    pub fn update_kinematics(&mut self, dt: f32, gravity: f32) {
        if self.material.is_rigid {
            return;
        }
        let max_speed = self.material.max_speed;
        self.velocity.y += gravity * dt;
        self.velocity.y = self.velocity.y.clamp(-max_speed, max_speed);
        self.velocity.x = self.velocity.x.clamp(-max_speed, max_speed);
    }

    pub fn increase_moves(&mut self) {
        self.num_moves += 1;
    }

    pub fn decrease_moves(&mut self) {
        self.num_moves = self.num_moves.saturating_sub(1);
    }

    /// Whether the tick loop should hand this square to its behavior at all.
    #[must_use]
    pub fn needs_update(&self) -> bool {
        self.is_occupied && !self.material.is_rigid && self.behavior.is_some()
    }
}

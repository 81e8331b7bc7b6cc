//! Per-square movement policies dispatched from the tick loop.

mod physics;
mod powder;

use std::fmt;

use crate::api::SquareApi;
use crate::bounds::BoundingBox;
use crate::rng::WorldRng;

/// How a square tries to move each tick. Behaviors carry no per-square state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Behavior {
    /// Never moves.
    Stationary,
    /// Falls straight down or diagonally.
    FallingPhysics,
    /// Falls like [`Behavior::FallingPhysics`] and also flows sideways.
    LiquidPhysics,
    /// Falls, converts impacts into sideways motion and slides with friction.
    PowderPhysics,
}

impl Behavior {
    pub const ALL: [Behavior; 4] = [
        Behavior::Stationary,
        Behavior::FallingPhysics,
        Behavior::LiquidPhysics,
        Behavior::PowderPhysics,
    ];

    /// Move the square under the cursor.
    ///
    /// Returns a box around every cell the update touched, or an empty box if the
    /// square was completely blocked.
    pub fn update<R: WorldRng + ?Sized>(self, api: &mut SquareApi<'_, R>) -> BoundingBox {
        match self {
            Behavior::Stationary => BoundingBox::empty(),
            Behavior::FallingPhysics => physics::update(api, false),
            Behavior::LiquidPhysics => physics::update(api, true),
            Behavior::PowderPhysics => powder::update(api),
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stationary => write!(f, "Stationary"),
            Self::FallingPhysics => write!(f, "FallingPhysics"),
            Self::LiquidPhysics => write!(f, "LiquidPhysics"),
            Self::PowderPhysics => write!(f, "PowderPhysics"),
        }
    }
}

//! Cursor API handed to behaviors: the square being updated, its neighbors, and swaps.
//!
//! The cursor follows the square it was created for. After a successful
//! [`SquareApi::try_swap`] the cursor position is the square's new position.

use crate::rng::WorldRng;
use crate::square::Square;
use crate::World;

#[derive(Debug)]
pub struct SquareApi<'a, R: ?Sized> {
    pub world: &'a mut World,
    pub rng: &'a mut R,
    pub x: i32,
    pub y: i32,
    pub dt: f32,
}

impl<'a, R: WorldRng + ?Sized> SquareApi<'a, R> {
    pub fn new(world: &'a mut World, rng: &'a mut R, x: i32, y: i32, dt: f32) -> Self {
        Self {
            world,
            rng,
            x,
            y,
            dt,
        }
    }

    /// The square under the cursor.
    #[must_use]
    pub fn me(&self) -> &Square {
        self.world.square(self.x, self.y)
    }

    pub fn me_mut(&mut self) -> &mut Square {
        self.world.square_mut(self.x, self.y)
    }

    /// Neighbor at a relative offset, `None` outside the grid.
    #[must_use]
    pub fn get(&self, dx: i32, dy: i32) -> Option<&Square> {
        self.world.try_square(self.x + dx, self.y + dy).ok()
    }

    pub fn get_mut(&mut self, dx: i32, dy: i32) -> Option<&mut Square> {
        let (x, y) = (self.x + dx, self.y + dy);
        if self.world.is_valid_square(x, y) {
            Some(self.world.square_mut(x, y))
        } else {
            None
        }
    }

    /// Whether the square under the cursor may swap into the cell at `(dx, dy)`.
    ///
    /// Empty cells never block. An occupied cell gives way only if it is not
    /// rigid and strictly lighter than the mover.
    #[must_use]
    pub fn can_displace(&self, dx: i32, dy: i32) -> bool {
        let Some(target) = self.get(dx, dy) else {
            return false;
        };
        if !target.is_occupied {
            return true;
        }
        !target.material.is_rigid && target.material.mass < self.me().material.mass
    }

    /// Swap with the neighbor at `(dx, dy)` if legal, bump both move counters and
    /// follow the moved square.
    pub fn try_swap(&mut self, dx: i32, dy: i32) -> bool {
        if !self.can_displace(dx, dy) {
            return false;
        }
        self.swap_with(dx, dy);
        self.me_mut().increase_moves();
        if let Some(displaced) = self.get_mut(-dx, -dy) {
            displaced.increase_moves();
        }
        true
    }

    /// Revert a swap made by [`Self::try_swap`] with offset `(dx, dy)`.
    pub fn undo_swap(&mut self, dx: i32, dy: i32) {
        self.swap_with(-dx, -dy);
        self.me_mut().decrease_moves();
        if let Some(displaced) = self.get_mut(dx, dy) {
            displaced.decrease_moves();
        }
    }

    /// Unconditional index swap; the cursor moves with the square.
    fn swap_with(&mut self, dx: i32, dy: i32) {
        self.world.swap_squares((self.x, self.y), (self.x + dx, self.y + dy));
        self.x += dx;
        self.y += dy;
    }
}

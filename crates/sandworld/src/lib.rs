//! Falling sand grid physics engine.
//!
//! A [`World`] is a grid of [`Square`]s. Each tick, squares inside the active
//! region are accelerated by gravity and then moved by their [`Behavior`]
//! through swaps with neighbors. Whatever the tick touched becomes the next
//! active region, so a settled world costs next to nothing to update.

pub mod api;
pub mod behaviors;
pub mod bounds;
pub mod brush;
pub mod color;
pub mod config;
pub mod error;
pub mod material;
pub mod render;
pub mod rng;
pub mod square;
mod universe;


pub use behaviors::Behavior;
pub use bounds::BoundingBox;
pub use brush::{Brush, BrushKind};
pub use color::Color;
pub use config::{PowderTuning, WorldConfig};
pub use error::{ConfigError, WorldError};
pub use material::{Material, PhaseOfMatter, AIR, DIRT, SAND, WATER};
pub use rng::WorldRng;
pub use square::Square;
pub use universe::Universe;

use api::SquareApi;

/// Row-major grid of squares with `(0, 0)` at the bottom-left.
///
/// Accessors panic on coordinates outside the grid; use [`World::is_valid_square`]
/// or [`World::try_square`] to check first.
#[derive(Clone, Debug)]
pub struct World {
    width: usize,
    height: usize,
    squares: Vec<Square>,
    active_region: BoundingBox,
    gravity: f32,
    max_dt: f32,
    active_margin: i32,
    powder: PowderTuning,
}

impl World {
    /// Empty world with default physics.
    ///
    /// # Panics
    /// If either dimension is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        match Self::from_config(&WorldConfig::with_size(width, height)) {
            Ok(world) => world,
            Err(err) => panic!("{err}"),
        }
    }

    /// Empty world built from a validated configuration. The whole grid starts active.
    pub fn from_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "creating {}x{} world, gravity {}",
            config.width,
            config.height,
            config.gravity
        );
        Ok(Self {
            width: config.width,
            height: config.height,
            squares: vec![Square::air(); config.width * config.height],
            active_region: BoundingBox::covering(config.width, config.height),
            gravity: config.gravity,
            max_dt: config.max_dt,
            active_margin: config.active_margin,
            powder: config.powder,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Squares per second squared.
    #[must_use]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    #[must_use]
    pub fn powder_tuning(&self) -> PowderTuning {
        self.powder
    }

    /// Cells that will be scanned (after expansion by the margin) next tick.
    #[must_use]
    pub fn active_region(&self) -> BoundingBox {
        self.active_region
    }

    #[must_use]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    #[must_use]
    pub fn is_valid_square(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.is_valid_square(x, y),
            "out of bounds, x, y = {x}, {y}"
        );
        y as usize * self.width + x as usize
    }

    pub fn try_square(&self, x: i32, y: i32) -> Result<&Square, WorldError> {
        if self.is_valid_square(x, y) {
            Ok(&self.squares[y as usize * self.width + x as usize])
        } else {
            Err(WorldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// # Panics
    /// If `(x, y)` is outside the grid.
    #[must_use]
    pub fn square(&self, x: i32, y: i32) -> &Square {
        &self.squares[self.index(x, y)]
    }

    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn square_mut(&mut self, x: i32, y: i32) -> &mut Square {
        let i = self.index(x, y);
        &mut self.squares[i]
    }

    /// Overwrite a square and mark it active so it is simulated next tick.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn set_square(&mut self, x: i32, y: i32, square: Square) {
        let i = self.index(x, y);
        self.active_region.update(x, y);
        self.squares[i] = square;
    }

    /// Exchange two squares in place.
    ///
    /// # Panics
    /// If either position is outside the grid.
    pub fn swap_squares(&mut self, a: (i32, i32), b: (i32, i32)) {
        let a = self.index(a.0, a.1);
        let b = self.index(b.0, b.1);
        self.squares.swap(a, b);
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_occupied).count()
    }

    /// Reset every square to air. The whole grid becomes active.
    pub fn clear(&mut self) {
        self.squares.fill(Square::air());
        self.active_region = BoundingBox::covering(self.width, self.height);
    }

    /// Advance the simulation by `dt` seconds, clamped to the configured maximum.
    ///
    /// Only the active region (grown by the margin) is scanned, bottom row first.
    /// Each row is scanned left-to-right or right-to-left at random. A square that
    /// was already moved this tick, as mover or as displaced neighbor, is not
    /// updated again until the next tick.
    pub fn tick<R: WorldRng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };

        for square in &mut self.squares {
            square.num_moves = 0;
        }

        self.active_region.expand(self.active_margin);
        let (x_min, x_max, y_min, y_max) = self.active_region.clip(self.width, self.height);

        let mut next_region = BoundingBox::empty();
        for y in y_min..=y_max {
            if rng.gen_bool() {
                for x in x_min..=x_max {
                    self.update_square(x, y, dt, rng, &mut next_region);
                }
            } else {
                for x in (x_min..=x_max).rev() {
                    self.update_square(x, y, dt, rng, &mut next_region);
                }
            }
        }

        log::trace!(
            "tick dt={dt}: scanned ({x_min}, {y_min}) x ({x_max}, {y_max}), next active {next_region}"
        );
        self.active_region = next_region;
    }

    fn update_square<R: WorldRng + ?Sized>(
        &mut self,
        x: i32,
        y: i32,
        dt: f32,
        rng: &mut R,
        next_region: &mut BoundingBox,
    ) {
        let gravity = self.gravity;
        let square = self.square_mut(x, y);
        if !square.needs_update() || square.num_moves > 0 {
            return;
        }
        let Some(behavior) = square.behavior else {
            return;
        };
        square.update_kinematics(dt, gravity);

        let mut api = SquareApi::new(self, rng, x, y, dt);
        next_region.merge(&behavior.update(&mut api));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;
    use glam::Vec2;
    use proptest::prelude::*;

    fn sand() -> Square {
        Square::filled(&SAND, Behavior::FallingPhysics, material::SAND_COLORS[0])
    }

    fn water() -> Square {
        Square::filled(&WATER, Behavior::LiquidPhysics, material::WATER_COLOR)
    }

    fn dirt() -> Square {
        Square::filled(&DIRT, Behavior::Stationary, Color::new(40, 40, 40))
    }

    fn arb_square() -> impl Strategy<Value = Square> {
        (
            any::<bool>(),
            proptest::sample::select(vec![&SAND, &WATER, &DIRT, &AIR]),
            proptest::option::of(proptest::sample::select(Behavior::ALL.to_vec())),
            any::<[u8; 3]>(),
            -100.0f32..100.0,
        )
            .prop_map(|(occupied, material, behavior, [r, g, b], vy)| {
                Square::new(occupied, Color::new(r, g, b), material, behavior)
                    .with_velocity(Vec2::new(0.0, vy))
            })
    }

    #[test]
    fn new_world_is_empty_and_fully_active() {
        let world = World::new(16, 8);
        assert_eq!(world.width(), 16);
        assert_eq!(world.height(), 8);
        assert_eq!(world.squares().len(), 128);
        assert_eq!(world.occupied_count(), 0);
        assert_eq!(world.active_region(), BoundingBox::new(0, 15, 0, 7));
        assert_eq!(world.gravity(), -100.0);
    }

    #[test]
    fn from_config_rejects_invalid() {
        let config = WorldConfig::with_size(0, 4);
        assert!(matches!(
            World::from_config(&config),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn is_valid_square_checks_all_edges() {
        let world = World::new(4, 3);
        assert!(world.is_valid_square(0, 0));
        assert!(world.is_valid_square(3, 2));
        assert!(!world.is_valid_square(-1, 0));
        assert!(!world.is_valid_square(4, 0));
        assert!(!world.is_valid_square(0, -1));
        assert!(!world.is_valid_square(0, 3));
    }

    #[test]
    #[should_panic(expected = "out of bounds, x, y = 4, 1")]
    fn square_out_of_bounds_panics_with_coordinates() {
        let world = World::new(4, 3);
        let _ = world.square(4, 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn set_square_out_of_bounds_panics() {
        let mut world = World::new(4, 3);
        world.set_square(0, -1, sand());
    }

    #[test]
    fn try_square_reports_out_of_bounds() {
        let world = World::new(4, 3);
        assert_eq!(
            world.try_square(2, 3).unwrap_err(),
            WorldError::OutOfBounds {
                x: 2,
                y: 3,
                width: 4,
                height: 3
            }
        );
        assert!(world.try_square(2, 2).is_ok());
    }

    #[test]
    fn settled_world_goes_idle() {
        let mut world = World::new(8, 8);
        let mut rng = seeded(1);
        world.tick(1.0 / 30.0, &mut rng);
        assert!(world.active_region().is_empty());

        world.set_square(3, 3, dirt());
        assert_eq!(world.active_region(), BoundingBox::new(3, 3, 3, 3));
        world.tick(1.0 / 30.0, &mut rng);
        assert!(world.active_region().is_empty());
    }

    #[test]
    fn sand_falls_to_the_floor() {
        let config = WorldConfig {
            gravity: -20.0,
            ..WorldConfig::with_size(10, 10)
        };
        let mut world = World::from_config(&config).unwrap();
        world.set_square(5, 9, sand());
        let mut rng = seeded(2024);

        for _ in 0..60 {
            world.tick(1.0 / 30.0, &mut rng);
        }

        assert!(world.square(5, 0).is_occupied);
        assert!(!world.square(5, 9).is_occupied);
        assert_eq!(world.occupied_count(), 1);
    }

    #[test]
    fn sand_sinks_below_water() {
        let mut world = World::new(1, 2);
        world.set_square(0, 0, water());
        world.set_square(0, 1, sand().with_velocity(Vec2::new(0.0, -60.0)));
        let mut rng = seeded(5);

        world.tick(1.0 / 30.0, &mut rng);

        assert_eq!(world.square(0, 0).material.name, "sand");
        assert_eq!(world.square(0, 1).material.name, "water");
    }

    #[test]
    fn dirt_never_moves() {
        let mut world = World::new(9, 9);
        world.set_square(4, 4, dirt().with_velocity(Vec2::new(0.0, -200.0)));
        let mut rng = seeded(8);
        for _ in 0..100 {
            world.tick(1.0 / 30.0, &mut rng);
            assert_eq!(world.square(4, 4).material.name, "dirt");
            assert_eq!(world.occupied_count(), 1);
        }
    }

    #[test]
    fn dt_is_clamped() {
        let mut world = World::new(1, 200);
        world.set_square(0, 199, sand());
        let mut rng = seeded(5);

        world.tick(10.0, &mut rng);

        // One clamped step: v = 100 * (1/30) squares/s, far below one cell per tick.
        let y = (0..200).find(|&y| world.square(0, y).is_occupied).unwrap();
        assert!(y >= 198, "fell to {y}");
    }

    #[test]
    fn non_finite_dt_does_nothing() {
        let mut world = World::new(3, 3);
        world.set_square(1, 2, sand());
        let mut rng = seeded(5);
        world.tick(f32::NAN, &mut rng);
        assert!(world.square(1, 2).is_occupied);
        assert_eq!(world.square(1, 2).velocity, Vec2::ZERO);
    }

    #[test]
    fn same_seed_same_result() {
        let build = || {
            let mut world = World::new(16, 16);
            for x in 4..12 {
                for y in 8..14 {
                    world.set_square(x, y, if (x + y) % 2 == 0 { sand() } else { water() });
                }
            }
            world
        };
        let mut a = build();
        let mut b = build();
        let mut rng_a = seeded(77);
        let mut rng_b = seeded(77);
        for _ in 0..50 {
            a.tick(1.0 / 30.0, &mut rng_a);
            b.tick(1.0 / 30.0, &mut rng_b);
        }
        assert_eq!(a.squares(), b.squares());
        assert_eq!(a.active_region(), b.active_region());
    }

    #[test]
    fn clear_resets_everything() {
        let mut world = World::new(4, 4);
        world.set_square(1, 1, sand());
        world.clear();
        assert_eq!(world.occupied_count(), 0);
        assert_eq!(world.active_region(), BoundingBox::covering(4, 4));
    }

    proptest! {
        #[test]
        fn prop_set_then_get_round_trip(
            x in 0i32..32,
            y in 0i32..24,
            square in arb_square(),
        ) {
            let mut world = World::new(32, 24);
            let mut rng = seeded(0);
            world.tick(1.0 / 30.0, &mut rng);
            prop_assert!(world.active_region().is_empty());

            world.set_square(x, y, square);
            prop_assert_eq!(world.square(x, y), &square);
            prop_assert!(world.active_region().contains(x, y));
        }

        #[test]
        fn prop_out_of_bounds_is_reported(
            x in prop_oneof![(-1000i32..0), (32i32..1000)],
            y in -1000i32..1000,
        ) {
            let world = World::new(32, 24);
            prop_assert!(!world.is_valid_square(x, y));
            prop_assert!(world.try_square(x, y).is_err());
        }
    }
}

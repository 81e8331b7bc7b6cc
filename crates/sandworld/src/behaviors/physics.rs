//! Falling and liquid movement: straight down, then the diagonals, then (liquids) sideways.
//!
//! The square takes one single-cell step per whole unit of `|velocity * dt|`.
//! The fractional part buys one more step with matching probability, so slow
//! squares still move on average instead of being truncated to zero.

use crate::api::SquareApi;
use crate::bounds::BoundingBox;
use crate::rng::WorldRng;

pub fn update<R: WorldRng + ?Sized>(
    api: &mut SquareApi<'_, R>,
    allow_sideways: bool,
) -> BoundingBox {
    let (origin_x, origin_y) = (api.x, api.y);
    let mut steps = (api.me().velocity * api.dt).length();

    let mut region = BoundingBox::empty();
    let mut moved = false;
    let mut blocked = false;

    while steps >= 1.0 {
        steps -= 1.0;
        if single_step(api, allow_sideways).is_some() {
            region.update(api.x, api.y);
            moved = true;
        } else {
            blocked = true;
            break;
        }
    }

    // Take the last step tentatively: keep it only if the fractional draw succeeds.
    if !blocked {
        match single_step(api, allow_sideways) {
            Some(_) if api.rng.check_probability(steps) => {
                region.update(api.x, api.y);
                moved = true;
            }
            Some((dx, dy)) => api.undo_swap(dx, dy),
            None => blocked = true,
        }
    }

    if moved {
        region.update(origin_x, origin_y);
    }
    if !blocked {
        // Still free to move, just slowly. Keep it in the active region.
        region.update(api.x, api.y);
    }
    region
}

/// Try down, the diagonals in random order, then (if allowed) the sides in random order.
/// Returns the offset moved, or `None` when every direction is blocked.
fn single_step<R: WorldRng + ?Sized>(
    api: &mut SquareApi<'_, R>,
    allow_sideways: bool,
) -> Option<(i32, i32)> {
    if api.try_swap(0, -1) {
        return Some((0, -1));
    }

    let dx = if api.rng.gen_bool() { -1 } else { 1 };
    for (dx, dy) in [(dx, -1), (-dx, -1)] {
        if api.try_swap(dx, dy) {
            return Some((dx, dy));
        }
    }

    if allow_sideways {
        let dx = if api.rng.gen_bool() { -1 } else { 1 };
        for (dx, dy) in [(dx, 0), (-dx, 0)] {
            if api.try_swap(dx, dy) {
                return Some((dx, dy));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::Behavior;
    use crate::color::Color;
    use crate::material::{Material, PhaseOfMatter, DIRT, SAND, WATER};
    use crate::rng::seeded;
    use crate::square::Square;
    use crate::World;
    use glam::Vec2;

    /// Liquid that takes exactly one step per update at `dt = 0.5`.
    static SLOW_WATER: Material = Material {
        name: "slow water",
        mass: 1.5,
        max_speed: 2.0,
        phase_of_matter: PhaseOfMatter::LIQUID,
        ..Material::BASE
    };

    fn dirt() -> Square {
        Square::filled(&DIRT, Behavior::Stationary, Color::BLACK)
    }

    fn run(world: &mut World, x: i32, y: i32, dt: f32, seed: u64, sideways: bool) -> BoundingBox {
        let mut rng = seeded(seed);
        let mut api = SquareApi::new(world, &mut rng, x, y, dt);
        update(&mut api, sideways)
    }

    #[test]
    fn falls_whole_steps() {
        let mut world = World::new(5, 10);
        world.set_square(
            2,
            9,
            Square::filled(&SAND, Behavior::FallingPhysics, Color::WHITE)
                .with_velocity(Vec2::new(0.0, -3.0)),
        );
        let region = run(&mut world, 2, 9, 1.0, 1, false);

        assert!(world.square(2, 6).is_occupied);
        assert!(!world.square(2, 9).is_occupied);
        assert_eq!(region, BoundingBox::new(2, 2, 6, 9));
    }

    #[test]
    fn slides_diagonally_when_blocked_below() {
        let mut world = World::new(3, 2);
        world.set_square(1, 0, dirt());
        world.set_square(
            1,
            1,
            Square::filled(&SAND, Behavior::FallingPhysics, Color::WHITE)
                .with_velocity(Vec2::new(0.0, -1.0)),
        );
        let region = run(&mut world, 1, 1, 1.0, 3, false);

        let landed_left = world.square(0, 0).is_occupied;
        let landed_right = world.square(2, 0).is_occupied;
        assert!(landed_left ^ landed_right);
        assert!(!world.square(1, 1).is_occupied);
        assert!(region.contains(1, 1));
        assert!(region.contains(if landed_left { 0 } else { 2 }, 0));
    }

    #[test]
    fn diagonal_choice_is_unbiased() {
        let mut lefts = 0;
        for seed in 0..200 {
            let mut world = World::new(3, 2);
            world.set_square(1, 0, dirt());
            world.set_square(
                1,
                1,
                Square::filled(&SAND, Behavior::FallingPhysics, Color::WHITE)
                    .with_velocity(Vec2::new(0.0, -1.0)),
            );
            run(&mut world, 1, 1, 1.0, seed, false);
            if world.square(0, 0).is_occupied {
                lefts += 1;
            }
        }
        assert!((60..140).contains(&lefts), "lefts = {lefts}");
    }

    #[test]
    fn falling_never_moves_sideways() {
        let mut world = World::new(3, 1);
        world.set_square(
            1,
            0,
            Square::filled(&SAND, Behavior::FallingPhysics, Color::WHITE)
                .with_velocity(Vec2::new(0.0, -5.0)),
        );
        let region = run(&mut world, 1, 0, 1.0, 9, false);
        assert!(world.square(1, 0).is_occupied);
        assert!(region.is_empty());
    }

    #[test]
    fn liquid_spreads_sideways_on_floor() {
        let mut world = World::new(3, 1);
        world.set_square(
            1,
            0,
            Square::filled(&SLOW_WATER, Behavior::LiquidPhysics, Color::WHITE)
                .with_velocity(Vec2::new(0.0, -2.0)),
        );
        let region = run(&mut world, 1, 0, 0.5, 11, true);
        assert!(!world.square(1, 0).is_occupied);
        assert!(world.square(0, 0).is_occupied || world.square(2, 0).is_occupied);
        assert!(region.contains(1, 0));
    }

    #[test]
    fn sinks_through_lighter_liquid() {
        let mut world = World::new(1, 2);
        world.set_square(0, 0, Square::filled(&WATER, Behavior::LiquidPhysics, Color::WHITE));
        world.set_square(
            0,
            1,
            Square::filled(&SAND, Behavior::FallingPhysics, Color::WHITE)
                .with_velocity(Vec2::new(0.0, -1.0)),
        );
        run(&mut world, 0, 1, 1.0, 2, false);
        assert_eq!(world.square(0, 0).material.name, "sand");
        assert_eq!(world.square(0, 1).material.name, "water");
    }

    #[test]
    fn zero_speed_stays_active_but_does_not_move() {
        let mut world = World::new(3, 3);
        world.set_square(1, 2, Square::filled(&SAND, Behavior::FallingPhysics, Color::WHITE));
        let region = run(&mut world, 1, 2, 1.0, 4, false);
        assert!(world.square(1, 2).is_occupied);
        assert_eq!(world.square(1, 2).num_moves, 0);
        assert_eq!(world.square(1, 1).num_moves, 0);
        assert_eq!(region, BoundingBox::new(1, 1, 2, 2));
    }

    #[test]
    fn fractional_step_is_taken_about_as_often_as_its_fraction() {
        let mut taken = 0;
        for seed in 0..400 {
            let mut world = World::new(1, 3);
            world.set_square(
                0,
                2,
                Square::filled(&SAND, Behavior::FallingPhysics, Color::WHITE)
                    .with_velocity(Vec2::new(0.0, -0.25)),
            );
            run(&mut world, 0, 2, 1.0, seed, false);
            if world.square(0, 1).is_occupied {
                taken += 1;
            }
        }
        assert!((60..140).contains(&taken), "taken = {taken}");
    }
}

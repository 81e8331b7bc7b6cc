//! Powder movement with separate horizontal and vertical budgets.
//!
//! A free-falling grain only falls. When it lands, part of its fall speed is
//! redirected sideways, after which it tries the diagonals and then slides,
//! losing speed to friction on every sideways move. Sub-unit leftovers are kept
//! in the square's remainder for the next tick.

use glam::Vec2;

use crate::api::SquareApi;
use crate::bounds::BoundingBox;
use crate::config::PowderTuning;
use crate::rng::WorldRng;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Step {
    Moved,
    /// Not blocked, just too slow to move again this tick.
    Stalled,
    Blocked,
}

pub fn update<R: WorldRng + ?Sized>(api: &mut SquareApi<'_, R>) -> BoundingBox {
    let (origin_x, origin_y) = (api.x, api.y);
    let tuning = api.world.powder_tuning();
    let dt = api.dt;

    let me = api.me();
    let mut vy = (me.velocity.y * dt + me.remainder.y).abs();
    let mut vx = me.velocity.x * dt + me.remainder.x;

    // A landed grain with nowhere to fall and no sideways speed is at rest even
    // when this tick's fall budget is too small to attempt a step.
    let at_rest = !me.is_free_falling
        && me.velocity.x == 0.0
        && vx.abs() < 1.0
        && !api.can_displace(0, -1);

    let mut region = BoundingBox::empty();
    let mut moved = false;
    let mut step = if at_rest { Step::Blocked } else { Step::Stalled };

    while vy >= 1.0 || (!api.me().is_free_falling && vx.abs() >= 1.0) {
        step = single_step(api, &mut vx, &mut vy, tuning);
        if step == Step::Moved {
            region.update(api.x, api.y);
            moved = true;
        }
    }

    api.me_mut().remainder = Vec2::new(vx, -vy);

    if moved {
        region.update(origin_x, origin_y);
    }
    if step != Step::Blocked {
        region.update(api.x, api.y);
    }
    region
}

fn single_step<R: WorldRng + ?Sized>(
    api: &mut SquareApi<'_, R>,
    vx: &mut f32,
    vy: &mut f32,
    tuning: PowderTuning,
) -> Step {
    if api.try_swap(0, -1) {
        *vy = (*vy - 1.0).max(0.0);
        api.me_mut().is_free_falling = true;
        return Step::Moved;
    }

    // Landed: turn some of the fall into sideways motion.
    if api.me().is_free_falling {
        let draw = api.rng.gen_f32();
        let me = api.me_mut();
        let additional_vx = tuning.impact_spread * me.velocity.y * (draw - 0.5);
        me.velocity.x += additional_vx;
        me.is_free_falling = false;
        *vx += additional_vx * api.dt;
        *vx = if *vx < 0.0 { vx.min(-1.0) } else { vx.max(1.0) };
    }

    *vy = 0.0;
    let me = api.me_mut();
    me.velocity.y = 0.0;
    me.remainder.y = 0.0;

    if vx.abs() < 1.0 {
        return if api.me().velocity.x == 0.0 {
            Step::Blocked
        } else {
            Step::Stalled
        };
    }

    let dir = if *vx < 0.0 { -1 } else { 1 };

    if api.try_swap(dir, -1) {
        *vx -= dir as f32;
        apply_friction(api, vx, dir, -1, tuning.friction);
        return Step::Moved;
    }
    if api.try_swap(-dir, -1) {
        // Bounced off the blocked side: reverse.
        *vx = -*vx + dir as f32;
        let me = api.me_mut();
        me.velocity.x = -me.velocity.x;
        apply_friction(api, vx, -dir, -1, tuning.friction);
        return Step::Moved;
    }

    if api.try_swap(dir, 0) {
        *vx = if dir < 0 {
            (*vx + 1.0).min(0.0)
        } else {
            (*vx - 1.0).max(0.0)
        };
        apply_friction(api, vx, dir, 0, tuning.friction);
        return Step::Moved;
    }

    *vx = 0.0;
    let me = api.me_mut();
    me.velocity.x = 0.0;
    me.remainder.x = 0.0;
    Step::Blocked
}

/// Slow both the mover and the square it displaced after a sideways move by `(dx, dy)`.
fn apply_friction<R: WorldRng + ?Sized>(
    api: &mut SquareApi<'_, R>,
    vx: &mut f32,
    dx: i32,
    dy: i32,
    friction: f32,
) {
    *vx *= friction;
    if let Some(displaced) = api.get_mut(-dx, -dy) {
        displaced.velocity.x *= friction;
    }
    let me = api.me_mut();
    me.velocity.x *= friction;
    if me.velocity.x.abs() < 1.0 {
        me.velocity.x = 0.0;
        *vx = 0.0;
    }
}

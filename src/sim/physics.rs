//! Fighter integrator: gravity, ground, friction, playfield bounds

use super::state::Fighter;
use crate::consts::*;

/// Advance one fighter by `dt` normalized frames. Cannot fail.
pub fn step_fighter(fighter: &mut Fighter, dt: f32) {
    let dt = dt.max(0.0);
    let body = &mut fighter.body;

    body.vel.y += GRAVITY * dt;
    body.pos += body.vel * dt;

    // Ground line
    let floor = GROUND_Y - body.size.y;
    if body.pos.y >= floor {
        body.pos.y = floor;
        body.vel.y = 0.0;
        body.on_ground = true;
    } else {
        body.on_ground = false;
    }

    let damping = if body.on_ground { FRICTION } else { AIR_FRICTION };
    body.vel.x *= damping.powf(dt);

    let max_x = (FIELD_WIDTH - body.size.x).max(0.0);
    if body.pos.x < 0.0 || body.pos.x > max_x {
        body.pos.x = body.pos.x.clamp(0.0, max_x);
        body.vel.x = 0.0;
    }

    fighter.invuln_ms = (fighter.invuln_ms - dt * FRAME_MS).max(0.0);
    fighter.anim_phase += dt * (0.1 + fighter.body.vel.x.abs() * 0.02);
}

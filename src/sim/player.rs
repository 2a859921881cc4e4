//! Player control: movement, jumping, perks and attacks

use glam::Vec2;

use super::progress::Perk;
use super::projectile::{Projectile, ProjectileKind};
use super::state::{Facing, GameEvent, World};
use super::tick::TickInput;
use crate::consts::*;

/// Vertical offset of the throwing hand from the player's center
const THROW_HEIGHT: f32 = 10.0;

/// Apply held actions to the player for one tick
pub fn update_player(world: &mut World, input: &TickInput, dt: f32) {
    let now = world.clock_ms;
    let quick_feet = world.run.perk_applies(Perk::QuickFeet);
    let flutter = world.run.perk_applies(Perk::Flutter);
    let World {
        player,
        projectiles,
        events,
        ..
    } = world;

    let speed = if quick_feet {
        player.speed * QUICK_FEET_MULTIPLIER
    } else {
        player.speed
    };
    let body = &mut player.fighter.body;

    match (input.left, input.right) {
        (true, false) => {
            body.vel.x = -speed;
            body.facing = Facing::Left;
        }
        (false, true) => {
            body.vel.x = speed;
            body.facing = Facing::Right;
        }
        _ => {}
    }

    if input.jump {
        if body.on_ground {
            body.vel.y = -player.jump;
            body.on_ground = false;
        } else if flutter && body.vel.y > FLUTTER_MAX_FALL {
            body.vel.y = FLUTTER_MAX_FALL;
        }
    }

    player.cooldowns.tick(dt * FRAME_MS);

    let facing = player.fighter.body.facing;
    let hand = player.fighter.body.center()
        + Vec2::new(facing.sign() * player.fighter.body.size.x / 2.0, -THROW_HEIGHT);
    for kind in ProjectileKind::PLAYER_ATTACKS {
        if !input.attack_held(kind) {
            continue;
        }
        let Some(slot) = player.cooldowns.slot_mut(kind) else {
            continue;
        };
        if *slot > 0.0 {
            continue;
        }
        *slot = kind.profile().cooldown_ms;
        projectiles.push(Projectile::thrown(kind, hand, facing, now));
        events.push(GameEvent::Shot(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::waves;

    fn world() -> World {
        let mut world = World::new(5, 0);
        waves::start_run(&mut world, false);
        world.events.clear();
        world
    }

    #[test]
    fn test_moves_and_faces() {
        let mut world = world();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.player.fighter.body.vel.x, -PLAYER_SPEED);
        assert_eq!(world.player.fighter.body.facing, Facing::Left);
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let mut world = world();
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.player.fighter.body.vel.x, 0.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut world = world();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.player.fighter.body.vel.y, -PLAYER_JUMP);
        // Airborne: holding jump again does nothing without Flutter
        world.player.fighter.body.vel.y = 5.0;
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.player.fighter.body.vel.y, 5.0);
    }

    #[test]
    fn test_quick_feet_needs_unlock_and_toggle() {
        let mut world = world();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        world.run.unlocks.unlock(Perk::QuickFeet);
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.player.fighter.body.vel.x, PLAYER_SPEED);

        world.run.perks_active = true;
        update_player(&mut world, &input, 1.0);
        assert_eq!(
            world.player.fighter.body.vel.x,
            PLAYER_SPEED * QUICK_FEET_MULTIPLIER
        );
    }

    #[test]
    fn test_flutter_caps_fall_speed() {
        let mut world = world();
        world.run.unlocks.unlock(Perk::Flutter);
        world.run.perks_active = true;
        world.player.fighter.body.on_ground = false;
        world.player.fighter.body.vel.y = 8.0;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.player.fighter.body.vel.y, FLUTTER_MAX_FALL);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut world = world();
        let input = TickInput {
            kiss: true,
            ..Default::default()
        };
        update_player(&mut world, &input, 1.0);
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].kind, ProjectileKind::Kiss);
        assert_eq!(world.events, vec![GameEvent::Shot(ProjectileKind::Kiss)]);

        // 250 ms later it fires again
        for _ in 0..15 {
            update_player(&mut world, &TickInput::default(), 1.0);
        }
        update_player(&mut world, &input, 1.0);
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn test_all_three_attacks_independent() {
        let mut world = world();
        let input = TickInput {
            kiss: true,
            flower: true,
            bomb: true,
            ..Default::default()
        };
        update_player(&mut world, &input, 1.0);
        let kinds: Vec<_> = world.projectiles.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![ProjectileKind::Kiss, ProjectileKind::Flower, ProjectileKind::Bomb]
        );
    }
}

//! Enemy behavior: approach, telegraphed melee, ranged harassment
//!
//! States are implicit in the timers. A windup in progress is
//! `ai.windup_ms = Some(..)`; recovery is the melee cooldown; the ranged
//! cooldown runs independently of both.

use glam::Vec2;
use rand::Rng;

use super::combat::land_hit;
use super::fx;
use super::projectile::{Projectile, ProjectileKind};
use super::state::{Enemy, Facing, GameEvent, Outcome, Player, Side, World};
use crate::consts::*;

const MELEE_SHAKE: f32 = 0.35;
const MELEE_COLOR: u32 = 0xff3b3b;

/// Run every enemy's behavior for one tick
pub fn update_enemies(world: &mut World, dt: f32) -> Option<Outcome> {
    let now = world.clock_ms;
    let World {
        player,
        enemies,
        projectiles,
        particles,
        rng,
        shake,
        events,
        ..
    } = world;

    for enemy in enemies.iter_mut() {
        let elapsed = dt * FRAME_MS;
        let me = enemy.fighter.body.center();
        let target = player.fighter.body.center();
        let dx = target.x - me.x;
        let distance = dx.abs();

        if let Some(facing) = Facing::from_dx(dx) {
            enemy.fighter.body.facing = facing;
        }
        let facing = enemy.fighter.body.facing;

        if distance > NEAR_THRESHOLD {
            enemy.fighter.body.vel.x += facing.sign() * enemy.speed * APPROACH_ACCEL * dt;
        } else {
            enemy.fighter.body.vel.x *= IDLE_DECAY.powf(dt);
        }

        let ai = &mut enemy.ai;
        ai.melee_cooldown_ms -= elapsed;
        ai.ranged_cooldown_ms -= elapsed;

        if let Some(remaining) = ai.windup_ms {
            let remaining = remaining - elapsed;
            if remaining <= 0.0 {
                ai.windup_ms = None;
                ai.melee_cooldown_ms = rng.random_range(MELEE_COOLDOWN_MS.0..MELEE_COOLDOWN_MS.1);
                if let Some(hit_at) = melee_connects(enemy, player) {
                    let result = land_hit(
                        &mut player.fighter,
                        MELEE_DAMAGE,
                        facing.sign(),
                        MELEE_KNOCKBACK,
                    );
                    fx::spawn_burst(particles, rng, hit_at, MELEE_COLOR, 14, 5.0);
                    fx::add_shake(shake, MELEE_SHAKE);
                    if let Some(killed) = result {
                        events.push(GameEvent::FighterHit {
                            side: Side::Player,
                            damage: MELEE_DAMAGE,
                        });
                        if killed {
                            return Some(Outcome::PlayerDefeated);
                        }
                    }
                }
            } else {
                ai.windup_ms = Some(remaining);
            }
        } else if ai.melee_cooldown_ms <= 0.0 && distance <= MELEE_RANGE {
            ai.windup_ms = Some(MELEE_WINDUP_MS);
            events.push(GameEvent::MeleeWindup);
        }

        let ai = &mut enemy.ai;
        if ai.ranged_cooldown_ms <= 0.0 && distance >= NEAR_THRESHOLD {
            let velocity = Vec2::new(
                facing.sign() * rng.random_range(5.0..8.0),
                rng.random_range(-7.0..-4.0),
            );
            projectiles.push(Projectile::launch(
                ProjectileKind::EnemyShot,
                me - Vec2::new(0.0, 10.0),
                facing,
                velocity,
                now,
            ));
            ai.ranged_cooldown_ms = rng.random_range(RANGED_COOLDOWN_MS.0..RANGED_COOLDOWN_MS.1);
            events.push(GameEvent::Shot(ProjectileKind::EnemyShot));
        }
    }

    None
}

/// Where the melee swing lands on the player, if it does
fn melee_connects(enemy: &Enemy, player: &Player) -> Option<Vec2> {
    let hitbox = enemy.melee_hitbox();
    let target = player.fighter.body.rect();
    hitbox.overlaps(&target).then(|| hitbox.center())
}

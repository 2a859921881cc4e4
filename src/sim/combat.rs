//! Projectile motion, ground behavior and hit resolution
//!
//! One pass per projectile: move it, apply its ground policy, then test it
//! against the opposing side. The first kill ends the pass; the caller's
//! wave transition clears whatever projectiles are left.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::fx;
use super::projectile::{GroundPolicy, Projectile, ProjectileKind};
use super::state::{Combatant, Fighter, GameEvent, Outcome, Particle, Side, World};
use crate::consts::*;

const HIT_SHAKE: f32 = 0.15;
const BLAST_SHAKE: f32 = 0.6;
const BLAST_COLOR: u32 = 0xff8c1a;

/// Land a hit unless the target is invulnerable.
///
/// Returns `None` when absorbed, otherwise whether the target died.
pub fn land_hit(
    fighter: &mut Fighter,
    damage: f32,
    direction: f32,
    impulse: (f32, f32),
) -> Option<bool> {
    if fighter.is_invulnerable() {
        return None;
    }
    let killed = fighter.take_damage(damage);
    fighter.knock_back(direction, impulse);
    Some(killed)
}

/// Shared effect sinks for one resolver pass
struct Effects<'a> {
    particles: &'a mut Vec<Particle>,
    rng: &'a mut Pcg32,
    shake: &'a mut f32,
    events: &'a mut Vec<GameEvent>,
}

/// Advance every projectile and resolve hits. Returns the fight outcome if
/// a fighter died this pass.
pub fn resolve_projectiles(world: &mut World, dt: f32) -> Option<Outcome> {
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
    let mut sinks = Effects {
        particles,
        rng,
        shake,
        events,
    };

    for projectile in projectiles.iter_mut() {
        if projectile.body.removed {
            continue;
        }
        projectile.advance(dt);

        if projectile.expired(now) {
            projectile.body.removed = true;
            continue;
        }

        if projectile.touches_ground() {
            match projectile.kind.profile().ground {
                GroundPolicy::Detonate => {
                    projectile.body.removed = true;
                    let at = projectile.body.center();
                    let outcome = detonate(projectile, at, enemies.as_mut_slice(), &mut sinks);
                    if outcome.is_some() {
                        return outcome;
                    }
                    continue;
                }
                GroundPolicy::Bounce => projectile.bounce(),
                GroundPolicy::BounceOnce => {
                    if projectile.bounced {
                        projectile.body.removed = true;
                        continue;
                    }
                    projectile.bounce();
                    projectile.bounced = true;
                    if projectile.body.vel.y.abs() < SETTLE_SPEED {
                        projectile.body.removed = true;
                        continue;
                    }
                }
            }
        }

        let outcome = match projectile.kind.owner() {
            Side::Player => strike(projectile, enemies.as_mut_slice(), &mut sinks),
            Side::Enemy => strike(projectile, std::slice::from_mut(player), &mut sinks),
        };
        if outcome.is_some() {
            return outcome;
        }
    }

    None
}

/// Direct-contact test against the opposing side
fn strike<C: Combatant>(
    projectile: &mut Projectile,
    targets: &mut [C],
    sinks: &mut Effects<'_>,
) -> Option<Outcome> {
    let rect = projectile.body.rect();
    let Some(target) = targets
        .iter_mut()
        .find(|t| t.fighter().body.rect().overlaps(&rect))
    else {
        return None;
    };
    projectile.body.removed = true;

    // Bombs that connect in flight go off where they are
    if projectile.kind == ProjectileKind::Bomb {
        let at = projectile.body.center();
        return detonate(projectile, at, targets, sinks);
    }

    let side = target.side();
    let fighter = target.fighter_mut();
    let direction = projectile.body.vel.x.signum();
    let result = land_hit(fighter, projectile.damage, direction, HIT_KNOCKBACK);
    fx::spawn_burst(
        sinks.particles,
        sinks.rng,
        projectile.body.center(),
        projectile.kind.profile().color,
        10,
        4.0,
    );
    fx::add_shake(sinks.shake, HIT_SHAKE);

    match result {
        Some(killed) => {
            sinks.events.push(GameEvent::FighterHit {
                side,
                damage: projectile.damage,
            });
            killed.then_some(defeat_of(side))
        }
        None => None,
    }
}

/// Blast damage against every target whose center is within the radius
fn detonate<C: Combatant>(
    projectile: &Projectile,
    at: Vec2,
    targets: &mut [C],
    sinks: &mut Effects<'_>,
) -> Option<Outcome> {
    fx::spawn_burst(sinks.particles, sinks.rng, at, BLAST_COLOR, 28, 7.0);
    fx::add_shake(sinks.shake, BLAST_SHAKE);
    sinks.events.push(GameEvent::Explosion { at });
    log::debug!("Bomb detonated at ({:.0}, {:.0})", at.x, at.y);

    let mut outcome = None;
    for target in targets.iter_mut() {
        let side = target.side();
        let fighter = target.fighter_mut();
        let center = fighter.body.center();
        if center.distance(at) > projectile.radius {
            continue;
        }
        let away = center.x - at.x;
        let direction = if away == 0.0 { 1.0 } else { away };
        if let Some(killed) = land_hit(fighter, projectile.damage, direction, BLAST_KNOCKBACK) {
            sinks.events.push(GameEvent::FighterHit {
                side,
                damage: projectile.damage,
            });
            if killed && outcome.is_none() {
                outcome = Some(defeat_of(side));
            }
        }
    }
    outcome
}

fn defeat_of(side: Side) -> Outcome {
    match side {
        Side::Player => Outcome::PlayerDefeated,
        Side::Enemy => Outcome::EnemyDefeated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::Projectile;
    use crate::sim::state::Facing;
    use crate::sim::waves;

    fn world() -> World {
        let mut world = World::new(42, 0);
        waves::start_run(&mut world, false);
        world.events.clear();
        world
    }

    fn bomb_landing_at(x: f32, now: f64) -> Projectile {
        let size = ProjectileKind::Bomb.profile().size;
        let mut bomb = Projectile::launch(
            ProjectileKind::Bomb,
            Vec2::new(x, GROUND_Y - size),
            Facing::Right,
            Vec2::new(0.0, 5.0),
            now,
        );
        bomb.body.pos.y = GROUND_Y - size - 1.0;
        bomb
    }

    #[test]
    fn test_bomb_in_radius_damages_once() {
        let mut world = world();
        let enemy_x = world.enemy().unwrap().fighter.body.center().x;
        let start = world.enemy().unwrap().fighter.health;
        world.projectiles.push(bomb_landing_at(enemy_x + 40.0, world.clock_ms));

        assert_eq!(resolve_projectiles(&mut world, 1.0), None);
        assert_eq!(world.enemy().unwrap().fighter.health, start - 22.0);
        assert!(world.projectiles[0].body.removed);

        // A removed bomb is skipped on later passes, even once invulnerability wears off
        world.enemy_mut().unwrap().fighter.invuln_ms = 0.0;
        resolve_projectiles(&mut world, 1.0);
        assert_eq!(world.enemy().unwrap().fighter.health, start - 22.0);
        world.prune();
        assert!(world.projectiles.is_empty());

        let explosions = world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Explosion { .. }))
            .count();
        assert_eq!(explosions, 1);
    }

    #[test]
    fn test_bomb_out_of_radius_misses() {
        let mut world = world();
        let enemy_x = world.enemy().unwrap().fighter.body.center().x;
        let start = world.enemy().unwrap().fighter.health;
        world.projectiles.push(bomb_landing_at(enemy_x - 400.0, world.clock_ms));
        resolve_projectiles(&mut world, 1.0);
        assert_eq!(world.enemy().unwrap().fighter.health, start);
        assert!(world.projectiles[0].body.removed);
    }

    #[test]
    fn test_blast_knocks_away_from_center() {
        let mut world = world();
        let enemy_x = world.enemy().unwrap().fighter.body.center().x;
        world.projectiles.push(bomb_landing_at(enemy_x - 30.0, world.clock_ms));
        resolve_projectiles(&mut world, 1.0);
        let vel = world.enemy().unwrap().fighter.body.vel;
        assert_eq!(vel, Vec2::new(BLAST_KNOCKBACK.0, BLAST_KNOCKBACK.1));
    }

    #[test]
    fn test_lethal_blast_reports_enemy_defeat() {
        let mut world = world();
        world.enemy_mut().unwrap().fighter.health = 10.0;
        let enemy_x = world.enemy().unwrap().fighter.body.center().x;
        world.projectiles.push(bomb_landing_at(enemy_x, world.clock_ms));
        assert_eq!(resolve_projectiles(&mut world, 1.0), Some(Outcome::EnemyDefeated));
        assert_eq!(world.enemy().unwrap().fighter.health, 0.0);
    }

    #[test]
    fn test_kiss_hits_enemy_directly() {
        let mut world = world();
        let center = world.enemy().unwrap().fighter.body.center();
        let start = world.enemy().unwrap().fighter.health;
        world.projectiles.push(Projectile::thrown(
            ProjectileKind::Kiss,
            center - Vec2::new(20.0, 0.0),
            Facing::Right,
            world.clock_ms,
        ));
        resolve_projectiles(&mut world, 1.0);
        assert_eq!(world.enemy().unwrap().fighter.health, start - 8.0);
        assert!(world.projectiles[0].body.removed);
        assert!(world.enemy().unwrap().fighter.body.vel.x > 0.0);
    }

    #[test]
    fn test_enemy_shot_hits_player_not_enemy() {
        let mut world = world();
        let enemy_center = world.enemy().unwrap().fighter.body.center();
        world.projectiles.push(Projectile::launch(
            ProjectileKind::EnemyShot,
            enemy_center,
            Facing::Left,
            Vec2::ZERO,
            world.clock_ms,
        ));
        resolve_projectiles(&mut world, 0.0);
        assert!(!world.projectiles[0].body.removed);
        assert_eq!(world.enemy().unwrap().fighter.health, world.enemy().unwrap().fighter.max_health);

        let player_center = world.player.fighter.body.center();
        world.projectiles.push(Projectile::launch(
            ProjectileKind::EnemyShot,
            player_center,
            Facing::Left,
            Vec2::ZERO,
            world.clock_ms,
        ));
        resolve_projectiles(&mut world, 0.0);
        assert_eq!(world.player.fighter.health, PLAYER_MAX_HEALTH - 10.0);
    }

    #[test]
    fn test_invulnerable_target_absorbs() {
        let mut world = world();
        world.player.fighter.invuln_ms = 100.0;
        let player_center = world.player.fighter.body.center();
        world.projectiles.push(Projectile::launch(
            ProjectileKind::EnemyShot,
            player_center,
            Facing::Left,
            Vec2::ZERO,
            world.clock_ms,
        ));
        assert_eq!(resolve_projectiles(&mut world, 0.0), None);
        assert_eq!(world.player.fighter.health, PLAYER_MAX_HEALTH);
        assert!(world.projectiles[0].body.removed);
    }

    #[test]
    fn test_projectiles_expire_after_ttl() {
        let mut world = world();
        world.projectiles.push(Projectile::launch(
            ProjectileKind::Kiss,
            Vec2::new(300.0, 100.0),
            Facing::Right,
            Vec2::ZERO,
            0.0,
        ));
        world.clock_ms = PROJECTILE_TTL_MS as f64 + 1.0;
        resolve_projectiles(&mut world, 1.0);
        assert!(world.projectiles[0].body.removed);
    }

    #[test]
    fn test_flower_bounces_then_vanishes() {
        let mut world = world();
        let size = ProjectileKind::Flower.profile().size;
        let mut flower = Projectile::launch(
            ProjectileKind::Flower,
            Vec2::new(400.0, GROUND_Y - size),
            Facing::Right,
            Vec2::new(2.0, 8.0),
            world.clock_ms,
        );
        flower.body.pos.y = GROUND_Y - size - 1.0;
        world.projectiles.push(flower);

        resolve_projectiles(&mut world, 1.0);
        let flower = &world.projectiles[0];
        assert!(!flower.body.removed);
        assert!(flower.bounced);
        assert!(flower.body.vel.y < 0.0);

        // Next touchdown removes it
        for _ in 0..60 {
            resolve_projectiles(&mut world, 1.0);
        }
        assert!(world.projectiles[0].body.removed);
    }

    #[test]
    fn test_bounced_flower_survives_zero_dt() {
        let mut world = world();
        let size = ProjectileKind::Flower.profile().size;
        let mut flower = Projectile::launch(
            ProjectileKind::Flower,
            Vec2::new(400.0, GROUND_Y - size),
            Facing::Right,
            Vec2::new(2.0, 8.0),
            world.clock_ms,
        );
        flower.body.pos.y = GROUND_Y - size - 1.0;
        world.projectiles.push(flower);

        resolve_projectiles(&mut world, 1.0);
        assert!(world.projectiles[0].bounced);
        assert_eq!(world.projectiles[0].body.rect().bottom(), GROUND_Y);

        resolve_projectiles(&mut world, 0.0);
        assert!(!world.projectiles[0].body.removed);
    }

    #[test]
    fn test_slow_flower_settles_on_first_bounce() {
        let mut world = world();
        let size = ProjectileKind::Flower.profile().size;
        let mut flower = Projectile::launch(
            ProjectileKind::Flower,
            Vec2::new(400.0, GROUND_Y - size),
            Facing::Right,
            Vec2::new(2.0, 1.2),
            world.clock_ms,
        );
        flower.body.pos.y = GROUND_Y - size - 1.0;
        world.projectiles.push(flower);

        // Lands at vy 1.5, rebounds below SETTLE_SPEED
        resolve_projectiles(&mut world, 1.0);
        let flower = &world.projectiles[0];
        assert!(flower.bounced);
        assert!(flower.body.vel.y.abs() < SETTLE_SPEED);
        assert!(flower.body.removed);
    }

    #[test]
    fn test_kiss_keeps_bouncing() {
        let mut world = world();
        let size = ProjectileKind::Kiss.profile().size;
        let mut kiss = Projectile::launch(
            ProjectileKind::Kiss,
            Vec2::new(400.0, GROUND_Y - size),
            Facing::Right,
            Vec2::new(1.0, 0.5),
            world.clock_ms,
        );
        kiss.body.pos.y = GROUND_Y - size;
        world.projectiles.push(kiss);
        for _ in 0..5 {
            resolve_projectiles(&mut world, 1.0);
        }
        assert!(!world.projectiles[0].body.removed);
    }
}

//! Per-frame simulation step
//!
//! Phase order: pause/perk toggles, cosmetics, interlude, player input,
//! enemy behavior, physics, projectiles, prune, then win/lose.

use super::enemy::update_enemies;
use super::physics::step_fighter;
use super::player::update_player;
use super::projectile::ProjectileKind;
use super::state::{Outcome, World};
use super::{combat, fx, waves};
use crate::consts::FRAME_MS;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Short-range kiss
    pub kiss: bool,
    /// Arced flower
    pub flower: bool,
    /// Area-effect bomb
    pub bomb: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Perk activation toggle (one-shot)
    pub toggle_perks: bool,
}

impl TickInput {
    pub fn attack_held(&self, kind: ProjectileKind) -> bool {
        match kind {
            ProjectileKind::Kiss => self.kiss,
            ProjectileKind::Flower => self.flower,
            ProjectileKind::Bomb => self.bomb,
            ProjectileKind::EnemyShot => false,
        }
    }
}

/// Advance the world by `dt` normalized frames
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if input.pause && world.run.running {
        world.run.paused = !world.run.paused;
        log::info!("{}", if world.run.paused { "Paused" } else { "Resumed" });
    }
    if input.toggle_perks {
        world.run.perks_active = !world.run.perks_active;
        log::info!(
            "Perks {}",
            if world.run.perks_active { "on" } else { "off" }
        );
    }

    // Frozen frame stays on screen while paused
    if world.run.paused {
        return;
    }

    fx::update_particles(&mut world.particles, dt);
    fx::decay_shake(&mut world.shake, dt);

    // Game over: only cosmetics keep moving
    if !world.run.running {
        return;
    }

    world.time_ticks += 1;
    world.clock_ms += f64::from(dt * FRAME_MS);

    if world.run.in_interlude() {
        waves::advance_interlude(world, dt);
        return;
    }

    update_player(world, input, dt);
    let mut outcome = update_enemies(world, dt);

    step_fighter(&mut world.player.fighter, dt);
    for enemy in world.enemies.iter_mut() {
        step_fighter(&mut enemy.fighter, dt);
    }

    if outcome.is_none() {
        outcome = combat::resolve_projectiles(world, dt);
    }
    world.prune();

    match outcome {
        Some(Outcome::EnemyDefeated) => waves::on_wave_won(world),
        Some(Outcome::PlayerDefeated) => waves::on_run_lost(world),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::sim::progress::Perk;
    use crate::sim::state::GameEvent;

    fn running() -> World {
        let mut world = World::new(12345, 0);
        waves::start_run(&mut world, false);
        world
    }

    #[test]
    fn test_idle_world_does_not_advance() {
        let mut world = World::new(1, 0);
        tick(&mut world, &TickInput::default(), 1.0);
        assert_eq!(world.time_ticks, 0);
        assert_eq!(world.clock_ms, 0.0);
    }

    #[test]
    fn test_tick_pause() {
        let mut world = running();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut world, &pause, 1.0);
        assert!(world.run.paused);
        let ticks = world.time_ticks;
        let pos = world.player.fighter.body.pos;

        let walk = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut world, &walk, 1.0);
        assert_eq!(world.time_ticks, ticks);
        assert_eq!(world.player.fighter.body.pos, pos);

        // Unpause
        tick(&mut world, &pause, 1.0);
        assert!(!world.run.paused);
        tick(&mut world, &walk, 1.0);
        assert!(world.player.fighter.body.pos.x > pos.x);
    }

    #[test]
    fn test_perk_toggle() {
        let mut world = running();
        let toggle = TickInput {
            toggle_perks: true,
            ..Default::default()
        };
        tick(&mut world, &toggle, 1.0);
        assert!(world.run.perks_active);
        // Toggling does not unlock anything
        assert!(!world.run.unlocks.is_unlocked(Perk::QuickFeet));
        tick(&mut world, &toggle, 1.0);
        assert!(!world.run.perks_active);
    }

    #[test]
    fn test_enemy_kill_starts_interlude() {
        let mut world = running();
        world.enemy_mut().unwrap().fighter.health = 0.5;
        // Drop a bomb right on the enemy
        let at = world.enemy().unwrap().fighter.body.center();
        world.projectiles.push(crate::sim::projectile::Projectile::launch(
            ProjectileKind::Bomb,
            at,
            crate::sim::state::Facing::Right,
            glam::Vec2::ZERO,
            world.clock_ms,
        ));
        tick(&mut world, &TickInput::default(), 1.0);
        assert!(world.run.in_interlude());
        assert_eq!(world.currency.eggs(), 1);
        assert!(world.projectiles.is_empty());

        // Frozen: fighters do not move during the interlude
        let pos = world.player.fighter.body.pos;
        let walk = TickInput {
            right: true,
            kiss: true,
            ..Default::default()
        };
        tick(&mut world, &walk, 1.0);
        assert_eq!(world.player.fighter.body.pos, pos);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_pause_freezes_interlude() {
        let mut world = running();
        waves::on_wave_won(&mut world);
        world.run.paused = true;
        for _ in 0..500 {
            tick(&mut world, &TickInput::default(), 2.0);
        }
        assert_eq!(world.run.wave_index, 0);
        world.run.paused = false;
        for _ in 0..200 {
            tick(&mut world, &TickInput::default(), 1.0);
        }
        assert_eq!(world.run.wave_index, 1);
    }

    #[test]
    fn test_player_death_ends_run() {
        let mut world = running();
        world.player.fighter.health = 1.0;
        let at = world.player.fighter.body.center();
        world.projectiles.push(crate::sim::projectile::Projectile::launch(
            ProjectileKind::EnemyShot,
            at,
            crate::sim::state::Facing::Left,
            glam::Vec2::ZERO,
            world.clock_ms,
        ));
        tick(&mut world, &TickInput::default(), 1.0);
        assert!(!world.run.running);
        assert!(world.run.lost);
        assert!(world
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::RunLost { .. })));

        // Pause input is ignored once the run is over
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut world, &pause, 1.0);
        assert!(!world.run.paused);
    }

    #[test]
    fn test_determinism() {
        let mut a = running();
        let mut b = running();
        let inputs = [
            TickInput {
                right: true,
                bomb: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                flower: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..120 {
            for input in &inputs {
                tick(&mut a, input, 1.0);
                tick(&mut b, input, 1.0);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.fighter.body.pos, b.player.fighter.body.pos);
        assert_eq!(a.projectiles.len(), b.projectiles.len());
        assert_eq!(a.currency, b.currency);
    }

    fn input_from_bits(bits: u8) -> TickInput {
        TickInput {
            left: bits & 1 != 0,
            right: bits & 2 != 0,
            jump: bits & 4 != 0,
            kiss: bits & 8 != 0,
            flower: bits & 16 != 0,
            bomb: bits & 32 != 0,
            pause: false,
            toggle_perks: bits & 64 != 0,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_currency_never_decreases(
            seed in any::<u64>(),
            frames in proptest::collection::vec((any::<u8>(), 0.0f32..2.0), 1..600)
        ) {
            let mut world = World::new(seed, 0);
            waves::start_run(&mut world, false);
            let mut last = world.currency.eggs();
            let mut wins = 0u64;
            for (bits, dt) in frames {
                tick(&mut world, &input_from_bits(bits), dt);
                wins += world
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::WaveWon { .. }))
                    .count() as u64;
                let eggs = world.currency.eggs();
                prop_assert!(eggs >= last);
                last = eggs;
            }
            prop_assert_eq!(last, wins);
        }
    }
}

//! Wave table, difficulty cycles and run progression
//!
//! Waves cycle through [`WAVE_TEMPLATES`]. Each completed pass through the
//! table is a cycle: +25% health and +5% speed per cycle, and a `+N` suffix
//! on the name.

use glam::Vec2;

use super::fx;
use super::progress::Perk;
use super::state::{Body, Enemy, EnemyAi, Facing, Fighter, GameEvent, Player, World};
use crate::consts::*;

/// Static description of one wave opponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveTemplate {
    pub name: &'static str,
    pub base_health: f32,
    pub base_speed: f32,
    /// Body and accent colors
    pub colors: [u32; 2],
}

pub const WAVE_TEMPLATES: [WaveTemplate; 4] = [
    WaveTemplate {
        name: "Grumpy Goose",
        base_health: 90.0,
        base_speed: 2.2,
        colors: [0xf2f2f2, 0xff9f1c],
    },
    WaveTemplate {
        name: "Rooster Rex",
        base_health: 120.0,
        base_speed: 2.6,
        colors: [0xc1121f, 0xffd166],
    },
    WaveTemplate {
        name: "Fox Baron",
        base_health: 150.0,
        base_speed: 3.0,
        colors: [0xe76f51, 0x264653],
    },
    WaveTemplate {
        name: "Crow Queen",
        base_health: 180.0,
        base_speed: 3.4,
        colors: [0x22223b, 0x9a8c98],
    },
];

const HEALTH_PER_CYCLE: f32 = 0.25;
const SPEED_PER_CYCLE: f32 = 0.05;
const WIN_SHAKE: f32 = 0.8;
const WIN_COLOR: u32 = 0xffd700;

/// Template and cycle for a wave index
pub fn template_for(index: u32) -> (&'static WaveTemplate, u32) {
    let count = WAVE_TEMPLATES.len() as u32;
    let template = &WAVE_TEMPLATES[(index % count) as usize];
    (template, index / count)
}

/// Build a fresh enemy for a wave index, standing at its spawn point
pub fn build_enemy(index: u32) -> Enemy {
    let (template, cycle) = template_for(index);
    let health = template.base_health * (1.0 + HEALTH_PER_CYCLE * cycle as f32);
    let speed = template.base_speed * (1.0 + SPEED_PER_CYCLE * cycle as f32);
    let name = if cycle > 0 {
        format!("{} +{}", template.name, cycle)
    } else {
        template.name.to_string()
    };

    let mut body = Body::grounded(ENEMY_SPAWN_X, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT));
    body.facing = Facing::Left;
    Enemy {
        fighter: Fighter::new(body, health, ENEMY_INVULN_MS),
        ai: EnemyAi::default(),
        speed,
        name,
        colors: template.colors,
        cycle,
    }
}

/// Replace the current enemy with a fresh one for `index`
pub fn spawn_wave(world: &mut World, index: u32) {
    let enemy = build_enemy(index);
    log::info!(
        "Wave {} spawned: {} ({:.0} hp, speed {:.2})",
        index + 1,
        enemy.name,
        enemy.fighter.max_health,
        enemy.speed
    );
    world.emit(GameEvent::WaveSpawned {
        index,
        name: enemy.name.clone(),
    });
    world.enemies.clear();
    world.enemies.push(enemy);
}

/// Begin a run at wave 0 with a fresh player.
///
/// `reset_progress` zeroes the egg counter. Perk unlocks are kept either way.
pub fn start_run(world: &mut World, reset_progress: bool) {
    if reset_progress {
        world.currency.reset();
    }
    world.player = Player::default();
    world.projectiles.clear();
    world.particles.clear();
    world.ambient.clear();
    world.shake = 0.0;
    world.run.running = true;
    world.run.paused = false;
    world.run.lost = false;
    world.run.wave_index = 0;
    world.run.interlude_ms = 0.0;
    log::info!(
        "Run started (eggs: {}, reset: {})",
        world.currency.eggs(),
        reset_progress
    );
    world.emit(GameEvent::RunStarted { reset_progress });
    spawn_wave(world, 0);
}

/// Enemy down: award an egg, check unlocks, start the interlude
pub fn on_wave_won(world: &mut World) {
    let index = world.run.wave_index;
    let eggs = world.currency.award_egg();
    log::info!("Wave {} cleared, eggs: {}", index + 1, eggs);
    world.emit(GameEvent::WaveWon { index, eggs });

    if let Some(perk) = Perk::for_cleared_wave(index) {
        if world.run.unlocks.unlock(perk) {
            log::info!("Perk unlocked: {}", perk.as_str());
            world.emit(GameEvent::PerkUnlocked(perk));
        }
    }

    world.projectiles.clear();
    world.run.interlude_ms = INTERLUDE_MS;

    let at = world
        .enemy()
        .map(|e| e.fighter.body.center())
        .unwrap_or(Vec2::new(FIELD_WIDTH / 2.0, GROUND_Y / 2.0));
    fx::spawn_burst(&mut world.particles, &mut world.rng, at, WIN_COLOR, 40, 8.0);
    fx::add_shake(&mut world.shake, WIN_SHAKE);
    fx::populate_ambient(&mut world.ambient, &mut world.rng);
}

/// Count the interlude down; when it runs out, move to the next wave.
///
/// Tick-based, so pausing also pauses the countdown. Fires exactly once.
pub fn advance_interlude(world: &mut World, dt: f32) {
    if !world.run.in_interlude() {
        return;
    }
    world.projectiles.clear();
    fx::update_ambient(&mut world.ambient, dt);

    world.run.interlude_ms -= dt * FRAME_MS;
    if world.run.interlude_ms <= 0.0 {
        world.run.interlude_ms = 0.0;
        world.ambient.clear();
        world.run.wave_index += 1;
        let index = world.run.wave_index;
        spawn_wave(world, index);
    }
}

/// Player down: halt the run and offer a score
pub fn on_run_lost(world: &mut World) {
    world.run.running = false;
    world.run.lost = true;
    world.projectiles.clear();
    let score = world.score();
    log::info!(
        "Run lost on wave {} (eggs: {}, score: {})",
        world.run.wave_index + 1,
        world.currency.eggs(),
        score
    );
    world.emit(GameEvent::RunLost { score });
}

//! Rendering
//!
//! The simulation is flattened into a list of 2D shapes ([`shapes`]) that a
//! backend paints. The browser build paints onto a Canvas2D context; the
//! native build renders the HUD as text.

pub mod shapes;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::sim::{AmbientSprite, Enemy, Particle, Perk, Player, Projectile, World};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{Shape, build_scene};
pub use text::TextRenderer;

/// Numbers and flags shown over the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub health: f32,
    pub max_health: f32,
    pub eggs: u64,
    /// 1-based for display
    pub wave: u32,
    pub enemy_name: Option<String>,
    pub enemy_health: f32,
    pub quick_feet: bool,
    pub flutter: bool,
    pub perks_active: bool,
    pub paused: bool,
    pub interlude: bool,
    pub game_over: bool,
    pub score: u64,
    pub fps: Option<u32>,
}

/// Borrowed view of everything a frame needs
pub struct FrameView<'a> {
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub particles: &'a [Particle],
    pub ambient: &'a [AmbientSprite],
    pub hud: Hud,
    /// Camera shake, 0-1 (already zeroed when disabled)
    pub shake: f32,
    pub time_ticks: u64,
}

impl<'a> FrameView<'a> {
    pub fn new(world: &'a World, fps: Option<u32>, shake_enabled: bool) -> Self {
        let enemy = world.enemy();
        let hud = Hud {
            health: world.player.fighter.health,
            max_health: world.player.fighter.max_health,
            eggs: world.currency.eggs(),
            wave: world.run.wave_index + 1,
            enemy_name: enemy.map(|e| e.name.clone()),
            enemy_health: enemy.map_or(0.0, |e| e.fighter.health_fraction()),
            quick_feet: world.run.unlocks.is_unlocked(Perk::QuickFeet),
            flutter: world.run.unlocks.is_unlocked(Perk::Flutter),
            perks_active: world.run.perks_active,
            paused: world.run.paused,
            interlude: world.run.in_interlude(),
            game_over: world.run.lost,
            score: world.score(),
            fps,
        };
        Self {
            player: &world.player,
            enemies: &world.enemies,
            projectiles: &world.projectiles,
            particles: &world.particles,
            ambient: &world.ambient,
            hud,
            shake: if shake_enabled { world.shake } else { 0.0 },
            time_ticks: world.time_ticks,
        }
    }

    /// Camera offset for the current shake
    pub fn shake_offset(&self) -> Vec2 {
        shake_offset(self.shake, self.time_ticks)
    }
}

/// Maximum camera displacement at full shake (px)
pub const MAX_SHAKE_PX: f32 = 12.0;

/// Deterministic jitter so the sim RNG is left alone
pub fn shake_offset(shake: f32, tick: u64) -> Vec2 {
    if shake <= 0.0 {
        return Vec2::ZERO;
    }
    let t = tick as f32;
    let amount = shake * shake * MAX_SHAKE_PX;
    Vec2::new((t * 1.7).sin(), (t * 2.3).cos()) * amount
}

/// A backend that paints frames
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>);
}

//! Egg Brawl - A single-screen arcade brawler
//!
//! Core modules:
//! - `sim`: Simulation world (physics, combat, enemy behavior, waves)
//! - `app`: Frame driver and lifecycle entry points
//! - `persistence`: Key-value storage that never fails the caller
//! - `platform`: Input actions and key bindings
//! - `audio`: Cue requests (Web Audio on wasm32)
//! - `renderer`: Frame snapshot handed to whatever draws it

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::Game;
pub use highscores::{HighScores, ScoreRecord};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame interval; dt = 1.0 means one 60 Hz frame
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Worst-case dt after a stall (tab backgrounding, breakpoints)
    pub const MAX_DT: f32 = 2.0;

    /// Playfield dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    pub const GROUND_Y: f32 = 480.0;

    /// Downward acceleration, px per frame²
    pub const GRAVITY: f32 = 0.6;
    /// Horizontal velocity retained per frame on the ground
    pub const FRICTION: f32 = 0.8;
    /// Horizontal velocity retained per frame in the air
    pub const AIR_FRICTION: f32 = 0.95;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP: f32 = 13.0;
    pub const PLAYER_INVULN_MS: f32 = 300.0;
    pub const PLAYER_SPAWN_X: f32 = 120.0;

    /// Perk tuning
    pub const QUICK_FEET_MULTIPLIER: f32 = 1.35;
    pub const FLUTTER_MAX_FALL: f32 = 1.5;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 56.0;
    pub const ENEMY_HEIGHT: f32 = 64.0;
    pub const ENEMY_INVULN_MS: f32 = 120.0;
    pub const ENEMY_SPAWN_X: f32 = FIELD_WIDTH - 140.0;

    /// Enemy behavior
    pub const NEAR_THRESHOLD: f32 = 90.0;
    pub const APPROACH_ACCEL: f32 = 0.35;
    pub const IDLE_DECAY: f32 = 0.85;
    pub const MELEE_RANGE: f32 = 100.0;
    pub const MELEE_WINDUP_MS: f32 = 250.0;
    pub const MELEE_DAMAGE: f32 = 14.0;
    pub const MELEE_REACH: f32 = 50.0;
    pub const MELEE_HEIGHT: f32 = 40.0;
    pub const MELEE_COOLDOWN_MS: (f32, f32) = (600.0, 1200.0);
    pub const MELEE_INITIAL_COOLDOWN_MS: f32 = 800.0;
    pub const RANGED_COOLDOWN_MS: (f32, f32) = (1200.0, 2000.0);
    pub const RANGED_INITIAL_COOLDOWN_MS: f32 = 1500.0;

    /// Knockback impulses (horizontal magnitude, vertical velocity)
    pub const HIT_KNOCKBACK: (f32, f32) = (6.0, -4.0);
    pub const MELEE_KNOCKBACK: (f32, f32) = (8.0, -5.0);
    pub const BLAST_KNOCKBACK: (f32, f32) = (9.0, -7.0);

    /// Projectiles
    pub const PROJECTILE_TTL_MS: f32 = 2500.0;
    pub const BOUNCE_RESTITUTION: f32 = 0.5;
    pub const BOUNCE_DRAG: f32 = 0.7;
    /// Below this vertical speed a bounce settles and the projectile is gone
    pub const SETTLE_SPEED: f32 = 1.0;

    /// Between-wave celebration
    pub const INTERLUDE_MS: f32 = 2500.0;
    pub const AMBIENT_SPRITES: usize = 14;

    /// Cosmetic particle cap
    pub const MAX_PARTICLES: usize = 300;

    /// Score weights
    pub const SCORE_PER_EGG: u64 = 100;
    pub const SCORE_PER_WAVE: u64 = 10;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `dt` handed to [`tick`]
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod combat;
pub mod enemy;
pub mod fx;
pub mod geom;
pub mod physics;
pub mod player;
pub mod progress;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod waves;

pub use clock::FrameClock;
pub use geom::Rect;
pub use progress::{Currency, Perk, Unlocks};
pub use projectile::{Projectile, ProjectileKind};
pub use state::{
    AmbientSprite, Body, Enemy, Facing, Fighter, GameEvent, Outcome, Particle, Player, RunState,
    Side, World,
};
pub use tick::{TickInput, tick};
pub use waves::{WAVE_TEMPLATES, start_run};

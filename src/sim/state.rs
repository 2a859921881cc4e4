//! Simulation world and core entity types
//!
//! Everything one tick reads or writes hangs off [`World`]; there is no
//! module-level state. Fighters are composed from a [`Body`] plus a
//! [`Fighter`] health block, and the two roles ([`Player`], [`Enemy`]) share
//! the [`Combatant`] seam.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::progress::{Currency, Perk, Unlocks};
use super::projectile::{Projectile, ProjectileKind};
use crate::consts::*;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing for a horizontal offset; `None` when the offset is zero
    pub fn from_dx(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Which side of the fight something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Base moving body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    /// Pruned at the end of the tick
    pub removed: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            facing: Facing::Right,
            on_ground: false,
            removed: false,
        }
    }

    /// Body standing on the ground line with its left edge at `x`
    pub fn grounded(x: f32, size: Vec2) -> Self {
        let mut body = Self::new(Vec2::new(x, GROUND_Y - size.y), size);
        body.on_ground = true;
        body
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Health block shared by everything that can be hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub body: Body,
    pub max_health: f32,
    pub health: f32,
    /// Remaining invulnerability (ms); damage is ignored while > 0
    pub invuln_ms: f32,
    /// Invulnerability granted by each landed hit
    pub invuln_on_hit_ms: f32,
    /// Animation accumulator for the renderer
    pub anim_phase: f32,
}

impl Fighter {
    pub fn new(body: Body, max_health: f32, invuln_on_hit_ms: f32) -> Self {
        Self {
            body,
            max_health,
            health: max_health,
            invuln_ms: 0.0,
            invuln_on_hit_ms,
            anim_phase: 0.0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ms > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage. Returns true if this hit killed the fighter.
    ///
    /// A no-op returning false while the invulnerability window is open.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
        self.invuln_ms = self.invuln_on_hit_ms;
        self.health <= 0.0
    }

    /// Shove the fighter `direction` (±1) with a fixed impulse
    pub fn knock_back(&mut self, direction: f32, impulse: (f32, f32)) {
        self.body.vel.x = direction.signum() * impulse.0;
        self.body.vel.y = impulse.1;
        self.body.on_ground = false;
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

/// Shared access for anything that stands in the arena and takes hits
pub trait Combatant {
    fn fighter(&self) -> &Fighter;
    fn fighter_mut(&mut self) -> &mut Fighter;
    fn side(&self) -> Side;
}

/// Per-attack cooldown timers (ms)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackCooldowns {
    pub kiss_ms: f32,
    pub flower_ms: f32,
    pub bomb_ms: f32,
}

impl AttackCooldowns {
    pub fn slot_mut(&mut self, kind: ProjectileKind) -> Option<&mut f32> {
        match kind {
            ProjectileKind::Kiss => Some(&mut self.kiss_ms),
            ProjectileKind::Flower => Some(&mut self.flower_ms),
            ProjectileKind::Bomb => Some(&mut self.bomb_ms),
            ProjectileKind::EnemyShot => None,
        }
    }

    pub fn tick(&mut self, elapsed_ms: f32) {
        for slot in [&mut self.kiss_ms, &mut self.flower_ms, &mut self.bomb_ms] {
            *slot = (*slot - elapsed_ms).max(0.0);
        }
    }
}

/// The player-controlled fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub fighter: Fighter,
    pub cooldowns: AttackCooldowns,
    pub speed: f32,
    pub jump: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            fighter: Fighter::new(
                Body::grounded(PLAYER_SPAWN_X, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
                PLAYER_MAX_HEALTH,
                PLAYER_INVULN_MS,
            ),
            cooldowns: AttackCooldowns::default(),
            speed: PLAYER_SPEED,
            jump: PLAYER_JUMP,
        }
    }
}

impl Combatant for Player {
    fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    fn fighter_mut(&mut self) -> &mut Fighter {
        &mut self.fighter
    }

    fn side(&self) -> Side {
        Side::Player
    }
}

/// Enemy behavior timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyAi {
    pub melee_cooldown_ms: f32,
    /// Telegraphed melee in progress; the hit lands when this runs out
    pub windup_ms: Option<f32>,
    pub ranged_cooldown_ms: f32,
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self {
            melee_cooldown_ms: MELEE_INITIAL_COOLDOWN_MS,
            windup_ms: None,
            ranged_cooldown_ms: RANGED_INITIAL_COOLDOWN_MS,
        }
    }
}

/// The current wave's opponent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub fighter: Fighter,
    pub ai: EnemyAi,
    pub speed: f32,
    pub name: String,
    pub colors: [u32; 2],
    /// Completed passes through the template list when spawned
    pub cycle: u32,
}

impl Enemy {
    pub fn is_winding_up(&self) -> bool {
        self.ai.windup_ms.is_some()
    }

    /// Melee strike area directly in front of the enemy
    pub fn melee_hitbox(&self) -> Rect {
        let rect = self.fighter.body.rect();
        let x = match self.fighter.body.facing {
            Facing::Right => rect.right(),
            Facing::Left => rect.x - MELEE_REACH,
        };
        let y = rect.center().y - MELEE_HEIGHT / 2.0;
        Rect::new(x, y, MELEE_REACH, MELEE_HEIGHT)
    }
}

impl Combatant for Enemy {
    fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    fn fighter_mut(&mut self) -> &mut Fighter {
        &mut self.fighter
    }

    fn side(&self) -> Side {
        Side::Enemy
    }
}

/// A particle for visual effects (no gameplay effect)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life_ms: f32,
    pub max_life_ms: f32,
    pub color: u32,
    pub size: f32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 when expired
    pub fn alpha(&self) -> f32 {
        if self.max_life_ms > 0.0 {
            (self.life_ms / self.max_life_ms).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Celebratory chick hopping around during an interlude
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientSprite {
    pub pos: Vec2,
    pub vel: Vec2,
    pub phase: f32,
    pub color: u32,
    pub size: f32,
}

/// Things that happened during a tick, drained by the app for audio/persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { reset_progress: bool },
    Shot(ProjectileKind),
    FighterHit { side: Side, damage: f32 },
    Explosion { at: Vec2 },
    MeleeWindup,
    WaveSpawned { index: u32, name: String },
    WaveWon { index: u32, eggs: u64 },
    PerkUnlocked(Perk),
    RunLost { score: u64 },
}

/// Fight-ending result reported by a resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    EnemyDefeated,
    PlayerDefeated,
}

/// Run lifecycle flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub running: bool,
    pub paused: bool,
    /// Last run ended with the player's defeat
    pub lost: bool,
    /// Never decreases within a run
    pub wave_index: u32,
    pub unlocks: Unlocks,
    /// Player toggle; unlocked perks only apply while this is on
    pub perks_active: bool,
    /// Remaining interlude (ms); gameplay is frozen while > 0
    pub interlude_ms: f32,
}

impl RunState {
    pub fn in_interlude(&self) -> bool {
        self.interlude_ms > 0.0
    }

    /// Unlocked and switched on
    pub fn perk_applies(&self, perk: Perk) -> bool {
        self.perks_active && self.unlocks.is_unlocked(perk)
    }
}

/// Complete simulation state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    /// Active enemies; a single wave opponent today
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Interlude celebration sprites (not gameplay-affecting)
    pub ambient: Vec<AmbientSprite>,
    pub run: RunState,
    pub currency: Currency,
    /// Camera shake intensity, 0-1
    pub shake: f32,
    /// Simulation time (ms), advances only while gameplay runs
    pub clock_ms: f64,
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create an idle world; call `waves::start_run` to begin playing
    pub fn new(seed: u64, eggs: u64) -> Self {
        Self {
            player: Player::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            ambient: Vec::new(),
            run: RunState::default(),
            currency: Currency::new(eggs),
            shake: 0.0,
            clock_ms: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        self.enemies.first()
    }

    pub fn enemy_mut(&mut self) -> Option<&mut Enemy> {
        self.enemies.first_mut()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop entities marked for removal
    pub fn prune(&mut self) {
        self.projectiles.retain(|p| !p.body.removed);
    }

    /// Score for the current progression
    pub fn score(&self) -> u64 {
        super::progress::score(self.currency.eggs(), self.run.wave_index)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn fighter() -> Fighter {
        Fighter::new(Body::grounded(0.0, Vec2::new(10.0, 10.0)), 100.0, 300.0)
    }

    #[test]
    fn test_take_damage_opens_invulnerability() {
        let mut f = fighter();
        assert!(!f.take_damage(14.0));
        assert_eq!(f.health, 86.0);
        assert!(f.is_invulnerable());
        assert_eq!(f.invuln_ms, 300.0);
    }

    #[test]
    fn test_damage_while_invulnerable_is_noop() {
        let mut f = fighter();
        f.invuln_ms = 50.0;
        assert!(!f.take_damage(500.0));
        assert_eq!(f.health, 100.0);
        assert_eq!(f.invuln_ms, 50.0);
    }

    #[test]
    fn test_lethal_damage_clamps_to_zero() {
        let mut f = fighter();
        assert!(f.take_damage(250.0));
        assert_eq!(f.health, 0.0);
        assert!(f.is_dead());
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let mut f = fighter();
        f.health = 40.0;
        f.take_damage(-30.0);
        assert_eq!(f.health, 40.0);
    }

    #[test]
    fn test_knock_back_direction() {
        let mut f = fighter();
        f.knock_back(-3.0, HIT_KNOCKBACK);
        assert_eq!(f.body.vel, Vec2::new(-HIT_KNOCKBACK.0, HIT_KNOCKBACK.1));
        assert!(!f.body.on_ground);
    }

    #[test]
    fn test_melee_hitbox_follows_facing() {
        let mut world = World::new(1, 0);
        world.enemies.push(crate::sim::waves::build_enemy(0));
        let enemy = world.enemy_mut().unwrap();
        enemy.fighter.body.facing = Facing::Left;
        let left = enemy.melee_hitbox();
        assert_eq!(left.right(), enemy.fighter.body.pos.x);
        enemy.fighter.body.facing = Facing::Right;
        let right = enemy.melee_hitbox();
        assert_eq!(right.x, enemy.fighter.body.rect().right());
    }

    #[test]
    fn test_cooldowns_floor_at_zero() {
        let mut cd = AttackCooldowns {
            kiss_ms: 10.0,
            flower_ms: 100.0,
            bomb_ms: 0.0,
        };
        cd.tick(16.0);
        assert_eq!(cd.kiss_ms, 0.0);
        assert_eq!(cd.flower_ms, 84.0);
        assert_eq!(cd.bomb_ms, 0.0);
        assert!(cd.slot_mut(ProjectileKind::EnemyShot).is_none());
    }

    #[test]
    fn test_new_world_is_idle() {
        let world = World::new(7, 5);
        assert!(!world.run.running);
        assert!(world.enemies.is_empty());
        assert_eq!(world.currency.eggs(), 5);
        assert_eq!(world.score(), 500);
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(
            hits in proptest::collection::vec((-50.0f32..200.0, 0.0f32..400.0), 0..40)
        ) {
            let mut f = fighter();
            for (damage, elapsed) in hits {
                f.take_damage(damage);
                f.invuln_ms = (f.invuln_ms - elapsed).max(0.0);
                prop_assert!(f.health >= 0.0 && f.health <= f.max_health);
            }
        }
    }
}

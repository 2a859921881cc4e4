//! Projectile kinds and their per-kind behavior table
//!
//! Every kind-specific number (damage, gravity, ground behavior, owner) lives
//! in one table indexed by [`ProjectileKind`]. Motion and collision code reads
//! the table instead of branching on the kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Body, Facing, Side};
use crate::consts::*;

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Short-range kiss, flies flat
    Kiss,
    /// Arced flower toss
    Flower,
    /// Area-effect bomb, explodes on contact
    Bomb,
    /// Enemy's lobbed shot
    EnemyShot,
}

/// What happens when a projectile touches the ground line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundPolicy {
    /// Bounce every time it touches down
    Bounce,
    /// Bounce once, vanish on the next touch or when the bounce settles
    BounceOnce,
    /// Explode on contact
    Detonate,
}

/// Static tuning for one projectile kind
#[derive(Debug, Clone, Copy)]
pub struct ProjectileProfile {
    pub damage: f32,
    /// Fraction of gravity applied per frame (px/frame²)
    pub gravity: f32,
    /// Launch velocity for a right-facing thrower
    pub launch: Vec2,
    /// Rotation per frame (radians)
    pub spin: f32,
    /// Blast radius; zero for everything except the bomb
    pub radius: f32,
    /// Square hitbox edge
    pub size: f32,
    /// Player attack cooldown after throwing one
    pub cooldown_ms: f32,
    pub ground: GroundPolicy,
    pub owner: Side,
    pub color: u32,
}

static PROFILES: [ProjectileProfile; 4] = [
    // Kiss
    ProjectileProfile {
        damage: 8.0,
        gravity: 0.0,
        launch: Vec2::new(10.0, 0.0),
        spin: 0.0,
        radius: 0.0,
        size: 14.0,
        cooldown_ms: 250.0,
        ground: GroundPolicy::Bounce,
        owner: Side::Player,
        color: 0xff4f9a,
    },
    // Flower
    ProjectileProfile {
        damage: 12.0,
        gravity: 0.30,
        launch: Vec2::new(7.0, -8.0),
        spin: 0.2,
        radius: 0.0,
        size: 16.0,
        cooldown_ms: 450.0,
        ground: GroundPolicy::BounceOnce,
        owner: Side::Player,
        color: 0xffd23f,
    },
    // Bomb
    ProjectileProfile {
        damage: 22.0,
        gravity: 0.45,
        launch: Vec2::new(5.0, -9.0),
        spin: 0.15,
        radius: 90.0,
        size: 18.0,
        cooldown_ms: 1100.0,
        ground: GroundPolicy::Detonate,
        owner: Side::Player,
        color: 0x333344,
    },
    // EnemyShot (launch is randomized by the thrower)
    ProjectileProfile {
        damage: 10.0,
        gravity: 0.30,
        launch: Vec2::new(6.0, -5.5),
        spin: 0.25,
        radius: 0.0,
        size: 14.0,
        cooldown_ms: 0.0,
        ground: GroundPolicy::BounceOnce,
        owner: Side::Enemy,
        color: 0x7a3cff,
    },
];

impl ProjectileKind {
    /// Kinds the player can throw, in key order
    pub const PLAYER_ATTACKS: [ProjectileKind; 3] =
        [ProjectileKind::Kiss, ProjectileKind::Flower, ProjectileKind::Bomb];

    pub fn profile(self) -> &'static ProjectileProfile {
        &PROFILES[self as usize]
    }

    pub fn owner(self) -> Side {
        self.profile().owner
    }

    pub fn is_area_effect(self) -> bool {
        self.profile().radius > 0.0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Kiss => "kiss",
            ProjectileKind::Flower => "flower",
            ProjectileKind::Bomb => "bomb",
            ProjectileKind::EnemyShot => "enemy shot",
        }
    }
}

/// A live projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub kind: ProjectileKind,
    pub damage: f32,
    /// Simulation time at spawn
    pub spawned_at_ms: f64,
    pub ttl_ms: f32,
    pub rotation: f32,
    pub spin: f32,
    pub radius: f32,
    /// Already bounced once (for `GroundPolicy::BounceOnce`)
    pub bounced: bool,
}

impl Projectile {
    /// Spawn a projectile centered on `origin`
    pub fn launch(
        kind: ProjectileKind,
        origin: Vec2,
        facing: Facing,
        velocity: Vec2,
        now_ms: f64,
    ) -> Self {
        let profile = kind.profile();
        let size = Vec2::splat(profile.size);
        let mut body = Body::new(origin - size / 2.0, size);
        body.vel = velocity;
        body.facing = facing;
        Self {
            body,
            kind,
            damage: profile.damage,
            spawned_at_ms: now_ms,
            ttl_ms: PROJECTILE_TTL_MS,
            rotation: 0.0,
            spin: profile.spin * facing.sign(),
            radius: profile.radius,
            bounced: false,
        }
    }

    /// Spawn with the kind's default launch velocity mirrored for `facing`
    pub fn thrown(kind: ProjectileKind, origin: Vec2, facing: Facing, now_ms: f64) -> Self {
        let launch = kind.profile().launch;
        let velocity = Vec2::new(launch.x * facing.sign(), launch.y);
        Self::launch(kind, origin, facing, velocity, now_ms)
    }

    pub fn age_ms(&self, now_ms: f64) -> f32 {
        (now_ms - self.spawned_at_ms) as f32
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        self.age_ms(now_ms) > self.ttl_ms
    }

    /// Integrate one step of kind-specific ballistic motion
    pub fn advance(&mut self, dt: f32) {
        self.body.vel.y += self.kind.profile().gravity * dt;
        self.body.pos += self.body.vel * dt;
        self.rotation += self.spin * dt;
    }

    /// Ground contact only counts while falling, so a fresh bounce
    /// resting on the line is not a second touchdown
    pub fn touches_ground(&self) -> bool {
        self.body.vel.y >= 0.0 && self.body.rect().bottom() >= GROUND_Y
    }

    /// Reflect off the ground line with damping
    pub fn bounce(&mut self) {
        self.body.pos.y = GROUND_Y - self.body.size.y;
        self.body.vel.y = -self.body.vel.y.abs() * BOUNCE_RESTITUTION;
        self.body.vel.x *= BOUNCE_DRAG;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_bomb_has_radius() {
        assert!(ProjectileKind::Bomb.is_area_effect());
        assert!(!ProjectileKind::Kiss.is_area_effect());
        assert!(!ProjectileKind::Flower.is_area_effect());
        assert!(!ProjectileKind::EnemyShot.is_area_effect());
    }

    #[test]
    fn test_gravity_ordering() {
        let kiss = ProjectileKind::Kiss.profile().gravity;
        let flower = ProjectileKind::Flower.profile().gravity;
        let bomb = ProjectileKind::Bomb.profile().gravity;
        assert_eq!(kiss, 0.0);
        assert!(flower > kiss);
        assert!(bomb > flower);
    }

    #[test]
    fn test_owners() {
        for kind in ProjectileKind::PLAYER_ATTACKS {
            assert_eq!(kind.owner(), Side::Player);
        }
        assert_eq!(ProjectileKind::EnemyShot.owner(), Side::Enemy);
    }

    #[test]
    fn test_thrown_mirrors_facing() {
        let left = Projectile::thrown(ProjectileKind::Flower, Vec2::ZERO, Facing::Left, 0.0);
        let right = Projectile::thrown(ProjectileKind::Flower, Vec2::ZERO, Facing::Right, 0.0);
        assert_eq!(left.body.vel.x, -right.body.vel.x);
        assert_eq!(left.body.vel.y, right.body.vel.y);
        assert_eq!(left.body.center(), Vec2::ZERO);
    }

    #[test]
    fn test_expiry() {
        let p = Projectile::thrown(ProjectileKind::Kiss, Vec2::ZERO, Facing::Right, 1000.0);
        assert!(!p.expired(1000.0 + PROJECTILE_TTL_MS as f64));
        assert!(p.expired(1000.0 + PROJECTILE_TTL_MS as f64 + 1.0));
    }

    #[test]
    fn test_bounce_inverts_and_damps() {
        let mut p = Projectile::thrown(ProjectileKind::Flower, Vec2::ZERO, Facing::Right, 0.0);
        p.body.pos.y = GROUND_Y;
        p.body.vel = Vec2::new(4.0, 6.0);
        p.bounce();
        assert_eq!(p.body.vel.y, -3.0);
        assert!((p.body.vel.x - 2.8).abs() < 1e-5);
        assert_eq!(p.body.rect().bottom(), GROUND_Y);
    }
}

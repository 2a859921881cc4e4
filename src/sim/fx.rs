//! Cosmetic effects: particle bursts, interlude chicks, camera shake
//!
//! Nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{AmbientSprite, Particle};
use crate::consts::*;

/// Particle fall acceleration (px/frame²)
const PARTICLE_GRAVITY: f32 = 0.25;
/// Shake lost per frame
const SHAKE_DECAY: f32 = 0.9;

const CHICK_COLORS: [u32; 3] = [0xffe066, 0xfff3b0, 0xffc94d];

/// Spray `count` particles out of `at`
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    at: Vec2,
    color: u32,
    count: usize,
    speed: f32,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let magnitude = speed * rng.random_range(0.4..1.0);
        let life = rng.random_range(300.0..700.0);
        particles.push(Particle {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * magnitude,
            life_ms: life,
            max_life_ms: life,
            color,
            size: rng.random_range(2.0..5.0),
        });
    }
}

pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.vel.y += PARTICLE_GRAVITY * dt;
        particle.pos += particle.vel * dt;
        particle.life_ms -= dt * FRAME_MS;
    }
    particles.retain(|p| p.life_ms > 0.0);
}

/// Fill the stage with hopping chicks for the interlude
pub fn populate_ambient(ambient: &mut Vec<AmbientSprite>, rng: &mut Pcg32) {
    ambient.clear();
    for i in 0..AMBIENT_SPRITES {
        let size = rng.random_range(10.0..18.0);
        ambient.push(AmbientSprite {
            pos: Vec2::new(
                rng.random_range(0.0..FIELD_WIDTH - size),
                rng.random_range(-120.0..GROUND_Y - 200.0),
            ),
            vel: Vec2::new(rng.random_range(-2.5..2.5), 0.0),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            color: CHICK_COLORS[i % CHICK_COLORS.len()],
            size,
        });
    }
}

/// Hop chicks along the ground and off the walls
pub fn update_ambient(ambient: &mut [AmbientSprite], dt: f32) {
    for chick in ambient.iter_mut() {
        chick.vel.y += GRAVITY * dt;
        chick.pos += chick.vel * dt;
        chick.phase += dt * 0.2;

        let floor = GROUND_Y - chick.size;
        if chick.pos.y >= floor {
            chick.pos.y = floor;
            chick.vel.y = -(4.0 + chick.phase.sin().abs() * 4.0);
        }
        let max_x = FIELD_WIDTH - chick.size;
        if chick.pos.x <= 0.0 || chick.pos.x >= max_x {
            chick.pos.x = chick.pos.x.clamp(0.0, max_x);
            chick.vel.x = -chick.vel.x;
        }
    }
}

pub fn add_shake(shake: &mut f32, amount: f32) {
    *shake = (*shake + amount).min(1.0);
}

pub fn decay_shake(shake: &mut f32, dt: f32) {
    *shake *= SHAKE_DECAY.powf(dt);
    if *shake < 0.01 {
        *shake = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0, MAX_PARTICLES + 40, 5.0);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0, 12, 5.0);
        // 700 ms max life, 60 frames = 1000 ms
        for _ in 0..60 {
            update_particles(&mut particles, 1.0);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_ambient_stays_in_field() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut ambient = Vec::new();
        populate_ambient(&mut ambient, &mut rng);
        assert_eq!(ambient.len(), AMBIENT_SPRITES);
        for _ in 0..300 {
            update_ambient(&mut ambient, 1.5);
        }
        for chick in &ambient {
            assert!(chick.pos.y <= GROUND_Y - chick.size);
            assert!(chick.pos.x >= 0.0 && chick.pos.x <= FIELD_WIDTH - chick.size);
        }
    }

    #[test]
    fn test_shake_saturates_and_decays() {
        let mut shake = 0.0;
        add_shake(&mut shake, 0.7);
        add_shake(&mut shake, 0.7);
        assert_eq!(shake, 1.0);
        for _ in 0..100 {
            decay_shake(&mut shake, 1.0);
        }
        assert_eq!(shake, 0.0);
    }
}

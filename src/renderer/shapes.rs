//! Shape generation for 2D primitives
//!
//! Flattens a [`FrameView`] into painter's-order shapes in playfield pixels.

use glam::Vec2;

use super::FrameView;
use crate::consts::*;
use crate::sim::{Fighter, Rect};

const SKY_COLOR: u32 = 0x8ecae6;
const GROUND_COLOR: u32 = 0x6a994e;
const PLAYER_COLOR: u32 = 0xffb4c6;
const PLAYER_ACCENT: u32 = 0xd62828;
const EYE_COLOR: u32 = 0x111111;
const WINDUP_COLOR: u32 = 0xff3b3b;
const BAR_BACK: u32 = 0x333333;
const BAR_FILL: u32 = 0x52b788;
const BAR_LOW: u32 = 0xe63946;

const HEALTH_BAR_HEIGHT: f32 = 6.0;
const HEALTH_BAR_GAP: f32 = 10.0;
/// Blink period while invulnerable, in ticks
const BLINK_TICKS: u64 = 6;

/// A filled primitive with an RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { rect: Rect, color: [f32; 4] },
    Circle { center: Vec2, radius: f32, color: [f32; 4] },
}

/// 0xRRGGBB plus alpha to normalized RGBA
pub fn rgba(color: u32, alpha: f32) -> [f32; 4] {
    [
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
        alpha.clamp(0.0, 1.0),
    ]
}

/// Health bar color: green when healthy, red below a quarter
fn health_color(fraction: f32) -> [f32; 4] {
    if fraction < 0.25 {
        rgba(BAR_LOW, 1.0)
    } else {
        rgba(BAR_FILL, 1.0)
    }
}

fn health_bar(out: &mut Vec<Shape>, fighter: &Fighter) {
    let body = fighter.body.rect();
    let y = body.y - HEALTH_BAR_GAP;
    out.push(Shape::Rect {
        rect: Rect::new(body.x, y, body.w, HEALTH_BAR_HEIGHT),
        color: rgba(BAR_BACK, 0.8),
    });
    let fraction = fighter.health_fraction();
    if fraction > 0.0 {
        out.push(Shape::Rect {
            rect: Rect::new(body.x, y, body.w * fraction, HEALTH_BAR_HEIGHT),
            color: health_color(fraction),
        });
    }
}

/// Eye on the facing side, bobbing with the walk cycle
fn eye(out: &mut Vec<Shape>, fighter: &Fighter, height_frac: f32) {
    let body = &fighter.body;
    let center = body.center();
    let bob = fighter.anim_phase.sin() * 1.5;
    out.push(Shape::Circle {
        center: Vec2::new(
            center.x + body.facing.sign() * body.size.x * 0.25,
            body.pos.y + body.size.y * height_frac + bob,
        ),
        radius: 3.5,
        color: rgba(EYE_COLOR, 1.0),
    });
}

/// Shapes for one frame, back to front
pub fn build_scene(frame: &FrameView<'_>) -> Vec<Shape> {
    let mut out = Vec::with_capacity(
        8 + frame.projectiles.len() + frame.particles.len() + frame.ambient.len(),
    );

    out.push(Shape::Rect {
        rect: Rect::new(0.0, 0.0, FIELD_WIDTH, GROUND_Y),
        color: rgba(SKY_COLOR, 1.0),
    });
    out.push(Shape::Rect {
        rect: Rect::new(0.0, GROUND_Y, FIELD_WIDTH, FIELD_HEIGHT - GROUND_Y),
        color: rgba(GROUND_COLOR, 1.0),
    });

    for sprite in frame.ambient {
        let hop = sprite.phase.sin().abs() * 6.0;
        out.push(Shape::Circle {
            center: sprite.pos - Vec2::new(0.0, hop),
            radius: sprite.size,
            color: rgba(sprite.color, 1.0),
        });
    }

    for enemy in frame.enemies {
        let fighter = &enemy.fighter;
        if enemy.is_winding_up() {
            out.push(Shape::Rect {
                rect: enemy.melee_hitbox(),
                color: rgba(WINDUP_COLOR, 0.35),
            });
        }
        let flash = fighter.is_invulnerable() && (frame.time_ticks / BLINK_TICKS) % 2 == 0;
        out.push(Shape::Rect {
            rect: fighter.body.rect(),
            color: rgba(enemy.colors[0], if flash { 0.5 } else { 1.0 }),
        });
        let body = fighter.body.rect();
        out.push(Shape::Rect {
            rect: Rect::new(body.x, body.y, body.w, body.h * 0.2),
            color: rgba(enemy.colors[1], 1.0),
        });
        eye(&mut out, fighter, 0.35);
        health_bar(&mut out, fighter);
    }

    let player = &frame.player.fighter;
    let blink = player.is_invulnerable() && (frame.time_ticks / BLINK_TICKS) % 2 == 0;
    if !blink {
        out.push(Shape::Rect {
            rect: player.body.rect(),
            color: rgba(PLAYER_COLOR, 1.0),
        });
        let body = player.body.rect();
        out.push(Shape::Rect {
            rect: Rect::new(body.x, body.y + body.h * 0.55, body.w, body.h * 0.12),
            color: rgba(PLAYER_ACCENT, 1.0),
        });
        eye(&mut out, player, 0.25);
    }
    health_bar(&mut out, player);

    for projectile in frame.projectiles {
        let profile = projectile.kind.profile();
        out.push(Shape::Circle {
            center: projectile.body.center(),
            radius: profile.size / 2.0,
            color: rgba(profile.color, 1.0),
        });
    }

    for particle in frame.particles {
        let half = particle.size / 2.0;
        out.push(Shape::Rect {
            rect: Rect::new(
                particle.pos.x - half,
                particle.pos.y - half,
                particle.size,
                particle.size,
            ),
            color: rgba(particle.color, particle.alpha()),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameView;
    use crate::sim::{World, waves};

    #[test]
    fn test_rgba() {
        assert_eq!(rgba(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0x0000ff, 2.0), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_idle_scene_is_just_background_and_player() {
        let world = World::new(1, 0);
        let view = FrameView::new(&world, None, true);
        let scene = build_scene(&view);
        // sky, ground, body, belt, eye, bar back, bar fill
        assert_eq!(scene.len(), 7);
    }

    #[test]
    fn test_windup_draws_hitbox() {
        let mut world = World::new(1, 0);
        waves::start_run(&mut world, false);
        let before = build_scene(&FrameView::new(&world, None, true)).len();
        world.enemy_mut().unwrap().ai.windup_ms = Some(100.0);
        let hitbox = world.enemy().unwrap().melee_hitbox();
        let scene = build_scene(&FrameView::new(&world, None, true));
        assert_eq!(scene.len(), before + 1);
        assert!(scene.iter().any(|s| matches!(s, Shape::Rect { rect, .. } if *rect == hitbox)));
    }

    #[test]
    fn test_empty_health_bar_has_no_fill() {
        let mut world = World::new(1, 0);
        world.player.fighter.health = 0.0;
        let scene = build_scene(&FrameView::new(&world, None, true));
        assert_eq!(scene.len(), 6);
    }
}

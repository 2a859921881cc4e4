//! HUD text, shared by the canvas renderer and the native text renderer

use super::{FrameView, Hud, Renderer, build_scene};

/// Status lines in display order
pub fn hud_lines(hud: &Hud) -> Vec<String> {
    let mut lines = vec![format!(
        "HP {:.0}/{:.0}   Eggs {}   Wave {}   Score {}",
        hud.health.max(0.0),
        hud.max_health,
        hud.eggs,
        hud.wave,
        hud.score
    )];
    if let Some(name) = &hud.enemy_name {
        lines.push(format!("{} {:.0}%", name, hud.enemy_health * 100.0));
    }
    if hud.quick_feet || hud.flutter {
        let mut perks = Vec::new();
        if hud.quick_feet {
            perks.push("Quick Feet");
        }
        if hud.flutter {
            perks.push("Flutter");
        }
        lines.push(format!(
            "Perks [{}]: {}",
            if hud.perks_active { "on" } else { "off" },
            perks.join(", ")
        ));
    }
    if let Some(fps) = hud.fps {
        lines.push(format!("{} fps", fps));
    }
    if let Some(banner) = banner(hud) {
        lines.push(banner.to_string());
    }
    lines
}

/// Centered overlay message, if any
pub fn banner(hud: &Hud) -> Option<&'static str> {
    if hud.game_over {
        Some("Game over - S to save score, Enter to retry, N for a new run")
    } else if hud.paused {
        Some("Paused")
    } else if hud.interlude {
        Some("Wave cleared!")
    } else {
        None
    }
}

/// Renders frames to text; used by the native build
#[derive(Debug, Default)]
pub struct TextRenderer {
    pub lines: Vec<String>,
    /// Shapes in the last frame
    pub shape_count: usize,
    pub frames: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, frame: &FrameView<'_>) {
        self.lines = hud_lines(&frame.hud);
        self.shape_count = build_scene(frame).len();
        self.frames += 1;
    }
}

//! Canvas2D backend

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Shape, build_scene};
use super::text::{banner, hud_lines};
use super::{FrameView, Renderer};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

const HUD_FONT: &str = "16px monospace";
const BANNER_FONT: &str = "bold 32px sans-serif";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
    }

    fn css(color: [f32; 4]) -> String {
        format!(
            "rgba({},{},{},{})",
            (color[0] * 255.0) as u8,
            (color[1] * 255.0) as u8,
            (color[2] * 255.0) as u8,
            color[3]
        )
    }

    fn paint(&self, shape: &Shape) {
        match shape {
            Shape::Rect { rect, color } => {
                self.ctx.set_fill_style_str(&Self::css(*color));
                self.ctx.fill_rect(
                    rect.x as f64,
                    rect.y as f64,
                    rect.w as f64,
                    rect.h as f64,
                );
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                self.ctx.set_fill_style_str(&Self::css(*color));
                self.ctx.begin_path();
                let _ = self.ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    TAU,
                );
                self.ctx.fill();
            }
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &FrameView<'_>) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        // Letterbox the fixed playfield into the canvas
        let scale = (self.width / FIELD_WIDTH as f64).min(self.height / FIELD_HEIGHT as f64);
        let ox = (self.width - FIELD_WIDTH as f64 * scale) / 2.0;
        let oy = (self.height - FIELD_HEIGHT as f64 * scale) / 2.0;
        let shake = frame.shake_offset();
        let _ = ctx.set_transform(
            scale,
            0.0,
            0.0,
            scale,
            ox + shake.x as f64 * scale,
            oy + shake.y as f64 * scale,
        );

        for shape in build_scene(frame) {
            self.paint(&shape);
        }

        // HUD ignores shake
        let _ = ctx.set_transform(scale, 0.0, 0.0, scale, ox, oy);
        ctx.set_font(HUD_FONT);
        ctx.set_fill_style_str("#1b1b1b");
        for (i, line) in hud_lines(&frame.hud).iter().enumerate() {
            let _ = ctx.fill_text(line, 12.0, 24.0 + i as f64 * 20.0);
        }

        if let Some(text) = banner(&frame.hud) {
            ctx.set_fill_style_str("rgba(0,0,0,0.35)");
            ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
            ctx.set_font(BANNER_FONT);
            ctx.set_text_align("center");
            ctx.set_fill_style_str("#ffffff");
            let _ = ctx.fill_text(text, FIELD_WIDTH as f64 / 2.0, FIELD_HEIGHT as f64 / 2.0);
            ctx.set_text_align("start");
        }
    }
}

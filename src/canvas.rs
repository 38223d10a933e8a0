use crate::core::{Painter, Rgb};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draws engine output onto a 2D canvas context.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Acquire the 2D context of `canvas`; `None` when the browser refuses.
    pub fn for_canvas(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl Painter for CanvasPainter {
    fn wash(&mut self, size: Vec2, color: Rgb, alpha: f32) {
        self.ctx.set_fill_style_str(&color.css_alpha(alpha));
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn disc(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&color.css_alpha(alpha));
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn segment(&mut self, from: Vec2, to: Vec2, color: Rgb, alpha: f32) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.css_alpha(alpha));
        self.ctx.set_line_width(1.0);
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}

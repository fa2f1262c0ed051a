//! `Surface` backed by a browser `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::draw::{Color, Surface};

impl Surface for CanvasRenderingContext2d {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.set_fill_style_str(&color.to_css());
        CanvasRenderingContext2d::fill_rect(
            self,
            pos.x as f64,
            pos.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill_style_str(&color.to_css());
        self.begin_path();
        if self
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.set_stroke_style_str(&color.to_css());
        self.set_line_width(line_width as f64);
        self.begin_path();
        if self
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.stroke();
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Color) {
        self.set_fill_style_str(&color.to_css());
        self.set_font(&format!("{}px Arial", size_px));
        self.set_text_align("center");
        if let Err(e) = CanvasRenderingContext2d::fill_text(self, text, pos.x as f64, pos.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}

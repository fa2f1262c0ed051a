//! Display list primitives and the surface they are replayed onto

use glam::Vec2;

/// RGBA color, alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xffffff);
    pub const RED: Color = Color::hex(0xff0000);
    pub const GREEN: Color = Color::hex(0x00ff00);
    pub const YELLOW: Color = Color::hex(0xffff00);

    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for the canvas API
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}

/// One drawing operation. Text is always horizontally centered on `pos`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        line_width: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        color: Color,
    },
}

/// A 2D drawing target
pub trait Surface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Color);
}

/// Replay a display list onto a surface, in order
pub fn present<S: Surface + ?Sized>(commands: &[DrawCmd], surface: &mut S) {
    for cmd in commands {
        match cmd {
            DrawCmd::FillRect { pos, size, color } => surface.fill_rect(*pos, *size, *color),
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => surface.fill_circle(*center, *radius, *color),
            DrawCmd::StrokeCircle {
                center,
                radius,
                color,
                line_width,
            } => surface.stroke_circle(*center, *radius, *color, *line_width),
            DrawCmd::Text {
                text,
                pos,
                size_px,
                color,
            } => surface.fill_text(text, *pos, *size_px, *color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(Color::hex(0xff4d4f).to_css(), "#ff4d4f");
        assert_eq!(Color::BLACK.with_alpha(0.7).to_css(), "rgba(0, 0, 0, 0.7)");
        assert_eq!(Color::YELLOW.with_alpha(-0.1).to_css(), "rgba(255, 255, 0, 0)");
    }

    /// Counts calls per primitive
    #[derive(Default)]
    struct Tally {
        rects: usize,
        fills: usize,
        strokes: usize,
        texts: Vec<String>,
    }

    impl Surface for Tally {
        fn fill_rect(&mut self, _: Vec2, _: Vec2, _: Color) {
            self.rects += 1;
        }
        fn fill_circle(&mut self, _: Vec2, _: f32, _: Color) {
            self.fills += 1;
        }
        fn stroke_circle(&mut self, _: Vec2, _: f32, _: Color, _: f32) {
            self.strokes += 1;
        }
        fn fill_text(&mut self, text: &str, _: Vec2, _: f32, _: Color) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_present_dispatch() {
        let cmds = vec![
            DrawCmd::FillRect {
                pos: Vec2::ZERO,
                size: Vec2::ONE,
                color: Color::BLACK,
            },
            DrawCmd::FillCircle {
                center: Vec2::ZERO,
                radius: 4.0,
                color: Color::YELLOW,
            },
            DrawCmd::StrokeCircle {
                center: Vec2::ZERO,
                radius: 4.0,
                color: Color::YELLOW,
                line_width: 2.0,
            },
            DrawCmd::Text {
                text: "hi".to_string(),
                pos: Vec2::ZERO,
                size_px: 12.0,
                color: Color::WHITE,
            },
        ];
        let mut tally = Tally::default();
        present(&cmds, &mut tally);
        assert_eq!((tally.rects, tally.fills, tally.strokes), (1, 1, 1));
        assert_eq!(tally.texts, vec!["hi".to_string()]);
    }
}

use std::io::Cursor;

use image::{ImageOutputFormat, Rgba, RgbaImage};
use tiny_skia::{
    BlendMode, Color, FillRule, GradientStop, LinearGradient, Paint, Path, PathBuilder, Pixmap,
    Point, SpreadMode, Transform,
};

use crate::error::{IconError, Result};
use crate::models::{RenderRequest, Variant};

pub const ORANGE: [u8; 3] = [0xFF, 0x6B, 0x35];
pub const YELLOW: [u8; 3] = [0xFF, 0xC9, 0x3C];
pub const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];
// Orange/yellow midpoint, placed late so the panel reads mostly orange
const GRADIENT_MID: [u8; 3] = [0xFF, 0xAB, 0x3B];
const GRADIENT_MID_STOP: f32 = 0.75;

pub const BAR_COUNT: usize = 7;
pub const BAR_HEIGHTS: [f32; 7] = [0.7, 0.9, 0.5, 0.8, 0.6, 0.85, 0.55];

/// Play/skip glyph in its own design space.
pub const CHEVRON: [(f32, f32); 6] = [
    (117.9, 33.9),
    (104.1, 13.5),
    (118.3, 13.5),
    (132.0, 33.9),
    (118.3, 54.2),
    (104.1, 54.2),
];
const CHEVRON_ANCHOR: (f32, f32) = (118.15, 33.85);
const CHEVRON_NUDGE_X: f32 = 1.0;
const CHEVRON_SCALE: f32 = 0.015;

// Cubic approximation of a quarter circle
const KAPPA: f32 = 0.552_284_8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Geometry of one icon size. Everything except `offset_*` is relative to the
/// top-left corner of the 3:2 landscape rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub size: u32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub corner_radius: f32,
    pub badge_size: f32,
    pub badge_x: f32,
    pub badge_y: f32,
}

impl Layout {
    pub fn new(size: u32) -> Self {
        let canvas = size as f32;
        let height = canvas * (2.0 / 3.0);
        let width = height * 1.5;
        let short_side = width.min(height);
        // Floor of 2px keeps the margin visible at 16px
        let padding = (short_side * 0.08).max(2.0);
        let badge_size = short_side * 0.25;

        Self {
            size,
            offset_x: (canvas - width) / 2.0,
            offset_y: (canvas - height) / 2.0,
            width,
            height,
            padding,
            corner_radius: padding,
            badge_size,
            badge_x: width - padding - badge_size * 0.7,
            badge_y: height - padding - badge_size * 0.7,
        }
    }

    pub fn inset_width(&self) -> f32 {
        self.width - self.padding * 2.0
    }

    pub fn inset_height(&self) -> f32 {
        self.height - self.padding * 2.0
    }

    pub fn badge_radius(&self) -> f32 {
        self.badge_size * 0.5
    }

    /// Radius of the hole punched into the cutout badge.
    pub fn hole_radius(&self) -> f32 {
        self.badge_size * 0.42
    }

    pub fn bars(&self) -> [Bar; BAR_COUNT] {
        let area_width = self.inset_width() * 0.6;
        let area_x = self.padding + (self.inset_width() - area_width) / 2.0;
        let spacing = area_width / BAR_COUNT as f32;
        let width = spacing * 0.5;
        let max_height = self.inset_height() * 0.6;

        std::array::from_fn(|i| {
            let height = max_height * BAR_HEIGHTS[i % BAR_HEIGHTS.len()];
            Bar {
                x: area_x + i as f32 * spacing,
                y: self.padding + (self.inset_height() - height) / 2.0,
                width,
                height,
            }
        })
    }

    /// Maps chevron design space into landscape space, centered on the badge.
    pub fn chevron_transform(&self) -> Transform {
        let scale = self.badge_size * CHEVRON_SCALE;
        Transform::from_translate(self.badge_x, self.badge_y)
            .pre_scale(scale, scale)
            .pre_translate(CHEVRON_NUDGE_X - CHEVRON_ANCHOR.0, -CHEVRON_ANCHOR.1)
    }

    /// Landscape coordinates to canvas coordinates.
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x, self.offset_y + y)
    }

    fn canvas_transform(&self) -> Transform {
        Transform::from_translate(self.offset_x, self.offset_y)
    }
}

pub fn render(request: &RenderRequest) -> Result<RgbaImage> {
    let size = request.target_size();
    let canvas_err = || IconError::Canvas { size };

    let mut pixmap = Pixmap::new(size, size).ok_or_else(canvas_err)?;
    let layout = Layout::new(size);
    let base = layout.canvas_transform();

    if request.variant() == Variant::Standard {
        let p = layout.padding;
        let (w, h) = (layout.inset_width(), layout.inset_height());
        if let Some(panel) = rounded_rect(p, p, w, h, layout.corner_radius) {
            let shader = LinearGradient::new(
                Point::from_xy(p, p),
                Point::from_xy(p + w, p + h),
                vec![
                    GradientStop::new(0.0, color(ORANGE)),
                    GradientStop::new(GRADIENT_MID_STOP, color(GRADIENT_MID)),
                    GradientStop::new(1.0, color(YELLOW)),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            )
            .ok_or_else(canvas_err)?;
            let paint = Paint { shader, anti_alias: true, ..Paint::default() };
            pixmap.fill_path(&panel, &paint, FillRule::Winding, base, None);
        }
    }

    let white = solid(WHITE);
    for bar in layout.bars() {
        if let Some(path) = rounded_rect(bar.x, bar.y, bar.width, bar.height, bar.width / 4.0) {
            pixmap.fill_path(&path, &white, FillRule::Winding, base, None);
        }
    }

    let badge = PathBuilder::from_circle(layout.badge_x, layout.badge_y, layout.badge_radius())
        .ok_or_else(canvas_err)?;
    pixmap.fill_path(&badge, &white, FillRule::Winding, base, None);

    let glyph = match request.variant() {
        Variant::Standard => solid(ORANGE),
        Variant::Cutout => {
            let hole = PathBuilder::from_circle(layout.badge_x, layout.badge_y, layout.hole_radius())
                .ok_or_else(canvas_err)?;
            let mut eraser = solid([0, 0, 0]);
            eraser.blend_mode = BlendMode::DestinationOut;
            pixmap.fill_path(&hole, &eraser, FillRule::Winding, base, None);
            white.clone()
        }
    };
    let chevron = chevron_path().ok_or_else(canvas_err)?;
    pixmap.fill_path(
        &chevron,
        &glyph,
        FillRule::Winding,
        base.pre_concat(layout.chevron_transform()),
        None,
    );

    Ok(to_image(&pixmap))
}

pub fn render_png(request: &RenderRequest) -> Result<Vec<u8>> {
    let img = render(request)?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)?;
    Ok(buf)
}

fn color([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba8(r, g, b, 255)
}

fn solid(rgb: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgb));
    paint.anti_alias = true;
    paint
}

/// `None` when the rectangle has collapsed, which only happens far below 16px.
fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

fn chevron_path() -> Option<Path> {
    let mut pb = PathBuilder::new();
    let (first, rest) = CHEVRON.split_first()?;
    pb.move_to(first.0, first.1);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

// tiny-skia stores premultiplied pixels, PNG wants straight alpha
fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

//! Freehand drawing surface
//!
//! Strokes are kept as polylines in canvas coordinates. The GUI renders
//! them live; `submit` rasterizes the same strokes into a PNG for the judge.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;
use tracing::debug;

/// Edge length of the square canvas, in pixels
pub const CANVAS_SIZE: u32 = 400;
pub const STROKE_WIDTH: f32 = 12.0;
pub const GUIDE_WIDTH: f32 = 4.0;

pub const BACKGROUND: [u8; 3] = [0xff, 0xff, 0xff];
/// Slate-100, faint enough to trace over
pub const GUIDE_COLOR: [u8; 3] = [0xf1, 0xf5, 0xf9];
/// Sky-600
pub const INK_COLOR: [u8; 3] = [0x02, 0x84, 0xc7];

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("nothing has been drawn")]
    Empty,

    #[error("drawing is locked while a verification is running")]
    Locked,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Clamped into the canvas
    pub fn new(x: f32, y: f32) -> Self {
        let max = CANVAS_SIZE as f32;
        Self {
            x: x.clamp(0.0, max),
            y: y.clamp(0.0, max),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawingSurface {
    strokes: Vec<Vec<Point>>,
    drawing: bool,
    has_drawn: bool,
    show_warning: bool,
    locked: bool,
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn show_warning(&self) -> bool {
        self.show_warning
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Input is ignored while locked; an open stroke is closed
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.drawing = false;
        }
    }

    pub fn begin_stroke(&mut self, point: Point) {
        if self.locked {
            return;
        }
        self.drawing = true;
        self.has_drawn = true;
        self.show_warning = false;
        self.strokes.push(vec![point]);
    }

    pub fn extend_stroke(&mut self, point: Point) {
        if self.locked || !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            if stroke.last() != Some(&point) {
                stroke.push(point);
            }
        }
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    /// Back to the blank guide state
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
        self.has_drawn = false;
        self.show_warning = false;
    }

    /// Export as PNG. An empty surface raises the warning instead and
    /// must not be sent anywhere.
    pub fn submit(&mut self) -> Result<Vec<u8>, SubmitError> {
        if self.locked {
            return Err(SubmitError::Locked);
        }
        if !self.has_drawn {
            self.show_warning = true;
            return Err(SubmitError::Empty);
        }
        self.drawing = false;
        let png = encode_png(&self.rasterize())?;
        debug!("✏️ Exported drawing ({} strokes, {} bytes)", self.strokes.len(), png.len());
        Ok(png)
    }

    pub fn rasterize(&self) -> RgbImage {
        let mut img = blank_guide();
        for stroke in &self.strokes {
            draw_polyline(&mut img, stroke, STROKE_WIDTH / 2.0, Rgb(INK_COLOR));
        }
        img
    }
}

fn blank_guide() -> RgbImage {
    let size = CANVAS_SIZE;
    let mut img = RgbImage::from_pixel(size, size, Rgb(BACKGROUND));
    let center = size as f32 / 2.0;
    let half = GUIDE_WIDTH / 2.0;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        if (px - center).abs() <= half || (py - center).abs() <= half {
            *pixel = Rgb(GUIDE_COLOR);
        }
    }
    img
}

/// Round caps and joins: every pixel within `radius` of a segment is inked
fn draw_polyline(img: &mut RgbImage, points: &[Point], radius: f32, color: Rgb<u8>) {
    match points {
        [] => {}
        [only] => draw_segment(img, *only, *only, radius, color),
        _ => {
            for pair in points.windows(2) {
                draw_segment(img, pair[0], pair[1], radius, color);
            }
        }
    }
}

fn draw_segment(img: &mut RgbImage, a: Point, b: Point, radius: f32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let min_x = (a.x.min(b.x) - radius).floor().max(0.0) as u32;
    let min_y = (a.y.min(b.y) - radius).floor().max(0.0) as u32;
    let max_x = ((a.x.max(b.x) + radius).ceil() as u32).min(w);
    let max_y = ((a.y.max(b.y) + radius).ceil() as u32).min(h);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Point {
                x: x as f32 + 0.5,
                y: y as f32 + 0.5,
            };
            if distance_to_segment(p, a, b) <= radius {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

fn encode_png(img: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

use crate::model::{Point, Rgba, StrokeStyle};

/// Straight-alpha RGBA8 pixel buffer. Freshly allocated and cleared buffers
/// are fully transparent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&b| b == 0)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some(Rgba {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        })
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        if idx + 3 >= self.pixels.len() {
            return;
        }
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    /// Strokes `start -> end` with round caps. A pixel is covered when its
    /// center lies within half the stroke width of the segment, so a
    /// zero-length segment paints a dot. Returns the number of pixels written.
    pub fn stroke_segment(&mut self, start: Point, end: Point, style: StrokeStyle) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let radius = (style.width * 0.5).max(0.5);
        let min_x = (start.x.min(end.x) - radius).floor().max(0.0) as i32;
        let min_y = (start.y.min(end.y) - radius).floor().max(0.0) as i32;
        let max_x = ((start.x.max(end.x) + radius).ceil() as i32).min(self.width as i32 - 1);
        let max_y = ((start.y.max(end.y) + radius).ceil() as i32).min(self.height as i32 - 1);
        if max_x < min_x || max_y < min_y {
            return 0;
        }

        let radius_sq = radius * radius;
        let mut writes: u64 = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if point_segment_distance_sq(center, start, end) <= radius_sq {
                    self.set_pixel(x, y, style.color);
                    writes = writes.saturating_add(1);
                }
            }
        }
        writes
    }
}

fn point_segment_distance_sq(p: Point, a: Point, b: Point) -> f32 {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f32::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = p.x - (a.x + vx * t);
    let dy = p.y - (a.y + vy * t);
    dx * dx + dy * dy
}

use crate::constants::STROKE_RADIUS;
use crate::stroke::{Point, Stroke};

/// Luminance raster standing in for the host drawing canvas.
///
/// 255 = white background, 0 = full ink. The surface owns rendering:
/// strokes are stamped with a fixed radius and rounded caps/joins so
/// recorded samples and live attempts see identical ink statistics.
#[derive(Clone, Debug)]
pub struct Surface {
    width: usize,
    height: usize,
    luma: Vec<u8>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            luma: vec![255; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn luma(&self) -> &[u8] {
        &self.luma
    }

    pub fn luma_at(&self, x: usize, y: usize) -> u8 {
        self.luma[y * self.width + x]
    }

    /// Surface diagonal, the normalizer for stroke-length features.
    pub fn diagonal(&self) -> f64 {
        let w = self.width as f64;
        let h = self.height as f64;
        (w * w + h * h).sqrt()
    }

    /// Clear all ink for a new attempt.
    pub fn reset(&mut self) {
        self.luma.fill(255);
    }

    /// Stamp a filled disk of STROKE_RADIUS at a point (rounded cap).
    pub fn stamp_point(&mut self, p: Point) {
        let r = STROKE_RADIUS;
        let min_x = ((p.x - r).floor().max(0.0)) as usize;
        let min_y = ((p.y - r).floor().max(0.0)) as usize;
        let max_x = ((p.x + r).ceil() as usize).min(self.width.saturating_sub(1));
        let max_y = ((p.y + r).ceil() as usize).min(self.height.saturating_sub(1));

        if min_x > max_x || min_y > max_y {
            return; // entirely off-surface
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - p.x;
                let dy = y as f64 + 0.5 - p.y;
                if dx * dx + dy * dy <= r * r {
                    self.luma[y * self.width + x] = 0;
                }
            }
        }
    }

    /// Stamp a segment by walking it at half-radius steps. Consecutive
    /// disks overlap, which gives rounded joins for free.
    pub fn stamp_segment(&mut self, a: Point, b: Point) {
        let length = a.distance(b);
        if length == 0.0 {
            self.stamp_point(a);
            return;
        }
        let step = (STROKE_RADIUS * 0.5).max(0.5);
        let steps = (length / step).ceil() as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp_point(Point::new(
                a.x + (b.x - a.x) * t,
                a.y + (b.y - a.y) * t,
            ));
        }
    }

    /// Render a complete stroke. A tap renders as a single dot.
    pub fn render_stroke(&mut self, stroke: &Stroke) {
        match stroke.points.as_slice() {
            [] => {}
            [p] => self.stamp_point(*p),
            pts => {
                for w in pts.windows(2) {
                    self.stamp_segment(w[0], w[1]);
                }
            }
        }
    }
}

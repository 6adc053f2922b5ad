use serde::{Deserialize, Serialize};

/// A 2-D point in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An ordered sequence of points sampled while the pointer was down.
///
/// A stroke with a single point is a tap: it contributes no length but
/// still counts toward the stroke count.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A tap contributes no polyline length.
    pub fn is_tap(&self) -> bool {
        self.points.len() < 2
    }

    /// Sum of consecutive segment lengths.
    pub fn polyline_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }

    /// Straight-line start-to-end distance.
    pub fn chord_length(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => a.distance(*b),
            _ => 0.0,
        }
    }

    /// Chord ÷ polyline length; 1.0 = perfectly straight.
    /// Denominator is floored at 1 so a degenerate stroke never divides by zero.
    pub fn straightness(&self) -> f64 {
        self.chord_length() / self.polyline_length().max(1.0)
    }
}

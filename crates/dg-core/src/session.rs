use crate::classify::Attempt;
use crate::grid::InkGrid;
use crate::stroke::{Point, Stroke};
use crate::surface::Surface;

/// Explicit per-attempt drawing context: the surface, the strokes drawn
/// so far, and a revision counter bumped on every completed stroke or
/// reset. Handlers receive this value instead of sharing ambient
/// mutable state.
///
/// Ending a stroke and classifying are two separate steps: `end_stroke`
/// only finishes the stroke, and `snapshot` hands an immutable
/// [`Attempt`] to the classifier — so the algorithm is testable without
/// simulating pointer events.
#[derive(Clone, Debug)]
pub struct DrawingSession {
    surface: Surface,
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
    revision: u64,
}

impl DrawingSession {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            surface: Surface::new(width, height),
            strokes: Vec::new(),
            current: None,
            revision: 0,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Completed strokes only; an in-flight stroke is not part of them.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Pointer down: start a new stroke and ink its first point.
    /// An unfinished previous stroke is completed first.
    pub fn begin_stroke(&mut self, p: Point) {
        if self.current.is_some() {
            self.end_stroke();
        }
        self.surface.stamp_point(p);
        self.current = Some(Stroke::from_points(vec![p]));
    }

    /// Pointer move: extend the in-flight stroke and ink the segment.
    /// Ignored when no stroke is in flight.
    pub fn extend_stroke(&mut self, p: Point) {
        let Some(stroke) = self.current.as_mut() else {
            return;
        };
        if let Some(&last) = stroke.points.last() {
            self.surface.stamp_segment(last, p);
        }
        stroke.push(p);
    }

    /// Pointer up: finish the in-flight stroke. A one-point stroke is
    /// kept as a tap. Bumps the revision.
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.current.take() {
            self.strokes.push(stroke);
            self.revision += 1;
        }
    }

    /// Clear everything for a new attempt.
    pub fn reset(&mut self) {
        self.surface.reset();
        self.strokes.clear();
        self.current = None;
        self.revision += 1;
    }

    /// Rasterize the current state into an immutable attempt.
    pub fn snapshot(&self) -> Attempt {
        Attempt {
            grid: InkGrid::rasterize(&self.surface),
            strokes: self.strokes.clone(),
            surface_diagonal: self.surface.diagonal(),
        }
    }
}

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use dg_core::{Attempt, DrawingSession, Point};

/// Largest accepted surface side. Drawing files are untrusted input;
/// anything past a real canvas size is rejected before the surface
/// buffer is allocated.
const MAX_SURFACE_SIDE: usize = 4096;

/// On-disk drawing capture: surface dimensions plus strokes as point
/// lists in surface coordinates, in temporal order.
#[derive(Debug, Deserialize)]
pub struct DrawingFile {
    pub width: usize,
    pub height: usize,
    pub strokes: Vec<Vec<[f64; 2]>>,
}

/// Read a drawing file and replay it through a session, exactly as a
/// live canvas would have: begin, extend, end per stroke.
pub fn load_attempt(path: &Path) -> Result<Attempt> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let drawing: DrawingFile = serde_json::from_str(&content)
        .with_context(|| format!("invalid drawing file {}", path.display()))?;

    if drawing.width == 0 || drawing.height == 0 {
        bail!("drawing surface must be non-empty: {}", path.display());
    }
    if drawing.width > MAX_SURFACE_SIDE || drawing.height > MAX_SURFACE_SIDE {
        bail!(
            "drawing surface {}x{} exceeds the {MAX_SURFACE_SIDE} pixel limit: {}",
            drawing.width,
            drawing.height,
            path.display()
        );
    }

    let mut session = DrawingSession::new(drawing.width, drawing.height);
    for stroke in &drawing.strokes {
        let mut points = stroke.iter().map(|&[x, y]| Point::new(x, y));
        let Some(first) = points.next() else {
            continue; // empty stroke entry — nothing to replay
        };
        session.begin_stroke(first);
        for p in points {
            session.extend_stroke(p);
        }
        session.end_stroke();
    }

    Ok(session.snapshot())
}

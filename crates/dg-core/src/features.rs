use serde::{Deserialize, Serialize};

use crate::constants::{ACTIVE_THRESHOLD, GRID_SIDE, INK_LEN, LENGTH_NORM_CAP};
use crate::grid::InkGrid;
use crate::stroke::Stroke;

/// Silhouette descriptors derived from the ink grid's active region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeFeatures {
    pub fill_ratio: f64,
    pub aspect_ratio: f64,
    pub compactness: f64,
    pub symmetry_x: f64,
    pub symmetry_y: f64,
    pub edge_density: f64,
}

impl ShapeFeatures {
    /// Bundle for a grid with no active cells.
    pub fn degenerate() -> Self {
        Self {
            fill_ratio: 0.0,
            aspect_ratio: 1.0,
            compactness: 0.0,
            symmetry_x: 1.0,
            symmetry_y: 1.0,
            edge_density: 0.0,
        }
    }
}

/// Stroke-economy descriptors, independent of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionFeatures {
    pub length_norm: f64,
    pub straightness: f64,
    pub stroke_count: f64,
}

impl MotionFeatures {
    pub fn zeros() -> Self {
        Self {
            length_norm: 0.0,
            straightness: 0.0,
            stroke_count: 0.0,
        }
    }
}

/// The full per-attempt descriptor: shape ⊕ motion as one flat struct
/// with named fields. Order-independent by construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub fill_ratio: f64,
    pub aspect_ratio: f64,
    pub compactness: f64,
    pub symmetry_x: f64,
    pub symmetry_y: f64,
    pub edge_density: f64,
    pub length_norm: f64,
    pub straightness: f64,
    pub stroke_count: f64,
}

impl FeatureVector {
    pub fn combine(shape: ShapeFeatures, motion: MotionFeatures) -> Self {
        Self {
            fill_ratio: shape.fill_ratio,
            aspect_ratio: shape.aspect_ratio,
            compactness: shape.compactness,
            symmetry_x: shape.symmetry_x,
            symmetry_y: shape.symmetry_y,
            edge_density: shape.edge_density,
            length_norm: motion.length_norm,
            straightness: motion.straightness,
            stroke_count: motion.stroke_count,
        }
    }

    /// Extract the full descriptor for one attempt.
    pub fn extract(grid: &InkGrid, strokes: &[Stroke], surface_diagonal: f64) -> Self {
        Self::combine(shape_features(grid), motion_features(strokes, surface_diagonal))
    }

    /// Shape-only descriptor for samples whose strokes were lost.
    pub fn from_grid_only(grid: &InkGrid) -> Self {
        Self::combine(shape_features(grid), MotionFeatures::zeros())
    }
}

/// Compute silhouette features over cells above ACTIVE_THRESHOLD.
pub fn shape_features(grid: &InkGrid) -> ShapeFeatures {
    let mut active = [false; INK_LEN];
    let mut active_count = 0usize;
    let (mut min_x, mut min_y) = (GRID_SIDE, GRID_SIDE);
    let (mut max_x, mut max_y) = (0usize, 0usize);

    for y in 0..GRID_SIDE {
        for x in 0..GRID_SIDE {
            if grid.get(x, y) > ACTIVE_THRESHOLD {
                active[y * GRID_SIDE + x] = true;
                active_count += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    if active_count == 0 {
        return ShapeFeatures::degenerate();
    }

    let width = max_x - min_x + 1;
    let height = max_y - min_y + 1;
    let box_area = (width * height) as f64;

    let fill_ratio = grid.total_ink() / INK_LEN as f64;
    let aspect_ratio = width as f64 / (height.max(1)) as f64;
    let compactness = active_count as f64 / box_area;

    // Edge cells: any 4-connected neighbor inactive or outside the box.
    // Box-border cells always count.
    let mut edge_cells = 0usize;
    let is_active = |x: i64, y: i64| -> bool {
        if x < min_x as i64 || x > max_x as i64 || y < min_y as i64 || y > max_y as i64 {
            return false;
        }
        active[y as usize * GRID_SIDE + x as usize]
    };

    let mut sym_x_matches = 0usize;
    let mut sym_y_matches = 0usize;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if !active[y * GRID_SIDE + x] {
                continue;
            }

            let (xi, yi) = (x as i64, y as i64);
            let on_edge = !is_active(xi - 1, yi)
                || !is_active(xi + 1, yi)
                || !is_active(xi, yi - 1)
                || !is_active(xi, yi + 1);
            if on_edge {
                edge_cells += 1;
            }

            // Mirror across the box midlines
            let mirror_x = min_x + max_x - x;
            let mirror_y = min_y + max_y - y;
            if active[y * GRID_SIDE + mirror_x] {
                sym_x_matches += 1;
            }
            if active[mirror_y * GRID_SIDE + x] {
                sym_y_matches += 1;
            }
        }
    }

    ShapeFeatures {
        fill_ratio,
        aspect_ratio,
        compactness,
        symmetry_x: sym_x_matches as f64 / active_count as f64,
        symmetry_y: sym_y_matches as f64 / active_count as f64,
        edge_density: edge_cells as f64 / active_count as f64,
    }
}

/// Compute stroke-economy features from the raw polylines.
///
/// Shape features alone cannot separate drawings that flatten to similar
/// pixels but were produced with very different stroke economy (one-stroke
/// circle vs. many short arcs); this adds that signal without any
/// stroke-order matching.
pub fn motion_features(strokes: &[Stroke], surface_diagonal: f64) -> MotionFeatures {
    if strokes.is_empty() {
        return MotionFeatures::zeros();
    }

    let mut total_length = 0.0;
    let mut weighted_straightness = 0.0;

    for stroke in strokes {
        if stroke.is_tap() {
            continue;
        }
        let length = stroke.polyline_length();
        total_length += length;
        weighted_straightness += stroke.straightness() * length;
    }

    let diagonal = surface_diagonal.max(1.0);
    MotionFeatures {
        length_norm: (total_length / diagonal).min(LENGTH_NORM_CAP),
        straightness: weighted_straightness / total_length.max(1.0),
        stroke_count: strokes.len() as f64,
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::{GRID_SIDE, INK_LEN};
use crate::surface::Surface;

/// Fixed-resolution square grid of ink intensities in [0,1], row-major.
/// 0 = background, 1 = fully inked. Produced once per attempt and
/// immutable thereafter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InkGrid {
    cells: Vec<f64>,
}

impl InkGrid {
    /// Build a grid from raw cell values, clamping each into [0,1].
    /// Input length must be GRID_SIDE²; anything else yields a blank grid.
    pub fn from_cells(cells: Vec<f64>) -> Self {
        if cells.len() != INK_LEN {
            return Self::blank();
        }
        Self {
            cells: cells
                .into_iter()
                .map(|v| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 })
                .collect(),
        }
    }

    pub fn blank() -> Self {
        Self {
            cells: vec![0.0; INK_LEN],
        }
    }

    /// Downsample a drawing surface into the fixed grid by box sampling:
    /// the source is partitioned into GRID_SIDE² integer-bounded regions
    /// and each cell becomes 1 − mean_luminance/255 of its region.
    /// Deterministic for identical input, so stored samples and live
    /// attempts stay comparable.
    pub fn rasterize(surface: &Surface) -> Self {
        let w = surface.width();
        let h = surface.height();
        let mut cells = Vec::with_capacity(INK_LEN);

        for gy in 0..GRID_SIDE {
            let y0 = gy * h / GRID_SIDE;
            let y1 = ((gy + 1) * h / GRID_SIDE).max(y0 + 1).min(h);
            for gx in 0..GRID_SIDE {
                let x0 = gx * w / GRID_SIDE;
                let x1 = ((gx + 1) * w / GRID_SIDE).max(x0 + 1).min(w);

                let mut sum = 0u64;
                for y in y0..y1 {
                    for x in x0..x1 {
                        sum += surface.luma_at(x, y) as u64;
                    }
                }
                let count = ((y1 - y0) * (x1 - x0)) as f64;
                let mean = sum as f64 / count;
                cells.push(1.0 - mean / 255.0);
            }
        }

        Self { cells }
    }

    pub fn side(&self) -> usize {
        GRID_SIDE
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[y * GRID_SIDE + x]
    }

    /// Flattened row-major ink vector, length GRID_SIDE².
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.cells
    }

    /// Sum of all cell intensities.
    pub fn total_ink(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Count of cells with intensity strictly above `threshold`.
    pub fn active_count(&self, threshold: f64) -> usize {
        self.cells.iter().filter(|&&v| v > threshold).count()
    }
}

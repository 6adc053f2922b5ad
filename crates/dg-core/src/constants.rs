/// Side of the square ink grid every drawing is downsampled to.
pub const GRID_SIDE: usize = 16;

/// Flattened ink vector length (GRID_SIDE²).
pub const INK_LEN: usize = GRID_SIDE * GRID_SIDE;

/// Intensity above which a grid cell counts as "active" for shape features.
pub const ACTIVE_THRESHOLD: f64 = 0.2;

/// Intensity above which a cell counts toward the meaningful-drawing gate.
pub const GATE_ACTIVE_THRESHOLD: f64 = 0.18;

/// Gate: total ink must exceed this.
pub const GATE_MIN_INK: f64 = 5.0;

/// Gate: active-cell count must exceed this.
pub const GATE_MIN_ACTIVE: usize = 8;

/// FIFO cap on the sample dataset.
pub const DATASET_CAP: usize = 2000;

/// Cap on normalized total stroke length — runaway scribbles stop here.
pub const LENGTH_NORM_CAP: f64 = 1.5;

/// Fixed stroke radius on the drawing surface, in surface pixels.
/// Changing this changes every feature statistic, so it is a constant.
pub const STROKE_RADIUS: f64 = 6.0;

/// Sentinel label emitted when the classifier declines to guess.
pub const UNKNOWN_LABEL: &str = "unknown";

use crate::features::FeatureVector;

// Per-feature weights encoding relative discriminative value.
// Empirically chosen constants, not derived.
const W_FILL: f64 = 1.4;
const W_LOG_ASPECT: f64 = 1.1;
const W_COMPACT: f64 = 1.3;
const W_SYMMETRY_X: f64 = 0.8;
const W_SYMMETRY_Y: f64 = 0.8;
const W_EDGE: f64 = 1.1;
const W_LENGTH: f64 = 1.3;
const W_STRAIGHT: f64 = 1.4;
const W_STROKES: f64 = 0.7;

/// Normalized stroke count: min(count, 8) / 8.
const STROKE_COUNT_CEIL: f64 = 8.0;

/// Euclidean distance between two equal-length ink vectors, divided by
/// √len so the value is resolution-independent. Mismatched lengths are
/// maximal distance (never happens for well-formed samples).
pub fn pixel_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 1.0;
    }
    let sum_sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    sum_sq.sqrt() / (a.len() as f64).sqrt()
}

/// 1 − cosine similarity. Defined as 1 (maximal) if either vector has
/// zero norm, so a blank grid is far from everything.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 1.0;
    }
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Weighted feature distance: sum of weighted squared differences,
/// square-rooted. Aspect ratio is log-transformed first so doubling and
/// halving differ symmetrically and its unbounded range is tamed.
pub fn feature_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let log_aspect = |v: f64| v.max(1e-6).ln();
    let norm_strokes = |c: f64| c.min(STROKE_COUNT_CEIL) / STROKE_COUNT_CEIL;

    let terms = [
        (W_FILL, a.fill_ratio - b.fill_ratio),
        (W_LOG_ASPECT, log_aspect(a.aspect_ratio) - log_aspect(b.aspect_ratio)),
        (W_COMPACT, a.compactness - b.compactness),
        (W_SYMMETRY_X, a.symmetry_x - b.symmetry_x),
        (W_SYMMETRY_Y, a.symmetry_y - b.symmetry_y),
        (W_EDGE, a.edge_density - b.edge_density),
        (W_LENGTH, a.length_norm - b.length_norm),
        (W_STRAIGHT, a.straightness - b.straightness),
        (W_STROKES, norm_strokes(a.stroke_count) - norm_strokes(b.stroke_count)),
    ];

    terms
        .iter()
        .map(|(w, d)| w * d * d)
        .sum::<f64>()
        .sqrt()
}

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{GATE_ACTIVE_THRESHOLD, GATE_MIN_ACTIVE, GATE_MIN_INK, UNKNOWN_LABEL};
use crate::dataset::Dataset;
use crate::distance::{cosine_distance, feature_distance, pixel_distance};
use crate::features::FeatureVector;
use crate::grid::InkGrid;
use crate::prototype::LabelPrototype;
use crate::stroke::Stroke;

// Blend weights for the per-sample and per-prototype distances.
const SAMPLE_BLEND: (f64, f64, f64) = (1.9, 1.4, 1.7);
const PROTOTYPE_BLEND: (f64, f64, f64) = (1.6, 1.2, 1.5);

/// Prototypes vote at a slight discount relative to nearest samples.
const PROTOTYPE_VOTE_SCALE: f64 = 0.9;

/// Evidence bonus cap: min(sample_count, 12) / 120 is subtracted from a
/// prototype's distance — well-populated prototypes earn a little trust.
const EVIDENCE_COUNT_CEIL: f64 = 12.0;
const EVIDENCE_DIVISOR: f64 = 120.0;

/// Empirically chosen knobs. None of these are load-bearing invariants;
/// hosts may override them (see dg-store's config file).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tuning {
    /// Fixed neighborhood size for sample voting.
    pub neighbors: usize,
    /// Floor on blended distance before inverse-distance voting.
    pub vote_floor: f64,
    /// Below this confidence the guess is forced to "unknown".
    pub low_confidence_floor: u8,
    /// Below this raw vote margin the guess is forced to "unknown".
    pub margin_floor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            neighbors: 9,
            vote_floor: 0.05,
            low_confidence_floor: 60,
            margin_floor: 0.12,
        }
    }
}

/// Why the classifier answered the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A confident guess.
    Guess,
    /// A numeric winner existed but the classifier prefers "don't know".
    LowConfidence,
    /// The attempt failed the meaningful-drawing gate.
    NotMeaningful,
    /// The dataset is empty; nothing to compare against.
    NeedsTraining,
}

/// Classifier output. Total: every input maps to one of these, never an
/// error — failure is absorbed into confidence-0 / "unknown" outcomes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Guess {
    pub outcome: Outcome,
    pub label: String,
    pub confidence: u8,
    pub low_confidence: bool,
    pub advisory: Option<String>,
}

impl Guess {
    fn not_meaningful() -> Self {
        Self {
            outcome: Outcome::NotMeaningful,
            label: UNKNOWN_LABEL.to_string(),
            confidence: 0,
            low_confidence: true,
            advisory: Some("draw a little more first".to_string()),
        }
    }

    fn needs_training() -> Self {
        Self {
            outcome: Outcome::NeedsTraining,
            label: UNKNOWN_LABEL.to_string(),
            confidence: 0,
            low_confidence: true,
            advisory: Some("no training data yet, save some drawings first".to_string()),
        }
    }
}

/// One immutable drawing attempt: the rasterized grid, the raw strokes,
/// and the surface diagonal the strokes were drawn against.
#[derive(Clone, Debug)]
pub struct Attempt {
    pub grid: InkGrid,
    pub strokes: Vec<Stroke>,
    pub surface_diagonal: f64,
}

impl Attempt {
    pub fn features(&self) -> FeatureVector {
        FeatureVector::extract(&self.grid, &self.strokes, self.surface_diagonal)
    }
}

/// The meaningful-drawing gate: enough total ink, enough active cells,
/// and at least one real (non-tap) stroke. Evaluated fresh per attempt.
pub fn is_meaningful(grid: &InkGrid, strokes: &[Stroke]) -> bool {
    let drawn = strokes.iter().filter(|s| !s.is_tap()).count();
    grid.total_ink() > GATE_MIN_INK
        && grid.active_count(GATE_ACTIVE_THRESHOLD) > GATE_MIN_ACTIVE
        && drawn > 0
}

fn blended(
    weights: (f64, f64, f64),
    ink_a: &[f64],
    ink_b: &[f64],
    f_a: &FeatureVector,
    f_b: &FeatureVector,
) -> f64 {
    let (wp, wc, wf) = weights;
    wp * pixel_distance(ink_a, ink_b)
        + wc * cosine_distance(ink_a, ink_b)
        + wf * feature_distance(f_a, f_b)
}

/// Rank labels against the dataset and prototypes and emit a guess with
/// calibrated confidence.
pub fn classify(
    attempt: &Attempt,
    dataset: &Dataset,
    prototypes: &[LabelPrototype],
    tuning: &Tuning,
) -> Guess {
    if !is_meaningful(&attempt.grid, &attempt.strokes) {
        return Guess::not_meaningful();
    }
    if dataset.is_empty() {
        return Guess::needs_training();
    }

    let ink = attempt.grid.as_slice();
    let features = attempt.features();

    // Blended distance to every individual sample
    let mut sample_distances: Vec<(f64, &str)> = dataset
        .iter()
        .map(|s| {
            (
                blended(SAMPLE_BLEND, ink, &s.ink, &features, &s.features),
                s.label.as_str(),
            )
        })
        .collect();
    sample_distances
        .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    // BTreeMap keeps the tally iteration order lexicographic, which makes
    // exact ties deterministic.
    let mut votes: BTreeMap<&str, f64> = BTreeMap::new();

    // The k nearest samples vote with inverse distance
    for (distance, label) in sample_distances.iter().take(tuning.neighbors) {
        *votes.entry(label).or_default() += 1.0 / distance.max(tuning.vote_floor);
    }

    // Every prototype votes — they stand for the whole dataset, not one
    // noisy sample, so no top-k cutoff applies.
    for proto in prototypes {
        let bonus = (proto.sample_count as f64).min(EVIDENCE_COUNT_CEIL) / EVIDENCE_DIVISOR;
        let distance = blended(
            PROTOTYPE_BLEND,
            ink,
            &proto.mean_ink,
            &features,
            &proto.mean_features,
        ) - bonus;
        *votes.entry(&proto.label).or_default() +=
            PROTOTYPE_VOTE_SCALE / distance.max(tuning.vote_floor);
    }

    // Rank by tally descending; ties keep lexicographic label order
    let mut ranked: Vec<(&str, f64)> = votes.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let vote_total: f64 = ranked.iter().map(|(_, t)| t).sum();
    let (best_label, best_tally) = ranked[0];
    let second_tally = ranked.get(1).map(|(_, t)| *t).unwrap_or(0.0);

    let certainty = best_tally / vote_total.max(f64::MIN_POSITIVE);
    let margin = best_tally - second_tally;
    let prototype_weight = (dataset.distinct_label_count() as f64 / 10.0).min(1.0);

    let raw = certainty * 0.65 + margin * 0.25 + prototype_weight * 0.10;
    let confidence = (100.0 * raw.clamp(0.01, 0.99)).round().clamp(1.0, 99.0) as u8;

    let low_confidence = confidence < tuning.low_confidence_floor || margin < tuning.margin_floor;

    if low_confidence {
        Guess {
            outcome: Outcome::LowConfidence,
            label: UNKNOWN_LABEL.to_string(),
            confidence,
            low_confidence: true,
            advisory: Some(format!(
                "not sure — best candidate was '{best_label}' at {confidence}%"
            )),
        }
    } else {
        Guess {
            outcome: Outcome::Guess,
            label: best_label.to_string(),
            confidence,
            low_confidence: false,
            advisory: None,
        }
    }
}

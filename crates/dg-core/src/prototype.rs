use std::collections::BTreeMap;

use crate::constants::INK_LEN;
use crate::dataset::Dataset;
use crate::features::FeatureVector;

/// Per-label mean of all samples sharing that label: an ink-grid-shaped
/// average plus a feature average and supporting sample count. A pure
/// projection of the dataset — recomputed on every change, never stored.
#[derive(Clone, Debug)]
pub struct LabelPrototype {
    pub label: String,
    pub mean_ink: Vec<f64>,
    pub mean_features: FeatureVector,
    pub sample_count: usize,
}

struct Accumulator {
    ink: Vec<f64>,
    features: [f64; 9],
    count: usize,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            ink: vec![0.0; INK_LEN],
            features: [0.0; 9],
            count: 0,
        }
    }

    fn add(&mut self, ink: &[f64], f: &FeatureVector) {
        for (acc, v) in self.ink.iter_mut().zip(ink) {
            *acc += v;
        }
        let terms = [
            f.fill_ratio,
            f.aspect_ratio,
            f.compactness,
            f.symmetry_x,
            f.symmetry_y,
            f.edge_density,
            f.length_norm,
            f.straightness,
            f.stroke_count,
        ];
        for (acc, v) in self.features.iter_mut().zip(terms) {
            *acc += v;
        }
        self.count += 1;
    }

    fn finish(self, label: String) -> LabelPrototype {
        let n = self.count.max(1) as f64;
        let f = self.features.map(|v| v / n);
        LabelPrototype {
            label,
            mean_ink: self.ink.into_iter().map(|v| v / n).collect(),
            mean_features: FeatureVector {
                fill_ratio: f[0],
                aspect_ratio: f[1],
                compactness: f[2],
                symmetry_x: f[3],
                symmetry_y: f[4],
                edge_density: f[5],
                length_norm: f[6],
                straightness: f[7],
                stroke_count: f[8],
            },
            sample_count: self.count,
        }
    }
}

/// Group samples by label and average ink element-wise and features
/// field-wise. Output is sorted by label, so two datasets holding the
/// same multiset of samples produce the same prototypes regardless of
/// insertion order. O(dataset size × GRID_SIDE²).
pub fn build_prototypes(dataset: &Dataset) -> Vec<LabelPrototype> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for sample in dataset.iter() {
        groups
            .entry(&sample.label)
            .or_insert_with(Accumulator::new)
            .add(&sample.ink, &sample.features);
    }
    groups
        .into_iter()
        .map(|(label, acc)| acc.finish(label.to_string()))
        .collect()
}

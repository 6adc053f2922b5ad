use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DATASET_CAP, INK_LEN};
use crate::features::FeatureVector;
use crate::grid::InkGrid;
use crate::time::now_iso8601;

/// One confirmed drawing: label, flattened ink grid, derived features,
/// and creation timestamp. Immutable once created — samples are only
/// ever appended or evicted, never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sample {
    pub id: Uuid,
    pub label: String,
    pub ink: Vec<f64>,
    pub features: FeatureVector,
    pub timestamp: String,
}

impl Sample {
    pub fn new(label: &str, grid: &InkGrid, features: FeatureVector) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.to_string(),
            ink: grid.as_slice().to_vec(),
            features,
            timestamp: now_iso8601(),
        }
    }

    /// Rebuild a sample from persisted parts (load paths only).
    pub fn from_parts(
        id: Uuid,
        label: String,
        ink: Vec<f64>,
        features: FeatureVector,
        timestamp: String,
    ) -> Self {
        Self {
            id,
            label,
            ink,
            features,
            timestamp,
        }
    }
}

/// Structural check applied by every load path: the label must be
/// non-empty text and the ink vector exactly GRID_SIDE² finite values.
/// Entries failing it are silently dropped, never an error.
pub fn structurally_valid(label: &str, ink: &[f64]) -> bool {
    !label.is_empty() && ink.len() == INK_LEN && ink.iter().all(|v| v.is_finite())
}

/// Per-label sample counts plus totals, for display surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetStats {
    pub total: usize,
    pub distinct_labels: usize,
    pub per_label: Vec<(String, usize)>,
}

/// Insertion-ordered, FIFO-capped collection of labeled samples.
///
/// Handlers treat the dataset as an immutable snapshot: `append`
/// produces a new dataset rather than mutating shared state, so a
/// reader holding a previous snapshot is never disturbed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Build from already-validated samples, trimming oldest past the cap.
    pub fn from_samples(mut samples: Vec<Sample>) -> Self {
        if samples.len() > DATASET_CAP {
            samples.drain(..samples.len() - DATASET_CAP);
        }
        Self { samples }
    }

    /// Copy-on-write append: returns the successor dataset with the new
    /// sample at the back and, past the cap, the oldest entries trimmed
    /// from the front.
    pub fn append(&self, sample: Sample) -> Self {
        let mut samples = self.samples.clone();
        samples.push(sample);
        if samples.len() > DATASET_CAP {
            samples.drain(..samples.len() - DATASET_CAP);
        }
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Number of distinct labels trained so far.
    pub fn distinct_label_count(&self) -> usize {
        let mut labels: Vec<&str> = self.samples.iter().map(|s| s.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }

    /// Totals and per-label counts, sorted by label.
    pub fn stats(&self) -> DatasetStats {
        let mut per_label: BTreeMap<&str, usize> = BTreeMap::new();
        for sample in &self.samples {
            *per_label.entry(&sample.label).or_default() += 1;
        }
        DatasetStats {
            total: self.samples.len(),
            distinct_labels: per_label.len(),
            per_label: per_label
                .into_iter()
                .map(|(label, count)| (label.to_string(), count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: &str) -> Sample {
        Sample::new(label, &InkGrid::blank(), FeatureVector::from_grid_only(&InkGrid::blank()))
    }

    #[test]
    fn test_append_is_copy_on_write() {
        let d0 = Dataset::new();
        let d1 = d0.append(sample("cat"));
        assert_eq!(d0.len(), 0, "prior snapshot untouched");
        assert_eq!(d1.len(), 1);
    }

    #[test]
    fn test_append_never_exceeds_cap() {
        let samples: Vec<Sample> = (0..DATASET_CAP).map(|_| sample("cat")).collect();
        let full = Dataset::from_samples(samples);
        assert_eq!(full.len(), DATASET_CAP);

        let after = full.append(sample("dog"));
        assert_eq!(after.len(), DATASET_CAP);
    }

    #[test]
    fn test_eviction_drops_exactly_the_oldest() {
        let mut samples: Vec<Sample> = (0..DATASET_CAP).map(|_| sample("old")).collect();
        samples[0].label = "very-first".to_string();
        let full = Dataset::from_samples(samples);

        let after = full.append(sample("new"));
        assert_eq!(after.len(), DATASET_CAP);
        assert_ne!(after.samples()[0].label, "very-first");
        assert_eq!(after.samples()[DATASET_CAP - 1].label, "new");
    }

    #[test]
    fn test_from_samples_trims_front() {
        let mut samples: Vec<Sample> = (0..DATASET_CAP + 5).map(|_| sample("a")).collect();
        for s in samples.iter_mut().take(5) {
            s.label = "doomed".to_string();
        }
        let d = Dataset::from_samples(samples);
        assert_eq!(d.len(), DATASET_CAP);
        assert!(d.iter().all(|s| s.label != "doomed"));
    }

    #[test]
    fn test_structural_check() {
        let good = vec![0.5; INK_LEN];
        assert!(structurally_valid("cat", &good));
        assert!(!structurally_valid("", &good));
        assert!(!structurally_valid("cat", &good[..INK_LEN - 1]));

        let mut with_nan = good.clone();
        with_nan[3] = f64::NAN;
        assert!(!structurally_valid("cat", &with_nan));
    }

    #[test]
    fn test_stats_sorted_by_label() {
        let d = Dataset::from_samples(vec![
            sample("zebra"),
            sample("cat"),
            sample("cat"),
            sample("moon"),
        ]);
        let stats = d.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.distinct_labels, 3);
        assert_eq!(
            stats.per_label,
            vec![
                ("cat".to_string(), 2),
                ("moon".to_string(), 1),
                ("zebra".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_distinct_label_count() {
        let d = Dataset::from_samples(vec![sample("a"), sample("b"), sample("a")]);
        assert_eq!(d.distinct_label_count(), 2);
    }
}

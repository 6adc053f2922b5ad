use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dataset::{Dataset, Sample, structurally_valid};
use crate::features::FeatureVector;
use crate::grid::InkGrid;

pub const CURRENT_VERSION: &str = "1";

#[derive(Serialize, Deserialize)]
struct WireFile {
    version: String,
    samples: Vec<serde_json::Value>,
}

/// Loose per-entry shape: only label and ink are required. Anything the
/// entry is missing beyond that gets a defined fallback, and entries
/// failing the structural check are dropped rather than failing the file.
#[derive(Deserialize)]
struct WireSample {
    label: String,
    ink: Vec<f64>,
    #[serde(default)]
    features: Option<FeatureVector>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    id: Option<Uuid>,
}

/// Serialize a dataset to the versioned JSON wire format.
pub fn export_json(dataset: &Dataset) -> serde_json::Result<String> {
    let samples: Vec<serde_json::Value> = dataset
        .iter()
        .map(serde_json::to_value)
        .collect::<serde_json::Result<_>>()?;
    serde_json::to_string_pretty(&WireFile {
        version: CURRENT_VERSION.to_string(),
        samples,
    })
}

/// Parse the wire format leniently: the file must be JSON with a
/// `samples` array, but individual entries that are malformed or fail
/// the structural check are skipped. Returns the dataset and the number
/// of entries dropped.
pub fn import_json(json: &str) -> serde_json::Result<(Dataset, usize)> {
    let file: WireFile = serde_json::from_str(json)?;

    let mut kept = Vec::new();
    let mut dropped = 0usize;

    for value in file.samples {
        let Ok(entry) = serde_json::from_value::<WireSample>(value) else {
            dropped += 1;
            continue;
        };
        if !structurally_valid(&entry.label, &entry.ink) {
            dropped += 1;
            continue;
        }

        // Missing features are recoverable from the ink grid; the motion
        // half is gone with the original strokes and stays zero.
        let features = entry.features.unwrap_or_else(|| {
            FeatureVector::from_grid_only(&InkGrid::from_cells(entry.ink.clone()))
        });

        kept.push(Sample::from_parts(
            entry.id.unwrap_or_else(Uuid::new_v4),
            entry.label,
            entry.ink,
            features,
            entry.timestamp.unwrap_or_default(),
        ));
    }

    Ok((Dataset::from_samples(kept), dropped))
}

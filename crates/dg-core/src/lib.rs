//! Sketch classification engine.
//!
//! Turns raw stroke/pixel input into a fixed 16×16 ink grid, extracts
//! shape and motion features, and ranks labels by a blended distance
//! against a FIFO-capped dataset of past drawings and per-label
//! prototypes, emitting a guess with calibrated confidence and an
//! honest "don't know" fallback.
//!
//! Zero I/O — pure math engine with no opinions about rendering hosts
//! or persistence.

pub mod classify;
pub mod constants;
pub mod dataset;
pub mod distance;
pub mod features;
pub mod grid;
pub mod prompt;
pub mod prototype;
pub mod session;
pub mod stroke;
pub mod surface;
pub mod time;
pub mod wire;

pub use classify::{Attempt, Guess, Outcome, Tuning, classify, is_meaningful};
pub use constants::{DATASET_CAP, GRID_SIDE, INK_LEN, UNKNOWN_LABEL};
pub use dataset::{Dataset, DatasetStats, Sample, structurally_valid};
pub use distance::{cosine_distance, feature_distance, pixel_distance};
pub use features::{FeatureVector, MotionFeatures, ShapeFeatures, motion_features, shape_features};
pub use grid::InkGrid;
pub use prompt::{PromptDeck, VOCABULARY};
pub use prototype::{LabelPrototype, build_prototypes};
pub use session::DrawingSession;
pub use stroke::{Point, Stroke};
pub use surface::Surface;
pub use time::now_iso8601;
pub use wire::{CURRENT_VERSION, export_json, import_json};

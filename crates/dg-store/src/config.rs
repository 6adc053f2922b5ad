use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use dg_core::Tuning;

/// Default base directory for all doodleguess storage.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".doodleguess")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve the data directory: explicit override, then DG_DATA_DIR,
/// then the default under the home directory.
pub fn resolve_base_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    env::var("DG_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_base_dir())
}

/// Optional classifier overrides from `config.toml` in the data dir.
/// Every knob is optional; anything absent keeps its default. The
/// thresholds are empirically chosen, not invariants, so hosts may tune
/// them without touching code.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct TuningOverrides {
    pub neighbors: Option<usize>,
    pub vote_floor: Option<f64>,
    pub low_confidence_floor: Option<u8>,
    pub margin_floor: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tuning: TuningOverrides,
}

impl Config {
    /// Load `config.toml` from the data dir. A missing file is the
    /// default config; a malformed file is logged and ignored — config
    /// can never block startup.
    pub fn load(base_dir: &Path) -> Self {
        let path = base_dir.join("config.toml");
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Apply overrides on top of the default tuning.
    pub fn tuning(&self) -> Tuning {
        let defaults = Tuning::default();
        Tuning {
            neighbors: self.tuning.neighbors.unwrap_or(defaults.neighbors),
            vote_floor: self.tuning.vote_floor.unwrap_or(defaults.vote_floor),
            low_confidence_floor: self
                .tuning
                .low_confidence_floor
                .unwrap_or(defaults.low_confidence_floor),
            margin_floor: self.tuning.margin_floor.unwrap_or(defaults.margin_floor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path());
        let tuning = config.tuning();
        let defaults = Tuning::default();
        assert_eq!(tuning.neighbors, defaults.neighbors);
        assert_eq!(tuning.low_confidence_floor, defaults.low_confidence_floor);
    }

    #[test]
    fn test_partial_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[tuning]\nneighbors = 5\nmargin_floor = 0.2\n",
        )
        .unwrap();

        let tuning = Config::load(dir.path()).tuning();
        assert_eq!(tuning.neighbors, 5);
        assert_eq!(tuning.margin_floor, 0.2);
        // Untouched knobs keep defaults
        assert_eq!(tuning.vote_floor, Tuning::default().vote_floor);
    }

    #[test]
    fn test_malformed_config_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "this is not toml [[[").unwrap();
        let tuning = Config::load(dir.path()).tuning();
        assert_eq!(tuning.neighbors, Tuning::default().neighbors);
    }

    #[test]
    fn test_explicit_override_wins() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_base_dir(Some(dir.path()));
        assert_eq!(resolved, dir.path());
    }
}

use std::fs;
use std::path::Path;

use dg_core::{export_json, import_json};

use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Import a JSON export file into this store, replacing its contents.
    /// Malformed entries are dropped by the wire parser, not errors.
    pub fn import_json_file(&self, path: &Path) -> Result<usize> {
        let json = fs::read_to_string(path).map_err(|e| StoreError::WireFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let (dataset, dropped) = import_json(&json).map_err(StoreError::WireFormat)?;
        if dropped > 0 {
            tracing::warn!("import dropped {dropped} malformed entries");
        }
        self.save_dataset(&dataset)?;
        Ok(dataset.len())
    }

    /// Export the store contents to a JSON file.
    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json_string()?;
        fs::write(path, json).map_err(|e| StoreError::WireFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Export the store contents as a JSON string.
    pub fn export_json_string(&self) -> Result<String> {
        let dataset = self.load_dataset()?;
        export_json(&dataset).map_err(StoreError::SampleEncode)
    }
}

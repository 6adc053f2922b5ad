use std::path::Path;

use rusqlite::{Connection, params};
use uuid::Uuid;

use dg_core::{Dataset, FeatureVector, InkGrid, Sample, constants::DATASET_CAP, structurally_valid};

use crate::error::Result;
use crate::schema;

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).ok();
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // --- Save ---

    /// Persist the full dataset: total replace in one transaction, no
    /// incremental diff.
    pub fn save_dataset(&self, dataset: &Dataset) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch("DELETE FROM samples;")?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO samples (id, label, ink, features, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for sample in dataset.iter() {
                stmt.execute(params![
                    sample.id.to_string(),
                    sample.label,
                    encode_json(&sample.ink)?,
                    encode_json(&sample.features)?,
                    sample.timestamp,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Append a single sample, then trim the oldest rows past the FIFO
    /// cap. Row order (rowid) is insertion order.
    pub fn append_sample(&self, sample: &Sample) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO samples (id, label, ink, features, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                sample.id.to_string(),
                sample.label,
                encode_json(&sample.ink)?,
                encode_json(&sample.features)?,
                sample.timestamp,
            ],
        )?;
        tx.execute(
            "DELETE FROM samples WHERE rowid NOT IN
             (SELECT rowid FROM samples ORDER BY rowid DESC LIMIT ?1)",
            [DATASET_CAP as i64],
        )?;
        tx.commit()?;
        Ok(())
    }

    // --- Load ---

    /// Load the dataset in insertion order. Forgiving by contract: rows
    /// that fail to parse or fail the structural check are skipped with
    /// a debug log, and an absent or empty table yields an empty
    /// dataset. This path never fails on bad data, only on SQLite
    /// errors themselves.
    pub fn load_dataset(&self) -> Result<Dataset> {
        let mut stmt = self.conn.prepare(
            "SELECT id, label, ink, features, created_at FROM samples ORDER BY rowid",
        )?;

        let rows: Vec<(String, String, String, String, String)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let mut samples = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;

        for (id_str, label, ink_json, features_json, created_at) in rows {
            let Ok(ink) = serde_json::from_str::<Vec<f64>>(&ink_json) else {
                dropped += 1;
                continue;
            };
            if !structurally_valid(&label, &ink) {
                dropped += 1;
                continue;
            }

            let id = Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4());
            // Missing or garbled features are recomputed from the ink;
            // the motion half is lost with the strokes and stays zero.
            let features = serde_json::from_str::<FeatureVector>(&features_json)
                .unwrap_or_else(|_| {
                    FeatureVector::from_grid_only(&InkGrid::from_cells(ink.clone()))
                });

            samples.push(Sample::from_parts(id, label, ink, features, created_at));
        }

        if dropped > 0 {
            tracing::debug!("dropped {dropped} malformed sample rows on load");
        }

        Ok(Dataset::from_samples(samples))
    }

    // --- Stats ---

    pub fn sample_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT count(*) FROM samples", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn label_counts(&self) -> Result<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare(
            "SELECT label, count(*) FROM samples GROUP BY label ORDER BY label",
        )?;
        let counts = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?
            .collect::<std::result::Result<_, _>>()?;
        Ok(counts)
    }
}

fn encode_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(crate::error::StoreError::SampleEncode)
}

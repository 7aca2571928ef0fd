//! Flat-file store - whole-collection load and save.

use crate::error::StoreResult;
use aptman_core::StoreRecord;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Store for one record collection, backed by a single flat file.
///
/// The file holds one line per record. `load` reads the whole file once;
/// `save` overwrites it entirely (not an append). Nothing here locks the
/// file; concurrent writers are unsupported and last-writer-wins.
pub struct FlatFileStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: StoreRecord> FlatFileStore<R> {
    /// Store for `R` inside `data_dir`, using the record type's file name.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::at_path(data_dir.as_ref().join(R::STORE_FILE))
    }

    /// Store backed by an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection in file order.
    ///
    /// A missing file is an empty collection. Lines that fail to parse are
    /// skipped, never fatal.
    pub fn load(&self) -> StoreResult<Vec<R>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for line in content.lines() {
            match R::parse_line(line) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(
                path = %self.path.display(),
                skipped,
                "dropped malformed store lines during load"
            );
        }
        Ok(records)
    }

    /// Overwrite the backing file with the full collection.
    pub fn save(&self, records: &[R]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = String::new();
        for record in records {
            out.push_str(&record.to_line());
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }
}

//! Line codec shared by all persisted record types.

/// A record that can be stored as one line of a flat file.
///
/// Each record type owns one backing store file. A line that fails to parse
/// is dropped by the loader rather than failing the whole load, so
/// `parse_line` reports failure as `None`.
pub trait StoreRecord: Sized {
    /// File name of the backing store for this record type.
    const STORE_FILE: &'static str;

    /// The case-insensitive unique key within one collection.
    fn key(&self) -> &str;

    /// Whether this record's key matches `key`, ignoring case.
    ///
    /// Comparison lowercases both sides so non-ASCII keys ("Ömer") match
    /// their other-cased spellings too.
    fn key_matches(&self, key: &str) -> bool {
        self.key().to_lowercase() == key.to_lowercase()
    }

    /// Encode the record as a single store line (no trailing newline).
    fn to_line(&self) -> String;

    /// Decode one store line; `None` for malformed lines.
    fn parse_line(line: &str) -> Option<Self>;
}

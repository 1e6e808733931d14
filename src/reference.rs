// 🗂️ Reference Tables - known entity key → URI maps
//
// Four tables (instructor, term, course, section) are loaded before the run
// and consulted on every record. The reconciler inserts a key exactly once
// when it mints a new entity; keys are never overwritten or removed during
// a run, so a URI handed out for a key stays valid for the rest of the run.

use anyhow::{bail, Result};
use std::collections::HashMap;

// ============================================================================
// REFERENCE TABLE
// ============================================================================

/// One key → URI map with insert-once semantics.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, String>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        ReferenceTable {
            entries: HashMap::new(),
        }
    }

    /// Build a table from pre-loaded (key, uri) pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        ReferenceTable {
            entries: entries.into_iter().collect(),
        }
    }

    /// Exact-match lookup. No trimming, case-folding, or fuzzy matching:
    /// a key that differs by case or whitespace is a different entity.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Checked insert. Refuses to overwrite: a second insert under the same
    /// key during a run means the reconciler failed to reuse an existing
    /// entity, which is a bug, not data.
    pub fn insert_new(&mut self, key: &str, uri: &str) -> Result<()> {
        if let Some(existing) = self.entries.get(key) {
            bail!(
                "Reference table already has an entry for {:?} ({}), refusing to overwrite",
                key,
                existing
            );
        }
        self.entries.insert(key.to_string(), uri.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// THE FOUR-TABLE BUNDLE
// ============================================================================

/// All reference state for one run, owned by the reconciler.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    /// Instructor UFID → person URI
    pub instructors: ReferenceTable,
    /// Term name → term URI
    pub terms: ReferenceTable,
    /// Course number → course URI
    pub courses: ReferenceTable,
    /// Section name → section URI
    pub sections: ReferenceTable,
}

impl ReferenceTables {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 📋 Teaching Records - registry CSV → in-memory records
// One row = one teaching assignment: instructor teaches a section of a
// course in a term. Rows come from the registrar's data warehouse export.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// TEACHING RECORD
// ============================================================================

/// One incoming teaching-assignment row plus the references resolved for it
/// during reconciliation.
///
/// Input fields map to the registrar export headers. Derived fields start
/// empty and are filled in by the reconciler; `course_new` marks whether the
/// course was minted in this run (sections of a brand-new course are always
/// new as well).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachingRecord {
    // ========================================================================
    // INPUT FIELDS (from the registrar CSV, never modified)
    // ========================================================================
    #[serde(rename = "UFID")]
    pub ufid: String,

    #[serde(rename = "TERM_NAME")]
    pub term_name: String,

    #[serde(rename = "COURSE_NUMBER")]
    pub course_number: String,

    #[serde(rename = "COURSE_NAME")]
    pub course_name: String,

    #[serde(rename = "SECTION_NAME")]
    pub section_name: String,

    // ========================================================================
    // DERIVED FIELDS (filled in by reconciliation)
    // ========================================================================
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_uri: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_uri: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_uri: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_uri: Option<String>,

    #[serde(default)]
    pub course_new: bool,
}

impl TeachingRecord {
    /// Create a record from its five input fields. Derived fields start
    /// unresolved.
    pub fn new(
        ufid: &str,
        term_name: &str,
        course_number: &str,
        course_name: &str,
        section_name: &str,
    ) -> Self {
        TeachingRecord {
            ufid: ufid.to_string(),
            term_name: term_name.to_string(),
            course_number: course_number.to_string(),
            course_name: course_name.to_string(),
            section_name: section_name.to_string(),
            instructor_uri: None,
            term_uri: None,
            course_uri: None,
            section_uri: None,
            course_new: false,
        }
    }

    /// Compute the idempotency key for this row.
    /// Two rows with the same five input fields are the same assignment;
    /// the loader keeps only the first.
    pub fn record_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "{}|{}|{}|{}|{}",
            self.ufid, self.term_name, self.course_number, self.course_name, self.section_name
        ));
        format!("{:x}", hasher.finalize())
    }

    /// Identifying fields for exception lines, one compact string.
    pub fn describe(&self) -> String {
        format!(
            "ufid={} term={} course={} section={}",
            self.ufid, self.term_name, self.course_number, self.section_name
        )
    }
}

// ============================================================================
// CSV LOADING
// ============================================================================

/// Load the teaching data CSV into records, dropping exact-duplicate rows.
///
/// Order matters downstream: a course minted for row *i* must be visible to
/// row *i+1*, so the input order is preserved (first occurrence wins on
/// duplicates).
pub fn load_teaching_data(csv_path: &Path) -> Result<Vec<TeachingRecord>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open teaching data CSV: {:?}", csv_path))?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (i, result) in reader.deserialize().enumerate() {
        let record: TeachingRecord =
            result.with_context(|| format!("Failed to parse CSV record at line {}", i + 2))?;

        if seen.insert(record.record_key()) {
            records.push(record);
        }
    }

    Ok(records)
}

// ============================================================================
// TESTS
// ============================================================================

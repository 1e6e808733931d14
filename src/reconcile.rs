// ⚖️ Reconciler - the four-stage resolution loop
//
// For each teaching record, resolve instructor → term → course → section in
// that order, short-circuiting on the first unresolvable reference. Course
// and section creation needs a valid instructor and term, so stopping early
// never leaves a partial or orphaned entity behind.
//
// A lookup miss is data, not an error: it becomes an Outcome variant that
// the output router turns into exception / deferred-identity lines. The
// only fatal condition is the factory failing to mint an entity, which
// propagates uncaught and aborts the run.

use crate::factory::EntityFactory;
use crate::records::TeachingRecord;
use crate::reference::ReferenceTables;
use anyhow::Result;
use std::collections::BTreeSet;

// ============================================================================
// OUTCOME CLASSIFICATION
// ============================================================================

/// Per-record result of one reconciliation pass. Drives routing only;
/// nothing here is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Instructor UFID absent from the instructor table. The UFID has been
    /// queued for out-of-band creation by the person-ingest pass.
    InstructorMissing { ufid: String },

    /// Term name absent from the term table. Terms are never created or
    /// deferred by this system, only reported.
    TermMissing { term_name: String },

    /// All four references resolved. `additions` holds the serialized
    /// entities minted for this record, empty when course and section both
    /// already existed.
    Resolved {
        course_new: bool,
        section_new: bool,
        additions: String,
    },
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved { .. })
    }
}

// ============================================================================
// DEFERRED IDENTITY SET
// ============================================================================

/// Instructor UFIDs seen with no known identifier, queued for the separate
/// person-ingest pass. Insert is idempotent; iteration is lexicographically
/// sorted, which is what makes the position file reproducible run to run.
#[derive(Debug, Clone, Default)]
pub struct DeferredIdentitySet {
    ufids: BTreeSet<String>,
}

impl DeferredIdentitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ufid: &str) {
        self.ufids.insert(ufid.to_string());
    }

    pub fn contains(&self, ufid: &str) -> bool {
        self.ufids.contains(ufid)
    }

    pub fn len(&self) -> usize {
        self.ufids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ufids.is_empty()
    }

    /// Sorted ascending, no duplicates.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ufids.iter().map(String::as_str)
    }
}

// ============================================================================
// RECONCILER
// ============================================================================

/// Owns all shared mutable state for one run: the four reference tables and
/// the deferred-identity set. Records are processed strictly sequentially so
/// that an entity minted for record *i* is visible to record *i+1*.
pub struct Reconciler {
    pub tables: ReferenceTables,
    pub deferred: DeferredIdentitySet,
}

impl Reconciler {
    pub fn new(tables: ReferenceTables) -> Self {
        Reconciler {
            tables,
            deferred: DeferredIdentitySet::new(),
        }
    }

    /// Resolve one record's four foreign keys and update shared state.
    ///
    /// Stage order is fixed: instructor, term, course, section. The first
    /// two are resolve-or-skip; the last two are resolve-or-create.
    pub fn reconcile<F: EntityFactory>(
        &mut self,
        record: &mut TeachingRecord,
        factory: &F,
    ) -> Result<Outcome> {
        // Stage 1: instructor. A missing instructor invalidates the whole
        // record for this run; its UFID goes to the deferred set.
        match self.tables.instructors.resolve(&record.ufid) {
            Some(uri) => record.instructor_uri = Some(uri.to_string()),
            None => {
                self.deferred.insert(&record.ufid);
                return Ok(Outcome::InstructorMissing {
                    ufid: record.ufid.clone(),
                });
            }
        }

        // Stage 2: term. Missing terms are reported but never deferred.
        match self.tables.terms.resolve(&record.term_name) {
            Some(uri) => record.term_uri = Some(uri.to_string()),
            None => {
                return Ok(Outcome::TermMissing {
                    term_name: record.term_name.clone(),
                });
            }
        }

        let mut additions = String::new();

        // Stage 3: course, resolve-or-create.
        match self.tables.courses.resolve(&record.course_number) {
            Some(uri) => {
                record.course_uri = Some(uri.to_string());
                record.course_new = false;
            }
            None => {
                let entity = factory.create_course(record)?;
                self.tables
                    .courses
                    .insert_new(&record.course_number, &entity.uri)?;
                record.course_uri = Some(entity.uri);
                record.course_new = true;
                additions.push_str(&entity.rdf);
            }
        }

        // Stage 4: section, resolve-or-create. The factory sees the
        // resolved instructor/term/course references on the record.
        let section_new = match self.tables.sections.resolve(&record.section_name) {
            Some(uri) => {
                record.section_uri = Some(uri.to_string());
                false
            }
            None => {
                let entity = factory.create_section(record)?;
                self.tables
                    .sections
                    .insert_new(&record.section_name, &entity.uri)?;
                record.section_uri = Some(entity.uri);
                additions.push_str(&entity.rdf);
                true
            }
        };

        Ok(Outcome::Resolved {
            course_new: record.course_new,
            section_new,
            additions,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

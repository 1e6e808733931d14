// 📤 Output Router - four streams, one envelope
//
// Translates each reconciliation outcome into writes on the additions,
// position, log and exception streams. The additions stream is one RDF/XML
// document: the opening marker goes out at construction, per-record
// additions are appended verbatim in processing order, and the closing
// marker goes out in finish(). Generic over Write so tests run against
// in-memory buffers instead of files.

use crate::rdf;
use crate::reconcile::{DeferredIdentitySet, Outcome};
use crate::records::TeachingRecord;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

// ============================================================================
// RUN SUMMARY
// ============================================================================

/// End-of-run totals, printed as JSON by the driver.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub records_processed: usize,
    pub instructors_missing: usize,
    pub terms_missing: usize,
    pub courses_created: usize,
    pub sections_created: usize,
    pub additions_emitted: usize,
    pub deferred_identities: usize,
}

// ============================================================================
// OUTPUT ROUTER
// ============================================================================

pub struct OutputRouter<W: Write> {
    add: W,
    pos: W,
    log: W,
    exc: W,
    summary: RunSummary,
}

impl OutputRouter<BufWriter<File>> {
    /// Open the four artifact files for a run named `base`:
    /// `<base>_add.rdf`, `<base>_pos.txt`, `<base>_log.txt`, `<base>_exc.txt`.
    ///
    /// BufWriter flushes on drop, so even a fatal abort mid-run leaves
    /// whatever was routed so far on disk.
    pub fn create(base: &str) -> Result<Self> {
        let open = |suffix: &str| -> Result<BufWriter<File>> {
            let path = format!("{}{}", base, suffix);
            let file =
                File::create(&path).with_context(|| format!("Failed to create {}", path))?;
            Ok(BufWriter::new(file))
        };

        OutputRouter::new(
            open("_add.rdf")?,
            open("_pos.txt")?,
            open("_log.txt")?,
            open("_exc.txt")?,
        )
    }
}

impl<W: Write> OutputRouter<W> {
    /// Wrap four open streams and write the envelope opening marker.
    pub fn new(mut add: W, pos: W, log: W, exc: W) -> Result<Self> {
        add.write_all(rdf::rdf_header().as_bytes())
            .context("Failed to write additions envelope header")?;

        Ok(OutputRouter {
            add,
            pos,
            log,
            exc,
            summary: RunSummary::default(),
        })
    }

    /// One timestamped line on the log stream. Used by the router itself
    /// and by the driver for load-time dictionary sizes.
    pub fn log_line(&mut self, message: &str) -> Result<()> {
        writeln!(
            self.log,
            "{} {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            message
        )
        .context("Failed to write log line")
    }

    /// Route one record's outcome onto the streams.
    pub fn route(&mut self, record: &TeachingRecord, outcome: &Outcome) -> Result<()> {
        self.summary.records_processed += 1;

        match outcome {
            Outcome::InstructorMissing { ufid } => {
                self.summary.instructors_missing += 1;
                writeln!(
                    self.exc,
                    "No such instructor on row {} UFID = {}",
                    record.describe(),
                    ufid
                )
                .context("Failed to write exception line")?;
            }

            Outcome::TermMissing { term_name } => {
                self.summary.terms_missing += 1;
                writeln!(
                    self.exc,
                    "No such term on row {} Term = {}",
                    record.describe(),
                    term_name
                )
                .context("Failed to write exception line")?;
            }

            Outcome::Resolved {
                course_new,
                section_new,
                additions,
            } => {
                if *course_new {
                    self.summary.courses_created += 1;
                    let line = format!(
                        "Add course {} at {}",
                        record.course_name,
                        record.course_uri.as_deref().unwrap_or("?")
                    );
                    self.log_line(&line)?;
                }
                if *section_new {
                    self.summary.sections_created += 1;
                    let line = format!(
                        "Add section {} at {}",
                        record.section_name,
                        record.section_uri.as_deref().unwrap_or("?")
                    );
                    self.log_line(&line)?;
                }
                if !additions.is_empty() {
                    self.summary.additions_emitted += 1;
                    self.add
                        .write_all(additions.as_bytes())
                        .context("Failed to append additions")?;
                }
            }
        }

        Ok(())
    }

    /// End of run: deferred-identity lines (sorted, duplicate-free), the
    /// envelope closing marker, the final log line, then an explicit flush
    /// of all four streams.
    pub fn finish(mut self, deferred: &DeferredIdentitySet) -> Result<RunSummary> {
        for ufid in deferred.iter() {
            // Six NULL placeholder fields and a trailing 0: person-ingest
            // reads this as "add the UFID, create no position"
            writeln!(self.pos, "NULL|{}|NULL|NULL|NULL|NULL|NULL|0", ufid)
                .context("Failed to write position line")?;
        }
        self.summary.deferred_identities = deferred.len();

        self.add
            .write_all(rdf::rdf_footer().as_bytes())
            .context("Failed to write additions envelope footer")?;

        self.log_line("End Processing")?;

        self.add.flush().context("Failed to flush additions file")?;
        self.pos.flush().context("Failed to flush position file")?;
        self.log.flush().context("Failed to flush log file")?;
        self.exc.flush().context("Failed to flush exception file")?;

        Ok(self.summary)
    }
}

// ============================================================================
// TESTS
// ============================================================================

// Run driver - the strictly sequential ingest loop
//
// Records are processed in input order, one at a time. Sequencing is a
// correctness requirement: table mutations made while resolving record i
// must be visible when resolving record i+1, so a course minted mid-run is
// reused instead of duplicated.

use crate::factory::EntityFactory;
use crate::output::{OutputRouter, RunSummary};
use crate::reconcile::Reconciler;
use crate::records::TeachingRecord;
use crate::reference::ReferenceTables;
use anyhow::Result;
use std::io::Write;

/// Reconcile every record and route its outcome, then close out the run.
///
/// A factory error aborts immediately; the router's buffered streams flush
/// what was routed before the failure when they drop.
pub fn run_ingest<F: EntityFactory, W: Write>(
    mut records: Vec<TeachingRecord>,
    tables: ReferenceTables,
    factory: &F,
    mut router: OutputRouter<W>,
) -> Result<RunSummary> {
    let mut reconciler = Reconciler::new(tables);

    router.log_line("Begin Processing")?;

    for record in records.iter_mut() {
        let outcome = reconciler.reconcile(record, factory)?;
        router.route(record, &outcome)?;
    }

    router.finish(&reconciler.deferred)
}

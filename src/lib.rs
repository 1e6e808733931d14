// Course Ingest - Core Library
// Reconciles registrar teaching data against known VIVO entities and emits
// the add/pos/log/exc artifact files for the downstream ingest passes.

pub mod records;
pub mod reference;
pub mod rdf;
pub mod factory;
pub mod reconcile;
pub mod output;
pub mod run;
pub mod store;

// Re-export commonly used types
pub use records::{load_teaching_data, TeachingRecord};
pub use reference::{ReferenceTable, ReferenceTables};
pub use rdf::{rdf_footer, rdf_header};
pub use factory::{EntityFactory, NewEntity, VivoFactory};
pub use reconcile::{DeferredIdentitySet, Outcome, Reconciler};
pub use output::{OutputRouter, RunSummary};
pub use run::run_ingest;
pub use store::{load_reference_tables, seed_entry, setup_reference_store};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

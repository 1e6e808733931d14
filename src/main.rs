use anyhow::Result;
use rusqlite::Connection;
use std::env;
use std::path::Path;

// Use library instead of local modules
use course_ingest::{
    load_reference_tables, load_teaching_data, run_ingest, OutputRouter, VivoFactory, VERSION,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Arguments: [base_name] [teaching_csv] [reference_store]
    let base_name = args.get(1).map(String::as_str).unwrap_or("course");
    let csv_path = args.get(2).map(String::as_str).unwrap_or("course_data.csv");
    let store_path = args.get(3).map(String::as_str).unwrap_or("reference.db");

    println!("📚 Course Ingest v{}", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Open the four artifact files
    let mut router = OutputRouter::create(base_name)?;
    router.log_line(&format!("Course ingest. Version {}", VERSION))?;

    // 2. Load teaching data
    println!("\n📂 Loading teaching data...");
    let records = load_teaching_data(Path::new(csv_path))?;
    println!("✓ Loaded {} teaching records from {}", records.len(), csv_path);
    router.log_line(&format!("Taught dictionary has {} entries", records.len()))?;

    // 3. Load the reference tables
    println!("\n🗂️  Loading reference tables...");
    let conn = Connection::open(store_path)?;
    let tables = load_reference_tables(&conn)?;
    println!(
        "✓ Dictionaries: {} instructors, {} terms, {} courses, {} sections",
        tables.instructors.len(),
        tables.terms.len(),
        tables.courses.len(),
        tables.sections.len()
    );
    router.log_line(&format!("Term dictionary has {} entries", tables.terms.len()))?;
    router.log_line(&format!("Course dictionary has {} entries", tables.courses.len()))?;
    router.log_line(&format!("Section dictionary has {} entries", tables.sections.len()))?;
    router.log_line(&format!("UFID dictionary has {} entries", tables.instructors.len()))?;

    // 4. Reconcile every record and close out the artifacts
    println!("\n⚖️  Reconciling...");
    let factory = VivoFactory::new();
    let summary = run_ingest(records, tables, &factory, router)?;

    // 5. Report
    println!("✓ Processed {} records", summary.records_processed);
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!(
        "\n✅ Wrote {base}_add.rdf, {base}_pos.txt, {base}_log.txt, {base}_exc.txt",
        base = base_name
    );

    Ok(())
}

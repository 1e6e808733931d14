// Reference store - SQLite-backed loaders for the four reference tables
//
// The store is read before the run starts and never written by the
// reconciler; entities minted during a run live only in memory and in the
// additions document. A later ingest pass applies the additions upstream.

use crate::reference::{ReferenceTable, ReferenceTables};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};

/// Create the reference schema if it does not exist. Used for seeding and
/// in tests; safe to call on an existing store.
pub fn setup_reference_store(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS instructors (
            ufid TEXT PRIMARY KEY,
            uri  TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS terms (
            name TEXT PRIMARY KEY,
            uri  TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS courses (
            course_number TEXT PRIMARY KEY,
            uri           TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS sections (
            section_name TEXT PRIMARY KEY,
            uri          TEXT NOT NULL
        );",
    )
    .context("Failed to create reference store schema")?;

    Ok(())
}

/// Insert one (key, uri) row into a reference store table.
pub fn seed_entry(conn: &Connection, table: &str, key: &str, uri: &str) -> Result<()> {
    let sql = match table {
        "instructors" => "INSERT INTO instructors (ufid, uri) VALUES (?1, ?2)",
        "terms" => "INSERT INTO terms (name, uri) VALUES (?1, ?2)",
        "courses" => "INSERT INTO courses (course_number, uri) VALUES (?1, ?2)",
        "sections" => "INSERT INTO sections (section_name, uri) VALUES (?1, ?2)",
        other => anyhow::bail!("Unknown reference store table: {}", other),
    };

    conn.execute(sql, params![key, uri])
        .with_context(|| format!("Failed to seed {} entry {:?}", table, key))?;

    Ok(())
}

fn load_table(conn: &Connection, query: &str) -> Result<ReferenceTable> {
    let mut stmt = conn
        .prepare(query)
        .with_context(|| format!("Failed to prepare query: {}", query))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .context("Failed to query reference table")?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row.context("Failed to read reference table row")?);
    }

    Ok(ReferenceTable::from_entries(entries))
}

/// Load all four reference tables from the store.
pub fn load_reference_tables(conn: &Connection) -> Result<ReferenceTables> {
    Ok(ReferenceTables {
        instructors: load_table(conn, "SELECT ufid, uri FROM instructors")?,
        terms: load_table(conn, "SELECT name, uri FROM terms")?,
        courses: load_table(conn, "SELECT course_number, uri FROM courses")?,
        sections: load_table(conn, "SELECT section_name, uri FROM sections")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_reference_store(&conn).unwrap();
        seed_entry(&conn, "instructors", "12345678", "u:person").unwrap();
        seed_entry(&conn, "terms", "Spring 2014", "u:term").unwrap();
        seed_entry(&conn, "courses", "ABC1234", "u:course").unwrap();
        seed_entry(&conn, "sections", "11223", "u:section").unwrap();
        conn
    }

    #[test]
    fn test_load_reference_tables() {
        let conn = seeded_store();
        let tables = load_reference_tables(&conn).unwrap();

        assert_eq!(tables.instructors.resolve("12345678"), Some("u:person"));
        assert_eq!(tables.terms.resolve("Spring 2014"), Some("u:term"));
        assert_eq!(tables.courses.resolve("ABC1234"), Some("u:course"));
        assert_eq!(tables.sections.resolve("11223"), Some("u:section"));
    }

    #[test]
    fn test_load_empty_store() {
        let conn = Connection::open_in_memory().unwrap();
        setup_reference_store(&conn).unwrap();

        let tables = load_reference_tables(&conn).unwrap();
        assert!(tables.instructors.is_empty());
        assert!(tables.sections.is_empty());
    }

    #[test]
    fn test_setup_is_idempotent() {
        let conn = seeded_store();
        setup_reference_store(&conn).unwrap();

        // Seeded data survives a second setup
        let tables = load_reference_tables(&conn).unwrap();
        assert_eq!(tables.instructors.len(), 1);
    }

    #[test]
    fn test_seed_unknown_table_fails() {
        let conn = Connection::open_in_memory().unwrap();
        setup_reference_store(&conn).unwrap();

        assert!(seed_entry(&conn, "positions", "x", "u:x").is_err());
    }

    #[test]
    fn test_duplicate_key_rejected_by_store() {
        let conn = seeded_store();
        let result = seed_entry(&conn, "courses", "ABC1234", "u:other");
        assert!(result.is_err());
    }
}

// 🏭 Entity Factory - mints new course and section entities
//
// The reconciler decides WHETHER an entity is minted; the factory decides
// HOW. The trait seam keeps the reconciler testable with a stub factory.

use crate::rdf;
use crate::records::TeachingRecord;
use anyhow::{bail, Result};

// ============================================================================
// FACTORY TRAIT
// ============================================================================

/// A freshly minted entity: its stable URI plus its serialized addition.
#[derive(Debug, Clone)]
pub struct NewEntity {
    pub uri: String,
    pub rdf: String,
}

/// Mints course and section entities for records whose keys resolved to
/// nothing. Construction failures are fatal to the run and are not caught
/// by the reconciler.
pub trait EntityFactory {
    fn create_course(&self, record: &TeachingRecord) -> Result<NewEntity>;

    /// Requires the record's instructor, term and course references to be
    /// resolved already; the reconciler guarantees this ordering.
    fn create_section(&self, record: &TeachingRecord) -> Result<NewEntity>;
}

// ============================================================================
// VIVO FACTORY
// ============================================================================

/// Production factory: mints VIVO individual URIs and renders RDF/XML.
///
/// Identity idiom: a course number is a VALUE from the registrar; the URI
/// minted here is the IDENTITY every later record reuses.
pub struct VivoFactory {
    namespace: String,
}

impl VivoFactory {
    pub fn new() -> Self {
        VivoFactory {
            namespace: "http://vivo.ufl.edu/individual/".to_string(),
        }
    }

    pub fn with_namespace(namespace: &str) -> Self {
        VivoFactory {
            namespace: namespace.to_string(),
        }
    }

    fn mint_uri(&self) -> String {
        format!("{}n{}", self.namespace, uuid::Uuid::new_v4().simple())
    }
}

impl EntityFactory for VivoFactory {
    fn create_course(&self, record: &TeachingRecord) -> Result<NewEntity> {
        if record.course_number.is_empty() {
            bail!("Cannot create course: empty course number on row {}", record.describe());
        }
        if record.course_name.is_empty() {
            bail!("Cannot create course: empty course name on row {}", record.describe());
        }

        let uri = self.mint_uri();
        let rdf = rdf::course_rdf(&uri, &record.course_number, &record.course_name);
        Ok(NewEntity { uri, rdf })
    }

    fn create_section(&self, record: &TeachingRecord) -> Result<NewEntity> {
        if record.section_name.is_empty() {
            bail!("Cannot create section: empty section name on row {}", record.describe());
        }

        let course_uri = match &record.course_uri {
            Some(uri) => uri,
            None => bail!("Cannot create section: unresolved course on row {}", record.describe()),
        };
        let instructor_uri = match &record.instructor_uri {
            Some(uri) => uri,
            None => bail!("Cannot create section: unresolved instructor on row {}", record.describe()),
        };
        let term_uri = match &record.term_uri {
            Some(uri) => uri,
            None => bail!("Cannot create section: unresolved term on row {}", record.describe()),
        };

        let uri = self.mint_uri();
        let rdf = rdf::section_rdf(
            &uri,
            &record.section_name,
            course_uri,
            instructor_uri,
            term_uri,
        );
        Ok(NewEntity { uri, rdf })
    }
}

impl Default for VivoFactory {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved_record() -> TeachingRecord {
        let mut record =
            TeachingRecord::new("12345678", "Spring 2014", "ABC1234", "Intro", "11223");
        record.instructor_uri = Some("u:person".to_string());
        record.term_uri = Some("u:term".to_string());
        record.course_uri = Some("u:course".to_string());
        record
    }

    #[test]
    fn test_create_course_mints_unique_uris() {
        let factory = VivoFactory::new();
        let record = resolved_record();

        let a = factory.create_course(&record).unwrap();
        let b = factory.create_course(&record).unwrap();

        assert!(a.uri.starts_with("http://vivo.ufl.edu/individual/n"));
        assert_ne!(a.uri, b.uri);
        assert!(a.rdf.contains(&a.uri));
        assert!(a.rdf.contains("ABC1234"));
    }

    #[test]
    fn test_create_course_empty_number_fails() {
        let factory = VivoFactory::new();
        let record = TeachingRecord::new("12345678", "Spring 2014", "", "Intro", "11223");

        assert!(factory.create_course(&record).is_err());
    }

    #[test]
    fn test_create_course_empty_name_fails() {
        let factory = VivoFactory::new();
        let record = TeachingRecord::new("12345678", "Spring 2014", "ABC1234", "", "11223");

        assert!(factory.create_course(&record).is_err());
    }

    #[test]
    fn test_create_section_links_resolved_references() {
        let factory = VivoFactory::new();
        let record = resolved_record();

        let entity = factory.create_section(&record).unwrap();
        assert!(entity.rdf.contains("u:course"));
        assert!(entity.rdf.contains("u:person"));
        assert!(entity.rdf.contains("u:term"));
        assert!(entity.rdf.contains("11223"));
    }

    #[test]
    fn test_create_section_requires_resolved_course() {
        let factory = VivoFactory::new();
        let mut record = resolved_record();
        record.course_uri = None;

        assert!(factory.create_section(&record).is_err());
    }

    #[test]
    fn test_custom_namespace() {
        let factory = VivoFactory::with_namespace("http://vivo.school.edu/individual/");
        let record = resolved_record();

        let entity = factory.create_course(&record).unwrap();
        assert!(entity.uri.starts_with("http://vivo.school.edu/individual/n"));
    }
}

// RDF/XML output helpers - envelope markers and per-entity snippets
//
// The additions file is a single RDF/XML document: one header, the minted
// course/section descriptions in processing order, one footer. Everything
// here is plain string rendering; the factory decides what gets rendered.

/// Opening marker for the additions document.
pub fn rdf_header() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
     <rdf:RDF\n    \
     xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"\n    \
     xmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\"\n    \
     xmlns:vivo=\"http://vivoweb.org/ontology/core#\">\n"
        .to_string()
}

/// Closing marker for the additions document.
pub fn rdf_footer() -> String {
    "</rdf:RDF>\n".to_string()
}

/// Render a new course entity.
pub fn course_rdf(course_uri: &str, course_number: &str, course_name: &str) -> String {
    format!(
        "    <rdf:Description rdf:about=\"{}\">\n        \
         <rdf:type rdf:resource=\"http://vivoweb.org/ontology/core#Course\"/>\n        \
         <rdfs:label>{}</rdfs:label>\n        \
         <vivo:identifier>{}</vivo:identifier>\n    \
         </rdf:Description>\n",
        escape_xml(course_uri),
        escape_xml(course_name),
        escape_xml(course_number)
    )
}

/// Render a new section entity, linked to its course, instructor and term.
pub fn section_rdf(
    section_uri: &str,
    section_name: &str,
    course_uri: &str,
    instructor_uri: &str,
    term_uri: &str,
) -> String {
    format!(
        "    <rdf:Description rdf:about=\"{}\">\n        \
         <rdf:type rdf:resource=\"http://vivoweb.org/ontology/core#CourseSection\"/>\n        \
         <rdfs:label>{}</rdfs:label>\n        \
         <vivo:partOf rdf:resource=\"{}\"/>\n        \
         <vivo:hasInstructor rdf:resource=\"{}\"/>\n        \
         <vivo:dateTimeInterval rdf:resource=\"{}\"/>\n    \
         </rdf:Description>\n",
        escape_xml(section_uri),
        escape_xml(section_name),
        escape_xml(course_uri),
        escape_xml(instructor_uri),
        escape_xml(term_uri)
    )
}

/// Escape the five XML-reserved characters in text and attribute values.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_footer_pair() {
        let header = rdf_header();
        let footer = rdf_footer();

        assert!(header.starts_with("<?xml"));
        assert!(header.contains("<rdf:RDF"));
        assert_eq!(footer, "</rdf:RDF>\n");
    }

    #[test]
    fn test_course_rdf_contains_fields() {
        let rdf = course_rdf("http://vivo.school.edu/individual/n1", "ABC1234", "Intro");

        assert!(rdf.contains("rdf:about=\"http://vivo.school.edu/individual/n1\""));
        assert!(rdf.contains("<rdfs:label>Intro</rdfs:label>"));
        assert!(rdf.contains("<vivo:identifier>ABC1234</vivo:identifier>"));
    }

    #[test]
    fn test_section_rdf_links_all_references() {
        let rdf = section_rdf("u:sec", "11223", "u:course", "u:person", "u:term");

        assert!(rdf.contains("rdf:about=\"u:sec\""));
        assert!(rdf.contains("<vivo:partOf rdf:resource=\"u:course\"/>"));
        assert!(rdf.contains("<vivo:hasInstructor rdf:resource=\"u:person\"/>"));
        assert!(rdf.contains("<vivo:dateTimeInterval rdf:resource=\"u:term\"/>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A & B"), "A &amp; B");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_xml("plain text"), "plain text");
    }

    #[test]
    fn test_course_rdf_escapes_label() {
        let rdf = course_rdf("u:c", "ABC1234", "Circuits & Systems");
        assert!(rdf.contains("Circuits &amp; Systems"));
        assert!(!rdf.contains("Circuits & Systems"));
    }
}

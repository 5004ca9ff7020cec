//! Frontmatter splitting.

use serde_yaml::{Mapping, Value};

/// A source file split into frontmatter attributes and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Parsed YAML attributes. An empty mapping when the document carries
    /// no frontmatter block.
    pub attributes: Value,

    /// Markdown content after the closing delimiter, without the
    /// frontmatter block.
    pub body: String,
}

/// Errors that can occur when splitting frontmatter.
///
/// YAML diagnostics surface verbatim; the splitter adds no framing of its own.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a document into frontmatter attributes and markdown body.
///
/// The frontmatter block sits between the first two `---` delimiter lines.
/// When no delimiter pair is found (including an opening `---` that is never
/// closed), the whole text is the body and attributes are empty.
pub fn split_document(source: &str) -> Result<ParsedDocument, FrontmatterError> {
    let Some((block, body)) = extract_block(source) else {
        return Ok(ParsedDocument {
            attributes: Value::Mapping(Mapping::new()),
            body: source.to_string(),
        });
    };

    let attributes: Value = serde_yaml::from_str(block)?;
    let attributes = match attributes {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    };

    Ok(ParsedDocument {
        attributes,
        body: body.trim_start_matches(['\r', '\n']).to_string(),
    })
}

/// Locate the delimiter pair. Returns the raw YAML region and the body.
fn extract_block(source: &str) -> Option<(&str, &str)> {
    let trimmed = source.trim_start();
    if !is_delimiter(trimmed.lines().next()?) {
        return None;
    }

    let after_open = &trimmed[trimmed.find('\n')? + 1..];
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if is_delimiter(line) {
            let block = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }
    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_attributes_and_body() {
        let source = "---\nsubject: Hello\ntags:\n  - tag1\n  - tag2\n---\n\n# Title\n";

        let doc = split_document(source).unwrap();

        assert_eq!(doc.attributes["subject"], Value::from("Hello"));
        assert_eq!(
            doc.attributes["tags"],
            Value::Sequence(vec![Value::from("tag1"), Value::from("tag2")])
        );
        assert_eq!(doc.body, "# Title\n");
    }

    #[test]
    fn treats_whole_text_as_body_without_delimiters() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let doc = split_document(source).unwrap();

        assert_eq!(doc.attributes, Value::Mapping(Mapping::new()));
        assert_eq!(doc.body, source);
    }

    #[test]
    fn treats_unclosed_delimiter_as_body() {
        let source = "---\ntitle: Test\n# no closing line";

        let doc = split_document(source).unwrap();

        assert_eq!(doc.attributes, Value::Mapping(Mapping::new()));
        assert_eq!(doc.body, source);
    }

    #[test]
    fn allows_leading_blank_lines() {
        let source = "\n\n---\na: 1\n---\nbody";

        let doc = split_document(source).unwrap();

        assert_eq!(doc.attributes["a"], Value::from(1));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn empty_block_yields_empty_mapping() {
        let doc = split_document("---\n---\ntext").unwrap();

        assert_eq!(doc.attributes, Value::Mapping(Mapping::new()));
        assert_eq!(doc.body, "text");
    }

    #[test]
    fn closing_delimiter_at_end_of_file() {
        let doc = split_document("---\na: 1\n---").unwrap();

        assert_eq!(doc.attributes["a"], Value::from(1));
        assert_eq!(doc.body, "");
    }

    #[test]
    fn errors_on_malformed_yaml() {
        let result = split_document("---\ntitle: [broken\n---\n");

        assert!(matches!(result, Err(FrontmatterError::Yaml(_))));
    }

    #[test]
    fn later_dashes_do_not_open_a_block() {
        let source = "text first\n---\na: 1\n---\n";

        let doc = split_document(source).unwrap();

        assert_eq!(doc.attributes, Value::Mapping(Mapping::new()));
        assert_eq!(doc.body, source);
    }
}

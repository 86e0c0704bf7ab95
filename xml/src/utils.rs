use crate::error::{XmlResultsError, XmlResultsErrorKind};
use quick_xml::events::{BytesStart, BytesText};
use quick_xml::Reader;
use std::io::BufRead;
use tracing::warn;
use verdict_api::model::Outcome;

/// Root element bookkeeping shared by all report readers.
///
/// A report must have exactly one root element among `roots` and it must be closed before the end of the input.
pub(crate) struct Document {
    roots: &'static [&'static str],
    root: Option<String>,
    is_closed: bool,
}

impl Document {
    pub(crate) fn new(roots: &'static [&'static str]) -> Self {
        Self {
            roots,
            root: None,
            is_closed: false,
        }
    }

    /// To call on the start of an element that has no parent.
    pub(crate) fn open(&mut self, event: &BytesStart<'_>) -> Result<(), XmlResultsError> {
        let name = local_name(event);
        if self.root.is_some() || !self.roots.contains(&name.as_str()) {
            return Err(XmlResultsErrorKind::UnexpectedRoot {
                expected: self.roots.join("> or <"),
                found: name,
            }
            .into());
        }
        self.root = Some(name);
        Ok(())
    }

    /// To call on the end of the root element.
    pub(crate) fn close(&mut self) {
        self.is_closed = true;
    }

    /// To call on the end of the input.
    pub(crate) fn finish(&self) -> Result<(), XmlResultsError> {
        match &self.root {
            None => Err(XmlResultsErrorKind::MissingRoot(self.roots.join("> or <")).into()),
            Some(root) if !self.is_closed => {
                Err(XmlResultsErrorKind::UnexpectedEof(root.clone()).into())
            }
            Some(_) => Ok(()),
        }
    }
}

pub(crate) fn local_name(event: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(event.local_name()).into_owned()
}

/// Returns the unescaped value of the attribute `key`, if present.
pub(crate) fn attribute<R: BufRead>(
    event: &BytesStart<'_>,
    reader: &Reader<R>,
    key: &[u8],
) -> Result<Option<String>, XmlResultsError> {
    for attribute in event.attributes() {
        let attribute = attribute?;
        if attribute.key == key {
            return Ok(Some(attribute.unescape_and_decode_value(reader)?));
        }
    }
    Ok(None)
}

pub(crate) fn text<R: BufRead>(
    event: &BytesText<'_>,
    reader: &Reader<R>,
) -> Result<String, XmlResultsError> {
    Ok(event.unescape_and_decode(reader)?)
}

pub(crate) fn unrecognized_outcome(framework: &str, value: &str, test: &str) -> Outcome {
    warn!(
        "unrecognized {} outcome \"{}\" for {}, reading it as inconclusive",
        framework, value, test
    );
    Outcome::Inconclusive
}

/// Splits `Name(arguments)` into its name and its argument list.
pub(crate) fn split_call(name: &str) -> (&str, Option<&str>) {
    match name.find('(') {
        Some(open) if name.ends_with(')') => (&name[..open], Some(&name[open + 1..name.len() - 1])),
        _ => (name, None),
    }
}

/// The last segment of a dotted .NET name, ignoring a trailing argument list.
pub(crate) fn simple_name(name: &str) -> &str {
    let (name, _) = split_call(name);
    match name.rfind('.') {
        Some(dot) => &name[dot + 1..],
        None => name,
    }
}

/// Splits a rendered argument list on the commas that are not inside a string literal or a nested group.
pub(crate) fn split_arguments(arguments: &str) -> Vec<&str> {
    if arguments.trim().is_empty() {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut start = 0;
    let mut depth = 0_usize;
    let mut in_literal = false;
    let mut escaped = false;
    for (i, c) in arguments.char_indices() {
        if in_literal {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_literal = false;
            }
            continue;
        }
        match c {
            '"' => in_literal = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                result.push(arguments[start..i].trim());
                start = i + 1;
            }
            _ => (),
        }
    }
    result.push(arguments[start..].trim());
    result
}

/// SpecFlow appends the example tags as a last `string[]` argument, rendered `null` or as an array.
pub(crate) fn is_example_tags(argument: &str) -> bool {
    argument == "null" || argument.ends_with(']')
}

/// Appends `value` as a C# string literal, the way .NET test frameworks display string arguments.
pub(crate) fn push_string_literal(target: &mut String, value: &str) {
    target.push('"');
    for c in value.chars() {
        match c {
            '\\' => target.push_str("\\\\"),
            '"' => target.push_str("\\\""),
            '\n' => target.push_str("\\n"),
            '\r' => target.push_str("\\r"),
            '\t' => target.push_str("\\t"),
            c => target.push(c),
        }
    }
    target.push('"');
}

/// Renders `cells` as a list of C# string literals joined with `separator`.
pub(crate) fn string_literals(cells: &[&str], separator: &str) -> String {
    let mut signature = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            signature.push_str(separator);
        }
        push_string_literal(&mut signature, cell);
    }
    signature
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_split_call() {
        assert_eq!(
            split_call("Ns.Fixture.Method(\"a\",null)"),
            ("Ns.Fixture.Method", Some("\"a\",null"))
        );
        assert_eq!(split_call("Ns.Fixture.Method"), ("Ns.Fixture.Method", None));
        assert_eq!(simple_name("Ns.Fixture.Method(\"a.b\")"), "Method");
    }

    #[test]
    fn test_split_arguments() {
        assert_eq!(
            split_arguments("\"a,b\",\"c\\\"\",null"),
            vec!["\"a,b\"", "\"c\\\"\"", "null"]
        );
        assert_eq!(
            split_arguments("first: \"1\", tags: [\"x\", \"y\"]"),
            vec!["first: \"1\"", "tags: [\"x\", \"y\"]"]
        );
        assert!(split_arguments("  ").is_empty());
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            string_literals(&["c:\\Temp\\", "say \"hi\""], ","),
            "\"c:\\\\Temp\\\\\",\"say \\\"hi\\\"\""
        );
    }
}

use crate::error::XmlResultsError;
use crate::utils::*;
use quick_xml::events::*;
use quick_xml::Reader;
use std::io::BufRead;
use tracing::debug;
use verdict_api::model::{Outcome, ResultRecord};
use verdict_api::parser::ResultsParser;
use verdict_api::signature::{join_escaped, ExampleSignatureBuilder};

/// Renders example rows like the scenario titles of SpecRun reports:
/// the values separated by `, `, with `,` and `\` escaped by a backslash.
///
/// ```
/// use verdict_api::signature::ExampleSignatureBuilder;
/// use verdict_xml::SpecRunExampleSignatureBuilder;
///
/// assert_eq!(r"40, 1\,5", SpecRunExampleSignatureBuilder.build(&["40", "1,5"]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecRunExampleSignatureBuilder;

impl ExampleSignatureBuilder for SpecRunExampleSignatureBuilder {
    fn build(&self, cells: &[&str]) -> String {
        join_escaped(cells, EXAMPLE_SEPARATOR, &[','])
    }
}

/// A parser for the XML reports of the SpecRun test runner.
///
/// It implements the `ResultsParser` trait.
/// SpecRun titles the runs of an example row `<outline title>, <value>, <value>...`.
pub struct SpecRunParser<R: BufRead> {
    reader: SpecRunReader<R>,
    reader_buffer: Vec<u8>,
    is_end: bool,
}

impl<R: BufRead> SpecRunParser<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        Self {
            reader: SpecRunReader {
                reader,
                document: Document::new(&[ROOT]),
                state: Vec::default(),
                records: 0,
            },
            reader_buffer: Vec::default(),
            is_end: false,
        }
    }
}

impl<R: BufRead> ResultsParser for SpecRunParser<R> {
    type Error = XmlResultsError;

    fn parse_step<E: From<XmlResultsError>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        self.reader_buffer.clear();
        let event = self
            .reader
            .reader
            .read_event(&mut self.reader_buffer)
            .map_err(XmlResultsError::from)?;
        match event {
            Event::Start(event) => self.reader.parse_start_event(&event)?,
            Event::Text(event) => self.reader.parse_text_event(&event)?,
            Event::End(_) => self.reader.parse_end_event(on_record)?,
            Event::Eof => {
                self.reader.document.finish()?;
                debug!("read {} SpecRun scenarios", self.reader.records);
                self.is_end = true;
            }
            _ => (),
        }
        Ok(())
    }

    fn is_end(&self) -> bool {
        self.is_end
    }

    fn example_signature_builder(&self) -> Box<dyn ExampleSignatureBuilder> {
        Box::new(SpecRunExampleSignatureBuilder)
    }
}

const ROOT: &str = "features";
const EXAMPLE_SEPARATOR: &str = ", ";

enum SpecRunState {
    Root,
    Feature {
        title: String,
    },
    Scenario {
        title: String,
        result: Option<String>,
    },
    Title,
    Result,
    Other,
}

struct SpecRunReader<R: BufRead> {
    reader: Reader<R>,
    document: Document,
    state: Vec<SpecRunState>,
    records: usize,
}

impl<R: BufRead> SpecRunReader<R> {
    fn parse_start_event(&mut self, event: &BytesStart<'_>) -> Result<(), XmlResultsError> {
        if self.state.is_empty() {
            self.document.open(event)?;
            self.state.push(SpecRunState::Root);
            return Ok(());
        }

        let state = match (self.state.last(), event.local_name()) {
            (Some(SpecRunState::Root), b"feature") => SpecRunState::Feature {
                title: String::new(),
            },
            (_, b"scenario") => SpecRunState::Scenario {
                title: String::new(),
                result: None,
            },
            (Some(SpecRunState::Feature { .. }), b"title")
            | (Some(SpecRunState::Scenario { .. }), b"title") => SpecRunState::Title,
            (Some(SpecRunState::Scenario { .. }), b"result") => SpecRunState::Result,
            _ => SpecRunState::Other,
        };
        self.state.push(state);
        Ok(())
    }

    fn parse_text_event(&mut self, event: &BytesText<'_>) -> Result<(), XmlResultsError> {
        let value = text(event, &self.reader)?;
        let mut open = self.state.iter_mut().rev();
        match (open.next(), open.next()) {
            (Some(SpecRunState::Title), Some(SpecRunState::Feature { title }))
            | (Some(SpecRunState::Title), Some(SpecRunState::Scenario { title, .. })) => {
                *title = value
            }
            (Some(SpecRunState::Result), Some(SpecRunState::Scenario { result, .. })) => {
                *result = Some(value)
            }
            _ => (),
        }
        Ok(())
    }

    fn parse_end_event<E: From<XmlResultsError>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        match self.state.pop() {
            Some(SpecRunState::Root) => self.document.close(),
            Some(SpecRunState::Scenario { title, result }) => {
                let feature = self.state.iter().rev().find_map(|state| match state {
                    SpecRunState::Feature { title } => Some(title.as_str()),
                    _ => None,
                });
                let record = scenario(feature.unwrap_or_default(), title, result);
                self.records += 1;
                on_record(record)?;
            }
            _ => (),
        }
        Ok(())
    }
}

fn scenario(feature: &str, title: String, result: Option<String>) -> ResultRecord {
    let qualified_name = format!("{}: {}", feature, title);
    let outcome = match result.as_deref() {
        Some("Passed") | Some("Succeeded") => Outcome::Passed,
        Some("Failed") | Some("RandomlyFailed") => Outcome::Failed,
        Some("Ignored") | Some("Skipped") | Some("Pending") | Some("NotExecuted") => {
            Outcome::Skipped
        }
        Some("Inconclusive") => Outcome::Inconclusive,
        other => unrecognized_outcome("SpecRun", other.unwrap_or_default(), &qualified_name),
    };
    // A plain scenario title may contain the separator, so the whole title is kept as well.
    let (scenario, parameters, title) = match title.find(EXAMPLE_SEPARATOR) {
        Some(separator) => {
            let cells = title[separator + EXAMPLE_SEPARATOR.len()..]
                .split(EXAMPLE_SEPARATOR)
                .collect::<Vec<_>>();
            (
                title[..separator].to_owned(),
                Some(SpecRunExampleSignatureBuilder.build(&cells)),
                Some(title.clone()),
            )
        }
        None => (title, None, None),
    };
    ResultRecord {
        qualified_name,
        feature: feature.to_owned(),
        scenario,
        parameters,
        title,
        outcome,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_example_title() {
        let record = scenario(
            "Addition",
            "Adding several numbers, 40, 50, 90".to_owned(),
            Some("Passed".to_owned()),
        );
        assert_eq!(record.scenario, "Adding several numbers");
        assert_eq!(record.parameters.as_deref(), Some("40, 50, 90"));
        assert_eq!(
            record.title.as_deref(),
            Some("Adding several numbers, 40, 50, 90")
        );
        assert_eq!(record.outcome, Outcome::Passed);

        let record = scenario("Addition", "Add two numbers".to_owned(), None);
        assert_eq!(record.parameters, None);
        assert_eq!(record.title, None);
        assert_eq!(record.outcome, Outcome::Inconclusive);
    }
}

use crate::error::XmlResultsError;
use crate::nunit::*;
use crate::utils::*;
use quick_xml::events::*;
use quick_xml::Reader;
use std::io::BufRead;
use tracing::{debug, warn};
use verdict_api::model::{Outcome, ResultRecord};
use verdict_api::parser::ResultsParser;
use verdict_api::signature::ExampleSignatureBuilder;

/// A parser for the NUnit 3 `TestResult.xml` report format.
///
/// It implements the `ResultsParser` trait.
/// Names are read from the `Description` properties of fixtures and test cases when present.
/// The test cases of a `ParameterizedMethod` suite are the examples of an outline.
pub struct NUnit3Parser<R: BufRead> {
    reader: NUnit3Reader<R>,
    reader_buffer: Vec<u8>,
    is_end: bool,
}

impl<R: BufRead> NUnit3Parser<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        Self {
            reader: NUnit3Reader {
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

impl<R: BufRead> ResultsParser for NUnit3Parser<R> {
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
            Event::End(_) => self.reader.parse_end_event(on_record)?,
            Event::Eof => {
                self.reader.document.finish()?;
                debug!("read {} NUnit 3 test cases", self.reader.records);
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
        Box::new(NUnitExampleSignatureBuilder)
    }
}

const ROOT: &str = "test-run";

enum NUnit3State {
    Root,
    Suite(NUnitSuite),
    TestCase {
        name: String,
        full_name: Option<String>,
        result: Option<String>,
        description: Option<String>,
    },
    Properties,
    Other,
}

struct NUnit3Reader<R: BufRead> {
    reader: Reader<R>,
    document: Document,
    state: Vec<NUnit3State>,
    records: usize,
}

impl<R: BufRead> NUnit3Reader<R> {
    fn parse_start_event(&mut self, event: &BytesStart<'_>) -> Result<(), XmlResultsError> {
        if self.state.is_empty() {
            self.document.open(event)?;
            self.state.push(NUnit3State::Root);
            return Ok(());
        }

        let state = match event.local_name() {
            b"test-suite" => {
                let kind = match attribute(event, &self.reader, b"type")?.as_deref() {
                    Some("TestFixture") => SuiteKind::Fixture,
                    Some("ParameterizedMethod") => SuiteKind::Parameterized,
                    _ => SuiteKind::Other,
                };
                NUnit3State::Suite(NUnitSuite {
                    kind,
                    name: attribute(event, &self.reader, b"name")?.unwrap_or_default(),
                    description: None,
                })
            }
            b"test-case" => NUnit3State::TestCase {
                name: attribute(event, &self.reader, b"name")?.unwrap_or_default(),
                full_name: attribute(event, &self.reader, b"fullname")?,
                result: attribute(event, &self.reader, b"result")?,
                description: None,
            },
            b"properties" => NUnit3State::Properties,
            b"property" => {
                if let Some(NUnit3State::Properties) = self.state.last() {
                    if attribute(event, &self.reader, b"name")?.as_deref() == Some("Description") {
                        let value = attribute(event, &self.reader, b"value")?;
                        self.describe_owner(value);
                    }
                }
                NUnit3State::Other
            }
            _ => NUnit3State::Other,
        };
        self.state.push(state);
        Ok(())
    }

    /// Sets the description of the suite or test case owning the open `properties` element.
    fn describe_owner(&mut self, value: Option<String>) {
        match self.state.iter_mut().rev().nth(1) {
            Some(NUnit3State::Suite(suite)) => suite.description = value,
            Some(NUnit3State::TestCase { description, .. }) => *description = value,
            _ => (),
        }
    }

    fn parse_end_event<E: From<XmlResultsError>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        match self.state.pop() {
            Some(NUnit3State::Root) => self.document.close(),
            Some(NUnit3State::TestCase {
                name,
                full_name,
                result,
                description,
            }) => {
                if let Some(record) = self.test_case(name, full_name, result, description) {
                    self.records += 1;
                    on_record(record)?;
                }
            }
            _ => (),
        }
        Ok(())
    }

    fn test_case(
        &self,
        name: String,
        full_name: Option<String>,
        result: Option<String>,
        description: Option<String>,
    ) -> Option<ResultRecord> {
        let outcome = match result {
            Some(result) => outcome(&result, &name),
            None => unrecognized_outcome("NUnit 3", "", &name),
        };
        let suites = self.state.iter().filter_map(|state| match state {
            NUnit3State::Suite(suite) => Some(suite),
            _ => None,
        });
        match decompose(suites, &name, description.as_deref()) {
            Some(decomposition) => Some(ResultRecord {
                qualified_name: full_name.unwrap_or(name),
                feature: decomposition.feature,
                scenario: decomposition.scenario,
                parameters: decomposition.parameters,
                title: None,
                outcome,
            }),
            None => {
                warn!("the NUnit test case {} is outside of any fixture, ignoring it", name);
                None
            }
        }
    }
}

fn outcome(result: &str, test: &str) -> Outcome {
    match result {
        "Passed" => Outcome::Passed,
        "Failed" => Outcome::Failed,
        "Skipped" => Outcome::Skipped,
        "Inconclusive" | "Warning" => Outcome::Inconclusive,
        _ => unrecognized_outcome("NUnit 3", result, test),
    }
}

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

/// A parser for the NUnit 2 `TestResult.xml` report format.
///
/// It implements the `ResultsParser` trait.
/// Features are read from the `TestFixture` suites, scenarios from the test cases,
/// and the examples of an outline from the test cases of a `ParameterizedTest` suite.
/// The `description` attributes set by SpecFlow are used as names when present.
///
/// ```
/// use verdict_api::model::{Feature, Scenario, TestResult};
/// use verdict_api::parser::ResultsParser;
/// use verdict_api::results::ResultsIndex;
/// use verdict_xml::{NUnit2Parser, XmlResultsError};
///
/// let file = br#"<?xml version="1.0" encoding="utf-8"?>
/// <test-results name="Pickles.TestHarness.dll" total="1">
///   <test-suite type="TestFixture" name="AdditionFeature" description="Addition" executed="True" result="Success">
///     <results>
///       <test-case name="Pickles.TestHarness.AdditionFeature.AddTwoNumbers" description="Add two numbers" executed="True" result="Success" success="True" />
///     </results>
///   </test-suite>
/// </test-results>"#;
///
/// let results = NUnit2Parser::new(file.as_ref()).into_test_results()?;
/// let scenario = Scenario { name: "Add two numbers", feature: Feature { name: "Addition" } };
/// assert_eq!(TestResult::Passed, results.scenario_result(scenario));
/// # Ok::<_, XmlResultsError>(())
/// ```
pub struct NUnit2Parser<R: BufRead> {
    reader: NUnit2Reader<R>,
    reader_buffer: Vec<u8>,
    is_end: bool,
}

impl<R: BufRead> NUnit2Parser<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        Self {
            reader: NUnit2Reader {
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

impl<R: BufRead> ResultsParser for NUnit2Parser<R> {
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
            Event::Start(event) => self.reader.parse_start_event(&event, on_record)?,
            Event::End(_) => self.reader.parse_end_event(),
            Event::Eof => {
                self.reader.document.finish()?;
                debug!("read {} NUnit 2 test cases", self.reader.records);
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

const ROOT: &str = "test-results";

enum NUnit2State {
    Root,
    Suite(NUnitSuite),
    Other,
}

struct NUnit2Reader<R: BufRead> {
    reader: Reader<R>,
    document: Document,
    state: Vec<NUnit2State>,
    records: usize,
}

impl<R: BufRead> NUnit2Reader<R> {
    fn parse_start_event<E: From<XmlResultsError>>(
        &mut self,
        event: &BytesStart<'_>,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        if self.state.is_empty() {
            self.document.open(event)?;
            self.state.push(NUnit2State::Root);
            return Ok(());
        }

        match event.local_name() {
            b"test-suite" => {
                let kind = match attribute(event, &self.reader, b"type")?.as_deref() {
                    Some("TestFixture") => SuiteKind::Fixture,
                    Some("ParameterizedTest") => SuiteKind::Parameterized,
                    _ => SuiteKind::Other,
                };
                let name = attribute(event, &self.reader, b"name")?.unwrap_or_default();
                let description = attribute(event, &self.reader, b"description")?;
                self.state.push(NUnit2State::Suite(NUnitSuite {
                    kind,
                    name,
                    description,
                }));
            }
            b"test-case" => {
                if let Some(record) = self.test_case(event)? {
                    self.records += 1;
                    on_record(record)?;
                }
                self.state.push(NUnit2State::Other);
            }
            _ => self.state.push(NUnit2State::Other),
        }
        Ok(())
    }

    fn parse_end_event(&mut self) {
        if let Some(NUnit2State::Root) = self.state.pop() {
            self.document.close();
        }
    }

    fn test_case(&self, event: &BytesStart<'_>) -> Result<Option<ResultRecord>, XmlResultsError> {
        let name = attribute(event, &self.reader, b"name")?.unwrap_or_default();
        let description = attribute(event, &self.reader, b"description")?;
        let outcome = match attribute(event, &self.reader, b"result")? {
            Some(result) => outcome(&result, &name),
            None => legacy_outcome(
                attribute(event, &self.reader, b"executed")?.as_deref(),
                attribute(event, &self.reader, b"success")?.as_deref(),
            ),
        };
        let suites = self.state.iter().filter_map(|state| match state {
            NUnit2State::Suite(suite) => Some(suite),
            _ => None,
        });
        Ok(match decompose(suites, &name, description.as_deref()) {
            Some(decomposition) => Some(ResultRecord {
                qualified_name: name,
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
        })
    }
}

fn outcome(result: &str, test: &str) -> Outcome {
    match result {
        "Success" => Outcome::Passed,
        "Failure" | "Error" | "Cancelled" => Outcome::Failed,
        "Ignored" | "Skipped" | "NotRunnable" => Outcome::Skipped,
        "Inconclusive" => Outcome::Inconclusive,
        _ => unrecognized_outcome("NUnit 2", result, test),
    }
}

/// NUnit 2.4 reports have no `result` attribute, only `executed` and `success`.
fn legacy_outcome(executed: Option<&str>, success: Option<&str>) -> Outcome {
    match (executed, success) {
        (Some("False"), _) => Outcome::Skipped,
        (_, Some("True")) => Outcome::Passed,
        (_, Some("False")) => Outcome::Failed,
        _ => Outcome::Inconclusive,
    }
}

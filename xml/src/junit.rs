use crate::error::XmlResultsError;
use crate::utils::*;
use quick_xml::events::*;
use quick_xml::Reader;
use std::io::BufRead;
use tracing::debug;
use verdict_api::model::{Outcome, ResultRecord};
use verdict_api::parser::ResultsParser;
use verdict_api::signature::{join_escaped, ExampleSignatureBuilder};

/// Renders example rows like the bracketed suffix cucumber gives to the test cases of an example row:
/// the values separated by `, `, with `,` and `\` escaped by a backslash.
#[derive(Debug, Clone, Copy, Default)]
pub struct JUnitExampleSignatureBuilder;

impl ExampleSignatureBuilder for JUnitExampleSignatureBuilder {
    fn build(&self, cells: &[&str]) -> String {
        join_escaped(cells, EXAMPLE_SEPARATOR, &[','])
    }
}

/// A parser for the JUnit XML report format, with a `<testsuites>` or a single `<testsuite>` root.
///
/// It implements the `ResultsParser` trait.
/// The feature of a test case is its `classname`, or the name of the enclosing suite.
/// A test case named `<outline>[<value>, <value>...]` is an example of an outline.
///
/// ```
/// use verdict_api::model::{Feature, Scenario, TestResult};
/// use verdict_api::parser::ResultsParser;
/// use verdict_api::results::ResultsIndex;
/// use verdict_xml::{JUnitParser, XmlResultsError};
///
/// let file = br#"<testsuite name="Failing" tests="2">
///   <testcase classname="Failing" name="Passing scenario" />
///   <testcase classname="Failing" name="Failing scenario"><failure message="expected 1" /></testcase>
/// </testsuite>"#;
///
/// let results = JUnitParser::new(file.as_ref()).into_test_results()?;
/// let failing = Scenario { name: "Failing scenario", feature: Feature { name: "Failing" } };
/// assert_eq!(TestResult::Failed, results.scenario_result(failing));
/// assert_eq!(TestResult::Failed, results.feature_result(Feature { name: "Failing" }));
/// # Ok::<_, XmlResultsError>(())
/// ```
pub struct JUnitParser<R: BufRead> {
    reader: JUnitReader<R>,
    reader_buffer: Vec<u8>,
    is_end: bool,
}

impl<R: BufRead> JUnitParser<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        Self {
            reader: JUnitReader {
                reader,
                document: Document::new(&ROOTS),
                state: Vec::default(),
                records: 0,
            },
            reader_buffer: Vec::default(),
            is_end: false,
        }
    }
}

impl<R: BufRead> ResultsParser for JUnitParser<R> {
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
                debug!("read {} JUnit test cases", self.reader.records);
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
        Box::new(JUnitExampleSignatureBuilder)
    }
}

const ROOTS: [&str; 2] = ["testsuites", "testsuite"];
const EXAMPLE_SEPARATOR: &str = ", ";

enum JUnitState {
    Suites,
    Suite {
        name: Option<String>,
        is_root: bool,
    },
    TestCase {
        class_name: Option<String>,
        name: String,
        outcome: Outcome,
    },
    Other,
}

struct JUnitReader<R: BufRead> {
    reader: Reader<R>,
    document: Document,
    state: Vec<JUnitState>,
    records: usize,
}

impl<R: BufRead> JUnitReader<R> {
    fn parse_start_event(&mut self, event: &BytesStart<'_>) -> Result<(), XmlResultsError> {
        if self.state.is_empty() {
            self.document.open(event)?;
            let state = if event.local_name() == b"testsuite" {
                JUnitState::Suite {
                    name: attribute(event, &self.reader, b"name")?,
                    is_root: true,
                }
            } else {
                JUnitState::Suites
            };
            self.state.push(state);
            return Ok(());
        }

        let state = match event.local_name() {
            b"testsuite" => JUnitState::Suite {
                name: attribute(event, &self.reader, b"name")?,
                is_root: false,
            },
            b"testcase" => JUnitState::TestCase {
                class_name: attribute(event, &self.reader, b"classname")?,
                name: attribute(event, &self.reader, b"name")?.unwrap_or_default(),
                outcome: Outcome::Passed,
            },
            child => {
                if let Some(JUnitState::TestCase { outcome, .. }) = self.state.last_mut() {
                    match child {
                        b"failure" | b"error" => *outcome = Outcome::Failed,
                        b"skipped" if *outcome != Outcome::Failed => *outcome = Outcome::Skipped,
                        _ => (),
                    }
                }
                JUnitState::Other
            }
        };
        self.state.push(state);
        Ok(())
    }

    fn parse_end_event<E: From<XmlResultsError>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        match self.state.pop() {
            Some(JUnitState::Suites) | Some(JUnitState::Suite { is_root: true, .. }) => {
                self.document.close()
            }
            Some(JUnitState::TestCase {
                class_name,
                name,
                outcome,
            }) => {
                let feature = class_name.or_else(|| {
                    self.state.iter().rev().find_map(|state| match state {
                        JUnitState::Suite { name, .. } => name.clone(),
                        _ => None,
                    })
                });
                let record = test_case(feature.unwrap_or_default(), name, outcome);
                self.records += 1;
                on_record(record)?;
            }
            _ => (),
        }
        Ok(())
    }
}

fn test_case(feature: String, name: String, outcome: Outcome) -> ResultRecord {
    let qualified_name = format!("{}.{}", feature, name);
    // A plain scenario name may end with brackets, so the whole name is kept as well.
    let (scenario, parameters, title) = match name.rfind('[') {
        Some(open) if name.ends_with(']') => {
            let cells = name[open + 1..name.len() - 1]
                .split(EXAMPLE_SEPARATOR)
                .collect::<Vec<_>>();
            (
                name[..open].trim_end().to_owned(),
                Some(JUnitExampleSignatureBuilder.build(&cells)),
                Some(name.clone()),
            )
        }
        _ => (name, None, None),
    };
    ResultRecord {
        qualified_name,
        feature,
        scenario,
        parameters,
        title,
        outcome,
    }
}

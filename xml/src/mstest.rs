use crate::error::XmlResultsError;
use crate::utils::*;
use quick_xml::events::*;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;
use tracing::{debug, warn};
use verdict_api::model::{Outcome, ResultRecord};
use verdict_api::parser::ResultsParser;
use verdict_api::signature::{join_escaped, ExampleSignatureBuilder};

/// Renders example rows like the `Parameter:*` test properties SpecFlow sets on MSTest data rows:
/// the values separated by `|`, with `|` and `\` escaped by a backslash.
///
/// ```
/// use verdict_api::signature::ExampleSignatureBuilder;
/// use verdict_xml::MsTestExampleSignatureBuilder;
///
/// assert_eq!(r"40|a\|b|c:\\Temp", MsTestExampleSignatureBuilder.build(&["40", "a|b", r"c:\Temp"]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsTestExampleSignatureBuilder;

impl ExampleSignatureBuilder for MsTestExampleSignatureBuilder {
    fn build(&self, cells: &[&str]) -> String {
        join_escaped(cells, "|", &['|'])
    }
}

/// A parser for the MSTest `.trx` report format.
///
/// It implements the `ResultsParser` trait.
/// A TRX report lists the test results separately from the test definitions holding the names,
/// so the records are only emitted once the whole `TestRun` element has been read.
/// The feature of a test is its `FeatureTitle` property, the scenario its description,
/// and the example parameters its `Parameter:*` properties.
pub struct MsTestParser<R: BufRead> {
    reader: MsTestReader<R>,
    reader_buffer: Vec<u8>,
    is_end: bool,
}

impl<R: BufRead> MsTestParser<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        Self {
            reader: MsTestReader {
                reader,
                document: Document::new(&[ROOT]),
                state: Vec::default(),
                definitions: HashMap::default(),
                results: Vec::default(),
            },
            reader_buffer: Vec::default(),
            is_end: false,
        }
    }
}

impl<R: BufRead> ResultsParser for MsTestParser<R> {
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
        Box::new(MsTestExampleSignatureBuilder)
    }
}

const ROOT: &str = "TestRun";
const FEATURE_TITLE: &str = "FeatureTitle";
const PARAMETER_PREFIX: &str = "Parameter:";

#[derive(Default)]
struct UnitTest {
    name: String,
    class_name: Option<String>,
    description: Option<String>,
    properties: Vec<(String, String)>,
}

struct UnitTestResult {
    test_id: String,
    test_name: String,
    outcome: Option<String>,
}

enum MsTestState {
    Root,
    Results,
    UnitTestResult,
    TestDefinitions,
    UnitTest { id: String },
    Description,
    Property { key: Option<String>, value: Option<String> },
    Key,
    Value,
    Other,
}

struct MsTestReader<R: BufRead> {
    reader: Reader<R>,
    document: Document,
    state: Vec<MsTestState>,
    definitions: HashMap<String, UnitTest>,
    results: Vec<UnitTestResult>,
}

impl<R: BufRead> MsTestReader<R> {
    fn parse_start_event(&mut self, event: &BytesStart<'_>) -> Result<(), XmlResultsError> {
        if self.state.is_empty() {
            self.document.open(event)?;
            self.state.push(MsTestState::Root);
            return Ok(());
        }

        let state = match (self.state.last(), event.local_name()) {
            (Some(MsTestState::Root), b"Results") => MsTestState::Results,
            (Some(MsTestState::Results), b"UnitTestResult") => {
                self.results.push(UnitTestResult {
                    test_id: attribute(event, &self.reader, b"testId")?.unwrap_or_default(),
                    test_name: attribute(event, &self.reader, b"testName")?.unwrap_or_default(),
                    outcome: attribute(event, &self.reader, b"outcome")?,
                });
                MsTestState::UnitTestResult
            }
            (Some(MsTestState::Root), b"TestDefinitions") => MsTestState::TestDefinitions,
            (Some(MsTestState::TestDefinitions), b"UnitTest") => {
                let id = attribute(event, &self.reader, b"id")?.unwrap_or_default();
                let name = attribute(event, &self.reader, b"name")?.unwrap_or_default();
                self.definitions.insert(
                    id.clone(),
                    UnitTest {
                        name,
                        ..UnitTest::default()
                    },
                );
                MsTestState::UnitTest { id }
            }
            (Some(MsTestState::UnitTest { id }), b"TestMethod") => {
                let class_name = attribute(event, &self.reader, b"className")?;
                if let Some(definition) = self.definitions.get_mut(id) {
                    definition.class_name = class_name;
                }
                MsTestState::Other
            }
            (Some(MsTestState::UnitTest { .. }), b"Description") => MsTestState::Description,
            (Some(MsTestState::Other), b"Property") => MsTestState::Property {
                key: None,
                value: None,
            },
            (Some(MsTestState::Property { .. }), b"Key") => MsTestState::Key,
            (Some(MsTestState::Property { .. }), b"Value") => MsTestState::Value,
            _ => MsTestState::Other,
        };
        self.state.push(state);
        Ok(())
    }

    fn parse_text_event(&mut self, event: &BytesText<'_>) -> Result<(), XmlResultsError> {
        let value = text(event, &self.reader)?;
        let mut open = self.state.iter_mut().rev();
        match (open.next(), open.next()) {
            (Some(MsTestState::Description), Some(MsTestState::UnitTest { id })) => {
                if let Some(definition) = self.definitions.get_mut(id.as_str()) {
                    definition.description = Some(value);
                }
            }
            (Some(MsTestState::Key), Some(MsTestState::Property { key, .. })) => *key = Some(value),
            (Some(MsTestState::Value), Some(MsTestState::Property { value: slot, .. })) => {
                *slot = Some(value)
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
            Some(MsTestState::Property {
                key: Some(key),
                value,
            }) => {
                // Properties > Property, inside a UnitTest
                if let Some(MsTestState::UnitTest { id }) = self.state.iter().rev().nth(1) {
                    if let Some(definition) = self.definitions.get_mut(id) {
                        definition.properties.push((key, value.unwrap_or_default()));
                    }
                }
            }
            Some(MsTestState::Root) => {
                self.document.close();
                self.emit_records(on_record)?;
            }
            _ => (),
        }
        Ok(())
    }

    fn emit_records<E: From<XmlResultsError>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut count = 0;
        for result in self.results.drain(..) {
            let definition = match self.definitions.get(&result.test_id) {
                Some(definition) => definition,
                None => {
                    warn!(
                        "the MSTest result of {} has no test definition, ignoring it",
                        result.test_name
                    );
                    continue;
                }
            };
            count += 1;
            on_record(record(definition, result))?;
        }
        debug!("read {} MSTest results", count);
        Ok(())
    }
}

fn record(definition: &UnitTest, result: UnitTestResult) -> ResultRecord {
    // className is an assembly-qualified type name
    let class_name = definition
        .class_name
        .as_deref()
        .and_then(|class_name| class_name.split(',').next())
        .map(str::trim);
    let qualified_name = match class_name {
        Some(class_name) => format!("{}.{}", class_name, definition.name),
        None => definition.name.clone(),
    };
    let feature = definition
        .properties
        .iter()
        .find(|(key, _)| key == FEATURE_TITLE)
        .map(|(_, value)| value.clone())
        .or_else(|| class_name.map(|class_name| simple_name(class_name).to_owned()))
        .unwrap_or_default();
    let scenario = definition
        .description
        .clone()
        .unwrap_or_else(|| definition.name.clone());
    let cells = definition
        .properties
        .iter()
        .filter(|(key, _)| key.starts_with(PARAMETER_PREFIX))
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>();
    let parameters = if cells.is_empty() {
        None
    } else {
        Some(MsTestExampleSignatureBuilder.build(&cells))
    };
    let outcome = match result.outcome.as_deref() {
        Some("Passed") => Outcome::Passed,
        Some("Failed") | Some("Error") | Some("Timeout") | Some("Aborted") => Outcome::Failed,
        Some("NotExecuted") | Some("NotRunnable") => Outcome::Skipped,
        Some("Inconclusive") | Some("Pending") | Some("InProgress") => Outcome::Inconclusive,
        other => unrecognized_outcome("MSTest", other.unwrap_or_default(), &qualified_name),
    };
    ResultRecord {
        qualified_name,
        feature,
        scenario,
        parameters,
        title: None,
        outcome,
    }
}

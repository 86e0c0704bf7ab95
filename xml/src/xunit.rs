use crate::error::XmlResultsError;
use crate::utils::*;
use quick_xml::events::*;
use quick_xml::Reader;
use std::io::BufRead;
use tracing::debug;
use verdict_api::model::{Outcome, ResultRecord};
use verdict_api::parser::ResultsParser;
use verdict_api::signature::ExampleSignatureBuilder;

/// Renders example rows the way xUnit displays the arguments of a theory, without the parameter names:
/// C# string literals separated by `, `.
///
/// ```
/// use verdict_api::signature::ExampleSignatureBuilder;
/// use verdict_xml::XUnitExampleSignatureBuilder;
///
/// assert_eq!(r#""40", "50", "90""#, XUnitExampleSignatureBuilder.build(&["40", "50", "90"]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XUnitExampleSignatureBuilder;

impl ExampleSignatureBuilder for XUnitExampleSignatureBuilder {
    fn build(&self, cells: &[&str]) -> String {
        string_literals(cells, ", ")
    }
}

/// A parser for the xUnit 1 (`<assembly>` root) and xUnit 2 (`<assemblies>` root) report formats.
///
/// It implements the `ResultsParser` trait.
/// The feature and scenario names are read from the `FeatureTitle` and `Description` traits SpecFlow sets.
/// A test whose name carries an argument list is an example of an outline.
///
/// ```
/// use verdict_api::model::{Feature, ScenarioOutline, TestResult};
/// use verdict_api::parser::ResultsParser;
/// use verdict_api::results::ResultsIndex;
/// use verdict_xml::{XUnitParser, XmlResultsError};
///
/// let file = br#"<assemblies>
///   <assembly name="Pickles.TestHarness.xUnit2.dll">
///     <collection name="Addition">
///       <test name="Pickles.AdditionFeature.AddingSeveralNumbers(firstNumber: &quot;40&quot;, exampleTags: [])" type="Pickles.AdditionFeature" method="AddingSeveralNumbers" result="Fail">
///         <traits>
///           <trait name="FeatureTitle" value="Addition" />
///           <trait name="Description" value="Adding several numbers" />
///         </traits>
///       </test>
///     </collection>
///   </assembly>
/// </assemblies>"#;
///
/// let results = XUnitParser::new(file.as_ref()).into_test_results()?;
/// let outline = ScenarioOutline { name: "Adding several numbers", feature: Feature { name: "Addition" } };
/// assert_eq!(TestResult::Failed, results.example_result(outline, &["40"]).unwrap());
/// # Ok::<_, XmlResultsError>(())
/// ```
pub struct XUnitParser<R: BufRead> {
    reader: XUnitReader<R>,
    reader_buffer: Vec<u8>,
    is_end: bool,
}

impl<R: BufRead> XUnitParser<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.expand_empty_elements(true);
        reader.trim_text(true);
        Self {
            reader: XUnitReader {
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

impl<R: BufRead> ResultsParser for XUnitParser<R> {
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
                debug!("read {} xUnit tests", self.reader.records);
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
        Box::new(XUnitExampleSignatureBuilder)
    }
}

const ROOTS: [&str; 2] = ["assemblies", "assembly"];

#[derive(Default)]
struct XUnitTest {
    name: String,
    type_name: Option<String>,
    method: Option<String>,
    result: Option<String>,
    feature_title: Option<String>,
    description: Option<String>,
}

enum XUnitState {
    Root,
    Class(String),
    Test(XUnitTest),
    Other,
}

struct XUnitReader<R: BufRead> {
    reader: Reader<R>,
    document: Document,
    state: Vec<XUnitState>,
    records: usize,
}

impl<R: BufRead> XUnitReader<R> {
    fn parse_start_event(&mut self, event: &BytesStart<'_>) -> Result<(), XmlResultsError> {
        if self.state.is_empty() {
            self.document.open(event)?;
            self.state.push(XUnitState::Root);
            return Ok(());
        }

        let state = match event.local_name() {
            // xUnit 1 groups the tests of a type in a class element
            b"class" => XUnitState::Class(attribute(event, &self.reader, b"name")?.unwrap_or_default()),
            b"test" => XUnitState::Test(XUnitTest {
                name: attribute(event, &self.reader, b"name")?.unwrap_or_default(),
                type_name: attribute(event, &self.reader, b"type")?,
                method: attribute(event, &self.reader, b"method")?,
                result: attribute(event, &self.reader, b"result")?,
                ..XUnitTest::default()
            }),
            b"trait" => {
                let name = attribute(event, &self.reader, b"name")?;
                let value = attribute(event, &self.reader, b"value")?;
                // test > traits > trait
                if let Some(XUnitState::Test(test)) = self.state.iter_mut().rev().nth(1) {
                    match name.as_deref() {
                        Some("FeatureTitle") => test.feature_title = value,
                        Some("Description") => test.description = value,
                        _ => (),
                    }
                }
                XUnitState::Other
            }
            _ => XUnitState::Other,
        };
        self.state.push(state);
        Ok(())
    }

    fn parse_end_event<E: From<XmlResultsError>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        match self.state.pop() {
            Some(XUnitState::Root) => self.document.close(),
            Some(XUnitState::Test(test)) => {
                let record = self.test(test);
                self.records += 1;
                on_record(record)?;
            }
            _ => (),
        }
        Ok(())
    }

    fn test(&self, test: XUnitTest) -> ResultRecord {
        let (call, arguments) = split_call(&test.name);
        let class = self.state.iter().rev().find_map(|state| match state {
            XUnitState::Class(name) => Some(name.as_str()),
            _ => None,
        });
        let feature = match (&test.feature_title, &test.type_name, class) {
            (Some(title), _, _) => title.clone(),
            (None, Some(type_name), _) => simple_name(type_name).to_owned(),
            (None, None, Some(class)) => simple_name(class).to_owned(),
            (None, None, None) => match call.rfind('.') {
                Some(dot) => simple_name(&call[..dot]).to_owned(),
                None => String::new(),
            },
        };
        let scenario = test
            .description
            .clone()
            .or_else(|| test.method.clone())
            .unwrap_or_else(|| simple_name(call).to_owned());
        let outcome = match test.result.as_deref() {
            Some("Pass") => Outcome::Passed,
            Some("Fail") => Outcome::Failed,
            Some("Skip") | Some("NotRun") => Outcome::Skipped,
            other => unrecognized_outcome("xUnit", other.unwrap_or_default(), &test.name),
        };
        ResultRecord {
            parameters: arguments.map(parameters),
            title: None,
            qualified_name: test.name,
            feature,
            scenario,
            outcome,
        }
    }
}

/// Normalizes a theory display: the parameter names and the example tags are dropped.
fn parameters(arguments: &str) -> String {
    let mut arguments = split_arguments(arguments)
        .into_iter()
        .map(strip_label)
        .collect::<Vec<_>>();
    if arguments.last().map_or(false, |last| is_example_tags(last)) {
        arguments.pop();
    }
    arguments.join(", ")
}

/// Removes the `name: ` prefix xUnit 2 puts before each displayed argument.
fn strip_label(argument: &str) -> &str {
    match argument.find(':') {
        Some(colon)
            if colon > 0
                && argument[..colon]
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_') =>
        {
            argument[colon + 1..].trim_start()
        }
        _ => argument,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parameters() {
        assert_eq!(
            parameters("firstNumber: \"40\", result: \"a: b\", exampleTags: []"),
            "\"40\", \"a: b\""
        );
        assert_eq!(parameters("\"40\", \"50\", null"), "\"40\", \"50\"");
        assert_eq!(parameters("x: \"\""), "\"\"");
    }
}

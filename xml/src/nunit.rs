//! Naming conventions shared by the NUnit 2 and NUnit 3 report formats.

use crate::utils::{is_example_tags, simple_name, split_arguments, split_call, string_literals};
use verdict_api::signature::ExampleSignatureBuilder;

/// Renders example rows the way NUnit displays the arguments of a parameterized test:
/// C# string literals separated by commas.
///
/// ```
/// use verdict_api::signature::ExampleSignatureBuilder;
/// use verdict_xml::NUnitExampleSignatureBuilder;
///
/// assert_eq!(
///     r#""40","c:\\Temp\\""#,
///     NUnitExampleSignatureBuilder.build(&["40", r"c:\Temp\"])
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NUnitExampleSignatureBuilder;

impl ExampleSignatureBuilder for NUnitExampleSignatureBuilder {
    fn build(&self, cells: &[&str]) -> String {
        string_literals(cells, ",")
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub(crate) enum SuiteKind {
    Fixture,
    Parameterized,
    Other,
}

/// An open `test-suite` element.
#[derive(Debug, Clone)]
pub(crate) struct NUnitSuite {
    pub(crate) kind: SuiteKind,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
}

impl NUnitSuite {
    fn title(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

/// A test case decomposed into feature, scenario and example parameters.
pub(crate) struct Decomposition {
    pub(crate) feature: String,
    pub(crate) scenario: String,
    pub(crate) parameters: Option<String>,
}

/// Decomposes the test case `name` using the suites enclosing it, innermost last.
///
/// The feature is the enclosing fixture. The scenario is the enclosing parameterized suite
/// if there is one, else the test case itself.
/// Returns `None` if the test case is not inside a fixture.
pub(crate) fn decompose<'a>(
    suites: impl DoubleEndedIterator<Item = &'a NUnitSuite> + Clone,
    name: &str,
    description: Option<&str>,
) -> Option<Decomposition> {
    let feature = suites
        .clone()
        .rev()
        .find(|suite| suite.kind == SuiteKind::Fixture)?;
    let scenario = match suites.rev().next() {
        Some(suite) if suite.kind == SuiteKind::Parameterized => suite.title(),
        _ => description.unwrap_or_else(|| simple_name(name)),
    };
    let (_, arguments) = split_call(name);
    Some(Decomposition {
        feature: feature.title().to_owned(),
        scenario: scenario.to_owned(),
        parameters: arguments.map(parameters),
    })
}

/// Normalizes a rendered argument list: the example tags are dropped and the separators made canonical.
fn parameters(arguments: &str) -> String {
    let mut arguments = split_arguments(arguments);
    if arguments.last().map_or(false, |last| is_example_tags(last)) {
        arguments.pop();
    }
    arguments.join(",")
}

use crate::manifest::Expectation;
use crate::report::{ExpectationOutcome, ExpectationResult};
use std::error::Error;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use verdict_api::results::{ResultsIndex, TestResults};
use verdict_xml::TestResultsFormat;

/// Checks every expectation against `index`.
///
/// An example query failing for lack of a signature builder is a failed expectation, not an error.
pub fn evaluate_expectations<'a>(
    expectations: impl IntoIterator<Item = &'a Expectation>,
    index: &impl ResultsIndex,
) -> Vec<ExpectationResult> {
    expectations
        .into_iter()
        .map(|expectation| {
            let outcome = match expectation.query.evaluate(index) {
                Ok(actual) if actual == expectation.expected => ExpectationOutcome::Passed,
                Ok(actual) => ExpectationOutcome::Failed {
                    error: format!("expected {} but found {}", expectation.expected, actual),
                },
                Err(e) => ExpectationOutcome::Failed {
                    error: e.to_string(),
                },
            };
            ExpectationResult {
                expectation: expectation.clone(),
                outcome,
            }
        })
        .collect()
}

/// The directory holding the harness reports of every framework.
pub fn fixtures_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixtures");
    path
}

/// The harness report of the framework `format`.
pub fn fixture_path(format: TestResultsFormat) -> PathBuf {
    fixtures_path().join(match format {
        TestResultsFormat::NUnit => "results-example-nunit.xml",
        TestResultsFormat::NUnit3 => "results-example-nunit3.xml",
        TestResultsFormat::MsTest => "results-example-mstest.trx",
        TestResultsFormat::XUnit => "results-example-xunit.xml",
        TestResultsFormat::XUnit2 => "results-example-xunit2.xml",
        TestResultsFormat::SpecRun => "results-example-specrun.xml",
        TestResultsFormat::JUnit => "results-example-junit.xml",
    })
}

pub fn read_results_file(path: &Path) -> Result<BufReader<File>, TestEvaluationError> {
    Ok(BufReader::new(File::open(path).map_err(|e| {
        TestEvaluationError::Io(path.to_string_lossy().into_owned(), e)
    })?))
}

pub fn parse_results_file(
    format: TestResultsFormat,
    path: &Path,
) -> Result<TestResults, Box<dyn Error>> {
    Ok(format.parse(read_results_file(path)?)?)
}

pub fn parse_fixture(format: TestResultsFormat) -> Result<TestResults, Box<dyn Error>> {
    parse_results_file(format, &fixture_path(format))
}

#[derive(Debug, Error)]
pub enum TestEvaluationError {
    #[error("I/O error on file {0}: {1}")]
    Io(String, #[source] io::Error),
}

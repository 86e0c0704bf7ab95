use crate::error::{XmlResultsError, XmlResultsErrorKind};
use crate::junit::{JUnitExampleSignatureBuilder, JUnitParser};
use crate::mstest::{MsTestExampleSignatureBuilder, MsTestParser};
use crate::nunit::NUnitExampleSignatureBuilder;
use crate::nunit2::NUnit2Parser;
use crate::nunit3::NUnit3Parser;
use crate::specrun::{SpecRunExampleSignatureBuilder, SpecRunParser};
use crate::xunit::{XUnitExampleSignatureBuilder, XUnitParser};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use verdict_api::parser::ResultsParser;
use verdict_api::results::{MultipleTestResults, TestResults};
use verdict_api::signature::ExampleSignatureBuilder;

/// The supported test result formats, selectable by their configuration name.
///
/// ```
/// use verdict_xml::TestResultsFormat;
///
/// let format: TestResultsFormat = "nunit3".parse()?;
/// assert_eq!(TestResultsFormat::NUnit3, format);
/// assert_eq!("nunit3", format.to_string());
/// assert!("cucumber".parse::<TestResultsFormat>().is_err());
/// # Ok::<_, verdict_xml::UnknownFormatError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TestResultsFormat {
    /// NUnit 2 `TestResult.xml`
    NUnit,
    /// NUnit 3 `TestResult.xml`
    NUnit3,
    /// MSTest `.trx`
    MsTest,
    XUnit,
    XUnit2,
    SpecRun,
    JUnit,
}

impl TestResultsFormat {
    pub const ALL: [TestResultsFormat; 7] = [
        TestResultsFormat::NUnit,
        TestResultsFormat::NUnit3,
        TestResultsFormat::MsTest,
        TestResultsFormat::XUnit,
        TestResultsFormat::XUnit2,
        TestResultsFormat::SpecRun,
        TestResultsFormat::JUnit,
    ];

    /// The configuration name of the format.
    pub fn name(self) -> &'static str {
        match self {
            TestResultsFormat::NUnit => "nunit",
            TestResultsFormat::NUnit3 => "nunit3",
            TestResultsFormat::MsTest => "mstest",
            TestResultsFormat::XUnit => "xunit",
            TestResultsFormat::XUnit2 => "xunit2",
            TestResultsFormat::SpecRun => "specrun",
            TestResultsFormat::JUnit => "junit",
        }
    }

    /// The signature builder matching how the format renders example parameters.
    pub fn example_signature_builder(self) -> Box<dyn ExampleSignatureBuilder> {
        match self {
            TestResultsFormat::NUnit | TestResultsFormat::NUnit3 => {
                Box::new(NUnitExampleSignatureBuilder)
            }
            TestResultsFormat::MsTest => Box::new(MsTestExampleSignatureBuilder),
            TestResultsFormat::XUnit | TestResultsFormat::XUnit2 => {
                Box::new(XUnitExampleSignatureBuilder)
            }
            TestResultsFormat::SpecRun => Box::new(SpecRunExampleSignatureBuilder),
            TestResultsFormat::JUnit => Box::new(JUnitExampleSignatureBuilder),
        }
    }

    /// Parses a single results document into an index carrying the format's signature builder.
    pub fn parse<R: BufRead>(self, reader: R) -> Result<TestResults, XmlResultsError> {
        match self {
            TestResultsFormat::NUnit => NUnit2Parser::new(reader).into_test_results(),
            TestResultsFormat::NUnit3 => NUnit3Parser::new(reader).into_test_results(),
            TestResultsFormat::MsTest => MsTestParser::new(reader).into_test_results(),
            TestResultsFormat::XUnit | TestResultsFormat::XUnit2 => {
                XUnitParser::new(reader).into_test_results()
            }
            TestResultsFormat::SpecRun => SpecRunParser::new(reader).into_test_results(),
            TestResultsFormat::JUnit => JUnitParser::new(reader).into_test_results(),
        }
    }

    /// Parses each of the result files at `paths`, in order.
    ///
    /// Fails on the first file that can't be opened or parsed.
    pub fn parse_files(
        self,
        paths: impl IntoIterator<Item = impl AsRef<Path>>,
    ) -> Result<MultipleTestResults, XmlResultsError> {
        let mut results = MultipleTestResults::default();
        for path in paths {
            let path = path.as_ref();
            debug!("reading {} results from {}", self, path.display());
            let file = File::open(path).map_err(|source| XmlResultsErrorKind::Io {
                path: path.to_owned(),
                source,
            })?;
            results.push(self.parse(BufReader::new(file))?);
        }
        Ok(results)
    }
}

impl fmt::Display for TestResultsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TestResultsFormat {
    type Err = UnknownFormatError;

    fn from_str(name: &str) -> Result<Self, UnknownFormatError> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| UnknownFormatError {
                name: name.to_owned(),
            })
    }
}

/// Error returned when parsing an unknown [`TestResultsFormat`] name.
#[derive(Eq, PartialEq, Debug, Clone, Error)]
#[error("unknown test results format \"{name}\", expected one of nunit, nunit3, mstest, xunit, xunit2, specrun or junit")]
pub struct UnknownFormatError {
    name: String,
}

impl UnknownFormatError {
    /// The name that was not recognized.
    pub fn name(&self) -> &str {
        &self.name
    }
}

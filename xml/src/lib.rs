//! Streaming parsers for the XML reports of NUnit 2 and 3, MSTest, xUnit 1 and 2, SpecRun and JUnit.
//!
//! Every parser implements the [`ResultsParser`](../verdict_api/parser/trait.ResultsParser.html) trait
//! and comes with the [`ExampleSignatureBuilder`](../verdict_api/signature/trait.ExampleSignatureBuilder.html)
//! matching how its framework renders the parameters of an example row.
//!
//! How to read a file `TestResult.xml` and check the status of a scenario:
//! ```no_run
//! use verdict_api::model::{Feature, Scenario};
//! use verdict_api::parser::ResultsParser;
//! use verdict_api::results::ResultsIndex;
//! use verdict_xml::NUnit3Parser;
//! use std::io::BufReader;
//! use std::fs::File;
//!
//! let results = NUnit3Parser::new(BufReader::new(File::open("TestResult.xml").unwrap()))
//!     .into_test_results()
//!     .unwrap();
//! let scenario = Scenario { name: "Add two numbers", feature: Feature { name: "Addition" } };
//! println!("{}", results.scenario_result(scenario));
//! ```
//!
//! Several files of the same format might be loaded at once with [`TestResultsFormat`](enum.TestResultsFormat.html):
//! ```no_run
//! use verdict_api::model::Feature;
//! use verdict_api::results::ResultsIndex;
//! use verdict_xml::TestResultsFormat;
//!
//! let format: TestResultsFormat = "xunit2".parse().unwrap();
//! let results = format.parse_files(&["unit.xml", "acceptance.xml"]).unwrap();
//! println!("{}", results.feature_result(Feature { name: "Addition" }));
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

mod error;
mod format;
mod junit;
mod mstest;
mod nunit;
mod nunit2;
mod nunit3;
mod specrun;
mod utils;
mod xunit;

pub use error::XmlResultsError;
pub use format::{TestResultsFormat, UnknownFormatError};
pub use junit::{JUnitExampleSignatureBuilder, JUnitParser};
pub use mstest::{MsTestExampleSignatureBuilder, MsTestParser};
pub use nunit::NUnitExampleSignatureBuilder;
pub use nunit2::NUnit2Parser;
pub use nunit3::NUnit3Parser;
pub use specrun::{SpecRunExampleSignatureBuilder, SpecRunParser};
pub use xunit::{XUnitExampleSignatureBuilder, XUnitParser};

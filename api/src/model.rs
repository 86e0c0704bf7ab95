//! Data structures for specification nodes, executed test records and their rollup status.
//!
//! Specification nodes are borrowed views over a tree owned by the caller.
//! Result records are owned by the parser that produced them.

use std::fmt;

/// A Feature of the specification.
///
/// ```
/// use verdict_api::model::Feature;
///
/// assert_eq!("Feature: Addition", Feature { name: "Addition" }.to_string())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct Feature<'a> {
    /// The feature title, matched exactly against the results.
    pub name: &'a str,
}

impl<'a> fmt::Display for Feature<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Feature: {}", self.name)
    }
}

/// A Scenario, identified by its name inside its [`Feature`].
///
/// ```
/// use verdict_api::model::{Feature, Scenario};
///
/// let scenario = Scenario {
///     name: "Add two numbers",
///     feature: Feature { name: "Addition" },
/// };
/// assert_eq!("Scenario: Addition / Add two numbers", scenario.to_string())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct Scenario<'a> {
    /// The scenario title.
    pub name: &'a str,
    /// The feature owning the scenario.
    pub feature: Feature<'a>,
}

impl<'a> fmt::Display for Scenario<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario: {} / {}", self.feature.name, self.name)
    }
}

/// A Scenario Outline, instantiated once per example row.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct ScenarioOutline<'a> {
    /// The outline title.
    pub name: &'a str,
    /// The feature owning the outline.
    pub feature: Feature<'a>,
}

impl<'a> fmt::Display for ScenarioOutline<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario Outline: {} / {}", self.feature.name, self.name)
    }
}

/// The outcome of one executed test case, as reported by the framework.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Outcome {
    Passed,
    Failed,
    /// Ignored or skipped by the framework.
    Skipped,
    /// Reported as inconclusive or not run. Unrecognized outcomes land here too.
    Inconclusive,
}

impl Outcome {
    /// The status a single record contributes to the rollup.
    pub fn result(self) -> TestResult {
        match self {
            Outcome::Passed => TestResult::Passed,
            Outcome::Failed => TestResult::Failed,
            Outcome::Skipped | Outcome::Inconclusive => TestResult::Inconclusive,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
            Outcome::Inconclusive => "inconclusive",
        })
    }
}

/// One executed test case, normalized from a framework report.
///
/// The `feature`, `scenario` and `parameters` fields are the parser's decomposition
/// of the framework-native `qualified_name`.
/// `parameters` is only set for data-driven cases. It holds the parameter rendering of the framework,
/// normalized into the form the parser's default [`ExampleSignatureBuilder`](../signature/trait.ExampleSignatureBuilder.html) builds.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct ResultRecord {
    pub qualified_name: String,
    pub feature: String,
    pub scenario: String,
    pub parameters: Option<String>,
    /// The whole test name when the report does not tell examples apart from scenarios
    /// whose name merely looks like one.
    ///
    /// A scenario query for this exact name matches the record too.
    pub title: Option<String>,
    pub outcome: Outcome,
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.feature, self.scenario)?;
        if let Some(parameters) = &self.parameters {
            write!(f, " ({})", parameters)?;
        }
        write!(f, ": {}", self.outcome)
    }
}

/// The status of a specification node.
///
/// `Inconclusive` and `NotExecuted` look the same through [`was_executed`](#method.was_executed)
/// and [`was_successful`](#method.was_successful) but are different values:
/// the first one means that some test evidence exists.
///
/// ```
/// use verdict_api::model::TestResult;
///
/// assert!(!TestResult::Inconclusive.was_executed());
/// assert!(!TestResult::NotExecuted.was_executed());
/// assert_ne!(TestResult::Inconclusive, TestResult::NotExecuted);
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TestResult {
    Passed,
    Failed,
    Inconclusive,
    NotExecuted,
}

impl TestResult {
    pub fn was_executed(self) -> bool {
        matches!(self, TestResult::Passed | TestResult::Failed)
    }

    pub fn was_successful(self) -> bool {
        self == TestResult::Passed
    }
}

impl Default for TestResult {
    fn default() -> Self {
        TestResult::NotExecuted
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TestResult::Passed => "passed",
            TestResult::Failed => "failed",
            TestResult::Inconclusive => "inconclusive",
            TestResult::NotExecuted => "not executed",
        })
    }
}

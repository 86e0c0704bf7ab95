//! Queries answering what happened to a specification node.

use crate::aggregation::aggregate;
use crate::error::TestResultsError;
use crate::model::*;
use crate::signature::ExampleSignatureBuilder;
use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;
use tracing::debug;

/// The query surface shared by everything holding test results.
///
/// Names are matched exactly and case-sensitively, scoped by feature.
/// A node without any matching record is `TestResult::NotExecuted`.
pub trait ResultsIndex {
    /// Rollup of every record of the feature, whatever scenario or outline it belongs to.
    fn feature_result(&self, feature: Feature<'_>) -> TestResult;

    /// Rollup of the non-parameterized records of the scenario. Reruns are all taken into account.
    ///
    /// Records whose whole undecomposed name is the scenario name match too.
    fn scenario_result(&self, scenario: Scenario<'_>) -> TestResult;

    /// Rollup of every example execution of the outline.
    fn scenario_outline_result(&self, outline: ScenarioOutline<'_>) -> TestResult;

    /// Rollup of the executions of the outline whose parameters match the signature of `cells`.
    ///
    /// Fails if no [`ExampleSignatureBuilder`](../signature/trait.ExampleSignatureBuilder.html) is configured.
    fn example_result(
        &self,
        outline: ScenarioOutline<'_>,
        cells: &[&str],
    ) -> Result<TestResult, TestResultsError>;
}

/// The results read from one report.
///
/// Records are indexed by feature then scenario name when the index is built and never change afterwards.
/// Only the example signature builder might be replaced.
///
/// ```
/// use verdict_api::model::*;
/// use verdict_api::results::{ResultsIndex, TestResults};
///
/// let results = TestResults::new(vec![ResultRecord {
///     qualified_name: "AdditionFeature.AddTwoNumbers".to_owned(),
///     feature: "Addition".to_owned(),
///     scenario: "Add two numbers".to_owned(),
///     parameters: None,
///     title: None,
///     outcome: Outcome::Passed,
/// }]);
///
/// let feature = Feature { name: "Addition" };
/// assert_eq!(TestResult::Passed, results.feature_result(feature));
/// assert_eq!(
///     TestResult::NotExecuted,
///     results.scenario_result(Scenario { name: "Subtract two numbers", feature })
/// );
/// ```
pub struct TestResults {
    records: Vec<ResultRecord>,
    features: HashMap<String, HashMap<String, Vec<usize>>>,
    titles: HashMap<String, HashMap<String, Vec<usize>>>,
    example_signature_builder: Option<Box<dyn ExampleSignatureBuilder>>,
}

impl TestResults {
    /// Builds the index without any example signature builder.
    pub fn new(records: Vec<ResultRecord>) -> Self {
        let mut features: HashMap<String, HashMap<String, Vec<usize>>> = HashMap::new();
        let mut titles: HashMap<String, HashMap<String, Vec<usize>>> = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            features
                .entry(record.feature.clone())
                .or_default()
                .entry(record.scenario.clone())
                .or_default()
                .push(position);
            if let (Some(title), Some(_)) = (&record.title, &record.parameters) {
                titles
                    .entry(record.feature.clone())
                    .or_default()
                    .entry(title.clone())
                    .or_default()
                    .push(position);
            }
        }
        Self {
            records,
            features,
            titles,
            example_signature_builder: None,
        }
    }

    pub fn with_example_signature_builder(
        mut self,
        builder: Box<dyn ExampleSignatureBuilder>,
    ) -> Self {
        self.example_signature_builder = Some(builder);
        self
    }

    /// Replaces the example signature builder. `None` makes the next example query fail.
    pub fn set_example_signature_builder(
        &mut self,
        builder: Option<Box<dyn ExampleSignatureBuilder>>,
    ) {
        self.example_signature_builder = builder;
    }

    pub fn example_signature_builder(&self) -> Option<&dyn ExampleSignatureBuilder> {
        self.example_signature_builder.as_deref()
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn scenario_records<'a>(
        &'a self,
        feature: &str,
        scenario: &str,
    ) -> impl Iterator<Item = &'a ResultRecord> + 'a {
        lookup(&self.features, feature, scenario)
            .map(move |position| &self.records[*position])
    }

    /// The records split into an example whose whole name is `title`.
    fn titled_records<'a>(
        &'a self,
        feature: &str,
        title: &str,
    ) -> impl Iterator<Item = &'a ResultRecord> + 'a {
        lookup(&self.titles, feature, title).map(move |position| &self.records[*position])
    }
}

fn lookup<'a>(
    index: &'a HashMap<String, HashMap<String, Vec<usize>>>,
    feature: &str,
    name: &str,
) -> impl Iterator<Item = &'a usize> + 'a {
    index
        .get(feature)
        .and_then(|names| names.get(name))
        .into_iter()
        .flatten()
}

impl ResultsIndex for TestResults {
    fn feature_result(&self, feature: Feature<'_>) -> TestResult {
        self.features
            .get(feature.name)
            .into_iter()
            .flat_map(|scenarios| scenarios.values())
            .flatten()
            .map(|position| self.records[*position].outcome.result())
            .collect()
    }

    fn scenario_result(&self, scenario: Scenario<'_>) -> TestResult {
        aggregate(
            self.scenario_records(scenario.feature.name, scenario.name)
                .filter(|record| record.parameters.is_none())
                .chain(self.titled_records(scenario.feature.name, scenario.name))
                .map(|record| record.outcome.result()),
        )
    }

    fn scenario_outline_result(&self, outline: ScenarioOutline<'_>) -> TestResult {
        aggregate(
            self.scenario_records(outline.feature.name, outline.name)
                .map(|record| record.outcome.result()),
        )
    }

    fn example_result(
        &self,
        outline: ScenarioOutline<'_>,
        cells: &[&str],
    ) -> Result<TestResult, TestResultsError> {
        let builder = self
            .example_signature_builder
            .as_ref()
            .ok_or(TestResultsError::MissingExampleSignatureBuilder)?;
        let signature = builder.build(cells);
        debug!("looking up example {} of {}", signature, outline);
        Ok(aggregate(
            self.scenario_records(outline.feature.name, outline.name)
                .filter(|record| record.parameters.as_deref() == Some(signature.as_str()))
                .map(|record| record.outcome.result()),
        ))
    }
}

impl fmt::Debug for TestResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestResults")
            .field("records", &self.records)
            .field("example_signature_builder", &self.example_signature_builder)
            .finish()
    }
}

/// The results of a test run split across several reports.
///
/// Each query is answered by every report and the answers are rolled up together.
/// Example queries use the signature builder of each report and fail if one of them has none,
/// or if there is no report at all.
#[derive(Debug, Default)]
pub struct MultipleTestResults {
    results: Vec<TestResults>,
}

impl MultipleTestResults {
    pub fn new(results: Vec<TestResults>) -> Self {
        Self { results }
    }

    pub fn push(&mut self, results: TestResults) {
        self.results.push(results);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestResults> {
        self.results.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TestResults> {
        self.results.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FromIterator<TestResults> for MultipleTestResults {
    fn from_iter<I: IntoIterator<Item = TestResults>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ResultsIndex for MultipleTestResults {
    fn feature_result(&self, feature: Feature<'_>) -> TestResult {
        self.results
            .iter()
            .map(|results| results.feature_result(feature))
            .collect()
    }

    fn scenario_result(&self, scenario: Scenario<'_>) -> TestResult {
        self.results
            .iter()
            .map(|results| results.scenario_result(scenario))
            .collect()
    }

    fn scenario_outline_result(&self, outline: ScenarioOutline<'_>) -> TestResult {
        self.results
            .iter()
            .map(|results| results.scenario_outline_result(outline))
            .collect()
    }

    fn example_result(
        &self,
        outline: ScenarioOutline<'_>,
        cells: &[&str],
    ) -> Result<TestResult, TestResultsError> {
        if self.results.is_empty() {
            return Err(TestResultsError::MissingExampleSignatureBuilder);
        }
        self.results
            .iter()
            .map(|results| results.example_result(outline, cells))
            .collect()
    }
}

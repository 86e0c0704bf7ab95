use std::fmt;
use verdict_api::model::*;
use verdict_api::results::ResultsIndex;
use verdict_api::TestResultsError;

/// A node of the test harness, addressed by name.
#[derive(Debug, Clone)]
pub enum Query {
    Feature {
        feature: String,
    },
    Scenario {
        feature: String,
        scenario: String,
    },
    ScenarioOutline {
        feature: String,
        outline: String,
    },
    Example {
        feature: String,
        outline: String,
        cells: Vec<String>,
    },
}

impl Query {
    /// Asks `index` for the status of the node.
    pub fn evaluate(&self, index: &impl ResultsIndex) -> Result<TestResult, TestResultsError> {
        Ok(match self {
            Query::Feature { feature } => index.feature_result(Feature { name: feature }),
            Query::Scenario { feature, scenario } => index.scenario_result(Scenario {
                name: scenario,
                feature: Feature { name: feature },
            }),
            Query::ScenarioOutline { feature, outline } => {
                index.scenario_outline_result(ScenarioOutline {
                    name: outline,
                    feature: Feature { name: feature },
                })
            }
            Query::Example {
                feature,
                outline,
                cells,
            } => {
                let cells = cells.iter().map(String::as_str).collect::<Vec<_>>();
                index.example_result(
                    ScenarioOutline {
                        name: outline,
                        feature: Feature { name: feature },
                    },
                    &cells,
                )?
            }
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Feature { feature } => write!(f, "feature \"{}\"", feature),
            Query::Scenario { feature, scenario } => {
                write!(f, "scenario \"{}\" of \"{}\"", scenario, feature)
            }
            Query::ScenarioOutline { feature, outline } => {
                write!(f, "outline \"{}\" of \"{}\"", outline, feature)
            }
            Query::Example {
                feature,
                outline,
                cells,
            } => write!(
                f,
                "example {:?} of outline \"{}\" of \"{}\"",
                cells, outline, feature
            ),
        }
    }
}

/// The status a node of the test harness is expected to have.
#[derive(Debug, Clone)]
pub struct Expectation {
    pub query: Query,
    pub expected: TestResult,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.query, self.expected)
    }
}

pub const ADDITION: &str = "Addition";
pub const SCENARIO_OUTLINES: &str = "Scenario Outlines";
pub const ADDING_SEVERAL_NUMBERS: &str = "Adding several numbers";

/// The expectations shared by the reports of every framework in `fixtures/`.
///
/// All these reports are the results of the same test harness, run with each framework.
pub fn harness_manifest() -> Vec<Expectation> {
    let mut manifest = ManifestBuilder::default();

    manifest.feature(ADDITION, TestResult::Failed);
    manifest.scenario(ADDITION, "Add two numbers", TestResult::Passed);
    manifest.scenario(ADDITION, "Fail to add two numbers", TestResult::Failed);
    manifest.scenario(ADDITION, "Ignored adding two numbers", TestResult::Inconclusive);
    manifest.scenario(
        ADDITION,
        "Not automated adding two numbers",
        TestResult::Inconclusive,
    );
    manifest.scenario(ADDITION, "Not in the file at all!", TestResult::NotExecuted);
    manifest.outline(ADDITION, ADDING_SEVERAL_NUMBERS, TestResult::Passed);
    manifest.example(ADDITION, ADDING_SEVERAL_NUMBERS, &["40", "50", "90"], TestResult::Passed);
    manifest.example(ADDITION, ADDING_SEVERAL_NUMBERS, &["60", "70", "130"], TestResult::Passed);

    manifest.feature(SCENARIO_OUTLINES, TestResult::Failed);
    let all_pass = "This is a scenario outline where all scenarios pass";
    manifest.outline(SCENARIO_OUTLINES, all_pass, TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, all_pass, &["pass_1"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, all_pass, &["pass_2"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, all_pass, &["pass_3"], TestResult::Passed);
    let one_inconclusive = "This is a scenario outline where one scenario is inconclusive";
    manifest.outline(SCENARIO_OUTLINES, one_inconclusive, TestResult::Inconclusive);
    manifest.example(SCENARIO_OUTLINES, one_inconclusive, &["pass_1"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, one_inconclusive, &["pass_2"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, one_inconclusive, &["inconclusive_1"], TestResult::Inconclusive);
    let one_fails = "This is a scenario outline where one scenario fails";
    manifest.outline(SCENARIO_OUTLINES, one_fails, TestResult::Failed);
    manifest.example(SCENARIO_OUTLINES, one_fails, &["pass_1"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, one_fails, &["pass_2"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, one_fails, &["fail_1"], TestResult::Failed);
    let bonkers = "And we can go totally bonkers with multiple example sections.";
    manifest.outline(SCENARIO_OUTLINES, bonkers, TestResult::Failed);
    manifest.example(SCENARIO_OUTLINES, bonkers, &["pass_1"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, bonkers, &["pass_2"], TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, bonkers, &["inconclusive_1"], TestResult::Inconclusive);
    manifest.example(SCENARIO_OUTLINES, bonkers, &["inconclusive_2"], TestResult::Inconclusive);
    manifest.example(SCENARIO_OUTLINES, bonkers, &["fail_1"], TestResult::Failed);
    manifest.example(SCENARIO_OUTLINES, bonkers, &["fail_2"], TestResult::Failed);
    manifest.example(SCENARIO_OUTLINES, bonkers, &["not_in_the_file"], TestResult::NotExecuted);
    let backslashes = "Deal correctly with backslashes in the examples";
    manifest.outline(SCENARIO_OUTLINES, backslashes, TestResult::Passed);
    manifest.example(SCENARIO_OUTLINES, backslashes, &["c:\\Temp\\"], TestResult::Passed);

    manifest.feature("Passing", TestResult::Passed);
    manifest.feature("Failing", TestResult::Failed);
    manifest.scenario("Failing", "Failing scenario", TestResult::Failed);
    manifest.scenario("Failing", "Passing scenario", TestResult::Passed);
    manifest.feature("Inconclusive", TestResult::Inconclusive);
    manifest.feature("NotInTheFile", TestResult::NotExecuted);

    manifest.expectations
}

#[derive(Default)]
struct ManifestBuilder {
    expectations: Vec<Expectation>,
}

impl ManifestBuilder {
    fn feature(&mut self, feature: &str, expected: TestResult) {
        self.push(
            Query::Feature {
                feature: feature.to_owned(),
            },
            expected,
        )
    }

    fn scenario(&mut self, feature: &str, scenario: &str, expected: TestResult) {
        self.push(
            Query::Scenario {
                feature: feature.to_owned(),
                scenario: scenario.to_owned(),
            },
            expected,
        )
    }

    fn outline(&mut self, feature: &str, outline: &str, expected: TestResult) {
        self.push(
            Query::ScenarioOutline {
                feature: feature.to_owned(),
                outline: outline.to_owned(),
            },
            expected,
        )
    }

    fn example(&mut self, feature: &str, outline: &str, cells: &[&str], expected: TestResult) {
        self.push(
            Query::Example {
                feature: feature.to_owned(),
                outline: outline.to_owned(),
                cells: cells.iter().map(|cell| (*cell).to_owned()).collect(),
            },
            expected,
        )
    }

    fn push(&mut self, query: Query, expected: TestResult) {
        self.expectations.push(Expectation { query, expected })
    }
}

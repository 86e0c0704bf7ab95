use verdict_api::model::*;
use verdict_api::results::{MultipleTestResults, ResultsIndex, TestResults};
use verdict_api::signature::{join_escaped, ExampleSignatureBuilder};
use verdict_api::TestResultsError;

#[derive(Debug)]
struct CommaSignature;

impl ExampleSignatureBuilder for CommaSignature {
    fn build(&self, cells: &[&str]) -> String {
        join_escaped(cells, ",", &[','])
    }
}

fn record(feature: &str, scenario: &str, parameters: Option<&str>, outcome: Outcome) -> ResultRecord {
    ResultRecord {
        qualified_name: format!("{}.{}", feature, scenario),
        feature: feature.to_owned(),
        scenario: scenario.to_owned(),
        parameters: parameters.map(ToOwned::to_owned),
        title: None,
        outcome,
    }
}

fn addition_results() -> TestResults {
    TestResults::new(vec![
        record("Addition", "Add two numbers", None, Outcome::Passed),
        record("Addition", "Fail to add two numbers", None, Outcome::Failed),
        record("Addition", "Ignored adding two numbers", None, Outcome::Skipped),
        record("Addition", "Adding several numbers", Some("40,50,90"), Outcome::Passed),
        record("Addition", "Adding several numbers", Some("60,70,130"), Outcome::Failed),
        record("Subtraction", "Add two numbers", None, Outcome::Failed),
    ])
    .with_example_signature_builder(Box::new(CommaSignature))
}

const ADDITION: Feature<'static> = Feature { name: "Addition" };
const ADDING_SEVERAL_NUMBERS: ScenarioOutline<'static> = ScenarioOutline {
    name: "Adding several numbers",
    feature: ADDITION,
};

#[test]
fn scenario_results_are_scoped_by_feature() {
    let results = addition_results();
    assert_eq!(
        TestResult::Passed,
        results.scenario_result(Scenario {
            name: "Add two numbers",
            feature: ADDITION
        })
    );
    assert_eq!(
        TestResult::Failed,
        results.scenario_result(Scenario {
            name: "Add two numbers",
            feature: Feature { name: "Subtraction" }
        })
    );
}

#[test]
fn names_are_matched_exactly() {
    let results = addition_results();
    assert_eq!(
        TestResult::NotExecuted,
        results.scenario_result(Scenario {
            name: "add two numbers",
            feature: ADDITION
        })
    );
    assert_eq!(
        TestResult::NotExecuted,
        results.feature_result(Feature { name: "addition" })
    );
}

#[test]
fn ignored_scenario_is_inconclusive_not_missing() {
    let results = addition_results();
    let ignored = results.scenario_result(Scenario {
        name: "Ignored adding two numbers",
        feature: ADDITION,
    });
    let missing = results.scenario_result(Scenario {
        name: "Not in the file at all!",
        feature: ADDITION,
    });
    assert_eq!(TestResult::Inconclusive, ignored);
    assert_eq!(TestResult::NotExecuted, missing);
    assert_eq!(ignored.was_executed(), missing.was_executed());
    assert_eq!(ignored.was_successful(), missing.was_successful());
}

#[test]
fn scenario_query_ignores_example_executions() {
    let results = addition_results();
    assert_eq!(
        TestResult::NotExecuted,
        results.scenario_result(Scenario {
            name: "Adding several numbers",
            feature: ADDITION
        })
    );
}

#[test]
fn reruns_are_all_aggregated() {
    let results = TestResults::new(vec![
        record("Addition", "Add two numbers", None, Outcome::Passed),
        record("Addition", "Add two numbers", None, Outcome::Failed),
    ]);
    assert_eq!(
        TestResult::Failed,
        results.scenario_result(Scenario {
            name: "Add two numbers",
            feature: ADDITION
        })
    );
}

#[test]
fn outline_is_the_union_of_its_examples() -> Result<(), TestResultsError> {
    let results = addition_results();
    assert_eq!(
        TestResult::Failed,
        results.scenario_outline_result(ADDING_SEVERAL_NUMBERS)
    );
    assert_eq!(
        TestResult::Passed,
        results.example_result(ADDING_SEVERAL_NUMBERS, &["40", "50", "90"])?
    );
    assert_eq!(
        TestResult::Failed,
        results.example_result(ADDING_SEVERAL_NUMBERS, &["60", "70", "130"])?
    );
    assert_eq!(
        TestResult::NotExecuted,
        results.example_result(ADDING_SEVERAL_NUMBERS, &["1", "2", "3"])?
    );
    Ok(())
}

#[test]
fn feature_rolls_up_everything() {
    let results = addition_results();
    assert_eq!(TestResult::Failed, results.feature_result(ADDITION));
    assert_eq!(
        TestResult::NotExecuted,
        results.feature_result(Feature { name: "NotInTheFile" })
    );
}

#[test]
fn example_query_without_builder_fails() {
    let mut results = addition_results();
    results.set_example_signature_builder(None);
    assert_eq!(
        Err(TestResultsError::MissingExampleSignatureBuilder),
        results.example_result(ADDING_SEVERAL_NUMBERS, &["40", "50", "90"])
    );

    results.set_example_signature_builder(Some(Box::new(CommaSignature)));
    assert_eq!(
        Ok(TestResult::Passed),
        results.example_result(ADDING_SEVERAL_NUMBERS, &["40", "50", "90"])
    );
}

#[test]
fn index_built_from_records_has_no_builder() {
    let results = TestResults::new(Vec::new());
    assert!(results.is_empty());
    assert!(results.example_signature_builder().is_none());
    assert_eq!(
        Err(TestResultsError::MissingExampleSignatureBuilder),
        results.example_result(ADDING_SEVERAL_NUMBERS, &["40"])
    );
}

#[test]
fn multiple_results_are_rolled_up() -> Result<(), TestResultsError> {
    let other = TestResults::new(vec![
        record("Addition", "Add two numbers", None, Outcome::Inconclusive),
        record("Multiplication", "Multiply two numbers", None, Outcome::Passed),
    ])
    .with_example_signature_builder(Box::new(CommaSignature));
    let results: MultipleTestResults = vec![addition_results(), other].into_iter().collect();

    assert_eq!(2, results.len());
    assert_eq!(
        TestResult::Inconclusive,
        results.scenario_result(Scenario {
            name: "Add two numbers",
            feature: ADDITION
        })
    );
    assert_eq!(
        TestResult::Passed,
        results.feature_result(Feature {
            name: "Multiplication"
        })
    );
    assert_eq!(
        TestResult::Failed,
        results.example_result(ADDING_SEVERAL_NUMBERS, &["60", "70", "130"])?
    );
    Ok(())
}

#[test]
fn multiple_results_need_every_builder() {
    let results = MultipleTestResults::new(vec![addition_results(), TestResults::new(Vec::new())]);
    assert_eq!(
        Err(TestResultsError::MissingExampleSignatureBuilder),
        results.example_result(ADDING_SEVERAL_NUMBERS, &["40", "50", "90"])
    );
}

#[test]
fn no_results_need_a_builder_too() {
    let results = MultipleTestResults::default();
    assert_eq!(
        Err(TestResultsError::MissingExampleSignatureBuilder),
        results.example_result(ADDING_SEVERAL_NUMBERS, &["40", "50", "90"])
    );
    assert_eq!(TestResult::NotExecuted, results.feature_result(ADDITION));
}

#[test]
fn titled_records_match_their_whole_name() {
    let mut split = record("Addition", "Add", Some("then subtract"), Outcome::Failed);
    split.title = Some("Add, then subtract".to_owned());
    let results = TestResults::new(vec![
        split,
        record("Addition", "Add, then subtract", None, Outcome::Passed),
    ]);

    assert_eq!(
        TestResult::Failed,
        results.scenario_result(Scenario {
            name: "Add, then subtract",
            feature: ADDITION
        })
    );
    assert_eq!(
        TestResult::NotExecuted,
        results.scenario_result(Scenario {
            name: "Add",
            feature: ADDITION
        })
    );
    assert_eq!(
        TestResult::NotExecuted,
        results.scenario_result(Scenario {
            name: "Add, then subtract",
            feature: Feature { name: "Subtraction" }
        })
    );
}

#[test]
fn results_are_shareable_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TestResults>();
    assert_send_sync::<MultipleTestResults>();
}

use std::error::Error;
use verdict_api::model::{Feature, ScenarioOutline, TestResult};
use verdict_api::results::ResultsIndex;
use verdict_api::TestResultsError;
use verdict_testsuite::manifest::*;
use verdict_testsuite::parser_evaluator::*;
use verdict_testsuite::report::ExpectationOutcome;
use verdict_xml::TestResultsFormat;

fn run_testsuite(format: TestResultsFormat) -> Result<(), Box<dyn Error>> {
    let results = parse_fixture(format)?;

    let mut errors = Vec::default();
    for result in evaluate_expectations(&harness_manifest(), &results) {
        if let ExpectationOutcome::Failed { error } = result.outcome {
            errors.push(format!("{}: failed with error {}", result.expectation, error))
        }
    }

    assert!(errors.is_empty(), "\n{}\n", errors.join("\n"));
    Ok(())
}

#[test]
fn nunit_testsuite() -> Result<(), Box<dyn Error>> {
    run_testsuite(TestResultsFormat::NUnit)
}

#[test]
fn nunit3_testsuite() -> Result<(), Box<dyn Error>> {
    run_testsuite(TestResultsFormat::NUnit3)
}

#[test]
fn mstest_testsuite() -> Result<(), Box<dyn Error>> {
    run_testsuite(TestResultsFormat::MsTest)
}

#[test]
fn xunit_testsuite() -> Result<(), Box<dyn Error>> {
    run_testsuite(TestResultsFormat::XUnit)
}

#[test]
fn xunit2_testsuite() -> Result<(), Box<dyn Error>> {
    run_testsuite(TestResultsFormat::XUnit2)
}

#[test]
fn specrun_testsuite() -> Result<(), Box<dyn Error>> {
    run_testsuite(TestResultsFormat::SpecRun)
}

#[test]
fn junit_testsuite() -> Result<(), Box<dyn Error>> {
    run_testsuite(TestResultsFormat::JUnit)
}

#[test]
fn example_queries_need_a_signature_builder() -> Result<(), Box<dyn Error>> {
    let outline = ScenarioOutline {
        name: ADDING_SEVERAL_NUMBERS,
        feature: Feature { name: ADDITION },
    };
    for format in TestResultsFormat::ALL.iter() {
        let mut results = parse_fixture(*format)?;
        results.set_example_signature_builder(None);

        assert_eq!(
            Err(TestResultsError::MissingExampleSignatureBuilder),
            results.example_result(outline, &["40", "50", "90"]),
            "{}",
            format
        );
        // the other queries do not need it
        assert_eq!(TestResult::Passed, results.scenario_outline_result(outline));

        results.set_example_signature_builder(Some(format.example_signature_builder()));
        assert_eq!(
            TestResult::Passed,
            results.example_result(outline, &["40", "50", "90"])?
        );
    }
    Ok(())
}

#[test]
fn the_harness_holds_across_several_files() -> Result<(), Box<dyn Error>> {
    let fixture = fixture_path(TestResultsFormat::JUnit);
    let results = TestResultsFormat::JUnit.parse_files(&[&fixture, &fixture])?;
    assert_eq!(results.len(), 2);

    let failures = evaluate_expectations(&harness_manifest(), &results)
        .into_iter()
        .filter(|result| matches!(result.outcome, ExpectationOutcome::Failed { .. }))
        .count();
    assert_eq!(failures, 0);
    Ok(())
}

#[test]
fn the_harness_detects_wrong_results() -> Result<(), Box<dyn Error>> {
    // the NUnit 3 parser does not know the NUnit 2 report format
    let error = parse_results_file(
        TestResultsFormat::NUnit3,
        &fixture_path(TestResultsFormat::NUnit),
    );
    assert!(error.is_err());

    let results = parse_fixture(TestResultsFormat::SpecRun)?;
    let failing = Feature { name: "Failing" };
    assert_eq!(TestResult::Failed, results.feature_result(failing));
    assert_ne!(TestResult::Passed, results.feature_result(failing));
    Ok(())
}

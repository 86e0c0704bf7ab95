use std::error::Error;
use verdict_api::model::{Feature, Scenario, ScenarioOutline, TestResult};
use verdict_api::results::ResultsIndex;
use verdict_testsuite::manifest::{ADDING_SEVERAL_NUMBERS, ADDITION};
use verdict_testsuite::parser_evaluator::parse_fixture;
use verdict_xml::TestResultsFormat;

const FEATURE: Feature<'static> = Feature { name: ADDITION };

fn scenario_result(name: &str) -> Result<TestResult, Box<dyn Error>> {
    let results = parse_fixture(TestResultsFormat::NUnit)?;
    Ok(results.scenario_result(Scenario {
        name,
        feature: FEATURE,
    }))
}

#[test]
fn feature_with_a_failure_was_executed_without_success() -> Result<(), Box<dyn Error>> {
    let result = parse_fixture(TestResultsFormat::NUnit)?.feature_result(FEATURE);
    assert!(result.was_executed());
    assert!(!result.was_successful());
    Ok(())
}

#[test]
fn passed_scenario() -> Result<(), Box<dyn Error>> {
    let result = scenario_result("Add two numbers")?;
    assert!(result.was_executed());
    assert!(result.was_successful());
    Ok(())
}

#[test]
fn failed_scenario() -> Result<(), Box<dyn Error>> {
    let result = scenario_result("Fail to add two numbers")?;
    assert!(result.was_executed());
    assert!(!result.was_successful());
    Ok(())
}

#[test]
fn ignored_and_not_automated_scenarios_were_not_executed() -> Result<(), Box<dyn Error>> {
    for name in &["Ignored adding two numbers", "Not automated adding two numbers"] {
        let result = scenario_result(name)?;
        assert_eq!(TestResult::Inconclusive, result);
        assert!(!result.was_executed());
        assert!(!result.was_successful());
    }
    Ok(())
}

#[test]
fn scenario_not_in_the_file() -> Result<(), Box<dyn Error>> {
    let result = scenario_result("Not in the file at all!")?;
    assert_eq!(TestResult::NotExecuted, result);
    assert!(!result.was_executed());
    assert!(!result.was_successful());
    Ok(())
}

#[test]
fn outline_and_examples() -> Result<(), Box<dyn Error>> {
    let results = parse_fixture(TestResultsFormat::NUnit)?;
    let outline = ScenarioOutline {
        name: ADDING_SEVERAL_NUMBERS,
        feature: FEATURE,
    };

    let result = results.scenario_outline_result(outline);
    assert!(result.was_executed());
    assert!(result.was_successful());
    for row in &[["40", "50", "90"], ["60", "70", "130"]] {
        let result = results.example_result(outline, row)?;
        assert!(result.was_executed());
        assert!(result.was_successful());
    }
    // an outline is not a scenario
    assert_eq!(
        TestResult::NotExecuted,
        results.scenario_result(Scenario {
            name: ADDING_SEVERAL_NUMBERS,
            feature: FEATURE
        })
    );
    Ok(())
}

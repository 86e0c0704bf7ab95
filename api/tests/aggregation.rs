use proptest::prelude::*;
use verdict_api::aggregation::aggregate;
use verdict_api::model::{Outcome, TestResult};

fn test_result() -> impl Strategy<Value = TestResult> {
    prop_oneof![
        Just(TestResult::Passed),
        Just(TestResult::Failed),
        Just(TestResult::Inconclusive),
        Just(TestResult::NotExecuted),
    ]
}

#[test]
fn empty_input_is_not_executed() {
    assert_eq!(TestResult::NotExecuted, aggregate(Vec::new()));
    assert_eq!(TestResult::NotExecuted, aggregate(vec![TestResult::NotExecuted]));
}

#[test]
fn failed_dominates_everything() {
    assert_eq!(
        TestResult::Failed,
        aggregate(vec![
            TestResult::Passed,
            TestResult::Inconclusive,
            TestResult::Failed,
            TestResult::NotExecuted,
        ])
    );
}

#[test]
fn inconclusive_dominates_passed() {
    assert_eq!(
        TestResult::Inconclusive,
        aggregate(vec![TestResult::Passed, TestResult::Inconclusive, TestResult::Passed])
    );
}

#[test]
fn passed_dominates_not_executed() {
    assert_eq!(
        TestResult::Passed,
        aggregate(vec![TestResult::NotExecuted, TestResult::Passed])
    );
}

#[test]
fn mixed_example_sections_fail() {
    let outcomes = [
        Outcome::Passed,
        Outcome::Passed,
        Outcome::Inconclusive,
        Outcome::Inconclusive,
        Outcome::Failed,
        Outcome::Failed,
    ];
    assert_eq!(
        TestResult::Failed,
        aggregate(outcomes.iter().map(|outcome| outcome.result()))
    );
}

#[test]
fn skipped_records_are_inconclusive() {
    assert_eq!(TestResult::Inconclusive, Outcome::Skipped.result());
    assert_eq!(TestResult::Inconclusive, Outcome::Inconclusive.result());
    assert_ne!(TestResult::NotExecuted, Outcome::Skipped.result());
}

#[test]
fn derived_flags() {
    assert!(TestResult::Passed.was_executed());
    assert!(TestResult::Passed.was_successful());
    assert!(TestResult::Failed.was_executed());
    assert!(!TestResult::Failed.was_successful());
    for result in &[TestResult::Inconclusive, TestResult::NotExecuted] {
        assert!(!result.was_executed());
        assert!(!result.was_successful());
    }
}

proptest! {
    #[test]
    fn aggregation_ignores_order(
        (results, shuffled) in prop::collection::vec(test_result(), 0..32)
            .prop_flat_map(|results| (Just(results.clone()), Just(results).prop_shuffle()))
    ) {
        prop_assert_eq!(aggregate(results), aggregate(shuffled));
    }

    #[test]
    fn aggregation_is_associative(
        left in prop::collection::vec(test_result(), 0..16),
        right in prop::collection::vec(test_result(), 0..16),
    ) {
        let whole = aggregate(left.iter().chain(right.iter()).copied());
        let nested = aggregate(vec![aggregate(left), aggregate(right)]);
        prop_assert_eq!(whole, nested);
    }

    #[test]
    fn failure_always_wins(mut results in prop::collection::vec(test_result(), 0..16), position in any::<prop::sample::Index>()) {
        results.insert(position.index(results.len() + 1), TestResult::Failed);
        prop_assert_eq!(TestResult::Failed, aggregate(results));
    }

    #[test]
    fn merge_matches_aggregate(left in test_result(), right in test_result()) {
        prop_assert_eq!(left.merge(right), aggregate(vec![left, right]));
        prop_assert_eq!(left.merge(right), right.merge(left));
        prop_assert_eq!(left, left.merge(TestResult::NotExecuted));
    }
}

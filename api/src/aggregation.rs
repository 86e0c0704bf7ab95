//! Rollup of several statuses into one.
//!
//! The same rule folds the executions of a scenario, the examples of an outline
//! and the scenarios of a feature:
//! `Failed` wins over `Inconclusive`, which wins over `Passed`, which wins over `NotExecuted`.
//!
//! ```
//! use verdict_api::aggregation::aggregate;
//! use verdict_api::model::TestResult;
//!
//! assert_eq!(
//!     TestResult::Failed,
//!     aggregate(vec![TestResult::Passed, TestResult::Failed, TestResult::Inconclusive])
//! );
//! assert_eq!(TestResult::NotExecuted, aggregate(Vec::new()));
//! ```

use crate::model::TestResult;
use std::iter::FromIterator;

/// Folds a multiset of statuses into one. An empty input is `NotExecuted`.
pub fn aggregate(results: impl IntoIterator<Item = TestResult>) -> TestResult {
    results
        .into_iter()
        .fold(TestResult::NotExecuted, TestResult::merge)
}

impl TestResult {
    /// The binary form of [`aggregate`](../aggregation/fn.aggregate.html).
    ///
    /// It is commutative and associative and `NotExecuted` is its identity.
    pub fn merge(self, other: TestResult) -> TestResult {
        if precedence(other) > precedence(self) {
            other
        } else {
            self
        }
    }
}

impl FromIterator<TestResult> for TestResult {
    fn from_iter<I: IntoIterator<Item = TestResult>>(iter: I) -> Self {
        aggregate(iter)
    }
}

fn precedence(result: TestResult) -> u8 {
    match result {
        TestResult::NotExecuted => 0,
        TestResult::Passed => 1,
        TestResult::Inconclusive => 2,
        TestResult::Failed => 3,
    }
}

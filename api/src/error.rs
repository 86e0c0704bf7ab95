use thiserror::Error;

/// Error returned by the example-level queries of a [`ResultsIndex`](results/trait.ResultsIndex.html).
///
/// It reports a misconfigured index, never missing test evidence:
/// an example without matching records is `TestResult::NotExecuted`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Error)]
pub enum TestResultsError {
    /// `example_result` was called while no example signature builder is set.
    #[error("example results require an example signature builder and none is configured")]
    MissingExampleSignatureBuilder,
}

use crate::manifest::Expectation;

#[derive(Debug, Clone)]
pub struct ExpectationResult {
    pub expectation: Expectation,
    pub outcome: ExpectationOutcome,
}

#[derive(Debug, Clone)]
pub enum ExpectationOutcome {
    Passed,
    Failed { error: String },
}

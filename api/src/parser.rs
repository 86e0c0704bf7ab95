//! Interfaces for test framework report parsers.

use crate::model::ResultRecord;
use crate::results::TestResults;
use crate::signature::ExampleSignatureBuilder;
use std::error::Error;

/// A parser returning [`ResultRecord`](../model/struct.ResultRecord.html)s from a test framework report.
///
/// Each implementation knows how its framework names tests and decomposes these names
/// into feature, scenario and example parameters.
pub trait ResultsParser {
    type Error: Error;

    /// Parses a small chunk of the report and calls `on_record` each time a new record is read.
    ///
    /// This method should be called as long as [`is_end`](#tymethod.is_end) returns false.
    fn parse_step<E: From<Self::Error>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E>;

    /// Returns `true` if the complete report has been consumed by the parser.
    fn is_end(&self) -> bool;

    /// Parses the complete report and calls `on_record` each time a new record is read.
    fn parse_all<E: From<Self::Error>>(
        &mut self,
        on_record: &mut impl FnMut(ResultRecord) -> Result<(), E>,
    ) -> Result<(), E> {
        while !self.is_end() {
            self.parse_step(on_record)?;
        }
        Ok(())
    }

    /// The signature builder matching how this framework renders example parameters.
    fn example_signature_builder(&self) -> Box<dyn ExampleSignatureBuilder>;

    /// Parses the complete report into a [`TestResults`](../results/struct.TestResults.html)
    /// using the default example signature builder of the parser.
    ///
    /// Nothing is returned if the report is malformed, even if some records were read before the error.
    fn into_test_results(mut self) -> Result<TestResults, Self::Error>
    where
        Self: Sized,
    {
        let mut records = Vec::default();
        self.parse_all(&mut |record| -> Result<(), Self::Error> {
            records.push(record);
            Ok(())
        })?;
        Ok(TestResults::new(records).with_example_signature_builder(self.example_signature_builder()))
    }
}

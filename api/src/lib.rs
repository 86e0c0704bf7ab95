//! This crate provides the data structures, rollup rules and interfaces shared by test results parsers.
//!
//! It is currently used by the [`verdict_xml`](https://docs.rs/verdict_xml/) crate.
//!
//! Specification nodes are correlated with test records by name, and the records of a node
//! are rolled up into a single [`TestResult`](model/enum.TestResult.html) with [`aggregate`](aggregation/fn.aggregate.html).
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

pub mod aggregation;
mod error;
pub mod model;
pub mod parser;
pub mod results;
pub mod signature;

pub use error::TestResultsError;

//! Conformance tests of the `verdict_xml` parsers against reports of the same test harness run with every supported framework.
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

pub mod manifest;
pub mod parser_evaluator;
pub mod report;

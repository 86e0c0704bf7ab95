#![no_main]
use libfuzzer_sys::fuzz_target;
use verdict_api::parser::ResultsParser;
use verdict_xml::{MsTestParser, XmlResultsError};

fuzz_target!(|data: &[u8]| {
    MsTestParser::new(data).parse_all(&mut |_| Ok(()) as Result<(), XmlResultsError>);
});

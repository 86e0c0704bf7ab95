#![no_main]
use libfuzzer_sys::fuzz_target;
use verdict_api::parser::ResultsParser;
use verdict_xml::{JUnitParser, XmlResultsError};

fuzz_target!(|data: &[u8]| {
    JUnitParser::new(data).parse_all(&mut |_| Ok(()) as Result<(), XmlResultsError>);
});

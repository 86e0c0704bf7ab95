#![no_main]
use libfuzzer_sys::fuzz_target;
use verdict_api::parser::ResultsParser;
use verdict_xml::{XUnitParser, XmlResultsError};

fuzz_target!(|data: &[u8]| {
    XUnitParser::new(data).parse_all(&mut |_| Ok(()) as Result<(), XmlResultsError>);
});

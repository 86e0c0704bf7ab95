use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;
use verdict_api::model::{Feature, Scenario};
use verdict_api::parser::ResultsParser;
use verdict_api::results::ResultsIndex;
use verdict_testsuite::parser_evaluator::fixture_path;
use verdict_xml::*;

fn fixture_data(format: TestResultsFormat) -> Option<Vec<u8>> {
    match fs::read(fixture_path(format)) {
        Ok(data) => Some(data),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    }
}

fn parse_bench(c: &mut Criterion, format: TestResultsFormat, bench: impl Fn(&[u8])) {
    let data = match fixture_data(format) {
        Some(data) => data,
        None => return,
    };
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_with_input(BenchmarkId::from_parameter(format), &data, |b, data| {
        b.iter(|| bench(data))
    });
    group.finish();
}

fn count_records(parser: &mut impl ResultsParser<Error = XmlResultsError>) -> usize {
    let mut count: usize = 0;
    parser
        .parse_all(&mut |_| -> Result<(), XmlResultsError> {
            count += 1;
            Ok(())
        })
        .unwrap();
    count
}

fn bench_parse_nunit(c: &mut Criterion) {
    parse_bench(c, TestResultsFormat::NUnit, |data| {
        count_records(&mut NUnit2Parser::new(data));
    });
    parse_bench(c, TestResultsFormat::NUnit3, |data| {
        count_records(&mut NUnit3Parser::new(data));
    });
}

fn bench_parse_mstest(c: &mut Criterion) {
    parse_bench(c, TestResultsFormat::MsTest, |data| {
        count_records(&mut MsTestParser::new(data));
    });
}

fn bench_parse_xunit(c: &mut Criterion) {
    parse_bench(c, TestResultsFormat::XUnit, |data| {
        count_records(&mut XUnitParser::new(data));
    });
    parse_bench(c, TestResultsFormat::XUnit2, |data| {
        count_records(&mut XUnitParser::new(data));
    });
}

fn bench_parse_specrun(c: &mut Criterion) {
    parse_bench(c, TestResultsFormat::SpecRun, |data| {
        count_records(&mut SpecRunParser::new(data));
    });
}

fn bench_parse_junit(c: &mut Criterion) {
    parse_bench(c, TestResultsFormat::JUnit, |data| {
        count_records(&mut JUnitParser::new(data));
    });
}

fn bench_queries(c: &mut Criterion) {
    let data = match fixture_data(TestResultsFormat::NUnit) {
        Some(data) => data,
        None => return,
    };
    let results = TestResultsFormat::NUnit.parse(data.as_slice()).unwrap();
    let scenario = Scenario {
        name: "Add two numbers",
        feature: Feature { name: "Addition" },
    };
    c.bench_function("scenario_result", |b| {
        b.iter(|| results.scenario_result(scenario))
    });
    c.bench_function("feature_result", |b| {
        b.iter(|| results.feature_result(scenario.feature))
    });
}

criterion_group!(
    parse,
    bench_parse_nunit,
    bench_parse_mstest,
    bench_parse_xunit,
    bench_parse_specrun,
    bench_parse_junit,
    bench_queries
);

criterion_main!(parse);

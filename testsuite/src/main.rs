use std::env;
use std::path::PathBuf;
use verdict_testsuite::manifest::harness_manifest;
use verdict_testsuite::parser_evaluator::*;
use verdict_testsuite::report::ExpectationOutcome;
use verdict_xml::TestResultsFormat;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Expecting arguments: <format> [<results_file>...]");
        return;
    }
    let format: TestResultsFormat = match args[1].parse() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let files: Vec<PathBuf> = if args.len() > 2 {
        args[2..].iter().map(PathBuf::from).collect()
    } else {
        vec![fixture_path(format)]
    };

    match format.parse_files(&files) {
        Ok(results) => {
            for result in evaluate_expectations(&harness_manifest(), &results) {
                match result.outcome {
                    ExpectationOutcome::Passed => println!("{}: passed", result.expectation),
                    ExpectationOutcome::Failed { error } => {
                        println!("{}: failed with error {}", result.expectation, error)
                    }
                }
            }
        }
        Err(e) => eprintln!("{}", e),
    }
}

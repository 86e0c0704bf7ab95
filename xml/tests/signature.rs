use proptest::prelude::*;
use verdict_api::signature::ExampleSignatureBuilder;
use verdict_xml::*;

fn builders() -> Vec<Box<dyn ExampleSignatureBuilder>> {
    TestResultsFormat::ALL
        .iter()
        .map(|format| format.example_signature_builder())
        .collect()
}

/// Cells made of the characters the frameworks reserve or escape.
fn cell() -> impl Strategy<Value = String> {
    "[a-c0-9 ,|\"\\\\\\[\\]()]{0,6}"
}

fn row() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(cell(), 1..5)
}

fn cells(row: &[String]) -> Vec<&str> {
    row.iter().map(String::as_str).collect()
}

#[test]
fn backslashes_are_escaped() {
    let path = ["c:\\Temp\\"];
    assert_eq!(
        NUnitExampleSignatureBuilder.build(&path),
        "\"c:\\\\Temp\\\\\""
    );
    assert_eq!(
        XUnitExampleSignatureBuilder.build(&path),
        "\"c:\\\\Temp\\\\\""
    );
    assert_eq!(MsTestExampleSignatureBuilder.build(&path), "c:\\\\Temp\\\\");
    assert_eq!(SpecRunExampleSignatureBuilder.build(&path), "c:\\\\Temp\\\\");
    assert_eq!(JUnitExampleSignatureBuilder.build(&path), "c:\\\\Temp\\\\");
}

#[test]
fn separators_in_values_do_not_merge_cells() {
    for builder in builders() {
        assert_ne!(builder.build(&["a,b"]), builder.build(&["a", "b"]));
        assert_ne!(builder.build(&["a|b"]), builder.build(&["a", "b"]));
        assert_ne!(builder.build(&["a, b"]), builder.build(&["a", "b"]));
        assert_ne!(builder.build(&["a\\", "b"]), builder.build(&["a", "\\b"]));
    }
}

proptest! {
    #[test]
    fn builders_are_deterministic(row in row()) {
        for builder in builders() {
            prop_assert_eq!(builder.build(&cells(&row)), builder.build(&cells(&row)));
        }
    }

    #[test]
    fn builders_are_injective(left in row(), right in row()) {
        prop_assume!(left != right);
        for builder in builders() {
            prop_assert_ne!(
                builder.build(&cells(&left)),
                builder.build(&cells(&right)),
                "{:?}",
                builder
            );
        }
    }
}

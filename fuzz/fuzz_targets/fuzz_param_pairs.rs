#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};

#[derive(Arbitrary, Debug)]
struct Input {
    pairs: Vec<(String, String)>,
}

fuzz_target!(|input: Input| {
    if input.pairs.len() > 64 { return; }
    let schema = query_lite::Schema::new(input.pairs);
    let _ = schema.validate();
    // Debug text, since NaN never compares equal
    let first = format!("{:?}", schema.parse());
    assert_eq!(first, format!("{:?}", schema.parse()));
});

use proptest::prelude::*;
use proptest::string::string_regex;

use crate::Document;

fn word() -> impl Strategy<Value = String> {
    string_regex("[a-zA-Z0-9]{1,8}").unwrap()
}

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        (word(), word()).prop_map(|(k, v)| format!("{k}={v}\n")),
        (word(), word()).prop_map(|(k, v)| format!("{k}: {v}\n")),
        word().prop_map(|c| format!("# {c}\n")),
        word().prop_map(|c| format!("! {c}\n")),
        Just("\n".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_load_str_when_arbitrary_well_formed_input_then_store_round_trips_identically(lines in proptest::collection::vec(line(), 0..12)) {
        let input: String = lines.concat();
        let doc = Document::load_str(&input).unwrap();
        prop_assert_eq!(doc.to_string_lossless(), input);
    }
}

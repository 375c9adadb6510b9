use proptest::prelude::*;
use proptest::string::string_regex;

use crate::Scanner;

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
    fn test_tokenize_when_arbitrary_well_formed_lines_then_raw_concatenation_round_trips(lines in proptest::collection::vec(line(), 0..12)) {
        let input: String = lines.concat();
        let tokens = Scanner::tokenize(&input).unwrap();
        let reassembled: String = tokens.iter().map(|t| t.raw.as_str()).collect();
        prop_assert_eq!(reassembled, input);
    }
}

use pretty_assertions::assert_eq;

use super::tokenize;
use crate::Scanner;

#[test]
fn test_scan_value_when_control_escapes_expect_decoded_control_chars() {
    let tokens = tokenize("three=and escapes\\n\\t\\r\\f");
    assert_eq!(tokens[2].text(), "and escapes\n\t\r\x0C");
    assert_eq!(tokens[2].raw, "and escapes\\n\\t\\r\\f");
}

#[test]
fn test_scan_value_when_unicode_escape_expect_decoded_code_point() {
    let tokens = tokenize("key.4 = \\u1234");
    assert_eq!(tokens[2].text(), "\u{1234}");
}

#[test]
fn test_scan_value_when_malformed_unicode_escape_expect_error() {
    let err = Scanner::tokenize("key = \\u12").unwrap_err();
    assert!(matches!(err, crate::LexError::InvalidUnicodeEscape { .. }));
}

#[test]
fn test_scan_value_when_non_hex_unicode_escape_expect_error() {
    let err = Scanner::tokenize("key = \\uZZZZ").unwrap_err();
    assert!(matches!(err, crate::LexError::InvalidUnicodeEscape { .. }));
}

#[test]
fn test_scan_value_when_escaped_equals_expect_literal_character_kept() {
    let tokens = tokenize("key = a\\=b");
    assert_eq!(tokens[2].text(), "a=b");
    assert_eq!(tokens[2].raw, "a\\=b");
}

#[test]
fn test_scan_value_when_continuation_expect_eol_and_leading_whitespace_dropped() {
    let tokens = tokenize("multiline = one \\\n    two  \\\n\tthree\n");
    assert_eq!(tokens[2].text(), "one two  three");
    assert_eq!(tokens[2].raw, "one \\\n    two  \\\n\tthree");
}

#[test]
fn test_scan_key_when_no_escapes_expect_decoded_absent() {
    let tokens = tokenize("plain=value");
    assert_eq!(tokens[0].decoded, None);
    assert_eq!(tokens[2].decoded, None);
}

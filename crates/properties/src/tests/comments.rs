use pretty_assertions::assert_eq;

use super::reference;
use crate::PropertiesError;

#[test]
fn test_get_comment_when_key_has_attached_block_expect_decoded_lines_in_order() {
    let doc = reference();
    assert_eq!(doc.get_comment("three"), vec!["# another comment".to_string(), "! and a comment".to_string(), "! block".to_string()]);
}

#[test]
fn test_get_comment_when_blank_line_detaches_block_expect_only_closest_comment() {
    let doc = reference();
    assert_eq!(doc.get_comment("one"), vec!["! comment3".to_string()]);
}

#[test]
fn test_get_comment_when_no_attached_comment_expect_empty() {
    let doc = reference();
    assert_eq!(doc.get_comment("two"), Vec::<String>::new());
}

#[test]
fn test_get_comment_when_key_absent_expect_empty() {
    let doc = reference();
    assert_eq!(doc.get_comment("nope"), Vec::<String>::new());
}

#[test]
fn test_set_comment_when_no_such_key_expect_error() {
    let mut doc = reference();
    let err = doc.set_comment("nope", &["x"]).unwrap_err();
    assert!(matches!(err, PropertiesError::NoSuchElement { .. }));
}

#[test]
fn test_set_comment_when_replacing_block_expect_prefix_family_inherited_from_closest_comment() {
    let mut doc = reference();
    doc.set_comment("three", &["new1", "new2"]).unwrap();
    assert_eq!(doc.get_comment("three"), vec!["! new1".to_string(), "! new2".to_string()]);

    let expected = "#comment1\n#  comment2   \n\n! comment3\none=simple\ntwo=value containing spaces\n! new1\n! new2\nthree=and escapes\\n\\t\\r\\f\n  \\ with\\ spaces   =    everywhere  \naltsep:value\nmultiline = one \\\n    two  \\\n\tthree\nkey.4 = \\u1234";
    assert_eq!(doc.to_string_lossless(), expected);
}

#[test]
fn test_set_comment_when_adding_more_lines_than_existed_expect_extra_lines_inserted_before_key() {
    let mut doc = reference();
    doc.set_comment("two", &["brand new"]).unwrap();
    assert_eq!(doc.get_comment("two"), vec!["# brand new".to_string()]);
}

#[test]
fn test_set_comment_when_clearing_expect_no_comment_and_round_trips_with_prior_text_removed() {
    let mut doc = reference();
    doc.set_comment("three", &[] as &[&str]).unwrap();
    assert_eq!(doc.get_comment("three"), Vec::<String>::new());
    assert!(doc.to_string_lossless().contains("two=value containing spaces\nthree="));
}

#[test]
fn test_set_comment_when_input_already_prefixed_expect_kept_verbatim() {
    let mut doc = reference();
    doc.set_comment("two", &["! already prefixed"]).unwrap();
    assert_eq!(doc.get_comment("two"), vec!["! already prefixed".to_string()]);
}

#[test]
fn test_set_comment_is_noop_modulo_prefix_when_round_tripped_through_get_comment() {
    let mut doc = reference();
    let original = doc.get_comment("three");
    doc.set_comment("three", &original).unwrap();
    assert_eq!(doc.get_comment("three"), original);
}

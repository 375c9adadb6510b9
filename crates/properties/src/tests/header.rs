use pretty_assertions::assert_eq;

use crate::Document;

#[test]
fn test_put_when_only_header_comment_and_no_properties_expect_blank_line_detaches_header() {
    let mut doc = Document::load_str("# A header comment").unwrap();
    doc.put("first", "dummy").unwrap();
    assert_eq!(doc.to_string_lossless(), "# A header comment\n\nfirst=dummy");
}

#[test]
fn test_put_when_header_comment_is_attached_to_first_property_expect_no_extra_blank_line_inserted() {
    // The only-header special case requires there be no KEY token yet at
    // all; once a property exists, later `put`s always take the normal
    // rewind-from-the-end path, whether or not a comment is attached.
    let mut doc = Document::load_str("# attached\nfirst=one").unwrap();
    doc.put("second", "two").unwrap();
    assert_eq!(doc.to_string_lossless(), "# attached\nfirst=one\nsecond=two");
}

#[test]
fn test_store_with_header_when_lines_given_expect_replaces_existing_header_block() {
    let doc = Document::load_str("# old header\n\nfirst=one\n").unwrap();
    let mut out = Vec::new();
    doc.store_with_header(&mut out, &["new header line"]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "# new header line\n\nfirst=one\n");
}

#[test]
fn test_store_with_header_when_no_lines_given_expect_identical_to_plain_store() {
    let doc = Document::load_str("# kept\nfirst=one\n").unwrap();
    let mut with_header = Vec::new();
    doc.store_with_header(&mut with_header, &[] as &[&str]).unwrap();
    let mut plain = Vec::new();
    doc.store(&mut plain).unwrap();
    assert_eq!(with_header, plain);
}

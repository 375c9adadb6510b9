mod comments;
mod header;
mod roundtrip;

use crate::Document;

const REFERENCE: &str = "#comment1\n#  comment2   \n\n! comment3\none=simple\ntwo=value containing spaces\n# another comment\n! and a comment\n! block\nthree=and escapes\\n\\t\\r\\f\n  \\ with\\ spaces   =    everywhere  \naltsep:value\nmultiline = one \\\n    two  \\\n\tthree\nkey.4 = \\u1234";

fn reference() -> Document {
    Document::load_str(REFERENCE).expect("reference input is well-formed")
}

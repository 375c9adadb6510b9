//! Encode/decode helpers shared by `Document::put`, `put_raw`, and the
//! `escaped`/`unescaped` views.
//!
//! These are deliberately separate from the scanner's own escape decoding
//! in `lexer::Scanner` — the scanner decodes escapes it *finds* while
//! tokenizing; this module *produces* raw text for newly synthesized
//! tokens and re-interprets raw text a caller hands in directly (e.g. via
//! `put_raw`), so it has to be usable without a token stream in scope.

/// Escapes a value the way a freshly `put` value is written out: control
/// characters get their familiar two-character escapes, backslash is
/// doubled. Spaces, `=`, and `:` are left alone — they need no escaping
/// inside a value, unlike inside a key.
pub fn escape_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0C' => out.push_str("\\f"),
            other => out.push(other),
        }
    }
    out
}

/// As [`escape_value`], plus spaces, `=`, and `:` are escaped — these are
/// separator characters and would otherwise be ambiguous at the start or
/// middle of a key. Escaping `=`/`:` here is a deliberate divergence from
/// the original source (see the Open Questions in DESIGN.md): a key
/// produced via `put` must round-trip even when it contains one.
pub fn escape_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0C' => out.push_str("\\f"),
            ' ' => out.push_str("\\ "),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            other => out.push(other),
        }
    }
    out
}

/// Decodes escape sequences in `raw`, mirroring the scanner's own escape
/// handling: `\t\f\n\r` to their control characters, `\uXXXX` to a code
/// point, a trailing lone backslash dropped, and any other `\x` reduced
/// to `x`. Unlike the scanner, a malformed `\uXXXX` is tolerated by
/// passing the digits through literally rather than failing — `put_raw`
/// has no error channel back to a scan position, since the text didn't
/// come from a token stream.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('f') => out.push('\x0C'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let digits: String = (&mut chars).take(4).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(ch) if digits.len() == 4 => out.push(ch),
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&digits);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// The `escaped()` view transform: any character above the Latin-1 range
/// becomes a lowercase, zero-padded `\uXXXX` escape; everything else
/// passes through unchanged.
pub fn to_unicode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if (c as u32) > 0x00FF {
            out.push_str(&format!("\\u{:04x}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// The `unescaped()` view transform: `\uXXXX` sequences become the
/// literal character; everything else passes through unchanged. The
/// inverse of [`to_unicode_escapes`], restricted to `\u` escapes only (no
/// other escape kind is rewritten by this view).
pub fn from_unicode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'u') {
            chars.next();
            let digits: String = (&mut chars).take(4).collect();
            match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                Some(ch) if digits.len() == 4 => out.push(ch),
                _ => {
                    out.push_str("\\u");
                    out.push_str(&digits);
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_value_when_control_chars_expect_two_char_escapes() {
        assert_eq!(escape_value("a\nb\tc"), "a\\nb\\tc");
    }

    #[test]
    fn test_escape_value_when_space_or_separator_chars_expect_unescaped() {
        assert_eq!(escape_value("a b=c:d"), "a b=c:d");
    }

    #[test]
    fn test_escape_key_when_space_and_separators_expect_all_escaped() {
        assert_eq!(escape_key("a b=c:d"), "a\\ b\\=c\\:d");
    }

    #[test]
    fn test_unescape_when_round_tripping_escape_key_output_expect_original() {
        let key = "a b=c:d\\e";
        assert_eq!(unescape(&escape_key(key)), key);
    }

    #[test]
    fn test_unescape_when_round_tripping_escape_value_output_expect_original() {
        let value = "line1\nline2\ttabbed\\slash";
        assert_eq!(unescape(&escape_value(value)), value);
    }

    #[test]
    fn test_to_unicode_escapes_when_idempotent_expect_second_pass_is_no_op() {
        let once = to_unicode_escapes("caf\u{e9} \u{1234}");
        let twice = to_unicode_escapes(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_unicode_escapes_when_idempotent_expect_second_pass_is_no_op() {
        let once = from_unicode_escapes("caf\\u00e9 plain");
        let twice = from_unicode_escapes(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_unicode_escapes_inverts_to_unicode_escapes() {
        let original = "caf\u{e9} \u{1234} plain";
        assert_eq!(from_unicode_escapes(&to_unicode_escapes(original)), original);
    }
}

use lexer::Token;

/// Line-ending convention used when the document synthesizes a brand new
/// EOL token (there is no "original" formatting to preserve for it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Lf,
    CrLf,
    Cr,
}

impl Newline {
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
            Newline::Cr => "\r",
        }
    }
}

/// Scans the existing EOL tokens and picks the convention new tokens
/// should follow: if both CRLF and bare LF appear, fall back to LF (the
/// core carries no platform-detection dependency, so "platform default"
/// is pinned rather than queried — see DESIGN.md); if only CRLF appears,
/// use CRLF; otherwise use LF.
pub fn determine_newline(tokens: &[Token]) -> Newline {
    let mut saw_crlf = false;
    let mut saw_lf_only = false;

    for token in tokens {
        if !token.is_eol() {
            continue;
        }
        if token.raw.ends_with("\r\n") {
            saw_crlf = true;
        } else if token.raw.ends_with('\n') {
            saw_lf_only = true;
        }
    }

    if saw_crlf && !saw_lf_only {
        Newline::CrLf
    } else {
        Newline::Lf
    }
}

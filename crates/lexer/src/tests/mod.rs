mod escapes;
mod roundtrip;

use crate::{Scanner, Token, TokenKind};

fn tokenize(source: &str) -> Vec<Token> {
    Scanner::tokenize(source).expect("well-formed input should not fail to scan")
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

//! Scanner for full-text-search snippets.
//!
//! The search backend wraps matched terms in reserved marker strings:
//! `<dnotehl>` opens a highlighted span, `</dnotehl>` closes one. This lexer
//! turns a snippet into a flat token stream so the renderer never interprets
//! the raw string as markup.
//!
//! It is a scanner, not a parser: markers are emitted positionally with no
//! balance checking. A malformed snippet (doubled opens, stray closes) still
//! tokenizes; the consumer decides how to render that.

/// Opening highlight marker emitted by the search backend.
pub const HIGHLIGHT_OPEN: &str = "<dnotehl>";
/// Closing highlight marker emitted by the search backend.
pub const HIGHLIGHT_CLOSE: &str = "</dnotehl>";

/// One lexed unit of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single plain character.
    Char(char),
    HighlightStart,
    HighlightEnd,
    /// Terminal token, always last in a tokenized sequence.
    Eof,
}

/// Result of one scan step: the token at the position, and the byte offset
/// of the next token, or `None` once the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    pub token: Token,
    pub next: Option<usize>,
}

/// Scans one token at byte offset `pos`.
///
/// Marker matches are exact and case-sensitive; anything else — including a
/// `<` that almost starts a marker — is a single [`Token::Char`]. `pos` must
/// lie on a character boundary (always true when driven by [`tokenize`]).
/// Scanning at or past the end of input yields [`Token::Eof`].
pub fn scan_one(input: &str, pos: usize) -> Scan {
    let rest = &input[pos.min(input.len())..];

    let (token, width) = if rest.starts_with(HIGHLIGHT_OPEN) {
        (Token::HighlightStart, HIGHLIGHT_OPEN.len())
    } else if rest.starts_with(HIGHLIGHT_CLOSE) {
        (Token::HighlightEnd, HIGHLIGHT_CLOSE.len())
    } else {
        match rest.chars().next() {
            Some(c) => (Token::Char(c), c.len_utf8()),
            None => return Scan { token: Token::Eof, next: None },
        }
    };

    let next = pos + width;
    Scan {
        token,
        next: (next < input.len()).then_some(next),
    }
}

/// Tokenizes a whole snippet, ending with a single [`Token::Eof`].
///
/// Total over any input: the empty string yields just `[Eof]`, and the
/// output length is bounded by the input length plus one.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < input.len() {
        let scan = scan_one(input, pos);
        tokens.push(scan.token);
        match scan.next {
            Some(next) => pos = next,
            None => break,
        }
    }

    tokens.push(Token::Eof);
    tokens
}

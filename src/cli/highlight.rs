use anyhow::Result;
use console::style;

use dnote_core::lexer::{self, Token};

/// Print a search snippet with highlighted spans styled for the terminal.
pub fn run(snippet: &str) -> Result<()> {
    let mut out = String::new();
    for (text, highlighted) in spans(snippet) {
        if highlighted {
            out.push_str(&style(text).yellow().bold().to_string());
        } else {
            out.push_str(&text);
        }
    }
    println!("{out}");
    Ok(())
}

/// Collapse the token stream into contiguous (text, highlighted) runs.
///
/// The lexer does no balance checking, so this tracks a depth counter and
/// tolerates stray or doubled markers: a close with no matching open is
/// ignored, nested opens just keep the span highlighted.
fn spans(snippet: &str) -> Vec<(String, bool)> {
    let mut spans: Vec<(String, bool)> = Vec::new();
    let mut buf = String::new();
    let mut depth = 0usize;

    let flush = |buf: &mut String, depth: usize, spans: &mut Vec<(String, bool)>| {
        if !buf.is_empty() {
            spans.push((std::mem::take(buf), depth > 0));
        }
    };

    for token in lexer::tokenize(snippet) {
        match token {
            Token::Char(c) => buf.push(c),
            Token::HighlightStart => {
                flush(&mut buf, depth, &mut spans);
                depth += 1;
            }
            Token::HighlightEnd => {
                flush(&mut buf, depth, &mut spans);
                depth = depth.saturating_sub(1);
            }
            Token::Eof => flush(&mut buf, depth, &mut spans),
        }
    }

    spans
}

//! Tokenizer for a single already comment-stripped, already trimmed basm
//! source line.
//!
//! basm hands the lexer one line at a time (see `translator::mod`), so this
//! module carries no multi-line state and line-tracking is the translator's
//! job, not the lexer's.

pub mod cursor;
pub mod token;


use crate::error::{Diagnostic, Location, Result};
use cursor::Cursor;
use token::{Token, TokenKind};

/// Tokenize one line of source. Stops and returns an error on the first
/// lexical problem — there is no point collecting further lexical errors
/// since translation is report-and-halt.
pub fn tokenize<'a>(line: &'a str, location: Location<'_>) -> Result<Vec<Token<'a>>> {
    let mut cursor = Cursor::new(line);
    let mut tokens = Vec::new();

    loop {
        while matches!(cursor.peek(), Some(c) if c.is_ascii_whitespace()) {
            cursor.advance();
        }
        if cursor.is_at_end() {
            break;
        }

        let start = cursor.pos();
        let ch = cursor.peek().unwrap();

        let kind = match ch {
            '(' => {
                cursor.advance();
                TokenKind::OpenParen
            }
            ')' => {
                cursor.advance();
                TokenKind::CloseParen
            }
            ',' => {
                cursor.advance();
                TokenKind::Comma
            }
            '>' => {
                cursor.advance();
                TokenKind::Gt
            }
            '+' => {
                cursor.advance();
                TokenKind::Plus
            }
            '-' => {
                cursor.advance();
                TokenKind::Minus
            }
            '"' => {
                cursor.advance();
                scan_quoted(&mut cursor, line, start, '"', "closing \"", location)?;
                TokenKind::Str
            }
            '\'' => {
                cursor.advance();
                scan_quoted(&mut cursor, line, start, '\'', "closing '", location)?;
                TokenKind::Char
            }
            c if c.is_ascii_alphabetic() => {
                while matches!(cursor.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                    cursor.advance();
                }
                TokenKind::Name
            }
            c if c.is_ascii_digit() => {
                while matches!(cursor.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '.') {
                    cursor.advance();
                }
                TokenKind::Number
            }
            other => {
                return Err(Diagnostic::new(
                    location,
                    format!("unknown token starts with '{other}'"),
                ));
            }
        };

        let end = cursor.pos();
        let text = match kind {
            // interior text, excluding the surrounding quote bytes
            TokenKind::Str | TokenKind::Char => &line[start + 1..end - 1],
            _ => &line[start..end],
        };
        tokens.push(Token::new(kind, text));
    }

    Ok(tokens)
}

/// Scan to a closing quote with no escape processing, per the language's
/// explicit exclusion of string/char escape sequences. Leaves the cursor
/// just past the closing quote.
fn scan_quoted(
    cursor: &mut Cursor<'_>,
    line: &str,
    start: usize,
    quote: char,
    what: &str,
    location: Location<'_>,
) -> Result<()> {
    loop {
        match cursor.peek() {
            None => {
                return Err(Diagnostic::new(
                    location,
                    format!("could not find {what} to match `{}`", &line[start..]),
                ))
            }
            Some(c) if c == quote => {
                cursor.advance();
                return Ok(());
            }
            Some(_) => {
                cursor.advance();
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn tokenize_test(line: &str) -> Result<Vec<Token<'_>>> {
    tokenize(line, Location::new("test", 1))
}

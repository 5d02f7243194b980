//! Lexer for request path strings
//!
//! Tokenizes the raw URL path into a stream of tokens covering the entire
//! input with no gaps.
//!
//! # Features
//!
//! - Zero-copy tokenization (tokens reference the original input)
//! - Every token records its byte offset for diagnostics
//! - Maximal-run scanning for words and digit groups
//!
//! Whitespace is not part of the grammar: literal spaces inside values are
//! encoded as `+`, so a space character (like any other unmapped character)
//! fails the lex with its exact offset.
//!
//! # Example
//!
//! ```rust
//! use colloq_parser::request::Lexer;
//!
//! let input = "/paper:topic=vogonpoetry";
//! let tokens: Vec<_> = Lexer::new(input).collect();
//! assert_eq!(tokens.len(), 7); // /, paper, :, topic, =, vogonpoetry, EOF
//! ```

use thiserror::Error;

use super::token::{Token, TokenKind};

/// An unrecognized character in the request path
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unrecognized character '{character}' at position {position}")]
pub struct LexError {
    /// Byte offset of the offending character
    pub position: usize,
    /// The character that no token class accepts
    pub character: char,
}

/// A lexer for request path strings
///
/// Implements `Iterator` over `Result<Token, LexError>`, allowing for lazy
/// tokenization that stops at the first unrecognized character.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input string being tokenized
    input: &'a str,
    /// Current byte position in the input
    position: usize,
    /// Whether we've emitted the EOF token
    eof_emitted: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            eof_emitted: false,
        }
    }

    /// Get the current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the remaining input
    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Peek at the next character without consuming it
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Advance the position by n bytes
    fn advance(&mut self, n: usize) {
        self.position = (self.position + n).min(self.input.len());
    }

    /// Scan a maximal run of alphabetic characters
    fn scan_word(&mut self) -> Token<'a> {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c.is_alphabetic() {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }
        Token::new(TokenKind::Word, &self.input[start..self.position], start)
    }

    /// Scan a maximal run of ASCII digits
    fn scan_digits(&mut self) -> Token<'a> {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance(1);
            } else {
                break;
            }
        }
        Token::new(TokenKind::Digits, &self.input[start..self.position], start)
    }

    /// Get the next token
    fn next_token(&mut self) -> Option<Result<Token<'a>, LexError>> {
        if self.position >= self.input.len() {
            if self.eof_emitted {
                return None;
            }
            self.eof_emitted = true;
            return Some(Ok(Token::new(TokenKind::Eof, "", self.position)));
        }

        let c = self.peek()?;

        let separator = match c {
            '/' => Some(TokenKind::Slash),
            ':' => Some(TokenKind::Colon),
            '&' => Some(TokenKind::Ampersand),
            '$' => Some(TokenKind::Dollar),
            ',' => Some(TokenKind::Comma),
            '=' => Some(TokenKind::Equals),
            '+' => Some(TokenKind::Plus),
            _ => None,
        };

        if let Some(kind) = separator {
            let start = self.position;
            self.advance(1);
            return Some(Ok(Token::new(kind, &self.input[start..self.position], start)));
        }

        if c.is_alphabetic() {
            return Some(Ok(self.scan_word()));
        }
        if c.is_ascii_digit() {
            return Some(Ok(self.scan_digits()));
        }

        Some(Err(LexError {
            position: self.position,
            character: c,
        }))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize a full request path, failing at the first unrecognized character.
///
/// The returned sequence always ends with an explicit end-of-input token.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().iter().map(|t| t.kind).collect()
    }

    fn token_texts(input: &str) -> Vec<&str> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].offset, 0);
    }

    #[test]
    fn test_separators() {
        let kinds = token_kinds("/:&$,=+");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Slash,
                TokenKind::Colon,
                TokenKind::Ampersand,
                TokenKind::Dollar,
                TokenKind::Comma,
                TokenKind::Equals,
                TokenKind::Plus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_word_and_digit_runs_are_maximal() {
        let texts = token_texts("abc123def");
        assert_eq!(texts, vec!["abc", "123", "def"]);

        let kinds = token_kinds("abc123def");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Digits,
                TokenKind::Word,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_leading_zeros_stay_in_one_run() {
        let tokens = tokenize("05").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Digits);
        assert_eq!(tokens[0].text, "05");
    }

    #[test]
    fn test_token_offsets() {
        let tokens = tokenize("/paper:topic=vogonpoetry").unwrap();
        assert_eq!(tokens[0].offset, 0); // /
        assert_eq!(tokens[1].offset, 1); // paper
        assert_eq!(tokens[2].offset, 6); // :
        assert_eq!(tokens[3].offset, 7); // topic
        assert_eq!(tokens[4].offset, 12); // =
        assert_eq!(tokens[5].offset, 13); // vogonpoetry
        assert_eq!(tokens[6].kind, TokenKind::Eof);
        assert_eq!(tokens[6].offset, 24);
    }

    #[test]
    fn test_no_gaps() {
        let input = "/paper:author=Daniel+Klingbein&topic=vogonpoetry$author:obit=1993+05+22";
        let rebuilt: String = tokenize(input)
            .unwrap()
            .iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_full_request() {
        let texts = token_texts("/paper:obit=1993+05+22");
        assert_eq!(
            texts,
            vec!["/", "paper", ":", "obit", "=", "1993", "+", "05", "+", "22"]
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let err = tokenize("/paper:topic|vogonpoetry").unwrap_err();
        assert_eq!(
            err,
            LexError {
                position: 12,
                character: '|',
            }
        );
        assert_eq!(
            err.to_string(),
            "unrecognized character '|' at position 12"
        );
    }

    #[test]
    fn test_space_is_unrecognized() {
        // Spaces are encoded as '+' by the grammar; a literal space fails.
        let err = tokenize("/paper topic").unwrap_err();
        assert_eq!(err.position, 6);
        assert_eq!(err.character, ' ');
    }

    #[test]
    fn test_pipe_in_scenario_offset() {
        let input = "/paper:author=Daniel+Klingbein&topic|vogonpoetry$author:obit=1993+05+22";
        let err = tokenize(input).unwrap_err();
        assert_eq!(err.position, 36);
        assert_eq!(err.character, '|');
    }

    #[test]
    fn test_lexer_position_tracks_progress() {
        let mut lexer = Lexer::new("/paper");
        assert_eq!(lexer.position(), 0);
        lexer.next();
        assert_eq!(lexer.position(), 1);
        lexer.next();
        assert_eq!(lexer.position(), 6);
    }
}

//! Recursive-descent parser for request paths
//!
//! Converts the token sequence from the lexer into an AST, consuming the
//! sequence exactly once with one-token lookahead.
//!
//! # Grammar
//!
//! ```text
//! request      ::= '/' hierarchy (',' hierarchy)*
//! hierarchy    ::= entity ('$' entity)*
//! entity       ::= WORD ':' attribute ('&' attribute)*
//! attribute    ::= WORD '=' value
//! value        ::= number_value | string_value
//! number_value ::= DIGITS ('+' DIGITS)*
//! string_value ::= (WORD | DIGITS | '+')+      '+' decodes to a space
//! ```
//!
//! The lexer never interprets `+`; the parser decides per value. A value is
//! numeric iff its first token is a digit run and every token up to the next
//! `&`/`$`/`,`/end-of-input boundary is a correctly alternating
//! `DIGITS ('+' DIGITS)*` run; anything else is a string value with each
//! `+` decoded to a space.
//!
//! The parser has no schema knowledge; whether an entity or attribute
//! exists is the verifier's concern.

use thiserror::Error;

use super::ast::{
    AttributeNode, EntityNode, HierarchyNode, NumberAttributeNode, NumberNode, RequestNode,
    StringAttributeNode, StringNode,
};
use super::token::{Token, TokenKind};

/// Parser errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The token at `position` does not fit the grammar
    #[error("expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    /// A digit run too large for a 64-bit integer
    #[error("number too large at position {position}")]
    NumberTooLarge { position: usize },
}

/// A parser for request paths
///
/// Owns the token sequence and a cursor into it; `parse` consumes the parser
/// and yields the tree or the first grammar violation.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    index: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser from a token sequence.
    ///
    /// The sequence is expected to come from the lexer and therefore end
    /// with an end-of-input token; one is appended if missing so the cursor
    /// can never run off the end.
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        let terminated = matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof);
        if !terminated {
            let offset = tokens.last().map(|t| t.offset + t.len()).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, "", offset));
        }
        Self { tokens, index: 0 }
    }

    /// Parse the token sequence into a request tree.
    pub fn parse(mut self) -> Result<RequestNode, SyntaxError> {
        let slash = self.expect(TokenKind::Slash)?;
        let mut hierarchies = vec![self.parse_hierarchy(slash.offset)?];
        while self.check(TokenKind::Comma) {
            let comma = self.bump();
            hierarchies.push(self.parse_hierarchy(comma.offset)?);
        }
        self.expect(TokenKind::Eof)?;
        Ok(RequestNode {
            position: slash.offset,
            hierarchies,
        })
    }

    /// The token under the cursor. Always valid: the sequence ends with an
    /// end-of-input token the cursor never moves past.
    fn current(&self) -> &Token<'a> {
        &self.tokens[self.index]
    }

    /// Consume and return the current token.
    fn bump(&mut self) -> Token<'a> {
        let token = self.tokens[self.index].clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    /// Check the current token's kind without consuming it.
    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consume the current token if it has the expected kind, else fail.
    fn expect(&mut self, expected: TokenKind) -> Result<Token<'a>, SyntaxError> {
        if self.check(expected) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let found = self.current();
        SyntaxError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            position: found.offset,
        }
    }

    fn parse_hierarchy(&mut self, position: usize) -> Result<HierarchyNode, SyntaxError> {
        let mut entities = vec![self.parse_entity()?];
        while self.check(TokenKind::Dollar) {
            self.bump();
            entities.push(self.parse_entity()?);
        }
        Ok(HierarchyNode { position, entities })
    }

    fn parse_entity(&mut self) -> Result<EntityNode, SyntaxError> {
        let name = self.parse_word()?;
        self.expect(TokenKind::Colon)?;
        let mut attributes = vec![self.parse_attribute()?];
        while self.check(TokenKind::Ampersand) {
            self.bump();
            attributes.push(self.parse_attribute()?);
        }
        Ok(EntityNode {
            position: name.position,
            name,
            attributes,
        })
    }

    fn parse_attribute(&mut self) -> Result<AttributeNode, SyntaxError> {
        let name = self.parse_word()?;
        let position = name.position;
        self.expect(TokenKind::Equals)?;
        if self.value_is_numeric() {
            let values = self.parse_number_value()?;
            Ok(AttributeNode::Number(NumberAttributeNode {
                position,
                name,
                values,
            }))
        } else {
            let value = self.parse_string_value()?;
            Ok(AttributeNode::String(StringAttributeNode {
                position,
                name,
                value,
            }))
        }
    }

    fn parse_word(&mut self) -> Result<StringNode, SyntaxError> {
        let token = self.expect(TokenKind::Word)?;
        Ok(StringNode {
            position: token.offset,
            value: token.text.to_string(),
        })
    }

    /// Lookahead scan deciding the value form: numeric iff the tokens up to
    /// the next value boundary are a correctly alternating
    /// `DIGITS ('+' DIGITS)*` run.
    fn value_is_numeric(&self) -> bool {
        let mut index = self.index;
        if self.tokens[index].kind != TokenKind::Digits {
            return false;
        }
        index += 1;
        loop {
            match self.tokens[index].kind {
                kind if kind.is_value_boundary() => return true,
                TokenKind::Plus => {
                    index += 1;
                    if self.tokens[index].kind != TokenKind::Digits {
                        return false;
                    }
                    index += 1;
                }
                _ => return false,
            }
        }
    }

    fn parse_number_value(&mut self) -> Result<Vec<NumberNode>, SyntaxError> {
        let mut values = vec![self.parse_number()?];
        while self.check(TokenKind::Plus) {
            self.bump();
            values.push(self.parse_number()?);
        }
        Ok(values)
    }

    fn parse_number(&mut self) -> Result<NumberNode, SyntaxError> {
        let token = self.expect(TokenKind::Digits)?;
        let value = token
            .text
            .parse::<i64>()
            .map_err(|_| SyntaxError::NumberTooLarge {
                position: token.offset,
            })?;
        Ok(NumberNode {
            position: token.offset,
            value,
        })
    }

    fn parse_string_value(&mut self) -> Result<StringNode, SyntaxError> {
        if !self.current().kind.is_value_part() {
            return Err(self.unexpected("<word>, <digits> or '+'"));
        }
        let position = self.current().offset;
        let mut value = String::new();
        while self.current().kind.is_value_part() {
            let token = self.bump();
            match token.kind {
                TokenKind::Plus => value.push(' '),
                _ => value.push_str(token.text),
            }
        }
        Ok(StringNode { position, value })
    }
}

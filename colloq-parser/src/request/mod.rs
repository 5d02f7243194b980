//! Request path query language - lexer, parser and verifier
//!
//! This module provides the full front end for the path-embedded query
//! language: tokenization, parsing and semantic verification against the
//! domain schema.

mod ast;
mod lexer;
mod parser;
mod schema;
mod token;
mod verifier;

pub use ast::{
    AttributeNode, EntityNode, HierarchyNode, NumberAttributeNode, NumberNode, RequestNode,
    StringAttributeNode, StringNode,
};
pub use lexer::{tokenize, LexError, Lexer};
pub use parser::{Parser, SyntaxError};
pub use schema::{AttributeKind, AttributeTable, Schema};
pub use token::{Token, TokenKind};
pub use verifier::{verify, VerificationError};

use thiserror::Error;
use tracing::debug;

/// Any failure while handling one request path.
///
/// The three stages fail disjointly and the first failing stage's error is
/// the entire result for that request; nothing is retried and no partial
/// tree is returned. The error's `Display` message carries the offending
/// offset and is what the boundary layer returns as the response body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

/// Run the full pipeline on one request path: tokenize, parse, then verify
/// against the schema.
pub fn process(input: &str, schema: &Schema) -> Result<RequestNode, QueryError> {
    let tokens = tokenize(input)?;
    debug!(tokens = tokens.len(), "request path tokenized");
    let request = Parser::new(tokens).parse()?;
    verify(&request, schema)?;
    debug!(hierarchies = request.hierarchies.len(), "request verified");
    Ok(request)
}

//! Colloq request path parser
//!
//! The Colloq knowledge base exposes a single catch-all REST endpoint whose
//! entire query is encoded in the URL path. This crate is the language front
//! end that turns such a path string into a verified syntax tree: a lexer
//! with position tracking, a recursive-descent parser, and a semantic
//! verifier backed by the domain schema. The boundary layer hands the raw
//! path in and gets back either a verified tree (rendered or serialized as
//! the response) or a position-tagged error message.
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
//! A hierarchy is a join chain: its first entity is the type being queried,
//! later entities constrain it through the schema's relations.
//!
//! # Example
//!
//! ```rust
//! use colloq_parser::request::{process, Schema};
//!
//! let schema = Schema::knowledge_base();
//! let tree = process("/paper:topic=machine+translation", &schema).unwrap();
//! assert_eq!(tree.to_string(), "/paper:topic=machine translation");
//! ```

pub mod request;

// Re-export main types
pub use request::{process, QueryError, RequestNode, Schema};

//! AST types for parsed request paths
//!
//! These types represent the structured output of the request parser. Every
//! node records the byte offset at which it starts in the original path, and
//! equality is structural: two trees compare equal only when their node
//! kinds, field values and positions all match. This is what lets tests
//! assert against a hand-built expected tree.
//!
//! # Example
//!
//! ```text
//! "/paper:author=Daniel+Klingbein&topic=vogonpoetry$author:obit=1993+05+22"
//! ```
//!
//! Parses to one hierarchy of two entities:
//! - `paper` with string attributes `author = "Daniel Klingbein"` and
//!   `topic = "vogonpoetry"`
//! - joined to `author` with number attribute `obit = [1993, 5, 22]`
//!
//! The `Display` impls render a tree back to its canonical textual form
//! (decoded: encoded `+` separators shown as spaces inside string values,
//! numbers without leading zeros); this rendering is what the boundary layer
//! currently returns as the response body.

use std::fmt;

use serde::Serialize;

/// The root of a parsed request: one or more comma-separated hierarchies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestNode {
    /// Byte offset of the leading slash
    pub position: usize,
    /// The comma-separated query groups; never empty after a successful parse
    pub hierarchies: Vec<HierarchyNode>,
}

impl fmt::Display for RequestNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for (i, hierarchy) in self.hierarchies.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", hierarchy)?;
        }
        Ok(())
    }
}

/// One dollar-chained join path within a request.
///
/// The first entity is the anchor type ultimately being queried; later
/// entities constrain it through joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    /// Byte offset of the delimiter that introduced this hierarchy (the
    /// slash for the first one, the comma for subsequent ones)
    pub position: usize,
    /// The join chain; never empty after a successful parse
    pub entities: Vec<EntityNode>,
}

impl HierarchyNode {
    /// The entity type ultimately being queried, if the chain is non-empty.
    pub fn anchor(&self) -> Option<&EntityNode> {
        self.entities.first()
    }
}

impl fmt::Display for HierarchyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entity) in self.entities.iter().enumerate() {
            if i > 0 {
                write!(f, "$")?;
            }
            write!(f, "{}", entity)?;
        }
        Ok(())
    }
}

/// A named entity type together with its attribute filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityNode {
    /// Byte offset of the entity name
    pub position: usize,
    /// The entity-type name
    pub name: StringNode,
    /// Ampersand-separated attribute filters; never empty after a
    /// successful parse
    pub attributes: Vec<AttributeNode>,
}

impl fmt::Display for EntityNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (i, attribute) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{}", attribute)?;
        }
        Ok(())
    }
}

/// An attribute filter, either string- or number-valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeNode {
    String(StringAttributeNode),
    Number(NumberAttributeNode),
}

impl AttributeNode {
    /// Byte offset of the attribute name
    pub fn position(&self) -> usize {
        match self {
            AttributeNode::String(attribute) => attribute.position,
            AttributeNode::Number(attribute) => attribute.position,
        }
    }

    /// The attribute name
    pub fn name(&self) -> &StringNode {
        match self {
            AttributeNode::String(attribute) => &attribute.name,
            AttributeNode::Number(attribute) => &attribute.name,
        }
    }
}

impl fmt::Display for AttributeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeNode::String(attribute) => attribute.fmt(f),
            AttributeNode::Number(attribute) => attribute.fmt(f),
        }
    }
}

/// An attribute constrained to a single decoded string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringAttributeNode {
    /// Byte offset of the attribute name
    pub position: usize,
    pub name: StringNode,
    pub value: StringNode,
}

impl fmt::Display for StringAttributeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// An attribute constrained to one or more plus-separated integer values
/// (composite values such as year+month+day keep their order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberAttributeNode {
    /// Byte offset of the attribute name
    pub position: usize,
    pub name: StringNode,
    /// Left-to-right value groups; never empty after a successful parse
    pub values: Vec<NumberNode>,
}

impl fmt::Display for NumberAttributeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// A decoded string literal (encoded `+` separators become spaces).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringNode {
    /// Byte offset of the literal's first token
    pub position: usize,
    pub value: String,
}

impl fmt::Display for StringNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A decoded integer literal. Leading zeros in the source are not
/// significant: `05` denotes 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberNode {
    /// Byte offset of the literal's digits
    pub position: usize,
    pub value: i64,
}

impl fmt::Display for NumberNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

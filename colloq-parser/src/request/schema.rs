//! Domain schema the verifier checks parsed requests against
//!
//! Uses compile-time perfect hashing (phf) for O(1) attribute lookup. The
//! tables describe the knowledge-base vocabulary: which entity types exist,
//! which attributes each carries and of what kind, and which entity-type
//! pairs may appear adjacent within a join chain.

use std::fmt;

use phf::phf_map;

/// The value kind an attribute accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// A single plus-decoded string value
    Text,
    /// One or more plus-separated integer values (dates are year+month+day)
    Numeric,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Text => write!(f, "text"),
            AttributeKind::Numeric => write!(f, "numeric"),
        }
    }
}

/// Attribute name -> declared kind, for one entity type
pub type AttributeTable = phf::Map<&'static str, AttributeKind>;

static PAPER: AttributeTable = phf_map! {
    "author" => AttributeKind::Text,
    "topic" => AttributeKind::Text,
    "title" => AttributeKind::Text,
    "anthology" => AttributeKind::Text,
    "href" => AttributeKind::Text,
    "pdfFileSize" => AttributeKind::Numeric,
    "releaseDate" => AttributeKind::Numeric,
};

static AUTHOR: AttributeTable = phf_map! {
    "name" => AttributeKind::Text,
    "institution" => AttributeKind::Text,
    "birthdate" => AttributeKind::Numeric,
    "obit" => AttributeKind::Numeric,
};

static INSTITUTION: AttributeTable = phf_map! {
    "name" => AttributeKind::Text,
    "country" => AttributeKind::Text,
};

static CONFERENCE: AttributeTable = phf_map! {
    "name" => AttributeKind::Text,
    "city" => AttributeKind::Text,
    "country" => AttributeKind::Text,
    "begin" => AttributeKind::Numeric,
    "end" => AttributeKind::Numeric,
};

static SESSION: AttributeTable = phf_map! {
    "title" => AttributeKind::Text,
    "place" => AttributeKind::Text,
    "description" => AttributeKind::Text,
    "begin" => AttributeKind::Numeric,
    "end" => AttributeKind::Numeric,
};

/// Entity type name -> attribute table
static ENTITIES: phf::Map<&'static str, &'static AttributeTable> = phf_map! {
    "paper" => &PAPER,
    "author" => &AUTHOR,
    "institution" => &INSTITUTION,
    "conference" => &CONFERENCE,
    "session" => &SESSION,
};

/// Ordered entity-type pairs that may appear adjacent within a hierarchy.
/// Every relation is navigable in both directions, so both orders are
/// listed.
static RELATIONS: &[(&str, &str)] = &[
    ("paper", "author"),
    ("author", "paper"),
    ("paper", "conference"),
    ("conference", "paper"),
    ("paper", "session"),
    ("session", "paper"),
    ("author", "institution"),
    ("institution", "author"),
    ("conference", "session"),
    ("session", "conference"),
];

/// The immutable domain schema.
///
/// Constructed once at startup and passed by reference into the verifier;
/// concurrent requests may read it without locking.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    entities: &'static phf::Map<&'static str, &'static AttributeTable>,
    relations: &'static [(&'static str, &'static str)],
}

impl Schema {
    /// The standard Colloq knowledge-base schema.
    pub fn knowledge_base() -> Self {
        Self {
            entities: &ENTITIES,
            relations: RELATIONS,
        }
    }

    /// Look up the attribute table for an entity type.
    pub fn entity(&self, name: &str) -> Option<&'static AttributeTable> {
        self.entities.get(name).copied()
    }

    /// Look up the declared kind of one attribute of one entity type.
    pub fn attribute(&self, entity: &str, attribute: &str) -> Option<AttributeKind> {
        self.entity(entity)
            .and_then(|table| table.get(attribute).copied())
    }

    /// Check whether `from` may be joined directly to `to` within a
    /// hierarchy chain.
    pub fn joinable(&self, from: &str, to: &str) -> bool {
        self.relations.iter().any(|&(a, b)| a == from && b == to)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::knowledge_base()
    }
}

//! Semantic verifier for parsed request paths
//!
//! A syntactically valid tree can still be meaningless: it may name an
//! entity type the knowledge base does not have, filter on an unknown
//! attribute, supply a string where a date is declared, or join two entity
//! types that are unrelated. This pass checks the tree against the domain
//! schema and reports the first violation, scanning hierarchies in order,
//! entities within a hierarchy in order, and attributes within an entity in
//! order. It is purely validating: the tree is never modified.

use thiserror::Error;

use super::ast::{AttributeNode, RequestNode};
use super::schema::{AttributeKind, Schema};

/// Verification errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The entity type is not part of the domain schema
    #[error("unknown entity type '{name}' at position {position}")]
    UnknownEntityType { name: String, position: usize },

    /// Two adjacent entity types in a hierarchy have no relation
    #[error("'{from}' cannot be joined with '{to}' at position {position}")]
    InvalidJoin {
        from: String,
        to: String,
        position: usize,
    },

    /// The attribute is not declared for the entity type
    #[error("unknown attribute '{attribute}' for entity type '{entity}' at position {position}")]
    UnknownAttribute {
        entity: String,
        attribute: String,
        position: usize,
    },

    /// The supplied value kind contradicts the declared attribute kind
    #[error(
        "attribute '{attribute}' of entity type '{entity}' expects a {expected} value at position {position}"
    )]
    AttributeTypeMismatch {
        entity: String,
        attribute: String,
        expected: AttributeKind,
        position: usize,
    },
}

/// Check a parsed request against the domain schema.
///
/// Per entity, in order: the entity type must be known; if the entity is not
/// the first in its hierarchy, the (previous, current) type pair must be a
/// legal join; every attribute must be declared for the type; and every
/// attribute's parsed kind must match its declared kind. The first violation
/// is the result.
pub fn verify(request: &RequestNode, schema: &Schema) -> Result<(), VerificationError> {
    for hierarchy in &request.hierarchies {
        let mut previous: Option<&str> = None;
        for entity in &hierarchy.entities {
            let entity_name = entity.name.value.as_str();
            let table = schema
                .entity(entity_name)
                .ok_or_else(|| VerificationError::UnknownEntityType {
                    name: entity_name.to_string(),
                    position: entity.position,
                })?;

            if let Some(from) = previous {
                if !schema.joinable(from, entity_name) {
                    return Err(VerificationError::InvalidJoin {
                        from: from.to_string(),
                        to: entity_name.to_string(),
                        position: entity.position,
                    });
                }
            }

            for attribute in &entity.attributes {
                let attribute_name = attribute.name().value.as_str();
                let declared = table.get(attribute_name).copied().ok_or_else(|| {
                    VerificationError::UnknownAttribute {
                        entity: entity_name.to_string(),
                        attribute: attribute_name.to_string(),
                        position: attribute.position(),
                    }
                })?;

                let supplied_matches = match attribute {
                    AttributeNode::String(_) => declared == AttributeKind::Text,
                    AttributeNode::Number(_) => declared == AttributeKind::Numeric,
                };
                if !supplied_matches {
                    return Err(VerificationError::AttributeTypeMismatch {
                        entity: entity_name.to_string(),
                        attribute: attribute_name.to_string(),
                        expected: declared,
                        position: attribute.position(),
                    });
                }
            }

            previous = Some(entity_name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::lexer::tokenize;
    use crate::request::parser::Parser;

    fn check(input: &str) -> Result<(), VerificationError> {
        let request = Parser::new(tokenize(input).unwrap()).parse().unwrap();
        verify(&request, &Schema::knowledge_base())
    }

    #[test]
    fn test_valid_request() {
        check("/paper:author=Daniel+Klingbein&topic=vogonpoetry$author:obit=1993+05+22")
            .unwrap();
    }

    #[test]
    fn test_unknown_entity_type() {
        let err = check("/spaceship:warpFactor=9").unwrap_err();
        assert_eq!(
            err,
            VerificationError::UnknownEntityType {
                name: "spaceship".to_string(),
                position: 1,
            }
        );
    }

    #[test]
    fn test_unknown_attribute() {
        let err = check("/paper:flavor=sweet").unwrap_err();
        assert_eq!(
            err,
            VerificationError::UnknownAttribute {
                entity: "paper".to_string(),
                attribute: "flavor".to_string(),
                position: 7,
            }
        );
    }

    #[test]
    fn test_string_value_for_numeric_attribute() {
        let err = check("/author:obit=unknown").unwrap_err();
        assert_eq!(
            err,
            VerificationError::AttributeTypeMismatch {
                entity: "author".to_string(),
                attribute: "obit".to_string(),
                expected: AttributeKind::Numeric,
                position: 8,
            }
        );
    }

    #[test]
    fn test_number_value_for_text_attribute() {
        let err = check("/paper:title=42").unwrap_err();
        assert_eq!(
            err,
            VerificationError::AttributeTypeMismatch {
                entity: "paper".to_string(),
                attribute: "title".to_string(),
                expected: AttributeKind::Text,
                position: 7,
            }
        );
    }

    #[test]
    fn test_invalid_join() {
        let err = check("/author:name=Lehmann$session:title=opening").unwrap_err();
        assert_eq!(
            err,
            VerificationError::InvalidJoin {
                from: "author".to_string(),
                to: "session".to_string(),
                position: 21,
            }
        );
    }

    #[test]
    fn test_valid_join_chain() {
        check("/paper:topic=parsing$author:name=Lehmann$institution:country=germany").unwrap();
    }

    #[test]
    fn test_first_entity_needs_no_relation() {
        check("/institution:name=ukp").unwrap();
    }

    #[test]
    fn test_hierarchies_are_validated_independently() {
        // The same entity may be queried in several hierarchies; no
        // deduplication or cross-hierarchy checks happen.
        check("/paper:topic=parsing,paper:topic=parsing").unwrap();
    }

    #[test]
    fn test_first_violation_wins_across_attributes() {
        // "flavor" is scanned before the type mismatch on "releaseDate".
        let err = check("/paper:flavor=sweet&releaseDate=soon").unwrap_err();
        assert!(matches!(err, VerificationError::UnknownAttribute { ref attribute, .. } if attribute == "flavor"));
    }

    #[test]
    fn test_first_violation_wins_across_hierarchies() {
        let err = check("/spaceship:warpFactor=9,paper:flavor=sweet").unwrap_err();
        assert!(matches!(err, VerificationError::UnknownEntityType { ref name, .. } if name == "spaceship"));
    }

    #[test]
    fn test_error_messages_carry_position_and_rule() {
        let err = check("/spaceship:warpFactor=9").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown entity type 'spaceship' at position 1"
        );

        let err = check("/author:obit=unknown").unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute 'obit' of entity type 'author' expects a numeric value at position 8"
        );
    }
}

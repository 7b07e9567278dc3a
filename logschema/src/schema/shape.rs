// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Declarative message-shape detection
//!
//! Each [`ShapeRule`] pairs a predicate over a message description with the shape it
//! implies. Rules are evaluated in order and the first match wins; a message that matches
//! none is expanded structurally.

use crate::descriptor::{FieldDescriptor, FieldType, MessageDescriptor};
use crate::schema::vocabulary::ShapeVocabulary;

/// Flavour of an attribute bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BagFlavor {
    /// Members enumerated in the schema; many instances in a repeated field
    List,
    /// Single placeholder member; the identifying integer is supplied at resolution time
    Map,
}

/// What a message type turns into in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageShape {
    Structural,
    AttributeBag(BagFlavor),
    KeyedRecords,
}

/// Kind constraint on a required field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Any,
    Scalar,
    Integer,
}

impl FieldKind {
    fn accepts(&self, field: &FieldDescriptor) -> bool {
        match self {
            FieldKind::Any => true,
            FieldKind::Scalar => matches!(field.field_type, FieldType::Scalar { .. }),
            FieldKind::Integer => field.scalar_type().is_some_and(|s| s.is_integer()),
        }
    }
}

/// A field that must be present, by name and kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRequirement {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldRequirement {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    fn is_met_by(&self, descriptor: &MessageDescriptor) -> bool {
        descriptor
            .field(&self.name)
            .is_some_and(|field| self.kind.accepts(field))
    }
}

/// Predicate half of a shape rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapePredicate {
    /// Every listed field is present with the required kind
    HasFields(Vec<FieldRequirement>),
    /// The message type name is one of a closed list
    TypeNameIn(Vec<String>),
}

impl ShapePredicate {
    fn matches(&self, descriptor: &MessageDescriptor) -> bool {
        match self {
            ShapePredicate::HasFields(required) => {
                !required.is_empty() && required.iter().all(|r| r.is_met_by(descriptor))
            }
            ShapePredicate::TypeNameIn(names) => names.iter().any(|n| *n == descriptor.name),
        }
    }
}

/// Shape produced when a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Attribute bag; flavour decided by the type name
    AttributeBag,
    KeyedRecords,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeRule {
    pub predicate: ShapePredicate,
    pub outcome: RuleOutcome,
}

/// Ordered rule table built from a vocabulary
#[derive(Debug, Clone)]
pub struct ShapeMatcher {
    rules: Vec<ShapeRule>,
    map_flavor_types: Vec<String>,
}

impl ShapeMatcher {
    pub fn from_vocabulary(vocabulary: &ShapeVocabulary) -> Self {
        let rules = vec![
            ShapeRule {
                predicate: ShapePredicate::HasFields(vec![
                    FieldRequirement::new(&vocabulary.selector_field, FieldKind::Integer),
                    FieldRequirement::new(&vocabulary.value_field, FieldKind::Scalar),
                ]),
                outcome: RuleOutcome::AttributeBag,
            },
            ShapeRule {
                predicate: ShapePredicate::TypeNameIn(vocabulary.keyed_record_types.clone()),
                outcome: RuleOutcome::KeyedRecords,
            },
        ];

        Self {
            rules,
            map_flavor_types: vocabulary.map_flavor_types.clone(),
        }
    }

    pub fn rules(&self) -> &[ShapeRule] {
        &self.rules
    }

    /// Classify a message type; evaluated once per message-typed field during construction
    pub fn classify(&self, descriptor: &MessageDescriptor) -> MessageShape {
        let outcome = self
            .rules
            .iter()
            .find(|rule| rule.predicate.matches(descriptor))
            .map(|rule| rule.outcome);

        match outcome {
            Some(RuleOutcome::AttributeBag) => MessageShape::AttributeBag(self.flavor_of(descriptor)),
            Some(RuleOutcome::KeyedRecords) => MessageShape::KeyedRecords,
            None => MessageShape::Structural,
        }
    }

    /// Attribute-bag test on its own
    pub fn classify_attribute_bag(&self, descriptor: &MessageDescriptor) -> Option<BagFlavor> {
        match self.classify(descriptor) {
            MessageShape::AttributeBag(flavor) => Some(flavor),
            _ => None,
        }
    }

    fn flavor_of(&self, descriptor: &MessageDescriptor) -> BagFlavor {
        if self.map_flavor_types.iter().any(|t| *t == descriptor.name) {
            BagFlavor::Map
        } else {
            BagFlavor::List
        }
    }
}

impl Default for ShapeMatcher {
    fn default() -> Self {
        Self::from_vocabulary(&ShapeVocabulary::default())
    }
}

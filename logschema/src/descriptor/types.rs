// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Core descriptor type definitions for log message schemas

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::schema::{SchemaError, SchemaResult};

/// Scalar wire types that a field or map key can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Float,
    Double,
    Bool,
    String,
    Bytes,
}

impl ScalarType {
    /// Protobuf-style type name, e.g. `int64`
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Sint32 => "sint32",
            ScalarType::Sint64 => "sint64",
            ScalarType::Fixed32 => "fixed32",
            ScalarType::Fixed64 => "fixed64",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::Bool => "bool",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ScalarType::Int32
                | ScalarType::Int64
                | ScalarType::Uint32
                | ScalarType::Uint64
                | ScalarType::Sint32
                | ScalarType::Sint64
                | ScalarType::Fixed32
                | ScalarType::Fixed64
        )
    }
}

/// Field cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    #[default]
    Singular,
    Repeated,
}

/// One member of an enum declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// An enum declaration, either nested in a message or referenced by a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, number: i64) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            number,
            comment: None,
        });
        self
    }

    pub fn with_commented_value(
        mut self,
        name: impl Into<String>,
        number: i64,
        comment: impl Into<String>,
    ) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            number,
            comment: Some(comment.into()),
        });
        self
    }

    pub fn value_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// The declared type of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldType {
    Scalar { scalar: ScalarType },
    Enum { enum_type: EnumDescriptor },
    Message { message: Arc<MessageDescriptor> },
    Map { key: ScalarType, value: Box<FieldType> },
    /// Legacy aggregate with no structural meaning for the tree
    Group,
}

impl FieldType {
    /// Protobuf-style type name; map fields report `message` like their synthetic entry type
    pub fn type_name(&self) -> &str {
        match self {
            FieldType::Scalar { scalar } => scalar.type_name(),
            FieldType::Enum { .. } => "enum",
            FieldType::Message { .. } | FieldType::Map { .. } => "message",
            FieldType::Group => "group",
        }
    }

    /// Scalars and enums; anything that needs no further recursion
    pub fn is_basic(&self) -> bool {
        matches!(self, FieldType::Scalar { .. } | FieldType::Enum { .. })
    }
}

/// One field of a message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub number: i32,
    #[serde(default)]
    pub cardinality: Cardinality,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, number: i32, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            number,
            cardinality: Cardinality::Singular,
            field_type,
            comment: None,
        }
    }

    pub fn scalar(name: impl Into<String>, number: i32, scalar: ScalarType) -> Self {
        Self::new(name, number, FieldType::Scalar { scalar })
    }

    pub fn repeated_scalar(name: impl Into<String>, number: i32, scalar: ScalarType) -> Self {
        Self::scalar(name, number, scalar).repeated()
    }

    pub fn enumeration(name: impl Into<String>, number: i32, enum_type: EnumDescriptor) -> Self {
        Self::new(name, number, FieldType::Enum { enum_type })
    }

    pub fn message(
        name: impl Into<String>,
        number: i32,
        message: Arc<MessageDescriptor>,
    ) -> Self {
        Self::new(name, number, FieldType::Message { message })
    }

    pub fn repeated_message(
        name: impl Into<String>,
        number: i32,
        message: Arc<MessageDescriptor>,
    ) -> Self {
        Self::message(name, number, message).repeated()
    }

    pub fn map(name: impl Into<String>, number: i32, key: ScalarType, value: FieldType) -> Self {
        Self::new(
            name,
            number,
            FieldType::Map {
                key,
                value: Box::new(value),
            },
        )
    }

    pub fn group(name: impl Into<String>, number: i32) -> Self {
        Self::new(name, number, FieldType::Group)
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    pub fn is_map(&self) -> bool {
        matches!(self.field_type, FieldType::Map { .. })
    }

    pub fn type_name(&self) -> &str {
        self.field_type.type_name()
    }

    pub fn enum_type(&self) -> Option<&EnumDescriptor> {
        match &self.field_type {
            FieldType::Enum { enum_type } => Some(enum_type),
            _ => None,
        }
    }

    pub fn message_type(&self) -> Option<&Arc<MessageDescriptor>> {
        match &self.field_type {
            FieldType::Message { message } => Some(message),
            _ => None,
        }
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match &self.field_type {
            FieldType::Scalar { scalar } => Some(*scalar),
            _ => None,
        }
    }
}

/// A message type: ordered fields plus nested enum declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
}

impl MessageDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_enum(mut self, enum_type: EnumDescriptor) -> Self {
        self.enums.push(enum_type);
        self
    }

    /// Wrap in an `Arc` so several fields can share the type
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Load a description from its JSON form and validate it
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let descriptor: MessageDescriptor = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check names are present and unique per message, recursively
    pub fn validate(&self) -> SchemaResult<()> {
        if self.name.is_empty() {
            return Err(SchemaError::InvalidDescriptor(
                "message type with empty name".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::InvalidDescriptor(format!(
                    "field #{} of '{}' has an empty name",
                    field.number, self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::InvalidDescriptor(format!(
                    "duplicate field '{}' in '{}'",
                    field.name, self.name
                )));
            }
            validate_field_type(&field.field_type, &self.name, &field.name)?;
        }

        for enum_type in &self.enums {
            if enum_type.name.is_empty() {
                return Err(SchemaError::InvalidDescriptor(format!(
                    "nested enum with empty name in '{}'",
                    self.name
                )));
            }
        }

        Ok(())
    }
}

fn validate_field_type(field_type: &FieldType, message: &str, field: &str) -> SchemaResult<()> {
    match field_type {
        FieldType::Message { message: nested } => nested.validate(),
        FieldType::Map { value, .. } => match value.as_ref() {
            FieldType::Map { .. } | FieldType::Group => Err(SchemaError::InvalidDescriptor(
                format!("map field '{}.{}' has an unsupported value type", message, field),
            )),
            other => validate_field_type(other, message, field),
        },
        FieldType::Enum { enum_type } if enum_type.name.is_empty() => Err(
            SchemaError::InvalidDescriptor(format!("enum field '{}.{}' has no type name", message, field)),
        ),
        _ => Ok(()),
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Field detail: canonical path plus attribute id and value type

use serde::{Deserialize, Serialize};

use super::resolver::ResolvedPath;
use super::types::PathKind;
use crate::schema::RenderError;

const INT64_TYPES: &[&str] = &["int32_t", "int", "int64", "uint64", "int64_t", "uint64_t"];
const INT64_LIST_TYPES: &[&str] = &["int_list", "int64_list"];
const FLOAT_TYPES: &[&str] = &["float", "double"];
const FLOAT_LIST_TYPES: &[&str] = &["float_list", "double_list"];
const STR_TYPES: &[&str] = &["str", "string", "std::string", "absl::string_view"];
const STR_LIST_TYPES: &[&str] = &[
    "str_list",
    "string_list",
    "std::vector<std::string>",
    "std::vector<absl::string_view>",
];

/// What the rewriting layer needs to know about one referenced field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetail {
    path: String,
    attr_id: i64,
    type_str: String,
}

impl FieldDetail {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(path: impl Into<String>, attr_id: i64, type_str: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attr_id,
            type_str: type_str.into(),
        }
    }

    /// Detail of a resolution result; attribute entries carry their member number as id,
    /// or the supplied key for a map-flavour bag
    pub fn from_resolved(resolved: &ResolvedPath<'_>) -> Result<Self, RenderError> {
        let attr_id = match resolved.kind() {
            PathKind::AttributeEntry => resolved
                .label_key()
                .unwrap_or_else(|| resolved.node().ordinal()),
            _ => 0,
        };
        Ok(Self::with_attribute(
            resolved.source_path()?,
            attr_id,
            resolved.declared_type(),
        ))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn attr_id(&self) -> i64 {
        self.attr_id
    }

    pub fn attr_id_str(&self) -> String {
        self.attr_id.to_string()
    }

    pub fn type_str(&self) -> &str {
        &self.type_str
    }

    pub fn set_attr_id(&mut self, attr_id: i64) {
        self.attr_id = attr_id;
    }

    pub fn set_type_str(&mut self, type_str: impl Into<String>) {
        self.type_str = type_str.into();
    }

    pub fn is_valid(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn is_int64(&self) -> bool {
        INT64_TYPES.contains(&self.type_str.as_str())
    }

    pub fn is_int64_list(&self) -> bool {
        INT64_LIST_TYPES.contains(&self.type_str.as_str())
    }

    pub fn is_float(&self) -> bool {
        FLOAT_TYPES.contains(&self.type_str.as_str())
    }

    pub fn is_float_list(&self) -> bool {
        FLOAT_LIST_TYPES.contains(&self.type_str.as_str())
    }

    pub fn is_str(&self) -> bool {
        STR_TYPES.contains(&self.type_str.as_str())
    }

    pub fn is_str_list(&self) -> bool {
        STR_LIST_TYPES.contains(&self.type_str.as_str())
    }

    pub fn is_user_field(&self) -> bool {
        self.scope().is_some_and(|s| s.starts_with("user"))
    }

    pub fn is_context_field(&self) -> bool {
        self.scope().is_some_and(|s| s.starts_with("context"))
    }

    pub fn is_item_field(&self) -> bool {
        self.scope().is_some_and(|s| s.starts_with("item"))
    }

    /// First segment below the root
    fn scope(&self) -> Option<&str> {
        self.path.split('.').nth(1)
    }
}

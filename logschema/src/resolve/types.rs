// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Value types attached to a resolution result

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a resolved path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PathKind {
    /// Ordinary field reached through plain nesting
    Normal,
    /// One member of an attribute bag, selected by name or by `key:<int>`
    AttributeEntry,
    /// A whole attribute bag or keyed collection
    CollectionList,
    /// A field inside one record of a keyed collection; the key travels separately
    CollectionLeaf,
    /// A whole label map
    LabelMapWhole,
    /// The label map entry for an externally supplied key
    LabelMapLeaf,
    /// An enum-derived leaf
    Enum,
    #[default]
    None,
}

/// Closed vocabulary of trailing `:type` tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Int,
    Int64,
    Uint,
    Uint64,
    Float,
    Str,
    String,
    Bool,
    IntList,
    Int64List,
    UintList,
    Uint64List,
    FloatList,
    StrList,
    StringList,
    MapInt64Int64,
    MapIntInt,
    MapIntFloat,
    MapInt64Float,
    MapIntString,
    MapInt64String,
    MapIntBool,
    MapInt64Bool,
    MapUint64Bool,
    /// Misspelled variant that occurs in existing feature code
    MapUnit64Bool,
}

impl TypeTag {
    pub const ALL: [TypeTag; 25] = [
        TypeTag::Int,
        TypeTag::Int64,
        TypeTag::Uint,
        TypeTag::Uint64,
        TypeTag::Float,
        TypeTag::Str,
        TypeTag::String,
        TypeTag::Bool,
        TypeTag::IntList,
        TypeTag::Int64List,
        TypeTag::UintList,
        TypeTag::Uint64List,
        TypeTag::FloatList,
        TypeTag::StrList,
        TypeTag::StringList,
        TypeTag::MapInt64Int64,
        TypeTag::MapIntInt,
        TypeTag::MapIntFloat,
        TypeTag::MapInt64Float,
        TypeTag::MapIntString,
        TypeTag::MapInt64String,
        TypeTag::MapIntBool,
        TypeTag::MapInt64Bool,
        TypeTag::MapUint64Bool,
        TypeTag::MapUnit64Bool,
    ];

    /// Parse a tag exactly as written in a path; anything else is not a type tag
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Int64 => "int64",
            TypeTag::Uint => "uint",
            TypeTag::Uint64 => "uint64",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
            TypeTag::String => "string",
            TypeTag::Bool => "bool",
            TypeTag::IntList => "int_list",
            TypeTag::Int64List => "int64_list",
            TypeTag::UintList => "uint_list",
            TypeTag::Uint64List => "uint64_list",
            TypeTag::FloatList => "float_list",
            TypeTag::StrList => "str_list",
            TypeTag::StringList => "string_list",
            TypeTag::MapInt64Int64 => "map_int64_int64",
            TypeTag::MapIntInt => "map_int_int",
            TypeTag::MapIntFloat => "map_int_float",
            TypeTag::MapInt64Float => "map_int64_float",
            TypeTag::MapIntString => "map_int_string",
            TypeTag::MapInt64String => "map_int64_string",
            TypeTag::MapIntBool => "map_int_bool",
            TypeTag::MapInt64Bool => "map_int64_bool",
            TypeTag::MapUint64Bool => "map_uint64_bool",
            TypeTag::MapUnit64Bool => "map_unit64_bool",
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(
            self,
            TypeTag::Int | TypeTag::Int64 | TypeTag::Uint | TypeTag::Uint64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, TypeTag::Float)
    }

    pub fn is_str(&self) -> bool {
        matches!(self, TypeTag::Str | TypeTag::String)
    }

    pub fn is_list(&self) -> bool {
        self.as_str().ends_with("_list")
    }

    pub fn is_map(&self) -> bool {
        self.as_str().starts_with("map_")
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Closed vocabularies used to classify message types during tree construction

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Naming conventions of the log schema family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeVocabulary {
    /// Field whose presence marks an attribute bag (holds the attribute id)
    pub selector_field: String,

    /// Value field that must accompany the selector
    pub value_field: String,

    /// Prefix of nested enums that enumerate attribute ids (`Name`, `NameExtendOne`, ...)
    pub member_enum_prefix: String,

    /// Attribute bag types whose single placeholder member stands for an external key
    pub map_flavor_types: Vec<String>,

    /// Record types that form runtime-keyed collections
    pub keyed_record_types: Vec<String>,

    /// The list field inside a keyed record whose children feed the leaf type index
    pub record_list_field: String,

    /// Fields kept as opaque leaves and never expanded
    pub passthrough_fields: Vec<String>,

    /// Field name to the fixed flattened path it renders as
    pub flattened_aliases: BTreeMap<String, String>,
}

impl Default for ShapeVocabulary {
    fn default() -> Self {
        Self {
            selector_field: "name_value".to_string(),
            value_field: "int_value".to_string(),
            member_enum_prefix: "Name".to_string(),
            map_flavor_types: vec!["LabelAttr".to_string()],
            keyed_record_types: [
                "SimpleAdDspInfos",
                "SimpleAdDspInfosV2",
                "SimpleFansTopInfos",
                "SimpleLiveInfos",
                "AdActionInfoList",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            record_list_field: "list".to_string(),
            passthrough_fields: vec!["serialized_reco_user_info".to_string()],
            flattened_aliases: [
                ("tube_item_info", "item_tube_item_info"),
                ("tube_user_info", "user_info_tube_user_info"),
            ]
            .iter()
            .map(|(field, alias)| (field.to_string(), alias.to_string()))
            .collect(),
        }
    }
}

impl ShapeVocabulary {
    pub fn is_map_flavor(&self, type_name: &str) -> bool {
        self.map_flavor_types.iter().any(|t| t == type_name)
    }

    pub fn is_keyed_record(&self, type_name: &str) -> bool {
        self.keyed_record_types.iter().any(|t| t == type_name)
    }

    pub fn is_member_enum(&self, enum_name: &str) -> bool {
        enum_name.starts_with(&self.member_enum_prefix)
    }

    pub fn is_passthrough(&self, field_name: &str) -> bool {
        self.passthrough_fields.iter().any(|f| f == field_name)
    }

    pub fn flattened_alias(&self, field_name: &str) -> Option<&str> {
        self.flattened_aliases.get(field_name).map(String::as_str)
    }

    /// Add a keyed record type name
    pub fn with_keyed_record_type(mut self, type_name: impl Into<String>) -> Self {
        self.keyed_record_types.push(type_name.into());
        self
    }

    /// Add a map-flavour attribute bag type name
    pub fn with_map_flavor_type(mut self, type_name: impl Into<String>) -> Self {
        self.map_flavor_types.push(type_name.into());
        self
    }
}

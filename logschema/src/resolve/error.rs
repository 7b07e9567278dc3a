// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Path resolution error types

use thiserror::Error;

/// Why a path did not resolve
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Empty path")]
    EmptyPath,

    #[error("Malformed path '{path}': {reason}")]
    Grammar { path: String, reason: String },

    #[error("Path '{path}' has {count} key markers, at most one is supported")]
    MultipleKeys { path: String, count: usize },

    #[error("Path should start with '{expected}', but is '{found}'")]
    RootMismatch { expected: String, found: String },

    #[error("No field '{field}' under '{parent}'")]
    UnknownField { parent: String, field: String },

    #[error("Unexpected key:{key} under '{parent}'")]
    UnexpectedKey { parent: String, key: i64 },

    #[error("Wrong format under attribute bag '{bag}', should be enum name or key:<int>, but is '{remainder}'")]
    MalformedAttributeRemainder { bag: String, remainder: String },

    #[error("No member '{member}' in attribute bag '{bag}'")]
    UnknownMember { bag: String, member: String },

    #[error("Attribute bag '{bag}' has no key:{key} and synthesis is disabled")]
    MissingAttributeKey { bag: String, key: i64 },

    #[error("Wrong format for keyed collection '{collection}', should be key:<int>, but is '{remainder}'")]
    MalformedCollectionRemainder {
        collection: String,
        remainder: String,
    },

    #[error("Wrong format for label map '{map}', should be key:<int>, but is '{remainder}'")]
    MalformedLabelRemainder { map: String, remainder: String },

    #[error("Label map '{map}' has no placeholder member")]
    LabelIndexMissing { map: String },

    #[error("Path '{path}' refers to a field outside the schema")]
    Opaque { path: String },
}

impl ResolveError {
    /// True for failures that are expected and must stay silent
    pub fn is_expected(&self) -> bool {
        matches!(self, ResolveError::Opaque { .. })
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

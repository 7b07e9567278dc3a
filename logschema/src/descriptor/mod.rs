// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Descriptor module - reflective description of log message types
//
// The tree builder consumes these descriptions the way a protobuf reflection API would be
// consumed: message types with ordered fields, nested enum declarations, and map/repeated
// qualifiers. Loading them from an IDL is the caller's business.

pub mod types;

pub use types::{
    Cardinality, EnumDescriptor, EnumValue, FieldDescriptor, FieldType, MessageDescriptor,
    ScalarType,
};

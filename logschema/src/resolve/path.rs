// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Field path grammar
//!
//! ```text
//! path     := body [ ":" type-tag ]
//! body     := segment { "." segment }
//! segment  := "key:" digits | name
//! name     := one or more characters other than "." and ":"
//! ```
//!
//! The only `:` allowed inside the body is the one in a `key:<int>` marker. A trailing
//! `:<tag>` is stripped only when the tag belongs to the closed [`TypeTag`] vocabulary.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res},
    multi::separated_list1,
    sequence::preceded,
    IResult,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::error::{ResolveError, ResolveResult};
use super::types::TypeTag;

static KEY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^key[_:](\d+)([_.]key|[_.]value)?").expect("key prefix pattern is valid")
});

static KEY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[._])key[_:]\d+").expect("key marker pattern is valid"));

/// One element of a parsed path body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(String),
    Key(i64),
}

impl Segment {
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Segment::Field(name) => Some(name),
            Segment::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<i64> {
        match self {
            Segment::Key(key) => Some(*key),
            Segment::Field(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Key(key) => write!(f, "key:{}", key),
        }
    }
}

/// A parsed access path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    body: String,
    segments: Vec<Segment>,
    type_override: Option<TypeTag>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> ResolveResult<Self> {
        if raw.is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        let (body, type_override) = split_type_suffix(raw);
        if body.is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        let count = count_key_markers(body);
        if count > 1 {
            return Err(ResolveError::MultipleKeys {
                path: raw.to_string(),
                count,
            });
        }

        let segments = match all_consuming(segments)(body) {
            Ok((_, segments)) => segments,
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(ResolveError::Grammar {
                    path: raw.to_string(),
                    reason: format!("unexpected input at '{}'", e.input),
                })
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(ResolveError::Grammar {
                    path: raw.to_string(),
                    reason: "incomplete input".to_string(),
                })
            }
        };

        Ok(Self {
            raw: raw.to_string(),
            body: body.to_string(),
            segments,
            type_override,
        })
    }

    /// Path as given, including any type suffix
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Path without the type suffix
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn type_override(&self) -> Option<TypeTag> {
        self.type_override
    }

    pub fn key(&self) -> Option<i64> {
        self.segments.iter().find_map(Segment::as_key)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a trailing `:<type-tag>` off `raw`. Any other trailing `:` token is left alone.
pub fn split_type_suffix(raw: &str) -> (&str, Option<TypeTag>) {
    if let Some((head, tail)) = raw.rsplit_once(':') {
        if let Some(tag) = TypeTag::parse(tail) {
            return (head, Some(tag));
        }
    }
    (raw, None)
}

/// Split a leading `key:<int>` / `key_<int>` marker, with an optional `.key` / `.value`
/// accessor, off `text`. Returns the integer and whatever follows the marker.
///
/// `key:3.value` -> `(3, "")`, `key_3_list` -> `(3, "_list")`
pub fn extract_key(text: &str) -> Option<(i64, &str)> {
    let caps = KEY_PREFIX.captures(text)?;
    let key = caps.get(1)?.as_str().parse().ok()?;
    let end = caps.get(0)?.end();
    Some((key, &text[end..]))
}

/// Number of `key:<int>` / `key_<int>` markers anywhere in a dotted or flattened path
pub fn count_key_markers(text: &str) -> usize {
    KEY_MARKER.find_iter(text).count()
}

fn segments(input: &str) -> IResult<&str, Vec<Segment>> {
    separated_list1(char('.'), segment)(input)
}

fn segment(input: &str) -> IResult<&str, Segment> {
    alt((key_segment, field_segment))(input)
}

fn key_segment(input: &str) -> IResult<&str, Segment> {
    map(
        preceded(tag("key:"), map_res(digit1, |s: &str| s.parse::<i64>())),
        Segment::Key,
    )(input)
}

fn field_segment(input: &str) -> IResult<&str, Segment> {
    map(take_while1(|c: char| c != '.' && c != ':'), |s: &str| {
        Segment::Field(s.to_string())
    })(input)
}

//! Parsing for `{ key [= value] (, key [= value])* }` annotation bodies,
//! shared between edge-level and machine-level annotations.

use indexmap::IndexMap;

use crate::error::{Result, SpecError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    Number(i64),
    Flag,
}

/// A parsed annotation body, not yet validated against a recognized-key
/// set — edge and machine annotations recognize different keys. Backed by
/// an order-preserving map so `idtype`/`composite` "last one wins" mutual
/// exclusion (§4.1) can be resolved by textual order, not hash order.
#[derive(Debug, Clone, Default)]
pub struct AnnotationMap {
    pub entries: IndexMap<String, AnnotationValue>,
}

impl AnnotationMap {
    pub fn number(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(AnnotationValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Parse the raw text inside `{ ... }` into key/value pairs. Assigning the
/// same key twice is a hard error (recognized-key validation is the
/// caller's job).
pub fn parse_annotation(raw: &str, line: u32) -> Result<AnnotationMap> {
    let mut map = AnnotationMap::default();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = match part.split_once('=') {
            Some((k, v)) => {
                let n: i64 = v.trim().parse().map_err(|_| SpecError::UnexpectedToken {
                    line,
                    expected: "integer annotation value",
                    found: v.trim().to_string(),
                })?;
                (k.trim().to_string(), AnnotationValue::Number(n))
            }
            None => (part.to_string(), AnnotationValue::Flag),
        };
        if map.entries.insert(key.clone(), value).is_some() {
            return Err(SpecError::DuplicateAnnotationKey { line, key });
        }
    }
    Ok(map)
}

#[cfg(test)]
mod annotation_tests;

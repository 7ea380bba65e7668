// ============================================================
// SELECTION
// ============================================================
// A validated draw request and the names it produced

use std::num::IntErrorKind;

use serde::Serialize;
use serde_json::Value;

use crate::domain::error::{AppError, Result};

/// Check `count` against the population size and return it as an index bound.
pub fn validate_count(count: i128, available: usize) -> Result<usize> {
    if count <= 0 {
        return Err(AppError::InvalidCount(
            "Count must be greater than 0".to_string(),
        ));
    }

    match usize::try_from(count) {
        Ok(wanted) if wanted <= available => Ok(wanted),
        _ => Err(AppError::CountExceedsPopulation {
            requested: count,
            available,
        }),
    }
}

/// Coerce the loosely typed `count` field of a request.
///
/// Integers, whole floats (`3.0`) and strings holding a base-10 integer are
/// accepted. Integers beyond `i128` saturate, which still lands them on the
/// right side of the bounds check. Booleans, fractions and anything else are
/// rejected.
pub fn coerce_count(value: &Value) -> Result<i128> {
    let invalid = || AppError::InvalidCount("Invalid count value".to_string());

    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                return Ok(n.into());
            }
            if let Some(n) = number.as_u64() {
                return Ok(n.into());
            }
            match number.as_f64() {
                // `as` saturates at the i128 bounds
                Some(f) if f.fract() == 0.0 => Ok(f as i128),
                _ => Err(invalid()),
            }
        }
        Value::String(text) => match text.trim().parse::<i128>() {
            Ok(n) => Ok(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(i128::MAX),
                IntErrorKind::NegOverflow => Ok(i128::MIN),
                _ => Err(invalid()),
            },
        },
        _ => Err(invalid()),
    }
}

/// Names plus a count that satisfies `0 < count <= names.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    names: Vec<String>,
    count: usize,
}

impl SelectionRequest {
    pub fn new(names: Vec<String>, count: i128) -> Result<Self> {
        let count = validate_count(count, names.len())?;
        Ok(Self { names, count })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Names drawn without replacement. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionResult(Vec<String>);

impl SelectionResult {
    pub(crate) fn new(selected: Vec<String>) -> Self {
        Self(selected)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

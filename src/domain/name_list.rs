// ============================================================
// NAME LIST
// ============================================================
// Parsed upload contents and the formats they can arrive in

use serde::Serialize;
use std::str::FromStr;

use crate::domain::error::{AppError, Result};

/// Layout of an uploaded names file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values, every field of every record is a candidate
    Csv,

    /// One name per line
    Lines,
}

impl SourceFormat {
    /// Pick the format from an upload's filename.
    ///
    /// Only the exact suffixes `.csv` and `.txt` are accepted; `.CSV` is rejected.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".csv") {
            Some(SourceFormat::Csv)
        } else if filename.ends_with(".txt") {
            Some(SourceFormat::Lines)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Lines => "lines",
        }
    }
}

impl FromStr for SourceFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(SourceFormat::Csv),
            "lines" => Ok(SourceFormat::Lines),
            other => Err(AppError::InvalidFormat(format!(
                "Unknown source format: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, trimmed, non-empty names. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameList(Vec<String>);

impl NameList {
    /// Build a list from raw candidates, trimming each and dropping blanks.
    ///
    /// Fails with [`AppError::EmptyResult`] when nothing survives.
    pub fn from_candidates<I, S>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let trimmed = candidate.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();

        if names.is_empty() {
            return Err(AppError::EmptyResult);
        }

        Ok(Self(names))
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

impl AsRef<[String]> for NameList {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

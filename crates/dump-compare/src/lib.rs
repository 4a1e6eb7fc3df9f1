//! Tolerance-based comparison of `key=value` output dumps.
//!
//! Used to check that a program built from converted sources prints the same
//! numbers as the original build. Numeric values are compared with an
//! absolute tolerance; everything else must match exactly.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use indexmap::IndexMap;

/// Absolute tolerance used when none is given.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("Cannot read dump {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DumpValue {
    Number(f64),
    Text(String),
}

impl DumpValue {
    fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(number) => DumpValue::Number(number),
            Err(_) => DumpValue::Text(raw.to_owned()),
        }
    }
}

impl fmt::Display for DumpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpValue::Number(number) => write!(f, "{number:?}"),
            DumpValue::Text(text) => f.write_str(text),
        }
    }
}

/// Parsed dump. Keys keep their first-seen position; a repeated key
/// overwrites the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dump {
    values: IndexMap<String, DumpValue>,
}

impl Dump {
    /// Lines without `=` are ignored. Each line is trimmed and split at its
    /// first `=`.
    pub fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .filter_map(|line| line.trim().split_once('='))
            .map(|(key, value)| (key.to_owned(), DumpValue::parse(value)))
            .collect();
        Dump { values }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(Dump::parse(&text))
    }

    pub fn get(&self, key: &str) -> Option<&DumpValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DumpValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Verdict for one reference key.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    Within { key: String, diff: f64 },
    Equal { key: String, value: DumpValue },
    OutOfTolerance {
        key: String,
        reference: f64,
        candidate: f64,
        diff: f64,
        relative: f64,
    },
    Differs {
        key: String,
        reference: DumpValue,
        candidate: DumpValue,
    },
    Missing { key: String },
}

impl KeyOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, KeyOutcome::Within { .. } | KeyOutcome::Equal { .. })
    }

    pub fn key(&self) -> &str {
        match self {
            KeyOutcome::Within { key, .. }
            | KeyOutcome::Equal { key, .. }
            | KeyOutcome::OutOfTolerance { key, .. }
            | KeyOutcome::Differs { key, .. }
            | KeyOutcome::Missing { key } => key,
        }
    }
}

impl fmt::Display for KeyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOutcome::Within { key, diff } => write!(f, "OK: {key} diff={diff:.2e}"),
            KeyOutcome::Equal { key, value } => write!(f, "OK: {key} = {value}"),
            KeyOutcome::OutOfTolerance {
                key,
                reference,
                candidate,
                diff,
                relative,
            } => write!(
                f,
                "MISMATCH: {key} reference={reference:?} candidate={candidate:?} diff={diff:.2e} rel={relative:.2e}"
            ),
            KeyOutcome::Differs {
                key,
                reference,
                candidate,
            } => write!(f, "MISMATCH: {key} reference={reference} candidate={candidate}"),
            KeyOutcome::Missing { key } => write!(f, "MISSING: {key} not in candidate output"),
        }
    }
}

/// Per-key verdicts in reference order.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    outcomes: Vec<KeyOutcome>,
}

impl Comparison {
    pub fn outcomes(&self) -> &[KeyOutcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(KeyOutcome::is_ok)
    }

    /// Process exit code: 0 when every key matched, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        writeln!(f)?;
        if self.passed() {
            write!(f, "SUCCESS: All values match within tolerance")
        } else {
            write!(f, "FAILURE: Some values differ beyond tolerance")
        }
    }
}

/// Compare every key of `reference` against `candidate`.
///
/// Keys only present in `candidate` are not reported.
pub fn compare(reference: &Dump, candidate: &Dump, tolerance: f64) -> Comparison {
    let outcomes = reference
        .iter()
        .map(|(key, expected)| {
            let key = key.to_owned();
            let Some(actual) = candidate.get(&key) else {
                return KeyOutcome::Missing { key };
            };
            match (expected, actual) {
                (DumpValue::Number(a), DumpValue::Number(b)) => {
                    let diff = (a - b).abs();
                    if diff > tolerance {
                        KeyOutcome::OutOfTolerance {
                            key,
                            reference: *a,
                            candidate: *b,
                            diff,
                            relative: diff / a.abs().max(1e-15),
                        }
                    } else {
                        KeyOutcome::Within { key, diff }
                    }
                }
                _ if expected == actual => KeyOutcome::Equal {
                    key,
                    value: expected.clone(),
                },
                _ => KeyOutcome::Differs {
                    key,
                    reference: expected.clone(),
                    candidate: actual.clone(),
                },
            }
        })
        .collect();
    Comparison { outcomes }
}

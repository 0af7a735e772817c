use std::error::Error;
use std::fs;
use std::path::Path;

use apd_core::errors::{ApdError, ErrorInfo};
use apd_core::{BigInt, BigRational, Matrix};
use apd_exp::GeneratedMatrix;
use serde_json::Value;

/// Reads a JSON array of rows from disk.
pub fn load_matrix(path: &Path) -> Result<GeneratedMatrix, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_matrix(&text)?)
}

/// Parses rows of JSON integers or `"p"` / `"p/q"` strings.
///
/// The result is an integer matrix when every entry is integral and a
/// rational matrix otherwise.
pub fn parse_matrix(text: &str) -> Result<GeneratedMatrix, ApdError> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(text).map_err(|err| {
        ApdError::Serde(
            ErrorInfo::new("json-read", err.to_string())
                .with_hint("expected a JSON array of rows, e.g. [[1, \"1/2\"], [3, 4]]"),
        )
    })?;

    let mut parsed = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let mut entries = Vec::with_capacity(row.len());
        for (col_idx, value) in row.iter().enumerate() {
            let entry = parse_entry(value).ok_or_else(|| {
                ApdError::Matrix(
                    ErrorInfo::new("bad-entry", "entries must be integers or exact fractions")
                        .with_context("row", row_idx)
                        .with_context("col", col_idx)
                        .with_context("value", value.to_string())
                        .with_hint("write non-integers as strings such as \"-7/2\""),
                )
            })?;
            entries.push(entry);
        }
        parsed.push(entries);
    }

    if parsed.iter().flatten().all(|entry| entry.is_integer()) {
        let integers = parsed
            .into_iter()
            .map(|row| row.into_iter().map(|entry| entry.to_integer()).collect())
            .collect();
        Ok(GeneratedMatrix::Integer(Matrix::from_rows(integers)?))
    } else {
        Ok(GeneratedMatrix::Rational(Matrix::from_rows(parsed)?))
    }
}

fn parse_entry(value: &Value) -> Option<BigRational> {
    match value {
        Value::Number(number) => number
            .to_string()
            .parse::<BigInt>()
            .ok()
            .map(BigRational::from_integer),
        Value::String(text) => text.trim().parse::<BigRational>().ok(),
        _ => None,
    }
}

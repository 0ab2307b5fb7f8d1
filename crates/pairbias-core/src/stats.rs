//! Chi-square test of independence for contingency tables.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquare {
    pub statistic: f64,
    pub dof: u64,
    pub p_value: f64,
}

/// Why a contingency table cannot be tested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DegenerateTable {
    #[error("need at least 2 rows to compare, got {0}")]
    TooFewRows(usize),

    #[error("row {0} has no observations")]
    EmptyRow(usize),

    #[error("only {0} category observed across all rows, need at least 2")]
    TooFewCategories(usize),

    #[error("no chi-square distribution with {0} degrees of freedom")]
    DegreesOfFreedom(u64),
}

/// Pearson's chi-square test of independence on an `r x k` table of counts.
///
/// Columns that are zero in every row carry no information and are dropped
/// (their expected frequency would be zero). With one degree of freedom,
/// Yates' continuity correction is applied.
pub fn chi_square_independence(rows: &[Vec<u64>]) -> Result<ChiSquare, DegenerateTable> {
    if rows.len() < 2 {
        return Err(DegenerateTable::TooFewRows(rows.len()));
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let cell = |row: &Vec<u64>, col: usize| row.get(col).copied().unwrap_or(0);

    let columns: Vec<usize> = (0..width)
        .filter(|&col| rows.iter().any(|row| cell(row, col) > 0))
        .collect();

    let row_totals: Vec<u64> = rows.iter().map(|row| row.iter().sum()).collect();
    if let Some(empty) = row_totals.iter().position(|&total| total == 0) {
        return Err(DegenerateTable::EmptyRow(empty));
    }
    if columns.len() < 2 {
        return Err(DegenerateTable::TooFewCategories(columns.len()));
    }

    let column_totals: Vec<u64> = columns
        .iter()
        .map(|&col| rows.iter().map(|row| cell(row, col)).sum())
        .collect();
    let grand_total: u64 = row_totals.iter().sum();

    let dof = (rows.len() as u64 - 1) * (columns.len() as u64 - 1);
    let yates = dof == 1;

    let mut statistic = 0.0;
    for (row, &row_total) in rows.iter().zip(&row_totals) {
        for (&col, &column_total) in columns.iter().zip(&column_totals) {
            let expected = row_total as f64 * column_total as f64 / grand_total as f64;
            let mut deviation = (cell(row, col) as f64 - expected).abs();
            if yates {
                deviation = (deviation - 0.5).max(0.0);
            }
            statistic += deviation * deviation / expected;
        }
    }

    let p_value = chi_square_survival(statistic, dof)?;
    Ok(ChiSquare {
        statistic,
        dof,
        p_value,
    })
}

/// `P(X >= statistic)` for `X ~ chi-square(dof)`.
pub fn chi_square_survival(statistic: f64, dof: u64) -> Result<f64, DegenerateTable> {
    let distribution =
        ChiSquared::new(dof as f64).map_err(|_| DegenerateTable::DegreesOfFreedom(dof))?;
    Ok(distribution.sf(statistic))
}

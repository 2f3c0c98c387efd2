//! Least-squares regression by normal equations

use crate::{MathError, Result};

/// Fit coefficients minimizing squared error for `rows` of feature values
/// against `targets`.
///
/// Every row must have the same length (include a leading 1.0 for an
/// intercept). Solves `X'X b = X'y` with Gaussian elimination.
pub fn least_squares(rows: &[Vec<f64>], targets: &[f64]) -> Result<Vec<f64>> {
    if rows.is_empty() || targets.is_empty() {
        return Err(MathError::InsufficientData(
            "Regression needs at least one observation".to_string(),
        ));
    }
    if rows.len() != targets.len() {
        return Err(MathError::InvalidInput(format!(
            "Feature rows ({}) and targets ({}) differ in length",
            rows.len(),
            targets.len()
        )));
    }

    let k = rows[0].len();
    if k == 0 || rows.iter().any(|r| r.len() != k) {
        return Err(MathError::InvalidInput(
            "Feature rows must be non-empty and uniform in length".to_string(),
        ));
    }
    if rows.len() < k {
        return Err(MathError::InsufficientData(format!(
            "Regression with {} features needs at least {} observations",
            k, k
        )));
    }

    // Normal equations: gram = X'X, moment = X'y
    let mut gram = vec![vec![0.0; k]; k];
    let mut moment = vec![0.0; k];
    for (row, &y) in rows.iter().zip(targets.iter()) {
        for i in 0..k {
            for j in 0..k {
                gram[i][j] += row[i] * row[j];
            }
            moment[i] += row[i] * y;
        }
    }

    solve(gram, moment)
}

/// Predict a single target from fitted coefficients and a feature row
pub fn predict(coefficients: &[f64], features: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(features.iter())
        .map(|(c, f)| c * f)
        .sum()
}

/// Gaussian elimination with partial pivoting
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let n = rhs.len();

    for col in 0..n {
        // Pivot on the largest magnitude in this column
        let mut pivot = col;
        for row in col + 1..n {
            if matrix[row][col].abs() > matrix[pivot][col].abs() {
                pivot = row;
            }
        }

        if matrix[pivot][col].abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Singular design matrix: features are collinear".to_string(),
            ));
        }

        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in col + 1..n {
            let factor = matrix[row][col] / matrix[col][col];
            for j in col..n {
                matrix[row][j] -= factor * matrix[col][j];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back-substitution
    let mut solution = vec![0.0; n];
    for col in (0..n).rev() {
        let mut acc = rhs[col];
        for j in col + 1..n {
            acc -= matrix[col][j] * solution[j];
        }
        solution[col] = acc / matrix[col][col];
    }

    Ok(solution)
}

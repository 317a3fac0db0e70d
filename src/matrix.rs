//! Matrix inversion by Gauss-Jordan elimination.
//!
//! Matrices are plain `Vec<Vec<f64>>` in row-major order. The input is augmented with the
//! identity matrix, reduced with partial pivoting, and the right half is returned.

use crate::errors::MatrixError;

/// Pivots with an absolute value below this are treated as zero.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Inverts a square matrix.
///
/// # Example
/// ```
/// use flatexpr::matrix::invert;
///
/// let inverse = invert(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
/// let expected = [[0.6, -0.7], [-0.2, 0.4]];
/// for (row, expected_row) in inverse.iter().zip(expected.iter()) {
///     for (value, expected_value) in row.iter().zip(expected_row.iter()) {
///         assert!((value - expected_value).abs() < 1e-12);
///     }
/// }
/// ```
///
/// # Errors
/// - `MatrixError::Empty` if the matrix has no rows
/// - `MatrixError::NotSquare` if a row length differs from the number of rows
/// - `MatrixError::Singular` if a column has no usable pivot
pub fn invert(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, MatrixError> {
    let n = matrix.len();
    if n == 0 {
        return Err(MatrixError::Empty);
    }
    if let Some((row, values)) = matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(MatrixError::NotSquare {
            row,
            expected: n,
            got: values.len(),
        });
    }

    // [A | I]
    let mut augmented: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut extended = row.clone();
            extended.resize(2 * n, 0.0);
            extended[n + i] = 1.0;
            extended
        })
        .collect();

    for column in 0..n {
        let pivot_row = (column..n)
            .max_by(|&p, &q| {
                augmented[p][column]
                    .abs()
                    .total_cmp(&augmented[q][column].abs())
            })
            .unwrap_or(column);
        let pivot = augmented[pivot_row][column];
        if pivot.is_nan() || pivot.abs() < PIVOT_EPSILON {
            return Err(MatrixError::Singular { column });
        }
        augmented.swap(column, pivot_row);

        for value in augmented[column].iter_mut() {
            *value /= pivot;
        }

        let pivot_values = augmented[column].clone();
        for (row, values) in augmented.iter_mut().enumerate() {
            if row == column {
                continue;
            }
            let factor = values[column];
            if factor == 0.0 {
                continue;
            }
            for (value, pivot_value) in values.iter_mut().zip(pivot_values.iter()) {
                *value -= factor * pivot_value;
            }
        }
    }

    Ok(augmented
        .into_iter()
        .map(|row| row[n..].to_vec())
        .collect())
}

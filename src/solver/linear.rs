//! Dense linear system solving via Gaussian elimination.

use crate::error::{Result, VoltlabError};

use super::PIVOT_EPSILON;

/// Solve the dense system `A x = b` by Gaussian elimination with partial
/// pivoting.
///
/// `a` is the n x n matrix in row-major order, `b` the right-hand side of
/// length n. Returns [`VoltlabError::SingularMatrix`] when the best available
/// pivot in some column falls below [`PIVOT_EPSILON`]; no partial result is
/// ever produced.
pub fn solve_dense(a: &[f64], b: &[f64], n: usize) -> Result<Vec<f64>> {
    if a.len() != n * n || b.len() != n {
        return Err(VoltlabError::DimensionMismatch {
            rows: a.len() / n.max(1),
            cols: n,
            rhs: b.len(),
        });
    }

    // Augmented matrix [A | b], width n + 1
    let w = n + 1;
    let mut m = vec![0.0; n * w];
    for i in 0..n {
        m[i * w..i * w + n].copy_from_slice(&a[i * n..(i + 1) * n]);
        m[i * w + n] = b[i];
    }

    // Forward elimination with partial pivoting
    for k in 0..n {
        let mut max_row = k;
        let mut max_val = m[k * w + k].abs();
        for i in (k + 1)..n {
            let val = m[i * w + k].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val < PIVOT_EPSILON {
            return Err(VoltlabError::SingularMatrix);
        }

        if max_row != k {
            for j in k..w {
                m.swap(k * w + j, max_row * w + j);
            }
        }

        let pivot = m[k * w + k];
        for i in (k + 1)..n {
            let factor = m[i * w + k] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in k..w {
                m[i * w + j] -= factor * m[k * w + j];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = m[i * w + n];
        for j in (i + 1)..n {
            sum -= m[i * w + j] * x[j];
        }
        x[i] = sum / m[i * w + i];
    }

    Ok(x)
}

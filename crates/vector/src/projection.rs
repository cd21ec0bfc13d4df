//! Principal component projection onto the plane.
//!
//! The centered sample matrix X (N x D) is reduced through whichever of the
//! Gram matrix X·Xᵀ (N x N) or the scatter matrix Xᵀ·X (D x D) is smaller.
//! Both share their non-zero eigenvalues, so either gives the same scores.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use tracing::debug;
use wordmap_common::{Result, WordmapError};

use crate::types::Point2;

const MAX_SWEEPS: usize = 64;

/// Project `samples` (one vector per row) onto their top-2 principal axes
///
/// Output is index-aligned with the input rows.
pub fn project_to_2d(samples: ArrayView2<'_, f32>) -> Result<Vec<Point2>> {
    let (n, d) = samples.dim();
    if n < 2 {
        return Err(WordmapError::dimension(format!(
            "need at least 2 vectors, got {}",
            n
        )));
    }
    if d < 2 {
        return Err(WordmapError::dimension(format!(
            "need at least 2 dimensions, got {}",
            d
        )));
    }

    let x = samples.mapv(f64::from);
    let mean = x
        .mean_axis(Axis(0))
        .ok_or_else(|| WordmapError::internal("mean of empty sample set"))?;
    let centered = &x - &mean;

    let scores = if n <= d {
        gram_scores(&centered)
    } else {
        scatter_scores(&centered)
    };
    debug!("Projected {} vectors of dimension {} to 2D", n, d);

    Ok(scores
        .outer_iter()
        .map(|row| Point2::new(row[0], row[1]))
        .collect())
}

/// Scores from the eigenvectors of X·Xᵀ: column k is u_k * sqrt(lambda_k)
fn gram_scores(centered: &Array2<f64>) -> Array2<f64> {
    let gram = centered.dot(&centered.t());
    let (values, vectors) = symmetric_eigen(gram);
    let order = descending_order(&values);

    let mut scores = Array2::zeros((centered.nrows(), 2));
    for (k, &col) in order.iter().take(2).enumerate() {
        let scale = values[col].max(0.0).sqrt();
        scores
            .column_mut(k)
            .assign(&vectors.column(col).mapv(|u| u * scale));
    }
    flip_signs(scores)
}

/// Scores from the eigenvectors of Xᵀ·X: column k is X·v_k
fn scatter_scores(centered: &Array2<f64>) -> Array2<f64> {
    let scatter = centered.t().dot(centered);
    let (values, vectors) = symmetric_eigen(scatter);
    let order = descending_order(&values);

    let mut scores = Array2::zeros((centered.nrows(), 2));
    for (k, &col) in order.iter().take(2).enumerate() {
        scores
            .column_mut(k)
            .assign(&centered.dot(&vectors.column(col)));
    }
    flip_signs(scores)
}

/// Make the largest-magnitude score of each component positive
fn flip_signs(mut scores: Array2<f64>) -> Array2<f64> {
    for mut column in scores.columns_mut() {
        let pivot = column
            .iter()
            .copied()
            .fold(0.0f64, |best, v| if v.abs() > best.abs() { v } else { best });
        if pivot < 0.0 {
            column.mapv_inplace(|v| -v);
        }
    }
    scores
}

fn descending_order(values: &Array1<f64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Cyclic Jacobi eigen-decomposition of a symmetric matrix
///
/// Returns the eigenvalues and a matrix whose columns are the matching
/// unit eigenvectors.
fn symmetric_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);

    let total: f64 = a.iter().map(|x| x * x).sum();
    if total == 0.0 {
        return (Array1::zeros(n), v);
    }

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[[p, q]] * a[[p, q]];
            }
        }
        if off <= total * 1e-24 {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }

                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

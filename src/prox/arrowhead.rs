use super::ProxError;
use crate::algebra::*;
use itertools::izip;

/// Solves `K y = b` for the arrowhead matrix
///
/// ```text
/// K = [ diag(d)  z ]
///     [   z'     α ]
/// ```
///
/// with `d > 0` elementwise, using the Schur complement
/// `ρ = α - z' diag(d)⁻¹ z` of the diagonal block.   Requires
/// `len(z) = len(d)` and `len(b) = len(d) + 1`.
pub fn solve_arrowhead_system<T: FloatT>(
    d: &[T],
    z: &[T],
    alpha: T,
    b: &[T],
) -> Result<Vec<T>, ProxError> {
    let n = d.len();
    if z.len() != n || b.len() != n + 1 {
        return Err(ProxError::InvalidArgument(
            "arrowhead system dimensions are inconsistent",
        ));
    }

    // u = diag(d)⁻¹ z
    let mut u = z.to_vec();
    for (ui, &di) in u.iter_mut().zip(d) {
        *ui /= di;
    }

    let rho = alpha - u.dot(z);
    if rho == T::zero() || !rho.is_finite() {
        return Err(ProxError::DegenerateArrowhead);
    }

    // with w = [u; -1], y = [diag(d)⁻¹ b_head; 0] + (w'b / ρ) w
    let wb = u.dot(&b[..n]) - b[n];
    let c = wb / rho;

    let mut y = Vec::with_capacity(n + 1);
    y.extend(izip!(&b[..n], d, &u).map(|(&bi, &di, &ui)| bi / di + c * ui));
    y.push(-c);

    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrowhead_dense(d: &[f64], z: &[f64], alpha: f64) -> Matrix<f64> {
        let n = d.len();
        let mut K = Matrix::zeros((n + 1, n + 1));
        for i in 0..n {
            K[(i, i)] = d[i];
            K[(i, n)] = z[i];
            K[(n, i)] = z[i];
        }
        K[(n, n)] = alpha;
        K
    }

    #[test]
    fn test_arrowhead_matches_lu() {
        let d = [1.5, 2.0, 0.5, 3.0];
        let z = [0.3, -1.0, 2.0, 0.0];
        let b = [1.0, -2.0, 0.5, 4.0, -1.0];

        for alpha in [0.0, -1.0, 2.5] {
            let y = solve_arrowhead_system(&d, &z, alpha, &b).unwrap();
            let yref = arrowhead_dense(&d, &z, alpha).solve(&b).unwrap();
            assert!(y.norm_inf_diff(&yref) < 1e-12);
        }
    }

    #[test]
    fn test_arrowhead_degenerate() {
        // ρ = 1 - 1²/1 = 0
        let y = solve_arrowhead_system(&[1.0], &[1.0], 1.0, &[1.0, 1.0]);
        assert_eq!(y, Err(ProxError::DegenerateArrowhead));

        let y = solve_arrowhead_system(&[1.0], &[1.0], 1.0, &[1.0]);
        assert!(matches!(y, Err(ProxError::InvalidArgument(_))));
    }
}

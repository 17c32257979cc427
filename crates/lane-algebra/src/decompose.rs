// SPDX-License-Identifier: LGPL-3.0-or-later

//! Polar decomposition of an affine 4x4 transform.
//!
//! `M = T * R * S` where `T` is a translation (taken from column 3), `R` a
//! proper rotation and `S` the remaining stretch. `R` is the orthogonal
//! factor of the upper 3x3 block, found by iterating
//! `R <- (R + (R^T)^-1) / 2`, which converges quadratically for
//! non-singular input.

use lane_math::Float;
use lane_math::lanes::{LaneWidth, Lanes};

use crate::consts::{POLAR_MAX_ITERATIONS, POLAR_TOLERANCE};
use crate::error::{AlgebraError, AlgebraResult};
use crate::matrix::SquareMatrix;
use crate::quaternion::Quaternion;
use crate::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposed<T>
where
    T: Float,
    Lanes<4>: LaneWidth<T>,
{
    pub translation: Vector<T, 3>,
    pub rotation: Quaternion<T>,
    /// Stretch applied before the rotation, with `[3][3] == 1` and no
    /// translation.
    pub scale: SquareMatrix<T, 4>,
}

/// Largest row sum of absolute differences over the upper 3x3 block.
fn step_norm<T: Float>(a: &SquareMatrix<T, 4>, b: &SquareMatrix<T, 4>) -> T
where
    Lanes<4>: LaneWidth<T>,
{
    let mut norm = T::ZERO;
    for i in 0..3 {
        let d = a[(i, 0)] - b[(i, 0)];
        let n = d.abs() + (a[(i, 1)] - b[(i, 1)]).abs() + (a[(i, 2)] - b[(i, 2)]).abs();
        if n > norm || n.is_nan() {
            norm = n;
        }
    }
    norm
}

/// Split `m` into translation, rotation and stretch.
///
/// Fails with [`AlgebraError::SingularMatrix`] when the linear part cannot
/// be inverted and with [`AlgebraError::DecompositionDiverged`] when the
/// iteration leaves the finite range. Reaching
/// [`POLAR_MAX_ITERATIONS`] is logged and the last iterate is used.
///
/// A reflection in the linear part is moved into the stretch, so the
/// rotation stays proper and `recompose` still rebuilds `m`.
pub fn decompose<T: Float>(m: &SquareMatrix<T, 4>) -> AlgebraResult<Decomposed<T>>
where
    Lanes<4>: LaneWidth<T>,
    Lanes<3>: LaneWidth<T>,
{
    let translation = Vector::new([m[(0, 3)], m[(1, 3)], m[(2, 3)]]);

    let mut linear = *m;
    for i in 0..3 {
        linear[(i, 3)] = T::ZERO;
        linear[(3, i)] = T::ZERO;
    }
    linear[(3, 3)] = T::ONE;

    if linear.is_singular() {
        let determinant = linear.determinant().to_f64();
        log::debug!("decompose: linear part is singular (det = {determinant:e})");
        return Err(AlgebraError::SingularMatrix { determinant });
    }

    let tolerance = T::from_f64(POLAR_TOLERANCE);
    let mut r = linear;
    let mut iterations = 0;
    loop {
        iterations += 1;
        let next = (r + r.transpose().inverse()) * T::HALF;
        let norm = step_norm(&r, &next);
        r = next;
        if r.has_nan() || norm.is_nan() {
            return Err(AlgebraError::DecompositionDiverged { iterations });
        }
        if norm <= tolerance {
            break;
        }
        if iterations >= POLAR_MAX_ITERATIONS {
            log::warn!(
                "decompose: polar iteration stopped at the {POLAR_MAX_ITERATIONS} step cap (last step {:e})",
                norm.to_f64()
            );
            break;
        }
    }

    let mut scale = r.inverse() * linear;
    if r.determinant() < T::ZERO {
        for i in 0..3 {
            for j in 0..3 {
                r[(i, j)] = -r[(i, j)];
                scale[(i, j)] = -scale[(i, j)];
            }
        }
    }
    if scale.has_nan() {
        return Err(AlgebraError::DecompositionDiverged { iterations });
    }

    Ok(Decomposed { translation, rotation: Quaternion::from_rotation_matrix(&r), scale })
}

impl<T: Float> Decomposed<T>
where
    Lanes<4>: LaneWidth<T>,
    Lanes<3>: LaneWidth<T>,
{
    /// Rebuild `T * R * S`.
    pub fn recompose(&self) -> SquareMatrix<T, 4> {
        let mut m = self.rotation.to_rotation_matrix() * self.scale;
        for i in 0..3 {
            m[(i, 3)] = self.translation[i];
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    type M4 = SquareMatrix<f64, 4>;
    type V3 = Vector<f64, 3>;

    fn diag(x: f64, y: f64, z: f64) -> M4 {
        M4::from_rows([[x, 0.0, 0.0, 0.0], [0.0, y, 0.0, 0.0], [0.0, 0.0, z, 0.0], [0.0, 0.0, 0.0, 1.0]])
    }

    fn with_translation(mut m: M4, t: [f64; 3]) -> M4 {
        for i in 0..3 {
            m[(i, 3)] = t[i];
        }
        m
    }

    fn assert_matrix_eq(a: &M4, b: &M4, eps: f64) {
        for i in 0..4 {
            for j in 0..4 {
                assert_approx_eq!(f64, a[(i, j)], b[(i, j)], epsilon = eps);
            }
        }
    }

    #[test]
    fn test_translation_rotation_scale() {
        let q = Quaternion::from_axis_angle(V3::new([1.0, 2.0, -0.5]), 0.8);
        let m = with_translation(q.to_rotation_matrix() * diag(2.0, 0.5, 3.0), [1.0, -2.0, 4.5]);
        let d = decompose(&m).unwrap();

        assert_eq!(d.translation.to_array(), [1.0, -2.0, 4.5]);
        let sign = if d.rotation.dot(&q) < 0.0 { -1.0 } else { 1.0 };
        for (a, b) in (d.rotation * sign).to_array().into_iter().zip(q.to_array()) {
            assert_approx_eq!(f64, a, b, epsilon = 1e-6);
        }
        assert_matrix_eq(&d.scale, &diag(2.0, 0.5, 3.0), 1e-6);
        assert_matrix_eq(&d.recompose(), &m, 1e-9);
    }

    #[test]
    fn test_identity() {
        let d = decompose(&M4::identity()).unwrap();
        assert_eq!(d.translation, V3::zero());
        assert_eq!(d.rotation, Quaternion::identity());
        assert_eq!(d.scale, M4::identity());
    }

    #[test]
    fn test_reflection_moves_into_scale() {
        let m = diag(-1.0, 2.0, 2.0);
        let d = decompose(&m).unwrap();
        assert_approx_eq!(f64, d.rotation.to_rotation_matrix().determinant(), 1.0, epsilon = 1e-12);
        assert!(d.scale.determinant() < 0.0);
        assert_matrix_eq(&d.recompose(), &m, 1e-12);
    }

    #[test]
    fn test_singular_linear_part() {
        let m = with_translation(diag(1.0, 0.0, 1.0), [3.0, 0.0, 0.0]);
        assert!(matches!(decompose(&m), Err(AlgebraError::SingularMatrix { .. })));
    }

    #[test]
    fn test_single_precision() {
        let q = Quaternion::<f32>::from_axis_angle(Vector::new([0.0, 0.0, 1.0]), 1.2);
        let m = q.to_rotation_matrix() * SquareMatrix::<f32, 4>::from_rows([
            [1.5, 0.0, 0.0, 0.0],
            [0.0, 1.5, 0.0, 0.0],
            [0.0, 0.0, 1.5, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let d = decompose(&m).unwrap();
        assert_approx_eq!(f32, d.scale[(0, 0)], 1.5, epsilon = 1e-5);
        assert_approx_eq!(f32, d.rotation.w(), q.w(), epsilon = 1e-5);
    }
}

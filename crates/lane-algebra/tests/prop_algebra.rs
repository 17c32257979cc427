// SPDX-License-Identifier: LGPL-3.0-or-later
//! Property-based tests for lane-algebra using proptest.
//!
//! Covers: vector dot products, inverse, determinant multiplicativity,
//! quaternion rotation, polar decomposition round trip.

use lane_algebra::{Quaternion, SquareMatrix, Vector, decompose};
use lane_math::lanes::{LaneWidth, Lanes};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

type M3 = SquareMatrix<f64, 3>;
type M4 = SquareMatrix<f64, 4>;
type V3 = Vector<f64, 3>;

fn entry() -> impl Strategy<Value = f64> {
    -10.0f64..10.0
}

/// Strictly diagonally dominant, hence invertible and well conditioned.
fn dominant<const D: usize>() -> impl Strategy<Value = [[f64; D]; D]> {
    prop::array::uniform(prop::array::uniform(-1.0f64..1.0)).prop_map(|mut rows: [[f64; D]; D]| {
        for (i, row) in rows.iter_mut().enumerate() {
            let off: f64 = row.iter().map(|x| x.abs()).sum();
            row[i] = off + 1.0;
        }
        rows
    })
}

fn unit_axis() -> impl Strategy<Value = V3> {
    (entry(), entry(), entry())
        .prop_filter("non-degenerate axis", |(x, y, z)| x * x + y * y + z * z > 1e-3)
        .prop_map(|(x, y, z)| V3::new([x, y, z]))
}

// ── Vectors ─────────────────────────────────────────────────────────────

fn dot_matches_length_squared<const N: usize>(xs: [f32; N]) -> Result<(), TestCaseError>
where
    Lanes<N>: LaneWidth<f32>,
{
    let v = Vector::new(xs);
    let (dot, len2) = (v.dot(v), v.length_squared());
    prop_assert_eq!(dot.to_bits(), len2.to_bits());
    let reference: f64 = xs.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    prop_assert!((f64::from(dot) - reference).abs() <= 1e-5 * reference, "{} vs {}", dot, reference);
    Ok(())
}

fn inverse_of_inverse<const D: usize>(rows: [[f64; D]; D]) -> Result<(), TestCaseError>
where
    Lanes<D>: LaneWidth<f32>,
{
    let m = SquareMatrix::<f32, D>::from_rows(rows.map(|r| r.map(|x| x as f32)));
    let back = m.inverse().inverse();
    for i in 0..D {
        for j in 0..D {
            let (a, e) = (back[(i, j)], m[(i, j)]);
            prop_assert!((a - e).abs() <= 1e-4 * (1.0 + e.abs()), "[{}][{}]: {} vs {}", i, j, a, e);
        }
    }
    Ok(())
}

proptest! {
    /// v . v equals |v|^2 bit for bit, across logical widths.
    #[test]
    fn dot_is_length_squared(
        v1 in prop::array::uniform::<_, 1>(-100.0f32..100.0),
        v2 in prop::array::uniform::<_, 2>(-100.0f32..100.0),
        v3 in prop::array::uniform::<_, 3>(-100.0f32..100.0),
        v4 in prop::array::uniform::<_, 4>(-100.0f32..100.0),
        v5 in prop::array::uniform::<_, 5>(-100.0f32..100.0),
        v7 in prop::array::uniform::<_, 7>(-100.0f32..100.0),
        v8 in prop::array::uniform::<_, 8>(-100.0f32..100.0),
    ) {
        dot_matches_length_squared(v1)?;
        dot_matches_length_squared(v2)?;
        dot_matches_length_squared(v3)?;
        dot_matches_length_squared(v4)?;
        dot_matches_length_squared(v5)?;
        dot_matches_length_squared(v7)?;
        dot_matches_length_squared(v8)?;
    }

    /// (M^-1)^-1 = M in single precision for each inverse path.
    #[test]
    fn inverse_round_trips(
        rows2 in dominant::<2>(),
        rows3 in dominant::<3>(),
        rows4 in dominant::<4>(),
        rows6 in dominant::<6>(),
    ) {
        inverse_of_inverse(rows2)?;
        inverse_of_inverse(rows3)?;
        inverse_of_inverse(rows4)?;
        inverse_of_inverse(rows6)?;
    }
}

// ── Matrices ────────────────────────────────────────────────────────────

proptest! {
    /// A * A^-1 = I for diagonally dominant matrices of every size path.
    #[test]
    fn inverse_is_two_sided(rows3 in dominant::<3>(), rows4 in dominant::<4>(), rows6 in dominant::<6>()) {
        let m = M3::from_rows(rows3);
        let p = m * m.inverse();
        for i in 0..3 {
            for j in 0..3 {
                let e = if i == j { 1.0 } else { 0.0 };
                prop_assert!((p[(i, j)] - e).abs() < 1e-12);
            }
        }
        let m = M4::from_rows(rows4);
        let p = m.inverse() * m;
        for i in 0..4 {
            prop_assert!((p[(i, i)] - 1.0).abs() < 1e-12);
        }
        let m = SquareMatrix::<f64, 6>::from_rows(rows6);
        let p = m * m.try_inverse().unwrap();
        for i in 0..6 {
            prop_assert!((p[(i, i)] - 1.0).abs() < 1e-12);
        }
    }

    /// det(AB) = det(A) det(B).
    #[test]
    fn determinant_is_multiplicative(a in dominant::<4>(), b in dominant::<4>()) {
        let (a, b) = (M4::from_rows(a), M4::from_rows(b));
        let lhs = (a * b).determinant();
        let rhs = a.determinant() * b.determinant();
        prop_assert!((lhs - rhs).abs() <= 1e-10 * rhs.abs(), "{} vs {}", lhs, rhs);
    }

    /// det(A^T) = det(A), through the LU path for larger sizes.
    #[test]
    fn transpose_keeps_determinant(rows in dominant::<5>()) {
        let m = SquareMatrix::<f64, 5>::from_rows(rows);
        let (d, dt) = (m.determinant(), m.transpose().determinant());
        prop_assert!((d - dt).abs() <= 1e-12 * d.abs());
    }
}

// ── Quaternions ─────────────────────────────────────────────────────────

proptest! {
    /// Rotation preserves length and matches the rotation matrix.
    #[test]
    fn rotation_preserves_length(axis in unit_axis(), angle in -6.3f64..6.3, v in (entry(), entry(), entry())) {
        let q = Quaternion::from_axis_angle(axis, angle);
        let v = V3::new([v.0, v.1, v.2]);
        let r = q.rotate(v);
        prop_assert!((r.length() - v.length()).abs() < 1e-12 * (1.0 + v.length()));
        let m = q.to_rotation_matrix() * Vector::new([v[0], v[1], v[2], 0.0]);
        for i in 0..3 {
            prop_assert!((m[i] - r[i]).abs() < 1e-12 * (1.0 + v.length()));
        }
    }

    /// Composing rotations multiplies quaternions.
    #[test]
    fn product_composes_rotations(a in unit_axis(), b in unit_axis(), s in -3.0f64..3.0, t in -3.0f64..3.0) {
        let (p, q) = (Quaternion::from_axis_angle(a, s), Quaternion::from_axis_angle(b, t));
        let v = V3::new([0.3, -1.0, 2.0]);
        let lhs = (p * q).rotate(v);
        let rhs = p.rotate(q.rotate(v));
        prop_assert!((lhs - rhs).length() < 1e-12);
    }

    /// Slerp stays on the unit sphere.
    #[test]
    fn slerp_is_unit(a in unit_axis(), b in unit_axis(), t in 0.0f64..1.0) {
        let p = Quaternion::from_axis_angle(a, 1.0);
        let q = Quaternion::from_axis_angle(b, 2.0);
        prop_assert!((p.slerp(&q, t).length() - 1.0).abs() < 1e-9);
    }
}

// ── Decomposition ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn decompose_round_trips(
        axis in unit_axis(),
        angle in -3.0f64..3.0,
        scale in (0.2f64..5.0, 0.2f64..5.0, 0.2f64..5.0),
        t in (entry(), entry(), entry()),
    ) {
        let q = Quaternion::from_axis_angle(axis, angle);
        let mut s = M4::identity();
        s[(0, 0)] = scale.0;
        s[(1, 1)] = scale.1;
        s[(2, 2)] = scale.2;
        let mut m = q.to_rotation_matrix() * s;
        m[(0, 3)] = t.0;
        m[(1, 3)] = t.1;
        m[(2, 3)] = t.2;

        let d = decompose(&m).unwrap();
        prop_assert_eq!(d.translation.to_array(), [t.0, t.1, t.2]);
        let back = d.recompose();
        for i in 0..4 {
            for j in 0..4 {
                prop_assert!((back[(i, j)] - m[(i, j)]).abs() < 1e-6, "[{}][{}]", i, j);
            }
        }
        for i in 0..3 {
            prop_assert!((d.scale[(i, i)] - [scale.0, scale.1, scale.2][i]).abs() < 1e-6);
        }
    }
}

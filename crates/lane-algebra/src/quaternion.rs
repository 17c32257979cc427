// SPDX-License-Identifier: LGPL-3.0-or-later

//! Rotation quaternions stored as `(x, y, z, w)` in one 4-lane register,
//! `w` being the scalar part.
//!
//! Rotations act on column vectors: [`Quaternion::to_rotation_matrix`] and
//! [`Quaternion::rotate`] agree, and [`Quaternion::from_rotation_matrix`]
//! inverts the former for any proper rotation.

use core::ops::{Add, Div, Mul, Neg, Sub};

use lane_math::lanes::{LaneWidth, Lanes, SimdOf};
use lane_math::{Float, Traits};

use crate::matrix::SquareMatrix;
use crate::vector::Vector;

type Q<T> = Traits<T, 4>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion<T>
where
    T: Float,
    Lanes<4>: LaneWidth<T>,
{
    lanes: SimdOf<T, 4>,
}

/// `sin(x) / x`, exact at the origin.
fn sin_x_over_x<T: Float>(x: T) -> T {
    if T::ONE - x * x == T::ONE { T::ONE } else { x.sin() / x }
}

impl<T: Float> Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
    Lanes<3>: LaneWidth<T>,
{
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { lanes: Q::<T>::from_array([x, y, z, w]) }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE)
    }

    #[inline]
    fn from_register(lanes: SimdOf<T, 4>) -> Self {
        Self { lanes }
    }

    /// Rotation by `angle` radians about `axis`. The axis need not be unit
    /// length.
    pub fn from_axis_angle(axis: Vector<T, 3>, angle: T) -> Self {
        let half = angle * T::HALF;
        let (s, c) = (half.sin(), half.cos());
        let a = axis.normalize() * s;
        Self::new(a.x(), a.y(), a.z(), c)
    }

    /// Quaternion of the rotation in the upper-left 3x3 block.
    pub fn from_rotation_matrix(m: &SquareMatrix<T, 4>) -> Self {
        let quarter = T::HALF * T::HALF;
        let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];
        if trace > T::ZERO {
            let s = (trace + T::ONE).sqrt() * T::TWO;
            return Self::new(
                (m[(2, 1)] - m[(1, 2)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(1, 0)] - m[(0, 1)]) / s,
                quarter * s,
            );
        }
        if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            let s = (T::ONE + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt() * T::TWO;
            Self::new(
                quarter * s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(2, 1)] - m[(1, 2)]) / s,
            )
        } else if m[(1, 1)] > m[(2, 2)] {
            let s = (T::ONE + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt() * T::TWO;
            Self::new(
                (m[(0, 1)] + m[(1, 0)]) / s,
                quarter * s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
            )
        } else {
            let s = (T::ONE + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt() * T::TWO;
            Self::new(
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                quarter * s,
                (m[(1, 0)] - m[(0, 1)]) / s,
            )
        }
    }

    /// Homogeneous rotation matrix; the quaternion is assumed unit length.
    pub fn to_rotation_matrix(&self) -> SquareMatrix<T, 4> {
        let [x, y, z, w] = self.to_array();
        let two = T::TWO;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        let (o, l) = (T::ZERO, T::ONE);
        SquareMatrix::from_rows([
            [l - two * (yy + zz), two * (xy - wz), two * (xz + wy), o],
            [two * (xy + wz), l - two * (xx + zz), two * (yz - wx), o],
            [two * (xz - wy), two * (yz + wx), l - two * (xx + yy), o],
            [o, o, o, l],
        ])
    }

    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        Q::<T>::to_array(self.lanes)
    }

    #[inline]
    pub fn x(&self) -> T {
        Q::<T>::extract::<0>(self.lanes)
    }

    #[inline]
    pub fn y(&self) -> T {
        Q::<T>::extract::<1>(self.lanes)
    }

    #[inline]
    pub fn z(&self) -> T {
        Q::<T>::extract::<2>(self.lanes)
    }

    #[inline]
    pub fn w(&self) -> T {
        Q::<T>::extract::<3>(self.lanes)
    }

    /// The vector part `(x, y, z)`.
    pub fn imaginary(&self) -> Vector<T, 3> {
        Vector::new([self.x(), self.y(), self.z()])
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        Q::<T>::first(Q::<T>::dot(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = Q::<T>::sqrt(Q::<T>::dot(self.lanes, self.lanes));
        Self::from_register(Q::<T>::div(self.lanes, len))
    }

    pub fn conjugate(&self) -> Self {
        let flip = Q::<T>::from_array([-T::ONE, -T::ONE, -T::ONE, T::ONE]);
        Self::from_register(Q::<T>::mul(self.lanes, flip))
    }

    /// Multiplicative inverse; a zero quaternion yields NaN lanes.
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.length_squared()
    }

    /// Rotate `v` by `q v q*`, `q` assumed unit length.
    pub fn rotate(&self, v: Vector<T, 3>) -> Vector<T, 3> {
        let p = Self::new(v.x(), v.y(), v.z(), T::ZERO);
        (*self * p * self.conjugate()).imaginary()
    }

    /// Angle between the rotations' 4D directions, in `[0, pi]`.
    pub fn angle_between(&self, rhs: &Self) -> T {
        if self.dot(rhs) < T::ZERO {
            T::PI - T::TWO * ((*self + *rhs).length() * T::HALF).safe_asin()
        } else {
            T::TWO * ((*rhs - *self).length() * T::HALF).safe_asin()
        }
    }

    /// Spherical interpolation from `self` at `t = 0` to `rhs` at `t = 1`.
    pub fn slerp(&self, rhs: &Self, t: T) -> Self {
        let theta = self.angle_between(rhs);
        let base = sin_x_over_x(theta);
        let u = T::ONE - t;
        *self * (u * sin_x_over_x(u * theta) / base) + *rhs * (t * sin_x_over_x(t * theta) / base)
    }
}

impl<T: Float> Default for Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
    Lanes<3>: LaneWidth<T>,
{
    fn default() -> Self {
        Self::identity()
    }
}

// ─── Operators ───

impl<T: Float> Add for Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { lanes: Q::<T>::add(self.lanes, rhs.lanes) }
    }
}

impl<T: Float> Sub for Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { lanes: Q::<T>::sub(self.lanes, rhs.lanes) }
    }
}

impl<T: Float> Neg for Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self { lanes: Q::<T>::neg(self.lanes) }
    }
}

impl<T: Float> Mul<T> for Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self { lanes: Q::<T>::mul(self.lanes, Q::<T>::fill(rhs)) }
    }
}

impl<T: Float> Div<T> for Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
{
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self { lanes: Q::<T>::div(self.lanes, Q::<T>::fill(rhs)) }
    }
}

impl<T: Float> Mul for Quaternion<T>
where
    Lanes<4>: LaneWidth<T>,
{
    type Output = Self;

    /// Hamilton product: `self` applied after `rhs` when used as rotations.
    ///
    /// Each lane of `self` scales a signed permutation of `rhs`:
    /// `w1 (x2, y2, z2, w2) + x1 (w2, -z2, y2, -x2)
    ///  + y1 (z2, w2, -x2, -y2) + z1 (-y2, x2, w2, -z2)`.
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.lanes, rhs.lanes);
        let one = T::ONE;
        let wzyx = Q::<T>::mul(Q::<T>::swizzle::<0, 1, 2, 3>(b), Q::<T>::from_array([one, -one, one, -one]));
        let zwxy = Q::<T>::mul(Q::<T>::swizzle::<1, 0, 3, 2>(b), Q::<T>::from_array([one, one, -one, -one]));
        let yxwz = Q::<T>::mul(Q::<T>::swizzle::<2, 3, 0, 1>(b), Q::<T>::from_array([-one, one, one, -one]));

        let r = Q::<T>::mul(Q::<T>::at::<3>(a), b);
        let r = Q::<T>::fm_add(Q::<T>::at::<0>(a), wzyx, r);
        let r = Q::<T>::fm_add(Q::<T>::at::<1>(a), zwxy, r);
        let r = Q::<T>::fm_add(Q::<T>::at::<2>(a), yxwz, r);
        Self { lanes: r }
    }
}

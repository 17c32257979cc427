// SPDX-License-Identifier: LGPL-3.0-or-later

//! Fixed-size vector over `N` lanes.
//!
//! Storage is the plain logical array; every operation loads it into the
//! backing register through `Traits<T, N>`, computes, and stores back.

use core::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use lane_math::lanes::{LaneWidth, Lanes, SimdOf};
use lane_math::math::narrow::{self, Narrow};
use lane_math::{Float, Traits};

use crate::error::AlgebraResult;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<T, const N: usize>(pub [T; N]);

impl<T: Float, const N: usize> Vector<T, N>
where
    Lanes<N>: LaneWidth<T>,
{
    #[inline]
    pub const fn new(values: [T; N]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline]
    pub fn zero() -> Self {
        Self([T::ZERO; N])
    }

    #[inline]
    pub(crate) fn load(self) -> SimdOf<T, N> {
        Traits::<T, N>::from_array(self.0)
    }

    #[inline]
    pub(crate) fn from_register(v: SimdOf<T, N>) -> Self {
        Self(Traits::<T, N>::to_array(v))
    }

    #[inline]
    fn map(self, f: impl Fn(SimdOf<T, N>) -> SimdOf<T, N>) -> Self {
        Self::from_register(f(self.load()))
    }

    #[inline]
    fn zip(self, rhs: Self, f: impl Fn(SimdOf<T, N>, SimdOf<T, N>) -> SimdOf<T, N>) -> Self {
        Self::from_register(f(self.load(), rhs.load()))
    }

    #[inline]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    // ─── Components ───

    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        const { assert!(N >= 2, "vector has no y component") };
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        const { assert!(N >= 3, "vector has no z component") };
        self.0[2]
    }

    #[inline]
    pub fn w(&self) -> T {
        const { assert!(N >= 4, "vector has no w component") };
        self.0[3]
    }

    // ─── Reductions ───

    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        Traits::<T, N>::first(Traits::<T, N>::dot(self.load(), rhs.load()))
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction. A zero vector yields NaN lanes.
    #[inline]
    pub fn normalize(self) -> Self {
        let v = self.load();
        let len = Traits::<T, N>::sqrt(Traits::<T, N>::dot(v, v));
        Self::from_register(Traits::<T, N>::div(v, len))
    }

    #[inline]
    pub fn distance(self, rhs: Self) -> T {
        (self - rhs).length()
    }

    #[inline]
    pub fn sum(self) -> T {
        Traits::<T, N>::first(Traits::<T, N>::h_sum(self.load()))
    }

    #[inline]
    pub fn horizontal_min(self) -> T {
        Traits::<T, N>::first(Traits::<T, N>::horizontal_min(self.load()))
    }

    #[inline]
    pub fn horizontal_max(self) -> T {
        Traits::<T, N>::first(Traits::<T, N>::horizontal_max(self.load()))
    }

    // ─── Lane-wise ───

    /// Lane minimum; a NaN lane in either vector yields the lane of `rhs`.
    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        self.zip(rhs, Traits::<T, N>::min)
    }

    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        self.zip(rhs, Traits::<T, N>::max)
    }

    #[inline]
    pub fn abs(self) -> Self {
        self.map(Traits::<T, N>::abs)
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        self.map(Traits::<T, N>::sqrt)
    }

    #[inline]
    pub fn floor(self) -> Self {
        self.map(Traits::<T, N>::floor)
    }

    #[inline]
    pub fn ceil(self) -> Self {
        self.map(Traits::<T, N>::ceil)
    }

    #[inline]
    pub fn round(self) -> Self {
        self.map(Traits::<T, N>::round)
    }

    #[inline]
    pub fn sin(self) -> Self {
        self.map(Traits::<T, N>::sin)
    }

    #[inline]
    pub fn cos(self) -> Self {
        self.map(Traits::<T, N>::cos)
    }

    #[inline]
    pub fn exp(self) -> Self {
        self.map(Traits::<T, N>::exp)
    }

    #[inline]
    pub fn log(self) -> Self {
        self.map(Traits::<T, N>::log)
    }

    #[inline]
    pub fn lerp(self, rhs: Self, t: T) -> Self {
        Self::from_register(Traits::<T, N>::lerp(self.load(), rhs.load(), Traits::<T, N>::fill(t)))
    }

    // ─── Predicates ───

    #[inline]
    pub fn has_nan(self) -> bool {
        Traits::<T, N>::has_nan(self.load())
    }

    /// Exact lane equality; NaN never compares equal.
    #[inline]
    pub fn all_equal(self, rhs: Self) -> bool {
        Traits::<T, N>::all_equal(self.load(), rhs.load())
    }

    /// Round every lane half away from zero and narrow to `I`.
    pub fn round_to<I: Narrow>(self) -> AlgebraResult<[I; N]> {
        let mut out = [I::from_integral(0.0); N];
        for (o, &x) in out.iter_mut().zip(&self.0) {
            *o = narrow::round_to(x)?;
        }
        Ok(out)
    }
}

impl<T: Float> Vector<T, 3>
where
    Lanes<3>: LaneWidth<T>,
{
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        self.zip(rhs, Traits::<T, 3>::cross)
    }
}

impl<T: Float, const N: usize> Default for Vector<T, N>
where
    Lanes<N>: LaneWidth<T>,
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(values: [T; N]) -> Self {
        Self(values)
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.0[i]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.0[i]
    }
}

// ─── Operators ───

macro_rules! vector_binop {
    ($($op:ident::$method:ident => $lane:ident),* $(,)?) => {
        $(
            impl<T: Float, const N: usize> $op for Vector<T, N>
            where
                Lanes<N>: LaneWidth<T>,
            {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Self) -> Self {
                    self.zip(rhs, Traits::<T, N>::$lane)
                }
            }

            impl<T: Float, const N: usize> $op<T> for Vector<T, N>
            where
                Lanes<N>: LaneWidth<T>,
            {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: T) -> Self {
                    self.zip(Self::splat(rhs), Traits::<T, N>::$lane)
                }
            }
        )*
    };
}

vector_binop! {
    Add::add => add,
    Sub::sub => sub,
    Mul::mul => mul,
    Div::div => div,
}

impl<T: Float, const N: usize> Neg for Vector<T, N>
where
    Lanes<N>: LaneWidth<T>,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(Traits::<T, N>::neg)
    }
}

impl<T: Float, const N: usize> AddAssign for Vector<T, N>
where
    Lanes<N>: LaneWidth<T>,
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Float, const N: usize> SubAssign for Vector<T, N>
where
    Lanes<N>: LaneWidth<T>,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Float, const N: usize> MulAssign<T> for Vector<T, N>
where
    Lanes<N>: LaneWidth<T>,
{
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

macro_rules! scalar_lhs {
    ($($float:ty),*) => {
        $(
            impl<const N: usize> Mul<Vector<$float, N>> for $float
            where
                Lanes<N>: LaneWidth<$float>,
            {
                type Output = Vector<$float, N>;

                #[inline]
                fn mul(self, rhs: Vector<$float, N>) -> Vector<$float, N> {
                    rhs * self
                }
            }
        )*
    };
}

scalar_lhs!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use lane_math::MathError;

    type V3 = Vector<f64, 3>;

    #[test]
    fn test_arithmetic() {
        let a = V3::new([1.0, 2.0, 3.0]);
        let b = V3::new([4.0, 5.0, 6.0]);
        assert_eq!(a + b, V3::new([5.0, 7.0, 9.0]));
        assert_eq!(b - a, V3::splat(3.0));
        assert_eq!(a * 2.0, V3::new([2.0, 4.0, 6.0]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(b / a, V3::new([4.0, 2.5, 2.0]));
        assert_eq!(-a, V3::new([-1.0, -2.0, -3.0]));
        let mut c = a;
        c += b;
        c *= 0.5;
        assert_eq!(c, V3::new([2.5, 3.5, 4.5]));
    }

    #[test]
    fn test_geometry() {
        let a = V3::new([1.0, 2.0, 3.0]);
        let b = V3::new([4.0, 5.0, 6.0]);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), V3::new([-3.0, 6.0, -3.0]));
        assert_eq!(V3::new([3.0, 4.0, 0.0]).length(), 5.0);
        assert_eq!(a.distance(a + V3::new([0.0, 3.0, 4.0])), 5.0);
        let n = b.normalize();
        assert_approx_eq!(f64, n.length(), 1.0, ulps = 2);
        assert!(V3::zero().normalize().has_nan());
    }

    #[test]
    fn test_reductions_and_components() {
        let v = Vector::<f32, 5>::new([3.0, -1.0, 4.0, 1.0, -5.0]);
        assert_eq!(v.sum(), 2.0);
        assert_eq!(v.horizontal_min(), -5.0);
        assert_eq!(v.horizontal_max(), 4.0);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (3.0, -1.0, 4.0, 1.0));
        assert_eq!(v[4], -5.0);
        assert_eq!(v.abs().sum(), 14.0);
    }

    #[test]
    fn test_lanewise_functions() {
        let v = Vector::<f64, 4>::new([0.0, 1.0, 2.0, 3.0]);
        assert_eq!(v.exp().log().round(), v);
        let s = v.sin();
        let c = v.cos();
        for i in 0..4 {
            assert_approx_eq!(f64, s[i] * s[i] + c[i] * c[i], 1.0, epsilon = 1e-15);
        }
        let h = Vector::<f64, 2>::new([-1.5, 2.5]);
        assert_eq!(h.floor(), Vector::new([-2.0, 2.0]));
        assert_eq!(h.ceil(), Vector::new([-1.0, 3.0]));
        assert_eq!(h.round(), Vector::new([-2.0, 3.0]));
        assert_eq!(Vector::<f64, 2>::new([4.0, 9.0]).sqrt(), Vector::new([2.0, 3.0]));
    }

    #[test]
    fn test_min_max_lerp() {
        let a = V3::new([1.0, f64::NAN, 3.0]);
        let b = V3::new([2.0, 0.0, -3.0]);
        assert_eq!(a.min(b), V3::new([1.0, 0.0, -3.0]));
        assert_eq!(a.max(b), V3::new([2.0, 0.0, 3.0]));
        let c = V3::new([1.0, 2.0, 3.0]);
        assert_eq!(c.lerp(b, 0.0), c);
        assert_eq!(c.lerp(b, 1.0), b);
        assert!(!a.all_equal(a));
        assert!(c.all_equal(c));
    }

    #[test]
    fn test_min_keeps_first_on_ties() {
        let a = Vector::<f32, 2>::new([-1.0, 10.0]);
        let b = Vector::<f32, 2>::new([-1.0, 100.0]);
        assert_eq!(a.min(b), Vector::new([-1.0, 10.0]));
        assert_eq!(b.min(a), Vector::new([-1.0, 10.0]));
        assert_eq!(a.max(b), Vector::new([-1.0, 100.0]));
    }

    #[test]
    fn test_round_to_integers() {
        let v = V3::new([1.4, -2.5, 7.6]);
        assert_eq!(v.round_to::<i32>(), Ok([1, -3, 8]));
        let err = V3::new([0.0, 1e10, 0.0]).round_to::<i32>().unwrap_err();
        assert!(matches!(err, crate::AlgebraError::Math(MathError::NarrowingOverflow { .. })));
    }
}

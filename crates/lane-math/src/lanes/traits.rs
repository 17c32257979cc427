// SPDX-License-Identifier: LGPL-3.0-or-later

//! `LaneTraits<T, N, B>`: the operation set over `N` logical lanes of `T`.
//!
//! Every operation is an associated function taking and returning register
//! values; there is no state. Elementwise operations go through the backend
//! `B`. Reductions, permutations and comparisons that only make sense on
//! logical lanes are written here directly.
//!
//! # Conventions
//!
//! - [`load`](LaneTraits::load) reads exactly `N` elements and zeroes
//!   padding. [`store`](LaneTraits::store) writes exactly `N` elements and
//!   leaves the rest of the destination untouched. Slices have no alignment
//!   requirement; register values are aligned by type
//!   ([`ALIGNMENT`](LaneTraits::ALIGNMENT)).
//! - [`set`](LaneTraits::set) is reversed: lane 0 receives the last array
//!   element, as `_mm_set_ps` does.
//! - [`min`](LaneTraits::min) and [`max`](LaneTraits::max) are
//!   `if a < b { a } else { b }` and `if a > b { a } else { b }`: when either
//!   lane is NaN, the lane from `b` is returned.
//! - Horizontal reductions pad lanes `N..WIDTH` with the operation's
//!   identity, reduce pairwise across the whole register and broadcast the
//!   result into every logical lane.

use core::marker::PhantomData;

use super::backend::{Backend, DefaultBackend};
use super::register::{LaneWidth, Lanes, Register, SimdOf};
use crate::element::{Element, Float};

/// Operations over `N` logical lanes of `T`, evaluated by backend `B`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaneTraits<T, const N: usize, B>(PhantomData<(T, B)>);

/// [`LaneTraits`] on the configured default backend.
pub type Traits<T, const N: usize> = LaneTraits<T, N, DefaultBackend>;

impl<T: Element, const N: usize, B: Backend> LaneTraits<T, N, B>
where
    Lanes<N>: LaneWidth<T>,
{
    /// Logical lane count.
    pub const LANES: usize = N;
    /// Physical lane count of the backing register.
    pub const WIDTH: usize = <SimdOf<T, N> as Register>::WIDTH;
    /// Alignment of the backing register in bytes.
    pub const ALIGNMENT: usize = <SimdOf<T, N> as Register>::ALIGN;

    // ─── Construction, load and store ───

    #[inline]
    pub fn zero() -> SimdOf<T, N> {
        <SimdOf<T, N> as Default>::default()
    }

    /// Broadcast `value` into every logical lane.
    #[inline]
    pub fn fill(value: T) -> SimdOf<T, N> {
        let mut r = Self::zero();
        r.lanes_mut()[..N].fill(value);
        r
    }

    /// Lane 0 gets `values[N - 1]`, lane `N - 1` gets `values[0]`.
    #[inline]
    pub fn set(values: [T; N]) -> SimdOf<T, N> {
        let mut r = Self::zero();
        for (lane, &v) in r.lanes_mut()[..N].iter_mut().zip(values.iter().rev()) {
            *lane = v;
        }
        r
    }

    /// Read `src[..N]` and zero the padding lanes. `src` must hold at least
    /// `N` elements.
    #[inline]
    pub fn load(src: &[T]) -> SimdOf<T, N> {
        debug_assert!(src.len() >= N, "load needs {N} elements, got {}", src.len());
        let mut r = Self::zero();
        r.lanes_mut()[..N].copy_from_slice(&src[..N]);
        r
    }

    /// Write the logical lanes to `dst[..N]`, leaving `dst[N..]` untouched.
    /// `dst` must hold at least `N` elements.
    #[inline]
    pub fn store(dst: &mut [T], v: SimdOf<T, N>) {
        debug_assert!(dst.len() >= N, "store needs {N} elements, got {}", dst.len());
        dst[..N].copy_from_slice(&v.lanes()[..N]);
    }

    #[inline]
    pub fn to_array(v: SimdOf<T, N>) -> [T; N] {
        let mut out = [T::ZERO; N];
        out.copy_from_slice(&v.lanes()[..N]);
        out
    }

    #[inline]
    pub fn from_array(values: [T; N]) -> SimdOf<T, N> {
        Self::load(&values)
    }

    // ─── Lane access ───

    #[inline]
    pub fn first(v: SimdOf<T, N>) -> T {
        v.lanes()[0]
    }

    /// Lane `I`; `I >= N` does not compile.
    #[inline]
    pub fn extract<const I: usize>(v: SimdOf<T, N>) -> T {
        const { assert!(I < N, "lane index out of range") };
        v.lanes()[I]
    }

    /// Lane `I` broadcast into every logical lane.
    #[inline]
    pub fn at<const I: usize>(v: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::fill(Self::extract::<I>(v))
    }

    // ─── Arithmetic ───

    #[inline]
    pub fn add(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_add)
    }

    #[inline]
    pub fn sub(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_sub)
    }

    #[inline]
    pub fn mul(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_mul)
    }

    /// Even lanes `a - b`, odd lanes `a + b`.
    #[inline]
    pub fn add_sub(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip_indexed(N, a, b, |i, x, y| if i % 2 == 0 { x.lane_sub(y) } else { x.lane_add(y) })
    }

    #[inline]
    pub fn min(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_min)
    }

    #[inline]
    pub fn max(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_max)
    }

    // ─── Horizontal ───

    /// Pad to full width with `identity`, reduce pairwise, broadcast.
    #[inline]
    fn reduce(v: SimdOf<T, N>, identity: T, op: impl Fn(T, T) -> T) -> SimdOf<T, N> {
        let mut acc = v;
        let lanes = acc.lanes_mut();
        lanes[N..].fill(identity);
        let mut width = lanes.len();
        while width > 1 {
            let half = width / 2;
            for i in 0..half {
                lanes[i] = op(lanes[i], lanes[i + half]);
            }
            width = half;
        }
        Self::fill(lanes[0])
    }

    #[inline]
    pub fn h_sum(v: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::reduce(v, T::ZERO, T::lane_add)
    }

    #[inline]
    pub fn h_prod(v: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::reduce(v, T::ONE, T::lane_mul)
    }

    #[inline]
    pub fn horizontal_min(v: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::reduce(v, T::MIN_IDENTITY, T::lane_min)
    }

    #[inline]
    pub fn horizontal_max(v: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::reduce(v, T::MAX_IDENTITY, T::lane_max)
    }

    // ─── Permutation ───

    /// `r0 = a[S0], r1 = a[S1], r2 = b[S2], r3 = b[S3]`, in `_MM_SHUFFLE`
    /// argument order. Only for four-lane registers.
    #[inline]
    pub fn shuffle<const S3: usize, const S2: usize, const S1: usize, const S0: usize>(
        a: SimdOf<T, N>,
        b: SimdOf<T, N>,
    ) -> SimdOf<T, N> {
        const {
            assert!(<SimdOf<T, N> as Register>::WIDTH == 4, "shuffle needs a four-lane register");
            assert!(S0 < 4 && S1 < 4 && S2 < 4 && S3 < 4, "shuffle index out of range");
        };
        let (a, b) = (a.lanes(), b.lanes());
        let mut r = Self::zero();
        r.lanes_mut().copy_from_slice(&[a[S0], a[S1], b[S2], b[S3]]);
        r
    }

    /// [`shuffle`](Self::shuffle) with both operands `v`.
    #[inline]
    pub fn swizzle<const S3: usize, const S2: usize, const S1: usize, const S0: usize>(
        v: SimdOf<T, N>,
    ) -> SimdOf<T, N> {
        Self::shuffle::<S3, S2, S1, S0>(v, v)
    }

    // ─── Predicates ───

    /// `true` when every logical lane compares equal. NaN is never equal.
    #[inline]
    pub fn all_equal(a: SimdOf<T, N>, b: SimdOf<T, N>) -> bool {
        a.lanes()[..N] == b.lanes()[..N]
    }

    #[inline]
    pub fn has_nan(v: SimdOf<T, N>) -> bool {
        v.lanes()[..N].iter().any(|x| x.is_nan())
    }

    // ─── Comparison masks: all bits set where the predicate holds ───

    #[inline]
    pub fn equal(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, |x, y| T::mask(x == y))
    }

    #[inline]
    pub fn not_equal(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, |x, y| T::mask(x != y))
    }

    #[inline]
    pub fn less_than(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, |x, y| T::mask(x < y))
    }

    #[inline]
    pub fn less_or_equal(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, |x, y| T::mask(x <= y))
    }

    #[inline]
    pub fn greater_than(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, |x, y| T::mask(x > y))
    }

    #[inline]
    pub fn greater_or_equal(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, |x, y| T::mask(x >= y))
    }

    // ─── Bitwise ───

    #[inline]
    pub fn and(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_and)
    }

    #[inline]
    pub fn or(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_or)
    }

    #[inline]
    pub fn xor(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_xor)
    }

    /// `!a & b`.
    #[inline]
    pub fn and_not(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, T::lane_and_not)
    }

    /// Bitwise blend: `a` where `mask` bits are set, `b` elsewhere.
    #[inline]
    pub fn select(mask: SimdOf<T, N>, a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip3(N, mask, a, b, |m, x, y| m.lane_and(x).lane_or(m.lane_and_not(y)))
    }
}

impl<T: Float, const N: usize, B: Backend> LaneTraits<T, N, B>
where
    Lanes<N>: LaneWidth<T>,
{
    #[inline]
    pub fn div(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip(N, a, b, |x, y| x / y)
    }

    #[inline]
    pub fn neg(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, |x| -x)
    }

    #[inline]
    pub fn abs(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, Float::abs)
    }

    /// `min(max(v, lower), upper)` per lane.
    #[inline]
    pub fn clamp(v: SimdOf<T, N>, lower: SimdOf<T, N>, upper: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::min(Self::max(v, lower), upper)
    }

    /// Clamp to `[0, 1]`.
    #[inline]
    pub fn saturate(v: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::clamp(v, Self::zero(), Self::fill(T::ONE))
    }

    // ─── Fused multiply-add family ───

    /// `a * b + c`
    #[inline]
    pub fn fm_add(a: SimdOf<T, N>, b: SimdOf<T, N>, c: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip3(N, a, b, c, |x, y, z| x.mul_add(y, z))
    }

    /// `a * b - c`
    #[inline]
    pub fn fm_sub(a: SimdOf<T, N>, b: SimdOf<T, N>, c: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip3(N, a, b, c, |x, y, z| x.mul_add(y, -z))
    }

    /// `-(a * b) + c`
    #[inline]
    pub fn fnm_add(a: SimdOf<T, N>, b: SimdOf<T, N>, c: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip3(N, a, b, c, |x, y, z| (-x).mul_add(y, z))
    }

    /// `-(a * b) - c`
    #[inline]
    pub fn fnm_sub(a: SimdOf<T, N>, b: SimdOf<T, N>, c: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip3(N, a, b, c, |x, y, z| (-x).mul_add(y, -z))
    }

    /// Even lanes `a * b - c`, odd lanes `a * b + c`.
    #[inline]
    pub fn fm_add_sub(a: SimdOf<T, N>, b: SimdOf<T, N>, c: SimdOf<T, N>) -> SimdOf<T, N> {
        let c = B::zip_indexed(N, c, c, |i, z, _| if i % 2 == 0 { -z } else { z });
        Self::fm_add(a, b, c)
    }

    /// Even lanes `a * b + c`, odd lanes `a * b - c`.
    #[inline]
    pub fn fm_sub_add(a: SimdOf<T, N>, b: SimdOf<T, N>, c: SimdOf<T, N>) -> SimdOf<T, N> {
        let c = B::zip_indexed(N, c, c, |i, z, _| if i % 2 == 0 { z } else { -z });
        Self::fm_add(a, b, c)
    }

    // ─── Roots and rounding ───

    #[inline]
    pub fn sqrt(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, Float::sqrt)
    }

    #[inline]
    pub fn reciprocal_sqrt(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, Float::reciprocal_sqrt)
    }

    #[inline]
    pub fn floor(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, Float::floor)
    }

    #[inline]
    pub fn ceil(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, Float::ceil)
    }

    #[inline]
    pub fn trunc(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, Float::trunc)
    }

    /// Round half away from zero.
    #[inline]
    pub fn round(v: SimdOf<T, N>) -> SimdOf<T, N> {
        B::map(N, v, Float::round)
    }

    /// `a + t * (b - a)` per lane, exact at `t = 0` and `t = 1` and
    /// monotonic in `t`.
    #[inline]
    pub fn lerp(a: SimdOf<T, N>, b: SimdOf<T, N>, t: SimdOf<T, N>) -> SimdOf<T, N> {
        B::zip3(N, a, b, t, Float::lerp)
    }

    // ─── Geometry ───

    /// Sum of lane products, broadcast.
    #[inline]
    pub fn dot(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        Self::h_sum(Self::mul(a, b))
    }

    /// Cross product of lanes 0..3; remaining logical lanes are zero.
    #[inline]
    pub fn cross(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        const { assert!(N >= 3, "cross needs three lanes") };
        let (a, b) = (a.lanes(), b.lanes());
        let mut r = Self::zero();
        let lanes = r.lanes_mut();
        lanes[0] = a[1] * b[2] - a[2] * b[1];
        lanes[1] = a[2] * b[0] - a[0] * b[2];
        lanes[2] = a[0] * b[1] - a[1] * b[0];
        r
    }

    /// Pairwise horizontal add across both operands: the low half of the
    /// result holds `a[2i] + a[2i+1]`, the high half `b[2i] + b[2i+1]`,
    /// over the full register width.
    #[inline]
    pub fn h_add(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
        let width = <SimdOf<T, N> as Register>::WIDTH;
        let half = width / 2;
        let mut r = Self::zero();
        let (la, lb) = (a.lanes(), b.lanes());
        let lanes = r.lanes_mut();
        if width == 1 {
            lanes[0] = la[0];
            return r;
        }
        for i in 0..half {
            lanes[i] = la[2 * i] + la[2 * i + 1];
            lanes[half + i] = lb[2 * i] + lb[2 * i + 1];
        }
        r
    }
}

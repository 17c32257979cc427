// SPDX-License-Identifier: LGPL-3.0-or-later

//! Lane-wise elementary functions.
//!
//! Each lane is evaluated independently with the portable ports in
//! [`crate::libm`], so a register result is bit-identical to calling the
//! scalar [`Float`] method on each lane. Accuracy bounds are in
//! [`crate::libm::tolerance`].

use super::backend::Backend;
use super::register::{LaneWidth, Lanes, SimdOf};
use super::traits::LaneTraits;
use crate::element::Float;

macro_rules! unary {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(v: SimdOf<T, N>) -> SimdOf<T, N> {
                B::map(N, v, <T as Float>::$name)
            }
        )*
    };
}

macro_rules! binary {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(a: SimdOf<T, N>, b: SimdOf<T, N>) -> SimdOf<T, N> {
                B::zip(N, a, b, <T as Float>::$name)
            }
        )*
    };
}

impl<T: Float, const N: usize, B: Backend> LaneTraits<T, N, B>
where
    Lanes<N>: LaneWidth<T>,
{
    unary! {
        /// Sine with exact argument reduction for any finite input.
        sin,
        cos,
        tan,
        /// NaN outside `[-1, 1]`.
        asin,
        /// NaN outside `[-1, 1]`.
        acos,
        atan,
        exp,
        exp2,
        exp10,
        expm1,
        log,
        log2,
        log10,
        log1p,
        sinh,
        cosh,
        tanh,
        asinh,
        acosh,
        atanh,
        cbrt,
        deg2rad,
        rad2deg,
    }

    binary! {
        /// Angle of `(b, a)`, i.e. `atan2(y = a, x = b)` per lane.
        atan2,
        pow,
        hypot,
        /// Remainder with the sign of `a`.
        fmod,
    }
}

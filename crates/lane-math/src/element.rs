// SPDX-License-Identifier: LGPL-3.0-or-later

//! Lane element types.
//!
//! [`Element`] is what a register lane can hold: `f32`, `f64` or `u8`.
//! [`Float`] adds everything that only makes sense for floating point,
//! including the transcendental functions. Float methods route to the
//! bit-exact primitives in [`crate::math::scalar`] and to the ports in
//! [`crate::libm`], never to the platform C library, so results do not
//! depend on the host.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::float::BitModel;
use crate::libm;
use crate::math::scalar::{double, single};

/// A value that can occupy one lane of a register.
pub trait Element: Copy + PartialEq + PartialOrd + Debug + Default + Send + Sync + 'static {
    const ZERO: Self;
    const ONE: Self;
    /// Identity of a minimum reduction.
    const MIN_IDENTITY: Self;
    /// Identity of a maximum reduction.
    const MAX_IDENTITY: Self;
    /// All bits set. Comparison masks use it for "true" lanes.
    const MASK_TRUE: Self;

    fn lane_add(self, rhs: Self) -> Self;
    fn lane_sub(self, rhs: Self) -> Self;
    fn lane_mul(self, rhs: Self) -> Self;

    /// `if self < rhs { self } else { rhs }`.
    #[inline]
    fn lane_min(self, rhs: Self) -> Self {
        if self < rhs { self } else { rhs }
    }

    /// `if self > rhs { self } else { rhs }`.
    #[inline]
    fn lane_max(self, rhs: Self) -> Self {
        if self > rhs { self } else { rhs }
    }

    fn lane_and(self, rhs: Self) -> Self;
    fn lane_or(self, rhs: Self) -> Self;
    fn lane_xor(self, rhs: Self) -> Self;
    /// `!self & rhs`.
    fn lane_and_not(self, rhs: Self) -> Self;

    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    #[inline]
    fn mask(condition: bool) -> Self {
        if condition { Self::MASK_TRUE } else { Self::ZERO }
    }
}

impl Element for u8 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MIN_IDENTITY: Self = u8::MAX;
    const MAX_IDENTITY: Self = 0;
    const MASK_TRUE: Self = 0xff;

    #[inline]
    fn lane_add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
    #[inline]
    fn lane_sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
    #[inline]
    fn lane_mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
    #[inline]
    fn lane_and(self, rhs: Self) -> Self {
        self & rhs
    }
    #[inline]
    fn lane_or(self, rhs: Self) -> Self {
        self | rhs
    }
    #[inline]
    fn lane_xor(self, rhs: Self) -> Self {
        self ^ rhs
    }
    #[inline]
    fn lane_and_not(self, rhs: Self) -> Self {
        !self & rhs
    }
}

/// Floating-point lane element.
pub trait Float:
    Element
    + BitModel
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const TWO: Self;
    const HALF: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const NAN: Self;
    const EPSILON: Self;
    const MAX: Self;
    /// Most negative finite value.
    const LOWEST: Self;
    /// Smallest positive normal value.
    const MIN_POSITIVE: Self;
    const PI: Self;

    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    fn is_inf(self) -> bool;
    fn is_finite(self) -> bool;
    fn sign_bit(self) -> bool;

    fn abs(self) -> Self;
    fn fast_abs(self) -> Self;
    fn copy_sign(self, sign: Self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn trunc(self) -> Self;
    fn round(self) -> Self;
    fn frexp(self) -> (Self, i32);
    fn ldexp(self, exponent: i32) -> Self;
    fn modf(self) -> (Self, Self);
    fn next_after(self, direction: Self) -> Self;
    fn next_up(self) -> Self;
    fn next_down(self) -> Self;
    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;
    fn reciprocal_sqrt(self) -> Self;
    fn clamp(self, lower: Self, upper: Self) -> Self;
    fn lerp(a: Self, b: Self, t: Self) -> Self;
    fn deg2rad(self) -> Self;
    fn rad2deg(self) -> Self;
    fn mul_add(self, a: Self, b: Self) -> Self;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, x: Self) -> Self;
    fn exp(self) -> Self;
    fn exp2(self) -> Self;
    fn exp10(self) -> Self;
    fn expm1(self) -> Self;
    fn log(self) -> Self;
    fn log2(self) -> Self;
    fn log10(self) -> Self;
    fn log1p(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;
    fn pow(self, y: Self) -> Self;
    fn hypot(self, y: Self) -> Self;
    fn fmod(self, y: Self) -> Self;

    /// `asin` with the argument clamped to `[-1, 1]`.
    #[inline]
    fn safe_asin(self) -> Self {
        self.clamp(-Self::ONE, Self::ONE).asin()
    }

    /// `acos` with the argument clamped to `[-1, 1]`.
    #[inline]
    fn safe_acos(self) -> Self {
        self.clamp(-Self::ONE, Self::ONE).acos()
    }
}

macro_rules! impl_float {
    ($float:ident, $bits:ty, $scalar:ident) => {
        impl Element for $float {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MIN_IDENTITY: Self = $float::INFINITY;
            const MAX_IDENTITY: Self = $float::NEG_INFINITY;
            const MASK_TRUE: Self = $float::from_bits(<$bits>::MAX);

            #[inline]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }
            #[inline]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }
            #[inline]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }
            #[inline]
            fn lane_and(self, rhs: Self) -> Self {
                $float::from_bits(self.to_bits() & rhs.to_bits())
            }
            #[inline]
            fn lane_or(self, rhs: Self) -> Self {
                $float::from_bits(self.to_bits() | rhs.to_bits())
            }
            #[inline]
            fn lane_xor(self, rhs: Self) -> Self {
                $float::from_bits(self.to_bits() ^ rhs.to_bits())
            }
            #[inline]
            fn lane_and_not(self, rhs: Self) -> Self {
                $float::from_bits(!self.to_bits() & rhs.to_bits())
            }
            #[inline]
            fn is_nan(self) -> bool {
                $scalar::is_nan(self)
            }
        }

        impl Float for $float {
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const INFINITY: Self = $float::INFINITY;
            const NEG_INFINITY: Self = $float::NEG_INFINITY;
            const NAN: Self = $float::NAN;
            const EPSILON: Self = $float::EPSILON;
            const MAX: Self = $float::MAX;
            const LOWEST: Self = $float::MIN;
            const MIN_POSITIVE: Self = $float::MIN_POSITIVE;
            const PI: Self = core::$float::consts::PI;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $float
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn is_inf(self) -> bool {
                $scalar::is_inf(self)
            }
            #[inline]
            fn is_finite(self) -> bool {
                $scalar::is_finite(self)
            }
            #[inline]
            fn sign_bit(self) -> bool {
                $scalar::sign_bit(self)
            }

            #[inline]
            fn abs(self) -> Self {
                $scalar::abs(self)
            }
            #[inline]
            fn fast_abs(self) -> Self {
                $scalar::fast_abs(self)
            }
            #[inline]
            fn copy_sign(self, sign: Self) -> Self {
                $scalar::copy_sign(self, sign)
            }
            #[inline]
            fn floor(self) -> Self {
                $scalar::floor(self)
            }
            #[inline]
            fn ceil(self) -> Self {
                $scalar::ceil(self)
            }
            #[inline]
            fn trunc(self) -> Self {
                $scalar::trunc(self)
            }
            #[inline]
            fn round(self) -> Self {
                $scalar::round(self)
            }
            #[inline]
            fn frexp(self) -> (Self, i32) {
                $scalar::frexp(self)
            }
            #[inline]
            fn ldexp(self, exponent: i32) -> Self {
                $scalar::ldexp(self, exponent)
            }
            #[inline]
            fn modf(self) -> (Self, Self) {
                $scalar::modf(self)
            }
            #[inline]
            fn next_after(self, direction: Self) -> Self {
                $scalar::next_after(self, direction)
            }
            #[inline]
            fn next_up(self) -> Self {
                $scalar::next_up(self)
            }
            #[inline]
            fn next_down(self) -> Self {
                $scalar::next_down(self)
            }
            // Hardware root; correctly rounded like the const version.
            #[inline]
            fn sqrt(self) -> Self {
                $float::sqrt(self)
            }
            #[inline]
            fn cbrt(self) -> Self {
                $scalar::cbrt(self)
            }
            #[inline]
            fn reciprocal_sqrt(self) -> Self {
                1.0 / $float::sqrt(self)
            }
            #[inline]
            fn clamp(self, lower: Self, upper: Self) -> Self {
                $scalar::clamp(self, lower, upper)
            }
            #[inline]
            fn lerp(a: Self, b: Self, t: Self) -> Self {
                $scalar::lerp(a, b, t)
            }
            #[inline]
            fn deg2rad(self) -> Self {
                $scalar::deg2rad(self)
            }
            #[inline]
            fn rad2deg(self) -> Self {
                $scalar::rad2deg(self)
            }
            #[inline]
            fn mul_add(self, a: Self, b: Self) -> Self {
                $float::mul_add(self, a, b)
            }

            #[inline]
            fn sin(self) -> Self {
                libm::sin(self as f64) as $float
            }
            #[inline]
            fn cos(self) -> Self {
                libm::cos(self as f64) as $float
            }
            #[inline]
            fn tan(self) -> Self {
                libm::tan(self as f64) as $float
            }
            #[inline]
            fn asin(self) -> Self {
                libm::asin(self as f64) as $float
            }
            #[inline]
            fn acos(self) -> Self {
                libm::acos(self as f64) as $float
            }
            #[inline]
            fn atan(self) -> Self {
                libm::atan(self as f64) as $float
            }
            #[inline]
            fn atan2(self, x: Self) -> Self {
                libm::atan2(self as f64, x as f64) as $float
            }
            #[inline]
            fn exp(self) -> Self {
                libm::exp(self as f64) as $float
            }
            #[inline]
            fn exp2(self) -> Self {
                libm::exp2(self as f64) as $float
            }
            #[inline]
            fn exp10(self) -> Self {
                libm::exp10(self as f64) as $float
            }
            #[inline]
            fn expm1(self) -> Self {
                libm::expm1(self as f64) as $float
            }
            #[inline]
            fn log(self) -> Self {
                libm::log(self as f64) as $float
            }
            #[inline]
            fn log2(self) -> Self {
                libm::log2(self as f64) as $float
            }
            #[inline]
            fn log10(self) -> Self {
                libm::log10(self as f64) as $float
            }
            #[inline]
            fn log1p(self) -> Self {
                libm::log1p(self as f64) as $float
            }
            #[inline]
            fn sinh(self) -> Self {
                libm::sinh(self as f64) as $float
            }
            #[inline]
            fn cosh(self) -> Self {
                libm::cosh(self as f64) as $float
            }
            #[inline]
            fn tanh(self) -> Self {
                libm::tanh(self as f64) as $float
            }
            #[inline]
            fn asinh(self) -> Self {
                libm::asinh(self as f64) as $float
            }
            #[inline]
            fn acosh(self) -> Self {
                libm::acosh(self as f64) as $float
            }
            #[inline]
            fn atanh(self) -> Self {
                libm::atanh(self as f64) as $float
            }
            #[inline]
            fn pow(self, y: Self) -> Self {
                libm::pow(self as f64, y as f64) as $float
            }
            #[inline]
            fn hypot(self, y: Self) -> Self {
                libm::hypot(self as f64, y as f64) as $float
            }
            #[inline]
            fn fmod(self, y: Self) -> Self {
                libm::fmod(self as f64, y as f64) as $float
            }
        }
    };
}

impl_float!(f32, u32, single);
impl_float!(f64, u64, double);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn generic_hypot<T: Float>(a: T, b: T) -> T {
        (a * a + b * b).sqrt()
    }

    #[test]
    fn test_identities() {
        assert_eq!(<f32 as Element>::MIN_IDENTITY, f32::INFINITY);
        assert_eq!(<f64 as Element>::MAX_IDENTITY, f64::NEG_INFINITY);
        assert_eq!(<u8 as Element>::MIN_IDENTITY, 255);
        assert!(<f32 as Element>::MASK_TRUE.is_nan());
        assert_eq!(<f64 as Element>::MASK_TRUE.to_bits(), u64::MAX);
    }

    #[test]
    fn test_byte_arithmetic_wraps() {
        assert_eq!(250u8.lane_add(10), 4);
        assert_eq!(3u8.lane_sub(5), 254);
        assert_eq!(16u8.lane_mul(17), 16);
        assert_eq!(0b1100u8.lane_and_not(0b1010), 0b0010);
    }

    #[test]
    fn test_float_bit_ops() {
        let mask = <f64 as Element>::mask(true);
        assert_eq!(mask.lane_and(2.5), 2.5);
        assert_eq!(<f64 as Element>::mask(false).lane_and(2.5), 0.0);
        assert_eq!((-1.5f32).lane_and_not(-1.5).to_bits(), 0);
        assert_eq!((-0.0f32).lane_xor(3.0), -3.0);
    }

    #[test]
    fn test_generic_dispatch() {
        assert_approx_eq!(f32, generic_hypot(3.0f32, 4.0), 5.0, ulps = 1);
        assert_approx_eq!(f64, Float::sin(1.0f64), 1.0f64.sin(), ulps = 1);
        assert_approx_eq!(f32, Float::pow(2.0f32, 10.0), 1024.0, ulps = 1);
        assert_eq!(Float::safe_asin(1.5f64), core::f64::consts::FRAC_PI_2);
    }
}

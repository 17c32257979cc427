// SPDX-License-Identifier: LGPL-3.0-or-later

//! IEEE-754 bit model for `f32` and `f64`.
//!
//! A float is viewed as `sign | biased exponent | fraction` packed into an
//! unsigned integer of the same width. Conversion goes through
//! `to_bits`/`from_bits`, which are lossless bit casts.
//!
//! Two views are provided:
//! - [`single`] and [`double`]: `const fn` accessors usable in constant
//!   evaluation, which the scalar primitives in [`crate::math::scalar`] are
//!   built from.
//! - [`BitModel`]: the same accessors as a trait, for code that is generic
//!   over the element type.

/// Bit-level decomposition of an IEEE-754 binary floating-point type.
pub trait BitModel: Copy {
    /// Unsigned integer of the same width.
    type Bits: Copy + Eq + core::fmt::Debug;

    const EXPONENT_BITS: u32;
    const FRACTION_BITS: u32;
    const EXPONENT_BIAS: i32;
    /// Biased exponent of infinities and NaNs.
    const MAX_BIASED_EXPONENT: u32;
    const SIGN_MASK: Self::Bits;
    const EXPONENT_MASK: Self::Bits;
    const FRACTION_MASK: Self::Bits;

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;

    /// `true` when the sign bit is set, including `-0.0` and negative NaNs.
    fn sign(self) -> bool;
    fn biased_exponent(self) -> u32;
    /// Biased exponent minus the bias. Zero and denormals report `-bias`.
    fn unbiased_exponent(self) -> i32;
    fn fraction(self) -> Self::Bits;
    /// Rebuild a value from its fields. Out-of-range fields are masked.
    fn compose(sign: bool, biased_exponent: u32, fraction: Self::Bits) -> Self;
}

macro_rules! bit_model {
    ($module:ident, $float:ty, $bits:ty, exponent_bits = $ebits:expr, fraction_bits = $fbits:expr) => {
        #[doc = concat!("`const fn` bit accessors for `", stringify!($float), "`.")]
        pub mod $module {
            pub const EXPONENT_BITS: u32 = $ebits;
            pub const FRACTION_BITS: u32 = $fbits;
            pub const EXPONENT_BIAS: i32 = (1 << (EXPONENT_BITS - 1)) - 1;
            pub const MAX_BIASED_EXPONENT: u32 = (1 << EXPONENT_BITS) - 1;

            pub const SIGN_MASK: $bits = 1 << (EXPONENT_BITS + FRACTION_BITS);
            pub const EXPONENT_MASK: $bits = (MAX_BIASED_EXPONENT as $bits) << FRACTION_BITS;
            pub const FRACTION_MASK: $bits = (1 << FRACTION_BITS) - 1;
            /// Implicit leading bit of a normal value's significand.
            pub const HIDDEN_BIT: $bits = 1 << FRACTION_BITS;

            /// Top fraction bit; set on every quiet NaN.
            pub const QUIET_BIT: $bits = 1 << (FRACTION_BITS - 1);
            pub const QUIET_NAN: $float = <$float>::NAN;
            /// Exponent all ones, quiet bit clear, lowest payload bit set.
            pub const SIGNALING_NAN: $float = <$float>::from_bits(EXPONENT_MASK | 1);
            /// Smallest positive denormal.
            pub const DENORM_MIN: $float = <$float>::from_bits(1);

            #[inline]
            pub const fn to_bits(x: $float) -> $bits {
                x.to_bits()
            }

            #[inline]
            pub const fn from_bits(bits: $bits) -> $float {
                <$float>::from_bits(bits)
            }

            #[inline]
            pub const fn sign(x: $float) -> bool {
                to_bits(x) & SIGN_MASK != 0
            }

            #[inline]
            pub const fn biased_exponent(x: $float) -> u32 {
                ((to_bits(x) & EXPONENT_MASK) >> FRACTION_BITS) as u32
            }

            #[inline]
            pub const fn unbiased_exponent(x: $float) -> i32 {
                biased_exponent(x) as i32 - EXPONENT_BIAS
            }

            #[inline]
            pub const fn fraction(x: $float) -> $bits {
                to_bits(x) & FRACTION_MASK
            }

            #[inline]
            pub const fn compose(sign: bool, biased_exponent: u32, fraction: $bits) -> $float {
                let s = if sign { SIGN_MASK } else { 0 };
                let e = ((biased_exponent & MAX_BIASED_EXPONENT) as $bits) << FRACTION_BITS;
                from_bits(s | e | (fraction & FRACTION_MASK))
            }

            /// Magnitude bits with the sign cleared.
            #[inline]
            pub const fn magnitude(x: $float) -> $bits {
                to_bits(x) & !SIGN_MASK
            }
        }

        impl BitModel for $float {
            type Bits = $bits;

            const EXPONENT_BITS: u32 = $module::EXPONENT_BITS;
            const FRACTION_BITS: u32 = $module::FRACTION_BITS;
            const EXPONENT_BIAS: i32 = $module::EXPONENT_BIAS;
            const MAX_BIASED_EXPONENT: u32 = $module::MAX_BIASED_EXPONENT;
            const SIGN_MASK: $bits = $module::SIGN_MASK;
            const EXPONENT_MASK: $bits = $module::EXPONENT_MASK;
            const FRACTION_MASK: $bits = $module::FRACTION_MASK;

            #[inline]
            fn to_bits(self) -> $bits {
                $module::to_bits(self)
            }
            #[inline]
            fn from_bits(bits: $bits) -> Self {
                $module::from_bits(bits)
            }
            #[inline]
            fn sign(self) -> bool {
                $module::sign(self)
            }
            #[inline]
            fn biased_exponent(self) -> u32 {
                $module::biased_exponent(self)
            }
            #[inline]
            fn unbiased_exponent(self) -> i32 {
                $module::unbiased_exponent(self)
            }
            #[inline]
            fn fraction(self) -> $bits {
                $module::fraction(self)
            }
            #[inline]
            fn compose(sign: bool, biased_exponent: u32, fraction: $bits) -> Self {
                $module::compose(sign, biased_exponent, fraction)
            }
        }
    };
}

bit_model!(single, f32, u32, exponent_bits = 8, fraction_bits = 23);
bit_model!(double, f64, u64, exponent_bits = 11, fraction_bits = 52);

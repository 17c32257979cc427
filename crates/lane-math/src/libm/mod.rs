// SPDX-License-Identifier: LGPL-3.0-or-later

//! Portable `f64` elementary functions.
//!
//! Every transcendental the crate exposes bottoms out here, so results are
//! identical on every target and independent of the platform C library.
//! The algorithms are the Sun fdlibm ones as maintained in FreeBSD and musl:
//! argument reduction, then a minimax polynomial or rational kernel on the
//! reduced interval.
//!
//! `f32` callers evaluate in `f64` and round once on the way out, which
//! keeps single precision comfortably inside one ulp.
//!
//! ```text
//! Copyright (C) 1993 by Sun Microsystems, Inc. All rights reserved.
//!
//! Developed at SunPro, a Sun Microsystems, Inc. business.
//! Permission to use, copy, modify, and distribute this
//! software is freely granted, provided that this notice
//! is preserved.
//! ```

mod exp;
mod hyperbolic;
mod inv_trig;
mod logarithm;
mod misc;
mod pow;
mod rem_pio2;
mod trig;

pub use exp::{exp, exp2, exp10, expm1};
pub use hyperbolic::{acosh, asinh, atanh, cosh, sinh, tanh};
pub use inv_trig::{acos, asin, atan, atan2};
pub use logarithm::{log, log1p, log2, log10};
pub use crate::math::scalar::double::scalbn;
pub use misc::{fmod, hypot};
pub use pow::pow;
pub use rem_pio2::rem_pio2;
pub use trig::{cos, sin, sincos, tan};

/// Accuracy contract of the elementary functions, as relative error bounds.
///
/// These are the bounds the test suites hold the implementations to.
pub mod tolerance {
    /// Relative error bound for `f32` results.
    pub const SINGLE: f32 = 1e-6;
    /// Relative error bound for `f64` results.
    pub const DOUBLE: f64 = 1e-12;
    /// Relative bound for `f64` trigonometric results far from the origin,
    /// applied through [`within`] like the others. It covers last-bit
    /// differences in the reduced argument.
    pub const TRIG_FAR: f64 = 1e-6;

    /// `true` when `actual` is within `bound` of `expected`, relative to
    /// the larger magnitude. NaN matches NaN and infinities match exactly.
    pub fn within(actual: f64, expected: f64, bound: f64) -> bool {
        if actual.is_nan() || expected.is_nan() {
            return actual.is_nan() && expected.is_nan();
        }
        if actual == expected {
            return true;
        }
        if actual.is_infinite() || expected.is_infinite() {
            return false;
        }
        let scale = actual.abs().max(expected.abs()).max(f64::MIN_POSITIVE);
        (actual - expected).abs() <= bound * scale
    }
}

// ─── Word access ───

#[inline]
pub(crate) fn high_word(x: f64) -> u32 {
    (x.to_bits() >> 32) as u32
}

#[inline]
pub(crate) fn low_word(x: f64) -> u32 {
    x.to_bits() as u32
}

#[inline]
pub(crate) fn from_words(high: u32, low: u32) -> f64 {
    f64::from_bits((u64::from(high) << 32) | u64::from(low))
}

#[inline]
pub(crate) fn with_high_word(x: f64, high: u32) -> f64 {
    from_words(high, low_word(x))
}

/// `x` with the low 32 bits of the significand cleared.
#[inline]
pub(crate) fn clear_low_word(x: f64) -> f64 {
    f64::from_bits(x.to_bits() & 0xFFFF_FFFF_0000_0000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_access() {
        let x = 1.5f64;
        assert_eq!(high_word(x), 0x3FF8_0000);
        assert_eq!(low_word(x), 0);
        assert_eq!(from_words(0x4000_0000, 0), 2.0);
        assert_eq!(with_high_word(3.0, 0x3FF0_0000), 1.0);
        assert_eq!(low_word(clear_low_word(core::f64::consts::PI)), 0);
    }

    #[test]
    fn test_tolerance_within() {
        assert!(tolerance::within(1.0, 1.0 + 1e-13, tolerance::DOUBLE));
        assert!(!tolerance::within(1.0, 1.0 + 1e-9, tolerance::DOUBLE));
        assert!(tolerance::within(f64::NAN, f64::NAN, tolerance::DOUBLE));
        assert!(!tolerance::within(f64::INFINITY, f64::MAX, tolerance::DOUBLE));
        assert!(tolerance::within(0.0, -0.0, tolerance::DOUBLE));
    }
}

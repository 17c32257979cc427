// SPDX-License-Identifier: LGPL-3.0-or-later

//! Bit-exact scalar primitives as `const fn`.
//!
//! Everything here is built from the field accessors in [`crate::float`]
//! and plain IEEE arithmetic, so each function can run in constant
//! evaluation and still returns the same bit pattern as the corresponding
//! `std` method at runtime. Functions are total: NaN and infinities go in
//! and come out without panicking.
//!
//! The same set is generated for both widths:
//! - [`single`]: `f32`
//! - [`double`]: `f64`

/// Integer square root by digit recurrence. Returns `floor(sqrt(n))` and
/// whether the root is exact.
const fn isqrt_u128(n: u128) -> (u128, bool) {
    let mut rem = n;
    let mut root: u128 = 0;
    let mut bit: u128 = 1 << 126;
    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    (root, rem == 0)
}

const CBRT_B1: u32 = 715_094_163; // (1023 - 1023/3 - 0.03306235651) * 2^20
const CBRT_B2: u32 = 696_219_795; // (1023 - 1023/3 - 54/3 - 0.03306235651) * 2^20

const CBRT_P0: f64 = 1.875_951_824_271_770_096_43;
const CBRT_P1: f64 = -1.884_979_795_433_771_698_75;
const CBRT_P2: f64 = 1.621_429_720_105_354_466_140;
const CBRT_P3: f64 = -0.758_397_934_778_766_047_437;
const CBRT_P4: f64 = 0.145_996_192_886_612_446_982;

/// Cube root, fdlibm `s_cbrt.c` in constant-evaluable form.
///
/// Error is below 0.667 ulp.
const fn cbrt_f64(x: f64) -> f64 {
    let mut bits = x.to_bits();
    let mut hx = (bits >> 32) as u32 & 0x7fff_ffff;
    if hx >= 0x7ff0_0000 {
        return x + x;
    }
    if hx < 0x0010_0000 {
        // zero or denormal
        bits = (x * 18_014_398_509_481_984.0).to_bits(); // 0x1p54
        hx = (bits >> 32) as u32 & 0x7fff_ffff;
        if hx == 0 {
            return x;
        }
        hx = hx / 3 + CBRT_B2;
    } else {
        hx = hx / 3 + CBRT_B1;
    }
    bits = (x.to_bits() & (1 << 63)) | ((hx as u64) << 32);
    let mut t = f64::from_bits(bits);

    // Polynomial estimate good to about 23 bits.
    let r = (t * t) * (t / x);
    t *= (CBRT_P0 + r * (CBRT_P1 + r * CBRT_P2)) + ((r * r) * r) * (CBRT_P3 + r * CBRT_P4);

    // Round to 23 bits so that t*t is exact.
    t = f64::from_bits((t.to_bits() + 0x8000_0000) & 0xffff_ffff_c000_0000);

    // One Newton step to 53 bits.
    let s = t * t;
    let r = x / s;
    let w = t + t;
    let r = (r - t) / (w + r);
    t + t * r
}

macro_rules! scalar_math {
    ($module:ident, $float:ident, $bits:ty) => {
        #[doc = concat!("Scalar primitives for `", stringify!($float), "`.")]
        pub mod $module {
            use crate::float::$module::*;
            use core::$float::consts::{FRAC_PI_4, PI};

            /// Left shift applied to the significand before the integer
            /// root. Even, and wide enough to leave a guard bit.
            const SQRT_SHIFT: u32 = (FRACTION_BITS + 3) & !1;
            /// `2^(fraction_bits + 2)`, lifts a denormal into the normal range.
            const DENORMAL_SCALE: $float = compose(false, EXPONENT_BIAS as u32 + FRACTION_BITS + 2, 0);
            const DENORMAL_SHIFT: i32 = FRACTION_BITS as i32 + 2;
            /// `2^bias`, the largest power of two step used by `scalbn`.
            const SCALBN_UP: $float = compose(false, 2 * EXPONENT_BIAS as u32, 0);
            /// `2^(fraction_bits + 2 - bias)`.
            const SCALBN_DOWN: $float = compose(false, FRACTION_BITS + 2, 0);
            const MIN_EXPONENT: i32 = 1 - EXPONENT_BIAS;

            pub const DEG_TO_RAD: $float = FRAC_PI_4 / 45.0;
            pub const RAD_TO_DEG: $float = 180.0 / PI;

            // ─── Classification ──────────────────────────────────────────

            #[inline]
            pub const fn is_nan(x: $float) -> bool {
                magnitude(x) > EXPONENT_MASK
            }

            #[inline]
            pub const fn is_inf(x: $float) -> bool {
                magnitude(x) == EXPONENT_MASK
            }

            #[inline]
            pub const fn is_finite(x: $float) -> bool {
                magnitude(x) < EXPONENT_MASK
            }

            #[inline]
            pub const fn is_zero(x: $float) -> bool {
                magnitude(x) == 0
            }

            #[inline]
            pub const fn is_denormal(x: $float) -> bool {
                let m = magnitude(x);
                m != 0 && m < HIDDEN_BIT
            }

            #[inline]
            pub const fn sign_bit(x: $float) -> bool {
                sign(x)
            }

            /// Bitwise equality, so a NaN is the same value as an identical NaN
            /// and `0.0` differs from `-0.0`.
            #[inline]
            pub const fn is_same_value(x: $float, y: $float) -> bool {
                to_bits(x) == to_bits(y)
            }

            // ─── Sign manipulation ───────────────────────────────────────

            /// Clears the sign bit. NaN payloads are kept.
            #[inline]
            pub const fn abs(x: $float) -> $float {
                from_bits(magnitude(x))
            }

            /// Branching absolute value. Equal to [`abs`] for every non-NaN
            /// input; NaN stays NaN.
            #[inline]
            pub const fn fast_abs(x: $float) -> $float {
                if x <= 0.0 { 0.0 - x } else { x }
            }

            #[inline]
            pub const fn copy_sign(magnitude_of: $float, sign_of: $float) -> $float {
                from_bits(magnitude(magnitude_of) | (to_bits(sign_of) & SIGN_MASK))
            }

            // ─── Rounding ────────────────────────────────────────────────

            pub const fn trunc(x: $float) -> $float {
                let e = unbiased_exponent(x);
                if e >= FRACTION_BITS as i32 {
                    return x;
                }
                if e < 0 {
                    return from_bits(to_bits(x) & SIGN_MASK);
                }
                from_bits(to_bits(x) & !(FRACTION_MASK >> e as u32))
            }

            pub const fn floor(x: $float) -> $float {
                let e = unbiased_exponent(x);
                if e >= FRACTION_BITS as i32 {
                    return x;
                }
                if e < 0 {
                    if is_zero(x) {
                        return x;
                    }
                    return if sign(x) { -1.0 } else { 0.0 };
                }
                let mask = FRACTION_MASK >> e as u32;
                let bits = to_bits(x);
                if bits & mask == 0 {
                    return x;
                }
                let t = from_bits(bits & !mask);
                if sign(x) { t - 1.0 } else { t }
            }

            pub const fn ceil(x: $float) -> $float {
                let e = unbiased_exponent(x);
                if e >= FRACTION_BITS as i32 {
                    return x;
                }
                if e < 0 {
                    if is_zero(x) {
                        return x;
                    }
                    return if sign(x) { -0.0 } else { 1.0 };
                }
                let mask = FRACTION_MASK >> e as u32;
                let bits = to_bits(x);
                if bits & mask == 0 {
                    return x;
                }
                let t = from_bits(bits & !mask);
                if sign(x) { t } else { t + 1.0 }
            }

            /// Round half away from zero.
            pub const fn round(x: $float) -> $float {
                let e = unbiased_exponent(x);
                if e >= FRACTION_BITS as i32 {
                    return x;
                }
                let bits = to_bits(x);
                if e < 0 {
                    let s = bits & SIGN_MASK;
                    return if e == -1 { from_bits(s | to_bits(1.0)) } else { from_bits(s) };
                }
                let mask = FRACTION_MASK >> e as u32;
                if bits & mask == 0 {
                    return x;
                }
                let half = HIDDEN_BIT >> (e as u32 + 1);
                from_bits((bits + half) & !mask)
            }

            // ─── Decomposition ───────────────────────────────────────────

            /// Split into `(fraction, exponent)` with `0.5 <= |fraction| < 1`.
            /// Zero, infinities and NaN come back as `(x, 0)`.
            pub const fn frexp(x: $float) -> ($float, i32) {
                if is_zero(x) || !is_finite(x) {
                    return (x, 0);
                }
                let mut bits = to_bits(x);
                let mut adjust = 0;
                if bits & EXPONENT_MASK == 0 {
                    bits = to_bits(x * DENORMAL_SCALE);
                    adjust = DENORMAL_SHIFT;
                }
                let biased = ((bits & EXPONENT_MASK) >> FRACTION_BITS) as i32;
                let exponent = biased - (EXPONENT_BIAS - 1) - adjust;
                let fraction = (bits & !EXPONENT_MASK) | (((EXPONENT_BIAS - 1) as $bits) << FRACTION_BITS);
                (from_bits(fraction), exponent)
            }

            /// `x * 2^n` without intermediate overflow.
            pub const fn scalbn(x: $float, n: i32) -> $float {
                let mut y = x;
                let mut n = n;
                if n > EXPONENT_BIAS {
                    y *= SCALBN_UP;
                    n -= EXPONENT_BIAS;
                    if n > EXPONENT_BIAS {
                        y *= SCALBN_UP;
                        n -= EXPONENT_BIAS;
                        if n > EXPONENT_BIAS {
                            n = EXPONENT_BIAS;
                        }
                    }
                } else if n < MIN_EXPONENT {
                    y *= SCALBN_DOWN;
                    n += EXPONENT_BIAS - 2 - FRACTION_BITS as i32;
                    if n < MIN_EXPONENT {
                        y *= SCALBN_DOWN;
                        n += EXPONENT_BIAS - 2 - FRACTION_BITS as i32;
                        if n < MIN_EXPONENT {
                            n = MIN_EXPONENT;
                        }
                    }
                }
                y * compose(false, (EXPONENT_BIAS + n) as u32, 0)
            }

            /// Inverse of [`frexp`].
            #[inline]
            pub const fn ldexp(fraction: $float, exponent: i32) -> $float {
                scalbn(fraction, exponent)
            }

            /// Split into `(integral, fractional)`; both carry the sign of `x`.
            pub const fn modf(x: $float) -> ($float, $float) {
                if is_nan(x) {
                    return (x, x);
                }
                if is_inf(x) {
                    return (x, copy_sign(0.0, x));
                }
                let integral = trunc(x);
                (integral, copy_sign(x - integral, x))
            }

            // ─── Neighbours ──────────────────────────────────────────────

            pub const fn next_up(x: $float) -> $float {
                if is_nan(x) {
                    return x;
                }
                let bits = to_bits(x);
                let m = bits & !SIGN_MASK;
                if m == 0 {
                    return DENORM_MIN;
                }
                if bits == EXPONENT_MASK {
                    return x;
                }
                if bits == m { from_bits(bits + 1) } else { from_bits(bits - 1) }
            }

            pub const fn next_down(x: $float) -> $float {
                if is_nan(x) {
                    return x;
                }
                let bits = to_bits(x);
                let m = bits & !SIGN_MASK;
                if m == 0 {
                    return from_bits(SIGN_MASK | 1);
                }
                if bits == SIGN_MASK | EXPONENT_MASK {
                    return x;
                }
                if bits == m { from_bits(bits - 1) } else { from_bits(bits + 1) }
            }

            /// Adjacent representable value from `x` toward `direction`.
            /// Equal arguments return `direction`.
            pub const fn next_after(x: $float, direction: $float) -> $float {
                if is_nan(x) || is_nan(direction) {
                    return x + direction;
                }
                if x == direction {
                    return direction;
                }
                if x < direction { next_up(x) } else { next_down(x) }
            }

            // ─── Roots ───────────────────────────────────────────────────

            /// Correctly rounded square root using integer arithmetic only,
            /// so it agrees with the hardware instruction bit for bit.
            ///
            /// A NaN input comes back quieted with its payload kept; a
            /// negative input yields the default NaN of `0.0 / 0.0`.
            pub const fn sqrt(x: $float) -> $float {
                if is_nan(x) {
                    return from_bits(to_bits(x) | QUIET_BIT);
                }
                if is_zero(x) {
                    return x;
                }
                if sign(x) {
                    return (x - x) / (x - x);
                }
                if is_inf(x) {
                    return x;
                }
                let bits = to_bits(x);
                let biased = biased_exponent(x) as i32;
                let mut m = (bits & FRACTION_MASK) as u128;
                let mut e = if biased == 0 {
                    MIN_EXPONENT - FRACTION_BITS as i32
                } else {
                    m |= HIDDEN_BIT as u128;
                    biased - EXPONENT_BIAS - FRACTION_BITS as i32
                };
                while m < HIDDEN_BIT as u128 {
                    m <<= 1;
                    e -= 1;
                }
                if e & 1 != 0 {
                    m <<= 1;
                    e -= 1;
                }

                let (root, exact) = super::isqrt_u128(m << SQRT_SHIFT);
                let extra = (128 - root.leading_zeros()) - (FRACTION_BITS + 1);
                let mut q = root >> extra;
                let dropped = root & ((1u128 << extra) - 1);
                let half = 1u128 << (extra - 1);
                if dropped > half || (dropped == half && (!exact || q & 1 == 1)) {
                    q += 1;
                }
                let mut exp = extra as i32 + e / 2 - (SQRT_SHIFT / 2) as i32;
                if q >> (FRACTION_BITS + 1) != 0 {
                    q >>= 1;
                    exp += 1;
                }
                compose(false, (exp + EXPONENT_BIAS + FRACTION_BITS as i32) as u32, q as $bits)
            }

            #[inline]
            pub const fn reciprocal_sqrt(x: $float) -> $float {
                1.0 / sqrt(x)
            }

            /// Square root clamped to zero for negative inputs.
            #[inline]
            pub const fn safe_sqrt(x: $float) -> $float {
                sqrt(max(x, 0.0))
            }

            #[inline]
            pub const fn cbrt(x: $float) -> $float {
                super::cbrt_f64(x as f64) as $float
            }

            // ─── Misc ────────────────────────────────────────────────────

            /// `if a < b { a } else { b }`: a NaN in either operand yields `b`.
            #[inline]
            pub const fn min(a: $float, b: $float) -> $float {
                if a < b { a } else { b }
            }

            /// `if a > b { a } else { b }`: a NaN in either operand yields `b`.
            #[inline]
            pub const fn max(a: $float, b: $float) -> $float {
                if a > b { a } else { b }
            }

            #[inline]
            pub const fn clamp(x: $float, lower: $float, upper: $float) -> $float {
                if x < lower {
                    lower
                } else if upper < x {
                    upper
                } else {
                    x
                }
            }

            #[inline]
            pub const fn sqr(x: $float) -> $float {
                x * x
            }

            /// Linear interpolation, exact at `t == 0` and `t == 1` and
            /// monotonic in `t`.
            pub const fn lerp(a: $float, b: $float, t: $float) -> $float {
                if (a <= 0.0 && b >= 0.0) || (a >= 0.0 && b <= 0.0) {
                    return t * b + (1.0 - t) * a;
                }
                if t == 1.0 {
                    return b;
                }
                let x = a + t * (b - a);
                if (t > 1.0) == (b > a) {
                    if b < x { x } else { b }
                } else if b > x {
                    x
                } else {
                    b
                }
            }

            #[inline]
            pub const fn deg2rad(degrees: $float) -> $float {
                degrees * DEG_TO_RAD
            }

            #[inline]
            pub const fn rad2deg(radians: $float) -> $float {
                radians * RAD_TO_DEG
            }

            /// `a*b - c*d` with the rounding error of `c*d` compensated.
            #[inline]
            pub fn difference_of_products(a: $float, b: $float, c: $float, d: $float) -> $float {
                let cd = c * d;
                let diff = a.mul_add(b, -cd);
                let err = (-c).mul_add(d, cd);
                diff + err
            }
        }
    };
}

scalar_math!(single, f32, u32);
scalar_math!(double, f64, u64);

#[cfg(test)]
mod tests {
    use super::{double, single};
    use crate::element::Float;
    use float_cmp::assert_approx_eq;

    const SPECIALS_F64: [f64; 14] = [
        0.0,
        -0.0,
        1.0,
        -1.0,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        f64::MIN_POSITIVE,
        f64::MAX,
        f64::MIN,
        f64::EPSILON,
        5e-324,
        -2.5e-310,
        crate::float::double::SIGNALING_NAN,
    ];

    #[test]
    fn test_classification_matches_std() {
        for &x in &SPECIALS_F64 {
            assert_eq!(double::is_nan(x), x.is_nan(), "{x:e}");
            assert_eq!(double::is_inf(x), x.is_infinite(), "{x:e}");
            assert_eq!(double::is_finite(x), x.is_finite(), "{x:e}");
            assert_eq!(double::sign_bit(x), x.is_sign_negative(), "{x:e}");
            assert_eq!(double::is_denormal(x), x.is_subnormal(), "{x:e}");
        }
    }

    #[test]
    fn test_abs_keeps_nan() {
        assert!(double::abs(f64::NAN).is_nan());
        assert!(single::fast_abs(f32::NAN).is_nan());
        assert_eq!(double::abs(-0.0).to_bits(), 0);
        assert_eq!(double::fast_abs(-0.0).to_bits(), 0);
        assert_eq!(single::fast_abs(0.0).to_bits(), 0);
        assert_eq!(single::fast_abs(-3.5), 3.5);
        assert_eq!(double::abs(f64::NEG_INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_rounding_signed_zero_edges() {
        assert_eq!(double::floor(-0.5), -1.0);
        assert_eq!(double::floor(0.5).to_bits(), 0.0f64.to_bits());
        assert_eq!(double::floor(0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(double::floor(-0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(double::ceil(-0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(double::ceil(-0.5).to_bits(), (-0.0f64).to_bits());
        assert_eq!(double::ceil(0.25), 1.0);
        assert_eq!(double::trunc(-0.75).to_bits(), (-0.0f64).to_bits());
        assert_eq!(double::round(-0.5), -1.0);
        assert_eq!(double::round(0.49999999999999994).to_bits(), 0.0f64.to_bits());
        assert_eq!(double::round(-0.3).to_bits(), (-0.0f64).to_bits());
        assert_eq!(single::round(2.5), 3.0);
        assert_eq!(single::round(-2.5), -3.0);
        assert_eq!(single::floor(-1.5), -2.0);
        assert_eq!(single::ceil(1.000_001), 2.0);
    }

    #[test]
    fn test_rounding_specials_pass_through() {
        for &x in &SPECIALS_F64 {
            if x.is_nan() {
                assert!(double::floor(x).is_nan());
                assert!(double::round(x).is_nan());
                continue;
            }
            assert_eq!(double::floor(x).to_bits(), x.floor().to_bits(), "floor {x:e}");
            assert_eq!(double::ceil(x).to_bits(), x.ceil().to_bits(), "ceil {x:e}");
            assert_eq!(double::trunc(x).to_bits(), x.trunc().to_bits(), "trunc {x:e}");
            assert_eq!(double::round(x).to_bits(), x.round().to_bits(), "round {x:e}");
        }
    }

    #[test]
    fn test_frexp() {
        assert_eq!(double::frexp(8.0), (0.5, 4));
        assert_eq!(double::frexp(-3.0), (-0.75, 2));
        assert_eq!(single::frexp(1.0), (0.5, 1));
        let (f, e) = double::frexp(5e-324);
        assert_eq!((f, e), (0.5, -1073));
        assert_eq!(double::frexp(0.0), (0.0, 0));
        assert_eq!(double::frexp(f64::INFINITY), (f64::INFINITY, 0));
        let (f, e) = double::frexp(f64::NAN);
        assert!(f.is_nan());
        assert_eq!(e, 0);
    }

    #[test]
    fn test_scalbn_inverts_frexp() {
        for &x in &[1.0f64, -7.25, 1e300, 3e-310, f64::MAX, 5e-324] {
            let (f, e) = double::frexp(x);
            assert_eq!(double::ldexp(f, e), x);
        }
        assert_eq!(double::scalbn(1.0, 2000), f64::INFINITY);
        assert_eq!(double::scalbn(1.0, -2000), 0.0);
        assert_eq!(single::scalbn(1.5, -130), f32::from_bits(0x000C_0000));
        assert_eq!(single::scalbn(1.5, -130), 1.5 * 2f32.powi(-65) * 2f32.powi(-65));
    }

    #[test]
    fn test_modf() {
        assert_eq!(double::modf(3.25), (3.0, 0.25));
        assert_eq!(double::modf(-3.25), (-3.0, -0.25));
        let (i, f) = double::modf(-4.0);
        assert_eq!(i, -4.0);
        assert_eq!(f.to_bits(), (-0.0f64).to_bits());
        let (i, f) = double::modf(f64::NEG_INFINITY);
        assert_eq!(i, f64::NEG_INFINITY);
        assert_eq!(f.to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn test_next_family() {
        assert_eq!(double::next_up(f64::MAX), f64::INFINITY);
        assert_eq!(double::next_down(f64::MIN), f64::NEG_INFINITY);
        assert!(double::next_up(f64::NAN).is_nan());
        assert_eq!(double::next_up(0.0), 5e-324);
        assert_eq!(double::next_up(-0.0), 5e-324);
        assert_eq!(double::next_down(0.0), -5e-324);
        assert_eq!(double::next_up(f64::NEG_INFINITY), f64::MIN);
        assert_eq!(double::next_down(f64::INFINITY), f64::MAX);
        assert_eq!(double::next_up(1.0), 1.0 + f64::EPSILON);
        assert_eq!(single::next_down(1.0), 1.0 - f32::EPSILON / 2.0);
    }

    #[test]
    fn test_next_after() {
        assert_eq!(double::next_after(0.0, f64::INFINITY), 5e-324);
        assert_eq!(double::next_after(0.0, f64::NEG_INFINITY), -5e-324);
        assert_eq!(double::next_after(f64::MAX, f64::INFINITY), f64::INFINITY);
        assert_eq!(double::next_after(f64::MIN_POSITIVE, f64::NEG_INFINITY), f64::MIN_POSITIVE - 5e-324);
        assert_eq!(double::next_after(f64::MIN, f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_eq!(double::next_after(2.0, 2.0), 2.0);
        assert_eq!(double::next_after(0.0, -0.0).to_bits(), (-0.0f64).to_bits());
        assert!(double::next_after(1.0, f64::NAN).is_nan());
        assert_eq!(single::next_after(1.0, 0.0), single::next_down(1.0));
    }

    #[test]
    fn test_sqrt_edges() {
        assert!(double::sqrt(-1.0).is_nan());
        assert_eq!(double::sqrt(f64::INFINITY), f64::INFINITY);
        assert_eq!(double::sqrt(-0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(double::reciprocal_sqrt(f64::INFINITY), 0.0);
        assert_eq!(double::reciprocal_sqrt(0.0), f64::INFINITY);
        assert_eq!(single::reciprocal_sqrt(4.0), 0.5);
        for &x in &[2.0f64, 0.5, 1e-300, 5e-324, f64::MAX, 123_456.789, 2.0_f64.powi(-1073)] {
            assert_eq!(double::sqrt(x).to_bits(), x.sqrt().to_bits(), "sqrt {x:e}");
        }
        for &x in &[2.0f32, 3.0, 1e-45, f32::MAX, 1e-40, 0.1] {
            assert_eq!(single::sqrt(x).to_bits(), x.sqrt().to_bits(), "sqrtf {x:e}");
        }
    }

    #[test]
    fn test_sqrt_nan_bits() {
        use std::hint::black_box;

        let snan = crate::float::double::SIGNALING_NAN;
        assert_eq!(double::sqrt(snan).to_bits(), 0x7FF8_0000_0000_0001);
        assert_eq!(double::sqrt(black_box(snan)).to_bits(), black_box(snan).sqrt().to_bits());
        let negative_snan = f64::from_bits(0xFFF0_0000_0000_0042);
        assert_eq!(double::sqrt(negative_snan).to_bits(), 0xFFF8_0000_0000_0042);
        let payload = f64::from_bits(0x7FF8_0000_0000_BEEF);
        assert_eq!(double::sqrt(payload).to_bits(), payload.to_bits());
        assert_eq!(single::sqrt(crate::float::single::SIGNALING_NAN).to_bits(), 0x7FC0_0001);

        for x in [-1.0f64, -5e-324, -1e300, f64::NEG_INFINITY] {
            let x = black_box(x);
            assert_eq!(double::sqrt(x).to_bits(), x.sqrt().to_bits(), "sqrt {x:e}");
            assert_eq!(double::sqrt(x).to_bits(), <f64 as Float>::sqrt(x).to_bits(), "sqrt {x:e}");
        }
        for x in [-1.0f32, -1e-45, f32::NEG_INFINITY] {
            let x = black_box(x);
            assert_eq!(single::sqrt(x).to_bits(), x.sqrt().to_bits(), "sqrtf {x:e}");
        }
    }

    #[test]
    fn test_cbrt() {
        assert_approx_eq!(f64, double::cbrt(27.0), 3.0, ulps = 1);
        assert_approx_eq!(f64, double::cbrt(-8.0), -2.0, ulps = 1);
        assert_eq!(double::cbrt(-0.0).to_bits(), (-0.0f64).to_bits());
        assert!(double::cbrt(f64::NAN).is_nan());
        assert_eq!(double::cbrt(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_approx_eq!(f64, double::cbrt(1e-310), 1e-310f64.cbrt(), ulps = 1);
        assert_approx_eq!(f32, single::cbrt(10.0), 10.0f32.cbrt(), ulps = 1);
    }

    #[test]
    fn test_min_max_nan_asymmetry() {
        assert!(double::min(f64::NAN, 1.0) == 1.0);
        assert!(double::min(1.0, f64::NAN).is_nan());
        assert!(double::max(f64::NAN, 1.0) == 1.0);
        assert!(double::max(1.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_lerp() {
        assert_eq!(double::lerp(1.0, 3.0, 0.0), 1.0);
        assert_eq!(double::lerp(1.0, 3.0, 1.0), 3.0);
        assert_eq!(double::lerp(1.0, 3.0, 0.5), 2.0);
        assert_eq!(double::lerp(-1.0, 1.0, 0.25), -0.5);
        assert_eq!(single::lerp(2.0, 4.0, 2.0), 6.0);
        // monotonic near t == 1
        let a = 0.1f64;
        let b = 0.7f64;
        let mut prev = double::lerp(a, b, 0.999_999);
        let mut t = 0.999_999f64;
        while t <= 1.0 {
            let v = double::lerp(a, b, t);
            assert!(v >= prev);
            prev = v;
            t = double::next_up(t);
            if t > 0.999_999 + 64.0 * f64::EPSILON {
                break;
            }
        }
    }

    #[test]
    fn test_deg2rad() {
        assert_eq!(double::deg2rad(0.001), 1.745_329_251_994_329_6e-5);
        assert_approx_eq!(f64, double::rad2deg(double::deg2rad(30.0)), 30.0, ulps = 2);
        assert_approx_eq!(f32, single::deg2rad(180.0), core::f32::consts::PI, ulps = 1);
    }

    #[test]
    fn test_const_evaluation() {
        const FLOOR: f64 = double::floor(-2.5);
        const ROOT: f32 = single::sqrt(2.0);
        const NEXT: f64 = double::next_up(1.0);
        const PARTS: (f64, i32) = double::frexp(12.0);
        assert_eq!(FLOOR, -3.0);
        assert_eq!(ROOT, 2.0f32.sqrt());
        assert_eq!(NEXT, 1.0 + f64::EPSILON);
        assert_eq!(PARTS, (0.75, 4));
    }

    #[test]
    fn test_difference_of_products() {
        assert_eq!(double::difference_of_products(3.0, 4.0, 2.0, 5.0), 2.0);
        assert_approx_eq!(f32, single::difference_of_products(1.5, 2.0, 0.5, 0.5), 2.75, ulps = 1);
    }
}

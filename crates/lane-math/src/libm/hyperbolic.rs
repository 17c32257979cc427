// SPDX-License-Identifier: LGPL-3.0-or-later

//! Hyperbolic functions and their inverses, built on `exp`, `expm1`,
//! `log` and `log1p`.

use super::{exp, expm1, high_word, log, log1p};

const LN2: f64 = 0.693_147_180_559_945_309_417_232_121_458_176_568;

/// `exp(x) * sign / 2` for `x` past the `exp` overflow threshold.
fn exp_half_large(x: f64, sign: f64) -> f64 {
    // 2043 * ln2, with k odd so scale * scale overflows exactly when needed
    const K: u64 = 2043;
    let k_ln2 = f64::from_bits(0x4096_2066_151A_DD8B);
    let scale = f64::from_bits((0x3FF + K / 2) << 52);
    exp(x - k_ln2) * (sign * scale) * scale
}

pub fn sinh(x: f64) -> f64 {
    let h = if x.is_sign_negative() { -0.5 } else { 0.5 };
    let ax = x.abs();
    let w = high_word(ax);
    if w < 0x4086_2E42 {
        // |x| < log(f64::MAX)
        let t = expm1(ax);
        if w < 0x3FF0_0000 {
            if w < 0x3FF0_0000 - (26 << 20) {
                return x;
            }
            return h * (2.0 * t - t * t / (t + 1.0));
        }
        return h * (t + t / (t + 1.0));
    }
    exp_half_large(ax, 2.0 * h)
}

pub fn cosh(x: f64) -> f64 {
    let ax = x.abs();
    let w = high_word(ax);
    if w < 0x3FE6_2E42 {
        // |x| < ln2
        if w < 0x3FF0_0000 - (26 << 20) {
            return 1.0;
        }
        let t = expm1(ax);
        return 1.0 + t * t / (2.0 * (1.0 + t));
    }
    if w < 0x4086_2E42 {
        let t = exp(ax);
        return 0.5 * (t + 1.0 / t);
    }
    exp_half_large(ax, 1.0)
}

pub fn tanh(x: f64) -> f64 {
    let negative = x.is_sign_negative();
    let ax = x.abs();
    let w = high_word(ax);
    let t = if w > 0x3FE1_93EA {
        // |x| > log(3)/2
        if w > 0x4034_0000 {
            // |x| > 20 or NaN
            1.0 - 0.0 / ax
        } else {
            let t = expm1(2.0 * ax);
            1.0 - 2.0 / (t + 2.0)
        }
    } else if w > 0x3FD0_58AE {
        // |x| > log(5/3)/2
        let t = expm1(2.0 * ax);
        t / (t + 2.0)
    } else if w >= 0x0010_0000 {
        let t = expm1(-2.0 * ax);
        -t / (t + 2.0)
    } else {
        ax
    };
    if negative { -t } else { t }
}

pub fn asinh(x: f64) -> f64 {
    let e = (x.to_bits() >> 52) & 0x7FF;
    let ax = x.abs();
    let y = if e >= 0x3FF + 26 {
        // |x| >= 2^26, inf or NaN
        log(ax) + LN2
    } else if e >= 0x3FF + 1 {
        log(2.0 * ax + 1.0 / ((ax * ax + 1.0).sqrt() + ax))
    } else if e >= 0x3FF - 26 {
        log1p(ax + ax * ax / ((ax * ax + 1.0).sqrt() + 1.0))
    } else {
        ax
    };
    if x.is_sign_negative() { -y } else { y }
}

/// Inverse hyperbolic cosine; NaN below 1.
pub fn acosh(x: f64) -> f64 {
    if x < 1.0 {
        return (x - x) / (x - x);
    }
    let e = (x.to_bits() >> 52) & 0x7FF;
    if e < 0x3FF + 1 {
        // 1 <= x < 2
        let d = x - 1.0;
        return log1p(d + (d * d + 2.0 * d).sqrt());
    }
    if e < 0x3FF + 26 {
        return log(2.0 * x - 1.0 / (x + (x * x - 1.0).sqrt()));
    }
    log(x) + LN2
}

/// Inverse hyperbolic tangent; ±inf at ±1, NaN beyond.
pub fn atanh(x: f64) -> f64 {
    let e = (x.to_bits() >> 52) & 0x7FF;
    let ax = x.abs();
    let y = if e < 0x3FF - 1 {
        if e < 0x3FF - 32 {
            ax
        } else {
            // |x| < 0.5
            0.5 * log1p(2.0 * ax + 2.0 * ax * ax / (1.0 - ax))
        }
    } else {
        0.5 * log1p(2.0 * (ax / (1.0 - ax)))
    };
    if x.is_sign_negative() { -y } else { y }
}

// SPDX-License-Identifier: LGPL-3.0-or-later

//! Exponentials.
//!
//! `exp` reduces `x = k ln2 + r` with `|r| <= ln2/2` and evaluates a
//! Remez-fitted rational form of `exp(r)`. `expm1` carries the reduction
//! error separately so that results near zero keep full precision.

use super::{high_word, pow};
use crate::math::scalar::double::{modf, scalbn};

const HALF: [f64; 2] = [0.5, -0.5];
const LN2_HI: f64 = 6.931_471_803_691_238_164_90e-01;
const LN2_LO: f64 = 1.908_214_929_270_587_700_02e-10;
const INV_LN2: f64 = 1.442_695_040_888_963_387_00e+00;
const P1: f64 = 1.666_666_666_666_660_190_37e-01;
const P2: f64 = -2.777_777_777_701_559_338_42e-03;
const P3: f64 = 6.613_756_321_437_934_361_17e-05;
const P4: f64 = -1.653_390_220_546_525_153_90e-06;
const P5: f64 = 4.138_136_797_057_238_460_39e-08;

const OVERFLOW: f64 = 7.097_827_128_933_839_730_96e+02;
const UNDERFLOW: f64 = -7.451_332_191_019_411_084_2e+02;

const Q1: f64 = -3.333_333_333_333_313_164_28e-02;
const Q2: f64 = 1.587_301_587_254_814_601_65e-03;
const Q3: f64 = -7.936_507_578_674_879_424_73e-05;
const Q4: f64 = 4.008_217_827_329_362_395_52e-06;
const Q5: f64 = -2.010_992_181_836_243_713_26e-07;

const LOG2_10: f64 = 3.321_928_094_887_362_347_870_319_429_489_39;

/// `10^n` for `n` in `-15..=15`, all exact or correctly rounded.
#[rustfmt::skip]
const POW10: [f64; 31] = [
    1e-15, 1e-14, 1e-13, 1e-12, 1e-11, 1e-10, 1e-9, 1e-8, 1e-7, 1e-6, 1e-5,
    1e-4, 1e-3, 1e-2, 1e-1, 1.0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8,
    1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15,
];

pub fn exp(x: f64) -> f64 {
    let hx = high_word(x);
    let sign = (hx >> 31) as usize;
    let hx = hx & 0x7FFF_FFFF;

    if hx >= 0x4086_232B {
        if x.is_nan() {
            return x;
        }
        if x > OVERFLOW {
            return f64::INFINITY;
        }
        if x < UNDERFLOW {
            return 0.0;
        }
    }

    let k: i32;
    let hi: f64;
    let lo: f64;
    let r: f64;
    if hx > 0x3FD6_2E42 {
        // |x| > ln2/2
        k = if hx >= 0x3FF0_A2B2 {
            (INV_LN2 * x + HALF[sign]) as i32
        } else {
            1 - 2 * sign as i32
        };
        hi = x - k as f64 * LN2_HI;
        lo = k as f64 * LN2_LO;
        r = hi - lo;
    } else if hx > 0x3E30_0000 {
        k = 0;
        hi = x;
        lo = 0.0;
        r = x;
    } else {
        return 1.0 + x;
    }

    let rr = r * r;
    let c = r - rr * (P1 + rr * (P2 + rr * (P3 + rr * (P4 + rr * P5))));
    let y = 1.0 + (r * c / (2.0 - c) - lo + hi);
    if k == 0 { y } else { scalbn(y, k) }
}

/// `2^x`, exact for integral `x`.
pub fn exp2(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x >= 1024.0 {
        return f64::INFINITY;
    }
    if x < -1075.0 {
        return 0.0;
    }
    let k = (x + 0.5).floor();
    let f = x - k;
    scalbn(exp(f * core::f64::consts::LN_2), k as i32)
}

/// `10^x`, exact for integral `x` in `-15..=15`.
pub fn exp10(x: f64) -> f64 {
    let (n, y) = modf(x);
    if ((n.to_bits() >> 52) & 0x7FF) < 0x3FF + 4 {
        // |n| < 16
        let p = POW10[(n as i32 + 15) as usize];
        if y == 0.0 {
            return p;
        }
        return exp2(LOG2_10 * y) * p;
    }
    pow(10.0, x)
}

/// `exp(x) - 1`, accurate for small `|x|`.
pub fn expm1(x: f64) -> f64 {
    let bits = x.to_bits();
    let hx = (bits >> 32) as u32 & 0x7FFF_FFFF;
    let negative = bits >> 63 != 0;

    if hx >= 0x4043_687A {
        // |x| >= 56 ln2
        if x.is_nan() {
            return x;
        }
        if negative {
            return -1.0;
        }
        if x > OVERFLOW {
            return f64::INFINITY;
        }
    }

    let mut x = x;
    let mut c = 0.0;
    let k: i32;
    if hx > 0x3FD6_2E42 {
        let hi: f64;
        let lo: f64;
        if hx < 0x3FF0_A2B2 {
            if !negative {
                hi = x - LN2_HI;
                lo = LN2_LO;
                k = 1;
            } else {
                hi = x + LN2_HI;
                lo = -LN2_LO;
                k = -1;
            }
        } else {
            k = (INV_LN2 * x + if negative { -0.5 } else { 0.5 }) as i32;
            let t = k as f64;
            hi = x - t * LN2_HI;
            lo = t * LN2_LO;
        }
        x = hi - lo;
        c = (hi - x) - lo;
    } else if hx < 0x3C90_0000 {
        // |x| < 2^-54
        return x;
    } else {
        k = 0;
    }

    let hfx = 0.5 * x;
    let hxs = x * hfx;
    let r1 = 1.0 + hxs * (Q1 + hxs * (Q2 + hxs * (Q3 + hxs * (Q4 + hxs * Q5))));
    let t = 3.0 - r1 * hfx;
    let mut e = hxs * ((r1 - t) / (6.0 - x * t));
    if k == 0 {
        return x - (x * e - hxs);
    }
    e = x * (e - c) - c;
    e -= hxs;
    if k == -1 {
        return 0.5 * (x - e) - 0.5;
    }
    if k == 1 {
        if x < -0.25 {
            return -2.0 * (e - (x + 0.5));
        }
        return 1.0 + 2.0 * (x - e);
    }
    let two_pk = f64::from_bits(((0x3FF + k) as u64) << 52);
    if !(0..=56).contains(&k) {
        let mut y = x - e + 1.0;
        if k == 1024 {
            y = y * 2.0 * f64::from_bits(0x7FE0_0000_0000_0000);
        } else {
            y *= two_pk;
        }
        return y - 1.0;
    }
    let two_mk = f64::from_bits(((0x3FF - k) as u64) << 52);
    if k < 20 {
        (x - e + (1.0 - two_mk)) * two_pk
    } else {
        (x - (e + two_mk) + 1.0) * two_pk
    }
}

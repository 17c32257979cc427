// SPDX-License-Identifier: LGPL-3.0-or-later

//! `x^y`.
//!
//! Computes `log2(|x|)` to about 70 bits as `t1 + t2`, multiplies by `y`
//! split the same way, and exponentiates the result. The special cases
//! follow C99 Annex F: `pow(x, ±0) = 1` and `pow(1, y) = 1` even for NaN,
//! negative bases need an integral exponent, and odd integral exponents
//! keep the sign of the base.

use super::{clear_low_word, from_words, high_word, low_word, with_high_word};
use crate::math::scalar::double::scalbn;

const BP: [f64; 2] = [1.0, 1.5];
const DP_H: [f64; 2] = [0.0, 5.849_624_872_207_641_601_56e-01];
const DP_L: [f64; 2] = [0.0, 1.350_039_202_129_748_971_28e-08];
const TWO53: f64 = 9_007_199_254_740_992.0;
const HUGE: f64 = 1.0e300;
const TINY: f64 = 1.0e-300;

const L1: f64 = 5.999_999_999_999_946_487_25e-01;
const L2: f64 = 4.285_714_285_785_501_842_52e-01;
const L3: f64 = 3.333_333_298_183_774_329_18e-01;
const L4: f64 = 2.727_281_238_085_340_064_89e-01;
const L5: f64 = 2.306_607_457_755_617_540_67e-01;
const L6: f64 = 2.069_750_178_003_384_177_84e-01;
const P1: f64 = 1.666_666_666_666_660_190_37e-01;
const P2: f64 = -2.777_777_777_701_559_338_42e-03;
const P3: f64 = 6.613_756_321_437_934_361_17e-05;
const P4: f64 = -1.653_390_220_546_525_153_90e-06;
const P5: f64 = 4.138_136_797_057_238_460_39e-08;
const LG2: f64 = 6.931_471_805_599_452_862_27e-01;
const LG2_H: f64 = 6.931_471_824_645_996_093_75e-01;
const LG2_L: f64 = -1.904_654_299_957_768_045_25e-09;
/// `-(1024 - log2(max + 0.5 ulp))`
const OVT: f64 = 8.008_566_259_537_294_437_2e-17;
const CP: f64 = 9.617_966_939_259_755_543_29e-01;
const CP_H: f64 = 9.617_967_009_544_372_558_59e-01;
const CP_L: f64 = -7.028_461_650_952_758_265_16e-09;
const IVLN2: f64 = 1.442_695_040_888_963_387_00e+00;
const IVLN2_H: f64 = 1.442_695_021_629_333_496_09e+00;
const IVLN2_L: f64 = 1.925_962_991_126_617_468_87e-08;

/// Classification of `y` when the base is negative.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Parity {
    NotInteger,
    Odd,
    Even,
}

fn parity(iy: i32, ly: u32) -> Parity {
    let from_bit = |j: u32| if j & 1 == 1 { Parity::Odd } else { Parity::Even };
    if iy >= 0x4340_0000 {
        return Parity::Even;
    }
    if iy >= 0x3FF0_0000 {
        let k = (iy >> 20) - 0x3FF;
        if k > 20 {
            let j = ly >> (52 - k);
            if j << (52 - k) == ly {
                return from_bit(j);
            }
        } else if ly == 0 {
            let j = (iy as u32) >> (20 - k);
            if j << (20 - k) == iy as u32 {
                return from_bit(j);
            }
        }
    }
    Parity::NotInteger
}

pub fn pow(x: f64, y: f64) -> f64 {
    let (hx, lx) = (high_word(x) as i32, low_word(x));
    let (hy, ly) = (high_word(y) as i32, low_word(y));
    let ix = hx & 0x7FFF_FFFF;
    let iy = hy & 0x7FFF_FFFF;

    if iy as u32 | ly == 0 {
        return 1.0;
    }
    if hx == 0x3FF0_0000 && lx == 0 {
        return 1.0;
    }
    if ix > 0x7FF0_0000 || (ix == 0x7FF0_0000 && lx != 0) || iy > 0x7FF0_0000 || (iy == 0x7FF0_0000 && ly != 0) {
        return x + y;
    }

    let yisint = if hx < 0 { parity(iy, ly) } else { Parity::NotInteger };

    if ly == 0 {
        if iy == 0x7FF0_0000 {
            // y is ±inf
            return if (ix - 0x3FF0_0000) as u32 | lx == 0 {
                1.0
            } else if ix >= 0x3FF0_0000 {
                if hy >= 0 { y } else { 0.0 }
            } else if hy >= 0 {
                0.0
            } else {
                -y
            };
        }
        if iy == 0x3FF0_0000 {
            return if hy >= 0 { x } else { 1.0 / x };
        }
        if hy == 0x4000_0000 {
            return x * x;
        }
        if hy == 0x3FE0_0000 && hx >= 0 {
            return x.sqrt();
        }
    }

    let mut ax = x.abs();
    if lx == 0 && (ix == 0x7FF0_0000 || ix == 0 || ix == 0x3FF0_0000) {
        // x is ±0, ±inf or ±1
        let mut z = ax;
        if hy < 0 {
            z = 1.0 / z;
        }
        if hx < 0 {
            if ix == 0x3FF0_0000 && yisint == Parity::NotInteger {
                z = f64::NAN;
            } else if yisint == Parity::Odd {
                z = -z;
            }
        }
        return z;
    }

    let mut s = 1.0;
    if hx < 0 {
        match yisint {
            Parity::NotInteger => return f64::NAN,
            Parity::Odd => s = -1.0,
            Parity::Even => {}
        }
    }

    let t1: f64;
    let t2: f64;
    if iy > 0x41E0_0000 {
        // |y| > 2^31
        if iy > 0x43F0_0000 {
            // |y| > 2^64 overflows or underflows unless x == 1
            if ix <= 0x3FEF_FFFF {
                return if hy < 0 { HUGE * HUGE } else { TINY * TINY };
            }
            if ix >= 0x3FF0_0000 {
                return if hy > 0 { HUGE * HUGE } else { TINY * TINY };
            }
        }
        if ix < 0x3FEF_FFFF {
            return if hy < 0 { s * HUGE * HUGE } else { s * TINY * TINY };
        }
        if ix > 0x3FF0_0000 {
            return if hy > 0 { s * HUGE * HUGE } else { s * TINY * TINY };
        }
        // |1 - x| <= 2^-20: log(x) ~ t - t^2/2 + t^3/3 - t^4/4
        let t = ax - 1.0;
        let w = (t * t) * (0.5 - t * (0.333_333_333_333_333_333_333_3 - t * 0.25));
        let u = IVLN2_H * t;
        let v = t * IVLN2_L - w * IVLN2;
        t1 = clear_low_word(u + v);
        t2 = v - (t1 - u);
    } else {
        let mut n = 0i32;
        let mut ix = ix;
        if ix < 0x0010_0000 {
            ax *= TWO53;
            n -= 53;
            ix = high_word(ax) as i32;
        }
        n += (ix >> 20) - 0x3FF;
        let j = ix & 0x000F_FFFF;
        ix = j | 0x3FF0_0000;
        let k = if j <= 0x3_988E {
            0
        } else if j < 0xB_B67A {
            1
        } else {
            n += 1;
            ix -= 0x0010_0000;
            0
        };
        ax = with_high_word(ax, ix as u32);

        // ss = (ax - bp) / (ax + bp) as s_h + s_l
        let u = ax - BP[k];
        let v = 1.0 / (ax + BP[k]);
        let ss = u * v;
        let s_h = clear_low_word(ss);
        let t_h = from_words((((ix >> 1) | 0x2000_0000) + 0x0008_0000 + ((k as i32) << 18)) as u32, 0);
        let t_l = ax - (t_h - BP[k]);
        let s_l = v * ((u - s_h * t_h) - s_h * t_l);

        let s2 = ss * ss;
        let mut r = s2 * s2 * (L1 + s2 * (L2 + s2 * (L3 + s2 * (L4 + s2 * (L5 + s2 * L6)))));
        r += s_l * (s_h + ss);
        let s2 = s_h * s_h;
        let t_h = clear_low_word(3.0 + s2 + r);
        let t_l = r - ((t_h - 3.0) - s2);
        let u = s_h * t_h;
        let v = s_l * t_h + t_l * ss;
        let p_h = clear_low_word(u + v);
        let p_l = v - (p_h - u);
        let z_h = CP_H * p_h;
        let z_l = CP_L * p_h + p_l * CP + DP_L[k];
        let t = n as f64;
        t1 = clear_low_word(((z_h + z_l) + DP_H[k]) + t);
        t2 = z_l - (((t1 - t) - DP_H[k]) - z_h);
    }

    // (y1 + y2) * (t1 + t2)
    let y1 = clear_low_word(y);
    let p_l = (y - y1) * t1 + y * t2;
    let mut p_h = y1 * t1;
    let z = p_l + p_h;
    let j = high_word(z) as i32;
    let i = low_word(z) as i32;
    if j >= 0x4090_0000 {
        // z >= 1024
        if (j - 0x4090_0000) | i != 0 || p_l + OVT > z - p_h {
            return s * HUGE * HUGE;
        }
    } else if j & 0x7FFF_FFFF >= 0x4090_CC00 {
        // z <= -1075
        if j.wrapping_sub(0xC090_CC00_u32 as i32) | i != 0 || p_l <= z - p_h {
            return s * TINY * TINY;
        }
    }

    // 2^(p_h + p_l)
    let i = j & 0x7FFF_FFFF;
    let mut k = (i >> 20) - 0x3FF;
    let mut n = 0i32;
    if i > 0x3FE0_0000 {
        n = j + (0x0010_0000 >> (k + 1));
        k = ((n & 0x7FFF_FFFF) >> 20) - 0x3FF;
        let t = from_words((n & !(0x000F_FFFF >> k)) as u32, 0);
        n = ((n & 0x000F_FFFF) | 0x0010_0000) >> (20 - k);
        if j < 0 {
            n = -n;
        }
        p_h -= t;
    }
    let t = clear_low_word(p_l + p_h);
    let u = t * LG2_H;
    let v = (p_l - (t - p_h)) * LG2 + t * LG2_L;
    let mut z = u + v;
    let w = v - (z - u);
    let t = z * z;
    let t1 = z - t * (P1 + t * (P2 + t * (P3 + t * (P4 + t * P5))));
    let r = (z * t1) / (t1 - 2.0) - (w + z * w);
    z = 1.0 - (r - z);
    let j = (high_word(z) as i32).wrapping_add(n << 20);
    if j >> 20 <= 0 {
        z = scalbn(z, n);
    } else {
        z = with_high_word(z, j as u32);
    }
    s * z
}

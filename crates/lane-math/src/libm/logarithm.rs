// SPDX-License-Identifier: LGPL-3.0-or-later

//! Logarithms.
//!
//! All four share one reduction: `x = 2^k (1 + f)` with
//! `sqrt(2)/2 <= 1 + f < sqrt(2)`, then `log(1 + f)` from the series in
//! `s = f / (2 + f)`. The base-2 and base-10 forms split `log(1 + f)` into
//! high and low parts before scaling so the multiplication does not lose
//! the bits `f` carries.

use super::{clear_low_word, high_word};

const LN2_HI: f64 = 6.931_471_803_691_238_164_90e-01;
const LN2_LO: f64 = 1.908_214_929_270_587_700_02e-10;
const IVLN2_HI: f64 = 1.442_695_040_721_446_275_71e+00;
const IVLN2_LO: f64 = 1.675_171_316_488_651_183_53e-10;
const IVLN10_HI: f64 = 4.342_944_818_781_688_809_39e-01;
const IVLN10_LO: f64 = 2.508_294_671_164_527_522_98e-11;
const LOG10_2_HI: f64 = 3.010_299_956_636_117_713_06e-01;
const LOG10_2_LO: f64 = 3.694_239_077_158_930_786_16e-13;

const LG1: f64 = 6.666_666_666_666_735_130e-01;
const LG2: f64 = 3.999_999_999_940_941_908e-01;
const LG3: f64 = 2.857_142_874_366_239_149e-01;
const LG4: f64 = 2.222_219_843_214_978_396e-01;
const LG5: f64 = 1.818_357_216_161_805_012e-01;
const LG6: f64 = 1.531_383_769_920_937_332e-01;
const LG7: f64 = 1.479_819_860_511_658_591e-01;

/// `x = 2^k (1 + f)` with the series pieces every logarithm needs.
struct Reduced {
    k: i32,
    f: f64,
    hfsq: f64,
    s: f64,
    r: f64,
}

impl Reduced {
    /// `log(1 + f)` split into `hi + lo` with `hi` holding 20 fraction bits.
    fn split(&self) -> (f64, f64) {
        let hi = clear_low_word(self.f - self.hfsq);
        let lo = self.f - hi - self.hfsq + self.s * (self.hfsq + self.r);
        (hi, lo)
    }
}

/// `Err` carries the final result for zero, negative and non-finite input.
fn reduce(x: f64) -> Result<Reduced, f64> {
    let mut x = x;
    let mut bits = x.to_bits();
    let mut hx = (bits >> 32) as u32;
    let mut k = 0i32;
    if hx < 0x0010_0000 || hx >> 31 != 0 {
        if bits << 1 == 0 {
            return Err(f64::NEG_INFINITY);
        }
        if hx >> 31 != 0 {
            return Err(f64::NAN);
        }
        // subnormal: scale into the normal range
        k -= 54;
        x *= f64::from_bits(0x4350_0000_0000_0000);
        bits = x.to_bits();
        hx = (bits >> 32) as u32;
    } else if hx >= 0x7FF0_0000 {
        return Err(x);
    } else if hx == 0x3FF0_0000 && bits << 32 == 0 {
        return Err(0.0);
    }

    let hx = hx + (0x3FF0_0000 - 0x3FE6_A09E);
    k += (hx >> 20) as i32 - 0x3FF;
    let hx = (hx & 0x000F_FFFF) + 0x3FE6_A09E;
    let x = f64::from_bits((u64::from(hx) << 32) | (bits & 0xFFFF_FFFF));

    let f = x - 1.0;
    Ok(series(k, f))
}

fn series(k: i32, f: f64) -> Reduced {
    let hfsq = 0.5 * f * f;
    let s = f / (2.0 + f);
    let z = s * s;
    let w = z * z;
    let t1 = w * (LG2 + w * (LG4 + w * LG6));
    let t2 = z * (LG1 + w * (LG3 + w * (LG5 + w * LG7)));
    Reduced { k, f, hfsq, s, r: t2 + t1 }
}

/// Natural logarithm.
pub fn log(x: f64) -> f64 {
    let red = match reduce(x) {
        Ok(red) => red,
        Err(special) => return special,
    };
    let dk = red.k as f64;
    red.s * (red.hfsq + red.r) + dk * LN2_LO - red.hfsq + red.f + dk * LN2_HI
}

pub fn log2(x: f64) -> f64 {
    let red = match reduce(x) {
        Ok(red) => red,
        Err(special) => return special,
    };
    let (hi, lo) = red.split();
    let mut val_hi = hi * IVLN2_HI;
    let mut val_lo = (lo + hi) * IVLN2_LO + lo * IVLN2_HI;
    let y = red.k as f64;
    let w = y + val_hi;
    val_lo += (y - w) + val_hi;
    val_hi = w;
    val_lo + val_hi
}

pub fn log10(x: f64) -> f64 {
    let red = match reduce(x) {
        Ok(red) => red,
        Err(special) => return special,
    };
    let (hi, lo) = red.split();
    let dk = red.k as f64;
    let mut val_hi = hi * IVLN10_HI;
    let y = dk * LOG10_2_HI;
    let mut val_lo = dk * LOG10_2_LO + (lo + hi) * IVLN10_LO + lo * IVLN10_HI;
    let w = y + val_hi;
    val_lo += (y - w) + val_hi;
    val_hi = w;
    val_lo + val_hi
}

/// `log(1 + x)`, accurate for small `|x|`.
pub fn log1p(x: f64) -> f64 {
    let hx = high_word(x);
    let mut k = 1i32;
    let mut c = 0.0;
    let mut f = 0.0;
    if hx < 0x3FDA_827A || hx >> 31 != 0 {
        // 1 + x < sqrt(2)
        if hx >= 0xBFF0_0000 {
            // x <= -1
            return if x == -1.0 { f64::NEG_INFINITY } else { f64::NAN };
        }
        if hx << 1 < 0x3CA0_0000 << 1 {
            // |x| < 2^-53
            return x;
        }
        if hx <= 0xBFD2_BEC4 {
            // sqrt(2)/2 <= 1 + x < sqrt(2): no reduction needed
            k = 0;
            f = x;
        }
    } else if hx >= 0x7FF0_0000 {
        return x;
    }
    if k != 0 {
        let u = 1.0 + x;
        let hu = high_word(u) + (0x3FF0_0000 - 0x3FE6_A09E);
        k = (hu >> 20) as i32 - 0x3FF;
        // correction term for the rounding of 1 + x
        if k < 54 {
            c = if k >= 2 { 1.0 - (u - x) } else { x - (u - 1.0) };
            c /= u;
        }
        let hu = (hu & 0x000F_FFFF) + 0x3FE6_A09E;
        let u = f64::from_bits((u64::from(hu) << 32) | (u.to_bits() & 0xFFFF_FFFF));
        f = u - 1.0;
    }
    let red = series(k, f);
    let dk = k as f64;
    red.s * (red.hfsq + red.r) + (dk * LN2_LO + c) - red.hfsq + red.f + dk * LN2_HI
}

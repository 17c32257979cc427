// SPDX-License-Identifier: LGPL-3.0-or-later

//! Inverse trigonometric functions.

use super::{clear_low_word, high_word, low_word};

const PIO2_HI: f64 = 1.570_796_326_794_896_558_00e+00;
const PIO2_LO: f64 = 6.123_233_995_736_766_035_87e-17;
const PI: f64 = 3.141_592_653_589_793_116_0e+00;
const PI_LO: f64 = 1.224_646_799_147_353_177_2e-16;

const PS0: f64 = 1.666_666_666_666_666_574_15e-01;
const PS1: f64 = -3.255_658_186_224_009_154_05e-01;
const PS2: f64 = 2.012_125_321_348_629_258_81e-01;
const PS3: f64 = -4.005_553_450_067_941_140_27e-02;
const PS4: f64 = 7.915_349_942_898_145_321_76e-04;
const PS5: f64 = 3.479_331_075_960_211_675_70e-05;
const QS1: f64 = -2.403_394_911_734_414_218_78e+00;
const QS2: f64 = 2.020_945_760_233_505_694_71e+00;
const QS3: f64 = -6.882_839_716_054_532_930_30e-01;
const QS4: f64 = 7.703_815_055_590_193_527_91e-02;

/// atan at 0.5, 1.0, 1.5 and infinity, high and low parts.
const ATAN_HI: [f64; 4] = [
    4.636_476_090_008_060_935_15e-01,
    7.853_981_633_974_482_789_99e-01,
    9.827_937_232_473_290_540_82e-01,
    1.570_796_326_794_896_558_00e+00,
];
const ATAN_LO: [f64; 4] = [
    2.269_877_745_296_168_709_24e-17,
    3.061_616_997_868_383_017_93e-17,
    1.390_331_103_123_099_845_16e-17,
    6.123_233_995_736_766_035_87e-17,
];
#[rustfmt::skip]
const AT: [f64; 11] = [
    3.333_333_333_333_293_180_27e-01,
    -1.999_999_999_987_648_324_76e-01,
    1.428_571_427_250_346_637_11e-01,
    -1.111_111_040_546_235_578_80e-01,
    9.090_887_133_436_506_561_96e-02,
    -7.691_876_205_044_829_994_95e-02,
    6.661_073_137_387_531_206_69e-02,
    -5.833_570_133_790_573_486_45e-02,
    4.976_877_994_615_932_360_17e-02,
    -3.653_157_274_421_691_552_70e-02,
    1.628_582_011_536_578_236_23e-02,
];

/// Rational approximation of `(asin(sqrt(z)) - sqrt(z)) / sqrt(z)^3`.
fn r(z: f64) -> f64 {
    let p = z * (PS0 + z * (PS1 + z * (PS2 + z * (PS3 + z * (PS4 + z * PS5)))));
    let q = 1.0 + z * (QS1 + z * (QS2 + z * (QS3 + z * QS4)));
    p / q
}

/// Arcsine; NaN outside `[-1, 1]`.
pub fn asin(x: f64) -> f64 {
    let hx = high_word(x);
    let ix = hx & 0x7FFF_FFFF;
    if ix >= 0x3FF0_0000 {
        if (ix - 0x3FF0_0000) | low_word(x) == 0 {
            return x * PIO2_HI;
        }
        return f64::NAN;
    }
    if ix < 0x3FE0_0000 {
        if (0x0010_0000..0x3E50_0000).contains(&ix) {
            return x;
        }
        return x + x * r(x * x);
    }
    // 0.5 <= |x| < 1: asin(x) = pi/2 - 2 asin(sqrt((1 - |x|) / 2))
    let z = (1.0 - x.abs()) * 0.5;
    let s = z.sqrt();
    let rz = r(z);
    let y = if ix >= 0x3FEF_3333 {
        PIO2_HI - (2.0 * (s + s * rz) - PIO2_LO)
    } else {
        let f = clear_low_word(s);
        let c = (z - f * f) / (s + f);
        0.5 * PIO2_HI - (2.0 * s * rz - (PIO2_LO - 2.0 * c) - (0.5 * PIO2_HI - 2.0 * f))
    };
    if hx >> 31 != 0 { -y } else { y }
}

/// Arccosine; NaN outside `[-1, 1]`.
pub fn acos(x: f64) -> f64 {
    let hx = high_word(x);
    let ix = hx & 0x7FFF_FFFF;
    if ix >= 0x3FF0_0000 {
        if (ix - 0x3FF0_0000) | low_word(x) == 0 {
            return if hx >> 31 != 0 { 2.0 * PIO2_HI } else { 0.0 };
        }
        return f64::NAN;
    }
    if ix < 0x3FE0_0000 {
        if ix <= 0x3C60_0000 {
            return PIO2_HI;
        }
        return PIO2_HI - (x - (PIO2_LO - x * r(x * x)));
    }
    if hx >> 31 != 0 {
        let z = (1.0 + x) * 0.5;
        let s = z.sqrt();
        let w = r(z) * s - PIO2_LO;
        return 2.0 * (PIO2_HI - (s + w));
    }
    let z = (1.0 - x) * 0.5;
    let s = z.sqrt();
    let df = clear_low_word(s);
    let c = (z - df * df) / (s + df);
    let w = r(z) * s + c;
    2.0 * (df + w)
}

pub fn atan(x: f64) -> f64 {
    let hx = high_word(x);
    let negative = hx >> 31 != 0;
    let ix = hx & 0x7FFF_FFFF;
    if ix >= 0x4410_0000 {
        if x.is_nan() {
            return x;
        }
        return if negative { -ATAN_HI[3] } else { ATAN_HI[3] };
    }
    let (id, x) = if ix < 0x3FDC_0000 {
        if ix < 0x3E40_0000 {
            return x;
        }
        (None, x)
    } else {
        let a = x.abs();
        if ix < 0x3FF3_0000 {
            if ix < 0x3FE6_0000 {
                (Some(0), (2.0 * a - 1.0) / (2.0 + a))
            } else {
                (Some(1), (a - 1.0) / (a + 1.0))
            }
        } else if ix < 0x4003_8000 {
            (Some(2), (a - 1.5) / (1.0 + 1.5 * a))
        } else {
            (Some(3), -1.0 / a)
        }
    };
    let z = x * x;
    let w = z * z;
    let s1 = z * (AT[0] + w * (AT[2] + w * (AT[4] + w * (AT[6] + w * (AT[8] + w * AT[10])))));
    let s2 = w * (AT[1] + w * (AT[3] + w * (AT[5] + w * (AT[7] + w * AT[9]))));
    match id {
        None => x - x * (s1 + s2),
        Some(id) => {
            let z = ATAN_HI[id] - ((x * (s1 + s2) - ATAN_LO[id]) - x);
            if negative { -z } else { z }
        }
    }
}

/// Angle of the point `(x, y)`, in `[-pi, pi]`.
pub fn atan2(y: f64, x: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        return x + y;
    }
    let (ix, lx) = (high_word(x), low_word(x));
    let (iy, ly) = (high_word(y), low_word(y));
    if ix.wrapping_sub(0x3FF0_0000) | lx == 0 {
        return atan(y);
    }
    // 2 * sign(x) + sign(y)
    let m = ((iy >> 31) & 1) | ((ix >> 30) & 2);
    let ix = ix & 0x7FFF_FFFF;
    let iy = iy & 0x7FFF_FFFF;

    if iy | ly == 0 {
        return match m {
            0 | 1 => y,
            2 => PI,
            _ => -PI,
        };
    }
    if ix | lx == 0 {
        return if m & 1 != 0 { -PI / 2.0 } else { PI / 2.0 };
    }
    if ix == 0x7FF0_0000 {
        return if iy == 0x7FF0_0000 {
            match m {
                0 => PI / 4.0,
                1 => -PI / 4.0,
                2 => 3.0 * PI / 4.0,
                _ => -3.0 * PI / 4.0,
            }
        } else {
            match m {
                0 => 0.0,
                1 => -0.0,
                2 => PI,
                _ => -PI,
            }
        };
    }
    // |y/x| > 2^64
    if ix + (64 << 20) < iy || iy == 0x7FF0_0000 {
        return if m & 1 != 0 { -PI / 2.0 } else { PI / 2.0 };
    }
    let z = if m & 2 != 0 && iy + (64 << 20) < ix {
        0.0
    } else {
        atan((y / x).abs())
    };
    match m {
        0 => z,
        1 => -z,
        2 => PI - (z - PI_LO),
        _ => (z - PI_LO) - PI,
    }
}

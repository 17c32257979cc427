// SPDX-License-Identifier: LGPL-3.0-or-later

//! Reduction of an argument modulo `pi/2`.
//!
//! Returns `(n, y0, y1)` with `x = n * pi/2 + (y0 + y1)` and
//! `|y0 + y1| <= pi/4`, where `y0 + y1` carries roughly 106 significant
//! bits. Small and medium arguments use Cody-Waite with a three-part
//! `pi/2`; huge arguments are reduced against the 1584-bit expansion of
//! `2/pi` so that `sin(1e300)` is as accurate as `sin(1.0)`.

use super::high_word;
use crate::math::scalar::double::{floor, scalbn};

const TO_INT: f64 = 1.5 / f64::EPSILON;
const PIO4: f64 = core::f64::consts::FRAC_PI_4;
const INV_PIO2: f64 = 6.366_197_723_675_813_824_33e-01;
const PIO2_1: f64 = 1.570_796_326_734_125_614_17e+00;
const PIO2_1T: f64 = 6.077_100_506_506_192_249_32e-11;
const PIO2_2: f64 = 6.077_100_506_303_965_976_60e-11;
const PIO2_2T: f64 = 2.022_266_248_795_950_631_54e-21;
const PIO2_3: f64 = 2.022_266_248_711_166_455_80e-21;
const PIO2_3T: f64 = 8.478_427_660_368_899_569_97e-32;

const TWO24: f64 = 16_777_216.0;
const TWON24: f64 = 5.960_464_477_539_062_500_00e-08;

/// `2/pi` in 24-bit chunks.
#[rustfmt::skip]
const IPIO2: [i32; 66] = [
    0xA2F983, 0x6E4E44, 0x1529FC, 0x2757D1, 0xF534DD, 0xC0DB62,
    0x95993C, 0x439041, 0xFE5163, 0xABDEBB, 0xC561B7, 0x246E3A,
    0x424DD2, 0xE00649, 0x2EEA09, 0xD1921C, 0xFE1DEB, 0x1CB129,
    0xA73EE8, 0x8235F5, 0x2EBB44, 0x84E99C, 0x7026B4, 0x5F7E41,
    0x3991D6, 0x398353, 0x39F49C, 0x845F8B, 0xBDF928, 0x3B1FF8,
    0x97FFDE, 0x05980F, 0xEF2F11, 0x8B5A0A, 0x6D1F6D, 0x367ECF,
    0x27CB09, 0xB74F46, 0x3F669E, 0x5FEA2D, 0x7527BA, 0xC7EBE5,
    0xF17B3D, 0x0739F7, 0x8A5292, 0xEA6BFB, 0x5FB11F, 0x8D5D08,
    0x560330, 0x46FC7B, 0x6BABF0, 0xCFBC20, 0x9AF436, 0x1DA9E3,
    0x91615E, 0xE61B08, 0x659985, 0x5F14A0, 0x68408D, 0xFFD880,
    0x4D7327, 0x310606, 0x1556CA, 0x73A8C9, 0x60E27B, 0xC08C6B,
];

/// `pi/2` split into pieces of at most 24 significant bits.
#[rustfmt::skip]
const PIO2: [f64; 8] = [
    1.570_796_251_296_997_070_31e+00,
    7.549_789_415_861_596_353_35e-08,
    5.390_302_529_957_764_765_54e-15,
    3.282_003_415_807_912_941_23e-22,
    1.270_655_753_080_676_073_49e-29,
    1.229_333_089_811_113_289_32e-36,
    2.733_700_538_164_645_596_24e-44,
    2.167_416_838_778_048_194_44e-51,
];

/// Terms of `2/pi` kept beyond the input's own bits, for double precision.
const JK: usize = 4;

pub fn rem_pio2(x: f64) -> (i32, f64, f64) {
    let sign = x.is_sign_negative();
    let ix = high_word(x) & 0x7FFF_FFFF;

    // |x| ~<= 5pi/4 and 9pi/4: subtract 1..4 copies of pi/2 directly unless
    // x is close to a multiple, where the medium path keeps more bits.
    if ix <= 0x400F_6A7A {
        if ix & 0xF_FFFF == 0x9_21FB {
            return medium(x, ix);
        }
        if ix <= 0x4002_D97C {
            return small(x, sign, 1.0);
        }
        return small(x, sign, 2.0);
    }
    if ix <= 0x401C_463B {
        if ix <= 0x4015_FDBC {
            if ix == 0x4012_D97C {
                return medium(x, ix);
            }
            return small(x, sign, 3.0);
        }
        if ix == 0x4019_21FB {
            return medium(x, ix);
        }
        return small(x, sign, 4.0);
    }
    if ix < 0x4139_21FB {
        return medium(x, ix);
    }
    if ix >= 0x7FF0_0000 {
        let nan = x - x;
        return (0, nan, nan);
    }

    // Split |x| into three 24-bit integers scaled by 2^e0.
    let scaled = f64::from_bits((x.to_bits() & 0x000F_FFFF_FFFF_FFFF) | ((0x3FF + 23) << 52));
    let mut tx = [0.0f64; 3];
    let mut z = scaled;
    for chunk in tx.iter_mut().take(2) {
        *chunk = z as i32 as f64;
        z = (z - *chunk) * TWO24;
    }
    tx[2] = z;
    let mut nx = 3;
    while tx[nx - 1] == 0.0 {
        nx -= 1;
    }
    let e0 = (ix >> 20) as i32 - (0x3FF + 23);
    let (n, y0, y1) = kernel_rem_pio2(&tx[..nx], e0);
    if sign { (-n, -y0, -y1) } else { (n, y0, y1) }
}

#[inline]
fn small(x: f64, sign: bool, k: f64) -> (i32, f64, f64) {
    if !sign {
        let z = x - k * PIO2_1;
        let y0 = z - k * PIO2_1T;
        (k as i32, y0, (z - y0) - k * PIO2_1T)
    } else {
        let z = x + k * PIO2_1;
        let y0 = z + k * PIO2_1T;
        (-(k as i32), y0, (z - y0) + k * PIO2_1T)
    }
}

/// Cody-Waite with up to three refinements, for `|x| < 2^20 * pi/2`.
fn medium(x: f64, ix: u32) -> (i32, f64, f64) {
    let mut fn_ = x * INV_PIO2 + TO_INT - TO_INT;
    let mut n = fn_ as i32;
    let mut r = x - fn_ * PIO2_1;
    let mut w = fn_ * PIO2_1T;
    // Round-to-nearest may land one multiple off in directed modes.
    if r - w < -PIO4 {
        n -= 1;
        fn_ -= 1.0;
        r = x - fn_ * PIO2_1;
        w = fn_ * PIO2_1T;
    } else if r - w > PIO4 {
        n += 1;
        fn_ += 1.0;
        r = x - fn_ * PIO2_1;
        w = fn_ * PIO2_1T;
    }
    let mut y0 = r - w;
    let ex = (ix >> 20) as i32;
    let ey = ((y0.to_bits() >> 52) & 0x7FF) as i32;
    if ex - ey > 16 {
        let t = r;
        w = fn_ * PIO2_2;
        r = t - w;
        w = fn_ * PIO2_2T - ((t - r) - w);
        y0 = r - w;
        let ey = ((y0.to_bits() >> 52) & 0x7FF) as i32;
        if ex - ey > 49 {
            let t = r;
            w = fn_ * PIO2_3;
            r = t - w;
            w = fn_ * PIO2_3T - ((t - r) - w);
            y0 = r - w;
        }
    }
    (n, y0, (r - y0) - w)
}

/// Multi-precision reduction of `x[0..] * 2^e0` against `2/pi`.
///
/// `x` holds up to three 24-bit integers as `f64`; `e0` is the exponent of
/// `x[0]` and must satisfy `e0 > -24`.
fn kernel_rem_pio2(x: &[f64], e0: i32) -> (i32, f64, f64) {
    let jx = x.len() - 1;
    let jv = ((e0 - 3) / 24).max(0) as usize;
    let mut q0 = e0 - 24 * (jv as i32 + 1);

    let mut f = [0.0f64; 20];
    let mut q = [0.0f64; 20];
    let mut iq = [0i32; 20];
    let mut fq = [0.0f64; 20];

    // f[0..=jx+jk] = IPIO2[jv-jx..=jv+jk], zero below the table start.
    for (i, slot) in f.iter_mut().enumerate().take(jx + JK + 1) {
        let j = jv as isize - jx as isize + i as isize;
        *slot = if j < 0 { 0.0 } else { IPIO2[j as usize] as f64 };
    }
    for i in 0..=JK {
        q[i] = (0..=jx).map(|j| x[j] * f[jx + i - j]).sum();
    }

    let mut jz = JK;
    let mut z: f64;
    let mut n: i32;
    let mut ih: i32;
    loop {
        // Distill q[] into iq[] in reverse order.
        z = q[jz];
        let mut i = 0;
        let mut j = jz;
        while j > 0 {
            let fw = (TWON24 * z) as i32 as f64;
            iq[i] = (z - TWO24 * fw) as i32;
            z = q[j - 1] + fw;
            i += 1;
            j -= 1;
        }

        z = scalbn(z, q0);
        z -= 8.0 * floor(z * 0.125);
        n = z as i32;
        z -= n as f64;
        ih = 0;
        if q0 > 0 {
            let i = iq[jz - 1] >> (24 - q0);
            n += i;
            iq[jz - 1] -= i << (24 - q0);
            ih = iq[jz - 1] >> (23 - q0);
        } else if q0 == 0 {
            ih = iq[jz - 1] >> 23;
        } else if z >= 0.5 {
            ih = 2;
        }

        if ih > 0 {
            // q > 0.5: take the complement
            n += 1;
            let mut carry = false;
            for word in iq.iter_mut().take(jz) {
                let j = *word;
                if !carry {
                    if j != 0 {
                        carry = true;
                        *word = 0x100_0000 - j;
                    }
                } else {
                    *word = 0xFF_FFFF - j;
                }
            }
            if q0 == 1 {
                iq[jz - 1] &= 0x7F_FFFF;
            } else if q0 == 2 {
                iq[jz - 1] &= 0x3F_FFFF;
            }
            if ih == 2 {
                z = 1.0 - z;
                if carry {
                    z -= scalbn(1.0, q0);
                }
            }
        }

        // All bits cancelled: pull in more terms of 2/pi and retry.
        if z == 0.0 && iq[JK..jz].iter().all(|&w| w == 0) {
            let mut k = 1;
            while iq[JK - k] == 0 {
                k += 1;
            }
            for i in jz + 1..=jz + k {
                f[jx + i] = IPIO2[jv + i] as f64;
                q[i] = (0..=jx).map(|j| x[j] * f[jx + i - j]).sum();
            }
            jz += k;
            continue;
        }
        break;
    }

    // Chop off trailing zero words.
    if z == 0.0 {
        jz -= 1;
        q0 -= 24;
        while iq[jz] == 0 {
            jz -= 1;
            q0 -= 24;
        }
    } else {
        z = scalbn(z, -q0);
        if z >= TWO24 {
            let fw = (TWON24 * z) as i32 as f64;
            iq[jz] = (z - TWO24 * fw) as i32;
            jz += 1;
            q0 += 24;
            iq[jz] = fw as i32;
        } else {
            iq[jz] = z as i32;
        }
    }

    let mut fw = scalbn(1.0, q0);
    for i in (0..=jz).rev() {
        q[i] = fw * iq[i] as f64;
        fw *= TWON24;
    }

    // fq[jz-i] = PIO2 * q[i..], then fold to y0 + y1.
    for i in (0..=jz).rev() {
        let mut acc = 0.0;
        let mut k = 0;
        while k <= JK && k <= jz - i {
            acc += PIO2[k] * q[i + k];
            k += 1;
        }
        fq[jz - i] = acc;
    }
    let mut sum = 0.0;
    for i in (0..=jz).rev() {
        sum += fq[i];
    }
    let y0 = if ih == 0 { sum } else { -sum };
    let mut tail = fq[0] - sum;
    for value in fq.iter().take(jz + 1).skip(1) {
        tail += *value;
    }
    let y1 = if ih == 0 { tail } else { -tail };
    (n & 7, y0, y1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_small_multiples() {
        let (n, y0, _) = rem_pio2(PI);
        assert_eq!(n, 2);
        assert!(y0.abs() < 1e-15);
        let (n, y0, _) = rem_pio2(-3.0 * FRAC_PI_2 - 0.25);
        assert_eq!(n, -3);
        assert_approx_eq!(f64, y0, -0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_medium_argument() {
        let (n, y0, y1) = rem_pio2(1000.0);
        assert_eq!(n, 637);
        assert_approx_eq!(f64, y0 + y1, 1000.0 - 637.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_huge_argument_reduces_into_range() {
        for &x in &[1e22, 1e100, 1e300, f64::MAX, -7.3e250] {
            let (_, y0, y1) = rem_pio2(x);
            assert!(y0.abs() <= FRAC_PI_2 / 2.0 + 1e-15, "{x}: {y0}");
            assert!(y1.abs() <= y0.abs() * f64::EPSILON);
        }
        let (n, y0, _) = rem_pio2(1e22);
        assert_eq!(n & 3, 3);
        assert_approx_eq!(f64, y0, 0.550_618_934_235_809_7, epsilon = 1e-15);
    }

    #[test]
    fn test_non_finite() {
        let (_, y0, y1) = rem_pio2(f64::INFINITY);
        assert!(y0.is_nan() && y1.is_nan());
        assert!(rem_pio2(f64::NAN).1.is_nan());
    }
}

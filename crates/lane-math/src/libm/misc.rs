// SPDX-License-Identifier: LGPL-3.0-or-later

//! `hypot` and `fmod`.

const SPLIT: f64 = 134_217_729.0; // 2^27 + 1

/// `x * x` as an exact `hi + lo` pair (Dekker).
fn square(x: f64) -> (f64, f64) {
    let xc = x * SPLIT;
    let xh = x - xc + xc;
    let xl = x - xh;
    let hi = x * x;
    let lo = xh * xh - hi + 2.0 * xh * xl + xl * xl;
    (hi, lo)
}

/// `sqrt(x^2 + y^2)` without intermediate overflow or underflow.
/// An infinite operand wins over NaN.
pub fn hypot(x: f64, y: f64) -> f64 {
    let mut ux = x.to_bits() & (u64::MAX >> 1);
    let mut uy = y.to_bits() & (u64::MAX >> 1);
    if ux < uy {
        core::mem::swap(&mut ux, &mut uy);
    }
    let ex = (ux >> 52) as i32;
    let ey = (uy >> 52) as i32;
    let mut x = f64::from_bits(ux);
    let mut y = f64::from_bits(uy);
    if ey == 0x7FF {
        return y;
    }
    if ex == 0x7FF || uy == 0 {
        return x;
    }
    if ex - ey > 64 {
        return x + y;
    }

    let mut z = 1.0;
    if ex > 0x3FF + 510 {
        z = f64::from_bits((0x3FF + 700) << 52);
        x *= f64::from_bits((0x3FF - 700) << 52);
        y *= f64::from_bits((0x3FF - 700) << 52);
    } else if ey < 0x3FF - 450 {
        z = f64::from_bits((0x3FF - 700) << 52);
        x *= f64::from_bits((0x3FF + 700) << 52);
        y *= f64::from_bits((0x3FF + 700) << 52);
    }
    let (hx, lx) = square(x);
    let (hy, ly) = square(y);
    z * (ly + lx + hy + hx).sqrt()
}

/// Remainder of `x / y` truncated toward zero, with the sign of `x`.
/// Exact; NaN when `y` is zero or `x` is infinite.
pub fn fmod(x: f64, y: f64) -> f64 {
    let mut uxi = x.to_bits();
    let mut uyi = y.to_bits();
    let mut ex = ((uxi >> 52) & 0x7FF) as i32;
    let mut ey = ((uyi >> 52) & 0x7FF) as i32;
    let sx = uxi >> 63;

    if uyi << 1 == 0 || y.is_nan() || ex == 0x7FF {
        return (x * y) / (x * y);
    }
    if uxi << 1 <= uyi << 1 {
        if uxi << 1 == uyi << 1 {
            return 0.0 * x;
        }
        return x;
    }

    // normalize both significands to have the leading bit at 52
    if ex == 0 {
        let mut i = uxi << 12;
        while i >> 63 == 0 {
            ex -= 1;
            i <<= 1;
        }
        uxi <<= -ex + 1;
    } else {
        uxi &= u64::MAX >> 12;
        uxi |= 1 << 52;
    }
    if ey == 0 {
        let mut i = uyi << 12;
        while i >> 63 == 0 {
            ey -= 1;
            i <<= 1;
        }
        uyi <<= -ey + 1;
    } else {
        uyi &= u64::MAX >> 12;
        uyi |= 1 << 52;
    }

    // shift-subtract long division
    while ex > ey {
        let i = uxi.wrapping_sub(uyi);
        if i >> 63 == 0 {
            if i == 0 {
                return 0.0 * x;
            }
            uxi = i;
        }
        uxi <<= 1;
        ex -= 1;
    }
    let i = uxi.wrapping_sub(uyi);
    if i >> 63 == 0 {
        if i == 0 {
            return 0.0 * x;
        }
        uxi = i;
    }
    while uxi >> 52 == 0 {
        uxi <<= 1;
        ex -= 1;
    }

    if ex > 0 {
        uxi -= 1 << 52;
        uxi |= (ex as u64) << 52;
    } else {
        uxi >>= -ex + 1;
    }
    f64::from_bits(uxi | (sx << 63))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypot() {
        assert_eq!(hypot(3.0, 4.0), 5.0);
        assert_eq!(hypot(-5.0, 12.0), 13.0);
        assert_eq!(hypot(1e300, 1e300), 1.414_213_562_373_095_2e300);
        assert_eq!(hypot(3e-320, 4e-320), 5e-320);
        assert_eq!(hypot(f64::INFINITY, f64::NAN), f64::INFINITY);
        assert_eq!(hypot(f64::NAN, f64::NEG_INFINITY), f64::INFINITY);
        assert!(hypot(f64::NAN, 1.0).is_nan());
        assert_eq!(hypot(0.0, -0.0), 0.0);
    }

    #[test]
    fn test_fmod() {
        assert_eq!(fmod(5.5, 2.0), 1.5);
        assert_eq!(fmod(-5.5, 2.0), -1.5);
        assert_eq!(fmod(5.5, -2.0), 1.5);
        assert_eq!(fmod(1.0, 0.1), 0.099_999_999_999_999_95);
        assert_eq!(fmod(1e300, 3.0), 1e300 % 3.0);
        assert_eq!(fmod(2.0, 3.0), 2.0);
        assert_eq!(fmod(-6.0, 3.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(fmod(7e-320, 3e-320), 7e-320 % 3e-320);
    }

    #[test]
    fn test_fmod_invalid() {
        assert!(fmod(1.0, 0.0).is_nan());
        assert!(fmod(f64::INFINITY, 2.0).is_nan());
        assert!(fmod(1.0, f64::NAN).is_nan());
        assert_eq!(fmod(1.0, f64::INFINITY), 1.0);
    }
}

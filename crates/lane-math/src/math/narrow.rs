// SPDX-License-Identifier: LGPL-3.0-or-later

//! Checked float-to-integer narrowing.
//!
//! `as` casts saturate silently, which hides a wrong answer behind a
//! plausible one. These helpers round first and then reject NaN and any
//! value outside the target range with [`MathError::NarrowingOverflow`].

use crate::element::Float;
use crate::error::{MathError, MathResult};

/// Integer type a float can be narrowed into.
pub trait Narrow: Copy {
    const NAME: &'static str;
    /// Smallest value, exact as `f64`.
    const MIN_F64: f64;
    /// One past the largest value, a power of two and exact as `f64`.
    const END_F64: f64;

    /// Conversion of an integral, in-range `f64`.
    fn from_integral(value: f64) -> Self;
}

macro_rules! impl_narrow {
    ($($int:ty => $bits:expr),* $(,)?) => {
        $(
            impl Narrow for $int {
                const NAME: &'static str = stringify!($int);
                const MIN_F64: f64 = <$int>::MIN as f64;
                const END_F64: f64 = (1u128 << $bits) as f64;

                #[inline]
                fn from_integral(value: f64) -> Self {
                    value as $int
                }
            }
        )*
    };
}

impl_narrow! {
    i8 => 7,
    i16 => 15,
    i32 => 31,
    i64 => 63,
    u8 => 8,
    u16 => 16,
    u32 => 32,
    u64 => 64,
}

fn narrow<I: Narrow>(rounded: f64) -> MathResult<I> {
    if rounded >= I::MIN_F64 && rounded < I::END_F64 {
        return Ok(I::from_integral(rounded));
    }
    log::debug!("narrowing overflow: {rounded} does not fit {}", I::NAME);
    Err(MathError::NarrowingOverflow {
        value: rounded,
        target: I::NAME,
        min: I::MIN_F64,
        max: I::END_F64 - 1.0,
    })
}

/// Round half away from zero, then narrow.
pub fn round_to<I: Narrow, F: Float>(x: F) -> MathResult<I> {
    narrow(x.round().to_f64())
}

/// Round toward zero, then narrow.
pub fn trunc_to<I: Narrow, F: Float>(x: F) -> MathResult<I> {
    narrow(x.trunc().to_f64())
}

pub fn floor_to<I: Narrow, F: Float>(x: F) -> MathResult<I> {
    narrow(x.floor().to_f64())
}

pub fn ceil_to<I: Narrow, F: Float>(x: F) -> MathResult<I> {
    narrow(x.ceil().to_f64())
}

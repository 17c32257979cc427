// SPDX-License-Identifier: LGPL-3.0-or-later

//! Fixed-width, over-aligned register types and the mapping from a logical
//! lane count to the register that holds it.
//!
//! A register always has `WIDTH` physical lanes. A `Traits<T, N>` user sees
//! only the first `N` of them (the logical lanes); the rest is padding.
//! Loads, `fill`, `set` and `zero` write zero into padding. Arithmetic may
//! leave anything there, and nothing that reads logical lanes looks at it.

use core::fmt::Debug;

use crate::element::Element;

/// One SIMD-sized register of `WIDTH` lanes.
pub trait Register: Copy + Debug + PartialEq + Default + Send + Sync + 'static {
    type Element: Element;
    /// Physical lane count.
    const WIDTH: usize;
    /// Alignment of the register type in bytes.
    const ALIGN: usize;

    fn splat(value: Self::Element) -> Self;
    fn lanes(&self) -> &[Self::Element];
    fn lanes_mut(&mut self) -> &mut [Self::Element];
}

macro_rules! register {
    ($(#[$meta:meta])* $name:ident, $elem:ty, $width:literal, $align:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        #[repr(C, align($align))]
        pub struct $name(pub [$elem; $width]);

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self([<$elem as Element>::ZERO; $width])
            }
        }

        impl Register for $name {
            type Element = $elem;
            const WIDTH: usize = $width;
            const ALIGN: usize = $align;

            #[inline]
            fn splat(value: $elem) -> Self {
                Self([value; $width])
            }
            #[inline]
            fn lanes(&self) -> &[$elem] {
                &self.0
            }
            #[inline]
            fn lanes_mut(&mut self) -> &mut [$elem] {
                &mut self.0
            }
        }
    };
}

register!(
    /// Four `f32` lanes, 16-byte aligned (SSE).
    F32x4, f32, 4, 16
);
register!(
    /// Eight `f32` lanes, 32-byte aligned (AVX).
    F32x8, f32, 8, 32
);
register!(
    /// Two `f64` lanes, 16-byte aligned (SSE2).
    F64x2, f64, 2, 16
);
register!(
    /// Four `f64` lanes, 32-byte aligned (AVX).
    F64x4, f64, 4, 32
);
register!(
    /// Eight `f64` lanes, 64-byte aligned (AVX-512).
    F64x8, f64, 8, 64
);
register!(
    /// Sixteen byte lanes, 16-byte aligned.
    U8x16, u8, 16, 16
);
register!(
    /// Thirty-two byte lanes, 32-byte aligned.
    U8x32, u8, 32, 32
);

// ─── Width mapping ───

/// Type-level logical lane count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lanes<const N: usize>;

/// Selects the narrowest register holding `N` lanes of `T`.
pub trait LaneWidth<T: Element> {
    type Simd: Register<Element = T>;
}

/// Register type for `N` lanes of `T`.
pub type SimdOf<T, const N: usize> = <Lanes<N> as LaneWidth<T>>::Simd;

macro_rules! lane_width {
    ($elem:ty => $reg:ident: $($n:literal),+ $(,)?) => {
        $(
            impl LaneWidth<$elem> for Lanes<$n> {
                type Simd = $reg;
            }
        )+
    };
}

lane_width!(f32 => F32x4: 1, 2, 3, 4);
lane_width!(f32 => F32x8: 5, 6, 7, 8);
lane_width!(f64 => F64x2: 1, 2);
lane_width!(f64 => F64x4: 3, 4);
lane_width!(f64 => F64x8: 5, 6, 7, 8);
lane_width!(u8 => U8x16: 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16);
lane_width!(u8 => U8x32: 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32);

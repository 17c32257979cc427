// SPDX-License-Identifier: LGPL-3.0-or-later

//! # lane-math
//!
//! Bit-exact scalar float primitives and a lane-width-generic register
//! operation set.
//!
//! - **Bit model**: IEEE-754 field access for `f32` and `f64`
//! - **Scalar math**: `const fn` classification, rounding, `frexp`,
//!   `next_after`, software `sqrt` and friends
//! - **libm**: host-independent transcendental functions (fdlibm ports)
//! - **Lanes**: `Traits<T, N>`, the operation set over `N` logical lanes
//!   of `f32`, `f64` or `u8`, backed by a fixed-width aligned register
//! - **Buffer kernels**: packed and horizontal operations over slices
//!
//! ## Design
//!
//! Lane operations are pure associated functions on a zero-sized type;
//! registers are plain aligned arrays, so the compiler is free to keep them
//! in vector registers. The per-lane evaluation strategy is a [`Backend`]
//! chosen at compile time with the `scalar-backend` feature. Slice kernels
//! use runtime dispatch via the `multiversion` crate and are compiled for
//! AVX2+FMA, AVX, SSE4.1 and NEON.
//!
//! Domain errors travel as NaN and infinity. The only fallible operations
//! are float-to-integer conversions, which return [`MathResult`].
//!
//! [`Backend`]: lanes::Backend

pub mod element;
pub mod error;
pub mod float;
pub mod lanes;
pub mod libm;
pub mod math;

pub use element::{Element, Float};
pub use error::{MathError, MathResult};
pub use float::BitModel;
pub use lanes::{LaneTraits, SimdOf, Traits};

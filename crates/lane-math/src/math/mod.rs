// SPDX-License-Identifier: LGPL-3.0-or-later

//! Scalar primitives and buffer kernels.
//!
//! - [`scalar`]: `const fn` IEEE-754 primitives for `f32` and `f64`
//! - [`narrow`]: checked float-to-integer conversion
//! - [`packed`]: elementwise buffer-to-buffer operations
//! - [`horizontal`]: buffer reductions

pub mod horizontal;
pub mod narrow;
pub mod packed;
pub mod scalar;

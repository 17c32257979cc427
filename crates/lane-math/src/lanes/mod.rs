// SPDX-License-Identifier: LGPL-3.0-or-later

//! Register types and the lane operation set.
//!
//! ```
//! use lane_math::lanes::Traits;
//!
//! type V3 = Traits<f64, 3>;
//! let a = V3::from_array([1.0, 2.0, 3.0]);
//! let b = V3::fill(2.0);
//! assert_eq!(V3::to_array(V3::mul(a, b)), [2.0, 4.0, 6.0]);
//! assert_eq!(V3::first(V3::h_sum(a)), 6.0);
//! ```

pub mod backend;
pub mod register;
mod traits;
mod transcendental;

pub use backend::{Backend, DefaultBackend, Portable, Scalar};
pub use register::{F32x4, F32x8, F64x2, F64x4, F64x8, LaneWidth, Lanes, Register, SimdOf, U8x16, U8x32};
pub use traits::{LaneTraits, Traits};

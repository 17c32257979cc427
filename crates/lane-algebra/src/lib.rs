// SPDX-License-Identifier: LGPL-3.0-or-later

//! # lane-algebra
//!
//! Small fixed-size linear algebra on top of `lane-math` registers.
//!
//! - [`Vector<T, N>`]: arithmetic, geometry and lane-wise functions
//! - [`SquareMatrix<T, D>`]: products, transpose, determinant, inverse
//! - [`Quaternion<T>`]: rotations, Hamilton product, `slerp`
//! - [`decompose`]: translation / rotation / stretch split of a 4x4
//!   transform, and [`Decomposed::recompose`] to rebuild it
//!
//! Element types are `f32` and `f64`; `N` and `D` range over the widths
//! `lane-math` provides registers for (1 through 8).
//!
//! Arithmetic follows IEEE-754: a singular matrix inverts to NaN rather
//! than failing. The `try_*` variants and [`decompose`] report problems
//! through [`AlgebraError`].

pub mod consts;
pub mod decompose;
pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use decompose::{Decomposed, decompose};
pub use error::{AlgebraError, AlgebraResult};
pub use matrix::SquareMatrix;
pub use quaternion::Quaternion;
pub use vector::Vector;

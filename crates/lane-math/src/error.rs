// SPDX-License-Identifier: LGPL-3.0-or-later

//! Error type for the few operations that can fail.
//!
//! Arithmetic never returns an error: domain problems travel as NaN or
//! infinity so that every lane of a register can carry its own state.
//! The only fallible conversions are the float-to-integer narrowing helpers
//! in [`crate::math::narrow`].

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot narrow {value} to {target}: value is NaN or outside [{min}, {max}]")]
    NarrowingOverflow {
        value: f64,
        target: &'static str,
        min: f64,
        max: f64,
    },
}

pub type MathResult<T> = Result<T, MathError>;

// SPDX-License-Identifier: LGPL-3.0-or-later

use lane_math::MathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AlgebraError {
    #[error("matrix is singular (determinant {determinant:e})")]
    SingularMatrix { determinant: f64 },

    #[error("polar decomposition produced non-finite values after {iterations} iterations")]
    DecompositionDiverged { iterations: usize },

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type AlgebraResult<T> = Result<T, AlgebraError>;

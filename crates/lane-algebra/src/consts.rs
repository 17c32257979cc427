// SPDX-License-Identifier: LGPL-3.0-or-later

//! Numerical parameters.

/// Upper bound on polar decomposition steps.
pub const POLAR_MAX_ITERATIONS: usize = 100;

/// Polar iteration stops once the largest row sum of `|R - R_next|` over
/// the upper 3x3 block drops below this.
pub const POLAR_TOLERANCE: f64 = 1e-6;

/// A matrix is treated as singular when `|det| <= eps * v`, with `v` the
/// product of its Euclidean row lengths and `eps` the larger of this value
/// and [`SINGULARITY_ULPS`] machine epsilons of the element type.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

/// Rounding noise floor for the singularity test, in machine epsilons.
pub const SINGULARITY_ULPS: f64 = 8.0;

// SPDX-License-Identifier: LGPL-3.0-or-later

//! Row-major square matrices.
//!
//! Each row is a [`Vector`], so row arithmetic runs through the lane
//! operation set. Matrix-vector products treat vectors as columns:
//! `m * v` computes `row(i) . v` for every row.
//!
//! Determinants and inverses use closed forms up to 4x4 (cofactor
//! expansion and the adjugate) and partial-pivot elimination beyond. A
//! singular or near-singular matrix inverts to all NaN; use
//! [`SquareMatrix::try_inverse`] to get an error instead.

use core::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use lane_math::lanes::{LaneWidth, Lanes};
use lane_math::{Float, Traits};

use crate::consts::{SINGULARITY_EPSILON, SINGULARITY_ULPS};
use crate::error::{AlgebraError, AlgebraResult};
use crate::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquareMatrix<T, const D: usize> {
    rows: [Vector<T, D>; D],
}

/// Top-left block of a matrix copied into a zero-filled 4x4 array, so the
/// closed forms can index freely for every `D <= 4`.
type Block<T> = [[T; 4]; 4];

impl<T: Float, const D: usize> SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    pub fn zero() -> Self {
        Self { rows: [Vector::zero(); D] }
    }

    pub fn identity() -> Self {
        let mut m = Self::zero();
        for i in 0..D {
            m.rows[i][i] = T::ONE;
        }
        m
    }

    pub fn from_rows(rows: [[T; D]; D]) -> Self {
        Self { rows: rows.map(Vector::new) }
    }

    pub fn to_rows(&self) -> [[T; D]; D] {
        self.rows.map(Vector::to_array)
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vector<T, D> {
        self.rows[i]
    }

    pub fn column(&self, j: usize) -> Vector<T, D> {
        Vector::new(core::array::from_fn(|i| self.rows[i][j]))
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(core::array::from_fn(|i| self.column(i).to_array()))
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> T {
        self.rows
            .iter()
            .map(|r| r.abs().horizontal_max())
            .fold(T::ZERO, |acc, x| if x > acc { x } else { acc })
    }

    pub fn has_nan(&self) -> bool {
        self.rows.iter().any(|r| r.has_nan())
    }

    /// Product of the Euclidean row lengths, Hadamard's upper bound on
    /// `|det|`.
    pub fn row_volume(&self) -> T {
        self.rows.iter().fold(T::ONE, |acc, r| acc * r.length())
    }

    fn block(&self) -> Block<T> {
        let mut b = [[T::ZERO; 4]; 4];
        for (dst, src) in b.iter_mut().zip(&self.rows) {
            dst[..D].copy_from_slice(&src.0);
        }
        b
    }

    fn from_block(b: &Block<T>) -> Self {
        Self::from_rows(core::array::from_fn(|i| core::array::from_fn(|j| b[i][j])))
    }

    fn nan() -> Self {
        Self { rows: [Vector::splat(T::NAN); D] }
    }

    // ─── Determinant ───

    pub fn determinant(&self) -> T {
        match D {
            1 => self.rows[0][0],
            2 => {
                let m = self.block();
                m[0][0] * m[1][1] - m[0][1] * m[1][0]
            }
            3 => det3(&self.block()),
            4 => adjugate4(&self.block()).1,
            _ => lu_determinant(self.to_rows()),
        }
    }

    /// `true` when the determinant is zero, NaN, or small relative to
    /// [`row_volume`](Self::row_volume). Scaling a row or adding a
    /// translation leaves the answer unchanged.
    pub fn is_singular(&self) -> bool {
        singular_by(self.determinant(), self.row_volume())
    }

    // ─── Inverse ───

    /// Inverse, or all NaN when the matrix is singular.
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|_| Self::nan())
    }

    pub fn try_inverse(&self) -> AlgebraResult<Self> {
        let volume = self.row_volume();
        if D > 4 {
            return gauss_jordan(self.to_rows(), volume).map(Self::from_rows);
        }
        let m = self.block();
        let (adj, det) = match D {
            1 => ([[T::ONE, T::ZERO, T::ZERO, T::ZERO]; 4], m[0][0]),
            2 => {
                let mut adj = [[T::ZERO; 4]; 4];
                adj[0][0] = m[1][1];
                adj[0][1] = -m[0][1];
                adj[1][0] = -m[1][0];
                adj[1][1] = m[0][0];
                (adj, m[0][0] * m[1][1] - m[0][1] * m[1][0])
            }
            3 => (adjugate3(&m), det3(&m)),
            _ => adjugate4(&m),
        };
        if singular_by(det, volume) {
            log::debug!("{D}x{D} matrix rejected as singular: det = {det:?}, row volume = {volume:?}");
            return Err(AlgebraError::SingularMatrix { determinant: det.to_f64() });
        }
        Ok(Self::from_block(&adj) / det)
    }
}

/// `|det| / volume` lies in `[0, 1]`; a zero row gives `0 / 0` and counts
/// as singular.
fn singular_by<T: Float>(det: T, volume: T) -> bool {
    let noise = T::EPSILON * T::from_f64(SINGULARITY_ULPS);
    let eps = T::from_f64(SINGULARITY_EPSILON);
    let eps = if noise > eps { noise } else { eps };
    let ratio = det / volume;
    ratio.is_nan() || ratio.abs() <= eps
}

fn det3<T: Float>(m: &Block<T>) -> T {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Transposed cofactor matrix of the top-left 3x3 block.
fn adjugate3<T: Float>(m: &Block<T>) -> Block<T> {
    let mut a = [[T::ZERO; 4]; 4];
    a[0][0] = m[1][1] * m[2][2] - m[1][2] * m[2][1];
    a[0][1] = m[0][2] * m[2][1] - m[0][1] * m[2][2];
    a[0][2] = m[0][1] * m[1][2] - m[0][2] * m[1][1];
    a[1][0] = m[1][2] * m[2][0] - m[1][0] * m[2][2];
    a[1][1] = m[0][0] * m[2][2] - m[0][2] * m[2][0];
    a[1][2] = m[0][2] * m[1][0] - m[0][0] * m[1][2];
    a[2][0] = m[1][0] * m[2][1] - m[1][1] * m[2][0];
    a[2][1] = m[0][1] * m[2][0] - m[0][0] * m[2][1];
    a[2][2] = m[0][0] * m[1][1] - m[0][1] * m[1][0];
    a
}

/// Adjugate and determinant of a 4x4 block by cofactor expansion over
/// 2x2 minors of the top and bottom row pairs.
fn adjugate4<T: Float>(m: &Block<T>) -> (Block<T>, T) {
    let s0 = m[0][0] * m[1][1] - m[1][0] * m[0][1];
    let s1 = m[0][0] * m[1][2] - m[1][0] * m[0][2];
    let s2 = m[0][0] * m[1][3] - m[1][0] * m[0][3];
    let s3 = m[0][1] * m[1][2] - m[1][1] * m[0][2];
    let s4 = m[0][1] * m[1][3] - m[1][1] * m[0][3];
    let s5 = m[0][2] * m[1][3] - m[1][2] * m[0][3];

    let c5 = m[2][2] * m[3][3] - m[3][2] * m[2][3];
    let c4 = m[2][1] * m[3][3] - m[3][1] * m[2][3];
    let c3 = m[2][1] * m[3][2] - m[3][1] * m[2][2];
    let c2 = m[2][0] * m[3][3] - m[3][0] * m[2][3];
    let c1 = m[2][0] * m[3][2] - m[3][0] * m[2][2];
    let c0 = m[2][0] * m[3][1] - m[3][0] * m[2][1];

    let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;

    let a = [
        [
            m[1][1] * c5 - m[1][2] * c4 + m[1][3] * c3,
            -m[0][1] * c5 + m[0][2] * c4 - m[0][3] * c3,
            m[3][1] * s5 - m[3][2] * s4 + m[3][3] * s3,
            -m[2][1] * s5 + m[2][2] * s4 - m[2][3] * s3,
        ],
        [
            -m[1][0] * c5 + m[1][2] * c2 - m[1][3] * c1,
            m[0][0] * c5 - m[0][2] * c2 + m[0][3] * c1,
            -m[3][0] * s5 + m[3][2] * s2 - m[3][3] * s1,
            m[2][0] * s5 - m[2][2] * s2 + m[2][3] * s1,
        ],
        [
            m[1][0] * c4 - m[1][1] * c2 + m[1][3] * c0,
            -m[0][0] * c4 + m[0][1] * c2 - m[0][3] * c0,
            m[3][0] * s4 - m[3][1] * s2 + m[3][3] * s0,
            -m[2][0] * s4 + m[2][1] * s2 - m[2][3] * s0,
        ],
        [
            -m[1][0] * c3 + m[1][1] * c1 - m[1][2] * c0,
            m[0][0] * c3 - m[0][1] * c1 + m[0][2] * c0,
            -m[3][0] * s3 + m[3][1] * s1 - m[3][2] * s0,
            m[2][0] * s3 - m[2][1] * s1 + m[2][2] * s0,
        ],
    ];
    (a, det)
}

/// Index of the row at or below `k` with the largest `|a[i][k]|`.
fn pivot_row<T: Float, const D: usize>(a: &[[T; D]; D], k: usize) -> usize {
    let mut best = k;
    for i in k + 1..D {
        if a[i][k].abs() > a[best][k].abs() {
            best = i;
        }
    }
    best
}

fn lu_determinant<T: Float, const D: usize>(mut a: [[T; D]; D]) -> T {
    let mut det = T::ONE;
    for k in 0..D {
        let p = pivot_row(&a, k);
        if a[p][k] == T::ZERO {
            return T::ZERO;
        }
        if p != k {
            a.swap(p, k);
            det = -det;
        }
        det = det * a[k][k];
        for i in k + 1..D {
            let f = a[i][k] / a[k][k];
            for j in k..D {
                a[i][j] = a[i][j] - f * a[k][j];
            }
        }
    }
    det
}

fn gauss_jordan<T: Float, const D: usize>(mut a: [[T; D]; D], volume: T) -> AlgebraResult<[[T; D]; D]> {
    let mut inv = [[T::ZERO; D]; D];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = T::ONE;
    }
    let mut det = T::ONE;
    for k in 0..D {
        let p = pivot_row(&a, k);
        if p != k {
            a.swap(p, k);
            inv.swap(p, k);
            det = -det;
        }
        det = det * a[k][k];
        if a[k][k] == T::ZERO || a[k][k].is_nan() {
            break;
        }
        let pivot = T::ONE / a[k][k];
        for j in 0..D {
            a[k][j] = a[k][j] * pivot;
            inv[k][j] = inv[k][j] * pivot;
        }
        for i in 0..D {
            if i == k {
                continue;
            }
            let f = a[i][k];
            for j in 0..D {
                a[i][j] = a[i][j] - f * a[k][j];
                inv[i][j] = inv[i][j] - f * inv[k][j];
            }
        }
    }
    if singular_by(det, volume) {
        log::debug!("{D}x{D} matrix rejected as singular: det = {det:?}, row volume = {volume:?}");
        return Err(AlgebraError::SingularMatrix { determinant: det.to_f64() });
    }
    Ok(inv)
}

impl<T: Float, const D: usize> Default for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    fn default() -> Self {
        Self::identity()
    }
}

impl<T, const D: usize> Index<usize> for SquareMatrix<T, D> {
    type Output = Vector<T, D>;

    #[inline]
    fn index(&self, i: usize) -> &Vector<T, D> {
        &self.rows[i]
    }
}

impl<T, const D: usize> IndexMut<usize> for SquareMatrix<T, D> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Vector<T, D> {
        &mut self.rows[i]
    }
}

impl<T, const D: usize> Index<(usize, usize)> for SquareMatrix<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.rows[i][j]
    }
}

impl<T, const D: usize> IndexMut<(usize, usize)> for SquareMatrix<T, D> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.rows[i][j]
    }
}

// ─── Operators ───

impl<T: Float, const D: usize> Add for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { rows: core::array::from_fn(|i| self.rows[i] + rhs.rows[i]) }
    }
}

impl<T: Float, const D: usize> Sub for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { rows: core::array::from_fn(|i| self.rows[i] - rhs.rows[i]) }
    }
}

impl<T: Float, const D: usize> Neg for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    type Output = Self;

    fn neg(self) -> Self {
        Self { rows: self.rows.map(|r| -r) }
    }
}

impl<T: Float, const D: usize> Mul<T> for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self { rows: self.rows.map(|r| r * rhs) }
    }
}

impl<T: Float, const D: usize> Div<T> for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self { rows: self.rows.map(|r| r / rhs) }
    }
}

impl<T: Float, const D: usize> Mul<Vector<T, D>> for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    type Output = Vector<T, D>;

    fn mul(self, v: Vector<T, D>) -> Vector<T, D> {
        Vector::new(core::array::from_fn(|i| self.rows[i].dot(v)))
    }
}

impl<T: Float, const D: usize> Mul for SquareMatrix<T, D>
where
    Lanes<D>: LaneWidth<T>,
{
    type Output = Self;

    /// Row `i` of the product is `sum_k self[i][k] * rhs.row(k)`.
    fn mul(self, rhs: Self) -> Self {
        let rows = core::array::from_fn(|i| {
            let mut acc = Traits::<T, D>::zero();
            for k in 0..D {
                let a = Traits::<T, D>::fill(self.rows[i][k]);
                acc = Traits::<T, D>::fm_add(a, rhs.rows[k].load(), acc);
            }
            Vector::from_register(acc)
        });
        Self { rows }
    }
}

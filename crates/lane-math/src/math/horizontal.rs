// SPDX-License-Identifier: LGPL-3.0-or-later

//! Horizontal (reduction) operations on buffers.
//!
//! Accumulation runs in full registers and collapses with one horizontal
//! reduction at the end, so sums associate differently from a sequential
//! loop. The tail register is padded with the reduction's identity.

macro_rules! horizontal_kernels {
    ($module:ident, $float:ty, $lanes:literal) => {
        #[doc = concat!("Reductions over `", stringify!($float), "` buffers.")]
        pub mod $module {
            use multiversion::multiversion;

            use crate::lanes::{SimdOf, Traits};

            type T = Traits<$float, $lanes>;
            type Reg = SimdOf<$float, $lanes>;
            const LANES: usize = $lanes;

            /// Fold `src` register by register; the tail is padded with `pad`.
            #[inline(always)]
            fn fold(src: &[$float], pad: $float, init: Reg, op: impl Fn(Reg, Reg) -> Reg) -> Reg {
                let mut acc = init;
                let mut chunks = src.chunks_exact(LANES);
                for chunk in &mut chunks {
                    acc = op(T::load(chunk), acc);
                }
                let rest = chunks.remainder();
                if !rest.is_empty() {
                    let mut x = [pad; LANES];
                    x[..rest.len()].copy_from_slice(rest);
                    acc = op(T::load(&x), acc);
                }
                acc
            }

            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn sum(src: &[$float]) -> $float {
                T::first(T::h_sum(fold(src, 0.0, T::zero(), T::add)))
            }

            /// Product of all elements; `1` for an empty buffer.
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn product(src: &[$float]) -> $float {
                T::first(T::h_prod(fold(src, 1.0, T::fill(1.0), T::mul)))
            }

            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn sqr_sum(src: &[$float]) -> $float {
                T::first(T::h_sum(fold(src, 0.0, T::zero(), |x, acc| T::fm_add(x, x, acc))))
            }

            /// Sum of `a[i] * b[i]` over the shorter length.
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn dot(a: &[$float], b: &[$float]) -> $float {
                let len = a.len().min(b.len());
                let (a, b) = (&a[..len], &b[..len]);
                let mut acc = T::zero();
                let mut ca = a.chunks_exact(LANES);
                let mut cb = b.chunks_exact(LANES);
                for (x, y) in (&mut ca).zip(&mut cb) {
                    acc = T::fm_add(T::load(x), T::load(y), acc);
                }
                let (ra, rb) = (ca.remainder(), cb.remainder());
                if !ra.is_empty() {
                    let mut x = [0.0; LANES];
                    let mut y = [0.0; LANES];
                    x[..ra.len()].copy_from_slice(ra);
                    y[..rb.len()].copy_from_slice(rb);
                    acc = T::fm_add(T::load(&x), T::load(&y), acc);
                }
                T::first(T::h_sum(acc))
            }

            /// Smallest element, ignoring NaN; `+inf` for an empty buffer.
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn min(src: &[$float]) -> $float {
                let init = T::fill(<$float>::INFINITY);
                T::first(T::horizontal_min(fold(src, <$float>::INFINITY, init, T::min)))
            }

            /// Largest element, ignoring NaN; `-inf` for an empty buffer.
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn max(src: &[$float]) -> $float {
                let init = T::fill(<$float>::NEG_INFINITY);
                T::first(T::horizontal_max(fold(src, <$float>::NEG_INFINITY, init, T::max)))
            }

            pub fn min_max(src: &[$float]) -> ($float, $float) {
                (min(src), max(src))
            }

            /// Arithmetic mean; `0` for an empty buffer.
            pub fn mean(src: &[$float]) -> $float {
                if src.is_empty() {
                    return 0.0;
                }
                sum(src) / src.len() as $float
            }

            /// Root mean square; `0` for an empty buffer.
            pub fn rms(src: &[$float]) -> $float {
                if src.is_empty() {
                    return 0.0;
                }
                (sqr_sum(src) / src.len() as $float).sqrt()
            }

            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn has_nan(src: &[$float]) -> bool {
                let mut chunks = src.chunks_exact(LANES);
                for chunk in &mut chunks {
                    if T::has_nan(T::load(chunk)) {
                        return true;
                    }
                }
                chunks.remainder().iter().any(|x| x.is_nan())
            }
        }
    };
}

horizontal_kernels!(single, f32, 8);
horizontal_kernels!(double, f64, 4);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_sum_and_mean() {
        let v: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(double::sum(&v), 55.0);
        assert_eq!(double::mean(&v), 5.5);
        assert_eq!(double::sum(&[]), 0.0);
        assert_eq!(single::sum(&[7.0, 3.0, 1.0]), 11.0);
    }

    #[test]
    fn test_product_pads_with_one() {
        assert_eq!(double::product(&[2.0, 3.0, 4.0]), 24.0);
        assert_eq!(single::product(&[1.5; 9]), 1.5f32.powi(9));
        assert_eq!(single::product(&[]), 1.0);
    }

    #[test]
    fn test_min_max_ignore_nan() {
        let v = [3.0f32, f32::NAN, -2.0, 8.0, 1.0, 0.5, f32::NAN, 4.0, -1.0, 9.5];
        assert_eq!(single::min(&v), -2.0);
        assert_eq!(single::max(&v), 9.5);
        assert_eq!(single::min_max(&[]), (f32::INFINITY, f32::NEG_INFINITY));
    }

    #[test]
    fn test_dot_and_rms() {
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0f64, 4.0, 3.0, 2.0, 1.0, 100.0];
        assert_eq!(double::dot(&a, &b), 35.0);
        assert_eq!(double::sqr_sum(&a), 55.0);
        assert_approx_eq!(f64, double::rms(&a), 11.0f64.sqrt(), ulps = 1);
        assert_eq!(single::rms(&[]), 0.0);
    }

    #[test]
    fn test_has_nan() {
        let mut v = vec![1.0f32; 17];
        assert!(!single::has_nan(&v));
        v[16] = f32::NAN;
        assert!(single::has_nan(&v));
        v[16] = 0.0;
        v[3] = f32::NAN;
        assert!(single::has_nan(&v));
    }
}

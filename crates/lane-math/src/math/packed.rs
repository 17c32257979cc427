// SPDX-License-Identifier: LGPL-3.0-or-later

//! Packed (buffer-to-buffer) operations.
//!
//! Buffers stream through `Traits<f32, 8>` and `Traits<f64, 4>` one
//! register at a time; a short tail goes through a zero-padded register.
//! Each entry point is compiled for several instruction sets and the best
//! one is picked at runtime.
//!
//! The processed length is the shortest of the slices passed in; elements
//! of `dst` beyond it are left untouched.

macro_rules! packed_kernels {
    ($module:ident, $float:ty, $lanes:literal) => {
        #[doc = concat!("Kernels over `", stringify!($float), "` buffers.")]
        pub mod $module {
            use multiversion::multiversion;

            use crate::lanes::{SimdOf, Traits};

            type T = Traits<$float, $lanes>;
            type Reg = SimdOf<$float, $lanes>;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn unary(dst: &mut [$float], src: &[$float], op: impl Fn(Reg) -> Reg) {
                let len = dst.len().min(src.len());
                let (dst, src) = (&mut dst[..len], &src[..len]);
                let mut d = dst.chunks_exact_mut(LANES);
                let mut s = src.chunks_exact(LANES);
                for (d, s) in (&mut d).zip(&mut s) {
                    T::store(d, op(T::load(s)));
                }
                let (d, s) = (d.into_remainder(), s.remainder());
                if !s.is_empty() {
                    let mut x = [0.0; LANES];
                    x[..s.len()].copy_from_slice(s);
                    let mut out = [0.0; LANES];
                    T::store(&mut out, op(T::load(&x)));
                    d.copy_from_slice(&out[..d.len()]);
                }
            }

            #[inline(always)]
            fn binary(dst: &mut [$float], a: &[$float], b: &[$float], op: impl Fn(Reg, Reg) -> Reg) {
                let len = dst.len().min(a.len()).min(b.len());
                let (dst, a, b) = (&mut dst[..len], &a[..len], &b[..len]);
                let mut d = dst.chunks_exact_mut(LANES);
                let mut ca = a.chunks_exact(LANES);
                let mut cb = b.chunks_exact(LANES);
                for ((d, x), y) in (&mut d).zip(&mut ca).zip(&mut cb) {
                    T::store(d, op(T::load(x), T::load(y)));
                }
                let (d, ra, rb) = (d.into_remainder(), ca.remainder(), cb.remainder());
                if !d.is_empty() {
                    let mut x = [0.0; LANES];
                    let mut y = [0.0; LANES];
                    x[..ra.len()].copy_from_slice(ra);
                    y[..rb.len()].copy_from_slice(rb);
                    let mut out = [0.0; LANES];
                    T::store(&mut out, op(T::load(&x), T::load(&y)));
                    d.copy_from_slice(&out[..d.len()]);
                }
            }

            /// `dst[i] = a[i] + b[i]`
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn add(dst: &mut [$float], a: &[$float], b: &[$float]) {
                binary(dst, a, b, T::add);
            }

            /// `dst[i] = a[i] - b[i]`
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn sub(dst: &mut [$float], a: &[$float], b: &[$float]) {
                binary(dst, a, b, T::sub);
            }

            /// `dst[i] = a[i] * b[i]`
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn mul(dst: &mut [$float], a: &[$float], b: &[$float]) {
                binary(dst, a, b, T::mul);
            }

            /// `dst[i] = a[i] / b[i]`, IEEE-754 division (`x / 0` is ±inf or NaN).
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn div(dst: &mut [$float], a: &[$float], b: &[$float]) {
                binary(dst, a, b, T::div);
            }

            /// Lane minimum with the register NaN rule: a NaN in either
            /// operand yields `b[i]`.
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn min(dst: &mut [$float], a: &[$float], b: &[$float]) {
                binary(dst, a, b, T::min);
            }

            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn max(dst: &mut [$float], a: &[$float], b: &[$float]) {
                binary(dst, a, b, T::max);
            }

            /// `dst[i] = a[i] * b[i] + c`, fused.
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn scale_add(dst: &mut [$float], a: &[$float], b: &[$float], c: $float) {
                let c = T::fill(c);
                binary(dst, a, b, |x, y| T::fm_add(x, y, c));
            }

            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn clamp(dst: &mut [$float], src: &[$float], lo: $float, hi: $float) {
                let (lo, hi) = (T::fill(lo), T::fill(hi));
                unary(dst, src, |x| T::clamp(x, lo, hi));
            }

            /// `dst[i] = lerp(a[i], b[i], t)`
            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn lerp(dst: &mut [$float], a: &[$float], b: &[$float], t: $float) {
                let t = T::fill(t);
                binary(dst, a, b, |x, y| T::lerp(x, y, t));
            }

            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn abs(dst: &mut [$float], src: &[$float]) {
                unary(dst, src, T::abs);
            }

            #[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
            pub fn sqrt(dst: &mut [$float], src: &[$float]) {
                unary(dst, src, T::sqrt);
            }

            pub fn sin(dst: &mut [$float], src: &[$float]) {
                unary(dst, src, T::sin);
            }

            pub fn cos(dst: &mut [$float], src: &[$float]) {
                unary(dst, src, T::cos);
            }

            pub fn exp(dst: &mut [$float], src: &[$float]) {
                unary(dst, src, T::exp);
            }

            pub fn log(dst: &mut [$float], src: &[$float]) {
                unary(dst, src, T::log);
            }
        }
    };
}

packed_kernels!(single, f32, 8);
packed_kernels!(double, f64, 4);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_add_with_tail() {
        let a: Vec<f32> = (0..11).map(|i| i as f32).collect();
        let b = vec![0.5f32; 11];
        let mut dst = vec![0.0f32; 11];
        single::add(&mut dst, &a, &b);
        for (i, &d) in dst.iter().enumerate() {
            assert_eq!(d, i as f32 + 0.5);
        }
    }

    #[test]
    fn test_shortest_slice_wins() {
        let a = [1.0f64; 6];
        let b = [2.0f64; 5];
        let mut dst = [9.0f64; 7];
        double::mul(&mut dst, &a, &b);
        assert_eq!(dst, [2.0, 2.0, 2.0, 2.0, 2.0, 9.0, 9.0]);
    }

    #[test]
    fn test_div_is_ieee() {
        let mut dst = [0.0f32; 3];
        single::div(&mut dst, &[1.0, -1.0, 0.0], &[0.0, 0.0, 0.0]);
        assert_eq!(dst[0], f32::INFINITY);
        assert_eq!(dst[1], f32::NEG_INFINITY);
        assert!(dst[2].is_nan());
    }

    #[test]
    fn test_scale_add_and_clamp() {
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0];
        let mut dst = [0.0f64; 5];
        double::scale_add(&mut dst, &a, &a, -1.0);
        assert_eq!(dst, [0.0, 3.0, 8.0, 15.0, 24.0]);
        let mut c = [0.0f64; 5];
        double::clamp(&mut c, &dst, 1.0, 10.0);
        assert_eq!(c, [1.0, 3.0, 8.0, 10.0, 10.0]);
    }

    #[test]
    fn test_transcendental_kernels() {
        let src: Vec<f64> = (0..9).map(|i| i as f64 * 0.25).collect();
        let mut s = vec![0.0f64; 9];
        let mut c = vec![0.0f64; 9];
        double::sin(&mut s, &src);
        double::cos(&mut c, &src);
        for ((&x, &sv), &cv) in src.iter().zip(&s).zip(&c) {
            assert_approx_eq!(f64, sv, x.sin(), ulps = 2);
            assert_approx_eq!(f64, sv * sv + cv * cv, 1.0, epsilon = 1e-15);
        }
        let mut e = vec![0.0f32; 9];
        let mut l = vec![0.0f32; 9];
        let src: Vec<f32> = (1..10).map(|i| i as f32).collect();
        single::log(&mut l, &src);
        single::exp(&mut e, &l);
        for (&x, &y) in src.iter().zip(&e) {
            assert_approx_eq!(f32, x, y, ulps = 4);
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = [1.0f32, -3.0, 7.0];
        let b = [2.0f32, 5.0, -7.0];
        let mut dst = [0.0f32; 3];
        single::lerp(&mut dst, &a, &b, 1.0);
        assert_eq!(dst, b);
        single::lerp(&mut dst, &a, &b, 0.0);
        assert_eq!(dst, a);
    }
}

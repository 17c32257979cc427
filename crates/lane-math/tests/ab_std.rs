// SPDX-License-Identifier: LGPL-3.0-or-later
//
// A/B parity tests: compare the portable implementations against `std` on
// seeded random streams. Tolerances come from `lane_math::libm::tolerance`.

use lane_math::Float;
use lane_math::libm::{self, tolerance};
use lane_math::math::scalar::{double, single};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const SAMPLES: usize = 4096;

fn uniform(seed: u64, lo: f64, hi: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..SAMPLES).map(|_| rng.random_range(lo..hi)).collect()
}

/// Arbitrary bit patterns: every class of value shows up, NaN included.
fn raw_bits_f64(seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..SAMPLES).map(|_| f64::from_bits(rng.random())).collect()
}

fn raw_bits_f32(seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..SAMPLES).map(|_| f32::from_bits(rng.random())).collect()
}

fn check_unary(name: &str, xs: &[f64], ours: fn(f64) -> f64, reference: fn(f64) -> f64, bound: f64) {
    for &x in xs {
        let (a, e) = (ours(x), reference(x));
        assert!(
            tolerance::within(a, e, bound),
            "{name}({x:e}) = {a:e}, std gives {e:e}"
        );
    }
}

// ─── Bit-exact primitives ──────────────────────────────────────────────

#[test]
fn ab_classification_f64() {
    for x in raw_bits_f64(1) {
        assert_eq!(double::is_nan(x), x.is_nan());
        assert_eq!(double::is_inf(x), x.is_infinite());
        assert_eq!(double::is_finite(x), x.is_finite());
        assert_eq!(double::sign_bit(x), x.is_sign_negative());
    }
}

#[test]
fn ab_rounding_bit_exact() {
    for x in raw_bits_f64(2).into_iter().chain(uniform(3, -1e6, 1e6)) {
        if x.is_nan() {
            continue;
        }
        assert_eq!(double::floor(x).to_bits(), x.floor().to_bits(), "floor {x:e}");
        assert_eq!(double::ceil(x).to_bits(), x.ceil().to_bits(), "ceil {x:e}");
        assert_eq!(double::trunc(x).to_bits(), x.trunc().to_bits(), "trunc {x:e}");
        assert_eq!(double::round(x).to_bits(), x.round().to_bits(), "round {x:e}");
    }
    for x in raw_bits_f32(4) {
        if x.is_nan() {
            continue;
        }
        assert_eq!(single::floor(x).to_bits(), x.floor().to_bits(), "floor {x:e}");
        assert_eq!(single::round(x).to_bits(), x.round().to_bits(), "round {x:e}");
    }
}

#[test]
fn ab_sqrt_bit_exact() {
    // NaN results included: quieted payloads and the default NaN for x < 0.
    for x in raw_bits_f64(5) {
        let (a, e) = (double::sqrt(x), x.sqrt());
        assert_eq!(a.to_bits(), e.to_bits(), "sqrt({x:e})");
    }
    for x in raw_bits_f32(6) {
        let (a, e) = (single::sqrt(x), x.sqrt());
        assert_eq!(a.to_bits(), e.to_bits(), "sqrt({x:e})");
    }
}

#[test]
fn ab_cbrt() {
    check_unary("cbrt", &uniform(7, -1e30, 1e30), double::cbrt, f64::cbrt, tolerance::DOUBLE);
    check_unary("cbrt", &uniform(8, -2.0, 2.0), double::cbrt, f64::cbrt, tolerance::DOUBLE);
}

// ─── Transcendentals, double precision ─────────────────────────────────

#[test]
fn ab_trig_near_origin() {
    let xs = uniform(10, -2.0 * std::f64::consts::TAU, 2.0 * std::f64::consts::TAU);
    check_unary("sin", &xs, libm::sin, f64::sin, tolerance::DOUBLE);
    check_unary("cos", &xs, libm::cos, f64::cos, tolerance::DOUBLE);
    check_unary("tan", &xs, libm::tan, f64::tan, tolerance::DOUBLE);
}

#[test]
fn ab_trig_far_from_origin() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let xs: Vec<f64> = (0..SAMPLES)
        .map(|_| {
            let magnitude = 10f64.powf(rng.random_range(1.0..100.0));
            if rng.random() { magnitude } else { -magnitude }
        })
        .collect();
    check_unary("sin", &xs, libm::sin, f64::sin, tolerance::TRIG_FAR);
    check_unary("cos", &xs, libm::cos, f64::cos, tolerance::TRIG_FAR);
    check_unary("tan", &xs, libm::tan, f64::tan, tolerance::TRIG_FAR);
}

#[test]
fn ab_inverse_trig() {
    let unit = uniform(12, -1.0, 1.0);
    check_unary("asin", &unit, libm::asin, f64::asin, tolerance::DOUBLE);
    check_unary("acos", &unit, libm::acos, f64::acos, tolerance::DOUBLE);
    check_unary("atan", &uniform(13, -1e4, 1e4), libm::atan, f64::atan, tolerance::DOUBLE);

    let ys = uniform(14, -10.0, 10.0);
    for (&y, &x) in ys.iter().zip(&uniform(15, -10.0, 10.0)) {
        assert!(tolerance::within(libm::atan2(y, x), y.atan2(x), tolerance::DOUBLE), "atan2({y}, {x})");
    }
}

#[test]
fn ab_exponentials() {
    let xs = uniform(20, -700.0, 700.0);
    check_unary("exp", &xs, libm::exp, f64::exp, tolerance::DOUBLE);
    check_unary("exp2", &uniform(21, -1000.0, 1000.0), libm::exp2, f64::exp2, tolerance::DOUBLE);
    check_unary("exp10", &uniform(22, -300.0, 300.0), libm::exp10, |x| 10f64.powf(x), tolerance::DOUBLE);
    check_unary("expm1", &uniform(23, -5.0, 5.0), libm::expm1, f64::exp_m1, tolerance::DOUBLE);
}

#[test]
fn ab_logarithms() {
    let xs = uniform(30, 1e-300, 1e300);
    check_unary("log", &xs, libm::log, f64::ln, tolerance::DOUBLE);
    check_unary("log2", &xs, libm::log2, f64::log2, tolerance::DOUBLE);
    check_unary("log10", &xs, libm::log10, f64::log10, tolerance::DOUBLE);
    let small = uniform(31, 1e-6, 4.0);
    check_unary("log", &small, libm::log, f64::ln, tolerance::DOUBLE);
    check_unary("log1p", &uniform(32, -0.99, 10.0), libm::log1p, f64::ln_1p, tolerance::DOUBLE);
}

#[test]
fn ab_hyperbolic() {
    let xs = uniform(40, -700.0, 700.0);
    check_unary("sinh", &xs, libm::sinh, f64::sinh, tolerance::DOUBLE);
    check_unary("cosh", &xs, libm::cosh, f64::cosh, tolerance::DOUBLE);
    check_unary("tanh", &uniform(41, -20.0, 20.0), libm::tanh, f64::tanh, tolerance::DOUBLE);
    check_unary("asinh", &uniform(42, -1e6, 1e6), libm::asinh, f64::asinh, tolerance::DOUBLE);
    check_unary("acosh", &uniform(43, 1.0, 1e6), libm::acosh, f64::acosh, tolerance::DOUBLE);
    check_unary("acosh", &uniform(45, -1.0, 1.0), libm::acosh, f64::acosh, tolerance::DOUBLE);
    check_unary("acosh", &uniform(46, -1e8, -1.0), libm::acosh, f64::acosh, tolerance::DOUBLE);
    check_unary("atanh", &uniform(44, -0.999, 0.999), libm::atanh, f64::atanh, tolerance::DOUBLE);
}

#[test]
fn ab_binary_functions() {
    let a = uniform(50, 0.0, 100.0);
    let b = uniform(51, -20.0, 20.0);
    for (&x, &y) in a.iter().zip(&b) {
        assert!(tolerance::within(libm::pow(x, y), x.powf(y), tolerance::DOUBLE), "pow({x}, {y})");
        assert!(tolerance::within(libm::hypot(x, y), x.hypot(y), tolerance::DOUBLE), "hypot({x}, {y})");
        if y != 0.0 {
            assert_eq!(libm::fmod(x, y).to_bits(), (x % y).to_bits(), "fmod({x}, {y})");
        }
    }
}

// ─── Single precision through the Float trait ──────────────────────────

#[test]
fn ab_single_precision() {
    let xs = uniform(60, -10.0, 10.0);
    let cases: [(&str, fn(f32) -> f32, fn(f32) -> f32); 6] = [
        ("sin", <f32 as Float>::sin, f32::sin),
        ("cos", <f32 as Float>::cos, f32::cos),
        ("atan", <f32 as Float>::atan, f32::atan),
        ("exp", <f32 as Float>::exp, f32::exp),
        ("tanh", <f32 as Float>::tanh, f32::tanh),
        ("cbrt", <f32 as Float>::cbrt, f32::cbrt),
    ];
    for (name, ours, reference) in cases {
        for &x in &xs {
            let x = x as f32;
            let (a, e) = (ours(x), reference(x));
            assert!(
                tolerance::within(a as f64, e as f64, tolerance::SINGLE as f64),
                "{name}({x:e}) = {a:e}, std gives {e:e}"
            );
        }
    }
}

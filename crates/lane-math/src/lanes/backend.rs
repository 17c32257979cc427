// SPDX-License-Identifier: LGPL-3.0-or-later

//! Lane-wise evaluation strategies.
//!
//! [`Portable`] runs every physical lane of the register in a fixed-length
//! loop the compiler can turn into vector instructions. [`Scalar`] runs
//! only the logical lanes and copies padding through from the first
//! operand. Both produce the same logical lanes; the `scalar-backend`
//! feature picks which one [`DefaultBackend`] names.

use core::fmt::Debug;

use super::register::Register;

/// Applies a per-lane function across a register.
pub trait Backend: Copy + Debug + Default + Send + Sync + 'static {
    const NAME: &'static str;

    fn map<R, F>(logical: usize, a: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element) -> R::Element;

    fn zip<R, F>(logical: usize, a: R, b: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element, R::Element) -> R::Element;

    fn zip3<R, F>(logical: usize, a: R, b: R, c: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element, R::Element, R::Element) -> R::Element;

    /// Like [`Backend::zip`] with the lane index passed first.
    fn zip_indexed<R, F>(logical: usize, a: R, b: R, f: F) -> R
    where
        R: Register,
        F: Fn(usize, R::Element, R::Element) -> R::Element;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Portable;

#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar;

impl Backend for Portable {
    const NAME: &'static str = "portable";

    #[inline]
    fn map<R, F>(_logical: usize, a: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element) -> R::Element,
    {
        let mut out = a;
        for (o, &x) in out.lanes_mut().iter_mut().zip(a.lanes()) {
            *o = f(x);
        }
        out
    }

    #[inline]
    fn zip<R, F>(_logical: usize, a: R, b: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element, R::Element) -> R::Element,
    {
        let mut out = a;
        for ((o, &x), &y) in out.lanes_mut().iter_mut().zip(a.lanes()).zip(b.lanes()) {
            *o = f(x, y);
        }
        out
    }

    #[inline]
    fn zip3<R, F>(_logical: usize, a: R, b: R, c: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element, R::Element, R::Element) -> R::Element,
    {
        let mut out = a;
        for (((o, &x), &y), &z) in out.lanes_mut().iter_mut().zip(a.lanes()).zip(b.lanes()).zip(c.lanes()) {
            *o = f(x, y, z);
        }
        out
    }

    #[inline]
    fn zip_indexed<R, F>(_logical: usize, a: R, b: R, f: F) -> R
    where
        R: Register,
        F: Fn(usize, R::Element, R::Element) -> R::Element,
    {
        let mut out = a;
        for (i, ((o, &x), &y)) in out.lanes_mut().iter_mut().zip(a.lanes()).zip(b.lanes()).enumerate() {
            *o = f(i, x, y);
        }
        out
    }
}

impl Backend for Scalar {
    const NAME: &'static str = "scalar";

    #[inline]
    fn map<R, F>(logical: usize, a: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element) -> R::Element,
    {
        let mut out = a;
        for i in 0..logical {
            out.lanes_mut()[i] = f(a.lanes()[i]);
        }
        out
    }

    #[inline]
    fn zip<R, F>(logical: usize, a: R, b: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element, R::Element) -> R::Element,
    {
        let mut out = a;
        for i in 0..logical {
            out.lanes_mut()[i] = f(a.lanes()[i], b.lanes()[i]);
        }
        out
    }

    #[inline]
    fn zip3<R, F>(logical: usize, a: R, b: R, c: R, f: F) -> R
    where
        R: Register,
        F: Fn(R::Element, R::Element, R::Element) -> R::Element,
    {
        let mut out = a;
        for i in 0..logical {
            out.lanes_mut()[i] = f(a.lanes()[i], b.lanes()[i], c.lanes()[i]);
        }
        out
    }

    #[inline]
    fn zip_indexed<R, F>(logical: usize, a: R, b: R, f: F) -> R
    where
        R: Register,
        F: Fn(usize, R::Element, R::Element) -> R::Element,
    {
        let mut out = a;
        for i in 0..logical {
            out.lanes_mut()[i] = f(i, a.lanes()[i], b.lanes()[i]);
        }
        out
    }
}

#[cfg(not(feature = "scalar-backend"))]
pub type DefaultBackend = Portable;
#[cfg(feature = "scalar-backend")]
pub type DefaultBackend = Scalar;

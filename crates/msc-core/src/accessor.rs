//! Point accessors
//!
//! The engine never owns or copies input points. It reads them through
//! [`PointAccessor`], which exposes a point as a run of contiguous
//! coordinates. Accessors are resolved statically per point type: a point
//! type without an implementation does not compile.
//!
//! # Custom records
//!
//! Records whose fields are laid out as consecutive scalars can derive
//! `bytemuck::Pod` and forward to [`pod_coords`]:
//!
//! ```rust
//! use msc_core::accessor::{pod_coords, PointAccessor};
//!
//! #[repr(C)]
//! #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
//! struct Point3 {
//!     x: f64,
//!     y: f64,
//!     z: f64,
//! }
//!
//! impl PointAccessor<f64> for Point3 {
//!     fn coords(&self) -> &[f64] {
//!         pod_coords(self)
//!     }
//! }
//!
//! let p = Point3 { x: 1.0, y: 2.0, z: 3.0 };
//! assert_eq!(p.coords(), &[1.0, 2.0, 3.0]);
//! ```

use crate::{Error, Result, Scalar};
use bytemuck::Pod;

/// Read-only coordinate view onto a point representation
pub trait PointAccessor<T: Scalar> {
    /// All coordinates of this point
    fn coords(&self) -> &[T];

    /// The first `dim` coordinates.
    ///
    /// Callers must have checked the point with [`validate_points`]; a point
    /// shorter than `dim` panics here.
    #[inline]
    fn view(&self, dim: usize) -> &[T] {
        &self.coords()[..dim]
    }
}

impl<T: Scalar> PointAccessor<T> for [T] {
    #[inline]
    fn coords(&self) -> &[T] {
        self
    }
}

impl<T: Scalar, const N: usize> PointAccessor<T> for [T; N] {
    #[inline]
    fn coords(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Scalar> PointAccessor<T> for Vec<T> {
    #[inline]
    fn coords(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Scalar, P: PointAccessor<T> + ?Sized> PointAccessor<T> for Box<P> {
    #[inline]
    fn coords(&self) -> &[T] {
        (**self).coords()
    }
}

impl<T: Scalar, P: PointAccessor<T> + ?Sized> PointAccessor<T> for &P {
    #[inline]
    fn coords(&self) -> &[T] {
        (**self).coords()
    }
}

// A bare scalar is a one-dimensional point.
impl PointAccessor<f64> for f64 {
    #[inline]
    fn coords(&self) -> &[f64] {
        std::slice::from_ref(self)
    }
}

impl PointAccessor<f32> for f32 {
    #[inline]
    fn coords(&self) -> &[f32] {
        std::slice::from_ref(self)
    }
}

/// Reinterpret a plain-old-data record as its coordinates.
///
/// Returns an empty view when the record's size or alignment is not
/// compatible with `T`, so that [`validate_points`] rejects it up front.
pub fn pod_coords<P: Pod, T: Scalar>(point: &P) -> &[T] {
    bytemuck::try_cast_slice(std::slice::from_ref(point)).unwrap_or(&[])
}

/// Check `dim` and every point before any work starts
pub fn validate_points<T, P>(points: &[P], dim: usize) -> Result<()>
where
    T: Scalar,
    P: PointAccessor<T>,
{
    if dim == 0 {
        return Err(Error::zero_dimension());
    }
    for (index, point) in points.iter().enumerate() {
        let actual = point.coords().len();
        if actual < dim {
            return Err(Error::DimensionMismatch {
                index,
                expected: dim,
                actual,
            });
        }
    }
    Ok(())
}

//! Axis resolution and shape utilities shared by the search kernels
//!
//! All axis-based kernels accept a possibly-negative axis in the range
//! `[-R, R)` where R is the tensor rank. This module normalizes such an
//! axis to `[0, R)`, computes reduced output shapes, and computes
//! broadcast shapes for elementwise operations.
//!
//! Fiber enumeration itself (every 1-D slice along an axis) is provided
//! by `scirs2_core::ndarray_ext` through `lanes`/`lanes_mut`; the kernels
//! consume it directly after resolving the axis here.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! Direct use of `ndarray` is not permitted.

use crate::error::{KernelError, KernelResult};
use smallvec::SmallVec;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Optimized for tensors with up to 6 dimensions; automatically falls
/// back to heap allocation for higher-rank tensors.
pub type Shape = SmallVec<[usize; 6]>;

/// Normalize a possibly-negative axis against a tensor rank
///
/// Negative axes are resolved as `axis + rank`, matching the usual
/// framework convention (`-1` is the last axis).
///
/// # Arguments
///
/// * `axis` - User-supplied axis in the range `[-rank, rank)`
/// * `rank` - Tensor rank (number of dimensions)
///
/// # Returns
///
/// The normalized axis in `[0, rank)`
///
/// # Errors
///
/// Returns [`KernelError::InvalidAxis`] if the axis falls outside
/// `[0, rank)` after normalization. A rank-0 tensor has no valid axis.
///
/// # Examples
///
/// ```
/// use tenseek_kernels::resolve_axis;
///
/// assert_eq!(resolve_axis(1, 3).unwrap(), 1);
/// assert_eq!(resolve_axis(-1, 3).unwrap(), 2);
/// assert_eq!(resolve_axis(-3, 3).unwrap(), 0);
/// assert!(resolve_axis(3, 3).is_err());
/// assert!(resolve_axis(-4, 3).is_err());
/// assert!(resolve_axis(0, 0).is_err());
/// ```
pub fn resolve_axis(axis: isize, rank: usize) -> KernelResult<usize> {
    let resolved = if axis < 0 {
        axis + rank as isize
    } else {
        axis
    };

    if resolved < 0 || resolved >= rank as isize {
        return Err(KernelError::invalid_axis(
            axis,
            rank,
            format!("axis must be in [-{}, {})", rank, rank),
        ));
    }

    Ok(resolved as usize)
}

/// Compute the output shape of a reduction along one axis
///
/// With `keepdims = false` the reduced axis is removed; with
/// `keepdims = true` it is kept with size 1.
///
/// # Examples
///
/// ```
/// use tenseek_kernels::reduced_shape;
///
/// assert_eq!(&reduced_shape(&[2, 3, 4], 1, false)[..], &[2, 4]);
/// assert_eq!(&reduced_shape(&[2, 3, 4], 1, true)[..], &[2, 1, 4]);
/// assert_eq!(&reduced_shape(&[5], 0, false)[..], &[] as &[usize]);
/// ```
pub fn reduced_shape(shape: &[usize], axis: usize, keepdims: bool) -> Shape {
    let mut out = Shape::new();
    for (i, &dim) in shape.iter().enumerate() {
        if i == axis {
            if keepdims {
                out.push(1);
            }
        } else {
            out.push(dim);
        }
    }
    out
}

/// Compute the broadcast shape of two operand shapes
///
/// Uses the standard right-aligned broadcasting rules: dimensions are
/// compared from the trailing end, and a dimension of size 1 (or a
/// missing dimension) stretches to the other operand's size.
///
/// # Arguments
///
/// * `operation` - Operation name used in error messages
/// * `a` - First operand shape
/// * `b` - Second operand shape
///
/// # Errors
///
/// Returns [`KernelError::IncompatibleShapes`] if any aligned pair of
/// dimensions differs with neither equal to 1.
///
/// # Examples
///
/// ```
/// use tenseek_kernels::broadcast_shape;
///
/// let shape = broadcast_shape("select", &[2, 1, 4], &[3, 1]).unwrap();
/// assert_eq!(&shape[..], &[2, 3, 4]);
///
/// assert!(broadcast_shape("select", &[2, 3], &[4, 3]).is_err());
/// ```
pub fn broadcast_shape(operation: &str, a: &[usize], b: &[usize]) -> KernelResult<Shape> {
    let rank = a.len().max(b.len());
    let mut out = Shape::with_capacity(rank);

    for i in 0..rank {
        let da = if i + a.len() >= rank {
            a[i + a.len() - rank]
        } else {
            1
        };
        let db = if i + b.len() >= rank {
            b[i + b.len() - rank]
        } else {
            1
        };

        let dim = if da == db {
            da
        } else if da == 1 {
            db
        } else if db == 1 {
            da
        } else {
            return Err(KernelError::incompatible_shapes(
                operation,
                a.to_vec(),
                b.to_vec(),
                format!("dimension {} does not broadcast: {} vs {}", i, da, db),
            ));
        };
        out.push(dim);
    }

    Ok(out)
}

//! Indexed maximum (argmax) along an axis
//!
//! For every fiber along the chosen axis, finds the index of the
//! maximum element. Ties are broken by keeping the first occurrence
//! (the lowest index). The result is an integer index tensor and is
//! never differentiable.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! Direct use of `ndarray` is not permitted.

use crate::axis::{reduced_shape, resolve_axis};
use crate::error::{KernelError, KernelResult};
use crate::indexing::IndexElement;
use scirs2_core::ndarray_ext::{Array, ArrayView, Axis, IxDyn};
use std::cmp::Ordering;

/// Options for [`argmax`]
///
/// Defaults: `axis = None` (the last axis), `keepdims = false`.
#[derive(Debug, Clone, Default)]
pub struct ArgMaxOptions {
    /// Axis to reduce, in `[-R, R)`; `None` selects the last axis
    pub axis: Option<isize>,
    /// Keep the reduced axis with size 1 instead of removing it
    pub keepdims: bool,
}

/// Compute the index of the maximum element along an axis
///
/// For every fiber along the resolved axis, scans left to right and
/// tracks the index of the maximum value seen so far. Equal values keep
/// the first occurrence, so the returned index is always the smallest
/// index attaining the maximum.
///
/// Returns int64 indices; use [`argmax_as`] for int32 output.
///
/// # Arguments
///
/// * `input` - Input tensor with rank >= 1
/// * `options` - Axis selection and `keepdims` flag
///
/// # Returns
///
/// An int64 tensor shaped like `input` with the reduced axis removed
/// (`keepdims = false`) or kept with size 1 (`keepdims = true`)
///
/// # Errors
///
/// Returns error if:
/// - The axis is outside `[-R, R)` after normalization ([`KernelError::InvalidAxis`])
/// - The reduced axis has length zero ([`KernelError::EmptyInput`])
///
/// # Complexity
///
/// Time: O(total_elements)
/// Space: O(total_elements / axis_len)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenseek_kernels::{argmax, ArgMaxOptions};
///
/// let x = array![[5.0, 8.0, 9.0, 5.0], [0.0, 0.0, 1.0, 7.0], [6.0, 9.0, 2.0, 4.0]].into_dyn();
///
/// // Default axis is the last one; ties keep the first occurrence.
/// let out = argmax(&x.view(), &ArgMaxOptions::default()).unwrap();
/// assert_eq!(out.shape(), &[3]);
/// assert_eq!(out[[0]], 2);
/// assert_eq!(out[[1]], 3);
/// assert_eq!(out[[2]], 1);
///
/// // keepdims keeps the reduced axis with size 1.
/// let opts = ArgMaxOptions { axis: Some(-1), keepdims: true };
/// let out = argmax(&x.view(), &opts).unwrap();
/// assert_eq!(out.shape(), &[3, 1]);
/// ```
pub fn argmax<T>(input: &ArrayView<T, IxDyn>, options: &ArgMaxOptions) -> KernelResult<Array<i64, IxDyn>>
where
    T: PartialOrd,
{
    argmax_as::<T, i64>(input, options)
}

/// Compute argmax with a caller-selected index element type
///
/// Identical to [`argmax`] but the output index dtype is chosen through
/// the [`IndexElement`] parameter (int32 or int64). A winning index that
/// does not fit the chosen type is an error rather than a silent wrap.
///
/// # Errors
///
/// In addition to the [`argmax`] errors, returns
/// [`KernelError::UnsupportedIndexValue`] if a winning index is not
/// representable in `I` (only possible for int32 output on fibers longer
/// than `i32::MAX`).
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenseek_kernels::{argmax_as, ArgMaxOptions};
///
/// let x = array![[1.0, 9.0, 3.0], [4.0, 2.0, 0.0]].into_dyn();
/// let out = argmax_as::<f64, i32>(&x.view(), &ArgMaxOptions::default()).unwrap();
/// assert_eq!(out[[0]], 1i32);
/// assert_eq!(out[[1]], 0i32);
/// ```
pub fn argmax_as<T, I>(
    input: &ArrayView<T, IxDyn>,
    options: &ArgMaxOptions,
) -> KernelResult<Array<I, IxDyn>>
where
    T: PartialOrd,
    I: IndexElement,
{
    let rank = input.ndim();
    let axis = resolve_axis(options.axis.unwrap_or(-1), rank)?;
    let axis_len = input.shape()[axis];

    if axis_len == 0 {
        return Err(KernelError::empty_input("argmax", "input"));
    }

    let mut flat = Vec::with_capacity(input.len() / axis_len);
    for fiber in input.lanes(Axis(axis)) {
        let mut best = 0usize;
        for (i, value) in fiber.iter().enumerate().skip(1) {
            // Strict greater-than keeps the first occurrence on ties.
            if value.partial_cmp(&fiber[best]) == Some(Ordering::Greater) {
                best = i;
            }
        }
        let index = I::from_index(best)
            .ok_or_else(|| KernelError::unsupported_index_value("argmax", best, I::DTYPE))?;
        flat.push(index);
    }

    let out_shape = reduced_shape(input.shape(), axis, options.keepdims);
    Array::from_shape_vec(IxDyn(&out_shape), flat)
        .map_err(|e| KernelError::operation_error("argmax", e.to_string()))
}

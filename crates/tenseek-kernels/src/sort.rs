//! Axis-wise sort with index tracking
//!
//! Sorts every fiber along an axis and returns both the sorted values
//! and the int64 permutation that produced them. Gathering the input
//! fiber through the permutation reproduces the sorted values exactly.
//!
//! # Stability convention
//!
//! Ascending sort is stable: equal elements keep their original relative
//! order. Descending sort is defined as the stable ascending sort
//! followed by a reversal, so equal elements appear in *reversed*
//! original order. A naive descending comparator would silently break
//! this convention; the reversal form is what this kernel implements
//! and tests.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! Direct use of `ndarray` is not permitted.

use crate::axis::resolve_axis;
use crate::error::KernelResult;
use scirs2_core::ndarray_ext::{Array, ArrayView, Axis, IxDyn, Zip};
use std::cmp::Ordering;

/// Options for [`sort_with_indices`]
///
/// Defaults: `axis = 0`, `descending = false`.
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Axis to sort along, in `[-R, R)`
    pub axis: isize,
    /// Sort in descending order (stable ascending order, reversed)
    pub descending: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            axis: 0,
            descending: false,
        }
    }
}

/// Stable argsort of one fiber; descending is ascending reversed.
fn argsort_fiber<T: PartialOrd>(fiber: &[T], descending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fiber.len()).collect();
    order.sort_by(|&a, &b| fiber[a].partial_cmp(&fiber[b]).unwrap_or(Ordering::Equal));
    if descending {
        order.reverse();
    }
    order
}

/// Sort every fiber along an axis, returning values and permutation
///
/// For each fiber along the resolved axis, produces the values in
/// sorted order together with the int64 permutation that achieves the
/// ordering: `values[i] == input[indices[i]]` within each fiber.
///
/// The sorted-values output is differentiable; pair this kernel with
/// `tenseek_ad::SortVjp` to scatter an upstream gradient back through
/// the permutation. The permutation output is never differentiable.
///
/// # Arguments
///
/// * `input` - Input tensor with rank >= 1
/// * `options` - Axis selection and sort direction
///
/// # Returns
///
/// `(values, indices)`, both shaped like `input`; `indices` has dtype
/// int64 and each fiber is a permutation of `0..len`
///
/// # Errors
///
/// Returns [`crate::KernelError::InvalidAxis`] if the axis is outside
/// `[-R, R)` after normalization.
///
/// # Complexity
///
/// Time: O(total_elements * log(axis_len))
/// Space: O(total_elements)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenseek_kernels::{sort_with_indices, SortOptions};
///
/// let x = array![3.0, 1.0, 2.0].into_dyn();
/// let (values, indices) = sort_with_indices(&x.view(), &SortOptions::default()).unwrap();
///
/// assert_eq!(values[[0]], 1.0);
/// assert_eq!(values[[1]], 2.0);
/// assert_eq!(values[[2]], 3.0);
/// assert_eq!(indices[[0]], 1);
/// assert_eq!(indices[[1]], 2);
/// assert_eq!(indices[[2]], 0);
///
/// // Descending: stable ascending order, reversed.
/// let opts = SortOptions { axis: 0, descending: true };
/// let (values, indices) = sort_with_indices(&x.view(), &opts).unwrap();
/// assert_eq!(values[[0]], 3.0);
/// assert_eq!(indices[[0]], 0);
/// ```
pub fn sort_with_indices<T>(
    input: &ArrayView<T, IxDyn>,
    options: &SortOptions,
) -> KernelResult<(Array<T, IxDyn>, Array<i64, IxDyn>)>
where
    T: Clone + PartialOrd,
{
    let axis = resolve_axis(options.axis, input.ndim())?;

    let mut values = input.to_owned();
    let mut indices = Array::<i64, IxDyn>::zeros(input.raw_dim());

    Zip::from(values.lanes_mut(Axis(axis)))
        .and(indices.lanes_mut(Axis(axis)))
        .for_each(|mut vals, mut idxs| {
            let fiber: Vec<T> = vals.iter().cloned().collect();
            let order = argsort_fiber(&fiber, options.descending);
            for (slot, &src) in order.iter().enumerate() {
                vals[slot] = fiber[src].clone();
                idxs[slot] = src as i64;
            }
        });

    Ok((values, indices))
}

/// Sort fibers in parallel across a Rayon worker pool
///
/// Identical contract to [`sort_with_indices`]. Each fiber is
/// independent, so fibers are distributed over worker threads with no
/// shared mutable state: the sort axis is moved last so every fiber is
/// one contiguous chunk of the working buffer.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use tenseek_kernels::{sort_with_indices, sort_with_indices_parallel, SortOptions};
///
/// let x = Array::from_shape_vec(vec![4, 100], (0..400).map(|i| ((i * 37) % 83) as f64).collect()).unwrap();
/// let opts = SortOptions { axis: 1, descending: false };
///
/// let (serial_vals, serial_idxs) = sort_with_indices(&x.view(), &opts).unwrap();
/// let (par_vals, par_idxs) = sort_with_indices_parallel(&x.view(), &opts).unwrap();
/// assert_eq!(serial_vals, par_vals);
/// assert_eq!(serial_idxs, par_idxs);
/// ```
#[cfg(feature = "parallel")]
pub fn sort_with_indices_parallel<T>(
    input: &ArrayView<T, IxDyn>,
    options: &SortOptions,
) -> KernelResult<(Array<T, IxDyn>, Array<i64, IxDyn>)>
where
    T: Clone + PartialOrd + Send + Sync,
{
    use crate::error::KernelError;
    use scirs2_core::parallel_ops::*;

    let rank = input.ndim();
    let axis = resolve_axis(options.axis, rank)?;
    let axis_len = input.shape()[axis];

    // Move the sort axis last so each fiber is one contiguous chunk.
    let mut perm: Vec<usize> = (0..rank).filter(|&i| i != axis).collect();
    perm.push(axis);

    let permuted = input.clone().permuted_axes(IxDyn(&perm));
    let mut values = permuted.as_standard_layout().into_owned();
    let mut indices = Array::<i64, IxDyn>::zeros(values.raw_dim());

    if axis_len > 0 {
        let descending = options.descending;
        let value_slice = values.as_slice_mut().ok_or_else(|| {
            KernelError::operation_error("sort", "working buffer is not contiguous")
        })?;
        let index_slice = indices.as_slice_mut().ok_or_else(|| {
            KernelError::operation_error("sort", "index buffer is not contiguous")
        })?;

        value_slice
            .par_chunks_mut(axis_len)
            .zip(index_slice.par_chunks_mut(axis_len))
            .for_each(|(vals, idxs)| {
                let fiber = vals.to_vec();
                let order = argsort_fiber(&fiber, descending);
                for (slot, &src) in order.iter().enumerate() {
                    vals[slot] = fiber[src].clone();
                    idxs[slot] = src as i64;
                }
            });
    }

    // Permute back to the original axis order.
    let mut inverse = vec![0usize; rank];
    for (pos, &ax) in perm.iter().enumerate() {
        inverse[ax] = pos;
    }

    Ok((
        values.permuted_axes(IxDyn(&inverse)),
        indices.permuted_axes(IxDyn(&inverse)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_sort_1d_ascending() {
        let x = array![3.0, 1.0, 2.0].into_dyn();

        let (values, indices) = sort_with_indices(&x.view(), &SortOptions::default()).unwrap();
        assert_eq!(values, array![1.0, 2.0, 3.0].into_dyn());
        assert_eq!(indices, array![1i64, 2, 0].into_dyn());
    }

    #[test]
    fn test_sort_stability_on_ties() {
        // Equal values must keep their original relative order.
        let x = array![2.0, 1.0, 2.0, 1.0].into_dyn();

        let (values, indices) = sort_with_indices(&x.view(), &SortOptions::default()).unwrap();
        assert_eq!(values, array![1.0, 1.0, 2.0, 2.0].into_dyn());
        assert_eq!(indices, array![1i64, 3, 0, 2].into_dyn());
    }

    #[test]
    fn test_sort_descending_is_reversed_ascending() {
        let x = array![2.0, 1.0, 2.0, 1.0].into_dyn();

        let opts = SortOptions { axis: 0, descending: true };
        let (values, indices) = sort_with_indices(&x.view(), &opts).unwrap();

        // Stable ascending gives ([1,1,2,2], [1,3,0,2]); reversed:
        assert_eq!(values, array![2.0, 2.0, 1.0, 1.0].into_dyn());
        assert_eq!(indices, array![2i64, 0, 3, 1].into_dyn());
    }

    #[test]
    fn test_sort_2d_along_rows() {
        let x = array![[3.0, 1.0], [2.0, 4.0]].into_dyn();

        let opts = SortOptions { axis: 1, descending: false };
        let (values, indices) = sort_with_indices(&x.view(), &opts).unwrap();
        assert_eq!(values, array![[1.0, 3.0], [2.0, 4.0]].into_dyn());
        assert_eq!(indices, array![[1i64, 0], [0, 1]].into_dyn());
    }

    #[test]
    fn test_sort_2d_along_columns_default_axis() {
        let x = array![[3.0, 1.0], [2.0, 4.0]].into_dyn();

        let (values, indices) = sort_with_indices(&x.view(), &SortOptions::default()).unwrap();
        assert_eq!(values, array![[2.0, 1.0], [3.0, 4.0]].into_dyn());
        assert_eq!(indices, array![[1i64, 0], [0, 1]].into_dyn());
    }

    #[test]
    fn test_sort_3d_last_axis() {
        let x = array![
            [[5.0, 8.0, 9.0, 5.0], [0.0, 0.0, 1.0, 7.0], [6.0, 9.0, 2.0, 4.0]],
            [[5.0, 2.0, 4.0, 2.0], [4.0, 7.0, 7.0, 9.0], [1.0, 7.0, 0.0, 6.0]]
        ]
        .into_dyn();

        let opts = SortOptions { axis: -1, descending: false };
        let (values, indices) = sort_with_indices(&x.view(), &opts).unwrap();

        let expected_values = array![
            [[5.0, 5.0, 8.0, 9.0], [0.0, 0.0, 1.0, 7.0], [2.0, 4.0, 6.0, 9.0]],
            [[2.0, 2.0, 4.0, 5.0], [4.0, 7.0, 7.0, 9.0], [0.0, 1.0, 6.0, 7.0]]
        ]
        .into_dyn();
        let expected_indices = array![
            [[0i64, 3, 1, 2], [0, 1, 2, 3], [2, 3, 0, 1]],
            [[1, 3, 2, 0], [0, 1, 2, 3], [2, 0, 3, 1]]
        ]
        .into_dyn();

        assert_eq!(values, expected_values);
        assert_eq!(indices, expected_indices);
    }

    #[test]
    fn test_sort_permutation_gathers_input() {
        let x = array![[7.0, 3.0, 5.0], [2.0, 9.0, 1.0]].into_dyn();

        let opts = SortOptions { axis: 1, descending: false };
        let (values, indices) = sort_with_indices(&x.view(), &opts).unwrap();

        for row in 0..2 {
            for slot in 0..3 {
                let src = indices[[row, slot]] as usize;
                assert_eq!(values[[row, slot]], x[[row, src]]);
            }
        }
    }

    #[test]
    fn test_sort_integer_values() {
        let x = array![5i32, -2, 5, 0].into_dyn();

        let (values, indices) = sort_with_indices(&x.view(), &SortOptions::default()).unwrap();
        assert_eq!(values, array![-2i32, 0, 5, 5].into_dyn());
        assert_eq!(indices, array![1i64, 3, 0, 2].into_dyn());
    }

    #[test]
    fn test_sort_empty_axis() {
        let x = Array::<f64, _>::zeros(IxDyn(&[3, 0]));

        let opts = SortOptions { axis: 1, descending: false };
        let (values, indices) = sort_with_indices(&x.view(), &opts).unwrap();
        assert_eq!(values.shape(), &[3, 0]);
        assert_eq!(indices.shape(), &[3, 0]);
    }

    #[test]
    fn test_sort_invalid_axis() {
        let x = array![1.0, 2.0].into_dyn();

        let opts = SortOptions { axis: 1, descending: false };
        assert!(sort_with_indices(&x.view(), &opts).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_sort_parallel_matches_serial() {
        let data: Vec<f64> = (0..360).map(|i| ((i * 31 + 7) % 53) as f64).collect();
        let x = Array::from_shape_vec(IxDyn(&[3, 8, 15]), data).unwrap();

        for axis in [0isize, 1, 2, -1] {
            for descending in [false, true] {
                let opts = SortOptions { axis, descending };
                let (serial_vals, serial_idxs) = sort_with_indices(&x.view(), &opts).unwrap();
                let (par_vals, par_idxs) = sort_with_indices_parallel(&x.view(), &opts).unwrap();
                assert_eq!(serial_vals, par_vals);
                assert_eq!(serial_idxs, par_idxs);
            }
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_sort_parallel_empty_axis() {
        let x = Array::<f64, _>::zeros(IxDyn(&[2, 0]));

        let opts = SortOptions { axis: 1, descending: false };
        let (values, indices) = sort_with_indices_parallel(&x.view(), &opts).unwrap();
        assert_eq!(values.shape(), &[2, 0]);
        assert_eq!(indices.shape(), &[2, 0]);
    }
}

//! Row-wise gather-by-index (index_sample)
//!
//! For a 2-D source tensor `x` of shape (N, C) and an index matrix of
//! shape (N, K), gathers one element per (row, index) pair:
//! `out[n][k] = x[n][index[n][k]]`.
//!
//! Every index entry is validated against `[0, C)` before the gather;
//! an out-of-range entry is a hard error, never a silent out-of-bounds
//! read.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! Direct use of `ndarray` is not permitted.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};

/// Element type usable as a tensor index (int32 or int64)
///
/// Implemented for `i32` and `i64` only, mirroring the index dtypes the
/// gather and argmax kernels accept. Conversions are checked: a negative
/// entry or one too large for the platform converts to `None`.
pub trait IndexElement: Copy {
    /// Dtype name used in error messages
    const DTYPE: &'static str;

    /// Convert to a platform index, `None` if negative or unrepresentable
    fn to_index(self) -> Option<usize>;

    /// Convert from a platform index, `None` if unrepresentable
    fn from_index(index: usize) -> Option<Self>;

    /// Widen to i64 for error reporting
    fn as_i64(self) -> i64;
}

impl IndexElement for i32 {
    const DTYPE: &'static str = "int32";

    fn to_index(self) -> Option<usize> {
        usize::try_from(self).ok()
    }

    fn from_index(index: usize) -> Option<Self> {
        i32::try_from(index).ok()
    }

    fn as_i64(self) -> i64 {
        self as i64
    }
}

impl IndexElement for i64 {
    const DTYPE: &'static str = "int64";

    fn to_index(self) -> Option<usize> {
        usize::try_from(self).ok()
    }

    fn from_index(index: usize) -> Option<Self> {
        i64::try_from(index).ok()
    }

    fn as_i64(self) -> i64 {
        self
    }
}

/// Gather one element per (row, index) pair from a 2-D tensor
///
/// For each row `n` in `[0, N)` and each column `k` in `[0, K)`:
/// `out[n][k] = x[n][index[n][k]]`.
///
/// # Arguments
///
/// * `x` - Source tensor with shape (N, C)
/// * `index` - Index matrix with shape (N, K); entries index into `[0, C)`
///
/// # Returns
///
/// A tensor with the same shape as `index`
///
/// # Errors
///
/// Returns error if:
/// - `index` row count differs from `x` row count ([`KernelError::DimensionMismatch`])
/// - Any index entry falls outside `[0, C)` ([`KernelError::IndexOutOfRange`]);
///   all entries are validated before any output is produced
///
/// # Complexity
///
/// Time: O(N * K)
/// Space: O(N * K)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenseek_kernels::index_sample;
///
/// let x = array![[1.0, 2.0, 3.0, 4.0, 5.0], [6.0, 7.0, 8.0, 9.0, 10.0]];
/// let index = array![[0i64, 1, 3], [0, 2, 4]];
///
/// let out = index_sample(&x.view(), &index.view()).unwrap();
/// assert_eq!(out.shape(), &[2, 3]);
/// assert_eq!(out[[0, 0]], 1.0);
/// assert_eq!(out[[0, 2]], 4.0);
/// assert_eq!(out[[1, 1]], 8.0);
/// assert_eq!(out[[1, 2]], 10.0);
/// ```
pub fn index_sample<T, I>(x: &ArrayView2<T>, index: &ArrayView2<I>) -> KernelResult<Array2<T>>
where
    T: Clone,
    I: IndexElement,
{
    let (n, c) = (x.nrows(), x.ncols());
    let k = index.ncols();

    if index.nrows() != n {
        return Err(KernelError::dimension_mismatch(
            "index_sample",
            vec![n, k],
            vec![index.nrows(), k],
            "index row count must match x row count",
        ));
    }

    // Validate every entry before producing any output.
    let mut resolved = Vec::with_capacity(n * k);
    for ((row, col), &entry) in index.indexed_iter() {
        match entry.to_index() {
            Some(j) if j < c => resolved.push(j),
            _ => {
                return Err(KernelError::index_out_of_range(
                    "index_sample",
                    entry.as_i64(),
                    c,
                    row,
                    col,
                ))
            }
        }
    }

    let out = Array2::from_shape_fn((n, k), |(row, col)| x[[row, resolved[row * k + col]]].clone());

    Ok(out)
}

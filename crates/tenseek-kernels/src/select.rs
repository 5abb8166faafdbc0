//! Elementwise conditional select (where)
//!
//! Picks elements from `x` where a boolean condition holds and from `y`
//! where it does not. When all three operands share one shape the kernel
//! is a single masked copy; otherwise the operands are broadcast to a
//! common shape and the result is computed through the arithmetic
//! decomposition `x * mask + y * (1 - mask)`, which produces identical
//! numbers to the direct path when shapes already agree.
//!
//! The condition is `bool` by type and `x`/`y` share one element type,
//! so the dtype constraints of this operation hold at compile time.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! Direct use of `ndarray` is not permitted.

use crate::axis::broadcast_shape;
use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn, Zip};
use scirs2_core::numeric::Num;

/// Select elements from `x` or `y` driven by a boolean condition
///
/// Elementwise, `out[i] = x[i]` where `condition[i]` is true and `y[i]`
/// otherwise. Operands with differing shapes are broadcast to a common
/// shape under the standard right-aligned rules.
///
/// This kernel is differentiable with respect to both `x` and `y`
/// (gradient flows to `x` where the condition is true and to `y` where
/// it is false); pair it with `tenseek_ad::SelectVjp`.
///
/// # Arguments
///
/// * `condition` - Boolean control tensor with rank >= 1
/// * `x` - Values taken where the condition is true
/// * `y` - Values taken where the condition is false
///
/// # Returns
///
/// A tensor with the broadcast shape of the three operands
///
/// # Errors
///
/// Returns [`KernelError::IncompatibleShapes`] if `x` and `y` (or the
/// condition against their broadcast) are not broadcast-compatible.
///
/// # Complexity
///
/// Time: O(output_elements)
/// Space: O(output_elements)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use tenseek_kernels::select;
///
/// // Equal shapes: direct masked copy.
/// let cond = array![false, false, true, true].into_dyn();
/// let x = array![0.9383, 0.1983, 3.2, 1.2].into_dyn();
/// let y = array![1.0, 1.0, 1.0, 1.0].into_dyn();
///
/// let out = select(&cond.view(), &x.view(), &y.view()).unwrap();
/// assert_eq!(out[[0]], 1.0);
/// assert_eq!(out[[1]], 1.0);
/// assert_eq!(out[[2]], 3.2);
/// assert_eq!(out[[3]], 1.2);
///
/// // Differing shapes broadcast: y stretches along axis 0.
/// let cond = array![[true, false, true], [false, true, false]].into_dyn();
/// let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
/// let y = array![[10.0, 20.0, 30.0]].into_dyn();
///
/// let out = select(&cond.view(), &x.view(), &y.view()).unwrap();
/// assert_eq!(out[[0, 1]], 20.0);
/// assert_eq!(out[[1, 0]], 10.0);
/// assert_eq!(out[[1, 1]], 5.0);
/// ```
pub fn select<T>(
    condition: &ArrayView<bool, IxDyn>,
    x: &ArrayView<T, IxDyn>,
    y: &ArrayView<T, IxDyn>,
) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    if condition.shape() == x.shape() && x.shape() == y.shape() {
        // Fast path: one masked copy, no arithmetic.
        let mut out = Array::zeros(x.raw_dim());
        Zip::from(&mut out)
            .and(condition)
            .and(x)
            .and(y)
            .for_each(|o, &c, xv, yv| {
                *o = if c { xv.clone() } else { yv.clone() };
            });
        return Ok(out);
    }

    // Broadcast path: x * mask + y * (1 - mask) over the common shape.
    let xy_shape = broadcast_shape("select", x.shape(), y.shape())?;
    let common = broadcast_shape("select", condition.shape(), &xy_shape)?;

    let cond_b = condition.broadcast(IxDyn(&common)).ok_or_else(|| {
        KernelError::incompatible_shapes(
            "select",
            condition.shape().to_vec(),
            common.to_vec(),
            "condition does not broadcast to the common shape",
        )
    })?;
    let x_b = x.broadcast(IxDyn(&common)).ok_or_else(|| {
        KernelError::incompatible_shapes(
            "select",
            x.shape().to_vec(),
            common.to_vec(),
            "x does not broadcast to the common shape",
        )
    })?;
    let y_b = y.broadcast(IxDyn(&common)).ok_or_else(|| {
        KernelError::incompatible_shapes(
            "select",
            y.shape().to_vec(),
            common.to_vec(),
            "y does not broadcast to the common shape",
        )
    })?;

    let mut out = Array::zeros(IxDyn(&common));
    Zip::from(&mut out)
        .and(&cond_b)
        .and(&x_b)
        .and(&y_b)
        .for_each(|o, &c, xv, yv| {
            let mask = if c { T::one() } else { T::zero() };
            *o = xv.clone() * mask.clone() + yv.clone() * (T::one() - mask);
        });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_select_equal_shapes() {
        let cond = array![false, false, true, true].into_dyn();
        let x = array![0.9383, 0.1983, 3.2, 1.2].into_dyn();
        let y = array![1.0, 1.0, 1.0, 1.0].into_dyn();

        let out = select(&cond.view(), &x.view(), &y.view()).unwrap();
        assert_eq!(out, array![1.0, 1.0, 3.2, 1.2].into_dyn());
    }

    #[test]
    fn test_select_equal_shapes_2d() {
        let cond = array![[true, false], [false, true]].into_dyn();
        let x = array![[1, 2], [3, 4]].into_dyn();
        let y = array![[-1, -2], [-3, -4]].into_dyn();

        let out = select(&cond.view(), &x.view(), &y.view()).unwrap();
        assert_eq!(out, array![[1, -2], [-3, 4]].into_dyn());
    }

    #[test]
    fn test_select_broadcast_y_row() {
        let cond = array![[true, false, true], [false, true, false]].into_dyn();
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
        let y = array![[10.0, 20.0, 30.0]].into_dyn();

        let out = select(&cond.view(), &x.view(), &y.view()).unwrap();
        assert_eq!(out, array![[1.0, 20.0, 3.0], [10.0, 5.0, 30.0]].into_dyn());
    }

    #[test]
    fn test_select_broadcast_condition_column() {
        let cond = array![[true], [false]].into_dyn();
        let x = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        let y = array![[9.0, 9.0], [9.0, 9.0]].into_dyn();

        let out = select(&cond.view(), &x.view(), &y.view()).unwrap();
        assert_eq!(out, array![[1.0, 2.0], [9.0, 9.0]].into_dyn());
    }

    #[test]
    fn test_select_paths_agree_on_equal_shapes() {
        // The broadcast path must match the direct path when shapes
        // happen to already agree; trigger it by expanding y manually.
        let cond = array![[true, false], [false, true]].into_dyn();
        let x = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        let y_row = array![[5.0, 6.0]].into_dyn();
        let y_full = array![[5.0, 6.0], [5.0, 6.0]].into_dyn();

        let direct = select(&cond.view(), &x.view(), &y_full.view()).unwrap();
        let broadcast = select(&cond.view(), &x.view(), &y_row.view()).unwrap();
        assert_eq!(direct, broadcast);
    }

    #[test]
    fn test_select_incompatible_xy() {
        let cond = array![true, false].into_dyn();
        let x = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        let y = array![[1.0, 2.0, 3.0]].into_dyn();

        let err = select(&cond.view(), &x.view(), &y.view()).unwrap_err();
        assert!(matches!(err, KernelError::IncompatibleShapes { .. }));
    }

    #[test]
    fn test_select_incompatible_condition() {
        let cond = array![true, false, true].into_dyn();
        let x = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        let y = array![[5.0, 6.0], [7.0, 8.0]].into_dyn();

        let err = select(&cond.view(), &x.view(), &y.view()).unwrap_err();
        assert!(matches!(err, KernelError::IncompatibleShapes { .. }));
    }

    #[test]
    fn test_select_integer_elements() {
        let cond = array![true, false, true].into_dyn();
        let x = array![1i64, 2, 3].into_dyn();
        let y = array![[10i64, 20, 30], [40, 50, 60]].into_dyn();

        let out = select(&cond.view(), &x.view(), &y.view()).unwrap();
        assert_eq!(out, array![[1i64, 20, 3], [1, 50, 3]].into_dyn());
    }
}

//! Vector-Jacobian Product (VJP) rules for the search/selection kernels
//!
//! This module implements explicit backward rules for the three
//! differentiable kernels: sort, select (where), and index_sample.
//! Each rule is a context struct saving what the forward pass must
//! retain, paired with a [`VjpOp`] implementation.
//!
//! # Overview
//!
//! For a forward operation `y = f(x1, x2, ...)`, the VJP computes:
//! ```text
//! vjp(dy) = (∂L/∂x1, ∂L/∂x2, ...)
//! ```
//! where `dy = ∂L/∂y` is the incoming gradient (cotangent).
//!
//! - **Sort**: the upstream gradient at sorted slot `i` scatters back to
//!   original position `permutation[i]` within each fiber; gradient mass
//!   is conserved per fiber.
//! - **Select**: gradient flows to `x` where the condition is true and
//!   to `y` where it is false; when the forward pass broadcast, each
//!   operand's gradient is sum-reduced back to that operand's shape
//!   (the product-rule view of `x * mask + y * (1 - mask)`).
//! - **Index sample**: the gradient at `[n][k]` scatters back to
//!   `grad_x[n][index[n][k]]`, accumulating when an index repeats.

use anyhow::{anyhow, Result};
use scirs2_core::ndarray_ext::{Array, Array2, ArrayView, Axis, IxDyn, Zip};
use scirs2_core::numeric::Num;
use tenseek_kernels::{broadcast_shape, resolve_axis, IndexElement};

/// Trait for operations that support VJP (backward differentiation)
pub trait VjpOp<T>
where
    T: Num + Clone + std::ops::AddAssign,
{
    /// Compute the VJP (backward pass) given the output gradient
    ///
    /// # Arguments
    ///
    /// * `output_grad` - Gradient w.r.t. the output (∂L/∂output)
    ///
    /// # Returns
    ///
    /// Gradients w.r.t. each differentiable input, in input order
    fn vjp(&self, output_grad: &ArrayView<T, IxDyn>) -> Result<Vec<Array<T, IxDyn>>>;
}

/// Sum a broadcast gradient back down to an operand's shape
///
/// Leading broadcast axes are summed away, then any axis the operand
/// holds with size 1 is summed while keeping the axis.
fn reduce_to_shape<T>(mut grad: Array<T, IxDyn>, target: &[usize]) -> Result<Array<T, IxDyn>>
where
    T: Num + Clone,
{
    while grad.ndim() > target.len() {
        grad = grad.sum_axis(Axis(0));
    }

    for axis in 0..target.len() {
        if target[axis] == 1 && grad.shape()[axis] != 1 {
            let summed = grad.sum_axis(Axis(axis));
            grad = summed.insert_axis(Axis(axis));
        }
    }

    if grad.shape() != target {
        return Err(anyhow!(
            "gradient shape {:?} does not reduce to operand shape {:?}",
            grad.shape(),
            target
        ));
    }

    Ok(grad)
}

/// VJP context for the sort kernel
///
/// Stores the permutation produced by the forward pass together with
/// the resolved sort axis. The backward pass scatters the upstream
/// gradient for each sorted slot back to the original position the
/// permutation names:
///
/// ```text
/// grad_input[fiber][permutation[i]] += grad_output[fiber][i]
/// ```
///
/// The permutation output of the forward pass is itself never
/// differentiable.
pub struct SortVjp {
    /// Permutation produced by the forward sort (int64, input-shaped)
    pub indices: Array<i64, IxDyn>,
    /// Resolved sort axis in `[0, rank)`
    pub axis: usize,
}

impl SortVjp {
    /// Create a sort VJP context from the forward pass outputs
    ///
    /// # Arguments
    ///
    /// * `indices` - Permutation returned by the forward sort
    /// * `axis` - Sort axis as passed to the forward kernel, in `[-R, R)`
    ///
    /// # Errors
    ///
    /// Returns an error if the axis is invalid for the permutation rank.
    pub fn new(indices: Array<i64, IxDyn>, axis: isize) -> Result<Self> {
        let axis = resolve_axis(axis, indices.ndim())?;
        Ok(Self { indices, axis })
    }
}

impl<T> VjpOp<T> for SortVjp
where
    T: Num + Clone + std::ops::AddAssign,
{
    fn vjp(&self, output_grad: &ArrayView<T, IxDyn>) -> Result<Vec<Array<T, IxDyn>>> {
        if output_grad.shape() != self.indices.shape() {
            return Err(anyhow!(
                "Shape mismatch: output_grad {:?} vs sort indices {:?}",
                output_grad.shape(),
                self.indices.shape()
            ));
        }

        let mut grad_input = Array::zeros(self.indices.raw_dim());

        Zip::from(grad_input.lanes_mut(Axis(self.axis)))
            .and(output_grad.lanes(Axis(self.axis)))
            .and(self.indices.lanes(Axis(self.axis)))
            .for_each(|mut grad_fiber, upstream, permutation| {
                for slot in 0..permutation.len() {
                    let src = permutation[slot] as usize;
                    grad_fiber[src] += upstream[slot].clone();
                }
            });

        Ok(vec![grad_input])
    }
}

/// VJP context for the select (where) kernel
///
/// Stores the boolean condition and the shapes of both value operands.
/// The gradient of the output with respect to `x` is the upstream
/// gradient masked by the condition, and with respect to `y` the
/// complement; when the forward pass broadcast an operand, its gradient
/// is sum-reduced back to the operand's shape. This is mathematically
/// the product rule applied to `x * mask + y * (1 - mask)` and equals
/// the direct masked-copy gradient on the equal-shape path.
pub struct SelectVjp {
    /// Condition tensor saved from the forward pass
    pub condition: Array<bool, IxDyn>,
    /// Shape of the `x` operand
    pub x_shape: Vec<usize>,
    /// Shape of the `y` operand
    pub y_shape: Vec<usize>,
}

impl SelectVjp {
    /// Create a select VJP context from the forward pass inputs
    pub fn new(condition: Array<bool, IxDyn>, x_shape: Vec<usize>, y_shape: Vec<usize>) -> Self {
        Self {
            condition,
            x_shape,
            y_shape,
        }
    }
}

impl<T> VjpOp<T> for SelectVjp
where
    T: Num + Clone + std::ops::AddAssign,
{
    fn vjp(&self, output_grad: &ArrayView<T, IxDyn>) -> Result<Vec<Array<T, IxDyn>>> {
        let xy_shape = broadcast_shape("select", &self.x_shape, &self.y_shape)?;
        let common = broadcast_shape("select", self.condition.shape(), &xy_shape)?;

        if output_grad.shape() != &common[..] {
            return Err(anyhow!(
                "Shape mismatch: output_grad {:?} vs forward output {:?}",
                output_grad.shape(),
                &common[..]
            ));
        }

        let condition = self
            .condition
            .broadcast(IxDyn(&common))
            .ok_or_else(|| anyhow!("condition does not broadcast to {:?}", &common[..]))?;

        let mut grad_x_full = Array::zeros(IxDyn(&common));
        let mut grad_y_full = Array::zeros(IxDyn(&common));

        Zip::from(&mut grad_x_full)
            .and(&mut grad_y_full)
            .and(&condition)
            .and(output_grad)
            .for_each(|gx, gy, &c, upstream| {
                if c {
                    *gx = upstream.clone();
                } else {
                    *gy = upstream.clone();
                }
            });

        let grad_x = reduce_to_shape(grad_x_full, &self.x_shape)?;
        let grad_y = reduce_to_shape(grad_y_full, &self.y_shape)?;

        Ok(vec![grad_x, grad_y])
    }
}

/// VJP context for the index_sample kernel
///
/// Stores the index matrix and the source shape (N, C). The backward
/// pass scatter-adds the upstream gradient at `[n][k]` into
/// `grad_x[n][index[n][k]]`; repeated indices within a row accumulate.
/// The index input is never differentiable.
pub struct IndexSampleVjp {
    /// Index matrix saved from the forward pass (widened to int64)
    pub index: Array2<i64>,
    /// Shape (rows, columns) of the source tensor `x`
    pub x_shape: (usize, usize),
}

impl IndexSampleVjp {
    /// Create an index_sample VJP context from the forward pass inputs
    pub fn new<I>(index: &scirs2_core::ndarray_ext::ArrayView2<I>, x_shape: (usize, usize)) -> Self
    where
        I: IndexElement,
    {
        Self {
            index: index.mapv(IndexElement::as_i64),
            x_shape,
        }
    }
}

impl<T> VjpOp<T> for IndexSampleVjp
where
    T: Num + Clone + std::ops::AddAssign,
{
    fn vjp(&self, output_grad: &ArrayView<T, IxDyn>) -> Result<Vec<Array<T, IxDyn>>> {
        let (rows, cols) = self.x_shape;

        if output_grad.shape() != self.index.shape() {
            return Err(anyhow!(
                "Shape mismatch: output_grad {:?} vs index matrix {:?}",
                output_grad.shape(),
                self.index.shape()
            ));
        }
        if self.index.nrows() != rows {
            return Err(anyhow!(
                "Row mismatch: index has {} rows, x has {}",
                self.index.nrows(),
                rows
            ));
        }

        let mut grad_x = Array2::<T>::zeros((rows, cols));
        for ((row, col), &entry) in self.index.indexed_iter() {
            if entry < 0 || entry as usize >= cols {
                return Err(anyhow!(
                    "index {} at ({}, {}) outside [0, {})",
                    entry,
                    row,
                    col,
                    cols
                ));
            }
            grad_x[[row, entry as usize]] += output_grad[[row, col]].clone();
        }

        Ok(vec![grad_x.into_dyn()])
    }
}

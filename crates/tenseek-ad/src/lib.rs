//! # tenseek-ad
//!
//! Backward (gradient) rules for the tenseek search/selection kernels.
//!
//! Only three operations in the kernel crate are differentiable, so
//! this crate models their gradients as explicit paired forward/backward
//! contracts rather than an autodiff tape:
//!
//! - [`SortVjp`] - scatters the upstream gradient back through the sort
//!   permutation
//! - [`SelectVjp`] - masks the upstream gradient by the condition, with
//!   sum-reduction of broadcast gradients back to operand shapes
//! - [`IndexSampleVjp`] - scatter-adds the upstream gradient into the
//!   gathered source positions
//!
//! The argmax kernel and the index outputs of sort/index_sample are
//! never differentiable.
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::array;
//! use tenseek_kernels::{sort_with_indices, SortOptions};
//! use tenseek_ad::{SortVjp, VjpOp};
//!
//! // Forward pass.
//! let x = array![3.0, 1.0, 2.0].into_dyn();
//! let (values, indices) = sort_with_indices(&x.view(), &SortOptions::default()).unwrap();
//! assert_eq!(values[[0]], 1.0);
//!
//! // Backward pass: gradient for sorted slot i lands at indices[i].
//! let vjp_ctx = SortVjp::new(indices, 0).unwrap();
//! let grad_out = array![1.0, 0.0, 0.0].into_dyn();
//! let grads = vjp_ctx.vjp(&grad_out.view()).unwrap();
//! assert_eq!(grads[0], array![0.0, 1.0, 0.0].into_dyn());
//! ```

#![deny(warnings)]

pub mod vjp;

pub use vjp::{IndexSampleVjp, SelectVjp, SortVjp, VjpOp};

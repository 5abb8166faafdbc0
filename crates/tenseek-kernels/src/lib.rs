//! # tenseek-kernels
//!
//! Search and selection kernels for dense N-dimensional tensors.
//!
//! ## Overview
//!
//! This crate provides eager, pure implementations of the four tensor
//! search/selection operations:
//!
//! - **ArgMax** - index of the maximum element along an axis, first
//!   occurrence on ties ([`argmax`], [`argmax_as`])
//! - **Sort** - axis-wise stable sort returning values and an int64
//!   permutation ([`sort_with_indices`])
//! - **Select (where)** - elementwise conditional select with a
//!   broadcasting fallback ([`select`])
//! - **Index sample** - row-wise gather-by-index for 2-D tensors with
//!   mandatory bounds validation ([`index_sample`])
//!
//! plus the shared axis utilities ([`resolve_axis`], [`reduced_shape`],
//! [`broadcast_shape`]).
//!
//! All kernels are pure functions over immutable input views producing
//! freshly allocated outputs; no input is ever mutated and no partial
//! result is returned on error. Backward (gradient) rules for sort,
//! select, and index_sample live in the companion `tenseek-ad` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::array;
//! use tenseek_kernels::{argmax, select, sort_with_indices, ArgMaxOptions, SortOptions};
//!
//! // ArgMax along the last axis, ties keep the first occurrence.
//! let x = array![[5.0, 8.0, 9.0, 5.0], [0.0, 0.0, 1.0, 7.0]].into_dyn();
//! let indices = argmax(&x.view(), &ArgMaxOptions::default()).unwrap();
//! assert_eq!(indices[[0]], 2);
//! assert_eq!(indices[[1]], 3);
//!
//! // Stable sort with index tracking.
//! let x = array![3.0, 1.0, 2.0].into_dyn();
//! let (values, perm) = sort_with_indices(&x.view(), &SortOptions::default()).unwrap();
//! assert_eq!(values[[0]], 1.0);
//! assert_eq!(perm[[0]], 1);
//!
//! // Elementwise select.
//! let cond = array![true, false, true].into_dyn();
//! let a = array![1.0, 2.0, 3.0].into_dyn();
//! let b = array![10.0, 20.0, 30.0].into_dyn();
//! let out = select(&cond.view(), &a.view(), &b.view()).unwrap();
//! assert_eq!(out[[1]], 20.0);
//! ```
//!
//! ## Concurrency
//!
//! Every fiber (argmax, sort) and every element or row (select,
//! index_sample) is independent, so kernels parallelize per fiber with
//! no locking. With the `parallel` feature (default) the sort kernel
//! additionally exposes [`sort_with_indices_parallel`].
//!
//! ## Features
//!
//! - `parallel` (default) - Enable parallel implementations using Rayon
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations and numeric
//! trait bounds. Direct use of `ndarray` or `num-traits` is not
//! permitted.

#![deny(warnings)]

pub mod argmax;
pub mod axis;
pub mod error;
pub mod indexing;
pub mod select;
pub mod sort;


// Re-exports
pub use argmax::{argmax, argmax_as, ArgMaxOptions};
pub use axis::{broadcast_shape, reduced_shape, resolve_axis, Shape};
pub use error::{KernelError, KernelResult};
pub use indexing::{index_sample, IndexElement};
pub use select::select;
#[cfg(feature = "parallel")]
pub use sort::sort_with_indices_parallel;
pub use sort::{sort_with_indices, SortOptions};

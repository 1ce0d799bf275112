// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Re-exports the `approx` assertion macros: transforms and gesture offsets
//! go through easing curves and rectangle arithmetic, so `assert_eq!` on
//! them is brittle.

pub use approx::assert_abs_diff_eq;

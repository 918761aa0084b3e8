// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # diff-engine
//!
//! The model-diff core: comparison algorithms over two [`model_view::ModelView`]s
//! and deterministic rendering of the results as fixed-width tables.
//!
//! Structure:
//! - [`result`] — the [`DiffResult`] data model: tri-state [`Verdict`],
//!   per-model difference lists, grouping of unique layers by type.
//! - [`compare`] — four independent pure comparators: layer-name sets,
//!   parameters, dimensions, weights.
//! - [`aggregate`] — the controller that runs the comparators in fixed
//!   order, derives summary statistics, and drives conditional report
//!   sections.
//! - [`report`] — the writer-backed table renderer, including the greedy
//!   value-alignment heuristic for parameter/dimension tables.
//!
//! Data flows one way: views → comparators → aggregator → reporter. No
//! component holds state across runs; each invocation is a single batch
//! comparison of exactly two models.

pub mod aggregate;
pub mod compare;
pub mod report;
pub mod result;

pub use aggregate::{Comparison, DiffOptions, ModelDiff};
pub use report::Reporter;
pub use result::{DiffResult, LayerDiff, UniqueLayerGroup, Verdict};

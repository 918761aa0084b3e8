// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The read-only model projection consumed by the diff engine.

use crate::{Shape, WeightTensor};

/// Read-only view over a parsed model container.
///
/// The comparators depend only on this trait, never on a concrete loader
/// type. Implementations must guarantee:
///
/// - Layer names are unique within one view.
/// - [`layer_names`](ModelView::layer_names) iterates in a stable,
///   deterministic order across calls (the value-alignment rendering
///   relies on it being reproducible).
///
/// Per-layer accessors return `None` for names not present in the view.
pub trait ModelView {
    /// Layer names in the model's own stable order.
    fn layer_names(&self) -> &[String];

    /// Layer type label for the named layer.
    fn layer_type(&self, name: &str) -> Option<&str>;

    /// Stable per-layer identifier used for display.
    fn layer_id(&self, name: &str) -> Option<u32>;

    /// Ordered configuration parameters as `"key: value"` strings.
    fn parameters(&self, name: &str) -> Option<&[String]>;

    /// Ordered output tensor dimensions.
    fn dimensions(&self, name: &str) -> Option<&[Shape]>;

    /// Weight tensor for the named layer, if it has one.
    fn weights(&self, name: &str) -> Option<&WeightTensor>;

    /// Dimensions of the model's input tensors.
    fn input_dimensions(&self) -> &[Shape];

    /// Total multiply-accumulate count for the whole model.
    fn total_macs(&self) -> u64;

    /// Returns `true` if a layer with this name exists in the view.
    fn contains_layer(&self, name: &str) -> bool {
        self.layer_type(name).is_some()
    }
}

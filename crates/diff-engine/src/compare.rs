// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The four comparators.
//!
//! Each comparator is a pure function over two [`ModelView`]s producing a
//! [`DiffResult`]. Cross-model layer matching is by name equality only —
//! no semantic aliasing, no rename detection.

use crate::result::{DiffResult, LayerDiff, Verdict};
use model_view::ModelView;
use std::collections::HashSet;

/// Builds a [`LayerDiff`] for a layer known to exist in `view`.
fn layer_diff(view: &dyn ModelView, name: &str, values: Vec<String>) -> LayerDiff {
    LayerDiff {
        name: name.to_string(),
        id: view.layer_id(name).unwrap_or(0),
        layer_type: view.layer_type(name).unwrap_or("unknown").to_string(),
        values,
    }
}

/// Layer names present in both views, in the first view's order.
fn shared_layers<'a>(one: &'a dyn ModelView, two: &dyn ModelView) -> Vec<&'a str> {
    one.layer_names()
        .iter()
        .map(String::as_str)
        .filter(|name| two.contains_layer(name))
        .collect()
}

/// Compares the two models' layer-name sets.
///
/// Returns `Equal` with empty groups when the sets are identical (two
/// empty models compare equal). Otherwise `Differ`, with each model's
/// unique layers sorted by name; the reporter groups them by type.
pub fn compare_layer_names(one: &dyn ModelView, two: &dyn ModelView) -> DiffResult {
    let names_one: HashSet<&str> = one.layer_names().iter().map(String::as_str).collect();
    let names_two: HashSet<&str> = two.layer_names().iter().map(String::as_str).collect();

    let mut unique_one: Vec<LayerDiff> = names_one
        .difference(&names_two)
        .map(|name| layer_diff(one, name, Vec::new()))
        .collect();
    let mut unique_two: Vec<LayerDiff> = names_two
        .difference(&names_one)
        .map(|name| layer_diff(two, name, Vec::new()))
        .collect();
    unique_one.sort_by(|a, b| a.name.cmp(&b.name));
    unique_two.sort_by(|a, b| a.name.cmp(&b.name));

    if unique_one.is_empty() && unique_two.is_empty() {
        return DiffResult::equal("Layer names are identical", None);
    }

    tracing::debug!(
        "layer sets differ: {} unique to model one, {} unique to model two",
        unique_one.len(),
        unique_two.len(),
    );

    DiffResult {
        verdict: Verdict::Differ,
        model_one: unique_one,
        model_two: unique_two,
        message: "Layer names differ".to_string(),
        shared_count: None,
    }
}

/// Compares configuration parameters of shared layers.
///
/// Restricted to layers present in both models, in the first model's
/// order. Parameter sequences are compared order-sensitively and
/// element-wise; on any mismatch both layers' full sequences are recorded.
///
/// Verdicts: `NotComparable` when zero layers are shared, `Equal` when no
/// shared layer differs, `Differ` otherwise. The shared-layer count is
/// always returned for summary phrasing.
pub fn compare_parameters(one: &dyn ModelView, two: &dyn ModelView) -> DiffResult {
    let shared = shared_layers(one, two);
    if shared.is_empty() {
        return DiffResult::not_comparable(
            "models have no layers in common; parameters are not comparable",
        );
    }

    let mut diff_one = Vec::new();
    let mut diff_two = Vec::new();
    for name in &shared {
        let params_one = one.parameters(name).unwrap_or(&[]);
        let params_two = two.parameters(name).unwrap_or(&[]);
        if params_one != params_two {
            diff_one.push(layer_diff(one, name, params_one.to_vec()));
            diff_two.push(layer_diff(two, name, params_two.to_vec()));
        }
    }

    if diff_one.is_empty() {
        return DiffResult::equal(
            "Parameters of all common layers are identical",
            Some(shared.len()),
        );
    }

    DiffResult {
        verdict: Verdict::Differ,
        model_one: diff_one,
        model_two: diff_two,
        message: "Parameters of common layers differ".to_string(),
        shared_count: Some(shared.len()),
    }
}

/// Compares tensor dimensions of shared layers.
///
/// Identical contract and verdict rules to [`compare_parameters`], over
/// dimension sequences. Recorded values are the rendered `1x3x224x224`
/// forms.
pub fn compare_dimensions(one: &dyn ModelView, two: &dyn ModelView) -> DiffResult {
    let shared = shared_layers(one, two);
    if shared.is_empty() {
        return DiffResult::not_comparable(
            "models have no layers in common; dimensions are not comparable",
        );
    }

    let mut diff_one = Vec::new();
    let mut diff_two = Vec::new();
    for name in &shared {
        let dims_one = one.dimensions(name).unwrap_or(&[]);
        let dims_two = two.dimensions(name).unwrap_or(&[]);
        if dims_one != dims_two {
            let render = |dims: &[model_view::Shape]| {
                dims.iter().map(ToString::to_string).collect::<Vec<_>>()
            };
            diff_one.push(layer_diff(one, name, render(dims_one)));
            diff_two.push(layer_diff(two, name, render(dims_two)));
        }
    }

    if diff_one.is_empty() {
        return DiffResult::equal(
            "Dimensions of all common layers are identical",
            Some(shared.len()),
        );
    }

    DiffResult {
        verdict: Verdict::Differ,
        model_one: diff_one,
        model_two: diff_two,
        message: "Dimensions of common layers differ".to_string(),
        shared_count: Some(shared.len()),
    }
}

/// Compares weight tensors layer by layer.
///
/// Scans only layers that own a weight tensor in the FIRST model. This
/// one-directional scan reproduces the reference tool's behavior: a layer
/// whose weights exist solely in the second model is not flagged (see
/// DESIGN.md). For each scanned layer, a shape mismatch dominates — weight
/// values are then not compared at all. With matching shapes, any value
/// difference (exact match only) flags the whole layer, as does a tensor
/// present in only one model.
///
/// The aggregator only invokes this when the layer-name sets are equal;
/// with differing architectures the weights category is reported as
/// not comparable instead.
pub fn compare_weights(one: &dyn ModelView, two: &dyn ModelView) -> DiffResult {
    let mut differing = Vec::new();
    let mut scanned = 0usize;

    for name in one.layer_names() {
        let Some(weights_one) = one.weights(name) else {
            continue;
        };
        scanned += 1;

        let differs = match two.weights(name) {
            Some(weights_two) => {
                if !weights_one.same_shape(weights_two) {
                    tracing::debug!(
                        "weight shape mismatch for '{name}': {} vs {}",
                        weights_one.shape(),
                        weights_two.shape(),
                    );
                    true
                } else {
                    !weights_one.exact_eq(weights_two)
                }
            }
            None => {
                tracing::debug!("weights for '{name}' present only in model one");
                true
            }
        };

        if differs {
            differing.push(layer_diff(one, name, Vec::new()));
        }
    }

    if differing.is_empty() {
        return DiffResult::equal(
            "Weights of all common layers are identical",
            Some(scanned),
        );
    }

    DiffResult {
        verdict: Verdict::Differ,
        model_one: differing,
        model_two: Vec::new(),
        message: "Weights of common layers differ".to_string(),
        shared_count: Some(scanned),
    }
}

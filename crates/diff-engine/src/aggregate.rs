// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Comparison orchestration.
//!
//! [`ModelDiff`] runs the four comparators in a fixed order: layer names,
//! parameters, dimensions, then the weights decision. Weight tensors are
//! only compared when the layer-name sets are equal; with differing
//! architectures the weights category is reported as not comparable
//! instead of invoking the comparator.
//!
//! Rendering short-circuits to a single message when every category is
//! equal. Otherwise the summary always prints, detail tables print per
//! caller-requested flag, and a hint line is emitted for each category
//! that differs but whose table was not requested. Hint suppression is
//! tracked with an explicit `reported` flag per category.

use crate::compare::{
    compare_dimensions, compare_layer_names, compare_parameters, compare_weights,
};
use crate::report::Reporter;
use crate::result::{DiffResult, Verdict};
use model_view::ModelView;
use std::io::{self, Write};

/// Message printed when the two models are identical in every category.
const IDENTICAL_MESSAGE: &str = "DLCs are the same";

/// Warning printed when architectures differ and weights cannot be compared.
const WEIGHTS_NOT_COMPARABLE: &str = "architectures differ, weights are not comparable";

/// Caller-requested detail sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Show the table of layers unique to each model.
    pub layers: bool,
    /// Show the parameter diff table.
    pub parameters: bool,
    /// Show the dimension diff table.
    pub dimensions: bool,
    /// Show the weight diff table.
    pub weights: bool,
}

/// One category's result plus whether its detail section has been shown.
#[derive(Debug, Clone)]
pub struct CategoryReport {
    /// The comparator's result.
    pub result: DiffResult,
    /// Set once the detail table (or message) has been rendered; a shown
    /// category never also gets a hint line.
    pub reported: bool,
}

impl From<DiffResult> for CategoryReport {
    fn from(result: DiffResult) -> Self {
        Self {
            result,
            reported: false,
        }
    }
}

/// The aggregated outcome of one comparison run.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Display label for the first model (its container path).
    pub label_one: String,
    /// Display label for the second model.
    pub label_two: String,
    /// Layer counts per model.
    pub layer_count_one: usize,
    pub layer_count_two: usize,
    /// Total MACs per model.
    pub macs_one: u64,
    pub macs_two: u64,
    /// Rendered input dimensions per model.
    pub input_dims_one: String,
    pub input_dims_two: String,
    /// Per-category results in comparison order.
    pub layers: CategoryReport,
    pub parameters: CategoryReport,
    pub dimensions: CategoryReport,
    pub weights: CategoryReport,
}

impl Comparison {
    /// Returns `true` when every category compared equal.
    pub fn identical(&self) -> bool {
        self.layers.result.verdict.is_equal()
            && self.parameters.result.verdict.is_equal()
            && self.dimensions.result.verdict.is_equal()
            && self.weights.result.verdict.is_equal()
    }
}

/// Compares two models and drives report rendering.
pub struct ModelDiff<'a> {
    one: &'a dyn ModelView,
    two: &'a dyn ModelView,
    label_one: String,
    label_two: String,
}

impl<'a> ModelDiff<'a> {
    /// Creates a differ over two model views with display labels
    /// (typically the container paths).
    pub fn new(
        one: &'a dyn ModelView,
        two: &'a dyn ModelView,
        label_one: impl Into<String>,
        label_two: impl Into<String>,
    ) -> Self {
        Self {
            one,
            two,
            label_one: label_one.into(),
            label_two: label_two.into(),
        }
    }

    /// Runs the four comparators in fixed order and derives summary
    /// statistics.
    pub fn compare(&self) -> Comparison {
        tracing::debug!(
            "comparing '{}' against '{}'",
            self.label_one,
            self.label_two,
        );

        let layers = compare_layer_names(self.one, self.two);
        let parameters = compare_parameters(self.one, self.two);
        let dimensions = compare_dimensions(self.one, self.two);

        // Weights decision: only comparable when the architectures match.
        let weights = if layers.verdict.is_equal() {
            compare_weights(self.one, self.two)
        } else {
            tracing::warn!("layer sets differ; skipping weight comparison");
            DiffResult::not_comparable(WEIGHTS_NOT_COMPARABLE)
        };

        let render_dims = |view: &dyn ModelView| {
            view.input_dimensions()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        Comparison {
            label_one: self.label_one.clone(),
            label_two: self.label_two.clone(),
            layer_count_one: self.one.layer_names().len(),
            layer_count_two: self.two.layer_names().len(),
            macs_one: self.one.total_macs(),
            macs_two: self.two.total_macs(),
            input_dims_one: render_dims(self.one),
            input_dims_two: render_dims(self.two),
            layers: layers.into(),
            parameters: parameters.into(),
            dimensions: dimensions.into(),
            weights: weights.into(),
        }
    }

    /// Compares the models and renders the full report.
    pub fn run<W: Write>(
        &self,
        options: DiffOptions,
        reporter: &mut Reporter<W>,
    ) -> io::Result<()> {
        let mut comparison = self.compare();
        render(&mut comparison, options, reporter)
    }
}

/// Renders a comparison: identical short-circuit, summary, requested
/// detail sections, then hints for unrequested differing categories.
pub fn render<W: Write>(
    comparison: &mut Comparison,
    options: DiffOptions,
    reporter: &mut Reporter<W>,
) -> io::Result<()> {
    if comparison.identical() {
        return reporter.message(IDENTICAL_MESSAGE);
    }

    reporter.summary(comparison)?;
    reporter.blank()?;

    let label_one = comparison.label_one.clone();
    let label_two = comparison.label_two.clone();

    if comparison.weights.result.verdict == Verdict::NotComparable {
        reporter.warning(&comparison.weights.result.message)?;
        reporter.blank()?;
    }

    if options.layers {
        if comparison.layers.result.verdict == Verdict::Differ {
            reporter.unique_layers(&comparison.layers.result, &label_one, &label_two)?;
        } else {
            reporter.message(&comparison.layers.result.message)?;
            reporter.blank()?;
        }
        comparison.layers.reported = true;
    }

    if options.parameters {
        if comparison.parameters.result.verdict == Verdict::Differ {
            reporter.value_diff(
                "Parameters that differ",
                &comparison.parameters.result,
                &label_one,
                &label_two,
            )?;
        } else {
            reporter.message(&comparison.parameters.result.message)?;
        }
        reporter.blank()?;
        comparison.parameters.reported = true;
    }

    if options.dimensions {
        if comparison.dimensions.result.verdict == Verdict::Differ {
            reporter.value_diff(
                "Dimensions that differ",
                &comparison.dimensions.result,
                &label_one,
                &label_two,
            )?;
        } else {
            reporter.message(&comparison.dimensions.result.message)?;
        }
        reporter.blank()?;
        comparison.dimensions.reported = true;
    }

    if options.weights {
        match comparison.weights.result.verdict {
            Verdict::Differ => reporter.weight_diff(&comparison.weights.result)?,
            // NotComparable was already surfaced as a warning above.
            Verdict::NotComparable => {}
            Verdict::Equal => reporter.message(&comparison.weights.result.message)?,
        }
        reporter.blank()?;
        comparison.weights.reported = true;
    }

    // Hints for categories that differ but whose table was not requested.
    for (category, flag) in [
        (&comparison.layers, "--layers"),
        (&comparison.parameters, "--parameters"),
        (&comparison.dimensions, "--dimensions"),
        (&comparison.weights, "--weights"),
    ] {
        if category.result.verdict == Verdict::Differ && !category.reported {
            reporter.message(&format!(
                "Note: {}; re-run with {flag} for details",
                category.result.message.to_lowercase(),
            ))?;
        }
    }

    Ok(())
}

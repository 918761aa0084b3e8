// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Structured comparison outcomes.
//!
//! Every comparator produces a [`DiffResult`]: a tri-state [`Verdict`], the
//! per-model lists of differing layers, an informational message used when
//! there is nothing to tabulate, and — for the shared-layer comparators —
//! the shared-layer count behind `"x of y"` summary phrases.

use std::collections::BTreeMap;
use std::fmt;

/// Tri-state outcome of a comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The compared aspect is identical in both models.
    Equal,
    /// At least one difference was found.
    Differ,
    /// The models share no basis for this comparison (zero shared layers,
    /// or differing architectures for the weight comparator).
    NotComparable,
}

impl Verdict {
    /// Returns a short human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Equal => "identical",
            Verdict::Differ => "different",
            Verdict::NotComparable => "not comparable",
        }
    }

    /// Returns `true` for [`Verdict::Equal`].
    pub fn is_equal(self) -> bool {
        self == Verdict::Equal
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One layer's differing values in one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDiff {
    /// Layer name.
    pub name: String,
    /// Stable display identifier.
    pub id: u32,
    /// Layer type label.
    pub layer_type: String,
    /// The layer's full value sequence in this model (parameter strings or
    /// rendered dimensions). Empty for name/weight diffs, where the layer
    /// itself is the difference.
    pub values: Vec<String>,
}

impl LayerDiff {
    /// Display form used in table layer columns: `name (id N)`.
    pub fn label(&self) -> String {
        format!("{} (id {})", self.name, self.id)
    }
}

/// Result of one comparator run.
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Tri-state verdict.
    pub verdict: Verdict,
    /// Differing layers as recorded from the first model.
    pub model_one: Vec<LayerDiff>,
    /// Differing layers as recorded from the second model.
    pub model_two: Vec<LayerDiff>,
    /// One-line informational message, shown when there is no table.
    pub message: String,
    /// Number of layers the comparison ranged over, when meaningful.
    pub shared_count: Option<usize>,
}

impl DiffResult {
    /// An `Equal` result with no differences.
    pub fn equal(message: impl Into<String>, shared_count: Option<usize>) -> Self {
        Self {
            verdict: Verdict::Equal,
            model_one: Vec::new(),
            model_two: Vec::new(),
            message: message.into(),
            shared_count,
        }
    }

    /// A `NotComparable` result carrying only a warning message.
    pub fn not_comparable(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::NotComparable,
            model_one: Vec::new(),
            model_two: Vec::new(),
            message: message.into(),
            shared_count: Some(0),
        }
    }

    /// Number of differing layers.
    ///
    /// Both per-model lists cover the same layers for parameter/dimension
    /// diffs; for name diffs the two sides are independent, so the larger
    /// side is reported.
    pub fn differing_count(&self) -> usize {
        self.model_one.len().max(self.model_two.len())
    }
}

/// Layers unique to one model, grouped by layer type.
///
/// Groups are ordered by type label; within each group layers are sorted
/// lexicographically by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueLayerGroup {
    /// Layer type label shared by every layer in this group.
    pub layer_type: String,
    /// Layer diffs, sorted by name.
    pub layers: Vec<LayerDiff>,
}

impl UniqueLayerGroup {
    /// Groups one model's unique-layer diffs by type.
    pub fn group(diffs: &[LayerDiff]) -> Vec<UniqueLayerGroup> {
        let mut buckets: BTreeMap<&str, Vec<LayerDiff>> = BTreeMap::new();
        for diff in diffs {
            buckets
                .entry(diff.layer_type.as_str())
                .or_default()
                .push(diff.clone());
        }
        buckets
            .into_iter()
            .map(|(layer_type, mut layers)| {
                layers.sort_by(|a, b| a.name.cmp(&b.name));
                UniqueLayerGroup {
                    layer_type: layer_type.to_string(),
                    layers,
                }
            })
            .collect()
    }
}

/// Renders a differing-layer count against its shared total.
///
/// Collapses to the literal strings `"none"` and `"all"` at the boundary
/// values, matching the summary wording.
pub fn count_phrase(differing: usize, shared: usize) -> String {
    if differing == 0 {
        "none".to_string()
    } else if differing == shared {
        "all".to_string()
    } else {
        format!("{differing} of {shared}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(name: &str, id: u32, layer_type: &str) -> LayerDiff {
        LayerDiff {
            name: name.to_string(),
            id,
            layer_type: layer_type.to_string(),
            values: Vec::new(),
        }
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Equal.as_str(), "identical");
        assert_eq!(Verdict::Differ.as_str(), "different");
        assert_eq!(format!("{}", Verdict::NotComparable), "not comparable");
        assert!(Verdict::Equal.is_equal());
        assert!(!Verdict::Differ.is_equal());
    }

    #[test]
    fn test_layer_diff_label() {
        assert_eq!(diff("conv1", 3, "Convolutional").label(), "conv1 (id 3)");
    }

    #[test]
    fn test_group_by_type() {
        let diffs = vec![
            diff("fc2", 5, "FullyConnected"),
            diff("conv9", 4, "Convolutional"),
            diff("conv1", 1, "Convolutional"),
            diff("fc1", 3, "FullyConnected"),
        ];
        let groups = UniqueLayerGroup::group(&diffs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].layer_type, "Convolutional");
        assert_eq!(
            groups[0].layers.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
            vec!["conv1", "conv9"],
        );
        assert_eq!(groups[1].layer_type, "FullyConnected");
        assert_eq!(
            groups[1].layers.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
            vec!["fc1", "fc2"],
        );
    }

    #[test]
    fn test_group_empty() {
        assert!(UniqueLayerGroup::group(&[]).is_empty());
    }

    #[test]
    fn test_count_phrase_boundaries() {
        assert_eq!(count_phrase(0, 7), "none");
        assert_eq!(count_phrase(7, 7), "all");
        assert_eq!(count_phrase(3, 7), "3 of 7");
        // Zero shared layers: zero differing renders as "none".
        assert_eq!(count_phrase(0, 0), "none");
    }

    #[test]
    fn test_differing_count_uses_larger_side() {
        let result = DiffResult {
            verdict: Verdict::Differ,
            model_one: vec![diff("a", 0, "T")],
            model_two: vec![diff("b", 1, "T"), diff("c", 2, "T")],
            message: String::new(),
            shared_count: None,
        };
        assert_eq!(result.differing_count(), 2);
    }
}

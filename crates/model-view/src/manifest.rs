// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON model manifest parsing.
//!
//! The manifest (`model.json`) describes a model container: layer names,
//! types, configuration parameters, tensor dimensions, and — for layers
//! with learned weights — the tensor name in the SafeTensors file.
//!
//! # Format
//! ```json
//! {
//!   "name": "mobilenet-v2",
//!   "input_dimensions": [[1, 3, 224, 224]],
//!   "total_macs": 300774272,
//!   "layers": [
//!     {
//!       "id": 0,
//!       "name": "conv1",
//!       "layer_type": "Convolutional",
//!       "parameters": ["kernel: 3x3", "stride: 2", "padding: SAME"],
//!       "dimensions": [[1, 32, 112, 112]],
//!       "weights": "conv1.weight"
//!     },
//!     ...
//!   ]
//! }
//! ```

use crate::{ModelError, Shape};
use std::path::Path;

/// Top-level model manifest, deserialized from `model.json`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DlcManifest {
    /// Human-readable model name (e.g., `"mobilenet-v2"`).
    pub name: String,
    /// Dimensions of the model's input tensors.
    #[serde(default)]
    pub input_dimensions: Vec<Shape>,
    /// Total multiply-accumulate count, a coarse complexity metric.
    #[serde(default)]
    pub total_macs: u64,
    /// Layer definitions in execution order.
    pub layers: Vec<ManifestLayer>,
}

/// A single layer entry in the manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ManifestLayer {
    /// Stable numeric identifier used for display.
    pub id: u32,
    /// Layer name, unique within the model.
    pub name: String,
    /// Layer type label (e.g., `"Convolutional"`, `"FullyConnected"`).
    pub layer_type: String,
    /// Ordered configuration parameters as `"key: value"` strings.
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Ordered output tensor dimensions.
    #[serde(default)]
    pub dimensions: Vec<Shape>,
    /// Weight tensor name in the SafeTensors file, if the layer has weights.
    #[serde(default)]
    pub weights: Option<String>,
}

impl DlcManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Validates that the manifest is internally consistent.
    ///
    /// Checks:
    /// - At least one layer is defined.
    /// - No duplicate layer names (layer names are the sole basis for
    ///   cross-model matching, so uniqueness is load-bearing).
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::InvalidModel(
                "manifest contains no layers".into(),
            ));
        }

        let mut seen_names = std::collections::HashSet::new();
        for layer in &self.layers {
            if !seen_names.insert(&layer.name) {
                return Err(ModelError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: "duplicate layer name".into(),
                });
            }
        }

        Ok(())
    }

    /// Returns the number of layers that reference a weight tensor.
    pub fn weighted_layer_count(&self) -> usize {
        self.layers.iter().filter(|l| l.weights.is_some()).count()
    }
}

// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model loading from manifest + SafeTensors files.
//!
//! A model container is a directory holding `model.json` and, optionally,
//! `model.safetensors`. A path to the manifest file itself is also
//! accepted; the weight file is then looked up next to it.
//!
//! Unlike an inference runtime, the diff tool needs the actual weight
//! *values*, so tensor data is materialized eagerly from the memory-mapped
//! weight file rather than loaded on demand.

use crate::{
    DType, DlcManifest, ManifestLayer, ModelError, ModelView, Shape, WeightTensor,
};
use std::collections::HashMap;
use std::path::Path;

/// Default manifest filename inside a container directory.
const MANIFEST_FILE: &str = "model.json";

/// Default SafeTensors filename inside a container directory.
const WEIGHTS_FILE: &str = "model.safetensors";

/// Per-layer record backing the [`ModelView`] accessors.
#[derive(Debug, Clone)]
struct LayerRecord {
    id: u32,
    layer_type: String,
    parameters: Vec<String>,
    dimensions: Vec<Shape>,
}

/// A fully loaded model container implementing [`ModelView`].
#[derive(Debug, Clone)]
pub struct DlcModel {
    /// Model name from the manifest.
    pub name: String,
    names: Vec<String>,
    layers: HashMap<String, LayerRecord>,
    weights: HashMap<String, WeightTensor>,
    input_dimensions: Vec<Shape>,
    total_macs: u64,
}

impl DlcModel {
    /// Builds a model from a validated manifest and a map of layer name →
    /// weight tensor.
    ///
    /// Useful for testing without actual container files. Weight entries
    /// for layer names absent from the manifest are ignored.
    pub fn from_manifest_and_weights(
        manifest: &DlcManifest,
        mut weights: HashMap<String, WeightTensor>,
    ) -> Result<Self, ModelError> {
        manifest.validate()?;

        let mut names = Vec::with_capacity(manifest.layers.len());
        let mut layers = HashMap::with_capacity(manifest.layers.len());
        let mut kept_weights = HashMap::new();

        for ml in &manifest.layers {
            names.push(ml.name.clone());
            layers.insert(
                ml.name.clone(),
                LayerRecord {
                    id: ml.id,
                    layer_type: ml.layer_type.clone(),
                    parameters: ml.parameters.clone(),
                    dimensions: ml.dimensions.clone(),
                },
            );
            if let Some(tensor) = weights.remove(&ml.name) {
                kept_weights.insert(ml.name.clone(), tensor);
            }
        }

        Ok(Self {
            name: manifest.name.clone(),
            names,
            layers,
            weights: kept_weights,
            input_dimensions: manifest.input_dimensions.clone(),
            total_macs: manifest.total_macs,
        })
    }

    /// Returns the number of layers.
    pub fn num_layers(&self) -> usize {
        self.names.len()
    }
}

impl ModelView for DlcModel {
    fn layer_names(&self) -> &[String] {
        &self.names
    }

    fn layer_type(&self, name: &str) -> Option<&str> {
        self.layers.get(name).map(|l| l.layer_type.as_str())
    }

    fn layer_id(&self, name: &str) -> Option<u32> {
        self.layers.get(name).map(|l| l.id)
    }

    fn parameters(&self, name: &str) -> Option<&[String]> {
        self.layers.get(name).map(|l| l.parameters.as_slice())
    }

    fn dimensions(&self, name: &str) -> Option<&[Shape]> {
        self.layers.get(name).map(|l| l.dimensions.as_slice())
    }

    fn weights(&self, name: &str) -> Option<&WeightTensor> {
        self.weights.get(name)
    }

    fn input_dimensions(&self) -> &[Shape] {
        &self.input_dimensions
    }

    fn total_macs(&self) -> u64 {
        self.total_macs
    }
}

/// Loads a model container from disk into a [`DlcModel`].
pub struct DlcLoader;

impl DlcLoader {
    /// Loads and validates a model container from the given path.
    ///
    /// Steps:
    /// 1. Resolve the manifest and weight file paths.
    /// 2. Parse `model.json` and validate it.
    /// 3. If a weight file exists, read each layer's tensor from it.
    pub fn load(path: &Path) -> Result<DlcModel, ModelError> {
        let (manifest_path, weights_path) = if path.is_dir() {
            (path.join(MANIFEST_FILE), path.join(WEIGHTS_FILE))
        } else {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            (path.to_path_buf(), dir.join(WEIGHTS_FILE))
        };

        let manifest = DlcManifest::from_file(&manifest_path)?;
        manifest.validate()?;

        let weights = if weights_path.exists() {
            Self::read_weights(&manifest.layers, &weights_path)?
        } else {
            tracing::warn!(
                "'{}' not found; loading '{}' without weights",
                weights_path.display(),
                manifest.name,
            );
            HashMap::new()
        };

        tracing::debug!(
            "loaded '{}': {} layers, {} weighted",
            manifest.name,
            manifest.layers.len(),
            weights.len(),
        );

        DlcModel::from_manifest_and_weights(&manifest, weights)
    }

    /// Reads every manifest-referenced tensor from the SafeTensors file.
    ///
    /// Returns a map of layer name → weight tensor. A manifest entry whose
    /// tensor name is missing from the file is an error.
    fn read_weights(
        layers: &[ManifestLayer],
        weights_path: &Path,
    ) -> Result<HashMap<String, WeightTensor>, ModelError> {
        let file = std::fs::File::open(weights_path).map_err(|e| {
            ModelError::SafeTensorsError(format!(
                "cannot open '{}': {e}",
                weights_path.display()
            ))
        })?;

        // Memory-map the file; tensor data is copied out per layer below.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| ModelError::SafeTensorsError(format!("mmap failed: {e}")))?;

        let st = safetensors::SafeTensors::deserialize(&mmap).map_err(|e| {
            ModelError::SafeTensorsError(format!("SafeTensors parse error: {e}"))
        })?;

        let mut weights = HashMap::new();
        for layer in layers {
            let Some(tensor_name) = &layer.weights else {
                continue;
            };
            let view = st.tensor(tensor_name).map_err(|_| ModelError::WeightNotFound {
                name: tensor_name.clone(),
            })?;

            let shape = Shape::new(view.shape().to_vec());
            let dtype = convert_safetensor_dtype(view.dtype())?;
            let tensor = WeightTensor::from_bytes(shape, dtype, view.data().to_vec())?;
            weights.insert(layer.name.clone(), tensor);
        }

        Ok(weights)
    }
}

/// Converts a SafeTensors `Dtype` to our [`DType`].
fn convert_safetensor_dtype(st_dtype: safetensors::Dtype) -> Result<DType, ModelError> {
    match st_dtype {
        safetensors::Dtype::F32 => Ok(DType::F32),
        safetensors::Dtype::F16 => Ok(DType::F16),
        safetensors::Dtype::BF16 => Ok(DType::BF16),
        safetensors::Dtype::I8 => Ok(DType::I8),
        other => Err(ModelError::SafeTensorsError(format!(
            "unsupported SafeTensors dtype: {other:?}"
        ))),
    }
}

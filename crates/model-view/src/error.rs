// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model container loading.

/// Errors that can occur when loading or validating a model container.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    ManifestReadError(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),

    /// A weight tensor referenced in the manifest was not found in the weight file.
    #[error("weight tensor not found: {name}")]
    WeightNotFound { name: String },

    /// The SafeTensors weight file could not be loaded.
    #[error("failed to load SafeTensors: {0}")]
    SafeTensorsError(String),

    /// A layer entry in the manifest is invalid.
    #[error("invalid layer '{layer}': {detail}")]
    InvalidLayer { layer: String, detail: String },

    /// The manifest as a whole is invalid (e.g., no layers).
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A tensor buffer does not match its declared shape and dtype.
    #[error("tensor buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

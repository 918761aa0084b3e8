// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-view
//!
//! Read-only model container representation for the diff engine.
//!
//! A model container is a directory holding:
//! - `model.json` — manifest describing layers, their types, configuration
//!   parameters, and tensor dimensions (see [`DlcManifest`]).
//! - `model.safetensors` — optional weight file in HuggingFace SafeTensors
//!   format. A container without weights is valid; every layer then has
//!   absent weights.
//!
//! The diff engine never touches files directly — it consumes the
//! [`ModelView`] trait, which exposes per-layer accessors (type, id,
//! parameters, dimensions, weights) and model-level accessors (input
//! dimensions, total MACs). [`DlcModel`] is the concrete implementation
//! produced by [`DlcLoader`].
//!
//! # Example
//! ```no_run
//! use model_view::{DlcLoader, ModelView};
//! use std::path::Path;
//!
//! let model = DlcLoader::load(Path::new("./models/mobilenet-v2")).unwrap();
//! for name in model.layer_names() {
//!     println!("{name}: {}", model.layer_type(name).unwrap_or("?"));
//! }
//! ```

mod error;
mod loader;
pub mod manifest;
mod shape;
mod tensor;
mod view;

pub use error::ModelError;
pub use loader::{DlcLoader, DlcModel};
pub use manifest::{DlcManifest, ManifestLayer};
pub use shape::Shape;
pub use tensor::{DType, WeightTensor};
pub use view::ModelView;

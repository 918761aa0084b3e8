// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Weight tensor carrier and element data types.
//!
//! The diff engine only needs two questions answered about a pair of
//! tensors: do their shapes match, and are their values byte-for-byte
//! identical? [`WeightTensor`] therefore stores the raw buffer as loaded
//! from the weight file and never interprets element values beyond that.

use crate::{ModelError, Shape};

/// Enumerates the numeric types a [`WeightTensor`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DType {
    /// 32-bit IEEE 754 floating point.
    F32,
    /// 16-bit IEEE 754 floating point.
    F16,
    /// 16-bit brain floating point.
    BF16,
    /// 8-bit signed integer (quantised weights).
    I8,
}

impl DType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F16 => 2,
            DType::BF16 => 2,
            DType::I8 => 1,
        }
    }

    /// Returns a human-readable label for this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::I8 => "i8",
        }
    }
}

/// An owned weight tensor stored as a flat row-major byte buffer.
#[derive(Debug, Clone)]
pub struct WeightTensor {
    shape: Shape,
    dtype: DType,
    data: Vec<u8>,
}

impl WeightTensor {
    /// Creates a tensor from raw bytes.
    ///
    /// Returns an error if the buffer size does not match
    /// `shape.num_elements() * dtype.size_bytes()`.
    pub fn from_bytes(shape: Shape, dtype: DType, data: Vec<u8>) -> Result<Self, ModelError> {
        let expected = shape.num_elements() * dtype.size_bytes();
        if data.len() != expected {
            return Err(ModelError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, dtype, data })
    }

    /// Creates an `f32` tensor from a slice of values.
    ///
    /// # Examples
    /// ```
    /// use model_view::{Shape, WeightTensor};
    /// let t = WeightTensor::from_f32(Shape::vector(3), &[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.shape(), &Shape::vector(3));
    /// ```
    pub fn from_f32(shape: Shape, values: &[f32]) -> Result<Self, ModelError> {
        let mut data = Vec::with_capacity(values.len() * 4);
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::from_bytes(shape, DType::F32, data)
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the raw byte buffer backing this tensor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if both tensors have the same shape.
    pub fn same_shape(&self, other: &WeightTensor) -> bool {
        self.shape == other.shape
    }

    /// Returns `true` if both tensors hold exactly the same values.
    ///
    /// Exact match only: the dtypes must agree and the buffers must be
    /// byte-for-byte identical. There is no tolerance-based comparison.
    pub fn exact_eq(&self, other: &WeightTensor) -> bool {
        self.dtype == other.dtype && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_size_check() {
        let ok = WeightTensor::from_bytes(Shape::vector(2), DType::F32, vec![0u8; 8]);
        assert!(ok.is_ok());

        let bad = WeightTensor::from_bytes(Shape::vector(2), DType::F32, vec![0u8; 7]);
        assert!(matches!(
            bad,
            Err(ModelError::BufferSizeMismatch {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_from_f32() {
        let t = WeightTensor::from_f32(Shape::matrix(2, 2), &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(t.dtype(), DType::F32);
        assert_eq!(t.as_bytes().len(), 16);
    }

    #[test]
    fn test_exact_eq() {
        let a = WeightTensor::from_f32(Shape::vector(3), &[1.0, 2.0, 3.0]).unwrap();
        let b = WeightTensor::from_f32(Shape::vector(3), &[1.0, 2.0, 3.0]).unwrap();
        let c = WeightTensor::from_f32(Shape::vector(3), &[1.0, 2.0, 3.5]).unwrap();
        assert!(a.exact_eq(&b));
        assert!(!a.exact_eq(&c));
    }

    #[test]
    fn test_exact_eq_dtype_mismatch() {
        let a = WeightTensor::from_bytes(Shape::vector(4), DType::I8, vec![1, 2, 3, 4]).unwrap();
        let b = WeightTensor::from_bytes(Shape::vector(1), DType::F32, vec![1, 2, 3, 4]).unwrap();
        // Same bytes, different dtype: not equal.
        assert!(!a.exact_eq(&b));
    }

    #[test]
    fn test_same_shape() {
        let a = WeightTensor::from_f32(Shape::matrix(2, 3), &[0.0; 6]).unwrap();
        let b = WeightTensor::from_f32(Shape::matrix(3, 2), &[0.0; 6]).unwrap();
        assert!(!a.same_shape(&b));
        assert!(a.same_shape(&a.clone()));
    }

    #[test]
    fn test_dtype_sizes() {
        assert_eq!(DType::F32.size_bytes(), 4);
        assert_eq!(DType::F16.size_bytes(), 2);
        assert_eq!(DType::BF16.size_bytes(), 2);
        assert_eq!(DType::I8.size_bytes(), 1);
        assert_eq!(DType::BF16.as_str(), "bf16");
    }
}

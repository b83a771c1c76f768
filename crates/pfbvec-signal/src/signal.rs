//! Sample buffer with dtype-tagged storage.

use num_complex::Complex;

use pfbvec_spec::Dtype;

/// An ordered, finite sequence of samples of one dtype.
///
/// Immutable once generated; the pipeline only ever serializes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// 32-bit real samples.
    Float32(Vec<f32>),
    /// 64-bit real samples.
    Float64(Vec<f64>),
    /// Complex samples of 32-bit components.
    Complex64(Vec<Complex<f32>>),
    /// Complex samples of 64-bit components.
    Complex128(Vec<Complex<f64>>),
}

impl Signal {
    /// Number of samples (a complex pair counts as one sample).
    pub fn len(&self) -> usize {
        match self {
            Signal::Float32(v) => v.len(),
            Signal::Float64(v) => v.len(),
            Signal::Complex64(v) => v.len(),
            Signal::Complex128(v) => v.len(),
        }
    }

    /// True if the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The dtype of the stored samples.
    pub fn dtype(&self) -> Dtype {
        match self {
            Signal::Float32(_) => Dtype::Float32,
            Signal::Float64(_) => Dtype::Float64,
            Signal::Complex64(_) => Dtype::Complex64,
            Signal::Complex128(_) => Dtype::Complex128,
        }
    }

    /// Bytes one sample occupies on disk.
    pub fn bytes_per_sample(&self) -> usize {
        self.dtype().bits_per_sample() as usize / 8
    }

    /// Appends the little-endian encoding of sample `idx` to `buf`.
    ///
    /// Complex samples write the real component first.
    pub fn write_sample_le(&self, idx: usize, buf: &mut Vec<u8>) {
        match self {
            Signal::Float32(v) => buf.extend_from_slice(&v[idx].to_le_bytes()),
            Signal::Float64(v) => buf.extend_from_slice(&v[idx].to_le_bytes()),
            Signal::Complex64(v) => {
                buf.extend_from_slice(&v[idx].re.to_le_bytes());
                buf.extend_from_slice(&v[idx].im.to_le_bytes());
            }
            Signal::Complex128(v) => {
                buf.extend_from_slice(&v[idx].re.to_le_bytes());
                buf.extend_from_slice(&v[idx].im.to_le_bytes());
            }
        }
    }

    /// Serializes all samples little-endian in order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len() * self.bytes_per_sample());
        for idx in 0..self.len() {
            self.write_sample_le(idx, &mut buf);
        }
        buf
    }

    /// Borrows the samples as `Complex<f32>`, if that is the storage.
    pub fn as_complex64(&self) -> Option<&[Complex<f32>]> {
        match self {
            Signal::Complex64(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the samples as `Complex<f64>`, if that is the storage.
    pub fn as_complex128(&self) -> Option<&[Complex<f64>]> {
        match self {
            Signal::Complex128(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the samples as `f32`, if that is the storage.
    pub fn as_float32(&self) -> Option<&[f32]> {
        match self {
            Signal::Float32(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the samples as `f64`, if that is the storage.
    pub fn as_float64(&self) -> Option<&[f64]> {
        match self {
            Signal::Float64(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dtype_and_len_follow_storage() {
        let sig = Signal::Complex64(vec![Complex::new(1.0f32, 0.0); 4]);
        assert_eq!(sig.len(), 4);
        assert_eq!(sig.dtype(), Dtype::Complex64);
        assert_eq!(sig.bytes_per_sample(), 8);
    }

    #[test]
    fn le_bytes_write_real_component_first() {
        let sig = Signal::Complex64(vec![Complex::new(1.0f32, -1.0f32)]);
        let bytes = sig.to_le_bytes();
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..], &(-1.0f32).to_le_bytes());
    }

    #[test]
    fn real_serialization_is_contiguous() {
        let sig = Signal::Float64(vec![0.5, -0.5]);
        let bytes = sig.to_le_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &0.5f64.to_le_bytes());
        assert_eq!(&bytes[8..], &(-0.5f64).to_le_bytes());
    }
}

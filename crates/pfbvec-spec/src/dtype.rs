//! Sample dtype enumeration.
//!
//! The on-disk vocabulary encodes precision only (`single`/`double`);
//! real-versus-complex is carried by the type, not the tag. Unknown tags
//! are rejected at the parse boundary instead of falling through a
//! lookup table.

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Sample dtypes a vector can be generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    /// 32-bit real floats.
    Float32,
    /// 64-bit real floats.
    Float64,
    /// Complex pairs of 32-bit floats.
    Complex64,
    /// Complex pairs of 64-bit floats.
    Complex128,
}

impl Dtype {
    /// Returns the precision tag used in artifact names and as the
    /// external toolchain's dtype argument.
    pub fn tag(&self) -> &'static str {
        match self {
            Dtype::Float32 | Dtype::Complex64 => "single",
            Dtype::Float64 | Dtype::Complex128 => "double",
        }
    }

    /// True for complex-valued dtypes.
    pub fn is_complex(&self) -> bool {
        matches!(self, Dtype::Complex64 | Dtype::Complex128)
    }

    /// Bits per sample, counting both components of a complex pair.
    pub fn bits_per_sample(&self) -> u32 {
        match self {
            Dtype::Float32 => 32,
            Dtype::Float64 | Dtype::Complex64 => 64,
            Dtype::Complex128 => 128,
        }
    }

    /// Returns the CLI tag for this dtype.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dtype::Float32 => "f32",
            Dtype::Float64 => "f64",
            Dtype::Complex64 => "c64",
            Dtype::Complex128 => "c128",
        }
    }

    /// Returns all dtypes.
    pub fn all() -> &'static [Dtype] {
        &[
            Dtype::Float32,
            Dtype::Float64,
            Dtype::Complex64,
            Dtype::Complex128,
        ]
    }
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dtype {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f32" => Ok(Dtype::Float32),
            "f64" => Ok(Dtype::Float64),
            "c64" => Ok(Dtype::Complex64),
            "c128" => Ok(Dtype::Complex128),
            _ => Err(ParamError::UnknownDtype(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_collapses_to_precision() {
        assert_eq!(Dtype::Float32.tag(), "single");
        assert_eq!(Dtype::Complex64.tag(), "single");
        assert_eq!(Dtype::Float64.tag(), "double");
        assert_eq!(Dtype::Complex128.tag(), "double");
    }

    #[test]
    fn bits_count_both_complex_components() {
        assert_eq!(Dtype::Float32.bits_per_sample(), 32);
        assert_eq!(Dtype::Complex64.bits_per_sample(), 64);
        assert_eq!(Dtype::Complex128.bits_per_sample(), 128);
    }

    #[test]
    fn round_trips_through_strings() {
        for dtype in Dtype::all() {
            let parsed: Dtype = dtype.as_str().parse().unwrap();
            assert_eq!(parsed, *dtype);
        }
        assert!("i16".parse::<Dtype>().is_err());
    }

    #[test]
    fn complexity() {
        assert!(!Dtype::Float32.is_complex());
        assert!(Dtype::Complex128.is_complex());
    }
}

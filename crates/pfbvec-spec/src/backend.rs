//! Generation backend tags.

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Which implementation produces stage-1 data.
///
/// `Matlab` drives the external compiled toolchain for every stage.
/// `Python` is the native in-process generator path; it covers stage 1
/// only, so channelize and synthesize requests under it are rejected as
/// unsupported. The tags appear verbatim in artifact basenames shared
/// with the legacy toolchain, so the vocabulary is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// External compiled toolchain.
    Matlab,
    /// Native in-process generation.
    Python,
}

impl Backend {
    /// Returns the backend tag used in artifact names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Matlab => "matlab",
            Backend::Python => "python",
        }
    }

    /// True if transform stages (channelize, synthesize) are available.
    pub fn supports_transforms(&self) -> bool {
        matches!(self, Backend::Matlab)
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matlab" => Ok(Backend::Matlab),
            "python" => Ok(Backend::Python),
            _ => Err(ParamError::UnknownBackend(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        assert_eq!("matlab".parse::<Backend>().unwrap(), Backend::Matlab);
        assert_eq!("python".parse::<Backend>().unwrap(), Backend::Python);
        assert!("octave".parse::<Backend>().is_err());
    }

    #[test]
    fn transform_support() {
        assert!(Backend::Matlab.supports_transforms());
        assert!(!Backend::Python.supports_transforms());
    }
}

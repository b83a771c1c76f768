//! Signal domains, ordered parameter sets, and cache keys.
//!
//! A [`Domain`] fixes both the parameter schema (names and order) and the
//! generator handler used for stage-1 synthesis. A [`ParameterSet`] holds
//! concrete values in that canonical order; its [`cache_key`] rendering at
//! three decimal places is the on-disk identity of the vector, so any two
//! parameter sets that format identically share a cache entry.
//!
//! [`cache_key`]: ParameterSet::cache_key

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Number of decimal places used everywhere a parameter value becomes
/// part of an on-disk name. Values closer than this are the same vector.
pub const KEY_PRECISION: usize = 3;

/// Signal domains supported for vector generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Time-domain impulse vectors.
    Time,
    /// Frequency-domain (complex sinusoid) vectors.
    Freq,
}

impl Domain {
    /// Returns the domain as a string (cache directory segment).
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Time => "time",
            Domain::Freq => "freq",
        }
    }

    /// Returns the domain's parameter names in canonical order.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Domain::Time => &["offset", "width"],
            Domain::Freq => &["frequency", "phase", "bin_offset"],
        }
    }

    /// Returns the stage-1 generator handler for this domain.
    ///
    /// The handler name is both the first positional argument handed to
    /// the external toolchain and the leading segment of canonical
    /// artifact basenames.
    pub fn handler_name(&self) -> &'static str {
        match self {
            Domain::Time => "time_domain_impulse",
            Domain::Freq => "complex_sinusoid",
        }
    }

    /// Returns all domains.
    pub fn all() -> &'static [Domain] {
        &[Domain::Time, Domain::Freq]
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Domain::Time),
            "freq" => Ok(Domain::Freq),
            _ => Err(ParamError::UnknownDomain(s.to_string())),
        }
    }
}

/// The formatted, precision-bounded identity of a parameter set.
///
/// Used verbatim as the per-vector cache subdirectory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<std::path::Path> for CacheKey {
    fn as_ref(&self) -> &std::path::Path {
        self.0.as_ref()
    }
}

/// Concrete parameter values for one domain, held in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    domain: Domain,
    values: Vec<f64>,
}

impl ParameterSet {
    /// Builds a parameter set from positional values in the domain's
    /// canonical order.
    pub fn from_ordered(domain: Domain, values: &[f64]) -> Result<Self, ParamError> {
        let expected = domain.param_names().len();
        if values.len() != expected {
            return Err(ParamError::arity(domain.as_str(), expected, values.len()));
        }
        Ok(Self {
            domain,
            values: values.to_vec(),
        })
    }

    /// Builds a parameter set from named values.
    ///
    /// The mapping must cover exactly the domain's parameter names; the
    /// result is identical to the positional form with the same values.
    pub fn from_named<'a, I>(domain: Domain, pairs: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let names = domain.param_names();
        let mut slots: Vec<Option<f64>> = vec![None; names.len()];
        for (name, value) in pairs {
            let idx = names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| ParamError::unknown_parameter(domain.as_str(), name))?;
            slots[idx] = Some(value);
        }
        let mut values = Vec::with_capacity(names.len());
        for (idx, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(v) => values.push(v),
                None => return Err(ParamError::missing_parameter(domain.as_str(), names[idx])),
            }
        }
        Ok(Self { domain, values })
    }

    /// Returns the domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns the values in canonical order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Looks up a value by parameter name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.domain
            .param_names()
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.values[idx])
    }

    /// Returns (name, value) pairs in canonical order.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        self.domain
            .param_names()
            .iter()
            .zip(&self.values)
            .map(|(name, value)| (*name, *value))
            .collect()
    }

    /// Formats the precision-bounded cache key for this parameter set.
    ///
    /// The frequency-domain key orders bin_offset before phase even
    /// though the parameter schema orders phase first; both orders are
    /// fixed on-disk vocabulary and must not drift.
    pub fn cache_key(&self) -> CacheKey {
        let key = match self.domain {
            Domain::Time => format!(
                "o-{:.prec$}_w-{:.prec$}",
                self.values[0],
                self.values[1],
                prec = KEY_PRECISION
            ),
            Domain::Freq => format!(
                "f-{:.prec$}_b-{:.prec$}_p-{:.prec$}",
                self.values[0],
                self.values[2],
                self.values[1],
                prec = KEY_PRECISION
            ),
        };
        CacheKey(key)
    }
}

//! Parameter-keyed caching for generated vector sets.
//!
//! Entries live at `base_dir/<domain>/<cache_key>/` with a `meta.json`
//! record written only after every stage has succeeded. An entry
//! directory without a readable record is corrupt and is never reused
//! in part.

use std::fs;
use std::path::{Path, PathBuf};

use pfbvec_spec::{Domain, Metadata, ParameterSet, META_FILE_NAME};

use crate::error::PipelineError;

/// Cache manager for looking up and committing vector sets.
#[derive(Debug, Clone)]
pub struct VectorCache {
    base_dir: PathBuf,
}

impl VectorCache {
    /// Create a cache rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Cache root directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the entry directory for a parameter set.
    pub fn entry_dir(&self, params: &ParameterSet) -> PathBuf {
        self.base_dir
            .join(params.domain().as_str())
            .join(params.cache_key())
    }

    /// Retrieve the committed record for a parameter set.
    ///
    /// Returns `Ok(None)` when no entry directory exists. An entry
    /// directory whose record is missing or undecodable is reported as
    /// corruption, never as a miss.
    pub fn lookup(&self, params: &ParameterSet) -> Result<Option<Metadata>, PipelineError> {
        let entry_dir = self.entry_dir(params);
        if !entry_dir.exists() {
            return Ok(None);
        }

        let meta_path = entry_dir.join(META_FILE_NAME);
        if !meta_path.exists() {
            return Err(PipelineError::corruption(
                entry_dir,
                format!("{META_FILE_NAME} is missing"),
            ));
        }

        let text = fs::read_to_string(&meta_path)
            .map_err(|e| PipelineError::corruption(&entry_dir, e.to_string()))?;
        let meta = serde_json::from_str(&text)
            .map_err(|e| PipelineError::corruption(&entry_dir, e.to_string()))?;
        Ok(Some(meta))
    }

    /// Commit a record into an entry directory, marking it complete.
    pub fn commit(&self, params: &ParameterSet, meta: &Metadata) -> Result<(), PipelineError> {
        let meta_path = self.entry_dir(params).join(META_FILE_NAME);
        let json = serde_json::to_string_pretty(meta).map_err(|e| {
            PipelineError::PersistenceFailure {
                path: meta_path.clone(),
                source: std::io::Error::other(e),
            }
        })?;
        fs::write(&meta_path, json).map_err(|e| PipelineError::PersistenceFailure {
            path: meta_path,
            source: e,
        })
    }

    /// Clear all cache entries, returning the number removed.
    pub fn clear(&self) -> Result<u64, PipelineError> {
        let mut count = 0u64;
        for domain in Domain::all() {
            let domain_dir = self.base_dir.join(domain.as_str());
            if !domain_dir.exists() {
                continue;
            }
            for entry in fs::read_dir(&domain_dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    fs::remove_dir_all(&path)?;
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    /// Get cache info (total entries, total size).
    pub fn info(&self) -> Result<CacheInfo, PipelineError> {
        let mut entry_count = 0u64;
        let mut total_size_bytes = 0u64;

        for domain in Domain::all() {
            let domain_dir = self.base_dir.join(domain.as_str());
            if !domain_dir.exists() {
                continue;
            }
            for entry in fs::read_dir(&domain_dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    entry_count += 1;
                    total_size_bytes += dir_size(&path)?;
                }
            }
        }

        Ok(CacheInfo {
            base_dir: self.base_dir.clone(),
            entry_count,
            total_size_bytes,
        })
    }
}

/// Cache information.
#[derive(Debug, Clone)]
pub struct CacheInfo {
    /// Cache root directory.
    pub base_dir: PathBuf,
    /// Number of cache entries across all domains.
    pub entry_count: u64,
    /// Total size in bytes.
    pub total_size_bytes: u64,
}

fn dir_size(path: &Path) -> Result<u64, PipelineError> {
    let mut total = 0u64;
    for entry in walkdir::WalkDir::new(path) {
        let entry = entry.map_err(|e| {
            PipelineError::corruption(path, format!("failed to walk entry: {e}"))
        })?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(std::io::Error::other)?.len();
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfbvec_spec::Domain;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn freq_params() -> ParameterSet {
        ParameterSet::from_ordered(Domain::Freq, &[0.1, 0.0, 0.0]).unwrap()
    }

    fn sample_meta(params: &ParameterSet) -> Metadata {
        Metadata::new(
            params,
            "input.dump".to_string(),
            "channelized.dump".to_string(),
            "inverted.dump".to_string(),
        )
    }

    #[test]
    fn entry_dir_is_domain_then_key() {
        let cache = VectorCache::new("/cache");
        let params = freq_params();
        assert_eq!(
            cache.entry_dir(&params),
            PathBuf::from("/cache/freq/f-0.100_b-0.000_p-0.000")
        );
    }

    #[test]
    fn absent_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = VectorCache::new(dir.path());
        assert_eq!(cache.lookup(&freq_params()).unwrap(), None);
    }

    #[test]
    fn commit_then_lookup_round_trips() {
        let dir = TempDir::new().unwrap();
        let cache = VectorCache::new(dir.path());
        let params = freq_params();
        let meta = sample_meta(&params);

        fs::create_dir_all(cache.entry_dir(&params)).unwrap();
        cache.commit(&params, &meta).unwrap();

        assert_eq!(cache.lookup(&params).unwrap(), Some(meta));
    }

    #[test]
    fn entry_without_record_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let cache = VectorCache::new(dir.path());
        let params = freq_params();

        fs::create_dir_all(cache.entry_dir(&params)).unwrap();

        let err = cache.lookup(&params).unwrap_err();
        assert!(matches!(err, PipelineError::CacheCorruption { .. }));
    }

    #[test]
    fn undecodable_record_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let cache = VectorCache::new(dir.path());
        let params = freq_params();

        let entry = cache.entry_dir(&params);
        fs::create_dir_all(&entry).unwrap();
        fs::write(entry.join(META_FILE_NAME), "not json").unwrap();

        let err = cache.lookup(&params).unwrap_err();
        assert!(matches!(err, PipelineError::CacheCorruption { .. }));
    }

    #[test]
    fn clear_removes_entries_across_domains() {
        let dir = TempDir::new().unwrap();
        let cache = VectorCache::new(dir.path());

        let freq = freq_params();
        let time = ParameterSet::from_ordered(Domain::Time, &[0.2, 3.0]).unwrap();
        fs::create_dir_all(cache.entry_dir(&freq)).unwrap();
        fs::create_dir_all(cache.entry_dir(&time)).unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.lookup(&freq).unwrap(), None);
        assert_eq!(cache.lookup(&time).unwrap(), None);
    }

    #[test]
    fn clear_of_empty_cache_is_zero() {
        let dir = TempDir::new().unwrap();
        let cache = VectorCache::new(dir.path());
        assert_eq!(cache.clear().unwrap(), 0);
    }

    #[test]
    fn info_counts_entries_and_bytes() {
        let dir = TempDir::new().unwrap();
        let cache = VectorCache::new(dir.path());
        let params = freq_params();

        let info = cache.info().unwrap();
        assert_eq!(info.entry_count, 0);
        assert_eq!(info.total_size_bytes, 0);

        let entry = cache.entry_dir(&params);
        fs::create_dir_all(&entry).unwrap();
        fs::write(entry.join("input.dump"), vec![0u8; 128]).unwrap();
        cache.commit(&params, &sample_meta(&params)).unwrap();

        let info = cache.info().unwrap();
        assert_eq!(info.entry_count, 1);
        assert!(info.total_size_bytes >= 128);
    }
}

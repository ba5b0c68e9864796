use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use super::loader::{self, LoadError, SourceSpec};
use super::model::SalesDataset;

/// Process-wide holder of the loaded dataset.
///
/// The first successful [`DatasetCache::get_or_load`] reads the source; every
/// later call hands out the same `Arc` without touching the file. A failed
/// load leaves the cache empty. Source changes are not detected.
#[derive(Debug)]
pub struct DatasetCache {
    source: SourceSpec,
    dataset: OnceLock<Arc<SalesDataset>>,
    loads: AtomicUsize,
}

impl DatasetCache {
    pub fn new(source: SourceSpec) -> Self {
        Self {
            source,
            dataset: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn source(&self) -> &SourceSpec {
        &self.source
    }

    pub fn get_or_load(&self) -> Result<Arc<SalesDataset>, LoadError> {
        if let Some(dataset) = self.dataset.get() {
            log::debug!("Dataset cache hit for {}", self.source.path.display());
            return Ok(Arc::clone(dataset));
        }

        self.loads.fetch_add(1, Ordering::Relaxed);
        let loaded = Arc::new(loader::load(&self.source)?);
        // If another caller won the race, keep theirs so everyone shares one value.
        Ok(Arc::clone(self.dataset.get_or_init(|| loaded)))
    }

    /// Number of times the source has actually been read.
    #[cfg(test)]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{ColumnRange, SheetLayout};
    use std::fs;
    use tempfile::TempDir;

    fn spec(dir: &TempDir) -> SourceSpec {
        SourceSpec {
            path: dir.path().join("sales.csv"),
            layout: SheetLayout {
                sheet: "Sales".into(),
                skip_rows: 0,
                columns: ColumnRange { first: 0, last: 6 },
                max_rows: None,
            },
        }
    }

    const SOURCE: &str = "\
City,Customer_type,Gender,Product line,Total,Rating,Time
Yangon,Member,Female,Health and beauty,50,8,13:45:00
Mandalay,Normal,Male,Sports and travel,30,6,10:20:00
";

    #[test]
    fn source_is_read_once() {
        let dir = TempDir::new().unwrap();
        let spec = spec(&dir);
        fs::write(&spec.path, SOURCE).unwrap();

        let cache = DatasetCache::new(spec.clone());
        let first = cache.get_or_load().unwrap();

        // Later reads must not see the file at all.
        fs::remove_file(&spec.path).unwrap();
        let second = cache.get_or_load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let spec = spec(&dir);
        let cache = DatasetCache::new(spec.clone());

        assert!(cache.get_or_load().is_err());

        fs::write(&spec.path, SOURCE).unwrap();
        assert_eq!(cache.get_or_load().unwrap().len(), 2);
        assert_eq!(cache.loads(), 2);
    }
}

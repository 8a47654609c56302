use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::PathBuf;

use anvil_logger::{log, LogSeverity};

use crate::error::WorldError;
use crate::region::Region;

/// Called after a region has been loaded from disk into the cache.
pub type RegionLoadedCallback = Box<dyn Fn(i32, i32, &Region)>;

/// A bounded LRU cache of regions keyed by region coordinates. Misses are
/// served from `r.<x>.<z>.mca` files in the region directory; evictions
/// synchronously write the evicted region back to its file before the
/// insert returns.
pub struct RegionCache {
    region_dir: PathBuf,
    capacity: usize,
    entries: HashMap<(i32, i32), Region>,
    // Recency order, least recently used first.
    order: VecDeque<(i32, i32)>,
    on_loaded: Option<RegionLoadedCallback>,
}

impl RegionCache {
    pub fn new(region_dir: PathBuf, capacity: usize) -> RegionCache {
        RegionCache {
            region_dir,
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
            on_loaded: None,
        }
    }

    pub fn with_callback(
        region_dir: PathBuf,
        capacity: usize,
        on_loaded: RegionLoadedCallback,
    ) -> RegionCache {
        RegionCache {
            on_loaded: Some(on_loaded),
            ..RegionCache::new(region_dir, capacity)
        }
    }

    /// Looks up a region, loading it from disk on a miss when its file
    /// exists. Returns `None` only if the region is neither cached nor on
    /// disk.
    pub fn get(&mut self, key: (i32, i32)) -> Result<Option<&mut Region>, WorldError> {
        if self.entries.contains_key(&key) {
            self.touch(key);
        } else {
            let path = self.region_file(key);
            if !path.exists() {
                return Ok(None);
            }

            let mut region = Region::new(key.0, key.1, None);
            region.read_from_file(&path)?;
            if let Some(on_loaded) = &self.on_loaded {
                on_loaded(key.0, key.1, &region);
            }
            self.insert(key, region)?;
        }

        Ok(self.entries.get_mut(&key))
    }

    /// Inserts a region, evicting (and writing back) the least recently
    /// used entries beyond capacity.
    pub fn put(&mut self, key: (i32, i32), region: Region) -> Result<(), WorldError> {
        self.insert(key, region)
    }

    /// The sorted union of in-memory keys and every region file on disk.
    /// This is a shallow snapshot; regions added while iterating are not
    /// reflected.
    pub fn keys(&self) -> io::Result<BTreeSet<(i32, i32)>> {
        let mut keys: BTreeSet<(i32, i32)> = self.entries.keys().copied().collect();
        for entry in fs::read_dir(&self.region_dir)? {
            let entry = entry?;
            if let Some(key) = parse_region_file_name(&entry.file_name().to_string_lossy()) {
                keys.insert(key);
            }
        }
        Ok(keys)
    }

    /// Iterates over the in-memory entries only.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &Region)> {
        self.entries.iter().map(|(key, region)| (*key, region))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: (i32, i32), region: Region) -> Result<(), WorldError> {
        if self.entries.insert(key, region).is_some() {
            self.touch(key);
        } else {
            self.order.push_back(key);
        }

        while self.entries.len() > self.capacity {
            let Some(lru) = self.order.pop_front() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&lru) {
                log(
                    format!("Evicting region ({}, {}) from cache", lru.0, lru.1),
                    LogSeverity::Debug,
                );
                evicted
                    .write_to_file(&self.region_file(lru))
                    .map_err(|source| WorldError::CacheWriteBack {
                        x: lru.0,
                        z: lru.1,
                        source,
                    })?;
            }
        }

        Ok(())
    }

    fn touch(&mut self, key: (i32, i32)) {
        if let Some(position) = self.order.iter().position(|&k| k == key) {
            self.order.remove(position);
        }
        self.order.push_back(key);
    }

    fn region_file(&self, key: (i32, i32)) -> PathBuf {
        self.region_dir.join(format!("r.{}.{}.mca", key.0, key.1))
    }
}

fn parse_region_file_name(name: &str) -> Option<(i32, i32)> {
    let mut parts = name.split('.');
    if parts.next()? != "r" {
        return None;
    }
    let x = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    if parts.next()? != "mca" || parts.next().is_some() {
        return None;
    }
    Some((x, z))
}

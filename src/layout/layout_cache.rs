use std::collections::HashMap;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::trace;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::Result;
use crate::layout::justified::{GalleryConfig, GalleryLayoutEngine, LayoutBounds, RowBreak};
use crate::models::{ImageRecord, RowLayoutResult};

/// Maximum number of cached layouts to keep in memory.
const MAX_CACHE_ENTRIES: usize = 8;

/// Key for the layout cache.
///
/// Row breaks depend on the exact measurements, so widths are keyed by their
/// bit patterns rather than bucketed.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    container_width: u64,
    viewport_height: u64,
    config_hash: u64,
    list_hash: u64,
}

impl CacheKey {
    fn new(bounds: LayoutBounds, config_hash: u64, list_hash: u64) -> Self {
        Self {
            container_width: bounds.container_width.to_bits(),
            viewport_height: bounds.viewport_height.to_bits(),
            config_hash,
            list_hash,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedLayout {
    breaks: Vec<RowBreak>,
    /// Number of images this layout was computed for
    item_count: usize,
    /// For LRU eviction
    last_used: Instant,
}

/// Row breaks keyed by (bounds, config, image list).
///
/// Resize notifications tend to bounce between a handful of widths; keeping
/// the breaks for each lets a relayout skip row formation entirely.
pub struct LayoutCache {
    cache: RwLock<HashMap<CacheKey, CachedLayout>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::with_capacity(MAX_CACHE_ENTRIES)),
        }
    }

    /// Hash of every image's natural size and source, in order, so any change
    /// to the list or its order misses the cache.
    pub fn compute_list_hash(images: &[ImageRecord]) -> u64 {
        let mut hasher_input = Vec::with_capacity(images.len() * 64);

        for image in images {
            hasher_input.extend_from_slice(image.source_ref.as_bytes());
            hasher_input.push(0);
            hasher_input.extend_from_slice(&image.width.to_le_bytes());
            hasher_input.extend_from_slice(&image.height.to_le_bytes());
        }

        xxh3_64(&hasher_input)
    }

    pub fn config_hash(config: &GalleryConfig) -> u64 {
        let mut bytes = Vec::with_capacity(32);
        for value in [
            config.image_margin,
            config.max_target_height,
            config.min_target_height,
            config.max_viewport_height_fraction,
        ] {
            bytes.extend_from_slice(&value.to_bits().to_le_bytes());
        }
        xxh3_64(&bytes)
    }

    /// Cached breaks for the given key, refreshing its LRU stamp.
    fn get_breaks(
        &self,
        bounds: LayoutBounds,
        config_hash: u64,
        list_hash: u64,
        item_count: usize,
    ) -> Option<Vec<RowBreak>> {
        let key = CacheKey::new(bounds, config_hash, list_hash);
        let mut cache = self.cache.write();
        let entry = cache.get_mut(&key)?;
        if entry.item_count != item_count {
            return None;
        }
        entry.last_used = Instant::now();
        Some(entry.breaks.clone())
    }

    fn set(
        &self,
        bounds: LayoutBounds,
        config_hash: u64,
        list_hash: u64,
        breaks: Vec<RowBreak>,
        item_count: usize,
    ) {
        let key = CacheKey::new(bounds, config_hash, list_hash);
        let entry = CachedLayout {
            breaks,
            item_count,
            last_used: Instant::now(),
        };

        let mut cache = self.cache.write();

        if cache.len() >= MAX_CACHE_ENTRIES && !cache.contains_key(&key) {
            Self::evict_oldest(&mut cache);
        }

        cache.insert(key, entry);
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    fn evict_oldest(cache: &mut HashMap<CacheKey, CachedLayout>) {
        let oldest_key = cache
            .iter()
            .min_by_key(|(_, v)| v.last_used)
            .map(|(k, _)| k.clone());

        if let Some(key) = oldest_key {
            cache.remove(&key);
        }
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Layout engine paired with a [`LayoutCache`].
pub struct CachedLayoutComputer {
    pub engine: GalleryLayoutEngine,
    pub cache: LayoutCache,
}

impl CachedLayoutComputer {
    pub fn new() -> Self {
        Self::with_engine(GalleryLayoutEngine::default())
    }

    pub fn with_engine(engine: GalleryLayoutEngine) -> Self {
        Self {
            engine,
            cache: LayoutCache::new(),
        }
    }

    /// Same result as [`GalleryLayoutEngine::layout`]; row formation is skipped
    /// on a cache hit. Errors are never cached.
    pub fn compute(&self, images: &[ImageRecord], bounds: LayoutBounds) -> Result<RowLayoutResult> {
        if images.is_empty() {
            return Ok(RowLayoutResult::default());
        }

        let config_hash = LayoutCache::config_hash(&self.engine.config);
        let list_hash = LayoutCache::compute_list_hash(images);

        if let Some(breaks) = self
            .cache
            .get_breaks(bounds, config_hash, list_hash, images.len())
        {
            trace!(rows = breaks.len(), "Layout cache hit");
            return Ok(RowLayoutResult::new(
                self.engine.rows_from_breaks(images, bounds, &breaks),
            ));
        }

        let breaks = self.engine.compute_breaks(images, bounds)?;
        let rows = self.engine.rows_from_breaks(images, bounds, &breaks);
        self.cache
            .set(bounds, config_hash, list_hash, breaks, images.len());

        Ok(RowLayoutResult::new(rows))
    }

    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

impl Default for CachedLayoutComputer {
    fn default() -> Self {
        Self::new()
    }
}

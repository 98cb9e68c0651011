use tracing::{debug, info};

use crate::error::{LayoutError, Result};
use crate::host::directives::StyleDirective;
use crate::host::ids::{ElementId, IdSource};
use crate::layout::{CachedLayoutComputer, GalleryConfig, GalleryLayoutEngine, LayoutBounds};
use crate::models::{ImageRecord, LayoutEntry};

/// Directive for one rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub handle: ElementId,
    pub index: usize,
    pub row: u32,
    pub directive: StyleDirective,
}

/// Outcome of a relayout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPass {
    /// New placements are available from [`Gallery::placements`].
    Applied { rows: usize },
    /// The host could not measure; previous placements are kept.
    Deferred,
}

/// A gallery's images, their element handles and the latest placements.
///
/// Relayout takes `&mut self`, so one gallery never runs overlapping passes.
pub struct Gallery {
    images: Vec<ImageRecord>,
    base_id: String,
    handles: Vec<ElementId>,
    computer: CachedLayoutComputer,
    placements: Vec<Placement>,
    loaded: bool,
}

impl Gallery {
    pub fn new(
        images: Vec<ImageRecord>,
        config: GalleryConfig,
        ids: &mut impl IdSource,
    ) -> Result<Self> {
        config.validate()?;
        let base_id = ids.next_gallery_base();
        let handles = (0..images.len())
            .map(|i| ElementId::for_index(&base_id, i))
            .collect();
        Ok(Self {
            images,
            base_id,
            handles,
            computer: CachedLayoutComputer::with_engine(GalleryLayoutEngine::new(config)),
            placements: Vec::new(),
            loaded: false,
        })
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.computer.engine.config
    }

    pub fn handle(&self, index: usize) -> Option<&ElementId> {
        self.handles.get(index)
    }

    /// Handles in image order.
    pub fn handles(&self) -> &[ElementId] {
        &self.handles
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// First layout pass. Later calls do nothing; use [`Self::relayout`] on
    /// resize. A deferred first pass leaves the gallery unloaded.
    pub fn load(&mut self, bounds: LayoutBounds) -> Result<LayoutPass> {
        if self.loaded {
            return Ok(LayoutPass::Applied {
                rows: self.row_count(),
            });
        }
        let pass = self.relayout(bounds)?;
        self.loaded = matches!(pass, LayoutPass::Applied { .. });
        Ok(pass)
    }

    /// Recomputes placements for new host measurements.
    pub fn relayout(&mut self, bounds: LayoutBounds) -> Result<LayoutPass> {
        let result = match self.computer.compute(&self.images, bounds) {
            Ok(result) => result,
            Err(LayoutError::LayoutUnavailable { .. }) => {
                debug!(
                    gallery = %self.base_id,
                    container_width = bounds.container_width,
                    viewport_height = bounds.viewport_height,
                    "Layout deferred until the container can be measured"
                );
                return Ok(LayoutPass::Deferred);
            }
            Err(err) => return Err(err),
        };

        let config = self.config().clone();
        self.placements = result
            .rows
            .iter()
            .flat_map(|row| {
                let config = &config;
                let handles = &self.handles;
                row.items.iter().map(move |item| Placement {
                    handle: handles[item.index].clone(),
                    index: item.index,
                    row: row.row_index,
                    directive: StyleDirective::from_entry(&LayoutEntry::from(item), config),
                })
            })
            .collect();

        info!(
            gallery = %self.base_id,
            images = self.images.len(),
            rows = result.rows.len(),
            container_width = bounds.container_width,
            "Gallery laid out"
        );
        Ok(LayoutPass::Applied {
            rows: result.rows.len(),
        })
    }

    fn row_count(&self) -> usize {
        self.placements
            .last()
            .map(|p| p.row as usize + 1)
            .unwrap_or(0)
    }
}

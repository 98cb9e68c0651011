use tracing::{debug, trace};

use crate::error::{LayoutError, Result};
use crate::models::{
    FitScale, ImageRecord, RowItem, RowLayoutResult, RowModel, RowTermination, NORMALIZED_HEIGHT,
};

/// Rows may exceed `max_target_height` by up to this much when the viewport
/// cap is the tighter bound.
const VIEWPORT_CAP_SLACK: f64 = 150.0;

/// Largest container or viewport reading accepted as a pixel measurement.
const MAX_MEASURABLE_PX: f64 = u32::MAX as f64;

/// Tunables for the justified row packer.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Horizontal gap reserved on each side of an image, in pixels (default: 3)
    pub image_margin: f64,
    /// Soft cap on a row's height in pixels (default: 500)
    pub max_target_height: f64,
    /// Soft floor on a row's height in pixels (default: 375)
    pub min_target_height: f64,
    /// Row height is also capped at this fraction of the viewport (default: 0.8)
    pub max_viewport_height_fraction: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_margin: 3.0,
            max_target_height: 500.0,
            min_target_height: 375.0,
            max_viewport_height_fraction: 0.8,
        }
    }
}

impl GalleryConfig {
    pub fn with_image_margin(mut self, margin: f64) -> Self {
        self.image_margin = margin;
        self
    }

    pub fn with_target_heights(mut self, min: f64, max: f64) -> Self {
        self.min_target_height = min;
        self.max_target_height = max;
        self
    }

    pub fn with_viewport_fraction(mut self, fraction: f64) -> Self {
        self.max_viewport_height_fraction = fraction;
        self
    }

    /// Every field must be finite and non-negative. The height bounds are
    /// soft: a minimum above the maximum still lays out, with every row closed
    /// by the last-image or row-too-wide rule.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("image_margin", self.image_margin),
            ("max_target_height", self.max_target_height),
            ("min_target_height", self.min_target_height),
            ("max_viewport_height_fraction", self.max_viewport_height_fraction),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Effective upper bound on a row's height for the given viewport.
    ///
    /// The viewport cap only wins while it stays below
    /// `max_target_height + 150`; it can therefore sit above
    /// `max_target_height` on short viewports.
    pub fn row_height_cap(&self, viewport_height: f64) -> f64 {
        let viewport_cap = viewport_height * self.max_viewport_height_fraction;
        if viewport_cap < self.max_target_height + VIEWPORT_CAP_SLACK {
            viewport_cap
        } else {
            self.max_target_height
        }
    }

    /// Width available to `count` images once their margins are reserved.
    fn available_width(&self, container_width: f64, count: usize) -> i64 {
        (container_width - 2.0 * self.image_margin * count as f64).floor() as i64
    }
}

/// Host measurements a pass is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBounds {
    pub container_width: f64,
    pub viewport_height: f64,
}

impl LayoutBounds {
    pub fn new(container_width: f64, viewport_height: f64) -> Self {
        Self {
            container_width,
            viewport_height,
        }
    }

    /// False for hidden or zero-sized containers, for non-finite readings and
    /// for readings beyond the pixel range of the output sizes.
    pub fn is_measurable(&self) -> bool {
        let in_range = |v: f64| v.is_finite() && v > 0.0 && v <= MAX_MEASURABLE_PX;
        in_range(self.container_width) && in_range(self.viewport_height)
    }
}

/// A row's extent and scale without per-image sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowBreak {
    /// Start index in the images array (inclusive)
    pub start_index: usize,
    /// End index in the images array (exclusive)
    pub end_index: usize,
    pub fit_scale: FitScale,
    pub termination: RowTermination,
}

impl RowBreak {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.end_index == self.start_index
    }
}

/// Greedy justified-row packer.
///
/// Rows are grown one image at a time until the row's leading image lands in
/// the configured height band, the sequence runs out, or the leading image has
/// become too narrow for more images to help. A closed row is never revisited.
///
/// Only the leading image is consulted. Heights agree across a row because
/// every image is pre-scaled to the same height, but the row-too-wide rule can
/// still close a row below `min_target_height`.
///
/// Scaled sizes are floored from the exact ratio `available / total_width`,
/// not from a rounded float multiplier. Floating-point galleries can land 1px
/// lower on some sizes, which also decides whether a final image counts as
/// oversized (a 931x344 image alone in a 412px container fills all 406px here).
#[derive(Debug, Clone, Default)]
pub struct GalleryLayoutEngine {
    pub config: GalleryConfig,
}

impl GalleryLayoutEngine {
    pub fn new(config: GalleryConfig) -> Self {
        Self { config }
    }

    /// Computes target sizes for every image.
    ///
    /// # Errors
    /// * [`LayoutError::InvalidConfig`] for an inconsistent config
    /// * [`LayoutError::LayoutUnavailable`] when the bounds cannot be measured
    /// * [`LayoutError::InvalidDimensions`] for an image with a zero side or an
    ///   aspect ratio too extreme to survive pre-scaling
    ///
    /// An empty image list always yields an empty result.
    pub fn layout(&self, images: &[ImageRecord], bounds: LayoutBounds) -> Result<RowLayoutResult> {
        let breaks = self.compute_breaks(images, bounds)?;
        Ok(RowLayoutResult::new(
            self.rows_from_breaks(images, bounds, &breaks),
        ))
    }

    /// Partitions the images into rows.
    pub fn compute_breaks(
        &self,
        images: &[ImageRecord],
        bounds: LayoutBounds,
    ) -> Result<Vec<RowBreak>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }
        self.config.validate()?;
        if !bounds.is_measurable() {
            return Err(LayoutError::LayoutUnavailable {
                container_width: bounds.container_width,
                viewport_height: bounds.viewport_height,
            });
        }
        let normalized = normalized_widths(images)?;
        let cap = self.config.row_height_cap(bounds.viewport_height);

        let mut breaks = Vec::new();
        let mut start = 0usize;
        while start < normalized.len() {
            let brk = self.next_break(&normalized, start, bounds, cap);
            debug!(
                row = breaks.len(),
                start = brk.start_index,
                len = brk.len(),
                scale = brk.fit_scale.as_f64(),
                termination = ?brk.termination,
                "Row closed"
            );
            start = brk.end_index;
            breaks.push(brk);
        }
        Ok(breaks)
    }

    /// Grows a row from `start` until one of the acceptance rules fires.
    fn next_break(
        &self,
        normalized: &[u64],
        start: usize,
        bounds: LayoutBounds,
        cap: f64,
    ) -> RowBreak {
        let min = self.config.min_target_height;
        let lead_width = normalized[start];
        let mut total_width = 0u64;
        let mut end = start;

        loop {
            total_width += normalized[end];
            let available = self
                .config
                .available_width(bounds.container_width, end - start + 1);
            let fit_scale = FitScale::new(available, total_width);
            let lead_height = fit_scale.apply(u64::from(NORMALIZED_HEIGHT)) as f64;

            let termination = if lead_height >= min && lead_height <= cap {
                Some(RowTermination::WithinBounds)
            } else if end + 1 >= normalized.len() {
                Some(RowTermination::LastImage)
            } else if fit_scale.apply(lead_width) as f64 <= min {
                Some(RowTermination::RowTooWide)
            } else {
                None
            };

            trace!(start, end, lead_height, cap, "Row growth step");

            if let Some(termination) = termination {
                return RowBreak {
                    start_index: start,
                    end_index: end + 1,
                    fit_scale,
                    termination,
                };
            }
            end += 1;
        }
    }

    /// Builds full rows from breaks. Breaks must come from the same images,
    /// bounds and config.
    pub fn rows_from_breaks(
        &self,
        images: &[ImageRecord],
        bounds: LayoutBounds,
        breaks: &[RowBreak],
    ) -> Vec<RowModel> {
        let last_index = images.len().saturating_sub(1);
        let usable_width = bounds.container_width - 2.0 * self.config.image_margin;

        breaks
            .iter()
            .enumerate()
            .map(|(row_idx, brk)| {
                let items = images[brk.start_index..brk.end_index]
                    .iter()
                    .enumerate()
                    .map(|(offset, image)| {
                        let index = brk.start_index + offset;
                        let display_w = to_px(brk.fit_scale.apply(image.normalized_width()));
                        let display_h =
                            to_px(brk.fit_scale.apply(u64::from(NORMALIZED_HEIGHT)));
                        let oversized_singleton = brk.start_index == last_index
                            && f64::from(display_w) >= usable_width;
                        RowItem {
                            index,
                            display_w,
                            display_h,
                            oversized_singleton,
                        }
                    })
                    .collect();
                RowModel::new(
                    row_idx as u32,
                    brk.start_index,
                    brk.fit_scale,
                    brk.termination,
                    items,
                )
            })
            .collect()
    }
}

/// Lays out `images` with a throwaway engine.
pub fn layout(
    images: &[ImageRecord],
    bounds: LayoutBounds,
    config: &GalleryConfig,
) -> Result<RowLayoutResult> {
    GalleryLayoutEngine::new(config.clone()).layout(images, bounds)
}

fn normalized_widths(images: &[ImageRecord]) -> Result<Vec<u64>> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let width = image.normalized_width();
            if !image.has_valid_dimensions() || width == 0 {
                return Err(LayoutError::InvalidDimensions {
                    index,
                    width: image.width,
                    height: image.height,
                });
            }
            Ok(width)
        })
        .collect()
}

fn to_px(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Multiplier that fits a row's pre-scaled widths into the available width.
///
/// Kept as the exact ratio `available / total_width` so scaled dimensions are
/// floored with integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FitScale {
    /// Container width minus the row's margins, rounded down. May be negative
    /// when the margins alone exceed the container.
    pub available: i64,
    /// Sum of the row's pre-scaled widths. Always non-zero.
    pub total_width: u64,
}

impl FitScale {
    pub fn new(available: i64, total_width: u64) -> Self {
        debug_assert!(total_width > 0);
        Self {
            available,
            total_width,
        }
    }

    /// `floor(value * available / total_width)`, saturating at the `i64` range.
    pub fn apply(&self, value: u64) -> i64 {
        let num = i128::from(self.available) * i128::from(value);
        let scaled = num.div_euclid(i128::from(self.total_width));
        i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
    }

    pub fn as_f64(&self) -> f64 {
        self.available as f64 / self.total_width as f64
    }
}

/// Which acceptance rule closed a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowTermination {
    /// The leading image's fitted height landed inside the min/max band.
    WithinBounds,
    /// The row reached the final image of the sequence.
    LastImage,
    /// The leading image's fitted width dropped to the minimum height or
    /// below, so adding images could only make the row worse.
    RowTooWide,
}

impl RowTermination {
    pub fn is_forced(&self) -> bool {
        !matches!(self, Self::WithinBounds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowItem {
    pub index: usize,
    pub display_w: u32,
    pub display_h: u32,
    pub oversized_singleton: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub row_index: u32,
    pub start_index: usize,
    pub fit_scale: FitScale,
    pub termination: RowTermination,
    pub items: Vec<RowItem>,
}

impl RowModel {
    pub fn new(
        row_index: u32,
        start_index: usize,
        fit_scale: FitScale,
        termination: RowTermination,
        items: Vec<RowItem>,
    ) -> Self {
        Self {
            row_index,
            start_index,
            fit_scale,
            termination,
            items,
        }
    }

    /// One past the last image index in this row.
    pub fn end_index(&self) -> usize {
        self.start_index + self.items.len()
    }

    /// Height of the row's leading image, the value the acceptance test checks.
    pub fn height_px(&self) -> u32 {
        self.items.first().map(|item| item.display_h).unwrap_or(0)
    }

    pub fn total_width(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.display_w)).sum()
    }

    pub fn is_oversized_singleton(&self) -> bool {
        self.items.len() == 1 && self.items[0].oversized_singleton
    }
}

/// Final target size for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub index: usize,
    pub target_width: u32,
    pub target_height: u32,
    pub oversized_singleton: bool,
}

impl From<&RowItem> for LayoutEntry {
    fn from(item: &RowItem) -> Self {
        Self {
            index: item.index,
            target_width: item.display_w,
            target_height: item.display_h,
            oversized_singleton: item.oversized_singleton,
        }
    }
}

/// Output of one layout pass: the rows and, flattened, one entry per image in
/// input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowLayoutResult {
    pub rows: Vec<RowModel>,
}

impl RowLayoutResult {
    pub fn new(rows: Vec<RowModel>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of images covered by all rows.
    pub fn len(&self) -> usize {
        self.rows.iter().map(|row| row.items.len()).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = LayoutEntry> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.items.iter().map(LayoutEntry::from))
    }
}

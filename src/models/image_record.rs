/// Height every image is pre-scaled to before a row's fit scale is computed.
pub const NORMALIZED_HEIGHT: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub title: String,
    pub alt_text: String,
    pub source_ref: String,
    pub width: u32,
    pub height: u32,
}

impl ImageRecord {
    /// Create a record from its display metadata and natural pixel size.
    pub fn new(
        title: impl Into<String>,
        alt_text: impl Into<String>,
        width: u32,
        height: u32,
        source_ref: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            alt_text: alt_text.into(),
            source_ref: source_ref.into(),
            width,
            height,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Both dimensions are non-zero.
    pub fn has_valid_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width after scaling the image to [`NORMALIZED_HEIGHT`], rounded down.
    ///
    /// Computed from the natural size on every call, so repeated layout passes
    /// never compound rounding. Returns 0 for a zero height.
    pub fn normalized_width(&self) -> u64 {
        if self.height == 0 {
            return 0;
        }
        u64::from(self.width) * u64::from(NORMALIZED_HEIGHT) / u64::from(self.height)
    }
}

use thiserror::Error;

/// Failures surfaced by a layout pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// An image with a zero dimension cannot be scaled to the intermediate height.
    #[error("image {index} has invalid dimensions {width}x{height}")]
    InvalidDimensions { index: usize, width: u32, height: u32 },

    /// The host could not measure the container or viewport (hidden or zero-sized).
    #[error("layout unavailable: container width {container_width}, viewport height {viewport_height}")]
    LayoutUnavailable {
        container_width: f64,
        viewport_height: f64,
    },

    #[error("invalid gallery config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

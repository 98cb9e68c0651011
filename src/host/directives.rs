use std::fmt::Write;

use crate::layout::GalleryConfig;
use crate::models::LayoutEntry;

/// How the host should size one rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleDirective {
    /// Fixed pixel size from the row's fit scale.
    Sized { width: u32, height: u32 },
    /// Final image too wide to justify: cap its height, let the width follow
    /// the aspect ratio and center it on its own line.
    CenteredOversized {
        width: u32,
        height: u32,
        max_height: u32,
    },
}

impl StyleDirective {
    pub fn from_entry(entry: &LayoutEntry, config: &GalleryConfig) -> Self {
        if entry.oversized_singleton {
            Self::CenteredOversized {
                width: entry.target_width,
                height: entry.target_height,
                max_height: config.max_target_height.floor() as u32,
            }
        } else {
            Self::Sized {
                width: entry.target_width,
                height: entry.target_height,
            }
        }
    }

    /// Inline CSS declarations. The oversized form keeps the fitted width and
    /// height and overrides them, so a host that applies declarations in order
    /// ends up with the capped, centered image.
    pub fn to_inline_css(&self) -> String {
        let mut css = String::new();
        match *self {
            Self::Sized { width, height } => {
                let _ = write!(css, "width: {width}px; height: {height}px;");
            }
            Self::CenteredOversized {
                width,
                height,
                max_height,
            } => {
                let _ = write!(
                    css,
                    "width: {width}px; height: {height}px; max-height: {max_height}px; \
                     width: auto; display: block; margin: 0 auto;"
                );
            }
        }
        css
    }
}

//! Image lists for the command-line host.
//!
//! A manifest is a tab-separated text file, one image per line:
//!
//! ```text
//! title<TAB>alt text<TAB>width<TAB>height<TAB>source
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::models::ImageRecord;

const FIELD_COUNT: usize = 5;

pub fn load_manifest(path: &Path) -> Result<Vec<ImageRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let images = parse_manifest(&text)
        .with_context(|| format!("Invalid manifest {}", path.display()))?;
    debug!("Loaded {} images from {}", images.len(), path.display());
    Ok(images)
}

pub fn parse_manifest(text: &str) -> Result<Vec<ImageRecord>> {
    let mut images = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim_end_matches('\r');
        if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split('\t').collect();
        if fields.len() != FIELD_COUNT {
            bail!(
                "line {line_no}: expected {FIELD_COUNT} tab-separated fields, found {}",
                fields.len()
            );
        }

        let width = parse_dimension(fields[2], "width", line_no)?;
        let height = parse_dimension(fields[3], "height", line_no)?;
        images.push(ImageRecord::new(
            fields[0],
            fields[1],
            width,
            height,
            fields[4].trim(),
        ));
    }

    Ok(images)
}

fn parse_dimension(value: &str, name: &str, line_no: usize) -> Result<u32> {
    let parsed = value
        .trim()
        .parse::<u32>()
        .with_context(|| format!("line {line_no}: {name} {value:?} is not a whole number"))?;
    if parsed == 0 {
        bail!("line {line_no}: {name} must be greater than 0");
    }
    Ok(parsed)
}

/// The four sample photos from the project's demo page.
pub fn demo_images() -> Vec<ImageRecord> {
    vec![
        ImageRecord::new(
            "Seal (Pixabay)",
            "Seal (Pixabay)",
            960,
            720,
            "https://cdn.pixabay.com/photo/2022/09/05/10/36/grey-seal-7433843_960_720.jpg",
        ),
        ImageRecord::new(
            "Path (Pixabay)",
            "Path (Pixabay)",
            960,
            640,
            "https://cdn.pixabay.com/photo/2019/07/16/16/41/path-4342242_960_720.jpg",
        ),
        ImageRecord::new(
            "Ribblehead Viaduct (Pixabay)",
            "Ribblehead Viaduct (Pixabay)",
            960,
            355,
            "https://cdn.pixabay.com/photo/2017/06/26/08/43/ribblehead-viaduct-2443085_960_720.jpg",
        ),
        ImageRecord::new(
            "Bridge (Pixabay)",
            "Bridge (Pixabay)",
            960,
            640,
            "https://cdn.pixabay.com/photo/2013/10/09/02/26/bridge-192982_960_720.jpg",
        ),
    ]
}

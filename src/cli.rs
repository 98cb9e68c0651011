use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::layout::{GalleryConfig, LayoutBounds};

const DEFAULT_VIEWPORT_HEIGHT: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Manifest(PathBuf),
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub source: ImageSource,
    pub bounds: LayoutBounds,
    pub config: GalleryConfig,
}

pub const USAGE: &str = "usage: jgal (--manifest <file> | --demo) --width <px> \
[--viewport-height <px>] [--margin <px>] [--min-height <px>] [--max-height <px>] \
[--viewport-fraction <f>]";

/// Parses command-line arguments (without the program name).
///
/// Returns `Ok(None)` when `--help` is requested.
pub fn parse_args<I>(args: I) -> Result<Option<CliArgs>>
where
    I: IntoIterator<Item = String>,
{
    let mut manifest: Option<PathBuf> = None;
    let mut demo = false;
    let mut width: Option<f64> = None;
    let mut viewport_height = DEFAULT_VIEWPORT_HEIGHT;
    let mut config = GalleryConfig::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--demo" => demo = true,
            "--manifest" => {
                let value = args.next().context("Missing value for --manifest")?;
                manifest = Some(PathBuf::from(value));
            }
            "--width" => width = Some(number(&mut args, "--width")?),
            "--viewport-height" => viewport_height = number(&mut args, "--viewport-height")?,
            "--margin" => config.image_margin = number(&mut args, "--margin")?,
            "--min-height" => config.min_target_height = number(&mut args, "--min-height")?,
            "--max-height" => config.max_target_height = number(&mut args, "--max-height")?,
            "--viewport-fraction" => {
                config.max_viewport_height_fraction = number(&mut args, "--viewport-fraction")?
            }
            _ => {
                if manifest.is_none() && !arg.starts_with('-') {
                    manifest = Some(PathBuf::from(arg));
                } else {
                    bail!("Unrecognized argument {arg:?}\n{USAGE}");
                }
            }
        }
    }

    let source = match (manifest, demo) {
        (Some(_), true) => bail!("--manifest and --demo are mutually exclusive"),
        (Some(path), false) => ImageSource::Manifest(path),
        (None, true) => ImageSource::Demo,
        (None, false) => bail!("No images given: pass --manifest <file> or --demo\n{USAGE}"),
    };
    let width = width.context("--width <px> is required")?;
    if width <= 0.0 {
        bail!("--width must be greater than 0");
    }
    if viewport_height <= 0.0 {
        bail!("--viewport-height must be greater than 0");
    }
    config.validate().context("Invalid layout options")?;

    Ok(Some(CliArgs {
        source,
        bounds: LayoutBounds::new(width, viewport_height),
        config,
    }))
}

fn number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f64> {
    let value = args
        .next()
        .with_context(|| format!("Missing value for {flag}"))?;
    let parsed = value
        .parse::<f64>()
        .with_context(|| format!("Failed to parse {flag} value {value:?} as a number"))?;
    if !parsed.is_finite() {
        bail!("{flag} must be a finite number");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_demo_defaults() {
        let parsed = parse_args(args(&["--demo", "--width", "1200"]))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.source, ImageSource::Demo);
        assert_eq!(parsed.bounds, LayoutBounds::new(1200.0, 1000.0));
        assert_eq!(parsed.config, GalleryConfig::default());
    }

    #[test]
    fn test_manifest_and_overrides() {
        let parsed = parse_args(args(&[
            "photos.tsv",
            "--width",
            "800",
            "--viewport-height",
            "600",
            "--margin",
            "5",
            "--min-height",
            "200",
            "--max-height",
            "300",
            "--viewport-fraction",
            "0.5",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(parsed.source, ImageSource::Manifest(PathBuf::from("photos.tsv")));
        assert_eq!(parsed.bounds, LayoutBounds::new(800.0, 600.0));
        assert_eq!(parsed.config.image_margin, 5.0);
        assert_eq!(parsed.config.min_target_height, 200.0);
        assert_eq!(parsed.config.max_target_height, 300.0);
        assert_eq!(parsed.config.max_viewport_height_fraction, 0.5);
    }

    #[test]
    fn test_soft_bounds_accepted() {
        let parsed = parse_args(args(&[
            "--demo",
            "--width",
            "100",
            "--min-height",
            "900",
            "--viewport-fraction",
            "1.2",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(parsed.config.min_target_height, 900.0);
        assert_eq!(parsed.config.max_viewport_height_fraction, 1.2);
    }

    #[test]
    fn test_help() {
        assert!(parse_args(args(&["--help"])).unwrap().is_none());
    }

    #[test]
    fn test_missing_width() {
        let err = parse_args(args(&["--demo"])).unwrap_err();
        assert!(err.to_string().contains("--width"));
    }

    #[test]
    fn test_missing_source() {
        assert!(parse_args(args(&["--width", "100"])).is_err());
        assert!(parse_args(args(&["--demo", "--manifest", "a.tsv", "--width", "100"])).is_err());
    }

    #[test]
    fn test_bad_numbers() {
        assert!(parse_args(args(&["--demo", "--width", "wide"])).is_err());
        assert!(parse_args(args(&["--demo", "--width", "-4"])).is_err());
        assert!(parse_args(args(&["--demo", "--width", "100", "--margin", "-1"])).is_err());
        assert!(parse_args(args(&["--demo", "--width", "100", "--max-height", "inf"])).is_err());
        assert!(parse_args(args(&["--demo", "--width"])).is_err());
    }
}

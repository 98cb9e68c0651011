use std::env;

use anyhow::{Context, Result};
use tracing::warn;

use jgal::cli::{self, ImageSource};
use jgal::manifest;
use jgal::{Gallery, LayoutPass, SequentialIds};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jgal=info".parse().context("Invalid log directive")?),
        )
        .init();

    let Some(args) = cli::parse_args(env::args().skip(1))? else {
        println!("{}", cli::USAGE);
        return Ok(());
    };

    let images = match &args.source {
        ImageSource::Manifest(path) => manifest::load_manifest(path)?,
        ImageSource::Demo => manifest::demo_images(),
    };

    let mut ids = SequentialIds::default();
    let mut gallery = Gallery::new(images, args.config, &mut ids)?;

    match gallery.load(args.bounds)? {
        LayoutPass::Applied { .. } => {}
        LayoutPass::Deferred => {
            warn!("Container could not be measured; nothing to lay out");
            return Ok(());
        }
    }

    for placement in gallery.placements() {
        let image = &gallery.images()[placement.index];
        println!(
            "{}\trow {}\t{}\t{}",
            placement.handle,
            placement.row,
            placement.directive.to_inline_css(),
            image.title()
        );
    }

    Ok(())
}

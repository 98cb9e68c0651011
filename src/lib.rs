//! Justified gallery layout.
//!
//! Packs images into rows that exactly fill a container's width, scaling each
//! row uniformly so its height stays within a configurable band.
//!
//! - [`mod@layout`]: the greedy row packer and a cache of row breaks
//! - [`models`]: image records and layout results
//! - [`host`]: element handles, style directives and a relayout-aware [`Gallery`]
//! - [`manifest`], [`cli`]: inputs for the `jgal` binary

pub mod cli;
pub mod error;
pub mod host;
pub mod layout;
pub mod manifest;
pub mod models;

pub use error::{LayoutError, Result};
pub use host::{ElementId, Gallery, IdSource, LayoutPass, Placement, SequentialIds, StyleDirective};
pub use layout::{layout, GalleryConfig, GalleryLayoutEngine, LayoutBounds};
pub use models::{ImageRecord, LayoutEntry, RowLayoutResult};

//! Glue between layout results and whatever renders the gallery.
//!
//! The core never looks elements up by name: every image gets an explicit
//! [`ElementId`] up front and placements carry it back out.

pub mod directives;
pub mod gallery;
pub mod ids;

pub use directives::StyleDirective;
pub use gallery::{Gallery, LayoutPass, Placement};
pub use ids::{ElementId, IdSource, SequentialIds};

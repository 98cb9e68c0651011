pub mod justified;
pub mod layout_cache;

pub use justified::{layout, GalleryConfig, GalleryLayoutEngine, LayoutBounds, RowBreak};
pub use layout_cache::{CachedLayoutComputer, LayoutCache};

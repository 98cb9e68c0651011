pub mod image_record;
pub mod row_model;

pub use image_record::*;
pub use row_model::*;

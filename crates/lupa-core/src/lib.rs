pub mod analyze;
pub mod capture;
pub mod error;
pub mod filters;
pub mod frame;
pub mod geometry;
pub mod image_io;
pub mod params;
pub mod pipeline;
pub mod render;

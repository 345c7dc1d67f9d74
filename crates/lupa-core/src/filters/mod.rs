pub mod blur;
pub mod edges;
pub mod equalize;
pub mod laplacian;
pub mod levels;
pub mod threshold;
pub mod zoom;

mod convolve;

pub use convolve::convolve_separable;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LupaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Device property write rejected: {0}")]
    PropertySetFailure(String),

    #[error("Invalid ROI: {0}")]
    InvalidRoi(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, LupaError>;

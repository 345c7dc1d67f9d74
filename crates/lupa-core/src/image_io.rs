use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, Rgb};
use ndarray::Array2;

use crate::error::Result;
use crate::frame::{ColorFrame, Frame};

/// Load a raster image (PNG/JPEG/BMP) into a ColorFrame.
pub fn load_color_image(path: &Path) -> Result<ColorFrame> {
    let img = image::open(path)?;
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();

    let mut red = Array2::<f32>::zeros((h as usize, w as usize));
    let mut green = Array2::<f32>::zeros((h as usize, w as usize));
    let mut blue = Array2::<f32>::zeros((h as usize, w as usize));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = rgb.get_pixel(col as u32, row as u32);
            red[[row, col]] = pixel.0[0] as f32 / 255.0;
            green[[row, col]] = pixel.0[1] as f32 / 255.0;
            blue[[row, col]] = pixel.0[2] as f32 / 255.0;
        }
    }

    Ok(ColorFrame {
        red: Frame::new(red, 8),
        green: Frame::new(green, 8),
        blue: Frame::new(blue, 8),
    })
}

/// Save a ColorFrame as 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) -> Result<()> {
    let h = color.height();
    let w = color.width();

    let mut img = image::RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let r = (color.red.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            let g = (color.green.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            let b = (color.blue.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Rgb([r, g, b]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a single plane as 8-bit grayscale PNG.
pub fn save_gray_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

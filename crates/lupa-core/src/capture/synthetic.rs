use ndarray::Array2;

use crate::capture::source::{CaptureDevice, DeviceProperty};
use crate::error::Result;
use crate::frame::{ColorFrame, Frame};

/// Deterministic test-pattern camera: drifting vertical intensity
/// bands plus two orbiting bright spots. Lets camera mode run (and be
/// tested) without hardware.
pub struct SyntheticCamera {
    width: usize,
    height: usize,
    tick: u64,
    focus: f64,
}

impl SyntheticCamera {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tick: 0,
            focus: 0.0,
        }
    }

    fn render(&self) -> Frame {
        let phase = self.tick as f32 * 0.08;
        // Focus acts as a softness factor on the band contrast.
        let sharpness = 1.0 / (1.0 + self.focus as f32 / 64.0);

        let spot_a = self.spot_center(phase);
        let spot_b = self.spot_center(phase + std::f32::consts::PI);

        let data = Array2::from_shape_fn((self.height, self.width), |(row, col)| {
            let bands =
                0.35 + 0.3 * sharpness * ((col as f32 * 0.12 + phase).sin() * 0.5 + 0.5);
            let spots = gaussian_spot(row, col, spot_a) + gaussian_spot(row, col, spot_b);
            (bands + spots).clamp(0.0, 1.0)
        });
        Frame::new(data, 8)
    }

    fn spot_center(&self, phase: f32) -> (f32, f32) {
        let cy = self.height as f32 / 2.0;
        let cx = self.width as f32 / 2.0;
        let radius = cx.min(cy) * 0.5;
        (cy + radius * phase.sin(), cx + radius * phase.cos())
    }
}

fn gaussian_spot(row: usize, col: usize, center: (f32, f32)) -> f32 {
    let dy = row as f32 - center.0;
    let dx = col as f32 - center.1;
    0.5 * (-(dx * dx + dy * dy) / 60.0).exp()
}

impl CaptureDevice for SyntheticCamera {
    fn read(&mut self) -> Result<Option<ColorFrame>> {
        let plane = self.render();
        self.tick += 1;
        // Tint the channels slightly so channel-order handling is visible.
        let red = Frame::new(plane.data.mapv(|v| (v * 1.0).min(1.0)), 8);
        let green = Frame::new(plane.data.mapv(|v| (v * 0.9).min(1.0)), 8);
        let blue = Frame::new(plane.data.mapv(|v| (v * 0.8).min(1.0)), 8);
        Ok(Some(ColorFrame { red, green, blue }))
    }

    fn set_property(&mut self, prop: DeviceProperty, value: f64) -> Result<()> {
        match prop {
            DeviceProperty::Focus => {
                self.focus = value;
                Ok(())
            }
            DeviceProperty::Exposure => Err(crate::error::LupaError::PropertySetFailure(
                "synthetic camera has no exposure control".into(),
            )),
        }
    }
}

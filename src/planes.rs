// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes the relationship
//! between the pixel canvas (an integral plane with its origin at the
//! top-left corner) and the rectangular region of the complex plane
//! that the canvas depicts.

use num::Complex;

use crate::errors::ConfigError;

/// A rectangular window onto the complex plane, together with the
/// pixel resolution it is rendered at.  `x_start`/`y_start` name the
/// lower-left corner of the window, and `x_step`/`y_step` give the
/// size of one pixel in complex units.  A viewport is immutable once
/// built; a generation job holds it by value for its whole run.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    /// Real part of the lower-left corner of the window.
    pub x_start: f64,
    /// Imaginary part of the lower-left corner of the window.
    pub y_start: f64,
    /// Width of one pixel in complex units.
    pub x_step: f64,
    /// Height of one pixel in complex units.
    pub y_step: f64,
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
}

impl Viewport {
    /// Raw constructor taking explicit step sizes.  Rejects a
    /// zero-area canvas, which would leave the mapping undefined.
    pub fn new(
        x_start: f64,
        y_start: f64,
        x_step: f64,
        y_step: f64,
        width: usize,
        height: usize,
    ) -> Result<Viewport, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }
        Ok(Viewport {
            x_start,
            y_start,
            x_step,
            y_step,
            width,
            height,
        })
    }

    /// Builds a viewport from the lower-left corner and the height of
    /// the window in complex units.  The window's width is derived
    /// from the canvas aspect ratio, so a pixel covers the same span
    /// horizontally and vertically and the image is not distorted.
    pub fn from_region(
        width: usize,
        height: usize,
        x_start: f64,
        y_start: f64,
        complex_height: f64,
    ) -> Result<Viewport, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }
        let aspect_ratio = (width as f64) / (height as f64);
        let complex_width = aspect_ratio * complex_height;
        Ok(Viewport {
            x_start,
            y_start,
            x_step: complex_width / (width as f64),
            y_step: complex_height / (height as f64),
            width,
            height,
        })
    }

    /// Given the column and row of a pixel, return the complex number
    /// at the corresponding location in the window.  Pixel row 0 is
    /// the top of the canvas, but the top of the window has the
    /// largest imaginary part, so the row index is inverted.  The
    /// caller is responsible for keeping `px` and `py` on the canvas.
    pub fn pixel_to_point(&self, px: usize, py: usize) -> Complex<f64> {
        Complex {
            re: self.x_start + (px as f64) * self.x_step,
            im: self.y_start + ((self.height - py - 1) as f64) * self.y_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_empty_canvas() {
        assert!(Viewport::new(0.0, 0.0, 1.0, 1.0, 0, 5).is_err());
        assert!(Viewport::new(0.0, 0.0, 1.0, 1.0, 5, 0).is_err());
        assert!(Viewport::from_region(0, 480, -2.0, -1.0, 2.0).is_err());
    }

    #[test]
    fn viewport_passes_on_good_shape() {
        assert!(Viewport::new(-1.0, -1.0, 1.0, 1.0, 2, 2).is_ok());
        assert!(Viewport::from_region(640, 480, -2.0, -1.0, 2.0).is_ok());
    }

    #[test]
    fn from_region_maps_pixels_isotropically() {
        let vp = Viewport::from_region(800, 400, -2.0, -1.0, 2.0).unwrap();
        assert!((vp.x_step - vp.y_step).abs() < 1e-12);
        assert!((vp.x_step - 0.005).abs() < 1e-12);
    }

    #[test]
    fn rows_are_inverted() {
        let vp = Viewport::new(-1.0, -1.0, 1.0, 1.0, 2, 2).unwrap();
        // Row 0 is the top of the canvas and carries the larger
        // imaginary part.
        assert_eq!(vp.pixel_to_point(0, 0), Complex::new(-1.0, 0.0));
        assert_eq!(vp.pixel_to_point(0, 1), Complex::new(-1.0, -1.0));
        assert_eq!(vp.pixel_to_point(1, 0), Complex::new(0.0, 0.0));
    }

    #[test]
    fn corners_map_to_window_corners() {
        let vp = Viewport::from_region(4, 4, -2.0, -2.0, 4.0).unwrap();
        assert_eq!(vp.pixel_to_point(0, 3), Complex::new(-2.0, -2.0));
        assert_eq!(vp.pixel_to_point(0, 0), Complex::new(-2.0, 1.0));
        assert_eq!(vp.pixel_to_point(3, 3), Complex::new(1.0, -2.0));
    }
}

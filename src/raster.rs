// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The raster buffer that generation writes into and the display
//! consumer reads from.
//!
//! The buffer is the only shared mutable state in the crate, and it
//! is shared without a single lock.  The caller owns it between
//! generations.  During a generation the scheduler carves the cell
//! vector into disjoint row slices with `split_at_mut`, one per
//! worker, so exclusive write access per pixel is proven by the
//! borrow checker rather than enforced at runtime.

use crate::palette::BACKGROUND;

/// A width × height grid of packed ARGB cells, row-major, row 0 at
/// the top of the canvas.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl RasterBuffer {
    /// Allocate a buffer cleared to the background color.  Dimensions
    /// are fixed for the life of the buffer.
    pub fn new(width: usize, height: usize) -> RasterBuffer {
        RasterBuffer {
            width,
            height,
            cells: vec![BACKGROUND; width * height],
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Canvas dimensions as a pair.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Read one cell.  Panics if the coordinates are off the canvas.
    pub fn read(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height);
        self.cells[y * self.width + x]
    }

    /// Reset every cell to the background color.  Contents only; the
    /// dimensions never change.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = BACKGROUND;
        }
    }

    /// The whole grid as one row-major slice, for encoding or for
    /// carving into per-worker tiles.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Mutable view of the whole grid, handed to the scheduler to be
    /// split into disjoint row ranges.
    pub fn cells_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }

    /// Flatten the grid to 8-bit RGB triples for an image encoder,
    /// dropping the alpha channel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.cells.len() * 3);
        for cell in &self.cells {
            bytes.push((cell >> 16) as u8);
            bytes.push((cell >> 8) as u8);
            bytes.push(*cell as u8);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_background() {
        let buffer = RasterBuffer::new(4, 3);
        assert_eq!(buffer.dimensions(), (4, 3));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(buffer.read(x, y), BACKGROUND);
            }
        }
    }

    #[test]
    fn clear_resets_contents_but_not_dimensions() {
        let mut buffer = RasterBuffer::new(2, 2);
        buffer.cells_mut()[3] = 0xffff_ff00;
        assert_eq!(buffer.read(1, 1), 0xffff_ff00);
        buffer.clear();
        assert_eq!(buffer.read(1, 1), BACKGROUND);
        assert_eq!(buffer.dimensions(), (2, 2));
    }

    #[test]
    fn rgb_bytes_drop_alpha_in_row_major_order() {
        let mut buffer = RasterBuffer::new(2, 1);
        buffer.cells_mut()[0] = 0xff85_c1c8;
        buffer.cells_mut()[1] = 0xffff_ff00;
        assert_eq!(
            buffer.to_rgb_bytes(),
            vec![0x85, 0xc1, 0xc8, 0xff, 0xff, 0x00]
        );
    }
}

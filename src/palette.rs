// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps escape-time counts to packed ARGB colors.  Colors are plain
//! `u32` words so a pixel write is always a single store: a reader
//! racing a writer may see a stale color, never a torn one.

/// The color of a bounded point (and of a cleared buffer).
pub const BACKGROUND: u32 = 0xff00_0000;

/// The number of iterations that corresponds to the end of the color
/// scale; counts at or beyond this all clamp to the last palette entry.
pub const COLOR_SCALE_ITERATIONS: u32 = 20;

/// The color scale, teal through red to yellow, packed ARGB.
pub const PALETTE: [u32; 13] = [
    0xff85_c1c8,
    0xff90_a1be,
    0xff9c_8184,
    0xffa7_61aa,
    0xffaf_4980,
    0xffb8_3055,
    0xffc0_182a,
    0xffc8_0000,
    0xffd3_3300,
    0xffde_6600,
    0xffe9_9900,
    0xfff4_cc00,
    0xffff_ff00,
];

/// Pick the color for an escape count.  Zero means the point never
/// escaped and gets the background; otherwise the count is scaled so
/// that `COLOR_SCALE_ITERATIONS` spans the whole palette, clamping at
/// the final entry.
pub fn color_for(iterations: u32) -> u32 {
    if iterations == 0 {
        return BACKGROUND;
    }
    let fraction = (f64::from(iterations) / f64::from(COLOR_SCALE_ITERATIONS)) * PALETTE.len() as f64;
    let index = (fraction as usize).min(PALETTE.len() - 1);
    PALETTE[index]
}

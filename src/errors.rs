// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Configuration error types.
//!
//! Everything inside a running generation is total arithmetic with
//! bounded loops, so the only failures this crate can produce are
//! caller misconfigurations, caught before any worker is spawned.

use thiserror::Error;

/// A generation request that can never run.  Reported synchronously
/// from job construction or `generate`; the raster buffer is left
/// untouched when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The canvas has no pixels to render.
    #[error("canvas must have nonzero area, got {width}x{height}")]
    EmptyCanvas {
        /// Requested canvas width.
        width: usize,
        /// Requested canvas height.
        height: usize,
    },

    /// Fewer than one worker was requested.
    #[error("thread count must be at least 1, got {0}")]
    InvalidThreadCount(usize),

    /// An iteration cap of zero would classify every point as bounded.
    #[error("iteration cap must be at least 1")]
    InvalidIterationCap,

    /// The viewport and the raster buffer disagree about resolution.
    #[error("viewport is {viewport_width}x{viewport_height} but buffer is {buffer_width}x{buffer_height}")]
    DimensionMismatch {
        /// Width the viewport was built for.
        viewport_width: usize,
        /// Height the viewport was built for.
        viewport_height: usize,
        /// Width of the buffer handed to `generate`.
        buffer_width: usize,
        /// Height of the buffer handed to `generate`.
        buffer_height: usize,
    },
}

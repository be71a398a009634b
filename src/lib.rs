#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parallel Mandelbrot renderer
//!
//! The Mandelbrot set lives on the complex plane: take a point c,
//! repeatedly square-and-add it to itself, and watch whether the
//! result stays near the origin or flies off to infinity.  The
//! number of iterations a point survives is its "escape time", and
//! painting escape times through a color scale produces the familiar
//! image.
//!
//! Every pixel is independent of every other, which makes the
//! problem pleasantly parallel.  This crate leans on that: the
//! canvas is split into contiguous bands of rows, one band per
//! worker thread, and each worker writes its band through an
//! exclusive mutable slice of the shared raster.  The bands never
//! overlap, so the workers need no locks at all; the borrow checker
//! is the whole synchronization story.  Completion (and an optional
//! per-band progress hint) is reported back to listeners on the
//! calling thread once the workers have joined.

pub mod errors;
pub mod escape;
pub mod generator;
pub mod palette;
pub mod planes;
pub mod raster;

pub use errors::ConfigError;
pub use generator::{partition_rows, GenerationJob, GenerationListener, Generator};
pub use planes::Viewport;
pub use raster::RasterBuffer;

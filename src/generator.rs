// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The generation scheduler: validates a job, partitions the canvas
//! into disjoint row tiles, renders one tile per worker thread, and
//! reports completion to registered listeners.
//!
//! There are no locks here.  Each worker receives a mutable slice of
//! the raster covering exactly its rows, carved off the buffer with
//! `split_at_mut` before the threads start, so no two workers can
//! ever write the same cell.  Workers report back over a channel
//! drained on the caller's thread, which is where every listener
//! callback runs.

use std::ops::Range;
use std::time::Instant;

use crossbeam::channel;
use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::escape::escape_time;
use crate::palette::color_for;
use crate::planes::Viewport;
use crate::raster::RasterBuffer;

/// Receives generation events.  Callbacks are always invoked on the
/// thread that called `generate`, never on a worker, so a listener
/// may hand the buffer straight to a display surface.
pub trait GenerationListener {
    /// All tiles are done and the buffer holds the final image.
    /// Fired exactly once per generation, after every worker has
    /// joined, with the wall-clock seconds the generation took.
    fn image_complete(&mut self, seconds: f64);

    /// One tile finished.  A coarse progress hint; the default does
    /// nothing.
    fn tile_complete(&mut self) {}
}

/// A validated request to render one image.  Single-use: `generate`
/// consumes the job, so re-rendering means building a fresh one.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    viewport: Viewport,
    max_iterations: u32,
    thread_count: usize,
}

impl GenerationJob {
    /// Validate a generation request.  Fails fast on a zero thread
    /// count or a zero iteration cap; nothing is spawned and nothing
    /// is written before validation passes.
    pub fn new(
        viewport: Viewport,
        max_iterations: u32,
        thread_count: usize,
    ) -> Result<GenerationJob, ConfigError> {
        if thread_count < 1 {
            return Err(ConfigError::InvalidThreadCount(thread_count));
        }
        if max_iterations < 1 {
            return Err(ConfigError::InvalidIterationCap);
        }
        Ok(GenerationJob {
            viewport,
            max_iterations,
            thread_count,
        })
    }

    /// The viewport this job renders.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The iteration cap for the escape-time loop.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The number of worker threads the canvas is split across.
    pub fn thread_count(&self) -> usize {
        self.thread_count
    }
}

/// Split `[0, height)` into `workers` contiguous half-open row
/// ranges.  Remainder rows go to the earliest tiles, one extra row
/// each, so tile sizes differ by at most one; together the tiles
/// cover every row exactly once.  Workers beyond the row count get
/// empty tiles.  `workers` must be at least 1.
pub fn partition_rows(height: usize, workers: usize) -> Vec<Range<usize>> {
    let base = height / workers;
    let remainder = height % workers;
    let mut tiles = Vec::with_capacity(workers);
    let mut start = 0;
    for k in 0..workers {
        let rows = base + if k < remainder { 1 } else { 0 };
        tiles.push(start..start + rows);
        start += rows;
    }
    tiles
}

/// Render one tile into its slice of the raster.  `cells` holds
/// exactly the tile's rows, row-major, starting at `rows.start`.
fn render_tile(viewport: &Viewport, max_iterations: u32, rows: Range<usize>, cells: &mut [u32]) {
    let width = viewport.width;
    for (i, py) in rows.enumerate() {
        let row = &mut cells[i * width..(i + 1) * width];
        for (px, cell) in row.iter_mut().enumerate() {
            let c = viewport.pixel_to_point(px, py);
            *cell = color_for(escape_time(c, max_iterations));
        }
    }
}

/// Runs generation jobs against a raster buffer and keeps the set of
/// listeners to notify.  Listeners are expected to be registered
/// before `generate` is called.
#[derive(Default)]
pub struct Generator {
    listeners: Vec<Box<dyn GenerationListener>>,
}

impl Generator {
    /// A generator with no listeners.
    pub fn new() -> Generator {
        Generator {
            listeners: Vec::new(),
        }
    }

    /// Register a listener for generation events.  Listeners are
    /// invoked in registration order.
    pub fn add_listener(&mut self, listener: Box<dyn GenerationListener>) {
        self.listeners.push(listener);
    }

    /// Render the job's viewport into `buffer`, blocking until every
    /// worker has finished, and return the elapsed wall-clock
    /// seconds.
    ///
    /// The buffer is cleared before any worker starts, every pixel
    /// write happens before the workers join, and the join happens
    /// before any completion callback, so a listener reading the
    /// buffer from `image_complete` sees the finished image.
    ///
    /// A dimension mismatch between viewport and buffer is reported
    /// before any thread is spawned and leaves the buffer untouched.
    /// Once the workers launch there is no cancellation; the call
    /// always runs to completion.
    pub fn generate(
        &mut self,
        job: GenerationJob,
        buffer: &mut RasterBuffer,
    ) -> Result<f64, ConfigError> {
        let viewport = job.viewport;
        if (viewport.width, viewport.height) != buffer.dimensions() {
            return Err(ConfigError::DimensionMismatch {
                viewport_width: viewport.width,
                viewport_height: viewport.height,
                buffer_width: buffer.width(),
                buffer_height: buffer.height(),
            });
        }

        buffer.clear();
        let started = Instant::now();

        let width = viewport.width;
        let max_iterations = job.max_iterations;
        let tiles = partition_rows(viewport.height, job.thread_count);
        debug!(
            tiles = tiles.len(),
            width = width,
            height = viewport.height,
            max_iterations = max_iterations,
            "starting generation"
        );

        // Carve the raster into one disjoint band of rows per tile.
        // Tiles are not all the same size, so this is a running
        // split_at_mut rather than chunks_mut.
        let mut bands: Vec<(Range<usize>, &mut [u32])> = Vec::with_capacity(tiles.len());
        let mut rest = buffer.cells_mut();
        for tile in &tiles {
            let (cells, tail) = std::mem::take(&mut rest).split_at_mut(tile.len() * width);
            bands.push((tile.clone(), cells));
            rest = tail;
        }
        debug_assert!(rest.is_empty());

        let (done_tx, done_rx) = channel::unbounded::<usize>();
        let listeners = &mut self.listeners;
        crossbeam::scope(|spawner| {
            for (tile, cells) in bands.into_iter() {
                let done_tx = done_tx.clone();
                spawner.spawn(move |_| {
                    let row_start = tile.start;
                    render_tile(&viewport, max_iterations, tile, cells);
                    // The send is the last thing a worker does, so a
                    // received tile is a fully written tile.
                    let _ = done_tx.send(row_start);
                });
            }
            drop(done_tx);

            // Drain completions here, on the caller's thread, so the
            // per-tile hint never fires on a worker.  The loop ends
            // when the last worker drops its sender.
            for row_start in done_rx.iter() {
                debug!(row_start = row_start, "tile complete");
                for listener in listeners.iter_mut() {
                    listener.tile_complete();
                }
            }
        })
        .unwrap();

        let elapsed = started.elapsed().as_secs_f64();
        info!(seconds = elapsed, "generation complete");
        for listener in self.listeners.iter_mut() {
            listener.image_complete(elapsed);
        }
        Ok(elapsed)
    }
}

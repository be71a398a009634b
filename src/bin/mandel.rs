// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line consumer of the generation engine: renders one
//! Mandelbrot image and writes it to a binary PPM file.

use clap::{App, Arg, ArgMatches};
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use mandelbrot::{GenerationJob, GenerationListener, Generator, RasterBuffer, Viewport};

/// Given a string and a separator, returns the two values separated
/// by the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ORIGIN: &str = "origin";
const HEIGHT: &str = "height";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Parallel Mandelbrot set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (binary PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ORIGIN)
                .required(false)
                .long(ORIGIN)
                .takes_value(true)
                .default_value("-2.0,-1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse viewport origin"))
                .help("Lower-left corner of the viewport in the complex plane"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .required(false)
                .long(HEIGHT)
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| match f64::from_str(&s) {
                    Ok(h) if h > 0.0 => Ok(()),
                    Ok(_) => Err("Viewport height must be positive".to_string()),
                    Err(_) => Err("Could not parse viewport height".to_string()),
                })
                .help("Height of the viewport in complex units (width follows the aspect ratio)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 1024",
                    )
                })
                .help("Number of worker threads (defaults to the CPU count)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("6000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Escape-time iteration cap"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}

/// Logs a line per finished band so long renders show signs of life.
struct ProgressReporter {
    tiles_done: usize,
    tiles_total: usize,
}

impl GenerationListener for ProgressReporter {
    fn image_complete(&mut self, seconds: f64) {
        tracing::info!(seconds = seconds, "image complete");
    }

    fn tile_complete(&mut self) {
        self.tiles_done += 1;
        tracing::debug!(
            done = self.tiles_done,
            total = self.tiles_total,
            "band finished"
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let matches = args();

    let image_size: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let origin: (f64, f64) =
        parse_pair(matches.value_of(ORIGIN).unwrap(), ',').expect("Error parsing viewport origin");
    let complex_height =
        f64::from_str(matches.value_of(HEIGHT).unwrap()).expect("Error parsing viewport height");
    let threads = match matches.value_of(THREADS) {
        Some(s) => usize::from_str(s).expect("Could not parse thread count"),
        None => num_cpus::get(),
    };
    let iterations =
        u32::from_str(matches.value_of(ITERATIONS).unwrap()).expect("Could not parse iteration count");

    let (width, height) = image_size;
    let job = Viewport::from_region(width, height, origin.0, origin.1, complex_height)
        .and_then(|viewport| GenerationJob::new(viewport, iterations, threads));
    let job = match job {
        Ok(job) => job,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut buffer = RasterBuffer::new(width, height);
    let mut generator = Generator::new();
    generator.add_listener(Box::new(ProgressReporter {
        tiles_done: 0,
        tiles_total: threads,
    }));

    match generator.generate(job, &mut buffer) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(seconds) => {
            println!("Rendered {}x{} in {:.3}s on {} threads", width, height, seconds, threads);
        }
    }

    if let Err(e) = write_image(
        matches.value_of(OUTPUT).unwrap(),
        &buffer.to_rgb_bytes(),
        buffer.dimensions(),
    ) {
        eprintln!("Could not write image: {}", e);
        std::process::exit(1);
    }
}

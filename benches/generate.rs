// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::{criterion_group, criterion_main, Criterion};

use mandelbrot::{GenerationJob, Generator, RasterBuffer, Viewport};

fn generate_with_threads(threads: usize) {
    let viewport = Viewport::from_region(320, 240, -2.0, -1.0, 2.0).unwrap();
    let job = GenerationJob::new(viewport, 500, threads).unwrap();
    let mut buffer = RasterBuffer::new(320, 240);
    Generator::new().generate(job, &mut buffer).unwrap();
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate 320x240 single thread", |b| {
        b.iter(|| generate_with_threads(1))
    });
    c.bench_function("generate 320x240 four threads", |b| {
        b.iter(|| generate_with_threads(4))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration at the heart of the Mandelbrot set: how
//! many applications of `z ← z² + c` does a point survive before its
//! magnitude exceeds 2?

use num::Complex;

/// Square of the escape radius.  Comparing `|z|²` against this avoids
/// a square root per iteration.
const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Iterate `z ← z² + c` starting from zero, up to `max_iterations`
/// times.  Returns the 1-based iteration at which `|z|²` first
/// exceeded 4.0, or 0 if the point never escaped within the cap
/// (a bounded point, conventionally part of the set).
///
/// Pure and total: no shared state, safe to call from any number of
/// worker threads at once.
pub fn escape_time(c: Complex<f64>, max_iterations: u32) -> u32 {
    let mut z = Complex::new(0.0, 0.0);
    let mut iterations = 0;
    while iterations < max_iterations && z.norm_sqr() <= ESCAPE_RADIUS_SQUARED {
        z = z * z + c;
        iterations += 1;
    }
    if z.norm_sqr() <= ESCAPE_RADIUS_SQUARED {
        0
    } else {
        iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 1000), 0);
    }

    #[test]
    fn minus_one_cycles_forever() {
        // z orbits between 0 and -1 with |z|² never above 1, so the
        // cap is reached and the point is classified as bounded.
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 10), 0);
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 100_000), 0);
    }

    #[test]
    fn far_point_escapes_on_first_iteration() {
        // c = 3 gives z = 3 immediately, |z|² = 9 > 4.
        assert_eq!(escape_time(Complex::new(3.0, 0.0), 10), 1);
        assert_eq!(escape_time(Complex::new(3.0, 0.0), 1), 1);
    }

    #[test]
    fn result_is_bounded_by_the_cap() {
        for &(re, im) in &[(-0.75, 0.1), (0.3, 0.5), (-1.25, 0.0), (0.0, 1.1)] {
            let n = escape_time(Complex::new(re, im), 50);
            assert!(n <= 50, "escape_time({}, {}) returned {}", re, im, n);
        }
    }

    #[test]
    fn known_divergent_points_escape_quickly() {
        for &(re, im) in &[(2.5, 0.0), (0.0, -3.0), (2.0, 2.0), (-2.1, 1.4)] {
            let n = escape_time(Complex::new(re, im), 1000);
            assert!(n >= 1 && n <= 3, "({}, {}) took {} iterations", re, im, n);
        }
    }
}

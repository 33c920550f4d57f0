//! Injected capabilities: the current-location sensor and randomness.
//!
//! The real location sensor (and its permission prompting) belongs to the
//! host app; the core only ever pulls an optional coordinate through
//! [`LocationProvider`]. Randomness goes through [`RandomSource`] so
//! pick-one behavior is deterministic under test.

use rand::Rng;

use crate::geo::Coordinate;

/// Pull interface over whatever location sensor the host wires in.
pub trait LocationProvider {
    /// The most recent known position, if any.
    fn current_coordinate(&self) -> Option<Coordinate>;
}

/// A provider with a fixed answer. Useful for tests and for hosts that
/// resolve the position once up front.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Option<Coordinate>);

impl LocationProvider for FixedLocation {
    fn current_coordinate(&self) -> Option<Coordinate> {
        self.0
    }
}

/// Source of uniform random indices for pick-one selection.
pub trait RandomSource {
    /// A uniform index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_location_returns_its_coordinate() {
        let here = Coordinate::new(50.0, 14.0);
        assert_eq!(FixedLocation(Some(here)).current_coordinate(), Some(here));
        assert_eq!(FixedLocation(None).current_coordinate(), None);
    }

    #[test]
    fn thread_rng_source_stays_in_bounds() {
        let mut source = ThreadRngSource;
        for _ in 0..100 {
            assert!(source.pick_index(3) < 3);
        }
        assert_eq!(source.pick_index(1), 0);
    }
}

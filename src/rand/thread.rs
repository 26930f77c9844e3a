use crate::rand::{RandBytes, RandSource};
use rand::{Rng, rng};

/// A random source backed by the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it simply
/// accesses the thread-local generator on each call, which is why this
/// zero-sized wrapper is freely shareable across threads even though the
/// underlying `ThreadRng` is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u8> for ThreadRandom {
    fn rand(&self) -> u8 {
        rng().random()
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

impl RandBytes for ThreadRandom {
    fn fill(&self, buf: &mut [u8]) {
        rng().fill(buf);
    }
}

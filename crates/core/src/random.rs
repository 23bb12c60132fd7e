//! Small helpers over the per-match `ChaCha8Rng`.
//! All engine randomness flows through these so a seed fully determines a match.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

pub(crate) fn pick_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0, "cannot pick from an empty range");
    (rng.next_u64() % len as u64) as usize
}

/// Fisher-Yates shuffle.
pub(crate) fn shuffle<T>(rng: &mut ChaCha8Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = pick_index(rng, i + 1);
        items.swap(i, j);
    }
}

/// Picks `count` distinct elements in random order. Returns fewer when the pool is smaller.
pub(crate) fn sample<T: Copy>(rng: &mut ChaCha8Rng, pool: &[T], count: usize) -> Vec<T> {
    let mut pool = pool.to_vec();
    let count = count.min(pool.len());
    for i in 0..count {
        let j = i + pick_index(rng, pool.len() - i);
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}

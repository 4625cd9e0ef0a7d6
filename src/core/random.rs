/// Random selection primitives.
///
/// Every function takes the random source explicitly so callers can pass
/// a seeded `StdRng` for reproducible output.
use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one item uniformly. Returns `None` for an empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.gen_range(0..items.len())])
}

/// Pick one item with probability proportional to `weight(item)`.
///
/// Falls back to the first item when the weights cannot form a
/// distribution (all zero, negative, or NaN).
pub fn pick_weighted<'a, T, R, F>(items: &'a [T], weight: F, rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return None;
    }
    let weights: Vec<f64> = items.iter().map(&weight).collect();
    match WeightedIndex::new(&weights) {
        Ok(dist) => Some(&items[dist.sample(rng)]),
        Err(_) => items.first(),
    }
}

/// Draw `count` distinct items uniformly without replacement, in random
/// order. When `count` covers the whole slice the entire slice is
/// returned shuffled.
pub fn pick_many<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    if count >= items.len() {
        return shuffle(items, rng);
    }

    // Partial Fisher-Yates: the first `count` slots end up holding a
    // uniform sample in random order.
    let mut pool = items.to_vec();
    for i in 0..count {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(count);
    pool
}

/// Return a shuffled copy of `items`.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut result = items.to_vec();
    result.shuffle(rng);
    result
}

/// Returns true with probability `probability`.
///
/// Values at or below 0 never succeed; values at or above 1 always do.
pub fn chance<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < probability
}

/// Fair coin flip.
pub fn coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    chance(0.5, rng)
}

/// Uniform integer in `[min, max]` inclusive. Returns `min` when the range
/// is inverted.
pub fn int_in<R: Rng + ?Sized>(min: i64, max: i64, rng: &mut R) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

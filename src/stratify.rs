//! Length-stratified sampling.
//!
//! Items are put into buckets by an integer key (typically the length of the masked content),
//! and each bucket keeps a bounded, uniformly sampled subset of its items.
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of items kept per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// At most this many items.
    Count(usize),
    /// This percentage of the bucket population, at least one item.
    Percentage(f64),
}

/// Uniform sample of bounded size over a stream (algorithm R).
#[derive(Debug, Clone)]
pub struct Reservoir<T> {
    capacity: usize,
    seen: usize,
    items: Vec<T>,
}

impl<T> Reservoir<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seen: 0,
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn offer<R: Rng + ?Sized>(&mut self, item: T, rng: &mut R) {
        self.seen += 1;
        if self.items.len() < self.capacity {
            self.items.push(item);
        } else {
            let idx = rng.gen_range(0..self.seen);
            if idx < self.capacity {
                self.items[idx] = item;
            }
        }
    }

    /// Number of offered items.
    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Content length of a restoration target: separators (space, `.`, `·`) are not counted.
pub fn content_length(target: &str) -> usize {
    target
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '·'))
        .count()
}

#[derive(Debug, Clone)]
pub struct Stratifier {
    keys: RangeInclusive<usize>,
    target: Target,
}

impl Stratifier {
    /// Items whose key falls outside of `keys` are dropped.
    pub fn new(keys: RangeInclusive<usize>, target: Target) -> Result<Self, Error> {
        match target {
            Target::Count(0) => {
                return Err(Error::Config("bucket count must be at least 1".to_string()))
            }
            Target::Percentage(p) if !(p > 0.0 && p <= 100.0) => {
                return Err(Error::Config(format!(
                    "bucket percentage must be in (0, 100], got {}",
                    p
                )))
            }
            _ => (),
        }

        Ok(Self { keys, target })
    }

    /// Build buckets, in one pass over `items`.
    pub fn sample<T, I, K, R>(&self, items: I, key: K, rng: &mut R) -> BTreeMap<usize, Vec<T>>
    where
        I: IntoIterator<Item = T>,
        K: Fn(&T) -> usize,
        R: Rng + ?Sized,
    {
        let items = items
            .into_iter()
            .map(|item| (key(&item), item))
            .filter(|(k, _)| self.keys.contains(k));

        match self.target {
            Target::Count(capacity) => {
                let mut buckets: BTreeMap<usize, Reservoir<T>> = BTreeMap::new();
                for (k, item) in items {
                    buckets
                        .entry(k)
                        .or_insert_with(|| Reservoir::new(capacity))
                        .offer(item, rng);
                }
                buckets
                    .into_iter()
                    .map(|(k, reservoir)| (k, reservoir.into_items()))
                    .collect()
            }
            Target::Percentage(p) => {
                let mut buckets: BTreeMap<usize, Vec<T>> = BTreeMap::new();
                for (k, item) in items {
                    buckets.entry(k).or_default().push(item);
                }
                buckets
                    .into_iter()
                    .map(|(k, mut population)| {
                        let amount = ((population.len() as f64 * p / 100.0).floor() as usize)
                            .clamp(1, population.len());
                        let mut picked = index::sample(rng, population.len(), amount).into_vec();
                        // descending order so that swap_remove keeps pending indices valid
                        picked.sort_unstable_by(|a, b| b.cmp(a));
                        let kept = picked
                            .into_iter()
                            .map(|idx| population.swap_remove(idx))
                            .collect();
                        (k, kept)
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn reservoir_bounded() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut r = Reservoir::new(5);
        for i in 0..100 {
            r.offer(i, &mut rng);
        }
        assert_eq!(r.seen(), 100);
        let items = r.into_items();
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| *i < 100));
    }

    #[test]
    fn reservoir_small_stream() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut r = Reservoir::new(5);
        r.offer("a", &mut rng);
        r.offer("b", &mut rng);
        assert_eq!(r.into_items(), vec!["a", "b"]);
    }

    #[test]
    fn content_lengths() {
        assert_eq!(content_length("α β· γ."), 3);
        assert_eq!(content_length("0 γ"), 2);
    }

    #[test]
    fn count_per_bucket() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = Stratifier::new(1..=3, Target::Count(2)).unwrap();
        let items = vec!["a", "bb", "cc", "dd", "eee", "ffff", "", "g", "h", "i"];
        let buckets = s.sample(items, |i| i.len(), &mut rng);

        assert_eq!(buckets.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(buckets[&1].len(), 2);
        assert_eq!(buckets[&2].len(), 2);
        assert_eq!(buckets[&3], vec!["eee"]);
    }

    #[test]
    fn percentage_per_bucket() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = Stratifier::new(1..=10, Target::Percentage(50.0)).unwrap();
        let mut items: Vec<String> = (0..10).map(|i| format!("a{}", i)).collect();
        items.push("b".to_string());
        let buckets = s.sample(items, |i| i.chars().count(), &mut rng);

        assert_eq!(buckets[&2].len(), 5);
        // never below one item
        assert_eq!(buckets[&1], vec!["b".to_string()]);
        let mut kept = buckets[&2].clone();
        kept.sort();
        kept.dedup();
        assert_eq!(kept.len(), 5);
    }

    #[test]
    fn invalid_targets() {
        assert!(Stratifier::new(1..=10, Target::Count(0)).is_err());
        assert!(Stratifier::new(1..=10, Target::Percentage(0.0)).is_err());
        assert!(Stratifier::new(1..=10, Target::Percentage(120.0)).is_err());
    }
}

//! Sampler
//!
//! Strategies for partitioning data into train and held-out rows, and the
//! weighted label draw used for probabilistic leaf predictions.
use hashbrown::HashMap;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

// A sampler can be used to split the data prior to fitting and evaluating.
pub trait Sampler {
    /// Sample the data, returning a tuple, where the first item is the rows
    /// chosen for training, and the second are the rows held out.
    fn sample(&mut self, rng: &mut StdRng, index: &[usize]) -> (Vec<usize>, Vec<usize>);
}

/// Shuffles the rows and cuts at a fixed fraction boundary.
pub struct HoldoutSampler {
    train_fraction: f64,
}

impl HoldoutSampler {
    pub fn new(train_fraction: f64) -> Self {
        HoldoutSampler { train_fraction }
    }
}

impl Sampler for HoldoutSampler {
    fn sample(&mut self, rng: &mut StdRng, index: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let mut chosen = index.to_vec();
        chosen.shuffle(rng);
        let cut = (chosen.len() as f64 * self.train_fraction) as usize;
        let excluded = chosen.split_off(cut);
        (chosen, excluded)
    }
}

/// Draw one label from a class-frequency distribution, with each label
/// weighted by its count: a leaf holding `{A: 3, B: 1}` answers `A` three
/// times out of four.
pub fn sample_label<R: Rng>(counts: &HashMap<String, usize>, rng: &mut R) -> String {
    // To make draws reproducible under a seeded rng, sort the labels first.
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let weights: Vec<usize> = entries.iter().map(|(_, count)| **count).collect();
    let dist = WeightedIndex::new(&weights).expect("leaf distributions hold positive counts");
    entries[dist.sample(rng)].0.clone()
}

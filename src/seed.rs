//! Seed datasets
//!
//! Random datasets come from a seeded PCG stream so a lesson can be replayed
//! exactly from its seed.
//!
//! Value-band tags from [`from_values`] are for display. Counting sort needs
//! colors that agree with values, so its datasets come from [`from_colors`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::engine::{AlgorithmId, Color, Element};

/// Elements with ids `0..n` in the given order, color-tagged by value band
pub fn from_values(values: &[u32]) -> Vec<Element> {
    let max_value = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .enumerate()
        .map(|(id, &value)| {
            Element::new(id as u32, value).with_tag(Color::for_value(value, max_value))
        })
        .collect()
}

/// Elements with ids `0..n` whose value is the color's rank
pub fn from_colors(colors: &[Color]) -> Vec<Element> {
    colors
        .iter()
        .enumerate()
        .map(|(id, &color)| Element::colored(id as u32, color))
        .collect()
}

/// Recipe for a reproducible random dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub rng_seed: u64,
    pub len: usize,
    pub max_value: u32,
}

impl DatasetConfig {
    pub fn generate(&self) -> Vec<Element> {
        generate(self.rng_seed, self.len, self.max_value)
    }

    /// A dataset `algorithm` accepts; counting sort gets random colors and
    /// ignores `max_value`
    pub fn generate_for(&self, algorithm: AlgorithmId) -> Vec<Element> {
        match algorithm {
            AlgorithmId::Counting => generate_colored(self.rng_seed, self.len),
            _ => self.generate(),
        }
    }
}

/// `len` elements with values in `0..=max_value`
pub fn generate(rng_seed: u64, len: usize, max_value: u32) -> Vec<Element> {
    let mut rng = Pcg32::seed_from_u64(rng_seed);
    let values: Vec<u32> = (0..len).map(|_| rng.random_range(0..=max_value)).collect();
    log::debug!("generated {} values from seed {}", len, rng_seed);
    from_values(&values)
}

/// `len` elements with random colors
pub fn generate_colored(rng_seed: u64, len: usize) -> Vec<Element> {
    let mut rng = Pcg32::seed_from_u64(rng_seed);
    let colors: Vec<Color> = (0..len)
        .map(|_| Color::ALL[rng.random_range(0..Color::ALL.len())])
        .collect();
    log::debug!("generated {} colors from seed {}", len, rng_seed);
    from_colors(&colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{self, element::values};

    #[test]
    fn test_from_values_assigns_sequential_ids() {
        let elements = from_values(&[5, 0, 9]);
        let ids: Vec<u32> = elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(elements.iter().all(|e| e.tag.is_some()));
        assert_eq!(elements[1].tag, Some(Color::Red));
        assert_eq!(elements[2].tag, Some(Color::Purple));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(12345, 16, 99);
        let b = generate(12345, 16, 99);
        let c = generate(54321, 16, 99);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|e| e.value <= 99));
    }

    #[test]
    fn test_dataset_config_matches_generate() {
        let config = DatasetConfig {
            rng_seed: 7,
            len: 5,
            max_value: 10,
        };
        assert_eq!(config.generate(), generate(7, 5, 10));
        assert_eq!(config.generate_for(AlgorithmId::Heap), config.generate());
    }

    #[test]
    fn test_from_colors_uses_rank_as_value() {
        let elements = from_colors(&[Color::Green, Color::Red]);
        assert_eq!(elements[0], Element::colored(0, Color::Green));
        assert_eq!(elements[1].value, 0);
    }

    #[test]
    fn test_counting_dataset_is_accepted_and_sorts() {
        let config = DatasetConfig {
            rng_seed: 12345,
            len: 8,
            max_value: 99,
        };
        let seed = config.generate_for(AlgorithmId::Counting);
        assert_eq!(seed, generate_colored(12345, 8));
        let state = engine::initialize(AlgorithmId::Counting, &seed).unwrap();
        let (done, _) = engine::run_to_completion(&state);
        let mut expected = values(&seed);
        expected.sort();
        assert_eq!(values(done.dataset()), expected);
    }
}

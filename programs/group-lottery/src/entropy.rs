use anchor_lang::prelude::*;
use arrayref::array_ref;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::LotteryError;

/// Supplies the uniform samples the draw engine resolves prizes from.
pub trait RandomSource {
    /// Returns a value in [0, 1).
    fn sample(&mut self) -> f64;
}

/// Thread-local OS-seeded generator. The default for live draws.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn sample(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible generator seeded from a fixed value.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of samples, cycling when it runs out.
/// An empty sequence always yields the largest sample below 1, which only a
/// band reaching 1.0 can catch.
#[derive(Clone, Debug, Default)]
pub struct FixedSamples {
    samples: Vec<f64>,
    cursor: usize,
}

impl FixedSamples {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl RandomSource for FixedSamples {
    fn sample(&mut self) -> f64 {
        if self.samples.is_empty() {
            return unit_interval(u64::MAX);
        }
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}

/// Derives samples from an externally supplied entropy buffer, such as a
/// block hash or an oracle payload. Each sample mixes in an increasing counter
/// so one buffer can serve many draws.
#[derive(Clone, Debug)]
pub struct EntropyRandom {
    entropy: Vec<u8>,
    counter: u64,
}

impl EntropyRandom {
    pub fn new(entropy: Vec<u8>) -> Result<Self> {
        require!(entropy.len() >= 8, LotteryError::InsufficientEntropy);
        Ok(Self { entropy, counter: 0 })
    }
}

impl RandomSource for EntropyRandom {
    fn sample(&mut self) -> f64 {
        let value = mixed_sample(&self.entropy, self.counter);
        self.counter = self.counter.wrapping_add(1);
        value
    }
}

/// Maps an entropy buffer and a counter onto a uniform sample in [0, 1).
///
/// The first 8 bytes are always used; bytes 8..16 are folded in when present.
///
/// # Errors
/// - `InsufficientEntropy` if the buffer holds fewer than 8 bytes
pub fn sample_from_entropy(entropy: &[u8], counter: u64) -> Result<f64> {
    require!(entropy.len() >= 8, LotteryError::InsufficientEntropy);
    Ok(mixed_sample(entropy, counter))
}

fn mixed_sample(entropy: &[u8], counter: u64) -> f64 {
    let chunk1 = array_ref![entropy, 0, 8];
    let chunk2 = if entropy.len() >= 16 {
        array_ref![entropy, 8, 8]
    } else {
        chunk1
    };

    let mut mixed = mix(u64::from_le_bytes(*chunk1), counter);
    mixed = mix(mixed, u64::from_le_bytes(*chunk2));

    unit_interval(mixed)
}

/// splitmix64 finaliser.
fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

// top 53 bits fill an f64 mantissa exactly
fn unit_interval(x: u64) -> f64 {
    (x >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{code, error_code_of};

    #[test]
    fn entropy_samples_stay_in_unit_interval() {
        let entropy: Vec<u8> = (0u8..32).collect();
        for counter in 0..1_000 {
            let value = sample_from_entropy(&entropy, counter).unwrap();
            assert!((0.0..1.0).contains(&value));
        }
        assert_eq!(unit_interval(u64::MAX), ((1u64 << 53) - 1) as f64 / (1u64 << 53) as f64);
        assert_eq!(unit_interval(0), 0.0);
    }

    #[test]
    fn entropy_is_deterministic_and_counter_sensitive() {
        let entropy = [7u8; 16];
        let a = sample_from_entropy(&entropy, 3).unwrap();
        let b = sample_from_entropy(&entropy, 3).unwrap();
        let c = sample_from_entropy(&entropy, 4).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut source = EntropyRandom::new(entropy.to_vec()).unwrap();
        assert_eq!(source.sample(), sample_from_entropy(&entropy, 0).unwrap());
        assert_eq!(source.sample(), sample_from_entropy(&entropy, 1).unwrap());
    }

    #[test]
    fn short_entropy_is_rejected() {
        let err = sample_from_entropy(&[1, 2, 3], 0).unwrap_err();
        assert_eq!(error_code_of(&err), code(LotteryError::InsufficientEntropy));
        assert!(EntropyRandom::new(vec![0; 7]).is_err());
    }

    #[test]
    fn fixed_samples_cycle() {
        let mut source = FixedSamples::new([0.1, 0.2]);
        assert_eq!(source.sample(), 0.1);
        assert_eq!(source.sample(), 0.2);
        assert_eq!(source.sample(), 0.1);
    }

    #[test]
    fn empty_fixed_samples_stay_below_one() {
        let value = FixedSamples::default().sample();
        assert!((0.0..1.0).contains(&value));
        assert_eq!(value, unit_interval(u64::MAX));
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(99);
        let mut b = SeededRandom::new(99);
        for _ in 0..16 {
            let value = a.sample();
            assert_eq!(value, b.sample());
            assert!((0.0..1.0).contains(&value));
        }
        let value = ThreadRandom.sample();
        assert!((0.0..1.0).contains(&value));
    }
}

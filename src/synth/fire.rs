//! Procedural Fire Audio
//!
//! Generates a mono buffer that loops as continuous fire ambience. Three
//! layers are summed and soft-clipped:
//! - Brown noise: an integrating random walk for the low roar texture
//! - Crackles: sparse decaying bursts of noise in 50ms windows
//! - Rumble: 40/80/120Hz sines under a slow 0.3Hz swell
//!
//! A linear fade at both ends hides the loop seam.
//!
//! Randomness is unseeded by default. Pass an explicit [`Rng`] to
//! [`FireSynth::generate_with_rng`] for replayable output.

use std::f32::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::engine::buffer::{AudioBuffer, SAMPLE_RATE};
use crate::error::{HavanError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Loop length in seconds
pub const DURATION_SECS: u32 = 10;

/// Samples in one loop at the default rate
pub const NUM_SAMPLES: usize = (SAMPLE_RATE * DURATION_SECS) as usize;

/// Probability that a crackle window fires
pub const CRACKLE_PROBABILITY: f32 = 0.15;

/// Fundamental of the rumble layer in Hz
pub const BASE_RUMBLE_FREQ: f32 = 80.0;

/// Per-sample decay of a crackle burst
pub const CRACKLE_DECAY: f32 = 0.995;

/// Random walk coefficient for the brown noise layer
pub const BROWN_COEFFICIENT: f32 = 0.02;

/// Fade length at each end of the loop in seconds
pub const FADE_SECS: f32 = 0.5;

const BROWN_GAIN: f32 = 3.5;
const BROWN_WEIGHT: f32 = 0.3;
const CRACKLE_WEIGHT: f32 = 0.8;
const RUMBLE_LEVEL: f32 = 0.15;
const RUMBLE_WEIGHT: f32 = 0.4;
const SWELL_FREQ: f32 = 0.3;

/// Crackle windows per second (50ms windows)
const CRACKLE_WINDOWS_PER_SEC: u32 = 20;

// ============================================================================
// Configuration
// ============================================================================

/// Tunable parameters of the fire generator
///
/// The defaults reproduce the havan loop: 10 seconds at 44.1kHz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    pub sample_rate: u32,
    pub duration_secs: u32,
    pub crackle_probability: f32,
    pub base_rumble_freq: f32,
    pub crackle_decay: f32,
    pub fade_secs: f32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            duration_secs: DURATION_SECS,
            crackle_probability: CRACKLE_PROBABILITY,
            base_rumble_freq: BASE_RUMBLE_FREQ,
            crackle_decay: CRACKLE_DECAY,
            fade_secs: FADE_SECS,
        }
    }
}

impl FireConfig {
    /// Total samples in one loop
    pub fn num_samples(&self) -> usize {
        self.sample_rate as usize * self.duration_secs as usize
    }

    /// Samples in each of the two loop fades
    pub fn fade_len(&self) -> usize {
        (self.sample_rate as f32 * self.fade_secs) as usize
    }

    /// Samples in each crackle window
    pub fn crackle_window(&self) -> usize {
        (self.sample_rate / CRACKLE_WINDOWS_PER_SEC) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate < CRACKLE_WINDOWS_PER_SEC {
            return Err(HavanError::invalid_config(format!(
                "sample_rate must be at least {}Hz, got {}",
                CRACKLE_WINDOWS_PER_SEC, self.sample_rate
            )));
        }
        if self.duration_secs == 0 {
            return Err(HavanError::invalid_config("duration_secs must be positive"));
        }
        if !(0.0..=1.0).contains(&self.crackle_probability) {
            return Err(HavanError::invalid_config(format!(
                "crackle_probability must be within [0, 1], got {}",
                self.crackle_probability
            )));
        }
        if !(0.0..1.0).contains(&self.crackle_decay) {
            return Err(HavanError::invalid_config(format!(
                "crackle_decay must be within [0, 1), got {}",
                self.crackle_decay
            )));
        }
        if !self.base_rumble_freq.is_finite() || self.base_rumble_freq <= 0.0 {
            return Err(HavanError::invalid_config("base_rumble_freq must be positive"));
        }
        if !self.fade_secs.is_finite() || self.fade_secs < 0.0 {
            return Err(HavanError::invalid_config("fade_secs must not be negative"));
        }
        if self.fade_len() * 2 > self.num_samples() {
            return Err(HavanError::invalid_config(format!(
                "fades of {}s do not fit in a {}s loop",
                self.fade_secs, self.duration_secs
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Fire ambience generator
#[derive(Debug, Clone, Default)]
pub struct FireSynth {
    config: FireConfig,
}

impl FireSynth {
    /// Create a generator with custom parameters
    pub fn new(config: FireConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    /// Generate one loop using the thread-local random source
    ///
    /// # Example
    /// ```
    /// use havan::synth::FireSynth;
    ///
    /// let buffer = FireSynth::default().generate();
    /// assert_eq!(buffer.len(), 441_000);
    /// assert!(buffer.channel(0).iter().all(|s| s.abs() < 1.0));
    /// ```
    pub fn generate(&self) -> AudioBuffer {
        self.generate_with_rng(&mut rand::rng())
    }

    /// Generate one loop drawing all randomness from `rng`
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> AudioBuffer {
        let cfg = &self.config;
        let _span = debug_span!(
            "fire_synth",
            samples = cfg.num_samples(),
            sample_rate = cfg.sample_rate
        )
        .entered();

        let brown = brown_noise(rng, cfg.num_samples());
        let crackle = crackles(rng, cfg);
        let roar = rumble(cfg);

        let mut mixed = mix(&[brown, crackle, roar]);
        apply_loop_fades(&mut mixed, cfg.fade_len());

        let buffer = AudioBuffer::from_mono(mixed, cfg.sample_rate);
        tracing::debug!(peak = buffer.peak(), "fire loop ready");
        buffer
    }
}

/// Uniform sample in [-1, 1)
#[inline]
fn white<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * 2.0 - 1.0
}

/// Low-passed random walk, already scaled to its mix weight
///
/// Dividing by `1 + k` keeps the walk mean-reverting so it never drifts
/// beyond the range of its input.
pub(crate) fn brown_noise<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    let mut state = 0.0_f32;
    (0..len)
        .map(|_| {
            state = (state + BROWN_COEFFICIENT * white(rng)) / (1.0 + BROWN_COEFFICIENT);
            state * BROWN_GAIN * BROWN_WEIGHT
        })
        .collect()
}

/// Sparse crackle bursts, already scaled to their mix weight
pub(crate) fn crackles<R: Rng + ?Sized>(rng: &mut R, cfg: &FireConfig) -> Vec<f32> {
    let len = cfg.num_samples();
    let window = cfg.crackle_window();
    let mut out = vec![0.0_f32; len];

    for start in (0..len).step_by(window) {
        if rng.random::<f32>() >= cfg.crackle_probability {
            continue;
        }

        let intensity = 0.3 + rng.random::<f32>() * 0.7;
        let burst_len = (window as f32 * (0.1 + rng.random::<f32>() * 0.5)) as usize;
        let end = (start + burst_len).min(len);

        let mut decay = intensity;
        for sample in &mut out[start..end] {
            *sample = white(rng) * decay * CRACKLE_WEIGHT;
            decay *= cfg.crackle_decay;
        }
    }

    out
}

/// Three-partial low rumble under a slow swell, already scaled to its mix weight
pub(crate) fn rumble(cfg: &FireConfig) -> Vec<f32> {
    let rate = cfg.sample_rate as f32;
    let base = cfg.base_rumble_freq;

    (0..cfg.num_samples())
        .map(|i| {
            let t = i as f32 / rate;
            let f1 = (2.0 * PI * base * t).sin();
            let f2 = (2.0 * PI * base * 1.5 * t).sin() * 0.5;
            let f3 = (2.0 * PI * base * 0.5 * t).sin() * 0.7;
            let swell = 0.8 + 0.2 * (2.0 * PI * SWELL_FREQ * t).sin();
            (f1 + f2 + f3) * RUMBLE_LEVEL * swell * RUMBLE_WEIGHT
        })
        .collect()
}

/// Sum layers pointwise and soft-clip with tanh
///
/// Every layer must have the same length.
pub(crate) fn mix(layers: &[Vec<f32>]) -> Vec<f32> {
    let len = layers.first().map(Vec::len).unwrap_or(0);
    (0..len)
        .map(|i| layers.iter().map(|layer| layer[i]).sum::<f32>().tanh())
        .collect()
}

/// Linear fade-in over the first `fade_len` samples and fade-out over the last
pub(crate) fn apply_loop_fades(samples: &mut [f32], fade_len: usize) {
    let len = samples.len();
    let fade_len = fade_len.min(len / 2);

    for i in 0..fade_len {
        let gain = i as f32 / fade_len as f32;
        samples[i] *= gain;
        samples[len - 1 - i] *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn short_config() -> FireConfig {
        FireConfig {
            duration_secs: 2,
            ..FireConfig::default()
        }
    }

    #[test]
    fn test_default_constants() {
        let cfg = FireConfig::default();
        assert_eq!(cfg.num_samples(), NUM_SAMPLES);
        assert_eq!(cfg.fade_len(), 22_050);
        assert_eq!(cfg.crackle_window(), 2_205);
    }

    #[test]
    fn test_brown_noise_is_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = brown_noise(&mut rng, 44_100);
        // |state| never exceeds 1, so output never exceeds 3.5 * 0.3
        assert!(noise.iter().all(|s| s.abs() <= BROWN_GAIN * BROWN_WEIGHT));
        assert!(noise.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_crackles_only_start_on_window_boundaries() {
        let mut rng = StdRng::seed_from_u64(11);
        let cfg = short_config();
        let out = crackles(&mut rng, &cfg);
        let window = cfg.crackle_window();

        // A burst covers at most 60% of its window, so the tail of every window is silent
        for chunk in out.chunks(window) {
            let quiet_from = (window as f32 * 0.6).ceil() as usize;
            assert!(chunk.iter().skip(quiet_from).all(|&s| s == 0.0));
        }
        assert!(out.iter().all(|s| s.abs() <= CRACKLE_WEIGHT));
    }

    #[test]
    fn test_crackles_never_fire_at_zero_probability() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = FireConfig {
            crackle_probability: 0.0,
            ..short_config()
        };
        assert!(crackles(&mut rng, &cfg).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_rumble_starts_at_zero_and_stays_small() {
        let out = rumble(&short_config());
        assert_eq!(out[0], 0.0);
        let ceiling = (1.0 + 0.5 + 0.7) * RUMBLE_LEVEL * RUMBLE_WEIGHT;
        assert!(out.iter().all(|s| s.abs() <= ceiling + 1e-6));
    }

    #[test]
    fn test_mix_soft_clips() {
        let mixed = mix(&[vec![1.5, -1.5, 0.0], vec![1.5, -1.5, 0.25]]);
        assert!(mixed[0] < 1.0 && mixed[0] > 0.99);
        assert!(mixed[1] > -1.0 && mixed[1] < -0.99);
        assert_relative_eq!(mixed[2], 0.25_f32.tanh());
    }

    #[test]
    fn test_loop_fades_shape() {
        let mut samples = vec![1.0_f32; 100];
        apply_loop_fades(&mut samples, 10);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[99], 0.0);
        assert_relative_eq!(samples[5], 0.5);
        assert_relative_eq!(samples[94], 0.5);
        assert_eq!(samples[10], 1.0);
        assert_eq!(samples[89], 1.0);
    }

    #[test]
    fn test_seeded_generation_is_replayable() {
        let synth = FireSynth::new(short_config()).unwrap();
        let a = synth.generate_with_rng(&mut StdRng::seed_from_u64(42));
        let b = synth.generate_with_rng(&mut StdRng::seed_from_u64(42));
        let c = synth.generate_with_rng(&mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_config_validation() {
        assert!(FireConfig::default().validate().is_ok());

        let zero_duration = FireConfig {
            duration_secs: 0,
            ..FireConfig::default()
        };
        assert!(FireSynth::new(zero_duration).is_err());

        let long_fade = FireConfig {
            duration_secs: 1,
            fade_secs: 0.6,
            ..FireConfig::default()
        };
        assert!(matches!(
            FireSynth::new(long_fade),
            Err(HavanError::InvalidConfig { .. })
        ));

        let bad_probability = FireConfig {
            crackle_probability: 1.5,
            ..FireConfig::default()
        };
        assert!(bad_probability.validate().is_err());
    }
}

use super::config::{Dimension, PhaseMethod, SamplerConfig, SamplingMode};
use super::row::SeedRow;
use crate::amplitude::AmplitudeBuilder;
use crate::constants::KD_CUTOFF;
use crate::error::advise_keldysh;
use crate::pulse::Pulse;
use crate::target::Target;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![a];
    }
    let step = (b - a) / (n - 1) as f64;
    (0..n).map(|i| a + step * i as f64).collect()
}

/// Parallel-over-batches driver: each batch is a pure function of the
/// (immutable) pulse, target, config, batch index, and an RNG seeded from
/// the root seed and the batch index.
pub struct Sampler<'a, P: Pulse, T: Target> {
    pulse: &'a P,
    target: &'a T,
    config: SamplerConfig,
    birth_times: Vec<f64>,
}

impl<'a, P: Pulse + Sync, T: Target + Sync> Sampler<'a, P, T> {
    pub fn new(pulse: &'a P, target: &'a T, config: SamplerConfig) -> Self {
        advise_keldysh(pulse.keldysh(target.ip()));
        let birth_times = Self::compute_birth_times(&config);
        Sampler {
            pulse,
            target,
            config,
            birth_times,
        }
    }

    fn compute_birth_times(config: &SamplerConfig) -> Vec<f64> {
        match config.sampling_mode {
            SamplingMode::Grid { .. } => linspace(config.t1, config.t2, config.n_t),
            SamplingMode::MonteCarlo { .. } => {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
                let mut times: Vec<f64> = (0..config.n_t)
                    .map(|_| config.t1 + rng.gen::<f64>() * (config.t2 - config.t1))
                    .collect();
                times.sort_by(|a, b| a.partial_cmp(b).unwrap());
                times
            }
        }
    }

    pub fn batch_count(&self) -> usize {
        self.config.n_t
    }

    pub fn batch_max_size(&self) -> usize {
        match self.config.sampling_mode {
            SamplingMode::Grid { n_kd, n_kz, .. } => {
                if self.config.dimension == Dimension::Three {
                    n_kd * n_kz
                } else {
                    n_kd
                }
            }
            SamplingMode::MonteCarlo { n_kt, .. } => n_kt,
        }
    }

    fn birth_time_step(&self) -> f64 {
        match self.config.sampling_mode {
            SamplingMode::Grid { .. } => {
                if self.config.n_t > 1 {
                    (self.config.t2 - self.config.t1) / (self.config.n_t - 1) as f64
                } else {
                    (self.config.t2 - self.config.t1).abs().max(1.0)
                }
            }
            SamplingMode::MonteCarlo { .. } => (self.config.t2 - self.config.t1) / self.config.n_t as f64,
        }
    }

    /// Enumerates `(k_d, k_z, delta)` candidates for batch `i`.
    fn candidates(&self, i: usize) -> Vec<(f64, f64, f64)> {
        let dt = self.birth_time_step();
        match self.config.sampling_mode {
            SamplingMode::Grid { kd_max, n_kd, kz_max, n_kz } => {
                let kd_values = linspace(-kd_max.abs(), kd_max.abs(), n_kd);
                let d_kd = if n_kd > 1 { (2.0 * kd_max.abs()) / (n_kd - 1) as f64 } else { 1.0 };

                if self.config.dimension == Dimension::Two {
                    let delta = dt * d_kd;
                    kd_values.into_iter().map(|kd| (kd, 0.0, delta)).collect()
                } else {
                    let kz_values = linspace(-kz_max.abs(), kz_max.abs(), n_kz);
                    let d_kz = if n_kz > 1 { (2.0 * kz_max.abs()) / (n_kz - 1) as f64 } else { 1.0 };
                    let delta = dt * d_kd * d_kz;
                    let mut out = Vec::with_capacity(n_kd * n_kz);
                    for kd in &kd_values {
                        for kz in &kz_values {
                            out.push((*kd, *kz, delta));
                        }
                    }
                    out
                }
            }
            SamplingMode::MonteCarlo { n_kt, kd_max, kz_max } => {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.config.seed.wrapping_add(i as u64 + 1));
                let kd_factor = if kd_max > 0.0 { 2.0 * kd_max } else { 1.0 };
                let kz_factor = if self.config.dimension == Dimension::Three && kz_max > 0.0 {
                    2.0 * kz_max
                } else {
                    1.0
                };
                let delta = dt * kd_factor * kz_factor / n_kt as f64;

                (0..n_kt)
                    .map(|_| {
                        let kd = if kd_max > 0.0 {
                            -kd_max + rng.gen::<f64>() * 2.0 * kd_max
                        } else {
                            0.0
                        };
                        let kz = if self.config.dimension == Dimension::Three && kz_max > 0.0 {
                            -kz_max + rng.gen::<f64>() * 2.0 * kz_max
                        } else {
                            0.0
                        };
                        (kd, kz, delta)
                    })
                    .collect()
            }
        }
    }

    /// Produces the packed rows for one batch, discarding sub-cutoff or
    /// numerically degenerate candidates. An empty vector is the "empty
    /// batch" sentinel, not an error.
    pub fn generate_batch(&self, i: usize) -> Vec<SeedRow> {
        let t_r = self.birth_times[i];
        let builder = AmplitudeBuilder::new(self.pulse, self.target, self.config.prefix, t_r);
        let carries_phase = self.config.phase_method.carries_phase();
        let is_3d = self.config.dimension == Dimension::Three;

        self.candidates(i)
            .into_iter()
            .filter_map(|(k_d, k_z, delta)| {
                if k_d.abs() < KD_CUTOFF {
                    return None;
                }
                let amp = builder.amplitude(k_d, k_z, delta);
                let rate = amp.norm_sqr();
                if rate.is_nan() || rate < self.config.cutoff {
                    return None;
                }

                let (k_x, k_y) = builder.transverse_momentum(k_d);
                let (x0, y0, z0) = builder.exit_position(k_d, k_z);

                Some(SeedRow {
                    x0,
                    y0,
                    z0: if is_3d { Some(z0) } else { None },
                    k_x,
                    k_y,
                    k_z: if is_3d { Some(k_z) } else { None },
                    t_r,
                    rate,
                    phase: if carries_phase { Some(amp.arg()) } else { None },
                })
            })
            .collect()
    }

    /// Runs every batch, checking `cancel` at each batch boundary. Batches
    /// completed before cancellation are returned as `Some(rows)`; batches
    /// never attempted because cancellation was already observed are
    /// `None`. The result preserves index order regardless of which batch
    /// finished first.
    pub fn generate_all(&self, cancel: &AtomicBool) -> Vec<Option<Vec<SeedRow>>> {
        (0..self.batch_count())
            .into_par_iter()
            .map(|i| {
                if cancel.load(Ordering::Relaxed) {
                    None
                } else {
                    Some(self.generate_batch(i))
                }
            })
            .collect()
    }
}

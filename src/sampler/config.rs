use crate::amplitude::PrefixSet;
use crate::error::ConfigError;

/// Trajectory phase convention: CTMC carries no initial phase; QTMC and
/// SCTS both carry `arg(amp)`, differing only in how the downstream
/// propagator accumulates phase along the trajectory (out of scope here).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PhaseMethod {
    Ctmc,
    Qtmc,
    Scts,
}

impl PhaseMethod {
    pub fn carries_phase(&self) -> bool {
        !matches!(self, PhaseMethod::Ctmc)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dimension {
    Two,
    Three,
}

/// How `(k_d, k_z)` candidates (and, in MC mode, birth times too) are
/// enumerated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SamplingMode {
    Grid {
        kd_max: f64,
        n_kd: usize,
        kz_max: f64,
        n_kz: usize,
    },
    MonteCarlo {
        n_kt: usize,
        kd_max: f64,
        kz_max: f64,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerConfig {
    pub t1: f64,
    pub t2: f64,
    pub n_t: usize,
    pub cutoff: f64,
    pub phase_method: PhaseMethod,
    pub prefix: PrefixSet,
    pub dimension: Dimension,
    pub sampling_mode: SamplingMode,
    pub seed: u64,
}

impl SamplerConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t1: f64,
        t2: f64,
        n_t: usize,
        cutoff: f64,
        phase_method: PhaseMethod,
        prefix: PrefixSet,
        dimension: Dimension,
        sampling_mode: SamplingMode,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if n_t == 0 {
            return Err(ConfigError::NonPositiveSampleCount);
        }
        if cutoff < 0.0 {
            return Err(ConfigError::NegativeCutoff(cutoff));
        }
        match sampling_mode {
            SamplingMode::Grid { kd_max, n_kd, kz_max, n_kz } => {
                if n_kd == 0 {
                    return Err(ConfigError::NonPositiveSampleCount);
                }
                if dimension == Dimension::Three && n_kz == 0 {
                    return Err(ConfigError::NonPositiveSampleCount);
                }
                if kd_max <= 0.0 && (dimension == Dimension::Two || kz_max <= 0.0) {
                    return Err(ConfigError::EmptyMomentumRange);
                }
            }
            SamplingMode::MonteCarlo { n_kt, .. } => {
                if n_kt == 0 {
                    return Err(ConfigError::NonPositiveSampleCount);
                }
            }
        }

        Ok(SamplerConfig {
            t1,
            t2,
            n_t,
            cutoff,
            phase_method,
            prefix,
            dimension,
            sampling_mode,
            seed,
        })
    }
}

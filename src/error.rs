//! Configuration errors and advisory warnings.
//!
//! Rejected construction (bad intensity, conflicting prefix sets, and so on)
//! is fatal and surfaced through [ConfigError]. Everything else in this
//! module is advisory: a warning is printed and the sampler keeps going.

use colored::Colorize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("peak intensity must be positive, got {0}")]
    NonPositiveIntensity(f64),
    #[error("wavelength must be positive, got {0}")]
    NonPositiveWavelength(f64),
    #[error("ellipticity {0} is out of range [-1, 1]")]
    EllipticityOutOfRange(f64),
    #[error("cycle count must be positive, got {0}")]
    NonPositiveCycleCount(f64),
    #[error("ionization potential must be positive, got {0}")]
    NonPositiveIp(f64),
    #[error("birth-time sample count must be positive")]
    NonPositiveSampleCount,
    #[error("rate cutoff must be non-negative, got {0}")]
    NegativeCutoff(f64),
    #[error("grid sampling requires at least one of kd_max, kz_max to be positive")]
    EmptyMomentumRange,
    #[error("Pre and PreCC cannot both be requested in the rate-prefix set")]
    ConflictingPrefixSet,
    #[error("orbital quantum numbers l={l}, m={m} are invalid (need l >= 0 and |m| <= l)")]
    InvalidOrbitalIndices { l: i32, m: i32 },
    #[error("coefficient table has {got} entries, expected {expected} for l_max={l_max}")]
    CoefficientTableSizeMismatch {
        l_max: usize,
        expected: usize,
        got: usize,
    },
}

/// Prints an advisory warning to stderr. Not an error: the caller continues.
pub fn warn(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Warns if the Keldysh parameter indicates the tunneling picture is
/// marginal or invalid for the requested pulse/target combination.
pub fn advise_keldysh(gamma: f64) {
    if gamma >= crate::constants::KELDYSH_INVALID {
        warn(&format!(
            "Keldysh parameter {:.3} is >= 1: the tunneling picture is not expected to hold",
            gamma
        ));
    } else if gamma >= crate::constants::KELDYSH_MARGINAL {
        warn(&format!(
            "Keldysh parameter {:.3} is >= 0.6: the tunneling picture is marginal",
            gamma
        ));
    }
}

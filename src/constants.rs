//! Numeric constants shared by the pulse models and the ADK amplitude
//! assembly. Kept bit-exact since the amplitude formulas are sensitive to
//! them.

/// `omega [a.u.] = NM_PER_AU_OMEGA / wavelength [nm]`, and conversely.
pub const NM_PER_AU_OMEGA: f64 = 45.563352525;

/// Converts peak intensity in W/cm^2 to a peak field in atomic units via
/// `F0 = sqrt(I0 / ((1 + ellipticity^2) * INTENSITY_SCALE))`.
pub const INTENSITY_SCALE: f64 = 3.50944521e16;

/// Euler's number, used in the Coulomb-corrected prefactor's instantaneous
/// Keldysh-parameter term.
pub const EULER_NUMBER: f64 = 2.71828182845904523;

/// Transverse-momentum candidates with `|k_d|` below this carry no physical
/// weight (the ADK prefactor is singular as `k_d -> 0`) and are discarded.
pub const KD_CUTOFF: f64 = 1.0e-4;

/// Floor applied to the unit envelope before it is used as a divisor, so
/// that the instantaneous Keldysh parameter does not produce an IEEE
/// infinity at envelope zeros.
pub const ENVELOPE_FLOOR: f64 = 1.0e-12;

/// Keldysh parameter at or above which the tunneling picture is marginal.
pub const KELDYSH_MARGINAL: f64 = 0.6;

/// Keldysh parameter at or above which the tunneling picture is invalid.
pub const KELDYSH_INVALID: f64 = 1.0;

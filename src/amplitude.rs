//! Assembly of the complex ADK/MO-ADK ionization amplitude for one birth
//! time: the exponential tunneling factor times an optional Coulomb-free or
//! Coulomb-corrected prefactor times an optional Jacobian, scaled by the
//! sample-volume weight.

use crate::angular::WignerTable;
use crate::constants::{ENVELOPE_FLOOR, EULER_NUMBER};
use crate::error::{warn, ConfigError};
use crate::geometry::FieldFrame;
use crate::pulse::Pulse;
use crate::target::{structure_sum, Target};
use num_complex::Complex64;
use statrs::function::gamma::gamma;

/// Which optional multiplicative factors enter the rate. `pre` and
/// `pre_cc` are mutually exclusive; `jac` composes with either.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PrefixSet {
    pre: bool,
    pre_cc: bool,
    jac: bool,
}

impl PrefixSet {
    pub fn new(pre: bool, pre_cc: bool, jac: bool) -> Result<Self, ConfigError> {
        if pre && pre_cc {
            return Err(ConfigError::ConflictingPrefixSet);
        }
        Ok(PrefixSet { pre, pre_cc, jac })
    }

    pub fn none() -> Self {
        PrefixSet::default()
    }

    /// `PreCC` requires a monochromatic pulse (its instantaneous-Keldysh
    /// term assumes a well-defined carrier period); request it against a
    /// non-monochromatic pulse and it is silently replaced by `Pre`.
    pub fn downgrade_for_monochromatic(self, is_monochromatic: bool) -> Self {
        if self.pre_cc && !is_monochromatic {
            warn("PreCC requested for a non-monochromatic pulse; downgrading to Pre");
            PrefixSet {
                pre: true,
                pre_cc: false,
                jac: self.jac,
            }
        } else {
            self
        }
    }

    pub fn includes_jac(&self) -> bool {
        self.jac
    }

    pub fn includes_pre(&self) -> bool {
        self.pre
    }

    pub fn includes_pre_cc(&self) -> bool {
        self.pre_cc
    }
}

/// Per-batch amplitude closure: everything that depends only on the birth
/// time `t_r` (field magnitude, exit azimuth, Euler angles, Wigner-D table,
/// ADK prefactor constants) is computed once in [AmplitudeBuilder::new] and
/// reused across every `(k_d, k_z)` candidate in the batch.
pub struct AmplitudeBuilder<'a, P: Pulse, T: Target> {
    pulse: &'a P,
    target: &'a T,
    prefix: PrefixSet,
    frame: FieldFrame,
    field_vector: (f64, f64),
    wigner: WignerTable,
    kappa: f64,
    n_star: f64,
    c: f64,
    c_cc: f64,
}

impl<'a, P: Pulse, T: Target> AmplitudeBuilder<'a, P, T> {
    pub fn new(pulse: &'a P, target: &'a T, prefix: PrefixSet, t_r: f64) -> Self {
        let prefix = prefix.downgrade_for_monochromatic(pulse.is_monochromatic());
        let (f_x, f_y) = pulse.electric_field(Complex64::new(t_r, 0.0));
        let frame = FieldFrame::from_field(f_x.re, f_y.re);
        let euler = target.ff_to_mf_euler_angles(frame.exit_azimuth);
        let wigner = WignerTable::new(target.l_max(), euler);

        let ip = target.ip();
        let kappa = (2.0 * ip).sqrt();
        let n_star = target.z() / kappa;

        let c = 2f64.powf(n_star / 2.0 + 1.0) * kappa.powf(2.0 * n_star + 0.5) * gamma(n_star / 2.0 + 1.0);

        let gamma_inst = if pulse.is_monochromatic() {
            let u = pulse.unit_envelope(t_r).max(ENVELOPE_FLOOR);
            pulse.angular_frequency() * kappa / (pulse.peak_field() * u)
        } else {
            0.0
        };
        let c_cc = 2f64.powf(1.5 * n_star + 1.0)
            * kappa.powf(5.0 * n_star + 0.5)
            * frame.magnitude.powf(-n_star)
            * (1.0 + 2.0 * gamma_inst / EULER_NUMBER).powf(-n_star);

        AmplitudeBuilder {
            pulse,
            target,
            prefix,
            field_vector: frame.field_vector(),
            frame,
            wigner,
            kappa,
            n_star,
            c,
            c_cc,
        }
    }

    pub fn prefix(&self) -> PrefixSet {
        self.prefix
    }

    pub fn pulse(&self) -> &'a P {
        self.pulse
    }

    pub fn frame(&self) -> FieldFrame {
        self.frame
    }

    pub fn field_magnitude(&self) -> f64 {
        self.frame.magnitude
    }

    pub fn exit_azimuth(&self) -> f64 {
        self.frame.exit_azimuth
    }

    pub fn ip(&self) -> f64 {
        self.target.ip()
    }

    /// Sub-barrier imaginary tunneling time `t_i(k_d,k_z) = sqrt(kappa^2 +
    /// k_d^2 + k_z^2) / F`.
    pub fn imaginary_time(&self, k_d: f64, k_z: f64) -> f64 {
        (self.kappa * self.kappa + k_d * k_d + k_z * k_z).sqrt() / self.frame.magnitude
    }

    /// The tunneling-exit transverse momentum `(k_x, k_y)` in lab-frame
    /// coordinates, perpendicular to the instantaneous field.
    pub fn transverse_momentum(&self, k_d: f64) -> (f64, f64) {
        (-k_d * self.exit_azimuth().sin(), k_d * self.exit_azimuth().cos())
    }

    /// Tunneling-exit position `(x0, y0, z0)`.
    pub fn exit_position(&self, k_d: f64, k_z: f64) -> (f64, f64, f64) {
        let f = self.frame.magnitude;
        let r0 = (self.target.ip() + (k_d * k_d + k_z * k_z) / 2.0) / f;
        (r0 * self.exit_azimuth().cos(), r0 * self.exit_azimuth().sin(), 0.0)
    }

    /// The complex ADK/MO-ADK amplitude for one `(k_d, k_z)` candidate,
    /// scaled by the sample-volume weight `delta`.
    pub fn amplitude(&self, k_d: f64, k_z: f64, delta: f64) -> Complex64 {
        let f = self.frame.magnitude;
        let ip = self.target.ip();
        let (k_x, k_y) = self.transverse_momentum(k_d);

        let exponent = -(k_d * k_d + k_z * k_z + 2.0 * ip).powf(1.5) / (3.0 * f);
        let exp_factor = Complex64::new(exponent.exp(), 0.0);

        let prefactor = if self.prefix.pre || self.prefix.pre_cc {
            let t_i = self.imaginary_time(k_d, k_z);
            let (f_x, f_y) = self.field_vector;
            let k_ts = (
                Complex64::new(k_x, -t_i * f_x),
                Complex64::new(k_y, -t_i * f_y),
                Complex64::new(k_z, 0.0),
            );
            let k_ff = self.frame.project(k_ts);
            let pi = structure_sum(self.target, &self.wigner, k_ff);

            let denom = ((k_x * k_x + k_y * k_y + k_z * k_z + 2.0 * ip) * f * f).powf((self.n_star + 1.0) / 4.0);
            let scale = if self.prefix.pre { self.c } else { self.c_cc };
            Complex64::new(scale, 0.0) * pi / denom
        } else {
            Complex64::new(1.0, 0.0)
        };

        let jac_factor = if self.prefix.jac { f.sqrt() } else { 1.0 };

        Complex64::new(delta.sqrt(), 0.0) * exp_factor * prefactor * jac_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pulse::{CosPowerPulse, EnvelopePower};
    use crate::target::AtomTarget;

    #[test]
    fn rejects_conflicting_prefix_set() {
        assert!(PrefixSet::new(true, true, false).is_err());
        assert!(PrefixSet::new(true, false, true).is_ok());
    }

    #[test]
    fn exponential_decreases_with_transverse_momentum() {
        let pulse = CosPowerPulse::new(4.0e14, 800.0, 2.0, EnvelopePower::Two).unwrap();
        let target = AtomTarget::new(0.5, 1.0, 0, 0, 1.0, 0.0, 0.0).unwrap();
        let builder = AmplitudeBuilder::new(&pulse, &target, PrefixSet::none(), 0.0);
        let small = builder.amplitude(0.1, 0.0, 1.0).norm();
        let large = builder.amplitude(0.5, 0.0, 1.0).norm();
        assert!(large < small);
    }

    #[test]
    fn precc_downgrades_for_non_monochromatic_pulses() {
        struct Burst;
        impl Pulse for Burst {
            fn peak_intensity(&self) -> f64 {
                4.0e14
            }
            fn wavelength(&self) -> f64 {
                800.0
            }
            fn ellipticity(&self) -> f64 {
                0.0
            }
            fn azimuth(&self) -> f64 {
                0.0
            }
            fn cep(&self) -> f64 {
                0.0
            }
            fn time_shift(&self) -> f64 {
                0.0
            }
            fn is_monochromatic(&self) -> bool {
                false
            }
            fn unit_envelope(&self, _t: f64) -> f64 {
                1.0
            }
            fn vector_potential(&self, _t: Complex64) -> (Complex64, Complex64) {
                (Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0))
            }
            fn electric_field(&self, _t: Complex64) -> (Complex64, Complex64) {
                (Complex64::new(0.05, 0.0), Complex64::new(0.0, 0.0))
            }
        }

        let pulse = Burst;
        let target = AtomTarget::new(0.5, 1.0, 0, 0, 1.0, 0.0, 0.0).unwrap();
        let prefix = PrefixSet::new(false, true, false).unwrap();
        let builder = AmplitudeBuilder::new(&pulse, &target, prefix, 0.0);
        assert!(builder.prefix().pre);
        assert!(!builder.prefix().pre_cc);
    }
}

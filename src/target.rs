//! Tunneling-ionization targets: the single-active-electron (SAE) atom and
//! the molecular-orbital (MO-ADK) generalization, each exposing `Ip`, the
//! asymptotic charge `Z`, a fixed molecular-frame (MF) orientation, and the
//! `C_{l,m}` coefficients of the ionizing orbital expanded in spherical
//! harmonics.
//!
//! [structure_sum] composes a target's coefficients with a batch's
//! [WignerTable] and a candidate's field-frame (FF) direction into the
//! `Pi(k_ts)` prefactor numerator of the ADK/MO-ADK amplitude.

use crate::angular::{solid_harmonic_y, WignerTable};
use crate::error::ConfigError;
use crate::geometry::ff_to_mf_euler_angles;
use enum_dispatch::enum_dispatch;
use num_complex::Complex64;

/// Specific target variants, i.e. types that implement `trait Target`.
#[enum_dispatch]
pub enum TargetKind {
    AtomTarget,
    MoleculeTarget,
}

/// Shared interface for tunneling-ionization targets. `coefficient(l, m)`
/// returns `C_{l,m}`, zero outside the target's populated range; `l_max`
/// bounds the `l` sum so callers can size dense tables without negative
/// indices (spec's explicit-offset requirement, carried from [crate::angular]).
#[enum_dispatch(TargetKind)]
pub trait Target {
    fn ip(&self) -> f64;
    fn z(&self) -> f64;
    fn l_max(&self) -> usize;
    fn coefficient(&self, l: usize, m: i32) -> f64;

    /// The target's fixed orientation as ZYZ Euler angles `(alpha, beta,
    /// gamma)`: `(phi, theta, 0)` for an SAE atom's quantization axis, or
    /// the molecule's own Euler rotation.
    fn orientation(&self) -> (f64, f64, f64);

    /// Composes the target's fixed orientation with the instantaneous exit
    /// azimuth into the FF-to-MF Euler angles used by the batch's
    /// [WignerTable].
    fn ff_to_mf_euler_angles(&self, exit_azimuth: f64) -> (f64, f64, f64) {
        ff_to_mf_euler_angles(self.orientation(), exit_azimuth)
    }
}

/// A single-active-electron atom: one `(l, m)` orbital, asymptotic
/// coefficient `C`, and a quantization axis `(theta, phi)`.
#[derive(Debug, Copy, Clone)]
pub struct AtomTarget {
    ip: f64,
    z: f64,
    l: usize,
    m: i32,
    c: f64,
    theta: f64,
    phi: f64,
}

impl AtomTarget {
    #[allow(clippy::too_many_arguments)]
    pub fn new(ip: f64, z: f64, l: i32, m: i32, c: f64, theta: f64, phi: f64) -> Result<Self, ConfigError> {
        if ip <= 0.0 {
            return Err(ConfigError::NonPositiveIp(ip));
        }
        if l < 0 || m.abs() > l {
            return Err(ConfigError::InvalidOrbitalIndices { l, m });
        }
        Ok(AtomTarget {
            ip,
            z,
            l: l as usize,
            m,
            c,
            theta,
            phi,
        })
    }
}

impl Target for AtomTarget {
    fn ip(&self) -> f64 {
        self.ip
    }

    fn z(&self) -> f64 {
        self.z
    }

    fn l_max(&self) -> usize {
        self.l
    }

    fn coefficient(&self, l: usize, m: i32) -> f64 {
        if l == self.l && m == self.m {
            self.c
        } else {
            0.0
        }
    }

    fn orientation(&self) -> (f64, f64, f64) {
        (self.phi, self.theta, 0.0)
    }
}

/// A molecular orbital: identified by an index (for the caller's own
/// bookkeeping, not used in the amplitude), with `Ip`, asymptotic charge
/// `Z`, a body-fixed Euler rotation, and a dense `C_{l,m}` table for
/// `l` in `0..=l_max`.
#[derive(Debug, Clone)]
pub struct MoleculeTarget {
    index: usize,
    ip: f64,
    z: f64,
    euler: (f64, f64, f64),
    l_max: usize,
    /// Flat `[l][m + l_max]` table, width `2*l_max + 1`.
    coeffs: Vec<f64>,
}

impl MoleculeTarget {
    /// `coeffs` must be a dense `(l_max + 1) * (2*l_max + 1)` table in the
    /// `[l][m + l_max]` layout described on [MoleculeTarget::coeffs].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: usize,
        ip: f64,
        z: f64,
        euler: (f64, f64, f64),
        l_max: usize,
        coeffs: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        if ip <= 0.0 {
            return Err(ConfigError::NonPositiveIp(ip));
        }
        let expected = (l_max + 1) * (2 * l_max + 1);
        if coeffs.len() != expected {
            return Err(ConfigError::CoefficientTableSizeMismatch {
                l_max,
                expected,
                got: coeffs.len(),
            });
        }
        Ok(MoleculeTarget {
            index,
            ip,
            z,
            euler,
            l_max,
            coeffs,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl Target for MoleculeTarget {
    fn ip(&self) -> f64 {
        self.ip
    }

    fn z(&self) -> f64 {
        self.z
    }

    fn l_max(&self) -> usize {
        self.l_max
    }

    fn coefficient(&self, l: usize, m: i32) -> f64 {
        if l > self.l_max || m.abs() as usize > l {
            return 0.0;
        }
        let width = 2 * self.l_max + 1;
        self.coeffs[l * width + (m + self.l_max as i32) as usize]
    }

    fn orientation(&self) -> (f64, f64, f64) {
        self.euler
    }
}

/// The MO-ADK prefactor numerator
/// `Pi(k_ts) = sum_{l,m,m'} C_{l,m} * D^l_{m',m}(alpha,beta,gamma) * Y_{l,m'}(k_ts_FF)`,
/// evaluated from a batch's [WignerTable] and a candidate's FF-frame
/// direction. For an SAE atom the sum collapses to the single populated
/// `(l, m)`; for a molecule it runs over every nonzero table entry.
pub fn structure_sum<T: Target + ?Sized>(
    target: &T,
    wigner: &WignerTable,
    k_ff: (Complex64, Complex64, Complex64),
) -> Complex64 {
    let l_max = target.l_max();
    let y_table = solid_harmonic_y(l_max, k_ff);
    let width = 2 * l_max + 1;

    let mut sum = Complex64::new(0.0, 0.0);
    for l in 0..=l_max {
        for m in -(l as i32)..=(l as i32) {
            let coeff = target.coefficient(l, m);
            if coeff == 0.0 {
                continue;
            }
            for m_prime in -(l as i32)..=(l as i32) {
                let d = wigner.get(l, m_prime, m);
                let y = y_table[l * width + (m_prime + l_max as i32) as usize];
                sum += Complex64::new(coeff, 0.0) * d * y;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_ip() {
        assert!(AtomTarget::new(0.0, 1.0, 0, 0, 1.0, 0.0, 0.0).is_err());
        assert!(AtomTarget::new(-0.1, 1.0, 0, 0, 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn atom_coefficient_is_nonzero_only_at_its_own_l_m() {
        let target = AtomTarget::new(0.5, 1.0, 1, -1, 2.0, 0.3, 0.4).unwrap();
        assert_eq!(target.coefficient(1, -1), 2.0);
        assert_eq!(target.coefficient(1, 0), 0.0);
        assert_eq!(target.coefficient(1, 1), 0.0);
        assert_eq!(target.coefficient(0, 0), 0.0);
    }

    #[test]
    fn atom_orientation_is_quantization_axis() {
        let target = AtomTarget::new(0.5, 1.0, 0, 0, 1.0, 0.3, 0.7).unwrap();
        assert_eq!(target.orientation(), (0.7, 0.3, 0.0));
    }

    #[test]
    fn molecule_rejects_mismatched_coefficient_table() {
        let result = MoleculeTarget::new(0, 0.5, 1.0, (0.0, 0.0, 0.0), 1, vec![1.0, 2.0]);
        assert!(result.is_err());
    }

    #[test]
    fn molecule_coefficient_table_round_trips() {
        // l_max = 1: widths are [l=0: 1 slot][l=1: 3 slots] = 4 total.
        let coeffs = vec![1.0, 0.0, 0.0, 0.0];
        let target = MoleculeTarget::new(7, 0.5, 1.0, (0.1, 0.2, 0.3), 1, coeffs).unwrap();
        assert_eq!(target.index(), 7);
        assert_eq!(target.coefficient(0, 0), 1.0);
        assert_eq!(target.coefficient(1, 0), 0.0);
        assert_eq!(target.coefficient(1, -1), 0.0);
    }

    #[test]
    fn structure_sum_is_trivial_for_s_orbital_at_identity_rotation() {
        let target = AtomTarget::new(0.5, 1.0, 0, 0, 1.0, 0.0, 0.0).unwrap();
        let wigner = WignerTable::new(0, (0.0, 0.0, 0.0));
        let k_ff = (Complex64::new(0.3, 0.0), Complex64::new(-0.2, 0.0), Complex64::new(0.9, 0.0));
        let pi = structure_sum(&target, &wigner, k_ff);
        // Y_00 is constant and D^0_{0,0} = 1, so Pi should equal C * Y_00.
        assert!((pi - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }
}

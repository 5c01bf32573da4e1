use super::{rotate_by_azimuth, Pulse};
use crate::error::ConfigError;
use num_complex::Complex64;
use std::f64::consts::PI;

/// The exponent `k` of the `cos^k` envelope: 2 (Cos-squared) or 4
/// (Cos-fourth power).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnvelopePower {
    Two,
    Four,
}

impl EnvelopePower {
    fn k(self) -> i32 {
        match self {
            EnvelopePower::Two => 2,
            EnvelopePower::Four => 4,
        }
    }
}

/// A monochromatic, elliptically polarized carrier under a `cos^k`
/// envelope of half-width `cycles` optical cycles.
///
/// The Cos-squared shape (`power = Two`) additionally multiplies the
/// envelope, and its analytic derivative, by a `tanh`-based edge clamp; the
/// Cos-fourth shape does not. Both are applied to `A` and `F` alike, for
/// consistency between the two.
#[derive(Debug, Copy, Clone)]
pub struct CosPowerPulse {
    peak_intensity: f64,
    wavelength: f64,
    cycles: f64,
    power: EnvelopePower,
    ellipticity: f64,
    azimuth: f64,
    cep: f64,
    time_shift: f64,
}

impl CosPowerPulse {
    pub fn new(peak_intensity: f64, wavelength: f64, cycles: f64, power: EnvelopePower) -> Result<Self, ConfigError> {
        if peak_intensity <= 0.0 {
            return Err(ConfigError::NonPositiveIntensity(peak_intensity));
        }
        if wavelength <= 0.0 {
            return Err(ConfigError::NonPositiveWavelength(wavelength));
        }
        if cycles <= 0.0 {
            return Err(ConfigError::NonPositiveCycleCount(cycles));
        }
        Ok(CosPowerPulse {
            peak_intensity,
            wavelength,
            cycles,
            power,
            ellipticity: 0.0,
            azimuth: 0.0,
            cep: 0.0,
            time_shift: 0.0,
        })
    }

    pub fn with_ellipticity(&self, ellipticity: f64) -> Result<Self, ConfigError> {
        if !(-1.0..=1.0).contains(&ellipticity) {
            return Err(ConfigError::EllipticityOutOfRange(ellipticity));
        }
        Ok(CosPowerPulse { ellipticity, ..*self })
    }

    pub fn with_azimuth(&self, azimuth: f64) -> Self {
        CosPowerPulse { azimuth, ..*self }
    }

    pub fn with_cep(&self, cep: f64) -> Self {
        CosPowerPulse { cep, ..*self }
    }

    pub fn with_time_shift(&self, time_shift: f64) -> Self {
        CosPowerPulse { time_shift, ..*self }
    }

    fn edge_clamp(&self, tau_re: f64, omega: f64) -> f64 {
        if self.power != EnvelopePower::Two {
            return 1.0;
        }
        let boundary = self.cycles * PI / omega;
        (5.0 * (tau_re - boundary)).tanh() * (-5.0 * (tau_re + boundary)).tanh()
    }

    /// Evaluates `(A_x, A_y, F_x, F_y)` at azimuth 0 and then rotates into
    /// the pulse's principal-axis azimuth; shared by `vector_potential` and
    /// `electric_field` so the carrier and envelope are computed once.
    fn components(&self, t: Complex64) -> (Complex64, Complex64, Complex64, Complex64) {
        let zero = Complex64::new(0.0, 0.0);
        let omega = self.angular_frequency();
        let tau = t - Complex64::new(self.time_shift, 0.0);

        if (omega * tau.re).abs() >= self.cycles * PI {
            return (zero, zero, zero, zero);
        }

        let k = self.power.k();
        let sigma = omega * tau / (2.0 * self.cycles);
        let theta = omega * tau + Complex64::new(self.cep, 0.0);
        let cos_sigma = sigma.cos();
        let sin_sigma = sigma.sin();
        let cos_theta = theta.cos();
        let sin_theta = theta.sin();
        let clamp = self.edge_clamp(tau.re, omega);

        let cos_sigma_k = cpowi(cos_sigma, k);
        let cos_sigma_km1 = cpowi(cos_sigma, k - 1);

        let a0 = self.peak_vector_potential();
        let f0 = self.peak_field();
        let eps = Complex64::new(self.ellipticity, 0.0);
        let envelope = cos_sigma_k * clamp;

        let a_x0 = Complex64::new(a0, 0.0) * envelope * cos_theta;
        let a_y0 = Complex64::new(a0, 0.0) * envelope * eps * sin_theta;

        let ratio = Complex64::new(k as f64 / (2.0 * self.cycles), 0.0);
        let f_prefactor = Complex64::new(f0, 0.0) * cos_sigma_km1 * clamp;
        let f_x0 = f_prefactor * (cos_sigma * sin_theta + ratio * sin_sigma * cos_theta);
        let f_y0 = f_prefactor * eps * (ratio * sin_sigma * sin_theta - cos_sigma * cos_theta);

        let (a_x, a_y) = rotate_by_azimuth(a_x0, a_y0, self.azimuth);
        let (f_x, f_y) = rotate_by_azimuth(f_x0, f_y0, self.azimuth);
        (a_x, a_y, f_x, f_y)
    }
}

fn cpowi(z: Complex64, n: i32) -> Complex64 {
    let mut out = Complex64::new(1.0, 0.0);
    for _ in 0..n {
        out *= z;
    }
    out
}

impl Pulse for CosPowerPulse {
    fn peak_intensity(&self) -> f64 {
        self.peak_intensity
    }
    fn wavelength(&self) -> f64 {
        self.wavelength
    }
    fn ellipticity(&self) -> f64 {
        self.ellipticity
    }
    fn azimuth(&self) -> f64 {
        self.azimuth
    }
    fn cep(&self) -> f64 {
        self.cep
    }
    fn time_shift(&self) -> f64 {
        self.time_shift
    }
    fn is_monochromatic(&self) -> bool {
        true
    }

    fn unit_envelope(&self, t: f64) -> f64 {
        let omega = self.angular_frequency();
        let tau = t - self.time_shift;
        if (omega * tau).abs() >= self.cycles * PI {
            return 0.0;
        }
        let sigma = omega * tau / (2.0 * self.cycles);
        let mut value = sigma.cos().powi(self.power.k());
        value *= self.edge_clamp(tau, omega);
        value
    }

    fn vector_potential(&self, t: Complex64) -> (Complex64, Complex64) {
        let (a_x, a_y, _, _) = self.components(t);
        (a_x, a_y)
    }

    fn electric_field(&self, t: Complex64) -> (Complex64, Complex64) {
        let (_, _, f_x, f_y) = self.components(t);
        (f_x, f_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_bounded_and_peaks_at_time_shift() {
        let pulse = CosPowerPulse::new(4.0e14, 800.0, 2.0, EnvelopePower::Four).unwrap();
        for i in 0..200 {
            let t = -20.0 + 0.2 * i as f64;
            let u = pulse.unit_envelope(t);
            assert!((0.0..=1.0).contains(&u), "u({}) = {} out of range", t, u);
        }
        assert!((pulse.unit_envelope(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn circular_cos4_matches_closed_form_at_peak() {
        let pulse = CosPowerPulse::new(4.0e14, 800.0, 2.0, EnvelopePower::Four)
            .unwrap()
            .with_ellipticity(1.0)
            .unwrap();
        let (a_x, a_y) = pulse.vector_potential(Complex64::new(0.0, 0.0));
        assert!((a_x.re - pulse.peak_vector_potential()).abs() < 1e-9);
        assert!(a_y.re.abs() < 1e-9);

        let (f_x, f_y) = pulse.electric_field(Complex64::new(0.0, 0.0));
        assert!(f_x.re.abs() < 1e-9);
        assert!((f_y.re - (-pulse.peak_field())).abs() < 1e-9);
    }

    #[test]
    fn linear_cos2_has_vanishing_ay_and_fx_at_origin() {
        let pulse = CosPowerPulse::new(4.0e14, 800.0, 3.0, EnvelopePower::Two).unwrap();
        let (_, a_y) = pulse.vector_potential(Complex64::new(0.0, 0.0));
        assert!(a_y.re.abs() < 1e-12);
        let (f_x, _) = pulse.electric_field(Complex64::new(0.0, 0.0));
        assert!(f_x.re.abs() < 1e-9);
    }

    #[test]
    fn field_is_minus_derivative_of_potential() {
        for power in [EnvelopePower::Two, EnvelopePower::Four] {
            let pulse = CosPowerPulse::new(4.0e14, 800.0, 3.0, power).unwrap()
                .with_ellipticity(0.6)
                .unwrap();
            let h = 1.0e-6;
            for i in 0..20 {
                let t = -30.0 + 3.0 * i as f64;
                let (a_plus_x, a_plus_y) = pulse.vector_potential(Complex64::new(t + h, 0.0));
                let (a_minus_x, a_minus_y) = pulse.vector_potential(Complex64::new(t - h, 0.0));
                let fd_x = -(a_plus_x.re - a_minus_x.re) / (2.0 * h);
                let fd_y = -(a_plus_y.re - a_minus_y.re) / (2.0 * h);
                let (f_x, f_y) = pulse.electric_field(Complex64::new(t, 0.0));
                let scale = pulse.peak_field().max(1e-12);
                assert!((fd_x - f_x.re).abs() / scale < 1e-5, "F_x mismatch at t={}", t);
                assert!((fd_y - f_y.re).abs() / scale < 1e-5, "F_y mismatch at t={}", t);
            }
        }
    }
}

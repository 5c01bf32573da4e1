use super::{rotate_by_azimuth, Pulse};
use crate::error::ConfigError;
use num_complex::Complex64;

/// A monochromatic carrier under a piecewise-linear trapezoidal envelope:
/// `n_on` cycles ramping up, `n_const` cycles at full amplitude, `n_off`
/// cycles ramping down. The envelope's derivative is the simple step
/// function `1/t_on`, `0`, `-1/t_off`, which the field picks up as an
/// explicit extra term alongside the carrier's own oscillation.
#[derive(Debug, Copy, Clone)]
pub struct TrapezoidalPulse {
    peak_intensity: f64,
    wavelength: f64,
    n_on: f64,
    n_const: f64,
    n_off: f64,
    ellipticity: f64,
    azimuth: f64,
    cep: f64,
    time_shift: f64,
}

impl TrapezoidalPulse {
    pub fn new(peak_intensity: f64, wavelength: f64, n_on: f64, n_const: f64, n_off: f64) -> Result<Self, ConfigError> {
        if peak_intensity <= 0.0 {
            return Err(ConfigError::NonPositiveIntensity(peak_intensity));
        }
        if wavelength <= 0.0 {
            return Err(ConfigError::NonPositiveWavelength(wavelength));
        }
        if n_on <= 0.0 {
            return Err(ConfigError::NonPositiveCycleCount(n_on));
        }
        if n_off <= 0.0 {
            return Err(ConfigError::NonPositiveCycleCount(n_off));
        }
        if n_const < 0.0 {
            return Err(ConfigError::NonPositiveCycleCount(n_const));
        }
        Ok(TrapezoidalPulse {
            peak_intensity,
            wavelength,
            n_on,
            n_const,
            n_off,
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
        Ok(TrapezoidalPulse { ellipticity, ..*self })
    }

    pub fn with_azimuth(&self, azimuth: f64) -> Self {
        TrapezoidalPulse { azimuth, ..*self }
    }

    pub fn with_cep(&self, cep: f64) -> Self {
        TrapezoidalPulse { cep, ..*self }
    }

    pub fn with_time_shift(&self, time_shift: f64) -> Self {
        TrapezoidalPulse { time_shift, ..*self }
    }

    fn t_on(&self) -> f64 {
        self.n_on * self.period()
    }

    fn t_const(&self) -> f64 {
        self.n_const * self.period()
    }

    fn t_off(&self) -> f64 {
        self.n_off * self.period()
    }

    /// Returns `(u(tau), u'(tau))`; the region is selected by `Re(tau)` and
    /// the piecewise-linear value is then extended to the complex `tau`
    /// that was actually passed in, which is exact since each piece is
    /// affine. The pulse turns on at `tau = 0`: ramp-up on `(0, t_on)`,
    /// plateau on `[t_on, t_on+t_const]`, ramp-down on
    /// `(t_on+t_const, t_on+t_const+t_off)`, zero elsewhere.
    fn envelope(&self, tau: Complex64) -> (Complex64, f64) {
        let t_on = self.t_on();
        let plateau_end = t_on + self.t_const();
        let t_off = self.t_off();
        let total = plateau_end + t_off;
        let re = tau.re;

        if re < 0.0 || re > total {
            (Complex64::new(0.0, 0.0), 0.0)
        } else if re < t_on {
            (tau / t_on, 1.0 / t_on)
        } else if re <= plateau_end {
            (Complex64::new(1.0, 0.0), 0.0)
        } else {
            let u = (Complex64::new(total, 0.0) - tau) / t_off;
            (u, -1.0 / t_off)
        }
    }

    fn components(&self, t: Complex64) -> (Complex64, Complex64, Complex64, Complex64) {
        let omega = self.angular_frequency();
        let tau = t - Complex64::new(self.time_shift, 0.0);
        let (u, u_prime) = self.envelope(tau);

        let theta = omega * tau + Complex64::new(self.cep, 0.0);
        let cos_theta = theta.cos();
        let sin_theta = theta.sin();

        let a0 = self.peak_vector_potential();
        let f0 = self.peak_field();
        let eps = Complex64::new(self.ellipticity, 0.0);

        let a_x0 = Complex64::new(a0, 0.0) * u * cos_theta;
        let a_y0 = Complex64::new(a0, 0.0) * u * eps * sin_theta;

        let f_x0 = Complex64::new(f0, 0.0) * u * sin_theta - Complex64::new(a0 * u_prime, 0.0) * cos_theta;
        let f_y0 = -Complex64::new(f0, 0.0) * eps * u * cos_theta - Complex64::new(a0 * u_prime, 0.0) * eps * sin_theta;

        let (a_x, a_y) = rotate_by_azimuth(a_x0, a_y0, self.azimuth);
        let (f_x, f_y) = rotate_by_azimuth(f_x0, f_y0, self.azimuth);
        (a_x, a_y, f_x, f_y)
    }
}

impl Pulse for TrapezoidalPulse {
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
        let tau = t - self.time_shift;
        self.envelope(Complex64::new(tau, 0.0)).0.re
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
    fn plateau_has_full_unit_envelope() {
        let pulse = TrapezoidalPulse::new(4.0e14, 800.0, 2.0, 3.0, 2.0).unwrap();
        let mid_plateau = pulse.t_on() + pulse.t_const() / 2.0;
        assert!((pulse.unit_envelope(mid_plateau) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn envelope_vanishes_outside_pulse() {
        let pulse = TrapezoidalPulse::new(4.0e14, 800.0, 2.0, 1.0, 2.0).unwrap();
        let total = pulse.t_on() + pulse.t_const() + pulse.t_off();
        assert_eq!(pulse.unit_envelope(total + 10.0), 0.0);
        assert_eq!(pulse.unit_envelope(-10.0), 0.0);
    }

    #[test]
    fn field_is_minus_derivative_of_potential() {
        let pulse = TrapezoidalPulse::new(4.0e14, 800.0, 2.0, 3.0, 2.0)
            .unwrap()
            .with_ellipticity(0.4)
            .unwrap();
        let total = pulse.t_on() + pulse.t_const() + pulse.t_off();
        let h = 1.0e-6;
        for i in 0..20 {
            let t = -5.0 + (total + 10.0) * i as f64 / 19.0;
            let (a_plus_x, a_plus_y) = pulse.vector_potential(Complex64::new(t + h, 0.0));
            let (a_minus_x, a_minus_y) = pulse.vector_potential(Complex64::new(t - h, 0.0));
            let fd_x = -(a_plus_x.re - a_minus_x.re) / (2.0 * h);
            let fd_y = -(a_plus_y.re - a_minus_y.re) / (2.0 * h);
            let (f_x, f_y) = pulse.electric_field(Complex64::new(t, 0.0));
            let scale = pulse.peak_field().max(1e-12);
            assert!((fd_x - f_x.re).abs() / scale < 1e-4, "F_x mismatch at t={}", t);
            assert!((fd_y - f_y.re).abs() / scale < 1e-4, "F_y mismatch at t={}", t);
        }
    }

    #[test]
    fn zero_plateau_ramps_straight_through() {
        let pulse = TrapezoidalPulse::new(4.0e14, 800.0, 2.0, 0.0, 2.0).unwrap();
        assert!((pulse.unit_envelope(pulse.t_on()) - 1.0).abs() < 1e-9);
    }
}

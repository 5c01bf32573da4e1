//! Real spherical-harmonic and Wigner rotation-matrix kernels.
//!
//! `Y_{l,m}` is evaluated as a regular solid harmonic: a homogeneous
//! polynomial in the (possibly complex) Cartesian momentum components,
//! which stays well-defined off the real axis where a direction-cosine
//! formulation (`acos`, `atan2`) would not. `D^l_{m1,m2}` is the usual
//! Wigner small-d times the two Euler-angle phases.
//!
//! Wigner-D depends only on the batch's Euler angles and is genuinely
//! memoized once per batch in [WignerTable]; `Y` depends on the per-candidate
//! momentum and is recomputed for each one, but always into the dense,
//! explicitly-offset `[l, m+l, m'+l]` layout.

use num_complex::Complex64;

fn factorial(n: i64) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Regular complex solid harmonics `R_l^{+-m}(x,y,z)`, built by the standard
/// diagonal-seeded two-term recurrence (as used for regular solid harmonics
/// in fast multipole expansions). Works for complex `x,y,z` since every step
/// is polynomial.
struct SolidHarmonics {
    l_max: usize,
    pos: Vec<Complex64>, // flat [l][m], m = 0..=l, R_l^{+m}
    neg: Vec<Complex64>, // flat [l][m], m = 0..=l, R_l^{-m} (m=0 slot unused)
}

impl SolidHarmonics {
    fn build(l_max: usize, x: Complex64, y: Complex64, z: Complex64) -> Self {
        let dim = (l_max + 1) * (l_max + 1);
        let mut pos = vec![Complex64::new(0.0, 0.0); dim];
        let mut neg = vec![Complex64::new(0.0, 0.0); dim];
        let idx = |l: usize, m: usize| l * (l_max + 1) + m;

        let r2 = x * x + y * y + z * z;
        pos[idx(0, 0)] = Complex64::new(1.0, 0.0);

        let xy_plus = x + Complex64::new(0.0, 1.0) * y;
        let xy_minus = x - Complex64::new(0.0, 1.0) * y;

        // Diagonal chains: R_m^{+-m} from R_{m-1}^{+-(m-1)}.
        for m in 1..=l_max {
            let prev_pos = pos[idx(m - 1, m - 1)];
            let prev_neg = if m == 1 { pos[idx(0, 0)] } else { neg[idx(m - 1, m - 1)] };
            pos[idx(m, m)] = xy_plus * prev_pos / (2.0 * m as f64);
            neg[idx(m, m)] = xy_minus * prev_neg / (2.0 * m as f64);
        }

        // Subdiagonal: R_{m+1}^{+-m} = z * R_m^{+-m}.
        for m in 0..=l_max {
            if m + 1 <= l_max {
                pos[idx(m + 1, m)] = z * pos[idx(m, m)];
                if m > 0 {
                    neg[idx(m + 1, m)] = z * neg[idx(m, m)];
                }
            }
        }

        // Vertical recurrence for l >= m+2.
        for m in 0..=l_max {
            let mut l = m + 2;
            while l <= l_max {
                let denom = (l * l) as f64 - (m * m) as f64;
                pos[idx(l, m)] =
                    ((2 * l - 1) as f64 * z * pos[idx(l - 1, m)] - r2 * pos[idx(l - 2, m)]) / denom;
                if m > 0 {
                    neg[idx(l, m)] =
                        ((2 * l - 1) as f64 * z * neg[idx(l - 1, m)] - r2 * neg[idx(l - 2, m)]) / denom;
                }
                l += 1;
            }
        }

        SolidHarmonics { l_max, pos, neg }
    }

    fn r_pos(&self, l: usize, m: usize) -> Complex64 {
        self.pos[l * (self.l_max + 1) + m]
    }

    fn r_neg(&self, l: usize, m: usize) -> Complex64 {
        if m == 0 {
            Complex64::new(0.0, 0.0)
        } else {
            self.neg[l * (self.l_max + 1) + m]
        }
    }
}

fn real_tesseral(l: usize, m: i32, harmonics: &SolidHarmonics) -> Complex64 {
    let sqrt2 = std::f64::consts::SQRT_2;
    if m == 0 {
        harmonics.r_pos(l, 0)
    } else if m > 0 {
        let mu = m as usize;
        let sign = if mu % 2 == 0 { 1.0 } else { -1.0 };
        (harmonics.r_neg(l, mu) + harmonics.r_pos(l, mu) * sign) / sqrt2
    } else {
        let mu = (-m) as usize;
        let sign = if mu % 2 == 0 { 1.0 } else { -1.0 };
        Complex64::new(0.0, 1.0) * (harmonics.r_neg(l, mu) - harmonics.r_pos(l, mu) * sign) / sqrt2
    }
}

/// Evaluates the real tesseral harmonics `Y_{l,m}` for `l` in `0..=l_max`
/// into a flat table indexed `[l, m+l_max]` (width `2*l_max+1`).
pub fn solid_harmonic_y(l_max: usize, direction: (Complex64, Complex64, Complex64)) -> Vec<Complex64> {
    let (x, y, z) = direction;
    let harmonics = SolidHarmonics::build(l_max, x, y, z);
    let width = 2 * l_max + 1;
    let mut table = vec![Complex64::new(0.0, 0.0); (l_max + 1) * width];
    for l in 0..=l_max {
        for m in -(l as i32)..=(l as i32) {
            table[l * width + (m + l_max as i32) as usize] = real_tesseral(l, m, &harmonics);
        }
    }
    table
}

/// Wigner small-d, via the explicit Jacobi-polynomial sum.
fn small_d(l: i64, m1: i64, m2: i64, beta: f64) -> f64 {
    let s_min = 0.max(m2 - m1);
    let s_max = (l + m2).min(l - m1);
    let half = beta / 2.0;
    let cos_h = half.cos();
    let sin_h = half.sin();
    let mut total = 0.0;
    let mut s = s_min;
    while s <= s_max {
        let sign = if (m1 - m2 + s).rem_euclid(2) == 0 { 1.0 } else { -1.0 };
        let numerator =
            (factorial(l + m2) * factorial(l - m2) * factorial(l + m1) * factorial(l - m1)).sqrt();
        let denominator =
            factorial(l + m2 - s) * factorial(s) * factorial(l - m1 - s) * factorial(s + m1 - m2);
        let cos_power = (2 * l + m2 - m1 - 2 * s) as i32;
        let sin_power = (2 * s + m1 - m2) as i32;
        total += sign * (numerator / denominator) * cos_h.powi(cos_power) * sin_h.powi(sin_power);
        s += 1;
    }
    total
}

/// `D^l_{m1,m2}(alpha, beta, gamma) = e^{-i m1 alpha} d^l_{m1,m2}(beta) e^{-i m2 gamma}`.
fn wigner_d(l: i64, m1: i64, m2: i64, alpha: f64, beta: f64, gamma: f64) -> Complex64 {
    let phase = Complex64::from_polar(1.0, -(m1 as f64) * alpha)
        * Complex64::from_polar(1.0, -(m2 as f64) * gamma);
    phase * small_d(l, m1, m2, beta)
}

/// The batch-level memoization of `D^l_{m1,m2}(alpha,beta,gamma)`: fixed for
/// the whole batch since the Euler angles only depend on the exit azimuth
/// and the target's orientation, not on the per-candidate momentum.
pub struct WignerTable {
    l_max: usize,
    data: Vec<Complex64>, // flat [l][m1+l_max][m2+l_max]
}

impl WignerTable {
    pub fn new(l_max: usize, euler: (f64, f64, f64)) -> Self {
        let (alpha, beta, gamma) = euler;
        let width = 2 * l_max + 1;
        let mut data = vec![Complex64::new(0.0, 0.0); (l_max + 1) * width * width];
        for l in 0..=l_max {
            for m1 in -(l as i32)..=(l as i32) {
                for m2 in -(l as i32)..=(l as i32) {
                    let offset = l * width * width
                        + (m1 + l_max as i32) as usize * width
                        + (m2 + l_max as i32) as usize;
                    data[offset] = wigner_d(l as i64, m1 as i64, m2 as i64, alpha, beta, gamma);
                }
            }
        }
        WignerTable { l_max, data }
    }

    pub fn get(&self, l: usize, m1: i32, m2: i32) -> Complex64 {
        let width = 2 * self.l_max + 1;
        let offset =
            l * width * width + (m1 + self.l_max as i32) as usize * width + (m2 + self.l_max as i32) as usize;
        self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y00_is_constant() {
        let table = solid_harmonic_y(0, (Complex64::new(0.3, 0.0), Complex64::new(-0.1, 0.0), Complex64::new(0.7, 0.0)));
        assert!((table[0] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn y10_is_proportional_to_z() {
        let table = solid_harmonic_y(1, (Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0), Complex64::new(2.0, 0.0)));
        // width = 3, l=1 block starts at index 3: [m=-1, m=0, m=1]
        assert!(table[3 + 1].norm() > 0.0);
        assert!(table[3 + 0].norm() < 1e-12 && table[3 + 2].norm() < 1e-12);
    }

    #[test]
    fn wigner_d_identity_at_zero_angles() {
        let table = WignerTable::new(2, (0.0, 0.0, 0.0));
        for l in 0..=2usize {
            for m in -(l as i32)..=(l as i32) {
                let d = table.get(l, m, m);
                assert!((d - Complex64::new(1.0, 0.0)).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn small_d_zero_for_l0() {
        assert!((small_d(0, 0, 0, 1.234) - 1.0).abs() < 1e-12);
    }
}

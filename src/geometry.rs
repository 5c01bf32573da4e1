//! Cartesian geometry shared by the pulse, target, and angular-kernel
//! components: a plain real three-vector, and the instantaneous field frame
//! (FF) built from the field direction at a tunneling-exit time.

use num_complex::Complex64;
use std::ops::{Add, Index, Mul, Sub};

/// A real three-vector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ThreeVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ThreeVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        ThreeVector { x, y, z }
    }

    pub fn dot(&self, other: ThreeVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: ThreeVector) -> ThreeVector {
        ThreeVector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Index<usize> for ThreeVector {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index {} out of range for ThreeVector", i),
        }
    }
}

impl Add for ThreeVector {
    type Output = ThreeVector;
    fn add(self, other: ThreeVector) -> ThreeVector {
        ThreeVector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for ThreeVector {
    type Output = ThreeVector;
    fn sub(self, other: ThreeVector) -> ThreeVector {
        ThreeVector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for ThreeVector {
    type Output = ThreeVector;
    fn mul(self, s: f64) -> ThreeVector {
        ThreeVector::new(self.x * s, self.y * s, self.z * s)
    }
}

/// The instantaneous field frame (FF) at a tunneling-exit time: `x_hat`
/// points along the tunneling-exit direction (opposite the field), `z_hat`
/// is the fixed lab axis, and `y_hat` completes a right-handed triad.
#[derive(Debug, Copy, Clone)]
pub struct FieldFrame {
    pub x_hat: ThreeVector,
    pub y_hat: ThreeVector,
    pub z_hat: ThreeVector,
    /// `|F(t_r)|`.
    pub magnitude: f64,
    /// `atan2(-F_y, -F_x)`.
    pub exit_azimuth: f64,
}

impl FieldFrame {
    pub fn from_field(f_x: f64, f_y: f64) -> Self {
        let magnitude = (f_x * f_x + f_y * f_y).sqrt();
        let exit_azimuth = (-f_y).atan2(-f_x);
        let z_hat = ThreeVector::new(0.0, 0.0, 1.0);
        let x_hat = ThreeVector::new(exit_azimuth.cos(), exit_azimuth.sin(), 0.0);
        let y_hat = z_hat.cross(x_hat);
        FieldFrame {
            x_hat,
            y_hat,
            z_hat,
            magnitude,
            exit_azimuth,
        }
    }

    /// The lab-frame field vector `(F_x, F_y)` this triad was built from.
    pub fn field_vector(&self) -> (f64, f64) {
        (-self.magnitude * self.x_hat.x, -self.magnitude * self.x_hat.y)
    }

    /// Projects a (possibly complex) lab-frame vector onto the FF triad,
    /// returning its `(x_FF, y_FF, z_FF)` components.
    pub fn project(&self, v: (Complex64, Complex64, Complex64)) -> (Complex64, Complex64, Complex64) {
        let (vx, vy, vz) = v;
        let x = vx * self.x_hat.x + vy * self.x_hat.y + vz * self.x_hat.z;
        let y = vx * self.y_hat.x + vy * self.y_hat.y + vz * self.y_hat.z;
        let z = vx * self.z_hat.x + vy * self.z_hat.y + vz * self.z_hat.z;
        (x, y, z)
    }
}

/// Composes a target's fixed lab-frame orientation with the instantaneous
/// exit azimuth to give the Euler angles (ZYZ, passive) that rotate the
/// field frame into the molecular frame.
///
/// The FF and lab frame share the same `z` axis and differ only by a
/// rotation about it, so composing the two just shifts the first Euler
/// angle by `exit_azimuth`.
pub fn ff_to_mf_euler_angles(mol_euler: (f64, f64, f64), exit_azimuth: f64) -> (f64, f64, f64) {
    let (alpha, beta, gamma) = mol_euler;
    (alpha + exit_azimuth, beta, gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triad_is_orthonormal_and_right_handed() {
        let frame = FieldFrame::from_field(0.3, -0.7);
        assert!((frame.x_hat.dot(frame.x_hat) - 1.0).abs() < 1e-12);
        assert!((frame.y_hat.dot(frame.y_hat) - 1.0).abs() < 1e-12);
        assert!(frame.x_hat.dot(frame.y_hat).abs() < 1e-12);
        assert!(frame.x_hat.cross(frame.y_hat).dot(frame.z_hat) - 1.0 < 1e-12);
    }

    #[test]
    fn x_hat_points_away_from_field() {
        let frame = FieldFrame::from_field(1.0, 0.0);
        assert!((frame.x_hat.x - (-1.0)).abs() < 1e-12);
        assert!(frame.x_hat.y.abs() < 1e-12);
    }
}

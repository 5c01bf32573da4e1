/// One emitted trajectory seed: a tunneling-exit position, transverse plus
/// longitudinal momentum, birth time, ionization-rate weight, and
/// (depending on the phase method) an initial quantum phase. `z0`/`k_z` are
/// `None` in 2D sampling; `phase` is `None` for CTMC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SeedRow {
    pub x0: f64,
    pub y0: f64,
    pub z0: Option<f64>,
    pub k_x: f64,
    pub k_y: f64,
    pub k_z: Option<f64>,
    pub t_r: f64,
    pub rate: f64,
    pub phase: Option<f64>,
}

impl SeedRow {
    /// Packed row width: 6/7 (2D) or 8/9 (3D), with the phase column
    /// present only for non-CTMC phase methods.
    pub fn width(&self) -> usize {
        let mut w = 5; // x0, y0, k_x, k_y, t_r
        w += 1; // rate
        if self.z0.is_some() {
            w += 1;
        }
        if self.k_z.is_some() {
            w += 1;
        }
        if self.phase.is_some() {
            w += 1;
        }
        w
    }

    /// Packs the row into the column layout described in the data model:
    /// `(x0, y0, [z0], k_x, k_y, [k_z], t_r, rate, [phase])`.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width());
        out.push(self.x0);
        out.push(self.y0);
        if let Some(z0) = self.z0 {
            out.push(z0);
        }
        out.push(self.k_x);
        out.push(self.k_y);
        if let Some(k_z) = self.k_z {
            out.push(k_z);
        }
        out.push(self.t_r);
        out.push(self.rate);
        if let Some(phase) = self.phase {
            out.push(phase);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_matches_2d_ctmc() {
        let row = SeedRow {
            x0: 0.0,
            y0: 0.0,
            z0: None,
            k_x: 0.0,
            k_y: 0.0,
            k_z: None,
            t_r: 0.0,
            rate: 1.0,
            phase: None,
        };
        assert_eq!(row.width(), 6);
        assert_eq!(row.to_vec().len(), 6);
    }

    #[test]
    fn width_matches_3d_with_phase() {
        let row = SeedRow {
            x0: 0.0,
            y0: 0.0,
            z0: Some(0.0),
            k_x: 0.0,
            k_y: 0.0,
            k_z: Some(0.0),
            t_r: 0.0,
            rate: 1.0,
            phase: Some(0.2),
        };
        assert_eq!(row.width(), 9);
        assert_eq!(row.to_vec().len(), 9);
    }
}

//! Symmetric logarithmic brightness scale.
//!
//! Values within `linthresh` of zero are scaled linearly; beyond that the
//! magnitude is compressed logarithmically with the sign preserved. The
//! transformed value is then normalized between the transforms of `vmin`
//! and `vmax` and quantized through a 256-entry gray lookup table.

/// Number of gray levels in the lookup table.
const GRAY_LEVELS: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymLogNorm {
    pub linthresh: f64,
    pub linscale: f64,
    pub vmin: f64,
    pub vmax: f64,
    pub base: f64,
}

impl Default for SymLogNorm {
    /// `linthresh = 10`, `linscale = 1`, `vmin = -50`, `vmax = 2^16`, base 10.
    fn default() -> Self {
        SymLogNorm {
            linthresh: 10.0,
            linscale: 1.0,
            vmin: -50.0,
            vmax: (1u32 << 16) as f64,
            base: 10.0,
        }
    }
}

impl SymLogNorm {
    /// Slope of the linear segment, chosen so the linear part spans
    /// `linscale` decades.
    fn linscale_adj(&self) -> f64 {
        self.linscale / (1.0 - self.base.recip())
    }

    /// Forward transform, before normalization.
    pub fn transform(&self, v: f64) -> f64 {
        let adj = self.linscale_adj();
        let mag = v.abs();
        if mag <= self.linthresh {
            v * adj
        } else {
            v.signum() * self.linthresh * (adj + (mag / self.linthresh).log(self.base))
        }
    }

    /// Map `v` into `[0, 1]`; values outside `[vmin, vmax]` are clamped.
    ///
    /// Returns NaN for NaN input.
    pub fn normalize(&self, v: f64) -> f64 {
        if v.is_nan() {
            return f64::NAN;
        }
        let lo = self.transform(self.vmin);
        let hi = self.transform(self.vmax);
        let clamped = v.clamp(self.vmin, self.vmax);
        ((self.transform(clamped) - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// Gray level for `v`, or `None` for a pixel with no data.
    pub fn gray(&self, v: f64) -> Option<u8> {
        let n = self.normalize(v);
        if n.is_nan() {
            return None;
        }
        Some((n * GRAY_LEVELS).floor().min(GRAY_LEVELS - 1.0) as u8)
    }
}

//! Point sources and their time dependence.

use crate::constants::PI;
use num_complex::Complex64;
use std::fmt;

/// Field component selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Ex,
    Ey,
    Ez,
    Er,
    Ep,
    Hx,
    Hy,
    Hz,
    Hr,
    Hp,
}

impl Component {
    /// Whether this is a magnetic field component.
    pub fn is_magnetic(self) -> bool {
        matches!(
            self,
            Component::Hx | Component::Hy | Component::Hz | Component::Hr | Component::Hp
        )
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Ex => "Ex",
            Component::Ey => "Ey",
            Component::Ez => "Ez",
            Component::Er => "Er",
            Component::Ep => "Ep",
            Component::Hx => "Hx",
            Component::Hy => "Hy",
            Component::Hz => "Hz",
            Component::Hr => "Hr",
            Component::Hp => "Hp",
        };
        f.write_str(name)
    }
}

/// Gaussian-enveloped oscillation.
///
/// `s(t) = exp(-2πi f t) * exp(-(t - t0)² / (2 w²))` while
/// `|t - t0| <= cutoff * w`, zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSource {
    /// Carrier frequency
    pub frequency: f64,
    /// Envelope width
    pub width: f64,
    /// Time of the envelope peak
    pub peak_time: f64,
    /// Half-duration of the pulse in units of `width`
    pub cutoff: f64,
}

impl GaussianSource {
    pub fn new(frequency: f64, width: f64, peak_time: f64, cutoff: f64) -> Self {
        Self {
            frequency,
            width,
            peak_time,
            cutoff,
        }
    }

    /// Time after which the source is off.
    pub fn last_time(&self) -> f64 {
        self.peak_time + self.cutoff * self.width
    }

    /// Whether the source is on at time `t`.
    pub fn is_active(&self, t: f64) -> bool {
        (t - self.peak_time).abs() <= self.cutoff * self.width
    }

    /// Complex amplitude at time `t`.
    pub fn amplitude_at(&self, t: f64) -> Complex64 {
        if !self.is_active(t) {
            return Complex64::new(0.0, 0.0);
        }
        let arg = (t - self.peak_time) / self.width;
        let envelope = (-0.5 * arg * arg).exp();
        Complex64::from_polar(envelope, -2.0 * PI * self.frequency * t)
    }
}

//! Frequency-response sweeps over rational transfer functions.

use std::io;
use std::io::Write;

use crate::math::{CScalar, Scalar};

use super::poly::CPoly;

/// Converts a frequency in hertz to angular frequency ω (rad/s).
#[must_use]
pub fn angular_frequency(frequency_hz: Scalar) -> Scalar {
    2.0 * std::f64::consts::PI * frequency_hz
}

/// Generates `n` linearly spaced samples in `[start, stop]`.
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples between `start_hz` and
/// `stop_hz`. Requires both endpoints to be positive.
#[must_use]
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    assert!(start_hz > 0.0 && stop_hz > 0.0);
    match n {
        0 => Vec::new(),
        1 => vec![start_hz],
        _ => {
            let log_start = start_hz.log10();
            let step = (stop_hz.log10() - log_start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect()
        }
    }
}

/// Response of a rational function at a single angular frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    /// Angular frequency ω in rad/s.
    pub omega: Scalar,
    /// Value of `N(jω) / D(jω)`.
    pub response: CScalar,
}

/// Evaluates `numerator / denominator` at `s = jω` across the provided
/// angular frequencies. Points where the denominator vanishes report an
/// infinite response.
#[must_use]
pub fn sweep_rational<I>(numerator: &CPoly, denominator: &CPoly, omegas: I) -> Vec<FrequencyPoint>
where
    I: IntoIterator<Item = Scalar>,
{
    omegas
        .into_iter()
        .map(|omega| {
            let s = CScalar::new(0.0, omega);
            let below = denominator.evaluate(s);
            let response = if below.norm() <= Scalar::EPSILON {
                CScalar::new(Scalar::INFINITY, 0.0)
            } else {
                numerator.evaluate(s) / below
            };
            FrequencyPoint { omega, response }
        })
        .collect()
}

/// Gain magnitude in dB (`20 log10 |T|`) per swept point, clamping very
/// small values.
#[must_use]
pub fn mag_db(points: &[FrequencyPoint]) -> Vec<Scalar> {
    const MIN: Scalar = 1e-300;
    points
        .iter()
        .map(|p| 20.0 * p.response.norm().max(MIN).log10())
        .collect()
}

/// Phase in degrees per swept point.
#[must_use]
pub fn phase_deg(points: &[FrequencyPoint]) -> Vec<Scalar> {
    points
        .iter()
        .map(|p| p.response.arg().to_degrees())
        .collect()
}

/// Writes a `FrequencyPoint` vector to a CSV writer.
pub fn write_frequency_points_csv<W: Write>(
    mut w: W,
    points: &[FrequencyPoint],
) -> io::Result<()> {
    writeln!(w, "omega,ReT,ImT")?;
    for p in points {
        writeln!(w, "{:.16e},{:.16e},{:.16e}", p.omega, p.response.re, p.response.im)?;
    }
    Ok(())
}

//! Closed-form time-domain response of decomposed rational functions.
//!
//! Each pole term maps to the inverse Laplace transform of
//! `A / (s - p)^n`: an exponential envelope from `Re(p)`, an oscillation
//! from `Im(p)`, and for repeated poles the polynomial ramp
//! `t^{n-1} / (n-1)!`.

use std::io;
use std::io::Write;

use crate::math::{factorial, Scalar};

use super::pfd::PoleTerm;

/// Evaluates the inverse transform of one pole term at time `t`.
#[must_use]
pub fn pole_term_response(term: &PoleTerm, t: Scalar) -> Scalar {
    let envelope = (term.pole.re * t).exp();
    let oscillation = term.residue.re * (term.pole.im * t).cos()
        - term.residue.im * (term.pole.im * t).sin();
    let mut value = envelope * oscillation;
    if term.power > 1 {
        value *= t.powi(term.power as i32 - 1) / factorial(term.power - 1);
    }
    value
}

/// Evaluates the inverse transform of a whole decomposition at time `t`.
#[must_use]
pub fn time_response(terms: &[PoleTerm], t: Scalar) -> Scalar {
    terms.iter().map(|term| pole_term_response(term, t)).sum()
}

/// Sampled response over a uniform time grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseWaveform {
    /// Sample instants, starting at `t = 0`.
    pub times: Vec<Scalar>,
    /// Response value per sample.
    pub values: Vec<Scalar>,
}

impl ResponseWaveform {
    /// Total captured samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if no samples were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Samples the response from `t = 0` through `duration` at `step`
/// increments (both endpoints included).
///
/// # Panics
///
/// `step` must be positive.
#[must_use]
pub fn sample_response(terms: &[PoleTerm], duration: Scalar, step: Scalar) -> ResponseWaveform {
    assert!(step > 0.0, "time step must be positive");
    let samples = (duration / step).floor() as usize + 1;
    let mut waveform = ResponseWaveform::default();
    let mut t = 0.0;
    for _ in 0..samples {
        waveform.times.push(t);
        waveform.values.push(time_response(terms, t));
        t += step;
    }
    waveform
}

/// Writes a CSV of a sampled response.
pub fn write_response_csv<W: Write>(mut w: W, waveform: &ResponseWaveform) -> io::Result<()> {
    writeln!(w, "time,value")?;
    for (time, value) in waveform.times.iter().zip(&waveform.values) {
        writeln!(w, "{:.16e},{:.16e}", time, value)?;
    }
    Ok(())
}

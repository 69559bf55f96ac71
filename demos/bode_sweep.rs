//! Bode-style sweep of a rational transfer function.
//!
//! Sweeps `T(s) = 10 / (s² + 2s + 10)` over three decades and prints
//! angular frequency, magnitude in dB, and phase in degrees.

use sfg_analysis::prelude::*;

fn main() {
    let numerator = CPoly::from_real(&[10.0]);
    let denominator = CPoly::from_real(&[10.0, 2.0, 1.0]);

    let omegas: Vec<Scalar> = logspace_hz(0.01, 10.0, 25)
        .into_iter()
        .map(angular_frequency)
        .collect();
    let points = sweep_rational(&numerator, &denominator, omegas);
    let magnitudes = mag_db(&points);
    let phases = phase_deg(&points);

    println!("omega,mag_db,phase_deg");
    for ((point, db), phase) in points.iter().zip(&magnitudes).zip(&phases) {
        println!("{:.6e},{:.3},{:.3}", point.omega, db, phase);
    }
}

//! Simultaneous root finding for monic complex polynomials.
//!
//! Durand-Kerner (Weierstrass) iteration: all root estimates are refined
//! together, each against the product of its distances to the others. The
//! method is best-effort; convergence is not guaranteed and the iteration
//! budget is the only hard stop. Repeated roots settle as clusters of
//! nearby estimates that a final merging pass collapses onto their mean.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::math::{CScalar, Scalar};

use super::poly::{guarded_div, CPoly};

/// Default convergence threshold on the largest per-pass correction.
pub const DEFAULT_TOLERANCE: Scalar = 1e-6;

/// Iteration budget and convergence controls for the root finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinderConfig {
    /// Iteration budget. Zero selects `100 × degree`.
    pub max_iterations: usize,
    /// Convergence threshold. Non-positive selects [`DEFAULT_TOLERANCE`].
    pub tolerance: Scalar,
    /// Seed for the initial-guess generator.
    pub seed: u64,
}

impl Default for RootFinderConfig {
    fn default() -> Self {
        Self {
            max_iterations: 0,
            tolerance: DEFAULT_TOLERANCE,
            seed: 0,
        }
    }
}

/// Diagnostics gathered during one root-finding run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootFinderReport {
    /// Passes executed.
    pub iterations: usize,
    /// Whether the largest correction dropped below tolerance.
    pub converged: bool,
    /// Largest correction magnitude in the final pass.
    pub last_correction: Scalar,
}

/// Finds all roots of a monic polynomial from generator-drawn guesses.
///
/// Guesses are drawn uniformly (independent magnitude and angle) inside the
/// disk of radius `1 + max|coefficient|`, which encloses every root. The
/// generator is seeded from the config, so runs are reproducible.
///
/// # Panics
///
/// The polynomial must be monic; normalization order is under caller
/// control, so a violation is a contract breach rather than a runtime
/// condition.
#[must_use]
pub fn find_roots(poly: &CPoly, config: &RootFinderConfig) -> (Vec<CScalar>, RootFinderReport) {
    let degree = poly.degree();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let radius = 1.0
        + poly
            .coeffs()
            .iter()
            .map(|coeff| coeff.norm())
            .fold(0.0, Scalar::max);
    let guesses = (0..degree)
        .map(|_| {
            let magnitude = rng.gen::<Scalar>() * radius;
            let angle = rng.gen::<Scalar>() * std::f64::consts::TAU;
            CScalar::from_polar(magnitude, angle)
        })
        .collect();
    find_roots_from(poly, guesses, config)
}

/// Finds all roots of a monic polynomial from caller-supplied guesses.
///
/// # Panics
///
/// The polynomial must be monic and `guesses` must hold one estimate per
/// root (see [`find_roots`]).
#[must_use]
pub fn find_roots_from(
    poly: &CPoly,
    guesses: Vec<CScalar>,
    config: &RootFinderConfig,
) -> (Vec<CScalar>, RootFinderReport) {
    assert!(poly.is_monic(), "root finding requires a monic polynomial");
    let degree = poly.degree();
    assert_eq!(guesses.len(), degree, "one initial guess per root");

    let tolerance = if config.tolerance <= 0.0 {
        DEFAULT_TOLERANCE
    } else {
        config.tolerance
    };
    let budget = if config.max_iterations == 0 {
        100 * degree
    } else {
        config.max_iterations
    };

    let mut roots = guesses;
    let mut report = RootFinderReport::default();
    if degree == 0 {
        report.converged = true;
        return (roots, report);
    }

    for pass in 0..budget {
        let mut worst = 0.0;
        for j in 0..degree {
            let value = poly.evaluate(roots[j]);
            let mut denominator = CScalar::new(1.0, 0.0);
            for k in 0..degree {
                if k == j {
                    continue;
                }
                let separation = roots[j] - roots[k];
                // Near-duplicate estimates contribute a unit factor
                // instead of collapsing the product.
                if separation.norm() < tolerance {
                    continue;
                }
                denominator *= separation;
            }
            let correction = guarded_div(value, denominator);
            roots[j] -= correction;
            worst = Scalar::max(worst, correction.norm());
        }
        report.iterations = pass + 1;
        report.last_correction = worst;
        if worst < tolerance {
            report.converged = true;
            break;
        }
    }

    merge_near_duplicates(&mut roots, tolerance);
    (roots, report)
}

/// Collapses clusters of estimates whose squared distance falls within
/// `tolerance` onto the cluster mean.
///
/// Estimates are scanned in index order; each not-yet-clustered estimate
/// collects every later one inside the tolerance, and the mean overwrites
/// all members. Repeated roots therefore come out as identical values.
fn merge_near_duplicates(roots: &mut [CScalar], tolerance: Scalar) {
    let count = roots.len();
    let mut clustered = vec![false; count];
    for i in 0..count {
        if clustered[i] {
            continue;
        }
        let mut members = vec![i];
        for j in (i + 1)..count {
            if !clustered[j] && (roots[j] - roots[i]).norm_sqr() <= tolerance {
                members.push(j);
            }
        }
        if members.len() == 1 {
            continue;
        }
        let mean =
            members.iter().map(|&m| roots[m]).sum::<CScalar>() / members.len() as Scalar;
        for &member in &members {
            roots[member] = mean;
            clustered[member] = true;
        }
    }
}

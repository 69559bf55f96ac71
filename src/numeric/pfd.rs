//! Partial-fraction decomposition over a known denominator root set.
//!
//! Residues for repeated poles come from the Taylor expansion of `N/Q`
//! about the pole, where `Q` is the denominator with the pole's own
//! factors removed: shifting both polynomials to the pole and dividing the
//! resulting power series yields the successive-derivative (cover-up)
//! values without any numeric differentiation.

use crate::math::{CScalar, Scalar};

use super::poly::{guarded_div, CPoly};
use super::roots::DEFAULT_TOLERANCE;

/// A single `residue / (s - pole)^power` contribution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleTerm {
    /// Complex residue `A`.
    pub residue: CScalar,
    /// Pole location `p`.
    pub pole: CScalar,
    /// Power `n` of the `(s - p)` factor.
    pub power: u32,
}

/// Decomposes `N(s) / Π (s - p_i)` into pole terms.
///
/// Repeated entries in `roots` encode multiplicity; entries are grouped by
/// the same near-duplicate tolerance the root finder merges with
/// (non-positive selects the default). One term is emitted per root-list
/// entry, in root-list order: the j-th occurrence of a pole value carries
/// power `multiplicity - j + 1`, so each pole group reads highest power
/// first.
///
/// # Panics
///
/// The numerator degree must be strictly below the denominator degree;
/// callers control the split, so a violation is a contract breach.
#[must_use]
pub fn partial_fractions(
    numerator: &CPoly,
    roots: &[CScalar],
    tolerance: Scalar,
) -> Vec<PoleTerm> {
    assert!(
        numerator.degree() < roots.len(),
        "numerator degree must be below denominator degree"
    );
    let tolerance = if tolerance <= 0.0 {
        DEFAULT_TOLERANCE
    } else {
        tolerance
    };
    let count = roots.len();

    // Group near-duplicate roots: every entry points at the first member
    // of its cluster.
    let mut cluster = vec![usize::MAX; count];
    for i in 0..count {
        if cluster[i] != usize::MAX {
            continue;
        }
        cluster[i] = i;
        for j in (i + 1)..count {
            if cluster[j] == usize::MAX && (roots[j] - roots[i]).norm_sqr() <= tolerance {
                cluster[j] = i;
            }
        }
    }

    // Expand N/Q about each distinct pole once.
    let mut expansions: Vec<Option<(CScalar, Vec<CScalar>, u32)>> = vec![None; count];
    for representative in 0..count {
        if cluster[representative] != representative {
            continue;
        }
        let members: Vec<usize> = (0..count)
            .filter(|&k| cluster[k] == representative)
            .collect();
        let multiplicity = members.len();
        let pole =
            members.iter().map(|&m| roots[m]).sum::<CScalar>() / multiplicity as Scalar;
        let others: Vec<CScalar> = (0..count)
            .filter(|&k| cluster[k] != representative)
            .map(|k| roots[k])
            .collect();
        let reduced = CPoly::from_roots(&others);
        let series = taylor_quotient(numerator, &reduced, pole, multiplicity);
        expansions[representative] = Some((pole, series, multiplicity as u32));
    }

    let mut occurrence = vec![0_u32; count];
    let mut terms = Vec::with_capacity(count);
    for i in 0..count {
        let representative = cluster[i];
        occurrence[representative] += 1;
        let position = occurrence[representative];
        if let Some((pole, series, multiplicity)) = &expansions[representative] {
            terms.push(PoleTerm {
                residue: series[(position - 1) as usize],
                pole: *pole,
                power: multiplicity - position + 1,
            });
        }
    }
    terms
}

/// First `count` Taylor coefficients of `numerator / divisor` about
/// `center`. The divisor must not vanish there; the division is guarded
/// all the same.
fn taylor_quotient(
    numerator: &CPoly,
    divisor: &CPoly,
    center: CScalar,
    count: usize,
) -> Vec<CScalar> {
    let shifted_n = numerator.shifted(center);
    let shifted_d = divisor.shifted(center);
    let coeff = |poly: &CPoly, index: usize| {
        poly.coeffs()
            .get(index)
            .copied()
            .unwrap_or_else(|| CScalar::new(0.0, 0.0))
    };
    let lead = coeff(&shifted_d, 0);
    let mut series: Vec<CScalar> = Vec::with_capacity(count);
    for m in 0..count {
        let mut acc = coeff(&shifted_n, m);
        for i in 1..=m {
            acc -= coeff(&shifted_d, i) * series[m - i];
        }
        series.push(guarded_div(acc, lead));
    }
    series
}

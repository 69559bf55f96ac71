//! Polynomials with complex coefficients, lowest power first.

use crate::math::{CScalar, Scalar};

/// Magnitude below which a divisor is treated as vanished.
pub(crate) const DIV_GUARD: Scalar = 1e-30;

/// Divides with a degeneracy guard: a vanishing divisor is replaced by one
/// so the caller continues with an uncorrected value instead of blowing up.
pub(crate) fn guarded_div(numerator: CScalar, denominator: CScalar) -> CScalar {
    if denominator.norm() < DIV_GUARD {
        numerator
    } else {
        numerator / denominator
    }
}

/// Dense polynomial over complex coefficients, ordered by increasing power
/// with the highest-power term last.
#[derive(Debug, Clone, PartialEq)]
pub struct CPoly {
    coeffs: Vec<CScalar>,
}

impl CPoly {
    /// Wraps coefficients given in increasing-power order.
    #[must_use]
    pub fn new(coeffs: Vec<CScalar>) -> Self {
        Self { coeffs }
    }

    /// Builds a polynomial from real coefficients.
    #[must_use]
    pub fn from_real(coeffs: &[Scalar]) -> Self {
        Self {
            coeffs: coeffs.iter().map(|&c| CScalar::new(c, 0.0)).collect(),
        }
    }

    /// Expands `Π (s - r)` over the given roots. The result is monic by
    /// construction.
    #[must_use]
    pub fn from_roots(roots: &[CScalar]) -> Self {
        let mut coeffs = vec![CScalar::new(1.0, 0.0)];
        for &root in roots {
            coeffs.push(CScalar::new(0.0, 0.0));
            for index in (1..coeffs.len()).rev() {
                let updated = coeffs[index - 1] - root * coeffs[index];
                coeffs[index] = updated;
            }
            coeffs[0] *= -root;
        }
        Self { coeffs }
    }

    /// Coefficients in increasing-power order.
    #[must_use]
    pub fn coeffs(&self) -> &[CScalar] {
        &self.coeffs
    }

    /// Degree of the polynomial. Empty and constant polynomials report 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Horner evaluation at `s`.
    #[must_use]
    pub fn evaluate(&self, s: CScalar) -> CScalar {
        let mut acc = CScalar::new(0.0, 0.0);
        for &coeff in self.coeffs.iter().rev() {
            acc = acc * s + coeff;
        }
        acc
    }

    /// True when the leading coefficient is exactly `1 + 0i`.
    #[must_use]
    pub fn is_monic(&self) -> bool {
        self.coeffs.last() == Some(&CScalar::new(1.0, 0.0))
    }

    /// Divides every coefficient by the leading one and returns the scale
    /// that was divided out. Polynomials of degree 0 are left untouched
    /// with scale 1, as is a polynomial whose leading coefficient has
    /// vanished.
    pub fn make_monic(&mut self) -> CScalar {
        let one = CScalar::new(1.0, 0.0);
        if self.coeffs.len() < 2 {
            return one;
        }
        let top = self.coeffs.len() - 1;
        let lead = self.coeffs[top];
        if lead.norm() < DIV_GUARD {
            return one;
        }
        let inverse = one / lead;
        for coeff in &mut self.coeffs[..top] {
            *coeff *= inverse;
        }
        self.coeffs[top] = one;
        lead
    }

    /// First derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() < 2 {
            return Self {
                coeffs: vec![CScalar::new(0.0, 0.0)],
            };
        }
        Self {
            coeffs: self
                .coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, &coeff)| coeff * power as Scalar)
                .collect(),
        }
    }

    /// Taylor coefficients about `center`: the returned polynomial in `u`
    /// equals `self` evaluated at `u + center`. Repeated synthetic
    /// division, O(degree²).
    #[must_use]
    pub fn shifted(&self, center: CScalar) -> Self {
        let mut coeffs = self.coeffs.clone();
        let len = coeffs.len();
        for low in 0..len {
            for index in (low..len.saturating_sub(1)).rev() {
                let carry = center * coeffs[index + 1];
                coeffs[index] += carry;
            }
        }
        Self { coeffs }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn constant_evaluates_everywhere() {
        let poly = CPoly::from_real(&[3.0]);
        let value = poly.evaluate(CScalar::new(-17.0, 4.0));
        assert_relative_eq!(value.re, 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(value.im, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn linear_evaluates_at_complex_argument() {
        // 3 + 2s at s = 1 + i.
        let poly = CPoly::from_real(&[3.0, 2.0]);
        let value = poly.evaluate(CScalar::new(1.0, 1.0));
        assert_relative_eq!(value.re, 5.0, epsilon = 1.0e-12);
        assert_relative_eq!(value.im, 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn make_monic_scales_and_reports_lead() {
        let mut poly = CPoly::from_real(&[1.0, 1.0, -1.0]);
        let scale = poly.make_monic();
        assert_relative_eq!(scale.re, -1.0, epsilon = 1.0e-12);
        assert!(poly.is_monic());
        assert_relative_eq!(poly.coeffs()[0].re, -1.0, epsilon = 1.0e-12);
        assert_relative_eq!(poly.coeffs()[1].re, -1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn make_monic_leaves_constants_alone() {
        let mut poly = CPoly::from_real(&[7.0]);
        let scale = poly.make_monic();
        assert_relative_eq!(scale.re, 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(poly.coeffs()[0].re, 7.0, epsilon = 1.0e-12);
    }

    #[test]
    fn root_product_expands_correctly() {
        // (s - 1)(s + 2) = s² + s - 2.
        let poly = CPoly::from_roots(&[CScalar::new(1.0, 0.0), CScalar::new(-2.0, 0.0)]);
        assert!(poly.is_monic());
        assert_relative_eq!(poly.coeffs()[0].re, -2.0, epsilon = 1.0e-12);
        assert_relative_eq!(poly.coeffs()[1].re, 1.0, epsilon = 1.0e-12);
        for &root in &[CScalar::new(1.0, 0.0), CScalar::new(-2.0, 0.0)] {
            assert!(poly.evaluate(root).norm() < 1.0e-12);
        }
    }

    #[test]
    fn shift_recenters_the_expansion() {
        // s² about 1 is (u + 1)² = 1 + 2u + u².
        let poly = CPoly::from_real(&[0.0, 0.0, 1.0]);
        let shifted = poly.shifted(CScalar::new(1.0, 0.0));
        assert_relative_eq!(shifted.coeffs()[0].re, 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(shifted.coeffs()[1].re, 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(shifted.coeffs()[2].re, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn derivative_drops_a_degree() {
        let poly = CPoly::from_real(&[5.0, 3.0, 2.0]);
        let derivative = poly.derivative();
        assert_eq!(derivative.degree(), 1);
        assert_relative_eq!(derivative.coeffs()[0].re, 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(derivative.coeffs()[1].re, 4.0, epsilon = 1.0e-12);
    }
}

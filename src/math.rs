//! Shared numerical primitives.

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for gains and polynomial arithmetic.
pub type CScalar = num_complex::Complex<Scalar>;

/// `n!` as a scalar. Pole multiplicities stay far below the point where
/// this loses integer exactness.
#[must_use]
pub fn factorial(n: u32) -> Scalar {
    (1..=n).fold(1.0, |acc, k| acc * Scalar::from(k))
}

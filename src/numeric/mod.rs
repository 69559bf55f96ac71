//! Numeric analysis pipeline: polynomials, roots, residues, responses.

/// Complex polynomial arithmetic.
pub mod poly;
/// Simultaneous root finding.
pub mod roots;
/// Partial-fraction decomposition.
pub mod pfd;
/// Inverse-transform evaluation and waveform sampling.
pub mod response;
/// Frequency-response sweeps.
pub mod sweep;

pub use pfd::{partial_fractions, PoleTerm};
pub use poly::CPoly;
pub use response::{
    pole_term_response, sample_response, time_response, write_response_csv, ResponseWaveform,
};
pub use roots::{find_roots, find_roots_from, RootFinderConfig, RootFinderReport, DEFAULT_TOLERANCE};
pub use sweep::{
    angular_frequency, linspace, logspace_hz, mag_db, phase_deg, sweep_rational,
    write_frequency_points_csv, FrequencyPoint,
};

//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when constructing a radial [`Grid`][crate::integrate::Grid].
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when a non-positive (or non-finite) step size is encountered.
    #[error("step size must be finite and greater than 0; got {0}")]
    BadStep(f64),

    /// Returned when fewer than two grid points are requested.
    #[error("grid must contain at least 2 points; got {0}")]
    TooFewSteps(usize),
}

impl GridError {
    pub(crate) fn check_step(h: f64) -> Result<(), Self> {
        (h.is_finite() && h > 0.0).then_some(()).ok_or(Self::BadStep(h))
    }

    pub(crate) fn check_steps(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooFewSteps(n))
    }
}

/// Returned from the root searches in [`shoot`][crate::shoot].
#[derive(Debug, Error)]
pub enum ShootError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when a bracket scan is asked for zero subintervals.
    #[error("bracket scan must take at least 1 step; got {0}")]
    BadSteps(usize),

    /// Returned when the two most recent secant iterates have identical
    /// residuals, leaving the secant slope undefined.
    #[error("shoot::secant: residual is flat at ic = {ic} (residual = {residual})")]
    FlatResidual { ic: f64, residual: f64 },

    /// Returned when the integrator produces a non-finite terminal value.
    #[error("shoot: non-finite residual at ic = {ic}")]
    NonFinite { ic: f64 },

    /// Returned when a search exhausts its iteration budget; carries the last
    /// iterate for diagnostics.
    #[error("shoot: no convergence after {maxiters} iterations; last ic = {ic}, residual = {residual}")]
    Maxiters { maxiters: usize, ic: f64, residual: f64 },

    /// Returned when bisection is handed endpoints whose residuals have the
    /// same sign, or when a bracket scan finds no sign change.
    #[error("shoot: no sign change between ic = {a} (residual = {fa}) and ic = {b} (residual = {fb})")]
    NoBracket { a: f64, b: f64, fa: f64, fb: f64 },

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl ShootError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_steps(steps: usize) -> Result<(), Self> {
        (steps != 0).then_some(()).ok_or(Self::BadSteps(steps))
    }

    pub(crate) fn check_finite(ic: f64, residual: f64) -> Result<f64, Self> {
        residual.is_finite().then_some(residual).ok_or(Self::NonFinite { ic })
    }
}

/// Returned from profile rescaling in [`fit`][crate::fit].
#[derive(Debug, Error)]
pub enum FitError {
    /// Returned when either profile has no samples.
    #[error("profiles must be non-empty")]
    Empty,

    /// Returned when a profile has a peak value of zero; carries which profile
    /// (`"target"` or `"candidate"`).
    #[error("{0} profile has zero peak value")]
    ZeroPeak(&'static str),

    /// Returned when a profile's half-maximum position is zero; carries which
    /// profile (`"target"` or `"candidate"`).
    #[error("{0} profile has zero half-maximum position")]
    DegenerateWidth(&'static str),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

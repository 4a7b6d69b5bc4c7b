//! Rescaling of a computed profile onto a target (e.g. measured) profile.
//!
//! The candidate's amplitude is scaled so that its peak matches the target's,
//! and its coordinates are scaled so that its half-maximum position matches
//! the target's.
//!
//! ```
//! use ndarray as nd;
//! use townes::fit::{ HalfMax, Profile, rescale };
//!
//! let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 5.0, 501);
//! let target = Profile::new(x.clone(), x.mapv(|xk| 4.0 * (-xk * xk).exp()))
//!     .unwrap();
//! let computed = Profile::new(x.clone(), x.mapv(|xk| 2.0 * (-xk * xk / 4.0).exp()))
//!     .unwrap();
//! let fitted = rescale(&target, &computed, HalfMax::Nearest).unwrap();
//! assert_eq!(fitted.peak().1, 4.0);
//! ```

use ndarray as nd;
use crate::{
    error::{ FitError, LengthError },
    integrate::Trajectory,
};

pub type FitResult<T> = Result<T, FitError>;

/// Method for locating the half-maximum position of a profile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HalfMax {
    /// Coordinate of the sample whose value is nearest half the peak.
    #[default]
    Nearest,
    /// Linear interpolation between the samples on either side of the first
    /// half-maximum crossing past the peak.
    Interpolated,
}

/// A sampled one-dimensional profile.
///
/// Both arrays are non-empty and of equal length.
#[derive(Clone, Debug)]
pub struct Profile {
    x: nd::Array1<f64>,
    y: nd::Array1<f64>,
}

impl Profile {
    /// Create a new `Profile`, checking array lengths.
    pub fn new(x: nd::Array1<f64>, y: nd::Array1<f64>) -> FitResult<Self> {
        LengthError::check(&x, &y)?;
        if x.is_empty() { return Err(FitError::Empty); }
        Ok(Self { x, y })
    }

    /// Copy the radial coordinates and profile out of a [`Trajectory`].
    pub fn from_trajectory(traj: &Trajectory) -> Self {
        Self { x: traj.r.clone(), y: traj.R.clone() }
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get a reference to the value array.
    pub fn get_y(&self) -> &nd::Array1<f64> { &self.y }

    /// Get the number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }

    /// Unwrap `self` into its coordinate and value arrays.
    pub fn into_arrays(self) -> (nd::Array1<f64>, nd::Array1<f64>) {
        (self.x, self.y)
    }

    /// Return the index and value of the maximum.
    pub fn peak(&self) -> (usize, f64) {
        self.y.iter().enumerate()
            .fold((0, self.y[0]), |(imax, ymax), (k, &yk)| {
                if yk > ymax { (k, yk) } else { (imax, ymax) }
            })
    }

    /// Return the index of the sample at or past the peak whose value is
    /// nearest half the peak value.
    pub fn half_max_index(&self) -> usize {
        let (ipeak, ypeak) = self.peak();
        let half = ypeak / 2.0;
        self.y.iter().enumerate().skip(ipeak)
            .fold((ipeak, f64::INFINITY), |(ibest, dbest), (k, &yk)| {
                let d = (yk - half).abs();
                if d < dbest { (k, d) } else { (ibest, dbest) }
            })
            .0
    }

    /// Return the coordinate of the half-maximum position.
    pub fn half_max(&self, how: HalfMax) -> f64 {
        match how {
            HalfMax::Nearest => self.x[self.half_max_index()],
            HalfMax::Interpolated => self.half_max_interp(),
        }
    }

    // falls back to the nearest sample if there's no crossing
    fn half_max_interp(&self) -> f64 {
        let (ipeak, ypeak) = self.peak();
        let half = ypeak / 2.0;
        let crossing
            = self.y.iter().enumerate().skip(ipeak + 1)
            .find(|&(_, &yk)| yk <= half)
            .map(|(k, _)| k);
        match crossing {
            Some(k) => {
                let (x0, x1) = (self.x[k - 1], self.x[k]);
                let (y0, y1) = (self.y[k - 1], self.y[k]);
                if y0 == y1 { x1 } else { x0 + (half - y0) * (x1 - x0) / (y1 - y0) }
            },
            None => self.x[self.half_max_index()],
        }
    }

    /// Scale the amplitude by `a` and the coordinates by `b` in place.
    pub fn rescale(&mut self, a: f64, b: f64) {
        self.y *= a;
        self.x *= b;
    }

    /// Like [`Self::rescale`], but create a copy of `self` with the specified
    /// scaling factors.
    pub fn rescaled(&self, a: f64, b: f64) -> Self {
        let mut new = self.clone();
        new.rescale(a, b);
        new
    }
}

// peak value and half-maximum position, both nonzero
fn peak_width(profile: &Profile, how: HalfMax, which: &'static str)
    -> FitResult<(f64, f64)>
{
    let (_, peak) = profile.peak();
    if peak == 0.0 { return Err(FitError::ZeroPeak(which)); }
    let width = profile.half_max(how);
    if width == 0.0 { return Err(FitError::DegenerateWidth(which)); }
    Ok((peak, width))
}

/// Compute the amplitude and coordinate scaling factors that map `candidate`
/// onto `target`.
///
/// Fails if either profile has a zero peak value or a zero half-maximum
/// position.
pub fn scale_factors(target: &Profile, candidate: &Profile, how: HalfMax)
    -> FitResult<(f64, f64)>
{
    let (target_peak, target_width) = peak_width(target, how, "target")?;
    let (candidate_peak, candidate_width)
        = peak_width(candidate, how, "candidate")?;
    Ok((target_peak / candidate_peak, target_width / candidate_width))
}

/// Return a copy of `candidate` rescaled so that its peak value and
/// half-maximum position match those of `target`.
pub fn rescale(target: &Profile, candidate: &Profile, how: HalfMax)
    -> FitResult<Profile>
{
    let (a, b) = scale_factors(target, candidate, how)?;
    Ok(candidate.rescaled(a, b))
}

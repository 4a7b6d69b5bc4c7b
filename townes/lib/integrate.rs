//! Fixed-step radial integration of the Townes profile equation,
//! ```text
//!        1
//! R'' + --- R' - R + R³ = 0
//!        r
//! ```
//! reduced to the first-order system
//! ```text
//! V' = R - V/r - R³
//! R' = V
//! ```
//! and integrated outward from `r = 0` with `R(0)` given and `V(0) = 0`.
//!
//! ```
//! use townes::integrate::{ Method, integrate_townes };
//!
//! let traj = integrate_townes(0.01, 601, 2.2, Method::RK4).unwrap();
//! assert_eq!(traj.len(), 601);
//! assert_eq!(traj.R[0], 2.2);
//! assert_eq!(traj.V[0], 0.0);
//! assert!(traj.terminal().is_finite());
//! ```

use ndarray as nd;
use crate::error::GridError;

pub type GridResult<T> = Result<T, GridError>;

/// An evenly spaced radial grid `r[i] = i h` for `i ∊ {0, ..., n - 1}`.
///
/// Grids can only be constructed with `h > 0` and `n >= 2`, so every grid has
/// at least one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    // step size
    h: f64,
    // number of points, including r = 0
    n: usize,
}

impl Grid {
    /// Create a new `Grid`, returning [`GridError`] if `h` is not a positive,
    /// finite number or if `n < 2`.
    pub fn new(h: f64, n: usize) -> GridResult<Self> {
        GridError::check_step(h)?;
        GridError::check_steps(n)?;
        Ok(Self { h, n })
    }

    /// Get the step size.
    pub fn get_h(&self) -> f64 { self.h }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Get the `i`-th radial coordinate.
    pub fn r(&self, i: usize) -> f64 { i as f64 * self.h }

    /// Get the last radial coordinate, `(n - 1) h`.
    pub fn r_max(&self) -> f64 { self.r(self.n - 1) }

    /// Generate the full coordinate array.
    pub fn coords(&self) -> nd::Array1<f64> {
        (0..self.n).map(|i| self.r(i)).collect()
    }
}

/// Value of the pair `(R, V = R')` at a single radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub R: f64,
    pub V: f64,
}

impl State {
    pub fn new(R: f64, V: f64) -> Self { Self { R, V } }

    /// Initial state at `r = 0` for a given shooting parameter: `R = ic`,
    /// `V = 0`.
    pub fn initial(ic: f64) -> Self { Self { R: ic, V: 0.0 } }

    /// Return `true` if both components are finite.
    pub fn is_finite(&self) -> bool { self.R.is_finite() && self.V.is_finite() }

    // perform the operation `self + h * d` succinctly
    fn offset(self, h: f64, d: Self) -> Self {
        Self { R: self.R + h * d.R, V: self.V + h * d.V }
    }
}

/// A first-order radial system `(R', V') = f(r, R, V)`.
pub trait RadialSystem {
    /// Evaluate the derivatives of both components at radius `r`.
    fn derivative(&self, r: f64, state: State) -> State;
}

/// The Townes system, `R' = V`, `V' = R - V/r - R³`.
///
/// The `-V/r` term is undefined at `r = 0`; there the derivative is taken to
/// be `V' = R - R³`. Every evaluation at `r > 0` uses the full expression.
#[derive(Copy, Clone, Debug, Default)]
pub struct Townes;

impl Townes {
    /// Evaluate `V'` alone.
    pub fn dV(r: f64, R: f64, V: f64) -> f64 {
        let source = R - R.powi(3);
        if r == 0.0 { source } else { source - V / r }
    }
}

impl RadialSystem for Townes {
    fn derivative(&self, r: f64, state: State) -> State {
        State { R: state.V, V: Self::dV(r, state.R, state.V) }
    }
}

/// A single-step integration scheme.
pub trait Stepper {
    /// Advance `state` from radius `r` to `r + h`.
    fn advance<F>(&self, system: &F, state: State, r: f64, h: f64) -> State
    where F: RadialSystem + ?Sized;
}

/// Explicit Euler.
///
/// The derivative is evaluated at the destination radius `r + h`, which for
/// [`Townes`] gives the recurrence
/// ```text
/// R[i] = R[i - 1] + h V[i - 1]
/// V[i] = V[i - 1] + h (R[i - 1] - V[i - 1] / r[i] - R[i - 1]³)
/// ```
/// and never divides by `r[0] = 0`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Euler;

impl Stepper for Euler {
    fn advance<F>(&self, system: &F, state: State, r: f64, h: f64) -> State
    where F: RadialSystem + ?Sized
    {
        state.offset(h, system.derivative(r + h, state))
    }
}

/// Classical fourth-order Runge-Kutta, with stages at `r`, `r + h/2`,
/// `r + h/2`, and `r + h`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RK4;

impl Stepper for RK4 {
    fn advance<F>(&self, system: &F, state: State, r: f64, h: f64) -> State
    where F: RadialSystem + ?Sized
    {
        let hh = h / 2.0;
        let k1 = system.derivative(r, state);
        let k2 = system.derivative(r + hh, state.offset(hh, k1));
        let k3 = system.derivative(r + hh, state.offset(hh, k2));
        let k4 = system.derivative(r + h, state.offset(h, k3));
        State {
            R: state.R + h / 6.0 * (k1.R + 2.0 * (k2.R + k3.R) + k4.R),
            V: state.V + h / 6.0 * (k1.V + 2.0 * (k2.V + k3.V) + k4.V),
        }
    }
}

/// Integration scheme selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Use [`Euler`].
    Euler,
    /// Use [`RK4`].
    #[default]
    RK4,
}

impl Method {
    /// Return `true` if `self` is `Euler`.
    pub fn is_euler(&self) -> bool { matches!(self, Self::Euler) }

    /// Return `true` if `self` is `RK4`.
    pub fn is_rk4(&self) -> bool { matches!(self, Self::RK4) }
}

impl Stepper for Method {
    fn advance<F>(&self, system: &F, state: State, r: f64, h: f64) -> State
    where F: RadialSystem + ?Sized
    {
        match self {
            Self::Euler => Euler.advance(system, state, r, h),
            Self::RK4 => RK4.advance(system, state, r, h),
        }
    }
}

/// Sampled solution over a [`Grid`].
///
/// All three arrays have the same length as the grid they were computed on.
#[derive(Clone, Debug)]
pub struct Trajectory {
    /// Radial coordinates
    pub r: nd::Array1<f64>,
    /// Profile
    pub R: nd::Array1<f64>,
    /// Profile derivative
    pub V: nd::Array1<f64>,
}

impl Trajectory {
    /// Get the number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.r.len() }

    /// Get the value of the profile at the last grid point.
    pub fn terminal(&self) -> f64 { self.R[self.R.len() - 1] }

    /// Get the full state at the last grid point.
    pub fn terminal_state(&self) -> State {
        let n = self.len();
        State { R: self.R[n - 1], V: self.V[n - 1] }
    }
}

/// Integrate a general radial system over `grid` from an arbitrary state at
/// `r = 0`.
pub fn integrate_from<F, S>(grid: &Grid, system: &F, stepper: &S, init: State)
    -> Trajectory
where
    F: RadialSystem + ?Sized,
    S: Stepper + ?Sized,
{
    let n = grid.len();
    let h = grid.get_h();
    let mut R: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut V: nd::Array1<f64> = nd::Array1::zeros(n);
    R[0] = init.R;
    V[0] = init.V;
    let mut state = init;
    let iter = R.iter_mut().zip(V.iter_mut()).enumerate().skip(1);
    for (i, (Rk, Vk)) in iter {
        state = stepper.advance(system, state, grid.r(i - 1), h);
        *Rk = state.R;
        *Vk = state.V;
    }
    Trajectory { r: grid.coords(), R, V }
}

/// Integrate a general radial system over `grid` with `R(0) = ic`,
/// `V(0) = 0`.
pub fn integrate<F, S>(grid: &Grid, system: &F, stepper: &S, ic: f64)
    -> Trajectory
where
    F: RadialSystem + ?Sized,
    S: Stepper + ?Sized,
{
    integrate_from(grid, system, stepper, State::initial(ic))
}

/// Like [`integrate_from`], but only keep the final state.
pub fn propagate<F, S>(grid: &Grid, system: &F, stepper: &S, init: State)
    -> State
where
    F: RadialSystem + ?Sized,
    S: Stepper + ?Sized,
{
    let h = grid.get_h();
    (1..grid.len())
        .fold(init, |state, i| stepper.advance(system, state, grid.r(i - 1), h))
}

/// Integrate the [`Townes`] system for step size `h`, `n` grid points, and
/// `R(0) = ic`.
pub fn integrate_townes(h: f64, n: usize, ic: f64, method: Method)
    -> GridResult<Trajectory>
{
    let grid = Grid::new(h, n)?;
    Ok(integrate(&grid, &Townes, &method, ic))
}

/// Compute `R(r_max)` for the [`Townes`] system without storing the
/// trajectory.
pub fn terminal(grid: &Grid, method: Method, ic: f64) -> f64 {
    propagate(grid, &Townes, &method, State::initial(ic)).R
}

#[cfg(test)]
mod tests {
    use super::*;

    // R' = V, V' = 6 r, so that R = R(0) + r³ and V = 3 r²
    struct Cubic;

    impl RadialSystem for Cubic {
        fn derivative(&self, r: f64, state: State) -> State {
            State { R: state.V, V: 6.0 * r }
        }
    }

    #[test]
    fn grid_rejects_bad_params() {
        assert!(matches!(Grid::new(0.0, 10), Err(GridError::BadStep(_))));
        assert!(matches!(Grid::new(-0.1, 10), Err(GridError::BadStep(_))));
        assert!(matches!(Grid::new(f64::NAN, 10), Err(GridError::BadStep(_))));
        assert!(matches!(Grid::new(0.1, 1), Err(GridError::TooFewSteps(1))));
        assert!(matches!(Grid::new(0.1, 0), Err(GridError::TooFewSteps(0))));
        assert!(integrate_townes(0.0, 100, 2.0, Method::RK4).is_err());
    }

    #[test]
    fn grid_coords() {
        let grid = Grid::new(0.25, 5).unwrap();
        let r = grid.coords();
        assert_eq!(r.len(), 5);
        assert_eq!(r[0], 0.0);
        assert_eq!(r[4], 1.0);
        assert_eq!(grid.r_max(), 1.0);
    }

    #[test]
    fn townes_derivative_at_origin() {
        let d = Townes.derivative(0.0, State::initial(2.0));
        assert_eq!(d.R, 0.0);
        assert_eq!(d.V, 2.0 - 8.0);
        let d = Townes.derivative(0.5, State::new(1.0, 0.5));
        assert_eq!(d.V, -1.0);
    }

    #[test]
    fn two_points() {
        let grid = Grid::new(0.1, 2).unwrap();

        let traj = integrate(&grid, &Townes, &Method::Euler, 2.0);
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.R[0], 2.0);
        assert_eq!(traj.R[1], 2.0);
        assert_eq!(traj.V[1], 0.1 * (2.0 - 8.0));

        let traj = integrate(&grid, &Townes, &Method::RK4, 2.0);
        let step = RK4.advance(&Townes, State::initial(2.0), 0.0, 0.1);
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.R[0], 2.0);
        assert_eq!(traj.terminal_state(), step);
    }

    #[test]
    fn deterministic() {
        for method in [Method::Euler, Method::RK4] {
            let a = integrate_townes(0.01, 1001, 2.1, method).unwrap();
            let b = integrate_townes(0.01, 1001, 2.1, method).unwrap();
            assert!(
                a.R.iter().zip(&b.R).all(|(x, y)| x.to_bits() == y.to_bits())
            );
            assert!(
                a.V.iter().zip(&b.V).all(|(x, y)| x.to_bits() == y.to_bits())
            );
        }
    }

    #[test]
    fn rk4_exact_on_cubic() {
        let grid = Grid::new(0.1, 51).unwrap();
        let traj = integrate(&grid, &Cubic, &RK4, 1.0);
        for ((&r, &R), &V) in traj.r.iter().zip(&traj.R).zip(&traj.V) {
            let R_exact = 1.0 + r.powi(3);
            let V_exact = 3.0 * r.powi(2);
            assert!((R - R_exact).abs() <= 1e-10 * R_exact);
            assert!((V - V_exact).abs() <= 1e-10 * (1.0 + V_exact));
        }
    }

    #[test]
    fn propagate_matches_integrate() {
        let grid = Grid::new(0.01, 601).unwrap();
        for method in [Method::Euler, Method::RK4] {
            let traj = integrate(&grid, &Townes, &method, 2.2);
            assert_eq!(traj.terminal(), terminal(&grid, method, 2.2));
        }
    }

    #[test]
    fn euler_and_rk4_converge() {
        let r_max = 6.0;
        let npoints = |h: f64| (r_max / h).round() as usize + 1;
        let reference = integrate_townes(0.0005, npoints(0.0005), 2.0, Method::RK4)
            .unwrap()
            .terminal();
        let err = |h: f64, method: Method| {
            let traj = integrate_townes(h, npoints(h), 2.0, method).unwrap();
            (traj.terminal() - reference).abs()
        };
        let (e_coarse, e_fine) = (err(0.02, Method::Euler), err(0.01, Method::Euler));
        let (r_coarse, r_fine) = (err(0.02, Method::RK4), err(0.01, Method::RK4));
        assert!(e_fine < e_coarse);
        assert!(r_fine < r_coarse);
        assert!(r_coarse < e_coarse);
        assert!(r_fine < e_fine);
    }

    #[test]
    fn reference_scenario() {
        let grid = Grid::new(0.001, 20700).unwrap();
        for method in [Method::Euler, Method::RK4] {
            let lo = terminal(&grid, method, 2.2);
            let hi = terminal(&grid, method, 2.3);
            assert!(lo.is_finite() && hi.is_finite());
            assert!(lo * hi < 0.0);

            let traj = integrate(&grid, &Townes, &method, 2.2062016);
            assert!(traj.R.iter().all(|R| R.is_finite()));
            assert!(traj.terminal().abs() < 1.5);
        }
    }
}

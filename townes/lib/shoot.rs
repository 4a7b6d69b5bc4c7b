//! Shooting-method search for the central amplitude `R(0)` of the Townes
//! profile.
//!
//! The boundary-value problem `R'(0) = 0`, `R(r → ∞) = 0` is treated as an
//! initial-value problem parameterized by `ic = R(0)`. The residual
//! `R(r_max; ic)` is computed by running the [integrator][crate::integrate] to
//! completion, and a one-dimensional root search drives it toward zero.
//!
//! Two searches are provided:
//! - [`secant`]: the classical secant iteration on the residual itself. Fast
//!   when `r_max` is moderate, but the residual becomes nearly a step function
//!   of `ic` for large `r_max`, where the iteration may wander.
//! - [`bisect`]: bisection on a sign-changing bracket (which can be located
//!   with [`find_bracket`]). Slow but robust for any `r_max`.
//!
//! ```
//! use townes::{ integrate::Method, shoot::{ Search, Shooter } };
//!
//! let shooter = Shooter::new(0.01, 601, Method::RK4).unwrap();
//! let search = Search::Secant {
//!     bounds: (2.2, 2.3),
//!     epsilon: Some(1e-6),
//!     maxiters: Some(100),
//! };
//! let root = shooter.solve(search).unwrap();
//! assert!(root.residual.abs() <= 1e-6);
//! assert!((root.ic - 2.2064).abs() < 1e-3);
//! ```

use crate::{
    error::ShootError,
    integrate::{ Grid, Method, Trajectory, Townes, integrate, terminal },
    DEF_EPSILON,
    DEF_MAXITERS,
};

pub type ShootResult<T> = Result<T, ShootError>;

/// A single step of a root search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Iterate {
    /// Iteration number; 0 for the initial guess.
    pub iter: usize,
    /// Current shooting parameter.
    pub ic: f64,
    /// Residual at `ic`.
    pub residual: f64,
}

/// Outcome of a successful root search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Root {
    /// Converged shooting parameter.
    pub ic: f64,
    /// Residual at `ic`.
    pub residual: f64,
    /// Number of iterations taken.
    pub iters: usize,
}

#[derive(Copy, Clone, Debug)]
struct Window(f64, f64);

impl Window {
    fn push(&mut self, val: f64) { self.0 = self.1; self.1 = val; }
}

#[derive(Copy, Clone, Debug)]
struct Bounds(f64, f64);

impl Bounds {
    fn from_ord(xx: (f64, f64)) -> Self {
        if xx.0 > xx.1 { Self(xx.1, xx.0) } else { Self(xx.0, xx.1) }
    }

    fn midpoint(self) -> f64 { (self.0 + self.1) / 2.0 }

    fn diff(self) -> f64 { self.1 - self.0 }
}

fn log_iterate(it: Iterate) {
    log::debug!("iter {}: ic = {:.12}, residual = {:+.6e}", it.iter, it.ic, it.residual);
}

/// Find a zero of `residual` with the secant method, starting from the guess
/// pair `bounds`.
///
/// Iterates
/// ```text
/// ic[k + 1] = ic[k] - f(ic[k]) (ic[k] - ic[k - 1]) / (f(ic[k]) - f(ic[k - 1]))
/// ```
/// until `|f(ic[k])| <= epsilon`, starting with `ic[-1] = bounds.0` and
/// `ic[0] = bounds.1`. Every iterate is logged at the `debug` level.
///
/// Fails with
/// - [`ShootError::FlatResidual`] if two consecutive residuals are equal,
/// - [`ShootError::NonFinite`] if a residual is NaN or infinite,
/// - [`ShootError::Maxiters`] if `maxiters` updates are taken without
///   convergence.
pub fn secant<F>(bounds: (f64, f64), residual: F, epsilon: f64, maxiters: usize)
    -> ShootResult<Root>
where F: FnMut(f64) -> f64
{
    secant_traced(bounds, residual, epsilon, maxiters, log_iterate)
}

/// Like [`secant`], but report each [`Iterate`] to `trace` instead of the log.
pub fn secant_traced<F, G>(
    bounds: (f64, f64),
    mut residual: F,
    epsilon: f64,
    maxiters: usize,
    mut trace: G,
) -> ShootResult<Root>
where
    F: FnMut(f64) -> f64,
    G: FnMut(Iterate),
{
    ShootError::check_epsilon(epsilon)?;
    ShootError::check_maxiters(maxiters)?;
    let mut eval = |ic: f64| ShootError::check_finite(ic, residual(ic));

    let mut ic = Window(bounds.0, bounds.1);
    let mut res = Window(eval(ic.0)?, eval(ic.1)?);
    let mut k: usize = 0;
    trace(Iterate { iter: k, ic: ic.1, residual: res.1 });
    loop {
        if res.1.abs() <= epsilon {
            log::info!(
                "shoot::secant: converged after {} iterations: ic = {:.12}",
                k, ic.1,
            );
            return Ok(Root { ic: ic.1, residual: res.1, iters: k });
        }
        if k >= maxiters {
            log::warn!("shoot::secant: WARNING: reached maxiters");
            return Err(
                ShootError::Maxiters { maxiters, ic: ic.1, residual: res.1 });
        }
        let slope_denom = res.1 - res.0;
        if slope_denom == 0.0 {
            return Err(ShootError::FlatResidual { ic: ic.1, residual: res.1 });
        }
        let next = ic.1 - res.1 * (ic.1 - ic.0) / slope_denom;
        ic.push(next);
        res.push(eval(next)?);
        k += 1;
        trace(Iterate { iter: k, ic: ic.1, residual: res.1 });
    }
}

/// Find a zero of `residual` by bisection within `bounds`.
///
/// The residuals at the two ends of `bounds` must differ in sign (or one of
/// them must be exactly zero); otherwise [`ShootError::NoBracket`] is returned.
/// Iteration stops when the bracket half-width falls to `epsilon` or below, or
/// when a midpoint residual is exactly zero. Every iterate is logged at the
/// `debug` level.
///
/// Note that convergence here is on `ic`, not on the residual: for large
/// `r_max` the residual at the converged `ic` can remain of order 1.
pub fn bisect<F>(bounds: (f64, f64), residual: F, epsilon: f64, maxiters: usize)
    -> ShootResult<Root>
where F: FnMut(f64) -> f64
{
    bisect_traced(bounds, residual, epsilon, maxiters, log_iterate)
}

/// Like [`bisect`], but report each [`Iterate`] to `trace` instead of the log.
pub fn bisect_traced<F, G>(
    bounds: (f64, f64),
    mut residual: F,
    epsilon: f64,
    maxiters: usize,
    mut trace: G,
) -> ShootResult<Root>
where
    F: FnMut(f64) -> f64,
    G: FnMut(Iterate),
{
    ShootError::check_epsilon(epsilon)?;
    ShootError::check_maxiters(maxiters)?;
    let mut eval = |ic: f64| ShootError::check_finite(ic, residual(ic));

    let mut b = Bounds::from_ord(bounds);
    let mut fb = Bounds(eval(b.0)?, eval(b.1)?);
    if fb.0 == 0.0 { return Ok(Root { ic: b.0, residual: 0.0, iters: 0 }); }
    if fb.1 == 0.0 { return Ok(Root { ic: b.1, residual: 0.0, iters: 0 }); }
    if fb.0.signum() == fb.1.signum() {
        return Err(
            ShootError::NoBracket { a: b.0, b: b.1, fa: fb.0, fb: fb.1 });
    }

    let mut mid = b.midpoint();
    let mut fmid = f64::NAN;
    for k in 1..=maxiters {
        mid = b.midpoint();
        fmid = eval(mid)?;
        trace(Iterate { iter: k, ic: mid, residual: fmid });
        if fmid == 0.0 || b.diff() / 2.0 <= epsilon {
            log::info!(
                "shoot::bisect: converged after {} iterations: ic = {:.12}",
                k, mid,
            );
            return Ok(Root { ic: mid, residual: fmid, iters: k });
        }
        if fmid.signum() == fb.0.signum() {
            b.0 = mid;
            fb.0 = fmid;
        } else {
            b.1 = mid;
            fb.1 = fmid;
        }
    }
    log::warn!("shoot::bisect: WARNING: reached maxiters");
    Err(ShootError::Maxiters { maxiters, ic: mid, residual: fmid })
}

/// Scan `steps + 1` evenly spaced points in `[lo, hi]` and return the first
/// adjacent pair across which `residual` changes sign.
///
/// Returns [`ShootError::NoBracket`] if no sign change is found,
/// [`ShootError::NonFinite`] if any residual along the way is NaN or infinite,
/// and [`ShootError::BadSteps`] if `steps == 0`.
pub fn find_bracket<F>(mut residual: F, lo: f64, hi: f64, steps: usize)
    -> ShootResult<(f64, f64)>
where F: FnMut(f64) -> f64
{
    ShootError::check_steps(steps)?;
    let mut eval = |ic: f64| ShootError::check_finite(ic, residual(ic));
    let d = (hi - lo) / steps as f64;
    let f_lo = eval(lo)?;
    let mut prev = (lo, f_lo);
    for k in 1..=steps {
        let ic = if k == steps { hi } else { lo + k as f64 * d };
        let f = eval(ic)?;
        if prev.1 * f <= 0.0 {
            log::debug!("shoot::find_bracket: sign change in ({}, {})", prev.0, ic);
            return Ok((prev.0, ic));
        }
        prev = (ic, f);
    }
    Err(ShootError::NoBracket { a: lo, b: hi, fa: f_lo, fb: prev.1 })
}

/// Root search selector and parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Search {
    /// Use the [secant method][secant].
    Secant {
        /// Initial guess pair.
        bounds: (f64, f64),
        /// Residual tolerance (default: `1e-6`).
        epsilon: Option<f64>,
        /// Maximum number of iterations (default: `1000`).
        maxiters: Option<usize>,
    },
    /// Use [bisection][bisect].
    Bisect {
        /// Sign-changing bracket.
        bounds: (f64, f64),
        /// Bracket half-width tolerance (default: `1e-6`).
        epsilon: Option<f64>,
        /// Maximum number of iterations (default: `1000`).
        maxiters: Option<usize>,
    },
}

impl Search {
    /// Return `true` if `self` is `Secant`.
    pub fn is_secant(&self) -> bool { matches!(self, Self::Secant { .. }) }

    /// Return `true` if `self` is `Bisect`.
    pub fn is_bisect(&self) -> bool { matches!(self, Self::Bisect { .. }) }

    /// Run the selected search on an arbitrary residual function, reporting
    /// iterates to `trace`.
    pub fn run_traced<F, G>(self, residual: F, trace: G) -> ShootResult<Root>
    where
        F: FnMut(f64) -> f64,
        G: FnMut(Iterate),
    {
        match self {
            Self::Secant { bounds, epsilon, maxiters } => {
                secant_traced(
                    bounds,
                    residual,
                    epsilon.unwrap_or(DEF_EPSILON),
                    maxiters.unwrap_or(DEF_MAXITERS),
                    trace,
                )
            },
            Self::Bisect { bounds, epsilon, maxiters } => {
                bisect_traced(
                    bounds,
                    residual,
                    epsilon.unwrap_or(DEF_EPSILON),
                    maxiters.unwrap_or(DEF_MAXITERS),
                    trace,
                )
            },
        }
    }

    /// Run the selected search on an arbitrary residual function.
    pub fn run<F>(self, residual: F) -> ShootResult<Root>
    where F: FnMut(f64) -> f64
    {
        self.run_traced(residual, log_iterate)
    }
}

/// Full set of parameters for a single shooting run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Radial step size.
    pub h: f64,
    /// Number of grid points (`r_max = (n - 1) h`).
    pub n: usize,
    /// Integration scheme.
    pub method: Method,
    /// Root search.
    pub search: Search,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            h: 0.001,
            n: 20700,
            method: Method::RK4,
            search: Search::Bisect {
                bounds: (2.2, 2.3),
                epsilon: None,
                maxiters: None,
            },
        }
    }
}

impl Config {
    /// Construct the [`Shooter`] described by `self`.
    pub fn shooter(&self) -> ShootResult<Shooter> {
        Shooter::new(self.h, self.n, self.method)
    }

    /// Solve for the root and integrate the final profile.
    pub fn run(&self) -> ShootResult<(Root, Trajectory)> {
        let shooter = self.shooter()?;
        let root = shooter.solve(self.search)?;
        Ok((root, shooter.profile(root.ic)))
    }
}

/// The integrator, wrapped as a scalar function of the shooting parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shooter {
    grid: Grid,
    method: Method,
}

impl Shooter {
    /// Create a new `Shooter` on a grid of `n` points with spacing `h`.
    pub fn new(h: f64, n: usize, method: Method) -> ShootResult<Self> {
        let grid = Grid::new(h, n)?;
        Ok(Self { grid, method })
    }

    /// Create a new `Shooter` on an existing grid.
    pub fn from_grid(grid: Grid, method: Method) -> Self {
        Self { grid, method }
    }

    /// Get a reference to the underlying grid.
    pub fn get_grid(&self) -> &Grid { &self.grid }

    /// Get the integration scheme.
    pub fn get_method(&self) -> Method { self.method }

    /// Compute the residual `R(r_max)` for a given `R(0)`.
    pub fn residual(&self, ic: f64) -> f64 {
        terminal(&self.grid, self.method, ic)
    }

    /// Integrate the full profile for a given `R(0)`.
    pub fn profile(&self, ic: f64) -> Trajectory {
        integrate(&self.grid, &Townes, &self.method, ic)
    }

    /// Thin interface to [`find_bracket`].
    pub fn bracket(&self, lo: f64, hi: f64, steps: usize)
        -> ShootResult<(f64, f64)>
    {
        find_bracket(|ic| self.residual(ic), lo, hi, steps)
    }

    /// Solve for the shooting parameter using the given search.
    ///
    /// [`Search::Secant`] only checks the residual, so on a long grid (large
    /// `r_max`) it can return a "root" far from the Townes value, e.g. a
    /// profile with several nodes. Check the result with
    /// [`node_count`][crate::utils::node_count] on [`Self::profile`], or use
    /// [`Search::Bisect`] on a bracket from [`Self::bracket`].
    pub fn solve(&self, search: Search) -> ShootResult<Root> {
        search.run(|ic| self.residual(ic))
    }

    /// Like [`Self::solve`], but report each [`Iterate`] to `trace`.
    pub fn solve_traced<G>(&self, search: Search, trace: G)
        -> ShootResult<Root>
    where G: FnMut(Iterate)
    {
        search.run_traced(|ic| self.residual(ic), trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Shooter { Shooter::new(0.01, 601, Method::RK4).unwrap() }

    #[test]
    fn secant_sqrt2() {
        let root = secant((1.0, 2.0), |x| x * x - 2.0, 1e-10, 50).unwrap();
        assert!((root.ic - 2.0_f64.sqrt()).abs() < 1e-10);
        assert!(root.residual.abs() <= 1e-10);
    }

    #[test]
    fn secant_failures() {
        assert!(matches!(
            secant((1.0, 2.0), |x| x * x + 1.0, 1e-6, 3),
            Err(ShootError::Maxiters { maxiters: 3, .. }),
        ));
        assert!(matches!(
            secant((0.0, 1.0), |_| 1.0, 1e-6, 10),
            Err(ShootError::FlatResidual { ic, residual })
                if ic == 1.0 && residual == 1.0,
        ));
        assert!(matches!(
            secant((0.0, 1.0), |x| if x > 0.5 { f64::NAN } else { x }, 1e-6, 10),
            Err(ShootError::NonFinite { ic }) if ic == 1.0,
        ));
        assert!(matches!(
            secant((0.0, 1.0), |x| x, 0.0, 10),
            Err(ShootError::BadEpsilon(_)),
        ));
        assert!(matches!(
            secant((0.0, 1.0), |x| x, 1e-6, 0),
            Err(ShootError::BadMaxiters(0)),
        ));
    }

    #[test]
    fn secant_townes() {
        let shooter = short();
        let search = Search::Secant {
            bounds: (2.2, 2.3),
            epsilon: Some(1e-6),
            maxiters: Some(100),
        };
        let mut trace: Vec<Iterate> = Vec::new();
        let root = shooter.solve_traced(search, |it| trace.push(it)).unwrap();
        assert!(root.residual.abs() <= 1e-6);
        assert!((root.ic - 2.2064291).abs() < 1e-4);
        assert_eq!(trace.len(), root.iters + 1);
        assert_eq!(trace.last().map(|it| it.ic), Some(root.ic));
    }

    #[test]
    fn secant_idempotent() {
        let shooter = short();
        let root = secant((2.2, 2.3), |ic| shooter.residual(ic), 1e-6, 100)
            .unwrap();
        let again = secant((root.ic, root.ic), |ic| shooter.residual(ic), 1e-6, 100)
            .unwrap();
        assert_eq!(again.ic, root.ic);
        assert_eq!(again.iters, 0);
    }

    #[test]
    fn bisect_simple() {
        let root = bisect((0.0, 2.0), |x| x * x - 2.0, 1e-12, 100).unwrap();
        assert!((root.ic - 2.0_f64.sqrt()).abs() < 1e-11);
        assert!(matches!(
            bisect((0.0, 2.0), |x| x * x + 1.0, 1e-6, 100),
            Err(ShootError::NoBracket { .. }),
        ));
        assert!(matches!(
            bisect((0.0, 2.0), |x| x - 1.0 / 3.0, 1e-12, 5),
            Err(ShootError::Maxiters { maxiters: 5, .. }),
        ));
        let exact = bisect((1.0, 3.0), |x| x - 2.0, 1e-6, 10).unwrap();
        assert_eq!(exact.ic, 2.0);
        assert_eq!(exact.residual, 0.0);
    }

    #[test]
    fn bisect_reference_scenario() {
        let shooter = Shooter::new(0.001, 20700, Method::RK4).unwrap();
        let search = Search::Bisect {
            bounds: (2.3, 2.2),
            epsilon: Some(1e-9),
            maxiters: Some(100),
        };
        let root = shooter.solve(search).unwrap();
        assert!((root.ic - 2.2062016).abs() < 1e-6);
    }

    #[test]
    fn bracket_scan() {
        let shooter = short();
        let (a, b) = shooter.bracket(2.0, 2.5, 10).unwrap();
        assert!(a < 2.2064 && 2.2064 < b);
        assert!((b - a - 0.05).abs() < 1e-12);
        assert!(shooter.residual(a) * shooter.residual(b) < 0.0);
        assert!(matches!(
            find_bracket(|x| x * x + 1.0, -1.0, 1.0, 10),
            Err(ShootError::NoBracket { .. }),
        ));
        assert!(matches!(
            find_bracket(|x| x, -1.0, 1.0, 0),
            Err(ShootError::BadSteps(0)),
        ));
    }

    // the residual is nearly a step function of ic at r_max = 20.7, so the
    // secant iteration lands on a spurious zero far from 2.2062
    #[test]
    fn secant_wanders_on_long_grid() {
        let shooter = Shooter::new(0.001, 20700, Method::RK4).unwrap();
        let search = Search::Secant {
            bounds: (2.2, 2.3),
            epsilon: Some(1e-6),
            maxiters: Some(100),
        };
        let root = shooter.solve(search).unwrap();
        assert!(root.residual.abs() <= 1e-6);
        assert!((root.ic - 2.2062016).abs() > 1.0);
    }

    #[test]
    fn config_default_runs() {
        let config = Config {
            h: 0.01,
            n: 601,
            ..Config::default()
        };
        let (root, traj) = config.run().unwrap();
        assert!((root.ic - 2.2064).abs() < 1e-3);
        assert_eq!(traj.len(), 601);
        assert_eq!(traj.R[0], root.ic);
        assert!(matches!(
            Config { h: -1.0, ..Config::default() }.run(),
            Err(ShootError::Grid(_)),
        ));
    }
}

//! Miscellaneous tools.

use std::f64::consts::TAU;
use ndarray::{ self as nd, Ix1 };
use num_traits::Float;
use crate::{
    error::LengthError,
    integrate::Trajectory,
};

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner = y.slice(nd::s![1..n - 1]).iter()
        .fold(A::zero(), |acc, yk| acc + *yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Count the sign changes in a sampled profile.
///
/// Exact zeros are counted once, on the sample where they occur.
pub fn node_count<S, A>(y: &nd::ArrayBase<S, Ix1>) -> usize
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let z = A::zero();
    y.iter().zip(y.iter().skip(1))
        .filter(|(ykm1, yk)| {
            **ykm1 * **yk < z || (**ykm1 != z && **yk == z)
        })
        .count()
}

/// Compute the two-dimensional power of a radial profile,
/// ```text
/// P = 2π ∫ R(r)² r dr
/// ```
/// on a uniform grid with spacing `dr` starting at `r = 0`.
///
/// For the Townes profile this is the critical power for collapse, ≈ 11.70 in
/// normalized units.
///
/// *Panics if the arrays have length less than 2*.
pub fn power<S, T>(
    r: &nd::ArrayBase<S, Ix1>,
    R: &nd::ArrayBase<T, Ix1>,
    dr: f64,
) -> Result<f64, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(r, R)?;
    Ok(radial_power(r, R, dr))
}

/// Thin interface to [`power`] for a computed [`Trajectory`].
///
/// *Panics if the trajectory has fewer than 2 samples*.
pub fn trajectory_power(traj: &Trajectory) -> f64 {
    radial_power(&traj.r, &traj.R, traj.r[1] - traj.r[0])
}

// assumes equal lengths
fn radial_power<S, T>(
    r: &nd::ArrayBase<S, Ix1>,
    R: &nd::ArrayBase<T, Ix1>,
    dr: f64,
) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let integrand: nd::Array1<f64>
        = nd::Zip::from(r).and(R)
        .map_collect(|rk, Rk| Rk.powi(2) * rk);
    TAU * trapz(&integrand, dr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate::{ Method, integrate_townes };

    #[test]
    fn trapz_linear() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 21);
        assert!((trapz(&x, 0.1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn nodes() {
        assert_eq!(node_count(&nd::array![1.0, 0.5, -0.5, -1.0, 0.0, 1.0]), 2);
        assert_eq!(node_count(&nd::array![1.0_f64, 2.0, 3.0]), 0);

        let undershoot = integrate_townes(0.01, 601, 2.0, Method::RK4).unwrap();
        let overshoot = integrate_townes(0.01, 601, 2.3, Method::RK4).unwrap();
        assert_eq!(node_count(&undershoot.R), 0);
        assert!(node_count(&overshoot.R) >= 1);
    }

    #[test]
    fn townes_power() {
        let traj = integrate_townes(0.001, 8001, 2.2062016, Method::RK4)
            .unwrap();
        assert_eq!(node_count(&traj.R), 0);
        let p = trajectory_power(&traj);
        assert!((p - 11.70).abs() < 0.01);
        let q = power(&traj.r, &traj.R, 0.001).unwrap();
        assert!((p - q).abs() < 1e-9);
    }

    #[test]
    fn power_length_mismatch() {
        let r: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 5);
        let R: nd::Array1<f64> = nd::Array1::ones(4);
        assert!(power(&r, &R, 0.25).is_err());
    }
}

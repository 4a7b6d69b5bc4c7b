#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for computing the Townes
//! soliton profile, the ground-state radial solution of
//! ```text
//!        1
//! R'' + --- R' - R + R³ = 0,    R'(0) = 0,    R(r → ∞) = 0
//!        r
//! ```
//! via a shooting method on the central amplitude `R(0)`.
//!
//! Provides implementations for the following numerical routines:
//! - Fixed-step radial integration:
//!     - Explicit Euler
//!     - Classical fourth-order Runge-Kutta
//! - One-dimensional root search on the shooting residual:
//!     - Secant method
//!     - Bisection (with sign-change bracket scanning)
//! - Rescaling of computed profiles onto measured ones
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod fit;
pub mod integrate;
pub mod shoot;
pub mod utils;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 1000;

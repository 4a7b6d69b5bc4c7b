//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Reduction to first order](#reduction-to-first-order)
//! - [Integration schemes](#integration-schemes)
//! - [Shooting](#shooting)
//! - [Critical power](#critical-power)
//! - [Fitting](#fitting)
//!
//! # Background
//! The two-dimensional cubic (focusing) nonlinear Schrödinger equation,
//! ```text
//!   ∂ψ
//! i -- + ∇²ψ + |ψ|² ψ = 0
//!   ∂z
//! ```
//! describes, among other things, the propagation of an intense optical beam in
//! a Kerr medium[^1]. Looking for radially symmetric, self-trapped solutions of
//! the form *ψ* = *e*<sup>*iz*</sup> *R*(*r*) gives the ordinary differential
//! equation
//! ```text
//!        1
//! R'' + --- R' - R + R³ = 0
//!        r
//! ```
//! with boundary conditions *R*'(0) = 0 (regularity at the origin) and *R* → 0
//! as *r* → ∞. The unique positive, monotonically decreasing solution is the
//! Townes profile; it has *R*(0) ≈ 2.2062 and decays like
//! *e*<sup>-*r*</sup>/√*r* at large *r*.
//!
//! # Reduction to first order
//! With *V* ≡ *R*', the equation becomes the first-order system
//! ```text
//! V' = R - V/r - R³
//! R' = V
//! ```
//! which is integrated outward from *r* = 0 with *R*(0) given and *V*(0) = 0.
//! The damping term *V*/*r* is undefined at the origin, where *V* vanishes.
//! [`Townes`][crate::integrate::Townes] simply drops the term at *r* = 0,
//! evaluating *V*' = *R* - *R*³. This only affects the first stage of
//! the first step; every evaluation at *r* > 0 uses the full expression.
//!
//! Away from the origin, the equation is that of a particle with position *R*
//! moving in the double-well potential
//! ```text
//!          R²   R⁴
//! U(R) = - -- + --
//!          2    4
//! ```
//! with a time-dependent friction 1/*r*. The Townes profile is the single
//! trajectory that starts at rest and comes to rest exactly on top of the
//! central hump *R* = 0. Any other trajectory either falls short of the hump
//! (and settles in the *R* = +1 well) or overshoots it (and settles in the
//! *R* = -1 well).
//!
//! # Integration schemes
//! The grid is uniform, *r*\[*i*\] = *i* *h*, *i* ∊ {0, ..., *N* - 1}.
//!
//! The [explicit Euler][crate::integrate::Euler] step evaluates the derivative
//! at the destination radius,
//! ```text
//! R[i] = R[i - 1] + h V[i - 1]
//! V[i] = V[i - 1] + h (R[i - 1] - V[i - 1] / r[i] - R[i - 1]³)
//! ```
//! which never divides by *r*\[0\] = 0. It has a global error of *O*(*h*).
//!
//! The [classical fourth-order Runge-Kutta][crate::integrate::RK4] step takes
//! four stages
//! ```text
//! k₁ = f(r, y)
//! k₂ = f(r + h/2, y + h k₁ / 2)
//! k₃ = f(r + h/2, y + h k₂ / 2)
//! k₄ = f(r + h, y + h k₃)
//!
//! y(r + h) = y(r) + h (k₁ + 2 k₂ + 2 k₃ + k₄) / 6
//! ```
//! with *y* = (*R*, *V*). It reproduces any solution that is a polynomial of
//! degree at most four exactly. For the Townes system, the treatment of the
//! origin limits its observed global order, but its error remains far below
//! Euler's at equal *h*.
//!
//! # Shooting
//! The shooting residual is the terminal value *R*(*r*<sub>max</sub>) as a
//! function of *R*(0). Following the particle picture, the residual is positive
//! (near +1) for an undershooting *R*(0) and negative (near -1) for an
//! overshooting one, so the Townes value sits at a sign change. However,
//! deviations from the true profile grow like *e*<sup>*r*</sup>, so for large
//! *r*<sub>max</sub> the residual is very nearly a step function of *R*(0), and
//! the residual at the discrete root is generally *not* small.
//!
//! The [secant method][secant] is the natural first choice and converges in a
//! handful of iterations for moderate *r*<sub>max</sub> (~5-8). For larger
//! *r*<sub>max</sub>, [bisection][crate::shoot::bisect] on a sign-changing
//! bracket is more reliable, and converges on *R*(0) to any desired precision
//! regardless of how steep the residual becomes.
//!
//! # Critical power
//! The power (or "norm") of a radial profile,
//! ```text
//!            ∞
//! P = 2 π ∫ R(r)² r dr
//!           0
//! ```
//! evaluated on the Townes profile is the critical power for collapse,
//! *P*<sub>cr</sub> ≈ 11.70 in these units[^2]: beams with more power than this
//! self-focus to a singularity in finite propagation distance. See
//! [`utils::power`][crate::utils::power].
//!
//! # Fitting
//! Solitons with propagation constant *λ*² have profiles *λ* *R*(*λ* *r*), and
//! measured beams carry arbitrary units besides, so measured profiles are
//! compared to the computed one only after matching peak amplitude and
//! half-maximum position.
//! See [`fit`][crate::fit].
//!
//! [^1]: R. Y. Chiao, E. Garmire, and C. H. Townes, "Self-trapping of optical
//! beams." Physical Review Letters **13** 479 (1964).
//!
//! [^2]: G. Fibich, *The Nonlinear Schrödinger Equation: Singular Solutions
//! and Optical Collapse*. Springer (2015).
//!
//! [secant]: https://en.wikipedia.org/wiki/Secant_method

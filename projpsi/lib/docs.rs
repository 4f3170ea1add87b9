//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Bound states](#bound-states)
//! - [Scattering states](#scattering-states)
//! - [Overlaps and transition amplitudes](#overlaps-and-transition-amplitudes)
//! - [Fields on a grid](#fields-on-a-grid)
//!
//! # Background
//! A single electron in the field of a nucleus with charge *Z* that is driven
//! by an external pulse evolves into a superposition of bound and continuum
//! states. After the pulse, the populations of the field-free eigenstates are
//! fixed, and can be read off by projection:
//! ```text
//! P_j(t) = |⟨φ_j|ψ(t)⟩|²
//! ```
//! where *φ*<sub>*j*</sub> runs over a chosen set of hydrogenic eigenstates.
//! Since the eigenstates of the field-free Hamiltonian
//! ```text
//!       1         Z
//! H = - - ∇² - -----
//!       2       |r|
//! ```
//! are known in closed form, this amounts to evaluating a set of
//! three-dimensional integrals of products of sampled and analytic functions.
//! All quantities here are in atomic units (*ħ* = *m*<sub>*e*</sub> = *e* = 1).
//!
//! # Bound states
//! The bound eigenstates are separable in spherical coordinates,
//! ```text
//! φ_nlm(r, θ, φ) = R_nl(r) Y_lm(θ, φ)
//! ```
//! with *n* ≥ 1, 0 ≤ *l* < *n*, and |*m*| ≤ *l*, and energies
//! *E*<sub>*n*</sub> = -*Z*²/2 *n*². The radial part is
//! ```text
//!             ⎛⎛ 2 Z ⎞³ (n - l - 1)! ⎞½         l
//! R_nl(r) =   ⎜⎜-----⎟  -------------⎟   e^(-ρ/2) ρ  L_{n-l-1}^(2l+1)(ρ)
//!             ⎝⎝  n  ⎠   2 n (n + l)! ⎠
//!
//! ρ = 2 Z r / n
//! ```
//! where *L*<sub>*k*</sub><sup>(*α*)</sup> is a generalized Laguerre
//! polynomial, and *Y*<sub>*lm*</sub> is the orthonormal spherical harmonic,
//! including the Condon-Shortley phase. These states satisfy
//! ⟨*nlm*|*n*′*l*′*m*′⟩ = *δ*<sub>*nn*′</sub> *δ*<sub>*ll*′</sub>
//! *δ*<sub>*mm*′</sub>.
//!
//! # Scattering states
//! Continuum states are labeled by their asymptotic momentum **k**. With the
//! Sommerfeld parameter *η* = *Z*/|**k**|, the state is
//! ```text
//!                  -3/2   πη/2
//! ψ_k(r) = (2 π)       e      Γ(1 + i η) e^(i k·r) ₁F₁(-i η; 1; -i (k r + k·r))
//! ```
//! which behaves asymptotically as a plane wave plus an incoming spherical
//! wave, as appropriate for projecting onto final states of an ionization
//! process[^1]. The normalization is
//! ⟨**k**|**k**′⟩ = *δ*(**k** - **k**′), so that |⟨**k**|*ψ*⟩|² is a
//! probability density in momentum space. For *Z* = 0 this reduces to a plain
//! plane wave.
//!
//! The confluent hypergeometric function is summed as its power series,
//! ```text
//!                  ∞  (a)_n  z^n
//! ₁F₁(a; b; z) =   Σ  -----  ---
//!                 n=0 (b)_n   n!
//! ```
//! for moderate arguments. The series converges everywhere, but for imaginary
//! *z* its terms grow to about e^|*z*| before cancelling, so beyond |*z*| = 20
//! the two-term large-argument expansion is used instead:
//! ```text
//!                       ⎛ e^(±iπa)           e^z z^(a - b) ⎞
//! ₁F₁(a; b; z) ~ Γ(b) ⎜ ---------- z^(-a) + ------------- ⎟ , |z| → ∞
//!                       ⎝ Γ(b - a)               Γ(a)      ⎠
//! ```
//! with each term multiplied by its own asymptotic series in 1/*z*, summed up
//! to its smallest element (DLMF 13.7.2). The gamma function of complex argument
//! uses the Lanczos approximation.
//!
//! # Overlaps and transition amplitudes
//! Given two ordered sets of states {*a*<sub>*i*</sub>} and
//! {*b*<sub>*j*</sub>}, the overlap table holds
//! ```text
//! T[i, j] = |⟨b_j|a_i⟩|²
//! ```
//! which is symmetric under exchange of the two sets up to transposition.
//! Applied to a single basis, diagonal elements give state norms and
//! off-diagonal elements measure how far the sampled basis is from
//! orthonormal.
//!
//! In first-order perturbation theory, the probability of a transition *i* → *j*
//! driven by a field linearly polarized along *z* is proportional to
//! ```text
//! D[i, j] = |⟨j|z|i⟩|²
//! ```
//! which vanishes unless *l* changes by one and *m* is unchanged. For
//! hydrogen, |⟨100|*z*|210⟩|² = 2¹⁵/3¹⁰ ≈ 0.555.
//!
//! As a check on scattering states, the form factor
//! ```text
//! F(k, q) = ⟨k| e^(i q·r) |100⟩
//! ```
//! has a closed-form expression in terms of elementary functions[^2].
//!
//! # Fields on a grid
//! Fields are sampled at the centers of a uniform Cartesian grid on the cube
//! [-*L*, *L*]³ with *N* points per axis, spacing *δx* = 2 *L*/*N*, so that
//! ```text
//! x[i] = -L + (i + 1/2) δx, i ∊ {0, ..., N - 1}
//!
//! ⟨f|g⟩ ≈ Σ f*(x[i], y[j], z[k]) g(x[i], y[j], z[k]) δx³
//!        ijk
//! ```
//! This midpoint rule is exact in the complex-conjugate sense,
//! ⟨*f*|*g*⟩ = ⟨*g*|*f*⟩*, and is spectrally accurate for functions that decay
//! well inside the box. *N* is set from a base point count *k* and a
//! refinement level *n* as *N* = *k* · 2<sup>*n*</sup>. After sampling,
//! values with magnitude below a truncation threshold are set to zero.
//!
//! [^1]: L. D. Landau and E. M. Lifshitz, *Quantum Mechanics: Non-Relativistic
//! Theory*, 3rd ed., §136 (Pergamon, 1977).
//!
//! [^2]: Dž. Belkić, "A quantum theory of ionisation in fast collisions between
//! ions and atomic systems." J. Phys. B **11** 3529 (1978).

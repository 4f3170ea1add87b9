//! Provides functions and higher-level constructs for analyzing time-evolved
//! single-electron wavefunctions in three dimensions by projecting them onto a
//! basis of analytic hydrogenic eigenstates.
//!
//! Provides implementations for the following:
//! - Analytic states:
//!     - Hydrogenic bound states |*nlm*⟩
//!     - Coulomb scattering states |**k**⟩ (incoming-wave normalization)
//!     - Plane waves and the *z* dipole operator
//! - Basis construction from optional input files, with a default fallback
//! - Checkpointed storage of wavefunction snapshots by time step
//! - Overlap tables |⟨*j*|*i*⟩|² and dipole tables |⟨*j*|*z*|*i*⟩|²
//! - Radial probing of analytic states and a closed-form reference integral
//!
//! Fields are handled through the [`Field`][field::Field] and
//! [`FieldFactory`][field::FieldFactory] traits, with a uniform Cartesian grid
//! as the provided backend.
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod field;
pub mod states;
pub mod utils;
pub mod config;
pub mod basis;
pub mod cache;
pub mod overlap;
pub mod report;
pub mod probe;
pub mod analytic;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-15;
pub(crate) const DEF_MAXITERS: usize = 1000;

/// A point or momentum in three-dimensional space.
pub type Vec3 = [f64; 3];

pub type ProjResult<T> = Result<T, error::ProjError>;

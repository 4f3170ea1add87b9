//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::{ io, path::PathBuf };
use ndarray_npy::{ ReadNpzError, WriteNpzError };
use thiserror::Error;
use crate::field::Grid;

/// Returned from binary operations on fields.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Returned when two fields sampled on different grids are combined.
    #[error("fields are defined over incompatible grids: {0} and {1}")]
    GridMismatch(Grid, Grid),

    /// Returned when a grid is requested with no sample points or an empty
    /// cell.
    #[error("grid must have a non-empty cell and at least one point per axis; got [{lo}, {hi}] with {n} points")]
    BadGrid { lo: f64, hi: f64, n: usize },

    /// Returned when a sample array does not match the shape of its grid.
    #[error("sample array has shape {got:?}; expected {n}^3")]
    Shape { n: usize, got: Vec<usize> },
}

impl FieldError {
    pub(crate) fn check_grids(a: &Grid, b: &Grid) -> Result<(), Self> {
        (a == b).then_some(()).ok_or(Self::GridMismatch(*a, *b))
    }
}

/// Returned when constructing an eigenstate functor from invalid parameters.
#[derive(Debug, Error)]
pub enum StateError {
    /// Returned for quantum numbers outside `n ≥ 1`, `0 ≤ l < n`, `|m| ≤ l`.
    #[error("invalid bound-state quantum numbers (n, l, m) = ({0}, {1}, {2})")]
    QuantumNumbers(i32, i32, i32),

    /// Returned for a scattering state with vanishing momentum.
    #[error("scattering states require non-zero momentum; got ({0}, {1}, {2})")]
    ZeroMomentum(f64, f64, f64),
}

impl StateError {
    pub(crate) fn check_nlm(n: i32, l: i32, m: i32) -> Result<(), Self> {
        (n >= 1 && (0..n).contains(&l) && m.abs() <= l)
            .then_some(())
            .ok_or(Self::QuantumNumbers(n, l, m))
    }
}

/// Returned while reading line-oriented input sources.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when an input file exists but cannot be read.
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Returned when a recognized key is followed by a malformed value.
    #[error("bad value for key '{key}': {value:?}")]
    BadValue { key: String, value: String },

    /// Returned when a recognized key is the last token of the input.
    #[error("key '{0}' is missing its value")]
    MissingValue(String),

    /// Returned when a state-specification source contains a non-numeric
    /// token.
    #[error("{source_name}: bad token {token:?}")]
    BadToken { source_name: &'static str, token: String },

    /// Returned when a state-specification source ends partway through a
    /// triplet.
    #[error("{source_name}: expected whitespace-separated triplets; {dangling} dangling token(s)")]
    Arity { source_name: &'static str, dangling: usize },

    /// Returned for a snapshot step id that is not a non-negative integer.
    #[error("bad step id {0:?}")]
    BadStepId(String),
}

/// Returned from the wavefunction snapshot cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Returned when loading a key that was never stored.
    #[error("no snapshot stored under key '{0}'")]
    Missing(String),

    /// Returned when an archive lacks one of its expected entries.
    #[error("archive {0:?} has no entry '{1}'")]
    MissingEntry(PathBuf, &'static str),

    /// Returned when the archived cell description is malformed.
    #[error("archive {0:?} has a malformed cell description")]
    BadCell(PathBuf),

    /// Returned when the archived sample array does not match the archived
    /// cell.
    #[error("archive {0:?}: {1}")]
    Field(PathBuf, FieldError),

    /// [`io::Error`]
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// [`ReadNpzError`]
    #[error("npz read error: {0}")]
    ReadNpz(#[from] ReadNpzError),

    /// [`WriteNpzError`]
    #[error("npz write error: {0}")]
    WriteNpz(#[from] WriteNpzError),
}

/// Top-level error type, returned from whole-pipeline operations.
#[derive(Debug, Error)]
pub enum ProjError {
    /// [`ConfigError`]
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// [`FieldError`]
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// [`StateError`]
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// [`CacheError`]
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Returned when writing user-visible output fails.
    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

impl ProjError {
    /// Broad origin of the error, used when reporting a fatal failure.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Field(_) | Self::State(_) => "numerical",
            Self::Cache(_) => "archive",
            Self::Output(_) => "output",
        }
    }
}

//! Numerical parameters and the names of the optional input files.
//!
//! The parameter file is a stream of whitespace-separated tokens. A recognized
//! key is followed by its value:
//! ```text
//! # wavelet order and box half-width
//! k 12
//! L 10.0
//! ```
//! A token beginning with `#` comments out the rest of its line; any other
//! token is ignored.
//!
//! ```
//! use projpsi::config::Params;
//!
//! let params = Params::parse("# coarse run\nk 6\nL 15 thresh 1e-5").unwrap();
//! assert_eq!(params.k, 6);
//! assert_eq!(params.l, 15.0);
//! assert_eq!(params.thresh, 1e-5);
//! assert_eq!(params.initial_level, 3);
//! ```

use std::{ fs, io, path::{ Path, PathBuf }, str::FromStr };
use tracing::debug;
use crate::{
    error::ConfigError,
    field::{ Grid, GridFactory },
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Largest number of grid samples allowed along one axis.
pub const MAX_POINTS_PER_AXIS: usize = 512;

/// Parameters of the numerical backend.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    /// Discretization order (key `k`).
    pub k: usize,
    /// Half-width of the cubic computational cell (key `L`).
    pub l: f64,
    /// Truncation threshold for projected fields (key `thresh`).
    pub thresh: f64,
    /// Refinement level; each axis carries `k · 2^initial_level` samples (key
    /// `initial_level`).
    pub initial_level: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self { k: 12, l: 10.0, thresh: 1e-4, initial_level: 3 }
    }
}

fn parse_value<T: FromStr>(key: &str, value: Option<&str>) -> ConfigResult<T> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(key.to_string()))?;
    value.parse()
        .map_err(|_| ConfigError::BadValue { key: key.to_string(), value: value.to_string() })
}

impl Params {
    /// Parse parameters from the text of a parameter file, starting from the
    /// defaults.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let mut params = Self::default();
        let mut tokens
            = text.lines()
            .flat_map(|line| {
                // everything after a token starting with '#' is a comment
                let code = match line.split_whitespace().position(|t| t.starts_with('#')) {
                    Some(p) => {
                        debug!(comment = line.trim(), "parameter file comment");
                        line.split_whitespace().take(p).collect::<Vec<_>>()
                    },
                    None => line.split_whitespace().collect(),
                };
                code.into_iter()
            });
        while let Some(tag) = tokens.next() {
            match tag {
                "k" => { params.k = parse_value(tag, tokens.next())?; },
                "L" => { params.l = parse_value(tag, tokens.next())?; },
                "thresh" => { params.thresh = parse_value(tag, tokens.next())?; },
                "initial_level" => {
                    params.initial_level = parse_value(tag, tokens.next())?;
                },
                _ => { debug!(token = tag, "ignoring unrecognized parameter token"); },
            }
        }
        params.validate()?;
        Ok(params)
    }

    /// Read parameters from `path`, falling back to the defaults if it does
    /// not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        match read_optional(path)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::default()),
        }
    }

    /// Number of samples along each axis of the grid backend, `k ·
    /// 2^initial_level`.
    ///
    /// Returns [`ConfigError::BadValue`] unless the count is between 1 and
    /// [`MAX_POINTS_PER_AXIS`].
    pub fn points_per_axis(&self) -> ConfigResult<usize> {
        1_usize.checked_shl(self.initial_level)
            .and_then(|scale| self.k.checked_mul(scale))
            .filter(|n| (1..=MAX_POINTS_PER_AXIS).contains(n))
            .ok_or_else(|| ConfigError::BadValue {
                key: "k, initial_level".to_string(),
                value: format!("{}, {}", self.k, self.initial_level),
            })
    }

    /// Check that every parameter describes a usable grid.
    pub fn validate(&self) -> ConfigResult<()> {
        self.points_per_axis()?;
        if !(self.l.is_finite() && self.l > 0.0) {
            return Err(bad_value("L", self.l));
        }
        if !(self.thresh.is_finite() && self.thresh >= 0.0) {
            return Err(bad_value("thresh", self.thresh));
        }
        Ok(())
    }

    /// The grid covering `[-L, L]`³.
    pub fn grid(&self) -> ConfigResult<Grid> {
        self.validate()?;
        Grid::cubic(self.l, self.points_per_axis()?)
            .map_err(|_| bad_value("L", self.l))
    }

    /// A factory for the grid backend.
    pub fn factory(&self) -> ConfigResult<GridFactory> {
        Ok(GridFactory::new(self.grid()?, self.thresh))
    }
}

fn bad_value(key: &str, value: f64) -> ConfigError {
    ConfigError::BadValue { key: key.to_string(), value: value.to_string() }
}

/// Read a whole file, mapping a missing file to `None`.
pub fn read_optional<P: AsRef<Path>>(path: P) -> ConfigResult<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
    }
}

/// Locations of the optional line-oriented input files, all within one
/// directory.
#[derive(Clone, Debug)]
pub struct InputFiles {
    dir: PathBuf,
}

impl InputFiles {
    pub const PARAMETERS: &'static str = "input";
    pub const BOUND: &'static str = "bound.num";
    pub const UNBOUND: &'static str = "unbound.num";
    pub const STEP_IDS: &'static str = "wf.num";

    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    /// Numerical parameters.
    pub fn parameters(&self) -> PathBuf { self.dir.join(Self::PARAMETERS) }

    /// Bound-state quantum numbers, `n l m` per line.
    pub fn bound(&self) -> PathBuf { self.dir.join(Self::BOUND) }

    /// Scattering-state momenta, `kx ky kz` per line.
    pub fn unbound(&self) -> PathBuf { self.dir.join(Self::UNBOUND) }

    /// Time steps of stored wavefunctions, one per line.
    pub fn step_ids(&self) -> PathBuf { self.dir.join(Self::STEP_IDS) }
}

impl Default for InputFiles {
    fn default() -> Self { Self::new(".") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_input() {
        assert_eq!(Params::parse("").unwrap(), Params::default());
        let p = Params::default();
        assert_eq!(p.points_per_axis().unwrap(), 96);
        let g = p.grid().unwrap();
        assert_eq!((g.lo(), g.hi(), g.n()), (-10.0, 10.0, 96));
    }

    #[test]
    fn comments_and_unknown_tokens() {
        let text = "# k 3 is commented out\nfoo k 5 # L 2\nbar L 7.5\n";
        let p = Params::parse(text).unwrap();
        assert_eq!(p.k, 5);
        assert_eq!(p.l, 7.5);
    }

    #[test]
    fn malformed_values() {
        assert!(matches!(Params::parse("k twelve"), Err(ConfigError::BadValue { .. })));
        assert!(matches!(Params::parse("L"), Err(ConfigError::MissingValue(_))));
    }

    #[test]
    fn oversized_or_degenerate_grids() {
        for text in [
            "initial_level 64",
            "initial_level 4294967295",
            "k 18446744073709551615 initial_level 1",
            "k 1024 initial_level 0",
            "k 0",
            "L 0",
            "L -3",
            "L nan",
            "thresh -1e-4",
        ] {
            assert!(
                matches!(Params::parse(text), Err(ConfigError::BadValue { .. })),
                "accepted {text:?}",
            );
        }
        let p = Params::parse(&format!("k {MAX_POINTS_PER_AXIS} initial_level 0")).unwrap();
        assert_eq!(p.points_per_axis().unwrap(), MAX_POINTS_PER_AXIS);

        let p = Params { initial_level: 200, ..Params::default() };
        assert!(p.points_per_axis().is_err());
        assert!(p.factory().is_err());
    }

    #[test]
    fn missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = InputFiles::new(dir.path());
        assert!(read_optional(files.bound()).unwrap().is_none());
        assert_eq!(Params::load(files.parameters()).unwrap(), Params::default());
        fs::write(files.parameters(), "k 4\ninitial_level 2\n").unwrap();
        let p = Params::load(files.parameters()).unwrap();
        assert_eq!(p.points_per_axis().unwrap(), 16);
    }
}

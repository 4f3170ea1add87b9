//! Construction of an ordered basis of labeled eigenstates.
//!
//! A basis is read from two optional sources: bound-state quantum numbers
//! (`n l m` integer triplets) and scattering-state momenta (`kx ky kz` real
//! triplets). Bound states come first, each source in its own order. If both
//! sources are absent, a small [default basis](default_states) is used
//! instead.
//!
//! Both sources are parsed in full before any field is constructed, so a
//! malformed file is rejected before any numerical work starts.

use std::{ io::Write, path::Path, str::FromStr, time::Instant };
use tracing::{ debug, info };
use crate::{
    Vec3,
    config::{ read_optional, ConfigResult, InputFiles },
    error::ConfigError,
    field::{ Field, FieldFactory },
    report::Reporter,
    states::{ BoundWF, ScatteringWF, StateResult },
    ProjResult,
};

/// Nuclear charge used for every constructed state.
pub const NUCLEAR_CHARGE: f64 = 1.0;

/// A field paired with a display label.
///
/// The field is truncated on construction; the label plays no part in any
/// computation.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledField<F> {
    pub label: String,
    pub value: F,
}

impl<F: Field> LabeledField<F> {
    pub fn new<S: Into<String>>(label: S, mut value: F) -> Self {
        value.truncate();
        Self { label: label.into(), value }
    }
}

/// An ordered collection of labeled fields; order sets row and column order
/// in printed tables.
pub type Basis<F> = Vec<LabeledField<F>>;

/// Description of a single eigenstate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum QuantumState {
    /// Bound state with principal, angular, and magnetic quantum numbers.
    Bound { n: i32, l: i32, m: i32 },
    /// Scattering state with asymptotic momentum **k**.
    Scattering { k: Vec3 },
}

impl QuantumState {
    /// Display label: `"nlm"` for bound states, momentum components to two
    /// decimal places for scattering states.
    pub fn label(&self) -> String {
        match self {
            Self::Bound { n, l, m } => format!("{n}{l}{m}"),
            Self::Scattering { k } => format!("{:.2} {:.2} {:.2}", k[0], k[1], k[2]),
        }
    }

    /// Project this state onto a backend with nuclear charge `z`. Scattering
    /// states are sampled out to radius `domain`.
    pub fn construct<Fac>(&self, factory: &Fac, z: f64, domain: f64)
        -> StateResult<Fac::Field>
    where Fac: FieldFactory
    {
        match *self {
            Self::Bound { n, l, m } => {
                Ok(factory.project(&BoundWF::new(z, n, l, m)?))
            },
            Self::Scattering { k } => {
                Ok(factory.project(&ScatteringWF::new(z, k, domain)?))
            },
        }
    }
}

/// The fallback basis: 1s, 2s, 2p₀, and one scattering state with **k** along
/// *z*.
pub fn default_states() -> Vec<QuantumState> {
    vec![
        QuantumState::Bound { n: 1, l: 0, m: 0 },
        QuantumState::Bound { n: 2, l: 0, m: 0 },
        QuantumState::Bound { n: 2, l: 1, m: 0 },
        QuantumState::Scattering { k: [0.0, 0.0, 0.52] },
    ]
}

fn parse_triplets<T: FromStr>(source_name: &'static str, text: &str)
    -> ConfigResult<Vec<[T; 3]>>
{
    let values: Vec<T>
        = text.split_whitespace()
        .map(|tok| {
            tok.parse()
                .map_err(|_| ConfigError::BadToken { source_name, token: tok.to_string() })
        })
        .collect::<ConfigResult<_>>()?;
    let dangling = values.len() % 3;
    if dangling != 0 { return Err(ConfigError::Arity { source_name, dangling }); }
    let mut iter = values.into_iter();
    let mut triplets: Vec<[T; 3]> = Vec::new();
    while let (Some(a), Some(b), Some(c)) = (iter.next(), iter.next(), iter.next()) {
        triplets.push([a, b, c]);
    }
    Ok(triplets)
}

/// Parse bound-state quantum numbers, one `n l m` triplet per line.
///
/// No range checking is done here; see [`BoundWF::new`].
pub fn parse_bound(text: &str) -> ConfigResult<Vec<QuantumState>> {
    let states
        = parse_triplets::<i32>(InputFiles::BOUND, text)?
        .into_iter()
        .map(|[n, l, m]| QuantumState::Bound { n, l, m })
        .collect();
    Ok(states)
}

/// Parse scattering-state momenta, one `kx ky kz` triplet per line.
pub fn parse_unbound(text: &str) -> ConfigResult<Vec<QuantumState>> {
    let states
        = parse_triplets::<f64>(InputFiles::UNBOUND, text)?
        .into_iter()
        .map(|k| QuantumState::Scattering { k })
        .collect();
    Ok(states)
}

/// Raw text of the two optional basis sources.
#[derive(Clone, Debug, Default)]
pub struct BasisSources {
    pub bound: Option<String>,
    pub unbound: Option<String>,
}

impl BasisSources {
    /// Read `bound.num` and `unbound.num` from `dir`, if present.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> ConfigResult<Self> {
        let files = InputFiles::new(dir);
        Ok(Self {
            bound: read_optional(files.bound())?,
            unbound: read_optional(files.unbound())?,
        })
    }
}

fn construct_all<Fac, W>(
    factory: &Fac,
    domain: f64,
    states: &[QuantumState],
    basis: &mut Basis<Fac::Field>,
    out: &mut Reporter<W>,
) -> ProjResult<()>
where
    Fac: FieldFactory,
    W: Write,
{
    for state in states {
        let label = state.label();
        out.print(format_args!("{label}"))?;
        let start = Instant::now();
        let value = state.construct(factory, NUCLEAR_CHARGE, domain)?;
        basis.push(LabeledField::new(label.clone(), value));
        let used = start.elapsed().as_secs_f64();
        debug!(state = %label, seconds = used, "constructed basis state");
        out.println(format_args!("\t{used} sec"))?;
    }
    Ok(())
}

/// Construct a basis from `sources`.
///
/// If neither source names any state (both absent or both empty) the
/// [default basis](default_states) is used; a single missing source is
/// reported and the other used alone. `domain` is the sampling radius given to
/// scattering states.
pub fn build_basis<Fac, W>(
    factory: &Fac,
    domain: f64,
    sources: &BasisSources,
    out: &mut Reporter<W>,
) -> ProjResult<Basis<Fac::Field>>
where
    Fac: FieldFactory,
    W: Write,
{
    let bound = sources.bound.as_deref().map(parse_bound).transpose()?;
    let unbound = sources.unbound.as_deref().map(parse_unbound).transpose()?;
    let mut basis: Basis<Fac::Field> = Vec::new();
    let specified
        = bound.as_ref().map_or(0, Vec::len)
        + unbound.as_ref().map_or(0, Vec::len);
    if specified == 0 {
        if bound.is_none() && unbound.is_none() {
            out.println(format_args!(
                "{} and {} not found", InputFiles::BOUND, InputFiles::UNBOUND))?;
        } else {
            out.println(format_args!("No basis states specified"))?;
        }
        out.println(format_args!("Loading the default basis"))?;
        info!("using the default basis");
        construct_all(factory, domain, &default_states(), &mut basis, out)?;
        out.println(format_args!("Done loading the standard basis"))?;
        return Ok(basis);
    }
    match bound {
        Some(states) => {
            out.println(format_args!("Calculating bound quantum states"))?;
            info!(count = states.len(), "constructing bound states");
            construct_all(factory, domain, &states, &mut basis, out)?;
        },
        None => { out.println(format_args!("{} not found", InputFiles::BOUND))?; },
    }
    match unbound {
        Some(states) => {
            out.println(format_args!("Calculating unbound quantum states"))?;
            info!(count = states.len(), "constructing scattering states");
            construct_all(factory, domain, &states, &mut basis, out)?;
        },
        None => { out.println(format_args!("{} not found", InputFiles::UNBOUND))?; },
    }
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(QuantumState::Bound { n: 2, l: 1, m: 0 }.label(), "210");
        assert_eq!(QuantumState::Bound { n: 3, l: 2, m: -1 }.label(), "32-1");
        let sc = QuantumState::Scattering { k: [0.0, -0.333, 0.52] };
        assert_eq!(sc.label(), "0.00 -0.33 0.52");
    }

    #[test]
    fn parse_sources() {
        let bound = parse_bound("1 0 0\n2 1 0\n\n3 2 -1\n").unwrap();
        assert_eq!(bound.len(), 3);
        assert_eq!(bound[2], QuantumState::Bound { n: 3, l: 2, m: -1 });
        // out-of-range values pass through unchanged
        assert_eq!(parse_bound("1 5 9").unwrap()[0], QuantumState::Bound { n: 1, l: 5, m: 9 });

        let unbound = parse_unbound("0 0 0.5\n0.1 0.2 0.3").unwrap();
        assert_eq!(unbound[1], QuantumState::Scattering { k: [0.1, 0.2, 0.3] });

        assert!(parse_bound("").unwrap().is_empty());
        assert!(matches!(parse_bound("1 0"), Err(ConfigError::Arity { dangling: 2, .. })));
        assert!(matches!(parse_bound("1 0 x"), Err(ConfigError::BadToken { .. })));
        assert!(matches!(parse_unbound("0 0 0.5 1"), Err(ConfigError::Arity { .. })));
    }

    #[test]
    fn sources_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sources = BasisSources::from_dir(dir.path()).unwrap();
        assert!(sources.bound.is_none() && sources.unbound.is_none());
        std::fs::write(dir.path().join(InputFiles::BOUND), "2 1 0\n").unwrap();
        let sources = BasisSources::from_dir(dir.path()).unwrap();
        assert_eq!(sources.bound.as_deref(), Some("2 1 0\n"));
        assert!(sources.unbound.is_none());
    }
}

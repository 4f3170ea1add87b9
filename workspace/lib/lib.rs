//! Shared setup for the driver binaries: logging, fatal-error handling, and
//! loading the numerical parameters.

use std::{ io, path::Path, process };
use tracing::{ error, info };
use tracing_subscriber::EnvFilter;
use projpsi::{
    config::{ InputFiles, Params },
    error::{ CacheError, ConfigError, FieldError, ProjError, StateError },
    field::GridFactory,
    report::{ Reporter, World },
};

/// Install the global `tracing` subscriber. The filter comes from `RUST_LOG`,
/// defaulting to `info`; events go to stderr so they never mix with tables on
/// stdout.
pub fn init_tracing() {
    let filter
        = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // a second call only fails to replace the subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

/// Broad origin of a driver error, as reported on exit.
pub fn category(err: &anyhow::Error) -> &'static str {
    if let Some(proj) = err.downcast_ref::<ProjError>() {
        proj.category()
    } else if err.is::<ConfigError>() {
        "configuration"
    } else if err.is::<FieldError>() || err.is::<StateError>() {
        "numerical"
    } else if err.is::<CacheError>() {
        "archive"
    } else if err.is::<io::Error>() {
        "output"
    } else {
        "unexpected"
    }
}

/// Unwrap the result of a driver's `run`, or log the failure and exit with
/// status 1.
pub fn exit_on_error<T>(res: anyhow::Result<T>) -> T {
    match res {
        Ok(val) => val,
        Err(err) => {
            error!(category = category(&err), "{err:#}");
            process::exit(1);
        },
    }
}

/// Everything a driver needs before it starts building fields.
pub struct Session {
    pub world: World,
    pub out: Reporter<io::Stdout>,
    pub files: InputFiles,
    pub params: Params,
    pub factory: GridFactory,
}

impl Session {
    /// Load parameters from the `input` file in `dir` and echo them on the
    /// root process.
    pub fn start<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let world = World::from_env();
        let mut out = world.stdout();
        let files = InputFiles::new(dir);
        let params = Params::load(files.parameters())?;
        out.println(format_args!("L = {:.1}", params.l))?;
        out.println(format_args!("k = {}", params.k))?;
        let factory = params.factory()?;
        info!(
            rank = world.rank(),
            size = world.size(),
            grid = %factory.grid(),
            thresh = params.thresh,
            "session started",
        );
        Ok(Self { world, out, files, params, factory })
    }

    /// Radius out to which scattering states are sampled: the farthest point
    /// of the computational cell.
    pub fn domain(&self) -> f64 { self.factory.grid().corner_radius() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let config: anyhow::Error = ConfigError::MissingValue("k".into()).into();
        assert_eq!(category(&config), "configuration");
        let wrapped: anyhow::Error
            = ProjError::from(CacheError::Missing("data-00003".into())).into();
        assert_eq!(category(&wrapped), "archive");
        let state: anyhow::Error = StateError::QuantumNumbers(0, 0, 0).into();
        assert_eq!(category(&state), "numerical");
        let io_err: anyhow::Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert_eq!(category(&io_err), "output");
        assert_eq!(category(&anyhow::anyhow!("other")), "unexpected");
    }

    #[test]
    fn session_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(InputFiles::PARAMETERS), "k 2 initial_level 2 L 4\n")
            .unwrap();
        let session = Session::start(dir.path()).unwrap();
        assert_eq!(session.params.l, 4.0);
        assert_eq!(session.factory.grid().n(), 8);
        assert!((session.domain() - 4.0 * 3f64.sqrt()).abs() < 1e-12);
    }
}

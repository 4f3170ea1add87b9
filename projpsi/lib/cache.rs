//! Checkpointed wavefunction snapshots, keyed by integer time step.
//!
//! Each snapshot lives in its own file, `<dir>/<prefix>-<step>`, with the step
//! zero-padded to five digits. The cache only relies on a field type being
//! able to [write itself to and read itself from a path][Archive].

use std::{ fs::File, io::{ BufReader, BufWriter, Read, Seek, Write }, path::{ Path, PathBuf } };
use ndarray as nd;
use ndarray_npy::{ NpzReader, NpzWriter };
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    basis::LabeledField,
    error::{ CacheError, ConfigError },
    field::{ Field, Grid, GridField },
    report::Reporter,
    ProjResult,
};

pub type CacheResult<T> = Result<T, CacheError>;

/// Default file name prefix for stored snapshots.
pub const DEF_PREFIX: &str = "data";

/// A field that can be persisted to a single file.
pub trait Archive: Sized {
    fn write_archive(&self, path: &Path) -> CacheResult<()>;

    fn read_archive(path: &Path) -> CacheResult<Self>;
}

const PSI_ENTRY: &str = "psi";
const CELL_ENTRY: &str = "cell";

// entry names inside an npz may or may not carry the `.npy` suffix
fn by_stem<R, A, D>(npz: &mut NpzReader<R>, path: &Path, stem: &'static str)
    -> CacheResult<nd::Array<A, D>>
where
    R: Read + Seek,
    A: ndarray_npy::ReadableElement,
    D: nd::Dimension,
{
    let name
        = npz.names()?
        .into_iter()
        .find(|name| name.trim_end_matches(".npy") == stem)
        .ok_or_else(|| CacheError::MissingEntry(path.to_path_buf(), stem))?;
    Ok(npz.by_name(&name)?)
}

impl Archive for GridField {
    fn write_archive(&self, path: &Path) -> CacheResult<()> {
        let cell: nd::Array1<f64>
            = nd::array![self.grid.lo(), self.grid.hi(), self.thresh];
        let mut npz = NpzWriter::new(BufWriter::new(File::create(path)?));
        npz.add_array(PSI_ENTRY, &self.values)?;
        npz.add_array(CELL_ENTRY, &cell)?;
        npz.finish()?.flush()?;
        Ok(())
    }

    fn read_archive(path: &Path) -> CacheResult<Self> {
        let mut npz = NpzReader::new(BufReader::new(File::open(path)?))?;
        let values: nd::Array3<C64> = by_stem(&mut npz, path, PSI_ENTRY)?;
        let cell: nd::Array1<f64> = by_stem(&mut npz, path, CELL_ENTRY)?;
        let &[lo, hi, thresh] = cell.as_slice().unwrap_or(&[]) else {
            return Err(CacheError::BadCell(path.to_path_buf()));
        };
        let grid = Grid::new(lo, hi, values.shape()[0])
            .map_err(|e| CacheError::Field(path.to_path_buf(), e))?;
        GridField::from_samples(grid, thresh, values)
            .map_err(|e| CacheError::Field(path.to_path_buf(), e))
    }
}

/// Snapshot store rooted at a directory, with a fixed file name prefix.
#[derive(Clone, Debug)]
pub struct WavefunctionCache {
    dir: PathBuf,
    prefix: String,
}

impl WavefunctionCache {
    pub fn new<P, S>(dir: P, prefix: S) -> Self
    where
        P: AsRef<Path>,
        S: Into<String>,
    {
        Self { dir: dir.as_ref().to_path_buf(), prefix: prefix.into() }
    }

    /// A cache in `dir` using [`DEF_PREFIX`].
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self { Self::new(dir, DEF_PREFIX) }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn prefix(&self) -> &str { &self.prefix }

    /// Storage key for a time step.
    pub fn key(&self, step: u32) -> String { format!("{}-{:05}", self.prefix, step) }

    /// Location of the snapshot for a time step.
    pub fn path(&self, step: u32) -> PathBuf { self.dir.join(self.key(step)) }

    /// Whether a snapshot has been stored for `step`.
    pub fn exists(&self, step: u32) -> bool { self.path(step).is_file() }

    /// Store `value` under `step`, replacing any earlier snapshot.
    pub fn store<F: Archive>(&self, step: u32, value: &F) -> CacheResult<()> {
        let path = self.path(step);
        debug!(path = %path.display(), "storing snapshot");
        value.write_archive(&path)
    }

    /// Load the snapshot stored under `step`.
    ///
    /// Callers are expected to check [`Self::exists`] first; a missing
    /// snapshot is an error.
    pub fn load<F: Archive>(&self, step: u32) -> CacheResult<F> {
        let path = self.path(step);
        if !path.is_file() { return Err(CacheError::Missing(self.key(step))); }
        debug!(path = %path.display(), "loading snapshot");
        F::read_archive(&path)
    }
}

/// Split the text of a step-id list into tokens, one per requested snapshot.
pub fn parse_step_ids(text: &str) -> Vec<&str> { text.split_whitespace().collect() }

/// Load every stored snapshot named in `ids`, in order, labeling each with its
/// id as written.
///
/// Ids with no stored snapshot are reported and skipped. An id that is not a
/// non-negative integer is an error.
pub fn load_snapshots<F, W>(
    cache: &WavefunctionCache,
    ids: &[&str],
    out: &mut Reporter<W>,
) -> ProjResult<Vec<LabeledField<F>>>
where
    F: Field + Archive,
    W: Write,
{
    let steps: Vec<u32>
        = ids.iter()
        .map(|id| id.parse().map_err(|_| ConfigError::BadStepId(id.to_string())))
        .collect::<Result<_, _>>()?;
    let mut snapshots: Vec<LabeledField<F>> = Vec::new();
    for (id, step) in ids.iter().zip(steps) {
        if cache.exists(step) {
            snapshots.push(LabeledField::new(*id, cache.load(step)?));
        } else {
            warn!(step, key = %cache.key(step), "snapshot not found; skipping");
            out.println(format_args!("Function: {id} not found"))?;
        }
    }
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ FieldFactory, Functor, GridFactory };
    use crate::Vec3;

    struct Blob;

    impl Functor for Blob {
        fn value(&self, r: &Vec3) -> C64 {
            let r2: f64 = r.iter().map(|x| x * x).sum();
            C64::from_polar((-r2).exp(), r[0])
        }
    }

    fn field() -> GridField {
        GridFactory::new(Grid::cubic(4.0, 8).unwrap(), 1e-6).project(&Blob)
    }

    #[test]
    fn keys() {
        let cache = WavefunctionCache::in_dir("/tmp/snapshots");
        assert_eq!(cache.key(42), "data-00042");
        assert_eq!(cache.key(123456), "data-123456");
        assert_eq!(cache.path(7), Path::new("/tmp/snapshots/data-00007"));
        assert_eq!(WavefunctionCache::new(".", "psi").key(0), "psi-00000");
    }

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = WavefunctionCache::in_dir(dir.path());
        let psi = field();
        assert!(!cache.exists(3));
        cache.store(3, &psi).unwrap();
        assert!(cache.exists(3));
        assert!(!cache.exists(4));
        let back: GridField = cache.load(3).unwrap();
        assert_eq!(back, psi);
    }

    #[test]
    fn store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = WavefunctionCache::in_dir(dir.path());
        let psi = field();
        let psi2 = psi.combine(&psi).unwrap();
        cache.store(1, &psi).unwrap();
        cache.store(1, &psi2).unwrap();
        let back: GridField = cache.load(1).unwrap();
        assert_eq!(back, psi2);
    }

    #[test]
    fn load_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = WavefunctionCache::in_dir(dir.path());
        let res: CacheResult<GridField> = cache.load(9);
        assert!(matches!(res, Err(CacheError::Missing(key)) if key == "data-00009"));
    }

    #[test]
    fn bad_step_id() {
        let dir = tempfile::tempdir().unwrap();
        let cache = WavefunctionCache::in_dir(dir.path());
        let res: ProjResult<Vec<LabeledField<GridField>>>
            = load_snapshots(&cache, &["3", "x7"], &mut Reporter::silent());
        assert!(res.is_err());
        assert_eq!(parse_step_ids(" 3\n7 \n\n"), vec!["3", "7"]);
    }
}

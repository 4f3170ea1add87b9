//! Process identity within a parallel launch and rank-gated text output.
//!
//! Every worker runs the same sequence of field operations; only the
//! designated root worker (rank 0) writes anything the user sees. Components
//! take a [`Reporter`] rather than checking their rank, so that suppressing
//! output never changes what is computed.

use std::{ env, fmt, io::{ self, Write } };

/// Position of this process in a parallel launch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct World {
    rank: usize,
    size: usize,
}

const RANK_VARS: [&str; 3] = ["OMPI_COMM_WORLD_RANK", "PMI_RANK", "SLURM_PROCID"];
const SIZE_VARS: [&str; 3] = ["OMPI_COMM_WORLD_SIZE", "PMI_SIZE", "SLURM_NTASKS"];

fn first_var(names: &[&str]) -> Option<usize> {
    names.iter()
        .find_map(|name| env::var(name).ok())
        .and_then(|val| val.trim().parse().ok())
}

impl World {
    /// A single-process world.
    pub fn single() -> Self { Self { rank: 0, size: 1 } }

    /// Create a world with explicit rank and size.
    ///
    /// *Panics if `rank >= size`*.
    pub fn new(rank: usize, size: usize) -> Self {
        assert!(rank < size, "report::World::new: rank {rank} out of range for size {size}");
        Self { rank, size }
    }

    /// Read rank and size from the environment variables set by common
    /// process launchers, falling back to a single process.
    pub fn from_env() -> Self {
        let rank = first_var(&RANK_VARS).unwrap_or(0);
        let size = first_var(&SIZE_VARS).unwrap_or(1).max(rank + 1);
        Self { rank, size }
    }

    pub fn rank(&self) -> usize { self.rank }

    pub fn size(&self) -> usize { self.size }

    /// Whether this process is the one that produces output.
    pub fn is_root(&self) -> bool { self.rank == 0 }

    /// A [`Reporter`] on standard output, active only on the root process.
    pub fn stdout(&self) -> Reporter<io::Stdout> {
        Reporter::new(io::stdout(), self.is_root())
    }
}

/// A text sink that silently discards everything on non-root processes.
#[derive(Debug)]
pub struct Reporter<W> {
    out: Option<W>,
}

impl Reporter<io::Sink> {
    /// A reporter that never writes.
    pub fn silent() -> Self { Self { out: None } }
}

impl<W: Write> Reporter<W> {
    /// Wrap a writer; output is suppressed unless `active`.
    pub fn new(out: W, active: bool) -> Self {
        Self { out: active.then_some(out) }
    }

    pub fn is_active(&self) -> bool { self.out.is_some() }

    /// Write formatted text without a trailing newline.
    pub fn print(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        match self.out.as_mut() {
            Some(out) => out.write_fmt(args),
            None => Ok(()),
        }
    }

    /// Write formatted text followed by a newline.
    pub fn println(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        match self.out.as_mut() {
            Some(out) => { out.write_fmt(args)?; out.write_all(b"\n") },
            None => Ok(()),
        }
    }

    /// Write a block of text verbatim.
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        match self.out.as_mut() {
            Some(out) => out.write_all(s.as_bytes()),
            None => Ok(()),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.out.as_mut() {
            Some(out) => out.flush(),
            None => Ok(()),
        }
    }

    /// Recover the underlying writer, if the reporter was active.
    pub fn into_inner(self) -> Option<W> { self.out }
}

/// Format `x` with `prec` significant digits in the manner of C's `%g`:
/// fixed-point for moderate exponents, scientific otherwise, with trailing
/// zeros removed.
pub fn fmt_general(x: f64, prec: usize) -> String {
    if x == 0.0 { return "0".to_string(); }
    if !x.is_finite() { return x.to_string(); }
    let prec = prec.max(1);
    // round first so that the exponent reflects the printed mantissa
    let sci = format!("{:.*e}", prec - 1, x);
    let (mant, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= prec as i32 {
        let mant = trim_zeros(mant);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mant}e{sign}{:02}", exp.abs())
    } else {
        let decimals = (prec as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

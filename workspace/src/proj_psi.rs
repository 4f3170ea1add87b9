//! Project stored wavefunction snapshots onto the basis named by `bound.num`
//! and `unbound.num`, tabulating |⟨Ψ(+)|basis⟩|².
//!
//! Snapshot time steps are read from `wf.num`; snapshots are looked up in the
//! working directory under the default prefix.

use tracing::info;
use lib::{ exit_on_error, init_tracing, Session };
use projpsi::{
    basis::{ build_basis, BasisSources },
    cache::{ load_snapshots, parse_step_ids, WavefunctionCache },
    config::read_optional,
    field::GridField,
    overlap::{ compute_overlap, DEF_PRECISION },
};

fn run() -> anyhow::Result<()> {
    let mut session = Session::start(".")?;
    let sources = BasisSources::from_dir(session.files.dir())?;
    let domain = session.domain();
    let basis = build_basis(&session.factory, domain, &sources, &mut session.out)?;

    let Some(ids_text) = read_optional(session.files.step_ids())? else {
        session.out.println(format_args!(
            "File: wf.num expected to contain a list of integers of loadable wave functions"
        ))?;
        return Ok(());
    };
    let cache = WavefunctionCache::in_dir(session.files.dir());
    let psis
        = load_snapshots::<GridField, _>(
            &cache, &parse_step_ids(&ids_text), &mut session.out)?;
    session.out.println(format_args!("The Psi(+) are loaded"))?;

    info!(basis = basis.len(), snapshots = psis.len(), "computing overlap table");
    let table = compute_overlap(&basis, &psis)?;
    session.out.write_str(&table.render("|<Psi(+)|basis>|^2", DEF_PRECISION))?;
    session.out.flush()?;
    Ok(())
}

fn main() {
    init_tracing();
    exit_on_error(run())
}

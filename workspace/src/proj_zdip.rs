//! Tabulate |⟨j|z|i⟩|² over the basis named by `bound.num` and `unbound.num`
//! in the working directory.

use tracing::info;
use lib::{ exit_on_error, init_tracing, Session };
use projpsi::{
    basis::{ build_basis, BasisSources },
    field::FieldFactory,
    overlap::{ compute_dipole, DEF_PRECISION },
    states::ZDipole,
};

fn run() -> anyhow::Result<()> {
    let mut session = Session::start(".")?;
    let sources = BasisSources::from_dir(session.files.dir())?;
    let domain = session.domain();
    let basis = build_basis(&session.factory, domain, &sources, &mut session.out)?;

    let z = session.factory.project(&ZDipole);
    info!(states = basis.len(), "computing dipole table");
    let table = compute_dipole(&basis, &z)?;
    session.out.write_str(&table.render("|<basis_m|z|basis_n>|^2", DEF_PRECISION))?;
    session.out.flush()?;
    Ok(())
}

fn main() {
    init_tracing();
    exit_on_error(run())
}

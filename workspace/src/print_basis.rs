//! Print the values of the k = (0, 0, 0.5) scattering state along the +z axis.

use lib::{ exit_on_error, init_tracing, Session };
use projpsi::{
    basis::NUCLEAR_CHARGE,
    probe::{ probe_radial, render_probe },
    states::ScatteringWF,
};

const K_PROBE: [f64; 3] = [0.0, 0.0, 0.5];
const STEP: f64 = 1.0;

fn run() -> anyhow::Result<()> {
    let mut session = Session::start(".")?;
    let unb = ScatteringWF::new(NUCLEAR_CHARGE, K_PROBE, session.domain())?;
    let samples = probe_radial(&unb, unb.domain(), 0.0, 0.0, STEP);
    session.out.write_str(&render_probe(&samples))?;
    session.out.flush()?;
    Ok(())
}

fn main() {
    init_tracing();
    exit_on_error(run())
}

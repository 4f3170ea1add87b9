//! Evaluate the form factor ⟨k| exp(i q·r) |100⟩ numerically for comparison
//! with Belkić's analytic expression.

use lib::{ exit_on_error, init_tracing, Session };
use projpsi::{
    analytic::{ belkic, K_EJECTED, Q_TRANSFER },
    report::fmt_general,
};

fn run() -> anyhow::Result<()> {
    let mut session = Session::start(".")?;
    let [kx, ky, kz] = K_EJECTED;
    let [qx, qy, qz] = Q_TRANSFER;
    session.out.println(format_args!("1 0 0"))?;
    session.out.println(format_args!("|({kx}, {ky}, {kz})>"))?;
    session.out.println(format_args!("Exp[I({qx}, {qy}, {qz}).r>"))?;
    session.out.println(format_args!("<k={kz}| Exp[iqVec.r] |100>"))?;
    let val = belkic(&session.factory, session.domain())?;
    session.out.println(format_args!(
        "({},{})", fmt_general(val.re, 6), fmt_general(val.im, 6)))?;
    session.out.flush()?;
    Ok(())
}

fn main() {
    init_tracing();
    exit_on_error(run())
}

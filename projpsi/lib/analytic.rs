//! A numerical form factor that has a closed-form counterpart, for validating
//! the overlap machinery.
//!
//! The quantity computed is
//! ```text
//! ⟨k| exp(i q·r) |100⟩
//! ```
//! with the Coulomb scattering state |**k**⟩, **k** = (0, 0, 0.5), the hydrogen
//! ground state |100⟩, and momentum transfer **q** = (0, 0, 1.5) along **k**.
//! Belkić gives the analytic value of this integral.

use num_complex::Complex64 as C64;
use crate::{
    Vec3,
    error::ProjError,
    field::{ Field, FieldFactory },
    states::{ BoundWF, PlaneWave, ScatteringWF },
};

/// Momentum of the ejected electron.
pub const K_EJECTED: Vec3 = [0.0, 0.0, 0.5];

/// Momentum transferred from the field.
pub const Q_TRANSFER: Vec3 = [0.0, 0.0, 1.5];

/// Evaluate ⟨**k**| exp(*i* **q**·**r**) |100⟩ for `k` and `q` on `factory`'s
/// backend; the scattering state is sampled out to `domain`.
pub fn form_factor<Fac>(factory: &Fac, k: Vec3, q: Vec3, domain: f64)
    -> Result<C64, ProjError>
where Fac: FieldFactory
{
    let b1s = factory.project(&BoundWF::new(1.0, 1, 0, 0)?);
    let unb = factory.project(&ScatteringWF::new(1.0, k, domain)?);
    let expiqr = factory.project(&PlaneWave::new(q));
    Ok(unb.inner(&expiqr.combine(&b1s)?)?)
}

/// [`form_factor`] at the reference momenta [`K_EJECTED`] and
/// [`Q_TRANSFER`].
pub fn belkic<Fac>(factory: &Fac, domain: f64) -> Result<C64, ProjError>
where Fac: FieldFactory
{
    form_factor(factory, K_EJECTED, Q_TRANSFER, domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ Grid, GridFactory };

    #[test]
    fn reference_value_is_finite() {
        let grid = Grid::cubic(10.0, 24).unwrap();
        let fac = GridFactory::new(grid, 1e-6);
        let val = belkic(&fac, grid.corner_radius()).unwrap();
        assert!(val.re.is_finite() && val.im.is_finite());
        assert!(val.norm() > 0.0);
    }

    #[test]
    fn zero_transfer_matches_plain_overlap() {
        let grid = Grid::cubic(8.0, 16).unwrap();
        let fac = GridFactory::new(grid, 1e-6);
        let k = [0.0, 0.3, 0.4];
        let with_q0 = form_factor(&fac, k, [0.0; 3], grid.corner_radius()).unwrap();
        let b1s = fac.project(&BoundWF::new(1.0, 1, 0, 0).unwrap());
        let unb = fac.project(&ScatteringWF::new(1.0, k, grid.corner_radius()).unwrap());
        let plain = unb.inner(&b1s).unwrap();
        assert!((with_q0 - plain).norm() < 1e-12 * plain.norm().max(1.0));
    }
}

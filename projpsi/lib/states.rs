//! Analytic eigenstates of a hydrogenic atom and related functions, as
//! [`Functor`]s that any [`FieldFactory`][crate::field::FieldFactory] can
//! project.
//!
//! All quantities are in atomic units. See [`docs`][crate::docs] for the
//! formulas.

use std::f64::consts::PI;
use num_complex::Complex64 as C64;
use crate::{
    Vec3,
    error::StateError,
    field::Functor,
    utils::{ factorial, gamma, hyp1f1, laguerre, ylm },
};

pub type StateResult<T> = Result<T, StateError>;

fn norm3(v: &Vec3) -> f64 { v.iter().map(|x| x * x).sum::<f64>().sqrt() }

fn dot3(a: &Vec3, b: &Vec3) -> f64 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

/// Bound eigenstate |*n* *l* *m*⟩ of a one-electron atom with nuclear charge
/// *Z*.
#[derive(Clone, Debug)]
pub struct BoundWF {
    z: f64,
    n: u32,
    l: u32,
    m: i32,
    norm: f64,
}

impl BoundWF {
    /// Returns [`StateError::QuantumNumbers`] unless `n ≥ 1`, `0 ≤ l < n`, and
    /// `|m| ≤ l`.
    pub fn new(z: f64, n: i32, l: i32, m: i32) -> StateResult<Self> {
        StateError::check_nlm(n, l, m)?;
        let (n, l) = (n.unsigned_abs(), l.unsigned_abs());
        let norm = (
            (2.0 * z / f64::from(n)).powi(3)
            * factorial(n - l - 1) / (2.0 * f64::from(n) * factorial(n + l))
        ).sqrt();
        Ok(Self { z, n, l, m, norm })
    }

    pub fn quantum_numbers(&self) -> (u32, u32, i32) { (self.n, self.l, self.m) }

    /// Radial part *R*ₙₗ(*r*).
    pub fn radial(&self, r: f64) -> f64 {
        let rho = 2.0 * self.z * r / f64::from(self.n);
        self.norm
            * (-rho / 2.0).exp()
            * rho.powi(self.l as i32)
            * laguerre(self.n - self.l - 1, f64::from(2 * self.l + 1), rho)
    }
}

impl Functor for BoundWF {
    fn value(&self, r: &Vec3) -> C64 {
        let rr = norm3(r);
        let cos_th = if rr > 0.0 { r[2] / rr } else { 1.0 };
        let phi = r[1].atan2(r[0]);
        self.radial(rr) * ylm(self.l, self.m, cos_th, phi)
    }
}

/// Coulomb scattering state with asymptotic momentum **k** in the field of a
/// nucleus with charge *Z*, normalized to δ(**k** - **k**′).
#[derive(Clone, Debug)]
pub struct ScatteringWF {
    k: Vec3,
    kmag: f64,
    eta: f64,
    prefactor: C64,
    domain: f64,
}

impl ScatteringWF {
    /// `domain` is the largest radius at which the state is meant to be
    /// sampled. Returns [`StateError::ZeroMomentum`] if **k** = 0.
    pub fn new(z: f64, k: Vec3, domain: f64) -> StateResult<Self> {
        let kmag = norm3(&k);
        if kmag == 0.0 { return Err(StateError::ZeroMomentum(k[0], k[1], k[2])); }
        let eta = z / kmag;
        let prefactor
            = (2.0 * PI).powf(-1.5)
            * (PI * eta / 2.0).exp()
            * gamma(C64::new(1.0, eta));
        Ok(Self { k, kmag, eta, prefactor, domain })
    }

    pub fn momentum(&self) -> &Vec3 { &self.k }

    /// Largest radius at which the state is meant to be sampled.
    pub fn domain(&self) -> f64 { self.domain }
}

impl Functor for ScatteringWF {
    fn value(&self, r: &Vec3) -> C64 {
        let kdotr = dot3(&self.k, r);
        let kr = self.kmag * norm3(r);
        self.prefactor
            * C64::from_polar(1.0, kdotr)
            * hyp1f1(
                C64::new(0.0, -self.eta),
                C64::new(1.0, 0.0),
                C64::new(0.0, -(kr + kdotr)),
            )
    }
}

/// Plane wave exp(*i* **q**·**r**).
#[derive(Clone, Debug)]
pub struct PlaneWave {
    q: Vec3,
}

impl PlaneWave {
    pub fn new(q: Vec3) -> Self { Self { q } }
}

impl Functor for PlaneWave {
    fn value(&self, r: &Vec3) -> C64 { C64::from_polar(1.0, dot3(&self.q, r)) }
}

/// Dipole weight *z* (the third Cartesian coordinate).
#[derive(Copy, Clone, Debug, Default)]
pub struct ZDipole;

impl Functor for ZDipole {
    fn value(&self, r: &Vec3) -> C64 { C64::new(r[2], 0.0) }
}

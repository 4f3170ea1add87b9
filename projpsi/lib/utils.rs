//! Miscellaneous tools: special functions needed by the eigenstate functors
//! and quadrature over sampled fields.

use std::f64::consts::PI;
use ndarray::{ self as nd, Ix3 };
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::{ DEF_EPSILON, DEF_MAXITERS };

const LANCZOS_G: f64 = 7.0;
const LANCZOS_C: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// `n!` as a float.
pub fn factorial(n: u32) -> f64 {
    (1..=n).map(f64::from).product()
}

/// Complex gamma function via the Lanczos approximation (*g* = 7), with the
/// reflection formula for `Re(z) < 1/2`.
pub fn gamma(z: C64) -> C64 {
    if z.re < 0.5 {
        PI / ((PI * z).sin() * gamma(1.0 - z))
    } else {
        let z = z - 1.0;
        let x: C64
            = LANCZOS_C.iter().enumerate().skip(1)
            .fold(C64::from(LANCZOS_C[0]), |acc, (i, ci)| acc + *ci / (z + i as f64));
        let t = z + LANCZOS_G + 0.5;
        (2.0 * PI).sqrt() * t.powc(z + 0.5) * (-t).exp() * x
    }
}

// beyond this |z| the power series cancels too badly to be trusted
const ASYMPTOTIC_Z: f64 = 20.0;

fn is_nonpositive_int(z: C64) -> bool {
    z.im == 0.0 && z.re <= 0.0 && z.re.fract() == 0.0
}

/// Reciprocal gamma function, 1/Γ(*z*), which vanishes at the poles of Γ.
pub fn rgamma(z: C64) -> C64 {
    if is_nonpositive_int(z) { C64::zero() } else { gamma(z).inv() }
}

/// Confluent hypergeometric function of the first kind, ₁F₁(*a*; *b*; *z*).
///
/// Summed as a power series for moderate |*z*|. For |*z*| > 20 (and large
/// compared to |*a*| + |*b*|) the two-term asymptotic expansion is used
/// instead, each term summed up to its smallest element. Terminating series
/// (*a* a non-positive integer) are always summed directly.
pub fn hyp1f1(a: C64, b: C64, z: C64) -> C64 {
    let crossover = ASYMPTOTIC_Z.max((a.norm() + b.norm()).powi(2));
    if z.norm() > crossover && !is_nonpositive_int(a) {
        hyp1f1_asymptotic(a, b, z)
    } else {
        hyp1f1_series(a, b, z)
    }
}

fn hyp1f1_series(a: C64, b: C64, z: C64) -> C64 {
    let mut term = C64::one();
    let mut sum = term;
    for n in 0..DEF_MAXITERS {
        let nf = n as f64;
        term *= (a + nf) / (b + nf) * z / (nf + 1.0);
        sum += term;
        if nf > z.norm() && term.norm() <= DEF_EPSILON * sum.norm() { break; }
    }
    sum
}

// Σₛ (p)ₛ (q)ₛ wˢ / s!, cut off before the terms start to grow
fn asymptotic_sum(p: C64, q: C64, w: C64) -> C64 {
    let mut term = C64::one();
    let mut sum = term;
    let mut last = f64::INFINITY;
    for n in 0..DEF_MAXITERS {
        let nf = n as f64;
        term *= (p + nf) * (q + nf) / (nf + 1.0) * w;
        let size = term.norm();
        if size >= last { break; }
        sum += term;
        last = size;
        if size <= DEF_EPSILON * sum.norm() { break; }
    }
    sum
}

// DLMF 13.7.2, taking the branch of exp(±iπa) valid for the half-plane of z
fn hyp1f1_asymptotic(a: C64, b: C64, z: C64) -> C64 {
    let sgn = if z.im >= 0.0 { 1.0 } else { -1.0 };
    let incoming
        = (C64::new(0.0, sgn * PI) * a).exp()
        * z.powc(-a)
        * rgamma(b - a)
        * asymptotic_sum(a, a - b + 1.0, -z.inv());
    let outgoing
        = z.exp()
        * z.powc(a - b)
        * rgamma(a)
        * asymptotic_sum(1.0 - a, b - a, z.inv());
    gamma(b) * (incoming + outgoing)
}

/// Generalized Laguerre polynomial *L*ₖ^(α)(*x*) by upward recurrence.
pub fn laguerre(k: u32, alpha: f64, x: f64) -> f64 {
    if k == 0 { return 1.0; }
    let mut lm1: f64 = 1.0;
    let mut l: f64 = 1.0 + alpha - x;
    for j in 1..k {
        let j = f64::from(j);
        let lp1 = ((2.0 * j + 1.0 + alpha - x) * l - (j + alpha) * lm1) / (j + 1.0);
        lm1 = l;
        l = lp1;
    }
    l
}

/// Associated Legendre function *P*ₗ^*m*(*x*) for `0 ≤ m ≤ l`, including the
/// Condon-Shortley phase.
///
/// *Panics if `m > l`*.
pub fn legendre(l: u32, m: u32, x: f64) -> f64 {
    assert!(m <= l, "utils::legendre: m must not exceed l; got l = {l}, m = {m}");
    let mut pmm: f64 = 1.0;
    if m > 0 {
        let somx2 = ((1.0 - x) * (1.0 + x)).max(0.0).sqrt();
        let mut fact: f64 = 1.0;
        for _ in 0..m {
            pmm *= -fact * somx2;
            fact += 2.0;
        }
    }
    if l == m { return pmm; }
    let mut pmmp1 = x * f64::from(2 * m + 1) * pmm;
    for ll in m + 2..=l {
        let pll = (
            x * f64::from(2 * ll - 1) * pmmp1 - f64::from(ll + m - 1) * pmm
        ) / f64::from(ll - m);
        pmm = pmmp1;
        pmmp1 = pll;
    }
    pmmp1
}

/// Spherical harmonic *Y*ₗ^*m*(θ, φ), given cos θ and φ.
///
/// *Panics if `|m| > l`*.
pub fn ylm(l: u32, m: i32, cos_th: f64, phi: f64) -> C64 {
    let ma = m.unsigned_abs();
    let norm = (
        f64::from(2 * l + 1) / (4.0 * PI) * factorial(l - ma) / factorial(l + ma)
    ).sqrt();
    let y = norm * legendre(l, ma, cos_th) * C64::from_polar(1.0, f64::from(ma) * phi);
    if m < 0 {
        if ma % 2 == 0 { y.conj() } else { -y.conj() }
    } else {
        y
    }
}

/// Calculate the inner product ⟨*q*|*p*⟩ of two fields sampled on the same
/// uniform three-dimensional grid with cell volume `dv`.
///
/// The sum is taken serially in memory order so that swapping the arguments
/// gives exactly the complex conjugate.
///
/// *Panics if the arrays have different shapes*.
pub fn wf_dot<S, T>(
    q: &nd::ArrayBase<S, Ix3>,
    p: &nd::ArrayBase<T, Ix3>,
    dv: f64,
) -> C64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    nd::Zip::from(q).and(p)
        .fold(C64::zero(), |acc, qk, pk| acc + qk.conj() * *pk)
        * dv
}

/// Calculate the squared norm ⟨*q*|*q*⟩ of a sampled field.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix3>, dv: f64) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum::<f64>() * dv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_matches_factorials() {
        for n in 1..8_u32 {
            let g = gamma(C64::from(f64::from(n)));
            assert!((g.re - factorial(n - 1)).abs() < 1e-9 * factorial(n - 1));
            assert!(g.im.abs() < 1e-9);
        }
        // Γ(-1/2) = -2√π, through the reflection branch
        let g = gamma(C64::new(-0.5, 0.0));
        assert!((g.re + 2.0 * PI.sqrt()).abs() < 1e-12);
        // |Γ(1 + iy)|² = πy / sinh(πy)
        let y: f64 = 1.0 / 0.52;
        let g = gamma(C64::new(1.0, y));
        assert!((g.norm_sqr() - PI * y / (PI * y).sinh()).abs() < 1e-10);
    }

    #[test]
    fn hyp1f1_known_values() {
        // ₁F₁(a; a; z) = e^z
        let z = C64::new(0.3, -2.0);
        let a = C64::new(1.5, 0.25);
        assert!((hyp1f1(a, a, z) - z.exp()).norm() < 1e-12);
        // terminating series: ₁F₁(-1; 1; z) = 1 - z
        let z = C64::new(4.0, 1.0);
        assert!((hyp1f1(C64::from(-1.0), C64::one(), z) - (1.0 - z)).norm() < 1e-12);
    }

    #[test]
    fn hyp1f1_large_argument() {
        // |₁F₁(-iη; 1; -ix)| → e^(-πη/2) / |Γ(1 + iη)| as x → ∞
        for eta in [0.33, 0.5, 1.0] {
            let a = C64::new(0.0, -eta);
            let limit = (-PI * eta / 2.0).exp() / gamma(C64::new(1.0, eta)).norm();
            let far = hyp1f1(a, C64::one(), C64::new(0.0, -1e4));
            assert!((far.norm() - limit).abs() < 1e-3 * limit);
        }
        // both branches agree on either side of the crossover
        let a = C64::new(0.0, -0.5);
        let below = hyp1f1_series(a, C64::one(), C64::new(0.0, -21.0));
        let above = hyp1f1_asymptotic(a, C64::one(), C64::new(0.0, -21.0));
        assert!((below - above).norm() < 1e-6 * below.norm());
        // ₁F₁(a; a; z) = e^z also on the asymptotic branch
        let z = C64::new(30.0, 5.0);
        let a = C64::new(0.5, 0.0);
        assert!((hyp1f1(a, a, z) - z.exp()).norm() < 1e-10 * z.exp().norm());
        assert_eq!(rgamma(C64::new(-2.0, 0.0)), C64::zero());
    }

    #[test]
    fn laguerre_and_legendre() {
        // L₂^(1)(x) = x²/2 - 3x + 3
        let x: f64 = 0.7;
        assert!((laguerre(2, 1.0, x) - (x * x / 2.0 - 3.0 * x + 3.0)).abs() < 1e-14);
        // P₂⁰(x) = (3x² - 1)/2; P₁¹(x) = -√(1 - x²)
        assert!((legendre(2, 0, x) - (3.0 * x * x - 1.0) / 2.0).abs() < 1e-14);
        assert!((legendre(1, 1, x) + (1.0 - x * x).sqrt()).abs() < 1e-14);
    }

    #[test]
    fn ylm_conjugation() {
        let (c, phi) = (0.3, 1.1);
        let yp = ylm(2, 1, c, phi);
        let ym = ylm(2, -1, c, phi);
        assert!((ym + yp.conj()).norm() < 1e-14);
        assert!((ylm(0, 0, c, phi).re - (4.0 * PI).sqrt().recip()).abs() < 1e-14);
    }

    #[test]
    fn dot_is_conjugate_symmetric() {
        let q: nd::Array3<C64>
            = nd::Array3::from_shape_fn((3, 4, 2), |(i, j, k)| {
                C64::new(i as f64 - j as f64, (k + 1) as f64 * 0.5)
            });
        let p: nd::Array3<C64>
            = nd::Array3::from_shape_fn((3, 4, 2), |(i, j, k)| {
                C64::new((i * j) as f64, -(k as f64))
            });
        assert_eq!(wf_dot(&q, &p, 0.1), wf_dot(&p, &q, 0.1).conj());
        assert!((wf_dot(&q, &q, 0.1).re - wf_norm(&q, 0.1)).abs() < 1e-12);
    }
}

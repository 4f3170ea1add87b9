//! Point sampling of analytic states along a ray, for checking a state's
//! values by eye.

use num_complex::Complex64 as C64;
use crate::field::Functor;

/// Sample `f` at `r = 0, step, 2 step, ...` while `r < domain`, along the ray
/// with polar angle `theta` and azimuth `phi`.
///
/// *Panics if `step` is not positive*.
pub fn probe_radial<F>(f: &F, domain: f64, theta: f64, phi: f64, step: f64)
    -> Vec<(f64, C64)>
where F: Functor
{
    assert!(step > 0.0, "probe::probe_radial: step must be positive; got {step}");
    let (sin_th, cos_th) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    (0..)
        .map(|i| i as f64 * step)
        .take_while(|r| *r < domain)
        .map(|r| {
            let point = [r * sin_th * cos_phi, r * sin_th * sin_phi, r * cos_th];
            (r, f.value(&point))
        })
        .collect()
}

/// Render samples as `r  Re  Im` lines in two-digit scientific notation.
pub fn render_probe(samples: &[(f64, C64)]) -> String {
    samples.iter()
        .map(|(r, v)| format!("{r:.2e}\t{:.2e}\t{:.2e}\n", v.re, v.im))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::PlaneWave;

    #[test]
    fn samples_along_z() {
        let pw = PlaneWave::new([0.0, 0.0, 0.5]);
        let samples = probe_radial(&pw, 4.0, 0.0, 0.0, 1.0);
        let radii: Vec<f64> = samples.iter().map(|(r, _)| *r).collect();
        assert_eq!(radii, vec![0.0, 1.0, 2.0, 3.0]);
        assert!((samples[2].1 - C64::from_polar(1.0, 1.0)).norm() < 1e-14);
        let text = render_probe(&samples[..1]);
        assert_eq!(text, "0.00e0\t1.00e0\t0.00e0\n");
    }

    #[test]
    fn off_axis_ray() {
        // along +x the plane wave has no phase
        let pw = PlaneWave::new([0.0, 0.0, 0.5]);
        let samples = probe_radial(&pw, 3.0, std::f64::consts::FRAC_PI_2, 0.0, 0.5);
        assert_eq!(samples.len(), 6);
        assert!(samples.iter().all(|(_, v)| (v.re - 1.0).abs() < 1e-14));
    }
}

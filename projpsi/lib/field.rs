//! The field capability and the uniform-grid backend that implements it.
//!
//! Everything above this module treats a field as an opaque value supporting
//! [pointwise evaluation][Field::evaluate], [pointwise
//! combination][Field::combine], [inner products][Field::inner], and
//! [truncation][Field::truncate]. New numerical backends need only implement
//! [`Field`] and [`FieldFactory`].
//!
//! The shipped backend, [`GridField`], samples a complex-valued function at
//! the centers of `n`³ equal cubic cells tiling `[lo, hi]`³. Truncation
//! zeroes every sample whose magnitude falls below the field's threshold.

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Vec3,
    error::FieldError,
    utils::wf_dot,
};

pub type FieldResult<T> = Result<T, FieldError>;

/// A continuous scalar field over a bounded region of space.
pub trait Field: Sized {
    /// Value of the field at a point.
    fn evaluate(&self, r: &Vec3) -> C64;

    /// Pointwise product of two fields.
    fn combine(&self, other: &Self) -> FieldResult<Self>;

    /// Inner product ⟨`self`|`other`⟩, antilinear in `self`.
    fn inner(&self, other: &Self) -> FieldResult<C64>;

    /// Discard components below the field's accuracy threshold.
    fn truncate(&mut self);
}

/// An analytic function that can be projected onto a numerical backend.
pub trait Functor: Sync {
    fn value(&self, r: &Vec3) -> C64;
}

/// Constructs fields of one backend type from analytic functions.
pub trait FieldFactory {
    type Field: Field;

    /// Project `f` onto the backend, returning the truncated result.
    fn project<F>(&self, f: &F) -> Self::Field
    where F: Functor;
}

/// A cubic cell `[lo, hi]`³ divided into `n` cells along each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    lo: f64,
    hi: f64,
    n: usize,
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]^3 / {}^3", self.lo, self.hi, self.n)
    }
}

impl Grid {
    /// Create a new grid, checking that the cell is non-empty.
    pub fn new(lo: f64, hi: f64, n: usize) -> FieldResult<Self> {
        (hi > lo && n > 0)
            .then_some(Self { lo, hi, n })
            .ok_or(FieldError::BadGrid { lo, hi, n })
    }

    /// Create a grid symmetric about the origin, `[-l, l]`³.
    pub fn cubic(l: f64, n: usize) -> FieldResult<Self> { Self::new(-l, l, n) }

    pub fn lo(&self) -> f64 { self.lo }

    pub fn hi(&self) -> f64 { self.hi }

    /// Number of cells along each axis.
    pub fn n(&self) -> usize { self.n }

    /// Width of a single cell.
    pub fn dx(&self) -> f64 { (self.hi - self.lo) / self.n as f64 }

    /// Volume of a single cell.
    pub fn dv(&self) -> f64 { self.dx().powi(3) }

    /// Distance from the center of the cell to any of its corners.
    pub fn corner_radius(&self) -> f64 {
        let c = (self.hi - self.lo) / 2.0;
        3.0_f64.sqrt() * c
    }

    /// Coordinate of the `i`-th sample along an axis.
    pub fn coord(&self, i: usize) -> f64 {
        self.lo + (i as f64 + 0.5) * self.dx()
    }

    /// Position of the sample with indices `(i, j, k)`.
    pub fn point(&self, (i, j, k): (usize, usize, usize)) -> Vec3 {
        [self.coord(i), self.coord(j), self.coord(k)]
    }

    // index of the cell containing `x`, if any
    fn index(&self, x: f64) -> Option<usize> {
        if !(self.lo..=self.hi).contains(&x) { return None; }
        let i = ((x - self.lo) / self.dx()).floor() as usize;
        Some(i.min(self.n - 1))
    }

    fn shape(&self) -> (usize, usize, usize) { (self.n, self.n, self.n) }
}

/// A complex field sampled on a [`Grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridField {
    pub(crate) grid: Grid,
    pub(crate) thresh: f64,
    pub(crate) values: nd::Array3<C64>,
}

impl GridField {
    /// Wrap an array of samples, checking its shape against `grid`.
    pub fn from_samples(grid: Grid, thresh: f64, values: nd::Array3<C64>)
        -> FieldResult<Self>
    {
        let n = grid.n();
        if values.shape() != [n, n, n] {
            return Err(FieldError::Shape { n, got: values.shape().to_vec() });
        }
        Ok(Self { grid, thresh, values })
    }

    pub fn grid(&self) -> &Grid { &self.grid }

    /// Truncation threshold.
    pub fn thresh(&self) -> f64 { self.thresh }

    /// Raw samples.
    pub fn values(&self) -> nd::ArrayView3<'_, C64> { self.values.view() }

    /// Number of samples that survived truncation.
    pub fn nonzero(&self) -> usize {
        self.values.iter().filter(|v| **v != C64::new(0.0, 0.0)).count()
    }
}

impl Field for GridField {
    fn evaluate(&self, r: &Vec3) -> C64 {
        let idx = (
            self.grid.index(r[0]),
            self.grid.index(r[1]),
            self.grid.index(r[2]),
        );
        match idx {
            (Some(i), Some(j), Some(k)) => self.values[[i, j, k]],
            _ => C64::new(0.0, 0.0),
        }
    }

    fn combine(&self, other: &Self) -> FieldResult<Self> {
        FieldError::check_grids(&self.grid, &other.grid)?;
        let values = &self.values * &other.values;
        let thresh = self.thresh.min(other.thresh);
        Ok(Self { grid: self.grid, thresh, values })
    }

    fn inner(&self, other: &Self) -> FieldResult<C64> {
        FieldError::check_grids(&self.grid, &other.grid)?;
        Ok(wf_dot(&self.values, &other.values, self.grid.dv()))
    }

    fn truncate(&mut self) {
        let thresh = self.thresh;
        self.values.par_mapv_inplace(|v| {
            if v.norm() < thresh { C64::new(0.0, 0.0) } else { v }
        });
    }
}

/// Projects functors onto a fixed [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridFactory {
    grid: Grid,
    thresh: f64,
}

impl GridFactory {
    pub fn new(grid: Grid, thresh: f64) -> Self { Self { grid, thresh } }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn thresh(&self) -> f64 { self.thresh }
}

impl FieldFactory for GridFactory {
    type Field = GridField;

    fn project<F>(&self, f: &F) -> GridField
    where F: Functor
    {
        let grid = self.grid;
        let mut values: nd::Array3<C64> = nd::Array3::zeros(grid.shape());
        nd::Zip::indexed(&mut values)
            .par_for_each(|ijk, v| { *v = f.value(&grid.point(ijk)); });
        let mut field = GridField { grid, thresh: self.thresh, values };
        field.truncate();
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gaussian(f64);

    impl Functor for Gaussian {
        fn value(&self, r: &Vec3) -> C64 {
            let r2: f64 = r.iter().map(|x| x * x).sum();
            C64::from((-self.0 * r2).exp())
        }
    }

    struct Coord(usize);

    impl Functor for Coord {
        fn value(&self, r: &Vec3) -> C64 { C64::new(0.0, r[self.0]) }
    }

    fn factory(n: usize) -> GridFactory {
        GridFactory::new(Grid::cubic(5.0, n).unwrap(), 1e-8)
    }

    #[test]
    fn grid_geometry() {
        let g = Grid::cubic(2.0, 4).unwrap();
        assert_eq!(g.dx(), 1.0);
        assert_eq!(g.coord(0), -1.5);
        assert_eq!(g.point((3, 0, 1)), [1.5, -1.5, -0.5]);
        assert!(Grid::cubic(0.0, 4).is_err());
        assert!(Grid::cubic(1.0, 0).is_err());
    }

    #[test]
    fn gaussian_norm() {
        // ∫ exp(-2 r²) d³r = (π/2)^(3/2)
        let f = factory(40).project(&Gaussian(1.0));
        let norm = f.inner(&f).unwrap();
        let expected = (std::f64::consts::PI / 2.0).powf(1.5);
        assert!((norm.re - expected).abs() < 1e-3 * expected);
        assert_eq!(norm.im, 0.0);
    }

    #[test]
    fn evaluate_and_combine() {
        let fac = factory(10);
        let g = fac.project(&Gaussian(0.5));
        let x = fac.project(&Coord(0));
        let gx = g.combine(&x).unwrap();
        let r = fac.grid().point((7, 4, 5));
        assert_eq!(gx.evaluate(&r), g.evaluate(&r) * x.evaluate(&r));
        assert_eq!(g.evaluate(&[100.0, 0.0, 0.0]), C64::new(0.0, 0.0));
        // odd integrand on a symmetric grid
        assert!(g.inner(&gx).unwrap().norm() < 1e-12);
    }

    #[test]
    fn truncation_drops_small_samples() {
        let fac = GridFactory::new(Grid::cubic(5.0, 20).unwrap(), 1e-3);
        let f = fac.project(&Gaussian(1.0));
        assert!(f.nonzero() < 20 * 20 * 20);
        assert!(f.values().iter().all(|v| *v == C64::new(0.0, 0.0) || v.norm() >= 1e-3));
    }

    #[test]
    fn grid_mismatch() {
        let a = factory(8).project(&Gaussian(1.0));
        let b = factory(10).project(&Gaussian(1.0));
        assert!(matches!(a.inner(&b), Err(FieldError::GridMismatch(..))));
        assert!(a.combine(&b).is_err());
    }
}

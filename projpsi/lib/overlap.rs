//! Squared-magnitude overlap tables between two ordered sets of labeled
//! fields.
//!
//! [`compute_overlap`] tabulates the correlation amplitudes
//! |⟨col|row⟩|² for every pair of fields, with rows outer. [`compute_dipole`]
//! does the same for a single basis against itself with a weighting field
//! (usually *z*) inserted, |⟨*j*|*w*|*i*⟩|², for use in perturbative
//! transition estimates.
//!
//! Tables render as plain text: a title line, a header of kets, then one row
//! per bra:
//! ```text
//!         |<Psi(+)|basis>|^2
//!         |3>     |7>
//! <100|   0.0123  0.0456
//! ```

use ndarray as nd;
use tracing::debug;
use crate::{
    basis::LabeledField,
    field::{ Field, FieldResult },
    report::fmt_general,
};

/// Significant digits used when rendering table entries.
pub const DEF_PRECISION: usize = 8;

/// A dense table of non-negative reals indexed by (bra, ket) labels.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlapTable {
    /// Row labels, one per entry of the row basis.
    pub bras: Vec<String>,
    /// Column labels, one per entry of the column basis.
    pub kets: Vec<String>,
    /// `values[[i, j]]` pairs `bras[i]` with `kets[j]`.
    pub values: nd::Array2<f64>,
}

impl OverlapTable {
    pub fn nrows(&self) -> usize { self.bras.len() }

    pub fn ncols(&self) -> usize { self.kets.len() }

    /// Swap the roles of rows and columns.
    pub fn transpose(&self) -> Self {
        Self {
            bras: self.kets.clone(),
            kets: self.bras.clone(),
            values: self.values.t().to_owned(),
        }
    }

    /// Render as text with `title` on the first line and entries formatted to
    /// `precision` significant digits.
    pub fn render(&self, title: &str, precision: usize) -> String {
        let width
            = self.bras.iter()
            .map(|b| b.chars().count() + 2)
            .max()
            .unwrap_or(0)
            .max(8);
        let header: String
            = self.kets.iter()
            .map(|ket| format!("|{ket}>\t"))
            .collect();
        let rows: String
            = self.bras.iter().zip(self.values.rows())
            .map(|(bra, row)| {
                let entries: String
                    = row.iter()
                    .map(|v| format!(" {}\t", fmt_general(*v, precision)))
                    .collect();
                format!("{:width$}{entries}\n", format!("<{bra}|"))
            })
            .collect();
        format!("{:width$}{title}\n{:width$}{header}\n{rows}", "", "")
    }
}

/// Compute |⟨`cols[j]`|`rows[i]`⟩|² for every pair.
pub fn compute_overlap<F: Field>(
    rows: &[LabeledField<F>],
    cols: &[LabeledField<F>],
) -> FieldResult<OverlapTable>
{
    let mut values: nd::Array2<f64> = nd::Array2::zeros((rows.len(), cols.len()));
    for (row, mut vrow) in rows.iter().zip(values.rows_mut()) {
        for (col, v) in cols.iter().zip(vrow.iter_mut()) {
            *v = col.value.inner(&row.value)?.norm_sqr();
        }
    }
    debug!(rows = rows.len(), cols = cols.len(), "computed overlap table");
    Ok(OverlapTable {
        bras: rows.iter().map(|r| r.label.clone()).collect(),
        kets: cols.iter().map(|c| c.label.clone()).collect(),
        values,
    })
}

/// Compute |⟨`basis[j]`|`weight` · `basis[i]`⟩|² for every pair.
pub fn compute_dipole<F: Field>(basis: &[LabeledField<F>], weight: &F)
    -> FieldResult<OverlapTable>
{
    let n = basis.len();
    let mut values: nd::Array2<f64> = nd::Array2::zeros((n, n));
    for (row, mut vrow) in basis.iter().zip(values.rows_mut()) {
        let weighted = weight.combine(&row.value)?;
        for (col, v) in basis.iter().zip(vrow.iter_mut()) {
            *v = col.value.inner(&weighted)?.norm_sqr();
        }
    }
    debug!(states = n, "computed dipole table");
    let labels: Vec<String> = basis.iter().map(|b| b.label.clone()).collect();
    Ok(OverlapTable { bras: labels.clone(), kets: labels, values })
}

//! Sparse + sparse addition.

use super::{combine_cvs, combine_dok, sum};
use dokmat_core::{Cvs, DokMatrix, Element, KeyStrategy, Result};

/// `target <- a + b`. All three shapes must agree. Entries already in
/// `target` that neither operand touches are left alone.
pub fn add_dok<T, KA, KB, KT>(a: &DokMatrix<T, KA>, b: &DokMatrix<T, KB>, target: &DokMatrix<T, KT>) -> Result<()>
where
    T: Element,
    KA: KeyStrategy,
    KB: KeyStrategy,
    KT: KeyStrategy,
{
    combine_dok(a, b, target, sum::<T>)
}

/// `a + b` as a new CVS in `a`'s major order.
pub fn add_cvs<T: Element>(a: &Cvs<T>, b: &Cvs<T>) -> Result<Cvs<T>> {
    combine_cvs(a, b, sum::<T>)
}

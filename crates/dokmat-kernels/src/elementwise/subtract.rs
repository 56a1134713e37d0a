//! Sparse - sparse subtraction.

use super::{combine_cvs, combine_dok, difference};
use dokmat_core::{Cvs, DokMatrix, Element, KeyStrategy, Result};
use std::ops::Neg;

/// `target <- a - b`. A key present only in `b` is stored as `-b`.
pub fn sub_dok<T, KA, KB, KT>(a: &DokMatrix<T, KA>, b: &DokMatrix<T, KB>, target: &DokMatrix<T, KT>) -> Result<()>
where
    T: Element + Neg<Output = T>,
    KA: KeyStrategy,
    KB: KeyStrategy,
    KT: KeyStrategy,
{
    combine_dok(a, b, target, difference::<T>)
}

/// `a - b` as a new CVS in `a`'s major order.
pub fn sub_cvs<T: Element + Neg<Output = T>>(a: &Cvs<T>, b: &Cvs<T>) -> Result<Cvs<T>> {
    combine_cvs(a, b, difference::<T>)
}

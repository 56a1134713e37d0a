//! Matrix-scalar products.

use crate::utility::util::try_fan_out;
use dokmat_core::{Cvs, DokMatrix, Element, KeyStrategy, Result, SparseError};

/// `target <- scalar * a`. A zero scalar clears `target`; zero products are
/// removed rather than stored.
pub fn scale_dok<T, KA, KT>(a: &DokMatrix<T, KA>, scalar: T, target: &DokMatrix<T, KT>) -> Result<()>
where
    T: Element,
    KA: KeyStrategy,
    KT: KeyStrategy,
{
    SparseError::check_shape(a.shape(), target.shape())?;
    if scalar.is_zero() {
        target.clear();
        return Ok(());
    }
    let entries = a.coordinate_entries();
    try_fan_out(entries, |((i, j), v)| {
        let product = v * scalar;
        target.update(target.key_at(i, j), |_| (!product.is_zero()).then_some(product))?;
        Ok(())
    })
}

/// `a <- scalar * a` under a single write lock.
pub fn scale_dok_in_place<T: Element, K: KeyStrategy>(a: &DokMatrix<T, K>, scalar: T) {
    if scalar.is_zero() {
        a.clear();
        return;
    }
    a.retain_map(|v| {
        let product = v * scalar;
        (!product.is_zero()).then_some(product)
    });
}

/// `scalar * a` as a new CVS. Equal products keep separate slots.
#[must_use]
pub fn scale_cvs<T: Element>(a: &Cvs<T>, scalar: T) -> Cvs<T> {
    if scalar.is_zero() {
        return Cvs::empty(a.shape(), a.order());
    }
    let mut out = a.clone();
    out.scale_in_place(scalar);
    out
}

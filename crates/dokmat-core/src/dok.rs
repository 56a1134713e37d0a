//! Dictionary-of-keys sparse store.
//!
//! A [`DokMatrix`] maps keys to values behind a per-instance lock. Keys are
//! interpreted by a [`KeyStrategy`]: either `(row, col)` pairs
//! ([`CoordinateKeys`]) or linear indices ([`LinearIndexKeys`]) flattened in
//! the store's [`MajorOrder`]. Every mutating call validates the key and
//! writes while holding the write lock, so no out-of-bounds key is ever stored.
//!
//! Absent keys read as the diagonal value on the diagonal and as the default
//! value elsewhere.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::coords::{self, MajorOrder};
use crate::dense::Dense;
use crate::element::Element;
use crate::error::Result;

/// Interpretation of a store key as matrix coordinates.
pub trait KeyStrategy: Send + Sync + 'static {
    type Key: Copy + Eq + Hash + Ord + fmt::Debug + Send + Sync + 'static;

    /// Whether keys are linear indices.
    const IS_LINEAR: bool;

    /// Coordinates of `key` without bounds checking.
    fn key_coordinates(shape: (usize, usize), order: MajorOrder, key: Self::Key) -> (usize, usize);

    /// Key for in-bounds coordinates.
    fn from_coordinates(shape: (usize, usize), order: MajorOrder, coordinates: (usize, usize)) -> Self::Key;

    /// Coordinates of `key`, failing with `CoordinateOutOfBounds`.
    #[inline]
    fn validate(shape: (usize, usize), order: MajorOrder, key: Self::Key) -> Result<(usize, usize)> {
        let (row, col) = Self::key_coordinates(shape, order, key);
        coords::check_coordinates(shape, row, col)?;
        Ok((row, col))
    }
}

/// Keys are `(row, col)` pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateKeys;

impl KeyStrategy for CoordinateKeys {
    type Key = (usize, usize);
    const IS_LINEAR: bool = false;

    #[inline]
    fn key_coordinates(_shape: (usize, usize), _order: MajorOrder, key: Self::Key) -> (usize, usize) {
        key
    }

    #[inline]
    fn from_coordinates(_shape: (usize, usize), _order: MajorOrder, coordinates: (usize, usize)) -> Self::Key {
        coordinates
    }
}

/// Keys are linear indices in the store's major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearIndexKeys;

impl KeyStrategy for LinearIndexKeys {
    type Key = usize;
    const IS_LINEAR: bool = true;

    #[inline]
    fn key_coordinates(shape: (usize, usize), order: MajorOrder, key: Self::Key) -> (usize, usize) {
        coords::to_coordinates(shape, key, order)
    }

    #[inline]
    fn from_coordinates(shape: (usize, usize), order: MajorOrder, coordinates: (usize, usize)) -> Self::Key {
        coords::to_linear_index(shape, coordinates.0, coordinates.1, order)
    }

    /// Also rejects shapes too large to be addressed by a linear index.
    #[inline]
    fn validate(shape: (usize, usize), order: MajorOrder, key: Self::Key) -> Result<(usize, usize)> {
        coords::linear_len(shape)?;
        let (row, col) = Self::key_coordinates(shape, order, key);
        coords::check_coordinates(shape, row, col)?;
        Ok((row, col))
    }
}

pub type CoordinateMatrix<T> = DokMatrix<T, CoordinateKeys>;
pub type LinearIndexMatrix<T> = DokMatrix<T, LinearIndexKeys>;

pub struct DokMatrix<T, K: KeyStrategy = CoordinateKeys> {
    nrows: usize,
    ncols: usize,
    order: MajorOrder,
    default: T,
    diagonal: T,
    entries: RwLock<HashMap<K::Key, T>>,
    keys: PhantomData<fn() -> K>,
}

impl<T: Element, K: KeyStrategy> DokMatrix<T, K> {
    /// Empty store whose default and diagonal values are zero.
    #[must_use]
    pub fn new(shape: (usize, usize), order: MajorOrder) -> Self {
        Self::with_defaults(shape, order, T::zero(), T::zero())
    }

    #[must_use]
    pub fn with_defaults(shape: (usize, usize), order: MajorOrder, default: T, diagonal: T) -> Self {
        Self {
            nrows: shape.0,
            ncols: shape.1,
            order,
            default,
            diagonal,
            entries: RwLock::new(HashMap::new()),
            keys: PhantomData,
        }
    }

    /// Store holding every cell of `dense` that differs from its fallback.
    #[must_use]
    pub fn from_dense(dense: &Dense<T>, order: MajorOrder, default: T, diagonal: T) -> Self {
        let m = Self::with_defaults(dense.shape(), order, default, diagonal);
        {
            let mut map = m.entries.write();
            for (row, col, value) in dense.iter() {
                if value != m.fallback(row, col) {
                    map.insert(K::from_coordinates(m.shape(), order, (row, col)), value);
                }
            }
        }
        m
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    #[must_use]
    pub const fn order(&self) -> MajorOrder {
        self.order
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> T {
        self.default
    }

    #[inline]
    #[must_use]
    pub fn diagonal_value(&self) -> T {
        self.diagonal
    }

    #[inline]
    #[must_use]
    pub const fn is_linear_indexed(&self) -> bool {
        K::IS_LINEAR
    }

    /// Value an absent key reads as.
    #[inline]
    #[must_use]
    pub fn fallback(&self, row: usize, col: usize) -> T {
        if row == col {
            self.diagonal
        } else {
            self.default
        }
    }

    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    #[inline]
    #[must_use]
    pub fn key_at(&self, row: usize, col: usize) -> K::Key {
        K::from_coordinates(self.shape(), self.order, (row, col))
    }

    pub fn key_to_coordinates(&self, key: K::Key) -> Result<(usize, usize)> {
        K::validate(self.shape(), self.order, key)
    }

    /// Linear index of `key` under `order`, which may differ from the store's.
    pub fn key_to_linear_index(&self, key: K::Key, order: MajorOrder) -> Result<usize> {
        coords::linear_len(self.shape())?;
        let (row, col) = self.key_to_coordinates(key)?;
        Ok(coords::to_linear_index(self.shape(), row, col, order))
    }

    pub fn get(&self, key: K::Key) -> Result<T> {
        let map = self.entries.read();
        let (row, col) = K::validate(self.shape(), self.order, key)?;
        Ok(map.get(&key).copied().unwrap_or_else(|| self.fallback(row, col)))
    }

    pub fn get_at(&self, row: usize, col: usize) -> Result<T> {
        coords::check_coordinates(self.shape(), row, col)?;
        self.get(self.key_at(row, col))
    }

    #[must_use]
    pub fn contains_key(&self, key: K::Key) -> bool {
        self.entries.read().contains_key(&key)
    }

    /// Inserts or overwrites; returns the previous stored value.
    pub fn upsert(&self, key: K::Key, value: T) -> Result<Option<T>> {
        let mut map = self.entries.write();
        K::validate(self.shape(), self.order, key)?;
        Ok(map.insert(key, value))
    }

    pub fn set(&self, key: K::Key, value: T) -> Result<()> {
        self.upsert(key, value).map(|_| ())
    }

    pub fn set_at(&self, row: usize, col: usize, value: T) -> Result<()> {
        coords::check_coordinates(self.shape(), row, col)?;
        self.set(self.key_at(row, col), value)
    }

    /// Inserts only when `key` is absent. Returns whether it was inserted.
    pub fn try_insert(&self, key: K::Key, value: T) -> Result<bool> {
        let mut map = self.entries.write();
        K::validate(self.shape(), self.order, key)?;
        if map.contains_key(&key) {
            return Ok(false);
        }
        map.insert(key, value);
        Ok(true)
    }

    /// Removes `key` if present.
    pub fn remove(&self, key: K::Key) -> Option<T> {
        self.entries.write().remove(&key)
    }

    /// Atomic read-modify-write of one key.
    ///
    /// `f` receives the stored value (`None` when absent); returning `None`
    /// deletes the key. Returns the value left in the store.
    pub fn update<F>(&self, key: K::Key, f: F) -> Result<Option<T>>
    where
        F: FnOnce(Option<T>) -> Option<T>,
    {
        let mut map = self.entries.write();
        K::validate(self.shape(), self.order, key)?;
        let next = f(map.get(&key).copied());
        match next {
            Some(value) => {
                map.insert(key, value);
            }
            None => {
                map.remove(&key);
            }
        }
        Ok(next)
    }

    /// Rewrites every stored value in place; `None` deletes the entry.
    pub fn retain_map<F>(&self, mut f: F)
    where
        F: FnMut(T) -> Option<T>,
    {
        self.entries.write().retain(|_, v| match f(*v) {
            Some(next) => {
                *v = next;
                true
            }
            None => false,
        });
    }

    /// Snapshot of the stored entries, in no particular order.
    #[must_use]
    pub fn entries(&self) -> Vec<(K::Key, T)> {
        self.entries.read().iter().map(|(&k, &v)| (k, v)).collect()
    }

    /// Snapshot of the stored entries keyed by coordinates.
    #[must_use]
    pub fn coordinate_entries(&self) -> Vec<((usize, usize), T)> {
        let shape = self.shape();
        self.entries
            .read()
            .iter()
            .map(|(&k, &v)| (K::key_coordinates(shape, self.order, k), v))
            .collect()
    }

    /// Dense copy filled with the default and diagonal values.
    #[must_use]
    pub fn to_dense(&self) -> Dense<T> {
        let mut dense = Dense::new(self.shape(), self.default, self.diagonal);
        for ((row, col), value) in self.coordinate_entries() {
            dense.put(row, col, value);
        }
        dense
    }
}

impl<T: Element, K: KeyStrategy> Clone for DokMatrix<T, K> {
    fn clone(&self) -> Self {
        Self {
            nrows: self.nrows,
            ncols: self.ncols,
            order: self.order,
            default: self.default,
            diagonal: self.diagonal,
            entries: RwLock::new(self.entries.read().clone()),
            keys: PhantomData,
        }
    }
}

impl<T: Element, K: KeyStrategy> fmt::Debug for DokMatrix<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DokMatrix")
            .field("nrows", &self.nrows)
            .field("ncols", &self.ncols)
            .field("order", &self.order)
            .field("linear", &K::IS_LINEAR)
            .field("nnz", &self.nnz())
            .finish()
    }
}

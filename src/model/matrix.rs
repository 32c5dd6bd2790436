//! Dense square matrices stored row-major in a flat buffer.

use std::ops::{Index, IndexMut};

/// An `n×n` matrix backed by a single `Vec<T>`.
///
/// Used for true distances, augmented distances, penalties and edge usage
/// counts. Indexing is `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquareMatrix<T> {
    dim: usize,
    data: Vec<T>,
}

/// Matrix of edge lengths (true or augmented).
pub type DistanceMatrix = SquareMatrix<f64>;

/// Matrix of edge usage counts across local optima.
pub type UsageMatrix = SquareMatrix<u32>;

impl<T: Clone> SquareMatrix<T> {
    /// Creates a `dim×dim` matrix filled with `value`.
    pub fn filled(dim: usize, value: T) -> Self {
        Self {
            dim,
            data: vec![value; dim * dim],
        }
    }

    /// Sets every entry to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> SquareMatrix<T> {
    /// Builds a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                data.push(f(i, j));
            }
        }
        Self { dim, data }
    }

    /// Builds a matrix from nested rows.
    ///
    /// Returns `None` if the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let dim = rows.len();
        if rows.iter().any(|r| r.len() != dim) {
            return None;
        }
        let data = rows.into_iter().flatten().collect();
        Some(Self { dim, data })
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterates `(row, col, value)` over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let dim = self.dim;
        self.data
            .iter()
            .enumerate()
            .map(move |(k, v)| (k / dim, k % dim, v))
    }

    /// Raw row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy> SquareMatrix<T> {
    /// Returns the entry at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.dim + j]
    }

    /// Sets the entry at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.data[i * self.dim + j] = value;
    }

    /// Sets both `(i, j)` and `(j, i)`.
    #[inline]
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: T) {
        self.set(i, j, value);
        self.set(j, i, value);
    }
}

impl<T: Copy + PartialEq> SquareMatrix<T> {
    /// Returns `true` if `(i, j)` equals `(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| (i + 1..self.dim).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

impl<T> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.dim + j]
    }
}

impl<T> IndexMut<(usize, usize)> for SquareMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.dim + j]
    }
}
